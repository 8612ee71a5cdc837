use agrilink_core::navigation::Route;

use crate::commands::common::AppContext;
use crate::error::CliError;

pub async fn run_ask(message: &[String], ctx: &mut AppContext) -> Result<(), CliError> {
    ctx.require_route(Route::AdminAssistant)?;

    let message = message.join(" ");
    if message.trim().is_empty() {
        return Err(CliError::InvalidInput(
            "Ask needs a question, e.g. `agrilink ask why are my maize leaves yellow`".to_string(),
        ));
    }

    let result = ctx.api.admin().chat(&message).await;
    let reply = ctx.checked(result)?;
    println!("{}", reply.reply);
    Ok(())
}
