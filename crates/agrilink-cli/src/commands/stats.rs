use agrilink_core::navigation::Route;

use crate::cli::StatsCommands;
use crate::commands::common::{
    format_performance_lines, format_region_lines, print_json, print_lines, AppContext,
};
use crate::error::CliError;

pub async fn run_stats(command: StatsCommands, ctx: &mut AppContext) -> Result<(), CliError> {
    ctx.require_route(Route::AdminStats)?;

    match command {
        StatsCommands::Regions { json } => {
            let result = ctx.api.admin().region_stats().await;
            let regions = ctx.checked(result)?;
            if json {
                return print_json(&regions);
            }
            print_lines(&format_region_lines(&regions), "No regional data yet");
        }
        StatsCommands::Performance { json } => {
            let result = ctx.api.admin().performance().await;
            let rows = ctx.checked(result)?;
            if json {
                return print_json(&rows);
            }
            print_lines(&format_performance_lines(&rows), "No employee activity yet");
        }
    }
    Ok(())
}
