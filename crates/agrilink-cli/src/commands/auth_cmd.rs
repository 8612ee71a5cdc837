use agrilink_core::api::{SignupOutcome, SignupRequest};
use agrilink_core::navigation::Route;

use crate::cli::AuthCommands;
use crate::commands::common::AppContext;
use crate::error::CliError;

pub async fn run_auth(command: AuthCommands, ctx: &mut AppContext) -> Result<(), CliError> {
    match command {
        AuthCommands::Login { email, password } => {
            let result = ctx.auth.login(&ctx.api, &email, &password).await;
            let user = result?;
            println!(
                "Signed in profile '{}' as {} ({})",
                ctx.profile_name,
                user.display_name(),
                user.role.label()
            );
            println!("Home: {}", Route::home_for(user.role));
            Ok(())
        }
        AuthCommands::Signup {
            username,
            email,
            password,
            role,
            region,
            phone,
        } => {
            let request = SignupRequest {
                username,
                email,
                password,
                role,
                region,
                phone,
            };
            match ctx.auth.signup(&ctx.api, &request).await? {
                SignupOutcome::SignedIn(response) => {
                    println!(
                        "Account created; profile '{}' signed in as {}",
                        ctx.profile_name,
                        response.user.display_name()
                    );
                }
                SignupOutcome::AccountCreated(message) => {
                    let message = if message.trim().is_empty() {
                        "Account created".to_string()
                    } else {
                        message
                    };
                    println!("{message}. Please sign in with `agrilink auth login`.");
                }
            }
            Ok(())
        }
        AuthCommands::Status => {
            if let Some(user) = ctx.auth.user() {
                println!(
                    "Profile '{}' is signed in as {} <{}> ({})",
                    ctx.profile_name,
                    user.display_name(),
                    user.email,
                    user.role
                );
                if let Some(region) = &user.region {
                    println!("Region: {region}");
                }
            } else {
                println!("Profile '{}' is not signed in.", ctx.profile_name);
            }
            Ok(())
        }
        AuthCommands::Logout => {
            ctx.auth.logout()?;
            println!("Signed out profile '{}'", ctx.profile_name);
            Ok(())
        }
        AuthCommands::ForgotPassword { email } => {
            let response = ctx.api.auth().forgot_password(&email).await?;
            println!("{}", fallback_message(&response.message, "Reset email sent"));
            Ok(())
        }
        AuthCommands::ResetPassword { token, password } => {
            let response = ctx.api.auth().reset_password(&token, &password).await?;
            println!("{}", fallback_message(&response.message, "Password updated"));
            Ok(())
        }
    }
}

fn fallback_message<'a>(message: &'a str, fallback: &'a str) -> &'a str {
    if message.trim().is_empty() {
        fallback
    } else {
        message
    }
}
