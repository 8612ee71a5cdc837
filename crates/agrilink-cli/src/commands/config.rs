use agrilink_core::config::{normalize_base_url, API_URL_ENV};
use agrilink_core::util::normalize_text_option;

use crate::cli::ConfigCommands;
use crate::config_profiles::{default_config_path, session_path, CliProfilesConfig};
use crate::error::CliError;

pub fn run_config(
    command: ConfigCommands,
    global_profile: Option<&str>,
    api_url: Option<String>,
) -> Result<(), CliError> {
    match command {
        ConfigCommands::Init {
            profile,
            api_base_url,
            no_activate,
        } => run_config_init(
            profile.as_deref().or(global_profile),
            api_base_url.or(api_url),
            no_activate,
        ),
        ConfigCommands::Show => run_config_show(global_profile, api_url),
    }
}

pub fn run_config_init(
    profile_name: Option<&str>,
    api_base_url: Option<String>,
    no_activate: bool,
) -> Result<(), CliError> {
    let mut config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config
        .resolve_profile_name(profile_name)
        .map_err(CliError::Config)?;

    let merged_api_base_url = normalize_text_option(api_base_url)
        .or_else(|| normalize_text_option(std::env::var(API_URL_ENV).ok()))
        .or_else(|| {
            config
                .profile(&profile_name)
                .and_then(|profile| profile.api_base_url.clone())
        });
    let validated = merged_api_base_url
        .map(|url| normalize_base_url(&url))
        .transpose()?;

    let profile = config.profile_mut_or_default(&profile_name);
    if let Some(url) = validated {
        profile.api_base_url = Some(url);
    }
    if !no_activate {
        config.active_profile = Some(profile_name.clone());
    }

    let path = config.save().map_err(CliError::Config)?;
    println!(
        "Profile '{}' initialized at {}",
        profile_name,
        path.display()
    );
    if config
        .profile(&profile_name)
        .and_then(|profile| profile.api_base_url.as_ref())
        .is_none()
    {
        println!("Profile '{profile_name}' uses the default API URL. Pass --api-base-url to change it.");
    }
    Ok(())
}

fn run_config_show(global_profile: Option<&str>, api_url: Option<String>) -> Result<(), CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config
        .resolve_profile_name(global_profile)
        .map_err(CliError::Config)?;
    let client_config = config.client_config(&profile_name, api_url)?;

    println!("Config file:  {}", default_config_path().display());
    println!("Profile:      {profile_name}");
    println!("API base URL: {}", client_config.api_base_url);
    println!("Session file: {}", session_path(&profile_name).display());
    Ok(())
}
