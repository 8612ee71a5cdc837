use std::io;

use agrilink_core::api::ApiError;
use agrilink_core::navigation::Route;
use agrilink_core::session::SessionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] agrilink_core::Error),
    #[error("{}", .0.user_message())]
    Api(#[from] ApiError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Profile '{0}' is not signed in. Run `agrilink auth login --email <email> --password <password>`.")]
    NotSignedIn(String),
    #[error("Your role cannot open {0}")]
    Forbidden(Route),
}
