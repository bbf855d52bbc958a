use thiserror::Error;

/// Fatal error types shared by every crate in the workspace.
///
/// Anything that ends up here aborts the run. Per-row roster problems are
/// recoverable and live in `zivijo_roster::RowError` instead.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Roster header is missing the required column `{0}`")]
    MissingColumn(String),

    #[error("Webhook transport error: {0}")]
    Transport(String),

    #[error("Failed to send notification to Mattermost (status {status}): {body}")]
    Delivery { status: u16, body: String },

    #[error("Notifier invoked with no birthdays or namedays to report")]
    NothingToCelebrate,
}

pub type Result<T> = std::result::Result<T, AppError>;
