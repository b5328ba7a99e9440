use thiserror::Error;

/// Error taxonomy for the analysis core.
///
/// Every variant renders a message suitable for direct display to the end
/// user; fatal pipeline paths surface these verbatim on the failed scan
/// record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("No API key configured. Please add your API key in settings.")]
    MissingCredential,

    #[error("Invalid API key. Please check your API key and try again.")]
    InvalidCredential,

    #[error("API rate limit reached. Please try again in a few minutes.")]
    RateLimited,

    #[error("The analysis service is temporarily unavailable. Please try again later.")]
    ServiceUnavailable,

    #[error("Analysis service error: {0}")]
    ExternalService(String),

    #[error("Failed to parse the analysis response: {0}")]
    MalformedResponse(String),

    #[error("Invalid response format from the analysis service. Please try again.")]
    InvalidResponseFormat,

    #[error("The personalized analysis was incomplete. Please try again.")]
    IncompleteAnalysis,

    #[error("Storage error: {0}")]
    Persistence(String),

    #[error("You do not have access to this scan")]
    PermissionDenied,

    #[error("Not found")]
    NotFound,

    #[error("The scan was cancelled")]
    Cancelled,
}
