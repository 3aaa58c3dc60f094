use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn event_not_found() -> Self {
        AppError::NotFound("Event not found or you don't have permission.".to_string())
    }

    pub fn session_not_found() -> Self {
        AppError::NotFound("scan session not found or already stopped".to_string())
    }
}
