use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error; // Use thiserror for cleaner error definitions

// --- Domain Errors ---

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Template catalog unavailable: {message}")]
    Unavailable {
        message: String,
        status: Option<u16>, // None when the request never got a response
    },
}

impl CatalogError {
    /// Network failures, 5xx and 429 are worth another attempt; anything else is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            CatalogError::Unavailable { status: None, .. } => true,
            CatalogError::Unavailable { status: Some(code), .. } => *code >= 500 || *code == 429,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Invalid template selector: {0:?}")]
    InvalidTemplateSelector(String),
}

#[derive(Error, Debug)]
pub enum WorkflowError {
    #[error("Cannot {action} while the interaction is {state}")]
    InvalidTransition {
        state: &'static str,
        action: &'static str,
    },
    #[error(transparent)]
    Selector(#[from] SelectorError),
}

// --- Web Layer Error ---

#[derive(Error, Debug)]
pub enum AppError {
    // Input validation / request parsing errors
    #[error("Invalid activity: {0}")]
    InvalidActivity(String),
    #[error("Interaction error: {0}")]
    Interaction(#[source] WorkflowError),

    // Contract failures surfaced while building artifacts
    #[error("Could not build meme URL")]
    ArtifactError(#[source] SelectorError),

    // Configuration / Startup errors
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Could not load template catalog")]
    CatalogError(#[source] CatalogError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// --- Conversions from Domain Errors to AppError ---

impl From<WorkflowError> for AppError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Selector(e) => AppError::ArtifactError(e),
            e @ WorkflowError::InvalidTransition { .. } => AppError::Interaction(e),
        }
    }
}

impl From<CatalogError> for AppError {
    fn from(err: CatalogError) -> Self {
        AppError::CatalogError(err)
    }
}

impl From<crate::config::ConfigError> for AppError {
    fn from(err: crate::config::ConfigError) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

// --- Axum Response Implementation ---

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            // 4xx Client Errors
            AppError::InvalidActivity(msg) => (StatusCode::BAD_REQUEST, format!("Invalid activity: {}", msg)),
            AppError::Interaction(e) => (StatusCode::BAD_REQUEST, e.to_string()),

            // 5xx Server Errors
            AppError::ArtifactError(e) => {
                tracing::error!(error.source = ?e, "Artifact URL could not be built");
                (StatusCode::INTERNAL_SERVER_ERROR, "Meme generation failed".to_string())
            }
            AppError::CatalogError(e) => {
                tracing::error!(error.source = ?e, "Template catalog error occurred");
                (StatusCode::SERVICE_UNAVAILABLE, "Template catalog unavailable".to_string())
            }
            AppError::ConfigError(msg) => {
                tracing::error!("Configuration error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Server configuration error".to_string())
            }
            AppError::IoError(e) => {
                tracing::error!("IO error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "An internal server error occurred".to_string())
            }
        };

        tracing::error!(error.message = %error_message, error.detail = %self, "Responding with error");

        let body = Json(serde_json::json!({ "error": error_message }));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unavailable(status: Option<u16>) -> CatalogError {
        CatalogError::Unavailable {
            message: "boom".into(),
            status,
        }
    }

    #[test]
    fn retryable_catalog_failures() {
        assert!(unavailable(None).is_retryable());
        assert!(unavailable(Some(503)).is_retryable());
        assert!(unavailable(Some(429)).is_retryable());
        assert!(!unavailable(Some(404)).is_retryable());
    }

    #[test]
    fn workflow_errors_map_to_status_codes() {
        let transition: AppError = WorkflowError::InvalidTransition {
            state: "idle",
            action: "cancel",
        }
        .into();
        assert_eq!(transition.into_response().status(), StatusCode::BAD_REQUEST);

        let selector: AppError =
            WorkflowError::from(SelectorError::InvalidTemplateSelector("drake".into())).into();
        assert_eq!(selector.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
