use actix_web::{error::JsonPayloadError, HttpRequest};

use crate::core::AppError;

/// Turn JSON body rejections into the standard error envelope
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(
        method = %req.method(),
        path = %req.path(),
        error = %err,
        "Rejected request body"
    );

    let message = match &err {
        JsonPayloadError::ContentType => "Content-Type must be application/json".to_string(),
        JsonPayloadError::Deserialize(e) => format!("Invalid JSON body: {}", e),
        other => other.to_string(),
    };

    AppError::validation(message).into()
}

/// JSON extractor configuration shared by every JSON endpoint
pub fn json_config() -> actix_web::web::JsonConfig {
    actix_web::web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(json_error_handler)
}
