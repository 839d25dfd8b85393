use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

/// Failure talking to an external dependency (cache or database).
///
/// Never reaches the HTTP layer as-is: probes turn it into a
/// [`DependencyStatus`](crate::health::DependencyStatus) and the landing page
/// substitutes placeholder values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DependencyError {
    /// The dependency could not be reached at call time
    #[error("{0}")]
    Connection(String),

    /// The dependency was reached but the operation failed
    #[error("{0}")]
    Query(String),

    /// The dependency was never successfully initialized
    #[error("not configured")]
    NotConfigured,
}

impl From<redis::RedisError> for DependencyError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_io_error() || err.is_connection_dropped() || err.is_connection_refusal() {
            DependencyError::Connection(err.to_string())
        } else {
            DependencyError::Query(err.to_string())
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Template rendering error: {0}")]
    Template(#[from] tera::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = ?self, "Request failed");
        let status = StatusCode::INTERNAL_SERVER_ERROR;

        let body = format!(
            r#"<!DOCTYPE html>
<html>
<head>
    <title>Error {code}</title>
</head>
<body>
    <h1>Error {code}</h1>
    <p>Internal server error</p>
    <a href="/">Return to homepage</a>
</body>
</html>"#,
            code = status.as_u16(),
        );

        (status, Html(body)).into_response()
    }
}
