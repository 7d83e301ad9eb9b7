use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use tracing::error;

use chartform_charts::ChartError;
use chartform_tabular::TabularError;

#[derive(Debug, Error)]
pub(crate) enum WebError {
    #[error("multipart read failed {0}")]
    Multipart(#[from] MultipartError),
    #[error("tabular data error {0}")]
    Tabular(#[from] TabularError),
    #[error("chart error {0}")]
    Chart(#[from] ChartError),
    #[error("IO Error {0}")]
    Io(#[from] std::io::Error),
    #[error("blocking task failed {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("Internal HTTP Error {0}")]
    Http(#[from] axum::http::Error),
    #[error("graph file {0:?} is outside the upload directory")]
    PathOutsideUploadDir(String),
}

impl WebError {
    fn as_status_code(&self) -> StatusCode {
        match self {
            WebError::PathOutsideUploadDir(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        error!("Error returned {self:?}");
        (self.as_status_code(), format!("{self}")).into_response()
    }
}
