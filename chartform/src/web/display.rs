use std::path::{Component, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;

use super::error::WebError;
use crate::config::AppConfig;

pub(crate) const NO_GRAPH_FILE: &str = "No graph file found.";

#[derive(Debug, Deserialize)]
pub(crate) struct DisplayParams {
    graph_file: Option<String>,
}

/// Streams back the image the upload redirect pointed at. A missing
/// parameter gets the plain-text fallback; a missing file surfaces as a
/// server error.
pub(crate) async fn display_graph(
    State(config): State<Arc<AppConfig>>,
    Query(params): Query<DisplayParams>,
) -> Result<Response, WebError> {
    let Some(graph_file) = params.graph_file else {
        return Ok(NO_GRAPH_FILE.into_response());
    };
    let path = resolve_graph_path(&config, &graph_file)?;
    let bytes = tokio::fs::read(&path).await?;
    let mime_type = mime_guess::from_path(&path).first_or_octet_stream();
    Ok(Response::builder()
        .header(header::CONTENT_TYPE, mime_type.as_ref())
        .body(Body::from(bytes))?)
}

/// The query parameter is a path this server produced, but it still comes
/// in off the wire; confine it to the upload directory.
fn resolve_graph_path(config: &AppConfig, graph_file: &str) -> Result<PathBuf, WebError> {
    let path = PathBuf::from(graph_file);
    let traverses = path
        .components()
        .any(|component| matches!(component, Component::ParentDir));
    if traverses || !path.starts_with(&config.upload_dir) {
        return Err(WebError::PathOutsideUploadDir(graph_file.to_string()));
    }
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_at(upload_dir: PathBuf) -> AppConfig {
        AppConfig {
            upload_dir,
            port: 0,
        }
    }

    #[test]
    fn accepts_paths_inside_the_upload_directory() {
        let config = AppConfig::default();
        let path = resolve_graph_path(&config, "uploads/3f9a2c1b/bar_graph.png").unwrap();
        assert_eq!(path, PathBuf::from("uploads/3f9a2c1b/bar_graph.png"));
    }

    #[test]
    fn rejects_parent_traversal_and_foreign_paths() {
        let config = AppConfig::default();
        assert!(matches!(
            resolve_graph_path(&config, "uploads/../etc/passwd"),
            Err(WebError::PathOutsideUploadDir(_))
        ));
        assert!(matches!(
            resolve_graph_path(&config, "/etc/passwd"),
            Err(WebError::PathOutsideUploadDir(_))
        ));
    }

    #[tokio::test]
    async fn missing_parameter_is_the_plain_text_fallback() {
        let config = Arc::new(AppConfig::default());
        let response = display_graph(
            State(config),
            Query(DisplayParams { graph_file: None }),
        )
        .await
        .unwrap();
        assert_eq!(response.status(), axum::http::StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(body.as_ref(), NO_GRAPH_FILE.as_bytes());
    }

    #[tokio::test]
    async fn serves_the_image_with_a_png_content_type() {
        let dir = tempfile::tempdir().unwrap();
        let token_dir = dir.path().join("ab12cd34ef56");
        std::fs::create_dir_all(&token_dir).unwrap();
        let image_path = token_dir.join("line_graph.png");
        std::fs::write(&image_path, b"\x89PNG\r\n\x1a\nstub").unwrap();

        let config = Arc::new(config_at(dir.path().to_path_buf()));
        let response = display_graph(
            State(config),
            Query(DisplayParams {
                graph_file: Some(image_path.to_string_lossy().into_owned()),
            }),
        )
        .await
        .unwrap();
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .and_then(|value| value.to_str().ok()),
            Some("image/png")
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.starts_with(b"\x89PNG"));
    }

    #[tokio::test]
    async fn missing_file_surfaces_as_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let config = Arc::new(config_at(dir.path().to_path_buf()));
        let missing = dir.path().join("nope").join("bar_graph.png");
        let result = display_graph(
            State(config),
            Query(DisplayParams {
                graph_file: Some(missing.to_string_lossy().into_owned()),
            }),
        )
        .await;
        assert!(matches!(result, Err(WebError::Io(_))));
    }
}
