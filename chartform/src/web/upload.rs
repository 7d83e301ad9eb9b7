use std::path::Path;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Redirect, Response};
use sha2::{Digest, Sha256};
use tracing::info;

use chartform_charts::{render_chart, ChartType};
use chartform_tabular::{load_table, SourceFormat};

use super::error::WebError;
use crate::config::AppConfig;

pub(crate) const INVALID_FILE_TYPE: &str = "Invalid file type. Please upload a CSV or Excel file.";
pub(crate) const INVALID_GRAPH_TYPE: &str =
    "Invalid graph type. Choose one of Pie, Bar, Line or Scatter.";

struct UploadForm {
    /// Declared filename and content of the `file` part, if one was sent.
    file: Option<(Option<String>, Bytes)>,
    graph_type: Option<String>,
}

async fn read_form(multipart: &mut Multipart) -> Result<UploadForm, WebError> {
    let mut file = None;
    let mut graph_type = None;
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().map(str::to_string);
                let bytes = field.bytes().await?;
                file = Some((file_name, bytes));
            }
            Some("graph_type") => graph_type = Some(field.text().await?),
            _ => {}
        }
    }
    Ok(UploadForm { file, graph_type })
}

pub(crate) async fn upload_chart(
    State(config): State<Arc<AppConfig>>,
    mut multipart: Multipart,
) -> Result<Response, WebError> {
    let form = read_form(&mut multipart).await?;
    let Some((declared_name, bytes)) = form.file else {
        return Ok(Redirect::to("/").into_response());
    };
    let Some(file_name) = accepted_file_name(declared_name.as_deref()) else {
        return Ok(INVALID_FILE_TYPE.into_response());
    };
    // the chart type is a closed enum checked here, before anything is
    // written to disk
    let chart_type = match form.graph_type.unwrap_or_default().parse::<ChartType>() {
        Ok(chart_type) => chart_type,
        Err(_) => return Ok(INVALID_GRAPH_TYPE.into_response()),
    };
    let target = store_and_render(&config, &file_name, bytes, chart_type).await?;
    Ok(Redirect::to(&target).into_response())
}

/// Dedicated route that always renders a line graph; a `graph_type` field
/// in the request is ignored.
pub(crate) async fn line_graph(
    State(config): State<Arc<AppConfig>>,
    mut multipart: Multipart,
) -> Result<Response, WebError> {
    let form = read_form(&mut multipart).await?;
    let Some((declared_name, bytes)) = form.file else {
        return Ok(Redirect::to("/line_graph").into_response());
    };
    let Some(file_name) = accepted_file_name(declared_name.as_deref()) else {
        return Ok(INVALID_FILE_TYPE.into_response());
    };
    let target = store_and_render(&config, &file_name, bytes, ChartType::Line).await?;
    Ok(Redirect::to(&target).into_response())
}

/// The declared filename reduced to its final path component, if its
/// extension is on the allow-list.
fn accepted_file_name(declared: Option<&str>) -> Option<String> {
    let name = Path::new(declared?).file_name()?.to_str()?;
    SourceFormat::from_path(Path::new(name))?;
    Some(name.to_string())
}

/// Request token derived from the uploaded bytes. Identical content maps
/// to the same output directory; distinct concurrent uploads cannot race
/// on each other's files.
fn content_token(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hasher
        .finalize()
        .iter()
        .take(6)
        .map(|byte| format!("{byte:02x}"))
        .collect()
}

async fn store_and_render(
    config: &AppConfig,
    file_name: &str,
    bytes: Bytes,
    chart_type: ChartType,
) -> Result<String, WebError> {
    let request_dir = config.upload_dir.join(content_token(&bytes));
    tokio::fs::create_dir_all(&request_dir).await?;
    let source_path = request_dir.join(file_name);
    tokio::fs::write(&source_path, &bytes).await?;
    info!(
        "stored upload {} ({} bytes)",
        source_path.display(),
        bytes.len()
    );

    let graph_path = request_dir.join(chart_type.file_name());
    let render_path = graph_path.clone();
    tokio::task::spawn_blocking(move || -> Result<(), WebError> {
        let table = load_table(&source_path)?;
        render_chart(chart_type, &table, &render_path)?;
        Ok(())
    })
    .await??;
    info!("rendered {} to {}", chart_type.title(), graph_path.display());

    Ok(format!("/display?graph_file={}", graph_path.display()))
}
