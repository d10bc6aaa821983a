//! HTTP request handlers for the web adapter.

use axum::{
    Form, Json,
    extract::{Path, State},
    http::header,
    response::{Html, IntoResponse, Response},
};
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::domain::analysis::analyze as run_analysis;
use crate::domain::error::BreakscanError;
use crate::domain::request::{ScanRequestInput, validate_scan_request};
use crate::ports::report_port::{ReportPort, report_file_name};

use super::{AppState, WebError};

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html>
<head><title>Breakout Scanner</title></head>
<body>
<h1>Breakout Scanner</h1>
<form method="post" action="/analyze">
<label>Ticker: <input name="ticker" placeholder="AAPL"></label><br>
<label>Start Date: <input type="date" name="start_date"></label><br>
<label>End Date: <input type="date" name="end_date"></label><br>
<label>Volume Threshold (%): <input name="volume_threshold" value="200"></label><br>
<label>Daily Change Threshold (%): <input name="price_change_threshold" value="2"></label><br>
<label>Holding Period (days): <input name="holding_period" value="10"></label><br>
<button type="submit">Analyze</button>
</form>
</body>
</html>
"#;

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

pub async fn analyze(
    State(state): State<Arc<AppState>>,
    Form(input): Form<ScanRequestInput>,
) -> Result<Response, WebError> {
    let request = validate_scan_request(&input)?;
    let ticker = request.ticker.clone();

    // Adapter reads and the CSV write are blocking I/O.
    let worker = Arc::clone(&state);
    let (outcome, written) = tokio::task::spawn_blocking(move || {
        let outcome = run_analysis(&*worker.data_port, &request)?;
        let written = if outcome.log.is_empty() {
            None
        } else {
            Some(
                worker
                    .report
                    .write_to_dir(&outcome.log, &request.ticker, &worker.output_dir)?,
            )
        };
        Ok::<_, BreakscanError>((outcome, written))
    })
    .await
    .map_err(|e| WebError::internal(format!("scan task failed: {}", e)))??;

    let Some(path) = written else {
        info!(ticker = %ticker, "no breakout trades found");
        return Ok(Json(json!({ "error": "No breakout trades found!" })).into_response());
    };
    info!(path = %path.display(), trades = outcome.log.len(), "trade log written");

    Ok(Json(json!({
        "message": "Analysis complete!",
        "file": format!("trades/{}", report_file_name(&ticker)),
        "bars": outcome.bars_scanned,
        "summary": outcome.log.summary(),
    }))
    .into_response())
}

fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty() && !name.contains(&['/', '\\'][..]) && !name.contains("..")
}

pub async fn download(
    State(state): State<Arc<AppState>>,
    Path(filename): Path<String>,
) -> Result<Response, WebError> {
    if !is_plain_file_name(&filename) {
        return Err(WebError::bad_request("Invalid file name"));
    }

    let path = state.output_dir.join(&filename);
    let bytes = tokio::fs::read(&path).await.map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => WebError::not_found(format!("{} not found", filename)),
        _ => WebError::internal(e.to_string()),
    })?;

    let headers = [
        (header::CONTENT_TYPE, "text/csv".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", filename),
        ),
    ];
    Ok((headers, bytes).into_response())
}

pub async fn not_found() -> WebError {
    WebError::not_found("Not found")
}
