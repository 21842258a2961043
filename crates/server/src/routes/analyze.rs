use std::sync::Arc;

use axum::{extract::Multipart, Extension, Json};

use engine_audit::{audit_game, AnalysisReport, AuditError};

use crate::config::Config;
use crate::error::AppError;
use crate::SharedOracle;

/// POST /analyze
///
/// Accepts a multipart body carrying either an uploaded `.pgn` file
/// (`pgnFile`) or inline movetext (`pgnText`). Input-shape and parse
/// failures are rejected before the engine is touched. A mid-game
/// evaluation fault degrades to a well-formed empty report with the
/// error message set, keeping the response shape stable for clients.
pub async fn analyze(
    Extension(config): Extension<Arc<Config>>,
    Extension(oracle): Extension<SharedOracle>,
    mut multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let pgn_text = read_pgn_input(&mut multipart).await?;

    let game = chess_core::parse_pgn(&pgn_text)
        .map_err(|_| AppError::BadRequest("Invalid PGN format".to_string()))?;

    tracing::info!(
        white = %game.metadata.white,
        black = %game.metadata.black,
        moves = game.moves.len(),
        "Starting game audit"
    );

    // Queue behind any in-flight analysis; the engine is single-session.
    let mut oracle = oracle.lock().await;

    match audit_game(&mut *oracle, &game, config.search_depth).await {
        Ok(report) => Ok(Json(report)),
        Err(AuditError::Evaluation(msg)) => {
            tracing::error!(error = %msg, "Audit failed mid-game, returning degraded report");
            Ok(Json(AnalysisReport::degraded(msg)))
        }
        Err(e) => Err(e.into()),
    }
}

/// Pull the PGN text out of the multipart body: `pgnFile` (must end in
/// `.pgn`) wins over `pgnText`; anything else is an unsupported input.
async fn read_pgn_input(multipart: &mut Multipart) -> Result<String, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("pgnFile") => {
                let filename = field.file_name().unwrap_or_default().to_owned();
                if !filename.ends_with(".pgn") {
                    return Err(AppError::BadRequest("Invalid file type".to_string()));
                }
                return field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Unreadable upload: {e}")));
            }
            Some("pgnText") => {
                return field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(format!("Unreadable text field: {e}")));
            }
            _ => continue,
        }
    }

    Err(AppError::BadRequest("No PGN provided".to_string()))
}
