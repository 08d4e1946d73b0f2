use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::LlmSettings;
use crate::profile::handlers::ProfileResponse;
use crate::profile::merge::merge_extraction;
use crate::profile::store::{load_profile, save_profile};
use crate::state::AppState;

use super::extract::UploadedFile;
use super::progress::{ProgressReporter, Stage};
use super::run_import;

#[derive(Serialize)]
pub struct ImportResponse {
    #[serde(flatten)]
    pub profile: ProfileResponse,
    pub summarized: bool,
}

/// POST /api/v1/profile/import
///
/// Multipart form: `file` (the résumé), `provider`, `api_key`, optional
/// `model`, `user_id`. This handler is the single classification point:
/// every pipeline failure becomes a user-facing message here, and the
/// progress stream always reaches a terminal stage so the upload control is
/// re-enabled no matter what.
pub async fn handle_import(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let form = read_form(&mut multipart).await?;

    let (reporter, mut rx) = ProgressReporter::new();
    tokio::spawn(async move {
        while rx.changed().await.is_ok() {
            let progress = *rx.borrow_and_update();
            debug!(stage = ?progress.stage, percent = progress.percent, "import progress");
        }
    });

    // Advisory only: HTTP clients that give up just drop the response;
    // embedders can wire this token to a real cancel control.
    let cancel = CancellationToken::new();

    let outcome = async {
        let run = run_import(&form.file, &form.settings, &state.llm, &reporter, &cancel).await?;

        reporter.update(Stage::Merging, 95);
        let current = load_profile(&state.db, form.user_id)
            .await
            .map_err(AppError::Internal)?;
        let merged = merge_extraction(&current, &run.extraction);
        save_profile(&state.db, form.user_id, &merged)
            .await
            .map_err(AppError::Internal)?;

        info!(
            "resume import complete for user {} ({} chars{})",
            form.user_id,
            run.source_chars,
            if run.summarized { ", summarized" } else { "" }
        );
        Ok::<_, AppError>((merged, run.summarized))
    }
    .await;

    match outcome {
        Ok((profile, summarized)) => {
            reporter.finish_success();
            Ok(Json(ImportResponse {
                profile: ProfileResponse::new(profile),
                summarized,
            }))
        }
        Err(e) => {
            reporter.finish_failed();
            Err(e)
        }
    }
}

struct ImportForm {
    file: UploadedFile,
    settings: LlmSettings,
    user_id: Uuid,
}

async fn read_form(multipart: &mut Multipart) -> Result<ImportForm, AppError> {
    let mut file = None;
    let mut provider = String::new();
    let mut api_key = String::new();
    let mut model = None;
    let mut user_id = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("resume").to_string();
                let content_type = field.content_type().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(bad_multipart)?;
                file = Some(UploadedFile::new(filename, content_type, bytes));
            }
            "provider" => provider = field.text().await.map_err(bad_multipart)?,
            "api_key" => api_key = field.text().await.map_err(bad_multipart)?,
            "model" => {
                let value = field.text().await.map_err(bad_multipart)?;
                if !value.trim().is_empty() {
                    model = Some(value);
                }
            }
            "user_id" => {
                let value = field.text().await.map_err(bad_multipart)?;
                user_id = Some(Uuid::parse_str(value.trim()).map_err(|_| {
                    AppError::Validation("user_id must be a valid UUID".to_string())
                })?);
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::Validation("missing file field".to_string()))?;
    let user_id =
        user_id.ok_or_else(|| AppError::Validation("missing user_id field".to_string()))?;

    Ok(ImportForm {
        file,
        settings: LlmSettings {
            provider,
            api_key,
            model,
        },
        user_id,
    })
}

fn bad_multipart(e: MultipartError) -> AppError {
    AppError::Validation(format!("invalid multipart body: {e}"))
}
