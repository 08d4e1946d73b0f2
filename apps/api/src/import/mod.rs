//! Résumé ingestion pipeline.
//!
//! One run walks Validating → Extracting → (Summarizing) → CallingAi →
//! Parsing; the HTTP handler then merges the result into the stored profile
//! (Merging) and finishes the progress stream. Stages execute strictly in
//! order on the request task — nothing about a single upload runs in
//! parallel. Cancellation is advisory: the token is checked between stages,
//! and a stage that already completed for a cancelled run has its result
//! discarded rather than its I/O aborted.

use thiserror::Error;
use tokio_util::sync::CancellationToken;
use tracing::debug;

pub mod extract;
pub mod handlers;
pub mod parser;
pub mod progress;
pub mod prompts;
pub mod summarize;
pub mod validation;

use extract::{extract_text, UploadedFile, MIN_EXTRACTED_CHARS};
use parser::{parse_extraction, RawExtraction};
use progress::{ProgressReporter, Stage};
use summarize::{summarize_if_needed, SUMMARIZE_THRESHOLD};

use crate::llm_client::{LlmClient, LlmError, LlmSettings};

/// Everything that can end an ingestion run early. The HTTP layer maps each
/// variant to a user-facing message and status; nothing here is fatal to the
/// process, and a failed run returns the UI to Idle.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Extraction(String),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Failed to extract structured data from the resume")]
    Parse,

    #[error("The AI reply did not contain a profile object: {0}")]
    MalformedData(String),

    #[error("Import cancelled")]
    Cancelled,
}

/// Outcome of the pipeline stages up to (not including) the merge.
#[derive(Debug)]
pub struct ImportRun {
    pub extraction: RawExtraction,
    /// Characters of cleaned text handed to the extraction prompt.
    pub source_chars: usize,
    /// Whether the text was condensed before extraction.
    pub summarized: bool,
}

/// Runs one ingestion pass over an uploaded file.
pub async fn run_import(
    file: &UploadedFile,
    settings: &LlmSettings,
    llm: &LlmClient,
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
) -> Result<ImportRun, ImportError> {
    reporter.update(Stage::Validating, 5);
    validation::validate(file)?;
    ensure_live(cancel)?;

    reporter.update(Stage::Extracting, 15);
    let text = extract_text(file)?;
    if text.len() < MIN_EXTRACTED_CHARS {
        return Err(ImportError::Extraction(
            "Could not extract enough text from the file. Make sure it is a text-based resume."
                .to_string(),
        ));
    }
    ensure_live(cancel)?;

    // Both provider and API key must be present before any network call.
    settings.validate()?;

    let summarized = text.len() >= SUMMARIZE_THRESHOLD;
    let text = if summarized {
        reporter.update(Stage::Summarizing, 35);
        debug!(
            "extracted text of {} chars exceeds {SUMMARIZE_THRESHOLD}, condensing",
            text.len()
        );
        summarize_if_needed(&text, settings, llm, cancel).await?
    } else {
        text
    };
    ensure_live(cancel)?;

    reporter.update(Stage::CallingAi, 55);
    let source_chars = text.len();
    let request = settings.to_request(prompts::extraction_prompt(&text))?;
    let reply = llm.generate(&request).await?;
    ensure_live(cancel)?;

    reporter.update(Stage::Parsing, 85);
    let extraction = parse_extraction(&reply)?;

    Ok(ImportRun {
        extraction,
        source_chars,
        summarized,
    })
}

fn ensure_live(cancel: &CancellationToken) -> Result<(), ImportError> {
    if cancel.is_cancelled() {
        Err(ImportError::Cancelled)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::merge::merge_extraction;
    use crate::profile::models::Profile;

    /// The end-to-end happy path with the LLM reply canned: a small text
    /// upload passes validation, skips summarization, and the fenced reply
    /// parses and merges into an empty profile.
    #[test]
    fn test_small_txt_upload_end_to_end_with_canned_reply() {
        let body = "Jane Doe is a senior database engineer with twelve years of experience. \
                    She designs SQL schemas, tunes queries, and mentors junior engineers daily. \
                    Previously she led the data platform team at Initech for five years.";
        assert!(body.len() > 150 && body.len() < 300);
        let file = UploadedFile::new("resume.txt", "text/plain", body.as_bytes().to_vec());

        validation::validate(&file).unwrap();
        let text = extract_text(&file).unwrap();
        assert_eq!(text, body, "plain text with single spaces passes through");
        assert!(text.len() < SUMMARIZE_THRESHOLD, "no summarization for small files");

        let reply = "```json\n{\"name\":\"Jane Doe\",\"skills\":[{\"name\":\"SQL\",\"level\":\"Expert\"}]}\n```";
        let extraction = parse_extraction(reply).unwrap();
        let merged = merge_extraction(&Profile::default(), &extraction);

        assert_eq!(merged.personal_info.name, "Jane Doe");
        assert_eq!(merged.skills.len(), 1);
        assert_eq!(merged.skills[0].name, "SQL");
        assert_eq!(merged.skills[0].level, "Expert");
        assert_eq!(merged.skills[0].category, "Technical");
    }

    #[tokio::test]
    async fn test_cancelled_run_stops_before_any_network_call() {
        let file = UploadedFile::new(
            "resume.txt",
            "text/plain",
            vec![b'a'; 200],
        );
        let settings = LlmSettings {
            provider: "openai".into(),
            api_key: "sk-test".into(),
            model: None,
        };
        let (reporter, _rx) = ProgressReporter::new();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = run_import(&file, &settings, &LlmClient::new(), &reporter, &cancel).await;
        assert!(matches!(result, Err(ImportError::Cancelled)));
    }

    #[tokio::test]
    async fn test_unconfigured_settings_fail_before_any_network_call() {
        let body = "Jane Doe is a senior engineer with many years of experience in systems.";
        let file = UploadedFile::new("resume.txt", "text/plain", body.as_bytes().to_vec());
        let settings = LlmSettings {
            provider: String::new(),
            api_key: String::new(),
            model: None,
        };
        let (reporter, _rx) = ProgressReporter::new();

        let result = run_import(
            &file,
            &settings,
            &LlmClient::new(),
            &reporter,
            &CancellationToken::new(),
        )
        .await;
        assert!(matches!(result, Err(ImportError::Llm(LlmError::NotConfigured))));
    }

    #[tokio::test]
    async fn test_short_extracted_text_rejected_before_configuration_check() {
        let file = UploadedFile::new("resume.txt", "text/plain", b"too short".to_vec());
        let settings = LlmSettings {
            provider: String::new(),
            api_key: String::new(),
            model: None,
        };
        let (reporter, _rx) = ProgressReporter::new();

        let result = run_import(
            &file,
            &settings,
            &LlmClient::new(),
            &reporter,
            &CancellationToken::new(),
        )
        .await;
        assert!(matches!(
            result,
            Err(ImportError::Extraction(ref m)) if m.contains("enough text")
        ));
    }
}
