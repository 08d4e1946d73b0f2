//! Chunk-and-summarize for oversized résumés.
//!
//! Long extracted text is split on sentence boundaries, each chunk is
//! summarized by the LLM, and the summaries are reassembled in order. One
//! chunk failing never aborts the run: its summary is replaced by an excerpt
//! of the original chunk and the fold continues. Chunks are summarized
//! sequentially so a rate-limited provider is never hit with a burst.

use tokio_util::sync::CancellationToken;
use tracing::warn;

use super::prompts::summarize_prompt;
use super::ImportError;
use crate::llm_client::{LlmClient, LlmError, LlmSettings};

/// Below this, the text already fits provider context limits untouched.
pub const SUMMARIZE_THRESHOLD: usize = 4000;
/// Upper bound on a single chunk handed to the model.
pub const CHUNK_LIMIT: usize = 3000;
/// How much of the original chunk stands in for a failed summary.
const FALLBACK_CHARS: usize = 2000;

/// Returns `text` unchanged when it is short enough; otherwise condenses it.
/// Fails only on cancellation — summarization failures degrade per chunk.
pub async fn summarize_if_needed(
    text: &str,
    settings: &LlmSettings,
    llm: &LlmClient,
    cancel: &CancellationToken,
) -> Result<String, ImportError> {
    if text.len() < SUMMARIZE_THRESHOLD {
        return Ok(text.to_string());
    }

    let chunks = chunk_sentences(text, CHUNK_LIMIT);
    let summaries = fold_chunks(&chunks, cancel, |chunk| async move {
        let request = settings.to_request(summarize_prompt(&chunk))?;
        llm.generate(&request).await
    })
    .await?;

    Ok(summaries.join("\n\n"))
}

/// Sequential fold over chunks. `summarize` failures (and blank replies,
/// which would silently drop the chunk) degrade to an excerpt of the
/// original; only cancellation stops the fold.
pub(crate) async fn fold_chunks<F, Fut>(
    chunks: &[String],
    cancel: &CancellationToken,
    mut summarize: F,
) -> Result<Vec<String>, ImportError>
where
    F: FnMut(String) -> Fut,
    Fut: std::future::Future<Output = Result<String, LlmError>>,
{
    let mut summaries = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        if cancel.is_cancelled() {
            return Err(ImportError::Cancelled);
        }
        match summarize(chunk.clone()).await {
            Ok(summary) if !summary.trim().is_empty() => summaries.push(summary),
            Ok(_) => {
                warn!("chunk {index} summarized to nothing, keeping an excerpt instead");
                summaries.push(fallback_excerpt(chunk));
            }
            Err(e) => {
                warn!("chunk {index} summarization failed ({e}), keeping an excerpt instead");
                summaries.push(fallback_excerpt(chunk));
            }
        }
    }
    Ok(summaries)
}

/// Splits on sentence-ending punctuation, keeping the punctuation with its
/// sentence and discarding empty fragments.
pub(crate) fn split_sentences(text: &str) -> Vec<String> {
    text.split_inclusive(['.', '!', '?'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Greedily packs sentences into chunks of at most `limit` bytes. A single
/// sentence longer than the limit is hard-split on character boundaries.
pub(crate) fn chunk_sentences(text: &str, limit: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for sentence in split_sentences(text) {
        if sentence.len() > limit {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
            }
            chunks.extend(hard_split(&sentence, limit));
            continue;
        }

        let needed = if current.is_empty() {
            sentence.len()
        } else {
            current.len() + 1 + sentence.len()
        };
        if needed > limit {
            chunks.push(std::mem::take(&mut current));
            current = sentence;
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&sentence);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

fn hard_split(sentence: &str, limit: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for c in sentence.chars() {
        if piece.len() + c.len_utf8() > limit {
            pieces.push(std::mem::take(&mut piece));
        }
        piece.push(c);
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}

fn fallback_excerpt(chunk: &str) -> String {
    chunk.chars().take(FALLBACK_CHARS).collect()
}
