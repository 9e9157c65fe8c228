use std::time::Duration;

use rand::Rng;
use tokio_util::sync::CancellationToken;
use yaku_core::types::{TranslationRequest, TranslationUnit};

use crate::{ProviderError, TranslationProvider};

/// Retries on top of the first attempt: 3 attempts total.
const MAX_RETRIES: u32 = 2;
const BASE_DELAY_MS: u64 = 1000;
const MAX_DELAY_MS: u64 = 120_000;
const JITTER_RATIO: f64 = 0.23;

/// What one retried provider call resolved to. Failures fold into
/// error-shaped units; cancellation is the only outcome that unwinds.
#[derive(Debug)]
pub enum TranslationOutcome {
    Done(TranslationUnit),
    Cancelled,
}

/// Runs one provider call with bounded retries.
///
/// Permanent credential rejections short-circuit. Rate limiting backs off
/// `1000ms * 2^retry` with no jitter; other transient failures add
/// ±23% jitter to desynchronize concurrently failing calls. Exhaustion
/// yields a terminal unit carrying the last failure's message.
pub async fn translate_with_retry(
    provider: &dyn TranslationProvider,
    request: &TranslationRequest,
    cancel: &CancellationToken,
) -> TranslationOutcome {
    let mut retries: u32 = 0;
    loop {
        let result = tokio::select! {
            _ = cancel.cancelled() => return TranslationOutcome::Cancelled,
            result = provider.translate(request, cancel) => result,
        };

        let err = match result {
            Ok(unit) => return TranslationOutcome::Done(unit),
            Err(err) => err,
        };

        match err {
            ProviderError::Cancelled => return TranslationOutcome::Cancelled,
            ProviderError::InvalidApiKey => {
                return terminal(provider, request, ProviderError::InvalidApiKey.to_string());
            }
            ProviderError::RateLimited => {
                if retries >= MAX_RETRIES {
                    return terminal(provider, request, ProviderError::RateLimited.to_string());
                }
                let delay = Duration::from_millis(BASE_DELAY_MS << retries);
                tracing::warn!(
                    provider = provider.name(),
                    retry = retries,
                    "rate limited, backing off {:?}",
                    delay
                );
                if !sleep_or_cancelled(delay, cancel).await {
                    return TranslationOutcome::Cancelled;
                }
            }
            err => {
                if retries >= MAX_RETRIES {
                    return terminal(provider, request, format!("Error: {err}"));
                }
                let delay = delay_with_jitter(retries);
                tracing::warn!(
                    provider = provider.name(),
                    retry = retries,
                    "transient failure ({err}), backing off {:?}",
                    delay
                );
                if !sleep_or_cancelled(delay, cancel).await {
                    return TranslationOutcome::Cancelled;
                }
            }
        }

        retries += 1;
    }
}

fn terminal(
    provider: &dyn TranslationProvider,
    request: &TranslationRequest,
    message: String,
) -> TranslationOutcome {
    TranslationOutcome::Done(TranslationUnit::error(
        provider.name(),
        &request.text,
        message,
    ))
}

fn delay_with_jitter(retries: u32) -> Duration {
    let base = (BASE_DELAY_MS << retries) as f64;
    let jitter = rand::thread_rng().gen_range(-1.0..=1.0) * JITTER_RATIO * base;
    Duration::from_millis((base + jitter).min(MAX_DELAY_MS as f64) as u64)
}

/// False when the cancellation fired before the delay elapsed.
async fn sleep_or_cancelled(delay: Duration, cancel: &CancellationToken) -> bool {
    tokio::select! {
        _ = cancel.cancelled() => false,
        _ = tokio::time::sleep(delay) => true,
    }
}
