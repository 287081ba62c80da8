use std::io::BufRead;

use skyliner_core::RefUpdate;
use skyliner_git::{extract_range, ExtractionPolicy, HistorySource};
use skyliner_sync::{deliver_with_retry, DeliveryReport, DeliveryTransport, RetryPolicy};

/// Counts of what happened to each input line.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct HookSummary {
    pub delivered: usize,
    pub given_up: usize,
    pub skipped: usize,
}

/// Reads `before after ref` lines and reports each update in turn.
pub struct Hook<'a> {
    history: &'a dyn HistorySource,
    transport: &'a dyn DeliveryTransport,
    retry: RetryPolicy,
    extraction: ExtractionPolicy,
}

impl<'a> Hook<'a> {
    pub fn new(history: &'a dyn HistorySource, transport: &'a dyn DeliveryTransport) -> Self {
        Self {
            history,
            transport,
            retry: RetryPolicy::default(),
            extraction: ExtractionPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn with_extraction(mut self, extraction: ExtractionPolicy) -> Self {
        self.extraction = extraction;
        self
    }

    /// Process every line of `input` in order. Failures are logged and
    /// counted; they never stop the lines that follow.
    pub async fn run<R: BufRead>(&self, input: R) -> HookSummary {
        let mut summary = HookSummary::default();
        // Ref names are bytes; a non-utf-8 name must not end the loop.
        for line in input.split(b'\n') {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    tracing::warn!("could not read ref updates: {}", e);
                    break;
                }
            };
            let line = String::from_utf8_lossy(&line);
            self.handle_line(&line, &mut summary).await;
        }

        tracing::debug!(
            "done: {} delivered, {} given up, {} skipped",
            summary.delivered,
            summary.given_up,
            summary.skipped
        );
        summary
    }

    async fn handle_line(&self, line: &str, summary: &mut HookSummary) {
        let update = match RefUpdate::parse_line(line) {
            Ok(Some(update)) => update,
            Ok(None) => return,
            Err(e) => {
                tracing::warn!("skipping input: {}", e);
                summary.skipped += 1;
                return;
            }
        };

        let label = update.to_string();
        let payload = match extract_range(self.history, update, self.extraction) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::warn!("not reporting {}: {}", label, e);
                summary.skipped += 1;
                return;
            }
        };

        match deliver_with_retry(self.transport, &payload, &self.retry).await {
            DeliveryReport::Delivered { .. } => summary.delivered += 1,
            DeliveryReport::GivenUp { .. } => summary.given_up += 1,
        }
    }
}
