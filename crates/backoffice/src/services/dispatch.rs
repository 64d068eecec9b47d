//! Chunked, sequential bulk email dispatch.
//!
//! The dispatcher partitions a pre-deduplicated recipient list into fixed
//! chunks and sends them strictly one after another, sleeping between chunks.
//! Sequential-with-delay pacing bounds total wall-clock time under the
//! hosting platform's request timeout and keeps the delivery API from seeing
//! simultaneous bursts; it is a backpressure mechanism, not an accident.
//!
//! Each chunk gets at most one attempt. A chunk-level failure marks the whole
//! chunk failed and dispatch continues over the remaining chunks.

use std::time::Duration;

use serde::Serialize;

use super::mailer::{MailerClient, MailerError, OutboundEmail, Party};
use super::recipients::Recipient;

/// Recipients per provider request.
pub const CHUNK_SIZE: usize = 50;

/// Pause between consecutive chunks.
pub const INTER_CHUNK_DELAY: Duration = Duration::from_millis(500);

/// At most this many error strings are kept per chunk.
pub const CHUNK_ERROR_CAP: usize = 5;

/// Per-chunk delivery outcome reported by a [`ChunkSender`].
#[derive(Debug, Clone, Default)]
pub struct ChunkOutcome {
    pub sent: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

/// Aggregate totals once every chunk has been attempted.
#[derive(Debug, Default, Serialize)]
pub struct DispatchReport {
    pub success: usize,
    pub failed: usize,
    pub errors: Vec<String>,
}

/// The provider boundary, one call per chunk.
pub trait ChunkSender {
    /// Deliver one chunk, reporting per-recipient counts.
    fn send_chunk(
        &self,
        recipients: &[Recipient],
        subject: &str,
        html_content: &str,
    ) -> impl Future<Output = Result<ChunkOutcome, MailerError>> + Send;
}

/// The chunking/pacing pipeline over any [`ChunkSender`].
pub struct Dispatcher<S> {
    sender: S,
    chunk_size: usize,
    delay: Duration,
}

impl<S: ChunkSender + Sync> Dispatcher<S> {
    /// Dispatcher with production pacing.
    #[must_use]
    pub const fn new(sender: S) -> Self {
        Self {
            sender,
            chunk_size: CHUNK_SIZE,
            delay: INTER_CHUNK_DELAY,
        }
    }

    /// Dispatcher with explicit pacing (tests use a zero delay).
    #[must_use]
    pub const fn with_pacing(sender: S, chunk_size: usize, delay: Duration) -> Self {
        Self {
            sender,
            chunk_size,
            delay,
        }
    }

    /// Run the full dispatch.
    ///
    /// `on_progress` is invoked exactly once per chunk with the cumulative
    /// processed count, `min((i + 1) * chunk_size, total)`. The sleep is
    /// skipped after the last chunk.
    pub async fn dispatch(
        &self,
        recipients: &[Recipient],
        subject: &str,
        html_content: &str,
        mut on_progress: impl FnMut(usize, usize) + Send,
    ) -> DispatchReport {
        let total = recipients.len();
        let mut report = DispatchReport::default();
        if total == 0 {
            return report;
        }

        let chunk_count = total.div_ceil(self.chunk_size);
        for (index, chunk) in recipients.chunks(self.chunk_size).enumerate() {
            match self.sender.send_chunk(chunk, subject, html_content).await {
                Ok(outcome) => {
                    report.success += outcome.sent;
                    report.failed += outcome.failed;
                    report
                        .errors
                        .extend(outcome.errors.into_iter().take(CHUNK_ERROR_CAP));
                }
                Err(e) => {
                    // Whole chunk counts as failed; later chunks still run
                    report.failed += chunk.len();
                    report.errors.push(format!("chunk {}: {e}", index + 1));
                    tracing::warn!(chunk = index + 1, error = %e, "campaign chunk failed");
                }
            }

            let processed = ((index + 1) * self.chunk_size).min(total);
            on_progress(processed, total);

            if index + 1 < chunk_count && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
        }

        report
    }
}

/// Replace personalization placeholders for one recipient.
///
/// `{{name}}` becomes the recipient name (fallback "there");
/// `{{email_encoded}}` becomes the base64 of the address, used by the
/// unsubscribe link.
#[must_use]
pub fn personalize(text: &str, recipient: &Recipient) -> String {
    use base64::Engine as _;

    let name = recipient.name.as_deref().unwrap_or("there");
    let encoded = base64::engine::general_purpose::STANDARD.encode(recipient.email.as_bytes());
    text.replace("{{name}}", name)
        .replace("{{email_encoded}}", &encoded)
}

/// Production chunk sender: fans a chunk out to per-recipient provider
/// requests with personalized subject and body.
pub struct CampaignSender<'a> {
    mailer: &'a MailerClient,
}

impl<'a> CampaignSender<'a> {
    /// Wrap a provider client.
    #[must_use]
    pub const fn new(mailer: &'a MailerClient) -> Self {
        Self { mailer }
    }
}

impl ChunkSender for CampaignSender<'_> {
    fn send_chunk(
        &self,
        recipients: &[Recipient],
        subject: &str,
        html_content: &str,
    ) -> impl Future<Output = Result<ChunkOutcome, MailerError>> + Send {
        async move {
            let mut outcome = ChunkOutcome::default();
            for recipient in recipients {
                let email = OutboundEmail {
                    to: vec![Party {
                        email: recipient.email.clone(),
                        name: recipient.name.clone(),
                    }],
                    cc: Vec::new(),
                    subject: personalize(subject, recipient),
                    html_content: personalize(html_content, recipient),
                    tags: vec!["campaign".to_string()],
                };
                match self.mailer.send(&email).await {
                    Ok(_) => outcome.sent += 1,
                    Err(e) => {
                        outcome.failed += 1;
                        outcome.errors.push(format!("{}: {e}", recipient.email));
                    }
                }
            }
            Ok(outcome)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn recipients(n: usize) -> Vec<Recipient> {
        (0..n)
            .map(|i| Recipient {
                email: format!("r{i}@x.com"),
                name: None,
            })
            .collect()
    }

    /// Records chunk sizes; fails on the given 1-based chunk numbers.
    struct MockSender {
        calls: Mutex<Vec<usize>>,
        next: AtomicUsize,
        fail_on: Vec<usize>,
        errors_per_chunk: usize,
    }

    impl MockSender {
        fn new(fail_on: Vec<usize>) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                next: AtomicUsize::new(0),
                fail_on,
                errors_per_chunk: 0,
            }
        }
    }

    impl ChunkSender for MockSender {
        fn send_chunk(
            &self,
            chunk: &[Recipient],
            _subject: &str,
            _html: &str,
        ) -> impl Future<Output = Result<ChunkOutcome, MailerError>> + Send {
            let number = self.next.fetch_add(1, Ordering::SeqCst) + 1;
            self.calls.lock().unwrap().push(chunk.len());
            let fail = self.fail_on.contains(&number);
            let outcome = ChunkOutcome {
                sent: chunk.len(),
                failed: 0,
                errors: (0..self.errors_per_chunk)
                    .map(|i| format!("soft error {i}"))
                    .collect(),
            };
            async move {
                if fail {
                    Err(MailerError::Api {
                        status: 500,
                        message: "provider unavailable".to_string(),
                    })
                } else {
                    Ok(outcome)
                }
            }
        }
    }

    #[tokio::test]
    async fn test_chunk_arithmetic_and_progress() {
        let sender = MockSender::new(Vec::new());
        let dispatcher = Dispatcher::with_pacing(sender, CHUNK_SIZE, Duration::ZERO);
        let list = recipients(120);

        let mut progress = Vec::new();
        let report = dispatcher
            .dispatch(&list, "s", "<p>b</p>", |sent, total| {
                progress.push((sent, total));
            })
            .await;

        // ceil(120 / 50) = 3 provider calls
        assert_eq!(
            *dispatcher.sender.calls.lock().unwrap(),
            vec![50, 50, 20]
        );
        // Progress: once per chunk, strictly increasing, capped at N
        assert_eq!(progress, vec![(50, 120), (100, 120), (120, 120)]);
        assert_eq!(report.success, 120);
        assert_eq!(report.failed, 0);
        assert!(report.errors.is_empty());
    }

    #[tokio::test]
    async fn test_chunk_failure_is_isolated() {
        let sender = MockSender::new(vec![2]);
        let dispatcher = Dispatcher::with_pacing(sender, CHUNK_SIZE, Duration::ZERO);
        let list = recipients(130);

        let report = dispatcher.dispatch(&list, "s", "b", |_, _| {}).await;

        // All three chunks attempted despite chunk 2 failing
        assert_eq!(dispatcher.sender.calls.lock().unwrap().len(), 3);
        assert_eq!(report.failed, 50);
        assert_eq!(report.success, 80);
        assert_eq!(report.errors.len(), 1);
        assert!(report.errors.first().unwrap().starts_with("chunk 2:"));
    }

    #[tokio::test]
    async fn test_chunk_errors_capped() {
        let mut sender = MockSender::new(Vec::new());
        sender.errors_per_chunk = 9;
        let dispatcher = Dispatcher::with_pacing(sender, 10, Duration::ZERO);
        let list = recipients(20);

        let report = dispatcher.dispatch(&list, "s", "b", |_, _| {}).await;
        // 2 chunks, at most 5 retained errors each
        assert_eq!(report.errors.len(), 2 * CHUNK_ERROR_CAP);
    }

    #[tokio::test]
    async fn test_empty_recipient_list_is_a_no_op() {
        let sender = MockSender::new(Vec::new());
        let dispatcher = Dispatcher::with_pacing(sender, CHUNK_SIZE, Duration::ZERO);

        let mut calls = 0;
        let report = dispatcher.dispatch(&[], "s", "b", |_, _| calls += 1).await;
        assert_eq!(calls, 0);
        assert_eq!(report.success + report.failed, 0);
    }

    #[test]
    fn test_personalize() {
        use base64::Engine as _;

        let named = Recipient {
            email: "amy@acme.com".to_string(),
            name: Some("Amy".to_string()),
        };
        assert_eq!(personalize("Hi {{name}}!", &named), "Hi Amy!");

        let anonymous = Recipient {
            email: "x@y.com".to_string(),
            name: None,
        };
        assert_eq!(personalize("Hi {{name}}!", &anonymous), "Hi there!");

        let token = base64::engine::general_purpose::STANDARD.encode(b"x@y.com");
        assert_eq!(
            personalize("u/{{email_encoded}}", &anonymous),
            format!("u/{token}")
        );
    }
}
