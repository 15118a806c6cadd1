//! Batch fan-out: one shared request, N independent task submissions.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use scrapeflow_shared::{CrawlRequest, Result, ScrapeFlowError};

use crate::sink::SubmissionSink;

// ---------------------------------------------------------------------------
// BatchOutcome
// ---------------------------------------------------------------------------

/// One task submission that did not go through.
#[derive(Debug, Clone)]
pub struct TaskFailure {
    /// The URL whose task failed to submit.
    pub url: String,
    /// The sink's error, rendered for display.
    pub error: String,
}

/// Aggregate result of a batch submission.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    /// Tasks acknowledged by the sink.
    pub submitted: usize,
    /// Tasks the sink rejected, enumerated per URL.
    pub failures: Vec<TaskFailure>,
}

impl BatchOutcome {
    /// Whether every task in the batch was accepted.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

// ---------------------------------------------------------------------------
// submit_batch
// ---------------------------------------------------------------------------

/// Expand `request` into one task per URL and submit them all.
///
/// Fails with [`ScrapeFlowError::NoUrls`] before any dispatch when the URL
/// list is empty. Otherwise every task is spawned independently: a failed
/// or panicked submission never blocks or cancels any other, and each
/// failure is captured against its URL. Submission order follows the URL
/// list; completion order is unconstrained.
#[instrument(skip_all, fields(urls = request.urls.len()))]
pub async fn submit_batch<S>(sink: Arc<S>, request: &CrawlRequest) -> Result<BatchOutcome>
where
    S: SubmissionSink + 'static,
{
    if request.urls.is_empty() {
        return Err(ScrapeFlowError::NoUrls);
    }

    let tasks = request.tasks();
    info!(
        tasks = tasks.len(),
        depth = request.options.depth,
        max_pages = request.options.max_pages,
        provider = %request.options.ai_provider,
        "dispatching batch"
    );

    let mut handles = Vec::with_capacity(tasks.len());
    for task in tasks {
        let sink = Arc::clone(&sink);
        let url = task.url.to_string();
        handles.push((
            url,
            tokio::spawn(async move { sink.submit(&task).await }),
        ));
    }

    let mut outcome = BatchOutcome::default();
    for (url, handle) in handles {
        match handle.await {
            Ok(Ok(ack)) => {
                debug!(%url, task_id = %ack.task_id, queued_as = ?ack.queued_as, "task accepted");
                outcome.submitted += 1;
            }
            Ok(Err(e)) => {
                warn!(%url, error = %e, "task submission failed");
                outcome.failures.push(TaskFailure {
                    url,
                    error: e.to_string(),
                });
            }
            Err(e) => {
                warn!(%url, error = %e, "submission task panicked");
                outcome.failures.push(TaskFailure {
                    url,
                    error: format!("submission task panicked: {e}"),
                });
            }
        }
    }

    info!(
        submitted = outcome.submitted,
        failed = outcome.failures.len(),
        "batch submission finished"
    );

    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::{HttpSink, SubmitAck};
    use scrapeflow_shared::{CrawlOptions, CrawlTask};
    use url::Url;

    /// Test sink that rejects any URL whose host starts with "fail".
    struct ScriptedSink;

    impl SubmissionSink for ScriptedSink {
        async fn submit(&self, task: &CrawlTask) -> scrapeflow_shared::Result<SubmitAck> {
            if task.url.host_str().is_some_and(|h| h.starts_with("fail")) {
                Err(ScrapeFlowError::Submit(format!("{}: rejected", task.url)))
            } else {
                Ok(SubmitAck {
                    task_id: task.id.clone(),
                    queued_as: None,
                })
            }
        }
    }

    fn request_for(urls: &[&str]) -> CrawlRequest {
        CrawlRequest::new(
            urls.iter().map(|u| Url::parse(u).unwrap()).collect(),
            CrawlOptions::default(),
        )
    }

    #[tokio::test]
    async fn empty_batch_is_rejected_before_dispatch() {
        let err = submit_batch(Arc::new(ScriptedSink), &request_for(&[]))
            .await
            .unwrap_err();
        assert!(matches!(err, ScrapeFlowError::NoUrls));
    }

    #[tokio::test]
    async fn all_tasks_accepted() {
        let request = request_for(&["https://a.example.com/", "https://b.example.com/"]);
        let outcome = submit_batch(Arc::new(ScriptedSink), &request).await.unwrap();
        assert_eq!(outcome.submitted, 2);
        assert!(outcome.is_complete());
    }

    #[tokio::test]
    async fn one_failure_does_not_stop_the_rest() {
        let request = request_for(&[
            "https://fail.example.com/",
            "https://b.example.com/",
            "https://c.example.com/",
        ]);
        let outcome = submit_batch(Arc::new(ScriptedSink), &request).await.unwrap();

        assert_eq!(outcome.submitted, 2);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].url, "https://fail.example.com/");
        assert!(outcome.failures[0].error.contains("rejected"));
    }

    #[tokio::test]
    async fn partial_failure_against_http_sink() {
        let server = wiremock::MockServer::start().await;

        // The sink rejects tasks for one specific URL; everything else queues.
        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::body_string_contains("flaky.example.com"))
            .respond_with(wiremock::ResponseTemplate::new(500))
            .mount(&server)
            .await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .respond_with(wiremock::ResponseTemplate::new(202))
            .mount(&server)
            .await;

        let endpoint = Url::parse(&server.uri()).unwrap();
        let sink = Arc::new(HttpSink::new(endpoint, 5).unwrap());

        let request = request_for(&["https://flaky.example.com/p", "https://ok.example.com/p"]);
        let outcome = submit_batch(sink, &request).await.unwrap();

        assert_eq!(outcome.submitted, 1);
        assert_eq!(outcome.failures.len(), 1);
        assert!(outcome.failures[0].url.contains("flaky.example.com"));
    }
}
