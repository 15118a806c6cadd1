//! Crawl submission sink contract and its HTTP implementation.
//!
//! The sink accepts one [`CrawlTask`] at a time and answers with an
//! accepted/queued acknowledgment or an error; everything past that
//! contract is opaque to this crate.

use std::time::Duration;

use serde::Deserialize;
use tracing::debug;
use url::Url;

use scrapeflow_shared::{CrawlTask, Result, ScrapeFlowError, TaskId};

/// User-Agent string for submission requests.
const USER_AGENT: &str = concat!("ScrapeFlow/", env!("CARGO_PKG_VERSION"));

// ---------------------------------------------------------------------------
// SubmissionSink
// ---------------------------------------------------------------------------

/// Acknowledgment from the crawl sink for a single accepted task.
#[derive(Debug, Clone)]
pub struct SubmitAck {
    /// The task this acknowledgment answers.
    pub task_id: TaskId,
    /// Sink-side queue identifier, when the sink reports one.
    pub queued_as: Option<String>,
}

/// One-task-at-a-time crawl submission sink.
pub trait SubmissionSink: Send + Sync {
    /// Submit a single task, returning its acknowledgment.
    fn submit(&self, task: &CrawlTask) -> impl Future<Output = Result<SubmitAck>> + Send;
}

// ---------------------------------------------------------------------------
// HttpSink
// ---------------------------------------------------------------------------

/// Optional response body shape — sinks that answer with plain 2xx and no
/// body are accepted too.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AckBody {
    #[serde(default)]
    queued_as: Option<String>,
}

/// HTTP submission sink POSTing tasks as JSON to a configured endpoint.
pub struct HttpSink {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSink {
    /// Build a sink for the given endpoint.
    pub fn new(endpoint: Url, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| ScrapeFlowError::Submit(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client, endpoint })
    }
}

impl SubmissionSink for HttpSink {
    async fn submit(&self, task: &CrawlTask) -> Result<SubmitAck> {
        debug!(task_id = %task.id, url = %task.url, "submitting task");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(task)
            .send()
            .await
            .map_err(|e| ScrapeFlowError::Submit(format!("{}: {e}", task.url)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeFlowError::Submit(format!(
                "{}: HTTP {status}",
                task.url
            )));
        }

        let body: AckBody = response.json().await.unwrap_or_default();

        Ok(SubmitAck {
            task_id: task.id.clone(),
            queued_as: body.queued_as,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrapeflow_shared::{CrawlOptions, CrawlRequest};

    fn one_task(url: &str) -> CrawlTask {
        let request = CrawlRequest::new(
            vec![Url::parse(url).unwrap()],
            CrawlOptions::default(),
        );
        request.tasks().remove(0)
    }

    #[tokio::test]
    async fn http_sink_posts_task_and_reads_ack() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .and(wiremock::matchers::path("/api/crawl"))
            .respond_with(
                wiremock::ResponseTemplate::new(202)
                    .set_body_json(serde_json::json!({ "queuedAs": "job-17" })),
            )
            .mount(&server)
            .await;

        let endpoint = Url::parse(&format!("{}/api/crawl", server.uri())).unwrap();
        let sink = HttpSink::new(endpoint, 5).unwrap();

        let task = one_task("https://example.com/product/1");
        let ack = sink.submit(&task).await.unwrap();
        assert_eq!(ack.task_id, task.id);
        assert_eq!(ack.queued_as.as_deref(), Some("job-17"));
    }

    #[tokio::test]
    async fn http_sink_accepts_empty_ack_body() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .respond_with(wiremock::ResponseTemplate::new(200))
            .mount(&server)
            .await;

        let endpoint = Url::parse(&server.uri()).unwrap();
        let sink = HttpSink::new(endpoint, 5).unwrap();

        let ack = sink.submit(&one_task("https://example.com/p")).await.unwrap();
        assert!(ack.queued_as.is_none());
    }

    #[tokio::test]
    async fn http_sink_surfaces_rejection() {
        let server = wiremock::MockServer::start().await;

        wiremock::Mock::given(wiremock::matchers::method("POST"))
            .respond_with(wiremock::ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let endpoint = Url::parse(&server.uri()).unwrap();
        let sink = HttpSink::new(endpoint, 5).unwrap();

        let err = sink
            .submit(&one_task("https://example.com/p"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("503"));
    }
}
