use log::debug;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, USER_AGENT};
use serde::de::DeserializeOwned;
use url::Url;

use crate::auth::Token;
use crate::error::{ActPerfError, Result};
use crate::telemetry::JobExecution;
use crate::workflow::WorkflowDefinition;

use super::types::{
    AuditLogEntry, ContentsResponse, WorkflowJobsResponse, WorkflowRunResponse,
};

const API_VERSION: &str = "2022-11-28";
const MAX_PAGE_SIZE: usize = 100;

/// GitHub REST API client for audit log, workflow and job data.
///
/// Requests are sent one at a time and are not retried.
#[derive(Clone)]
pub struct GitHubClient {
    client: reqwest::Client,
    /// Base URL for GitHub API, without trailing slash
    base_url: String,
}

impl GitHubClient {
    /// Create a new GitHub API client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - GitHub API base URL (e.g., "https://api.github.com")
    /// * `token` - GitHub access token with `read:audit_log` and `repo` scopes
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid, the token cannot be used
    /// as a header value, or the HTTP client cannot be built.
    pub fn new(base_url: &str, token: &Token) -> Result<Self> {
        Url::parse(base_url).map_err(|e| ActPerfError::Config(format!("Invalid base URL: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static("actperf/0.1"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/vnd.github+json"));
        headers.insert(
            HeaderName::from_static("x-github-api-version"),
            HeaderValue::from_static(API_VERSION),
        );

        let mut authorization = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(|e| ActPerfError::Config(format!("Invalid token: {e}")))?;
        authorization.set_sensitive(true);
        headers.insert(reqwest::header::AUTHORIZATION, authorization);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| ActPerfError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T>(&self, path: &str, query: &[(&str, String)]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}/{}", self.base_url, path);
        debug!("GET {url}");

        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            return Err(ActPerfError::ApiError {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    /// Fetch completed workflow run entries from an organization's audit log.
    ///
    /// # Arguments
    ///
    /// * `organization` - Organization whose audit log is searched
    /// * `phrase` - Audit log search phrase
    /// * `limit` - Maximum number of entries to return
    pub async fn fetch_audit_log(
        &self,
        organization: &str,
        phrase: &str,
        limit: usize,
    ) -> Result<Vec<AuditLogEntry>> {
        let mut entries = Vec::new();
        let per_page = MAX_PAGE_SIZE.min(limit.max(1));
        let mut page = 1;

        while entries.len() < limit {
            let batch: Vec<AuditLogEntry> = self
                .get_json(
                    &format!("orgs/{organization}/audit-log"),
                    &[
                        ("phrase", phrase.to_string()),
                        ("per_page", per_page.to_string()),
                        ("page", page.to_string()),
                    ],
                )
                .await?;

            let batch_len = batch.len();
            entries.extend(batch);

            if batch_len < per_page {
                break;
            }
            page += 1;
        }

        entries.truncate(limit);
        Ok(entries)
    }

    /// Fetch the path of the workflow file a run was started from.
    pub async fn fetch_workflow_path(&self, repository: &str, run_id: u64) -> Result<String> {
        let run: WorkflowRunResponse = self
            .get_json(&format!("repos/{repository}/actions/runs/{run_id}"), &[])
            .await?;
        Ok(run.path)
    }

    /// Fetch and decode a workflow file as it was at `revision`.
    pub async fn fetch_workflow_definition(
        &self,
        repository: &str,
        path: &str,
        revision: &str,
    ) -> Result<WorkflowDefinition> {
        let contents: ContentsResponse = self
            .get_json(
                &format!("repos/{repository}/contents/{path}"),
                &[("ref", revision.to_string())],
            )
            .await?;
        WorkflowDefinition::from_base64_contents(&contents.content)
    }

    /// Fetch jobs, with step telemetry, for a workflow run.
    ///
    /// Pages are followed until `total_count` jobs are collected or a short
    /// page is returned.
    pub async fn fetch_jobs(&self, repository: &str, run_id: u64) -> Result<Vec<JobExecution>> {
        let mut jobs = Vec::new();
        let mut page = 1;

        loop {
            let response: WorkflowJobsResponse = self
                .get_json(
                    &format!("repos/{repository}/actions/runs/{run_id}/jobs"),
                    &[
                        ("per_page", MAX_PAGE_SIZE.to_string()),
                        ("page", page.to_string()),
                    ],
                )
                .await?;

            let batch_len = response.jobs.len();
            jobs.extend(response.jobs);

            if batch_len < MAX_PAGE_SIZE || jobs.len() >= response.total_count {
                break;
            }
            page += 1;
        }

        debug!("Fetched {} jobs for {repository} run {run_id}", jobs.len());
        Ok(jobs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::Engine;
    use mockito::Matcher;

    fn create_client(server: &mockito::ServerGuard) -> GitHubClient {
        GitHubClient::new(&server.url(), &Token::from("test-token")).unwrap()
    }

    #[test]
    fn test_invalid_base_url() {
        let result = GitHubClient::new("not a url", &Token::from("t"));
        assert!(matches!(result, Err(ActPerfError::Config(_))));
    }

    #[tokio::test]
    async fn test_fetch_audit_log_sends_headers_and_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/orgs/octodemo/audit-log")
            .match_header("authorization", "Bearer test-token")
            .match_header("x-github-api-version", "2022-11-28")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("phrase".into(), "action:workflows.completed_workflow_run".into()),
                Matcher::UrlEncoded("per_page".into(), "2".into()),
                Matcher::UrlEncoded("page".into(), "1".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"event": "push", "repo": "octodemo/app", "workflow_run_id": 1, "head_sha": "aaa"},
                    {"event": "dynamic", "repo": "octodemo/app", "workflow_run_id": 2, "head_sha": "bbb"}
                ]"#,
            )
            .create_async()
            .await;

        let client = create_client(&server);
        let entries = client
            .fetch_audit_log("octodemo", "action:workflows.completed_workflow_run", 2)
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(entries.len(), 2);
        assert!(!entries[0].is_synthetic());
        assert!(entries[1].is_synthetic());
    }

    fn audit_page(ids: std::ops::Range<u64>) -> String {
        let entries: Vec<String> = ids
            .map(|id| {
                format!(r#"{{"event": "push", "repo": "o/r", "workflow_run_id": {id}, "head_sha": "s"}}"#)
            })
            .collect();
        format!("[{}]", entries.join(","))
    }

    #[tokio::test]
    async fn test_fetch_audit_log_follows_pages() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/orgs/o/audit-log")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("per_page".into(), "100".into()),
            ]))
            .with_status(200)
            .with_body(audit_page(0..100))
            .create_async()
            .await;
        let second = server
            .mock("GET", "/orgs/o/audit-log")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(200)
            .with_body(audit_page(100..110))
            .create_async()
            .await;

        let client = create_client(&server);
        let entries = client.fetch_audit_log("o", "p", 150).await.unwrap();

        first.assert_async().await;
        second.assert_async().await;
        assert_eq!(entries.len(), 110);
        assert_eq!(entries[109].workflow_run_id, 109);
    }

    #[tokio::test]
    async fn test_fetch_audit_log_stops_at_limit() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/orgs/o/audit-log")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(audit_page(0..3))
            .expect(1)
            .create_async()
            .await;

        let client = create_client(&server);
        let entries = client.fetch_audit_log("o", "p", 3).await.unwrap();

        mock.assert_async().await;
        assert_eq!(entries.len(), 3);
    }

    #[tokio::test]
    async fn test_fetch_workflow_definition_decodes_contents() {
        let mut server = mockito::Server::new_async().await;
        let yaml = "jobs:\n  build:\n    steps:\n      - uses: actions/checkout@v4\n";
        let encoded = base64::engine::general_purpose::STANDARD.encode(yaml);
        let mock = server
            .mock("GET", "/repos/octodemo/app/contents/.github/workflows/ci.yml")
            .match_query(Matcher::UrlEncoded("ref".into(), "abc123".into()))
            .with_status(200)
            .with_body(format!(r#"{{"content": "{encoded}\n", "encoding": "base64"}}"#))
            .create_async()
            .await;

        let client = create_client(&server);
        let workflow = client
            .fetch_workflow_definition("octodemo/app", ".github/workflows/ci.yml", "abc123")
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(workflow.jobs["build"].steps.len(), 1);
    }

    #[tokio::test]
    async fn test_non_success_status_is_api_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/octodemo/app/actions/runs/9")
            .with_status(404)
            .with_body(r#"{"message": "Not Found"}"#)
            .create_async()
            .await;

        let client = create_client(&server);
        let result = client.fetch_workflow_path("octodemo/app", 9).await;

        match result {
            Err(ActPerfError::ApiError { status, message }) => {
                assert_eq!(status, 404);
                assert!(message.contains("Not Found"));
            }
            other => panic!("expected API error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_fetch_jobs() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/repos/octodemo/app/actions/runs/5/jobs")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(
                r#"{"total_count": 1, "jobs": [{"name": "Build", "steps": [
                    {"name": "Set up job", "status": "completed", "conclusion": "success", "number": 1,
                     "started_at": "2024-01-01T00:00:00Z", "completed_at": "2024-01-01T00:00:01Z"}
                ]}]}"#,
            )
            .create_async()
            .await;

        let client = create_client(&server);
        let jobs = client.fetch_jobs("octodemo/app", 5).await.unwrap();

        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].steps[0].name, "Set up job");
    }

    fn jobs_page(total_count: usize, ids: std::ops::Range<usize>) -> String {
        let jobs: Vec<String> = ids
            .map(|id| format!(r#"{{"name": "Matrix ({id})", "steps": []}}"#))
            .collect();
        format!(r#"{{"total_count": {total_count}, "jobs": [{}]}}"#, jobs.join(","))
    }

    #[tokio::test]
    async fn test_fetch_jobs_follows_pages() {
        let mut server = mockito::Server::new_async().await;
        let first = server
            .mock("GET", "/repos/o/r/actions/runs/1/jobs")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("per_page".into(), "100".into()),
            ]))
            .with_status(200)
            .with_body(jobs_page(145, 0..100))
            .create_async()
            .await;
        let second = server
            .mock("GET", "/repos/o/r/actions/runs/1/jobs")
            .match_query(Matcher::UrlEncoded("page".into(), "2".into()))
            .with_status(200)
            .with_body(jobs_page(145, 100..145))
            .create_async()
            .await;

        let client = create_client(&server);
        let jobs = client.fetch_jobs("o/r", 1).await.unwrap();

        first.assert_async().await;
        second.assert_async().await;
        assert_eq!(jobs.len(), 145);
        assert_eq!(jobs[0].name, "Matrix (0)");
        assert_eq!(jobs[144].name, "Matrix (144)");
    }

    #[tokio::test]
    async fn test_fetch_jobs_stops_at_total_count() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/repos/o/r/actions/runs/1/jobs")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(jobs_page(100, 0..100))
            .expect(1)
            .create_async()
            .await;

        let client = create_client(&server);
        let jobs = client.fetch_jobs("o/r", 1).await.unwrap();

        mock.assert_async().await;
        assert_eq!(jobs.len(), 100);
    }
}
