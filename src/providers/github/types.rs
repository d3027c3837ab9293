use serde::Deserialize;

use crate::telemetry::JobExecution;

/// Audit log event category for runs generated by GitHub itself (Dependabot,
/// Pages, CodeQL default setup). No workflow file exists for these.
pub const DYNAMIC_EVENT: &str = "dynamic";

/// Entry from the organization audit log for a completed workflow run.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditLogEntry {
    /// Event that triggered the run (e.g., "push", "dynamic")
    #[serde(default)]
    pub event: Option<String>,
    /// Repository in "owner/repo" format
    pub repo: String,
    pub workflow_run_id: u64,
    /// SHA of the commit the run executed
    pub head_sha: String,
}

impl AuditLogEntry {
    pub fn is_synthetic(&self) -> bool {
        self.event.as_deref() == Some(DYNAMIC_EVENT)
    }
}

/// A workflow run resolved to the workflow file that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowRun {
    pub repository: String,
    pub run_id: u64,
    pub revision: String,
    pub workflow_path: String,
}

/// Subset of the workflow run resource.
#[derive(Debug, Deserialize)]
pub(super) struct WorkflowRunResponse {
    /// Path to the workflow file (e.g., ".github/workflows/ci.yml")
    pub path: String,
}

/// Response from the repository contents API.
#[derive(Debug, Deserialize)]
pub(super) struct ContentsResponse {
    /// Base64 encoded file content
    pub content: String,
}

/// Response from GitHub API for workflow jobs.
#[derive(Debug, Deserialize)]
pub(super) struct WorkflowJobsResponse {
    /// Number of jobs across all pages
    #[serde(default)]
    pub total_count: usize,
    pub jobs: Vec<JobExecution>,
}
