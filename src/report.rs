use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Performance data collected across all analyzed workflow runs.
#[derive(Debug, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub provider: String,
    pub organization: String,
    pub collected_at: DateTime<Utc>,
    pub total_runs: usize,
    /// Audit entries skipped because no real workflow file backs them
    pub skipped_runs: usize,
    pub runs: Vec<RunReport>,
    pub failures: Vec<RunFailure>,
}

/// Time spent in one action invocation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionTiming {
    pub action: String,
    pub duration_seconds: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobReport {
    pub title: String,
    pub steps: Vec<ActionTiming>,
}

/// Job reports for a single workflow run, attributed to the workflow file at
/// the revision that ran.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub repository: String,
    pub run_id: u64,
    pub revision: String,
    pub workflow_path: String,
    pub jobs: Vec<JobReport>,
}

impl RunReport {
    pub fn workflow_url(&self) -> String {
        format!(
            "https://github.com/{}/tree/{}/{}",
            self.repository, self.revision, self.workflow_path
        )
    }
}

/// Loader stage a run failed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStage {
    WorkflowRun,
    WorkflowFile,
    Jobs,
}

impl std::fmt::Display for RunStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::WorkflowRun => "workflow run data",
            Self::WorkflowFile => "workflow file",
            Self::Jobs => "job data",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunFailure {
    pub repository: String,
    pub run_id: u64,
    pub stage: RunStage,
    pub message: String,
}

impl std::fmt::Display for RunFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Failed to retrieve {} for {} run {}: {}",
            self.stage, self.repository, self.run_id, self.message
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_url() {
        let run = RunReport {
            repository: "octodemo/app".to_string(),
            run_id: 42,
            revision: "abc123".to_string(),
            workflow_path: ".github/workflows/ci.yml".to_string(),
            jobs: vec![],
        };
        assert_eq!(
            run.workflow_url(),
            "https://github.com/octodemo/app/tree/abc123/.github/workflows/ci.yml"
        );
    }

    #[test]
    fn test_run_failure_names_stage_and_status() {
        let failure = RunFailure {
            repository: "octodemo/app".to_string(),
            run_id: 7,
            stage: RunStage::WorkflowFile,
            message: "404".to_string(),
        };
        assert_eq!(
            failure.to_string(),
            "Failed to retrieve workflow file for octodemo/app run 7: 404"
        );
    }

    #[test]
    fn test_run_failure_json_fields() {
        let failure = RunFailure {
            repository: "octodemo/app".to_string(),
            run_id: 7,
            stage: RunStage::Jobs,
            message: "502".to_string(),
        };

        let json = serde_json::to_value(&failure).unwrap();
        assert_eq!(json["stage"], "jobs");
        assert_eq!(json["message"], "502");
        assert!(json.get("status").is_none());
    }
}
