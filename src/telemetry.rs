use serde::{Deserialize, Serialize};

/// A job as recorded by GitHub Actions during a workflow run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobExecution {
    /// Job name with all expressions resolved
    pub name: String,
    /// Executed steps, including runner bookkeeping steps
    #[serde(default)]
    pub steps: Vec<StepExecution>,
}

/// A step as recorded by GitHub Actions.
///
/// Timestamps are kept verbatim (`2024-01-01T12:00:00Z`); they are parsed when
/// durations are computed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepExecution {
    pub name: String,
    pub status: String,
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
    #[serde(default)]
    pub number: u32,
}
