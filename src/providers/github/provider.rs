use chrono::Utc;
use log::{info, warn};

use crate::analysis::{analyze_run, AnalysisOptions};
use crate::auth::Token;
use crate::error::Result;
use crate::output::PhaseProgress;
use crate::report::{PerformanceReport, RunFailure, RunReport, RunStage};

use super::client::GitHubClient;
use super::types::{AuditLogEntry, WorkflowRun};

/// Provider for collecting action step timings from GitHub Actions.
pub struct GitHubProvider {
    /// GitHub API client
    client: GitHubClient,
    /// Organization whose audit log lists the runs
    organization: String,
}

impl GitHubProvider {
    /// Create a new GitHub Actions provider.
    ///
    /// # Arguments
    ///
    /// * `base_url` - GitHub API base URL
    /// * `organization` - Organization login (e.g., "octodemo")
    /// * `token` - GitHub access token
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be configured.
    pub fn new(base_url: &str, organization: String, token: &Token) -> Result<Self> {
        if organization.is_empty() || organization.contains('/') {
            return Err(crate::error::ActPerfError::Config(format!(
                "Invalid organization name: '{organization}'"
            )));
        }

        let client = GitHubClient::new(base_url, token)?;

        Ok(Self {
            client,
            organization,
        })
    }

    /// Collect per-action step durations for recently completed workflow runs.
    ///
    /// Runs are taken from the organization audit log and processed one at a
    /// time. Runs without a real workflow file (`dynamic` events) are skipped.
    /// When any request for a run fails, the failure is recorded and the next
    /// run is processed.
    ///
    /// # Arguments
    ///
    /// * `phrase` - Audit log search phrase selecting completed runs
    /// * `limit` - Maximum number of audit log entries to consider
    /// * `options` - Matching and alignment options
    ///
    /// # Errors
    ///
    /// Returns an error only if the audit log itself cannot be read.
    pub async fn collect_performance(
        &self,
        phrase: &str,
        limit: usize,
        options: &AnalysisOptions,
    ) -> Result<PerformanceReport> {
        info!(
            "Starting performance collection for organization: {}",
            self.organization
        );

        let progress = PhaseProgress::start_phase_1(limit);

        let entries = self
            .client
            .fetch_audit_log(&self.organization, phrase, limit)
            .await?;

        let total_runs = entries.len();
        let (synthetic, real): (Vec<AuditLogEntry>, Vec<AuditLogEntry>) =
            entries.into_iter().partition(AuditLogEntry::is_synthetic);
        info!(
            "Found {total_runs} completed runs, {} without a workflow file",
            synthetic.len()
        );

        let progress = progress.finish_phase_1_start_phase_2(real.len());

        let mut runs = Vec::new();
        let mut failures = Vec::new();

        for entry in &real {
            match self.process_run(entry, options).await {
                Ok(run) if run.jobs.is_empty() => {}
                Ok(run) => runs.push(run),
                Err(failure) => {
                    warn!("{failure}");
                    failures.push(failure);
                }
            }
            progress.inc();
        }

        progress.finish_phase_2(runs.len());

        Ok(PerformanceReport {
            provider: "GitHub Actions".to_string(),
            organization: self.organization.clone(),
            collected_at: Utc::now(),
            total_runs,
            skipped_runs: synthetic.len(),
            runs,
            failures,
        })
    }

    async fn process_run(
        &self,
        entry: &AuditLogEntry,
        options: &AnalysisOptions,
    ) -> std::result::Result<RunReport, RunFailure> {
        let fail = |stage: RunStage| {
            move |e: crate::error::ActPerfError| RunFailure {
                repository: entry.repo.clone(),
                run_id: entry.workflow_run_id,
                stage,
                message: e.status(),
            }
        };

        let workflow_path = self
            .client
            .fetch_workflow_path(&entry.repo, entry.workflow_run_id)
            .await
            .map_err(fail(RunStage::WorkflowRun))?;

        let run = WorkflowRun {
            repository: entry.repo.clone(),
            run_id: entry.workflow_run_id,
            revision: entry.head_sha.clone(),
            workflow_path,
        };

        let definition = self
            .client
            .fetch_workflow_definition(&run.repository, &run.workflow_path, &run.revision)
            .await
            .map_err(fail(RunStage::WorkflowFile))?;

        let jobs = self
            .client
            .fetch_jobs(&run.repository, run.run_id)
            .await
            .map_err(fail(RunStage::Jobs))?;

        let jobs = analyze_run(&definition, &jobs, options);

        Ok(RunReport {
            repository: run.repository,
            run_id: run.run_id,
            revision: run.revision,
            workflow_path: run.workflow_path,
            jobs,
        })
    }
}
