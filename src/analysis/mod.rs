//! Correlates workflow definitions with run telemetry.
//!
//! For each recorded job: pick the most similar job definition, pair its
//! declared steps with the recorded steps, and time the steps that invoke an
//! action.

pub mod alignment;
pub mod duration;
pub mod matcher;
pub mod similarity;

use log::{debug, warn};

use crate::report::JobReport;
use crate::telemetry::JobExecution;
use crate::workflow::WorkflowDefinition;

use alignment::{align_positionally, is_fully_aligned};
use matcher::match_job;
use similarity::{SequenceRatio, Similarity};

#[derive(Debug, Clone, Copy, Default)]
pub struct AnalysisOptions {
    /// Skip jobs whose telemetry has fewer records than declared steps
    /// (plus the setup step) instead of reporting the steps that did pair up
    pub strict_alignment: bool,
}

/// Produces job reports for one workflow run using [`SequenceRatio`] matching.
pub fn analyze_run(
    definition: &WorkflowDefinition,
    jobs: &[JobExecution],
    options: &AnalysisOptions,
) -> Vec<JobReport> {
    analyze_run_with(definition, jobs, options, &SequenceRatio)
}

/// Produces job reports for one workflow run.
///
/// Jobs that cannot be reported on (no telemetry, a matched definition
/// without steps, nothing aligned, no action steps) are left out. A job whose
/// timestamps cannot be read is dropped with a warning and does not affect
/// the other jobs.
pub fn analyze_run_with<S>(
    definition: &WorkflowDefinition,
    jobs: &[JobExecution],
    options: &AnalysisOptions,
    similarity: &S,
) -> Vec<JobReport>
where
    S: Similarity + ?Sized,
{
    jobs.iter()
        .filter_map(|job| analyze_job(definition, job, options, similarity))
        .collect()
}

fn analyze_job<S>(
    definition: &WorkflowDefinition,
    job: &JobExecution,
    options: &AnalysisOptions,
    similarity: &S,
) -> Option<JobReport>
where
    S: Similarity + ?Sized,
{
    if job.steps.is_empty() {
        debug!("No step telemetry for job '{}', skipping", job.name);
        return None;
    }

    let matched = match_job(&job.name, &definition.jobs, similarity)?;
    debug!(
        "Matched job '{}' to definition '{}' (similarity {:.2})",
        job.name, matched.job_id, matched.score
    );

    let step_definitions = &matched.definition.steps;
    if step_definitions.is_empty() {
        debug!("Definition '{}' declares no steps, skipping", matched.job_id);
        return None;
    }

    if options.strict_alignment && !is_fully_aligned(step_definitions, &job.steps) {
        debug!(
            "Job '{}' recorded {} steps for {} declared, skipping",
            job.name,
            job.steps.len(),
            step_definitions.len()
        );
        return None;
    }

    let aligned = align_positionally(step_definitions, &job.steps);

    match duration::job_report(&job.name, &aligned) {
        Ok(report) if report.steps.is_empty() => None,
        Ok(report) => Some(report),
        Err(e) => {
            warn!("Skipping job '{}': {e}", job.name);
            None
        }
    }
}
