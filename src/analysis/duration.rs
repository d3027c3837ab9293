use chrono::NaiveDateTime;

use super::alignment::AlignedStep;
use crate::error::{ActPerfError, Result};
use crate::report::{ActionTiming, JobReport};
use crate::telemetry::StepExecution;

/// Timestamp format used by the GitHub jobs API (second precision, UTC).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

fn parse_timestamp(step: &StepExecution, value: Option<&str>) -> Result<NaiveDateTime> {
    let value = value.ok_or_else(|| ActPerfError::MissingTimestamp(step.name.clone()))?;
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|_| ActPerfError::Timestamp {
        step: step.name.clone(),
        value: value.to_string(),
    })
}

/// Elapsed seconds between a step's start and completion.
///
/// Negative values (clock skew, inconsistent telemetry) are returned as-is.
pub fn step_duration(step: &StepExecution) -> Result<f64> {
    let started_at = parse_timestamp(step, step.started_at.as_deref())?;
    let completed_at = parse_timestamp(step, step.completed_at.as_deref())?;

    #[allow(clippy::cast_precision_loss)]
    let seconds = (completed_at - started_at).num_seconds() as f64;
    Ok(seconds)
}

/// Builds the report for one job from its aligned steps.
///
/// Only steps that reference an action produce a line item; the others are
/// skipped without inspecting their timestamps.
///
/// # Errors
///
/// Returns an error if an action step lacks a timestamp or carries one that
/// does not match [`TIMESTAMP_FORMAT`].
pub fn job_report(title: &str, aligned: &[AlignedStep<'_>]) -> Result<JobReport> {
    let steps = aligned
        .iter()
        .filter_map(|step| {
            step.definition.uses.as_ref().map(|action| {
                step_duration(step.execution).map(|duration_seconds| ActionTiming {
                    action: action.clone(),
                    duration_seconds,
                })
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(JobReport {
        title: title.to_string(),
        steps,
    })
}
