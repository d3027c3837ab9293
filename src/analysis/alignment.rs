use crate::telemetry::StepExecution;
use crate::workflow::StepDefinition;

/// Number of runner bookkeeping steps ("Set up job") recorded before the
/// first declared step.
pub const LEADING_SETUP_STEPS: usize = 1;

/// A declared step paired with the execution record believed to belong to it.
#[derive(Debug, Clone, Copy)]
pub struct AlignedStep<'a> {
    pub definition: &'a StepDefinition,
    pub execution: &'a StepExecution,
}

/// Pairs declared steps with execution records by position.
///
/// Assumes the runner records exactly [`LEADING_SETUP_STEPS`] synthetic steps
/// before the declared ones and that anything after them (post-run cleanup,
/// "Complete job") is trailing bookkeeping. The first record is skipped, the
/// next `definitions.len()` records are zipped with the definitions, and the
/// rest are dropped. When too few records exist, the result is shorter than
/// `definitions`.
pub fn align_positionally<'a>(
    definitions: &'a [StepDefinition],
    executions: &'a [StepExecution],
) -> Vec<AlignedStep<'a>> {
    definitions
        .iter()
        .zip(executions.iter().skip(LEADING_SETUP_STEPS))
        .map(|(definition, execution)| AlignedStep {
            definition,
            execution,
        })
        .collect()
}

/// Whether the telemetry holds a record for every declared step.
pub fn is_fully_aligned(definitions: &[StepDefinition], executions: &[StepExecution]) -> bool {
    executions.len() >= definitions.len() + LEADING_SETUP_STEPS
}
