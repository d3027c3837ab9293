use indexmap::IndexMap;

use super::similarity::Similarity;
use crate::workflow::JobDefinition;

/// A recorded job paired with the job definition it most resembles.
#[derive(Debug, Clone, Copy)]
pub struct MatchedJob<'a> {
    /// Identifier of the matched job in the workflow file
    pub job_id: &'a str,
    pub definition: &'a JobDefinition,
    /// Similarity between the recorded name and the definition's display name
    pub score: f64,
}

/// Finds the job definition whose display name best matches a recorded job name.
///
/// Recorded names have every `${{ }}` expression resolved while declared names
/// do not, so exact matches are the exception. The highest score wins; on a tie
/// the definition listed first in the workflow file is kept. There is no
/// minimum score: callers get a match whenever at least one definition exists.
pub fn match_job<'a, S>(
    execution_name: &str,
    definitions: &'a IndexMap<String, JobDefinition>,
    similarity: &S,
) -> Option<MatchedJob<'a>>
where
    S: Similarity + ?Sized,
{
    let mut best: Option<MatchedJob<'a>> = None;

    for (job_id, definition) in definitions {
        let score = similarity.score(definition.display_name(job_id), execution_name);
        if best.map_or(true, |current| score > current.score) {
            best = Some(MatchedJob {
                job_id,
                definition,
                score,
            });
        }
    }

    best
}
