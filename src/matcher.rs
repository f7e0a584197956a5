/**
Exact comparison of two lists of entities.
*/
use crate::entity::{Entities, Entity};
use serde::Serialize;

/// Partition of a reference list of entities against a list of candidates.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MatchOutcome {
    /// Reference entities that have a matching candidate. When the candidate carries a genuine
    /// probability it is kept instead of the reference entity.
    pub found: Entities,
    /// Reference entities without any matching candidate.
    pub not_found: Entities,
}

/// Matches every entity of `reference` against `candidates`.
///
/// For each reference entity, the candidates are scanned in order and the first one with the same
/// token, type, left offset and right offset is accepted. Candidates are never consumed: a single
/// candidate can match several reference entities. Therefore
/// `found.len() + not_found.len() == reference.len()` always holds.
pub fn match_entities(reference: &[Entity], candidates: &[Entity]) -> MatchOutcome {
    let mut outcome = MatchOutcome::default();
    for entity in reference {
        match candidates.iter().find(|candidate| entity.matches(candidate)) {
            Some(candidate) if candidate.confidence() >= 0.0 => {
                outcome.found.push(candidate.clone())
            }
            Some(_) => outcome.found.push(entity.clone()),
            None => outcome.not_found.push(entity.clone()),
        }
    }
    outcome
}
