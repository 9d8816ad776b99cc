use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A participant's score for one step, with the observation ids that earned it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calculation {
    pub score: u32,
    /// Upstream observation ids backing the score. `None` when the strategy
    /// scored the participant without a qualifying observation.
    pub observations: Option<Vec<u64>>,
}

impl Calculation {
    pub fn new(score: u32, observations: Vec<u64>) -> Self {
        Calculation {
            score,
            observations: Some(observations),
        }
    }

    /// A zero score with no backing observations.
    pub fn zero() -> Self {
        Calculation {
            score: 0,
            observations: None,
        }
    }
}

/// Scores for every rostered participant in one step. Participants who earned
/// nothing still appear with a zero entry, so the roster is always complete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub step_id: Uuid,
    pub scores: BTreeMap<String, Calculation>,
}

impl StepResult {
    pub fn new(step_id: Uuid) -> Self {
        StepResult {
            step_id,
            scores: BTreeMap::new(),
        }
    }

    pub fn score_for(&self, participant: &str) -> Option<&Calculation> {
        self.scores.get(participant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_calculation_has_no_observations() {
        let calculation = Calculation::zero();

        assert_eq!(calculation.score, 0);
        assert!(calculation.observations.is_none());
    }

    #[test]
    fn scores_are_looked_up_by_handle() {
        let mut result = StepResult::new(Uuid::new_v4());
        result
            .scores
            .insert("ranger_rick".to_string(), Calculation::new(3, vec![101]));

        assert_eq!(result.score_for("ranger_rick").map(|c| c.score), Some(3));
        assert!(result.score_for("someone_else").is_none());
    }
}
