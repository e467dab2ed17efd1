// Scorer module: accumulate a score per catalog entry from one quiz submission.
//
// Scoring formula per candidate:
//   symptom part   = Σ symptom.weight × effectiveness/100 × symptom_weight   (matched symptoms)
//   goal part      = Σ goal.weight    × effectiveness/100 × goal_weight      (matched goals)
//   lifestyle part = Σ factor.delta   × lifestyle_weight                     (only if symptom+goal > 0)
//   score          = max(0, symptom + goal + lifestyle)
//   dietary clash  → score = 0, unconditionally
//
// Lifestyle factors adjust candidates that already matched; on their own they never
// produce a recommendation.

use crate::catalog::Catalog;
use crate::config::ScoringConfig;
use crate::features::{self, Features};
use crate::knowledge::{self, LIFESTYLE_FACTORS};
use crate::types::{QuizAnswers, ScoredCandidate};
use std::collections::BTreeMap;

/// Scores for every catalog entry from one pass, in catalog order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSheet {
    candidates: Vec<ScoredCandidate>,
}

impl ScoreSheet {
    pub fn candidates(&self) -> &[ScoredCandidate] {
        &self.candidates
    }

    pub fn candidates_mut(&mut self) -> &mut [ScoredCandidate] {
        &mut self.candidates
    }

    pub fn get(&self, id: &str) -> Option<&ScoredCandidate> {
        self.candidates.iter().find(|c| c.id == id)
    }

    /// Candidates eligible for ranking (score > 0), catalog order.
    pub fn positive(&self) -> Vec<&ScoredCandidate> {
        self.candidates.iter().filter(|c| c.score > 0.0).collect()
    }

    /// id -> score for every positive candidate.
    pub fn scores(&self) -> BTreeMap<String, f64> {
        self.positive()
            .into_iter()
            .map(|c| (c.id.clone(), c.score))
            .collect()
    }
}

/// Score the whole catalog against one submission.
pub fn score(
    catalog: &Catalog,
    features: &Features,
    answers: &QuizAnswers,
    config: &ScoringConfig,
) -> ScoreSheet {
    let symptoms = features::selected_symptoms(answers);
    let goals = answers.goals.selected();
    let restrictions = answers.restrictions();

    let active_factors: Vec<_> = LIFESTYLE_FACTORS
        .iter()
        .filter(|f| {
            knowledge::condition_holds(
                f.condition,
                features.activity_level,
                features.sleep_quality,
                features.stress,
                answers.produce_intake,
            )
        })
        .collect();

    let mut candidates = Vec::with_capacity(catalog.len());
    for (position, record) in catalog.records().iter().enumerate() {
        let efficacy = record.effectiveness / 100.0;
        let mut score = 0.0;
        let mut matched_symptoms = Vec::new();
        let mut matched_goals = Vec::new();

        for symptom in &symptoms {
            if record.targets(symptom.id) {
                score += symptom.weight * efficacy * config.symptom_weight;
                matched_symptoms.push(symptom.id.to_string());
            }
        }

        for goal in &goals {
            let Some(def) = knowledge::goal_def(*goal) else {
                continue;
            };
            if def.supplements.contains(&record.id.as_str()) {
                score += def.weight * efficacy * config.goal_weight;
                matched_goals.push(*goal);
            }
        }

        if score > 0.0 {
            for factor in active_factors.iter().filter(|f| f.supplement == record.id) {
                score += factor.delta * config.lifestyle_weight;
            }
            score = score.max(0.0);
        }

        let excluded = restrictions.conflicts_with(&record.dietary);
        if excluded {
            score = 0.0;
        }

        candidates.push(ScoredCandidate {
            id: record.id.clone(),
            score,
            matched_symptoms,
            matched_goals,
            position,
            excluded,
        });
    }

    ScoreSheet { candidates }
}
