// Similarity module: nudge rule-based scores with feedback from similar past sessions.
//
//   similarity(a, b) = 1 - Σ wᵢ|aᵢ - bᵢ| / Σ wᵢ     over features present in both profiles
//   survivors        = history entries with similarity >= threshold
//   avg_rating(id)   = mean feedback rating for id across survivors
//   factor(id)       = clamp((avg_rating - 3) / 2, -1, 1) × max_adjustment
//   score(id)       *= 1 + factor(id)
//
// With fewer than `min_history` entries the sheet is left untouched.

use crate::config::SimilarityConfig;
use crate::scorer::ScoreSheet;
use crate::types::LearningEntry;
use std::collections::BTreeMap;

/// Feature importance used by the distance.
static FEATURE_IMPORTANCE: &[(&str, f64)] = &[
    ("stress", 0.20),
    ("sleep_quality", 0.15),
    ("energy", 0.15),
    ("focus", 0.10),
    ("digestion", 0.10),
    ("age", 0.10),
    ("activity", 0.10),
    ("produce", 0.05),
    ("goal_weight_loss", 0.02),
    ("goal_more_energy", 0.02),
    ("goal_better_focus", 0.02),
    ("goal_better_digestion", 0.02),
    ("goal_less_stress", 0.02),
];

const NEUTRAL_RATING: f64 = 3.0;
const RATING_HALF_RANGE: f64 = 2.0;

/// Outcome of one adjustment attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct Adjustment {
    /// At least one score changed
    pub applied: bool,
    /// History entries that passed the threshold
    pub similar_entries: usize,
}

/// Weighted similarity of two feature profiles, in [0,1].
/// Profiles with no shared weighted feature are not similar at all.
pub fn similarity(a: &BTreeMap<String, f64>, b: &BTreeMap<String, f64>) -> f64 {
    let mut distance = 0.0;
    let mut total_weight = 0.0;
    for (name, weight) in FEATURE_IMPORTANCE {
        if let (Some(x), Some(y)) = (a.get(*name), b.get(*name)) {
            distance += weight * (x - y).abs().min(1.0);
            total_weight += weight;
        }
    }
    if total_weight == 0.0 {
        0.0
    } else {
        (1.0 - distance / total_weight).clamp(0.0, 1.0)
    }
}

/// Mean rating per recommendation id across entries similar to `profile`.
pub fn similar_ratings(
    profile: &BTreeMap<String, f64>,
    history: &[LearningEntry],
    threshold: f64,
) -> (usize, BTreeMap<String, f64>) {
    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    let mut survivors = 0;

    for entry in history {
        if similarity(profile, &entry.profile) < threshold {
            continue;
        }
        survivors += 1;
        for (id, rating) in &entry.feedback {
            let slot = sums.entry(id.clone()).or_insert((0.0, 0));
            slot.0 += *rating as f64;
            slot.1 += 1;
        }
    }

    let means = sums
        .into_iter()
        .map(|(id, (sum, n))| (id, sum / n as f64))
        .collect();
    (survivors, means)
}

/// Apply history-based nudges to a score sheet in place.
pub fn adjust(
    sheet: &mut ScoreSheet,
    profile: &BTreeMap<String, f64>,
    history: &[LearningEntry],
    config: &SimilarityConfig,
) -> Adjustment {
    if history.len() < config.min_history {
        tracing::debug!(
            entries = history.len(),
            required = config.min_history,
            "not enough history, keeping rule-based scores"
        );
        return Adjustment { applied: false, similar_entries: 0 };
    }

    let (survivors, ratings) = similar_ratings(profile, history, config.threshold);
    let mut applied = false;

    for candidate in sheet.candidates_mut() {
        if candidate.score <= 0.0 {
            continue;
        }
        let Some(avg) = ratings.get(&candidate.id) else {
            continue;
        };
        let factor =
            ((avg - NEUTRAL_RATING) / RATING_HALF_RANGE).clamp(-1.0, 1.0) * config.max_adjustment;
        if factor != 0.0 {
            candidate.score *= 1.0 + factor;
            applied = true;
        }
    }

    tracing::debug!(survivors, applied, "similarity adjustment");
    Adjustment { applied, similar_entries: survivors }
}
