// Ranker module: pick, order, and normalize candidates from a score sheet.
//
//   1. pool      = candidates with score > 0, stable-sorted by score desc (catalog order on ties)
//   2. primary   = pool top, then per symptom (priority order) the best unselected match
//   3. backfill  = if primary < min_results: remaining pool by effectiveness desc, up to max_results
//   4. order     = selection by score desc, truncated to max_results
//   5. match %   = round(score / top × 100), so the first entry is always 100

use crate::catalog::Catalog;
use crate::config::ScoringConfig;
use crate::knowledge::SymptomDef;
use crate::scorer::ScoreSheet;
use crate::types::ScoredCandidate;
use std::cmp::Ordering;

/// A selected candidate with its normalized match percentage.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked {
    pub candidate: ScoredCandidate,
    pub match_percentage: u8,
}

fn by_score_desc(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.score
        .partial_cmp(&a.score)
        .unwrap_or(Ordering::Equal)
        .then(a.position.cmp(&b.position))
}

/// Select and order recommendations. Returns an empty list when nothing scored above zero.
pub fn rank(
    sheet: &ScoreSheet,
    catalog: &Catalog,
    priorities: &[&SymptomDef],
    config: &ScoringConfig,
) -> Vec<Ranked> {
    let mut pool = sheet.positive();
    if pool.is_empty() {
        return vec![];
    }
    pool.sort_by(|a, b| by_score_desc(a, b));

    let mut selected: Vec<&ScoredCandidate> = vec![pool[0]];
    let is_selected =
        |selected: &[&ScoredCandidate], id: &str| selected.iter().any(|s| s.id == id);

    for symptom in priorities {
        let pick = pool.iter().find(|c| {
            c.matched_symptoms.iter().any(|m| m == symptom.id) && !is_selected(&selected, &c.id)
        });
        if let Some(c) = pick.copied() {
            selected.push(c);
        }
    }

    if selected.len() < config.min_results {
        let effectiveness = |c: &ScoredCandidate| {
            catalog.get(&c.id).map(|r| r.effectiveness).unwrap_or(0.0)
        };
        let mut remaining: Vec<&ScoredCandidate> = pool
            .iter()
            .copied()
            .filter(|c| !is_selected(&selected, &c.id))
            .collect();
        remaining.sort_by(|a, b| {
            effectiveness(b)
                .partial_cmp(&effectiveness(a))
                .unwrap_or(Ordering::Equal)
                .then_with(|| by_score_desc(a, b))
        });
        for c in remaining {
            if selected.len() >= config.max_results {
                break;
            }
            selected.push(c);
        }
    }

    selected.sort_by(|a, b| by_score_desc(a, b));
    selected.truncate(config.max_results);

    let top = selected[0].score;
    selected
        .into_iter()
        .map(|c| Ranked {
            candidate: c.clone(),
            match_percentage: percentage(c.score, top),
        })
        .collect()
}

fn percentage(score: f64, top: f64) -> u8 {
    if top <= 0.0 {
        return 0;
    }
    (score / top * 100.0).round().clamp(0.0, 100.0) as u8
}
