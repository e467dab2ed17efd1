//! Explanation text for recommendations. Plain template substitution.

use crate::catalog::Catalog;
use crate::knowledge;
use crate::ranker::Ranked;
use crate::types::{DietaryRestrictions, ScoredCandidate};
use crate::util::join_natural;

const NO_MATCH_SUMMARY: &str = "We couldn't find a confident match for your answers yet. \
Try adding the symptoms or goals that matter most to you.";

fn symptom_labels(candidate: &ScoredCandidate) -> Vec<&'static str> {
    candidate
        .matched_symptoms
        .iter()
        .filter_map(|id| knowledge::find_symptom(id))
        .map(|s| s.label)
        .collect()
}

fn goal_labels(candidate: &ScoredCandidate) -> Vec<&'static str> {
    candidate.matched_goals.iter().map(|g| g.label()).collect()
}

/// One or two sentences on why this candidate was picked.
pub fn reason_for(candidate: &ScoredCandidate, restrictions: &DietaryRestrictions) -> String {
    let symptoms = symptom_labels(candidate);
    let goals = goal_labels(candidate);

    let mut text = match (symptoms.is_empty(), goals.is_empty()) {
        (false, false) => format!(
            "Targets your {}, and supports your goal of {}.",
            join_natural(&symptoms),
            join_natural(&goals)
        ),
        (false, true) => format!("Targets your {}.", join_natural(&symptoms)),
        (true, false) => format!("Supports your goal of {}.", join_natural(&goals)),
        (true, true) => "A well-rounded fit for your profile.".to_string(),
    };

    let diets = restrictions.labels();
    if !diets.is_empty() {
        text.push_str(&format!(" Suitable for a {} diet.", diets.join(", ")));
    }
    text
}

/// Summary paragraph shown above the list.
pub fn summarize(ranked: &[Ranked], catalog: &Catalog) -> String {
    let Some(top) = ranked.first() else {
        return NO_MATCH_SUMMARY.to_string();
    };
    let Some(record) = catalog.get(&top.candidate.id) else {
        return NO_MATCH_SUMMARY.to_string();
    };

    let symptoms = symptom_labels(&top.candidate);
    let goals = goal_labels(&top.candidate);
    let driver = if !symptoms.is_empty() {
        format!(", driven mainly by your reported {}", join_natural(&symptoms))
    } else if !goals.is_empty() {
        format!(", based on your goal of {}", join_natural(&goals))
    } else {
        String::new()
    };

    let mut text = format!(
        "{} is your strongest match at {}% confidence{}. Most people notice a difference within {} to {} weeks of consistent use.",
        record.name, top.match_percentage, driver, record.onset_min_weeks, record.onset_max_weeks
    );

    match ranked.len() - 1 {
        0 => {}
        1 => text.push_str(" We also found 1 other option that fits your profile."),
        n => text.push_str(&format!(" We also found {} other options that fit your profile.", n)),
    }
    text
}
