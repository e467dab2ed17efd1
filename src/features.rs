// Feature extraction: quiz answers -> normalized feature vector.
//
// All numeric features are in [0,1]. Concern features are oriented so that
// higher means "more of the thing the name says":
//   stress        = stress concern
//   sleep_quality = 1 - sleep concern
//   energy        = 1 - energy concern
//   focus         = 1 - focus concern
//   digestion     = 1 - digestion concern
// Missing input never fails; medium/moderate defaults land on 0.5.

use crate::knowledge::{self, SymptomDef};
use crate::types::{ActivityLevel, BehavioralMetrics, Concern, NeuroProfile, QuizAnswers};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const AGE_SCALE: f64 = 100.0;
const NEUTRAL: f64 = 0.5;
const LINGER_BOOST: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgeGroup {
    Unknown,
    Under30,
    From30To49,
    From50To64,
    Over65,
}

impl AgeGroup {
    pub fn from_age(age: Option<u8>) -> Self {
        match age {
            None => AgeGroup::Unknown,
            Some(a) if a < 30 => AgeGroup::Under30,
            Some(a) if a < 50 => AgeGroup::From30To49,
            Some(a) if a < 65 => AgeGroup::From50To64,
            Some(_) => AgeGroup::Over65,
        }
    }
}

/// Normalized view of one quiz submission.
#[derive(Debug, Clone, PartialEq)]
pub struct Features {
    pub age: f64,
    pub age_group: AgeGroup,
    pub stress: f64,
    pub sleep_quality: f64,
    pub energy: f64,
    pub focus: f64,
    pub digestion: f64,
    pub activity: f64,
    pub activity_level: ActivityLevel,
    pub produce: f64,
    /// goal feature key -> 0 or 1
    pub goals: BTreeMap<&'static str, f64>,
}

impl Features {
    /// Flat feature-name -> value map, as stored in learning history.
    pub fn as_map(&self) -> BTreeMap<String, f64> {
        let mut map = BTreeMap::new();
        map.insert("age".to_string(), self.age);
        map.insert("stress".to_string(), self.stress);
        map.insert("sleep_quality".to_string(), self.sleep_quality);
        map.insert("energy".to_string(), self.energy);
        map.insert("focus".to_string(), self.focus);
        map.insert("digestion".to_string(), self.digestion);
        map.insert("activity".to_string(), self.activity);
        map.insert("produce".to_string(), self.produce);
        for (k, v) in &self.goals {
            map.insert(k.to_string(), *v);
        }
        map
    }

    /// Concern intensity in [0,1], regardless of feature orientation.
    pub fn concern_intensity(&self, concern: Concern) -> f64 {
        match concern {
            Concern::Stress => self.stress,
            Concern::Sleep => 1.0 - self.sleep_quality,
            Concern::Energy => 1.0 - self.energy,
            Concern::Focus => 1.0 - self.focus,
            Concern::Digestion => 1.0 - self.digestion,
        }
    }
}

/// Extract features from quiz answers. Total over partial input.
pub fn extract(answers: &QuizAnswers) -> Features {
    let c = &answers.concerns;
    let goals = crate::types::Goal::ALL
        .into_iter()
        .map(|g| (g.feature_key(), if answers.goals.contains(g) { 1.0 } else { 0.0 }))
        .collect();

    Features {
        age: answers
            .age
            .map(|a| (a as f64 / AGE_SCALE).clamp(0.0, 1.0))
            .unwrap_or(NEUTRAL),
        age_group: AgeGroup::from_age(answers.age),
        stress: c.stress.value(),
        sleep_quality: 1.0 - c.sleep.value(),
        energy: 1.0 - c.energy.value(),
        focus: 1.0 - c.focus.value(),
        digestion: 1.0 - c.digestion.value(),
        activity: answers.activity.value(),
        activity_level: answers.activity,
        produce: answers.produce_intake.value(),
        goals,
    }
}

/// Symptom implied by an elevated concern rating.
fn implied_symptom(concern: Concern) -> &'static str {
    match concern {
        Concern::Stress => "stress",
        Concern::Sleep => "sleep",
        Concern::Energy => "fatigue",
        Concern::Focus => "focus",
        Concern::Digestion => "digestion",
    }
}

/// Symptoms the user reported: resolved tags first, then symptoms implied by
/// high concern ratings. Deduplicated, first occurrence wins.
pub fn selected_symptoms(answers: &QuizAnswers) -> Vec<&'static SymptomDef> {
    let mut out: Vec<&'static SymptomDef> = Vec::new();
    let mut push = |s: &'static SymptomDef| {
        if !out.iter().any(|o| o.id == s.id) {
            out.push(s);
        }
    };

    for tag in answers.normalized_tags() {
        if knowledge::dietary_keyword(&tag).is_some() {
            continue;
        }
        match knowledge::normalize_symptom(&tag) {
            Some(s) => push(s),
            None => tracing::debug!(tag = %tag, "tag does not name a known symptom"),
        }
    }

    for concern in Concern::ALL {
        if answers.concerns.get(concern).is_elevated() {
            if let Some(s) = knowledge::find_symptom(implied_symptom(concern)) {
                push(s);
            }
        }
    }

    out
}

impl NeuroProfile {
    /// Derive concern intensities from features, boosted where the user lingered.
    pub fn derive(features: &Features, metrics: &BehavioralMetrics) -> Self {
        let level = |concern: Concern| {
            let base = features.concern_intensity(concern);
            let boost = if metrics.lingered_on(concern.question_id()) {
                LINGER_BOOST
            } else {
                0.0
            };
            (base + boost).clamp(0.0, 1.0)
        };
        NeuroProfile {
            stress: level(Concern::Stress),
            sleep: level(Concern::Sleep),
            energy: level(Concern::Energy),
            focus: level(Concern::Focus),
            digestion: level(Concern::Digestion),
        }
    }
}

/// Symptoms ordered by priority: weight times concern intensity, descending.
/// Symptoms without a concern question use the neutral intensity. Stable on ties.
pub fn prioritize<'a>(symptoms: &[&'a SymptomDef], profile: &NeuroProfile) -> Vec<&'a SymptomDef> {
    let priority = |s: &SymptomDef| {
        let intensity = s.concern.map(|c| profile.intensity(c)).unwrap_or(NEUTRAL);
        s.weight * intensity
    };
    let mut ordered = symptoms.to_vec();
    ordered.sort_by(|a, b| {
        priority(b)
            .partial_cmp(&priority(a))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ordered
}
