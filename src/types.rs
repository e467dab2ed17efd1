use crate::error::AdvisorError;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

// ── Lenient field parsing ──
//
// Quiz payloads come straight from a web form. A bad value in one field falls
// back to that field's default and never rejects the rest of the submission.

const MAX_AGE: f64 = 120.0;

/// Engagement for sessions that were not tracked.
pub const NEUTRAL_ENGAGEMENT: u8 = 50;

fn parse_lenient<T: DeserializeOwned + Default>(json: &str, what: &str) -> Result<T, AdvisorError> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| AdvisorError::Parse(format!("{}: {}", what, e)))?;
    if !value.is_object() {
        tracing::warn!(what, "expected a JSON object, using defaults");
        return Ok(T::default());
    }
    serde_json::from_value(value).map_err(|e| AdvisorError::Parse(format!("{}: {}", what, e)))
}

fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value.clone()).unwrap_or_else(|e| {
        tracing::warn!(value = %value, error = %e, "malformed field, using default");
        T::default()
    }))
}

/// Number or numeric string, clamped to [0, 120]; anything else is unknown.
fn lenient_age<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u8>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let age = match &value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match age {
        Some(a) if a.is_finite() && a >= 0.0 => Ok(Some(a.min(MAX_AGE).round() as u8)),
        _ => {
            if !value.is_null() {
                tracing::warn!(value = %value, "unusable age, treating as unknown");
            }
            Ok(None)
        }
    }
}

/// A list of strings or a single string; non-string items are dropped.
fn lenient_tags<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => vec![s],
        Value::Array(items) => items
            .into_iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}

/// 0-100, larger numbers capped; anything else is neutral.
fn lenient_engagement<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value.as_f64() {
        Some(n) if n.is_finite() => n.clamp(0.0, 100.0).round() as u8,
        _ => NEUTRAL_ENGAGEMENT,
    })
}

// ── Quiz input ──

/// Raw quiz answers as submitted by one session.
/// Every field is optional on the wire; defaults are applied here, once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizAnswers {
    #[serde(deserialize_with = "lenient_age")]
    pub age: Option<u8>,
    #[serde(deserialize_with = "lenient")]
    pub gender: Gender,
    /// Self-rated severity of each health concern
    #[serde(deserialize_with = "lenient")]
    pub concerns: ConcernRatings,
    #[serde(deserialize_with = "lenient")]
    pub goals: Goals,
    /// Free-text symptom and dietary tags (e.g. "insomnia", "vegan")
    #[serde(deserialize_with = "lenient_tags")]
    pub tags: Vec<String>,
    /// Explicit dietary restriction checkboxes
    #[serde(deserialize_with = "lenient")]
    pub dietary: DietaryRestrictions,
    #[serde(deserialize_with = "lenient")]
    pub activity: ActivityLevel,
    #[serde(deserialize_with = "lenient")]
    pub produce_intake: ProduceIntake,
}

impl QuizAnswers {
    /// Parse quiz answers from JSON. Unknown fields are ignored; missing or
    /// malformed ones fall back to their defaults. Only non-JSON input is an error.
    pub fn from_json(json: &str) -> Result<Self, AdvisorError> {
        parse_lenient(json, "quiz answers")
    }

    /// Tags trimmed, lowercased, empty ones dropped.
    pub fn normalized_tags(&self) -> Vec<String> {
        self.tags
            .iter()
            .map(|t| t.trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect()
    }

    /// Effective dietary restrictions: checkboxes merged with dietary words found in tags.
    pub fn restrictions(&self) -> DietaryRestrictions {
        let mut r = self.dietary.clone();
        for tag in self.normalized_tags() {
            if let Some(kind) = crate::knowledge::dietary_keyword(&tag) {
                r.set(kind);
            }
        }
        if r.vegan {
            r.vegetarian = true;
            r.dairy_free = true;
        }
        r
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Female,
    Male,
    Other,
    #[default]
    #[serde(alias = "prefer-not-to-say")]
    Unspecified,
}

/// Five-step severity scale used by the concern questions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Severity {
    #[serde(alias = "none")]
    VeryLow,
    Low,
    #[default]
    #[serde(alias = "moderate")]
    Medium,
    High,
    #[serde(alias = "severe")]
    VeryHigh,
}

impl Severity {
    /// Position on the scale mapped to [0,1]; medium is 0.5.
    pub fn value(self) -> f64 {
        match self {
            Severity::VeryLow => 0.0,
            Severity::Low => 0.25,
            Severity::Medium => 0.5,
            Severity::High => 0.75,
            Severity::VeryHigh => 1.0,
        }
    }

    /// High or very-high concerns count as a reported symptom.
    pub fn is_elevated(self) -> bool {
        self >= Severity::High
    }
}

/// The five concern areas the quiz asks about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Concern {
    Stress,
    Sleep,
    Energy,
    Focus,
    Digestion,
}

impl Concern {
    pub const ALL: [Concern; 5] = [
        Concern::Stress,
        Concern::Sleep,
        Concern::Energy,
        Concern::Focus,
        Concern::Digestion,
    ];

    /// Question id used by the behavior tracker for this concern.
    pub fn question_id(self) -> &'static str {
        match self {
            Concern::Stress => "stress",
            Concern::Sleep => "sleep",
            Concern::Energy => "energy",
            Concern::Focus => "focus",
            Concern::Digestion => "digestion",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConcernRatings {
    #[serde(deserialize_with = "lenient")]
    pub stress: Severity,
    #[serde(deserialize_with = "lenient")]
    pub sleep: Severity,
    #[serde(deserialize_with = "lenient")]
    pub energy: Severity,
    #[serde(deserialize_with = "lenient")]
    pub focus: Severity,
    #[serde(deserialize_with = "lenient")]
    pub digestion: Severity,
}

impl ConcernRatings {
    pub fn get(&self, concern: Concern) -> Severity {
        match concern {
            Concern::Stress => self.stress,
            Concern::Sleep => self.sleep,
            Concern::Energy => self.energy,
            Concern::Focus => self.focus,
            Concern::Digestion => self.digestion,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Goal {
    WeightLoss,
    MoreEnergy,
    BetterFocus,
    BetterDigestion,
    LessStress,
}

impl Goal {
    pub const ALL: [Goal; 5] = [
        Goal::WeightLoss,
        Goal::MoreEnergy,
        Goal::BetterFocus,
        Goal::BetterDigestion,
        Goal::LessStress,
    ];

    /// Human-readable phrase used in explanations.
    pub fn label(self) -> &'static str {
        match self {
            Goal::WeightLoss => "weight management",
            Goal::MoreEnergy => "more energy",
            Goal::BetterFocus => "better focus",
            Goal::BetterDigestion => "better digestion",
            Goal::LessStress => "less stress",
        }
    }

    /// Feature-map key for this goal.
    pub fn feature_key(self) -> &'static str {
        match self {
            Goal::WeightLoss => "goal_weight_loss",
            Goal::MoreEnergy => "goal_more_energy",
            Goal::BetterFocus => "goal_better_focus",
            Goal::BetterDigestion => "goal_better_digestion",
            Goal::LessStress => "goal_less_stress",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Goals {
    #[serde(deserialize_with = "lenient")]
    pub weight_loss: bool,
    #[serde(deserialize_with = "lenient")]
    pub more_energy: bool,
    #[serde(deserialize_with = "lenient")]
    pub better_focus: bool,
    #[serde(deserialize_with = "lenient")]
    pub better_digestion: bool,
    #[serde(deserialize_with = "lenient")]
    pub less_stress: bool,
}

impl Goals {
    pub fn contains(&self, goal: Goal) -> bool {
        match goal {
            Goal::WeightLoss => self.weight_loss,
            Goal::MoreEnergy => self.more_energy,
            Goal::BetterFocus => self.better_focus,
            Goal::BetterDigestion => self.better_digestion,
            Goal::LessStress => self.less_stress,
        }
    }

    /// Selected goals in fixed declaration order.
    pub fn selected(&self) -> Vec<Goal> {
        Goal::ALL.into_iter().filter(|g| self.contains(*g)).collect()
    }
}

/// Dietary restriction kinds recognised in checkboxes and tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DietKind {
    Vegan,
    Vegetarian,
    GlutenFree,
    DairyFree,
}

/// What the user cannot take.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DietaryRestrictions {
    #[serde(deserialize_with = "lenient")]
    pub vegan: bool,
    #[serde(deserialize_with = "lenient")]
    pub vegetarian: bool,
    #[serde(deserialize_with = "lenient")]
    pub gluten_free: bool,
    #[serde(deserialize_with = "lenient")]
    pub dairy_free: bool,
}

impl DietaryRestrictions {
    pub fn set(&mut self, kind: DietKind) {
        match kind {
            DietKind::Vegan => self.vegan = true,
            DietKind::Vegetarian => self.vegetarian = true,
            DietKind::GlutenFree => self.gluten_free = true,
            DietKind::DairyFree => self.dairy_free = true,
        }
    }

    pub fn any(&self) -> bool {
        self.vegan || self.vegetarian || self.gluten_free || self.dairy_free
    }

    /// True if a product with these compatibility flags must never be recommended.
    pub fn conflicts_with(&self, compat: &DietaryCompat) -> bool {
        (self.vegan && !compat.vegan)
            || (self.vegetarian && !compat.vegetarian)
            || (self.gluten_free && !compat.gluten_free)
            || (self.dairy_free && !compat.dairy_free)
    }

    pub fn labels(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.vegan {
            out.push("vegan");
        } else if self.vegetarian {
            out.push("vegetarian");
        }
        if self.gluten_free {
            out.push("gluten-free");
        }
        if self.dairy_free && !self.vegan {
            out.push("dairy-free");
        }
        out
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityLevel {
    Sedentary,
    Light,
    #[default]
    Moderate,
    Active,
    VeryActive,
}

impl ActivityLevel {
    pub fn value(self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 0.0,
            ActivityLevel::Light => 0.25,
            ActivityLevel::Moderate => 0.5,
            ActivityLevel::Active => 0.75,
            ActivityLevel::VeryActive => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProduceIntake {
    Low,
    #[default]
    Medium,
    High,
}

impl ProduceIntake {
    pub fn value(self) -> f64 {
        match self {
            ProduceIntake::Low => 0.0,
            ProduceIntake::Medium => 0.5,
            ProduceIntake::High => 1.0,
        }
    }
}

// ── Behavioral signals ──

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadingSpeed {
    Fast,
    #[default]
    Normal,
    Slow,
}

/// Frozen behavioral signals of one quiz session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehavioralMetrics {
    #[serde(deserialize_with = "lenient")]
    pub session_duration_secs: u64,
    /// Number of answer changes
    #[serde(deserialize_with = "lenient")]
    pub hesitations: u32,
    #[serde(deserialize_with = "lenient")]
    pub lingered_questions: BTreeSet<String>,
    #[serde(deserialize_with = "lenient")]
    pub reading_speed: ReadingSpeed,
    /// 0-100
    #[serde(deserialize_with = "lenient_engagement")]
    pub engagement_score: u8,
}

impl Default for BehavioralMetrics {
    /// Neutral metrics for callers that did not track the session.
    fn default() -> Self {
        Self {
            session_duration_secs: 0,
            hesitations: 0,
            lingered_questions: BTreeSet::new(),
            reading_speed: ReadingSpeed::Normal,
            engagement_score: NEUTRAL_ENGAGEMENT,
        }
    }
}

impl BehavioralMetrics {
    /// Same leniency as quiz answers: bad fields fall back to neutral values.
    pub fn from_json(json: &str) -> Result<Self, AdvisorError> {
        parse_lenient(json, "behavioral metrics")
    }

    pub fn lingered_on(&self, question: &str) -> bool {
        self.lingered_questions.contains(question)
    }
}

/// Per-concern intensity in [0,1], used to prioritise symptoms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeuroProfile {
    pub stress: f64,
    pub sleep: f64,
    pub energy: f64,
    pub focus: f64,
    pub digestion: f64,
}

impl NeuroProfile {
    pub fn intensity(&self, concern: Concern) -> f64 {
        match concern {
            Concern::Stress => self.stress,
            Concern::Sleep => self.sleep,
            Concern::Energy => self.energy,
            Concern::Focus => self.focus,
            Concern::Digestion => self.digestion,
        }
    }
}

// ── Catalog ──

/// Dietary compatibility of a catalog product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DietaryCompat {
    pub vegan: bool,
    pub vegetarian: bool,
    pub gluten_free: bool,
    pub dairy_free: bool,
}

/// One supplement in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplementRecord {
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    pub description: String,
    pub benefits: Vec<String>,
    /// Symptom ids this supplement addresses
    pub target_symptoms: Vec<String>,
    pub dosage: String,
    /// 0-100; fixed per product, nudged only by feedback
    pub effectiveness: f64,
    /// Typical time-to-effect window
    pub onset_min_weeks: u8,
    pub onset_max_weeks: u8,
    pub dietary: DietaryCompat,
}

impl SupplementRecord {
    pub fn targets(&self, symptom: &str) -> bool {
        self.target_symptoms.iter().any(|s| s == symptom)
    }
}

// ── Scoring output ──

/// A catalog entry with its accumulated score for one scoring pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    pub id: String,
    pub score: f64,
    pub matched_symptoms: Vec<String>,
    pub matched_goals: Vec<Goal>,
    /// Catalog position; breaks score ties
    pub position: usize,
    /// Hard dietary exclusion applied
    pub excluded: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceLevel {
    High,
    Medium,
    Low,
}

impl ConfidenceLevel {
    pub fn from_percentage(pct: u8) -> Self {
        if pct >= 80 {
            ConfidenceLevel::High
        } else if pct >= 60 {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        }
    }

    /// One level lower, bottoming out at low.
    pub fn downgrade(self) -> Self {
        match self {
            ConfidenceLevel::High => ConfidenceLevel::Medium,
            _ => ConfidenceLevel::Low,
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfidenceLevel::High => write!(f, "high"),
            ConfidenceLevel::Medium => write!(f, "medium"),
            ConfidenceLevel::Low => write!(f, "low"),
        }
    }
}

/// A recommendation selected for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub title: String,
    pub description: String,
    /// 0-100; the top entry is always 100
    pub match_percentage: u8,
    pub confidence: ConfidenceLevel,
    pub dosage: String,
    pub benefits: Vec<String>,
    pub explanation: String,
}

/// Recommendations plus the summary paragraph shown above them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationReport {
    pub recommendations: Vec<Recommendation>,
    pub summary: String,
    /// Whether history-based similarity nudged any score
    pub history_adjusted: bool,
}

// ── Learning history ──

/// One past session: what the user looked like, what we showed, what they said.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LearningEntry {
    pub timestamp: DateTime<Utc>,
    /// Feature name -> value in [0,1]
    pub profile: BTreeMap<String, f64>,
    pub recommendations: Vec<String>,
    /// Supplement id -> rating 1-5
    #[serde(default)]
    pub feedback: BTreeMap<String, u8>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_defaults() {
        let answers = QuizAnswers::from_json("{}").unwrap();
        assert_eq!(answers, QuizAnswers::default());
        assert_eq!(answers.concerns.stress, Severity::Medium);
        assert_eq!(answers.activity, ActivityLevel::Moderate);
    }

    #[test]
    fn severity_aliases_parse() {
        let json = r#"{"concerns": {"stress": "severe", "sleep": "moderate", "focus": "none"}}"#;
        let answers = QuizAnswers::from_json(json).unwrap();
        assert_eq!(answers.concerns.stress, Severity::VeryHigh);
        assert_eq!(answers.concerns.sleep, Severity::Medium);
        assert_eq!(answers.concerns.focus, Severity::VeryLow);
    }

    #[test]
    fn non_json_is_parse_error() {
        let err = QuizAnswers::from_json("{not json").unwrap_err();
        assert!(matches!(err, AdvisorError::Parse(_)));
    }

    #[test]
    fn bad_field_keeps_the_rest() {
        let json = r#"{"tags":["stress"],"concerns":{"sleep":"terrible","stress":"high"},"activity":"athletic"}"#;
        let answers = QuizAnswers::from_json(json).unwrap();
        assert_eq!(answers.tags, vec!["stress".to_string()]);
        assert_eq!(answers.concerns.sleep, Severity::Medium);
        assert_eq!(answers.concerns.stress, Severity::High);
        assert_eq!(answers.activity, ActivityLevel::Moderate);
    }

    #[test]
    fn age_is_clamped_or_unknown() {
        let age = |json: &str| QuizAnswers::from_json(json).unwrap().age;
        assert_eq!(age(r#"{"age":300}"#), Some(120));
        assert_eq!(age(r#"{"age":"42"}"#), Some(42));
        assert_eq!(age(r#"{"age":-3}"#), None);
        assert_eq!(age(r#"{"age":"forty"}"#), None);
        assert_eq!(age(r#"{"age":null}"#), None);
    }

    #[test]
    fn single_tag_string_and_junk_items() {
        let answers = QuizAnswers::from_json(r#"{"tags":"insomnia"}"#).unwrap();
        assert_eq!(answers.tags, vec!["insomnia".to_string()]);
        let answers = QuizAnswers::from_json(r#"{"tags":["stress", 7, null]}"#).unwrap();
        assert_eq!(answers.tags, vec!["stress".to_string()]);
    }

    #[test]
    fn non_object_json_gives_defaults() {
        assert_eq!(QuizAnswers::from_json("[1,2]").unwrap(), QuizAnswers::default());
    }

    #[test]
    fn bad_metrics_fields_stay_neutral() {
        let m = BehavioralMetrics::from_json(
            r#"{"engagement_score":"high","reading_speed":"warp","hesitations":-1}"#,
        )
        .unwrap();
        assert_eq!(m, BehavioralMetrics::default());
        let m = BehavioralMetrics::from_json(r#"{"engagement_score":250}"#).unwrap();
        assert_eq!(m.engagement_score, 100);
    }

    #[test]
    fn vegan_implies_vegetarian_and_dairy_free() {
        let answers = QuizAnswers {
            dietary: DietaryRestrictions { vegan: true, ..Default::default() },
            ..Default::default()
        };
        let r = answers.restrictions();
        assert!(r.vegetarian);
        assert!(r.dairy_free);
        assert!(!r.gluten_free);
    }

    #[test]
    fn dietary_tags_set_restrictions() {
        let answers = QuizAnswers {
            tags: vec!["  Gluten-Free ".to_string(), "lactose intolerant".to_string()],
            ..Default::default()
        };
        let r = answers.restrictions();
        assert!(r.gluten_free);
        assert!(r.dairy_free);
        assert!(!r.vegan);
    }

    #[test]
    fn conflict_detection() {
        let compat = DietaryCompat { vegan: false, vegetarian: true, gluten_free: true, dairy_free: true };
        let vegan = DietaryRestrictions { vegan: true, ..Default::default() };
        let vegetarian = DietaryRestrictions { vegetarian: true, ..Default::default() };
        assert!(vegan.conflicts_with(&compat));
        assert!(!vegetarian.conflicts_with(&compat));
        assert!(!DietaryRestrictions::default().conflicts_with(&compat));
    }

    #[test]
    fn goals_selected_in_declaration_order() {
        let goals = Goals { less_stress: true, weight_loss: true, ..Default::default() };
        assert_eq!(goals.selected(), vec![Goal::WeightLoss, Goal::LessStress]);
    }

    #[test]
    fn confidence_levels() {
        assert_eq!(ConfidenceLevel::from_percentage(100), ConfidenceLevel::High);
        assert_eq!(ConfidenceLevel::from_percentage(65), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::from_percentage(10), ConfidenceLevel::Low);
        assert_eq!(ConfidenceLevel::High.downgrade(), ConfidenceLevel::Medium);
        assert_eq!(ConfidenceLevel::Low.downgrade(), ConfidenceLevel::Low);
    }

    #[test]
    fn default_metrics_are_neutral() {
        let m = BehavioralMetrics::from_json("{}").unwrap();
        assert_eq!(m.engagement_score, 50);
        assert_eq!(m.reading_speed, ReadingSpeed::Normal);
    }
}
