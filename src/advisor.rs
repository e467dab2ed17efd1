use crate::catalog::Catalog;
use crate::config::AdvisorConfig;
use crate::explain;
use crate::features::{self, Features};
use crate::ranker::{self, Ranked};
use crate::scorer;
use crate::similarity;
use crate::types::{
    BehavioralMetrics, ConfidenceLevel, LearningEntry, NeuroProfile, QuizAnswers, Recommendation,
    RecommendationReport,
};
use crate::util;
use chrono::{DateTime, Utc};

/// Below this engagement score the session counts as rushed.
const RUSHED_ENGAGEMENT: u8 = 30;

/// Version tag written into session caches; bump when scoring rules change.
pub const MODEL_VERSION: &str = "rules-1";

/// The recommendation engine: configuration plus a catalog.
#[derive(Debug, Clone)]
pub struct Advisor {
    config: AdvisorConfig,
    catalog: Catalog,
}

impl Advisor {
    pub fn new(config: AdvisorConfig) -> Self {
        Self::with_catalog(config, Catalog::builtin())
    }

    pub fn with_catalog(config: AdvisorConfig, catalog: Catalog) -> Self {
        Self { config, catalog }
    }

    pub fn config(&self) -> &AdvisorConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Ranked recommendations for one quiz submission.
    /// Never fails; an empty list means nothing matched.
    pub fn generate_recommendations(
        &self,
        answers: &QuizAnswers,
        metrics: &BehavioralMetrics,
        profile: Option<&NeuroProfile>,
        history: &[LearningEntry],
    ) -> Vec<Recommendation> {
        self.report(answers, metrics, profile, history).recommendations
    }

    /// Recommendations plus summary paragraph.
    pub fn report(
        &self,
        answers: &QuizAnswers,
        metrics: &BehavioralMetrics,
        profile: Option<&NeuroProfile>,
        history: &[LearningEntry],
    ) -> RecommendationReport {
        let features = features::extract(answers);
        let (ranked, history_adjusted) = self.rank(answers, &features, metrics, profile, history);
        let restrictions = answers.restrictions();

        let recommendations: Vec<Recommendation> = ranked
            .iter()
            .filter_map(|r| {
                let record = self.catalog.get(&r.candidate.id)?;
                Some(Recommendation {
                    id: record.id.clone(),
                    title: record.name.clone(),
                    description: record.description.clone(),
                    match_percentage: r.match_percentage,
                    confidence: confidence(r.match_percentage, metrics),
                    dosage: record.dosage.clone(),
                    benefits: record.benefits.clone(),
                    explanation: explain::reason_for(&r.candidate, &restrictions),
                })
            })
            .collect();

        tracing::info!(
            count = recommendations.len(),
            top = recommendations.first().map(|r| r.id.as_str()).unwrap_or("-"),
            history_adjusted,
            "generated recommendations"
        );

        RecommendationReport {
            summary: explain::summarize(&ranked, &self.catalog),
            recommendations,
            history_adjusted,
        }
    }

    fn rank(
        &self,
        answers: &QuizAnswers,
        features: &Features,
        metrics: &BehavioralMetrics,
        profile: Option<&NeuroProfile>,
        history: &[LearningEntry],
    ) -> (Vec<Ranked>, bool) {
        let mut sheet = scorer::score(&self.catalog, features, answers, &self.config.scoring);
        let adjustment =
            similarity::adjust(&mut sheet, &features.as_map(), history, &self.config.similarity);

        let derived;
        let profile = match profile {
            Some(p) => p,
            None => {
                derived = NeuroProfile::derive(features, metrics);
                &derived
            }
        };
        let symptoms = features::selected_symptoms(answers);
        let priorities = features::prioritize(&symptoms, profile);

        let ranked = ranker::rank(&sheet, &self.catalog, &priorities, &self.config.scoring);
        (ranked, adjustment.applied)
    }

    /// Nudge a supplement's effectiveness from a 1-5 rating.
    /// Returns the new effectiveness, or None if the rating or id was invalid.
    pub fn record_feedback(
        &mut self,
        supplement_id: &str,
        rating: u8,
        target_symptoms: &[String],
    ) -> Option<f64> {
        if !(1..=5).contains(&rating) {
            tracing::warn!(supplement_id, rating, "ignoring rating outside 1-5");
            return None;
        }
        let delta = (rating as f64 - 3.0) * self.config.feedback.step;
        let updated = self.catalog.adjust_effectiveness(supplement_id, delta);
        match updated {
            Some(value) => tracing::info!(
                supplement_id,
                rating,
                effectiveness = value,
                symptoms = ?target_symptoms,
                "recorded feedback"
            ),
            None => tracing::warn!(supplement_id, "feedback for unknown supplement"),
        }
        updated
    }

    /// History entry describing what this session was shown.
    pub fn learning_entry(
        &self,
        answers: &QuizAnswers,
        recommendations: &[Recommendation],
        timestamp: DateTime<Utc>,
    ) -> LearningEntry {
        LearningEntry {
            timestamp,
            profile: features::extract(answers).as_map(),
            recommendations: recommendations.iter().map(|r| r.id.clone()).collect(),
            feedback: Default::default(),
        }
    }
}

fn confidence(match_percentage: u8, metrics: &BehavioralMetrics) -> ConfidenceLevel {
    let level = ConfidenceLevel::from_percentage(match_percentage);
    if metrics.engagement_score < RUSHED_ENGAGEMENT {
        level.downgrade()
    } else {
        level
    }
}

/// Caller-owned session state: keeps displayed results stable across re-renders.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
    pub model_version: String,
    cached: Option<(String, RecommendationReport)>,
    neuro_profile: Option<NeuroProfile>,
}

impl SessionContext {
    /// New session; the id is derived from the start time and a caller seed.
    pub fn new(started_at: DateTime<Utc>, seed: &str) -> Self {
        let session_id = util::compute_hash(&format!("{}:{}", started_at.to_rfc3339(), seed));
        Self {
            session_id: session_id[..16].to_string(),
            model_version: MODEL_VERSION.to_string(),
            cached: None,
            neuro_profile: None,
        }
    }

    /// Fingerprint of the scoring inputs.
    pub fn fingerprint(answers: &QuizAnswers, metrics: &BehavioralMetrics) -> String {
        let payload = serde_json::json!({
            "answers": answers,
            "metrics": metrics,
            "model": MODEL_VERSION,
        });
        util::compute_hash(&payload.to_string())
    }

    /// Cached report for unchanged inputs, otherwise a fresh one.
    pub fn recommend(
        &mut self,
        advisor: &Advisor,
        answers: &QuizAnswers,
        metrics: &BehavioralMetrics,
        history: &[LearningEntry],
    ) -> RecommendationReport {
        let fingerprint = Self::fingerprint(answers, metrics);
        if let Some((cached_fp, report)) = &self.cached {
            if *cached_fp == fingerprint {
                tracing::debug!(session = %self.session_id, "serving cached recommendations");
                return report.clone();
            }
        }

        let profile = NeuroProfile::derive(&features::extract(answers), metrics);
        let report = advisor.report(answers, metrics, Some(&profile), history);
        self.neuro_profile = Some(profile);
        self.cached = Some((fingerprint, report.clone()));
        report
    }

    pub fn neuro_profile(&self) -> Option<&NeuroProfile> {
        self.neuro_profile.as_ref()
    }

    pub fn cached_report(&self) -> Option<&RecommendationReport> {
        self.cached.as_ref().map(|(_, r)| r)
    }

    /// Drop the cache, e.g. after feedback changed the catalog.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DietaryRestrictions, Goals};

    fn stress() -> QuizAnswers {
        QuizAnswers {
            tags: vec!["stress".to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn stress_scenario_tops_with_stress_supplement() {
        let advisor = Advisor::new(AdvisorConfig::default());
        let recs =
            advisor.generate_recommendations(&stress(), &BehavioralMetrics::default(), None, &[]);
        let top = &recs[0];
        assert_eq!(top.match_percentage, 100);
        assert!(advisor.catalog().get(&top.id).unwrap().targets("stress"));
        assert_eq!(top.confidence, ConfidenceLevel::High);
    }

    #[test]
    fn rushed_session_downgrades_confidence() {
        let advisor = Advisor::new(AdvisorConfig::default());
        let metrics = BehavioralMetrics { engagement_score: 10, ..Default::default() };
        let recs = advisor.generate_recommendations(&stress(), &metrics, None, &[]);
        assert_eq!(recs[0].confidence, ConfidenceLevel::Medium);
    }

    #[test]
    fn empty_input_gives_empty_report() {
        let advisor = Advisor::new(AdvisorConfig::default());
        let report = advisor.report(&QuizAnswers::default(), &BehavioralMetrics::default(), None, &[]);
        assert!(report.recommendations.is_empty());
        assert!(report.summary.starts_with("We couldn't find"));
        assert!(!report.history_adjusted);
    }

    #[test]
    fn vegan_scenario_excludes_fish_oil() {
        let advisor = Advisor::new(AdvisorConfig::default());
        let answers = QuizAnswers {
            tags: vec!["brain fog".into(), "joint pain".into(), "low mood".into()],
            goals: Goals { better_focus: true, ..Default::default() },
            dietary: DietaryRestrictions { vegan: true, ..Default::default() },
            ..Default::default()
        };
        let recs = advisor.generate_recommendations(&answers, &BehavioralMetrics::default(), None, &[]);
        assert!(!recs.is_empty());
        for r in &recs {
            assert!(advisor.catalog().get(&r.id).unwrap().dietary.vegan, "{} is not vegan", r.id);
        }
    }

    #[test]
    fn feedback_moves_effectiveness() {
        let mut advisor = Advisor::new(AdvisorConfig::default());
        let before = advisor.catalog().get("melatonin").unwrap().effectiveness;
        let up = advisor.record_feedback("melatonin", 5, &[]).unwrap();
        assert!(up > before);
        let down = advisor.record_feedback("melatonin", 1, &[]).unwrap();
        assert!(down < up);
        assert_eq!(advisor.record_feedback("melatonin", 0, &[]), None);
        assert_eq!(advisor.record_feedback("melatonin", 6, &[]), None);
        assert_eq!(advisor.record_feedback("unknown", 5, &[]), None);
    }

    #[test]
    fn session_cache_is_stable_and_refreshes() {
        let advisor = Advisor::new(AdvisorConfig::default());
        let mut session = SessionContext::new(Utc::now(), "test");
        let metrics = BehavioralMetrics::default();
        let first = session.recommend(&advisor, &stress(), &metrics, &[]);
        let second = session.recommend(&advisor, &stress(), &metrics, &[]);
        assert_eq!(first, second);
        assert!(session.neuro_profile().is_some());

        let sleep = QuizAnswers { tags: vec!["insomnia".into()], ..Default::default() };
        let third = session.recommend(&advisor, &sleep, &metrics, &[]);
        assert_ne!(third, first);
        assert_eq!(session.cached_report(), Some(&third));
        session.invalidate();
        assert!(session.cached_report().is_none());
    }

    #[test]
    fn learning_entry_captures_profile_and_ids() {
        let advisor = Advisor::new(AdvisorConfig::default());
        let recs = advisor.generate_recommendations(&stress(), &BehavioralMetrics::default(), None, &[]);
        let entry = advisor.learning_entry(&stress(), &recs, Utc::now());
        assert_eq!(entry.recommendations.len(), recs.len());
        assert!(entry.profile.contains_key("stress"));
        assert!(entry.feedback.is_empty());
    }
}
