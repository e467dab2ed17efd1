//! End-to-end recommendation tests: fixture JSON -> QuizAnswers -> Advisor report.
//! No AI calls and no disk writes; history is built in memory.

use chrono::Utc;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use supplement_advisor::{
    Advisor, AdvisorConfig, AdvisorError, BehavioralMetrics, ConfidenceLevel, LearningEntry,
    QuizAnswers, Recommendation, SessionContext,
};

fn fixture_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn load_answers(name: &str) -> QuizAnswers {
    let json = std::fs::read_to_string(fixture_dir().join(name)).unwrap();
    QuizAnswers::from_json(&json).unwrap()
}

fn load_metrics(name: &str) -> BehavioralMetrics {
    let json = std::fs::read_to_string(fixture_dir().join(name)).unwrap();
    BehavioralMetrics::from_json(&json).unwrap()
}

fn recommend(answers: &QuizAnswers, history: &[LearningEntry]) -> Vec<Recommendation> {
    Advisor::new(AdvisorConfig::default()).generate_recommendations(
        answers,
        &BehavioralMetrics::default(),
        None,
        history,
    )
}

fn ids(recs: &[Recommendation]) -> Vec<&str> {
    recs.iter().map(|r| r.id.as_str()).collect()
}

// --- Ordering and shape ---

#[test]
fn full_quiz_respects_list_invariants() {
    let recs = recommend(&load_answers("quiz_full.json"), &[]);
    assert!(!recs.is_empty());
    assert!(recs.len() <= 5, "never more than max_results");

    let unique: HashSet<&str> = ids(&recs).into_iter().collect();
    assert_eq!(unique.len(), recs.len(), "no duplicate supplements");

    assert_eq!(recs[0].match_percentage, 100, "top entry is normalized to 100");
    for pair in recs.windows(2) {
        assert!(
            pair[0].match_percentage >= pair[1].match_percentage,
            "percentages must be non-increasing: {:?}",
            recs.iter().map(|r| r.match_percentage).collect::<Vec<_>>()
        );
    }
    for r in &recs {
        assert!(r.match_percentage >= 1 && r.match_percentage <= 100);
        assert!(!r.explanation.is_empty());
        assert!(!r.dosage.is_empty());
    }
}

#[test]
fn full_quiz_mentions_gluten_free_from_tag() {
    let answers = load_answers("quiz_full.json");
    assert!(answers.restrictions().gluten_free);
    let recs = recommend(&answers, &[]);
    assert!(recs[0].explanation.contains("gluten-free"));
}

#[test]
fn same_input_gives_identical_output() {
    let answers = load_answers("quiz_full.json");
    let first = recommend(&answers, &[]);
    let second = recommend(&answers, &[]);
    assert_eq!(first, second);
}

#[test]
fn stress_fixture_order_and_percentages() {
    let recs = recommend(&load_answers("quiz_stress.json"), &[]);
    assert_eq!(
        ids(&recs),
        vec!["magnesium-glycinate", "ashwagandha", "l-theanine", "rhodiola-rosea"]
    );
    let pcts: Vec<u8> = recs.iter().map(|r| r.match_percentage).collect();
    assert_eq!(pcts, vec![100, 94, 85, 82]);
}

// --- Dietary exclusion ---

#[test]
fn vegan_fixture_never_shows_animal_products() {
    let advisor = Advisor::new(AdvisorConfig::default());
    let recs = advisor.generate_recommendations(
        &load_answers("quiz_vegan.json"),
        &BehavioralMetrics::default(),
        None,
        &[],
    );
    assert!(!recs.is_empty());
    for r in &recs {
        let record = advisor.catalog().get(&r.id).unwrap();
        assert!(record.dietary.vegan, "{} is not vegan", r.id);
        assert!(r.explanation.contains("vegan"));
    }
    let shown = ids(&recs);
    assert!(!shown.contains(&"omega-3-fish-oil"));
    assert!(!shown.contains(&"collagen-peptides"));
    assert!(shown.contains(&"algae-omega-3"));
}

// --- Empty results ---

#[test]
fn empty_answers_give_empty_list_and_fallback_summary() {
    let report = Advisor::new(AdvisorConfig::default()).report(
        &QuizAnswers::default(),
        &BehavioralMetrics::default(),
        None,
        &[],
    );
    assert!(report.recommendations.is_empty());
    assert!(report.summary.starts_with("We couldn't find"));
}

#[test]
fn lifestyle_alone_never_creates_a_candidate() {
    let recs = recommend(&load_answers("quiz_lifestyle_only.json"), &[]);
    assert!(recs.is_empty(), "got {:?}", ids(&recs));
}

#[test]
fn malformed_fields_fall_back_to_defaults() {
    // "tags" is a bare string and "age" is not a number
    let answers = load_answers("quiz_malformed.json");
    assert_eq!(answers.age, None);
    assert_eq!(ids(&recommend(&answers, &[])), ids(&recommend(&load_answers("quiz_stress.json"), &[])));
}

#[test]
fn unknown_severity_does_not_discard_tags() {
    let answers =
        QuizAnswers::from_json(r#"{"tags":["stress"],"concerns":{"sleep":"terrible"}}"#).unwrap();
    let recs = recommend(&answers, &[]);
    assert_eq!(recs[0].id, "magnesium-glycinate");
    assert_eq!(recs, recommend(&load_answers("quiz_stress.json"), &[]));
}

#[test]
fn only_non_json_input_is_an_error() {
    assert!(matches!(QuizAnswers::from_json("tags: stress"), Err(AdvisorError::Parse(_))));
}

// --- Behavioral metrics ---

#[test]
fn rushed_session_lowers_confidence_not_order() {
    let advisor = Advisor::new(AdvisorConfig::default());
    let answers = load_answers("quiz_stress.json");
    let calm = advisor.generate_recommendations(&answers, &load_metrics("metrics_engaged.json"), None, &[]);
    let rushed = advisor.generate_recommendations(&answers, &load_metrics("metrics_rushed.json"), None, &[]);

    assert_eq!(ids(&calm), ids(&rushed));
    assert_eq!(calm[0].confidence, ConfidenceLevel::High);
    assert_eq!(rushed[0].confidence, ConfidenceLevel::Medium);
}

// --- History similarity ---

fn rated_history(answers: &QuizAnswers, entries: usize, id: &str, rating: u8) -> Vec<LearningEntry> {
    let advisor = Advisor::new(AdvisorConfig::default());
    let recs = recommend(answers, &[]);
    (0..entries)
        .map(|_| {
            let mut entry = advisor.learning_entry(answers, &recs, Utc::now());
            entry.feedback.insert(id.to_string(), rating);
            entry
        })
        .collect()
}

#[test]
fn short_history_is_ignored() {
    let answers = load_answers("quiz_stress.json");
    let history = rated_history(&answers, 4, "ashwagandha", 1);
    assert_eq!(recommend(&answers, &history), recommend(&answers, &[]));
}

#[test]
fn poor_ratings_from_similar_sessions_demote_a_supplement() {
    let answers = load_answers("quiz_stress.json");
    let history = rated_history(&answers, 5, "ashwagandha", 1);

    let report = Advisor::new(AdvisorConfig::default()).report(
        &answers,
        &BehavioralMetrics::default(),
        None,
        &history,
    );
    assert!(report.history_adjusted);

    let shown = ids(&report.recommendations);
    let position = shown.iter().position(|id| *id == "ashwagandha").unwrap();
    assert!(position > 1, "ashwagandha should drop below second place: {:?}", shown);
    assert_eq!(shown[0], "magnesium-glycinate");
}

// --- Session cache ---

#[test]
fn session_serves_same_report_for_same_inputs() {
    let advisor = Advisor::new(AdvisorConfig::default());
    let answers = load_answers("quiz_full.json");
    let metrics = load_metrics("metrics_engaged.json");

    let mut session = SessionContext::new(Utc::now(), "pipeline");
    let first = session.recommend(&advisor, &answers, &metrics, &[]);
    let again = session.recommend(&advisor, &answers, &metrics, &[]);
    assert_eq!(first, again);
    assert_eq!(session.session_id.len(), 16);

    let profile = session.neuro_profile().unwrap();
    assert!(profile.sleep > 0.75, "lingering on sleep should raise its intensity");
    assert_eq!(
        SessionContext::fingerprint(&answers, &metrics),
        SessionContext::fingerprint(&answers, &metrics)
    );
}

// --- Config ---

#[test]
fn partial_config_file_limits_results() {
    let config = AdvisorConfig::load(&fixture_dir().join("config_partial.toml")).unwrap();
    assert_eq!(config.scoring.max_results, 3);
    assert_eq!(config.similarity.min_history, 2);
    assert_eq!(config.scoring.symptom_weight, 0.5);

    let recs = Advisor::new(config).generate_recommendations(
        &load_answers("quiz_full.json"),
        &BehavioralMetrics::default(),
        None,
        &[],
    );
    assert_eq!(recs.len(), 3);
}

#[test]
fn missing_config_file_means_defaults() {
    let config = AdvisorConfig::load(&fixture_dir().join("does_not_exist.toml")).unwrap();
    assert_eq!(config.scoring, AdvisorConfig::default().scoring);
}
