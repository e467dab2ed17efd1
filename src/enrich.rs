use crate::error::AdvisorError;
use crate::features;
use crate::types::{QuizAnswers, Recommendation};
use crate::util;
use cli_ai_analyzer::{prompt, AnalyzeOptions};

/// Prompt template for explanation enrichment (loaded from file at compile time).
const ENRICH_PROMPT: &str = include_str!("../prompts/enrich.txt");

const MAX_EXPLANATION_CHARS: usize = 400;

#[derive(serde::Deserialize)]
struct EnrichedEntry {
    id: String,
    explanation: String,
}

/// Build the enrichment prompt. Exposed for unit testing.
pub fn build_enrich_prompt(recommendations: &[Recommendation], answers: &QuizAnswers) -> String {
    let symptoms: Vec<&str> = features::selected_symptoms(answers)
        .iter()
        .map(|s| s.label)
        .collect();
    let goals: Vec<&str> = answers.goals.selected().iter().map(|g| g.label()).collect();
    let diets = answers.restrictions().labels();

    let mut profile = Vec::new();
    if !symptoms.is_empty() {
        profile.push(format!("- symptoms: {}", symptoms.join(", ")));
    }
    if !goals.is_empty() {
        profile.push(format!("- goals: {}", goals.join(", ")));
    }
    if !diets.is_empty() {
        profile.push(format!("- diet: {}", diets.join(", ")));
    }
    if profile.is_empty() {
        profile.push("- nothing specific".to_string());
    }

    let recs = recommendations
        .iter()
        .map(|r| format!("- {}: {}, {}", r.id, r.title, r.explanation))
        .collect::<Vec<_>>()
        .join("\n");

    ENRICH_PROMPT
        .replace("{profile}", &profile.join("\n"))
        .replace("{recommendations}", &recs)
}

/// Merge AI-written explanations into the list. Ids not in the list are ignored;
/// blank explanations keep the original text.
pub fn apply_enrichment(
    recommendations: &[Recommendation],
    response: &str,
) -> Result<Vec<Recommendation>, AdvisorError> {
    let entries: Vec<EnrichedEntry> = util::parse_json_response(response)?;
    if entries.is_empty() {
        return Err(AdvisorError::Ai("empty enrichment reply".to_string()));
    }

    let mut out = recommendations.to_vec();
    for entry in entries {
        let text = entry.explanation.trim();
        if text.is_empty() {
            continue;
        }
        if let Some(rec) = out.iter_mut().find(|r| r.id == entry.id) {
            rec.explanation = util::truncate(text, MAX_EXPLANATION_CHARS);
        }
    }
    Ok(out)
}

fn try_enrich(
    recommendations: &[Recommendation],
    answers: &QuizAnswers,
    options: &AnalyzeOptions,
) -> Result<Vec<Recommendation>, AdvisorError> {
    let prompt_text = build_enrich_prompt(recommendations, answers);
    let response =
        prompt(&prompt_text, options.clone()).map_err(|e| AdvisorError::Ai(e.to_string()))?;
    apply_enrichment(recommendations, &response)
}

/// Rewrite explanations with the AI backend. Fails closed: any error returns
/// the input unchanged.
pub fn enrich(
    recommendations: &[Recommendation],
    answers: &QuizAnswers,
    options: &AnalyzeOptions,
) -> Vec<Recommendation> {
    if recommendations.is_empty() {
        return Vec::new();
    }
    match try_enrich(recommendations, answers, options) {
        Ok(enriched) => enriched,
        Err(e) => {
            tracing::warn!(error = %e, "explanation enrichment failed, keeping rule-based text");
            recommendations.to_vec()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ConfidenceLevel, Goals};

    fn rec(id: &str) -> Recommendation {
        Recommendation {
            id: id.to_string(),
            title: id.to_uppercase(),
            description: String::new(),
            match_percentage: 100,
            confidence: ConfidenceLevel::High,
            dosage: String::new(),
            benefits: vec![],
            explanation: "original".to_string(),
        }
    }

    #[test]
    fn prompt_replaces_placeholders() {
        let answers = QuizAnswers {
            tags: vec!["stress".into(), "vegan".into()],
            goals: Goals { better_focus: true, ..Default::default() },
            ..Default::default()
        };
        let text = build_enrich_prompt(&[rec("ashwagandha")], &answers);
        assert!(text.contains("- symptoms: stress"));
        assert!(text.contains("- goals: better focus"));
        assert!(text.contains("- diet: vegan"));
        assert!(text.contains("- ashwagandha: ASHWAGANDHA, original"));
        assert!(!text.contains("{profile}"));
        assert!(!text.contains("{recommendations}"));
    }

    #[test]
    fn enrichment_replaces_known_ids_only() {
        let recs = vec![rec("a"), rec("b")];
        let reply = r#"```json
[{"id": "b", "explanation": "Better text."}, {"id": "zzz", "explanation": "ignored"}]
```"#;
        let out = apply_enrichment(&recs, reply).unwrap();
        assert_eq!(out[0].explanation, "original");
        assert_eq!(out[1].explanation, "Better text.");
        assert_eq!(out.len(), 2);
    }

    #[test]
    fn unparseable_reply_is_an_error() {
        assert!(apply_enrichment(&[rec("a")], "sorry, I can't help").is_err());
        assert!(apply_enrichment(&[rec("a")], "[]").is_err());
    }

    #[test]
    fn empty_list_skips_backend() {
        let out = enrich(&[], &QuizAnswers::default(), &AnalyzeOptions::default());
        assert!(out.is_empty());
    }
}
