use crate::advisor::Advisor;
use crate::store::Store;

/// Result of recording one rating.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedbackOutcome {
    /// New effectiveness, None if the rating or id was rejected
    pub effectiveness: Option<f64>,
    /// Rating was attached to a history entry
    pub attached_to_history: bool,
    /// All writes succeeded
    pub persisted: bool,
}

/// Record a 1-5 rating for a supplement: adjust the catalog, persist the override,
/// attach the rating to history, tally it per symptom.
/// Storage failures are logged and reported in the outcome, never returned.
pub fn record_feedback(
    store: &Store,
    advisor: &mut Advisor,
    supplement_id: &str,
    rating: u8,
    target_symptoms: &[String],
) -> FeedbackOutcome {
    let Some(effectiveness) = advisor.record_feedback(supplement_id, rating, target_symptoms) else {
        return FeedbackOutcome {
            effectiveness: None,
            attached_to_history: false,
            persisted: false,
        };
    };

    let mut persisted = true;

    if let Err(e) = store.save_overrides(&advisor.catalog().overrides()) {
        tracing::warn!(error = %e, "failed to persist catalog overrides");
        persisted = false;
    }

    let attached_to_history = match store.attach_feedback(supplement_id, rating) {
        Ok(attached) => attached,
        Err(e) => {
            tracing::warn!(error = %e, "failed to attach feedback to history");
            persisted = false;
            false
        }
    };

    if let Err(e) = store.record_symptom_feedback(target_symptoms, rating) {
        tracing::warn!(error = %e, "failed to record symptom feedback");
        persisted = false;
    }

    FeedbackOutcome {
        effectiveness: Some(effectiveness),
        attached_to_history,
        persisted,
    }
}
