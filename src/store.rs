// Store module: plain JSON files in a local data directory.
//
// Layout:
//   catalog_overrides.json  supplement id -> effectiveness
//   symptom_feedback.json   symptom id -> rating tally
//   learning_history.json   [LearningEntry], most recent last, capped
//   session.json            last shown report
//
// No confidentiality or integrity is claimed. Missing files read as empty;
// corrupt files are logged and read as empty.

use crate::advisor::MODEL_VERSION;
use crate::error::AdvisorError;
use crate::types::{LearningEntry, RecommendationReport};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const OVERRIDES_FILE: &str = "catalog_overrides.json";
const SYMPTOM_FEEDBACK_FILE: &str = "symptom_feedback.json";
const HISTORY_FILE: &str = "learning_history.json";
const SESSION_FILE: &str = "session.json";

/// Running rating tally for one symptom.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SymptomFeedback {
    pub count: u32,
    pub total: u32,
}

impl SymptomFeedback {
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.total as f64 / self.count as f64)
        }
    }
}

/// Last report shown, kept so a re-run can display the same values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    pub model_version: String,
    pub fingerprint: String,
    pub saved_at: DateTime<Utc>,
    /// Whether learning history fed into `report`
    #[serde(default = "default_used_history")]
    pub used_history: bool,
    pub report: RecommendationReport,
}

fn default_used_history() -> bool {
    true
}

impl SessionSnapshot {
    /// True when a run with these inputs may show `report` again.
    pub fn reusable_for(&self, fingerprint: &str, use_history: bool) -> bool {
        self.model_version == MODEL_VERSION
            && self.fingerprint == fingerprint
            && self.used_history == use_history
    }
}

#[derive(Debug, Clone)]
pub struct Store {
    root: PathBuf,
}

impl Store {
    /// Store rooted at `root`; the directory is created on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn read_json<T: DeserializeOwned + Default>(&self, name: &str) -> T {
        let path = self.path(name);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable store file, treating as empty");
                return T::default();
            }
        };
        match serde_json::from_str(&content) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "corrupt store file, treating as empty");
                T::default()
            }
        }
    }

    fn write_json<T: Serialize>(&self, name: &str, value: &T) -> Result<(), AdvisorError> {
        std::fs::create_dir_all(&self.root).map_err(|e| {
            AdvisorError::Storage(format!("creating {}: {}", self.root.display(), e))
        })?;
        let path = self.path(name);
        let json = serde_json::to_string_pretty(value)?;
        std::fs::write(&path, json)
            .map_err(|e| AdvisorError::Storage(format!("writing {}: {}", path.display(), e)))
    }

    // ── learning history ──

    pub fn load_history(&self) -> Vec<LearningEntry> {
        self.read_json(HISTORY_FILE)
    }

    /// Append an entry, keeping only the `cap` most recent. Returns the new length.
    pub fn append_history(&self, entry: LearningEntry, cap: usize) -> Result<usize, AdvisorError> {
        let mut history = self.load_history();
        history.push(entry);
        if history.len() > cap {
            let excess = history.len() - cap;
            history.drain(..excess);
        }
        self.write_json(HISTORY_FILE, &history)?;
        Ok(history.len())
    }

    /// Attach a rating to the newest history entry that showed `supplement_id`.
    /// Returns false if no entry showed it.
    pub fn attach_feedback(&self, supplement_id: &str, rating: u8) -> Result<bool, AdvisorError> {
        let mut history = self.load_history();
        let Some(entry) = history
            .iter_mut()
            .rev()
            .find(|e| e.recommendations.iter().any(|id| id == supplement_id))
        else {
            return Ok(false);
        };
        entry.feedback.insert(supplement_id.to_string(), rating);
        self.write_json(HISTORY_FILE, &history)?;
        Ok(true)
    }

    // ── catalog overrides ──

    pub fn load_overrides(&self) -> BTreeMap<String, f64> {
        self.read_json(OVERRIDES_FILE)
    }

    pub fn save_overrides(&self, overrides: &BTreeMap<String, f64>) -> Result<(), AdvisorError> {
        self.write_json(OVERRIDES_FILE, overrides)
    }

    // ── symptom feedback ──

    pub fn load_symptom_feedback(&self) -> BTreeMap<String, SymptomFeedback> {
        self.read_json(SYMPTOM_FEEDBACK_FILE)
    }

    pub fn record_symptom_feedback(&self, symptoms: &[String], rating: u8) -> Result<(), AdvisorError> {
        if symptoms.is_empty() {
            return Ok(());
        }
        let mut tally = self.load_symptom_feedback();
        for s in symptoms {
            let slot = tally.entry(s.clone()).or_default();
            slot.count += 1;
            slot.total += rating as u32;
        }
        self.write_json(SYMPTOM_FEEDBACK_FILE, &tally)
    }

    // ── session ──

    pub fn load_session(&self) -> Option<SessionSnapshot> {
        self.read_json::<Option<SessionSnapshot>>(SESSION_FILE)
    }

    pub fn save_session(&self, snapshot: &SessionSnapshot) -> Result<(), AdvisorError> {
        self.write_json(SESSION_FILE, snapshot)
    }

    /// Forget the last shown report, e.g. after the catalog changed.
    pub fn clear_session(&self) -> Result<(), AdvisorError> {
        self.remove(SESSION_FILE)
    }

    /// Remove every store file. Missing files are fine.
    pub fn clear(&self) -> Result<(), AdvisorError> {
        for name in [OVERRIDES_FILE, SYMPTOM_FEEDBACK_FILE, HISTORY_FILE, SESSION_FILE] {
            self.remove(name)?;
        }
        Ok(())
    }

    fn remove(&self, name: &str) -> Result<(), AdvisorError> {
        let path = self.path(name);
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AdvisorError::Storage(format!("removing {}: {}", path.display(), e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ids: &[&str]) -> LearningEntry {
        LearningEntry {
            timestamp: Utc::now(),
            profile: BTreeMap::new(),
            recommendations: ids.iter().map(|s| s.to_string()).collect(),
            feedback: BTreeMap::new(),
        }
    }

    fn snapshot(used_history: bool) -> SessionSnapshot {
        let report = crate::Advisor::new(crate::AdvisorConfig::default()).report(
            &crate::QuizAnswers::default(),
            &crate::BehavioralMetrics::default(),
            None,
            &[],
        );
        SessionSnapshot {
            session_id: "0123456789abcdef".to_string(),
            model_version: MODEL_VERSION.to_string(),
            fingerprint: "fp".to_string(),
            saved_at: Utc::now(),
            used_history,
            report,
        }
    }

    #[test]
    fn snapshot_reuse_requires_same_history_mode() {
        let with_history = snapshot(true);
        assert!(with_history.reusable_for("fp", true));
        assert!(!with_history.reusable_for("fp", false));
        assert!(!with_history.reusable_for("other", true));

        let without = snapshot(false);
        assert!(without.reusable_for("fp", false));
        assert!(!without.reusable_for("fp", true));

        let mut stale = snapshot(true);
        stale.model_version = "rules-0".to_string();
        assert!(!stale.reusable_for("fp", true));
    }

    #[test]
    fn snapshot_without_history_flag_reads_as_history_run() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        let mut json = serde_json::to_value(snapshot(true)).unwrap();
        json.as_object_mut().unwrap().remove("used_history");
        std::fs::write(dir.path().join(SESSION_FILE), json.to_string()).unwrap();
        assert!(store.load_session().unwrap().used_history);
    }

    #[test]
    fn missing_files_read_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path().join("nested"));
        assert!(store.load_history().is_empty());
        assert!(store.load_overrides().is_empty());
        assert!(store.load_session().is_none());
    }

    #[test]
    fn corrupt_history_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(HISTORY_FILE), "{{{ nope").unwrap();
        let store = Store::new(dir.path());
        assert!(store.load_history().is_empty());
    }

    #[test]
    fn history_is_capped_to_most_recent() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        for i in 0..5 {
            let id = format!("s{}", i);
            store.append_history(entry(&[id.as_str()]), 3).unwrap();
        }
        let history = store.load_history();
        assert_eq!(history.len(), 3);
        assert_eq!(history[0].recommendations, vec!["s2".to_string()]);
        assert_eq!(history[2].recommendations, vec!["s4".to_string()]);
    }

    #[test]
    fn feedback_attaches_to_newest_matching_entry() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        store.append_history(entry(&["a", "b"]), 10).unwrap();
        store.append_history(entry(&["b"]), 10).unwrap();
        store.append_history(entry(&["c"]), 10).unwrap();

        assert!(store.attach_feedback("b", 4).unwrap());
        assert!(!store.attach_feedback("zzz", 4).unwrap());

        let history = store.load_history();
        assert!(history[0].feedback.is_empty());
        assert_eq!(history[1].feedback.get("b"), Some(&4));
        assert!(history[2].feedback.is_empty());
    }

    #[test]
    fn symptom_tally_accumulates() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        store.record_symptom_feedback(&["stress".to_string()], 5).unwrap();
        store.record_symptom_feedback(&["stress".to_string(), "sleep".to_string()], 2).unwrap();
        let tally = store.load_symptom_feedback();
        assert_eq!(tally["stress"], SymptomFeedback { count: 2, total: 7 });
        assert_eq!(tally["sleep"].mean(), Some(2.0));
    }

    #[test]
    fn clear_removes_everything() {
        let dir = tempfile::tempdir().unwrap();
        let store = Store::new(dir.path());
        store.append_history(entry(&["a"]), 10).unwrap();
        store.save_overrides(&[("a".to_string(), 50.0)].into_iter().collect()).unwrap();
        store.clear().unwrap();
        assert!(store.load_history().is_empty());
        assert!(store.load_overrides().is_empty());
        store.clear().unwrap();
    }
}
