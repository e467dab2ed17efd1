use crate::knowledge::{SupplementDef, SUPPLEMENTS};
use crate::types::SupplementRecord;
use std::collections::BTreeMap;

/// Runtime supplement catalog, in definition order.
/// Owned so feedback can nudge effectiveness without touching the static tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    records: Vec<SupplementRecord>,
}

impl Catalog {
    /// Catalog built from the static knowledge tables.
    pub fn builtin() -> Self {
        Self {
            records: SUPPLEMENTS.iter().map(to_record).collect(),
        }
    }

    pub fn from_records(records: Vec<SupplementRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SupplementRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&SupplementRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Apply persisted effectiveness values. Unknown ids are skipped.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, f64>) {
        for (id, value) in overrides {
            if let Some(r) = self.records.iter_mut().find(|r| &r.id == id) {
                r.effectiveness = value.clamp(0.0, 100.0);
            } else {
                tracing::debug!(id = %id, "ignoring override for unknown supplement");
            }
        }
    }

    /// Nudge effectiveness by `delta`, clamped to [0,100]. Returns the new value.
    pub fn adjust_effectiveness(&mut self, id: &str, delta: f64) -> Option<f64> {
        let record = self.records.iter_mut().find(|r| r.id == id)?;
        record.effectiveness = (record.effectiveness + delta).clamp(0.0, 100.0);
        Some(record.effectiveness)
    }

    /// Effectiveness values that differ from the builtin tables.
    pub fn overrides(&self) -> BTreeMap<String, f64> {
        self.records
            .iter()
            .filter(|r| {
                crate::knowledge::find_supplement(&r.id)
                    .map_or(true, |def| (def.effectiveness - r.effectiveness).abs() > f64::EPSILON)
            })
            .map(|r| (r.id.clone(), r.effectiveness))
            .collect()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn to_record(def: &SupplementDef) -> SupplementRecord {
    SupplementRecord {
        id: def.id.to_string(),
        name: def.name.to_string(),
        scientific_name: def.scientific_name.to_string(),
        description: def.description.to_string(),
        benefits: def.benefits.iter().map(|b| b.to_string()).collect(),
        target_symptoms: def.target_symptoms.iter().map(|s| s.to_string()).collect(),
        dosage: def.dosage.to_string(),
        effectiveness: def.effectiveness,
        onset_min_weeks: def.onset_weeks.0,
        onset_max_weeks: def.onset_weeks.1,
        dietary: def.dietary,
    }
}
