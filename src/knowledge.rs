//! Fixed knowledge tables: supplements, symptoms, goals, lifestyle factors.
//! Everything the scorer knows lives here as static data.
use crate::types::{ActivityLevel, Concern, DietKind, DietaryCompat, Goal, ProduceIntake};

pub struct SupplementDef {
    pub id: &'static str,
    pub name: &'static str,
    pub scientific_name: &'static str,
    pub description: &'static str,
    pub benefits: &'static [&'static str],
    pub target_symptoms: &'static [&'static str],
    pub dosage: &'static str,
    pub effectiveness: f64,
    pub onset_weeks: (u8, u8),
    pub dietary: DietaryCompat,
}

pub struct SymptomDef {
    pub id: &'static str,
    pub label: &'static str,
    /// Relative importance when scoring, 0..1
    pub weight: f64,
    /// Concern question this symptom belongs to, if any
    pub concern: Option<Concern>,
    /// Free-text phrases that map onto this symptom
    pub aliases: &'static [&'static str],
    /// Single words that name this symptom inside a longer tag
    pub keywords: &'static [&'static str],
}

pub struct GoalDef {
    pub goal: Goal,
    pub weight: f64,
    pub supplements: &'static [&'static str],
}

/// Condition under which a lifestyle factor applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifestyleCondition {
    Sedentary,
    HighlyActive,
    PoorSleep,
    HighStress,
    LowProduce,
}

pub struct LifestyleFactor {
    pub condition: LifestyleCondition,
    pub supplement: &'static str,
    /// Added to the score, scaled by the lifestyle section weight
    pub delta: f64,
}

const ALL_DIETS: DietaryCompat = DietaryCompat {
    vegan: true,
    vegetarian: true,
    gluten_free: true,
    dairy_free: true,
};

pub static SUPPLEMENTS: &[SupplementDef] = &[
    SupplementDef {
        id: "magnesium-glycinate",
        name: "Magnesium Glycinate",
        scientific_name: "Magnesium bisglycinate chelate",
        description: "A gentle, well-absorbed form of magnesium that supports relaxation and restful sleep.",
        benefits: &["Calmer nervous system", "Deeper sleep", "Fewer muscle cramps"],
        target_symptoms: &["stress", "sleep", "anxiety", "muscle-cramps"],
        dosage: "200-400 mg in the evening",
        effectiveness: 85.0,
        onset_weeks: (1, 3),
        dietary: ALL_DIETS,
    },
    SupplementDef {
        id: "ashwagandha",
        name: "Ashwagandha",
        scientific_name: "Withania somnifera",
        description: "An adaptogenic root traditionally used to help the body cope with stress.",
        benefits: &["Lower perceived stress", "Steadier mood", "Better stress resilience"],
        target_symptoms: &["stress", "anxiety", "fatigue"],
        dosage: "300-600 mg root extract daily",
        effectiveness: 80.0,
        onset_weeks: (4, 8),
        dietary: ALL_DIETS,
    },
    SupplementDef {
        id: "l-theanine",
        name: "L-Theanine",
        scientific_name: "N5-ethyl-L-glutamine",
        description: "An amino acid from tea leaves that promotes calm focus without drowsiness.",
        benefits: &["Calm alertness", "Smoother focus", "Less jitteriness from caffeine"],
        target_symptoms: &["stress", "focus", "anxiety"],
        dosage: "100-200 mg once or twice daily",
        effectiveness: 72.0,
        onset_weeks: (1, 2),
        dietary: ALL_DIETS,
    },
    SupplementDef {
        id: "melatonin",
        name: "Melatonin",
        scientific_name: "N-acetyl-5-methoxytryptamine",
        description: "A sleep-timing hormone that helps reset an irregular sleep schedule.",
        benefits: &["Faster sleep onset", "Jet-lag relief"],
        target_symptoms: &["sleep"],
        dosage: "0.5-3 mg 30-60 minutes before bed",
        effectiveness: 70.0,
        onset_weeks: (1, 2),
        dietary: ALL_DIETS,
    },
    SupplementDef {
        id: "vitamin-d3",
        name: "Vitamin D3",
        scientific_name: "Cholecalciferol",
        description: "The sunshine vitamin, commonly low in people who spend most of their time indoors.",
        benefits: &["Immune support", "Mood support", "Bone health"],
        target_symptoms: &["fatigue", "low-mood", "immunity"],
        dosage: "1000-2000 IU daily with a meal",
        effectiveness: 78.0,
        onset_weeks: (6, 12),
        dietary: DietaryCompat { vegan: false, vegetarian: true, gluten_free: true, dairy_free: true },
    },
    SupplementDef {
        id: "vitamin-b12",
        name: "Vitamin B12",
        scientific_name: "Methylcobalamin",
        description: "Essential for energy metabolism and nerve health; often low in plant-based diets.",
        benefits: &["Steadier energy", "Nerve health", "Red blood cell formation"],
        target_symptoms: &["fatigue", "brain-fog"],
        dosage: "250-1000 mcg daily",
        effectiveness: 75.0,
        onset_weeks: (2, 6),
        dietary: ALL_DIETS,
    },
    SupplementDef {
        id: "omega-3-fish-oil",
        name: "Omega-3 Fish Oil",
        scientific_name: "Eicosapentaenoic and docosahexaenoic acid",
        description: "Marine omega-3 fatty acids that support brain, heart, and joint health.",
        benefits: &["Brain health", "Mood support", "Joint comfort"],
        target_symptoms: &["focus", "low-mood", "joint-pain", "brain-fog"],
        dosage: "1-2 g combined EPA/DHA daily",
        effectiveness: 82.0,
        onset_weeks: (4, 12),
        dietary: DietaryCompat { vegan: false, vegetarian: false, gluten_free: true, dairy_free: true },
    },
    SupplementDef {
        id: "algae-omega-3",
        name: "Algae Omega-3",
        scientific_name: "Schizochytrium sp. oil",
        description: "A plant-based source of DHA and EPA grown from microalgae.",
        benefits: &["Brain health", "Mood support"],
        target_symptoms: &["focus", "low-mood", "brain-fog"],
        dosage: "250-500 mg DHA daily",
        effectiveness: 74.0,
        onset_weeks: (4, 12),
        dietary: ALL_DIETS,
    },
    SupplementDef {
        id: "probiotic-blend",
        name: "Probiotic Blend",
        scientific_name: "Lactobacillus and Bifidobacterium strains",
        description: "A multi-strain probiotic to support a balanced gut microbiome.",
        benefits: &["Less bloating", "Regularity", "Gut comfort"],
        target_symptoms: &["digestion", "bloating", "immunity"],
        dosage: "10-20 billion CFU daily",
        effectiveness: 76.0,
        onset_weeks: (2, 4),
        dietary: DietaryCompat { vegan: false, vegetarian: true, gluten_free: true, dairy_free: false },
    },
    SupplementDef {
        id: "ginger-root",
        name: "Ginger Root",
        scientific_name: "Zingiber officinale",
        description: "A warming root that soothes the stomach and eases occasional nausea.",
        benefits: &["Settled stomach", "Less nausea"],
        target_symptoms: &["digestion", "nausea", "bloating"],
        dosage: "500-1000 mg daily",
        effectiveness: 68.0,
        onset_weeks: (1, 2),
        dietary: ALL_DIETS,
    },
    SupplementDef {
        id: "rhodiola-rosea",
        name: "Rhodiola Rosea",
        scientific_name: "Rhodiola rosea",
        description: "An adaptogen used to reduce mental fatigue during demanding periods.",
        benefits: &["Less mental fatigue", "Stamina", "Stress resilience"],
        target_symptoms: &["fatigue", "focus", "stress"],
        dosage: "200-400 mg in the morning",
        effectiveness: 70.0,
        onset_weeks: (1, 4),
        dietary: ALL_DIETS,
    },
    SupplementDef {
        id: "iron-bisglycinate",
        name: "Iron Bisglycinate",
        scientific_name: "Ferrous bisglycinate chelate",
        description: "A gentle iron form for people with low iron stores.",
        benefits: &["Oxygen transport", "Energy support"],
        target_symptoms: &["fatigue"],
        dosage: "18-25 mg every other day",
        effectiveness: 65.0,
        onset_weeks: (4, 12),
        dietary: ALL_DIETS,
    },
    SupplementDef {
        id: "collagen-peptides",
        name: "Collagen Peptides",
        scientific_name: "Hydrolyzed bovine collagen",
        description: "Hydrolyzed collagen to support skin elasticity and joint comfort.",
        benefits: &["Skin elasticity", "Joint comfort"],
        target_symptoms: &["joint-pain", "skin"],
        dosage: "10 g daily",
        effectiveness: 66.0,
        onset_weeks: (8, 12),
        dietary: DietaryCompat { vegan: false, vegetarian: false, gluten_free: true, dairy_free: true },
    },
    SupplementDef {
        id: "curcumin",
        name: "Curcumin",
        scientific_name: "Curcuma longa extract",
        description: "The active compound of turmeric, formulated for better absorption.",
        benefits: &["Joint comfort", "Healthy inflammatory response"],
        target_symptoms: &["joint-pain", "inflammation"],
        dosage: "500-1000 mg with food",
        effectiveness: 71.0,
        onset_weeks: (4, 8),
        dietary: ALL_DIETS,
    },
    SupplementDef {
        id: "whey-protein",
        name: "Whey Protein",
        scientific_name: "Whey protein isolate",
        description: "Fast-digesting dairy protein for muscle recovery and satiety.",
        benefits: &["Muscle recovery", "Satiety"],
        target_symptoms: &["muscle-recovery", "cravings"],
        dosage: "20-30 g after training",
        effectiveness: 73.0,
        onset_weeks: (2, 6),
        dietary: DietaryCompat { vegan: false, vegetarian: true, gluten_free: true, dairy_free: false },
    },
    SupplementDef {
        id: "glucomannan",
        name: "Glucomannan",
        scientific_name: "Amorphophallus konjac fiber",
        description: "A soluble fiber that expands in the stomach to support fullness.",
        benefits: &["Fullness between meals", "Regularity"],
        target_symptoms: &["cravings", "digestion"],
        dosage: "1 g with water before meals",
        effectiveness: 62.0,
        onset_weeks: (2, 8),
        dietary: ALL_DIETS,
    },
    SupplementDef {
        id: "vitamin-c-zinc",
        name: "Vitamin C + Zinc",
        scientific_name: "Ascorbic acid and zinc gluconate",
        description: "A classic immune-support pairing for the colder months.",
        benefits: &["Immune support", "Antioxidant protection"],
        target_symptoms: &["immunity", "skin"],
        dosage: "500 mg vitamin C with 10-15 mg zinc daily",
        effectiveness: 69.0,
        onset_weeks: (1, 4),
        dietary: ALL_DIETS,
    },
];

pub static SYMPTOMS: &[SymptomDef] = &[
    SymptomDef {
        id: "stress",
        label: "stress",
        weight: 1.0,
        concern: Some(Concern::Stress),
        aliases: &["stressed", "overwhelmed", "tension", "burnout", "cortisol"],
        keywords: &["stress", "pressure"],
    },
    SymptomDef {
        id: "anxiety",
        label: "anxiety",
        weight: 0.9,
        concern: Some(Concern::Stress),
        aliases: &["anxious", "worry", "nervous", "restless"],
        keywords: &["anxiety", "panic"],
    },
    SymptomDef {
        id: "sleep",
        label: "poor sleep",
        weight: 1.0,
        concern: Some(Concern::Sleep),
        aliases: &["insomnia", "poor sleep", "can't sleep", "trouble sleeping", "waking up"],
        keywords: &["sleep", "sleeping", "sleepless", "bedtime"],
    },
    SymptomDef {
        id: "fatigue",
        label: "low energy",
        weight: 0.9,
        concern: Some(Concern::Energy),
        aliases: &["tired", "exhausted", "low energy", "lethargic", "sluggish"],
        keywords: &["fatigue", "energy", "tiredness"],
    },
    SymptomDef {
        id: "focus",
        label: "poor focus",
        weight: 0.8,
        concern: Some(Concern::Focus),
        aliases: &["concentration", "distracted", "attention"],
        keywords: &["focus", "focusing", "concentrate"],
    },
    SymptomDef {
        id: "brain-fog",
        label: "brain fog",
        weight: 0.8,
        concern: Some(Concern::Focus),
        aliases: &["foggy", "forgetful", "memory"],
        keywords: &["fog", "fuzzy"],
    },
    SymptomDef {
        id: "low-mood",
        label: "low mood",
        weight: 0.85,
        concern: None,
        aliases: &["sad", "down", "mood", "winter blues"],
        keywords: &["depressed", "blues", "unmotivated"],
    },
    SymptomDef {
        id: "digestion",
        label: "digestive discomfort",
        weight: 0.8,
        concern: Some(Concern::Digestion),
        aliases: &["digestive", "constipation", "irregular bowel", "stomach", "gut"],
        keywords: &["digestion", "indigestion", "bowel"],
    },
    SymptomDef {
        id: "bloating",
        label: "bloating",
        weight: 0.75,
        concern: Some(Concern::Digestion),
        aliases: &["bloated", "gas"],
        keywords: &["bloat", "bloating"],
    },
    SymptomDef {
        id: "nausea",
        label: "nausea",
        weight: 0.6,
        concern: Some(Concern::Digestion),
        aliases: &["queasy", "motion sickness"],
        keywords: &["nausea", "nauseous"],
    },
    SymptomDef {
        id: "joint-pain",
        label: "joint discomfort",
        weight: 0.7,
        concern: None,
        aliases: &["joint", "stiff", "arthritis", "knee"],
        keywords: &["joints", "aches", "achy"],
    },
    SymptomDef {
        id: "inflammation",
        label: "inflammation",
        weight: 0.6,
        concern: None,
        aliases: &["inflamed", "swelling"],
        keywords: &["inflammation", "inflammatory"],
    },
    SymptomDef {
        id: "immunity",
        label: "frequent colds",
        weight: 0.7,
        concern: None,
        aliases: &["immune", "colds", "getting sick", "flu"],
        keywords: &["immunity", "cold", "infections"],
    },
    SymptomDef {
        id: "muscle-cramps",
        label: "muscle cramps",
        weight: 0.6,
        concern: None,
        aliases: &["cramps", "twitching", "spasm"],
        keywords: &["cramp", "cramping"],
    },
    SymptomDef {
        id: "muscle-recovery",
        label: "slow recovery",
        weight: 0.6,
        concern: None,
        aliases: &["sore muscles", "recovery", "soreness"],
        keywords: &["workout", "training", "muscles"],
    },
    SymptomDef {
        id: "cravings",
        label: "cravings",
        weight: 0.6,
        concern: None,
        aliases: &["snacking", "hungry", "appetite", "sugar"],
        keywords: &["craving", "cravings", "overeating"],
    },
    SymptomDef {
        id: "skin",
        label: "skin concerns",
        weight: 0.5,
        concern: None,
        aliases: &["wrinkles", "dry skin", "acne"],
        keywords: &["skin", "complexion"],
    },
];

pub static GOALS: &[GoalDef] = &[
    GoalDef {
        goal: Goal::WeightLoss,
        weight: 0.8,
        supplements: &["glucomannan", "whey-protein", "probiotic-blend"],
    },
    GoalDef {
        goal: Goal::MoreEnergy,
        weight: 0.9,
        supplements: &["vitamin-b12", "rhodiola-rosea", "iron-bisglycinate", "vitamin-d3"],
    },
    GoalDef {
        goal: Goal::BetterFocus,
        weight: 0.85,
        supplements: &["l-theanine", "omega-3-fish-oil", "algae-omega-3", "rhodiola-rosea"],
    },
    GoalDef {
        goal: Goal::BetterDigestion,
        weight: 0.8,
        supplements: &["probiotic-blend", "ginger-root", "glucomannan"],
    },
    GoalDef {
        goal: Goal::LessStress,
        weight: 0.9,
        supplements: &["ashwagandha", "magnesium-glycinate", "l-theanine"],
    },
];

pub static LIFESTYLE_FACTORS: &[LifestyleFactor] = &[
    LifestyleFactor { condition: LifestyleCondition::Sedentary, supplement: "vitamin-d3", delta: 0.10 },
    LifestyleFactor { condition: LifestyleCondition::Sedentary, supplement: "whey-protein", delta: -0.05 },
    LifestyleFactor { condition: LifestyleCondition::HighlyActive, supplement: "magnesium-glycinate", delta: 0.10 },
    LifestyleFactor { condition: LifestyleCondition::HighlyActive, supplement: "whey-protein", delta: 0.15 },
    LifestyleFactor { condition: LifestyleCondition::HighlyActive, supplement: "iron-bisglycinate", delta: 0.05 },
    LifestyleFactor { condition: LifestyleCondition::PoorSleep, supplement: "magnesium-glycinate", delta: 0.10 },
    LifestyleFactor { condition: LifestyleCondition::PoorSleep, supplement: "melatonin", delta: 0.10 },
    LifestyleFactor { condition: LifestyleCondition::PoorSleep, supplement: "rhodiola-rosea", delta: -0.05 },
    LifestyleFactor { condition: LifestyleCondition::HighStress, supplement: "ashwagandha", delta: 0.10 },
    LifestyleFactor { condition: LifestyleCondition::HighStress, supplement: "l-theanine", delta: 0.05 },
    LifestyleFactor { condition: LifestyleCondition::LowProduce, supplement: "vitamin-c-zinc", delta: 0.10 },
    LifestyleFactor { condition: LifestyleCondition::LowProduce, supplement: "probiotic-blend", delta: 0.05 },
];

/// Words in free-text tags that express a dietary restriction.
static DIETARY_KEYWORDS: &[(&str, DietKind)] = &[
    ("vegan", DietKind::Vegan),
    ("plant-based", DietKind::Vegan),
    ("plant based", DietKind::Vegan),
    ("vegetarian", DietKind::Vegetarian),
    ("gluten-free", DietKind::GlutenFree),
    ("gluten free", DietKind::GlutenFree),
    ("celiac", DietKind::GlutenFree),
    ("coeliac", DietKind::GlutenFree),
    ("dairy-free", DietKind::DairyFree),
    ("dairy free", DietKind::DairyFree),
    ("lactose", DietKind::DairyFree),
];

/// Look up a catalog definition by id.
pub fn find_supplement(id: &str) -> Option<&'static SupplementDef> {
    SUPPLEMENTS.iter().find(|s| s.id == id)
}

/// Look up a symptom by id (exact match).
pub fn find_symptom(id: &str) -> Option<&'static SymptomDef> {
    SYMPTOMS.iter().find(|s| s.id == id)
}

pub fn goal_def(goal: Goal) -> Option<&'static GoalDef> {
    GOALS.iter().find(|g| g.goal == goal)
}

/// Map a free-text tag onto the dietary restriction it names, if any.
/// A "non-vegan" style negation is not a restriction.
pub fn dietary_keyword(tag: &str) -> Option<DietKind> {
    let tag = tag.trim().to_lowercase();
    if tag.starts_with("non-") || tag.starts_with("not ") {
        return None;
    }
    DIETARY_KEYWORDS
        .iter()
        .find(|(kw, _)| tag.contains(kw))
        .map(|(_, kind)| *kind)
}

/// Split a lowercased tag into words; apostrophes stay inside words ("can't").
fn words(text: &str) -> Vec<&str> {
    text.split(|c: char| !c.is_alphanumeric() && c != '\'')
        .filter(|w| !w.is_empty())
        .collect()
}

/// Whether `phrase` occurs in `tag_words` as whole consecutive words.
fn contains_phrase(tag_words: &[&str], phrase: &str) -> bool {
    let phrase_words = words(phrase);
    !phrase_words.is_empty()
        && tag_words
            .windows(phrase_words.len())
            .any(|w| w == phrase_words.as_slice())
}

/// Symptom with the most whole-word hits from `terms`; the earlier entry wins ties.
fn best_by_hits(
    tag_words: &[&str],
    terms: impl Fn(&SymptomDef) -> &'static [&'static str],
) -> Option<&'static SymptomDef> {
    let mut best: Option<(&'static SymptomDef, usize)> = None;
    for s in SYMPTOMS.iter() {
        let hits = terms(s)
            .iter()
            .filter(|t| contains_phrase(tag_words, t))
            .count();
        if hits > 0 && best.map_or(true, |(_, prev)| hits > prev) {
            best = Some((s, hits));
        }
    }
    best.map(|(s, _)| s)
}

/// Normalize a free-text symptom tag to the closest table entry.
/// Stages: exact id, exact label, alias phrases, then single keywords.
/// Aliases and keywords only match whole words; the most hits wins.
pub fn normalize_symptom(raw: &str) -> Option<&'static SymptomDef> {
    let raw = raw.trim().to_lowercase();
    if raw.is_empty() {
        return None;
    }

    if let Some(s) = find_symptom(&raw) {
        return Some(s);
    }

    if let Some(s) = SYMPTOMS.iter().find(|s| s.label == raw) {
        return Some(s);
    }

    let tag_words = words(&raw);
    best_by_hits(&tag_words, |s| s.aliases).or_else(|| best_by_hits(&tag_words, |s| s.keywords))
}

/// Whether a lifestyle condition holds for the given answers.
pub fn condition_holds(
    condition: LifestyleCondition,
    activity: ActivityLevel,
    sleep_quality: f64,
    stress: f64,
    produce: ProduceIntake,
) -> bool {
    match condition {
        LifestyleCondition::Sedentary => activity == ActivityLevel::Sedentary,
        LifestyleCondition::HighlyActive => {
            matches!(activity, ActivityLevel::Active | ActivityLevel::VeryActive)
        }
        LifestyleCondition::PoorSleep => sleep_quality <= 0.25,
        LifestyleCondition::HighStress => stress >= 0.75,
        LifestyleCondition::LowProduce => produce == ProduceIntake::Low,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_id_match() {
        assert_eq!(normalize_symptom("stress").unwrap().id, "stress");
    }

    #[test]
    fn label_match() {
        assert_eq!(normalize_symptom("Brain Fog").unwrap().id, "brain-fog");
    }

    #[test]
    fn alias_match() {
        assert_eq!(normalize_symptom("I have insomnia").unwrap().id, "sleep");
        assert_eq!(normalize_symptom("always tired").unwrap().id, "fatigue");
    }

    #[test]
    fn keyword_match_inside_longer_tag() {
        assert_eq!(normalize_symptom("sleep problems").unwrap().id, "sleep");
        assert_eq!(normalize_symptom("stress at work").unwrap().id, "stress");
        assert_eq!(normalize_symptom("irregular sleep").unwrap().id, "sleep");
    }

    #[test]
    fn aliases_match_whole_words_only() {
        assert!(normalize_symptom("trip to vegas").is_none());
        assert!(normalize_symptom("fluid retention").is_none());
        assert!(normalize_symptom("slowdown at work").is_none());
        assert_eq!(normalize_symptom("i can't sleep").unwrap().id, "sleep");
    }

    #[test]
    fn alias_beats_keyword() {
        // "bloated" is a bloating alias; "digestion" only a keyword
        assert_eq!(normalize_symptom("bloated after digestion").unwrap().id, "bloating");
    }

    #[test]
    fn unknown_tag_has_no_symptom() {
        assert!(normalize_symptom("space exploration").is_none());
        assert!(normalize_symptom("   ").is_none());
    }

    #[test]
    fn dietary_keywords() {
        assert_eq!(dietary_keyword("Vegan"), Some(DietKind::Vegan));
        assert_eq!(dietary_keyword("I'm coeliac"), Some(DietKind::GlutenFree));
        assert_eq!(dietary_keyword("non-vegan"), None);
        assert_eq!(dietary_keyword("stress"), None);
    }

    #[test]
    fn supplement_ids_are_unique() {
        let mut ids: Vec<_> = SUPPLEMENTS.iter().map(|s| s.id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), SUPPLEMENTS.len());
    }

    #[test]
    fn table_references_resolve() {
        for s in SUPPLEMENTS {
            for sym in s.target_symptoms {
                assert!(find_symptom(sym).is_some(), "{} targets unknown symptom {}", s.id, sym);
            }
            assert!((0.0..=100.0).contains(&s.effectiveness));
            assert!(s.onset_weeks.0 <= s.onset_weeks.1);
        }
        for g in GOALS {
            for id in g.supplements {
                assert!(find_supplement(id).is_some(), "goal {:?} lists unknown {}", g.goal, id);
            }
        }
        for f in LIFESTYLE_FACTORS {
            assert!(find_supplement(f.supplement).is_some(), "unknown {}", f.supplement);
        }
    }

    #[test]
    fn every_goal_has_a_definition() {
        for goal in Goal::ALL {
            assert!(goal_def(goal).is_some());
        }
    }

    #[test]
    fn every_symptom_is_targeted() {
        for sym in SYMPTOMS {
            assert!(
                SUPPLEMENTS.iter().any(|s| s.target_symptoms.contains(&sym.id)),
                "no supplement targets {}",
                sym.id
            );
        }
    }
}
