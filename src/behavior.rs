// Behavior tracking: accumulate quiz-session events, freeze into BehavioralMetrics.
//
// engagement = duration points + hesitation points + linger points + speed points, capped at 100
//   duration   : >=120s -> 40, >=60s -> 25, >=30s -> 10, else 0
//   hesitations: 0 -> 5, 1..=3 -> 20, >3 -> 10
//   lingering  : any lingered question -> 20
//   speed      : normal -> 20, slow -> 15, fast -> 5

use crate::types::{BehavioralMetrics, ReadingSpeed};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet};

const LINGER_SECS: u64 = 10;
const FAST_SECS_PER_QUESTION: f64 = 4.0;
const SLOW_SECS_PER_QUESTION: f64 = 15.0;

const DURATION_LONG_SECS: u64 = 120;
const DURATION_MEDIUM_SECS: u64 = 60;
const DURATION_SHORT_SECS: u64 = 30;
const DURATION_LONG_POINTS: u32 = 40;
const DURATION_MEDIUM_POINTS: u32 = 25;
const DURATION_SHORT_POINTS: u32 = 10;

const HESITATION_NONE_POINTS: u32 = 5;
const HESITATION_SOME_POINTS: u32 = 20;
const HESITATION_MANY_POINTS: u32 = 10;
const HESITATION_SOME_MAX: u32 = 3;

const LINGER_POINTS: u32 = 20;
const MAX_ENGAGEMENT: u32 = 100;

/// Collects events while the quiz is in progress.
#[derive(Debug, Clone)]
pub struct BehaviorTracker {
    started_at: DateTime<Utc>,
    answered: BTreeSet<String>,
    hesitations: u32,
    dwell_secs: BTreeMap<String, u64>,
    lingered: BTreeSet<String>,
}

impl BehaviorTracker {
    pub fn start(started_at: DateTime<Utc>) -> Self {
        Self {
            started_at,
            answered: BTreeSet::new(),
            hesitations: 0,
            dwell_secs: BTreeMap::new(),
            lingered: BTreeSet::new(),
        }
    }

    /// First answer to a question.
    pub fn record_answer(&mut self, question: &str) {
        self.answered.insert(question.to_string());
    }

    /// Changing an existing answer counts as a hesitation.
    pub fn record_answer_change(&mut self, question: &str) {
        if !self.answered.insert(question.to_string()) {
            self.hesitations += 1;
        }
    }

    /// Time spent looking at a question. A single long look marks it as lingered.
    pub fn record_dwell(&mut self, question: &str, secs: u64) {
        *self.dwell_secs.entry(question.to_string()).or_insert(0) += secs;
        if secs >= LINGER_SECS {
            self.lingered.insert(question.to_string());
        }
    }

    pub fn hesitations(&self) -> u32 {
        self.hesitations
    }

    /// Total seconds spent on a question so far.
    pub fn dwell(&self, question: &str) -> u64 {
        self.dwell_secs.get(question).copied().unwrap_or(0)
    }

    /// Freeze the session at `ended_at`.
    pub fn finish(self, ended_at: DateTime<Utc>) -> BehavioralMetrics {
        let duration = (ended_at - self.started_at).num_seconds().max(0) as u64;
        let reading_speed = reading_speed(duration, self.answered.len());
        let engagement_score =
            engagement_score(duration, self.hesitations, !self.lingered.is_empty(), reading_speed);

        BehavioralMetrics {
            session_duration_secs: duration,
            hesitations: self.hesitations,
            lingered_questions: self.lingered,
            reading_speed,
            engagement_score,
        }
    }
}

/// Reading speed from mean seconds per answered question.
pub fn reading_speed(duration_secs: u64, answered: usize) -> ReadingSpeed {
    if answered == 0 {
        return ReadingSpeed::Normal;
    }
    let per_question = duration_secs as f64 / answered as f64;
    if per_question < FAST_SECS_PER_QUESTION {
        ReadingSpeed::Fast
    } else if per_question > SLOW_SECS_PER_QUESTION {
        ReadingSpeed::Slow
    } else {
        ReadingSpeed::Normal
    }
}

pub fn engagement_score(
    duration_secs: u64,
    hesitations: u32,
    lingered: bool,
    speed: ReadingSpeed,
) -> u8 {
    let duration_points = if duration_secs >= DURATION_LONG_SECS {
        DURATION_LONG_POINTS
    } else if duration_secs >= DURATION_MEDIUM_SECS {
        DURATION_MEDIUM_POINTS
    } else if duration_secs >= DURATION_SHORT_SECS {
        DURATION_SHORT_POINTS
    } else {
        0
    };
    let hesitation_points = match hesitations {
        0 => HESITATION_NONE_POINTS,
        n if n <= HESITATION_SOME_MAX => HESITATION_SOME_POINTS,
        _ => HESITATION_MANY_POINTS,
    };
    let linger_points = if lingered { LINGER_POINTS } else { 0 };
    let speed_points = match speed {
        ReadingSpeed::Normal => 20,
        ReadingSpeed::Slow => 15,
        ReadingSpeed::Fast => 5,
    };
    (duration_points + hesitation_points + linger_points + speed_points).min(MAX_ENGAGEMENT) as u8
}
