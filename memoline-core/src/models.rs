use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

pub const SECONDS_PER_DAY: i64 = 86_400;

pub const MIN_DIFFICULTY: f64 = 1.0;
pub const MAX_DIFFICULTY: f64 = 10.0;
pub const DEFAULT_DIFFICULTY: f64 = 5.0;
pub const MIN_STABILITY: f64 = 0.01;

/// Learner's self-assessed (or graded) recall quality for one review.
///
/// The ordinal doubles as an index into the weight vector for initial
/// stability, so the variant order is load-bearing.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Rating {
    Again = 0,
    Hard = 1,
    Good = 2,
    Easy = 3,
}

impl Rating {
    pub const ALL: [Rating; 4] = [Rating::Again, Rating::Hard, Rating::Good, Rating::Easy];

    pub fn ordinal(self) -> u8 {
        self as u8
    }

    /// The 1..=4 scale used by the difficulty update.
    pub fn scale(self) -> f64 {
        f64::from(self.ordinal()) + 1.0
    }

    /// # Panics
    ///
    /// Panics if `n` is not in `0..=3`. A bad ordinal here would silently
    /// corrupt a learner's schedule.
    pub fn from_ordinal(n: u8) -> Self {
        match Rating::try_from(n) {
            Ok(rating) => rating,
            Err(e) => panic!("{e}"),
        }
    }
}

impl TryFrom<u8> for Rating {
    type Error = CoreError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(Rating::Again),
            1 => Ok(Rating::Hard),
            2 => Ok(Rating::Good),
            3 => Ok(Rating::Easy),
            other => Err(CoreError::InvalidRating(other)),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum State {
    New = 0,
    Learning = 1,
    Review = 2,
    Relearning = 3,
}

impl State {
    pub fn ordinal(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for State {
    type Error = CoreError;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        match n {
            0 => Ok(State::New),
            1 => Ok(State::Learning),
            2 => Ok(State::Review),
            3 => Ok(State::Relearning),
            other => Err(CoreError::InvalidState(other)),
        }
    }
}

/// One learner's memory state for one item.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Card {
    /// Epoch seconds at or after which the item should be shown again.
    pub due: i64,
    /// Days until recall probability decays to the target retention.
    pub stability: f64,
    pub difficulty: f64,
    pub elapsed_days: f64,
    pub scheduled_days: f64,
    pub reps: u32,
    pub lapses: u32,
    pub state: State,
    /// Epoch seconds of the most recent review, 0 if never reviewed.
    pub last_review: i64,
}

impl Card {
    pub fn new() -> Self {
        Self {
            due: 0,
            stability: 0.0,
            difficulty: DEFAULT_DIFFICULTY,
            elapsed_days: 0.0,
            scheduled_days: 0.0,
            reps: 0,
            lapses: 0,
            state: State::New,
            last_review: 0,
        }
    }

    pub fn is_new(&self) -> bool {
        self.state == State::New
    }

    pub fn is_due(&self, now: i64) -> bool {
        self.due <= now
    }

    pub fn due_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.due, 0)
    }

    pub fn last_review_at(&self) -> Option<DateTime<Utc>> {
        if self.last_review == 0 {
            None
        } else {
            DateTime::from_timestamp(self.last_review, 0)
        }
    }
}

impl Default for Card {
    fn default() -> Self {
        Self::new()
    }
}

/// Record of a single review event, as seen when it happened.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ReviewLog {
    pub rating: Rating,
    /// State the card was in before this review.
    pub state: State,
    pub reviewed_at: i64,
    pub elapsed_days: f64,
    pub scheduled_days: f64,
}

impl ReviewLog {
    pub fn new(
        rating: Rating,
        state: State,
        reviewed_at: i64,
        elapsed_days: f64,
        scheduled_days: f64,
    ) -> Self {
        Self {
            rating,
            state,
            reviewed_at,
            elapsed_days,
            scheduled_days,
        }
    }

    pub fn reviewed_on(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.reviewed_at, 0)
    }
}
