use serde::{Deserialize, Serialize};

use crate::{
    CoreError, DEFAULT_DIFFICULTY, MAX_DIFFICULTY, MIN_DIFFICULTY, MIN_STABILITY, SECONDS_PER_DAY,
};

pub const WEIGHT_COUNT: usize = 17;

/// Calibration weights `w[0]..w[16]`.
///
/// `w[0..4]` are the initial stabilities for Again..Easy, indexed by rating
/// ordinal. `w[7]` is unused. `w[13]` is negative so the failure term shrinks
/// stability harder the less retrievable the item was when it lapsed.
pub const DEFAULT_WEIGHTS: [f64; WEIGHT_COUNT] = [
    0.4, 0.6, 2.4, 5.8, // initial stability
    4.93, 0.94, 0.86, 0.01, // difficulty
    0.5166, 0.6621, // learning-phase stability
    2.18, 0.05, 0.34, -1.26, // review failure
    1.49, 0.14, 0.94, // review success
];

pub const FACTOR: f64 = 19.0 / 81.0;
pub const DECAY: f64 = -0.5;

pub const DESIRED_RETENTION: f64 = 0.9;
pub const EASY_BONUS: f64 = 1.3;

/// Days.
pub const EASY_INTERVAL: f64 = 4.0;
pub const GRADUATING_INTERVAL: f64 = 1.0;
pub const MAXIMUM_INTERVAL: f64 = 36_500.0;

pub const LEARNING_STEP_SECONDS: i64 = 600;
pub const RELEARNING_STEP_SECONDS: i64 = 600;
pub const LEARNING_STEP_DAYS: f64 = LEARNING_STEP_SECONDS as f64 / SECONDS_PER_DAY as f64;
pub const RELEARNING_STEP_DAYS: f64 = RELEARNING_STEP_SECONDS as f64 / SECONDS_PER_DAY as f64;

/// Everything two schedulers must share to agree on outcomes.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Parameters {
    pub weights: [f64; WEIGHT_COUNT],
    pub factor: f64,
    pub decay: f64,
    pub min_stability: f64,
    pub min_difficulty: f64,
    pub max_difficulty: f64,
    pub default_difficulty: f64,
    pub easy_interval: f64,
    pub graduating_interval: f64,
    pub maximum_interval: f64,
    pub learning_step_secs: i64,
    pub relearning_step_secs: i64,
    pub desired_retention: f64,
    pub easy_bonus: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            factor: FACTOR,
            decay: DECAY,
            min_stability: MIN_STABILITY,
            min_difficulty: MIN_DIFFICULTY,
            max_difficulty: MAX_DIFFICULTY,
            default_difficulty: DEFAULT_DIFFICULTY,
            easy_interval: EASY_INTERVAL,
            graduating_interval: GRADUATING_INTERVAL,
            maximum_interval: MAXIMUM_INTERVAL,
            learning_step_secs: LEARNING_STEP_SECONDS,
            relearning_step_secs: RELEARNING_STEP_SECONDS,
            desired_retention: DESIRED_RETENTION,
            easy_bonus: EASY_BONUS,
        }
    }
}

impl Parameters {
    /// Parses a calibration file. Absent fields keep their defaults.
    pub fn from_json(s: &str) -> Result<Self, CoreError> {
        let params: Parameters = serde_json::from_str(s)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        let scalars = [
            self.factor,
            self.decay,
            self.min_stability,
            self.min_difficulty,
            self.max_difficulty,
            self.default_difficulty,
            self.easy_interval,
            self.graduating_interval,
            self.maximum_interval,
            self.desired_retention,
            self.easy_bonus,
        ];
        if self.weights.iter().chain(scalars.iter()).any(|x| !x.is_finite()) {
            return Err(CoreError::InvalidParameters("non-finite value"));
        }
        if self.factor <= 0.0 {
            return Err(CoreError::InvalidParameters("factor must be positive"));
        }
        if self.decay >= 0.0 {
            return Err(CoreError::InvalidParameters("decay must be negative"));
        }
        if self.desired_retention <= 0.0 || self.desired_retention >= 1.0 {
            return Err(CoreError::InvalidParameters(
                "desired retention must be in (0, 1)",
            ));
        }
        if self.min_stability <= 0.0 {
            return Err(CoreError::InvalidParameters(
                "minimum stability must be positive",
            ));
        }
        if self.min_difficulty <= 0.0 {
            return Err(CoreError::InvalidParameters(
                "minimum difficulty must be positive",
            ));
        }
        // The review growth term scales with (11 - difficulty).
        if self.max_difficulty > 11.0 {
            return Err(CoreError::InvalidParameters("maximum difficulty above 11"));
        }
        if self.min_difficulty >= self.max_difficulty {
            return Err(CoreError::InvalidParameters("empty difficulty range"));
        }
        if self.default_difficulty < self.min_difficulty
            || self.default_difficulty > self.max_difficulty
        {
            return Err(CoreError::InvalidParameters(
                "default difficulty outside difficulty range",
            ));
        }
        if self.maximum_interval < 1.0 {
            return Err(CoreError::InvalidParameters(
                "maximum interval must be at least one day",
            ));
        }
        if self.easy_interval <= 0.0 || self.graduating_interval <= 0.0 {
            return Err(CoreError::InvalidParameters(
                "graduation intervals must be positive",
            ));
        }
        if self.learning_step_secs <= 0 || self.relearning_step_secs <= 0 {
            return Err(CoreError::InvalidParameters(
                "learning steps must be positive",
            ));
        }
        if self.easy_bonus < 1.0 {
            return Err(CoreError::InvalidParameters("easy bonus below 1"));
        }
        Ok(())
    }

    pub fn learning_step_days(&self) -> f64 {
        self.learning_step_secs as f64 / SECONDS_PER_DAY as f64
    }

    pub fn relearning_step_days(&self) -> f64 {
        self.relearning_step_secs as f64 / SECONDS_PER_DAY as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Parameters::default().validate().is_ok());
    }

    #[test]
    fn step_days_match_constants() {
        let p = Parameters::default();
        assert_eq!(p.learning_step_days(), LEARNING_STEP_DAYS);
        assert_eq!(p.relearning_step_days(), RELEARNING_STEP_DAYS);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let p = Parameters::from_json(r#"{ "desired_retention": 0.85 }"#).unwrap();
        assert_eq!(p.desired_retention, 0.85);
        assert_eq!(p.weights, DEFAULT_WEIGHTS);
        assert_eq!(p.easy_interval, EASY_INTERVAL);
    }

    #[test]
    fn rejects_bad_retention() {
        let err = Parameters::from_json(r#"{ "desired_retention": 1.0 }"#).unwrap_err();
        assert!(matches!(err, CoreError::InvalidParameters(_)));
    }

    #[test]
    fn rejects_positive_decay() {
        let p = Parameters {
            decay: 0.5,
            ..Parameters::default()
        };
        assert!(p.validate().is_err());
    }

    #[test]
    fn rejects_unsafe_difficulty_range() {
        let zero_floor = Parameters {
            min_difficulty: 0.0,
            ..Parameters::default()
        };
        assert!(zero_floor.validate().is_err());

        let past_growth_pivot = Parameters {
            max_difficulty: 12.0,
            ..Parameters::default()
        };
        assert!(past_growth_pivot.validate().is_err());

        let widest = Parameters {
            min_difficulty: 0.5,
            max_difficulty: 11.0,
            ..Parameters::default()
        };
        assert!(widest.validate().is_ok());
    }

    #[test]
    fn rejects_malformed_json() {
        let err = Parameters::from_json("{ weights: ").unwrap_err();
        assert!(matches!(err, CoreError::Config(_)));
    }

    #[test]
    fn rejects_short_weight_vector() {
        assert!(Parameters::from_json(r#"{ "weights": [1.0, 2.0] }"#).is_err());
    }
}
