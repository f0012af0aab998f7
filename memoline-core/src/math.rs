//! Memory-decay model.
//!
//! Stateless functions over a [`Parameters`] calibration. All arithmetic is
//! `f64` so results agree bit-for-bit with any other IEEE-754 double
//! implementation fed the same parameters.

use tracing::warn;

use crate::{Parameters, Rating, SECONDS_PER_DAY};

pub fn clamp_difficulty(p: &Parameters, d: f64) -> f64 {
    d.clamp(p.min_difficulty, p.max_difficulty)
}

/// Days between the last review and `now`; 0 for a card never reviewed.
pub fn elapsed_days(last_review: i64, now: i64) -> f64 {
    if last_review == 0 {
        return 0.0;
    }
    let span = now.saturating_sub(last_review);
    if span < 0 {
        warn!(last_review, now, "review timestamp precedes last review, treating as same instant");
        return 0.0;
    }
    span as f64 / SECONDS_PER_DAY as f64
}

/// Probability of recall `elapsed_days` after a review, given `stability`.
pub fn retrievability(p: &Parameters, elapsed_days: f64, stability: f64) -> f64 {
    let s = stability.max(p.min_stability);
    let t = elapsed_days.max(0.0);
    (1.0 + p.factor * t / s).powf(p.decay)
}

/// Days until recall probability falls to `desired_retention`.
///
/// Always a whole number in `[1, maximum_interval]`; it stays `f64` because
/// it lands directly in `Card::scheduled_days`.
pub fn interval(p: &Parameters, stability: f64, desired_retention: f64) -> f64 {
    let s = stability.max(p.min_stability);
    let days = s / p.factor * (desired_retention.powf(1.0 / p.decay) - 1.0);
    days.round().clamp(1.0, p.maximum_interval)
}

pub fn initial_stability(p: &Parameters, rating: Rating) -> f64 {
    p.weights[usize::from(rating.ordinal())].max(p.min_stability)
}

/// Seed difficulty for a first exposure. Again seeds like Hard.
pub fn initial_difficulty(p: &Parameters, rating: Rating) -> f64 {
    let w = &p.weights;
    let seeded = rating.max(Rating::Hard);
    let g = f64::from(seeded.ordinal());
    clamp_difficulty(p, w[4] - w[5] * (g - 2.0))
}

pub fn update_difficulty(p: &Parameters, current: f64, rating: Rating) -> f64 {
    let w = &p.weights;
    clamp_difficulty(p, current - w[6] * (rating.scale() - 2.5))
}

/// Stability after a review in Learning or Relearning.
pub fn update_stability_learning(p: &Parameters, stability: f64, rating: Rating) -> f64 {
    if rating == Rating::Again {
        return initial_stability(p, rating);
    }
    let w = &p.weights;
    let g = f64::from(rating.ordinal());
    (stability * f64::exp(w[8] * (g - 3.0 + w[9]))).max(p.min_stability)
}

/// Stability after a review in the Review state. `r` is the retrievability
/// at review time, computed from the stability before this review.
pub fn update_stability_review(
    p: &Parameters,
    stability: f64,
    difficulty: f64,
    rating: Rating,
    r: f64,
) -> f64 {
    let w = &p.weights;
    let s = stability.max(p.min_stability);
    let d = difficulty;
    let next = match rating {
        Rating::Again => {
            w[10] * d.powf(-w[11]) * ((s + 1.0).powf(w[12]) - 1.0) * f64::exp(w[13] * (1.0 - r))
        }
        // Hard and Good share one growth curve; only Easy gets a bonus.
        Rating::Hard | Rating::Good | Rating::Easy => {
            let growth = f64::exp(w[14])
                * (11.0 - d)
                * s.powf(-w[15])
                * (f64::exp((1.0 - r) * w[16]) - 1.0);
            let next = s * (1.0 + growth);
            if rating == Rating::Easy {
                next * p.easy_bonus
            } else {
                next
            }
        }
    };
    next.max(p.min_stability)
}
