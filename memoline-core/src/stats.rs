use crate::{Rating, ReviewLog};
use chrono::{Duration, NaiveDate};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Totals {
    pub total: u32,
    pub again: u32,
    pub hard: u32,
    pub good: u32,
    pub easy: u32,
}

impl Totals {
    pub fn record(&mut self, rating: Rating) {
        self.total += 1;
        match rating {
            Rating::Again => self.again += 1,
            Rating::Hard => self.hard += 1,
            Rating::Good => self.good += 1,
            Rating::Easy => self.easy += 1,
        }
    }

    /// Share of reviews that were not Again.
    pub fn recall_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.total - self.again) / f64::from(self.total)
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct StatsSummary {
    pub totals: Totals,
    /// Keyed by UTC calendar day.
    pub per_day: BTreeMap<NaiveDate, Totals>,
}

pub fn summarize(reviews: &[ReviewLog]) -> StatsSummary {
    let mut summary = StatsSummary::default();
    for r in reviews {
        summary.totals.record(r.rating);
        if let Some(at) = r.reviewed_on() {
            summary.per_day.entry(at.date_naive()).or_default().record(r.rating);
        }
    }
    summary
}

/// Consecutive days with at least one review, counting back from `today`.
pub fn daily_streak(reviews: &[ReviewLog], today: NaiveDate) -> u32 {
    let per_day = summarize(reviews).per_day;
    let mut streak = 0u32;
    let mut day = today;
    while per_day.get(&day).map(|t| t.total > 0).unwrap_or(false) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}
