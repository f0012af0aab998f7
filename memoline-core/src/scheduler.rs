use chrono::{DateTime, Utc};
use tracing::debug;

use crate::math::{
    elapsed_days, initial_difficulty, initial_stability, interval, retrievability,
    update_difficulty, update_stability_learning, update_stability_review,
};
use crate::{Card, CoreError, Parameters, Rating, ReviewLog, State, SECONDS_PER_DAY};

pub struct ScheduleOutcome {
    pub updated_card: Card,
    pub review: ReviewLog,
}

/// What each rating would do to a card, without committing any of it.
pub struct Preview {
    pub again: ScheduleOutcome,
    pub hard: ScheduleOutcome,
    pub good: ScheduleOutcome,
    pub easy: ScheduleOutcome,
}

impl Preview {
    pub fn get(&self, rating: Rating) -> &ScheduleOutcome {
        match rating {
            Rating::Again => &self.again,
            Rating::Hard => &self.hard,
            Rating::Good => &self.good,
            Rating::Easy => &self.easy,
        }
    }
}

enum Next {
    /// Short step, in seconds.
    Step(i64),
    /// Whole days.
    Days(f64),
}

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    params: Parameters,
}

impl Scheduler {
    pub fn new(params: Parameters) -> Result<Self, CoreError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Applies one review at `now` (epoch seconds).
    pub fn review(&self, card: &Card, rating: Rating, now: i64) -> ScheduleOutcome {
        let p = &self.params;
        let elapsed = match card.state {
            State::New => 0.0,
            _ => elapsed_days(card.last_review, now),
        };

        let mut lapses = card.lapses;
        let (state, stability, difficulty, next) = match (card.state, rating) {
            (State::New, Rating::Easy) => (
                State::Review,
                initial_stability(p, rating),
                initial_difficulty(p, rating),
                Next::Days(p.easy_interval),
            ),
            (State::New, _) => (
                State::Learning,
                initial_stability(p, rating),
                initial_difficulty(p, rating),
                Next::Step(p.learning_step_secs),
            ),
            (State::Learning, Rating::Again) => (
                State::Learning,
                initial_stability(p, rating),
                update_difficulty(p, card.difficulty, rating),
                Next::Step(p.learning_step_secs),
            ),
            (State::Learning, _) => (
                State::Review,
                update_stability_learning(p, card.stability, rating),
                update_difficulty(p, card.difficulty, rating),
                Next::Days(if rating == Rating::Easy {
                    p.easy_interval
                } else {
                    p.graduating_interval
                }),
            ),
            (State::Review, Rating::Again) => {
                lapses = lapses.saturating_add(1);
                let r = retrievability(p, elapsed, card.stability);
                (
                    State::Relearning,
                    update_stability_review(p, card.stability, card.difficulty, rating, r),
                    update_difficulty(p, card.difficulty, rating),
                    Next::Step(p.relearning_step_secs),
                )
            }
            (State::Review, _) => {
                let r = retrievability(p, elapsed, card.stability);
                let stability =
                    update_stability_review(p, card.stability, card.difficulty, rating, r);
                (
                    State::Review,
                    stability,
                    update_difficulty(p, card.difficulty, rating),
                    Next::Days(interval(p, stability, p.desired_retention)),
                )
            }
            (State::Relearning, Rating::Again) => {
                lapses = lapses.saturating_add(1);
                (
                    State::Relearning,
                    initial_stability(p, rating),
                    update_difficulty(p, card.difficulty, rating),
                    Next::Step(p.relearning_step_secs),
                )
            }
            (State::Relearning, _) => {
                let stability = update_stability_learning(p, card.stability, rating);
                (
                    State::Review,
                    stability,
                    update_difficulty(p, card.difficulty, rating),
                    Next::Days(stability.round().max(1.0)),
                )
            }
        };

        let (scheduled_days, due) = match next {
            Next::Step(secs) => (
                secs as f64 / SECONDS_PER_DAY as f64,
                now.saturating_add(secs),
            ),
            // `as` saturates, so huge intervals pin `due` at the far future.
            Next::Days(days) => (
                days,
                now.saturating_add((days * SECONDS_PER_DAY as f64).round() as i64),
            ),
        };

        let updated_card = Card {
            due,
            stability,
            difficulty,
            elapsed_days: elapsed,
            scheduled_days,
            reps: card.reps.saturating_add(1),
            lapses,
            state,
            last_review: now,
        };
        debug!(
            from = ?card.state,
            to = ?updated_card.state,
            ?rating,
            stability,
            scheduled_days,
            "card reviewed"
        );

        let review = ReviewLog::new(rating, card.state, now, elapsed, scheduled_days);
        ScheduleOutcome {
            updated_card,
            review,
        }
    }

    pub fn next_card_state(&self, card: &Card, rating: Rating, now: i64) -> Card {
        self.review(card, rating, now).updated_card
    }

    pub fn review_at(&self, card: &Card, rating: Rating, at: DateTime<Utc>) -> ScheduleOutcome {
        self.review(card, rating, at.timestamp())
    }

    pub fn preview(&self, card: &Card, now: i64) -> Preview {
        Preview {
            again: self.review(card, Rating::Again, now),
            hard: self.review(card, Rating::Hard, now),
            good: self.review(card, Rating::Good, now),
            easy: self.review(card, Rating::Easy, now),
        }
    }

    /// Recall probability at `now`. A card never reviewed has nothing to
    /// recall, so it reports 0.
    pub fn current_retrievability(&self, card: &Card, now: i64) -> f64 {
        if card.is_new() {
            return 0.0;
        }
        retrievability(
            &self.params,
            elapsed_days(card.last_review, now),
            card.stability,
        )
    }
}

pub fn init_card() -> Card {
    Card::new()
}

/// Transition with the default calibration.
pub fn next_card_state(card: Card, rating: Rating, now: i64) -> Card {
    Scheduler::default().next_card_state(&card, rating, now)
}
