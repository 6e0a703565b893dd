//! Study mode: prompt a region name, score clicks, repeat.
//!
//! A round visits every drawable region once in random order. Correct
//! guesses are highlighted and locked; wrong guesses are highlighted but
//! stay clickable. When the last target is found the round completes and,
//! unless disabled, a new round starts after [`RESTART_DELAY`].
//!
//! There is no timer thread: the pending restart is a deadline that the
//! owner polls with [`QuizEngine::tick`]. Canceling it is just dropping the
//! deadline.

use std::collections::HashSet;
use std::time::Duration;

use rand::Rng;
use rand::SeedableRng;
use rand::rngs::StdRng;
use web_time::Instant;

use crate::constants::quiz::RESTART_DELAY;
use crate::constants::style::{CORRECT_FILL, CORRECT_STROKE, INCORRECT_FILL, INCORRECT_STROKE};
use crate::model::{Region, RegionId};
use crate::store::RegionStore;

/// Uniform in-place Fisher–Yates shuffle.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Where the quiz stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// No round started (setup mode).
    Idle,
    /// Waiting for the current target to be clicked.
    InRound,
    /// Every target found; a restart may be pending.
    RoundComplete,
}

/// Result of a click in study mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Nothing changed: region already solved, unknown, or no round running.
    Ignored,
    /// The clicked region was the target.
    Correct { name: String },
    /// The clicked region was not the target.
    Incorrect { name: String },
    /// The clicked region was the last target of the round.
    RoundComplete { name: String },
}

/// Randomized target ordering and progress tracking.
#[derive(Debug, Clone)]
pub struct QuizEngine {
    target_order: Vec<RegionId>,
    current_index: usize,
    completed: HashSet<RegionId>,
    phase: QuizPhase,
    /// Deadline of the pending automatic restart.
    restart_at: Option<Instant>,
    restart_delay: Duration,
    auto_restart: bool,
    rng: StdRng,
}

impl QuizEngine {
    pub fn new() -> Self {
        Self::with_rng(crate::rng::fresh_rng())
    }

    /// Create an engine with a deterministic shuffle sequence.
    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    fn with_rng(rng: StdRng) -> Self {
        Self {
            target_order: Vec::new(),
            current_index: 0,
            completed: HashSet::new(),
            phase: QuizPhase::Idle,
            restart_at: None,
            restart_delay: RESTART_DELAY,
            auto_restart: true,
            rng,
        }
    }

    /// Set the delay between round completion and the automatic restart.
    pub fn with_restart_delay(mut self, delay: Duration) -> Self {
        self.restart_delay = delay;
        self
    }

    /// Enable or disable the automatic restart.
    pub fn with_auto_restart(mut self, enabled: bool) -> Self {
        self.auto_restart = enabled;
        self
    }

    pub fn phase(&self) -> QuizPhase {
        self.phase
    }

    pub fn target_order(&self) -> &[RegionId] {
        &self.target_order
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Regions solved in this round.
    pub fn completed(&self) -> &HashSet<RegionId> {
        &self.completed
    }

    /// `(solved, total)` for this round.
    pub fn progress(&self) -> (usize, usize) {
        (self.completed.len(), self.target_order.len())
    }

    /// When the pending restart fires, if one is scheduled.
    pub fn restart_pending(&self) -> Option<Instant> {
        self.restart_at
    }

    /// Start a fresh round over all drawable regions in `store`.
    ///
    /// Clears every display override. With no drawable regions the round
    /// is complete immediately and no restart is scheduled.
    pub fn start_round(&mut self, store: &mut RegionStore) -> QuizPhase {
        let mut order = store.polygon_ids();
        shuffle(&mut order, &mut self.rng);

        self.target_order = order;
        self.current_index = 0;
        self.completed.clear();
        self.restart_at = None;
        store.clear_all_overrides();

        self.phase = if self.target_order.is_empty() {
            log::info!("Quiz round has no regions to ask for");
            QuizPhase::RoundComplete
        } else {
            log::info!("Quiz round started with {} regions", self.target_order.len());
            QuizPhase::InRound
        };
        self.phase
    }

    /// Id of the region the user is asked to find.
    pub fn current_target_id(&self) -> Option<&RegionId> {
        if self.phase != QuizPhase::InRound {
            return None;
        }
        self.target_order.get(self.current_index)
    }

    /// The region the user is asked to find.
    pub fn current_target<'a>(&self, store: &'a RegionStore) -> Option<&'a Region> {
        self.current_target_id().and_then(|id| store.get(id))
    }

    /// Score a click on region `id`, scheduling a restart relative to now.
    pub fn submit_guess(&mut self, store: &mut RegionStore, id: &RegionId) -> GuessOutcome {
        self.submit_guess_at(store, id, Instant::now())
    }

    /// Score a click on region `id` at time `now`.
    pub fn submit_guess_at(
        &mut self,
        store: &mut RegionStore,
        id: &RegionId,
        now: Instant,
    ) -> GuessOutcome {
        if self.completed.contains(id) {
            return GuessOutcome::Ignored;
        }
        let Some(target) = self.current_target_id().cloned() else {
            return GuessOutcome::Ignored;
        };
        let Some(name) = store.get(id).map(|r| r.name.clone()) else {
            return GuessOutcome::Ignored;
        };

        if *id != target {
            log::debug!("Wrong guess: {:?}", name);
            store.set_override(id, Some(INCORRECT_FILL), Some(INCORRECT_STROKE), true);
            return GuessOutcome::Incorrect { name };
        }

        // Stale wrong-guess highlights go away once the target is found
        store.clear_overrides_except(&self.completed);
        store.set_override(id, Some(CORRECT_FILL), Some(CORRECT_STROKE), true);
        self.completed.insert(target);
        self.current_index += 1;

        if self.current_index < self.target_order.len() {
            log::debug!("Correct: {:?} ({}/{})", name, self.current_index, self.target_order.len());
            return GuessOutcome::Correct { name };
        }

        self.phase = QuizPhase::RoundComplete;
        if self.auto_restart {
            self.restart_at = Some(now + self.restart_delay);
        }
        log::info!("Quiz round complete ({} regions)", self.target_order.len());
        GuessOutcome::RoundComplete { name }
    }

    /// Fire the pending restart if its deadline has passed.
    ///
    /// Returns true if a new round was started.
    pub fn tick(&mut self, store: &mut RegionStore, now: Instant) -> bool {
        match self.restart_at {
            Some(deadline) if now >= deadline => {
                self.start_round(store);
                true
            }
            _ => false,
        }
    }

    /// Drop the pending restart, if any.
    pub fn cancel_restart(&mut self) {
        if self.restart_at.take().is_some() {
            log::debug!("Pending quiz restart cancelled");
        }
    }

    /// Leave study mode: back to idle with no pending restart.
    pub fn stop(&mut self) {
        self.cancel_restart();
        self.target_order.clear();
        self.completed.clear();
        self.current_index = 0;
        self.phase = QuizPhase::Idle;
    }
}

impl Default for QuizEngine {
    fn default() -> Self {
        Self::new()
    }
}
