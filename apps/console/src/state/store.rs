//! # Store State
//!
//! Owns the live `AppState` and publishes every applied mutation.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Store Dispatch                                       │
//! │                                                                         │
//! │  handler ──► dispatch(action)                                          │
//! │                   │                                                     │
//! │                   ▼                                                     │
//! │          reduce(&state, &action, clock.today())                        │
//! │                   │                                                     │
//! │       ┌───────────┼─────────────────────┐                              │
//! │       ▼           ▼                     ▼                               │
//! │    Applied     Unchanged           Err(CoreError)                      │
//! │       │           │                     │                               │
//! │  replace state  keep state          keep state                         │
//! │  notify all     (no publish)        (no publish)                       │
//! │  listeners                                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};
use valeo_core::{reduce, Action, AppState, CoreResult, Outcome, Points};

use super::config::ConfigState;

// =============================================================================
// Clock
// =============================================================================

/// Source of the calendar date stamped on new referrals and ledger entries.
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Current UTC date.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Utc::now().date_naive()
    }
}

/// Always the same date. Used by tests and `--today`.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

// =============================================================================
// Store State
// =============================================================================

/// Handle returned by [`StoreState::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&AppState, &Action)>;

/// The single owner of the app state.
pub struct StoreState {
    state: AppState,
    clock: Box<dyn Clock>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl StoreState {
    pub fn new(initial: AppState, clock: impl Clock + 'static) -> Self {
        StoreState {
            state: initial,
            clock: Box::new(clock),
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Seeds the demo store with the configured user and rules.
    pub fn from_config(config: &ConfigState, clock: impl Clock + 'static) -> Self {
        let initial = AppState::seeded_with(
            &config.user_name,
            Points::new(config.starting_points),
            config.reward_rules(),
        );
        Self::new(initial, clock)
    }

    /// Current snapshot.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// Runs `action` through the reducer.
    ///
    /// On `Applied` the new state replaces the old one and every listener is
    /// called once, in subscription order. Rejections leave the state and
    /// listeners untouched.
    pub fn dispatch(&mut self, action: Action) -> CoreResult<Outcome> {
        debug!(action = action.name(), "Dispatching");

        let transition = match reduce(&self.state, &action, self.clock.today()) {
            Ok(t) => t,
            Err(e) => {
                warn!(action = action.name(), error = %e, "Action rejected");
                return Err(e);
            }
        };

        let outcome = transition.outcome;
        match outcome {
            Outcome::Applied => {
                self.state = transition.state;
                info!(
                    action = action.name(),
                    points = self.state.user.points.value(),
                    "State updated"
                );
                for (_, listener) in self.listeners.iter_mut() {
                    listener(&self.state, &action);
                }
            }
            Outcome::Unchanged(reason) => {
                debug!(action = action.name(), ?reason, "No change");
            }
        }

        Ok(outcome)
    }

    /// Registers a callback for every applied mutation.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&AppState, &Action) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns false when `id` was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl std::fmt::Debug for StoreState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreState")
            .field("state", &self.state)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
