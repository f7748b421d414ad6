//! Episode state: the player and how the episode ended

use serde::{Deserialize, Serialize};

use super::body::PhysicsBody;

/// Why an episode ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndCause {
    /// Touched a hazard or fell out of the level
    Dead,
    /// Ran out of time
    Timeout,
    /// Reached the finish
    Complete,
}

impl EndCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndCause::Dead => "dead",
            EndCause::Timeout => "timeout",
            EndCause::Complete => "complete",
        }
    }
}

/// The controlled player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub body: PhysicsBody,
    /// Simulated seconds since the episode started
    pub elapsed_time: f64,
    /// Progress score; rightward motion adds, leftward motion subtracts
    pub fitness: f64,
    /// Keys held across all running ticks (not used for scoring)
    pub press_count: u64,
}

impl PlayerState {
    pub fn new(body: PhysicsBody) -> Self {
        Self {
            body,
            elapsed_time: 0.0,
            fitness: 0.0,
            press_count: 0,
        }
    }
}

/// Terminal record; set at most once
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Termination {
    cause: Option<EndCause>,
}

impl Termination {
    #[inline]
    pub fn is_over(&self) -> bool {
        self.cause.is_some()
    }

    #[inline]
    pub fn cause(&self) -> Option<EndCause> {
        self.cause
    }

    /// Record the end of the episode. Returns false if it had already ended,
    /// in which case the first cause is kept.
    pub fn end(&mut self, cause: EndCause) -> bool {
        if self.cause.is_some() {
            return false;
        }
        self.cause = Some(cause);
        true
    }
}
