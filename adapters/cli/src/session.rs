//! Turn loop driving the explorer through a sandbox level.

use std::fmt;

use scout_core::{Action, Event};
use scout_system_explorer::{Explorer, TurnInput};

use crate::{
    level::Level,
    sandbox::{Outcome, Sandbox},
};

/// Consecutive idle turns after which the session gives up.
const IDLE_LIMIT: u32 = 3;

/// Limits applied to one session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SessionConfig {
    /// Maximum number of turns to simulate.
    pub(crate) max_turns: u64,
    /// Radius of the square vision window.
    pub(crate) vision_radius: u16,
}

/// Why a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum StopReason {
    /// Every star on the level was collected.
    AllStarsCollected,
    /// The turn limit was reached.
    TurnLimit,
    /// The explorer stopped acting.
    Idle,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::AllStarsCollected => "all stars collected",
            Self::TurnLimit => "turn limit reached",
            Self::Idle => "explorer went idle",
        };
        f.write_str(text)
    }
}

/// Summary of a finished session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct SessionReport {
    /// Turns simulated.
    pub(crate) turns: u64,
    /// Stars picked up.
    pub(crate) stars: usize,
    /// Stars placed on the level.
    pub(crate) stars_total: usize,
    /// Cookies picked up.
    pub(crate) cookies: usize,
    /// Teleports the explorer triggered.
    pub(crate) teleports: usize,
    /// Actions the sandbox rejected.
    pub(crate) rejected: usize,
    /// Why the session ended.
    pub(crate) stop: StopReason,
}

/// Runs the explorer on `level` until it finishes, stalls or runs out of turns.
pub(crate) fn run(level: &Level, config: SessionConfig) -> SessionReport {
    let mut sandbox = Sandbox::new(level, config.vision_radius);
    let mut explorer = Explorer::new();
    let mut events = Vec::new();
    let stars_total = level.star_count();
    let mut idle_streak = 0;
    let mut teleports = 0;
    let mut rejected = 0;

    let stop = loop {
        if stars_total > 0 && sandbox.stars_collected() == stars_total {
            break StopReason::AllStarsCollected;
        }
        if explorer.turns_taken() >= config.max_turns {
            break StopReason::TurnLimit;
        }

        let input = TurnInput {
            pose: sandbox.pose(),
            observations: sandbox.observe(),
            capabilities: sandbox.capabilities(),
        };
        let action = explorer.take_turn(input, &mut events);
        for event in events.drain(..) {
            match event {
                Event::TeleportTriggered { .. } => teleports += 1,
            }
        }

        match sandbox.apply(action) {
            Outcome::Rejected => rejected += 1,
            Outcome::Idle
            | Outcome::Rotated
            | Outcome::Moved
            | Outcome::Teleported
            | Outcome::Collected
            | Outcome::Cleared
            | Outcome::Unlocked => {}
        }

        idle_streak = if action == Action::NoOp {
            idle_streak + 1
        } else {
            0
        };
        if idle_streak >= IDLE_LIMIT {
            break StopReason::Idle;
        }
    };

    let report = SessionReport {
        turns: explorer.turns_taken(),
        stars: sandbox.stars_collected(),
        stars_total,
        cookies: sandbox.cookies_collected(),
        teleports,
        rejected,
        stop,
    };
    tracing::info!(
        level = %level.name,
        turns = report.turns,
        stars = report.stars,
        stop = %report.stop,
        "session finished"
    );
    report
}
