#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Per-turn explorer loop wiring map knowledge, planning and navigation together.

use scout_core::{Action, Capabilities, Event, Observation, Pose};
use scout_system_navigation::Navigator;
use scout_world::AttractivenessMap;

/// Everything the runtime reports to the explorer at the start of a turn.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnInput {
    /// Where the agent stands and which way it looks.
    pub pose: Pose,
    /// Tiles currently inside the agent's vision.
    pub observations: Vec<Observation>,
    /// Items currently gating interactions.
    pub capabilities: Capabilities,
}

/// Stateful explorer that keeps the map between turns.
#[derive(Clone, Debug, Default)]
pub struct Explorer {
    map: AttractivenessMap,
    navigator: Navigator,
    turn: u64,
}

impl Explorer {
    /// Creates an explorer that knows nothing about the world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the accumulated knowledge.
    #[must_use]
    pub const fn map(&self) -> &AttractivenessMap {
        &self.map
    }

    /// Number of turns taken so far.
    #[must_use]
    pub const fn turns_taken(&self) -> u64 {
        self.turn
    }

    /// Runs one turn and returns the action to submit.
    ///
    /// Side effects the decision triggers are appended to `out`.
    pub fn take_turn(&mut self, input: TurnInput, out: &mut Vec<Event>) -> Action {
        let TurnInput {
            pose,
            observations,
            capabilities,
        } = input;

        if self.map.has_pending_teleport() {
            self.map.settle_teleport(pose.position);
        }
        self.map.absorb(&observations);

        let target = self.map.plan_next_tile(pose.position, &capabilities);
        let decision = self
            .navigator
            .decide(&self.map, pose, target, &capabilities);

        if let Some(event) = decision.event {
            match event {
                Event::TeleportTriggered { from, endpoint } => {
                    self.map.use_teleporter(from, endpoint);
                }
            }
            out.push(event);
        }

        self.turn += 1;
        tracing::debug!(
            turn = self.turn,
            position = ?pose.position,
            facing = ?pose.facing,
            observed = observations.len(),
            target = ?target,
            action = ?decision.action,
            "explorer turn"
        );

        decision.action
    }
}
