#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure navigation system that turns a planned tile into one primitive action.

use scout_core::{Action, Capabilities, Coord, Event, Facing, Pose, UsableItem};
use scout_world::AttractivenessMap;

/// Outcome of one navigation decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Decision {
    /// Action to submit this turn.
    pub action: Action,
    /// Side effect the map should record, if the action triggers one.
    pub event: Option<Event>,
}

impl Decision {
    /// Decision carrying an action without side effects.
    #[must_use]
    pub const fn act(action: Action) -> Self {
        Self {
            action,
            event: None,
        }
    }

    /// Decision that does nothing this turn.
    #[must_use]
    pub const fn idle() -> Self {
        Self::act(Action::NoOp)
    }
}

/// Stateless system converting "next tile to stand on" into a primitive action.
///
/// Every turn is evaluated from scratch: at most one rotation is issued per
/// turn, and interactions with the tile ahead only happen once the agent
/// faces it.
#[derive(Clone, Copy, Debug, Default)]
pub struct Navigator;

impl Navigator {
    /// Creates a new navigator.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Chooses the action that brings the agent at `pose` closer to `target`.
    #[must_use]
    pub fn decide(
        &self,
        map: &AttractivenessMap,
        pose: Pose,
        target: Option<Coord>,
        capabilities: &Capabilities,
    ) -> Decision {
        let decision = self.evaluate(map, pose, target, capabilities);
        tracing::trace!(
            position = ?pose.position,
            facing = ?pose.facing,
            target = ?target,
            action = ?decision.action,
            "navigation decided"
        );
        decision
    }

    fn evaluate(
        &self,
        map: &AttractivenessMap,
        pose: Pose,
        target: Option<Coord>,
        capabilities: &Capabilities,
    ) -> Decision {
        if map.tile_at(pose.position).item().is_some() {
            return Decision::act(Action::PickUp);
        }

        let Some(target) = target else {
            return Decision::idle();
        };
        if target == pose.position || target.chebyshev_distance(pose.position) > 1 {
            return Decision::idle();
        }

        let Some(target_facing) = Facing::between(pose.position, target) else {
            return Decision::idle();
        };
        if target_facing == pose.facing.left() {
            return Decision::act(Action::TurnLeft);
        }
        if target_facing != pose.facing {
            return Decision::act(Action::TurnRight);
        }

        if map.can_shoot_boulder(target, capabilities) {
            return Decision::act(Action::UseItem(UsableItem::LaserCharge));
        }
        if let Some(color) = map.key_for_gate(target, capabilities) {
            return Decision::act(Action::UseItem(UsableItem::Key(color)));
        }
        if map.can_use_teleporter(target) {
            return Decision {
                action: Action::MoveForward,
                event: Some(Event::TeleportTriggered {
                    from: pose.position,
                    endpoint: target,
                }),
            };
        }

        Decision::act(Action::MoveForward)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::{Material, Observation};

    fn open_field() -> AttractivenessMap {
        let mut map = AttractivenessMap::new();
        let observations: Vec<_> = (-2..=2)
            .flat_map(|y| (-2..=2).map(move |x| Observation::bare(Coord::new(x, y), Material::Grass)))
            .collect();
        map.absorb(&observations);
        map
    }

    #[test]
    fn turns_left_when_target_is_one_step_counter_clockwise() {
        let map = open_field();
        let pose = Pose::new(Coord::new(0, 0), Facing::East);

        let decision = Navigator::new().decide(&map, pose, Some(Coord::new(0, -1)), &Capabilities::none());

        assert_eq!(decision, Decision::act(Action::TurnLeft));
    }

    #[test]
    fn turns_right_for_clockwise_and_reverse_targets() {
        let map = open_field();
        let pose = Pose::new(Coord::new(0, 0), Facing::East);
        let navigator = Navigator::new();

        let clockwise = navigator.decide(&map, pose, Some(Coord::new(0, 1)), &Capabilities::none());
        let behind = navigator.decide(&map, pose, Some(Coord::new(-1, 0)), &Capabilities::none());

        assert_eq!(clockwise.action, Action::TurnRight);
        assert_eq!(behind.action, Action::TurnRight);
    }

    #[test]
    fn diagonal_target_is_ignored() {
        let map = open_field();
        let pose = Pose::new(Coord::new(0, 0), Facing::North);

        let decision = Navigator::new().decide(&map, pose, Some(Coord::new(1, -1)), &Capabilities::none());

        assert_eq!(decision, Decision::idle());
    }
}
