//! Minimal stand-in for the game server, used to drive the explorer end to end.

use std::collections::BTreeMap;

use scout_core::{
    Action, Capabilities, Coord, Item, KeyColor, Material, Observation, Pose, UsableItem,
};

use crate::level::Level;

/// Result of applying one action to the sandbox.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Outcome {
    /// The agent rotated in place.
    Rotated,
    /// The agent stepped onto the tile ahead.
    Moved,
    /// The agent stepped onto a pad and arrived at its partner.
    Teleported,
    /// The agent picked up an item.
    Collected,
    /// A laser charge removed the boulder ahead.
    Cleared,
    /// A key opened the gate ahead.
    Unlocked,
    /// The action had no effect on the world.
    Rejected,
    /// The agent chose to do nothing.
    Idle,
}

#[derive(Clone, Debug, Default)]
struct Inventory {
    laser_charges: u32,
    keys: BTreeMap<KeyColor, u32>,
    stars: usize,
    cookies: usize,
}

/// Simulated world with square vision and simple movement rules.
#[derive(Clone, Debug)]
pub(crate) struct Sandbox {
    width: i32,
    height: i32,
    tiles: Vec<Observation>,
    teleporters: BTreeMap<Coord, Coord>,
    pose: Pose,
    vision_radius: i32,
    inventory: Inventory,
}

impl Sandbox {
    /// Places the agent at the level's start.
    pub(crate) fn new(level: &Level, vision_radius: u16) -> Self {
        Self {
            width: level.width,
            height: level.height,
            tiles: level.tiles.clone(),
            teleporters: level.teleporters.clone(),
            pose: level.start,
            vision_radius: i32::from(vision_radius),
            inventory: Inventory::default(),
        }
    }

    /// Where the agent stands and which way it looks.
    pub(crate) const fn pose(&self) -> Pose {
        self.pose
    }

    /// Number of stars picked up so far.
    pub(crate) const fn stars_collected(&self) -> usize {
        self.inventory.stars
    }

    /// Number of cookies picked up so far.
    pub(crate) const fn cookies_collected(&self) -> usize {
        self.inventory.cookies
    }

    /// Tiles inside the square vision window around the agent.
    ///
    /// Coordinates outside the level are reported as void.
    pub(crate) fn observe(&self) -> Vec<Observation> {
        let center = self.pose.position;
        let radius = self.vision_radius;
        let mut observations = Vec::new();
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                let coord = center.offset(dx, dy);
                let observation = self
                    .tile(coord)
                    .copied()
                    .unwrap_or_else(|| Observation::bare(coord, Material::Void));
                observations.push(observation);
            }
        }
        observations
    }

    /// Items the agent holds that gate interactions.
    pub(crate) fn capabilities(&self) -> Capabilities {
        let mut capabilities = Capabilities::none();
        if self.inventory.laser_charges > 0 {
            capabilities = capabilities.with_laser_charge();
        }
        for (&color, &count) in &self.inventory.keys {
            if count > 0 {
                capabilities = capabilities.with_key(color);
            }
        }
        capabilities
    }

    /// Applies one action submitted by the agent.
    pub(crate) fn apply(&mut self, action: Action) -> Outcome {
        let outcome = match action {
            Action::TurnLeft => {
                self.pose.facing = self.pose.facing.left();
                Outcome::Rotated
            }
            Action::TurnRight => {
                self.pose.facing = self.pose.facing.right();
                Outcome::Rotated
            }
            Action::MoveForward => self.move_forward(),
            Action::PickUp => self.pick_up(),
            Action::UseItem(UsableItem::LaserCharge) => self.fire_laser(),
            Action::UseItem(UsableItem::Key(color)) => self.unlock(color),
            Action::NoOp => Outcome::Idle,
        };

        match outcome {
            Outcome::Teleported | Outcome::Collected | Outcome::Cleared | Outcome::Unlocked => {
                tracing::info!(?action, ?outcome, position = ?self.pose.position, "sandbox event");
            }
            Outcome::Rejected => {
                tracing::info!(?action, position = ?self.pose.position, "action had no effect");
            }
            Outcome::Rotated | Outcome::Moved | Outcome::Idle => {}
        }

        outcome
    }

    fn move_forward(&mut self) -> Outcome {
        let ahead = self.pose.ahead();
        let Some(tile) = self.tile(ahead) else {
            return Outcome::Rejected;
        };
        if !tile.material.is_passable() || tile.occupant.is_some() {
            return Outcome::Rejected;
        }

        if let Some(&partner) = self.teleporters.get(&ahead) {
            self.pose.position = partner;
            return Outcome::Teleported;
        }
        self.pose.position = ahead;
        Outcome::Moved
    }

    fn pick_up(&mut self) -> Outcome {
        let position = self.pose.position;
        let Some(item) = self.tile_mut(position).and_then(|tile| tile.item.take()) else {
            return Outcome::Rejected;
        };

        match item {
            Item::Star => self.inventory.stars += 1,
            Item::Cookie => self.inventory.cookies += 1,
            Item::LaserCharge => self.inventory.laser_charges += 1,
            Item::Key(color) => *self.inventory.keys.entry(color).or_default() += 1,
        }
        Outcome::Collected
    }

    fn fire_laser(&mut self) -> Outcome {
        if self.inventory.laser_charges == 0 {
            return Outcome::Rejected;
        }
        let ahead = self.pose.ahead();
        let Some(tile) = self.tile_mut(ahead) else {
            return Outcome::Rejected;
        };
        if tile.occupant.take().is_none() {
            return Outcome::Rejected;
        }

        self.inventory.laser_charges -= 1;
        Outcome::Cleared
    }

    fn unlock(&mut self, color: KeyColor) -> Outcome {
        let Some(count) = self.inventory.keys.get_mut(&color).filter(|count| **count > 0) else {
            return Outcome::Rejected;
        };
        let ahead = self.pose.ahead();
        let slot = index(self.width, self.height, ahead);
        let Some(tile) = slot.and_then(|slot| self.tiles.get_mut(slot)) else {
            return Outcome::Rejected;
        };
        if tile.material != Material::Gate(color) {
            return Outcome::Rejected;
        }

        tile.material = Material::Grass;
        *count -= 1;
        Outcome::Unlocked
    }

    fn tile(&self, coord: Coord) -> Option<&Observation> {
        index(self.width, self.height, coord).and_then(|index| self.tiles.get(index))
    }

    fn tile_mut(&mut self, coord: Coord) -> Option<&mut Observation> {
        index(self.width, self.height, coord).and_then(|index| self.tiles.get_mut(index))
    }
}

fn index(width: i32, height: i32, coord: Coord) -> Option<usize> {
    if coord.x() >= width || coord.y() >= height {
        return None;
    }
    let x = usize::try_from(coord.x()).ok()?;
    let y = usize::try_from(coord.y()).ok()?;
    let width = usize::try_from(width).ok()?;
    Some(x + y * width)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scout_core::{Facing, Occupant};

    fn sandbox(rows: &[&str], facing: &str, vision: u16) -> Sandbox {
        let rows = rows
            .iter()
            .map(|row| format!("{row:?}"))
            .collect::<Vec<_>>()
            .join(", ");
        let level = Level::from_toml_str(&format!(
            "name = \"test\"\nfacing = \"{facing}\"\nrows = [{rows}]\n"
        ))
        .expect("test level should parse");
        Sandbox::new(&level, vision)
    }

    #[test]
    fn vision_pads_outside_with_void() {
        let sandbox = sandbox(&["@."], "East", 1);
        let observations = sandbox.observe();

        assert_eq!(observations.len(), 9);
        let north_west = observations[0];
        assert_eq!(north_west.coord, Coord::new(-1, -1));
        assert_eq!(north_west.material, Material::Void);
        assert_eq!(observations[4].coord, Coord::new(0, 0));
        assert_eq!(observations[4].material, Material::Grass);
        assert_eq!(observations[5].material, Material::Grass);
    }

    #[test]
    fn walls_and_boulders_block_movement() {
        let mut walled = sandbox(&["@#"], "East", 1);
        assert_eq!(walled.apply(Action::MoveForward), Outcome::Rejected);
        assert_eq!(walled.pose().position, Coord::new(0, 0));

        let mut blocked = sandbox(&["@o"], "East", 1);
        assert_eq!(blocked.apply(Action::MoveForward), Outcome::Rejected);

        let mut open = sandbox(&["@,"], "East", 1);
        assert_eq!(open.apply(Action::MoveForward), Outcome::Moved);
        assert_eq!(open.pose().position, Coord::new(1, 0));
    }

    #[test]
    fn rotations_update_facing() {
        let mut sandbox = sandbox(&["@"], "North", 0);

        assert_eq!(sandbox.apply(Action::TurnRight), Outcome::Rotated);
        assert_eq!(sandbox.pose().facing, Facing::East);
        let _ = sandbox.apply(Action::TurnLeft);
        let _ = sandbox.apply(Action::TurnLeft);
        assert_eq!(sandbox.pose().facing, Facing::West);
    }

    #[test]
    fn teleporter_moves_agent_to_partner() {
        let mut sandbox = sandbox(&["@5#5."], "East", 1);

        assert_eq!(sandbox.apply(Action::MoveForward), Outcome::Teleported);
        assert_eq!(sandbox.pose().position, Coord::new(3, 0));
    }

    #[test]
    fn pick_up_fills_inventory() {
        let mut sandbox = sandbox(&["@*l"], "East", 1);

        assert_eq!(sandbox.apply(Action::PickUp), Outcome::Rejected);
        let _ = sandbox.apply(Action::MoveForward);
        assert_eq!(sandbox.apply(Action::PickUp), Outcome::Collected);
        assert_eq!(sandbox.stars_collected(), 1);
        assert_eq!(sandbox.observe()[4].item, None);

        let _ = sandbox.apply(Action::MoveForward);
        let _ = sandbox.apply(Action::PickUp);
        assert!(sandbox.capabilities().has_laser_charge());
    }

    #[test]
    fn laser_clears_boulder_and_consumes_charge() {
        let mut sandbox = sandbox(&["l@oo"], "West", 1);
        let _ = sandbox.apply(Action::MoveForward);
        let _ = sandbox.apply(Action::PickUp);
        let _ = sandbox.apply(Action::TurnRight);
        let _ = sandbox.apply(Action::TurnRight);
        let _ = sandbox.apply(Action::MoveForward);

        assert_eq!(
            sandbox.apply(Action::UseItem(UsableItem::LaserCharge)),
            Outcome::Cleared
        );
        assert!(!sandbox.capabilities().has_laser_charge());
        assert_eq!(sandbox.tile(Coord::new(2, 0)).and_then(|tile| tile.occupant), None);

        let _ = sandbox.apply(Action::MoveForward);
        assert_eq!(
            sandbox.apply(Action::UseItem(UsableItem::LaserCharge)),
            Outcome::Rejected
        );
        assert_eq!(
            sandbox.tile(Coord::new(3, 0)).and_then(|tile| tile.occupant),
            Some(Occupant::Boulder)
        );
    }

    #[test]
    fn key_opens_only_matching_gate() {
        let mut sandbox = sandbox(&["b@GB"], "West", 1);
        let _ = sandbox.apply(Action::MoveForward);
        let _ = sandbox.apply(Action::PickUp);
        let _ = sandbox.apply(Action::TurnLeft);
        let _ = sandbox.apply(Action::TurnLeft);
        let _ = sandbox.apply(Action::MoveForward);

        assert_eq!(
            sandbox.apply(Action::UseItem(UsableItem::Key(KeyColor::Blue))),
            Outcome::Rejected,
            "blue key must not open the green gate"
        );
        assert!(sandbox.capabilities().holds_key(KeyColor::Blue));
    }

    #[test]
    fn key_is_consumed_by_its_gate() {
        let mut sandbox = sandbox(&["@bB."], "East", 1);
        let _ = sandbox.apply(Action::MoveForward);
        let _ = sandbox.apply(Action::PickUp);

        assert_eq!(
            sandbox.apply(Action::UseItem(UsableItem::Key(KeyColor::Blue))),
            Outcome::Unlocked
        );
        assert!(!sandbox.capabilities().holds_key(KeyColor::Blue));
        assert_eq!(sandbox.apply(Action::MoveForward), Outcome::Moved);
        assert_eq!(sandbox.pose().position, Coord::new(2, 0));
    }
}
