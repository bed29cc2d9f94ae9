//! Source weights seeded into the value field.
//!
//! Lower weights are more attractive: the relaxation adds one per step, and the
//! descent walks toward smaller values, so the agent heads for whichever source
//! minimises `weight + distance`. The frontier weight is larger than every item
//! weight, so a known item wins over exploration unless it is much further away.

use scout_core::Item;

/// Weight of a star, the most valuable pickup.
pub const STAR: u32 = 1;

/// Weight of a key of any colour.
pub const KEY: u32 = 10;

/// Weight of a laser charge.
pub const LASER_CHARGE: u32 = 50;

/// Weight of a boulder the agent can currently destroy.
pub const BOULDER: u32 = 60;

/// Weight of a cookie.
pub const COOKIE: u32 = 80;

/// Weight of unexplored or boundary tiles.
pub const FRONTIER: u32 = 100;

/// Weight of a teleporter pad that was never used.
pub const TELEPORTER: u32 = 150;

/// Field value marking the planning origin so it is never re-entered.
pub const POISON: u32 = u32::MAX;

/// Weight assigned to a tile carrying the provided item.
#[must_use]
pub const fn item(item: Item) -> u32 {
    match item {
        Item::Star => STAR,
        Item::Key(_) => KEY,
        Item::LaserCharge => LASER_CHARGE,
        Item::Cookie => COOKIE,
    }
}
