//! Deterministic combat formulas.
//!
//! Attack *resolution* (range checks, AP economy, death handling) lives in
//! [`crate::engine`]; this module is only the pure math the resolver and the
//! enemy AI share.

use crate::rng::RngOracle;

/// Percentage chance for an attacker to land a hit.
///
/// `clamp(base + 2 * attacker_ap - 2 * defender_ac, 5, 95)`. A roll in
/// `[0, 100)` succeeds when `roll <= chance`, so even a hopeless attack keeps
/// a 5% chance and a sure one can still miss.
pub fn hit_chance(attacker_ap: u32, defender_ac: i32, base: u32) -> u32 {
    let raw = base as i64 + 2 * attacker_ap as i64 - 2 * defender_ac as i64;
    raw.clamp(5, 95) as u32
}

/// Uniform damage roll in `[min, max]` inclusive.
pub fn damage_roll(rng: &dyn RngOracle, seed: u64, min: u32, max: u32) -> u32 {
    rng.range(seed, min, max)
}
