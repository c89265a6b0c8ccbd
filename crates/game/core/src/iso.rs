//! Isometric projection between grid cells and the screen plane.
//!
//! The presentation layer draws tiles on a diamond grid; the simulation only
//! ever sees integer cell coordinates. Both transforms are pure and round-trip
//! exactly for integer grid inputs.

use crate::config::GameConfig;
use crate::state::Point;

/// Screen-space coordinate produced by the isometric projection.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
}

/// Projects a grid cell onto the isometric screen plane.
pub fn grid_to_screen(grid_x: i32, grid_y: i32) -> ScreenPoint {
    let half_w = GameConfig::TILE_WIDTH as f32 / 2.0;
    let half_h = GameConfig::TILE_HEIGHT as f32 / 2.0;
    ScreenPoint {
        x: (grid_x - grid_y) as f32 * half_w,
        y: (grid_x + grid_y) as f32 * half_h,
    }
}

/// Inverts [`grid_to_screen`] by solving the projection's 2x2 linear system,
/// flooring to the containing cell.
pub fn screen_to_grid(screen_x: f32, screen_y: f32) -> Point {
    let half_w = GameConfig::TILE_WIDTH as f32 / 2.0;
    let half_h = GameConfig::TILE_HEIGHT as f32 / 2.0;
    let x = (screen_x / half_w + screen_y / half_h) / 2.0;
    let y = (screen_y / half_h - screen_x / half_w) / 2.0;
    Point::new(x.floor() as i32, y.floor() as i32)
}
