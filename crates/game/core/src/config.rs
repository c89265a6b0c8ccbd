/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Side length of the square tile grid.
    pub grid_size: i32,
    /// Manhattan radius at which a dormant enemy notices the player when its
    /// own `detection_range` is unset.
    pub default_detection_range: i32,
    /// Default carry capacity handed to entities without an explicit value.
    pub default_max_weight: f32,
}

impl GameConfig {
    // ===== projection constants =====
    /// Tile footprint in screen pixels (isometric diamond).
    pub const TILE_WIDTH: u32 = 64;
    pub const TILE_HEIGHT: u32 = 32;

    // ===== combat formula constants =====
    /// Base to-hit percentage for player-initiated attacks.
    pub const BASE_HIT_CHANCE: u32 = 60;
    /// Base to-hit percentage used by the enemy AI.
    pub const ENEMY_BASE_HIT_CHANCE: u32 = 50;
    /// AP cost of an unarmed strike.
    pub const UNARMED_AP_COST: u32 = 4;
    /// Unarmed damage range.
    pub const UNARMED_DAMAGE: (u32, u32) = (1, 3);
    /// Fixed enemy AI damage range, independent of any weapon model.
    pub const ENEMY_DAMAGE: (u32, u32) = (2, 7);

    // ===== interaction constants =====
    /// Euclidean pickup radius around the player.
    pub const PICKUP_RADIUS: f32 = 1.5;
    /// Fixed lock-picking success percentage.
    pub const PICKLOCK_CHANCE: u32 = 60;

    // ===== progression constants =====
    /// Skill points granted per level gained.
    pub const SKILL_POINTS_PER_LEVEL: u32 = 3;
    /// Multiplier in the level threshold curve `level * (level + 1) * 500`.
    pub const EXP_CURVE_FACTOR: u64 = 500;

    // ===== bookkeeping =====
    /// Number of log lines retained, newest first.
    pub const MAX_LOGS: usize = 50;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_GRID_SIZE: i32 = 20;
    pub const DEFAULT_DETECTION_RANGE: i32 = 5;
    pub const DEFAULT_MAX_WEIGHT: f32 = 150.0;

    pub fn new() -> Self {
        Self {
            grid_size: Self::DEFAULT_GRID_SIZE,
            default_detection_range: Self::DEFAULT_DETECTION_RANGE,
            default_max_weight: Self::DEFAULT_MAX_WEIGHT,
        }
    }

    pub fn with_grid_size(grid_size: i32) -> Self {
        Self {
            grid_size,
            ..Self::new()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}
