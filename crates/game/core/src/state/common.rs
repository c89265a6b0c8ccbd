use std::fmt;

/// Unique, stable identifier for any entity tracked in the state.
///
/// Ids come from content definitions (`"player"`, `"enemy-1"`, ...) and are
/// never reused: once an entity dies and leaves the roster its id does not
/// reappear.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub String);

impl EntityId {
    /// Reserved identifier for the controllable player character.
    pub const PLAYER: &'static str = "player";

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn player() -> Self {
        Self(Self::PLAYER.to_owned())
    }

    /// Returns true if this id names the player.
    #[inline]
    pub fn is_player(&self) -> bool {
        self.0 == Self::PLAYER
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// `|dx| + |dy|`, used for detection and melee-range checks.
    pub fn manhattan_distance(self, other: Self) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }

    /// Straight-line distance, used for the pickup radius.
    pub fn euclidean_distance(self, other: Self) -> f32 {
        let dx = (self.x - other.x) as f32;
        let dy = (self.y - other.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Default for Point {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// 8-way compass facing, expressed in the isometric screen frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum Facing {
    N,
    Ne,
    E,
    Se,
    S,
    Sw,
    W,
    Nw,
}

impl Facing {
    /// Maps a grid step delta to the facing the sprite sheet expects.
    ///
    /// The diagonal-looking values for cardinal steps are intentional: a +x
    /// grid step renders as a south-east slide on the isometric diamond.
    pub fn from_step(dx: i32, dy: i32) -> Option<Self> {
        match (dx.signum(), dy.signum()) {
            (1, 0) => Some(Facing::Se),
            (-1, 0) => Some(Facing::Nw),
            (0, 1) => Some(Facing::Sw),
            (0, -1) => Some(Facing::Ne),
            (1, 1) => Some(Facing::S),
            (-1, -1) => Some(Facing::N),
            (1, -1) => Some(Facing::E),
            (-1, 1) => Some(Facing::W),
            _ => None,
        }
    }
}

/// Visual effect kinds surfaced to the presentation layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EffectKind {
    /// Successful hit: heavy screen shake, impact flash.
    Impact,
    /// Whiffed attack: light shake, miss marker.
    Miss,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manhattan_distance_is_symmetric() {
        let a = Point::new(2, 3);
        let b = Point::new(7, 1);
        assert_eq!(a.manhattan_distance(b), 7);
        assert_eq!(b.manhattan_distance(a), 7);
    }

    #[test]
    fn facing_covers_all_step_directions() {
        assert_eq!(Facing::from_step(1, 0), Some(Facing::Se));
        assert_eq!(Facing::from_step(-1, 0), Some(Facing::Nw));
        assert_eq!(Facing::from_step(0, 1), Some(Facing::Sw));
        assert_eq!(Facing::from_step(0, -1), Some(Facing::Ne));
        assert_eq!(Facing::from_step(2, 2), Some(Facing::S));
        assert_eq!(Facing::from_step(0, 0), None);
    }
}
