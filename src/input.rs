//! Directional input
//!
//! DOM listeners write into [`HeldKeys`]; the tick driver reads an
//! [`InputSnapshot`] from it once per frame. The simulation never sees the
//! mutable set, only the copy taken at the start of the tick.

use serde::Serialize;

/// One of the four movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Map a keyboard `key` value to a direction (arrow keys and WASD)
    pub fn from_key(key: &str) -> Option<Self> {
        match key.to_ascii_lowercase().as_str() {
            "arrowup" | "w" => Some(Direction::Up),
            "arrowdown" | "s" => Some(Direction::Down),
            "arrowleft" | "a" => Some(Direction::Left),
            "arrowright" | "d" => Some(Direction::Right),
            _ => None,
        }
    }

    /// Unit step in logical field coordinates (y grows downward)
    pub fn step(self) -> glam::Vec2 {
        match self {
            Direction::Up => glam::Vec2::new(0.0, -1.0),
            Direction::Down => glam::Vec2::new(0.0, 1.0),
            Direction::Left => glam::Vec2::new(-1.0, 0.0),
            Direction::Right => glam::Vec2::new(1.0, 0.0),
        }
    }

    fn index(self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    fn bit(self) -> u8 {
        match self {
            Direction::Up => 1 << 0,
            Direction::Down => 1 << 1,
            Direction::Left => 1 << 2,
            Direction::Right => 1 << 3,
        }
    }
}

/// Directions held at the moment the tick sampled input
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    held: u8,
}

impl InputSnapshot {
    /// Snapshot with exactly the given directions held
    pub fn with(directions: &[Direction]) -> Self {
        let held = directions.iter().fold(0, |acc, d| acc | d.bit());
        Self { held }
    }

    pub fn is_held(&self, direction: Direction) -> bool {
        self.held & direction.bit() != 0
    }

    pub fn is_empty(&self) -> bool {
        self.held == 0
    }

    /// Held directions in a stable order
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        Direction::ALL.into_iter().filter(|d| self.is_held(*d))
    }

    /// Summed per-axis displacement for `speed` per direction.
    ///
    /// Diagonals are not normalized: two held axes move `speed` along each.
    pub fn displacement(&self, speed: f32) -> glam::Vec2 {
        self.iter().map(|d| d.step() * speed).sum()
    }
}

/// Which control produced a press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Binding {
    Arrows,
    Wasd,
    Buttons,
}

impl Binding {
    /// Binding and direction for a keyboard `key` value
    pub fn from_key(key: &str) -> Option<(Self, Direction)> {
        let direction = Direction::from_key(key)?;
        let binding = if key.len() > 1 {
            Binding::Arrows
        } else {
            Binding::Wasd
        };
        Some((binding, direction))
    }

    fn bit(self) -> u8 {
        match self {
            Binding::Arrows => 1 << 0,
            Binding::Wasd => 1 << 1,
            Binding::Buttons => 1 << 2,
        }
    }
}

/// Continuously updated set of held directions
///
/// Each binding holds its own presses: a direction stays held until every
/// binding pressing it has let go, so lifting the on-screen button doesn't
/// stop a ship still steered by `ArrowLeft`.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    /// Binding bits per direction, indexed like [`Direction::ALL`]
    held_by: [u8; 4],
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, binding: Binding, direction: Direction) {
        self.held_by[direction.index()] |= binding.bit();
    }

    pub fn release(&mut self, binding: Binding, direction: Direction) {
        self.held_by[direction.index()] &= !binding.bit();
    }

    /// Press from a keyboard `key`; returns whether it was a movement key
    pub fn press_key(&mut self, key: &str) -> bool {
        match Binding::from_key(key) {
            Some((binding, direction)) => {
                self.press(binding, direction);
                true
            }
            None => false,
        }
    }

    /// Release from a keyboard `key`; returns whether it was a movement key
    pub fn release_key(&mut self, key: &str) -> bool {
        match Binding::from_key(key) {
            Some((binding, direction)) => {
                self.release(binding, direction);
                true
            }
            None => false,
        }
    }

    /// Drop everything (on start, so stale keys from the menu don't move the ship)
    pub fn clear(&mut self) {
        self.held_by = [0; 4];
    }

    pub fn snapshot(&self) -> InputSnapshot {
        let held = Direction::ALL
            .into_iter()
            .filter(|d| self.held_by[d.index()] != 0)
            .fold(0, |acc, d| acc | d.bit());
        InputSnapshot { held }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn test_key_mapping() {
        assert_eq!(Direction::from_key("ArrowUp"), Some(Direction::Up));
        assert_eq!(Direction::from_key("w"), Some(Direction::Up));
        assert_eq!(Direction::from_key("W"), Some(Direction::Up));
        assert_eq!(Direction::from_key("ArrowDown"), Some(Direction::Down));
        assert_eq!(Direction::from_key("s"), Some(Direction::Down));
        assert_eq!(Direction::from_key("arrowleft"), Some(Direction::Left));
        assert_eq!(Direction::from_key("A"), Some(Direction::Left));
        assert_eq!(Direction::from_key("ArrowRight"), Some(Direction::Right));
        assert_eq!(Direction::from_key("d"), Some(Direction::Right));
        assert_eq!(Direction::from_key(" "), None);
        assert_eq!(Direction::from_key("Escape"), None);
    }

    #[test]
    fn test_press_release() {
        let mut keys = HeldKeys::new();
        assert!(keys.press_key("ArrowLeft"));
        assert!(keys.press_key("w"));
        assert!(!keys.press_key("q"));

        let snap = keys.snapshot();
        assert!(snap.is_held(Direction::Left));
        assert!(snap.is_held(Direction::Up));
        assert!(!snap.is_held(Direction::Right));

        keys.release_key("ArrowLeft");
        assert!(!keys.snapshot().is_held(Direction::Left));
        // Earlier snapshot is unaffected
        assert!(snap.is_held(Direction::Left));

        keys.clear();
        assert!(keys.snapshot().is_empty());
    }

    #[test]
    fn test_bindings_release_independently() {
        let mut keys = HeldKeys::new();
        keys.press_key("ArrowLeft");
        keys.press(Binding::Buttons, Direction::Left);
        keys.press_key("a");

        // Lifting the on-screen button keeps the keyboard press
        keys.release(Binding::Buttons, Direction::Left);
        assert!(keys.snapshot().is_held(Direction::Left));

        keys.release_key("A");
        assert!(keys.snapshot().is_held(Direction::Left));

        keys.release_key("ArrowLeft");
        assert!(!keys.snapshot().is_held(Direction::Left));
    }

    #[test]
    fn test_key_bindings() {
        assert_eq!(
            Binding::from_key("ArrowDown"),
            Some((Binding::Arrows, Direction::Down))
        );
        assert_eq!(Binding::from_key("S"), Some((Binding::Wasd, Direction::Down)));
        assert_eq!(Binding::from_key("Shift"), None);
    }

    #[test]
    fn test_diagonal_is_not_normalized() {
        let snap = InputSnapshot::with(&[Direction::Up, Direction::Right]);
        assert_eq!(snap.displacement(20.0), Vec2::new(20.0, -20.0));
        assert!((snap.displacement(20.0).length() - 20.0 * 2f32.sqrt()).abs() < 1e-4);
    }

    #[test]
    fn test_opposite_directions_cancel() {
        let snap = InputSnapshot::with(&[Direction::Left, Direction::Right, Direction::Down]);
        assert_eq!(snap.displacement(20.0), Vec2::new(0.0, 20.0));
    }
}
