//! Pointer input and screen to world mapping

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointerButton {
    /// Paints the selected material
    Primary,
    /// Erases
    Secondary,
}

/// One pointer sample, already in world coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointerEvent {
    pub world_coord: IVec2,
    pub button: PointerButton,
    /// True while the button stays down after the initial press
    pub is_held: bool,
}

impl PointerEvent {
    /// Initial press of the primary button
    pub fn click(world_coord: IVec2) -> Self {
        Self {
            world_coord,
            button: PointerButton::Primary,
            is_held: false,
        }
    }

    /// Primary button held down
    pub fn drag(world_coord: IVec2) -> Self {
        Self {
            world_coord,
            button: PointerButton::Primary,
            is_held: true,
        }
    }

    pub fn erase(world_coord: IVec2, is_held: bool) -> Self {
        Self {
            world_coord,
            button: PointerButton::Secondary,
            is_held,
        }
    }

    /// Map a screen sample through `rect`; None if it falls outside the world
    pub fn from_screen(
        rect: &WorldRect,
        screen_pos: Vec2,
        button: PointerButton,
        is_held: bool,
    ) -> Option<Self> {
        if !rect.contains(screen_pos) {
            return None;
        }
        Some(Self {
            world_coord: rect.to_world_coord(screen_pos),
            button,
            is_held,
        })
    }
}

/// Where the world sits on screen
///
/// Screen positions use a bottom-left origin with y growing upward, the same
/// orientation as world coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldRect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl WorldRect {
    pub fn new(origin: Vec2, size: Vec2) -> Self {
        Self { origin, size }
    }

    /// A world of `width` x `height` cells centered on a screen
    pub fn centered(screen: Vec2, width: i32, height: i32) -> Self {
        let size = Vec2::new(width as f32, height as f32);
        let origin = ((screen - size) / 2.0).floor();
        Self { origin, size }
    }

    /// Inclusive at the origin, exclusive at `origin + size`
    pub fn contains(&self, pos: Vec2) -> bool {
        let max = self.origin + self.size;
        pos.x >= self.origin.x && pos.x < max.x && pos.y >= self.origin.y && pos.y < max.y
    }

    /// Truncates toward zero, so fractional positions land in their cell
    pub fn to_world_coord(&self, pos: Vec2) -> IVec2 {
        (pos - self.origin).as_ivec2()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect() {
        let rect = WorldRect::centered(Vec2::new(1280.0, 720.0), 640, 480);
        assert_eq!(rect.origin, Vec2::new(320.0, 120.0));
        assert_eq!(rect.size, Vec2::new(640.0, 480.0));
    }

    #[test]
    fn test_contains_edges() {
        let rect = WorldRect::new(Vec2::new(10.0, 20.0), Vec2::new(100.0, 50.0));
        assert!(rect.contains(Vec2::new(10.0, 20.0)));
        assert!(rect.contains(Vec2::new(109.9, 69.9)));
        assert!(!rect.contains(Vec2::new(110.0, 30.0)));
        assert!(!rect.contains(Vec2::new(50.0, 70.0)));
        assert!(!rect.contains(Vec2::new(9.9, 30.0)));
        assert!(!rect.contains(Vec2::new(50.0, 70.1)));
    }

    #[test]
    fn test_far_corner_is_not_a_world_cell() {
        let rect = WorldRect::new(Vec2::ZERO, Vec2::new(100.0, 50.0));
        let corner =
            PointerEvent::from_screen(&rect, Vec2::new(100.0, 50.0), PointerButton::Primary, false);
        assert!(corner.is_none());

        let last =
            PointerEvent::from_screen(&rect, Vec2::new(99.5, 49.5), PointerButton::Primary, false);
        assert_eq!(last.map(|e| e.world_coord), Some(IVec2::new(99, 49)));
    }

    #[test]
    fn test_to_world_coord() {
        let rect = WorldRect::new(Vec2::new(10.0, 20.0), Vec2::new(100.0, 50.0));
        assert_eq!(rect.to_world_coord(Vec2::new(10.0, 20.0)), IVec2::ZERO);
        assert_eq!(rect.to_world_coord(Vec2::new(15.7, 22.2)), IVec2::new(5, 2));
    }

    #[test]
    fn test_from_screen() {
        let rect = WorldRect::new(Vec2::ZERO, Vec2::new(100.0, 100.0));
        let event = PointerEvent::from_screen(&rect, Vec2::new(4.5, 7.0), PointerButton::Primary, false);
        assert_eq!(event, Some(PointerEvent::click(IVec2::new(4, 7))));

        let outside =
            PointerEvent::from_screen(&rect, Vec2::new(-1.0, 7.0), PointerButton::Secondary, true);
        assert!(outside.is_none());
    }
}
