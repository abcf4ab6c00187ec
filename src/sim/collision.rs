//! Landing detection and alignment scoring
//!
//! A round resolves the first frame the block's bottom edge reaches the
//! outline's top edge. Only the horizontal offset between centers decides
//! whether that landing counts.

use glam::Vec2;

/// Axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(pos: Vec2, size: Vec2) -> Self {
        Self { pos, size }
    }

    pub fn square(pos: Vec2, side: f32) -> Self {
        Self::new(pos, Vec2::splat(side))
    }

    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.pos.y + self.size.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.pos.x + self.size.x / 2.0
    }
}

/// Outcome of checking a falling block against its outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Alignment {
    /// Block has not reached the outline yet
    Pending,
    /// Landed within tolerance
    Aligned { offset: f32 },
    /// Landed outside tolerance
    Missed { offset: f32 },
}

/// True once the block's bottom edge has reached or passed the outline's top
#[inline]
pub fn has_reached(shape: &Rect, outline: &Rect) -> bool {
    shape.bottom() >= outline.top()
}

/// Horizontal center-to-center distance
#[inline]
pub fn center_offset(shape: &Rect, outline: &Rect) -> f32 {
    (shape.center_x() - outline.center_x()).abs()
}

/// Check a block against the outline
///
/// Pure function of the two rectangles; the caller is responsible for only
/// acting on the first non-`Pending` result of a round.
pub fn check_alignment(shape: &Rect, outline: &Rect, tolerance: f32) -> Alignment {
    if !has_reached(shape, outline) {
        return Alignment::Pending;
    }

    let offset = center_offset(shape, outline);
    if offset <= tolerance {
        Alignment::Aligned { offset }
    } else {
        Alignment::Missed { offset }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outline() -> Rect {
        Rect::square(Vec2::new(100.0, 540.0), 50.0)
    }

    #[test]
    fn test_pending_above_outline() {
        let shape = Rect::square(Vec2::new(100.0, 489.9), 50.0);
        assert_eq!(check_alignment(&shape, &outline(), 10.0), Alignment::Pending);
    }

    #[test]
    fn test_touching_edge_counts_as_reached() {
        let shape = Rect::square(Vec2::new(100.0, 490.0), 50.0);
        assert!(has_reached(&shape, &outline()));
        assert_eq!(
            check_alignment(&shape, &outline(), 10.0),
            Alignment::Aligned { offset: 0.0 }
        );
    }

    #[test]
    fn test_tolerance_is_inclusive() {
        let shape = Rect::square(Vec2::new(110.0, 495.0), 50.0);
        assert_eq!(
            check_alignment(&shape, &outline(), 10.0),
            Alignment::Aligned { offset: 10.0 }
        );

        let shape = Rect::square(Vec2::new(89.0, 495.0), 50.0);
        assert_eq!(
            check_alignment(&shape, &outline(), 10.0),
            Alignment::Missed { offset: 11.0 }
        );
    }

    #[test]
    fn test_check_is_deterministic() {
        let shape = Rect::square(Vec2::new(93.0, 500.0), 50.0);
        let first = check_alignment(&shape, &outline(), 10.0);
        for _ in 0..10 {
            assert_eq!(check_alignment(&shape, &outline(), 10.0), first);
        }
    }
}
