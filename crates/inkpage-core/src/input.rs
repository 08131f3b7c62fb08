//! Pointer events and the set of pointers currently in contact.

use kurbo::Point;

/// Identifier the platform assigns to one finger, pen or mouse.
pub type PointerId = u64;

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// The platform took the pointer away (palm rejection, app switch, ...).
    Cancel,
}

/// One pointer event in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub pointer_id: PointerId,
    pub position: Point,
}

impl PointerEvent {
    pub fn new(phase: PointerPhase, pointer_id: PointerId, position: Point) -> Self {
        Self {
            phase,
            pointer_id,
            position,
        }
    }

    pub fn down(pointer_id: PointerId, x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Down, pointer_id, Point::new(x, y))
    }

    pub fn moved(pointer_id: PointerId, x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Move, pointer_id, Point::new(x, y))
    }

    pub fn up(pointer_id: PointerId, x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Up, pointer_id, Point::new(x, y))
    }

    pub fn cancel(pointer_id: PointerId, x: f64, y: f64) -> Self {
        Self::new(PointerPhase::Cancel, pointer_id, Point::new(x, y))
    }
}

/// Pointers currently pressed, in the order they went down.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointerSet {
    pointers: Vec<(PointerId, Point)>,
}

impl PointerSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pointers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pointers.is_empty()
    }

    pub fn contains(&self, id: PointerId) -> bool {
        self.pointers.iter().any(|(p, _)| *p == id)
    }

    /// Position of a pressed pointer.
    pub fn position(&self, id: PointerId) -> Option<Point> {
        self.pointers
            .iter()
            .find(|(p, _)| *p == id)
            .map(|(_, pos)| *pos)
    }

    /// Record a pointer going down. Returns false if it was already pressed,
    /// in which case only its position is updated.
    pub fn press(&mut self, id: PointerId, position: Point) -> bool {
        if self.update(id, position) {
            return false;
        }
        self.pointers.push((id, position));
        true
    }

    /// Move a pressed pointer. Returns false for pointers not in the set.
    pub fn update(&mut self, id: PointerId, position: Point) -> bool {
        match self.pointers.iter_mut().find(|(p, _)| *p == id) {
            Some(entry) => {
                entry.1 = position;
                true
            }
            None => false,
        }
    }

    /// Remove a pointer. Returns false if it was not pressed.
    pub fn release(&mut self, id: PointerId) -> bool {
        let before = self.pointers.len();
        self.pointers.retain(|(p, _)| *p != id);
        self.pointers.len() != before
    }

    pub fn clear(&mut self) {
        self.pointers.clear();
    }

    /// The two pressed pointers when exactly two are down.
    pub fn pair(&self) -> Option<(Point, Point)> {
        match self.pointers.as_slice() {
            [(_, a), (_, b)] => Some((*a, *b)),
            _ => None,
        }
    }

    /// Distance between the two pointers of a pinch.
    pub fn pinch_distance(&self) -> Option<f64> {
        self.pair().map(|(a, b)| a.distance(b))
    }

    /// Midpoint between the two pointers of a pinch.
    pub fn pinch_midpoint(&self) -> Option<Point> {
        self.pair().map(|(a, b)| a.midpoint(b))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_and_release() {
        let mut set = PointerSet::new();
        assert!(set.press(1, Point::new(1.0, 1.0)));
        assert!(set.press(2, Point::new(2.0, 2.0)));
        assert_eq!(set.len(), 2);

        assert!(set.release(1));
        assert!(!set.release(1));
        assert_eq!(set.len(), 1);
        assert!(set.contains(2));
    }

    #[test]
    fn test_duplicate_press_updates_position() {
        let mut set = PointerSet::new();
        set.press(7, Point::new(1.0, 1.0));
        assert!(!set.press(7, Point::new(5.0, 5.0)));
        assert_eq!(set.len(), 1);
        assert_eq!(set.position(7), Some(Point::new(5.0, 5.0)));
    }

    #[test]
    fn test_update_unknown_pointer() {
        let mut set = PointerSet::new();
        assert!(!set.update(3, Point::ZERO));
        assert!(set.is_empty());
    }

    #[test]
    fn test_pinch_geometry() {
        let mut set = PointerSet::new();
        set.press(1, Point::new(100.0, 100.0));
        assert_eq!(set.pinch_distance(), None);

        set.press(2, Point::new(200.0, 100.0));
        assert_eq!(set.pinch_distance(), Some(100.0));
        assert_eq!(set.pinch_midpoint(), Some(Point::new(150.0, 100.0)));

        set.press(3, Point::new(0.0, 0.0));
        assert_eq!(set.pair(), None);
    }
}
