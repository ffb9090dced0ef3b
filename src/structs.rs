use std::ops::AddAssign;

pub type PieceId = u32;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaptureRule {
    #[default]
    Any,
    CaptureOnly,
    NonCaptureOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Velocity {
    pub dx: i32,
    pub dy: i32,
    pub repeatable: bool,
    pub capture: CaptureRule,
}

impl Velocity {
    pub const fn slide(dx: i32, dy: i32) -> Self {
        Self {
            dx,
            dy,
            repeatable: true,
            capture: CaptureRule::Any,
        }
    }

    pub const fn step(dx: i32, dy: i32) -> Self {
        Self {
            dx,
            dy,
            repeatable: false,
            capture: CaptureRule::Any,
        }
    }

    pub const fn with_capture(self, capture: CaptureRule) -> Self {
        Self { capture, ..self }
    }

    pub fn oriented(self, orientation: Orientation) -> Self {
        let (dx, dy) = orientation.apply(self.dx, self.dy);
        Self { dx, dy, ..self }
    }
}

/// Rotates `(dx, dy)` clockwise by `rotation` quarter turns.
#[inline]
pub fn rotate(dx: i32, dy: i32, rotation: u8) -> (i32, i32) {
    match rotation % 4 {
        1 => (dy, -dx),
        2 => (-dx, -dy),
        3 => (-dy, dx),
        _ => (dx, dy),
    }
}

/// Element of the square's symmetry group: an optional mirror of the x axis
/// followed by `rotation` clockwise quarter turns.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Orientation {
    pub mirrored: bool,
    pub rotation: u8,
}

impl Orientation {
    pub const IDENTITY: Orientation = Orientation {
        mirrored: false,
        rotation: 0,
    };

    /// Converts the walker's raw crossing flags. Flipping both axes is a half
    /// turn, and a y flip is an x flip followed by a half turn.
    pub fn from_flags(flip_x: bool, flip_y: bool, rotation: u8) -> Self {
        let (mirrored, extra) = match (flip_x, flip_y) {
            (false, false) => (false, 0),
            (true, false) => (true, 0),
            (false, true) => (true, 2),
            (true, true) => (false, 2),
        };
        Self {
            mirrored,
            rotation: (rotation + extra) % 4,
        }
    }

    pub fn apply(self, dx: i32, dy: i32) -> (i32, i32) {
        let dx = if self.mirrored { -dx } else { dx };
        rotate(dx, dy, self.rotation)
    }

    /// `self` first, then `next`.
    pub fn then(self, next: Orientation) -> Orientation {
        let carried = if next.mirrored {
            (4 - self.rotation % 4) % 4
        } else {
            self.rotation % 4
        };
        Orientation {
            mirrored: self.mirrored != next.mirrored,
            rotation: (next.rotation + carried) % 4,
        }
    }

    pub fn is_identity(self) -> bool {
        self == Self::IDENTITY
    }
}

/// A square a piece can move to, with the orientation change picked up from
/// wrap crossings on the way there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Destination {
    pub x: i32,
    pub y: i32,
    pub flip_x: bool,
    pub flip_y: bool,
    pub rotation: u8,
}

impl Destination {
    pub fn orientation(&self) -> Orientation {
        Orientation::from_flags(self.flip_x, self.flip_y, self.rotation)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SearchStats {
    pub examined: u64,
    pub symmetric: u64,
    pub fresh: u64,
    pub accepted: u64,
}

impl AddAssign for SearchStats {
    fn add_assign(&mut self, other: SearchStats) {
        self.examined += other.examined;
        self.symmetric += other.symmetric;
        self.fresh += other.fresh;
        self.accepted += other.accepted;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_orientations() -> Vec<Orientation> {
        let mut out = Vec::new();
        for mirrored in [false, true] {
            for rotation in 0..4 {
                out.push(Orientation { mirrored, rotation });
            }
        }
        out
    }

    #[test]
    fn flags_match_walker_arithmetic() {
        for flip_x in [false, true] {
            for flip_y in [false, true] {
                for rotation in 0..4u8 {
                    let o = Orientation::from_flags(flip_x, flip_y, rotation);
                    for (dx, dy) in [(1, 2), (-2, 1), (0, 1), (3, -1)] {
                        let fx = if flip_x { -dx } else { dx };
                        let fy = if flip_y { -dy } else { dy };
                        assert_eq!(o.apply(dx, dy), rotate(fx, fy, rotation));
                    }
                }
            }
        }
    }

    #[test]
    fn composition_agrees_with_sequential_application() {
        for a in all_orientations() {
            for b in all_orientations() {
                let ab = a.then(b);
                for (dx, dy) in [(1, 2), (-2, 1), (1, 0)] {
                    let (x1, y1) = a.apply(dx, dy);
                    assert_eq!(ab.apply(dx, dy), b.apply(x1, y1));
                }
            }
        }
    }

    #[test]
    fn mirror_is_an_involution_and_rotation_cycles() {
        let flip = Orientation::from_flags(true, false, 0);
        assert!(flip.then(flip).is_identity());

        let flip_y = Orientation::from_flags(false, true, 0);
        assert!(flip_y.then(flip_y).is_identity());

        let quarter = Orientation::from_flags(false, false, 1);
        let mut acc = Orientation::IDENTITY;
        for _ in 0..3 {
            acc = acc.then(quarter);
            assert!(!acc.is_identity());
        }
        assert!(acc.then(quarter).is_identity());
    }

    #[test]
    fn rotation_is_clockwise() {
        assert_eq!(rotate(0, 1, 1), (1, 0));
        assert_eq!(rotate(1, 0, 1), (0, -1));
        assert_eq!(rotate(1, 2, 2), (-1, -2));
        assert_eq!(rotate(1, 0, 3), (0, 1));
    }
}
