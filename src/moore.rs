use enum_iterator::IntoEnumIterator;
use MooreDirection::*;

/// One of the eight cells touching a cell on a square grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, IntoEnumIterator)]
pub enum MooreDirection {
    Right,
    UpRight,
    Up,
    UpLeft,
    Left,
    DownLeft,
    Down,
    DownRight,
}

impl MooreDirection {
    /// An iterator over all eight directions, counter-clockwise starting at `Right`.
    #[inline]
    pub fn directions() -> <MooreDirection as IntoEnumIterator>::Iterator {
        MooreDirection::into_enum_iter()
    }

    /// The `(dx, dy)` offset of this direction. `y` grows downwards.
    #[inline]
    pub fn delta(self) -> (isize, isize) {
        match self {
            Right => (1, 0),
            UpRight => (1, -1),
            Up => (0, -1),
            UpLeft => (-1, -1),
            Left => (-1, 0),
            DownLeft => (-1, 1),
            Down => (0, 1),
            DownRight => (1, 1),
        }
    }

    /// The direction pointing the opposite way.
    #[inline]
    pub fn inv(self) -> Self {
        match self {
            Right => Left,
            UpRight => DownLeft,
            Up => Down,
            UpLeft => DownRight,
            Left => Right,
            DownLeft => UpRight,
            Down => Up,
            DownRight => UpLeft,
        }
    }

    /// Offset of the neighbor in a row-major buffer with `stride` cells per row.
    #[inline]
    pub(crate) fn offset(self, stride: usize) -> isize {
        let (dx, dy) = self.delta();
        dx + dy * stride as isize
    }
}
