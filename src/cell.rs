/// A single packed grid cell: the alive flag and the live-neighbor count share one byte.
///
/// Bit 4 holds the alive flag and the low nibble holds the neighbor count (0..=8).
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Cell(u8);

const ALIVE: u8 = 0x10;
const COUNT: u8 = 0x0F;

impl Cell {
    pub const DEAD: Cell = Cell(0);

    #[inline]
    pub fn is_alive(self) -> bool {
        self.0 & ALIVE != 0
    }

    #[inline]
    pub fn neighbors(self) -> u8 {
        self.0 & COUNT
    }

    /// The packed value, `alive * 16 + neighbors`. Always below 32.
    #[inline]
    pub fn packed(self) -> u8 {
        self.0
    }

    /// Sets the alive flag and returns whether the cell changed state.
    #[inline]
    pub(crate) fn set_alive(&mut self, alive: bool) -> bool {
        if self.is_alive() == alive {
            return false;
        }
        self.0 ^= ALIVE;
        true
    }

    #[inline]
    pub(crate) fn add_neighbor(&mut self) {
        debug_assert!(self.neighbors() < 8, "neighbor count overflow");
        self.0 += 1;
    }

    #[inline]
    pub(crate) fn remove_neighbor(&mut self) {
        debug_assert!(self.neighbors() > 0, "neighbor count underflow");
        self.0 -= 1;
    }
}
