use crate::{Cell, GridConfig, MooreDirection, Result};

use boolinator::Boolinator;
use itertools::iproduct;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::marker::PhantomData;
use std::mem::swap;

/// A rectangle of logical cells, `min` inclusive and `max` exclusive.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Bounds {
    pub min_x: usize,
    pub min_y: usize,
    pub max_x: usize,
    pub max_y: usize,
}

impl Bounds {
    #[inline]
    pub fn width(&self) -> usize {
        self.max_x - self.min_x
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.max_y - self.min_y
    }
}

/// Which edges of the logical board have a live cell on them.
#[derive(Copy, Clone, Debug, Default)]
struct Contact {
    left: bool,
    right: bool,
    top: bool,
    bottom: bool,
}

impl Contact {
    fn any(&self) -> bool {
        self.left || self.right || self.top || self.bottom
    }
}

/// A two-generation board that grows as its population reaches the edge.
///
/// Both generations live in row-major buffers wider and taller than the logical board.
/// The surrounding dead border always leaves room to address the eight neighbors of every
/// logical cell, and each cell carries its own live-neighbor count, kept up to date on every
/// write so a step never has to count neighbors.
#[derive(Clone)]
pub struct Grid {
    current: Vec<Cell>,
    next: Vec<Cell>,
    stride: usize,
    rows: usize,
    origin_x: usize,
    origin_y: usize,
    width: usize,
    height: usize,
    margin: usize,
    config: GridConfig,
    capped: bool,
}

impl Grid {
    /// Make an empty board with the default [`GridConfig`].
    pub fn new(width: usize, height: usize) -> Self {
        let config = GridConfig::default();
        Self::allocate(width, height, config.initial_margin, config)
    }

    /// Make an empty board with a custom growth configuration.
    pub fn with_config(width: usize, height: usize, config: GridConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::allocate(width, height, config.initial_margin, config))
    }

    /// Make a board from decoded row-major cell data. Short rows are padded with dead cells.
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Self {
        let width = rows.iter().map(|r| r.as_ref().len()).max().unwrap_or(0);
        let mut grid = Grid::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, &alive) in row.as_ref().iter().enumerate() {
                if alive {
                    grid.edit_current(true, x, y);
                }
            }
        }
        grid
    }

    /// Make a board by evaluating every logical coordinate with a closure.
    pub fn from_fn<F>(width: usize, height: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut grid = Grid::new(width, height);
        for (y, x) in iproduct!(0..height, 0..width) {
            if f(x, y) {
                grid.edit_current(true, x, y);
            }
        }
        grid
    }

    fn allocate(width: usize, height: usize, margin: usize, config: GridConfig) -> Self {
        let stride = width + 2 * margin;
        let rows = height + 2 * margin;
        Grid {
            current: vec![Cell::DEAD; stride * rows],
            next: vec![Cell::DEAD; stride * rows],
            stride,
            rows,
            origin_x: margin,
            origin_y: margin,
            width,
            height,
            margin,
            config,
            capped: false,
        }
    }

    /// Get the board's logical width.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Get the board's logical height.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Get the width of the backing storage.
    #[inline]
    pub fn physical_width(&self) -> usize {
        self.stride
    }

    /// Get the height of the backing storage.
    #[inline]
    pub fn physical_height(&self) -> usize {
        self.rows
    }

    /// Get the margin the storage was last allocated with.
    #[inline]
    pub fn margin(&self) -> usize {
        self.margin
    }

    #[inline]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// True once growth has been stopped by [`GridConfig::max_cells`].
    #[inline]
    pub fn is_capped(&self) -> bool {
        self.capped
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        (self.origin_y + y) * self.stride + self.origin_x + x
    }

    #[inline]
    fn debug_check(&self, x: usize, y: usize) {
        debug_assert!(
            x < self.width && y < self.height,
            "lifegrid::Grid: ({}, {}) outside {}x{} board",
            x,
            y,
            self.width,
            self.height
        );
    }

    /// Get a cell of the current generation.
    ///
    /// Coordinates must be inside the logical board. Only debug builds check this.
    #[inline]
    pub fn cell(&self, x: usize, y: usize) -> Cell {
        self.debug_check(x, y);
        self.current[self.index(x, y)]
    }

    /// Get a cell of the current generation without any bounds check.
    ///
    /// # Safety
    ///
    /// `x < self.width()` and `y < self.height()` must hold.
    #[inline]
    pub unsafe fn cell_unchecked(&self, x: usize, y: usize) -> Cell {
        *self.current.get_unchecked(self.index(x, y))
    }

    #[inline]
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cell(x, y).is_alive()
    }

    #[inline]
    pub fn neighbor_count(&self, x: usize, y: usize) -> u8 {
        self.cell(x, y).neighbors()
    }

    /// Write a cell of the next generation and update its neighbors' counts in the next buffer.
    ///
    /// Call this at most once per cell between two [`advance`](Self::advance) calls; a second
    /// call for the same cell double counts it in its neighbors.
    #[inline]
    pub fn set_next(&mut self, alive: bool, x: usize, y: usize) {
        self.debug_check(x, y);
        let ix = self.index(x, y);
        write(&mut self.next, self.stride, ix, alive);
    }

    /// Edit a cell of the current generation and update its neighbors' counts.
    ///
    /// Must not race with a step on the same board.
    #[inline]
    pub fn edit_current(&mut self, alive: bool, x: usize, y: usize) {
        self.debug_check(x, y);
        let ix = self.index(x, y);
        write(&mut self.current, self.stride, ix, alive);
    }

    /// Make the next generation current, then grow the board if it touches an edge.
    pub fn advance(&mut self) {
        swap(&mut self.current, &mut self.next);
        self.grow_if_needed();
        self.clear_next();
    }

    /// Zero the next buffer over the logical board and its one-cell ring.
    fn clear_next(&mut self) {
        let left = self.origin_x - 1;
        let right = self.origin_x + self.width + 1;
        for y in self.origin_y - 1..=self.origin_y + self.height {
            let row = y * self.stride;
            self.next[row + left..row + right].fill(Cell::DEAD);
        }
    }

    fn edge_contact(&self) -> Contact {
        let last_x = self.width - 1;
        let last_y = self.height - 1;
        Contact {
            left: (0..self.height).any(|y| self.is_alive(0, y)),
            right: (0..self.height).any(|y| self.is_alive(last_x, y)),
            top: self.row(0).iter().any(|c| c.is_alive()),
            bottom: self.row(last_y).iter().any(|c| c.is_alive()),
        }
    }

    /// Extend the board by one cell past every edge a live cell touches.
    ///
    /// Only the four edge lines are scanned. The board is recentered inside the existing
    /// storage when there is room; otherwise the storage is reallocated with twice the margin.
    /// A board that would exceed [`GridConfig::max_cells`] stops growing for good.
    /// Logical coordinates shift by one when the board grows to the left or top.
    ///
    /// Returns whether the board grew.
    pub fn grow_if_needed(&mut self) -> bool {
        if self.capped || self.width == 0 || self.height == 0 {
            return false;
        }
        let contact = self.edge_contact();
        if !contact.any() {
            return false;
        }
        let shift_x = contact.left as usize;
        let shift_y = contact.top as usize;
        let width = self.width + shift_x + contact.right as usize;
        let height = self.height + shift_y + contact.bottom as usize;
        let origin_x = self.origin_x - shift_x;
        let origin_y = self.origin_y - shift_y;

        let threshold = self.config.growth_threshold;
        let fits = origin_x >= threshold
            && origin_y >= threshold
            && origin_x + width + threshold <= self.stride
            && origin_y + height + threshold <= self.rows;
        if fits {
            self.origin_x = origin_x;
            self.origin_y = origin_y;
            self.width = width;
            self.height = height;
            true
        } else {
            self.reallocate(width, height, shift_x, shift_y)
        }
    }

    /// Move the current generation into fresh storage with a doubled margin.
    fn reallocate(&mut self, width: usize, height: usize, shift_x: usize, shift_y: usize) -> bool {
        let margin = self.margin * 2;
        let stride = width + 2 * margin;
        let rows = height + 2 * margin;
        let cells = match stride.checked_mul(rows) {
            Some(cells) if cells <= self.config.max_cells => cells,
            _ => {
                log::warn!(
                    "grid growth capped at {}x{}: {}x{} storage would exceed {} cells",
                    self.width,
                    self.height,
                    stride,
                    rows,
                    self.config.max_cells
                );
                self.capped = true;
                return false;
            }
        };

        // Copy the board with its ring so the border neighbor counts survive.
        let mut current = vec![Cell::DEAD; cells];
        let span = self.width + 2;
        let dst_x = margin + shift_x - 1;
        let dst_y = margin + shift_y - 1;
        for row in 0..self.height + 2 {
            let src = (self.origin_y - 1 + row) * self.stride + self.origin_x - 1;
            let dst = (dst_y + row) * stride + dst_x;
            current[dst..dst + span].copy_from_slice(&self.current[src..src + span]);
        }

        log::debug!(
            "grid storage {}x{} -> {}x{} (margin {})",
            self.stride,
            self.rows,
            stride,
            rows,
            margin
        );

        self.current = current;
        self.next = vec![Cell::DEAD; cells];
        self.stride = stride;
        self.rows = rows;
        self.margin = margin;
        self.origin_x = margin;
        self.origin_y = margin;
        self.width = width;
        self.height = height;
        true
    }

    /// A logical row of the current generation.
    #[inline]
    fn row(&self, y: usize) -> &[Cell] {
        let start = self.index(0, y);
        &self.current[start..start + self.width]
    }

    /// Copy this board and its neighbor counts into fresh storage of the same logical size.
    pub fn deep_copy(&self) -> Grid {
        let mut copy = Self::allocate(
            self.width,
            self.height,
            self.config.initial_margin,
            self.config,
        );
        copy.capped = self.capped;
        let span = self.width + 2;
        for row in 0..self.height + 2 {
            let src = (self.origin_y - 1 + row) * self.stride + self.origin_x - 1;
            let dst = (copy.origin_y - 1 + row) * copy.stride + copy.origin_x - 1;
            copy.current[dst..dst + span].copy_from_slice(&self.current[src..src + span]);
        }
        copy
    }

    /// Copy the live cells' bounding box into a new board with `padding` dead cells on every side.
    ///
    /// An empty board yields an empty `2 * padding` square.
    pub fn trimmed_copy(&self, padding: usize) -> Grid {
        let bounds = match self.alive_bounds() {
            Some(bounds) => bounds,
            None => {
                let side = 2 * padding;
                return Self::allocate(side, side, self.config.initial_margin, self.config);
            }
        };
        let mut copy = Self::allocate(
            bounds.width() + 2 * padding,
            bounds.height() + 2 * padding,
            self.config.initial_margin,
            self.config,
        );
        for (y, x) in iproduct!(bounds.min_y..bounds.max_y, bounds.min_x..bounds.max_x) {
            if self.is_alive(x, y) {
                copy.edit_current(true, x - bounds.min_x + padding, y - bounds.min_y + padding);
            }
        }
        copy
    }

    /// Number of live cells in the current generation.
    pub fn population(&self) -> usize {
        (0..self.height)
            .map(|y| self.row(y).iter().filter(|c| c.is_alive()).count())
            .sum()
    }

    /// The tight bounds of all live cells, if there are any.
    pub fn alive_bounds(&self) -> Option<Bounds> {
        let mut bounds: Option<Bounds> = None;
        for y in 0..self.height {
            let row = self.row(y);
            let first = match row.iter().position(|c| c.is_alive()) {
                Some(first) => first,
                None => continue,
            };
            let last = row.iter().rposition(|c| c.is_alive()).unwrap_or(first);
            bounds = Some(match bounds {
                None => Bounds {
                    min_x: first,
                    min_y: y,
                    max_x: last + 1,
                    max_y: y + 1,
                },
                Some(b) => Bounds {
                    min_x: b.min_x.min(first),
                    min_y: b.min_y,
                    max_x: b.max_x.max(last + 1),
                    max_y: y + 1,
                },
            });
        }
        bounds
    }

    /// The bounds of all live cells, or the whole board when nothing is alive.
    pub fn bounding_box(&self) -> Bounds {
        self.alive_bounds().unwrap_or(Bounds {
            min_x: 0,
            min_y: 0,
            max_x: self.width,
            max_y: self.height,
        })
    }

    /// The current generation inside [`bounding_box`](Self::bounding_box) as row-major cell data.
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        let b = self.bounding_box();
        (b.min_y..b.max_y)
            .map(|y| self.row(y)[b.min_x..b.max_x].iter().map(|c| c.is_alive()).collect())
            .collect()
    }

    /// The live cell at `(x, y)` of the trimmed pattern, if any.
    fn trimmed_alive(&self, bounds: &Bounds, x: usize, y: usize) -> bool {
        self.is_alive(bounds.min_x + x, bounds.min_y + y)
    }

    /// Raw access to both generations for one sweep over the board.
    #[inline]
    pub(crate) fn sweep(&mut self) -> Sweep<'_> {
        Sweep {
            current: self.current.as_ptr(),
            next: self.next.as_mut_ptr(),
            stride: self.stride,
            origin: self.index(0, 0),
            width: self.width,
            height: self.height,
            _grid: PhantomData,
        }
    }

    /// Checks the stored neighbor count of every logical cell against its neighbors.
    #[cfg(test)]
    pub(crate) fn counts_consistent(&self) -> bool {
        iproduct!(0..self.height, 0..self.width).all(|(y, x)| {
            let live = MooreDirection::directions()
                .filter(|dir| {
                    let (dx, dy) = dir.delta();
                    let nx = x as isize + dx;
                    let ny = y as isize + dy;
                    nx >= 0
                        && ny >= 0
                        && (nx as usize) < self.width
                        && (ny as usize) < self.height
                        && self.is_alive(nx as usize, ny as usize)
                })
                .count();
            live == self.neighbor_count(x, y) as usize
        })
    }
}

/// Flip a cell in `buf` and update the eight neighbor counts around it.
#[inline]
fn write(buf: &mut [Cell], stride: usize, ix: usize, alive: bool) {
    if !buf[ix].set_alive(alive) {
        return;
    }
    for dir in MooreDirection::directions() {
        let n = (ix as isize + dir.offset(stride)) as usize;
        if alive {
            buf[n].add_neighbor();
        } else {
            buf[n].remove_neighbor();
        }
    }
}

/// Unsynchronized access to a grid's two generations for the duration of one step.
///
/// The current generation is only read and the next generation only written. Callers
/// sharing a `Sweep` between threads must make sure no two threads write the same cell
/// or its neighbors at the same time.
pub(crate) struct Sweep<'a> {
    current: *const Cell,
    next: *mut Cell,
    stride: usize,
    origin: usize,
    pub(crate) width: usize,
    pub(crate) height: usize,
    _grid: PhantomData<&'a mut Grid>,
}

unsafe impl Send for Sweep<'_> {}
unsafe impl Sync for Sweep<'_> {}

impl Sweep<'_> {
    /// # Safety
    ///
    /// `(x, y)` must be inside the logical board.
    #[inline]
    pub(crate) unsafe fn current(&self, x: usize, y: usize) -> Cell {
        *self.current.add(self.origin + y * self.stride + x)
    }

    /// Mark a next-generation cell alive. The next buffer starts a step all dead, so only
    /// births and survivals need writing.
    ///
    /// # Safety
    ///
    /// `(x, y)` must be inside the logical board, written at most once per step, and no other
    /// thread may be writing this cell or any of its neighbors.
    #[inline]
    pub(crate) unsafe fn set_next_alive(&self, x: usize, y: usize) {
        let ix = self.origin + y * self.stride + x;
        if (*self.next.add(ix)).set_alive(true) {
            for dir in MooreDirection::directions() {
                (*self.next.offset(ix as isize + dir.offset(self.stride))).add_neighbor();
            }
        }
    }
}

impl PartialEq for Grid {
    /// Boards are equal when their trimmed live patterns match, wherever they sit.
    fn eq(&self, other: &Grid) -> bool {
        match (self.alive_bounds(), other.alive_bounds()) {
            (None, None) => true,
            (Some(a), Some(b)) => {
                a.width() == b.width()
                    && a.height() == b.height()
                    && iproduct!(0..a.height(), 0..a.width()).all(|(y, x)| {
                        self.trimmed_alive(&a, x, y) == other.trimmed_alive(&b, x, y)
                    })
            }
            _ => false,
        }
    }
}

impl Eq for Grid {}

impl Hash for Grid {
    fn hash<H: Hasher>(&self, state: &mut H) {
        let bounds = match self.alive_bounds() {
            Some(bounds) => bounds,
            None => return 0usize.hash(state),
        };
        bounds.width().hash(state);
        bounds.height().hash(state);
        for y in bounds.min_y..bounds.max_y {
            // Pack each trimmed row into 64-cell words.
            for chunk in self.row(y)[bounds.min_x..bounds.max_x].chunks(64) {
                let word = chunk
                    .iter()
                    .enumerate()
                    .fold(0u64, |w, (i, c)| w | (c.is_alive() as u64) << i);
                state.write_u64(word);
            }
        }
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Grid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("physical", &(self.stride, self.rows))
            .field("origin", &(self.origin_x, self.origin_y))
            .field("margin", &self.margin)
            .field("capped", &self.capped)
            .finish()
    }
}

impl fmt::Display for Grid {
    /// One line per row, `O` for live and `.` for dead cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.height {
            for c in self.row(y) {
                f.write_str(c.is_alive().as_some("O").unwrap_or("."))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Default for Grid {
    fn default() -> Self {
        Grid::new(0, 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corners() -> Grid {
        let mut grid = Grid::new(4, 4);
        grid.edit_current(true, 0, 0);
        grid.edit_current(true, 3, 3);
        grid
    }

    #[test]
    fn population_of_checkerboard_pattern() {
        let mut grid = Grid::new(4, 4);
        for &(x, y) in &[(0, 0), (2, 0), (1, 1), (3, 1), (0, 2), (2, 2), (1, 3), (3, 3)] {
            grid.edit_current(true, x, y);
        }
        assert_eq!(grid.population(), 8);
        assert!(grid.counts_consistent());
    }

    #[test]
    fn trimmed_copy_of_touched_corners() {
        let grid = corners();
        let trimmed = grid.trimmed_copy(0);
        assert_eq!((trimmed.width(), trimmed.height()), (4, 4));
        assert!(trimmed.is_alive(0, 0) && trimmed.is_alive(3, 3));
        assert_eq!(trimmed.population(), 2);

        let padded = grid.trimmed_copy(1);
        assert_eq!((padded.width(), padded.height()), (6, 6));
        assert!(padded.is_alive(1, 1) && padded.is_alive(4, 4));
        assert!(!padded.is_alive(0, 0) && !padded.is_alive(5, 5));
        assert_eq!(padded.population(), 2);
        assert!(padded.counts_consistent());
    }

    #[test]
    fn trimmed_copy_of_empty_board() {
        let grid = Grid::new(7, 3);
        let trimmed = grid.trimmed_copy(2);
        assert_eq!((trimmed.width(), trimmed.height()), (4, 4));
        assert_eq!(trimmed.population(), 0);
        assert_eq!(grid.trimmed_copy(0).width(), 0);
    }

    #[test]
    fn edits_keep_neighbor_counts() {
        let mut grid = Grid::new(6, 5);
        let edits = [
            (true, 0, 0),
            (true, 1, 0),
            (true, 1, 1),
            (true, 5, 4),
            (false, 1, 0),
            (true, 2, 2),
            (false, 0, 0),
            (false, 0, 0),
            (true, 4, 4),
        ];
        for &(alive, x, y) in &edits {
            grid.edit_current(alive, x, y);
            assert!(grid.counts_consistent());
        }
        assert_eq!(grid.neighbor_count(1, 1), 1);
        assert_eq!(grid.neighbor_count(2, 1), 2);
        assert_eq!(grid.neighbor_count(4, 3), 2);
    }

    #[test]
    fn advance_swaps_and_clears() {
        let mut grid = Grid::new(5, 5);
        grid.edit_current(true, 2, 2);
        grid.set_next(true, 1, 2);
        grid.set_next(true, 3, 2);
        grid.advance();
        assert!(!grid.is_alive(2, 2));
        assert!(grid.is_alive(1, 2) && grid.is_alive(3, 2));
        assert_eq!(grid.neighbor_count(2, 2), 2);
        assert!(grid.counts_consistent());

        // The old generation must not leak into the next one.
        grid.set_next(true, 0, 0);
        grid.advance();
        assert_eq!(grid.population(), 1);
        assert!(grid.counts_consistent());
    }

    #[test]
    fn bounding_box_falls_back_to_board() {
        let mut grid = Grid::new(8, 6);
        assert_eq!(grid.alive_bounds(), None);
        assert_eq!(
            grid.bounding_box(),
            Bounds {
                min_x: 0,
                min_y: 0,
                max_x: 8,
                max_y: 6
            }
        );
        grid.edit_current(true, 5, 1);
        grid.edit_current(true, 2, 4);
        assert_eq!(
            grid.bounding_box(),
            Bounds {
                min_x: 2,
                min_y: 1,
                max_x: 6,
                max_y: 5
            }
        );
    }

    #[test]
    fn growth_from_bottom_right_corner() {
        let mut grid = Grid::new(4, 4);
        let mut last = (grid.width(), grid.height());
        let mut last_physical = (grid.physical_width(), grid.physical_height());
        let mut margins = vec![grid.margin()];
        for _ in 0..100 {
            let (w, h) = (grid.width(), grid.height());
            grid.edit_current(true, w - 1, h - 1);
            assert!(grid.grow_if_needed());
            let size = (grid.width(), grid.height());
            assert_eq!(size, (last.0 + 1, last.1 + 1));
            let physical = (grid.physical_width(), grid.physical_height());
            assert!(physical.0 >= last_physical.0 && physical.1 >= last_physical.1);
            if physical != last_physical {
                margins.push(grid.margin());
                assert_eq!(physical, (size.0 + 2 * grid.margin(), size.1 + 2 * grid.margin()));
            } else {
                assert_eq!(grid.margin(), margins[margins.len() - 1]);
            }
            assert!(grid.counts_consistent());
            last = size;
            last_physical = physical;
        }
        // One doubling per reallocation, at widths 11, 28 and 65.
        assert_eq!(margins, vec![10, 20, 40, 80]);
        assert_eq!(grid.margin(), 80);
        assert_eq!(grid.physical_width(), 65 + 2 * 80);
        assert_eq!(grid.population(), 100);
        assert!(!grid.grow_if_needed());
    }

    #[test]
    fn growth_to_the_top_left_shifts_coordinates() {
        let mut grid = Grid::new(3, 3);
        grid.edit_current(true, 0, 0);
        assert!(grid.grow_if_needed());
        assert_eq!((grid.width(), grid.height()), (4, 4));
        assert!(grid.is_alive(1, 1));
        assert!(!grid.grow_if_needed());
    }

    #[test]
    fn growth_stops_at_the_ceiling() {
        let config = GridConfig {
            initial_margin: 5,
            growth_threshold: 2,
            max_cells: 200,
        };
        let mut grid = Grid::with_config(4, 4, config).unwrap();
        for _ in 0..10 {
            let (w, h) = (grid.width(), grid.height());
            grid.edit_current(true, w - 1, h - 1);
            grid.grow_if_needed();
        }
        assert!(grid.is_capped());
        let frozen = (grid.width(), grid.height());
        assert_eq!(frozen, (7, 7));
        assert!(!grid.grow_if_needed());
        assert_eq!((grid.width(), grid.height()), frozen);
    }

    #[test]
    fn equality_ignores_offset_and_storage() {
        let mut a = Grid::new(10, 10);
        let mut b = Grid::new(30, 5);
        for &(x, y) in &[(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)] {
            a.edit_current(true, x + 4, y + 6);
            b.edit_current(true, x + 20, y + 1);
        }
        assert_eq!(a, b);
        let hash = |g: &Grid| {
            let mut h = std::collections::hash_map::DefaultHasher::new();
            g.hash(&mut h);
            h.finish()
        };
        assert_eq!(hash(&a), hash(&b));
        b.edit_current(false, 20, 3);
        assert_ne!(a, b);
        assert_eq!(Grid::new(3, 3), Grid::new(9, 1));
    }

    #[test]
    fn deep_copy_is_independent() {
        let mut grid = corners();
        let copy = grid.deep_copy();
        grid.edit_current(true, 1, 1);
        assert_eq!(copy.population(), 2);
        assert_eq!((copy.width(), copy.height()), (4, 4));
        assert!(copy.counts_consistent());
        assert_eq!(copy, corners());
    }

    #[test]
    fn rows_round_trip_through_bounding_box() {
        let rows = vec![
            vec![false, false, false],
            vec![false, true, false],
            vec![true, true],
        ];
        let grid = Grid::from_rows(&rows);
        assert_eq!((grid.width(), grid.height()), (3, 3));
        assert_eq!(grid.to_rows(), vec![vec![false, true], vec![true, true]]);
        assert_eq!(grid.to_string(), "...\n.O.\nOO.\n");
        assert_eq!(Grid::from_fn(3, 3, |x, y| rows[y].get(x) == Some(&true)), grid);
    }
}
