use crate::grid::Cell;
use Direction::*;

/// Movement heading on the grid. Closed set; the input layer translates
/// keys into these before they reach the core.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The 180-degree reversal of this heading.
    pub fn opposite(self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    /// One-cell offset in grid units.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }
}

/// The segmented creature. The body is an ordered cell sequence with the
/// head at index 0; `target_len` is the length the body grows toward, one
/// segment per step.
pub struct Snake {
    body: Vec<Cell>,
    heading: Direction,
    target_len: usize,
}

impl Snake {
    /// Build a straight body of `len` segments with its head at `head`,
    /// trailing away opposite to `heading`.
    pub fn new(head: Cell, len: usize, heading: Direction) -> Self {
        let (dx, dy) = heading.offset();
        let body = (0..len as i32)
            .map(|i| Cell::new(head.x - dx * i, head.y - dy * i))
            .collect();
        Snake { body, heading, target_len: len }
    }

    pub fn body(&self) -> &[Cell] {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Change heading unless the request is the exact opposite of the
    /// current one; a reversal would put the head on the neck cell, so it
    /// is silently ignored.
    pub fn set_heading(&mut self, requested: Direction) {
        if requested != self.heading.opposite() {
            self.heading = requested;
        }
    }

    /// Advance one cell in the current heading. The new head is prepended;
    /// the tail is dropped only when the body already has `target_len`
    /// segments, so a pending `grow` materializes as one kept tail cell.
    pub fn step(&mut self) {
        let (dx, dy) = self.heading.offset();
        let head = self.head();
        self.body.insert(0, Cell::new(head.x + dx, head.y + dy));
        if self.body.len() > self.target_len {
            self.body.pop();
        }
    }

    /// Queue one segment of growth, applied over the next step. Each call
    /// before a step adds exactly one segment, one step at a time.
    pub fn grow(&mut self) {
        self.target_len += 1;
    }

    /// True iff the head occupies the same cell as any other body segment.
    pub fn collides_with_self(&self) -> bool {
        self.body[1..].contains(&self.head())
    }

    /// True iff the head has left `[0, cells_wide) x [0, cells_high)`.
    pub fn collides_with_walls(&self, cells_wide: i32, cells_high: i32) -> bool {
        let head = self.head();
        head.x < 0 || head.y < 0 || head.x >= cells_wide || head.y >= cells_high
    }

    pub fn head_equals(&self, cell: Cell) -> bool {
        self.head() == cell
    }
}
