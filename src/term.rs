//! Crossterm screen management for the terminal front end: a bordered
//! playfield centered in the terminal, one character per grid cell, plus
//! overlay boxes and key reading.

use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, terminal};

use gridsnake::{Cell, Direction, Snapshot};

const BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';

fn head_char(heading: Direction) -> char {
    match heading {
        Direction::Up => '^',
        Direction::Down => 'v',
        Direction::Left => '<',
        Direction::Right => '>',
    }
}

/// Terminal surface for one playfield. `origin` is the top-left corner of
/// the border box; grid cells map 1:1 to characters inside it.
pub struct Screen {
    stdout: Stdout,
    term_width: u16,
    term_height: u16,
    board_width: u16,
    board_height: u16,
    origin: (u16, u16),
}

impl Screen {
    /// Lay out a playfield of `cells_wide x cells_high` cells, centered.
    /// Fails if the terminal cannot fit the board plus its border.
    pub fn new(cells_wide: i32, cells_high: i32) -> anyhow::Result<Self> {
        let (term_width, term_height) = terminal::size()?;
        let need_w = cells_wide as u32 + 2;
        let need_h = cells_high as u32 + 2;
        if u32::from(term_width) < need_w || u32::from(term_height) < need_h {
            anyhow::bail!(
                "terminal is {}x{} but this grid needs at least {}x{} characters",
                term_width,
                term_height,
                need_w,
                need_h
            );
        }
        let origin = (
            (term_width - need_w as u16) / 2,
            (term_height - need_h as u16) / 2,
        );
        Ok(Screen {
            stdout: stdout(),
            term_width,
            term_height,
            board_width: cells_wide as u16,
            board_height: cells_high as u16,
            origin,
        })
    }

    pub fn setup(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        self.clear()
    }

    pub fn restore(&mut self) -> crossterm::Result<()> {
        terminal::disable_raw_mode()?;
        execute!(
            self.stdout,
            cursor::Show,
            cursor::EnableBlinking,
            LeaveAlternateScreen
        )
    }

    pub fn clear(&mut self) -> crossterm::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All))
    }

    pub fn draw_border(&mut self) -> crossterm::Result<()> {
        let (ox, oy) = self.origin;
        let end_x = ox + self.board_width + 1;
        let end_y = oy + self.board_height + 1;

        for x in ox..=end_x {
            let ch = if x == ox || x == end_x { '+' } else { '-' };
            self.print_at((x, oy), ch)?;
            self.print_at((x, end_y), ch)?;
        }
        for y in oy + 1..end_y {
            self.print_at((ox, y), '|')?;
            self.print_at((end_x, y), '|')?;
        }
        self.flush()
    }

    /// Draw the frame for one tick. `prev` enables incremental redraw:
    /// only cells that changed since the previous snapshot are touched.
    pub fn render(&mut self, prev: Option<&Snapshot>, snap: &Snapshot) -> crossterm::Result<()> {
        if let Some(prev) = prev {
            for cell in prev.body.iter().filter(|c| !snap.body.contains(c)) {
                self.put_cell(*cell, ' ')?;
            }
            if prev.food != snap.food && !snap.body.contains(&prev.food) {
                self.put_cell(prev.food, ' ')?;
            }
        }

        self.put_cell(snap.food, FOOD_CHAR)?;
        for cell in snap.body.iter().skip(1) {
            self.put_cell(*cell, BODY_CHAR)?;
        }
        // put_cell drops the head when it has stepped past the border.
        self.put_cell(snap.body[0], head_char(snap.heading))?;

        self.draw_score(snap.score)?;
        self.flush()
    }

    /// Repaint the whole body as crashed.
    pub fn draw_dead(&mut self, snap: &Snapshot) -> crossterm::Result<()> {
        for cell in &snap.body {
            self.put_cell(*cell, DEAD_SNAKE_CHAR)?;
        }
        self.flush()
    }

    /// The stand-in for the audio collaborator.
    pub fn bell(&mut self) -> crossterm::Result<()> {
        queue!(self.stdout, style::Print('\u{7}'))?;
        self.flush()
    }

    /// Show a centered message box over the playfield. The caller repaints
    /// the board afterwards; nothing underneath is saved.
    pub fn overlay(&mut self, lines: &[&str]) -> crossterm::Result<()> {
        let box_height = lines.len() as u16 + 2;
        let box_width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) as u16 + 2;
        let top_left = (
            (self.term_width - box_width) / 2,
            (self.term_height - box_height) / 2,
        );

        for y in [top_left.1, top_left.1 + box_height - 1].iter() {
            for dx in 0..box_width {
                self.print_at((top_left.0 + dx, *y), ' ')?;
            }
        }
        for (i, line) in lines.iter().enumerate() {
            let padded = format!("{: ^width$}", line, width = box_width as usize);
            let y = top_left.1 + i as u16 + 1;
            for (dx, ch) in padded.chars().enumerate() {
                self.print_at((top_left.0 + dx as u16, y), ch)?;
            }
        }
        self.flush()
    }

    pub fn read_key_blocking(&self) -> crossterm::Result<KeyEvent> {
        loop {
            if let Event::Key(ev) = read()? {
                return Ok(ev);
            }
        }
    }

    pub fn poll_keys(&self) -> crossterm::Result<Vec<KeyEvent>> {
        let mut events = vec![];
        while poll(Duration::from_millis(1))? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
        }
        Ok(events)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_score(&mut self, score: u32) -> crossterm::Result<()> {
        let (ox, oy) = self.origin;
        queue!(
            self.stdout,
            cursor::MoveTo(ox + 2, oy),
            style::Print(format!(" Score: {} ", score))
        )
    }

    // Cells outside the playfield are silently dropped.
    fn put_cell(&mut self, cell: Cell, ch: char) -> crossterm::Result<()> {
        if cell.x < 0
            || cell.y < 0
            || cell.x >= i32::from(self.board_width)
            || cell.y >= i32::from(self.board_height)
        {
            return Ok(());
        }
        let pos = (
            self.origin.0 + 1 + cell.x as u16,
            self.origin.1 + 1 + cell.y as u16,
        );
        self.print_at(pos, ch)
    }

    fn print_at(&mut self, pos: (u16, u16), ch: char) -> crossterm::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }

    fn flush(&mut self) -> crossterm::Result<()> {
        self.stdout.flush()?;
        Ok(())
    }
}
