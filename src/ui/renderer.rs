/// Presentation layer: draws the maze wall lattice to the terminal.
///
/// Cell (x, y) sits at lattice position (2x+1, 2y+1); the odd slots in
/// between hold its walls and the even/even slots are always junctions.
/// A maze therefore paints as a (2·cols+1) × (2·rows+1) character block,
/// clipped by a camera window centered on the player when the terminal
/// is smaller than the lattice.
///
/// All terminal commands are batched with `queue!` into a buffered
/// writer and flushed once per frame.

use std::io::{self, BufWriter, Write};
use std::time::Duration;

use crossterm::{
    cursor::{self, MoveTo},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};

use crate::domain::cell::Direction;
use crate::sim::session::{Phase, Session};

const HUD_ROW: u16 = 0;
const MAP_ROW: u16 = 2;
/// Rows reserved below the map: one gap + one help line.
const FOOTER_ROWS: u16 = 2;

const WALL_COLOR: Color = Color::Red;
const PLAYER_COLOR: Color = Color::Yellow;
const EXIT_COLOR: Color = Color::Green;
const HUD_COLOR: Color = Color::White;
const DIM_COLOR: Color = Color::DarkGrey;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Glyph {
    ch: char,
    color: Color,
}

const BLANK: Glyph = Glyph { ch: ' ', color: Color::Reset };
const WALL: Glyph = Glyph { ch: '█', color: WALL_COLOR };
const PLAYER: Glyph = Glyph { ch: '@', color: PLAYER_COLOR };
const EXIT: Glyph = Glyph { ch: 'E', color: EXIT_COLOR };

pub struct Renderer {
    writer: BufWriter<io::Stdout>,
    term_w: u16,
    term_h: u16,
    last_phase: Option<Phase>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            writer: BufWriter::with_capacity(16384, io::stdout()),
            term_w: 0,
            term_h: 0,
            last_phase: None,
        }
    }

    pub fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(
            self.writer,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            Clear(ClearType::All)
        )?;
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        self.term_w = tw;
        self.term_h = th;
        Ok(())
    }

    pub fn cleanup(&mut self) -> io::Result<()> {
        execute!(
            self.writer,
            ResetColor,
            cursor::Show,
            terminal::LeaveAlternateScreen
        )?;
        terminal::disable_raw_mode()
    }

    pub fn render(&mut self, session: &Session, message: Option<&str>) -> io::Result<()> {
        // Resize or phase change → full clear for a clean slate.
        let (tw, th) = terminal::size().unwrap_or((80, 24));
        if tw != self.term_w || th != self.term_h || self.last_phase != Some(session.phase) {
            self.term_w = tw;
            self.term_h = th;
            self.last_phase = Some(session.phase);
            queue!(self.writer, Clear(ClearType::All))?;
        }

        if self.term_w < 24 || self.term_h < MAP_ROW + FOOTER_ROWS + 3 {
            queue!(
                self.writer,
                MoveTo(0, 0),
                SetForegroundColor(HUD_COLOR),
                Print("Terminal too small for Mazebound")
            )?;
            return self.writer.flush();
        }

        self.draw_hud(session, message)?;
        self.draw_maze(session)?;
        self.draw_help()?;
        if session.phase == Phase::Won {
            self.draw_win_overlay(session)?;
        }

        self.writer.flush()
    }

    fn draw_hud(&mut self, session: &Session, message: Option<&str>) -> io::Result<()> {
        let hud = format!(
            "Level {:<2}   Time {}   Moves {:<5}",
            session.level,
            format_time(session.elapsed()),
            session.moves,
        );
        let mut line = hud;
        if let Some(msg) = message {
            line.push_str("   ");
            line.push_str(msg);
        }
        line.truncate(self.term_w as usize);
        let pad = self.term_w as usize - line.len();
        queue!(
            self.writer,
            MoveTo(0, HUD_ROW),
            SetForegroundColor(HUD_COLOR),
            Print(line),
            Print(" ".repeat(pad)),
        )
    }

    fn draw_help(&mut self) -> io::Result<()> {
        let help = match self.last_phase {
            Some(Phase::Won) => "[N] next level   [R] replay   [Q] quit",
            _ => "Arrows/WASD move   [R] restart   [Q] quit",
        };
        let row = self.term_h - 1;
        let col = (self.term_w as usize).saturating_sub(help.len()) / 2;
        queue!(
            self.writer,
            MoveTo(col as u16, row),
            SetForegroundColor(DIM_COLOR),
            Print(help),
        )
    }

    fn draw_maze(&mut self, session: &Session) -> io::Result<()> {
        let lattice = compose_lattice(session);
        let lh = lattice.len();
        let lw = if lh > 0 { lattice[0].len() } else { 0 };

        let avail_w = self.term_w as usize;
        let avail_h = (self.term_h - MAP_ROW - FOOTER_ROWS) as usize;
        let view_w = avail_w.min(lw);
        let view_h = avail_h.min(lh);

        // Camera: clamp a window centered on the player's lattice slot.
        let (px, py) = (session.player.x * 2 + 1, session.player.y * 2 + 1);
        let cam_x = camera_origin(px, lw, view_w);
        let cam_y = camera_origin(py, lh, view_h);

        // Center the (possibly smaller) window on screen.
        let ox = (avail_w - view_w) / 2;
        let oy = MAP_ROW as usize + (avail_h - view_h) / 2;

        let mut color = Color::Reset;
        queue!(self.writer, SetForegroundColor(color))?;
        for vy in 0..view_h {
            queue!(self.writer, MoveTo(ox as u16, (oy + vy) as u16))?;
            let mut run = String::with_capacity(view_w);
            for vx in 0..view_w {
                let g = lattice[cam_y + vy][cam_x + vx];
                if g.color != color {
                    if !run.is_empty() {
                        queue!(self.writer, Print(std::mem::take(&mut run)))?;
                    }
                    queue!(self.writer, SetForegroundColor(g.color))?;
                    color = g.color;
                }
                run.push(g.ch);
            }
            if !run.is_empty() {
                queue!(self.writer, Print(run))?;
            }
        }
        Ok(())
    }

    fn draw_win_overlay(&mut self, session: &Session) -> io::Result<()> {
        let lines = [
            format!("You escaped level {}!", session.level),
            format!("Final time  {}", format_time(session.elapsed())),
            format!("Moves taken {}", session.moves),
        ];
        let inner = lines.iter().map(|l| l.len()).max().unwrap_or(0) + 4;
        let top = (self.term_h as usize / 2).saturating_sub(lines.len() / 2 + 1);
        let left = (self.term_w as usize).saturating_sub(inner + 2) / 2;

        let horiz = "─".repeat(inner);
        queue!(
            self.writer,
            SetForegroundColor(EXIT_COLOR),
            MoveTo(left as u16, top as u16),
            Print(format!("┌{horiz}┐")),
        )?;
        for (i, line) in lines.iter().enumerate() {
            queue!(
                self.writer,
                MoveTo(left as u16, (top + 1 + i) as u16),
                Print(format!("│ {:^w$} │", line, w = inner - 2)),
            )?;
        }
        queue!(
            self.writer,
            MoveTo(left as u16, (top + 1 + lines.len()) as u16),
            Print(format!("└{horiz}┘")),
        )
    }
}

/// Window origin along one axis: follow `target`, clamped to the lattice.
fn camera_origin(target: usize, lattice_len: usize, view_len: usize) -> usize {
    if lattice_len <= view_len {
        0
    } else {
        target
            .saturating_sub(view_len / 2)
            .min(lattice_len - view_len)
    }
}

/// Paint the wall lattice for the whole maze, exit and player included.
fn compose_lattice(session: &Session) -> Vec<Vec<Glyph>> {
    let grid = session.maze.grid();
    let (lw, lh) = (grid.cols() * 2 + 1, grid.rows() * 2 + 1);
    let mut lattice = vec![vec![BLANK; lw]; lh];

    for cell in grid.iter() {
        let (lx, ly) = (cell.x * 2 + 1, cell.y * 2 + 1);
        // Junction points are wall material whenever any cell touches them.
        lattice[ly - 1][lx - 1] = WALL;
        lattice[ly - 1][lx + 1] = WALL;
        lattice[ly + 1][lx - 1] = WALL;
        lattice[ly + 1][lx + 1] = WALL;
        if cell.blocks(Direction::North) {
            lattice[ly - 1][lx] = WALL;
        }
        if cell.blocks(Direction::South) {
            lattice[ly + 1][lx] = WALL;
        }
        if cell.blocks(Direction::West) {
            lattice[ly][lx - 1] = WALL;
        }
        if cell.blocks(Direction::East) {
            lattice[ly][lx + 1] = WALL;
        }
    }

    let (ex, ey) = session.maze.exit();
    lattice[ey * 2 + 1][ex * 2 + 1] = EXIT;
    // Player last, so it shows on top when standing on the exit.
    lattice[session.player.y * 2 + 1][session.player.x * 2 + 1] = PLAYER;

    lattice
}

/// mm:ss.mmm, matching the in-game clock format.
pub fn format_time(d: Duration) -> String {
    let ms = d.as_millis();
    format!("{:02}:{:02}.{:03}", ms / 60_000, (ms % 60_000) / 1000, ms % 1000)
}
