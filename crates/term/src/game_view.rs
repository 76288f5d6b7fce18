//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::GameSnapshot;
use crate::fb::{CellStyle, FrameBuffer};
use crate::theme::Theme;
use crate::types::{Gravity, Phase, PieceKind};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Where the board frame landed in the framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardFrame {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// A lightweight terminal renderer for the game.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    theme: Theme,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            theme: Theme::default(),
        }
    }
}

impl GameView {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        self.theme = theme;
    }

    /// Position of the board frame for a snapshot in a viewport.
    pub fn board_frame(&self, snap: &GameSnapshot, viewport: Viewport) -> BoardFrame {
        let width = snap.width as u16 * self.cell_w + 2;
        let height = snap.height as u16 + 2;
        BoardFrame {
            x: viewport.width.saturating_sub(width + PANEL_W) / 2,
            y: viewport.height.saturating_sub(height) / 2,
            width,
            height,
        }
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers can reuse one framebuffer across frames; it is resized only
    /// when the viewport changes.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(self.theme.base());

        let frame = self.board_frame(snap, viewport);
        self.draw_border(fb, frame);

        let block = self.theme.block(snap.flip_count);
        let grid = self.theme.grid();
        for y in 0..snap.height as usize {
            for x in 0..snap.width as usize {
                if snap.cell(x, y).is_some() {
                    self.fill_board_cell(fb, frame, x as i8, y as i8, '█', block);
                } else {
                    self.fill_board_cell(fb, frame, x as i8, y as i8, '·', grid);
                }
            }
        }

        if let Some(ghost) = snap.ghost {
            let style = self.theme.ghost(snap.flip_count);
            for (x, y) in ghost {
                self.fill_board_cell(fb, frame, x, y, '░', style);
            }
        }

        if let Some(active) = snap.active {
            for (x, y) in active.cells {
                self.fill_board_cell(fb, frame, x, y, '█', block);
            }
        }

        self.draw_side_panel(fb, snap, frame);

        match snap.phase {
            Phase::Start => self.draw_overlay(fb, frame, &["FLIP TETRIS", "PRESS ENTER"]),
            Phase::Paused => self.draw_overlay(fb, frame, &["PAUSED", "P RESUME  M HOME"]),
            Phase::GameOver if snap.new_high_score => {
                self.draw_overlay(fb, frame, &["GAME OVER", "NEW HIGH SCORE", "R RESTART"])
            }
            Phase::GameOver => self.draw_overlay(fb, frame, &["GAME OVER", "R RESTART"]),
            Phase::Playing => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: BoardFrame) {
        let BoardFrame {
            x,
            y,
            width: w,
            height: h,
        } = frame;
        let style = self.theme.base();

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: BoardFrame,
        x: i8,
        y: i8,
        ch: char,
        style: CellStyle,
    ) {
        if x < 0 || y < 0 {
            return;
        }
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + y as u16;
        fb.fill_rect(px, py, self.cell_w, 1, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &GameSnapshot, frame: BoardFrame) {
        let panel_x = frame.x + frame.width + 2;
        if panel_x.saturating_add(PANEL_W) > fb.width() {
            return;
        }

        let label = self.theme.base().bold();
        let value = self.theme.base();
        let mut y = frame.y;

        for (name, number) in [
            ("SCORE", snap.score),
            ("HIGH", snap.high_score),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
            ("FLIPS", snap.flip_count),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y + 1, number, value);
            y += 3;
        }

        fb.put_str(panel_x, y, "NEXT", label);
        fb.put_str(panel_x, y + 1, piece_letter(snap.next), value);
        y += 3;

        fb.put_str(panel_x, y, "HOLD", label);
        let held = snap.hold.map(piece_letter).unwrap_or("-");
        let style = if snap.can_hold { value } else { value.dim() };
        fb.put_str(panel_x, y + 1, held, style);
        y += 3;

        fb.put_str(panel_x, y, "GRAVITY", label);
        let arrow = match snap.gravity {
            Gravity::Down => "v",
            Gravity::Up => "^",
        };
        fb.put_str(panel_x, y + 1, arrow, value);
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: BoardFrame, lines: &[&str]) {
        let style = self.theme.base().bold();
        let top = (frame.y + frame.height / 2).saturating_sub(lines.len() as u16 / 2);
        for (i, text) in lines.iter().enumerate() {
            let text_w = text.chars().count() as u16;
            let x = frame.x + frame.width.saturating_sub(text_w) / 2;
            fb.put_str(x, top + i as u16, text, style);
        }
    }
}

/// Columns reserved right of the board for the side panel.
const PANEL_W: u16 = 12;

fn piece_letter(kind: PieceKind) -> &'static str {
    match kind {
        PieceKind::I => "I",
        PieceKind::O => "O",
        PieceKind::T => "T",
        PieceKind::S => "S",
        PieceKind::Z => "Z",
        PieceKind::J => "J",
        PieceKind::L => "L",
    }
}
