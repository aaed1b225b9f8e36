//! GameView: maps a [`GameSnapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). Only the visible rows are drawn; the hidden
//! buffer rows above them never reach the screen.

use crate::core::{footprint, ActiveSnapshot, GameSnapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{PieceKind, Rotation, FIELD_COLS, HIDDEN_ROWS, VISIBLE_ROWS};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const SCREEN_BG: Rgb = Rgb::new(0, 0, 0);

const CONTROLS: [&str; 7] = [
    "<- ->  move",
    "^ X    rotate",
    "Z      rotate ccw",
    "v      soft drop",
    "SPACE  hard drop",
    "P pause R restart",
    "Q quit",
];

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

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Board placement inside the viewport, computed once per frame.
#[derive(Debug, Clone, Copy)]
struct Layout {
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
}

#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
    show_controls: bool,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
            show_controls: true,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    pub fn with_controls(mut self, show: bool) -> Self {
        self.show_controls = show;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    ///
    /// Allocation-free once the framebuffer has reached the viewport size.
    pub fn render_into(&self, snap: &GameSnapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().cell(' '));

        let board_w = (FIELD_COLS as u16) * self.cell_w;
        let board_h = (VISIBLE_ROWS as u16) * self.cell_h;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;
        let layout = Layout {
            start_x: viewport.width.saturating_sub(frame_w) / 2,
            start_y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(frame_h) / 2,
                AnchorY::Top => 0,
            },
            frame_w,
            frame_h,
        };

        fb.fill_rect(
            layout.start_x + 1,
            layout.start_y + 1,
            board_w,
            board_h,
            ' ',
            CellStyle::new(Rgb::new(80, 80, 90), BOARD_BG),
        );
        draw_border(
            fb,
            layout,
            CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG),
        );

        for vis_row in 0..VISIBLE_ROWS {
            let row = &snap.field[(vis_row + HIDDEN_ROWS) as usize];
            for (col, &id) in row.iter().enumerate() {
                match piece_from_cell(id) {
                    Some(kind) => self.draw_block(fb, layout, col as i8, vis_row as i8, kind),
                    None => self.fill_cell(
                        fb,
                        layout,
                        col as i8,
                        vis_row as i8,
                        '·',
                        CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim(),
                    ),
                }
            }
        }

        if let Some(active) = snap.active {
            self.draw_ghost(fb, layout, &active);
            self.draw_active(fb, layout, &active);
        }

        self.draw_side_panel(fb, snap, viewport, layout);

        if snap.game_over {
            draw_overlay(fb, layout, 0, "GAME OVER");
            draw_overlay(fb, layout, 1, "R to restart");
        } else if snap.paused {
            draw_overlay(fb, layout, 0, "PAUSED");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &GameSnapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_ghost(&self, fb: &mut FrameBuffer, layout: Layout, active: &ActiveSnapshot) {
        if active.drop_distance == 0 {
            return;
        }
        let style = CellStyle::new(Rgb::new(140, 140, 140), BOARD_BG).dim();
        let ghost_row = active.ghost_row();
        for (dc, dr) in footprint(active.kind, active.rotation) {
            self.fill_field_cell(fb, layout, active.col + dc, ghost_row + dr, '░', style);
        }
    }

    fn draw_active(&self, fb: &mut FrameBuffer, layout: Layout, active: &ActiveSnapshot) {
        for (dc, dr) in footprint(active.kind, active.rotation) {
            let style = CellStyle::new(piece_color(active.kind), BOARD_BG).bold();
            self.fill_field_cell(fb, layout, active.col + dc, active.row + dr, '█', style);
        }
    }

    /// Draw at a field coordinate, skipping anything in the hidden rows or
    /// outside the board.
    fn fill_field_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        col: i8,
        row: i8,
        ch: char,
        style: CellStyle,
    ) {
        let vis_row = row - HIDDEN_ROWS as i8;
        if col < 0 || col >= FIELD_COLS as i8 || vis_row < 0 || vis_row >= VISIBLE_ROWS as i8 {
            return;
        }
        self.fill_cell(fb, layout, col, vis_row, ch, style);
    }

    fn draw_block(&self, fb: &mut FrameBuffer, layout: Layout, col: i8, vis_row: i8, kind: PieceKind) {
        let style = CellStyle::new(piece_color(kind), BOARD_BG).bold();
        self.fill_cell(fb, layout, col, vis_row, '█', style);
    }

    fn fill_cell(
        &self,
        fb: &mut FrameBuffer,
        layout: Layout,
        col: i8,
        vis_row: i8,
        ch: char,
        style: CellStyle,
    ) {
        let px = layout.start_x + 1 + (col as u16) * self.cell_w;
        let py = layout.start_y + 1 + (vis_row as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        snap: &GameSnapshot,
        viewport: Viewport,
        layout: Layout,
    ) {
        let panel_x = layout
            .start_x
            .saturating_add(layout.frame_w)
            .saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), SCREEN_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), SCREEN_BG);

        let mut y = layout.start_y;
        for (name, number) in [
            ("SCORE", snap.score),
            ("HIGH", snap.high_score),
            ("LINES", snap.lines),
            ("LEVEL", snap.level),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), number, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        y = self.draw_preview(fb, panel_x, y, snap.next);
        y = y.saturating_add(1);

        if !self.show_controls {
            return;
        }
        let help = CellStyle::new(Rgb::new(150, 150, 160), SCREEN_BG).dim();
        for line in CONTROLS {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }

    /// Draw the spawn orientation of `kind` and return the row below it.
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, kind: PieceKind) -> u16 {
        let cells = footprint(kind, Rotation::North);
        let top = cells.iter().map(|&(_, r)| r).min().unwrap_or(0);
        let bottom = cells.iter().map(|&(_, r)| r).max().unwrap_or(0);
        let style = CellStyle::new(piece_color(kind), SCREEN_BG).bold();

        for &(dc, dr) in cells.iter() {
            let px = x + (dc as u16) * self.cell_w;
            let py = y + ((dr - top) as u16) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
        y.saturating_add(((bottom - top + 1) as u16) * self.cell_h)
    }
}

fn draw_border(fb: &mut FrameBuffer, layout: Layout, style: CellStyle) {
    let Layout {
        start_x: x,
        start_y: y,
        frame_w: w,
        frame_h: h,
    } = layout;
    if w < 2 || h < 2 {
        return;
    }

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

/// Centered text over the board, `line` rows below the middle.
fn draw_overlay(fb: &mut FrameBuffer, layout: Layout, line: u16, text: &str) {
    let y = layout.start_y + layout.frame_h / 2 + line;
    let text_w = text.chars().count() as u16;
    let x = layout.start_x + layout.frame_w.saturating_sub(text_w) / 2;
    let style = CellStyle::new(Rgb::new(255, 255, 255), SCREEN_BG).bold();
    fb.put_str(x, y, text, style);
}

/// Snapshot grid value (`0` empty, `id + 1` filled) to a piece kind.
fn piece_from_cell(v: u8) -> Option<PieceKind> {
    v.checked_sub(1).and_then(PieceKind::from_index)
}

fn piece_color(kind: PieceKind) -> Rgb {
    match kind {
        PieceKind::I => Rgb::new(80, 220, 220),
        PieceKind::O => Rgb::new(240, 220, 80),
        PieceKind::T => Rgb::new(200, 120, 220),
        PieceKind::S => Rgb::new(100, 220, 120),
        PieceKind::Z => Rgb::new(220, 80, 80),
        PieceKind::J => Rgb::new(80, 120, 220),
        PieceKind::L => Rgb::new(255, 165, 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_piece_from_cell_uses_id_plus_one() {
        assert_eq!(piece_from_cell(0), None);
        assert_eq!(piece_from_cell(1), Some(PieceKind::I));
        assert_eq!(piece_from_cell(7), Some(PieceKind::L));
        assert_eq!(piece_from_cell(8), None);
    }

    #[test]
    fn test_preview_height_matches_shape() {
        let view = GameView::default();
        let mut fb = FrameBuffer::new(10, 6);
        assert_eq!(view.draw_preview(&mut fb, 0, 0, PieceKind::I), 1);
        assert_eq!(view.draw_preview(&mut fb, 0, 2, PieceKind::T), 4);
        // T north: top row has the single middle block.
        assert_eq!(fb.row_text(2), "  ██      ");
        assert_eq!(fb.row_text(3), "██████    ");
    }
}
