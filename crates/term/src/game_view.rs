//! GameView: draws a `GameSnapshot` into a framebuffer.
//!
//! Pure, no I/O. Layout is the board in a frame with a side panel on the
//! right (best score, score, combo, level, lines and the next-piece preview).

use crate::core::shapes::{shape_matrix, MAX_BOX};
use crate::core::GameSnapshot;
use crate::fb::{shade, CellStyle, FrameBuffer};
use crate::types::{GamePhase, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

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

/// Host-side state shown next to the game (not part of the snapshot).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostStatus {
    pub sound_on: bool,
}

impl Default for HostStatus {
    fn default() -> Self {
        Self { sound_on: true }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const PANEL_MIN_W: u16 = 10;

const FIELD: CellStyle = CellStyle::new(shade::DARKEST, shade::LIGHTEST);
const FRAME: CellStyle = CellStyle::new(shade::DARKEST, shade::LIGHT);
const LABEL: CellStyle = CellStyle::new(shade::DARKEST, shade::LIGHT).bold();
const VALUE: CellStyle = CellStyle::new(shade::DARKEST, shade::LIGHT);
const BANNER: CellStyle = CellStyle::new(shade::LIGHTEST, shade::DARKEST).bold();

/// Origin of the board frame on screen.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal view of the game.
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 roughly squares up terminal glyphs.
        Self::new(2, 1)
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &GameSnapshot,
        host: HostStatus,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(FRAME.cell(' '));

        let w = BOARD_WIDTH as u16 * self.cell_w + 2;
        let h = BOARD_HEIGHT as u16 * self.cell_h + 2;
        let frame = Frame {
            x: viewport.width.saturating_sub(w + PANEL_MIN_W + 2) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
        };

        fb.fill_rect(
            frame.x + 1,
            frame.y + 1,
            w - 2,
            h - 2,
            ' ',
            FIELD,
        );
        draw_border(fb, frame, FRAME);

        self.draw_board(fb, frame, snap);
        self.draw_pieces(fb, frame, snap);
        self.draw_side_panel(fb, frame, snap, host, viewport);

        match snap.phase {
            GamePhase::Title => {
                draw_banner(fb, frame, 0, "GB TETRIS");
                draw_banner(fb, frame, 2, "ENTER");
            }
            GamePhase::Paused => draw_banner(fb, frame, 0, "PAUSED"),
            GamePhase::GameOver => {
                draw_banner(fb, frame, 0, "GAME OVER");
                draw_banner(fb, frame, 2, "ENTER");
            }
            GamePhase::Running => {}
        }
    }

    /// Allocating convenience wrapper.
    pub fn render(&self, snap: &GameSnapshot, host: HostStatus, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, host, viewport, &mut fb);
        fb
    }

    fn draw_board(&self, fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot) {
        for y in 0..BOARD_HEIGHT as i8 {
            // Flashing rows are drawn solid, inverted.
            if snap.is_clearing(y as usize) {
                for x in 0..BOARD_WIDTH as i8 {
                    self.fill_cell(fb, frame, x, y, '▓', FIELD.inverted());
                }
                continue;
            }
            for x in 0..BOARD_WIDTH as i8 {
                if let Some(Some(kind)) = snap.board.get(x, y) {
                    self.fill_cell(fb, frame, x, y, glyph(kind), block_style(kind));
                }
            }
        }
    }

    fn draw_pieces(&self, fb: &mut FrameBuffer, frame: Frame, snap: &GameSnapshot) {
        let Some(active) = snap.active else {
            return;
        };

        if let Some(ghost_y) = snap.ghost_y {
            for &(dx, dy) in active.shape().iter() {
                self.fill_cell(fb, frame, active.x + dx, ghost_y + dy, '░', FIELD.dim());
            }
        }
        for (x, y) in active.cells() {
            self.fill_cell(fb, frame, x, y, glyph(active.kind), block_style(active.kind));
        }
    }

    /// Cells outside the visible field are skipped.
    fn fill_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, ch: char, style: CellStyle) {
        if x < 0 || x >= BOARD_WIDTH as i8 || y < 0 || y >= BOARD_HEIGHT as i8 {
            return;
        }
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + y as u16 * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(
        &self,
        fb: &mut FrameBuffer,
        frame: Frame,
        snap: &GameSnapshot,
        host: HostStatus,
        viewport: Viewport,
    ) {
        let x = frame.x.saturating_add(frame.w).saturating_add(2);
        if x.saturating_add(PANEL_MIN_W) > viewport.width {
            return;
        }

        let mut y = frame.y;
        for (label, value) in [
            ("TOP", snap.high_score),
            ("SCORE", snap.score),
            ("COMBO", snap.combo),
            ("LEVEL", snap.level),
            ("LINES", snap.lines),
        ] {
            fb.put_str(x, y, label, LABEL);
            fb.put_u32(x, y + 1, value, VALUE);
            y = y.saturating_add(2);
        }

        fb.put_str(x, y, "NEXT", LABEL);
        y = y.saturating_add(1);
        if let Some(next) = snap.next {
            let matrix = shape_matrix(next.kind, 0);
            for (row, cells) in matrix.iter().enumerate() {
                for (col, &filled) in cells.iter().enumerate() {
                    if filled {
                        let cx = x + col as u16 * self.cell_w;
                        let cy = y + row as u16;
                        fb.fill_rect(cx, cy, self.cell_w, 1, glyph(next.kind), block_style(next.kind));
                    }
                }
            }
        }
        y = y.saturating_add(MAX_BOX as u16 + 1);

        fb.put_str(x, y, if host.sound_on { "SOUND ON" } else { "SOUND OFF" }, VALUE.dim());
    }
}

fn draw_border(fb: &mut FrameBuffer, f: Frame, style: CellStyle) {
    if f.w < 2 || f.h < 2 {
        return;
    }
    let (right, bottom) = (f.x + f.w - 1, f.y + f.h - 1);

    fb.put_char(f.x, f.y, '┌', style);
    fb.put_char(right, f.y, '┐', style);
    fb.put_char(f.x, bottom, '└', style);
    fb.put_char(right, bottom, '┘', style);
    for x in f.x + 1..right {
        fb.put_char(x, f.y, '─', style);
        fb.put_char(x, bottom, '─', style);
    }
    for y in f.y + 1..bottom {
        fb.put_char(f.x, y, '│', style);
        fb.put_char(right, y, '│', style);
    }
}

/// Centered text `offset` rows below the middle of the frame.
fn draw_banner(fb: &mut FrameBuffer, f: Frame, offset: u16, text: &str) {
    let text_w = text.chars().count() as u16;
    let x = f.x + f.w.saturating_sub(text_w) / 2;
    let y = f.y + f.h / 2 - 1 + offset;
    fb.put_str(x, y, text, BANNER);
}

/// Shading stands in for color on a four-shade screen.
fn glyph(kind: PieceKind) -> char {
    match kind {
        PieceKind::I | PieceKind::O => '█',
        PieceKind::T | PieceKind::L => '▓',
        PieceKind::S | PieceKind::Z | PieceKind::J => '▒',
    }
}

fn block_style(kind: PieceKind) -> CellStyle {
    let fg = match kind {
        PieceKind::I | PieceKind::T | PieceKind::J => shade::DARKEST,
        PieceKind::O | PieceKind::S | PieceKind::Z | PieceKind::L => shade::DARK,
    };
    CellStyle::new(fg, shade::LIGHTEST)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, GameState, PieceFactory};
    use crate::types::GameAction;

    fn text(fb: &FrameBuffer) -> String {
        (0..fb.height()).map(|y| fb.row_text(y) + "\n").collect()
    }

    #[test]
    fn title_screen_shows_banner_and_panel() {
        let game = GameState::new(1).with_high_score(777);
        let fb = GameView::default().render(&game.snapshot(), HostStatus::default(), Viewport::new(50, 22));
        let screen = text(&fb);
        assert!(screen.contains("GB TETRIS"));
        assert!(screen.contains("TOP"));
        assert!(screen.contains("777"));
        assert!(screen.contains("NEXT"));
        assert!(screen.contains("SOUND ON"));
    }

    #[test]
    fn overlays_follow_phase() {
        let mut game = GameState::new(1);
        game.apply_action(GameAction::Start);
        let view = GameView::default();
        let vp = Viewport::new(50, 22);

        let screen = text(&view.render(&game.snapshot(), HostStatus::default(), vp));
        assert!(!screen.contains("PAUSED"));

        game.apply_action(GameAction::Pause);
        let screen = text(&view.render(&game.snapshot(), HostStatus { sound_on: false }, vp));
        assert!(screen.contains("PAUSED"));
        assert!(screen.contains("SOUND OFF"));
    }

    #[test]
    fn locked_cells_land_inside_frame() {
        let mut snap = GameState::new(1).snapshot();
        snap.board = Board::from_rows(&["I........."]);
        let view = GameView::new(2, 1).with_anchor_y(AnchorY::Top);
        let fb = view.render(&snap, HostStatus::default(), Viewport::new(24, 20));

        // Frame starts at x=0 for a viewport too narrow to center; bottom row is y=18.
        let cell = fb.get(1, 18).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    }

    #[test]
    fn clearing_rows_flash() {
        let mut game = GameState::with_factory(PieceFactory::scripted(vec![PieceKind::I]));
        game.apply_action(GameAction::Start);
        let mut snap = game.snapshot();
        snap.board = Board::from_rows(&["OOOOOOOOOO"]);
        snap.clearing_rows.push(17);

        let view = GameView::new(1, 1).with_anchor_y(AnchorY::Top);
        let fb = view.render(&snap, HostStatus::default(), Viewport::new(12, 20));
        let cell = fb.get(1, 18).unwrap();
        assert_eq!(cell.ch, '▓');
        assert_eq!(cell.style, FIELD.inverted());
    }
}
