//! Terminal rasterizer
//!
//! Maps the playfield onto a character grid. Used by the headless demo and
//! handy when eyeballing a snapshot in a test failure.

use std::io::Write;

use super::{FrameSnapshot, Renderer, Sprite, VisualKind};
use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};
use crate::sim::Tier;

pub const GRID_COLUMNS: usize = 80;
pub const GRID_ROWS: usize = 30;

fn glyph(sprite: &Sprite) -> char {
    let alt = sprite.frame == 1;
    match sprite.kind {
        VisualKind::Player => 'A',
        VisualKind::Adversary(Tier::Top) if alt => 'w',
        VisualKind::Adversary(Tier::Top) => 'W',
        VisualKind::Adversary(Tier::Middle) if alt => 'm',
        VisualKind::Adversary(Tier::Middle) => 'M',
        VisualKind::Adversary(Tier::Bottom) if alt => 'x',
        VisualKind::Adversary(Tier::Bottom) => 'X',
        VisualKind::PlayerShot => '|',
        VisualKind::AdversaryShot => '!',
        VisualKind::CoverBlock => '#',
        VisualKind::Flyer => '@',
    }
}

/// Rasterize a snapshot into grid rows (no HUD)
pub fn rasterize(frame: &FrameSnapshot) -> Vec<String> {
    let cell_w = PLAYFIELD_WIDTH / GRID_COLUMNS as f32;
    let cell_h = PLAYFIELD_HEIGHT / GRID_ROWS as f32;
    let mut grid = vec![vec![' '; GRID_COLUMNS]; GRID_ROWS];

    let to_col = |x: f32| ((x / cell_w).floor().max(0.0) as usize).min(GRID_COLUMNS - 1);
    let to_row = |y: f32| ((y / cell_h).floor().max(0.0) as usize).min(GRID_ROWS - 1);

    for sprite in &frame.sprites {
        let right = sprite.pos.x + sprite.size.x;
        let bottom = sprite.pos.y + sprite.size.y;
        // Skip anything fully off the grid (flyer entering, shots leaving)
        if right <= 0.0
            || bottom <= 0.0
            || sprite.pos.x >= PLAYFIELD_WIDTH
            || sprite.pos.y >= PLAYFIELD_HEIGHT
        {
            continue;
        }
        let c = glyph(sprite);
        for row in to_row(sprite.pos.y)..=to_row(bottom - 0.01) {
            for col in to_col(sprite.pos.x)..=to_col(right - 0.01) {
                grid[row][col] = c;
            }
        }
    }

    grid.into_iter().map(|r| r.into_iter().collect()).collect()
}

/// Writes frames as plain text to any writer
pub struct TextRenderer<W: Write> {
    out: W,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn draw(&mut self, frame: &FrameSnapshot) -> std::io::Result<()> {
        writeln!(
            self.out,
            "tick {:>6} | wave {:>2} | score {:>6} | lives {} | {:?}",
            frame.tick, frame.wave, frame.score, frame.lives, frame.phase
        )?;
        writeln!(self.out, "+{}+", "-".repeat(GRID_COLUMNS))?;
        for line in rasterize(frame) {
            writeln!(self.out, "|{line}|")?;
        }
        writeln!(self.out, "+{}+", "-".repeat(GRID_COLUMNS))?;
        self.out.flush()
    }
}

impl<W: Write> Renderer for TextRenderer<W> {
    fn render(&mut self, frame: &FrameSnapshot) {
        if let Err(err) = self.draw(frame) {
            log::warn!("Frame {} not drawn: {err}", frame.tick);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::GameState;

    #[test]
    fn test_rasterized_formation() {
        let mut state = GameState::new(1);
        state.start();
        let rows = rasterize(&FrameSnapshot::capture(&state));
        assert_eq!(rows.len(), GRID_ROWS);
        assert!(rows.iter().all(|r| r.chars().count() == GRID_COLUMNS));

        let count = |c: char| {
            rows.iter()
                .map(|r| r.matches(c).count())
                .sum::<usize>()
        };
        assert!(count('W') >= 11);
        assert!(count('A') >= 1);
        assert!(count('#') > 0);
    }

    #[test]
    fn test_text_output_has_hud_and_border() {
        let state = GameState::new(1);
        let mut renderer = TextRenderer::new(Vec::new());
        renderer.render(&FrameSnapshot::capture(&state));
        let text = String::from_utf8(renderer.into_inner()).expect("utf8");
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), GRID_ROWS + 3);
        assert!(lines[0].contains("Start"));
    }
}
