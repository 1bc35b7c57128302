//! Simulation entities
//!
//! Every entity carries a bounding box and an `active` flag. Inactive entities
//! are skipped by movement and collision and dropped at the end of the tick.

use serde::{Deserialize, Serialize};

use super::geom::Rect;
use crate::consts::*;

/// The player's shooter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub bounds: Rect,
    pub active: bool,
    /// Intent flags, written only through the input surface
    pub moving_left: bool,
    pub moving_right: bool,
    pub firing: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            bounds: Rect::new(
                (PLAYFIELD_WIDTH - PLAYER_WIDTH) / 2.0,
                PLAYER_Y,
                PLAYER_WIDTH,
                PLAYER_HEIGHT,
            ),
            active: true,
            moving_left: false,
            moving_right: false,
            firing: false,
        }
    }
}

impl Player {
    pub const MIN_X: f32 = 0.0;
    pub const MAX_X: f32 = PLAYFIELD_WIDTH - PLAYER_WIDTH;

    /// Horizontal center, the muzzle position for player shots
    pub fn center_x(&self) -> f32 {
        self.bounds.center().x
    }

    /// Apply movement intent for one tick. Opposing flags cancel out.
    pub fn apply_movement(&mut self) {
        let dir = match (self.moving_left, self.moving_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => return,
        };
        self.bounds.pos.x =
            (self.bounds.pos.x + dir * PLAYER_SPEED).clamp(Self::MIN_X, Self::MAX_X);
    }
}

/// Row-derived adversary classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tier {
    /// Top row
    Top,
    /// Rows 1-2
    Middle,
    /// Rows 3-4
    Bottom,
}

impl Tier {
    pub fn from_row(row: u8) -> Self {
        match row {
            0 => Tier::Top,
            1 | 2 => Tier::Middle,
            _ => Tier::Bottom,
        }
    }

    pub fn points(self) -> u32 {
        match self {
            Tier::Top => 30,
            Tier::Middle => 20,
            Tier::Bottom => 10,
        }
    }
}

/// A member of the formation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Adversary {
    pub row: u8,
    pub column: u8,
    pub bounds: Rect,
    pub active: bool,
    /// Alternating animation frame (0 or 1), flipped on every formation step
    pub frame: u8,
}

impl Adversary {
    pub fn new(row: u8, column: u8, x: f32, y: f32) -> Self {
        Self {
            row,
            column,
            bounds: Rect::new(x, y, ADVERSARY_WIDTH, ADVERSARY_HEIGHT),
            active: true,
            frame: 0,
        }
    }

    pub fn tier(&self) -> Tier {
        Tier::from_row(self.row)
    }

    pub fn points(&self) -> u32 {
        self.tier().points()
    }
}

/// Who fired a projectile; fixes direction and speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileKind {
    Player,
    Adversary,
}

impl ProjectileKind {
    /// Signed vertical speed in units per tick
    pub fn speed(self) -> f32 {
        match self {
            ProjectileKind::Player => PLAYER_SHOT_SPEED,
            ProjectileKind::Adversary => ADVERSARY_SHOT_SPEED,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub kind: ProjectileKind,
    pub bounds: Rect,
    pub active: bool,
}

impl Projectile {
    /// Create a projectile whose muzzle is horizontally centered on `center_x`
    pub fn new(id: u32, kind: ProjectileKind, center_x: f32, y: f32) -> Self {
        Self {
            id,
            kind,
            bounds: Rect::new(
                center_x - PROJECTILE_WIDTH / 2.0,
                y,
                PROJECTILE_WIDTH,
                PROJECTILE_HEIGHT,
            ),
            active: true,
        }
    }

    /// Advance one tick and retire once the playfield is left behind
    pub fn advance(&mut self) {
        if !self.active {
            return;
        }
        self.bounds.pos.y += self.kind.speed();
        if self.bounds.outside_vertical(0.0, PLAYFIELD_HEIGHT) {
            self.active = false;
        }
    }
}

/// One destructible cell of a cover structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverBlock {
    pub bounds: Rect,
    pub active: bool,
}

/// Arch-shaped stencil, `#` marks a solid cell
const COVER_STENCIL: [&str; COVER_PATTERN_HEIGHT] = [
    "..########..",
    ".##########.",
    "############",
    "############",
    "############",
    "####....####",
    "###......###",
    "###......###",
];

/// A cluster of cover blocks built from the stencil
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverStructure {
    /// Row-major cells; only solid stencil cells are present
    pub blocks: Vec<CoverBlock>,
}

impl CoverStructure {
    /// Build a structure with its top-left corner at `(x, y)`
    pub fn build(x: f32, y: f32) -> Self {
        let mut blocks = Vec::new();
        for (row, line) in COVER_STENCIL.iter().enumerate() {
            for (col, cell) in line.bytes().enumerate() {
                if cell == b'#' {
                    blocks.push(CoverBlock {
                        bounds: Rect::new(
                            x + col as f32 * COVER_CELL_SIZE,
                            y + row as f32 * COVER_CELL_SIZE,
                            COVER_CELL_SIZE,
                            COVER_CELL_SIZE,
                        ),
                        active: true,
                    });
                }
            }
        }
        Self { blocks }
    }

    pub fn width() -> f32 {
        COVER_PATTERN_WIDTH as f32 * COVER_CELL_SIZE
    }

    pub fn active_blocks(&self) -> usize {
        self.blocks.iter().filter(|b| b.active).count()
    }
}

/// The bonus flyer crossing the top of the playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flyer {
    pub bounds: Rect,
    /// +1.0 travels right, -1.0 travels left
    pub direction: f32,
    pub reward: u32,
    pub active: bool,
}

impl Flyer {
    /// Place a flyer just outside the entry edge for `direction`
    pub fn enter(direction: f32, reward: u32) -> Self {
        let x = if direction > 0.0 {
            -FLYER_WIDTH
        } else {
            PLAYFIELD_WIDTH
        };
        Self {
            bounds: Rect::new(x, FLYER_Y, FLYER_WIDTH, FLYER_HEIGHT),
            direction,
            reward,
            active: true,
        }
    }

    /// True once the flyer has fully crossed the far boundary
    pub fn has_exited(&self) -> bool {
        if self.direction > 0.0 {
            self.bounds.left() > PLAYFIELD_WIDTH
        } else {
            self.bounds.right() < 0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_points_by_row() {
        let points: Vec<u32> = (0..5).map(|r| Tier::from_row(r).points()).collect();
        assert_eq!(points, vec![30, 20, 20, 10, 10]);
    }

    #[test]
    fn test_player_clamped_to_playfield() {
        let mut player = Player::default();
        player.moving_left = true;
        for _ in 0..500 {
            player.apply_movement();
        }
        assert_eq!(player.bounds.left(), Player::MIN_X);

        player.moving_left = false;
        player.moving_right = true;
        for _ in 0..500 {
            player.apply_movement();
        }
        assert_eq!(player.bounds.left(), Player::MAX_X);
    }

    #[test]
    fn test_opposing_intents_cancel() {
        let mut player = Player::default();
        let start = player.bounds.left();
        player.moving_left = true;
        player.moving_right = true;
        player.apply_movement();
        assert_eq!(player.bounds.left(), start);
    }

    #[test]
    fn test_projectile_retires_offscreen() {
        let mut shot = Projectile::new(1, ProjectileKind::Player, 100.0, 5.0);
        shot.advance();
        assert!(shot.active, "still partly on screen");
        shot.advance();
        shot.advance();
        assert!(!shot.active);
    }

    #[test]
    fn test_cover_stencil_shape() {
        let cover = CoverStructure::build(0.0, 0.0);
        let solid: usize = COVER_STENCIL
            .iter()
            .map(|l| l.bytes().filter(|&c| c == b'#').count())
            .sum();
        assert_eq!(cover.blocks.len(), solid);
        assert_eq!(cover.active_blocks(), solid);
        assert!(cover.blocks.iter().all(|b| b.bounds.right() <= CoverStructure::width()));
    }

    #[test]
    fn test_flyer_exit_depends_on_direction() {
        let mut flyer = Flyer::enter(1.0, 100);
        assert!(!flyer.has_exited());
        flyer.bounds.pos.x = PLAYFIELD_WIDTH + 1.0;
        assert!(flyer.has_exited());

        let mut flyer = Flyer::enter(-1.0, 100);
        assert_eq!(flyer.bounds.left(), PLAYFIELD_WIDTH);
        flyer.bounds.pos.x = -FLYER_WIDTH - 1.0;
        assert!(flyer.has_exited());
    }
}
