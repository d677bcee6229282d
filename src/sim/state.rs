//! Game state and the per-tick render snapshot
//!
//! `GameState` exclusively owns every entity collection. Nothing outside the
//! simulation mutates it between ticks; renderers read a `Frame` instead.

use glam::{IVec2, Vec2};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entities::{
    Beam, BeamStyle, Bomb, Enemy, EnemyState, EntityIds, EntityKind, Explosion, GravityField,
    Player, Shield,
};
use super::gauge::{Ability, AbilityGauge, ScoreCounter};
use super::input::Keys;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// The player was hit; the state is frozen
    GameOver,
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Seeded RNG driving every random decision
    pub(crate) rng: Pcg32,
    /// Simulation tick counter
    pub tick: u64,
    pub phase: GamePhase,
    pub score: ScoreCounter,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bombs: Vec<Bomb>,
    pub beams: Vec<Beam>,
    pub shields: Vec<Shield>,
    pub gravity_fields: Vec<GravityField>,
    pub explosions: Vec<Explosion>,
    /// Indexed by `Ability::index`
    pub gauges: [AbilityGauge; 4],
    /// Keys held during the previous tick, for edge-triggered abilities
    pub prev_keys: Keys,
    pub ids: EntityIds,
}

impl GameState {
    /// Create a new game state with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            tick: 0,
            phase: GamePhase::Playing,
            score: ScoreCounter::default(),
            player: Player::default(),
            enemies: Vec::new(),
            bombs: Vec::new(),
            beams: Vec::new(),
            shields: Vec::new(),
            gravity_fields: Vec::new(),
            explosions: Vec::new(),
            gauges: Ability::ALL.map(AbilityGauge::new),
            prev_keys: Keys::none(),
            ids: EntityIds::default(),
        }
    }

    pub fn gauge(&self, ability: Ability) -> &AbilityGauge {
        &self.gauges[ability.index()]
    }

    pub fn gauge_mut(&mut self, ability: Ability) -> &mut AbilityGauge {
        &mut self.gauges[ability.index()]
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Snapshot of everything a renderer needs for this tick
    pub fn frame(&self) -> Frame {
        let mut sprites = Vec::with_capacity(
            1 + self.enemies.len()
                + self.bombs.len()
                + self.beams.len()
                + self.shields.len()
                + self.gravity_fields.len()
                + self.explosions.len(),
        );
        sprites.extend(self.gravity_fields.iter().map(Sprite::from));
        sprites.push(Sprite::from(&self.player));
        sprites.extend(self.beams.iter().map(Sprite::from));
        sprites.extend(self.enemies.iter().map(Sprite::from));
        sprites.extend(self.bombs.iter().map(Sprite::from));
        sprites.extend(self.explosions.iter().map(Sprite::from));
        sprites.extend(self.shields.iter().map(Sprite::from));

        let score = self.score.value();
        Frame {
            tick: self.tick,
            score,
            phase: self.phase,
            sprites,
            gauges: self
                .gauges
                .iter()
                .map(|g| GaugeView {
                    ability: g.ability,
                    charge: g.charge(),
                    max_charge: g.max_charge(),
                    cooldown: g.cooldown(),
                    ready: g.is_ready(score),
                })
                .collect(),
        }
    }
}

/// One drawable entity with its visual discriminator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Sprite {
    Player {
        pos: Vec2,
        facing: IVec2,
        shielded: bool,
    },
    Enemy {
        id: u32,
        pos: Vec2,
        state: EnemyState,
        variant: u8,
    },
    Bomb {
        id: u32,
        pos: Vec2,
        radius: f32,
        color: u8,
    },
    Beam {
        id: u32,
        pos: Vec2,
        angle: f32,
        style: BeamStyle,
    },
    Shield {
        id: u32,
        pos: Vec2,
        size: Vec2,
        life: u32,
    },
    GravityField {
        id: u32,
        pos: Vec2,
        life: u32,
    },
    Explosion {
        id: u32,
        pos: Vec2,
        flipped: bool,
    },
}

impl Sprite {
    pub fn kind(&self) -> EntityKind {
        match self {
            Sprite::Player { .. } => EntityKind::Player,
            Sprite::Enemy { .. } => EntityKind::Enemy,
            Sprite::Bomb { .. } => EntityKind::Bomb,
            Sprite::Beam { .. } => EntityKind::Beam,
            Sprite::Shield { .. } => EntityKind::Shield,
            Sprite::GravityField { .. } => EntityKind::GravityField,
            Sprite::Explosion { .. } => EntityKind::Explosion,
        }
    }

    pub fn pos(&self) -> Vec2 {
        match self {
            Sprite::Player { pos, .. }
            | Sprite::Enemy { pos, .. }
            | Sprite::Bomb { pos, .. }
            | Sprite::Beam { pos, .. }
            | Sprite::Shield { pos, .. }
            | Sprite::GravityField { pos, .. }
            | Sprite::Explosion { pos, .. } => *pos,
        }
    }
}

impl From<&Player> for Sprite {
    fn from(p: &Player) -> Self {
        Sprite::Player {
            pos: p.pos,
            facing: p.facing,
            shielded: p.shield_active,
        }
    }
}

impl From<&Enemy> for Sprite {
    fn from(e: &Enemy) -> Self {
        Sprite::Enemy {
            id: e.id,
            pos: e.pos,
            state: e.state,
            variant: e.variant,
        }
    }
}

impl From<&Bomb> for Sprite {
    fn from(b: &Bomb) -> Self {
        Sprite::Bomb {
            id: b.id,
            pos: b.pos,
            radius: b.radius,
            color: b.color,
        }
    }
}

impl From<&Beam> for Sprite {
    fn from(b: &Beam) -> Self {
        Sprite::Beam {
            id: b.id,
            pos: b.pos,
            angle: b.angle,
            style: b.style,
        }
    }
}

impl From<&Shield> for Sprite {
    fn from(s: &Shield) -> Self {
        Sprite::Shield {
            id: s.id,
            pos: s.pos,
            size: s.size,
            life: s.life,
        }
    }
}

impl From<&GravityField> for Sprite {
    fn from(g: &GravityField) -> Self {
        Sprite::GravityField {
            id: g.id,
            pos: g.pos,
            life: g.life,
        }
    }
}

impl From<&Explosion> for Sprite {
    fn from(e: &Explosion) -> Self {
        Sprite::Explosion {
            id: e.id,
            pos: e.pos,
            flipped: e.flipped,
        }
    }
}

/// HUD view of one ability gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaugeView {
    pub ability: Ability,
    pub charge: u32,
    pub max_charge: u32,
    pub cooldown: u32,
    pub ready: bool,
}

/// Everything the render step consumes for one tick
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Frame {
    pub tick: u64,
    pub score: u64,
    pub phase: GamePhase,
    /// Back-to-front draw order
    pub sprites: Vec<Sprite>,
    pub gauges: Vec<GaugeView>,
}

impl Frame {
    pub fn count(&self, kind: EntityKind) -> usize {
        self.sprites.iter().filter(|s| s.kind() == kind).count()
    }
}
