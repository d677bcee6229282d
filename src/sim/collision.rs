//! Group-versus-group collision resolution
//!
//! Rules run in a fixed order once per tick. A rule removes every target it
//! hits before the next rule looks at the collections, so an entity is
//! consumed by at most one rule and scored at most once.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::bounds::Rect;
use super::entities::{Advance, Explosion};
use super::state::GameState;
use crate::consts::{
    EXPLOSION_LIFE_LARGE, EXPLOSION_LIFE_SMALL, SCORE_BOMB, SCORE_ENEMY, SHIELD_RAM_SCORE,
};

/// Which collection a rule destroys from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    Enemies,
    Bombs,
}

/// One entry of the ordered collision table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CollisionRule {
    BeamEnemy,
    ShieldEnemy,
    BeamBomb,
    ShieldBomb,
    PlayerBomb,
    GravityEnemy,
    GravityBomb,
}

impl CollisionRule {
    /// Evaluation order
    pub const ORDER: [CollisionRule; 7] = [
        CollisionRule::BeamEnemy,
        CollisionRule::ShieldEnemy,
        CollisionRule::BeamBomb,
        CollisionRule::ShieldBomb,
        CollisionRule::PlayerBomb,
        CollisionRule::GravityEnemy,
        CollisionRule::GravityBomb,
    ];

    fn target(self) -> Target {
        match self {
            CollisionRule::BeamEnemy | CollisionRule::ShieldEnemy | CollisionRule::GravityEnemy => {
                Target::Enemies
            }
            CollisionRule::BeamBomb
            | CollisionRule::ShieldBomb
            | CollisionRule::PlayerBomb
            | CollisionRule::GravityBomb => Target::Bombs,
        }
    }

    /// Score awarded per destroyed target
    pub fn award(self) -> u64 {
        match self {
            CollisionRule::BeamEnemy => SCORE_ENEMY,
            CollisionRule::BeamBomb => SCORE_BOMB,
            _ => 0,
        }
    }

    /// Life of the explosion left at each destroyed target, if any
    pub fn explosion_life(self) -> Option<i32> {
        match self {
            CollisionRule::BeamEnemy | CollisionRule::ShieldEnemy => Some(EXPLOSION_LIFE_LARGE),
            CollisionRule::PlayerBomb => None,
            _ => Some(EXPLOSION_LIFE_SMALL),
        }
    }

    /// Whether the rule applies at all this tick
    fn enabled(self, state: &GameState) -> bool {
        match self {
            CollisionRule::ShieldEnemy => {
                state.player.shield_active && state.score.value() >= SHIELD_RAM_SCORE
            }
            _ => true,
        }
    }

    fn hitters(self, state: &GameState) -> Vec<Rect> {
        match self {
            CollisionRule::BeamEnemy | CollisionRule::BeamBomb => hitboxes(&state.beams),
            CollisionRule::ShieldEnemy | CollisionRule::ShieldBomb => hitboxes(&state.shields),
            CollisionRule::PlayerBomb => vec![state.player.hitbox()],
            CollisionRule::GravityEnemy | CollisionRule::GravityBomb => {
                hitboxes(&state.gravity_fields)
            }
        }
    }

    /// Apply this rule alone to the state
    pub fn apply(self, state: &mut GameState) -> RuleHits {
        if !self.enabled(state) {
            return RuleHits::none(self);
        }
        let hitters = self.hitters(state);

        let destroyed: Vec<Vec2> = match self.target() {
            Target::Enemies => take_overlapping(&mut state.enemies, &hitters)
                .into_iter()
                .map(|e| e.pos)
                .collect(),
            Target::Bombs => take_overlapping(&mut state.bombs, &hitters)
                .into_iter()
                .map(|b| b.pos)
                .collect(),
        };

        let points = self.award() * destroyed.len() as u64;
        state.score.award(points);

        if let Some(life) = self.explosion_life() {
            for pos in &destroyed {
                let id = state.ids.allocate();
                state.explosions.push(Explosion::new(id, *pos, life));
            }
        }

        RuleHits {
            rule: self,
            destroyed: destroyed.len(),
            points,
        }
    }
}

/// What a single rule did in one pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleHits {
    pub rule: CollisionRule,
    pub destroyed: usize,
    pub points: u64,
}

impl RuleHits {
    fn none(rule: CollisionRule) -> Self {
        Self {
            rule,
            destroyed: 0,
            points: 0,
        }
    }
}

/// Result of a full resolver pass
#[derive(Debug, Clone, Default)]
pub struct Resolution {
    pub hits: Vec<RuleHits>,
    /// The player was struck by a bomb
    pub game_over: bool,
}

impl Resolution {
    pub fn points(&self) -> u64 {
        self.hits.iter().map(|h| h.points).sum()
    }

    pub fn destroyed(&self) -> usize {
        self.hits.iter().map(|h| h.destroyed).sum()
    }
}

/// Run every rule in order. Stops right after the player is hit.
pub fn resolve(state: &mut GameState) -> Resolution {
    let mut resolution = Resolution::default();
    for rule in CollisionRule::ORDER {
        let hits = rule.apply(state);
        resolution.hits.push(hits);
        if rule == CollisionRule::PlayerBomb && hits.destroyed > 0 {
            resolution.game_over = true;
            break;
        }
    }

    if resolution.destroyed() > 0 {
        log::debug!(
            "tick {}: {} destroyed, +{} score",
            state.tick,
            resolution.destroyed(),
            resolution.points()
        );
    }
    resolution
}

fn hitboxes<T: Advance>(items: &[T]) -> Vec<Rect> {
    items.iter().map(|item| item.hitbox()).collect()
}

/// Remove and return every item overlapping any hitter, preserving order
fn take_overlapping<T: Advance>(items: &mut Vec<T>, hitters: &[Rect]) -> Vec<T> {
    if hitters.is_empty() || items.is_empty() {
        return Vec::new();
    }
    let (hit, kept): (Vec<T>, Vec<T>) = items.drain(..).partition(|item| {
        let rect = item.hitbox();
        hitters.iter().any(|h| h.overlaps(&rect))
    });
    *items = kept;
    hit
}
