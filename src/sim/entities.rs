//! Entity kinds and their per-tick state machines
//!
//! Each kind is a plain struct owned by `GameState`. Entities never remove
//! themselves from a collection: `advance` reports a `Fate` and the owner
//! drops the dead ones.

use glam::{IVec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bounds::{Rect, rotated_extent};
use super::input::Keys;
use crate::consts::*;
use crate::{direction_to_degrees, unit_from_degrees};

/// Closed set of entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy,
    Bomb,
    Beam,
    Shield,
    GravityField,
    Explosion,
}

/// Outcome of advancing an entity by one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fate {
    Alive,
    Dead,
}

/// Read-only context shared by every entity during the advance step
#[derive(Debug, Clone, Copy)]
pub struct AdvanceCtx {
    pub tick: u64,
    pub keys: Keys,
    /// Player center after this tick's movement
    pub player_center: Vec2,
}

/// Common tick-update capability
pub trait Advance {
    const KIND: EntityKind;

    /// Axis-aligned hitbox at the current position
    fn hitbox(&self) -> Rect;

    /// Step one tick forward
    fn advance(&mut self, ctx: &AdvanceCtx) -> Fate;
}

/// Advance every entity in a collection and drop the dead ones.
/// Returns how many were removed.
pub fn advance_all<T: Advance>(items: &mut Vec<T>, ctx: &AdvanceCtx) -> usize {
    let before = items.len();
    items.retain_mut(|item| item.advance(ctx) == Fate::Alive);
    let removed = before - items.len();
    if removed > 0 {
        log::trace!("tick {}: {} {:?} expired", ctx.tick, removed, T::KIND);
    }
    removed
}

/// Monotonic entity ID allocator
#[derive(Debug, Clone)]
pub struct EntityIds {
    next: u32,
}

impl Default for EntityIds {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl EntityIds {
    pub fn allocate(&mut self) -> u32 {
        let id = self.next;
        self.next += 1;
        id
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

/// The player's avatar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Last non-zero movement direction, one of the eight compass steps
    pub facing: IVec2,
    pub speed: f32,
    /// True exactly while a shield exists
    pub shield_active: bool,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            pos: PLAYER_START,
            facing: IVec2::new(1, 0),
            speed: PLAYER_SPEED,
            shield_active: false,
        }
    }
}

impl Player {
    /// Move according to the held direction keys and return the new position.
    ///
    /// A step whose hitbox would leave the playfield is rejected on both
    /// axes, not clamped. Facing follows any non-zero key combination even
    /// when the step itself is rejected.
    pub fn step(&mut self, keys: Keys) -> Vec2 {
        let delta = keys.movement();
        if delta == IVec2::ZERO {
            return self.pos;
        }

        let candidate = self.pos + delta.as_vec2() * self.speed;
        if Rect::from_center(candidate, PLAYER_SIZE).is_inside_playfield() {
            self.pos = candidate;
        }
        self.facing = delta;
        self.pos
    }
}

impl Advance for Player {
    const KIND: EntityKind = EntityKind::Player;

    fn hitbox(&self) -> Rect {
        Rect::from_center(self.pos, PLAYER_SIZE)
    }

    fn advance(&mut self, ctx: &AdvanceCtx) -> Fate {
        self.step(ctx.keys);
        Fate::Alive
    }
}

// ---------------------------------------------------------------------------
// Enemy
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyState {
    Descending,
    Stopped,
}

/// A descending enemy that parks and drops bombs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Center y past which the enemy stops
    pub stop_y: f32,
    /// Drops a bomb on ticks divisible by this while stopped
    pub drop_interval: u64,
    pub state: EnemyState,
    /// Sprite variant (cosmetic)
    pub variant: u8,
}

impl Enemy {
    pub fn new(id: u32, pos: Vec2, stop_y: f32, drop_interval: u64) -> Self {
        Self {
            id,
            pos,
            vel: Vec2::new(0.0, ENEMY_DESCENT_SPEED),
            stop_y,
            drop_interval: drop_interval.max(1),
            state: EnemyState::Descending,
            variant: 0,
        }
    }

    /// Spawn at a random x along the top edge
    pub fn spawn<R: Rng>(id: u32, rng: &mut R) -> Self {
        let x = rng.random_range(0..=PLAYFIELD_WIDTH as i32) as f32;
        let stop_y = rng.random_range(ENEMY_STOP_MIN..=ENEMY_STOP_MAX) as f32;
        let interval = rng.random_range(ENEMY_DROP_MIN..=ENEMY_DROP_MAX);
        let mut enemy = Self::new(id, Vec2::new(x, 0.0), stop_y, interval);
        enemy.variant = rng.random_range(0..ENEMY_VARIANTS);
        enemy
    }

    /// Whether this enemy releases a bomb on `tick`
    #[inline]
    pub fn drops_on(&self, tick: u64) -> bool {
        self.state == EnemyState::Stopped && tick % self.drop_interval == 0
    }
}

impl Advance for Enemy {
    const KIND: EntityKind = EntityKind::Enemy;

    fn hitbox(&self) -> Rect {
        Rect::from_center(self.pos, ENEMY_SIZE)
    }

    fn advance(&mut self, ctx: &AdvanceCtx) -> Fate {
        if self.state == EnemyState::Descending && self.pos.y > self.stop_y {
            self.vel = Vec2::ZERO;
            self.state = EnemyState::Stopped;
            log::trace!("tick {}: enemy {} stopped at y={}", ctx.tick, self.id, self.pos.y);
        }
        self.pos += self.vel;
        Fate::Alive
    }
}

// ---------------------------------------------------------------------------
// Bomb
// ---------------------------------------------------------------------------

/// A straight-line enemy projectile aimed once at spawn
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bomb {
    pub id: u32,
    pub pos: Vec2,
    /// Unit direction, frozen at spawn
    pub dir: Vec2,
    pub speed: f32,
    pub radius: f32,
    /// Palette index (cosmetic)
    pub color: u8,
}

impl Bomb {
    /// Bomb released below `enemy`, aimed at `target` as it is right now.
    /// Falls straight down when the target sits exactly on the enemy.
    pub fn aimed(id: u32, enemy: &Enemy, target: Vec2, radius: f32, color: u8) -> Self {
        let dir = (target - enemy.pos).try_normalize().unwrap_or(Vec2::Y);
        Self {
            id,
            pos: enemy.pos + Vec2::new(0.0, ENEMY_SIZE.y / 2.0),
            dir,
            speed: BOMB_SPEED,
            radius,
            color,
        }
    }

    /// Bomb with a random radius and colour
    pub fn drop_from<R: Rng>(id: u32, enemy: &Enemy, target: Vec2, rng: &mut R) -> Self {
        let radius = rng.random_range(BOMB_RADIUS_MIN..=BOMB_RADIUS_MAX) as f32;
        let color = rng.random_range(0..BOMB_COLORS);
        Self::aimed(id, enemy, target, radius, color)
    }
}

impl Advance for Bomb {
    const KIND: EntityKind = EntityKind::Bomb;

    fn hitbox(&self) -> Rect {
        Rect::from_center(self.pos, Vec2::splat(self.radius * 2.0))
    }

    fn advance(&mut self, _ctx: &AdvanceCtx) -> Fate {
        self.pos += self.dir * self.speed;
        if self.hitbox().is_inside_playfield() {
            Fate::Alive
        } else {
            Fate::Dead
        }
    }
}

// ---------------------------------------------------------------------------
// Beam
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BeamStyle {
    /// Rapid-fire shot
    Standard,
    /// Spread-shot fan member
    Wide,
}

/// A player projectile that lingers briefly after leaving the playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Beam {
    pub id: u32,
    pub pos: Vec2,
    /// Unit direction
    pub dir: Vec2,
    pub speed: f32,
    /// Counter-clockwise heading in degrees (sprite rotation)
    pub angle: f32,
    pub style: BeamStyle,
    /// Ticks spent outside the playfield so far
    pub out_of_bounds: u32,
}

impl Beam {
    /// Fire from the player along its facing direction rotated by `offset_degrees`
    pub fn fire(id: u32, player: &Player, offset_degrees: f32, style: BeamStyle) -> Self {
        let angle = direction_to_degrees(player.facing.as_vec2()) + offset_degrees;
        let dir = unit_from_degrees(angle);
        Self {
            id,
            pos: player.pos + PLAYER_SIZE * dir,
            dir,
            speed: BEAM_SPEED,
            angle,
            style,
            out_of_bounds: 0,
        }
    }
}

impl Advance for Beam {
    const KIND: EntityKind = EntityKind::Beam;

    fn hitbox(&self) -> Rect {
        Rect::from_center(self.pos, rotated_extent(BEAM_SIZE, self.angle))
    }

    fn advance(&mut self, _ctx: &AdvanceCtx) -> Fate {
        self.pos += self.dir * self.speed;
        if !self.hitbox().is_inside_playfield() {
            self.out_of_bounds += 1;
            if self.out_of_bounds >= BEAM_GRACE_TICKS {
                return Fate::Dead;
            }
        }
        Fate::Alive
    }
}

/// Fan-shaped beam generator
///
/// Offsets are spread evenly over `arc_degrees`, symmetric about zero. A fan
/// needs at least two beams, so construction is the only place that can fail.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpreadBeam {
    fan: usize,
    arc_degrees: f32,
}

impl SpreadBeam {
    /// The spread shot fired by the player
    pub const fn standard() -> Self {
        Self {
            fan: SPREAD_FAN_COUNT,
            arc_degrees: SPREAD_ARC_DEGREES,
        }
    }

    pub fn new(fan: usize, arc_degrees: f32) -> Option<Self> {
        (fan >= 2).then_some(Self { fan, arc_degrees })
    }

    pub fn fan(&self) -> usize {
        self.fan
    }

    /// Angular offsets in degrees, lowest first
    pub fn offsets(&self) -> impl Iterator<Item = f32> + '_ {
        let step = self.arc_degrees / (self.fan - 1) as f32;
        let start = -self.arc_degrees / 2.0;
        (0..self.fan).map(move |i| start + step * i as f32)
    }

    pub fn fire(&self, player: &Player, ids: &mut EntityIds) -> Vec<Beam> {
        self.offsets()
            .map(|offset| Beam::fire(ids.allocate(), player, offset, BeamStyle::Wide))
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Shield
// ---------------------------------------------------------------------------

/// A timed bubble that follows the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Shield {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub life: u32,
}

impl Shield {
    /// Raise a shield around the player and mark it shielded
    pub fn raise(id: u32, player: &mut Player) -> Self {
        player.shield_active = true;
        Self {
            id,
            pos: player.pos,
            size: Vec2::splat(PLAYER_SIZE.y * SHIELD_SCALE),
            life: SHIELD_LIFE,
        }
    }
}

impl Advance for Shield {
    const KIND: EntityKind = EntityKind::Shield;

    fn hitbox(&self) -> Rect {
        Rect::from_center(self.pos, self.size)
    }

    fn advance(&mut self, ctx: &AdvanceCtx) -> Fate {
        self.pos = ctx.player_center;
        self.life = self.life.saturating_sub(1);
        if self.life == 0 { Fate::Dead } else { Fate::Alive }
    }
}

// ---------------------------------------------------------------------------
// Gravity field
// ---------------------------------------------------------------------------

/// A stationary field covering the whole playfield
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GravityField {
    pub id: u32,
    pub pos: Vec2,
    pub life: u32,
}

impl GravityField {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            pos: Rect::playfield().center(),
            life: GRAVITY_LIFE,
        }
    }
}

impl Advance for GravityField {
    const KIND: EntityKind = EntityKind::GravityField;

    fn hitbox(&self) -> Rect {
        Rect::playfield()
    }

    fn advance(&mut self, _ctx: &AdvanceCtx) -> Fate {
        self.life = self.life.saturating_sub(1);
        if self.life == 0 { Fate::Dead } else { Fate::Alive }
    }
}

// ---------------------------------------------------------------------------
// Explosion
// ---------------------------------------------------------------------------

/// Cosmetic blast left behind by a destroyed enemy or bomb
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub pos: Vec2,
    pub life: i32,
    /// Alternates every 10 ticks to flip the sprite
    pub flipped: bool,
}

impl Explosion {
    pub fn new(id: u32, pos: Vec2, life: i32) -> Self {
        Self {
            id,
            pos,
            life,
            flipped: false,
        }
    }
}

impl Advance for Explosion {
    const KIND: EntityKind = EntityKind::Explosion;

    fn hitbox(&self) -> Rect {
        Rect::from_center(self.pos, EXPLOSION_SIZE)
    }

    fn advance(&mut self, _ctx: &AdvanceCtx) -> Fate {
        self.life -= 1;
        self.flipped = self.life.div_euclid(10).rem_euclid(2) == 1;
        if self.life < 0 { Fate::Dead } else { Fate::Alive }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ctx(tick: u64) -> AdvanceCtx {
        AdvanceCtx {
            tick,
            keys: Keys::none(),
            player_center: PLAYER_START,
        }
    }

    #[test]
    fn test_player_diagonal_move() {
        let mut player = Player::default();
        let pos = player.step(Keys::from_bits(Keys::UP | Keys::LEFT));
        assert_eq!(pos, PLAYER_START + Vec2::new(-PLAYER_SPEED, -PLAYER_SPEED));
        assert_eq!(player.facing, IVec2::new(-1, -1));
    }

    #[test]
    fn test_player_move_into_wall_rejected_on_both_axes() {
        let mut player = Player::default();
        // Flush against the bottom edge
        player.pos.y = PLAYFIELD_HEIGHT - PLAYER_SIZE.y / 2.0;
        let start = player.pos;

        let pos = player.step(Keys::from_bits(Keys::DOWN | Keys::RIGHT));
        assert_eq!(pos, start, "legal x component must not be applied");
        assert_eq!(player.facing, IVec2::new(1, 1));
    }

    #[test]
    fn test_player_facing_persists_when_idle() {
        let mut player = Player::default();
        player.step(Keys::from_bits(Keys::UP));
        player.step(Keys::none());
        assert_eq!(player.facing, IVec2::new(0, -1));
    }

    #[test]
    fn test_enemy_stops_once() {
        let mut enemy = Enemy::new(1, Vec2::new(100.0, 0.0), 20.0, 50);
        let mut transitions = 0;
        let mut last = enemy.state;
        for t in 0..20 {
            enemy.advance(&ctx(t));
            if enemy.state != last {
                transitions += 1;
                last = enemy.state;
            }
        }
        assert_eq!(transitions, 1);
        assert_eq!(enemy.state, EnemyState::Stopped);
        assert_eq!(enemy.vel, Vec2::ZERO);
        // Crossed 20 at y=24 and was then parked without moving further
        assert_eq!(enemy.pos.y, 24.0);
    }

    #[test]
    fn test_enemy_drops_only_when_stopped() {
        let mut enemy = Enemy::new(1, Vec2::new(100.0, 0.0), 0.0, 50);
        assert!(!enemy.drops_on(100));
        enemy.advance(&ctx(0));
        enemy.advance(&ctx(1));
        assert_eq!(enemy.state, EnemyState::Stopped);
        assert!(enemy.drops_on(100));
        assert!(!enemy.drops_on(101));
    }

    #[test]
    fn test_enemy_spawn_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        for id in 0..200 {
            let enemy = Enemy::spawn(id, &mut rng);
            assert!((0.0..=PLAYFIELD_WIDTH).contains(&enemy.pos.x));
            assert_eq!(enemy.pos.y, 0.0);
            assert!((ENEMY_STOP_MIN as f32..=ENEMY_STOP_MAX as f32).contains(&enemy.stop_y));
            assert!((ENEMY_DROP_MIN..=ENEMY_DROP_MAX).contains(&enemy.drop_interval));
            assert!(enemy.variant < ENEMY_VARIANTS);
        }
    }

    #[test]
    fn test_bomb_aim_frozen_at_spawn() {
        let enemy = Enemy::new(1, Vec2::new(100.0, 100.0), 0.0, 50);
        let mut bomb = Bomb::aimed(2, &enemy, Vec2::new(400.0, 500.0), 10.0, 0);
        let dir = bomb.dir;
        assert!((dir.length() - 1.0).abs() < 1e-5);

        // Player moving afterwards has no influence
        let mut later = ctx(1);
        later.player_center = Vec2::new(0.0, 0.0);
        bomb.advance(&later);
        assert_eq!(bomb.dir, dir);
    }

    #[test]
    fn test_bomb_degenerate_aim_falls_down() {
        let enemy = Enemy::new(1, Vec2::new(100.0, 100.0), 0.0, 50);
        let bomb = Bomb::aimed(2, &enemy, enemy.pos, 10.0, 0);
        assert_eq!(bomb.dir, Vec2::Y);
    }

    #[test]
    fn test_bomb_dies_on_leaving_bounds() {
        let mut bomb = Bomb {
            id: 1,
            pos: Vec2::new(500.0, PLAYFIELD_HEIGHT - 12.0),
            dir: Vec2::Y,
            speed: BOMB_SPEED,
            radius: 10.0,
            color: 0,
        };
        assert_eq!(bomb.advance(&ctx(0)), Fate::Dead);
    }

    #[test]
    fn test_beam_grace_window_exact() {
        let mut beam = Beam::fire(1, &Player::default(), 0.0, BeamStyle::Standard);
        let mut tick = 0;
        let mut first_out = None;
        loop {
            let fate = beam.advance(&ctx(tick));
            if first_out.is_none() && beam.out_of_bounds == 1 {
                first_out = Some(tick);
            }
            if fate == Fate::Dead {
                break;
            }
            tick += 1;
            assert!(tick < 1000, "beam never despawned");
        }
        let first_out = first_out.expect("beam left the playfield");
        assert_eq!(tick - first_out + 1, BEAM_GRACE_TICKS as u64);
    }

    #[test]
    fn test_beam_direction_from_facing() {
        let mut player = Player::default();
        player.facing = IVec2::new(0, -1);
        let beam = Beam::fire(1, &player, 0.0, BeamStyle::Standard);
        assert!(beam.dir.x.abs() < 1e-5);
        assert!((beam.dir.y + 1.0).abs() < 1e-5);
        assert!((beam.pos.y - (player.pos.y - PLAYER_SIZE.y)).abs() < 1e-3);
    }

    #[test]
    fn test_spread_offsets() {
        let spread = SpreadBeam::new(3, 100.0).expect("valid fan");
        let offsets: Vec<f32> = spread.offsets().collect();
        assert_eq!(offsets, vec![-50.0, 0.0, 50.0]);

        let mut ids = EntityIds::default();
        let beams = spread.fire(&Player::default(), &mut ids);
        assert_eq!(beams.len(), 3);
        assert!((beams[0].angle + 50.0).abs() < 1e-4);
        assert!((beams[2].angle - 50.0).abs() < 1e-4);
        assert!(beams.iter().all(|b| b.style == BeamStyle::Wide));
    }

    #[test]
    fn test_spread_rejects_single_beam() {
        assert!(SpreadBeam::new(1, 100.0).is_none());
        assert!(SpreadBeam::new(0, 100.0).is_none());
        assert_eq!(SpreadBeam::standard().fan(), SPREAD_FAN_COUNT);
    }

    #[test]
    fn test_shield_tracks_player_and_expires() {
        let mut player = Player::default();
        let mut shield = Shield::raise(1, &mut player);
        assert!(player.shield_active);

        let mut moved = ctx(0);
        moved.player_center = Vec2::new(300.0, 300.0);
        assert_eq!(shield.advance(&moved), Fate::Alive);
        assert_eq!(shield.pos, Vec2::new(300.0, 300.0));

        let mut fates = Vec::new();
        for t in 1..SHIELD_LIFE as u64 {
            fates.push(shield.advance(&ctx(t)));
        }
        assert_eq!(fates.last(), Some(&Fate::Dead));
        assert!(fates[..fates.len() - 1].iter().all(|f| *f == Fate::Alive));
    }

    #[test]
    fn test_gravity_field_covers_playfield() {
        let mut field = GravityField::new(1);
        assert_eq!(field.hitbox(), Rect::playfield());
        for t in 0..GRAVITY_LIFE as u64 - 1 {
            assert_eq!(field.advance(&ctx(t)), Fate::Alive);
        }
        assert_eq!(field.advance(&ctx(0)), Fate::Dead);
    }

    #[test]
    fn test_explosion_toggle_and_life() {
        let mut exp = Explosion::new(1, Vec2::ZERO, 20);
        exp.advance(&ctx(0)); // 19
        assert!(exp.flipped);
        for _ in 0..10 {
            exp.advance(&ctx(0));
        }
        assert_eq!(exp.life, 9);
        assert!(!exp.flipped);

        // Survives at life 0, dies at -1
        for _ in 0..9 {
            assert_eq!(exp.advance(&ctx(0)), Fate::Alive);
        }
        assert_eq!(exp.life, 0);
        assert_eq!(exp.advance(&ctx(0)), Fate::Dead);
    }
}
