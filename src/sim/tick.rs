//! Fixed timestep simulation tick
//!
//! Order within a tick: input, ability activation, spawning, collision
//! resolution, game-over check, entity advance, gauge refill.

use serde::{Deserialize, Serialize};

use super::collision;
use super::entities::{
    AdvanceCtx, Beam, BeamStyle, Bomb, Enemy, GravityField, Shield, SpreadBeam, advance_all,
};
use super::gauge::Ability;
use super::input::{Keys, TickInput};
use super::state::{GamePhase, GameState};
use crate::consts::ENEMY_SPAWN_INTERVAL;

/// What a tick reports back to the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Keep going
    Running,
    /// The player was hit; terminal
    GameOver { score: u64, tick: u64 },
    /// Quit was requested; the state was left untouched
    Quit,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    if input.quit {
        log::info!("Quit requested at tick {}", state.tick);
        return TickOutcome::Quit;
    }

    // Don't tick once the run has ended
    if state.phase == GamePhase::GameOver {
        return game_over(state);
    }

    let pressed = input.keys.newly_pressed(state.prev_keys);
    state.prev_keys = input.keys;
    activate_abilities(state, input.keys, pressed);

    spawn_enemies(state);
    drop_bombs(state);

    let resolution = collision::resolve(state);
    if resolution.game_over {
        state.phase = GamePhase::GameOver;
        log::info!(
            "Game over at tick {} with score {}",
            state.tick,
            state.score.value()
        );
        return game_over(state);
    }

    advance_entities(state, input.keys);

    let score = state.score.value();
    for gauge in &mut state.gauges {
        gauge.tick(score);
    }

    state.tick += 1;
    TickOutcome::Running
}

fn game_over(state: &GameState) -> TickOutcome {
    TickOutcome::GameOver {
        score: state.score.value(),
        tick: state.tick,
    }
}

/// Handle ability requests. `held` is this tick's snapshot, `pressed` only
/// the keys that went down this tick.
fn activate_abilities(state: &mut GameState, held: Keys, pressed: Keys) {
    if pressed.is_pressed(Keys::FIRE) {
        if held.is_pressed(Keys::MODIFIER) {
            fire_spread(state);
        } else {
            fire_rapid(state);
        }
    }
    if pressed.is_pressed(Keys::SHIELD) {
        raise_shield(state);
    }
    if pressed.is_pressed(Keys::GRAVITY) {
        open_gravity_field(state);
    }
}

/// Try to activate `ability`, routing the score through its gauge
fn try_ability(state: &mut GameState, ability: Ability, occupied: bool) -> bool {
    let GameState { gauges, score, .. } = state;
    gauges[ability.index()].try_activate(score, occupied)
}

fn fire_rapid(state: &mut GameState) {
    if try_ability(state, Ability::RapidBeam, false) {
        let id = state.ids.allocate();
        state
            .beams
            .push(Beam::fire(id, &state.player, 0.0, BeamStyle::Standard));
    }
}

fn fire_spread(state: &mut GameState) {
    if try_ability(state, Ability::SpreadBeam, false) {
        let beams = SpreadBeam::standard().fire(&state.player, &mut state.ids);
        state.beams.extend(beams);
    }
}

fn raise_shield(state: &mut GameState) {
    let occupied = !state.shields.is_empty();
    if try_ability(state, Ability::Shield, occupied) {
        let id = state.ids.allocate();
        let shield = Shield::raise(id, &mut state.player);
        state.shields.push(shield);
    }
}

fn open_gravity_field(state: &mut GameState) {
    let occupied = !state.gravity_fields.is_empty();
    if try_ability(state, Ability::Gravity, occupied) {
        let id = state.ids.allocate();
        state.gravity_fields.push(GravityField::new(id));
    }
}

fn spawn_enemies(state: &mut GameState) {
    if state.tick % ENEMY_SPAWN_INTERVAL == 0 {
        let id = state.ids.allocate();
        let enemy = Enemy::spawn(id, &mut state.rng);
        log::trace!("tick {}: enemy {} spawned at x={}", state.tick, id, enemy.pos.x);
        state.enemies.push(enemy);
    }
}

fn drop_bombs(state: &mut GameState) {
    let target = state.player.pos;
    let GameState {
        enemies,
        bombs,
        ids,
        rng,
        tick,
        ..
    } = state;
    for enemy in enemies.iter().filter(|e| e.drops_on(*tick)) {
        bombs.push(Bomb::drop_from(ids.allocate(), enemy, target, rng));
    }
}

fn advance_entities(state: &mut GameState, keys: Keys) {
    // Shields mirror the player's post-move position
    let player_center = state.player.step(keys);
    let ctx = AdvanceCtx {
        tick: state.tick,
        keys,
        player_center,
    };

    advance_all(&mut state.beams, &ctx);
    advance_all(&mut state.enemies, &ctx);
    advance_all(&mut state.bombs, &ctx);
    advance_all(&mut state.explosions, &ctx);
    if advance_all(&mut state.shields, &ctx) > 0 {
        log::debug!("tick {}: shield expired", state.tick);
    }
    advance_all(&mut state.gravity_fields, &ctx);

    state.player.shield_active = !state.shields.is_empty();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::ScoreCounter;
    use crate::sim::entities::EnemyState;
    use glam::Vec2;

    fn press(bits: u16) -> TickInput {
        TickInput::with_keys(bits)
    }

    /// State with no enemies that will spawn in the next few ticks
    fn quiet_state() -> GameState {
        let mut state = GameState::new(12345);
        state.tick = 1;
        state
    }

    #[test]
    fn test_first_tick_spawns_enemy() {
        let mut state = GameState::new(12345);
        assert_eq!(tick(&mut state, &TickInput::default()), TickOutcome::Running);
        assert_eq!(state.enemies.len(), 1);
        assert_eq!(state.tick, 1);
    }

    #[test]
    fn test_fire_is_edge_triggered() {
        let mut state = quiet_state();
        tick(&mut state, &press(Keys::FIRE));
        assert_eq!(state.beams.len(), 1);

        // Holding fire does not repeat
        tick(&mut state, &press(Keys::FIRE));
        assert_eq!(state.beams.len(), 1);

        tick(&mut state, &TickInput::default());
        tick(&mut state, &press(Keys::FIRE));
        assert_eq!(state.beams.len(), 2);
    }

    #[test]
    fn test_modifier_fire_spreads() {
        let mut state = quiet_state();
        tick(&mut state, &press(Keys::FIRE | Keys::MODIFIER));
        assert_eq!(state.beams.len(), 3);
        assert!(state.beams.iter().all(|b| b.style == BeamStyle::Wide));

        // Spread is on cooldown now
        tick(&mut state, &TickInput::default());
        tick(&mut state, &press(Keys::FIRE | Keys::MODIFIER));
        assert_eq!(state.beams.len(), 3);
    }

    #[test]
    fn test_rapid_beam_burst_of_five() {
        let mut state = quiet_state();
        for _ in 0..6 {
            tick(&mut state, &press(Keys::FIRE));
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.beams.len(), 5);
        assert!(state.gauge(Ability::RapidBeam).cooldown() > 0);
    }

    #[test]
    fn test_shield_below_threshold_does_nothing() {
        let mut state = quiet_state();
        state.score = ScoreCounter::new(40);
        tick(&mut state, &press(Keys::SHIELD));
        assert!(state.shields.is_empty());
        assert!(!state.player.shield_active);
        assert_eq!(state.score.value(), 40);
    }

    #[test]
    fn test_shield_activation_and_expiry() {
        let mut state = quiet_state();
        state.score = ScoreCounter::new(120);
        tick(&mut state, &press(Keys::SHIELD));
        assert_eq!(state.shields.len(), 1);
        assert!(state.player.shield_active);
        assert_eq!(state.score.value(), 70);

        // Second request while one is up is ignored
        tick(&mut state, &TickInput::default());
        tick(&mut state, &press(Keys::SHIELD));
        assert_eq!(state.shields.len(), 1);
        assert_eq!(state.score.value(), 70);

        // Keep bombs and enemies out of the way while it runs down
        for _ in 0..SHIELD_LIFE {
            state.bombs.clear();
            state.enemies.clear();
            tick(&mut state, &TickInput::default());
        }
        assert!(state.shields.is_empty());
        assert!(!state.player.shield_active);
    }

    #[test]
    fn test_shield_follows_player() {
        let mut state = quiet_state();
        state.score = ScoreCounter::new(50);
        tick(&mut state, &press(Keys::SHIELD));
        tick(&mut state, &press(Keys::SHIELD | Keys::LEFT));
        assert_eq!(state.shields[0].pos, state.player.pos);
        assert_eq!(state.player.pos, PLAYER_START - Vec2::new(PLAYER_SPEED, 0.0));
    }

    #[test]
    fn test_gravity_field_wipes_enemies() {
        let mut state = quiet_state();
        state.score = ScoreCounter::new(200);
        let id = state.ids.allocate();
        state
            .enemies
            .push(Enemy::new(id, Vec2::new(100.0, 100.0), 200.0, 50));

        tick(&mut state, &press(Keys::GRAVITY));
        assert_eq!(state.score.value(), 0);
        assert_eq!(state.gravity_fields.len(), 1);
        assert!(state.enemies.is_empty());
        assert_eq!(state.explosions.len(), 1);
    }

    #[test]
    fn test_stopped_enemy_drops_aimed_bomb() {
        let mut state = quiet_state();
        state.tick = 50;
        let id = state.ids.allocate();
        let mut enemy = Enemy::new(id, Vec2::new(550.0, 100.0), 50.0, 50);
        enemy.state = EnemyState::Stopped;
        enemy.vel = Vec2::ZERO;
        state.enemies.push(enemy);

        tick(&mut state, &TickInput::default());
        assert_eq!(state.bombs.len(), 1);
        // Straight below the enemy, aimed straight at the player
        assert!((state.bombs[0].dir - Vec2::Y).length() < 1e-5);
    }

    #[test]
    fn test_bomb_on_player_ends_game_with_score_unchanged() {
        let mut state = quiet_state();
        state.score = ScoreCounter::new(33);
        let id = state.ids.allocate();
        state.bombs.push(Bomb {
            id,
            pos: state.player.pos,
            dir: Vec2::Y,
            speed: BOMB_SPEED,
            radius: 10.0,
            color: 0,
        });
        let tick_before = state.tick;

        let outcome = tick(&mut state, &TickInput::default());
        assert_eq!(
            outcome,
            TickOutcome::GameOver {
                score: 33,
                tick: tick_before
            }
        );
        assert!(state.is_game_over());

        // Frozen afterwards
        let again = tick(&mut state, &press(Keys::LEFT));
        assert_eq!(again, outcome);
        assert_eq!(state.player.pos, PLAYER_START);
    }

    #[test]
    fn test_quit_leaves_state_untouched() {
        let mut state = quiet_state();
        let before = state.tick;
        assert_eq!(tick(&mut state, &TickInput::quit()), TickOutcome::Quit);
        assert_eq!(state.tick, before);
        assert!(state.enemies.is_empty());
    }

    #[test]
    fn test_determinism() {
        // Two states with same seed should produce identical results
        let mut state1 = GameState::new(99999);
        let mut state2 = GameState::new(99999);

        let inputs = [
            press(Keys::LEFT),
            press(Keys::LEFT | Keys::FIRE),
            press(Keys::UP),
            press(Keys::FIRE | Keys::MODIFIER),
            TickInput::default(),
        ];

        for i in 0..300 {
            let input = &inputs[i % inputs.len()];
            tick(&mut state1, input);
            tick(&mut state2, input);
        }

        assert_eq!(state1.tick, state2.tick);
        assert_eq!(state1.score, state2.score);
        assert_eq!(state1.frame().sprites, state2.frame().sprites);
    }
}
