//! Input sources
//!
//! The simulation only ever sees a `TickInput` per tick. Anything that can
//! produce those (a keyboard layer, a replay, a script) plugs in here.

use crate::sim::{Ability, GameState, Keys, TickInput};

/// Produces one input snapshot per tick
pub trait InputSource {
    fn poll(&mut self, state: &GameState) -> TickInput;
}

/// Length of one pilot cycle in ticks: climb, fire, descend, sweep
const CYCLE: u64 = 4;
/// Cycles spent sweeping in one direction before turning round
const SWEEP_CYCLES: u64 = 50;
/// Every this many cycles the shot is a spread instead of a rapid beam
const SPREAD_EVERY: u64 = 25;
/// Bombs closer than this to the player make the pilot open a gravity field
const PANIC_DISTANCE: f32 = 150.0;

/// Deterministic autopilot used by the headless runner.
///
/// Works in four-tick cycles. It nudges up to face the enemies, fires, drops
/// back down and takes a sideways step, sweeping the playfield back and forth.
/// Shield and gravity go up whenever the gauges allow it.
#[derive(Debug, Default)]
pub struct ScriptedPilot {
    step: u64,
}

impl ScriptedPilot {
    pub fn new() -> Self {
        Self::default()
    }

    fn threatened(state: &GameState) -> bool {
        let player = state.player.pos;
        state
            .bombs
            .iter()
            .any(|b| b.pos.distance(player) < PANIC_DISTANCE)
    }
}

impl InputSource for ScriptedPilot {
    fn poll(&mut self, state: &GameState) -> TickInput {
        let step = self.step;
        self.step += 1;

        let cycle = step / CYCLE;
        let mut keys = Keys::none();
        match step % CYCLE {
            0 => keys.set(Keys::UP, true),
            1 => {
                keys.set(Keys::FIRE, true);
                keys.set(Keys::MODIFIER, cycle % SPREAD_EVERY == SPREAD_EVERY - 1);
            }
            2 => keys.set(Keys::DOWN, true),
            _ => {
                let sweep = if (cycle / SWEEP_CYCLES) % 2 == 0 {
                    Keys::LEFT
                } else {
                    Keys::RIGHT
                };
                keys.set(sweep, true);
            }
        }

        // Abilities fire on the key edge, so only press on even ticks
        if step % 2 == 0 {
            let score = state.score.value();
            if state.shields.is_empty() && state.gauge(Ability::Shield).is_ready(score) {
                keys.set(Keys::SHIELD, true);
            }
            if state.gravity_fields.is_empty()
                && state.gauge(Ability::Gravity).is_ready(score)
                && Self::threatened(state)
            {
                keys.set(Keys::GRAVITY, true);
            }
        }

        TickInput { keys, quit: false }
    }
}

/// Replays a fixed list of inputs, then reports quit
#[derive(Debug, Clone)]
pub struct Replay {
    inputs: Vec<TickInput>,
    cursor: usize,
}

impl Replay {
    pub fn new(inputs: Vec<TickInput>) -> Self {
        Self { inputs, cursor: 0 }
    }
}

impl InputSource for Replay {
    fn poll(&mut self, _state: &GameState) -> TickInput {
        match self.inputs.get(self.cursor) {
            Some(input) => {
                self.cursor += 1;
                *input
            }
            None => TickInput::quit(),
        }
    }
}
