//! Session and wave state
//!
//! The session moves Attract -> Playing -> (WaveClearing <-> Playing) ->
//! GameOver -> Attract. Only flags live here; the frame driver in
//! [`super::tick`] reads the pools and feeds the results in.

use glam::Vec2;

use crate::consts::*;
use crate::platform::RandomSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Idle screen before a session starts
    Attract,
    Playing,
    /// Enemies cleared; the next wave spawns on the following update
    WaveClearing,
    GameOver(Outcome),
}

/// What the driver must do after [`SessionState::advance`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WaveDecision {
    /// Win or lose was declared this frame
    pub declared: Option<Outcome>,
    /// The game-over delay ran out; reset to attract mode
    pub reset: bool,
    /// Spawn this wave's counts
    pub spawn_wave: Option<u32>,
    /// Play the new-wave cue
    pub announce_wave: bool,
}

#[derive(Debug, Clone)]
pub struct SessionState {
    attract: bool,
    /// Next wave to spawn (1-based)
    pub wave: u32,
    pub wave_complete: bool,
    outcome: Option<Outcome>,
    /// Simulated seconds since win/lose
    game_over_elapsed: f32,
    pub multiplayer: bool,
    pub max_waves: u32,
    pub reset_delay: f32,
    /// Camera shake per player view (0..=1)
    trauma: [f32; MAX_SHIPS],
    /// Host should close (Esc in attract mode)
    pub quit_requested: bool,
}

impl SessionState {
    pub fn new(max_waves: u32, reset_delay: f32, multiplayer: bool) -> Self {
        Self {
            attract: true,
            wave: 1,
            wave_complete: true,
            outcome: None,
            game_over_elapsed: 0.0,
            multiplayer,
            max_waves,
            reset_delay,
            trauma: [0.0; MAX_SHIPS],
            quit_requested: false,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.attract {
            Phase::Attract
        } else if let Some(outcome) = self.outcome {
            Phase::GameOver(outcome)
        } else if self.wave_complete {
            Phase::WaveClearing
        } else {
            Phase::Playing
        }
    }

    pub fn is_attract(&self) -> bool {
        self.attract
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn game_over_elapsed(&self) -> f32 {
        self.game_over_elapsed
    }

    /// Leave attract mode
    pub fn start_playing(&mut self) {
        if self.attract {
            self.attract = false;
            log::info!(
                "Session started ({})",
                if self.multiplayer { "two players" } else { "one player" }
            );
        }
    }

    /// Back to a fresh attract screen
    pub fn reset(&mut self, multiplayer: bool) {
        *self = Self::new(self.max_waves, self.reset_delay, multiplayer);
    }

    /// Win/lose, game-over delay and wave spawning, in that order
    ///
    /// `all_ships_out` is true when every ship is dead with no extra lives.
    pub fn advance(&mut self, dt: f32, all_ships_out: bool) -> WaveDecision {
        let mut decision = WaveDecision::default();

        if self.outcome.is_none() {
            let won = self.wave > self.max_waves && self.wave_complete;
            if won || all_ships_out {
                let outcome = if won { Outcome::Win } else { Outcome::Lose };
                self.outcome = Some(outcome);
                decision.declared = Some(outcome);
                log::info!("Game over: {:?} on wave {}", outcome, self.wave.saturating_sub(1));
            }
        }

        if self.outcome.is_some() {
            self.game_over_elapsed += dt;
            if self.game_over_elapsed >= self.reset_delay {
                decision.reset = true;
            }
            return decision;
        }

        if self.wave_complete {
            decision.spawn_wave = Some(self.wave);
            self.wave += 1;
            self.wave_complete = false;
            decision.announce_wave = self.wave <= self.max_waves;
            log::info!("Wave {} incoming", self.wave - 1);
        }
        decision
    }

    /// Record whether the beetle and wasp pools are empty after this frame's spawns
    pub fn observe_enemies(&mut self, cleared: bool) {
        if cleared && !self.wave_complete && self.outcome.is_none() {
            self.wave_complete = true;
            log::debug!("Wave {} cleared", self.wave - 1);
        }
    }

    pub fn trauma(&self, player: usize) -> f32 {
        self.trauma.get(player).copied().unwrap_or(0.0)
    }

    pub fn add_trauma(&mut self, player: usize, amount: f32) {
        if let Some(t) = self.trauma.get_mut(player) {
            *t = (*t + amount).clamp(0.0, CAM_SHAKE_MAX);
        }
    }

    pub fn decay_trauma(&mut self, dt: f32) {
        for t in &mut self.trauma {
            *t = (*t - CAM_SHAKE_REDUCTION_PER_SECOND * dt).clamp(0.0, CAM_SHAKE_MAX);
        }
    }

    /// Random camera offset for a player's view, each axis within `±trauma * CAM_SHAKE_MAX`
    pub fn shake_offset(&self, player: usize, rng: &mut dyn RandomSource) -> Vec2 {
        let shake = self.trauma(player) * CAM_SHAKE_MAX;
        if shake <= 0.0 {
            return Vec2::ZERO;
        }
        Vec2::new(
            rng.random_float_in_range(-1.0, 1.0) * shake,
            rng.random_float_in_range(-1.0, 1.0) * shake,
        )
    }
}
