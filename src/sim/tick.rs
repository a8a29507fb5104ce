//! Frame driver
//!
//! [`Game::frame`] is the single entry point the host calls once per
//! rendered frame. It handles session-level input, advances the clock and,
//! outside attract mode, runs one simulation step:
//!
//! 1. ship commands (respawn first)
//! 2. update every live entity, ships first
//! 3. apply queued spawns
//! 4. collision passes, then apply their spawns
//! 5. sweep garbage
//! 6. win/lose, game-over delay, wave spawning

use glam::Vec2;

use super::collision::{self, CollisionReport};
use super::context::{Effects, FrameContext, Services, WorldBounds};
use super::entity::EntityType;
use super::pool::Pools;
use super::ship::{self, ShipCommand};
use super::spawner::Spawner;
use super::state::{Outcome, SessionState, WaveDecision};
use crate::audio::{AudioMix, AudioSystem, PlaybackId, SoundEffect};
use crate::consts::SLOW_TIME_SCALE;
use crate::error::ConfigError;
use crate::platform::{Button, GameClock, Key, RandomSource};
use crate::settings::Settings;

/// Ping-pong timers driving the attract screen animation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttractAnimation {
    /// 0..=0.5, drives the start icon alpha
    pub blink: f32,
    blink_rate: f32,
    /// -1..=1, drives the idle ships' sweep
    pub sweep: f32,
    sweep_rate: f32,
}

impl Default for AttractAnimation {
    fn default() -> Self {
        Self {
            blink: 0.0,
            blink_rate: 1.0,
            sweep: 0.0,
            sweep_rate: 1.0,
        }
    }
}

impl AttractAnimation {
    pub fn update(&mut self, dt: f32) {
        (self.blink, self.blink_rate) = ping_pong(self.blink, self.blink_rate, dt, 0.0, 0.5);
        (self.sweep, self.sweep_rate) = ping_pong(self.sweep, self.sweep_rate, dt, -1.0, 1.0);
    }
}

fn ping_pong(value: f32, rate: f32, dt: f32, min: f32, max: f32) -> (f32, f32) {
    let next = value + rate * dt;
    if next > max {
        (max, -rate.abs())
    } else if next < min {
        (min, rate.abs())
    } else {
        (next, rate)
    }
}

pub struct Game {
    pub settings: Settings,
    pub pools: Pools,
    pub clock: GameClock,
    pub state: SessionState,
    pub mix: AudioMix,
    pub debug_draw: bool,
    pub attract: AttractAnimation,
    spawner: Spawner,
    music: Option<PlaybackId>,
    jingle: Option<PlaybackId>,
    /// Collisions resolved by the latest step
    pub last_collisions: CollisionReport,
}

impl Game {
    /// Build a session in attract mode with a populated star field
    pub fn new(settings: Settings, rng: &mut dyn RandomSource) -> Result<Self, ConfigError> {
        settings.validate()?;
        let clock = GameClock::new();
        let world = WorldBounds::new(settings.world_width, settings.world_height);
        let spawner = Spawner::new(world, clock.handle());
        let mut pools = Pools::new(&settings.pools);
        spawner.spawn_stars(&mut pools, rng);

        Ok(Self {
            state: SessionState::new(
                settings.max_waves,
                settings.reset_delay_seconds,
                settings.multiplayer,
            ),
            mix: AudioMix::from_settings(&settings),
            debug_draw: settings.debug_draw,
            attract: AttractAnimation::default(),
            pools,
            clock,
            spawner,
            settings,
            music: None,
            jingle: None,
            last_collisions: CollisionReport::default(),
        })
    }

    pub fn world(&self) -> WorldBounds {
        self.spawner.world()
    }

    pub fn music_playing(&self) -> bool {
        self.music.is_some()
    }

    /// Camera offset for a player's view (zero when shake is disabled)
    pub fn shake_offset(&self, player: usize, rng: &mut dyn RandomSource) -> Vec2 {
        if !self.settings.effective_screen_shake() {
            return Vec2::ZERO;
        }
        self.state.shake_offset(player, rng)
    }

    /// Run one host frame; returns the simulated delta
    pub fn frame(&mut self, raw_dt: f32, services: &mut Services) -> f32 {
        self.handle_global_input(services);
        if self.state.is_attract() && self.jingle.is_none() {
            self.jingle = Some(self.mix.play(&mut *services.audio, SoundEffect::AttractJingle));
        }

        let dt = self.clock.advance(raw_dt);
        if dt <= 0.0 {
            return 0.0;
        }
        self.state.decay_trauma(dt);

        if self.state.is_attract() {
            self.attract.update(dt);
        } else {
            self.step(dt, services);
        }
        dt
    }

    fn handle_global_input(&mut self, services: &mut Services) {
        let input = services.input;

        if input.was_key_just_pressed(Key::P) || input.was_button_just_pressed(Button::LeftShoulder) {
            self.clock.toggle_pause();
        }
        if input.was_key_just_pressed(Key::O) {
            self.clock.step_single_frame();
        }
        let slow = input.is_key_down(Key::T) || input.is_button_down(Button::LeftThumb);
        self.clock.set_time_scale(if slow { SLOW_TIME_SCALE } else { 1.0 });

        if input.was_key_just_pressed(Key::F1) {
            self.debug_draw = !self.debug_draw;
        }
        if input.was_key_just_pressed(Key::Q) {
            self.mix.music_muted = !self.mix.music_muted;
            if let Some(music) = self.music {
                services.audio.set_volume(music, self.mix.music_level());
            }
        }
        if input.was_key_just_pressed(Key::F8) {
            self.reset(&mut *services.audio);
            return;
        }

        let back = input.was_key_just_pressed(Key::Escape) || input.was_button_just_pressed(Button::Back);
        if self.state.is_attract() {
            if back {
                self.state.quit_requested = true;
                log::info!("Quit requested");
                return;
            }
            if input.was_key_just_pressed(Key::M) {
                self.state.multiplayer = !self.state.multiplayer;
                self.mix.play(&mut *services.audio, SoundEffect::MultiplayerToggle);
            }
            let start = input.was_key_just_pressed(Key::Space)
                || input.was_key_just_pressed(Key::N)
                || input.was_button_just_pressed(Button::A)
                || input.was_button_just_pressed(Button::Start);
            if start {
                self.start_session(&mut *services.audio);
            }
        } else if back {
            self.mix.play(&mut *services.audio, SoundEffect::Back);
            self.reset(&mut *services.audio);
        } else if input.was_key_just_pressed(Key::I) {
            self.spawner
                .spawn_at_random_edge(&mut self.pools, EntityType::Asteroid, &mut *services.rng);
        }
    }

    fn start_session(&mut self, audio: &mut dyn AudioSystem) {
        if let Some(jingle) = self.jingle.take() {
            audio.stop_sound(jingle);
        }
        self.spawner.spawn_ships(&mut self.pools, self.state.multiplayer);
        self.state.start_playing();
    }

    /// Drop the session and return to the attract screen; stars stay
    pub fn reset(&mut self, audio: &mut dyn AudioSystem) {
        if let Some(music) = self.music.take() {
            audio.stop_sound(music);
        }
        for kind in EntityType::ALL {
            if kind != EntityType::Star {
                self.pools.pool_mut(kind).clear();
            }
        }
        self.state.reset(self.settings.multiplayer);
        log::info!("Returned to attract mode");
    }

    /// One simulation step
    pub fn step(&mut self, dt: f32, services: &mut Services) {
        if self.music.is_none() {
            let level = self.mix.music_level();
            self.music = Some(self.mix.play_looped(&mut *services.audio, SoundEffect::Music, level));
        }

        let commands = ShipCommand::for_ships(services.input, self.state.multiplayer);
        let effects = {
            let mut ctx = FrameContext::new(
                &mut *services.audio,
                &mut *services.rng,
                self.mix,
                self.spawner.world(),
            );
            ctx.multiplayer = self.state.multiplayer;
            ctx.commands = commands;

            for ship in self.pools.ships.iter_mut() {
                let player = ship.ship().map_or(0, |s| s.player);
                if commands.get(player).is_some_and(|c| c.respawn) {
                    ship::respawn(ship, &mut ctx);
                }
            }
            for ship in self.pools.ships.iter_mut() {
                ship.update(dt, &mut ctx);
            }

            ctx.targets = self
                .pools
                .ships
                .alive()
                .filter(|s| !s.ship().is_some_and(|d| d.cloaked))
                .map(|s| s.pos)
                .collect();

            for kind in EntityType::ALL {
                if kind == EntityType::Ship {
                    continue;
                }
                for entity in self.pools.pool_mut(kind).iter_mut() {
                    entity.update(dt, &mut ctx);
                }
            }

            let mut effects = self.flush(&mut ctx);
            self.last_collisions = collision::resolve(&mut self.pools, &mut ctx);
            let late = self.flush(&mut ctx);
            for (total, extra) in effects.trauma.iter_mut().zip(late.trauma) {
                *total += extra;
            }
            effects
        };

        let swept = self.pools.sweep();
        if swept > 0 {
            log::debug!("Swept {} entities", swept);
        }
        debug_assert!(!self.pools.any_garbage());

        for (player, amount) in effects.trauma.iter().enumerate() {
            self.state.add_trauma(player, *amount);
        }

        self.update_waves(dt, services);
    }

    /// Apply queued spawns, returning the drained effects
    fn flush(&mut self, ctx: &mut FrameContext) -> Effects {
        let effects = ctx.take_effects();
        self.spawner.apply(&mut self.pools, effects.spawns, &mut *ctx.rng);
        Effects {
            spawns: Vec::new(),
            trauma: effects.trauma,
        }
    }

    fn all_ships_out(&self) -> bool {
        let mut ships = self.pools.ships.iter().map(|(_, e)| e).peekable();
        ships.peek().is_some()
            && ships.all(|e| !e.is_alive() && e.ship().is_some_and(|s| s.extra_lives == 0))
    }

    fn update_waves(&mut self, dt: f32, services: &mut Services) {
        let WaveDecision {
            declared,
            reset,
            spawn_wave,
            announce_wave,
        } = {
            let all_out = self.all_ships_out();
            self.state.advance(dt, all_out)
        };

        match declared {
            Some(Outcome::Win) => {
                self.mix.play(&mut *services.audio, SoundEffect::Win);
            }
            Some(Outcome::Lose) => {
                self.mix.play(&mut *services.audio, SoundEffect::Lose);
            }
            None => {}
        }
        if reset {
            self.reset(&mut *services.audio);
            return;
        }
        if let Some(wave) = spawn_wave {
            self.spawner
                .spawn_wave(&mut self.pools, wave, self.state.multiplayer, &mut *services.rng);
            if announce_wave {
                self.mix.play(&mut *services.audio, SoundEffect::NewWave);
            }
        }
        self.state.observe_enemies(self.pools.wave_enemies_cleared());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::platform::{InputSnapshot, SeededRng};
    use crate::sim::spawner::wave_counts;
    use crate::sim::state::Phase;

    const DT: f32 = 1.0 / 60.0;

    struct Harness {
        game: Game,
        audio: RecordingAudio,
        rng: SeededRng,
    }

    impl Harness {
        fn new(settings: Settings) -> Self {
            let mut rng = SeededRng::new(99);
            let game = Game::new(settings, &mut rng).unwrap();
            Self {
                game,
                audio: RecordingAudio::new(),
                rng,
            }
        }

        fn frame(&mut self, dt: f32, input: &InputSnapshot) -> f32 {
            let mut services = Services {
                audio: &mut self.audio,
                input,
                rng: &mut self.rng,
            };
            self.game.frame(dt, &mut services)
        }

        fn idle(&mut self, dt: f32) -> f32 {
            self.frame(dt, &InputSnapshot::new())
        }

        fn start(&mut self) {
            self.frame(DT, &InputSnapshot::new().press(Key::N));
        }
    }

    #[test]
    fn test_attract_until_start() {
        let mut h = Harness::new(Settings::default());
        h.idle(DT);
        assert_eq!(h.game.state.phase(), Phase::Attract);
        assert_eq!(h.game.pools.stars.len(), h.game.settings.pools.stars);
        assert!(h.game.pools.ships.is_empty());
        assert_eq!(h.audio.count(SoundEffect::AttractJingle), 1);

        h.start();
        assert!(!h.game.state.is_attract());
        assert_eq!(h.game.pools.ships.len(), 1);
        assert_eq!(h.audio.stopped.len(), 1);
        // The first playing step spawns wave one and starts music
        let counts = wave_counts(1, false);
        assert_eq!(h.game.pools.beetles.len(), counts.beetles);
        assert_eq!(h.game.pools.wasps.len(), counts.wasps);
        assert_eq!(h.game.pools.asteroids.len(), counts.asteroids);
        assert_eq!(h.game.state.wave, 2);
        assert!(h.game.music_playing());
        assert_eq!(h.audio.count(SoundEffect::Music), 1);
        assert_eq!(h.audio.count(SoundEffect::NewWave), 1);
    }

    #[test]
    fn test_multiplayer_toggle_doubles_wave() {
        let mut h = Harness::new(Settings::default());
        h.frame(DT, &InputSnapshot::new().press(Key::M));
        assert!(h.game.state.multiplayer);
        assert_eq!(h.audio.count(SoundEffect::MultiplayerToggle), 1);
        h.start();
        assert_eq!(h.game.pools.ships.len(), 2);
        assert_eq!(h.game.pools.beetles.len(), wave_counts(1, true).beetles);
    }

    #[test]
    fn test_pause_freezes_simulation() {
        let mut h = Harness::new(Settings::default());
        h.start();
        let before: Vec<Vec2> = h.game.pools.asteroids.alive().map(|a| a.pos).collect();

        h.frame(DT, &InputSnapshot::new().press(Key::P));
        assert!(h.game.clock.is_paused());
        for _ in 0..10 {
            assert_eq!(h.idle(DT), 0.0);
        }
        let after: Vec<Vec2> = h.game.pools.asteroids.alive().map(|a| a.pos).collect();
        assert_eq!(before, after);

        // Single step runs exactly one frame
        assert!(h.frame(DT, &InputSnapshot::new().press(Key::O)) > 0.0);
        assert_eq!(h.idle(DT), 0.0);
    }

    #[test]
    fn test_slow_motion_scales_delta() {
        let mut h = Harness::new(Settings::default());
        let dt = h.frame(1.0, &InputSnapshot::new().hold(Key::T));
        assert!((dt - SLOW_TIME_SCALE).abs() < 1e-6);
        assert_eq!(h.idle(1.0), 1.0);
    }

    #[test]
    fn test_no_garbage_survives_a_step() {
        let mut h = Harness::new(Settings::default());
        h.start();
        let firing = InputSnapshot::new().hold(Key::J).hold(Key::E).hold(Key::S);
        for i in 0..300 {
            let input = if i % 20 == 0 {
                firing.clone().press(Key::K).press(Key::L)
            } else {
                firing.clone()
            };
            h.frame(DT, &input);
            assert!(!h.game.pools.any_garbage());
            if h.game.state.is_attract() {
                break;
            }
        }
        assert!(h.audio.count(SoundEffect::Shoot) > 0);
    }

    #[test]
    fn test_lose_returns_to_attract_after_delay() {
        let mut h = Harness::new(Settings::default());
        h.start();
        let world = h.game.world();
        {
            let ship = h.game.pools.ships.at_mut(0).unwrap();
            if let Some(data) = ship.ship_mut() {
                data.extra_lives = 0;
            }
            let mut ctx = FrameContext::new(&mut h.audio, &mut h.rng, AudioMix::default(), world);
            assert!(ship.die(&mut ctx));
        }
        h.idle(DT);
        assert_eq!(h.game.state.phase(), Phase::GameOver(Outcome::Lose));
        assert_eq!(h.audio.count(SoundEffect::Lose), 1);
        // Ship died with no lives left: no death cue
        assert_eq!(h.audio.count(SoundEffect::ShipDie), 0);

        h.idle(1.0);
        assert!(!h.game.state.is_attract());
        h.idle(1.0);
        h.idle(1.0);
        assert!(h.game.state.is_attract());
        assert!(h.game.pools.ships.is_empty());
        assert!(h.game.pools.wasps.is_empty());
        assert!(!h.game.music_playing());
        assert_eq!(h.audio.count(SoundEffect::Lose), 1);
    }

    #[test]
    fn test_respawn_consumes_a_life() {
        let mut h = Harness::new(Settings::default());
        h.start();
        let world = h.game.world();
        {
            let ship = h.game.pools.ships.at_mut(0).unwrap();
            let mut ctx = FrameContext::new(&mut h.audio, &mut h.rng, AudioMix::default(), world);
            ship.die(&mut ctx);
        }
        h.idle(DT);
        assert!(!h.game.pools.ships.at(0).unwrap().is_alive());
        assert_eq!(h.game.state.outcome(), None);

        h.frame(DT, &InputSnapshot::new().press(Key::N));
        let ship = h.game.pools.ships.at(0).unwrap();
        assert!(ship.is_alive());
        let data = ship.ship().unwrap();
        assert_eq!(data.extra_lives, crate::consts::SHIP_EXTRA_LIVES - 1);
        assert!(data.cloaked);
    }

    #[test]
    fn test_manual_reset_and_quit() {
        let mut h = Harness::new(Settings::default());
        h.start();
        h.frame(DT, &InputSnapshot::new().press(Key::F8));
        assert!(h.game.state.is_attract());
        assert!(h.game.pools.asteroids.is_empty());
        assert!(!h.game.pools.stars.is_empty());

        h.start();
        h.frame(DT, &InputSnapshot::new().press(Key::Escape));
        assert!(h.game.state.is_attract());
        assert_eq!(h.audio.count(SoundEffect::Back), 1);
        assert!(!h.game.state.quit_requested);

        h.frame(DT, &InputSnapshot::new().press(Key::Escape));
        assert!(h.game.state.quit_requested);
    }

    #[test]
    fn test_mute_sets_music_volume() {
        let mut h = Harness::new(Settings::default());
        h.start();
        h.frame(DT, &InputSnapshot::new().press(Key::Q));
        assert!(h.game.mix.music_muted);
        assert_eq!(h.audio.volume_changes.last().map(|(_, v)| *v), Some(0.0));
    }

    #[test]
    fn test_invalid_settings_are_rejected() {
        let settings = Settings {
            world_width: -1.0,
            ..Settings::default()
        };
        let mut rng = SeededRng::new(1);
        assert!(Game::new(settings, &mut rng).is_err());
    }

    #[test]
    fn test_attract_animation_ping_pongs() {
        let mut anim = AttractAnimation::default();
        for _ in 0..200 {
            anim.update(0.05);
            assert!((0.0..=0.5).contains(&anim.blink));
            assert!((-1.0..=1.0).contains(&anim.sweep));
        }
    }
}
