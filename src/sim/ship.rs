//! Player ships
//!
//! Ships are created once per player when play starts and never leave their
//! pool slot: death only clears the alive flag, and respawn puts the ship
//! back at its start position at the cost of one extra life.

use glam::Vec2;

use super::context::{FrameContext, SpawnRequest, WorldBounds};
use super::entity::{Entity, EntityKind};
use crate::audio::SoundEffect;
use crate::consts::*;
use crate::platform::{Button, InputState, Key};
use crate::renderer::{Color, colors, rgba8};
use crate::{degrees_of, range_map_clamped};

/// Cooldown timers at spawn (cloak nearly ready, specials ready)
const INITIAL_FIRE_TIMER: f32 = -0.1;
const INITIAL_SPECIAL_A_TIMER: f32 = 2.0;
const INITIAL_SPECIAL_B_TIMER: f32 = 5.0;
const INITIAL_CLOAK_COOLDOWN: f32 = 9.9;

/// Distance from center to the nose, where projectiles appear
const NOSE_OFFSET: f32 = 1.0;
const MAX_FLAME_LENGTH: f32 = 3.0;

const DEATH_DEBRIS: usize = 20;
const DEATH_DEBRIS_SPREAD: f32 = 10.0;
const DEATH_TRAUMA: f32 = 1.5;

/// One frame of control intent for a ship
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ShipCommand {
    /// -1..=1, positive turns counter-clockwise
    pub turn: f32,
    pub thrust: bool,
    /// Analog heading and thrust fraction (overrides `turn`/`thrust`)
    pub stick: Option<Vec2>,
    /// Held
    pub fire: bool,
    /// Edge-triggered
    pub special_a: bool,
    pub special_b: bool,
    pub cloak: bool,
    pub respawn: bool,
}

impl ShipCommand {
    pub fn from_keyboard(input: &dyn InputState) -> Self {
        let mut turn = 0.0;
        if input.is_key_down(Key::S) {
            turn += 1.0;
        }
        if input.is_key_down(Key::F) {
            turn -= 1.0;
        }
        Self {
            turn,
            thrust: input.is_key_down(Key::E),
            stick: None,
            fire: input.is_key_down(Key::J),
            special_a: input.was_key_just_pressed(Key::K),
            special_b: input.was_key_just_pressed(Key::L),
            cloak: input.was_key_just_pressed(Key::Space),
            respawn: input.was_key_just_pressed(Key::N),
        }
    }

    pub fn from_gamepad(input: &dyn InputState) -> Self {
        let stick = input.left_stick();
        Self {
            turn: 0.0,
            thrust: false,
            stick: (stick.length_squared() > 0.0).then_some(stick),
            fire: input.is_button_down(Button::A),
            special_a: input.was_button_just_pressed(Button::B),
            special_b: input.was_button_just_pressed(Button::X),
            cloak: input.was_button_just_pressed(Button::Y),
            respawn: input.was_button_just_pressed(Button::Start),
        }
    }

    /// Combine two control sources driving the same ship
    pub fn merge(self, other: ShipCommand) -> Self {
        Self {
            turn: (self.turn + other.turn).clamp(-1.0, 1.0),
            thrust: self.thrust || other.thrust,
            stick: self.stick.or(other.stick),
            fire: self.fire || other.fire,
            special_a: self.special_a || other.special_a,
            special_b: self.special_b || other.special_b,
            cloak: self.cloak || other.cloak,
            respawn: self.respawn || other.respawn,
        }
    }

    /// Keyboard and gamepad share ship A in single player; split in multiplayer
    pub fn for_ships(input: &dyn InputState, multiplayer: bool) -> [ShipCommand; MAX_SHIPS] {
        let keyboard = Self::from_keyboard(input);
        let gamepad = Self::from_gamepad(input);
        if multiplayer {
            [keyboard, gamepad]
        } else {
            [keyboard.merge(gamepad), ShipCommand::default()]
        }
    }
}

/// Ship-only state
#[derive(Debug, Clone)]
pub struct ShipData {
    /// 0 for player A, 1 for player B
    pub player: usize,
    pub extra_lives: i32,
    /// Seconds since the last regular shot
    pub fire_timer: f32,
    pub special_a_timer: f32,
    pub special_b_timer: f32,
    pub cloaked: bool,
    /// Seconds into the current cloak
    pub cloak_timer: f32,
    /// Seconds since the last cloak ended
    pub cloak_cooldown: f32,
    pub thrust_fraction: f32,
    pub flame_length: f32,
    pub flame_color: Color,
    pub start_pos: Vec2,
    pub start_orientation_deg: f32,
}

impl ShipData {
    pub fn is_second_player(&self) -> bool {
        self.player == 1
    }

    pub fn cloak_ready(&self) -> bool {
        self.cloak_cooldown >= CLOAK_COOLDOWN
    }

    /// Ship alpha (0..=1): fades out over the first half of a cloak, back in over the second
    pub fn cloak_alpha(&self) -> f32 {
        let half = CLOAK_DURATION * 0.5;
        if self.cloak_timer < half {
            range_map_clamped(self.cloak_timer, 0.0, half, 1.0, 0.0)
        } else {
            range_map_clamped(self.cloak_timer, half, CLOAK_DURATION, 0.0, 1.0)
        }
    }
}

/// Start position and heading for a player slot
pub fn start_transform(player: usize, world: &WorldBounds) -> (Vec2, f32) {
    let center = world.center();
    if player == 0 {
        (center - Vec2::new(SHIP_START_OFFSET_X, 0.0), 0.0)
    } else {
        (center + Vec2::new(SHIP_START_OFFSET_X, 0.0), 180.0)
    }
}

pub fn player_color(player: usize) -> Color {
    if player == 0 { colors::SHIP_A } else { colors::SHIP_B }
}

pub fn new_ship(player: usize, world: &WorldBounds) -> Entity {
    let (pos, orientation_deg) = start_transform(player, world);
    let data = ShipData {
        player,
        extra_lives: SHIP_EXTRA_LIVES,
        fire_timer: INITIAL_FIRE_TIMER,
        special_a_timer: INITIAL_SPECIAL_A_TIMER,
        special_b_timer: INITIAL_SPECIAL_B_TIMER,
        cloaked: false,
        cloak_timer: 0.0,
        cloak_cooldown: INITIAL_CLOAK_COOLDOWN,
        thrust_fraction: 0.0,
        flame_length: 0.0,
        flame_color: rgba8(255, 0, 0, 255),
        start_pos: pos,
        start_orientation_deg: orientation_deg,
    };
    Entity::new(
        EntityKind::Ship(data),
        pos,
        orientation_deg,
        player_color(player),
        SHIP_PHYSICS_RADIUS,
        SHIP_COSMETIC_RADIUS,
        1,
    )
}

pub(super) fn update(e: &mut Entity, dt: f32, ctx: &mut FrameContext) {
    let Some(player) = e.ship().map(|s| s.player) else {
        return;
    };
    let command = ctx.commands.get(player).copied().unwrap_or_default();

    update_flame(e, dt, ctx);
    apply_controls(e, &command, dt, ctx);
    update_timers(e, dt);
    bounce_off_walls(e, ctx);
    e.pos += e.vel * dt;
}

fn update_flame(e: &mut Entity, dt: f32, ctx: &mut FrameContext) {
    if dt <= 0.0 {
        return;
    }
    let flicker = ctx.rng.random_float_in_range(0.0, 1.0);
    let Some(ship) = e.ship_mut() else {
        return;
    };
    ship.flame_color = [1.0, flicker, 0.0, 1.0];
    ship.flame_length = ctx
        .rng
        .random_float_in_range(0.0, ship.thrust_fraction * MAX_FLAME_LENGTH);
}

fn apply_controls(e: &mut Entity, command: &ShipCommand, dt: f32, ctx: &mut FrameContext) {
    // Steering
    if let Some(stick) = command.stick {
        e.orientation_deg = degrees_of(stick);
        let fraction = stick.length().min(1.0);
        e.vel = (e.vel + e.forward() * SHIP_ACCELERATION * fraction * dt).clamp_length_max(SHIP_MAX_SPEED);
        if let Some(ship) = e.ship_mut() {
            ship.thrust_fraction = fraction;
        }
    } else {
        e.orientation_deg += SHIP_TURN_SPEED * command.turn * dt;
        if command.thrust {
            e.vel = (e.vel + e.forward() * SHIP_ACCELERATION * dt).clamp_length_max(SHIP_MAX_SPEED);
        }
        if let Some(ship) = e.ship_mut() {
            let delta = if command.thrust { dt } else { -dt };
            ship.thrust_fraction = (ship.thrust_fraction + delta).clamp(0.0, 1.0);
        }
    }

    let forward = e.forward();
    let nose = e.pos + forward * NOSE_OFFSET;
    let (ship_vel, orientation_deg) = (e.vel, e.orientation_deg);
    let Some(ship) = e.ship_mut() else {
        return;
    };

    if command.fire && !ship.cloaked && ship.fire_timer >= FIRE_COOLDOWN {
        ship.fire_timer = 0.0;
        ctx.spawn(SpawnRequest::Projectile {
            pos: nose,
            orientation_deg,
            vel: ship_vel + forward * PROJECTILE_SPEED,
        });
        ctx.play(SoundEffect::Shoot);
    }

    if command.cloak && ship.cloak_ready() {
        ship.cloaked = true;
        ship.cloak_timer = 0.0;
        ship.cloak_cooldown = 0.0;
        ctx.play(SoundEffect::Cloak);
    }

    if command.special_a && ship.special_a_timer >= SPECIAL_A_COOLDOWN && !ship.cloaked {
        ship.special_a_timer = 0.0;
        ctx.spawn(SpawnRequest::Fan {
            origin: nose,
            orientation_deg,
            base_vel: ship_vel,
            count: SPECIAL_A_COUNT,
            spread_deg: SPECIAL_A_SPREAD,
        });
        ctx.play(SoundEffect::SpecialBurst);
    }

    if command.special_b && ship.special_b_timer >= SPECIAL_B_COOLDOWN && !ship.cloaked {
        ship.special_b_timer = 0.0;
        ctx.spawn(SpawnRequest::Fan {
            origin: nose,
            orientation_deg,
            base_vel: ship_vel,
            count: SPECIAL_B_COUNT,
            spread_deg: SPECIAL_B_SPREAD,
        });
        ctx.play(SoundEffect::SpecialBurst);
    }
}

fn update_timers(e: &mut Entity, dt: f32) {
    let Some(ship) = e.ship_mut() else {
        return;
    };
    if ship.cloaked {
        ship.cloak_timer += dt;
        if ship.cloak_timer >= CLOAK_DURATION {
            ship.cloaked = false;
            ship.cloak_timer = 0.0;
            ship.cloak_cooldown = 0.0;
        }
    } else {
        ship.cloak_cooldown += dt;
    }
    ship.fire_timer += dt;
    ship.special_a_timer += dt;
    ship.special_b_timer += dt;
}

fn bounce_off_walls(e: &mut Entity, ctx: &mut FrameContext) {
    let r = e.physics_radius();
    let (w, h) = (ctx.world.width, ctx.world.height);
    let mut bounced = false;

    if e.pos.x < r {
        e.pos.x = r;
        e.vel.x = -e.vel.x;
        bounced = true;
    }
    if e.pos.x > w - r {
        e.pos.x = w - r;
        e.vel.x = -e.vel.x;
        bounced = true;
    }
    if e.pos.y < r {
        e.pos.y = r;
        e.vel.y = -e.vel.y;
        bounced = true;
    }
    if e.pos.y > h - r {
        e.pos.y = h - r;
        e.vel.y = -e.vel.y;
        bounced = true;
    }

    let cloaked = e.ship().is_some_and(|s| s.cloaked);
    if bounced && !cloaked && e.is_alive() {
        ctx.play(SoundEffect::Collision);
    }
}

/// Death effects: debris, shake on the owner's view, and a cue while lives remain
pub(super) fn on_death(e: &mut Entity, ctx: &mut FrameContext) {
    let Some(ship) = e.ship() else {
        return;
    };
    let player = ship.player;
    if ship.extra_lives != 0 {
        ctx.play(SoundEffect::ShipDie);
    }
    ctx.add_trauma(player, DEATH_TRAUMA);
    ctx.spawn(SpawnRequest::Burst {
        count: DEATH_DEBRIS,
        origin: e.pos,
        average_vel: e.vel,
        spread_speed: DEATH_DEBRIS_SPREAD,
        radius: e.physics_radius() * DEBRIS_SCALE,
        color: e.original_color,
    });
}

/// Bring a dead ship back at its start position, cloaked, for one extra life
pub fn respawn(e: &mut Entity, ctx: &mut FrameContext) -> bool {
    if e.is_alive() {
        return false;
    }
    let Some(ship) = e.ship_mut() else {
        return false;
    };
    if ship.extra_lives <= 0 {
        return false;
    }
    ship.extra_lives -= 1;
    ship.cloaked = true;
    ship.cloak_timer = 0.0;
    let (pos, orientation_deg) = (ship.start_pos, ship.start_orientation_deg);
    let lives = ship.extra_lives;

    e.pos = pos;
    e.orientation_deg = orientation_deg;
    e.vel = Vec2::ZERO;
    e.health = 1;
    e.revive();
    ctx.play(SoundEffect::ShipRespawn);
    log::info!("Player {} respawned ({} extra lives left)", e.ship().map_or(0, |s| s.player) + 1, lives);
    true
}

/// Two ships bumped: both reverse course
pub fn bounce_apart(a: &mut Entity, b: &mut Entity, ctx: &mut FrameContext) {
    a.vel = -a.vel;
    b.vel = -b.vel;
    ctx.play(SoundEffect::Collision);
    ctx.play(SoundEffect::Collision);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::platform::{InputSnapshot, SeededRng};

    fn world() -> WorldBounds {
        WorldBounds::new(WORLD_SIZE_X, WORLD_SIZE_Y)
    }

    fn run(ship: &mut Entity, command: ShipCommand, dt: f32, audio: &mut RecordingAudio) -> Vec<SpawnRequest> {
        let mut rng = SeededRng::new(11);
        let mut ctx = FrameContext::new(audio, &mut rng, Default::default(), world());
        ctx.commands[0] = command;
        ship.update(dt, &mut ctx);
        ctx.take_effects().spawns
    }

    #[test]
    fn test_ships_start_apart_facing_each_other() {
        let a = new_ship(0, &world());
        let b = new_ship(1, &world());
        assert_eq!(a.pos, Vec2::new(WORLD_CENTER_X - 50.0, WORLD_CENTER_Y));
        assert_eq!(b.pos, Vec2::new(WORLD_CENTER_X + 50.0, WORLD_CENTER_Y));
        assert_eq!(a.orientation_deg, 0.0);
        assert_eq!(b.orientation_deg, 180.0);
        assert!(b.ship().is_some_and(|s| s.is_second_player()));
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut audio = RecordingAudio::new();
        let mut ship = new_ship(0, &world());
        let fire = ShipCommand {
            fire: true,
            ..Default::default()
        };
        let spawns = run(&mut ship, fire, 0.25, &mut audio);
        assert!(spawns.is_empty(), "initial fire timer is negative");

        let spawns = run(&mut ship, fire, 0.01, &mut audio);
        assert_eq!(spawns.len(), 1);
        let spawns = run(&mut ship, fire, 0.05, &mut audio);
        assert!(spawns.is_empty());
        assert_eq!(audio.count(SoundEffect::Shoot), 1);
    }

    #[test]
    fn test_special_fans() {
        let mut audio = RecordingAudio::new();
        let mut ship = new_ship(0, &world());
        let spawns = run(
            &mut ship,
            ShipCommand {
                special_a: true,
                special_b: true,
                ..Default::default()
            },
            0.01,
            &mut audio,
        );
        let counts: Vec<usize> = spawns
            .iter()
            .filter_map(|s| match s {
                SpawnRequest::Fan { count, .. } => Some(*count),
                _ => None,
            })
            .collect();
        assert_eq!(counts, vec![SPECIAL_A_COUNT, SPECIAL_B_COUNT]);
    }

    #[test]
    fn test_cloak_blocks_firing_and_expires() {
        let mut audio = RecordingAudio::new();
        let mut ship = new_ship(0, &world());
        // Cooldown starts at 9.9
        run(&mut ship, ShipCommand::default(), 0.2, &mut audio);
        run(
            &mut ship,
            ShipCommand {
                cloak: true,
                ..Default::default()
            },
            0.01,
            &mut audio,
        );
        assert!(ship.ship().is_some_and(|s| s.cloaked));

        let spawns = run(
            &mut ship,
            ShipCommand {
                fire: true,
                ..Default::default()
            },
            0.5,
            &mut audio,
        );
        assert!(spawns.is_empty());

        run(&mut ship, ShipCommand::default(), CLOAK_DURATION, &mut audio);
        let data = ship.ship().cloned().unwrap();
        assert!(!data.cloaked);
        assert!(!data.cloak_ready());
    }

    #[test]
    fn test_thrust_is_capped() {
        let mut audio = RecordingAudio::new();
        let mut ship = new_ship(0, &world());
        for _ in 0..200 {
            run(
                &mut ship,
                ShipCommand {
                    thrust: true,
                    ..Default::default()
                },
                0.05,
                &mut audio,
            );
        }
        assert!(ship.vel.length() <= SHIP_MAX_SPEED + 1e-3);
        assert!(ship.ship().is_some_and(|s| s.thrust_fraction == 1.0));
    }

    #[test]
    fn test_bounce_off_wall() {
        let mut audio = RecordingAudio::new();
        let mut ship = new_ship(0, &world());
        ship.pos = Vec2::new(0.5, 100.0);
        ship.vel = Vec2::new(-10.0, 0.0);
        run(&mut ship, ShipCommand::default(), 0.01, &mut audio);
        assert!(ship.vel.x > 0.0);
        assert!(ship.pos.x >= SHIP_PHYSICS_RADIUS);
        assert_eq!(audio.count(SoundEffect::Collision), 1);
    }

    #[test]
    fn test_respawn_costs_a_life() {
        let mut audio = RecordingAudio::new();
        let mut rng = SeededRng::new(1);
        let mut ctx = FrameContext::new(&mut audio, &mut rng, Default::default(), world());
        let mut ship = new_ship(0, &ctx.world);
        ship.pos = Vec2::new(10.0, 10.0);

        assert!(!respawn(&mut ship, &mut ctx), "live ships do not respawn");
        assert!(ship.die(&mut ctx));
        assert!(!ship.is_garbage(), "ships stay in their slot");
        assert_eq!(ctx.effects.bursts(), 1);
        assert_eq!(ctx.effects.trauma[0], DEATH_TRAUMA);

        assert!(respawn(&mut ship, &mut ctx));
        let data = ship.ship().cloned().unwrap();
        assert!(ship.is_alive());
        assert_eq!(data.extra_lives, SHIP_EXTRA_LIVES - 1);
        assert!(data.cloaked);
        assert_eq!(ship.pos, data.start_pos);
    }

    #[test]
    fn test_death_cue_only_with_lives_left() {
        let mut audio = RecordingAudio::new();
        {
            let mut rng = SeededRng::new(1);
            let mut ctx = FrameContext::new(&mut audio, &mut rng, Default::default(), world());
            let mut ship = new_ship(0, &ctx.world);
            if let Some(data) = ship.ship_mut() {
                data.extra_lives = 0;
            }
            ship.die(&mut ctx);
        }
        assert_eq!(audio.count(SoundEffect::ShipDie), 0);
    }

    #[test]
    fn test_command_routing() {
        let input = InputSnapshot::new().hold(Key::J).press_button(Button::Y);
        let single = ShipCommand::for_ships(&input, false);
        assert!(single[0].fire && single[0].cloak);
        assert_eq!(single[1], ShipCommand::default());

        let multi = ShipCommand::for_ships(&input, true);
        assert!(multi[0].fire && !multi[0].cloak);
        assert!(multi[1].cloak && !multi[1].fire);
    }

    #[test]
    fn test_stick_sets_heading() {
        let mut audio = RecordingAudio::new();
        let mut ship = new_ship(0, &world());
        run(
            &mut ship,
            ShipCommand {
                stick: Some(Vec2::new(0.0, 0.5)),
                ..Default::default()
            },
            0.1,
            &mut audio,
        );
        assert!((ship.orientation_deg - 90.0).abs() < 1e-3);
        assert!(ship.vel.y > 0.0);
        assert!(ship.ship().is_some_and(|s| (s.thrust_fraction - 0.5).abs() < 1e-5));
    }
}
