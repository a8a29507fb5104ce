//! Scene composition
//!
//! Turns a [`Game`] into draw calls. World geometry uses world units; the
//! HUD (attract screen, extra-life icons) uses a fixed screen space of
//! [`SCREEN_WIDTH`] x [`SCREEN_HEIGHT`]. Nothing here mutates the game.

use glam::Vec2;

use super::shapes::{self, BEETLE_TRIANGLES, SHIP_TRIANGLES, STAR_TRIANGLES, WASP_TRIANGLES};
use super::vertex::{Color, colors, rgba8, with_alpha};
use super::Renderer;
use crate::consts::*;
use crate::direction_from_degrees;
use crate::sim::debris::fade_alpha;
use crate::sim::entity::{Entity, EntityKind, EntityType};
use crate::sim::ship::{ShipData, player_color};
use crate::sim::Game;

pub const SCREEN_WIDTH: f32 = 1600.0;
pub const SCREEN_HEIGHT: f32 = 800.0;

const DECOY_OFFSET: f32 = 4.0;
const DECOY_SCALE: f32 = 2.0;
const DECOY_COLOR: Color = rgba8(192, 192, 192, 127);

const BAR_THICKNESS: f32 = 0.5;
const SKILL_BAR_THICKNESS: f32 = 0.4;

const START_ICON: [Vec2; 3] = [Vec2::new(-2.0, 2.0), Vec2::new(2.0, 0.0), Vec2::new(-2.0, -2.0)];
const START_ICON_SCALE: f32 = 50.0;
const IDLE_SHIP_SCALE: f32 = 80.0;
const LIFE_ICON_SCALE: f32 = 10.0;
const LIFE_ICON_SPACING: f32 = 50.0;

impl Game {
    /// Draw the play field in world space
    pub fn render(&self, r: &mut dyn Renderer) {
        for kind in [
            EntityType::Star,
            EntityType::Projectile,
            EntityType::Asteroid,
            EntityType::Debris,
            EntityType::Beetle,
            EntityType::Wasp,
        ] {
            for entity in self.pools.pool(kind).alive() {
                render_entity(entity, r);
            }
        }
        for ship in self.pools.ships.iter().map(|(_, e)| e) {
            render_ship(ship, r);
        }

        if self.debug_draw {
            self.render_debug(r);
        }
    }

    /// Draw the screen-space overlay: attract screen or extra-life icons
    pub fn render_hud(&self, r: &mut dyn Renderer) {
        if self.state.is_attract() {
            self.render_attract(r);
            return;
        }
        for (_, ship) in self.pools.ships.iter() {
            let Some(data) = ship.ship() else {
                continue;
            };
            let base_x = if data.is_second_player() { SCREEN_WIDTH * 0.5 } else { LIFE_ICON_SPACING };
            for i in 0..data.extra_lives.max(0) {
                let pos = Vec2::new(base_x + LIFE_ICON_SPACING * i as f32, SCREEN_HEIGHT - 50.0);
                r.draw_triangles(&shapes::transform_triangles(
                    &SHIP_TRIANGLES,
                    pos,
                    90.0,
                    LIFE_ICON_SCALE,
                    player_color(data.player),
                ));
            }
        }
    }

    fn render_attract(&self, r: &mut dyn Renderer) {
        let center = Vec2::new(SCREEN_WIDTH * 0.5, SCREEN_HEIGHT * 0.5);
        let alpha = (100.0 + self.attract.blink * 200.0) / 255.0;
        r.draw_triangles(&shapes::transform_triangles(
            &START_ICON,
            center,
            0.0,
            START_ICON_SCALE,
            with_alpha(colors::HEALTH_FILL, alpha),
        ));

        let sweep = self.attract.sweep * 40.0;
        r.draw_triangles(&shapes::transform_triangles(
            &SHIP_TRIANGLES,
            Vec2::new(SCREEN_WIDTH * 0.25 + sweep, center.y),
            0.0,
            IDLE_SHIP_SCALE,
            colors::SHIP_A,
        ));
        if self.state.multiplayer {
            r.draw_triangles(&shapes::transform_triangles(
                &SHIP_TRIANGLES,
                Vec2::new(SCREEN_WIDTH * 0.75 - sweep, center.y),
                180.0,
                IDLE_SHIP_SCALE,
                colors::SHIP_B,
            ));
        }
    }

    fn render_debug(&self, r: &mut dyn Renderer) {
        let ships: Vec<Vec2> = self.pools.ships.alive().map(|s| s.pos).collect();
        for kind in EntityType::ALL {
            for entity in self.pools.pool(kind).alive() {
                if kind != EntityType::Ship {
                    for ship in &ships {
                        r.draw_line(entity.pos, *ship, DEBUG_LINE_THICKNESS, colors::DEBUG_LINK);
                    }
                }
                render_entity_debug(entity, r);
            }
        }
    }
}

fn render_entity(e: &Entity, r: &mut dyn Renderer) {
    match &e.kind {
        EntityKind::Star(data) => {
            let color = with_alpha(e.color, data.alpha());
            r.draw_triangles(&shapes::transform_triangles(
                &STAR_TRIANGLES,
                e.pos,
                0.0,
                data.scale,
                color,
            ));
        }
        EntityKind::Projectile => {
            r.draw_triangles(&shapes::projectile(
                e.pos,
                e.orientation_deg,
                colors::PROJECTILE,
                colors::PROJECTILE_TAIL,
            ));
        }
        EntityKind::Asteroid(data) => {
            let local = shapes::radial_fan(&data.outline);
            r.draw_triangles(&shapes::transform_triangles(&local, e.pos, data.spin_deg, 1.0, e.color));
            render_health_bar(e, 1.0, r);
        }
        EntityKind::Debris(data) => {
            let local = shapes::radial_fan(&data.outline);
            let color = with_alpha(e.color, fade_alpha(e.age));
            r.draw_triangles(&shapes::transform_triangles(&local, e.pos, e.orientation_deg, 1.0, color));
        }
        EntityKind::Beetle => {
            r.draw_triangles(&shapes::transform_triangles(
                &BEETLE_TRIANGLES,
                e.pos,
                e.orientation_deg,
                1.0,
                e.color,
            ));
        }
        EntityKind::Wasp => {
            r.draw_triangles(&shapes::transform_triangles(
                &WASP_TRIANGLES,
                e.pos,
                e.orientation_deg,
                1.0,
                e.color,
            ));
            render_health_bar(e, 2.0, r);
        }
        EntityKind::Ship(_) => render_ship(e, r),
    }
}

/// Red background with a green fill of `health * unit_width`
fn render_health_bar(e: &Entity, unit_width: f32, r: &mut dyn Renderer) {
    let y = e.pos.y + 3.5;
    let start = Vec2::new(e.pos.x - 2.0, y);
    r.draw_line(start, Vec2::new(e.pos.x + 2.0, y), BAR_THICKNESS, colors::HEALTH_BACK);
    let fill = e.health.max(0) as f32 * unit_width;
    r.draw_line(start, start + Vec2::new(fill, 0.0), BAR_THICKNESS, colors::HEALTH_FILL);
}

fn render_ship(e: &Entity, r: &mut dyn Renderer) {
    let Some(data) = e.ship() else {
        return;
    };
    if e.is_alive() {
        r.draw_triangles(&shapes::flame(e.pos, e.orientation_deg, data.flame_length, data.flame_color));
        let alpha = if data.cloaked { data.cloak_alpha() } else { 1.0 };
        r.draw_triangles(&shapes::transform_triangles(
            &SHIP_TRIANGLES,
            e.pos,
            e.orientation_deg,
            1.0,
            with_alpha(e.color, alpha),
        ));
        if !data.cloaked {
            render_skill_bars(e.pos, data, e.original_color, r);
        }
    }
    if data.cloaked {
        for offset in [Vec2::X, -Vec2::X, Vec2::Y, -Vec2::Y] {
            r.draw_triangles(&shapes::transform_triangles(
                &SHIP_TRIANGLES,
                e.pos + offset * DECOY_OFFSET,
                e.orientation_deg,
                DECOY_SCALE,
                DECOY_COLOR,
            ));
        }
    }
}

/// Cloak, special A and special B readiness under the ship
fn render_skill_bars(pos: Vec2, data: &ShipData, ship_color: Color, r: &mut dyn Renderer) {
    let bars = [
        (
            data.cloak_cooldown.clamp(0.0, CLOAK_COOLDOWN),
            CLOAK_COOLDOWN,
            0.4,
            3.5,
            BAR_THICKNESS,
            ship_color,
        ),
        (
            data.special_a_timer.clamp(0.0, SPECIAL_A_COOLDOWN),
            SPECIAL_A_COOLDOWN,
            4.0,
            4.5,
            SKILL_BAR_THICKNESS,
            colors::SPECIAL_A_READY,
        ),
        (
            data.special_b_timer.clamp(0.0, SPECIAL_B_COOLDOWN),
            SPECIAL_B_COOLDOWN,
            2.0,
            5.5,
            SKILL_BAR_THICKNESS,
            colors::SPECIAL_B_READY,
        ),
    ];
    for (value, full, unit_width, below, thickness, ready) in bars {
        let color = if value >= full { ready } else { colors::COOLDOWN_PENDING };
        let start = Vec2::new(pos.x - 2.0, pos.y - below);
        r.draw_line(start, start + Vec2::new(value * unit_width, 0.0), thickness, color);
    }
}

fn render_entity_debug(e: &Entity, r: &mut dyn Renderer) {
    r.draw_ring(e.pos, e.physics_radius(), DEBUG_LINE_THICKNESS, colors::DEBUG_PHYSICS);
    r.draw_ring(e.pos, e.cosmetic_radius(), DEBUG_LINE_THICKNESS, colors::DEBUG_COSMETIC);
    let reach = e.cosmetic_radius();
    r.draw_line(e.pos, e.pos + e.forward() * reach, DEBUG_LINE_THICKNESS, colors::DEBUG_FORWARD);
    r.draw_line(
        e.pos,
        e.pos + direction_from_degrees(e.orientation_deg + 90.0) * reach,
        DEBUG_LINE_THICKNESS,
        colors::DEBUG_LEFT,
    );
    r.draw_line(e.pos, e.pos + e.vel, DEBUG_LINE_THICKNESS, colors::DEBUG_VELOCITY);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::RecordingAudio;
    use crate::platform::{InputSnapshot, Key, SeededRng};
    use crate::renderer::TriangleBuffer;
    use crate::settings::Settings;
    use crate::sim::Services;

    fn started_game() -> (Game, RecordingAudio, SeededRng) {
        let mut rng = SeededRng::new(21);
        let mut audio = RecordingAudio::new();
        let mut game = Game::new(Settings::default(), &mut rng).unwrap();
        let input = InputSnapshot::new().press(Key::N);
        let mut services = Services {
            audio: &mut audio,
            input: &input,
            rng: &mut rng,
        };
        game.frame(1.0 / 60.0, &mut services);
        (game, audio, rng)
    }

    #[test]
    fn test_attract_hud_draws_start_icon_and_idle_ship() {
        let mut rng = SeededRng::new(21);
        let game = Game::new(Settings::default(), &mut rng).unwrap();
        let mut buffer = TriangleBuffer::new();
        game.render_hud(&mut buffer);
        assert_eq!(buffer.triangle_count(), 1 + SHIP_TRIANGLES.len() / 3);
    }

    #[test]
    fn test_render_does_not_touch_state() {
        let (game, _, _) = started_game();
        let positions: Vec<Vec2> = game.pools.asteroids.alive().map(|a| a.pos).collect();
        let mut buffer = TriangleBuffer::new();
        game.render(&mut buffer);
        game.render_hud(&mut buffer);
        assert!(buffer.triangle_count() > 0);
        let after: Vec<Vec2> = game.pools.asteroids.alive().map(|a| a.pos).collect();
        assert_eq!(positions, after);
    }

    #[test]
    fn test_health_bars_for_wasps() {
        let (game, _, _) = started_game();
        let mut buffer = TriangleBuffer::new();
        game.render(&mut buffer);
        // Every asteroid and wasp has a two-line health bar; the ship has three skill bars
        let expected = 2 * (game.pools.asteroids.live_count() + game.pools.wasps.live_count()) + 3;
        assert_eq!(buffer.lines, expected);
        assert_eq!(buffer.rings, 0);
    }

    #[test]
    fn test_debug_draw_adds_rings() {
        let (mut game, _, _) = started_game();
        game.debug_draw = true;
        let mut buffer = TriangleBuffer::new();
        game.render(&mut buffer);
        let live: usize = EntityType::ALL.iter().map(|k| game.pools.pool(*k).live_count()).sum();
        assert_eq!(buffer.rings, live * 2);
    }

    #[test]
    fn test_life_icons() {
        let (game, _, _) = started_game();
        let mut buffer = TriangleBuffer::new();
        game.render_hud(&mut buffer);
        let per_icon = SHIP_TRIANGLES.len() / 3;
        assert_eq!(buffer.triangle_count(), SHIP_EXTRA_LIVES as usize * per_icon);
    }
}
