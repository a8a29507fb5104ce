//! Starswarm headless driver
//!
//! Runs a scripted session against the headless audio and renderer
//! backends and logs what happened. Usage:
//!
//! ```text
//! starswarm [settings.json] [seed]
//! ```

#[cfg(not(target_arch = "wasm32"))]
use std::process::ExitCode;

#[cfg(not(target_arch = "wasm32"))]
use starswarm::{
    Settings,
    audio::{RecordingAudio, SoundEffect},
    platform::{InputSnapshot, Key, SeededRng},
    renderer::TriangleBuffer,
    sim::{Game, Phase, Services},
};

#[cfg(not(target_arch = "wasm32"))]
const FRAME_SECONDS: f32 = 1.0 / 60.0;
#[cfg(not(target_arch = "wasm32"))]
const SCRIPT_FRAMES: u32 = 60 * 120;

#[cfg(not(target_arch = "wasm32"))]
fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starswarm (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };
    let seed = args.next().and_then(|s| s.parse().ok()).unwrap_or(0x5eed);

    let mut rng = SeededRng::new(seed);
    let mut audio = RecordingAudio::new();
    let mut game = match Game::new(settings, &mut rng) {
        Ok(game) => game,
        Err(e) => {
            log::error!("Invalid settings: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut buffer = TriangleBuffer::new();
    let mut peak_triangles = 0;
    for frame in 0..SCRIPT_FRAMES {
        let input = scripted_input(frame);
        let mut services = Services {
            audio: &mut audio,
            input: &input,
            rng: &mut rng,
        };
        game.frame(FRAME_SECONDS, &mut services);

        buffer.clear();
        game.render(&mut buffer);
        game.render_hud(&mut buffer);
        peak_triangles = peak_triangles.max(buffer.triangle_count());

        if frame > 0 && game.state.phase() == Phase::Attract {
            log::info!("Session ended after {} frames", frame);
            break;
        }
    }

    log::info!(
        "Reached wave {} ({:?}); {} shots, {} kills, {} cues, peak {} triangles/frame",
        game.state.wave.saturating_sub(1),
        game.state.phase(),
        audio.count(SoundEffect::Shoot),
        audio.count(SoundEffect::EnemyDie),
        audio.total_played(),
        peak_triangles
    );
    ExitCode::SUCCESS
}

/// Start, then circle and fire, with a special attack every two seconds
#[cfg(not(target_arch = "wasm32"))]
fn scripted_input(frame: u32) -> InputSnapshot {
    if frame == 0 {
        return InputSnapshot::new().press(Key::N);
    }
    let mut input = InputSnapshot::new().hold(Key::J).hold(Key::S);
    if frame % 120 == 0 {
        input = input.press(Key::L);
    } else if frame % 120 == 60 {
        input = input.press(Key::K);
    }
    if frame % 240 < 40 {
        input = input.hold(Key::E);
    }
    // Respawn as soon as possible
    if frame % 30 == 0 {
        input = input.press(Key::N);
    }
    input
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The web host drives `Game::frame` directly
}
