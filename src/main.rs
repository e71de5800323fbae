//! Starship headless runner
//!
//! Drives the session with a scripted pilot for a fixed number of frames and
//! renders every frame into the recording backend. Useful for soak testing
//! the simulation and for eyeballing logs (`RUST_LOG=debug`).

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::Parser;

use starship::Settings;
use starship::platform::{EventBus, InputSource, InputState, Key, QUIT_TOPIC};
use starship::renderer::{RecordingRenderer, render_game};
use starship::sim::{GameMode, GameState, tick};

#[derive(Parser, Debug)]
#[command(name = "starship")]
#[command(about = "Run the Starship simulation headless with a scripted pilot")]
struct Cli {
    /// Frames to simulate
    #[arg(long, default_value_t = 3_600)]
    frames: u32,
    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    /// RNG seed (overrides the settings file)
    #[arg(long)]
    seed: Option<u64>,
    /// Settings JSON; defaults are used when missing
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write the effective settings as JSON and exit
    #[arg(long)]
    write_config: Option<PathBuf>,
    /// Fire every this many frames
    #[arg(long, default_value_t = 12)]
    fire_interval: u32,
}

/// Keyboard script: leave attract, then circle and fire. Respawns whenever
/// the ship is down.
fn script_frame(frame: u32, state: &GameState, input: &mut InputState, fire_interval: u32) {
    if state.mode == GameMode::Attract {
        input.press(Key::Space);
        return;
    }

    input.press(Key::A);
    if frame % 90 < 30 {
        input.press(Key::W);
    } else {
        input.release(Key::W);
    }

    if fire_interval > 0 && frame % fire_interval == 0 {
        input.press(Key::Space);
    } else {
        input.release(Key::Space);
    }

    if state.player.is_dead() && !input.is_key_pressed(Key::N) {
        input.press(Key::N);
    } else {
        input.release(Key::N);
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    if cli.seed.is_some() {
        settings.seed = cli.seed;
    }

    if let Some(path) = &cli.write_config {
        settings
            .save(path)
            .with_context(|| format!("writing settings to {}", path.display()))?;
        log::info!("Settings written to {}", path.display());
        return Ok(());
    }

    log::info!("Starship (headless) starting, {} frames", cli.frames);

    let quit = Rc::new(Cell::new(false));
    let mut bus = EventBus::new();
    {
        let quit = quit.clone();
        bus.subscribe(QUIT_TOPIC, move |_| {
            quit.set(true);
            true
        });
    }

    let mut state = GameState::with_settings(settings);
    let mut input = InputState::new();
    let mut renderer = RecordingRenderer::new();
    let mut peak_entities = 0;
    let mut peak_vertices = 0;

    for frame in 0..cli.frames {
        script_frame(frame, &state, &mut input, cli.fire_interval);
        tick(&mut state, &mut input, &mut bus, cli.dt);
        for topic in bus.take_published() {
            log::debug!("Frame {}: {}", frame, topic);
        }

        renderer.reset();
        render_game(&state, input.gamepad(0), &mut renderer);
        peak_entities = peak_entities.max(state.entity_count());
        peak_vertices = peak_vertices.max(renderer.vertex_count());

        input.end_frame();

        if quit.get() {
            log::info!("Quit requested at frame {}", frame);
            break;
        }
        if state.restart_requested {
            state.restart();
        }
    }

    state.shutdown();
    log::info!(
        "Done: {:.1}s simulated, wave {}, life {}/{}, peak {} entities, peak {} vertices",
        state.game_time,
        state.wave_index,
        state.current_life,
        starship::consts::MAX_NUMBER_OF_LIVES,
        peak_entities,
        peak_vertices
    );
    Ok(())
}
