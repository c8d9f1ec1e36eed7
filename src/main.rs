//! Interactive first-person view over a grid map.
//!
//! ```bash
//! cargo run --release -- --map maps/demo.map
//! ```
//!
//! Controls  W/↑ = forward  S/↓ = back  A/← = turn left  D/→ = turn right
//! Esc = quit

use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use minifb::{Key, Window, WindowOptions};

use yaray_rs::engine::{Engine, Screen, Tuning};
use yaray_rs::renderer::{Software, minimap};
use yaray_rs::world::{Buttons, GridMap, MoveTuning, Player};

/// CLI options handled via `clap` derive.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Opts {
    /// Map file (`WxH` header + tile rows); embedded demo map when omitted
    #[arg(long, value_name = "FILE")]
    map: Option<PathBuf>,

    /// Projection width in pixels (one ray per column)
    #[arg(long, default_value_t = 640)]
    width: usize,

    /// Projection height in pixels
    #[arg(long, default_value_t = 400)]
    height: usize,

    /// Horizontal field of view, degrees
    #[arg(long, default_value_t = 60.0)]
    fov: f32,

    /// Size of one map tile in grid units
    #[arg(long, default_value_t = 64.0)]
    tile: f32,

    /// Movement speed, grid units per frame
    #[arg(long, default_value_t = 2.0)]
    move_speed: f32,

    /// Rotation speed, degrees per frame
    #[arg(long, default_value_t = 2.0)]
    turn_speed: f32,

    /// Eye height above the floor, grid units
    #[arg(long, default_value_t = 32.0)]
    eye_height: f32,

    /// Spawn heading, degrees
    #[arg(long, default_value_t = 0.0)]
    heading: f32,

    /// Minimap scale in pixels per tile; 0 hides the overlay
    #[arg(long, default_value_t = 8.0)]
    minimap_scale: f32,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    let grid = match &opts.map {
        Some(path) => GridMap::from_file(path)
            .with_context(|| format!("loading map {}", path.display()))?,
        None => GridMap::demo(),
    };

    let spawn = grid
        .spawn_point(opts.tile)
        .context("map has no walkable cell to spawn on")?;
    let player = Player::new(spawn, opts.heading);

    let tuning = Tuning {
        fov_deg: opts.fov,
        tile_size: opts.tile,
        eye_height: opts.eye_height,
        movement: MoveTuning {
            move_speed: opts.move_speed,
            turn_speed: opts.turn_speed,
        },
        ..Tuning::default()
    };

    let mut engine = Engine::new(
        Software::default(),
        grid,
        player,
        Screen::new(opts.width, opts.height),
        tuning,
    );
    if opts.minimap_scale > 0.0 {
        engine = engine.with_minimap(minimap::Style {
            scale: opts.minimap_scale,
            ..minimap::Style::default()
        });
    }

    let mut win = Window::new(
        "Raycast Test",
        opts.width,
        opts.height,
        WindowOptions::default(),
    )?;
    win.set_target_fps(60);

    // ────────────────── benchmarking state ──────────────────────────────
    let mut acc_time = Duration::ZERO; // cumulated render time
    let mut acc_frames = 0usize; // frames in the current window
    let mut last_print = Instant::now(); // when we printed last

    while win.is_open() && !win.is_key_down(Key::Escape) {
        let t0 = Instant::now();

        /* --------------- sample one Buttons set per frame ---------------- */
        let mut buttons = Buttons::empty();
        if win.is_key_down(Key::W) || win.is_key_down(Key::Up) {
            buttons |= Buttons::FORWARD;
        }
        if win.is_key_down(Key::S) || win.is_key_down(Key::Down) {
            buttons |= Buttons::BACK;
        }
        if win.is_key_down(Key::A) || win.is_key_down(Key::Left) {
            buttons |= Buttons::TURN_LEFT;
        }
        if win.is_key_down(Key::D) || win.is_key_down(Key::Right) {
            buttons |= Buttons::TURN_RIGHT;
        }

        engine.update(buttons);

        engine.render_frame(|fb, w, h| {
            acc_time += t0.elapsed();
            acc_frames += 1;
            win.update_with_buffer(fb, w, h).unwrap()
        });

        // ─────────── report average render time every ~3 s ──────────────
        if last_print.elapsed() >= Duration::from_secs(3) {
            let avg_ms = acc_time.as_secs_f64() * 1000.0 / acc_frames.max(1) as f64;
            println!("avg render: {:.2} ms  ({:.1} FPS)", avg_ms, 1000.0 / avg_ms);
            acc_time = Duration::ZERO;
            acc_frames = 0;
            last_print = Instant::now();
        }
    }
    Ok(())
}
