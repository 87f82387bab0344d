use std::path::PathBuf;
use std::process;
use anyhow::Result;
use clap::Parser;
use raylib::prelude::*;

mod carousel;
mod config;
mod constants;
mod ffmpeg;
mod media;
mod page;
mod progress;
mod render;
mod state;
mod ticker;
mod track;
mod tween;

use crate::carousel::Carousel;
use crate::constants::*;
use crate::media::VideoSurface;
use crate::page::{Page, contains};
use crate::render::ControlIcons;

/// Auto-advancing video carousel.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Slide configuration (TOML)
    config: PathBuf,

    /// Window width
    #[arg(long, default_value_t = WINDOW_WIDTH)]
    width: i32,

    /// Window height
    #[arg(long, default_value_t = WINDOW_HEIGHT)]
    height: i32,

    /// Target frames per second
    #[arg(long, default_value_t = FPS)]
    fps: u32,

    /// Height of the band above the carousel, scroll past it to start playback
    #[arg(long, default_value_t = HERO_HEIGHT)]
    hero_height: i32,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run(Args::parse()) {
        log::error!("{:#}", e);
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let config = config::load_from_path(&args.config)?;
    log::info!("Loaded {} slides from {:?}", config.slides.len(), args.config);

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("Highlights")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(args.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let icons = ControlIcons::load(&mut rl, &thread, &config.icons);
    let mut textures = render::slide_textures(&mut rl, &thread, config.slides.len())?;
    let mut carousel = Carousel::new(config.slides, |slide| {
        VideoSurface::open(&slide.video, SLIDE_WIDTH, SLIDE_HEIGHT)
    })?;
    let mut page = Page::new(args.hero_height, args.width, args.height);

    // --- Main Loop ---
    while !rl.window_should_close() {
        // Long stalls (window drag, resize) should not skip through videos
        let dt = rl.get_frame_time().min(0.1);

        page.set_viewport(rl.get_screen_width(), rl.get_screen_height());
        let mut scroll = -rl.get_mouse_wheel_move() * SCROLL_STEP;
        if rl.is_key_pressed(KeyboardKey::KEY_DOWN) {
            scroll += SCROLL_STEP;
        }
        if rl.is_key_pressed(KeyboardKey::KEY_UP) {
            scroll -= SCROLL_STEP;
        }
        if rl.is_key_pressed(KeyboardKey::KEY_PAGE_DOWN) {
            scroll += rl.get_screen_height() as f32 * 0.9;
        }
        if rl.is_key_pressed(KeyboardKey::KEY_PAGE_UP) {
            scroll -= rl.get_screen_height() as f32 * 0.9;
        }
        page.scroll_by(scroll);

        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            let mouse = rl.get_mouse_position();
            let layout = page.strip_layout(&render::marker_widths(&carousel));
            if contains(&layout.button, mouse.x, mouse.y) {
                carousel.click_control();
            }
        }

        carousel.update(dt, page.track_past_start(), page.viewport_width() as f32);
        render::upload_frames(&mut carousel, &mut textures);

        let mut d = rl.begin_drawing(&thread);
        render::draw(&mut d, &page, &carousel, &textures, &icons);
    }

    Ok(())
}
