use std::path::PathBuf;
use anyhow::{Result, anyhow};
use raylib::prelude::*;
use crate::carousel::Carousel;
use crate::config::IconConfig;
use crate::constants::*;
use crate::media::VideoSurface;
use crate::page::Page;
use crate::state::ControlIcon;

const PAGE_BACKGROUND: Color = Color::new(0, 0, 0, 255);
const SLIDE_BACKGROUND: Color = Color::new(16, 16, 16, 255);
const HERO_TEXT: Color = Color::new(134, 134, 139, 255);
const STRIP_BACKGROUND: Color = Color::new(66, 66, 69, 255);
const MARKER_BACKGROUND: Color = Color::new(229, 231, 235, 255);
const BUTTON_BACKGROUND: Color = Color::new(66, 66, 69, 255);
const ICON_COLOR: Color = Color::new(255, 255, 255, 255);
const ICON_SIZE: f32 = 22.0;

/// Play, pause and replay images. Missing images are drawn as glyphs.
pub struct ControlIcons {
    play: Option<Texture2D>,
    pause: Option<Texture2D>,
    replay: Option<Texture2D>,
}

impl ControlIcons {
    pub fn load(rl: &mut RaylibHandle, thread: &RaylibThread, config: &IconConfig) -> Self {
        Self {
            play: load_icon(rl, thread, &config.play, ControlIcon::Play),
            pause: load_icon(rl, thread, &config.pause, ControlIcon::Pause),
            replay: load_icon(rl, thread, &config.replay, ControlIcon::Replay),
        }
    }

    fn get(&self, icon: ControlIcon) -> Option<&Texture2D> {
        match icon {
            ControlIcon::Play => self.play.as_ref(),
            ControlIcon::Pause => self.pause.as_ref(),
            ControlIcon::Replay => self.replay.as_ref(),
        }
    }
}

fn load_icon(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    path: &Option<PathBuf>,
    icon: ControlIcon,
) -> Option<Texture2D> {
    let path = path.as_ref()?;
    match rl.load_texture(thread, &path.to_string_lossy()) {
        Ok(texture) => Some(texture),
        Err(e) => {
            log::warn!("Could not load {} icon {:?}: {}", icon.label(), path, e);
            None
        }
    }
}

/// One black texture per slide, refreshed from decoded frames.
pub fn slide_textures(rl: &mut RaylibHandle, thread: &RaylibThread, count: usize) -> Result<Vec<Texture2D>> {
    let image = Image::gen_image_color(SLIDE_WIDTH, SLIDE_HEIGHT, Color::BLACK);
    (0..count)
        .map(|_| {
            rl.load_texture_from_image(thread, &image)
                .map_err(|e| anyhow!("Failed to create slide texture: {}", e))
        })
        .collect()
}

pub fn upload_frames(carousel: &mut Carousel<VideoSurface>, textures: &mut [Texture2D]) {
    for (media, texture) in carousel.media_mut().iter_mut().zip(textures.iter_mut()) {
        if let Some(frame) = media.take_frame() {
            if let Err(e) = texture.update_texture(frame) {
                log::warn!("Dropped frame: {}", e);
            }
        }
    }
}

pub fn marker_widths(carousel: &Carousel<VideoSurface>) -> Vec<f32> {
    carousel.indicators().iter().map(|i| i.marker_width()).collect()
}

pub fn draw(
    d: &mut RaylibDrawHandle,
    page: &Page,
    carousel: &Carousel<VideoSurface>,
    textures: &[Texture2D],
    icons: &ControlIcons,
) {
    d.clear_background(PAGE_BACKGROUND);
    draw_hero(d, page);
    draw_track(d, page, carousel, textures);
    draw_strip(d, page, carousel, icons);
}

fn draw_hero(d: &mut RaylibDrawHandle, page: &Page) {
    let title = "Get the highlights.";
    let size = 56;
    let x = (page.viewport_width() - measure_text(title, size)) / 2;
    let y = (page.hero_height() as f32 * 0.5 - page.scroll()) as i32 - size / 2;
    d.draw_text(title, x, y, size, HERO_TEXT);
}

fn draw_track(d: &mut RaylibDrawHandle, page: &Page, carousel: &Carousel<VideoSurface>, textures: &[Texture2D]) {
    let offset = carousel.track_offset(page.slide_pitch());
    let screen_width = d.get_screen_width() as f32;
    let screen_height = d.get_screen_height() as f32;

    for (i, (slide, texture)) in carousel.slides().iter().zip(textures).enumerate() {
        let rect = page.slide_rect(i, offset);
        if rect.x + rect.width < 0.0 || rect.x > screen_width || rect.y + rect.height < 0.0 || rect.y > screen_height {
            continue;
        }

        d.draw_rectangle_rounded(rect, SLIDE_ROUNDNESS, 16, SLIDE_BACKGROUND);
        {
            let mut clip = d.begin_scissor_mode(rect.x as i32, rect.y as i32, rect.width as i32, rect.height as i32);
            let dest = Rectangle::new(rect.x + slide.video_offset * rect.width, rect.y, rect.width, rect.height);
            clip.draw_texture_pro(
                texture,
                Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32),
                dest,
                Vector2::new(0.0, 0.0),
                0.0,
                Color::WHITE,
            );
        }

        let x = (rect.x + rect.width * CAPTION_LEFT) as i32;
        let mut y = rect.y as i32 + CAPTION_TOP;
        for line in &slide.text_lists {
            d.draw_text(line, x, y, CAPTION_SIZE, Color::WHITE);
            y += CAPTION_LINE;
        }
    }
}

fn draw_strip(d: &mut RaylibDrawHandle, page: &Page, carousel: &Carousel<VideoSurface>, icons: &ControlIcons) {
    let layout = page.strip_layout(&marker_widths(carousel));

    d.draw_rectangle_rounded(layout.pill, 1.0, 16, STRIP_BACKGROUND);
    for (marker, indicator) in layout.markers.iter().zip(carousel.indicators()) {
        d.draw_rectangle_rounded(*marker, 1.0, 8, MARKER_BACKGROUND);
        let fill_width = marker.width * indicator.fill_fraction();
        if fill_width > 0.5 {
            let fill = Rectangle::new(marker.x, marker.y, fill_width, marker.height);
            d.draw_rectangle_rounded(fill, 1.0, 8, indicator.fill_color());
        }
    }

    let button = layout.button;
    let cx = button.x + button.width * 0.5;
    let cy = button.y + button.height * 0.5;
    d.draw_circle(cx as i32, cy as i32, button.width * 0.5, BUTTON_BACKGROUND);

    let icon = carousel.control_icon();
    match icons.get(icon) {
        Some(texture) => {
            let scale = ICON_SIZE / texture.width().max(texture.height()) as f32;
            let w = texture.width() as f32 * scale;
            let h = texture.height() as f32 * scale;
            d.draw_texture_pro(
                texture,
                Rectangle::new(0.0, 0.0, texture.width() as f32, texture.height() as f32),
                Rectangle::new(cx - w * 0.5, cy - h * 0.5, w, h),
                Vector2::new(0.0, 0.0),
                0.0,
                Color::WHITE,
            );
        }
        None => draw_glyph(d, icon, cx, cy),
    }
}

fn draw_glyph(d: &mut RaylibDrawHandle, icon: ControlIcon, cx: f32, cy: f32) {
    let half = ICON_SIZE * 0.5;
    match icon {
        ControlIcon::Play => {
            // Vertices in counter-clockwise order
            d.draw_triangle(
                Vector2::new(cx - half * 0.6, cy - half),
                Vector2::new(cx - half * 0.6, cy + half),
                Vector2::new(cx + half, cy),
                ICON_COLOR,
            );
        }
        ControlIcon::Pause => {
            let bar = ICON_SIZE * 0.28;
            d.draw_rectangle_rec(Rectangle::new(cx - half * 0.8, cy - half, bar, ICON_SIZE), ICON_COLOR);
            d.draw_rectangle_rec(Rectangle::new(cx + half * 0.8 - bar, cy - half, bar, ICON_SIZE), ICON_COLOR);
        }
        ControlIcon::Replay => {
            d.draw_circle_lines(cx as i32, cy as i32, half, ICON_COLOR);
            d.draw_circle_lines(cx as i32, cy as i32, half - 1.0, ICON_COLOR);
            d.draw_triangle(
                Vector2::new(cx + half * 0.3, cy - half - 5.0),
                Vector2::new(cx + half * 0.3, cy - half + 5.0),
                Vector2::new(cx + half * 0.3 + 7.0, cy - half),
                ICON_COLOR,
            );
        }
    }
}
