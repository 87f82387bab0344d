use raylib::prelude::*;
use crate::constants::*;
use crate::tween::Tweened;

pub const FILL_ACTIVE: Color = Color::new(255, 255, 255, 255);
pub const FILL_DONE: Color = Color::new(0xaf, 0xaf, 0xaf, 255);

/// Width of the marker of the slide being played.
pub fn expanded_marker_width(viewport_width: f32) -> f32 {
    if viewport_width < MARKER_BREAKPOINT {
        viewport_width * MARKER_NARROW_RATIO
    } else {
        viewport_width * MARKER_WIDE_RATIO
    }
}

fn lerp_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let mix = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b), mix(a.a, b.a))
}

/// Marker and fill of one slide in the control strip.
pub struct ProgressIndicator {
    progress: f32,
    percent: u32,
    completed: bool,

    marker_width: Tweened,
    fill_percent: Tweened,

    fill_from: Color,
    fill_to: Color,
    fill_mix: Tweened,
}

impl ProgressIndicator {
    pub fn new() -> Self {
        Self {
            progress: 0.0,
            percent: 0,
            completed: false,
            marker_width: Tweened::new(MARKER_SIZE),
            fill_percent: Tweened::new(0.0),
            fill_from: Color::BLANK,
            fill_to: Color::BLANK,
            fill_mix: Tweened::new(1.0),
        }
    }

    /// Start a fresh progress run. Visuals are kept until the next update.
    pub fn rebind(&mut self) {
        self.progress = 0.0;
        self.percent = 0;
        self.completed = false;
    }

    /// Drive the indicator to `fraction` of the slide's duration.
    pub fn set_progress(&mut self, fraction: f32, playing: bool, viewport_width: f32) {
        let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
        self.progress = fraction;

        let percent = (fraction * 100.0).ceil() as u32;
        if percent != self.percent {
            self.percent = percent;
            self.marker_width.to(expanded_marker_width(viewport_width), INDICATOR_DURATION, ease::quad_out);
            self.fill_percent.to(percent as f32, INDICATOR_DURATION, ease::quad_out);
            self.fill_color_to(FILL_ACTIVE);
        }

        if fraction >= 1.0 {
            if !self.completed {
                self.completed = true;
                if playing {
                    self.marker_width.to(MARKER_SIZE, INDICATOR_DURATION, ease::quad_out);
                    self.fill_color_to(FILL_DONE);
                }
            }
        } else {
            self.completed = false;
        }
    }

    fn fill_color_to(&mut self, color: Color) {
        if self.fill_to == color {
            return;
        }
        self.fill_from = self.fill_color();
        self.fill_to = color;
        self.fill_mix.set(0.0);
        self.fill_mix.to(1.0, INDICATOR_DURATION, ease::quad_out);
    }

    pub fn update(&mut self, dt: f32) {
        self.marker_width.update(dt);
        self.fill_percent.update(dt);
        self.fill_mix.update(dt);
    }

    #[cfg(test)]
    pub fn progress(&self) -> f32 {
        self.progress
    }

    #[cfg(test)]
    pub fn percent(&self) -> u32 {
        self.percent
    }

    pub fn marker_width(&self) -> f32 {
        self.marker_width.value()
    }

    #[cfg(test)]
    pub fn marker_target(&self) -> f32 {
        self.marker_width.target()
    }

    pub fn fill_fraction(&self) -> f32 {
        self.fill_percent.value() / 100.0
    }

    pub fn fill_color(&self) -> Color {
        lerp_color(self.fill_from, self.fill_to, self.fill_mix.value())
    }

    #[cfg(test)]
    pub fn fill_target_color(&self) -> Color {
        self.fill_to
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settle(indicator: &mut ProgressIndicator) {
        for _ in 0..10 {
            indicator.update(0.1);
        }
    }

    #[test]
    fn responsive_marker_width() {
        assert_eq!(expanded_marker_width(800.0), 80.0);
        assert_eq!(expanded_marker_width(1000.0), 100.0);
        assert_eq!(expanded_marker_width(1500.0), 60.0);
    }

    #[test]
    fn fill_tracks_fraction_and_expands_marker() {
        let mut p = ProgressIndicator::new();
        p.set_progress(0.42, true, 1500.0);
        assert_eq!(p.percent(), 42);
        settle(&mut p);
        assert!((p.fill_fraction() - 0.42).abs() < 1e-4);
        assert_eq!(p.marker_width(), 60.0);
        assert_eq!(p.fill_color(), FILL_ACTIVE);
    }

    #[test]
    fn percent_rounds_up() {
        let mut p = ProgressIndicator::new();
        p.set_progress(0.001, true, 1500.0);
        assert_eq!(p.percent(), 1);
    }

    #[test]
    fn completion_while_playing_collapses_marker() {
        let mut p = ProgressIndicator::new();
        p.set_progress(0.5, true, 1500.0);
        p.set_progress(1.0, true, 1500.0);
        settle(&mut p);
        assert_eq!(p.percent(), 100);
        assert_eq!(p.marker_width(), MARKER_SIZE);
        assert_eq!(p.fill_color(), FILL_DONE);
        assert!((p.fill_fraction() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn completion_while_paused_keeps_marker_open() {
        let mut p = ProgressIndicator::new();
        p.set_progress(1.0, false, 1500.0);
        settle(&mut p);
        assert_eq!(p.marker_width(), 60.0);
        assert_eq!(p.fill_target_color(), FILL_ACTIVE);
    }

    #[test]
    fn overshoot_is_clamped() {
        let mut p = ProgressIndicator::new();
        p.set_progress(1.3, true, 1500.0);
        assert_eq!(p.progress(), 1.0);
        p.set_progress(f32::NAN, true, 1500.0);
        assert_eq!(p.progress(), 0.0);
    }

    #[test]
    fn rebind_starts_a_fresh_run() {
        let mut p = ProgressIndicator::new();
        p.set_progress(1.0, true, 1500.0);
        p.rebind();
        assert_eq!(p.progress(), 0.0);
        assert_eq!(p.percent(), 0);
        p.set_progress(0.05, true, 1500.0);
        settle(&mut p);
        assert_eq!(p.fill_color(), FILL_ACTIVE);
        assert_eq!(p.marker_width(), 60.0);
    }
}
