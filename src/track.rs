use raylib::prelude::*;
use crate::constants::*;
use crate::tween::Tweened;

/// Horizontal position of the slide track, in slides.
///
/// The resting offset for index `i` is `-i` slide pitches.
pub struct TrackAnimation {
    position: Tweened,
}

impl TrackAnimation {
    pub fn new() -> Self {
        Self { position: Tweened::new(0.0) }
    }

    pub fn slide_to(&mut self, index: usize) {
        self.position.to(index as f32, TRACK_DURATION, ease::quad_in_out);
    }

    pub fn update(&mut self, dt: f32) {
        self.position.update(dt);
    }

    /// Current position in slides (fractional while animating).
    #[cfg(test)]
    pub fn position(&self) -> f32 {
        self.position.value()
    }

    /// Current offset in pixels for a given slide pitch.
    pub fn offset(&self, pitch: f32) -> f32 {
        -self.position.value() * pitch
    }

    #[cfg(test)]
    pub fn is_animating(&self) -> bool {
        self.position.is_animating()
    }
}

/// Fires once after the track enters the viewport and a short entrance
/// animation has completed.
///
/// Only entering from above (the track top crossing the viewport bottom)
/// counts. Each entry restarts the one entrance animation.
pub struct ScrollTrigger {
    past_start: bool,
    entrance: Option<f32>,
}

impl ScrollTrigger {
    pub fn new() -> Self {
        Self { past_start: false, entrance: None }
    }

    /// Recreate the trigger. If the track is already past its start it will
    /// enter again on the next update.
    pub fn rearm(&mut self) {
        self.past_start = false;
        self.entrance = None;
    }

    /// Returns true on the frame the entrance animation completes.
    pub fn update(&mut self, dt: f32, past_start: bool) -> bool {
        if past_start && !self.past_start {
            log::debug!("scroll trigger: enter, restarting entrance");
            self.entrance = Some(0.0);
        }
        self.past_start = past_start;

        let Some(elapsed) = self.entrance.as_mut() else {
            return false;
        };
        *elapsed += dt;
        if *elapsed >= ENTRANCE_DURATION {
            self.entrance = None;
            return true;
        }
        false
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.entrance.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn track_offset_is_minus_index_pitches() {
        let mut track = TrackAnimation::new();
        track.slide_to(2);
        assert!(track.is_animating());
        track.update(1.0);
        assert!((track.position() - 1.0).abs() < 1e-3);
        track.update(1.0);
        assert_eq!(track.offset(100.0), -200.0);
        assert!(!track.is_animating());
    }

    #[test]
    fn trigger_fires_after_entrance() {
        let mut trigger = ScrollTrigger::new();
        assert!(!trigger.update(0.1, false));
        assert!(!trigger.update(0.25, true));
        assert!(trigger.is_running());
        assert!(trigger.update(0.25, true));
        assert!(!trigger.is_running());
        assert!(!trigger.update(1.0, true));
    }

    #[test]
    fn reentry_restarts_instead_of_stacking() {
        let mut trigger = ScrollTrigger::new();
        let mut fired = 0;
        let frames = [true, false, true, false, true];
        for visible in frames {
            if trigger.update(0.2, visible) {
                fired += 1;
            }
        }
        assert_eq!(fired, 0);
        for _ in 0..10 {
            if trigger.update(0.1, true) {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn rearm_reenters_when_already_visible() {
        let mut trigger = ScrollTrigger::new();
        assert!(!trigger.update(0.0, true));
        assert!(trigger.update(0.5, true));
        trigger.rearm();
        assert!(!trigger.update(0.3, true));
        assert!(trigger.update(0.3, true));
    }
}
