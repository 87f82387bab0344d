use std::collections::BTreeSet;
use anyhow::{Result, bail};
use crate::config::SlideConfig;
use crate::constants::*;
use crate::media::{MediaElement, MediaEvent};
use crate::progress::ProgressIndicator;
use crate::state::{CarouselState, ControlIcon, Transition};
use crate::ticker::Ticker;
use crate::track::{ScrollTrigger, TrackAnimation};

/// Remembers the last dependency values of a reaction; `changed` is true the
/// first time and whenever the values differ.
struct Deps<K> {
    last: Option<K>,
}

impl<K: PartialEq> Deps<K> {
    fn new() -> Self {
        Self { last: None }
    }

    fn changed(&mut self, current: K) -> bool {
        if self.last.as_ref() == Some(&current) {
            return false;
        }
        self.last = Some(current);
        true
    }

    /// Forget the last values so the reaction runs again.
    fn reset(&mut self) {
        self.last = None;
    }
}

/// The carousel controller.
///
/// Owns the carousel state and reacts to media events, control clicks and
/// track visibility. All of it happens in `update`, once per frame.
pub struct Carousel<M: MediaElement> {
    slides: Vec<SlideConfig>,
    media: Vec<M>,

    state: CarouselState,
    loaded: BTreeSet<usize>,

    indicators: Vec<ProgressIndicator>,
    ticker: Ticker,
    track: TrackAnimation,
    trigger: ScrollTrigger,

    track_deps: Deps<(bool, usize)>,
    playback_deps: Deps<(bool, usize, bool, usize)>,
    progress_deps: Deps<(usize, bool)>,

    viewport_width: f32,
}

impl<M: MediaElement> Carousel<M> {
    pub fn new(slides: Vec<SlideConfig>, open: impl FnMut(&SlideConfig) -> M) -> Result<Self> {
        if slides.is_empty() {
            bail!("A carousel needs at least one slide");
        }
        let media = slides.iter().map(open).collect();
        let indicators = slides.iter().map(|_| ProgressIndicator::new()).collect();

        let mut carousel = Self {
            slides,
            media,
            state: CarouselState::default(),
            loaded: BTreeSet::new(),
            indicators,
            ticker: Ticker::new(),
            track: TrackAnimation::new(),
            trigger: ScrollTrigger::new(),
            track_deps: Deps::new(),
            playback_deps: Deps::new(),
            progress_deps: Deps::new(),
            viewport_width: WINDOW_WIDTH as f32,
        };
        carousel.run_effects();
        Ok(carousel)
    }

    /// Advance one frame.
    ///
    /// `track_past_start` tells whether the track has scrolled into the
    /// viewport; `viewport_width` sizes the active progress marker.
    pub fn update(&mut self, dt: f32, track_past_start: bool, viewport_width: f32) {
        self.viewport_width = viewport_width;

        let mut events = Vec::new();
        for (index, media) in self.media.iter_mut().enumerate() {
            events.extend(media.tick(dt).into_iter().map(|event| (index, event)));
        }

        // Listeners see the final playback time before "ended" moves on
        self.run_listeners();

        for (index, event) in events {
            self.handle_media_event(index, event);
        }
        self.run_effects();

        if self.trigger.update(dt, track_past_start) {
            self.dispatch(Transition::StartPlayback);
            self.run_effects();
        }

        self.track.update(dt);
        for indicator in self.indicators.iter_mut() {
            indicator.update(dt);
        }
    }

    /// Click on the play/pause/replay button.
    pub fn click_control(&mut self) {
        let transition = self.state.control_transition();
        log::info!("control: {}", self.state.control_icon().label());
        if transition == Transition::VideoReset {
            // A one-slide carousel replays without any key changing
            self.playback_deps.reset();
            self.progress_deps.reset();
        }
        self.dispatch(transition);
        self.run_effects();
    }

    fn dispatch(&mut self, transition: Transition) {
        let before = self.state;
        self.state.apply(transition);
        if self.state != before {
            log::debug!("{:?}: {:?} -> {:?}", transition, before, self.state);
        }
    }

    fn handle_media_event(&mut self, index: usize, event: MediaEvent) {
        match event {
            MediaEvent::LoadedMetadata(duration) => {
                let configured = self.slides[index].video_duration;
                if (duration - configured).abs() > 0.5 {
                    log::warn!(
                        "Slide {} lasts {:.2}s but is configured for {:.2}s",
                        self.slides[index].id, duration, configured
                    );
                }
                self.loaded.insert(index);
            }
            MediaEvent::Play => self.dispatch(Transition::NativePlay),
            MediaEvent::Ended => {
                if index != self.state.current_index {
                    log::debug!("Ignoring end of inactive slide {}", index);
                    return;
                }
                self.dispatch(CarouselState::ended_transition(index, self.slides.len()));
            }
        }
    }

    /// Re-run every reaction whose dependencies changed.
    fn run_effects(&mut self) {
        let s = self.state;
        let active = s.current_index;

        if self.track_deps.changed((s.has_ended, active)) {
            self.track.slide_to(active);
            self.trigger.rearm();
        }

        let loaded = self.loaded.len();
        if self.playback_deps.changed((s.has_started, active, s.is_playing, loaded)) && self.is_ready() {
            let media = &mut self.media[active];
            if !s.is_playing {
                media.pause();
            } else if s.has_started {
                media.play();
            }
        }

        if self.progress_deps.changed((active, s.has_started)) {
            self.indicators[active].rebind();
        }

        self.sync_ticker();
    }

    /// Keep the ticker listening to the active slide only, and only while it
    /// plays through. Stale listeners are removed before a new one is added.
    fn sync_ticker(&mut self) {
        let active = self.state.current_index;
        for index in self.ticker.listeners().to_vec() {
            if index != active {
                self.ticker.detach(index);
            }
        }
        if self.state.is_playing && self.state.has_started && !self.state.last_reached {
            self.ticker.attach(active);
        } else {
            self.ticker.detach(active);
        }
    }

    fn run_listeners(&mut self) {
        for index in self.ticker.listeners().to_vec() {
            let fraction = self.media[index].current_time() / self.slides[index].video_duration;
            self.indicators[index].set_progress(fraction, self.state.is_playing, self.viewport_width);
        }
    }

    /// Media may be played once more than this many slides reported
    /// metadata. Short carousels need every slide.
    fn ready_threshold(&self) -> usize {
        READY_THRESHOLD.min(self.slides.len() - 1)
    }

    pub fn is_ready(&self) -> bool {
        self.loaded.len() > self.ready_threshold()
    }

    #[cfg(test)]
    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn control_icon(&self) -> ControlIcon {
        self.state.control_icon()
    }

    pub fn slides(&self) -> &[SlideConfig] {
        &self.slides
    }

    pub fn media_mut(&mut self) -> &mut [M] {
        &mut self.media
    }

    pub fn indicators(&self) -> &[ProgressIndicator] {
        &self.indicators
    }

    #[cfg(test)]
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Track offset in pixels for a given slide pitch.
    pub fn track_offset(&self, pitch: f32) -> f32 {
        self.track.offset(pitch)
    }
}
