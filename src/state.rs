#[derive(Debug, Default, PartialEq, Clone, Copy)]
pub struct CarouselState {
    pub current_index: usize,   // Active slide
    pub has_ended: bool,        // Some slide finished and the carousel advanced
    pub has_started: bool,      // The entrance animation completed at least once
    pub last_reached: bool,     // The last slide finished, control shows replay
    pub is_playing: bool,       // Playback is wanted for the active slide
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Transition {
    VideoEnd(usize),  // Slide `i` ended and is not the last one
    VideoLast,        // The last slide ended
    VideoReset,       // Replay from the first slide
    Play,             // Control clicked while paused
    Pause,            // Control clicked while playing
    NativePlay,       // The active element reported it started playing
    StartPlayback,    // The entrance animation completed
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum ControlIcon {
    Play,
    Pause,
    Replay,
}

impl ControlIcon {
    pub fn label(self) -> &'static str {
        match self {
            ControlIcon::Play => "play",
            ControlIcon::Pause => "pause",
            ControlIcon::Replay => "replay",
        }
    }
}

impl CarouselState {
    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::VideoEnd(i) => {
                self.has_ended = true;
                self.current_index = i + 1;
            }
            Transition::VideoLast => self.last_reached = true,
            Transition::VideoReset => {
                self.last_reached = false;
                self.current_index = 0;
            }
            Transition::Play | Transition::Pause => self.is_playing = !self.is_playing,
            Transition::NativePlay => self.is_playing = true,
            Transition::StartPlayback => {
                self.has_started = true;
                self.is_playing = true;
            }
        }
    }

    /// Transition fired by a click on the control button.
    pub fn control_transition(&self) -> Transition {
        if self.last_reached {
            Transition::VideoReset
        } else if !self.is_playing {
            Transition::Play
        } else {
            Transition::Pause
        }
    }

    /// Transition fired when slide `index` of `slide_count` reports "ended".
    pub fn ended_transition(index: usize, slide_count: usize) -> Transition {
        if index + 1 < slide_count {
            Transition::VideoEnd(index)
        } else {
            Transition::VideoLast
        }
    }

    pub fn control_icon(&self) -> ControlIcon {
        match self.control_transition() {
            Transition::VideoReset => ControlIcon::Replay,
            Transition::Play => ControlIcon::Play,
            _ => ControlIcon::Pause,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state_is_first_slide_with_all_flags_cleared() {
        let state = CarouselState::default();
        assert_eq!(state.current_index, 0);
        assert!(!state.has_ended);
        assert!(!state.has_started);
        assert!(!state.last_reached);
        assert!(!state.is_playing);
    }

    #[test]
    fn ended_on_non_last_slide_advances() {
        for i in 0..3 {
            let mut state = CarouselState { current_index: i, ..Default::default() };
            state.apply(CarouselState::ended_transition(i, 4));
            assert_eq!(state.current_index, i + 1);
            assert!(state.has_ended);
            assert!(!state.last_reached);
        }
    }

    #[test]
    fn ended_on_last_slide_only_marks_last_reached() {
        let mut state = CarouselState { current_index: 3, ..Default::default() };
        state.apply(CarouselState::ended_transition(3, 4));
        assert_eq!(state.current_index, 3);
        assert!(state.last_reached);
    }

    #[test]
    fn control_resets_when_last_reached_regardless_of_playing() {
        for playing in [false, true] {
            let mut state = CarouselState {
                current_index: 3,
                last_reached: true,
                is_playing: playing,
                ..Default::default()
            };
            state.apply(state.control_transition());
            assert_eq!(state.current_index, 0);
            assert!(!state.last_reached);
            assert_eq!(state.is_playing, playing);
        }
    }

    #[test]
    fn control_toggles_playing_once_per_click() {
        let mut state = CarouselState::default();
        assert_eq!(state.control_transition(), Transition::Play);
        state.apply(state.control_transition());
        assert!(state.is_playing);
        assert_eq!(state.control_transition(), Transition::Pause);
        state.apply(state.control_transition());
        assert!(!state.is_playing);
    }

    #[test]
    fn native_play_and_start_playback_force_playing() {
        let mut state = CarouselState::default();
        state.apply(Transition::NativePlay);
        assert!(state.is_playing);
        assert!(!state.has_started);

        let mut state = CarouselState::default();
        state.apply(Transition::StartPlayback);
        assert!(state.is_playing && state.has_started);
    }

    #[test]
    fn icon_follows_state() {
        let mut state = CarouselState::default();
        assert_eq!(state.control_icon(), ControlIcon::Play);
        state.is_playing = true;
        assert_eq!(state.control_icon(), ControlIcon::Pause);
        state.last_reached = true;
        assert_eq!(state.control_icon(), ControlIcon::Replay);
        assert_eq!(state.control_icon().label(), "replay");
    }
}
