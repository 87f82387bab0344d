use std::mem;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, TryRecvError};
use anyhow::Result;
use crate::constants::*;
use crate::ffmpeg::{self, Decoder};

/// Lifecycle events reported by a media element.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum MediaEvent {
    LoadedMetadata(f32), // Duration is known (seconds)
    Play,                // Playback started
    Ended,               // Playback reached the end
}

/// A playable video as seen by the carousel.
pub trait MediaElement {
    fn play(&mut self);
    fn pause(&mut self);
    fn current_time(&self) -> f32;
    /// Advance the element by `dt` seconds and collect its events.
    fn tick(&mut self, dt: f32) -> Vec<MediaEvent>;
}

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum SurfaceState {
    Idle,
    Playing,
    Paused,
    Ended,
}

/// Muted inline video backed by an ffmpeg decoder.
///
/// Opening a surface preloads it: the duration is probed in the background
/// and the first frame is shown as a poster.
pub struct VideoSurface {
    path: PathBuf,
    width: i32,
    height: i32,

    probe: Option<Receiver<Result<f32>>>,
    duration: Option<f32>,
    decoder: Option<Decoder>,

    state: SurfaceState,
    current_time: f32,
    frames_shown: u64,

    frame: Option<Vec<u8>>,
    frame_dirty: bool,
    events: Vec<MediaEvent>,
}

impl VideoSurface {
    pub fn open(path: &Path, width: i32, height: i32) -> Self {
        let probe = ffmpeg::probe_duration_async(path);
        let decoder = spawn_decoder(path, width, height);
        Self::with_sources(path, width, height, probe, decoder)
    }

    fn with_sources(
        path: &Path,
        width: i32,
        height: i32,
        probe: Receiver<Result<f32>>,
        decoder: Option<Decoder>,
    ) -> Self {
        Self {
            path: path.to_path_buf(),
            width,
            height,
            probe: Some(probe),
            duration: None,
            decoder,
            state: SurfaceState::Idle,
            current_time: 0.0,
            frames_shown: 0,
            frame: None,
            frame_dirty: false,
            events: Vec::new(),
        }
    }

    #[cfg(test)]
    pub fn state(&self) -> SurfaceState {
        self.state
    }

    #[cfg(test)]
    pub fn duration(&self) -> Option<f32> {
        self.duration
    }

    /// The latest decoded frame, if it changed since the last call.
    pub fn take_frame(&mut self) -> Option<&[u8]> {
        if !self.frame_dirty {
            return None;
        }
        self.frame_dirty = false;
        self.frame.as_deref()
    }

    fn poll_probe(&mut self) {
        let Some(probe) = self.probe.as_ref() else {
            return;
        };
        match probe.try_recv() {
            Ok(Ok(duration)) => {
                log::debug!("{:?}: duration {:.2}s", self.path.file_name().unwrap_or_default(), duration);
                self.duration = Some(duration);
                self.events.push(MediaEvent::LoadedMetadata(duration));
                self.probe = None;
            }
            Ok(Err(e)) => {
                log::warn!("No metadata for {:?}: {:#}", self.path, e);
                self.probe = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => self.probe = None,
        }
    }

    /// Pull every frame due at the current time. Returns false once the
    /// decoder has no more frames.
    fn pump_frames(&mut self, due: u64) -> bool {
        let Some(decoder) = self.decoder.as_ref() else {
            return true;
        };
        while self.frames_shown < due {
            match decoder.frames().try_recv() {
                Ok(frame) => {
                    self.frame = Some(frame);
                    self.frame_dirty = true;
                    self.frames_shown += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => return false,
            }
        }
        true
    }
}

fn spawn_decoder(path: &Path, width: i32, height: i32) -> Option<Decoder> {
    match Decoder::spawn(path, width, height) {
        Ok(decoder) => Some(decoder),
        Err(e) => {
            log::error!("{:#}", e);
            None
        }
    }
}

impl MediaElement for VideoSurface {
    fn play(&mut self) {
        if self.state == SurfaceState::Ended {
            // Playing an ended video starts it over
            self.decoder = spawn_decoder(&self.path, self.width, self.height);
            self.current_time = 0.0;
            self.frames_shown = 0;
        }
        if self.state != SurfaceState::Playing {
            self.state = SurfaceState::Playing;
            self.events.push(MediaEvent::Play);
        }
    }

    fn pause(&mut self) {
        if self.state == SurfaceState::Playing {
            self.state = SurfaceState::Paused;
        }
    }

    fn current_time(&self) -> f32 {
        self.current_time
    }

    fn tick(&mut self, dt: f32) -> Vec<MediaEvent> {
        self.poll_probe();

        if self.frames_shown == 0 {
            // Poster frame
            self.pump_frames(1);
        }

        if self.state == SurfaceState::Playing {
            self.current_time += dt;
            let due = (self.current_time * VIDEO_FPS as f32) as u64 + 1;
            if self.pump_frames(due) {
                // Never run ahead of the decoded position
                let decoded = self.frames_shown as f32 / VIDEO_FPS as f32;
                self.current_time = self.current_time.min(decoded);
            } else {
                self.state = SurfaceState::Ended;
                self.current_time = self.duration.unwrap_or(self.current_time);
                self.events.push(MediaEvent::Ended);
            }
        }

        mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn surface(frames: usize) -> (VideoSurface, mpsc::Sender<Result<f32>>) {
        let (probe_tx, probe_rx) = mpsc::channel();
        let (frame_tx, frame_rx) = mpsc::sync_channel(frames.max(1));
        for i in 0..frames {
            frame_tx.send(vec![i as u8; 4]).unwrap();
        }
        drop(frame_tx);
        let decoder = Decoder::from_frames(frame_rx);
        (VideoSurface::with_sources(Path::new("clip.mp4"), 1, 1, probe_rx, Some(decoder)), probe_tx)
    }

    #[test]
    fn reports_metadata_once_probe_completes() {
        let (mut video, probe) = surface(1);
        assert!(video.tick(0.0).is_empty());
        probe.send(Ok(2.0)).unwrap();
        assert_eq!(video.tick(0.0), vec![MediaEvent::LoadedMetadata(2.0)]);
        assert_eq!(video.duration(), Some(2.0));
        assert!(video.tick(0.0).is_empty());
    }

    #[test]
    fn failed_probe_never_reports_metadata() {
        let (mut video, probe) = surface(1);
        probe.send(Err(anyhow::anyhow!("no ffprobe"))).unwrap();
        assert!(video.tick(0.0).is_empty());
        assert!(video.tick(0.0).is_empty());
        assert_eq!(video.duration(), None);
    }

    #[test]
    fn shows_poster_before_playing() {
        let (mut video, _probe) = surface(3);
        video.tick(0.0);
        assert_eq!(video.take_frame(), Some(&[0u8; 4][..]));
        assert_eq!(video.take_frame(), None);
        assert_eq!(video.current_time(), 0.0);
    }

    #[test]
    fn play_emits_event_and_advances_clock() {
        let (mut video, _probe) = surface(30);
        video.play();
        video.play();
        let events = video.tick(0.5);
        assert_eq!(events, vec![MediaEvent::Play]);
        assert!((video.current_time() - 0.5).abs() < 1e-4);
        assert_eq!(video.take_frame(), Some(&[15u8; 4][..]));
    }

    #[test]
    fn pause_freezes_clock() {
        let (mut video, _probe) = surface(30);
        video.play();
        video.tick(0.2);
        video.pause();
        let t = video.current_time();
        video.tick(0.3);
        assert_eq!(video.current_time(), t);
        assert_eq!(video.state(), SurfaceState::Paused);
    }

    #[test]
    fn ends_when_decoder_runs_dry() {
        let (mut video, probe) = surface(3);
        probe.send(Ok(0.1)).unwrap();
        video.play();
        video.tick(0.05);
        let events = video.tick(0.1);
        assert_eq!(events, vec![MediaEvent::Ended]);
        assert_eq!(video.state(), SurfaceState::Ended);
        assert_eq!(video.current_time(), 0.1);
    }
}
