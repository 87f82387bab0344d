use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::thread;
use anyhow::{Context, Result, bail};
use crate::constants::*;

/// An ffmpeg process decoding one video into raw RGBA frames.
///
/// Frames are scaled and padded to exactly `width` x `height` at `VIDEO_FPS`.
/// A reader thread pushes them into a bounded queue, so decoding runs at most
/// `DECODE_QUEUE` frames ahead of playback.
pub struct Decoder {
    process: Option<Child>,
    frames: Receiver<Vec<u8>>,
}

impl Decoder {
    pub fn spawn(path: &Path, width: i32, height: i32) -> Result<Decoder> {
        let filter = format!(
            "fps={fps},scale={w}:{h}:force_original_aspect_ratio=decrease,pad={w}:{h}:(ow-iw)/2:(oh-ih)/2",
            fps = VIDEO_FPS,
            w = width,
            h = height,
        );
        let mut process = Command::new("ffmpeg")
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .args(["-loglevel", "error"])
            .arg("-i")
            .arg(path)
            .arg("-an")
            .args(["-vf", &filter])
            .args(["-f", "rawvideo"])
            .args(["-pix_fmt", "rgba"])
            .arg("-")
            .spawn()
            .with_context(|| format!("Failed to start ffmpeg for {:?}", path))?;
        let stdout = process.stdout.take().context("Failed to open ffmpeg stdout")?;

        let frame_len = (width * height * 4) as usize; // 4 bytes per pixel (RGBA)
        let (tx, rx) = mpsc::sync_channel(DECODE_QUEUE);
        let name = path.to_path_buf();
        thread::Builder::new()
            .name("decoder".into())
            .spawn(move || read_frames(stdout, frame_len, tx, name))
            .context("Failed to start decoder thread")?;

        Ok(Decoder { process: Some(process), frames: rx })
    }

    /// A decoder fed from an existing frame queue.
    #[cfg(test)]
    pub fn from_frames(frames: Receiver<Vec<u8>>) -> Decoder {
        Decoder { process: None, frames }
    }

    pub fn frames(&self) -> &Receiver<Vec<u8>> {
        &self.frames
    }
}

fn read_frames(mut stdout: impl Read, frame_len: usize, tx: SyncSender<Vec<u8>>, path: PathBuf) {
    loop {
        let mut frame = vec![0u8; frame_len];
        match stdout.read_exact(&mut frame) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::UnexpectedEof => break,
            Err(e) => {
                log::warn!("Decoding {:?} stopped: {}", path.file_name().unwrap_or_default(), e);
                break;
            }
        }
        if tx.send(frame).is_err() {
            // Receiver dropped, the decoder was replaced
            break;
        }
    }
}

impl Drop for Decoder {
    fn drop(&mut self) {
        // The reader thread exits once the queue receiver is gone
        if let Some(process) = self.process.as_mut() {
            let _ = process.kill();
            let _ = process.wait();
        }
    }
}

/// Read a video's duration in seconds with ffprobe.
pub fn probe_duration(path: &Path) -> Result<f32> {
    let output = Command::new("ffprobe")
        .args(["-v", "error"])
        .args(["-show_entries", "format=duration"])
        .args(["-of", "default=noprint_wrappers=1:nokey=1"])
        .arg(path)
        .output()
        .with_context(|| format!("Failed to run ffprobe for {:?}", path))?;
    if !output.status.success() {
        bail!(
            "ffprobe failed for {:?}: {}",
            path,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    parse_duration(&String::from_utf8_lossy(&output.stdout))
}

fn parse_duration(text: &str) -> Result<f32> {
    let value: f32 = text
        .trim()
        .parse()
        .with_context(|| format!("Invalid duration {:?}", text.trim()))?;
    if !value.is_finite() || value <= 0.0 {
        bail!("Invalid duration {}", value);
    }
    Ok(value)
}

/// Probe on a background thread; the result arrives on the returned channel.
pub fn probe_duration_async(path: &Path) -> Receiver<Result<f32>> {
    let (tx, rx) = mpsc::channel();
    let path = path.to_path_buf();
    thread::spawn(move || {
        let _ = tx.send(probe_duration(&path));
    });
    rx
}
