//! Common utilities for the audio demos: a cpal render driver and a terminal
//! wait loop.

#![allow(dead_code)]

use anyhow::Result;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{FromSample, Sample, SampleFormat, SizedSample, StreamConfig};
use crossterm::{
    ExecutableCommand,
    event::{self, Event, KeyCode},
    terminal::{disable_raw_mode, enable_raw_mode},
};
use std::io::stdout;
use std::panic;
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;
use tonequeue::{Format, Frame, Streamer};
use tracing_subscriber::EnvFilter;

/// Frames rendered per pull inside the device callback.
const SCRATCH_FRAMES: usize = 4096;

/// Installs a `tracing` subscriber honouring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();
}

/// The default output device and the format its stream will run at.
pub struct Output {
    device: cpal::Device,
    config: cpal::SupportedStreamConfig,
    pub format: Format,
}

impl Output {
    pub fn open() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow::anyhow!("No output device available"))?;
        let config = device.default_output_config()?;
        let format = Format::new(config.sample_rate().0)?;
        tracing::info!(
            device = %device.name().unwrap_or_default(),
            sample_rate = format.sample_rate(),
            channels = config.channels(),
            "opened output"
        );
        Ok(Self {
            device,
            config,
            format,
        })
    }

    /// Starts pulling `streamer` from the device callback.
    ///
    /// Playback runs until the returned stream is dropped. Once the streamer
    /// reports exhaustion the device is fed silence.
    pub fn play<S>(&self, streamer: S) -> Result<cpal::Stream>
    where
        S: Streamer + Send + 'static,
    {
        let config: StreamConfig = self.config.clone().into();
        let stream = match self.config.sample_format() {
            SampleFormat::F32 => build_stream::<f32, S>(&self.device, &config, streamer)?,
            SampleFormat::I16 => build_stream::<i16, S>(&self.device, &config, streamer)?,
            SampleFormat::U16 => build_stream::<u16, S>(&self.device, &config, streamer)?,
            sample_format => {
                return Err(anyhow::anyhow!(
                    "Unsupported sample format: {}",
                    sample_format
                ));
            }
        };
        stream.play()?;
        Ok(stream)
    }
}

fn build_stream<T, S>(
    device: &cpal::Device,
    config: &StreamConfig,
    mut streamer: S,
) -> Result<cpal::Stream>
where
    T: Sample + FromSample<f64> + SizedSample,
    S: Streamer + Send + 'static,
{
    let channels = config.channels as usize;
    let mut scratch: Vec<Frame> = vec![[0.0; 2]; SCRATCH_FRAMES];
    let mut drained = false;

    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            for block in data.chunks_mut(SCRATCH_FRAMES * channels) {
                let frames = block.len() / channels;
                let filled = if drained {
                    0
                } else {
                    let (n, more) = streamer.stream(&mut scratch[..frames]);
                    drained = !more;
                    n
                };
                scratch[filled..frames].fill([0.0, 0.0]);

                for (out, frame) in block.chunks_mut(channels).zip(&scratch[..frames]) {
                    write_frame(out, frame);
                }
            }
        },
        |err| tracing::error!(%err, "audio stream error"),
        None,
    )?;
    Ok(stream)
}

/// Maps a stereo frame onto however many channels the device has.
fn write_frame<T: Sample + FromSample<f64>>(out: &mut [T], frame: &Frame) {
    match out {
        [mono] => *mono = T::from_sample((frame[0] + frame[1]) * 0.5),
        [left, right, rest @ ..] => {
            *left = T::from_sample(frame[0]);
            *right = T::from_sample(frame[1]);
            for s in rest {
                *s = T::EQUILIBRIUM;
            }
        }
        [] => {}
    }
}

/// Blocks until `done` fires or the user presses a quit key.
///
/// Returns `true` if playback completed on its own.
pub fn wait_for_completion(done: &Receiver<()>) -> Result<bool> {
    enable_raw_mode()?;

    // Restore the terminal on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        cleanup_terminal();
        original_hook(panic_info);
    }));

    let completed = loop {
        match done.try_recv() {
            Ok(()) | Err(TryRecvError::Disconnected) => break true,
            Err(TryRecvError::Empty) => {}
        }
        if event::poll(Duration::from_millis(50))?
            && let Event::Key(key_event) = event::read()?
            && is_quit_key(key_event.code)
        {
            break false;
        }
    };

    cleanup_terminal();
    Ok(completed)
}

fn cleanup_terminal() {
    let _ = stdout().execute(crossterm::cursor::Show);
    let _ = disable_raw_mode();
}

/// Helper to check if a key code is a quit key (Q, ESC).
pub fn is_quit_key(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc)
}
