//! Renders a song to a WAV file without touching an audio device.
//!
//! Usage: `cargo run --example render_wav --features wav <song.txt> [out.wav]`

mod common;

use anyhow::{Context, Result};
use tonequeue::{Format, Song, StreamerExt};

fn main() -> Result<()> {
    common::init_tracing();

    let mut args = std::env::args().skip(1);
    let input = args.next().context("missing song path")?;
    let output = args.next().unwrap_or_else(|| "song.wav".to_string());

    let text = std::fs::read_to_string(&input).with_context(|| format!("reading {input}"))?;
    let song: Song = text.parse().with_context(|| format!("parsing {input}"))?;

    let format = Format::CD;
    let total = song.total_samples(format)?;
    let queue = song.compile(format)?;
    let frames = tonequeue::wav::render_to_file(&output, format, queue.bounded(total))?;

    println!(
        "Wrote {frames} frames ({:.2} s) to {output}",
        format.duration(frames).as_secs_f64()
    );
    Ok(())
}
