//! Plays a song through the default output device.
//!
//! Usage: `cargo run --example play_song [path/to/song.txt]`
//!
//! Without a path a short built-in tune is played. Press Q or Esc to stop early.

mod common;

use anyhow::{Context, Result};
use common::Output;
use std::sync::mpsc;
use tonequeue::{Song, StreamerExt};

const TUNE: &str = "\
# Ode to Joy, first phrase
bpm 132
E4 1 -1 square
E4 1 -1 square
F4 1 -1 square
G4 1 -1 square
G4 1 -1 square
F4 1 -1 square
E4 1 -1 square
D4 1 -1 square
C4 1 -1 square
C4 1 -1 square
D4 1 -1 square
E4 1 -1 square
E4 1.5 -1 square
D4 0.5 -1 square
D4 2 -1 square
- 0.5 0 rest
C2 0.25 -2 noise
C2 0.25 -2 noise
";

fn main() -> Result<()> {
    common::init_tracing();

    let text = match std::env::args().nth(1) {
        Some(path) => {
            std::fs::read_to_string(&path).with_context(|| format!("reading song from {path}"))?
        }
        None => TUNE.to_string(),
    };
    let song: Song = text.parse().context("parsing song")?;

    let output = Output::open()?;
    let total = song.total_samples(output.format)?;
    println!(
        "Playing {} notes at {} bpm ({:.1} s). Press Q to stop.",
        song.notes.len(),
        song.bpm,
        output.format.duration(total).as_secs_f64()
    );

    let (done_tx, done_rx) = mpsc::channel();
    let pipeline = song
        .compile(output.format)?
        .bounded(total)
        .on_complete(move || {
            let _ = done_tx.send(());
        });

    let _stream = output.play(pipeline)?;
    if common::wait_for_completion(&done_rx)? {
        println!("Done.");
    } else {
        println!("Stopped.");
    }
    Ok(())
}
