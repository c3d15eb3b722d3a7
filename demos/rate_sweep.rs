//! Plays a tone while a background task sweeps its playback rate.
//!
//! Usage: `cargo run --example rate_sweep [linear|exponential|logarithmic] [end-ratio]`
//!
//! The tone starts at 220 Hz and glides to `220 * end-ratio` over three
//! seconds, then holds for one more second.

mod common;

use anyhow::{Result, bail};
use common::Output;
use std::sync::mpsc;
use std::time::Duration;
use tonequeue::{Queue, Shape, StreamerExt, Sweep, SweepCurve, Tone};

const SWEEP: Duration = Duration::from_secs(3);
const HOLD: Duration = Duration::from_secs(1);

fn main() -> Result<()> {
    common::init_tracing();

    let mut args = std::env::args().skip(1);
    let curve = match args.next().as_deref() {
        None | Some("exponential") => SweepCurve::Exponential,
        Some("linear") => SweepCurve::Linear,
        Some("logarithmic") => SweepCurve::Logarithmic,
        Some(other) => bail!("unknown curve '{other}'"),
    };
    let end: f64 = match args.next() {
        Some(arg) => arg.parse()?,
        None => 2.0,
    };

    let output = Output::open()?;
    let format = output.format;
    let sweep = Sweep::new(1.0, end, SWEEP, curve);

    // Enough input for the sweep plus the hold at the final rate
    let input_secs = (SWEEP + HOLD).as_secs_f64() * end.max(1.0);
    let tone = Tone::with_len(Shape::Sine, 220.0, format, format.samples_for_secs(input_secs))
        .volume(-2.0)
        .rate_sweep(sweep)?;

    let mut queue = Queue::new();
    queue.add(tone);

    let (done_tx, done_rx) = mpsc::channel();
    let pipeline = queue
        .bounded(format.samples(SWEEP + HOLD))
        .on_complete(move || {
            let _ = done_tx.send(());
        });

    println!("Sweeping {curve:?} from 1.0 to {end} over {SWEEP:?}. Press Q to stop.");
    let _stream = output.play(pipeline)?;
    common::wait_for_completion(&done_rx)?;
    Ok(())
}
