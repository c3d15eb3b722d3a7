use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use tonequeue::{
    Format, Frame, Queue, Shape, Silence, Streamer, StreamerExt, Sweep, Tone, WhiteNoise,
};

/// Pulls from `streamer` the way a device callback would until it ends.
fn drain<S: Streamer>(streamer: &mut S, chunk: usize) -> Vec<Frame> {
    let mut out = Vec::new();
    let mut buffer = vec![[0.0; 2]; chunk];
    loop {
        let (n, more) = streamer.stream(&mut buffer);
        out.extend_from_slice(&buffer[..n]);
        if !more {
            return out;
        }
    }
}

#[test]
fn test_tone_then_silence_bounded() {
    let format = Format::CD;
    let mut queue = Queue::new();
    queue.add(Tone::new(
        Shape::Sine,
        440.0,
        format,
        Duration::from_millis(125),
    ));
    queue.add(Silence::new().bounded(100));

    let fired = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&fired);
    let mut pipeline = queue.bounded(6000).on_complete(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    let frames = drain(&mut pipeline, 512);
    assert_eq!(frames.len(), 6000);
    for (i, frame) in frames[..5512].iter().enumerate() {
        let expected = (std::f64::consts::TAU * 440.0 * i as f64 / 44100.0).sin();
        assert!((frame[0] - expected).abs() < 1e-9, "frame {i}");
        assert_eq!(frame[0], frame[1]);
    }
    assert!(frames[5512..].iter().all(|f| *f == [0.0, 0.0]));

    // Further pulls stay drained and never re-fire the signal
    let mut buffer = [[0.0; 2]; 64];
    assert_eq!(pipeline.stream(&mut buffer), (0, false));
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[test]
fn test_queue_accepts_boxed_mixture() {
    let format = Format::new(48_000).unwrap();
    let mut queue: Queue = [
        Tone::with_len(Shape::Sawtooth, 220.0, format, 300).boxed(),
        WhiteNoise::new(0.5).volume(-1.0).bounded(200).boxed(),
        Tone::with_len(Shape::Square, 110.0, format, 100)
            .resample(2.0)
            .boxed(),
    ]
    .into_iter()
    .collect();
    assert_eq!(queue.pending(), 3);

    let frames = drain(&mut (&mut queue).bounded(700), 128);
    assert_eq!(frames.len(), 700);
    assert!(queue.is_idle());
    // Noise scaled to a quarter of full scale
    assert!(frames[300..500].iter().all(|f| f[0].abs() <= 0.25));
    // Double-speed tail lasts half as long, then the queue pads with silence
    assert!(frames[550..].iter().all(|f| *f == [0.0, 0.0]));
}

#[test]
fn test_rate_sweep_inside_queue() {
    let format = Format::CD;
    let sweep =
        Sweep::linear(1.0, 2.0, Duration::from_millis(20)).with_tick(Duration::from_millis(1));
    let swept = Tone::with_len(Shape::Sine, 440.0, format, 44_100)
        .rate_sweep(sweep)
        .unwrap();

    let deadline = Instant::now() + Duration::from_secs(5);
    while !swept.is_finished() {
        assert!(Instant::now() < deadline, "sweep task did not finish");
        thread::sleep(Duration::from_millis(1));
    }
    assert_eq!(swept.ratio(), 2.0);

    let mut queue = Queue::new();
    queue.add(swept);
    let frames = drain(&mut queue.bounded(44_100), 1024);
    assert_eq!(frames.len(), 44_100);
    // At double speed the tone lasts half as long
    assert_ne!(frames[22_049], [0.0, 0.0]);
    assert!(frames[22_050..].iter().all(|f| *f == [0.0, 0.0]));
}

#[cfg(feature = "music")]
mod music {
    use super::*;
    use tonequeue::Song;

    const TUNE: &str = "\
bpm 240
C4  1  0 square
E4  1 -1 sine
G4  1 -2 sawtooth
-   1  0 rest
";

    #[test]
    fn test_song_plays_to_completion() {
        let song: Song = TUNE.parse().unwrap();
        let format = Format::CD;
        let total = song.total_samples(format).unwrap();
        assert_eq!(total, 4 * 11025);

        let (done_tx, done_rx) = std::sync::mpsc::channel();
        let mut pipeline = song
            .repeat(2)
            .compile(format)
            .unwrap()
            .bounded(2 * total)
            .on_complete(move || {
                let _ = done_tx.send(());
            });

        let frames = drain(&mut pipeline, 441);
        assert_eq!(frames.len(), 2 * total);
        assert!(done_rx.try_recv().is_ok());

        // Peak of the first note is full scale, the second half scale
        let peak = |range: std::ops::Range<usize>| {
            frames[range]
                .iter()
                .map(|f| f[0].abs())
                .fold(0.0_f64, f64::max)
        };
        assert_eq!(peak(0..11025), 1.0);
        assert!((peak(11025..22050) - 0.5).abs() < 1e-3);
        assert_eq!(peak(33075..44100), 0.0);
        assert_eq!(peak(44100..55125), 1.0);
    }
}
