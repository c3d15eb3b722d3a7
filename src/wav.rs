//! Offline rendering to WAV files.
//!
//! This is a render driver like an audio device callback, except it pulls as
//! fast as it can and stops at the first `more == false`. Only bounded
//! streamers should be rendered: a bare [`Queue`](crate::Queue) never ends.

use std::io::{Seek, Write};
use std::path::Path;

use hound::{SampleFormat, WavSpec, WavWriter};
use tracing::debug;

use crate::{Error, Format, Frame, Streamer};

/// Frames pulled from the streamer per write.
const CHUNK: usize = 1024;

/// WAV layout used for every render: stereo, 32-bit float.
pub fn spec(format: Format) -> WavSpec {
    WavSpec {
        channels: 2,
        sample_rate: format.sample_rate(),
        bits_per_sample: 32,
        sample_format: SampleFormat::Float,
    }
}

/// Drains `streamer` into a new WAV file at `path`, returning the number of
/// frames written.
///
/// # Examples
///
/// ```no_run
/// use tonequeue::{Format, Shape, StreamerExt, Tone};
///
/// let tone = Tone::with_len(Shape::Sine, 440.0, Format::CD, 44100).volume(-1.0);
/// let frames = tonequeue::wav::render_to_file("a4.wav", Format::CD, tone)?;
/// assert_eq!(frames, 44100);
/// # Ok::<(), tonequeue::Error>(())
/// ```
pub fn render_to_file<P, S>(path: P, format: Format, streamer: S) -> Result<usize, Error>
where
    P: AsRef<Path>,
    S: Streamer,
{
    let path = path.as_ref();
    let writer = WavWriter::create(path, spec(format))?;
    let frames = render(writer, streamer)?;
    debug!(path = %path.display(), frames, "rendered wav");
    Ok(frames)
}

/// Drains `streamer` into `writer` and finalizes it.
pub fn render<W, S>(mut writer: WavWriter<W>, mut streamer: S) -> Result<usize, Error>
where
    W: Write + Seek,
    S: Streamer,
{
    let mut buffer: Vec<Frame> = vec![[0.0; 2]; CHUNK];
    let mut frames = 0;
    loop {
        let (n, more) = streamer.stream(&mut buffer);
        for frame in &buffer[..n] {
            writer.write_sample(frame[0] as f32)?;
            writer.write_sample(frame[1] as f32)?;
        }
        frames += n;
        if !more {
            break;
        }
    }
    writer.finalize()?;
    Ok(frames)
}
