//! Pull-based playback of a generated sample sequence.

use crate::error::AudioError;

/// A source of stereo frames pulled by a playback device.
pub trait Streamer {
    /// Fills `frames` from the source.
    ///
    /// Returns the number of frames written and whether the caller should
    /// keep polling.
    fn stream(&mut self, frames: &mut [[f64; 2]]) -> (usize, bool);

    /// The error that stopped the stream, if any.
    fn err(&self) -> Option<&AudioError>;
}

/// Streams a finished mono sample sequence as stereo frames.
///
/// When the cursor reaches the end it rewinds to the start and reports a
/// zero-frame read. Whether that read ends the stream depends on the
/// `drained` flag: a drained stream stops, an undrained one stays idle and
/// replays on the next poll.
#[derive(Debug, Clone, Default)]
pub struct SampleStream {
    samples: Vec<f64>,
    position: usize,
    drained: bool,
}

impl SampleStream {
    /// Wraps a sample sequence, starting undrained at the first sample.
    pub fn new(samples: Vec<f64>) -> Self {
        Self {
            samples,
            position: 0,
            drained: false,
        }
    }

    /// Sets whether exhaustion ends the stream.
    pub fn set_drained(&mut self, drained: bool) {
        self.drained = drained;
    }

    /// Whether exhaustion ends the stream.
    pub fn is_drained(&self) -> bool {
        self.drained
    }

    /// Index of the next sample to stream.
    pub fn position(&self) -> usize {
        self.position
    }

    /// Total number of samples.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// The underlying samples.
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }
}

impl Streamer for SampleStream {
    fn stream(&mut self, frames: &mut [[f64; 2]]) -> (usize, bool) {
        if self.position >= self.samples.len() {
            self.position = 0;
            return (0, !self.drained);
        }

        let remaining = &self.samples[self.position..];
        let count = frames.len().min(remaining.len());
        for (frame, &sample) in frames.iter_mut().zip(remaining) {
            *frame = [sample, sample];
        }
        self.position += count;
        (count, true)
    }

    fn err(&self) -> Option<&AudioError> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(stream: &mut SampleStream, chunk: usize) -> usize {
        let mut frames = vec![[0.0; 2]; chunk];
        let mut total = 0;
        loop {
            let (n, _) = stream.stream(&mut frames);
            if n == 0 {
                return total;
            }
            total += n;
        }
    }

    #[test]
    fn test_chunks_sum_to_length() {
        let samples: Vec<f64> = (0..1000).map(|i| i as f64).collect();
        for chunk in [1, 7, 64, 999, 1000, 4096] {
            let mut stream = SampleStream::new(samples.clone());
            assert_eq!(drain(&mut stream, chunk), 1000, "chunk {}", chunk);
        }
    }

    #[test]
    fn test_frames_duplicate_mono() {
        let mut stream = SampleStream::new(vec![0.25, -0.5, 1.0]);
        let mut frames = [[9.0; 2]; 2];
        assert_eq!(stream.stream(&mut frames), (2, true));
        assert_eq!(frames, [[0.25, 0.25], [-0.5, -0.5]]);
        assert_eq!(stream.position(), 2);

        assert_eq!(stream.stream(&mut frames), (1, true));
        assert_eq!(frames[0], [1.0, 1.0]);
    }

    #[test]
    fn test_drained_stream_stops() {
        let mut stream = SampleStream::new(vec![0.1; 10]);
        stream.set_drained(true);
        drain(&mut stream, 4);

        let mut frames = [[0.0; 2]; 4];
        assert_eq!(stream.stream(&mut frames), (0, false));
        assert!(stream.err().is_none());
    }

    #[test]
    fn test_undrained_stream_rewinds_and_replays() {
        let samples = vec![0.1, 0.2, 0.3];
        let mut stream = SampleStream::new(samples);
        let mut frames = [[0.0; 2]; 8];

        assert_eq!(stream.stream(&mut frames), (3, true));
        assert_eq!(stream.stream(&mut frames), (0, true));
        assert_eq!(stream.position(), 0);

        assert_eq!(stream.stream(&mut frames), (3, true));
        assert_eq!(frames[0], [0.1, 0.1]);
    }

    #[test]
    fn test_empty_sequence() {
        let mut stream = SampleStream::new(Vec::new());
        assert!(stream.is_empty());
        let mut frames = [[0.0; 2]; 4];
        assert_eq!(stream.stream(&mut frames), (0, true));
        stream.set_drained(true);
        assert_eq!(stream.stream(&mut frames), (0, false));
    }
}
