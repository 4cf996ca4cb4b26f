//! Streaming generated sounds.

use blipgen_synth::presets::pickup_coin;
use blipgen_synth::rng::create_rng;
use blipgen_synth::{render, SampleStream, Streamer};

#[test]
fn test_stream_generated_sound_in_chunks() {
    let samples = render(&pickup_coin(&mut create_rng(2)), 2).expect("should generate");
    let len = samples.len();

    let mut stream = SampleStream::new(samples.clone());
    stream.set_drained(true);

    let mut frames = vec![[0.0; 2]; 512];
    let mut played = Vec::with_capacity(len);
    loop {
        let (n, more) = stream.stream(&mut frames);
        if n == 0 {
            assert!(!more);
            break;
        }
        assert!(more);
        played.extend(frames[..n].iter().map(|frame| frame[0]));
        assert!(frames[..n].iter().all(|frame| frame[0] == frame[1]));
    }

    assert_eq!(played, samples);
}

#[test]
fn test_looping_playback_replays() {
    let samples = render(&pickup_coin(&mut create_rng(3)), 3).expect("should generate");
    let mut stream = SampleStream::new(samples.clone());
    let mut frames = vec![[0.0; 2]; samples.len()];

    for _ in 0..3 {
        assert_eq!(stream.stream(&mut frames), (samples.len(), true));
        assert_eq!(frames[0][0], samples[0]);
        assert_eq!(stream.stream(&mut frames), (0, true));
        assert_eq!(stream.position(), 0);
    }
}
