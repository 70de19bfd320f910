use std::path::{Path, PathBuf};

use beatgrid::Config;
use beatgrid::audio::{Output, SampleId};
use beatgrid::audio_api::AudioSink;
use beatgrid::load_instruments;
use beatgrid::loader::sample_loader;

fn fixture_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("beatgrid-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_click(path: &Path, rate: u32) {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..64i16 {
        writer.write_sample(i * 100).unwrap();
    }
    writer.finalize().unwrap();
}

#[test]
fn loader_resamples_to_target_rate() {
    let dir = fixture_dir("resample");
    let path = dir.join("click.wav");
    write_click(&path, 22050);
    let buffer = sample_loader::load(&path, 44100).unwrap();
    assert_eq!(buffer.len(), 128);
    let _ = std::fs::remove_dir_all(dir);
}

#[test]
fn loader_reports_the_missing_path() {
    let err = sample_loader::load(Path::new("/nope/snare.wav"), 44100).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("Error loading instrument sample"), "{msg}");
    assert!(msg.contains("/nope/snare.wav"), "{msg}");
}

#[test]
fn muted_output_still_validates_samples() {
    let dir = fixture_dir("muted");
    write_click(&dir.join("kick.wav"), 44100);
    write_click(&dir.join("snare.wav"), 44100);
    let config = Config::default().resolve(&dir);

    let mut audio = Output::Muted { next_id: 0 };
    let handles = load_instruments(&mut audio, &config.samples).unwrap();
    assert_eq!(handles, [SampleId(0), SampleId(1)]);
    audio.play(&handles[0]); // goes nowhere, must not panic

    std::fs::remove_file(dir.join("snare.wav")).unwrap();
    let mut audio = Output::Muted { next_id: 0 };
    assert!(load_instruments(&mut audio, &config.samples).is_err());
    let _ = std::fs::remove_dir_all(dir);
}
