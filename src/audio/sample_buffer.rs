use std::path::Path;

use anyhow::Context;

use super::frame::StereoFrame;

#[derive(Clone, Debug, Default)]
pub struct SampleBuffer {
    pub data: Vec<StereoFrame>, // the audio data array
}

impl SampleBuffer {
    // Load a WAV file from disk, as stereo at the engine's rate
    pub fn load_wav(path: &Path, target_rate: u32) -> anyhow::Result<Self> {
        let mut reader = hound::WavReader::open(path).context("could not open wav file")?;
        let spec = reader.spec();
        let file_rate = spec.sample_rate;
        let file_channels = spec.channels as usize;

        let samples: Vec<f32> = match spec.sample_format {
            hound::SampleFormat::Float => reader // float, just pass it through
                .samples::<f32>()
                .collect::<Result<Vec<_>, _>>()?,
            hound::SampleFormat::Int => { // int, convert to float
                let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
                reader
                    .samples::<i32>()
                    .map(|s| s.map(|x| x as f32 / max))
                    .collect::<Result<Vec<_>, _>>()?
            }
        };

        let frames: Vec<StereoFrame> = match file_channels {
            0 => anyhow::bail!("{} has no channels", path.display()),
            1 => samples.into_iter().map(StereoFrame::mono).collect(), // mono, duplicate
            n => samples // anything wider only keeps the first two channels
                .chunks_exact(n)
                .map(|c| StereoFrame { left: c[0], right: c[1] })
                .collect(),
        };

        Ok(Self {
            data: resample_linear(&frames, file_rate, target_rate),
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

fn resample_linear(frames: &[StereoFrame], source_rate: u32, target_rate: u32) -> Vec<StereoFrame> {
    // simple linear resampler, good enough for drum one-shots
    if source_rate == target_rate || frames.is_empty() {
        return frames.to_vec();
    }
    let ratio = target_rate as f64 / source_rate as f64;
    let out_len = (frames.len() as f64 * ratio).ceil() as usize;
    let last = frames.len() - 1;

    (0..out_len)
        .map(|i| {
            let src_pos = i as f64 / ratio; // ex. 3.7
            let idx = src_pos.floor() as usize; // ex. 3
            if idx >= last {
                return frames[last];
            }
            let frac = (src_pos - idx as f64) as f32; // ex. 0.7
            let (a, b) = (frames[idx], frames[idx + 1]);
            StereoFrame {
                left: a.left * (1.0 - frac) + b.left * frac,
                right: a.right * (1.0 - frac) + b.right * frac,
            }
        })
        .collect()
}
