use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::audio::SampleBuffer;

// Load a WAV from disk, prepare for registration with the engine
pub fn load(path: &Path, target_rate: u32) -> anyhow::Result<SampleBuffer> {
    let buffer = SampleBuffer::load_wav(path, target_rate)
        .with_context(|| format!("Error loading instrument sample {}", path.display()))?;
    if buffer.is_empty() {
        anyhow::bail!("{} contains no audio", path.display());
    }
    debug!(path = %path.display(), frames = buffer.len(), target_rate, "decoded sample");
    Ok(buffer)
}
