//! Stereo WAV reading and writing.

use std::path::Path;

use anyhow::Context;
use hound::{SampleFormat, WavReader, WavWriter};

/// Deinterleaved stereo audio.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StereoBuffer {
    /// Left channel samples.
    pub left: Vec<f32>,
    /// Right channel samples.
    pub right: Vec<f32>,
}

impl StereoBuffer {
    /// Silent buffer of `frames` frames.
    pub fn silent(frames: usize) -> Self {
        Self {
            left: vec![0.0; frames],
            right: vec![0.0; frames],
        }
    }

    /// Number of frames.
    pub fn len(&self) -> usize {
        self.left.len().min(self.right.len())
    }

    /// True if there are no frames.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// RMS and peak over both channels.
    pub fn levels(&self) -> (f32, f32) {
        let total = self.left.len() + self.right.len();
        if total == 0 {
            return (0.0, 0.0);
        }
        let samples = self.left.iter().chain(&self.right);
        let sum: f32 = samples.clone().map(|s| s * s).sum();
        let peak = samples.map(|s| s.abs()).fold(0.0, f32::max);
        ((sum / total as f32).sqrt(), peak)
    }
}

/// Reads a WAV file as stereo.
///
/// Mono files are duplicated to both channels; files with more than two
/// channels keep the first two.
pub fn read_stereo(path: &Path) -> anyhow::Result<(StereoBuffer, hound::WavSpec)> {
    let reader =
        WavReader::open(path).with_context(|| format!("opening {}", path.display()))?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample.clamp(1, 32) - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let buffer = if channels == 1 {
        StereoBuffer {
            right: interleaved.clone(),
            left: interleaved,
        }
    } else {
        let frames = interleaved.chunks_exact(channels);
        StereoBuffer {
            left: frames.clone().map(|f| f[0]).collect(),
            right: frames.map(|f| f[1]).collect(),
        }
    };

    Ok((buffer, spec))
}

/// Writes a stereo WAV file. 32-bit output is float, 16 and 24 are PCM.
pub fn write_stereo(
    path: &Path,
    audio: &StereoBuffer,
    sample_rate: u32,
    bits_per_sample: u16,
) -> anyhow::Result<()> {
    anyhow::ensure!(
        matches!(bits_per_sample, 16 | 24 | 32),
        "unsupported bit depth {bits_per_sample} (expected 16, 24 or 32)"
    );

    let spec = hound::WavSpec {
        channels: 2,
        sample_rate,
        bits_per_sample,
        sample_format: if bits_per_sample == 32 {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        },
    };
    let mut writer =
        WavWriter::create(path, spec).with_context(|| format!("creating {}", path.display()))?;

    let frames = audio.left.iter().zip(&audio.right);
    if bits_per_sample == 32 {
        for (&l, &r) in frames {
            writer.write_sample(l)?;
            writer.write_sample(r)?;
        }
    } else {
        let max_val = (1i32 << (bits_per_sample - 1)) as f32;
        let quantize = |s: f32| (s * max_val).clamp(-max_val, max_val - 1.0) as i32;
        for (&l, &r) in frames {
            writer.write_sample(quantize(l))?;
            writer.write_sample(quantize(r))?;
        }
    }

    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn ramp(frames: usize) -> StereoBuffer {
        StereoBuffer {
            left: (0..frames).map(|i| (i as f32 / frames as f32) - 0.5).collect(),
            right: (0..frames).map(|i| 0.5 - (i as f32 / frames as f32)).collect(),
        }
    }

    #[test]
    fn float_roundtrip_is_exact() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("f32.wav");
        let audio = ramp(1000);

        write_stereo(&path, &audio, 48000, 32).unwrap();
        let (loaded, spec) = read_stereo(&path).unwrap();

        assert_eq!(spec.sample_rate, 48000);
        assert_eq!(spec.channels, 2);
        assert_eq!(loaded, audio);
    }

    #[test]
    fn pcm16_roundtrip_is_close() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("i16.wav");
        let audio = ramp(1000);

        write_stereo(&path, &audio, 44100, 16).unwrap();
        let (loaded, _) = read_stereo(&path).unwrap();

        assert_eq!(loaded.len(), audio.len());
        for (a, b) in audio.left.iter().zip(&loaded.left) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn mono_files_fill_both_channels() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("mono.wav");
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 22050,
            bits_per_sample: 32,
            sample_format: SampleFormat::Float,
        };
        let mut writer = WavWriter::create(&path, spec).unwrap();
        for s in [0.1f32, -0.2, 0.3] {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();

        let (loaded, spec) = read_stereo(&path).unwrap();
        assert_eq!(spec.sample_rate, 22050);
        assert_eq!(loaded.left, vec![0.1, -0.2, 0.3]);
        assert_eq!(loaded.right, loaded.left);
    }

    #[test]
    fn odd_bit_depths_are_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.wav");
        assert!(write_stereo(&path, &ramp(10), 48000, 12).is_err());
    }

    #[test]
    fn levels_of_full_scale_square() {
        let audio = StereoBuffer {
            left: vec![1.0, -1.0, 1.0, -1.0],
            right: vec![-1.0, 1.0, -1.0, 1.0],
        };
        assert_eq!(audio.levels(), (1.0, 1.0));
        assert_eq!(StereoBuffer::default().levels(), (0.0, 0.0));
    }
}
