//! Offline rendering of a WAV file through the tape engine.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use genloss_config::{GenLossParams, load_preset, parse_param_value, validate_param};
use genloss_core::{ParameterInfo, linear_to_db};
use genloss_effects::GenLoss;
use indicatif::{ProgressBar, ProgressStyle};

use crate::wav::{StereoBuffer, read_stereo, write_stereo};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (mono or stereo)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file (always stereo)
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Factory preset name or preset file (TOML)
    #[arg(short, long)]
    preset: Option<String>,

    /// Parameter overrides, applied after the preset (e.g. "wow_depth=0.5", "noise=-48dB")
    #[arg(long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Extra output after the input ends, in milliseconds
    #[arg(long, default_value = "0")]
    tail_ms: f32,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
        .ok_or_else(|| format!("Invalid parameter format: '{}' (expected key=value)", s))
}

/// Builds the parameter set from an optional preset plus overrides.
///
/// Out-of-range overrides are clamped with a warning; unknown names and
/// unparsable values are errors.
pub fn resolve_params(
    preset: Option<&str>,
    overrides: &[(String, String)],
) -> anyhow::Result<GenLossParams> {
    let mut params = match preset {
        Some(name) => {
            let preset = load_preset(name)?;
            if let Err(e) = preset.validate() {
                tracing::warn!(preset = %preset.name, error = %e, "preset values will be clamped");
            }
            tracing::info!(preset = %preset.name, "loaded preset");
            preset.to_params()?
        }
        None => GenLossParams::default(),
    };

    for (key, raw) in overrides {
        let value = parse_param_value(key, raw)?;
        let index = match validate_param(key, value) {
            Ok(index) => index,
            Err(genloss_config::ValidationError::OutOfRange { min, max, .. }) => {
                tracing::warn!(param = %key, value, min, max, "override clamped to range");
                genloss_config::find_param(key)
                    .with_context(|| format!("unknown parameter '{key}'"))?
            }
            Err(e) => return Err(e.into()),
        };
        params.set_param(index, value);
    }

    Ok(params)
}

/// Renders `input` block by block, appending `tail` frames of silence.
pub fn render(
    engine: &mut GenLoss,
    input: &StereoBuffer,
    tail: usize,
    block_size: usize,
    progress: &ProgressBar,
) -> StereoBuffer {
    let block_size = block_size.max(1);
    let total = input.len() + tail;
    let mut output = StereoBuffer::silent(total);
    let mut scratch_l = vec![0.0; block_size];
    let mut scratch_r = vec![0.0; block_size];

    let mut start = 0;
    while start < total {
        let frames = block_size.min(total - start);
        let in_end = (start + frames).min(input.len());
        let in_l = input.left.get(start..in_end).unwrap_or(&[]);
        let in_r = input.right.get(start..in_end).unwrap_or(&[]);

        engine.process(
            &[in_l, in_r],
            &mut [&mut scratch_l[..frames], &mut scratch_r[..frames]],
            frames,
        );
        output.left[start..start + frames].copy_from_slice(&scratch_l[..frames]);
        output.right[start..start + frames].copy_from_slice(&scratch_r[..frames]);

        start += frames;
        progress.set_position(start as u64);
    }

    output
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let (input, spec) = read_stereo(&args.input)?;
    anyhow::ensure!(
        spec.sample_rate > 0,
        "{} has a sample rate of 0",
        args.input.display()
    );
    anyhow::ensure!(args.block_size > 0, "block size must be positive");
    anyhow::ensure!(
        args.tail_ms.is_finite() && args.tail_ms >= 0.0,
        "tail must be a non-negative number of milliseconds"
    );

    let sample_rate = spec.sample_rate as f32;
    tracing::info!(
        path = %args.input.display(),
        frames = input.len(),
        channels = spec.channels,
        sample_rate = spec.sample_rate,
        seconds = input.len() as f32 / sample_rate,
        "read input"
    );

    if input.is_empty() {
        tracing::warn!(path = %args.input.display(), "input has no frames");
    }

    let params = resolve_params(args.preset.as_deref(), &args.param)?;
    tracing::debug!(?params, "resolved parameters");

    let mut engine = GenLoss::new(sample_rate);
    engine.reset(sample_rate, args.block_size);
    engine.set_params(&params);

    let tail = (args.tail_ms * 0.001 * sample_rate).round() as usize;
    let pb = ProgressBar::new((input.len() + tail) as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let output = render(&mut engine, &input, tail, args.block_size, &pb);
    pb.finish_and_clear();

    let (in_rms, in_peak) = input.levels();
    let (out_rms, out_peak) = output.levels();
    tracing::info!(
        rms_db = linear_to_db(in_rms),
        peak_db = linear_to_db(in_peak),
        "input level"
    );
    tracing::info!(
        rms_db = linear_to_db(out_rms),
        peak_db = linear_to_db(out_peak),
        dropouts = engine.dropout_events(),
        "output level"
    );

    write_stereo(&args.output, &output, spec.sample_rate, args.bit_depth)?;
    tracing::info!(path = %args.output.display(), bits = args.bit_depth, "wrote output");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn key_val_parsing() {
        assert_eq!(
            parse_key_val("noise = -48dB"),
            Ok(("noise".to_string(), "-48dB".to_string()))
        );
        assert!(parse_key_val("noise").is_err());
    }

    #[test]
    fn overrides_apply_over_preset() {
        let params =
            resolve_params(Some("cassette"), &pairs(&[("mix", "50%"), ("tape_stop", "on")]))
                .unwrap();
        assert_eq!(params.mix, 50.0);
        assert!(params.tape_stop);
        assert_eq!(params.wow_depth, 0.35);
    }

    #[test]
    fn out_of_range_override_is_clamped() {
        let params = resolve_params(None, &pairs(&[("output", "40")])).unwrap();
        assert_eq!(params.output_db, 24.0);
    }

    #[test]
    fn bad_overrides_fail() {
        assert!(resolve_params(None, &pairs(&[("warble", "1")])).is_err());
        assert!(resolve_params(None, &pairs(&[("mix", "lots")])).is_err());
        assert!(resolve_params(Some("no_such_deck"), &[]).is_err());
    }

    #[test]
    fn block_size_does_not_change_output() {
        let input = StereoBuffer {
            left: (0..3000).map(|i| (i as f32 * 0.02).sin() * 0.5).collect(),
            right: (0..3000).map(|i| (i as f32 * 0.03).cos() * 0.5).collect(),
        };
        let params = GenLossParams {
            dropout_rate: 30.0,
            ..GenLossParams::default()
        };
        let progress = ProgressBar::hidden();

        let mut a = GenLoss::new(48000.0);
        a.set_params(&params);
        let whole = render(&mut a, &input, 500, 4096, &progress);

        let mut b = GenLoss::new(48000.0);
        b.set_params(&params);
        let chunked = render(&mut b, &input, 500, 37, &progress);

        assert_eq!(whole.len(), 3500);
        assert_eq!(whole, chunked);
    }

    #[test]
    fn tail_carries_the_delayed_signal() {
        let mut input = StereoBuffer::silent(100);
        input.left[99] = 1.0;
        input.right[99] = 1.0;

        let mut engine = GenLoss::new(48000.0);
        engine.set_params(&GenLossParams::transparent());
        let out = render(&mut engine, &input, 480, 64, &ProgressBar::hidden());

        assert!(out.left[..100].iter().all(|&s| s == 0.0));
        assert!(out.left[100..].iter().any(|&s| s.abs() > 0.01));
    }
}
