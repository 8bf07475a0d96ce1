//! Integration tests for genloss-config.
//!
//! Presets go through disk, into the engine, and back out.

use genloss_config::{
    ConfigError, GenLossParams, Preset, factory_presets, get_factory_preset, load_preset,
};
use genloss_effects::GenLoss;
use tempfile::TempDir;

fn render(params: &GenLossParams, frames: usize) -> Vec<f32> {
    let mut engine = GenLoss::new(48000.0);
    engine.set_params(params);
    let input: Vec<f32> = (0..frames).map(|i| (i as f32 * 0.05).sin() * 0.5).collect();
    let mut left = vec![0.0; frames];
    let mut right = vec![0.0; frames];
    engine.process(&[&input, &input], &mut [&mut left, &mut right], frames);
    left.extend(right);
    left
}

#[test]
fn test_save_and_load_roundtrip() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("nested").join("deck.toml");

    let cassette = get_factory_preset("cassette").unwrap().to_params().unwrap();
    let original = Preset::from_params("Deck", &cassette)
        .with_description("Saved from a factory preset")
        .with_sample_rate(44100);
    original.save(&path).expect("save");
    assert!(path.exists());

    let loaded = Preset::load(&path).expect("load");
    assert_eq!(loaded, original);
    assert_eq!(loaded.to_params().unwrap(), original.to_params().unwrap());
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().expect("tempdir");
    let missing = dir.path().join("absent.toml");
    assert!(matches!(
        Preset::load(&missing),
        Err(ConfigError::ReadFile { .. })
    ));
}

#[test]
fn test_load_preset_prefers_factory_then_path() {
    assert_eq!(load_preset("Broken Deck").unwrap().name, "Broken Deck");

    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("custom.toml");
    Preset::new("Custom").with_param("mix", 50.0).save(&path).unwrap();

    let loaded = load_preset(path.to_str().unwrap()).unwrap();
    assert_eq!(loaded.name, "Custom");
    assert_eq!(loaded.to_params().unwrap().mix, 50.0);

    assert!(matches!(
        load_preset("no_such_deck"),
        Err(ConfigError::PresetNotFound(_))
    ));
}

#[test]
fn test_factory_presets_drive_the_engine() {
    for preset in factory_presets() {
        let params = preset.to_params().expect("factory preset applies");
        let out = render(&params, 4800);
        assert!(
            out.iter().all(|s| s.is_finite()),
            "preset '{}' produced non-finite output",
            preset.name
        );
        assert!(out.iter().any(|&s| s != 0.0), "preset '{}' is silent", preset.name);
    }
}

#[test]
fn test_same_preset_renders_identically() {
    let params = get_factory_preset("worn_vhs").unwrap().to_params().unwrap();
    assert_eq!(render(&params, 9600), render(&params, 9600));
}

#[test]
fn test_hand_edited_file_with_bad_values() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("bad.toml");
    std::fs::write(
        &path,
        "name = \"Bad\"\n\n[params]\nmix = 250.0\nwarble = 1.0\n",
    )
    .unwrap();

    let preset = Preset::load(&path).unwrap();
    assert!(preset.validate().is_err());
    assert!(matches!(
        preset.to_params(),
        Err(ConfigError::UnknownParameter(_))
    ));
}
