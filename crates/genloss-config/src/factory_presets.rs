//! Presets compiled into the library.
//!
//! Each entry is TOML text embedded at build time, parsed on demand.

use crate::Preset;

/// Identifiers of the factory presets, in listing order.
pub const FACTORY_PRESET_NAMES: &[&str] =
    &["clean", "cassette", "worn_vhs", "broken_deck", "mains_hum_50"];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("clean", CLEAN_PRESET),
    ("cassette", CASSETTE_PRESET),
    ("worn_vhs", WORN_VHS_PRESET),
    ("broken_deck", BROKEN_DECK_PRESET),
    ("mains_hum_50", MAINS_HUM_50_PRESET),
];

/// Reference path with every degradation at its floor.
const CLEAN_PRESET: &str = r#"
name = "Clean"
description = "Transport only: no wobble, dropouts or coloration"

[params]
wow_depth = 0.0
flutter_depth = 0.0
dropout_rate = 0.0
saturation = 0.0
noise = -90.0
hum = -90.0
model_lp = 20.0
model_hs = 0.0
tilt = 0.0
spread = 0.0
"#;

const CASSETTE_PRESET: &str = r#"
name = "Cassette"
description = "Consumer deck with a tired capstan and Type I tape"

[params]
wow_rate = 0.8
wow_depth = 0.35
flutter_rate = 11.0
flutter_depth = 0.2
dropout_rate = 2.0
dropout_depth = 0.4
saturation = 35.0
noise = -52.0
hum = -80.0
model_lp = 11.0
model_hs = -2.0
tilt = 1.0
"#;

const WORN_VHS_PRESET: &str = r#"
name = "Worn VHS"
description = "Linear audio track from a much-rented tape"

[params]
wow_rate = 0.4
wow_depth = 0.55
flutter_rate = 18.0
flutter_depth = 0.3
dropout_rate = 8.0
dropout_depth = 0.7
dropout_time = 80.0
saturation = 45.0
noise = -44.0
hum = -62.0
model_lp = 6.5
model_hs = -6.0
tilt = -3.0
spread = 30.0
"#;

const BROKEN_DECK_PRESET: &str = r#"
name = "Broken Deck"
description = "Heavy wow and constant dropouts"

[params]
wow_rate = 2.5
wow_depth = 1.0
flutter_rate = 24.0
flutter_depth = 0.6
dropout_rate = 24.0
dropout_depth = 0.95
dropout_time = 150.0
saturation = 70.0
noise = -40.0
hum = -55.0
model_lp = 4.0
model_hs = -9.0
tilt = -4.0
spread = 80.0
output = -3.0
"#;

const MAINS_HUM_50_PRESET: &str = r#"
name = "Mains Hum 50"
description = "Ground loop on a European bench supply"

[params]
wow_depth = 0.1
flutter_depth = 0.05
noise = -70.0
hum = -36.0
hum_50hz = 1.0
"#;

/// All factory presets, parsed.
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Looks up a factory preset by identifier or display name,
/// case-insensitively.
///
/// ```rust
/// use genloss_config::get_factory_preset;
///
/// assert!(get_factory_preset("worn_vhs").is_some());
/// assert!(get_factory_preset("Worn VHS").is_some());
/// assert!(get_factory_preset("reel").is_none());
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let wanted = name.trim().to_lowercase();

    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(id, toml)| Some((*id, Preset::from_toml(toml).ok()?)))
        .find(|(id, preset)| *id == wanted || preset.name.to_lowercase() == wanted)
        .map(|(_, preset)| preset)
}

/// True if `name` matches a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}
