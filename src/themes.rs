use serde::Deserialize;
use std::fs;
use std::path::Path;

/// A dynamically discovered image-theme choice, merged into select fields
/// that opt in via `include_dynamic_options = "image-themes"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ThemeOption {
    pub value: String,
    pub label: String,
}

/// Built-in image themes shipped with the editor, keyed by theme value.
static BUILTIN_THEMES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "pixel-art" => "Pixel Art",
    "oil-painting" => "Oil Painting",
    "watercolor" => "Watercolor",
    "ink-sketch" => "Ink Sketch",
    "isometric" => "Isometric",
    "low-poly" => "Low Poly",
    "photoreal" => "Photorealistic",
    "storybook" => "Storybook",
};

/// The built-in catalog, in stable (sorted-by-value) order.
pub fn builtin_themes() -> Vec<ThemeOption> {
    let mut entries: Vec<_> = BUILTIN_THEMES.entries().collect();
    entries.sort_by_key(|(value, _)| *value);
    entries
        .into_iter()
        .map(|(value, label)| ThemeOption {
            value: value.to_string(),
            label: label.to_string(),
        })
        .collect()
}

/// Load additional themes from a JSON file, appended after the built-ins.
pub fn load(path: &Path) -> anyhow::Result<Vec<ThemeOption>> {
    let content = fs::read_to_string(path)?;
    let extra: Vec<ThemeOption> = serde_json::from_str(&content)?;
    let mut themes = builtin_themes();
    themes.extend(extra);
    Ok(themes)
}
