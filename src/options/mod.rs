//! Centralized scene options with TOML support.
//!
//! Every tweakable constant of the scene (material, layout, camera, motion,
//! viewport limits, panel state) is consolidated here. Options serialize
//! to/from TOML so a scene can be re-tuned without recompiling; only the
//! material color is exposed to the debug panel through the JSON schema.

mod camera;
mod material;
mod motion;
mod panel;
mod scene;
mod viewport;

use std::path::Path;

pub use camera::CameraOptions;
pub use material::MaterialOptions;
pub use motion::MotionOptions;
pub use panel::PanelOptions;
pub use scene::SceneOptions;
pub use viewport::ViewportOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::SceneError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[material]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Shared material parameters (the panel-editable color).
    pub material: MaterialOptions,
    /// Section layout and particle cloud parameters.
    #[schemars(skip)]
    pub scene: SceneOptions,
    /// Camera projection and parallax parameters.
    #[schemars(skip)]
    pub camera: CameraOptions,
    /// Idle spin and section-trigger rotation parameters.
    #[schemars(skip)]
    pub motion: MotionOptions,
    /// Rendering surface limits.
    #[schemars(skip)]
    pub viewport: ViewportOptions,
    /// Debug panel presentation.
    #[schemars(skip)]
    pub panel: PanelOptions,
}

impl Options {
    /// Generate JSON Schema describing the panel-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::Io`] if the file cannot be read and
    /// [`SceneError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, SceneError> {
        let content = std::fs::read_to_string(path).map_err(SceneError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SceneError::OptionsParse`] on malformed TOML or values.
    pub fn from_toml(content: &str) -> Result<Self, SceneError> {
        toml::from_str(content)
            .map_err(|e| SceneError::OptionsParse(e.to_string()))
    }

    /// Apply a single `section.field = value` edit coming from the panel.
    ///
    /// Returns `None` when the section or field is unknown or the value
    /// does not deserialize into the field's type.
    #[must_use]
    pub fn with_field(
        &self,
        section: &str,
        field: &str,
        value: serde_json::Value,
    ) -> Option<Self> {
        let mut root = serde_json::to_value(self).ok()?;
        let slot = root.get_mut(section)?.get_mut(field)?;
        *slot = value;
        serde_json::from_value(root).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::color::Color;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r##"
[material]
color = "#336699"
"##;
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.material.color.to_hex(), "#336699");
        // Everything else should be default
        assert_eq!(opts.scene.section_spacing, 4.0);
        assert_eq!(opts.camera.fovy, 75.0);
        assert_eq!(opts.viewport.max_pixel_ratio, 2.0);
    }

    #[test]
    fn bad_color_is_a_parse_error() {
        let err = Options::from_toml("[material]\ncolor = \"pink\"\n")
            .unwrap_err();
        assert!(matches!(err, SceneError::OptionsParse(_)));
    }

    #[test]
    fn default_color_matches_landing_palette() {
        assert_eq!(
            Options::default().material.color,
            Color::parse_hex("#fc6d6d").unwrap()
        );
    }

    #[test]
    fn with_field_edits_one_value() {
        let opts = Options::default();
        let edited = opts
            .with_field("material", "color", serde_json::json!("#00ff00"))
            .unwrap();
        assert_eq!(edited.material.color.to_rgb8(), [0, 255, 0]);
        assert_eq!(edited.scene, opts.scene);

        assert!(opts
            .with_field("material", "color", serde_json::json!("green"))
            .is_none());
        assert!(opts
            .with_field("nope", "color", serde_json::json!("#000"))
            .is_none());
        assert!(opts
            .with_field("material", "nope", serde_json::json!(1))
            .is_none());
    }

    #[test]
    fn schema_exposes_only_material() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("material"));
        assert!(!props.contains_key("scene"));
        assert!(!props.contains_key("camera"));
        assert!(!props.contains_key("motion"));

        let material = &props["material"]["properties"];
        assert_eq!(material["color"]["format"], "color");
        assert!(material.get("gradient_map").is_none());
    }
}
