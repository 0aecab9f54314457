//! Global button defaults.
//!
//! [`ButtonSettings`] holds every value a button falls back to when it has no
//! explicit override. Resolution always receives settings as a parameter; the
//! process-wide registry below exists so host setup code has one place to
//! install its design-system values before the first button is built.
//!
//! ```
//! use buttonkit_style::settings::{self, ButtonSettings};
//!
//! let custom = ButtonSettings::from_toml_str(r##"
//! default_color = "#007AFF"
//! regular_height = 44.0
//! small_height = 30.0
//! "##).unwrap();
//! assert_eq!(custom.regular_height, 44.0);
//! assert_eq!(custom.small_corner_radius, 3.0);
//! # let _ = settings::global();
//! ```

use std::path::Path;
use std::sync::{Arc, OnceLock};

use buttonkit_core::logging::targets;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{Error, Result};
use crate::font::FontSpec;
use crate::geometry::Size;

/// Defaults shared by every button.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ButtonSettings {
    /// Fill color of filled buttons, and text/border color of border and
    /// plain buttons, when the button has no color of its own.
    pub default_color: Color,
    /// Text color of filled buttons when the button has no text color.
    pub default_text_color: Option<Color>,
    /// Accent color of destructive buttons.
    pub destructive_color: Color,
    /// Text color on top of the destructive accent.
    pub destructive_text_color: Color,

    pub regular_font: FontSpec,
    pub small_font: FontSpec,
    /// Detail font for regular buttons with the right-aligned detail layout.
    pub regular_detail_font: FontSpec,
    /// Detail font for small buttons with the right-aligned detail layout.
    pub small_detail_font: FontSpec,
    /// Detail font for regular buttons with the centered detail layout.
    pub regular_centered_detail_font: FontSpec,
    /// Detail font for small buttons with the centered detail layout.
    pub small_centered_detail_font: FontSpec,

    /// Icon size used when a button does not specify one.
    pub default_icon_size: Size,

    pub regular_corner_radius: f32,
    pub small_corner_radius: f32,
    /// Left/right padding for labels and icons.
    pub default_edge_padding: f32,
    /// Border thickness of border-styled buttons.
    pub default_border_width: f32,

    pub regular_height: f32,
    pub small_height: f32,

    /// Derive border/plain text from the backdrop's contrast color instead of
    /// the default color when nothing more specific is set.
    pub contrast_against_backdrop: bool,
}

impl Default for ButtonSettings {
    fn default() -> Self {
        Self {
            default_color: Color::from_rgb8(0x29, 0x34, 0x40),
            default_text_color: None,
            destructive_color: Color::from_rgb8(0xFB, 0x00, 0x02),
            destructive_text_color: Color::WHITE,

            regular_font: FontSpec::bold(18.0),
            small_font: FontSpec::bold(16.0),
            regular_detail_font: FontSpec::bold(16.0),
            small_detail_font: FontSpec::bold(14.0),
            regular_centered_detail_font: FontSpec::bold(12.0),
            small_centered_detail_font: FontSpec::bold(10.0),

            default_icon_size: Size::new(30.0, 30.0),

            regular_corner_radius: 5.0,
            small_corner_radius: 3.0,
            default_edge_padding: 20.0,
            default_border_width: 2.0,

            regular_height: 50.0,
            small_height: 40.0,

            contrast_against_backdrop: false,
        }
    }
}

impl ButtonSettings {
    /// Parse settings from TOML. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let settings: Self = toml::from_str(source)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let settings = Self::from_toml_str(&source)?;
        tracing::debug!(
            target: targets::SETTINGS,
            path = %path.display(),
            "loaded settings"
        );
        Ok(settings)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject values no button could be laid out with.
    pub fn validate(&self) -> Result<()> {
        let non_negative = [
            ("regular_corner_radius", self.regular_corner_radius),
            ("small_corner_radius", self.small_corner_radius),
            ("default_edge_padding", self.default_edge_padding),
            ("default_border_width", self.default_border_width),
            ("regular_height", self.regular_height),
            ("small_height", self.small_height),
            ("default_icon_size.width", self.default_icon_size.width),
            ("default_icon_size.height", self.default_icon_size.height),
        ];
        for (property, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::invalid_value(
                    property,
                    format!("expected a non-negative number, got {value}"),
                ));
            }
        }

        let fonts = [
            ("regular_font", self.regular_font),
            ("small_font", self.small_font),
            ("regular_detail_font", self.regular_detail_font),
            ("small_detail_font", self.small_detail_font),
            ("regular_centered_detail_font", self.regular_centered_detail_font),
            ("small_centered_detail_font", self.small_centered_detail_font),
        ];
        for (property, font) in fonts {
            if !(font.size > 0.0) {
                return Err(Error::invalid_value(
                    property,
                    format!("font size must be positive, got {}", font.size),
                ));
            }
        }
        Ok(())
    }
}

static GLOBAL: OnceLock<RwLock<Arc<ButtonSettings>>> = OnceLock::new();

fn registry() -> &'static RwLock<Arc<ButtonSettings>> {
    GLOBAL.get_or_init(|| RwLock::new(Arc::new(ButtonSettings::default())))
}

/// Snapshot of the process-wide settings.
///
/// The snapshot does not change if the global settings are replaced later.
pub fn global() -> Arc<ButtonSettings> {
    registry().read().clone()
}

/// Replace the process-wide settings.
///
/// Intended for application setup, before buttons are created.
pub fn set_global(settings: ButtonSettings) {
    *registry().write() = Arc::new(settings);
    tracing::debug!(target: targets::SETTINGS, "global settings replaced");
}

/// Edit the process-wide settings in place.
pub fn update_global(edit: impl FnOnce(&mut ButtonSettings)) {
    let mut guard = registry().write();
    let mut settings = ButtonSettings::clone(&guard);
    edit(&mut settings);
    *guard = Arc::new(settings);
    tracing::debug!(target: targets::SETTINGS, "global settings updated");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_design_system() {
        let s = ButtonSettings::default();
        assert_eq!(s.default_color.to_hex(), "#293440");
        assert_eq!(s.destructive_color.to_hex(), "#FB0002");
        assert_eq!(s.destructive_text_color, Color::WHITE);
        assert_eq!(s.regular_corner_radius, 5.0);
        assert_eq!(s.small_corner_radius, 3.0);
        assert_eq!(s.default_edge_padding, 20.0);
        assert_eq!(s.default_border_width, 2.0);
        assert_eq!(s.regular_height, 50.0);
        assert_eq!(s.small_height, 40.0);
        assert_eq!(s.default_icon_size, Size::new(30.0, 30.0));
        assert_eq!(s.small_centered_detail_font.size, 10.0);
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let s = ButtonSettings::from_toml_str(
            r##"
            default_text_color = "#FFFFFF"
            small_corner_radius = 6.0

            [regular_font]
            size = 20.0
            weight = "semibold"
            "##,
        )
        .unwrap();

        assert_eq!(s.default_text_color, Some(Color::WHITE));
        assert_eq!(s.small_corner_radius, 6.0);
        assert_eq!(s.regular_font.size, 20.0);
        assert_eq!(s.regular_corner_radius, 5.0);
    }

    #[test]
    fn rejects_negative_values() {
        let err = ButtonSettings::from_toml_str("small_height = -1.0").unwrap_err();
        assert!(
            matches!(err, Error::InvalidValue { ref property, .. } if property == "small_height")
        );
    }

    #[test]
    fn rejects_bad_colors() {
        let err = ButtonSettings::from_toml_str("default_color = \"#12\"").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn toml_roundtrip_through_file() {
        let mut original = ButtonSettings::default();
        original.regular_height = 44.0;
        original.default_text_color = Some(Color::from_rgb8(0x12, 0x34, 0x56));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(original.to_toml_string().unwrap().as_bytes())
            .unwrap();

        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .finish();
        let loaded = tracing::subscriber::with_default(subscriber, || {
            ButtonSettings::from_file(file.path()).unwrap()
        });
        assert_eq!(loaded, original);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = ButtonSettings::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }

    #[test]
    fn global_registry_snapshots() {
        let before = global();
        update_global(|s| s.small_corner_radius = 4.0);
        assert_eq!(global().small_corner_radius, 4.0);
        assert_eq!(before.small_corner_radius, 3.0);

        set_global(ButtonSettings::default());
        assert_eq!(global().small_corner_radius, 3.0);
    }
}
