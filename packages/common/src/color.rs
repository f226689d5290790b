use std::fmt::Write;

use serde::Serialize;
use thiserror::Error;

use crate::theme::DesignConfig;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("Invalid hex color: {0}")]
    InvalidHex(String),

    #[error("Invalid hex color for {field}: {value}")]
    InvalidField { field: String, value: String },
}

/// An 8-bit RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ColorError> {
        let digits = hex.trim_start_matches('#');
        let invalid = || ColorError::InvalidHex(hex.to_string());

        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
        match digits.len() {
            3 => {
                let expand = |i: usize| {
                    let c = &digits[i..i + 1];
                    channel(&format!("{c}{c}"))
                };
                Ok(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            6 => Ok(Self::new(
                channel(&digits[0..2])?,
                channel(&digits[2..4])?,
                channel(&digits[4..6])?,
            )),
            _ => Err(invalid()),
        }
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Scale each channel towards black. `factor` is clamped to `0.0..=1.0`.
    pub fn darken(self, factor: f64) -> Self {
        let keep = 1.0 - factor.clamp(0.0, 1.0);
        let scale = |c: u8| (f64::from(c) * keep) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// Move each channel towards white. `factor` is clamped to `0.0..=1.0`.
    pub fn lighten(self, factor: f64) -> Self {
        let factor = factor.clamp(0.0, 1.0);
        let scale = |c: u8| (f64::from(c) + (255.0 - f64::from(c)) * factor) as u8;
        Self::new(scale(self.r), scale(self.g), scale(self.b))
    }

    /// The opposite color on the RGB wheel.
    pub fn complement(self) -> Self {
        Self::new(255 - self.r, 255 - self.g, 255 - self.b)
    }
}

/// Strict form check: `#` followed by exactly 3 or 6 hex digits.
pub fn validate_hex_color(color: &str) -> Result<(), ColorError> {
    if !color.starts_with('#') {
        return Err(ColorError::InvalidHex(color.to_string()));
    }
    Rgb::from_hex(color).map(|_| ())
}

pub fn darken_color(hex: &str, factor: f64) -> Result<String, ColorError> {
    Ok(Rgb::from_hex(hex)?.darken(factor).to_hex())
}

pub fn lighten_color(hex: &str, factor: f64) -> Result<String, ColorError> {
    Ok(Rgb::from_hex(hex)?.lighten(factor).to_hex())
}

/// Colors derived from a single primary color.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, utoipa::ToSchema)]
pub struct ColorPalette {
    pub primary: String,
    #[serde(rename = "primary-light")]
    pub primary_light: String,
    #[serde(rename = "primary-dark")]
    pub primary_dark: String,
    pub complementary: String,
}

pub const PALETTE_SHADE_FACTOR: f64 = 0.3;

pub fn generate_color_palette(primary: &str) -> Result<ColorPalette, ColorError> {
    let rgb = Rgb::from_hex(primary)?;
    Ok(ColorPalette {
        primary: primary.to_string(),
        primary_light: rgb.lighten(PALETTE_SHADE_FACTOR).to_hex(),
        primary_dark: rgb.darken(PALETTE_SHADE_FACTOR).to_hex(),
        complementary: rgb.complement().to_hex(),
    })
}

/// Render a design configuration as CSS custom properties on `:root`, followed
/// by a `prefers-color-scheme: dark` block that swaps in the dark-mode colors.
pub fn generate_css_variables(config: &DesignConfig) -> String {
    let mut css = String::from(":root {\n");

    for (key, value) in config.colors.entries() {
        let _ = writeln!(css, "  --color-{key}: {value};");
    }
    for (key, value) in config.dark_mode.entries() {
        let _ = writeln!(css, "  --dark-{key}: {value};");
    }

    let typography = &config.typography;
    let _ = writeln!(css, "  --typography-font-family: {};", typography.font_family);
    let _ = writeln!(css, "  --typography-heading-font: {};", typography.heading_font);
    let _ = writeln!(css, "  --typography-base-size: {};", typography.base_size);
    let _ = writeln!(css, "  --typography-scale-ratio: {};", typography.scale_ratio);

    let _ = writeln!(css, "  --spacing-base-unit: {};", config.spacing.base_unit);
    let _ = writeln!(css, "  --spacing-scale-ratio: {};", config.spacing.scale_ratio);

    let radius = &config.border_radius;
    let _ = writeln!(css, "  --radius-small: {};", radius.small);
    let _ = writeln!(css, "  --radius-medium: {};", radius.medium);
    let _ = writeln!(css, "  --radius-large: {};", radius.large);
    let _ = writeln!(css, "  --radius-round: {};", radius.round);
    css.push_str("}\n");

    let dark = &config.dark_mode;
    css.push_str("\n@media (prefers-color-scheme: dark) {\n  :root {\n");
    let _ = writeln!(css, "    --color-background: {};", dark.background);
    let _ = writeln!(css, "    --color-text: {};", dark.text);
    let _ = writeln!(css, "    --color-primary: {};", dark.primary);
    css.push_str("  }\n}\n");

    css
}
