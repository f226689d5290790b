use serde::{Deserialize, Serialize};

use crate::color::{ColorError, validate_hex_color};

/// Named brand colors of a theme. Every value is a `#RGB` or `#RRGGBB` hex code.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ColorScheme {
    #[schema(example = "#8B5CF6")]
    pub primary: String,
    #[schema(example = "#D946EF")]
    pub secondary: String,
    #[schema(example = "#F97316")]
    pub accent: String,
    #[schema(example = "#FFFFFF")]
    pub background: String,
    #[schema(example = "#222222")]
    pub text: String,
    #[schema(example = "#EA384C")]
    pub error: String,
    #[schema(example = "#10B981")]
    pub success: String,
    #[schema(example = "#F59E0B")]
    pub warning: String,
    #[schema(example = "#0EA5E9")]
    pub info: String,
}

impl ColorScheme {
    /// Field name / value pairs in declaration order.
    pub fn entries(&self) -> [(&'static str, &str); 9] {
        [
            ("primary", &self.primary),
            ("secondary", &self.secondary),
            ("accent", &self.accent),
            ("background", &self.background),
            ("text", &self.text),
            ("error", &self.error),
            ("success", &self.success),
            ("warning", &self.warning),
            ("info", &self.info),
        ]
    }

    pub fn validate(&self) -> Result<(), ColorError> {
        validate_entries("colors", &self.entries())
    }
}

/// Overrides applied when the client prefers a dark color scheme.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DarkModeColors {
    #[schema(example = "#1A1F2C")]
    pub background: String,
    #[schema(example = "#FFFFFF")]
    pub text: String,
    #[schema(example = "#9B87F5")]
    pub primary: String,
}

impl DarkModeColors {
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            ("background", &self.background),
            ("text", &self.text),
            ("primary", &self.primary),
        ]
    }

    pub fn validate(&self) -> Result<(), ColorError> {
        validate_entries("dark_mode", &self.entries())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Typography {
    #[schema(example = "Inter, sans-serif")]
    pub font_family: String,
    #[schema(example = "Inter, sans-serif")]
    pub heading_font: String,
    #[schema(example = "16px")]
    pub base_size: String,
    #[schema(example = 1.25)]
    pub scale_ratio: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Spacing {
    #[schema(example = "4px")]
    pub base_unit: String,
    #[schema(example = 2)]
    pub scale_ratio: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct BorderRadius {
    #[schema(example = "4px")]
    pub small: String,
    #[schema(example = "8px")]
    pub medium: String,
    #[schema(example = "16px")]
    pub large: String,
    #[schema(example = "50%")]
    pub round: String,
}

/// The full configuration document of a design system.
///
/// Stored as a single JSON column. When the `sea-orm` feature is enabled this
/// type can be used directly as an entity field.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
#[cfg_attr(feature = "sea-orm", derive(sea_orm::FromJsonQueryResult))]
pub struct DesignConfig {
    pub colors: ColorScheme,
    pub dark_mode: DarkModeColors,
    pub typography: Typography,
    pub spacing: Spacing,
    pub border_radius: BorderRadius,
}

/// Section-level update of a [`DesignConfig`].
///
/// A present section replaces the stored one wholesale; sections are never
/// merged field by field.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct DesignConfigPatch {
    pub colors: Option<ColorScheme>,
    pub dark_mode: Option<DarkModeColors>,
    pub typography: Option<Typography>,
    pub spacing: Option<Spacing>,
    pub border_radius: Option<BorderRadius>,
}

impl DesignConfigPatch {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(&self) -> Result<(), ColorError> {
        if let Some(ref colors) = self.colors {
            colors.validate()?;
        }
        if let Some(ref dark_mode) = self.dark_mode {
            dark_mode.validate()?;
        }
        Ok(())
    }
}

impl DesignConfig {
    pub fn validate(&self) -> Result<(), ColorError> {
        self.colors.validate()?;
        self.dark_mode.validate()
    }

    /// Replace every section present in `patch`.
    pub fn apply(&mut self, patch: DesignConfigPatch) {
        if let Some(colors) = patch.colors {
            self.colors = colors;
        }
        if let Some(dark_mode) = patch.dark_mode {
            self.dark_mode = dark_mode;
        }
        if let Some(typography) = patch.typography {
            self.typography = typography;
        }
        if let Some(spacing) = patch.spacing {
            self.spacing = spacing;
        }
        if let Some(border_radius) = patch.border_radius {
            self.border_radius = border_radius;
        }
    }
}

/// The built-in theme served when no design system is active.
impl Default for DesignConfig {
    fn default() -> Self {
        Self {
            colors: ColorScheme {
                primary: "#8B5CF6".into(),
                secondary: "#D946EF".into(),
                accent: "#F97316".into(),
                background: "#FFFFFF".into(),
                text: "#222222".into(),
                error: "#EA384C".into(),
                success: "#10B981".into(),
                warning: "#F59E0B".into(),
                info: "#0EA5E9".into(),
            },
            dark_mode: DarkModeColors {
                background: "#1A1F2C".into(),
                text: "#FFFFFF".into(),
                primary: "#9B87F5".into(),
            },
            typography: Typography {
                font_family: "Inter, sans-serif".into(),
                heading_font: "Inter, sans-serif".into(),
                base_size: "16px".into(),
                scale_ratio: 1.25,
            },
            spacing: Spacing {
                base_unit: "4px".into(),
                scale_ratio: 2.0,
            },
            border_radius: BorderRadius {
                small: "4px".into(),
                medium: "8px".into(),
                large: "16px".into(),
                round: "50%".into(),
            },
        }
    }
}

fn validate_entries(section: &str, entries: &[(&'static str, &str)]) -> Result<(), ColorError> {
    for (field, value) in entries {
        validate_hex_color(value).map_err(|_| ColorError::InvalidField {
            field: format!("{section}.{field}"),
            value: value.to_string(),
        })?;
    }
    Ok(())
}
