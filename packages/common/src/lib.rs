pub mod color;
pub mod pagination;
pub mod theme;

pub use color::{ColorError, ColorPalette};
pub use pagination::PageWindow;
pub use theme::{
    BorderRadius, ColorScheme, DarkModeColors, DesignConfig, DesignConfigPatch, Spacing,
    Typography,
};
