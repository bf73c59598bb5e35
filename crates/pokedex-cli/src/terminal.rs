//! Terminal styling and color utilities.
//!
//! ANSI escape code definitions, per-type badge colors and color detection
//! for text output.

use std::io::IsTerminal;

use pokedex_lib::{MatchupTier, TypeName};

/// ANSI escape codes for text styling and colors.
pub mod colors {
    /// Reset all styling.
    pub const RESET: &str = "\x1b[0m";
    /// Bold, used for creature names and headings.
    pub const BOLD: &str = "\x1b[1m";
    /// Gray for secondary elements (factor labels, separators).
    pub const GRAY: &str = "\x1b[90m";
    /// Bold red for x4 weaknesses.
    pub const RED_BOLD: &str = "\x1b[1;31m";
    /// Orange (256-color) for x2 weaknesses.
    pub const ORANGE: &str = "\x1b[38;5;208m";
    /// Green for x0.5 resistances.
    pub const GREEN: &str = "\x1b[32m";
    /// Cyan for x0.25 resistances.
    pub const CYAN: &str = "\x1b[36m";
    /// Blue for immunities.
    pub const BLUE: &str = "\x1b[34m";
}

/// A collection of resolved color codes, either actual ANSI sequences
/// or empty strings when color is disabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorPalette {
    pub reset: &'static str,
    pub bold: &'static str,
    pub gray: &'static str,
    pub red_bold: &'static str,
    pub orange: &'static str,
    pub green: &'static str,
    pub cyan: &'static str,
    pub blue: &'static str,
    enabled: bool,
}

impl ColorPalette {
    /// Create a palette with actual ANSI color codes.
    #[must_use]
    pub const fn colored() -> Self {
        Self {
            reset: colors::RESET,
            bold: colors::BOLD,
            gray: colors::GRAY,
            red_bold: colors::RED_BOLD,
            orange: colors::ORANGE,
            green: colors::GREEN,
            cyan: colors::CYAN,
            blue: colors::BLUE,
            enabled: true,
        }
    }

    /// Create a palette with no colors (empty strings).
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            reset: "",
            bold: "",
            gray: "",
            red_bold: "",
            orange: "",
            green: "",
            cyan: "",
            blue: "",
            enabled: false,
        }
    }

    /// Colored when stdout is a terminal that accepts ANSI codes.
    #[must_use]
    pub fn detect() -> Self {
        Self::for_output(supports_color(), std::io::stdout().is_terminal())
    }

    /// Palette for an output stream with the given capabilities.
    #[must_use]
    pub const fn for_output(color_allowed: bool, is_terminal: bool) -> Self {
        if color_allowed && is_terminal {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    #[must_use]
    pub fn is_colored(&self) -> bool {
        self.enabled
    }

    /// Color used for the label of a matchup tier.
    #[must_use]
    pub fn tier(&self, tier: MatchupTier) -> &'static str {
        match tier {
            MatchupTier::SuperWeak => self.red_bold,
            MatchupTier::Weak => self.orange,
            MatchupTier::Normal => "",
            MatchupTier::Resistant => self.green,
            MatchupTier::SuperResistant => self.cyan,
            MatchupTier::Immune => self.blue,
        }
    }

    /// Type name wrapped in its badge color.
    #[must_use]
    pub fn type_name(&self, ty: TypeName) -> String {
        if self.enabled {
            format!("{}{}{}", type_color(ty), ty.as_str(), self.reset)
        } else {
            ty.as_str().to_string()
        }
    }
}

impl Default for ColorPalette {
    fn default() -> Self {
        Self::detect()
    }
}

/// 24-bit foreground color of a type badge.
#[must_use]
pub fn type_color(ty: TypeName) -> &'static str {
    match ty {
        TypeName::Normal => "\x1b[38;2;168;167;122m",
        TypeName::Fire => "\x1b[38;2;251;108;108m",
        TypeName::Water => "\x1b[38;2;118;189;254m",
        TypeName::Electric => "\x1b[38;2;255;216;111m",
        TypeName::Grass => "\x1b[38;2;72;208;176m",
        TypeName::Ice => "\x1b[38;2;152;216;216m",
        TypeName::Fighting => "\x1b[38;2;194;46;40m",
        TypeName::Poison => "\x1b[38;2;160;64;160m",
        TypeName::Ground => "\x1b[38;2;226;191;101m",
        TypeName::Flying => "\x1b[38;2;169;143;243m",
        TypeName::Psychic => "\x1b[38;2;249;85;135m",
        TypeName::Bug => "\x1b[38;2;166;185;26m",
        TypeName::Rock => "\x1b[38;2;182;161;54m",
        TypeName::Ghost => "\x1b[38;2;115;87;151m",
        TypeName::Dragon => "\x1b[38;2;111;53;252m",
        TypeName::Steel => "\x1b[38;2;183;183;206m",
        TypeName::Dark => "\x1b[38;2;112;87;70m",
        TypeName::Fairy => "\x1b[38;2;214;133;173m",
    }
}

/// Whether ANSI colors are allowed by the environment.
///
/// Disabled by `NO_COLOR` (https://no-color.org/) or `TERM=dumb`.
#[must_use]
pub fn supports_color() -> bool {
    color_allowed(
        std::env::var_os("NO_COLOR").is_some(),
        std::env::var("TERM").ok().as_deref(),
    )
}

fn color_allowed(no_color: bool, term: Option<&str>) -> bool {
    !no_color && !term.is_some_and(|term| term.eq_ignore_ascii_case("dumb"))
}
