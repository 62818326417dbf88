//! Cake shapes and their size vocabularies
//!
//! Every shape owns a fixed, ordered list of selectable sizes, largest first.
//! Round, square and heart cakes are measured by a single dimension in
//! centimetres; rectangles use a width×height pair or a free-form custom size.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::ValidationError;

/// Shape of the whole cake (all tiers share it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    Round,
    Rectangle,
    Square,
    Heart,
}

impl Shape {
    /// All shapes in the order the form offers them
    pub const ALL: [Shape; 4] = [Shape::Round, Shape::Rectangle, Shape::Square, Shape::Heart];

    /// Display label in the form's locale
    pub fn label(&self) -> &'static str {
        match self {
            Shape::Round => "Kulatý",
            Shape::Rectangle => "Obdélník",
            Shape::Square => "Čtverec",
            Shape::Heart => "Srdíčko",
        }
    }

    /// Whether stacked tiers must shrink strictly from bottom to top
    ///
    /// Rectangles are free-form: any combination of sizes is accepted.
    pub fn is_monotonic(&self) -> bool {
        !matches!(self, Shape::Rectangle)
    }

    /// The ordered size vocabulary for this shape
    pub fn sizes(&self) -> &'static [SizeToken] {
        sizes_for(*self)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Shape {
    type Err = ValidationError;

    /// Accepts the locale label or the English variant name (as returned by
    /// the image-analysis collaborator), case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        Shape::ALL
            .into_iter()
            .find(|shape| {
                shape.label().eq_ignore_ascii_case(needle)
                    || format!("{:?}", shape).eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| ValidationError::UnknownOption {
                field: "shape".to_string(),
                value: s.to_string(),
            })
    }
}

/// One selectable size of a single tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SizeToken {
    /// Diameter (or edge length) in centimetres
    Diameter { cm: u16 },

    /// Rectangle sheet, width × height in centimetres
    Dimensions { width: u16, height: u16 },

    /// Rectangle of a size described in the custom-dimension note
    Custom,
}

/// Label of the custom rectangle size
pub const CUSTOM_SIZE_LABEL: &str = "Jiné";

impl SizeToken {
    pub const fn diameter(cm: u16) -> Self {
        SizeToken::Diameter { cm }
    }

    pub const fn dimensions(width: u16, height: u16) -> Self {
        SizeToken::Dimensions { width, height }
    }

    /// Numeric size used for the tier ordering rule
    ///
    /// Only diameters are comparable. Rectangle sizes return `None` and are
    /// never subject to the ordering rule.
    pub fn numeric(&self) -> Option<u16> {
        match self {
            SizeToken::Diameter { cm } => Some(*cm),
            SizeToken::Dimensions { .. } | SizeToken::Custom => None,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, SizeToken::Custom)
    }
}

impl fmt::Display for SizeToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeToken::Diameter { cm } => write!(f, "{}", cm),
            SizeToken::Dimensions { width, height } => write!(f, "{}x{}", width, height),
            SizeToken::Custom => f.write_str(CUSTOM_SIZE_LABEL),
        }
    }
}

impl FromStr for SizeToken {
    type Err = ValidationError;

    /// Parses `"24"`, `"60x40"` or the custom label (`"Jiné"` / `"Other"`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let invalid = || ValidationError::UnknownOption {
            field: "size".to_string(),
            value: s.to_string(),
        };

        if token.eq_ignore_ascii_case("other") || token == CUSTOM_SIZE_LABEL {
            return Ok(SizeToken::Custom);
        }

        if let Some((width, height)) = token.split_once(['x', 'X', '×']) {
            let width = width.trim().parse().map_err(|_| invalid())?;
            let height = height.trim().parse().map_err(|_| invalid())?;
            return Ok(SizeToken::dimensions(width, height));
        }

        token.parse().map(SizeToken::diameter).map_err(|_| invalid())
    }
}

const ROUND_SIZES: [SizeToken; 6] = [
    SizeToken::diameter(26),
    SizeToken::diameter(24),
    SizeToken::diameter(22),
    SizeToken::diameter(18),
    SizeToken::diameter(16),
    SizeToken::diameter(14),
];

const SQUARE_SIZES: [SizeToken; 4] = [
    SizeToken::diameter(28),
    SizeToken::diameter(24),
    SizeToken::diameter(20),
    SizeToken::diameter(16),
];

const HEART_SIZES: [SizeToken; 3] = [
    SizeToken::diameter(24),
    SizeToken::diameter(18),
    SizeToken::diameter(16),
];

const RECTANGLE_SIZES: [SizeToken; 3] = [
    SizeToken::dimensions(60, 40),
    SizeToken::dimensions(40, 30),
    SizeToken::Custom,
];

/// Ordered catalog of valid sizes for `shape`, largest first, no duplicates
pub fn sizes_for(shape: Shape) -> &'static [SizeToken] {
    match shape {
        Shape::Round => &ROUND_SIZES,
        Shape::Square => &SQUARE_SIZES,
        Shape::Heart => &HEART_SIZES,
        Shape::Rectangle => &RECTANGLE_SIZES,
    }
}

/// Sizes the engine may pick on its own when filling in tiers
///
/// The custom rectangle size needs a note from the customer, so it is only
/// ever chosen explicitly.
pub(crate) fn auto_sizes_for(shape: Shape) -> Vec<SizeToken> {
    sizes_for(shape)
        .iter()
        .copied()
        .filter(|token| !token.is_custom())
        .collect()
}
