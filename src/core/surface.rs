//! Surface finishes and their required attributes
//!
//! Each finish has a fixed list of attributes the customer must fill in
//! before leaving the flavor/surface step. The list is table-driven and
//! ordered: validation reports the first attribute that is still missing.
//!
//! [`describe`] renders the finish into the single line used both by the
//! on-screen summary and the outbound message.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::error::ValidationError;
use crate::core::image::ReferenceImage;

/// Placeholder for an attribute that was never filled in
pub const NOT_SPECIFIED: &str = "Neuvedeno";

/// Exterior treatment of the cake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceFinish {
    #[default]
    Cream,
    CreamWithDrip,
    Marzipan,
    ChocoShavings,
    EdiblePrint,
    Other,
}

impl SurfaceFinish {
    pub const ALL: [SurfaceFinish; 6] = [
        SurfaceFinish::Cream,
        SurfaceFinish::CreamWithDrip,
        SurfaceFinish::Marzipan,
        SurfaceFinish::ChocoShavings,
        SurfaceFinish::EdiblePrint,
        SurfaceFinish::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            SurfaceFinish::Cream => "Krémový",
            SurfaceFinish::CreamWithDrip => "Krémový a stékaná čokoláda",
            SurfaceFinish::Marzipan => "Marcipánový",
            SurfaceFinish::ChocoShavings => "Čoko-hobliny",
            SurfaceFinish::EdiblePrint => "Jedlý tisk",
            SurfaceFinish::Other => "Jiné",
        }
    }

    /// Required attributes, in the order they are checked
    pub fn required_fields(&self) -> &'static [SurfaceField] {
        match self {
            SurfaceFinish::Cream => &[SurfaceField::CreamColor],
            SurfaceFinish::CreamWithDrip => &[SurfaceField::CreamColor, SurfaceField::DripStyle],
            SurfaceFinish::Marzipan => &[SurfaceField::MarzipanColor],
            SurfaceFinish::ChocoShavings => &[SurfaceField::ShavingsColor],
            SurfaceFinish::EdiblePrint => &[SurfaceField::PrintImage],
            SurfaceFinish::Other => &[SurfaceField::Note],
        }
    }
}

impl fmt::Display for SurfaceFinish {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A conditional attribute of a surface finish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceField {
    CreamColor,
    MarzipanColor,
    DripStyle,
    ShavingsColor,
    PrintImage,
    Note,
}

impl SurfaceField {
    /// Prompt shown when the attribute is missing
    pub fn prompt(&self) -> &'static str {
        match self {
            SurfaceField::CreamColor => "Vyberte prosím barvu krému.",
            SurfaceField::MarzipanColor => "Vyberte prosím barvu marcipánu.",
            SurfaceField::DripStyle => "Vyberte prosím druh stékání.",
            SurfaceField::ShavingsColor => "Vyberte prosím barvu hoblin.",
            SurfaceField::PrintImage => "Pro pokračování musíte nahrát obrázek pro tisk.",
            SurfaceField::Note => "Popište prosím požadovaný povrch.",
        }
    }
}

/// Named color of the cream or marzipan palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaletteColor {
    White,
    Grey,
    Black,
    Pink,
    Red,
    Brown,
    Orange,
    Blue,
    Purple,
    Green,
    Yellow,
}

impl PaletteColor {
    pub const ALL: [PaletteColor; 11] = [
        PaletteColor::White,
        PaletteColor::Grey,
        PaletteColor::Black,
        PaletteColor::Pink,
        PaletteColor::Red,
        PaletteColor::Brown,
        PaletteColor::Orange,
        PaletteColor::Blue,
        PaletteColor::Purple,
        PaletteColor::Green,
        PaletteColor::Yellow,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaletteColor::White => "Bílá",
            PaletteColor::Grey => "Šedá",
            PaletteColor::Black => "Černá",
            PaletteColor::Pink => "Růžová",
            PaletteColor::Red => "Červená",
            PaletteColor::Brown => "Hnědá",
            PaletteColor::Orange => "Oranžová",
            PaletteColor::Blue => "Modrá",
            PaletteColor::Purple => "Fialová",
            PaletteColor::Green => "Zelená",
            PaletteColor::Yellow => "Žlutá",
        }
    }

    pub fn hex(&self) -> &'static str {
        match self {
            PaletteColor::White => "#FFFFFF",
            PaletteColor::Grey => "#9CA3AF",
            PaletteColor::Black => "#000000",
            PaletteColor::Pink => "#F472B6",
            PaletteColor::Red => "#EF4444",
            PaletteColor::Brown => "#854d0e",
            PaletteColor::Orange => "#F97316",
            PaletteColor::Blue => "#3B82F6",
            PaletteColor::Purple => "#A855F7",
            PaletteColor::Green => "#22C55E",
            PaletteColor::Yellow => "#EAB308",
        }
    }

    /// Palette entry with exactly this hex value, ignoring case
    pub fn from_hex(hex: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.hex().eq_ignore_ascii_case(hex.trim()))
    }
}

impl FromStr for PaletteColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s.trim())
            .ok_or_else(|| ValidationError::UnknownOption {
                field: "color".to_string(),
                value: s.to_string(),
            })
    }
}

/// Chocolate dripping down the sides of a cream cake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DripStyle {
    DarkChocolate,
    WhiteChocolate,
}

impl DripStyle {
    pub const ALL: [DripStyle; 2] = [DripStyle::DarkChocolate, DripStyle::WhiteChocolate];

    pub fn label(&self) -> &'static str {
        match self {
            DripStyle::DarkChocolate => "Tmavá čokoláda",
            DripStyle::WhiteChocolate => "Bílá čokoláda",
        }
    }
}

impl FromStr for DripStyle {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.label() == s.trim())
            .ok_or_else(|| ValidationError::UnknownOption {
                field: "drip".to_string(),
                value: s.to_string(),
            })
    }
}

/// Color of chocolate shavings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShavingsColor {
    White,
    Brown,
    Pink,
}

impl ShavingsColor {
    pub const ALL: [ShavingsColor; 3] = [ShavingsColor::White, ShavingsColor::Brown, ShavingsColor::Pink];

    pub fn label(&self) -> &'static str {
        match self {
            ShavingsColor::White => "Bílá",
            ShavingsColor::Brown => "Hnědá",
            ShavingsColor::Pink => "Růžová",
        }
    }
}

impl FromStr for ShavingsColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s.trim())
            .ok_or_else(|| ValidationError::UnknownOption {
                field: "shavings".to_string(),
                value: s.to_string(),
            })
    }
}

/// Conditional attributes of the surface
///
/// Attributes survive a change of finish, so switching from cream to
/// cream-with-drip keeps the chosen cream color.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SurfaceAttributes {
    pub cream_color: Option<PaletteColor>,
    pub marzipan_color: Option<PaletteColor>,
    pub drip_style: Option<DripStyle>,
    pub shavings_color: Option<ShavingsColor>,
    #[serde(skip)]
    pub print_image: Option<ReferenceImage>,
    pub note: Option<String>,
}

impl SurfaceAttributes {
    /// Whether `field` holds a usable value
    ///
    /// A note made only of whitespace counts as missing.
    pub fn has(&self, field: SurfaceField) -> bool {
        match field {
            SurfaceField::CreamColor => self.cream_color.is_some(),
            SurfaceField::MarzipanColor => self.marzipan_color.is_some(),
            SurfaceField::DripStyle => self.drip_style.is_some(),
            SurfaceField::ShavingsColor => self.shavings_color.is_some(),
            SurfaceField::PrintImage => self.print_image.is_some(),
            SurfaceField::Note => self.note.as_deref().is_some_and(|n| !n.trim().is_empty()),
        }
    }
}

/// Outcome of checking a finish against its attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SurfaceVerdict {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing: Option<SurfaceField>,
}

impl SurfaceVerdict {
    /// Convert into a result for step gating
    pub fn into_result(self, surface: SurfaceFinish) -> Result<(), ValidationError> {
        match self.missing {
            Some(field) => Err(ValidationError::MissingSurfaceField { surface, field }),
            None => Ok(()),
        }
    }
}

/// Check that every required attribute of `surface` is present
pub fn validate(surface: SurfaceFinish, attributes: &SurfaceAttributes) -> SurfaceVerdict {
    let missing = surface
        .required_fields()
        .iter()
        .copied()
        .find(|field| !attributes.has(*field));

    SurfaceVerdict {
        valid: missing.is_none(),
        missing,
    }
}

/// Human-readable line for the summary and the outbound message
pub fn describe(surface: SurfaceFinish, attributes: &SurfaceAttributes) -> String {
    fn or_unset(value: Option<&str>) -> &str {
        value.unwrap_or(NOT_SPECIFIED)
    }

    let details = match surface {
        SurfaceFinish::Cream => format!(
            "Barva: {}",
            or_unset(attributes.cream_color.as_ref().map(PaletteColor::label))
        ),
        SurfaceFinish::Marzipan => format!(
            "Barva: {}",
            or_unset(attributes.marzipan_color.as_ref().map(PaletteColor::label))
        ),
        SurfaceFinish::CreamWithDrip => format!(
            "Krém: {}, Stékání: {}",
            or_unset(attributes.cream_color.as_ref().map(PaletteColor::label)),
            or_unset(attributes.drip_style.as_ref().map(DripStyle::label))
        ),
        SurfaceFinish::ChocoShavings => format!(
            "Typ: {}",
            or_unset(attributes.shavings_color.as_ref().map(ShavingsColor::label))
        ),
        SurfaceFinish::EdiblePrint => {
            "POZOR: Obrázek pro tisk zákazník zašle v odpovědi na tento email".to_string()
        }
        SurfaceFinish::Other => format!(
            "Pozn: {}",
            or_unset(attributes.note.as_deref().map(str::trim).filter(|n| !n.is_empty()))
        ),
    };

    format!("{} ({})", surface.label(), details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::image::{ImageUpload, ReferenceImage};

    #[test]
    fn test_edible_print_requires_image() {
        let verdict = validate(SurfaceFinish::EdiblePrint, &SurfaceAttributes::default());
        assert!(!verdict.valid);
        assert_eq!(verdict.missing, Some(SurfaceField::PrintImage));

        let attributes = SurfaceAttributes {
            print_image: Some(ReferenceImage::from_upload(
                ImageUpload::new("image/png", vec![1, 2, 3]),
                "blob:print".to_string(),
            )),
            ..Default::default()
        };
        let verdict = validate(SurfaceFinish::EdiblePrint, &attributes);
        assert!(verdict.valid);
        assert_eq!(verdict.missing, None);
    }

    #[test]
    fn test_drip_reports_color_before_drip_style() {
        let verdict = validate(SurfaceFinish::CreamWithDrip, &SurfaceAttributes::default());
        assert_eq!(verdict.missing, Some(SurfaceField::CreamColor));

        let attributes = SurfaceAttributes {
            cream_color: Some(PaletteColor::White),
            ..Default::default()
        };
        let verdict = validate(SurfaceFinish::CreamWithDrip, &attributes);
        assert_eq!(verdict.missing, Some(SurfaceField::DripStyle));
    }

    #[test]
    fn test_marzipan_and_cream_colors_are_separate() {
        let attributes = SurfaceAttributes {
            cream_color: Some(PaletteColor::Pink),
            ..Default::default()
        };
        assert!(validate(SurfaceFinish::Cream, &attributes).valid);
        assert_eq!(
            validate(SurfaceFinish::Marzipan, &attributes).missing,
            Some(SurfaceField::MarzipanColor)
        );
    }

    #[test]
    fn test_blank_note_is_missing() {
        let attributes = SurfaceAttributes {
            note: Some("   ".to_string()),
            ..Default::default()
        };
        assert!(!validate(SurfaceFinish::Other, &attributes).valid);
    }

    #[test]
    fn test_describe_fills_placeholders() {
        let attributes = SurfaceAttributes {
            cream_color: Some(PaletteColor::White),
            ..Default::default()
        };
        assert_eq!(
            describe(SurfaceFinish::CreamWithDrip, &attributes),
            "Krémový a stékaná čokoláda (Krém: Bílá, Stékání: Neuvedeno)"
        );
        assert_eq!(
            describe(SurfaceFinish::Cream, &attributes),
            "Krémový (Barva: Bílá)"
        );
    }

    #[test]
    fn test_describe_shavings_and_note() {
        let attributes = SurfaceAttributes {
            shavings_color: Some(ShavingsColor::Pink),
            note: Some(" zlaté perličky ".to_string()),
            ..Default::default()
        };
        assert_eq!(
            describe(SurfaceFinish::ChocoShavings, &attributes),
            "Čoko-hobliny (Typ: Růžová)"
        );
        assert_eq!(
            describe(SurfaceFinish::Other, &attributes),
            "Jiné (Pozn: zlaté perličky)"
        );
    }

    #[test]
    fn test_palette_lookup() {
        assert_eq!(PaletteColor::ALL.len(), 11);
        assert_eq!("Bílá".parse::<PaletteColor>().unwrap(), PaletteColor::White);
        assert_eq!(PaletteColor::from_hex("#854D0E"), Some(PaletteColor::Brown));
        assert!("Zlatá".parse::<PaletteColor>().is_err());
        assert_eq!("Bílá čokoláda".parse::<DripStyle>().unwrap(), DripStyle::WhiteChocolate);
    }
}
