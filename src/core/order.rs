//! The order aggregate and its partial updates

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::core::contact::ContactInfo;
use crate::core::error::ValidationError;
use crate::core::flavor::{Filling, Sponge};
use crate::core::image::{ImageId, ReferenceImage};
use crate::core::shape::{Shape, SizeToken};
use crate::core::surface::{DripStyle, PaletteColor, ShavingsColor, SurfaceAttributes, SurfaceFinish};
use crate::core::tiers::{TierCount, TierSet};

/// Everything the customer has chosen so far
///
/// Shape and tier fields are only changed through the tier engine so that
/// the tier set always matches the shape; everything else goes through
/// [`OrderUpdate`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrderConfiguration {
    pub shape: Shape,
    pub tier_count: TierCount,
    pub tiers: TierSet,
    /// Free-text size for the custom rectangle size, up to 60×40 cm
    pub custom_size_note: Option<String>,
    pub filling: Filling,
    pub sponge: Sponge,
    pub surface: SurfaceFinish,
    pub surface_attributes: SurfaceAttributes,
    pub inscription: String,
    pub specifications: String,
    pub quantity: u32,
    pub pickup_date: Option<NaiveDate>,
    pub pickup_location_id: String,
    pub images: Vec<ReferenceImage>,
    pub contact: ContactInfo,
}

impl OrderConfiguration {
    /// A fresh order: one round 24 cm tier with cream surface
    pub fn new(pickup_location_id: impl Into<String>) -> Self {
        Self {
            shape: Shape::Round,
            tier_count: TierCount::ONE,
            tiers: TierSet::from_sizes(vec![SizeToken::diameter(24)]),
            custom_size_note: None,
            filling: Filling::default(),
            sponge: Sponge::default(),
            surface: SurfaceFinish::default(),
            surface_attributes: SurfaceAttributes::default(),
            inscription: String::new(),
            specifications: String::new(),
            quantity: 1,
            pickup_date: None,
            pickup_location_id: pickup_location_id.into(),
            images: Vec::new(),
            contact: ContactInfo::default(),
        }
    }

    pub fn image(&self, id: ImageId) -> Option<&ReferenceImage> {
        self.images.iter().find(|img| img.id == id)
    }
}

/// A partial update: every `Some` field replaces the current value
///
/// The pickup date is not part of it; it goes through
/// [`OrderSession::select_pickup_date`](crate::core::session::OrderSession::select_pickup_date)
/// so the calendar always sees it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderUpdate {
    pub custom_size_note: Option<String>,
    pub filling: Option<Filling>,
    pub sponge: Option<Sponge>,
    pub surface: Option<SurfaceFinish>,
    pub cream_color: Option<PaletteColor>,
    pub marzipan_color: Option<PaletteColor>,
    pub drip_style: Option<DripStyle>,
    pub shavings_color: Option<ShavingsColor>,
    pub surface_note: Option<String>,
    pub inscription: Option<String>,
    pub specifications: Option<String>,
    pub quantity: Option<u32>,
    pub pickup_location_id: Option<String>,
    pub customer_name: Option<String>,
    pub customer_phone: Option<String>,
    pub customer_email: Option<String>,
}

impl OrderUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn custom_size_note(mut self, note: impl Into<String>) -> Self {
        self.custom_size_note = Some(note.into());
        self
    }

    pub fn filling(mut self, filling: Filling) -> Self {
        self.filling = Some(filling);
        self
    }

    pub fn sponge(mut self, sponge: Sponge) -> Self {
        self.sponge = Some(sponge);
        self
    }

    pub fn surface(mut self, surface: SurfaceFinish) -> Self {
        self.surface = Some(surface);
        self
    }

    pub fn cream_color(mut self, color: PaletteColor) -> Self {
        self.cream_color = Some(color);
        self
    }

    pub fn marzipan_color(mut self, color: PaletteColor) -> Self {
        self.marzipan_color = Some(color);
        self
    }

    pub fn drip_style(mut self, drip: DripStyle) -> Self {
        self.drip_style = Some(drip);
        self
    }

    pub fn shavings_color(mut self, color: ShavingsColor) -> Self {
        self.shavings_color = Some(color);
        self
    }

    pub fn surface_note(mut self, note: impl Into<String>) -> Self {
        self.surface_note = Some(note.into());
        self
    }

    pub fn inscription(mut self, text: impl Into<String>) -> Self {
        self.inscription = Some(text.into());
        self
    }

    pub fn specifications(mut self, text: impl Into<String>) -> Self {
        self.specifications = Some(text.into());
        self
    }

    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    pub fn pickup_location(mut self, id: impl Into<String>) -> Self {
        self.pickup_location_id = Some(id.into());
        self
    }

    pub fn contact(
        mut self,
        name: impl Into<String>,
        phone: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        self.customer_name = Some(name.into());
        self.customer_phone = Some(phone.into());
        self.customer_email = Some(email.into());
        self
    }

    /// Merge into `order`
    ///
    /// Quantity is clamped by the caller before this point; location ids are
    /// checked against the catalog by the caller too.
    pub(crate) fn merge_into(self, order: &mut OrderConfiguration) {
        if let Some(note) = self.custom_size_note {
            order.custom_size_note = Some(note).filter(|n| !n.trim().is_empty());
        }
        if let Some(filling) = self.filling {
            order.filling = filling;
        }
        if let Some(sponge) = self.sponge {
            order.sponge = sponge;
        }
        if let Some(surface) = self.surface {
            order.surface = surface;
        }

        let attributes = &mut order.surface_attributes;
        if let Some(color) = self.cream_color {
            attributes.cream_color = Some(color);
        }
        if let Some(color) = self.marzipan_color {
            attributes.marzipan_color = Some(color);
        }
        if let Some(drip) = self.drip_style {
            attributes.drip_style = Some(drip);
        }
        if let Some(color) = self.shavings_color {
            attributes.shavings_color = Some(color);
        }
        if let Some(note) = self.surface_note {
            attributes.note = Some(note);
        }

        if let Some(text) = self.inscription {
            order.inscription = text;
        }
        if let Some(text) = self.specifications {
            order.specifications = text;
        }
        if let Some(quantity) = self.quantity {
            order.quantity = quantity;
        }
        if let Some(id) = self.pickup_location_id {
            order.pickup_location_id = id;
        }
        if let Some(name) = self.customer_name {
            order.contact.name = name;
        }
        if let Some(phone) = self.customer_phone {
            order.contact.phone = phone;
        }
        if let Some(email) = self.customer_email {
            order.contact.email = email;
        }
    }
}

/// Steps of the order wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Reference photos, shape and size
    #[default]
    Design,
    /// Filling, sponge and surface
    FlavorAndSurface,
    /// Inscription, notes and quantity
    Details,
    /// Pickup date and location
    Pickup,
    /// Summary and contact details
    Summary,
}

impl Step {
    pub const ALL: [Step; 5] = [
        Step::Design,
        Step::FlavorAndSurface,
        Step::Details,
        Step::Pickup,
        Step::Summary,
    ];

    /// 1-based step number
    pub fn number(&self) -> u8 {
        match self {
            Step::Design => 1,
            Step::FlavorAndSurface => 2,
            Step::Details => 3,
            Step::Pickup => 4,
            Step::Summary => 5,
        }
    }

    pub fn from_number(number: u8) -> Result<Self, ValidationError> {
        Self::ALL
            .into_iter()
            .find(|s| s.number() == number)
            .ok_or_else(|| ValidationError::UnknownOption {
                field: "step".to_string(),
                value: number.to_string(),
            })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Step::Design => "Předloha a Základ",
            Step::FlavorAndSurface => "Příchuť a Vzhled",
            Step::Details => "Detaily",
            Step::Pickup => "Vyzvednutí",
            Step::Summary => "Souhrn",
        }
    }

    /// The following step, saturating at the summary
    pub fn next(&self) -> Step {
        Self::from_number(self.number() + 1).unwrap_or(Step::Summary)
    }

    /// The preceding step, saturating at the first one
    pub fn previous(&self) -> Step {
        Self::from_number(self.number().saturating_sub(1)).unwrap_or(Step::Design)
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

/// Pass/fail answer for leaving a step
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepVerdict {
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StepVerdict {
    pub fn pass() -> Self {
        Self {
            passed: true,
            message: None,
        }
    }
}

impl From<Result<(), ValidationError>> for StepVerdict {
    fn from(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self::pass(),
            Err(e) => Self {
                passed: false,
                message: Some(e.user_message()),
            },
        }
    }
}
