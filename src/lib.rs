//! # Cakeform
//!
//! Rule engine behind a multi-step custom cake order form.
//!
//! ## Features
//!
//! - **Tier Engine**: keeps tier sizes consistent with the chosen shape and
//!   strictly decreasing for round, square and heart cakes
//! - **Surface Rules**: each finish declares the attributes it needs before
//!   the customer may continue
//! - **Pickup Calendar**: lead time and fixed holidays
//! - **Configuration-Based**: locations, holidays and limits from YAML
//! - **Message Composition**: the finished order rendered with Tera templates
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use cakeform::prelude::*;
//!
//! let mut session = OrderSession::with_defaults()?;
//! session.apply_tier_count_change(TierCount::THREE);
//! session.apply_tier_size_change(0, SizeToken::diameter(18))?;
//! // tiers are now 18 / 16 / 14
//!
//! session.apply_update(
//!     OrderUpdate::new()
//!         .surface(SurfaceFinish::CreamWithDrip)
//!         .cream_color(PaletteColor::White)
//!         .drip_style(DripStyle::DarkChocolate),
//! )?;
//! session.next_step()?;
//! ```

pub mod config;
pub mod core;
pub mod notify;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Order Model ===
    pub use crate::core::{
        contact::{ContactField, ContactInfo},
        flavor::{Filling, Sponge},
        order::{OrderConfiguration, OrderUpdate, Step, StepVerdict},
        session::OrderSession,
        shape::{Shape, SizeToken, sizes_for},
        surface::{DripStyle, PaletteColor, ShavingsColor, SurfaceAttributes, SurfaceFinish},
        tiers::{TierCount, TierSet},
    };

    // === Collaborators ===
    pub use crate::core::{
        analysis::{AnalysisSuggestion, ImageAnalyzer, NoAnalyzer},
        image::{ImageId, ImageUpload, PreviewStore, ReferenceImage},
    };

    // === Errors ===
    pub use crate::core::error::{
        ConfigError, ContactError, ErrorPrompt, NotificationError, OrderError, ValidationError,
    };

    // === Calendar ===
    pub use crate::core::calendar::{PickupCalendar, is_selectable};

    // === Storage ===
    pub use crate::storage::InMemoryPreviewStore;

    // === Config ===
    pub use crate::config::{FormConfig, Location, LocationCategory};

    // === Notification ===
    pub use crate::notify::{OrderSummary, OutboundMessage, compose};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::NaiveDate;
}
