//! Outbound order message
//!
//! The core does not send anything. [`compose`] turns a finished order into
//! a recipient, subject and plain-text body; delivering it (mail client,
//! SMTP relay, ticket system) is the caller's business.

pub mod templates;

use chrono::NaiveDate;
use serde::Serialize;
use tera::{Context, Tera};

use crate::config::FormConfig;
use crate::core::contact::ContactInfo;
use crate::core::error::NotificationError;
use crate::core::order::OrderConfiguration;
use crate::core::surface::{self, SurfaceFinish};

use templates::{BODY_TEMPLATE_NAME, DEFAULT_BODY, DEFAULT_SUBJECT, SUBJECT_TEMPLATE_NAME};

/// Shown instead of a pickup date that was never chosen
pub const DATE_NOT_CHOSEN: &str = "Nevybráno";

/// A composed message, ready for any transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundMessage {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

/// Flattened, display-ready view of an order
///
/// Used for the summary step and as the template context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderSummary {
    pub customer: ContactInfo,
    pub pickup_date: String,
    pub location: String,
    pub shape: String,
    pub tiers: usize,
    /// Tier sizes joined with " / "
    pub sizes: String,
    pub custom_size_note: Option<String>,
    pub sponge: String,
    pub filling: String,
    /// Output of [`surface::describe`]
    pub surface: String,
    pub edible_print: bool,
    pub inscription: String,
    pub quantity: u32,
    pub specifications: String,
}

impl OrderSummary {
    pub fn from_order(order: &OrderConfiguration, config: &FormConfig) -> Self {
        let location = config
            .location(&order.pickup_location_id)
            .map(|l| l.name.clone())
            .unwrap_or_else(|| order.pickup_location_id.clone());

        Self {
            customer: order.contact.clone(),
            pickup_date: order
                .pickup_date
                .map(format_date)
                .unwrap_or_else(|| DATE_NOT_CHOSEN.to_string()),
            location,
            shape: order.shape.label().to_string(),
            tiers: order.tier_count.get(),
            sizes: order.tiers.joined(" / "),
            custom_size_note: order.custom_size_note.clone(),
            sponge: order.sponge.label().to_string(),
            filling: order.filling.label().to_string(),
            surface: surface::describe(order.surface, &order.surface_attributes),
            edible_print: order.surface == SurfaceFinish::EdiblePrint,
            inscription: order.inscription.clone(),
            quantity: order.quantity,
            specifications: order.specifications.clone(),
        }
    }
}

/// Day-first date without padding, e.g. `5. 3. 2026`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%-d. %-m. %Y").to_string()
}

/// Render the outbound message for `order`
///
/// Uses the templates from `config` when set, the built-in ones otherwise.
pub fn compose(
    order: &OrderConfiguration,
    config: &FormConfig,
) -> Result<OutboundMessage, NotificationError> {
    let mut tera = Tera::default();
    add_template(
        &mut tera,
        SUBJECT_TEMPLATE_NAME,
        config.subject_template.as_deref().unwrap_or(DEFAULT_SUBJECT),
    )?;
    add_template(
        &mut tera,
        BODY_TEMPLATE_NAME,
        config.body_template.as_deref().unwrap_or(DEFAULT_BODY),
    )?;

    let summary = OrderSummary::from_order(order, config);
    let context = Context::from_serialize(&summary).map_err(|e| render_error("context", e))?;

    let subject = tera
        .render(SUBJECT_TEMPLATE_NAME, &context)
        .map_err(|e| render_error(SUBJECT_TEMPLATE_NAME, e))?;
    let body = tera
        .render(BODY_TEMPLATE_NAME, &context)
        .map_err(|e| render_error(BODY_TEMPLATE_NAME, e))?;

    tracing::debug!(recipient = %config.recipient, subject = %subject, "Composed order message");

    Ok(OutboundMessage {
        recipient: config.recipient.clone(),
        subject: subject.trim().to_string(),
        body,
    })
}

fn add_template(tera: &mut Tera, name: &str, content: &str) -> Result<(), NotificationError> {
    tera.add_raw_template(name, content)
        .map_err(|e| render_error(name, e))
}

fn render_error(template: &str, error: tera::Error) -> NotificationError {
    // Tera keeps the useful part of the message in the source chain
    let mut message = error.to_string();
    let mut source = std::error::Error::source(&error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    NotificationError::Render {
        template: template.to_string(),
        message,
    }
}
