//! Order session: the single mutable order and the intents that change it
//!
//! The UI dispatches one intent at a time ("picked shape X", "set tier 2 to
//! Y", "picked surface Z"); the session delegates to the tier and surface
//! engines so the order stays consistent, and answers whether the current
//! step may be left.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut session = OrderSession::new(FormConfig::default_config(), previews)?;
//! session.apply_tier_count_change(TierCount::THREE);
//! session.apply_tier_size_change(0, SizeToken::diameter(18))?;
//! session.apply_update(OrderUpdate::new().surface(SurfaceFinish::Marzipan))?;
//! let verdict = session.validate_for_step(Step::FlavorAndSurface);
//! ```

use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{FormConfig, Location};
use crate::core::analysis::{
    AnalysisOutcome, AnalysisSuggestion, AnalysisTicket, ImageAnalyzer, run_analysis,
};
use crate::core::calendar::PickupCalendar;
use crate::core::error::{OrderError, ValidationError};
use crate::core::image::{ImageId, ImageUpload, PreviewStore, ReferenceImage};
use crate::core::order::{OrderConfiguration, OrderUpdate, Step, StepVerdict};
use crate::core::shape::{Shape, SizeToken};
use crate::core::surface;
use crate::core::tiers::{self, TierCount};
use crate::notify::{self, OrderSummary, OutboundMessage};
use crate::storage::InMemoryPreviewStore;

/// One customer's pass through the order form
pub struct OrderSession {
    config: FormConfig,
    calendar: PickupCalendar,
    previews: Arc<dyn PreviewStore>,
    order: OrderConfiguration,
    step: Step,
    /// Image whose analysis is in flight
    analysis_pending: Option<ImageId>,
    analysis_hint: Option<AnalysisSuggestion>,
}

impl OrderSession {
    /// Start a session with a fresh order
    pub fn new(config: FormConfig, previews: Arc<dyn PreviewStore>) -> Result<Self, OrderError> {
        config.validate()?;
        let calendar = config.calendar()?;
        let location = config
            .default_location_id()
            .map(str::to_string)
            .unwrap_or_default();

        Ok(Self {
            order: OrderConfiguration::new(location),
            config,
            calendar,
            previews,
            step: Step::default(),
            analysis_pending: None,
            analysis_hint: None,
        })
    }

    /// Session with the default catalog and an in-memory preview store
    pub fn with_defaults() -> Result<Self, OrderError> {
        Self::new(
            FormConfig::default_config(),
            Arc::new(InMemoryPreviewStore::new()),
        )
    }

    pub fn order(&self) -> &OrderConfiguration {
        &self.order
    }

    pub fn config(&self) -> &FormConfig {
        &self.config
    }

    pub fn calendar(&self) -> &PickupCalendar {
        &self.calendar
    }

    pub fn step(&self) -> Step {
        self.step
    }

    // -------------------------------------------------------------------------
    // Field updates
    // -------------------------------------------------------------------------

    /// Merge a partial update into the order
    ///
    /// Quantity is clamped to the configured range. An unknown pickup
    /// location rejects the whole update.
    pub fn apply_update(&mut self, mut update: OrderUpdate) -> Result<(), OrderError> {
        if let Some(id) = update.pickup_location_id.as_deref()
            && self.config.location(id).is_none()
        {
            return Err(ValidationError::UnknownLocation { id: id.to_string() }.into());
        }

        update.quantity = update.quantity.map(|q| self.config.quantity.clamp(q));
        update.merge_into(&mut self.order);
        Ok(())
    }

    /// Switch shape, resetting every tier to the new shape's defaults
    ///
    /// The custom-dimension note is always discarded.
    pub fn apply_shape_change(&mut self, shape: Shape) {
        self.order.shape = shape;
        self.order.tiers = tiers::on_shape_changed(shape, self.order.tier_count);
        self.order.custom_size_note = None;
        tracing::debug!(shape = ?shape, tiers = %self.order.tiers.joined(" / "), "Shape changed");
    }

    pub fn apply_tier_count_change(&mut self, count: TierCount) {
        self.order.tiers = tiers::on_tier_count_changed(count, &self.order.tiers, self.order.shape);
        self.order.tier_count = count;
        tracing::debug!(count = count.get(), tiers = %self.order.tiers.joined(" / "), "Tier count changed");
    }

    pub fn apply_tier_size_change(&mut self, index: usize, size: SizeToken) -> Result<(), OrderError> {
        self.order.tiers =
            tiers::on_tier_size_changed(index, size, &self.order.tiers, self.order.shape)?;
        tracing::debug!(index, size = %size, tiers = %self.order.tiers.joined(" / "), "Tier size changed");
        Ok(())
    }

    /// Sizes the UI may offer for tier `index`
    pub fn available_options(&self, index: usize) -> Vec<SizeToken> {
        tiers::available_options(index, &self.order.tiers, self.order.shape)
    }

    /// Pick a pickup date, rejecting days the calendar blocks
    pub fn select_pickup_date(&mut self, date: NaiveDate, today: NaiveDate) -> Result<(), OrderError> {
        self.calendar
            .check(date, today)
            .map_err(|reason| ValidationError::DateNotSelectable { date, reason })?;
        self.order.pickup_date = Some(date);
        Ok(())
    }

    /// First date the calendar lets the customer pick
    pub fn earliest_pickup_date(&self, today: NaiveDate) -> NaiveDate {
        self.calendar.earliest_selectable(today)
    }

    pub fn pickup_location(&self) -> Option<&Location> {
        self.config.location(&self.order.pickup_location_id)
    }

    // -------------------------------------------------------------------------
    // Images
    // -------------------------------------------------------------------------

    /// Attach reference photos
    ///
    /// Photos beyond the configured limit are dropped without error. Returns
    /// the ids of the photos that were kept.
    ///
    /// All or nothing: if a preview cannot be created, the photos added by
    /// this call are taken out again and their previews released.
    pub fn add_images(&mut self, uploads: Vec<ImageUpload>) -> Result<Vec<ImageId>, OrderError> {
        let free = self.config.max_images.saturating_sub(self.order.images.len());
        let offered = uploads.len();
        let mut added = Vec::new();

        for upload in uploads.into_iter().take(free) {
            let id = ImageId::new();
            let preview_url = match self.previews.create(id, &upload) {
                Ok(url) => url,
                Err(e) => {
                    self.discard_images(&added);
                    return Err(e.into());
                }
            };
            self.order
                .images
                .push(ReferenceImage::from_upload(upload, preview_url).with_id(id));
            added.push(id);
        }

        if offered > added.len() {
            tracing::warn!(
                offered,
                kept = added.len(),
                limit = self.config.max_images,
                "Dropped reference images over the limit"
            );
        }

        Ok(added)
    }

    fn discard_images(&mut self, ids: &[ImageId]) {
        let (discarded, kept) = std::mem::take(&mut self.order.images)
            .into_iter()
            .partition::<Vec<_>, _>(|img| ids.contains(&img.id));
        self.order.images = kept;

        for image in discarded {
            if let Err(e) = self.previews.revoke(&image.preview_url) {
                tracing::warn!(image_id = %image.id, error = %e, "Failed to release preview handle");
            }
        }
    }

    /// Remove a reference photo and release its preview handle
    ///
    /// Returns false if no photo has this id.
    pub fn remove_image(&mut self, id: ImageId) -> Result<bool, OrderError> {
        let Some(pos) = self.order.images.iter().position(|img| img.id == id) else {
            return Ok(false);
        };

        let image = self.order.images.remove(pos);
        self.previews.revoke(&image.preview_url)?;

        if self.order.images.is_empty() {
            self.analysis_hint = None;
        }
        Ok(true)
    }

    /// Set the edible-print image, replacing (and releasing) any previous one
    pub fn set_print_image(&mut self, upload: ImageUpload) -> Result<ImageId, OrderError> {
        self.remove_print_image()?;

        let id = ImageId::new();
        let preview_url = self.previews.create(id, &upload)?;
        self.order.surface_attributes.print_image =
            Some(ReferenceImage::from_upload(upload, preview_url).with_id(id));
        Ok(id)
    }

    pub fn remove_print_image(&mut self) -> Result<(), OrderError> {
        if let Some(image) = self.order.surface_attributes.print_image.take() {
            self.previews.revoke(&image.preview_url)?;
        }
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Image analysis
    // -------------------------------------------------------------------------

    pub fn is_analyzing(&self) -> bool {
        self.analysis_pending.is_some()
    }

    /// Latest analysis hint (description, suggested color)
    pub fn analysis_hint(&self) -> Option<&AnalysisSuggestion> {
        self.analysis_hint.as_ref()
    }

    /// Claim the single analysis slot for `image_id`
    ///
    /// Returns `None` while another analysis is in flight or if the image is
    /// not part of the order.
    pub fn begin_analysis(&mut self, image_id: ImageId) -> Option<AnalysisTicket> {
        if self.analysis_pending.is_some() {
            tracing::debug!(image_id = %image_id, "Analysis already in flight, not queuing");
            return None;
        }

        let image = self.order.image(image_id)?;
        let upload = ImageUpload {
            mime_type: image.mime_type.clone(),
            file_name: image.file_name.clone(),
            bytes: Arc::clone(&image.bytes),
        };

        self.analysis_pending = Some(image_id);
        Some(AnalysisTicket { image_id, upload })
    }

    /// Apply a finished analysis
    ///
    /// The result is discarded when the analyzed photo was removed in the
    /// meantime. Returns whether anything was applied.
    pub fn apply_analysis(&mut self, outcome: AnalysisOutcome) -> bool {
        if self.analysis_pending == Some(outcome.image_id) {
            self.analysis_pending = None;
        }

        if self.order.image(outcome.image_id).is_none() {
            tracing::debug!(image_id = %outcome.image_id, "Discarding analysis of a removed image");
            return false;
        }

        let suggestion = outcome.suggestion;
        if suggestion.is_empty() {
            return false;
        }

        if let Some(shape) = suggestion.suggested_shape {
            self.apply_shape_change(shape);
        }
        if suggestion.description.is_some() || suggestion.suggested_color.is_some() {
            self.analysis_hint = Some(suggestion);
        }
        true
    }

    /// Add photos and analyze the first one, unless an analysis is running
    ///
    /// Analyzer failures never reach the caller.
    pub async fn add_images_and_analyze(
        &mut self,
        uploads: Vec<ImageUpload>,
        analyzer: &dyn ImageAnalyzer,
    ) -> Result<Vec<ImageId>, OrderError> {
        let added = self.add_images(uploads)?;

        let ticket = added.first().and_then(|id| self.begin_analysis(*id));
        if let Some(ticket) = ticket {
            let timeout = Duration::from_millis(self.config.analysis_timeout_ms);
            let outcome = run_analysis(analyzer, ticket, timeout).await;
            self.apply_analysis(outcome);
        }

        Ok(added)
    }

    // -------------------------------------------------------------------------
    // Step gating and submission
    // -------------------------------------------------------------------------

    /// Check whether `step` may be left
    pub fn check_step(&self, step: Step) -> Result<(), ValidationError> {
        match step {
            Step::FlavorAndSurface => {
                surface::validate(self.order.surface, &self.order.surface_attributes)
                    .into_result(self.order.surface)
            }
            Step::Pickup => match self.order.pickup_date {
                Some(_) => Ok(()),
                None => Err(ValidationError::MissingPickupDate),
            },
            Step::Design | Step::Details | Step::Summary => Ok(()),
        }
    }

    /// Pass/fail plus the user-facing message for `step`
    pub fn validate_for_step(&self, step: Step) -> StepVerdict {
        self.check_step(step).into()
    }

    /// Validate the current step and move forward
    pub fn next_step(&mut self) -> Result<Step, OrderError> {
        self.check_step(self.step)?;
        self.step = self.step.next();
        tracing::info!(step = %self.step, "Advanced to step");
        Ok(self.step)
    }

    /// Move back without validation
    pub fn previous_step(&mut self) -> Step {
        self.step = self.step.previous();
        self.step
    }

    /// Summary shown on the last step
    pub fn summary(&self) -> OrderSummary {
        OrderSummary::from_order(&self.order, &self.config)
    }

    /// Check contact details and compose the outbound message
    pub fn submit(&self) -> Result<OutboundMessage, OrderError> {
        self.order.contact.check()?;
        let message = notify::compose(&self.order, &self.config)?;
        tracing::info!(
            customer = %self.order.contact.name,
            pickup = ?self.order.pickup_date,
            "Order composed"
        );
        Ok(message)
    }
}

impl Drop for OrderSession {
    fn drop(&mut self) {
        let handles = self
            .order
            .images
            .iter()
            .chain(self.order.surface_attributes.print_image.as_ref())
            .map(|img| img.preview_url.as_str());

        for url in handles {
            if let Err(e) = self.previews.revoke(url) {
                tracing::warn!(error = %e, "Failed to release preview handle");
            }
        }
    }
}
