//! Image-analysis collaborator
//!
//! After the customer uploads reference photos, an external analyzer may
//! suggest a shape, a dominant color and a one-line description. Results are
//! untrusted hints: anything malformed is dropped, failures and timeouts are
//! logged and turned into an empty suggestion, and nothing here ever blocks
//! the customer's own choices.
//!
//! # Usage
//!
//! ```rust,ignore
//! if let Some(ticket) = session.begin_analysis(image_id) {
//!     let outcome = run_analysis(&analyzer, ticket, timeout).await;
//!     session.apply_analysis(outcome);
//! }
//! ```

use anyhow::Result;
use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use std::time::Duration;

use crate::core::image::{ImageId, ImageUpload};
use crate::core::shape::Shape;

/// Best-effort hints derived from a reference photo
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisSuggestion {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_shape: Option<Shape>,

    /// Dominant surface color as `#RRGGBB`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_color: Option<String>,

    /// Short description of the pictured cake
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Wire format returned by the analyzer model
#[derive(Debug, Deserialize)]
struct RawAnalysis {
    shape: Option<String>,
    #[serde(rename = "hexColor")]
    hex_color: Option<String>,
    description: Option<String>,
}

impl AnalysisSuggestion {
    pub fn is_empty(&self) -> bool {
        self.suggested_shape.is_none()
            && self.suggested_color.is_none()
            && self.description.is_none()
    }

    /// Parse the analyzer's JSON answer
    ///
    /// Expects `{"shape": "Round|Rectangle|Square|Heart", "hexColor": "#RRGGBB",
    /// "description": "..."}`. Unknown shapes and malformed colors are
    /// dropped rather than rejected; only non-JSON input is an error.
    pub fn from_json(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }

        let parsed: RawAnalysis = serde_json::from_str(raw)?;
        Ok(Self {
            suggested_shape: parsed.shape.and_then(|s| s.parse().ok()),
            suggested_color: parsed.hex_color.filter(|hex| is_hex_color(hex)),
            description: parsed
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
        })
    }
}

fn is_hex_color(value: &str) -> bool {
    static HEX_REGEX: OnceLock<Option<Regex>> = OnceLock::new();
    HEX_REGEX
        .get_or_init(|| Regex::new(r"^#[0-9A-Fa-f]{6}$").ok())
        .as_ref()
        .is_some_and(|regex| regex.is_match(value))
}

/// Analyzer of reference photos
///
/// Implementations wrap a vision model or any other hint source. They may
/// fail; callers treat any error as an empty suggestion.
#[async_trait]
pub trait ImageAnalyzer: Send + Sync {
    /// Analyze one image payload
    async fn analyze(&self, image: &ImageUpload) -> Result<AnalysisSuggestion>;
}

/// Analyzer used when no hint source is configured
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAnalyzer;

#[async_trait]
impl ImageAnalyzer for NoAnalyzer {
    async fn analyze(&self, _image: &ImageUpload) -> Result<AnalysisSuggestion> {
        Ok(AnalysisSuggestion::default())
    }
}

/// A pending analysis, tagged with the image it was issued for
#[derive(Debug, Clone)]
pub struct AnalysisTicket {
    pub image_id: ImageId,
    pub upload: ImageUpload,
}

/// Result of an analysis, still tagged with its image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisOutcome {
    pub image_id: ImageId,
    pub suggestion: AnalysisSuggestion,
}

/// Run the analyzer for `ticket`, never failing
///
/// Errors and timeouts are logged at `warn` and yield an empty suggestion.
pub async fn run_analysis(
    analyzer: &dyn ImageAnalyzer,
    ticket: AnalysisTicket,
    timeout: Duration,
) -> AnalysisOutcome {
    let suggestion = match tokio::time::timeout(timeout, analyzer.analyze(&ticket.upload)).await
    {
        Ok(Ok(suggestion)) => suggestion,
        Ok(Err(e)) => {
            tracing::warn!(image_id = %ticket.image_id, error = %e, "Image analysis failed");
            AnalysisSuggestion::default()
        }
        Err(_) => {
            tracing::warn!(
                image_id = %ticket.image_id,
                timeout_ms = timeout.as_millis() as u64,
                "Image analysis timed out"
            );
            AnalysisSuggestion::default()
        }
    };

    AnalysisOutcome {
        image_id: ticket.image_id,
        suggestion,
    }
}
