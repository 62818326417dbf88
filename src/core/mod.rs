//! Core module containing the order model and the rule engines

pub mod analysis;
pub mod calendar;
pub mod contact;
pub mod error;
pub mod flavor;
pub mod image;
pub mod order;
pub mod session;
pub mod shape;
pub mod surface;
pub mod tiers;

pub use analysis::{AnalysisOutcome, AnalysisSuggestion, AnalysisTicket, ImageAnalyzer, NoAnalyzer};
pub use calendar::{DateRejection, Holiday, PickupCalendar};
pub use contact::{ContactField, ContactInfo};
pub use error::{ConfigError, ContactError, NotificationError, OrderError, ValidationError};
pub use flavor::{Filling, Sponge};
pub use image::{ImageId, ImageUpload, PreviewStore, ReferenceImage};
pub use order::{OrderConfiguration, OrderUpdate, Step, StepVerdict};
pub use session::OrderSession;
pub use shape::{Shape, SizeToken, sizes_for};
pub use surface::{
    DripStyle, PaletteColor, ShavingsColor, SurfaceAttributes, SurfaceField, SurfaceFinish,
    SurfaceVerdict,
};
pub use tiers::{TierCount, TierSet};
