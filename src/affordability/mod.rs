pub mod advice;
pub mod projection;
pub mod thresholds;

pub use advice::{generate_advice, LoanAdvice};
pub use projection::{PressureProjector, ProjectionPoint, ProjectionSeries};
pub use thresholds::{
    payment_ratio_percent, AffordabilityEvaluator, AffordabilityResult, ThresholdTable, TierBand,
};
