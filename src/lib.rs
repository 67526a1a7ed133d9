pub mod affordability;
pub mod config;
pub mod decimal;
pub mod errors;
pub mod fees;
pub mod payments;
pub mod planner;
pub mod products;
pub mod strategy;
pub mod types;
pub mod validation;

// re-export key types
pub use affordability::{
    generate_advice, AffordabilityEvaluator, AffordabilityResult, LoanAdvice, PressureProjector,
    ProjectionPoint, ProjectionSeries, ThresholdTable, TierBand,
};
pub use config::{
    AffordabilityConfig, FeeConfig, InputLimits, LoanProductConfig, PlannerConfig, StrategyConfig,
};
pub use decimal::{Money, Rate};
pub use errors::{PlannerError, Result};
pub use fees::{FeeCalculator, TransactionFees};
pub use payments::{
    calculate_monthly_payment, monthly_payment, AmortizationCalculator, AmortizationSchedule,
    ExtraPaymentImpact, ExtraPaymentModel, ExtraPaymentSimulator, PaymentCache, PaymentPeriod,
};
pub use planner::{
    AffordabilityView, IncomeProfile, MortgagePlanner, PaymentSummary, PlanRequest, PlanRequestBuilder,
    PlanResponse, StrategyRequest,
};
pub use products::{blended_rate, LoanProduct};
pub use strategy::{DownPaymentRange, StrategyCandidate, StrategyOptimizer};
pub use types::{LoanParameters, PressureTier, RepaymentMethod, RiskTolerance};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
