pub mod amortization;
pub mod cache;
pub mod formula;
pub mod overpayment;

pub use amortization::{AmortizationCalculator, AmortizationSchedule, PaymentPeriod};
pub use cache::PaymentCache;
pub use formula::{calculate_monthly_payment, monthly_payment};
pub use overpayment::{ExtraPaymentImpact, ExtraPaymentModel, ExtraPaymentSimulator};
