//! serializable result of one planning run

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::affordability::{AffordabilityResult, LoanAdvice, ProjectionSeries};
use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::fees::TransactionFees;
use crate::payments::{AmortizationSchedule, ExtraPaymentImpact};
use crate::strategy::StrategyCandidate;

/// headline payments under both conventions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub equal_installment: Money,
    pub equal_principal_first: Money,
    pub equal_principal_last: Money,
    pub equal_installment_total_interest: Money,
    pub equal_principal_total_interest: Money,
}

/// ratio classified under the risk profile and the four level table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityView {
    pub risk_profile: AffordabilityResult,
    pub pressure_level: AffordabilityResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanResponse {
    pub loan_amount: Money,
    pub down_payment_ratio_percent: Decimal,
    pub schedule_rate: Rate,
    pub payments: PaymentSummary,
    pub schedule: AmortizationSchedule,
    pub fees: TransactionFees,
    pub affordability: Option<AffordabilityView>,
    pub projection: Option<ProjectionSeries>,
    pub advice: Vec<LoanAdvice>,
    pub strategy: Option<StrategyCandidate>,
    pub extra_payment: Option<ExtraPaymentImpact>,
}

impl PlanResponse {
    /// total cash needed up front: down payment plus fees
    pub fn upfront_cost(&self, down_payment: Money) -> Money {
        down_payment + self.fees.total
    }

    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
