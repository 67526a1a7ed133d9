use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::Money;
use crate::errors::{PlannerError, Result};
use crate::types::PressureTier;

/// upper bound (inclusive) of a pressure band, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TierBand {
    pub ceiling_percent: Decimal,
    pub tier: PressureTier,
}

/// ordered payment-to-income bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdTable {
    pub bands: Vec<TierBand>,
    /// tier for ratios above every ceiling
    pub above: PressureTier,
}

impl ThresholdTable {
    pub fn new(bands: Vec<TierBand>, above: PressureTier) -> Result<Self> {
        let table = Self { bands, above };
        table.validate()?;
        Ok(table)
    }

    /// safe / warning / danger table for a risk tolerance profile
    pub fn risk_profile(safe_ceiling: Decimal, warning_ceiling: Decimal) -> Self {
        Self {
            bands: vec![
                TierBand { ceiling_percent: safe_ceiling, tier: PressureTier::Safe },
                TierBand { ceiling_percent: warning_ceiling, tier: PressureTier::Warning },
            ],
            above: PressureTier::Danger,
        }
    }

    /// four level table: light up to 30%, moderate to 50%, heavy to 70%
    pub fn pressure_levels() -> Self {
        Self {
            bands: vec![
                TierBand { ceiling_percent: dec!(30), tier: PressureTier::Light },
                TierBand { ceiling_percent: dec!(50), tier: PressureTier::Moderate },
                TierBand { ceiling_percent: dec!(70), tier: PressureTier::Heavy },
            ],
            above: PressureTier::Severe,
        }
    }

    /// ceilings must be strictly ascending
    pub fn validate(&self) -> Result<()> {
        if self.bands.is_empty() {
            return Err(PlannerError::InvalidConfiguration {
                message: "threshold table needs at least one band".to_string(),
            });
        }

        if self.bands.windows(2).any(|w| w[1].ceiling_percent <= w[0].ceiling_percent) {
            return Err(PlannerError::InvalidConfiguration {
                message: "threshold ceilings must be strictly ascending".to_string(),
            });
        }

        Ok(())
    }

    /// first band whose ceiling covers the ratio
    pub fn classify(&self, ratio_percent: Decimal) -> PressureTier {
        self.bands
            .iter()
            .find(|band| ratio_percent <= band.ceiling_percent)
            .map(|band| band.tier)
            .unwrap_or(self.above)
    }
}

/// payment-to-income ratio and its tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityResult {
    pub ratio_percent: Decimal,
    pub tier: PressureTier,
}

/// payment / income * 100; zero income is an error
pub fn payment_ratio_percent(monthly_payment: Money, monthly_income: Money) -> Result<Decimal> {
    if monthly_income.is_zero() {
        return Err(PlannerError::DivisionByZero {
            context: "monthly income is zero".to_string(),
        });
    }

    Ok(monthly_payment.as_decimal() / monthly_income.as_decimal() * Decimal::ONE_HUNDRED)
}

/// affordability evaluator bound to one threshold table
pub struct AffordabilityEvaluator {
    table: ThresholdTable,
}

impl AffordabilityEvaluator {
    pub fn new(table: ThresholdTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &ThresholdTable {
        &self.table
    }

    /// classify a payment against income
    pub fn evaluate(&self, monthly_payment: Money, monthly_income: Money) -> Result<AffordabilityResult> {
        let ratio_percent = payment_ratio_percent(monthly_payment, monthly_income)?;
        let tier = self.table.classify(ratio_percent);

        debug!(ratio = %ratio_percent.round_dp(2), ?tier, "evaluated affordability");

        Ok(AffordabilityResult { ratio_percent, tier })
    }
}
