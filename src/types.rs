use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{PlannerError, Result};

/// loan parameters shared by every calculator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoanParameters {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_years: u32,
}

impl LoanParameters {
    pub fn new(principal: Money, annual_rate: Rate, term_years: u32) -> Self {
        Self {
            principal,
            annual_rate,
            term_years,
        }
    }

    /// total number of monthly payments
    pub fn num_payments(&self) -> u32 {
        self.term_years * 12
    }

    pub fn monthly_rate(&self) -> Rate {
        self.annual_rate.monthly_rate()
    }

    /// reject parameters the formulas cannot handle
    pub fn validate(&self) -> Result<()> {
        if self.term_years == 0 {
            return Err(PlannerError::invalid_input(
                "term_years",
                "loan term must be at least one year",
            ));
        }

        if self.annual_rate.is_negative() {
            return Err(PlannerError::invalid_input(
                "annual_rate",
                format!("interest rate cannot be negative: {}", self.annual_rate),
            ));
        }

        if self.principal.is_negative() {
            return Err(PlannerError::invalid_input(
                "principal",
                format!("principal cannot be negative: {}", self.principal),
            ));
        }

        Ok(())
    }
}

/// repayment convention for amortization schedules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepaymentMethod {
    /// constant total payment, interest share shrinks over time
    EqualInstallment,
    /// constant principal share, total payment shrinks over time
    EqualPrincipal,
}

/// borrower risk appetite, keys the affordability thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskTolerance {
    Conservative,
    Balanced,
    Aggressive,
}

impl RiskTolerance {
    /// map a 1 (conservative) to 5 (aggressive) slider value
    pub fn from_level(level: u8) -> Result<Self> {
        match level {
            1 | 2 => Ok(RiskTolerance::Conservative),
            3 => Ok(RiskTolerance::Balanced),
            4 | 5 => Ok(RiskTolerance::Aggressive),
            other => Err(PlannerError::invalid_input(
                "risk_tolerance",
                format!("level must be between 1 and 5, got {other}"),
            )),
        }
    }
}

/// pressure tier assigned to a payment-to-income ratio
///
/// `Safe`, `Warning` and `Danger` are used by the risk tolerance tables,
/// `Light` through `Severe` by the four level pressure table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PressureTier {
    Safe,
    Warning,
    Danger,
    Light,
    Moderate,
    Heavy,
    Severe,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_num_payments() {
        let params = LoanParameters::new(Money::from_major(100_000), Rate::from_percentage(4), 30);
        assert_eq!(params.num_payments(), 360);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_term() {
        let params = LoanParameters::new(Money::from_major(100_000), Rate::from_percentage(4), 0);
        assert!(matches!(
            params.validate(),
            Err(PlannerError::InvalidInput { ref field, .. }) if field == "term_years"
        ));
    }

    #[test]
    fn test_validate_rejects_negative_rate() {
        let params = LoanParameters::new(
            Money::from_major(100_000),
            Rate::from_percent(dec!(-1)),
            10,
        );
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_risk_tolerance_levels() {
        assert_eq!(RiskTolerance::from_level(1).unwrap(), RiskTolerance::Conservative);
        assert_eq!(RiskTolerance::from_level(3).unwrap(), RiskTolerance::Balanced);
        assert_eq!(RiskTolerance::from_level(5).unwrap(), RiskTolerance::Aggressive);
        assert!(RiskTolerance::from_level(0).is_err());
        assert!(RiskTolerance::from_level(6).is_err());
    }
}
