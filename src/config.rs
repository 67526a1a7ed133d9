use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::affordability::ThresholdTable;
use crate::decimal::{Money, Rate};
use crate::errors::{PlannerError, Result};
use crate::types::RiskTolerance;

/// planner configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannerConfig {
    pub fee_config: FeeConfig,
    pub strategy_config: StrategyConfig,
    pub product_config: LoanProductConfig,
    pub affordability_config: AffordabilityConfig,
    pub limits: InputLimits,
}

/// default transaction fee rates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeeConfig {
    pub deed_tax_rate: Rate,
    pub agent_fee_rate: Rate,
    pub other_fees: Money,
}

/// strategy grid search settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub down_payment_step: Money,
    pub candidate_terms: Vec<u32>,
}

/// loan product settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanProductConfig {
    /// provident fund loans never charge more than this
    pub fund_rate_cap: Rate,
}

/// affordability threshold tables
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityConfig {
    pub conservative: ThresholdTable,
    pub balanced: ThresholdTable,
    pub aggressive: ThresholdTable,
    pub pressure_levels: ThresholdTable,
}

/// accepted input ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputLimits {
    pub min_house_price: Money,
    pub max_house_price: Money,
    pub max_annual_rate: Rate,
    pub allowed_terms: Vec<u32>,
    pub max_fee_rate: Rate,
    pub max_other_fees: Money,
    pub max_income_growth: Rate,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            deed_tax_rate: Rate::from_decimal(dec!(0.01)),
            agent_fee_rate: Rate::from_decimal(dec!(0.02)),
            other_fees: Money::from_major(5_000),
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            down_payment_step: Money::from_major(10_000),
            candidate_terms: vec![10, 15, 20, 25, 30],
        }
    }
}

impl Default for LoanProductConfig {
    fn default() -> Self {
        Self {
            fund_rate_cap: Rate::from_percent(dec!(3.25)),
        }
    }
}

impl Default for AffordabilityConfig {
    fn default() -> Self {
        Self {
            conservative: ThresholdTable::risk_profile(dec!(30), dec!(40)),
            balanced: ThresholdTable::risk_profile(dec!(40), dec!(50)),
            aggressive: ThresholdTable::risk_profile(dec!(50), dec!(60)),
            pressure_levels: ThresholdTable::pressure_levels(),
        }
    }
}

impl AffordabilityConfig {
    /// threshold table keyed by risk tolerance
    pub fn table_for(&self, tolerance: RiskTolerance) -> &ThresholdTable {
        match tolerance {
            RiskTolerance::Conservative => &self.conservative,
            RiskTolerance::Balanced => &self.balanced,
            RiskTolerance::Aggressive => &self.aggressive,
        }
    }
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            min_house_price: Money::from_major(10_000),
            max_house_price: Money::from_major(100_000_000),
            max_annual_rate: Rate::from_percentage(15),
            allowed_terms: vec![10, 15, 20, 25, 30],
            max_fee_rate: Rate::from_percentage(5),
            max_other_fees: Money::from_major(100_000),
            max_income_growth: Rate::from_percentage(20),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            fee_config: FeeConfig::default(),
            strategy_config: StrategyConfig::default(),
            product_config: LoanProductConfig::default(),
            affordability_config: AffordabilityConfig::default(),
            limits: InputLimits::default(),
        }
    }
}

impl PlannerConfig {
    /// load configuration from json and check it
    pub fn from_json(json: &str) -> Result<Self> {
        let config: PlannerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// check internal consistency
    pub fn validate(&self) -> Result<()> {
        if !self.strategy_config.down_payment_step.is_positive() {
            return Err(PlannerError::InvalidConfiguration {
                message: "down payment step must be positive".to_string(),
            });
        }

        if self.strategy_config.candidate_terms.contains(&0)
            || self.limits.allowed_terms.contains(&0)
        {
            return Err(PlannerError::InvalidConfiguration {
                message: "loan terms must be at least one year".to_string(),
            });
        }

        if self.limits.min_house_price > self.limits.max_house_price {
            return Err(PlannerError::InvalidConfiguration {
                message: "minimum house price exceeds maximum".to_string(),
            });
        }

        if self.product_config.fund_rate_cap.is_negative() {
            return Err(PlannerError::InvalidConfiguration {
                message: "fund rate cap cannot be negative".to_string(),
            });
        }

        let affordability = &self.affordability_config;
        for table in [
            &affordability.conservative,
            &affordability.balanced,
            &affordability.aggressive,
            &affordability.pressure_levels,
        ] {
            table.validate()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PressureTier;

    #[test]
    fn test_default_config_is_valid() {
        let config = PlannerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.fee_config.other_fees, Money::from_major(5_000));
        assert_eq!(config.strategy_config.down_payment_step, Money::from_major(10_000));
    }

    #[test]
    fn test_json_roundtrip() {
        let config = PlannerConfig::default();
        let json = config.to_json_pretty().unwrap();
        let loaded = PlannerConfig::from_json(&json).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_invalid_step_rejected() {
        let mut config = PlannerConfig::default();
        config.strategy_config.down_payment_step = Money::ZERO;
        assert!(matches!(
            config.validate(),
            Err(PlannerError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        let result = PlannerConfig::from_json("{\"fee_config\": 1}");
        assert!(matches!(result, Err(PlannerError::Serialization { .. })));
    }

    #[test]
    fn test_risk_tables() {
        let config = AffordabilityConfig::default();
        let balanced = config.table_for(RiskTolerance::Balanced);
        assert_eq!(balanced.classify(dec!(40)), PressureTier::Safe);
        assert_eq!(balanced.classify(dec!(45)), PressureTier::Warning);

        let conservative = config.table_for(RiskTolerance::Conservative);
        assert_eq!(conservative.classify(dec!(45)), PressureTier::Danger);
    }
}
