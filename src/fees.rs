use serde::{Deserialize, Serialize};

use crate::config::FeeConfig;
use crate::decimal::Money;

/// one-time purchase costs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TransactionFees {
    pub deed_tax: Money,
    pub agent_fee: Money,
    pub other_fees: Money,
    pub total: Money,
}

/// fee calculator over a set of fee rates
///
/// rates are fractions of the price and are not range checked here
pub struct FeeCalculator {
    config: FeeConfig,
}

impl FeeCalculator {
    pub fn new(config: FeeConfig) -> Self {
        Self { config }
    }

    /// fee breakdown for a house price
    pub fn calculate(&self, house_price: Money) -> TransactionFees {
        let deed_tax = house_price.apply_rate(self.config.deed_tax_rate);
        let agent_fee = house_price.apply_rate(self.config.agent_fee_rate);
        let other_fees = self.config.other_fees;

        TransactionFees {
            deed_tax,
            agent_fee,
            other_fees,
            total: deed_tax + agent_fee + other_fees,
        }
    }
}

impl Default for FeeCalculator {
    fn default() -> Self {
        Self::new(FeeConfig::default())
    }
}
