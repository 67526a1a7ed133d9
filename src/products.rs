use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::LoanProductConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{PlannerError, Result};
use crate::payments::calculate_monthly_payment;
use crate::types::LoanParameters;

/// mortgage product
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum LoanProduct {
    /// bank loan at the quoted rate
    Commercial,
    /// housing provident fund loan, rate capped by the fund
    ProvidentFund,
    /// split between a commercial part and a provident fund part
    Combination {
        commercial_ratio_percent: Decimal,
        /// explicit fund rate; the capped commercial rate when absent
        fund_rate: Option<Rate>,
    },
}

impl LoanProduct {
    /// fund rate for a quoted commercial rate
    pub fn fund_rate(&self, quoted_rate: Rate, config: &LoanProductConfig) -> Rate {
        match self {
            LoanProduct::Combination { fund_rate: Some(rate), .. } => *rate,
            _ => quoted_rate.min(config.fund_rate_cap),
        }
    }

    /// commercial share of the principal as a fraction
    fn commercial_share(&self) -> Result<Decimal> {
        match self {
            LoanProduct::Commercial => Ok(Decimal::ONE),
            LoanProduct::ProvidentFund => Ok(Decimal::ZERO),
            LoanProduct::Combination { commercial_ratio_percent, .. } => {
                check_ratio(*commercial_ratio_percent)?;
                Ok(*commercial_ratio_percent / Decimal::ONE_HUNDRED)
            }
        }
    }

    /// equal installment payment, combination loans sum both parts
    pub fn monthly_payment(&self, params: &LoanParameters, config: &LoanProductConfig) -> Result<Money> {
        let fund_rate = self.fund_rate(params.annual_rate, config);

        match self {
            LoanProduct::Commercial => {
                calculate_monthly_payment(params.principal, params.annual_rate, params.term_years)
            }
            LoanProduct::ProvidentFund => {
                calculate_monthly_payment(params.principal, fund_rate, params.term_years)
            }
            LoanProduct::Combination { .. } => {
                let share = self.commercial_share()?;
                let commercial_amount = params.principal * share;
                let fund_amount = params.principal - commercial_amount;

                let commercial_payment =
                    calculate_monthly_payment(commercial_amount, params.annual_rate, params.term_years)?;
                let fund_payment = calculate_monthly_payment(fund_amount, fund_rate, params.term_years)?;

                Ok(commercial_payment + fund_payment)
            }
        }
    }

    /// single rate used to build a schedule for this product
    pub fn schedule_rate(&self, quoted_rate: Rate, config: &LoanProductConfig) -> Result<Rate> {
        let fund_rate = self.fund_rate(quoted_rate, config);
        match self {
            LoanProduct::Commercial => Ok(quoted_rate),
            LoanProduct::ProvidentFund => Ok(fund_rate),
            LoanProduct::Combination { commercial_ratio_percent, .. } => {
                blended_rate(quoted_rate, fund_rate, *commercial_ratio_percent)
            }
        }
    }
}

/// ratio-weighted average of a commercial and a fund rate
pub fn blended_rate(commercial_rate: Rate, fund_rate: Rate, commercial_ratio_percent: Decimal) -> Result<Rate> {
    check_ratio(commercial_ratio_percent)?;

    let fund_ratio = Decimal::ONE_HUNDRED - commercial_ratio_percent;
    let weighted = commercial_rate.as_decimal() * commercial_ratio_percent + fund_rate.as_decimal() * fund_ratio;

    Ok(Rate::from_decimal(weighted / Decimal::ONE_HUNDRED))
}

fn check_ratio(ratio_percent: Decimal) -> Result<()> {
    if ratio_percent < Decimal::ZERO || ratio_percent > Decimal::ONE_HUNDRED {
        return Err(PlannerError::invalid_input(
            "commercial_ratio_percent",
            format!("ratio must be between 0 and 100, got {ratio_percent}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn params(rate: Decimal) -> LoanParameters {
        LoanParameters::new(Money::from_major(1_000_000), Rate::from_percent(rate), 30)
    }

    #[test]
    fn test_commercial_uses_quoted_rate() {
        let config = LoanProductConfig::default();
        let loan = params(dec!(3.2));

        let payment = LoanProduct::Commercial.monthly_payment(&loan, &config).unwrap();
        assert_eq!(payment, calculate_monthly_payment(loan.principal, loan.annual_rate, 30).unwrap());
    }

    #[test]
    fn test_fund_rate_is_capped() {
        let config = LoanProductConfig::default();
        let loan = params(dec!(4.9));

        let payment = LoanProduct::ProvidentFund.monthly_payment(&loan, &config).unwrap();
        let capped = calculate_monthly_payment(loan.principal, Rate::from_percent(dec!(3.25)), 30).unwrap();
        assert_eq!(payment, capped);

        // below the cap the quoted rate applies
        let cheap = params(dec!(2.85));
        assert_eq!(
            LoanProduct::ProvidentFund.schedule_rate(cheap.annual_rate, &config).unwrap(),
            Rate::from_percent(dec!(2.85))
        );
    }

    #[test]
    fn test_combination_sums_parts() {
        let config = LoanProductConfig::default();
        let loan = params(dec!(4.0));
        let product = LoanProduct::Combination {
            commercial_ratio_percent: dec!(60),
            fund_rate: None,
        };

        let payment = product.monthly_payment(&loan, &config).unwrap();
        let commercial = calculate_monthly_payment(Money::from_major(600_000), Rate::from_percent(dec!(4.0)), 30).unwrap();
        let fund = calculate_monthly_payment(Money::from_major(400_000), Rate::from_percent(dec!(3.25)), 30).unwrap();

        assert_eq!(payment, commercial + fund);
    }

    #[test]
    fn test_combination_extremes_match_single_products() {
        let config = LoanProductConfig::default();
        let loan = params(dec!(4.0));

        let all_commercial = LoanProduct::Combination { commercial_ratio_percent: dec!(100), fund_rate: None };
        assert_eq!(
            all_commercial.monthly_payment(&loan, &config).unwrap(),
            LoanProduct::Commercial.monthly_payment(&loan, &config).unwrap()
        );

        let all_fund = LoanProduct::Combination { commercial_ratio_percent: dec!(0), fund_rate: None };
        assert_eq!(
            all_fund.monthly_payment(&loan, &config).unwrap(),
            LoanProduct::ProvidentFund.monthly_payment(&loan, &config).unwrap()
        );
    }

    #[test]
    fn test_blended_rate() {
        let rate = blended_rate(
            Rate::from_percent(dec!(3.2)),
            Rate::from_percent(dec!(2.85)),
            dec!(50),
        )
        .unwrap();
        assert_eq!(rate, Rate::from_percent(dec!(3.025)));

        let product = LoanProduct::Combination {
            commercial_ratio_percent: dec!(50),
            fund_rate: Some(Rate::from_percent(dec!(2.85))),
        };
        let config = LoanProductConfig::default();
        assert_eq!(product.schedule_rate(Rate::from_percent(dec!(3.2)), &config).unwrap(), rate);
    }

    #[test]
    fn test_ratio_out_of_range() {
        let config = LoanProductConfig::default();
        let product = LoanProduct::Combination { commercial_ratio_percent: dec!(120), fund_rate: None };

        assert!(matches!(
            product.monthly_payment(&params(dec!(4.0)), &config),
            Err(PlannerError::InvalidInput { .. })
        ));
        assert!(blended_rate(Rate::ZERO, Rate::ZERO, dec!(-5)).is_err());
    }
}
