use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::Money;
use crate::errors::Result;

use super::thresholds::payment_ratio_percent;

const HIGH_RATIO_PERCENT: Decimal = dec!(50);
const LOW_RATIO_PERCENT: Decimal = dec!(30);
const LONG_TERM_YEARS: u32 = 20;

/// plain-language suggestion for a loan plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LoanAdvice {
    /// payment takes more than half of income
    RaiseDownPaymentOrExtendTerm { ratio_percent: Decimal },
    /// long loans accumulate a lot of interest
    ConsiderShorterTerm { term_years: u32, total_interest: Money },
    /// plenty of headroom, paying more saves interest
    ConsiderPayingMore { ratio_percent: Decimal },
    PlanIsReasonable,
}

impl fmt::Display for LoanAdvice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanAdvice::RaiseDownPaymentOrExtendTerm { ratio_percent } => write!(
                f,
                "payment-to-income ratio of {}% is high, consider a larger down payment or a longer term",
                ratio_percent.round_dp(1)
            ),
            LoanAdvice::ConsiderShorterTerm { term_years, total_interest } => write!(
                f,
                "a {term_years} year term pays {} in interest, consider a shorter term if finances allow",
                total_interest.format_currency("")
            ),
            LoanAdvice::ConsiderPayingMore { ratio_percent } => write!(
                f,
                "repayment pressure is low at {}%, paying more each month would reduce total interest",
                ratio_percent.round_dp(1)
            ),
            LoanAdvice::PlanIsReasonable => write!(f, "the current plan is reasonable, proceed as scheduled"),
        }
    }
}

/// build advice for a plan; zero income is an error
pub fn generate_advice(
    monthly_payment: Money,
    monthly_income: Money,
    term_years: u32,
    total_interest: Money,
) -> Result<Vec<LoanAdvice>> {
    let ratio_percent = payment_ratio_percent(monthly_payment, monthly_income)?;
    let mut advice = Vec::new();

    if ratio_percent > HIGH_RATIO_PERCENT {
        advice.push(LoanAdvice::RaiseDownPaymentOrExtendTerm { ratio_percent });
    }

    if term_years > LONG_TERM_YEARS {
        advice.push(LoanAdvice::ConsiderShorterTerm { term_years, total_interest });
    }

    if ratio_percent <= LOW_RATIO_PERCENT {
        advice.push(LoanAdvice::ConsiderPayingMore { ratio_percent });
    }

    if advice.is_empty() {
        advice.push(LoanAdvice::PlanIsReasonable);
    }

    Ok(advice)
}
