use rust_decimal::Decimal;

use crate::decimal::{compound_factor, Money, Rate};
use crate::errors::{PlannerError, Result};
use crate::types::LoanParameters;

/// monthly payment for a fixed-rate, fixed-term amortizing loan
///
/// PMT = P * r * (1 + r)^n / ((1 + r)^n - 1), or P / n when the rate is zero
pub fn calculate_monthly_payment(principal: Money, annual_rate: Rate, term_years: u32) -> Result<Money> {
    let num_payments = term_years * 12;
    if num_payments == 0 {
        return Err(PlannerError::invalid_input(
            "term_years",
            "loan term must be at least one year",
        ));
    }

    let monthly_rate = annual_rate.monthly_rate().as_decimal();

    if monthly_rate.is_zero() {
        return Ok(principal / Decimal::from(num_payments));
    }

    let compound = compound_factor(Decimal::ONE + monthly_rate, num_payments)?;
    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return Err(PlannerError::CalculationError {
            message: format!("annuity factor collapsed to zero for rate {annual_rate}"),
        });
    }

    // P * r / (1 - (1 + r)^-n) keeps the intermediate below the compound factor
    let annuity = denominator / compound;
    let payment = principal
        .as_decimal()
        .checked_mul(monthly_rate)
        .and_then(|interest| interest.checked_div(annuity))
        .ok_or_else(|| PlannerError::CalculationError {
            message: format!("payment overflows for {principal} at {annual_rate}"),
        })?;

    Ok(Money::from_decimal(payment))
}

/// monthly payment for a parameter bundle
pub fn monthly_payment(params: &LoanParameters) -> Result<Money> {
    calculate_monthly_payment(params.principal, params.annual_rate, params.term_years)
}
