use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::Money;
use crate::errors::{PlannerError, Result};
use crate::types::{LoanParameters, RepaymentMethod};

use super::amortization::AmortizationSchedule;
use super::formula::monthly_payment;

/// effect of a flat yearly extra principal payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPaymentImpact {
    pub extra_yearly_payment: Money,
    pub original_total_interest: Money,
    pub new_total_interest: Money,
    pub interest_saved: Money,
    pub years_to_repay: u32,
    pub years_saved: u32,
}

/// how the extra payment run accrues interest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ExtraPaymentModel {
    /// one step per year, interest charged once on the opening balance
    #[default]
    Annual,
    /// month by month like the schedule, extra paid after every twelfth month
    Monthly,
}

/// yearly extra payment simulator
///
/// The baseline always comes from the monthly equal installment schedule.
/// Under `ExtraPaymentModel::Annual` the two runs compound differently, so
/// `interest_saved` can be negative when the extra payment is small.
pub struct ExtraPaymentSimulator {
    params: LoanParameters,
    model: ExtraPaymentModel,
}

impl ExtraPaymentSimulator {
    pub fn new(params: LoanParameters) -> Self {
        Self {
            params,
            model: ExtraPaymentModel::default(),
        }
    }

    pub fn with_model(mut self, model: ExtraPaymentModel) -> Self {
        self.model = model;
        self
    }

    /// run the simulation for a flat yearly extra payment
    pub fn simulate(&self, extra_yearly_payment: Money) -> Result<ExtraPaymentImpact> {
        if extra_yearly_payment.is_negative() {
            return Err(PlannerError::invalid_input(
                "extra_yearly_payment",
                format!("extra payment cannot be negative: {extra_yearly_payment}"),
            ));
        }

        let payment = monthly_payment(&self.params)?;
        let baseline = AmortizationSchedule::generate(&self.params, RepaymentMethod::EqualInstallment)?;
        let original_total_interest = baseline.total_interest;

        let (new_total_interest, years_to_repay, remaining) = match self.model {
            ExtraPaymentModel::Annual => self.run_annual(payment, extra_yearly_payment),
            ExtraPaymentModel::Monthly => self.run_monthly(payment, extra_yearly_payment),
        };

        debug!(
            extra = %extra_yearly_payment,
            model = ?self.model,
            years_to_repay,
            residual = %remaining.max(Money::ZERO),
            "simulated yearly extra payments"
        );

        Ok(ExtraPaymentImpact {
            extra_yearly_payment,
            original_total_interest,
            new_total_interest,
            interest_saved: original_total_interest - new_total_interest,
            years_to_repay,
            years_saved: self.params.term_years - years_to_repay,
        })
    }

    /// returns (interest paid, years taken, balance left)
    fn run_annual(&self, payment: Money, extra: Money) -> (Money, u32, Money) {
        let yearly_payment = payment * Decimal::from(12);
        let mut remaining = self.params.principal;
        let mut total_interest = Money::ZERO;

        for year in 0..self.params.term_years {
            let yearly_interest = remaining.apply_rate(self.params.annual_rate);
            total_interest += yearly_interest;

            remaining -= yearly_payment - yearly_interest;
            remaining -= extra;

            if remaining <= Money::ZERO {
                return (total_interest, year + 1, remaining);
            }
        }

        (total_interest, self.params.term_years, remaining)
    }

    fn run_monthly(&self, payment: Money, extra: Money) -> (Money, u32, Money) {
        let monthly_rate = self.params.monthly_rate();
        let num_payments = self.params.num_payments();
        let mut remaining = self.params.principal;
        let mut total_interest = Money::ZERO;

        for month in 1..=num_payments {
            let interest = remaining.apply_rate(monthly_rate);
            total_interest += interest;

            // the last scheduled month clears the balance like the schedule does
            let principal = if month == num_payments {
                remaining
            } else {
                (payment - interest).min(remaining)
            };
            remaining -= principal;

            if month % 12 == 0 {
                remaining -= extra.min(remaining);
            }

            if remaining <= Money::ZERO {
                return (total_interest, month.div_ceil(12), remaining);
            }
        }

        (total_interest, self.params.term_years, remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use rust_decimal_macros::dec;

    fn mortgage() -> LoanParameters {
        LoanParameters::new(Money::from_major(2_000_000), Rate::from_percent(dec!(3.2)), 30)
    }

    #[test]
    fn test_extra_payment_shortens_loan() {
        let impact = ExtraPaymentSimulator::new(mortgage())
            .simulate(Money::from_major(100_000))
            .unwrap();

        assert_eq!(impact.years_to_repay, 12);
        assert_eq!(impact.years_saved, 18);
        assert_eq!(impact.original_total_interest.round_dp(2), Money::from_decimal(dec!(1113761.43)));
        assert_eq!(impact.new_total_interest.round_dp(2), Money::from_decimal(dec!(438878.84)));
        assert_eq!(
            impact.interest_saved,
            impact.original_total_interest - impact.new_total_interest
        );
    }

    #[test]
    fn test_zero_extra_payment_reports_model_gap() {
        // annual compounding on the opening balance charges more than the
        // monthly schedule, so the coarse model reports negative savings
        let impact = ExtraPaymentSimulator::new(mortgage()).simulate(Money::ZERO).unwrap();

        assert_eq!(impact.years_to_repay, 30);
        assert_eq!(impact.years_saved, 0);
        assert!(impact.interest_saved.is_negative());
        assert_eq!(impact.new_total_interest.round_dp(2), Money::from_decimal(dec!(1158093.58)));
    }

    #[test]
    fn test_lump_sum_pays_off_in_first_year() {
        let params = LoanParameters::new(Money::from_major(100_000), Rate::from_percentage(5), 10);
        let impact = ExtraPaymentSimulator::new(params)
            .simulate(Money::from_major(100_000))
            .unwrap();

        assert_eq!(impact.years_to_repay, 1);
        assert_eq!(impact.years_saved, 9);
        assert_eq!(impact.new_total_interest, Money::from_major(5_000));
    }

    #[test]
    fn test_monthly_model_matches_schedule_without_extra() {
        let impact = ExtraPaymentSimulator::new(mortgage())
            .with_model(ExtraPaymentModel::Monthly)
            .simulate(Money::ZERO)
            .unwrap();

        assert_eq!(impact.years_to_repay, 30);
        assert_eq!(impact.new_total_interest, impact.original_total_interest);
        assert_eq!(impact.interest_saved, Money::ZERO);
    }

    #[test]
    fn test_monthly_model_saves_interest() {
        let monthly = ExtraPaymentSimulator::new(mortgage())
            .with_model(ExtraPaymentModel::Monthly)
            .simulate(Money::from_major(100_000))
            .unwrap();

        assert!(monthly.interest_saved.is_positive());
        assert!(monthly.years_to_repay < 30);
        assert_eq!(monthly.years_saved, 30 - monthly.years_to_repay);
    }

    #[test]
    fn test_negative_extra_rejected() {
        let result = ExtraPaymentSimulator::new(mortgage()).simulate(Money::from_major(-1));
        assert!(matches!(result, Err(PlannerError::InvalidInput { .. })));
    }

    #[test]
    fn test_zero_term_rejected() {
        let params = LoanParameters::new(Money::from_major(100_000), Rate::from_percentage(5), 0);
        assert!(ExtraPaymentSimulator::new(params).simulate(Money::ZERO).is_err());
    }
}
