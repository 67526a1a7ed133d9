use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::{Money, Rate};
use crate::errors::{PlannerError, Result};
use crate::types::{LoanParameters, RepaymentMethod};

use super::formula::monthly_payment;

/// one row of an amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentPeriod {
    pub index: u32,
    pub due_date: Option<NaiveDate>,
    pub payment: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub remaining_balance: Money,
}

/// amortization schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub principal: Money,
    pub annual_rate: Rate,
    pub term_years: u32,
    pub method: RepaymentMethod,
    pub periods: Vec<PaymentPeriod>,
    pub total_interest: Money,
    pub total_payment: Money,
}

impl AmortizationSchedule {
    /// generate payment schedule
    pub fn generate(params: &LoanParameters, method: RepaymentMethod) -> Result<Self> {
        Self::generate_from(params, method, None)
    }

    /// generate payment schedule with monthly due dates starting at `first_due_date`
    pub fn generate_from(
        params: &LoanParameters,
        method: RepaymentMethod,
        first_due_date: Option<NaiveDate>,
    ) -> Result<Self> {
        let calculator = AmortizationCalculator::new(method);
        let periods = calculator.calculate_schedule(params, first_due_date)?;

        let total_interest = periods.iter().map(|p| p.interest_portion).sum();
        let total_payment = periods.iter().map(|p| p.payment).sum();

        debug!(
            principal = %params.principal,
            rate = %params.annual_rate,
            term_years = params.term_years,
            ?method,
            total_interest = %total_interest,
            "generated amortization schedule"
        );

        Ok(Self {
            principal: params.principal,
            annual_rate: params.annual_rate,
            term_years: params.term_years,
            method,
            periods,
            total_interest,
            total_payment,
        })
    }

    /// get payment for specific period (1-based)
    pub fn get_payment(&self, index: u32) -> Option<&PaymentPeriod> {
        index
            .checked_sub(1)
            .and_then(|i| self.periods.get(i as usize))
    }

    /// get remaining balance after payment
    pub fn balance_after_payment(&self, index: u32) -> Money {
        self.get_payment(index)
            .map(|p| p.remaining_balance)
            .unwrap_or(self.principal)
    }

    pub fn first_payment(&self) -> Option<&PaymentPeriod> {
        self.periods.first()
    }

    pub fn last_payment(&self) -> Option<&PaymentPeriod> {
        self.periods.last()
    }

    /// sum of all principal portions
    pub fn total_principal(&self) -> Money {
        self.periods.iter().map(|p| p.principal_portion).sum()
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

/// amortization calculator
pub struct AmortizationCalculator {
    method: RepaymentMethod,
}

impl AmortizationCalculator {
    pub fn new(method: RepaymentMethod) -> Self {
        Self { method }
    }

    /// calculate full amortization schedule
    pub fn calculate_schedule(
        &self,
        params: &LoanParameters,
        first_due_date: Option<NaiveDate>,
    ) -> Result<Vec<PaymentPeriod>> {
        match self.method {
            RepaymentMethod::EqualInstallment => {
                let payment = monthly_payment(params)?;
                self.build_periods(params, first_due_date, |_| payment, |_, interest| payment - interest)
            }
            RepaymentMethod::EqualPrincipal => {
                params.validate()?;
                let principal_payment = params.principal / Decimal::from(params.num_payments());
                self.build_periods(
                    params,
                    first_due_date,
                    |interest| principal_payment + interest,
                    |_, _| principal_payment,
                )
            }
        }
    }

    /// shared period loop
    ///
    /// `payment_for(interest)` gives the period payment and
    /// `principal_for(payment, interest)` the principal share. The final period
    /// always retires whatever balance is left so the schedule closes at zero.
    fn build_periods<P, Q>(
        &self,
        params: &LoanParameters,
        first_due_date: Option<NaiveDate>,
        payment_for: P,
        principal_for: Q,
    ) -> Result<Vec<PaymentPeriod>>
    where
        P: Fn(Money) -> Money,
        Q: Fn(Money, Money) -> Money,
    {
        let num_payments = params.num_payments();
        let monthly_rate = params.monthly_rate();

        let mut periods = Vec::with_capacity(num_payments as usize);
        let mut balance = params.principal;

        for index in 1..=num_payments {
            let interest_portion = balance.apply_rate(monthly_rate);

            let (payment, principal_portion) = if index == num_payments {
                (balance + interest_portion, balance)
            } else {
                let payment = payment_for(interest_portion);
                (payment, principal_for(payment, interest_portion))
            };

            balance = (balance - principal_portion).max(Money::ZERO);

            periods.push(PaymentPeriod {
                index,
                due_date: due_date(first_due_date, index)?,
                payment,
                principal_portion,
                interest_portion,
                remaining_balance: balance,
            });
        }

        Ok(periods)
    }
}

fn due_date(first_due_date: Option<NaiveDate>, index: u32) -> Result<Option<NaiveDate>> {
    match first_due_date {
        None => Ok(None),
        Some(first) => first
            .checked_add_months(Months::new(index - 1))
            .map(Some)
            .ok_or_else(|| PlannerError::CalculationError {
                message: format!("due date overflow at period {index}"),
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn params(principal: i64, rate: Decimal, years: u32) -> LoanParameters {
        LoanParameters::new(Money::from_major(principal), Rate::from_percent(rate), years)
    }

    #[test]
    fn test_equal_installment_schedule() {
        let loan = params(100_000, dec!(12), 1);
        let schedule = AmortizationSchedule::generate(&loan, RepaymentMethod::EqualInstallment).unwrap();

        assert_eq!(schedule.len(), 12);

        let first = schedule.first_payment().unwrap();
        assert_eq!(first.index, 1);
        assert_eq!(first.interest_portion, Money::from_major(1_000));
        assert_eq!(first.principal_portion + first.interest_portion, first.payment);

        // all payments equal to the cent except possibly the closing one
        let emi = first.payment;
        for period in &schedule.periods[..11] {
            assert_eq!(period.payment, emi);
        }
        let last = schedule.last_payment().unwrap();
        assert!((last.payment - emi).abs() < Money::from_decimal(dec!(0.0001)));

        assert_eq!(last.remaining_balance, Money::ZERO);
        assert_eq!(schedule.total_principal(), loan.principal);
    }

    #[test]
    fn test_equal_installment_interest_declines() {
        let schedule = AmortizationSchedule::generate(
            &params(2_000_000, dec!(3.2), 30),
            RepaymentMethod::EqualInstallment,
        )
        .unwrap();

        assert_eq!(schedule.len(), 360);
        for pair in schedule.periods.windows(2) {
            assert!(pair[1].interest_portion < pair[0].interest_portion);
            assert!(pair[1].principal_portion > pair[0].principal_portion);
        }
        assert_eq!(schedule.total_interest.round_dp(0), Money::from_major(1_113_761));
    }

    #[test]
    fn test_equal_principal_schedule() {
        let loan = params(120_000, dec!(6), 1);
        let schedule = AmortizationSchedule::generate(&loan, RepaymentMethod::EqualPrincipal).unwrap();

        let expected_principal = Money::from_major(10_000);
        for period in &schedule.periods {
            assert_eq!(period.principal_portion, expected_principal);
            assert_eq!(period.payment, period.principal_portion + period.interest_portion);
        }

        // first month interest: 120000 * 0.005
        assert_eq!(schedule.periods[0].payment, Money::from_major(10_600));
        // last month interest: 10000 * 0.005
        assert_eq!(schedule.periods[11].payment, Money::from_major(10_050));

        for pair in schedule.periods.windows(2) {
            assert!(pair[1].payment < pair[0].payment);
        }
        assert_eq!(schedule.last_payment().unwrap().remaining_balance, Money::ZERO);
    }

    #[test]
    fn test_equal_principal_drift_absorbed() {
        // 1,000,000 / 360 does not divide evenly at 8 decimal places
        let schedule = AmortizationSchedule::generate(
            &params(1_000_000, dec!(4.1), 30),
            RepaymentMethod::EqualPrincipal,
        )
        .unwrap();

        let last = schedule.last_payment().unwrap();
        assert_eq!(last.remaining_balance, Money::ZERO);
        assert_eq!(schedule.total_principal(), Money::from_major(1_000_000));

        let regular = schedule.periods[0].principal_portion;
        assert!((last.principal_portion - regular).abs() < Money::from_decimal(dec!(0.00001)));
    }

    #[test]
    fn test_zero_rate_schedules_have_no_interest() {
        let loan = params(360_000, dec!(0), 30);
        for method in [RepaymentMethod::EqualInstallment, RepaymentMethod::EqualPrincipal] {
            let schedule = AmortizationSchedule::generate(&loan, method).unwrap();
            assert_eq!(schedule.total_interest, Money::ZERO);
            assert_eq!(schedule.total_payment, loan.principal);
            assert!(schedule.periods.iter().all(|p| p.payment == Money::from_major(1_000)));
        }
    }

    #[test]
    fn test_equal_principal_pays_less_interest() {
        let loan = params(1_000_000, dec!(4.9), 25);
        let installment = AmortizationSchedule::generate(&loan, RepaymentMethod::EqualInstallment).unwrap();
        let principal = AmortizationSchedule::generate(&loan, RepaymentMethod::EqualPrincipal).unwrap();

        assert!(principal.total_interest < installment.total_interest);
        assert!(principal.periods[0].payment > installment.periods[0].payment);
    }

    #[test]
    fn test_zero_term_rejected() {
        let loan = params(100_000, dec!(5), 0);
        assert!(AmortizationSchedule::generate(&loan, RepaymentMethod::EqualInstallment).is_err());
        assert!(AmortizationSchedule::generate(&loan, RepaymentMethod::EqualPrincipal).is_err());
    }

    #[test]
    fn test_due_dates() {
        let first = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        let schedule = AmortizationSchedule::generate_from(
            &params(12_000, dec!(5), 1),
            RepaymentMethod::EqualInstallment,
            Some(first),
        )
        .unwrap();

        assert_eq!(schedule.periods[0].due_date, Some(first));
        // clamps to month end
        assert_eq!(schedule.periods[1].due_date, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(schedule.periods[11].due_date, NaiveDate::from_ymd_opt(2024, 12, 31));
    }

    #[test]
    fn test_balance_lookup() {
        let loan = params(100_000, dec!(12), 1);
        let schedule = AmortizationSchedule::generate(&loan, RepaymentMethod::EqualPrincipal).unwrap();

        assert_eq!(schedule.balance_after_payment(0), loan.principal);
        assert_eq!(schedule.balance_after_payment(12), Money::ZERO);
        assert!(schedule.get_payment(13).is_none());
    }
}
