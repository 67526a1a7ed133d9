use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::StrategyConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{PlannerError, Result};
use crate::payments::{monthly_payment, PaymentCache};
use crate::types::LoanParameters;

/// one cell of the down payment / term grid
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrategyCandidate {
    pub down_payment: Money,
    pub loan_term: u32,
    pub loan_amount: Money,
    pub monthly_payment: Money,
}

/// down payment range to search, bounds inclusive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DownPaymentRange {
    pub min: Money,
    pub max: Money,
}

/// exhaustive grid search for the lowest monthly payment
///
/// The lowest payment always sits at the largest down payment and longest
/// term for a flat rate, but the grid is walked in full so rate schedules
/// that vary by term stay correct.
pub struct StrategyOptimizer {
    step: Money,
    terms: Vec<u32>,
}

impl StrategyOptimizer {
    pub fn new(step: Money, terms: Vec<u32>) -> Self {
        Self { step, terms }
    }

    pub fn from_config(config: &StrategyConfig) -> Self {
        Self::new(config.down_payment_step, config.candidate_terms.clone())
    }

    /// every grid cell in search order: down payment ascending, then terms as given
    pub fn candidates(
        &self,
        house_price: Money,
        range: DownPaymentRange,
        annual_rate: Rate,
    ) -> Result<Vec<StrategyCandidate>> {
        let mut cells = Vec::new();
        self.walk(house_price, range, annual_rate, &mut |params: &LoanParameters| monthly_payment(params), |c| {
            cells.push(c)
        })?;
        Ok(cells)
    }

    /// lowest monthly payment; first seen wins ties
    pub fn find_best(
        &self,
        house_price: Money,
        range: DownPaymentRange,
        annual_rate: Rate,
    ) -> Result<StrategyCandidate> {
        self.search(house_price, range, annual_rate, &mut |params: &LoanParameters| monthly_payment(params))
    }

    /// same as `find_best` but reuses payments from a cache
    pub fn find_best_cached(
        &self,
        house_price: Money,
        range: DownPaymentRange,
        annual_rate: Rate,
        cache: &mut PaymentCache,
    ) -> Result<StrategyCandidate> {
        self.search(house_price, range, annual_rate, &mut |params: &LoanParameters| cache.monthly_payment(params))
    }

    fn search<F>(
        &self,
        house_price: Money,
        range: DownPaymentRange,
        annual_rate: Rate,
        payment_fn: &mut F,
    ) -> Result<StrategyCandidate>
    where
        F: FnMut(&LoanParameters) -> Result<Money>,
    {
        let mut best: Option<StrategyCandidate> = None;

        let visited = self.walk(house_price, range, annual_rate, payment_fn, |candidate| {
            let better = best
                .map(|current| candidate.monthly_payment < current.monthly_payment)
                .unwrap_or(true);
            if better {
                best = Some(candidate);
            }
        })?;

        let best = best.ok_or_else(|| PlannerError::NotFound {
            message: format!(
                "no strategy in down payment range {}..={} with {} candidate terms",
                range.min,
                range.max,
                self.terms.len()
            ),
        })?;

        debug!(
            visited,
            down_payment = %best.down_payment,
            loan_term = best.loan_term,
            monthly_payment = %best.monthly_payment,
            "strategy search finished"
        );

        Ok(best)
    }

    /// visit each grid cell, returns the number of cells visited
    fn walk<F, V>(
        &self,
        house_price: Money,
        range: DownPaymentRange,
        annual_rate: Rate,
        payment_fn: &mut F,
        mut visit: V,
    ) -> Result<usize>
    where
        F: FnMut(&LoanParameters) -> Result<Money>,
        V: FnMut(StrategyCandidate),
    {
        if !self.step.is_positive() {
            return Err(PlannerError::invalid_input(
                "down_payment_step",
                format!("step must be positive, got {}", self.step),
            ));
        }

        if range.min > range.max || self.terms.is_empty() {
            return Ok(0);
        }

        if range.max > house_price {
            return Err(PlannerError::invalid_input(
                "down_payment_max",
                format!("down payment {} exceeds house price {}", range.max, house_price),
            ));
        }

        if range.min.is_negative() {
            return Err(PlannerError::invalid_input(
                "down_payment_min",
                format!("down payment cannot be negative: {}", range.min),
            ));
        }

        let mut visited = 0;
        let mut down_payment = range.min;

        while down_payment <= range.max {
            let loan_amount = house_price - down_payment;

            for &loan_term in &self.terms {
                let params = LoanParameters::new(loan_amount, annual_rate, loan_term);
                let monthly_payment = payment_fn(&params)?;

                visit(StrategyCandidate {
                    down_payment,
                    loan_term,
                    loan_amount,
                    monthly_payment,
                });
                visited += 1;
            }

            down_payment += self.step;
        }

        Ok(visited)
    }
}

impl Default for StrategyOptimizer {
    fn default() -> Self {
        Self::from_config(&StrategyConfig::default())
    }
}
