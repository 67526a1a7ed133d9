use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::decimal::{Money, Rate};
use crate::errors::{PlannerError, Result};

/// ratio for one projected year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    pub year_offset: u32,
    pub projected_income: Money,
    pub ratio_percent: Decimal,
}

/// payment-to-income ratio from year 0 to the end of the term
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSeries {
    pub points: Vec<ProjectionPoint>,
}

impl ProjectionSeries {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// first year whose ratio is at or below `ceiling_percent`
    pub fn first_year_at_or_below(&self, ceiling_percent: Decimal) -> Option<u32> {
        self.points
            .iter()
            .find(|p| p.ratio_percent <= ceiling_percent)
            .map(|p| p.year_offset)
    }
}

/// projects repayment pressure under steady income growth
pub struct PressureProjector {
    annual_growth: Rate,
}

impl PressureProjector {
    pub fn new(annual_growth: Rate) -> Self {
        Self { annual_growth }
    }

    /// one point per year, `term_years + 1` in total
    ///
    /// years where projected income is not positive report a ratio of zero;
    /// income growing past the decimal range is a calculation error
    pub fn project(&self, monthly_payment: Money, monthly_income: Money, term_years: u32) -> Result<ProjectionSeries> {
        let mut points = Vec::with_capacity(term_years as usize + 1);

        for year_offset in 0..=term_years {
            let factor = self.annual_growth.growth_factor(year_offset)?;
            let income = monthly_income
                .as_decimal()
                .checked_mul(factor)
                .ok_or_else(|| PlannerError::CalculationError {
                    message: format!("projected income overflows in year {year_offset}"),
                })?;

            let ratio_percent = if income > Decimal::ZERO {
                monthly_payment.as_decimal() / income * Decimal::ONE_HUNDRED
            } else {
                Decimal::ZERO
            };

            points.push(ProjectionPoint {
                year_offset,
                projected_income: Money::from_decimal(income),
                ratio_percent,
            });
        }

        debug!(
            growth = %self.annual_growth,
            years = points.len(),
            "projected repayment pressure"
        );

        Ok(ProjectionSeries { points })
    }
}
