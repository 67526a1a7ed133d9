use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::{FeeConfig, InputLimits};
use crate::decimal::{Money, Rate};
use crate::payments::ExtraPaymentModel;
use crate::errors::{PlannerError, Result};
use crate::products::LoanProduct;
use crate::strategy::DownPaymentRange;
use crate::types::{RepaymentMethod, RiskTolerance};
use crate::validation::validate_range;

/// household income used for affordability, projection and advice
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IncomeProfile {
    pub monthly_income: Money,
    pub annual_growth: Rate,
    pub risk_tolerance: RiskTolerance,
}

/// optional down payment / term search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRequest {
    pub down_payment_range: DownPaymentRange,
    /// configured candidate terms when absent
    pub terms: Option<Vec<u32>>,
    /// configured step when absent
    pub step: Option<Money>,
}

/// everything one calculation needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub house_price: Money,
    pub down_payment: Money,
    pub annual_rate: Rate,
    pub term_years: u32,
    pub product: LoanProduct,
    pub repayment_method: RepaymentMethod,
    /// configured fee rates when absent
    pub fees: Option<FeeConfig>,
    pub first_due_date: Option<NaiveDate>,
    pub income: Option<IncomeProfile>,
    pub strategy: Option<StrategyRequest>,
    pub extra_yearly_payment: Option<Money>,
    #[serde(default)]
    pub extra_payment_model: ExtraPaymentModel,
}

impl PlanRequest {
    pub fn builder() -> PlanRequestBuilder {
        PlanRequestBuilder::new()
    }

    pub fn loan_amount(&self) -> Money {
        self.house_price - self.down_payment
    }

    /// reject input outside the accepted ranges, naming the offending field
    pub fn validate(&self, limits: &InputLimits) -> Result<()> {
        validate_range(
            self.house_price,
            limits.min_house_price,
            limits.max_house_price,
            "house_price",
        )?;
        validate_range(self.down_payment, Money::ZERO, self.house_price, "down_payment")?;
        validate_range(self.annual_rate, Rate::ZERO, limits.max_annual_rate, "annual_rate")?;

        if !limits.allowed_terms.contains(&self.term_years) {
            return Err(PlannerError::invalid_input(
                "term_years",
                format!("term must be one of {:?}, got {}", limits.allowed_terms, self.term_years),
            ));
        }

        if let Some(fees) = &self.fees {
            validate_range(fees.deed_tax_rate, Rate::ZERO, limits.max_fee_rate, "deed_tax_rate")?;
            validate_range(fees.agent_fee_rate, Rate::ZERO, limits.max_fee_rate, "agent_fee_rate")?;
            validate_range(fees.other_fees, Money::ZERO, limits.max_other_fees, "other_fees")?;
        }

        if let Some(income) = &self.income {
            if !income.monthly_income.is_positive() {
                return Err(PlannerError::invalid_input(
                    "monthly_income",
                    "income must be positive, omit the income profile to skip affordability",
                ));
            }
            validate_range(income.annual_growth, Rate::ZERO, limits.max_income_growth, "annual_growth")?;
        }

        if let Some(extra) = self.extra_yearly_payment {
            if extra.is_negative() {
                return Err(PlannerError::invalid_input(
                    "extra_yearly_payment",
                    format!("extra payment cannot be negative: {extra}"),
                ));
            }
        }

        if let Some(strategy) = &self.strategy {
            let range = strategy.down_payment_range;
            validate_range(range.min, Money::ZERO, self.house_price, "down_payment_min")?;
            validate_range(range.max, Money::ZERO, self.house_price, "down_payment_max")?;
        }

        Ok(())
    }
}

/// builder for plan requests
pub struct PlanRequestBuilder {
    house_price: Option<Money>,
    down_payment: Option<Money>,
    annual_rate: Option<Rate>,
    term_years: Option<u32>,
    product: LoanProduct,
    repayment_method: RepaymentMethod,
    fees: Option<FeeConfig>,
    first_due_date: Option<NaiveDate>,
    income: Option<IncomeProfile>,
    strategy: Option<StrategyRequest>,
    extra_yearly_payment: Option<Money>,
    extra_payment_model: ExtraPaymentModel,
}

impl PlanRequestBuilder {
    pub fn new() -> Self {
        Self {
            house_price: None,
            down_payment: None,
            annual_rate: None,
            term_years: None,
            product: LoanProduct::Commercial,
            repayment_method: RepaymentMethod::EqualInstallment,
            fees: None,
            first_due_date: None,
            income: None,
            strategy: None,
            extra_yearly_payment: None,
            extra_payment_model: ExtraPaymentModel::Annual,
        }
    }

    pub fn house_price(mut self, price: Money) -> Self {
        self.house_price = Some(price);
        self
    }

    pub fn down_payment(mut self, amount: Money) -> Self {
        self.down_payment = Some(amount);
        self
    }

    pub fn rate(mut self, rate: Rate) -> Self {
        self.annual_rate = Some(rate);
        self
    }

    pub fn term_years(mut self, years: u32) -> Self {
        self.term_years = Some(years);
        self
    }

    pub fn product(mut self, product: LoanProduct) -> Self {
        self.product = product;
        self
    }

    pub fn repayment_method(mut self, method: RepaymentMethod) -> Self {
        self.repayment_method = method;
        self
    }

    pub fn fees(mut self, fees: FeeConfig) -> Self {
        self.fees = Some(fees);
        self
    }

    pub fn first_due_date(mut self, date: NaiveDate) -> Self {
        self.first_due_date = Some(date);
        self
    }

    pub fn income(mut self, monthly_income: Money, annual_growth: Rate, risk_tolerance: RiskTolerance) -> Self {
        self.income = Some(IncomeProfile {
            monthly_income,
            annual_growth,
            risk_tolerance,
        });
        self
    }

    pub fn strategy(mut self, strategy: StrategyRequest) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn extra_yearly_payment(mut self, amount: Money) -> Self {
        self.extra_yearly_payment = Some(amount);
        self
    }

    pub fn extra_payment_model(mut self, model: ExtraPaymentModel) -> Self {
        self.extra_payment_model = model;
        self
    }

    pub fn build(self) -> Result<PlanRequest> {
        let house_price = self
            .house_price
            .ok_or_else(|| PlannerError::invalid_input("house_price", "house price required"))?;
        let down_payment = self
            .down_payment
            .ok_or_else(|| PlannerError::invalid_input("down_payment", "down payment required"))?;
        let annual_rate = self
            .annual_rate
            .ok_or_else(|| PlannerError::invalid_input("annual_rate", "rate required"))?;
        let term_years = self
            .term_years
            .ok_or_else(|| PlannerError::invalid_input("term_years", "term required"))?;

        Ok(PlanRequest {
            house_price,
            down_payment,
            annual_rate,
            term_years,
            product: self.product,
            repayment_method: self.repayment_method,
            fees: self.fees,
            first_due_date: self.first_due_date,
            income: self.income,
            strategy: self.strategy,
            extra_yearly_payment: self.extra_yearly_payment,
            extra_payment_model: self.extra_payment_model,
        })
    }
}

impl Default for PlanRequestBuilder {
    fn default() -> Self {
        Self::new()
    }
}
