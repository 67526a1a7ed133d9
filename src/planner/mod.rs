pub mod request;
pub mod response;

use rust_decimal::Decimal;
use tracing::debug;

use crate::affordability::{generate_advice, AffordabilityEvaluator, PressureProjector};
use crate::config::PlannerConfig;
use crate::errors::Result;
use crate::fees::FeeCalculator;
use crate::payments::{AmortizationSchedule, ExtraPaymentSimulator, PaymentCache};
use crate::strategy::StrategyOptimizer;
use crate::types::{LoanParameters, RepaymentMethod};

pub use request::{IncomeProfile, PlanRequest, PlanRequestBuilder, StrategyRequest};
pub use response::{AffordabilityView, PaymentSummary, PlanResponse};

/// runs every calculator for one request
///
/// holds only configuration; each call is independent of the previous one
pub struct MortgagePlanner {
    config: PlannerConfig,
}

impl MortgagePlanner {
    pub fn new(config: PlannerConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// validate the request and compute the full plan
    pub fn plan(&self, request: &PlanRequest) -> Result<PlanResponse> {
        self.plan_inner(request, None)
    }

    /// same as `plan`, reusing monthly payments across calls
    pub fn plan_with_cache(&self, request: &PlanRequest, cache: &mut PaymentCache) -> Result<PlanResponse> {
        self.plan_inner(request, Some(cache))
    }

    fn plan_inner(&self, request: &PlanRequest, cache: Option<&mut PaymentCache>) -> Result<PlanResponse> {
        request.validate(&self.config.limits)?;

        let product_config = &self.config.product_config;
        let loan_amount = request.loan_amount();
        let schedule_rate = request.product.schedule_rate(request.annual_rate, product_config)?;
        let params = LoanParameters::new(loan_amount, schedule_rate, request.term_years);

        debug!(
            house_price = %request.house_price,
            loan_amount = %loan_amount,
            rate = %schedule_rate,
            term_years = request.term_years,
            "planning mortgage"
        );

        // headline payment follows the product, combination loans sum both parts
        let quoted = LoanParameters::new(loan_amount, request.annual_rate, request.term_years);
        let equal_installment = request.product.monthly_payment(&quoted, product_config)?;

        let installment_schedule =
            AmortizationSchedule::generate_from(&params, RepaymentMethod::EqualInstallment, request.first_due_date)?;
        let principal_schedule =
            AmortizationSchedule::generate_from(&params, RepaymentMethod::EqualPrincipal, request.first_due_date)?;

        let payments = PaymentSummary {
            equal_installment,
            equal_principal_first: principal_schedule
                .first_payment()
                .map(|p| p.payment)
                .unwrap_or_default(),
            equal_principal_last: principal_schedule
                .last_payment()
                .map(|p| p.payment)
                .unwrap_or_default(),
            equal_installment_total_interest: installment_schedule.total_interest,
            equal_principal_total_interest: principal_schedule.total_interest,
        };

        let schedule = match request.repayment_method {
            RepaymentMethod::EqualInstallment => installment_schedule,
            RepaymentMethod::EqualPrincipal => principal_schedule,
        };

        let fee_config = request.fees.unwrap_or(self.config.fee_config);
        let fees = FeeCalculator::new(fee_config).calculate(request.house_price);

        let mut affordability = None;
        let mut projection = None;
        let mut advice = Vec::new();

        if let Some(income) = &request.income {
            let tables = &self.config.affordability_config;
            let risk_profile = AffordabilityEvaluator::new(tables.table_for(income.risk_tolerance).clone())
                .evaluate(equal_installment, income.monthly_income)?;
            let pressure_level = AffordabilityEvaluator::new(tables.pressure_levels.clone())
                .evaluate(equal_installment, income.monthly_income)?;

            affordability = Some(response::AffordabilityView {
                risk_profile,
                pressure_level,
            });
            projection = Some(PressureProjector::new(income.annual_growth).project(
                equal_installment,
                income.monthly_income,
                request.term_years,
            )?);
            advice = generate_advice(
                equal_installment,
                income.monthly_income,
                request.term_years,
                schedule.total_interest,
            )?;
        }

        let strategy = match &request.strategy {
            Some(search) => {
                let step = search.step.unwrap_or(self.config.strategy_config.down_payment_step);
                let terms = search
                    .terms
                    .clone()
                    .unwrap_or_else(|| self.config.strategy_config.candidate_terms.clone());
                let optimizer = StrategyOptimizer::new(step, terms);

                let best = match cache {
                    Some(cache) => optimizer.find_best_cached(
                        request.house_price,
                        search.down_payment_range,
                        schedule_rate,
                        cache,
                    )?,
                    None => optimizer.find_best(request.house_price, search.down_payment_range, schedule_rate)?,
                };
                Some(best)
            }
            None => None,
        };

        let extra_payment = match request.extra_yearly_payment {
            Some(extra) => Some(
                ExtraPaymentSimulator::new(params)
                    .with_model(request.extra_payment_model)
                    .simulate(extra)?,
            ),
            None => None,
        };

        let down_payment_ratio_percent =
            request.down_payment.as_decimal() / request.house_price.as_decimal() * Decimal::ONE_HUNDRED;

        Ok(PlanResponse {
            loan_amount,
            down_payment_ratio_percent,
            schedule_rate,
            payments,
            schedule,
            fees,
            affordability,
            projection,
            advice,
            strategy,
            extra_payment,
        })
    }
}

impl Default for MortgagePlanner {
    fn default() -> Self {
        Self {
            config: PlannerConfig::default(),
        }
    }
}
