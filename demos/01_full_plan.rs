/// full plan - every calculator behind the planner facade, printed as json
use mortgage_planner::chrono::NaiveDate;
use mortgage_planner::{
    LoanProduct, Money, MortgagePlanner, PlanRequest, PlannerConfig, Rate, RepaymentMethod, RiskTolerance,
};
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=mortgage_planner=debug shows each calculation step
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let planner = MortgagePlanner::new(PlannerConfig::default())?;

    let request = PlanRequest::builder()
        .house_price(Money::from_major(3_000_000))
        .down_payment(Money::from_major(900_000))
        .rate(Rate::from_percent(dec!(3.2)))
        .term_years(30)
        .product(LoanProduct::Combination {
            commercial_ratio_percent: dec!(70),
            fund_rate: Some(Rate::from_percent(dec!(2.85))),
        })
        .repayment_method(RepaymentMethod::EqualPrincipal)
        .first_due_date(NaiveDate::from_ymd_opt(2025, 1, 15).ok_or("bad date")?)
        .income(Money::from_major(25_000), Rate::from_percentage(5), RiskTolerance::from_level(3)?)
        .extra_yearly_payment(Money::from_major(50_000))
        .build()?;

    let response = planner.plan(&request)?;

    println!("loan amount:   {}", response.loan_amount.format_currency("¥"));
    println!("blended rate:  {}", response.schedule_rate);
    println!("upfront cost:  {}", response.upfront_cost(request.down_payment).format_currency("¥"));
    for advice in &response.advice {
        println!("advice: {advice}");
    }

    if let Some(projection) = &response.projection {
        match projection.first_year_at_or_below(dec!(30)) {
            Some(year) => println!("pressure drops to 30% or less after {year} years"),
            None => println!("pressure stays above 30% for the whole term"),
        }
    }

    println!("{}", response.to_json_pretty()?);

    Ok(())
}
