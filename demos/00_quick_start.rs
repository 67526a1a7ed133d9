/// quick start - monthly payment and schedule for one loan
use mortgage_planner::{AmortizationSchedule, LoanParameters, Money, Rate, RepaymentMethod};
use rust_decimal_macros::dec;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 2,000,000 over 30 years at 3.2%
    let params = LoanParameters::new(Money::from_major(2_000_000), Rate::from_percent(dec!(3.2)), 30);

    for method in [RepaymentMethod::EqualInstallment, RepaymentMethod::EqualPrincipal] {
        let schedule = AmortizationSchedule::generate(&params, method)?;
        let first = schedule.first_payment().map(|p| p.payment).unwrap_or_default();

        println!(
            "{:?}: first payment {}, total interest {}",
            method,
            first.format_currency("¥"),
            schedule.total_interest.format_currency("¥")
        );
    }

    Ok(())
}
