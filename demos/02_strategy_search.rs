/// strategy search - down payment and term grid with a shared payment cache
use mortgage_planner::{DownPaymentRange, Money, PaymentCache, Rate, StrategyOptimizer};
use rust_decimal_macros::dec;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let optimizer = StrategyOptimizer::new(Money::from_major(10_000), vec![10, 20, 30]);
    let range = DownPaymentRange {
        min: Money::from_major(600_000),
        max: Money::from_major(800_000),
    };
    let mut cache = PaymentCache::new();

    // same grid under two rates, then the first rate again from cache
    for rate in [dec!(3.5), dec!(3.2), dec!(3.5)] {
        let best = optimizer.find_best_cached(
            Money::from_major(2_000_000),
            range,
            Rate::from_percent(rate),
            &mut cache,
        )?;

        println!(
            "{rate}%: put down {} over {} years, pay {} a month",
            best.down_payment.format_currency("¥"),
            best.loan_term,
            best.monthly_payment.format_currency("¥")
        );
    }

    println!("cached payments: {}, cache hits: {}", cache.len(), cache.hits());

    Ok(())
}
