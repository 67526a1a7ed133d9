use std::collections::HashMap;

use tracing::trace;

use crate::decimal::Money;
use crate::errors::Result;
use crate::types::LoanParameters;

use super::formula::monthly_payment;

/// memoizing wrapper around the payment formula
///
/// Entries are pure functions of their keys, so a hit returns exactly what
/// the formula would have computed.
#[derive(Debug, Default)]
pub struct PaymentCache {
    entries: HashMap<LoanParameters, Money>,
    hits: u64,
}

impl PaymentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// monthly payment, computed at most once per parameter set
    pub fn monthly_payment(&mut self, params: &LoanParameters) -> Result<Money> {
        if let Some(payment) = self.entries.get(params) {
            self.hits += 1;
            trace!(principal = %params.principal, term_years = params.term_years, "payment cache hit");
            return Ok(*payment);
        }

        let payment = monthly_payment(params)?;
        self.entries.insert(*params, payment);
        Ok(payment)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
    }
}
