use crate::core::amount;
use crate::core::counterparty::CounterpartyId;
use crate::core::instruction::Instruction;
use crate::core::side::Side;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use thiserror::Error;

/// A total that cannot be held exactly in a [`Decimal`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    #[error("USD total settled on {date} cannot be represented exactly")]
    DateTotal { date: NaiveDate },
    #[error("USD total for counterparty {counterparty} cannot be represented exactly")]
    CounterpartyTotal { counterparty: CounterpartyId },
    #[error("USD total settled {side} cannot be represented exactly")]
    SideTotal { side: Side },
}

/// Sums USD trade amounts over a collection of instructions.
///
/// Callers filter the collection first (normally by side). Sums use exact
/// decimal addition; nothing is rounded until display. A total that would
/// need rounding is an error.
pub struct Aggregator;

impl Aggregator {
    /// Total USD amount settled on each day, in ascending date order.
    ///
    /// Grouping uses the adjusted settlement date. Only dates that have at
    /// least one instruction appear; there is no zero-filled date range.
    pub fn sum_by_date<'a, I>(instructions: I) -> Result<BTreeMap<NaiveDate, Decimal>, AggregateError>
    where
        I: IntoIterator<Item = &'a Instruction>,
    {
        let mut totals = BTreeMap::new();
        for instruction in instructions {
            let date = instruction.settlement_date();
            let total = totals.entry(date).or_insert(Decimal::ZERO);
            *total = amount::exact_add(*total, instruction.amount_usd())
                .ok_or(AggregateError::DateTotal { date })?;
        }
        Ok(totals)
    }

    /// Total USD amount per counterparty. Iteration order is unspecified;
    /// use [`Ranker`](crate::report::ranking::Ranker) for ordered output.
    pub fn sum_by_counterparty<'a, I>(
        instructions: I,
    ) -> Result<HashMap<CounterpartyId, Decimal>, AggregateError>
    where
        I: IntoIterator<Item = &'a Instruction>,
    {
        let mut totals = HashMap::new();
        for instruction in instructions {
            let total = totals
                .entry(instruction.counterparty_id().clone())
                .or_insert(Decimal::ZERO);
            *total = amount::exact_add(*total, instruction.amount_usd()).ok_or_else(|| {
                AggregateError::CounterpartyTotal {
                    counterparty: instruction.counterparty_id().clone(),
                }
            })?;
        }
        Ok(totals)
    }
}
