//! # settlement-report
//!
//! Daily trade settlement reporting.
//!
//! Turns buy/sell instructions into exact USD amounts and working-day
//! settlement dates, then reports the amount settled each day and ranks
//! counterparties, separately for incoming and outgoing flows.
//!
//! ## Architecture
//!
//! - **core** — Currencies, working-week calendar, counterparties, instructions, exact amount arithmetic
//! - **report** — Aggregation by date and counterparty, ranking, the daily report
//! - **simulation** — Reference and randomly generated sample instructions
//! - **config** — Report settings

pub mod config;
pub mod core;
pub mod report;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::calendar;
    pub use crate::core::counterparty::{Counterparty, CounterpartyId};
    pub use crate::core::currency::{Currency, CurrencyCode};
    pub use crate::core::instruction::{Instruction, InstructionInput, InstructionSet};
    pub use crate::core::side::Side;
    pub use crate::report::aggregate::{AggregateError, Aggregator};
    pub use crate::report::daily::DailyReport;
    pub use crate::report::ranking::{RankedEntry, Ranker};
}
