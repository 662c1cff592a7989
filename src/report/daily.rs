//! Daily settlement report.
//!
//! Splits an instruction set into incoming and outgoing flows and, for each,
//! lists the USD amount settled per day and ranks counterparties by total.

use crate::core::amount;
use crate::core::instruction::InstructionSet;
use crate::core::side::Side;
use crate::report::aggregate::{AggregateError, Aggregator};
use crate::report::ranking::{RankedEntry, Ranker};
use chrono::NaiveDate;
use log::info;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// USD settled on one day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub total: Decimal,
}

/// Report for one side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideReport {
    pub side: Side,
    /// Ascending by date.
    pub daily: Vec<DailyTotal>,
    pub ranking: Vec<RankedEntry>,
    /// Sum over every day on this side.
    pub total: Decimal,
    pub instruction_count: usize,
}

impl SideReport {
    /// Fails if any daily, counterparty or side total cannot be represented
    /// exactly.
    pub fn build(set: &InstructionSet, side: Side) -> Result<Self, AggregateError> {
        let daily: Vec<DailyTotal> = Aggregator::sum_by_date(set.side(side))?
            .into_iter()
            .map(|(date, total)| DailyTotal { date, total })
            .collect();
        let ranking = Ranker::rank(&Aggregator::sum_by_counterparty(set.side(side))?);
        let total = amount::exact_sum(daily.iter().map(|d| d.total))
            .ok_or(AggregateError::SideTotal { side })?;

        Ok(Self {
            side,
            daily,
            ranking,
            total,
            instruction_count: set.side(side).count(),
        })
    }
}

/// The full report: incoming (sell) and outgoing (buy) flows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyReport {
    pub incoming: SideReport,
    pub outgoing: SideReport,
}

impl DailyReport {
    pub fn build(set: &InstructionSet) -> Result<Self, AggregateError> {
        let report = Self {
            incoming: SideReport::build(set, Side::Incoming)?,
            outgoing: SideReport::build(set, Side::Outgoing)?,
        };
        info!(
            "report built from {} instructions ({} incoming, {} outgoing, {} counterparties, {} settlement dates rolled)",
            set.len(),
            report.incoming.instruction_count,
            report.outgoing.instruction_count,
            set.counterparties().len(),
            set.adjusted_count()
        );
        Ok(report)
    }

    pub fn side(&self, side: Side) -> &SideReport {
        match side {
            Side::Incoming => &self.incoming,
            Side::Outgoing => &self.outgoing,
        }
    }
}

impl fmt::Display for DailyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for side in [&self.incoming, &self.outgoing] {
            writeln!(
                f,
                "=== Amount in USD settled {} ({}) every day ===",
                side.side,
                side.side.action()
            )?;
            for day in &side.daily {
                writeln!(f, "{} => {}", day.date, format_usd(day.total))?;
            }
        }
        for side in [&self.incoming, &self.outgoing] {
            let label = match side.side {
                Side::Incoming => "Incoming",
                Side::Outgoing => "Outgoing",
            };
            writeln!(f, "=== Rank {} ({}) ===", label, side.side.action())?;
            for entry in &side.ranking {
                writeln!(
                    f,
                    "{}. {} => {}",
                    entry.rank,
                    entry.counterparty,
                    format_usd(entry.total)
                )?;
            }
        }
        Ok(())
    }
}

/// Format a USD amount for display: `$` sign, comma thousands separators,
/// two decimals rounded half-to-even.
///
/// ```
/// use rust_decimal_macros::dec;
/// use settlement_report::report::daily::format_usd;
///
/// assert_eq!(format_usd(dec!(14899.5)), "$14,899.50");
/// assert_eq!(format_usd(dec!(-0.125)), "-$0.12");
/// ```
pub fn format_usd(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    format!("{sign}${grouped}.{cents}")
}
