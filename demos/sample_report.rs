//! Reference sample report.
//!
//! Builds the two reference instructions plus a handful of seeded random
//! ones, then walks through each stage of the report.

use chrono::NaiveDate;
use settlement_report::core::calendar;
use settlement_report::core::side::Side;
use settlement_report::report::aggregate::Aggregator;
use settlement_report::report::daily::{format_usd, DailyReport};
use settlement_report::report::ranking::Ranker;
use settlement_report::simulation::sample_data::{build_sample_set, SampleConfig};

fn main() {
    println!("━━━ settlement-report: sample report ━━━\n");

    let config = SampleConfig {
        rows: 12,
        seed: Some(5),
        include_seed_rows: true,
    };
    let today = NaiveDate::from_ymd_opt(2017, 5, 5).expect("valid date");
    let set = build_sample_set(&config, today).expect("sample data is valid");

    println!("Instructions ({}):", set.len());
    for instruction in set.instructions() {
        let marker = if calendar::uses_shifted_pattern(instruction.currency()) {
            "*"
        } else {
            " "
        };
        println!(
            "{} {:<6} {} {} {:>7} x {:>10} @ {:<8} requested {} ({}) settles {} => {}",
            marker,
            instruction.counterparty_id().as_str(),
            instruction.side().flag(),
            instruction.currency(),
            instruction.units(),
            instruction.price_per_unit().to_string(),
            instruction.agreed_fx().to_string(),
            instruction.requested_settlement_date(),
            instruction.requested_settlement_date().format("%a"),
            instruction.settlement_date(),
            format_usd(instruction.amount_usd()),
        );
    }
    println!("(* Sunday–Thursday working week)\n");

    for side in Side::ALL {
        println!("━━━ {} ━━━", side);
        for (date, total) in Aggregator::sum_by_date(set.side(side)).expect("exact daily totals") {
            println!("  {} {}", date, format_usd(total));
        }
        let totals = Aggregator::sum_by_counterparty(set.side(side)).expect("exact counterparty totals");
        for entry in Ranker::rank(&totals) {
            println!("  #{} {} {}", entry.rank, entry.counterparty, format_usd(entry.total));
        }
        println!();
    }

    println!("━━━ Full report ━━━\n");
    print!("{}", DailyReport::build(&set).expect("exact report totals"));
}
