//! Sample instruction data.
//!
//! Provides the two reference instructions used throughout the test suite
//! and a random generator for larger synthetic data sets. Nothing here is
//! needed to compute a report; it only feeds one.

use crate::core::counterparty::Counterparty;
use crate::core::currency::Currency;
use crate::core::instruction::{Instruction, InstructionError, InstructionSet};
use crate::core::side::Side;
use chrono::{Days, NaiveDate};
use log::{info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Configuration for generating a sample instruction set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SampleConfig {
    /// Number of random instructions to generate.
    pub rows: usize,
    /// Fixed RNG seed; `None` draws one from the OS.
    pub seed: Option<u64>,
    /// Prepend the two reference instructions (foo and bar).
    pub include_seed_rows: bool,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            rows: 100,
            seed: None,
            include_seed_rows: true,
        }
    }
}

/// Counterparties available to the generator: the first twenty NASDAQ
/// listings plus the two reference entities.
pub fn sample_counterparties() -> Vec<Counterparty> {
    vec![
        Counterparty::new("PIH", "1347 Property Insurance Holdings, Inc.", dec!(7.1)),
        Counterparty::new("TURN", "180 Degree Capital Corp.", dec!(1.57)),
        Counterparty::new("FLWS", "1-800 FLOWERS.COM, Inc.", dec!(10.15)),
        Counterparty::new("FCCY", "1st Constitution Bancorp (NJ)", dec!(17.5)),
        Counterparty::new("SRCE", "1st Source Corporation", dec!(48.71)),
        Counterparty::new("VNET", "21Vianet Group, Inc.", dec!(5.27)),
        Counterparty::new("TWOU", "2U, Inc.", dec!(44.38)),
        Counterparty::new("JOBS", "51job, Inc.", dec!(41.15)),
        Counterparty::new("CAFD", "8point3 Energy Partners LP", dec!(12.5)),
        Counterparty::new("EGHT", "8x8 Inc", dec!(13.2)),
        Counterparty::new("AVHI", "A V Homes, Inc.", dec!(17.15)),
        Counterparty::new("SHLM", "A. Schulman, Inc.", dec!(30.95)),
        Counterparty::new("AAON", "AAON, Inc.", dec!(37.25)),
        Counterparty::new("ABAX", "ABAXIS, Inc.", dec!(47.4)),
        Counterparty::new("ABEO", "Abeona Therapeutics Inc.", dec!(5.65)),
        Counterparty::new("ABEOW", "Abeona Therapeutics Inc.", dec!(2.77)),
        Counterparty::new("ABIL", "Ability Inc.", dec!(0.7679)),
        Counterparty::new("ABMD", "ABIOMED, Inc.", dec!(130.81)),
        Counterparty::new("AXAS", "Abraxas Petroleum Corporation", dec!(1.7)),
        Counterparty::new("ACIU", "AC Immune SA", dec!(9.1)),
        Counterparty::new("foo", "foo (sample data)", dec!(100.25)),
        Counterparty::new("bar", "bar (sample data)", dec!(150.5)),
    ]
}

/// The two reference instructions.
///
/// `foo` buys 200 units at 100.25 in SGD, asking to settle on Saturday
/// 2016-01-02; `bar` sells 450 units at 150.5 in AED, settling Thursday
/// 2016-01-07.
pub fn seed_instructions() -> Result<Vec<Instruction>, InstructionError> {
    let date = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN);
    let foo = Counterparty::new("foo", "foo (sample data)", dec!(100.25));
    let bar = Counterparty::new("bar", "bar (sample data)", dec!(150.5));

    Ok(vec![
        Instruction::new(
            foo.clone(),
            Side::Outgoing,
            dec!(0.50),
            Currency::lookup("SGD")?,
            date(2016, 1, 1),
            date(2016, 1, 2),
            200,
            foo.reference_price(),
        )?,
        Instruction::new(
            bar.clone(),
            Side::Incoming,
            dec!(0.22),
            Currency::lookup("AED")?,
            date(2016, 1, 5),
            date(2016, 1, 7),
            450,
            bar.reference_price(),
        )?,
    ])
}

/// Generate random instructions around `today`.
///
/// Instruction dates fall within six days either side of `today`;
/// settlement is requested zero to six days after the instruction. FX rates
/// are drawn from (0, 1) at five decimal places and prices within 50% of
/// the counterparty's reference price. Rows that fail validation are
/// skipped.
pub fn generate_random_instructions(config: &SampleConfig, today: NaiveDate) -> Vec<Instruction> {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let counterparties = sample_counterparties();
    let currencies = Currency::all();
    let mut instructions = Vec::with_capacity(config.rows);

    for _ in 0..config.rows {
        let (Some(counterparty), Some(currency)) =
            (counterparties.choose(&mut rng), currencies.choose(&mut rng))
        else {
            break;
        };

        let side = if rng.gen_bool(0.5) {
            Side::Outgoing
        } else {
            Side::Incoming
        };
        let agreed_fx = Decimal::new(rng.gen_range(1..100_000), 5);

        let offset = Days::new(rng.gen_range(0..7));
        let shifted = if rng.gen_bool(0.5) {
            today.checked_add_days(offset)
        } else {
            today.checked_sub_days(offset)
        };
        let instruction_date = shifted.unwrap_or(today);
        let requested_settlement = instruction_date
            .checked_add_days(Days::new(rng.gen_range(0..7)))
            .unwrap_or(instruction_date);

        let units = rng.gen_range(1..1_000_000);
        let price = (counterparty.reference_price() * Decimal::new(rng.gen_range(50_000..150_000), 5))
            .round_dp(4);

        match Instruction::new(
            counterparty.clone(),
            side,
            agreed_fx,
            currency,
            instruction_date,
            requested_settlement,
            units,
            price,
        ) {
            Ok(instruction) => instructions.push(instruction),
            Err(e) => warn!("skipping generated instruction for {}: {}", counterparty, e),
        }
    }

    instructions
}

/// Build the sample data set described by `config`.
pub fn build_sample_set(config: &SampleConfig, today: NaiveDate) -> Result<InstructionSet, InstructionError> {
    let mut set = InstructionSet::new();
    if config.include_seed_rows {
        set.extend(seed_instructions()?);
    }
    set.extend(generate_random_instructions(config, today));
    info!(
        "sample data: {} instructions ({} generated, seed {:?})",
        set.len(),
        config.rows,
        config.seed
    );
    Ok(set)
}
