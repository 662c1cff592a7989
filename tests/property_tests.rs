use approx::assert_relative_eq;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use proptest::prelude::*;
use rust_decimal::Decimal;
use settlement_report::core::calendar;
use settlement_report::core::counterparty::{Counterparty, CounterpartyId};
use settlement_report::core::currency::Currency;
use settlement_report::core::instruction::{Instruction, InstructionError, InstructionSet};
use settlement_report::core::side::Side;
use settlement_report::report::aggregate::Aggregator;
use settlement_report::report::ranking::Ranker;
use std::collections::HashMap;

/// Any date between 1990 and roughly 2050.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (0u64..22_000).prop_map(|offset| {
        NaiveDate::from_ymd_opt(1990, 1, 1)
            .unwrap()
            .checked_add_days(Days::new(offset))
            .unwrap()
    })
}

fn arb_currency() -> impl Strategy<Value = &'static Currency> {
    prop::sample::select(Currency::all().iter().collect::<Vec<_>>())
}

/// Small pool of counterparties so totals collide.
fn arb_counterparty() -> impl Strategy<Value = Counterparty> {
    prop::sample::select(vec!["A", "B", "C", "D", "E"]).prop_map(Counterparty::from_code)
}

/// Positive decimal with up to `scale` decimal places.
fn arb_positive(max_mantissa: i64, scale: u32) -> impl Strategy<Value = Decimal> {
    (1i64..max_mantissa).prop_map(move |m| Decimal::new(m, scale))
}

/// Positive decimal with a random scale in `0..=max_scale`.
fn arb_positive_up_to_scale(max_scale: u32) -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000, 0..=max_scale).prop_map(|(m, scale)| Decimal::new(m, scale))
}

/// `price * units * fx` on the raw mantissas, with trailing zeros dropped
/// only while the scale is past 28. `None` when the value has no exact
/// `Decimal` form.
fn unrounded_product(price: Decimal, units: u32, fx: Decimal) -> Option<Decimal> {
    let mut mantissa = price.mantissa() * i128::from(units) * fx.mantissa();
    let mut scale = price.scale() + fx.scale();
    while scale > 28 && mantissa % 10 == 0 {
        mantissa /= 10;
        scale -= 1;
    }
    (scale <= 28).then(|| Decimal::from_i128_with_scale(mantissa, scale))
}

fn arb_instruction() -> impl Strategy<Value = Instruction> {
    (
        arb_counterparty(),
        prop::bool::ANY,
        arb_positive(100_000, 5),
        arb_currency(),
        arb_date(),
        0u64..7,
        0u32..1_000_000,
        arb_positive(10_000_000, 4),
    )
        .prop_map(|(counterparty, buy, fx, currency, instructed, lag, units, price)| {
            let side = if buy { Side::Outgoing } else { Side::Incoming };
            let requested = instructed.checked_add_days(Days::new(lag)).unwrap();
            Instruction::new(counterparty, side, fx, currency, instructed, requested, units, price)
                .unwrap()
        })
}

fn arb_instruction_set() -> impl Strategy<Value = InstructionSet> {
    prop::collection::vec(arb_instruction(), 0..60).prop_map(|v| v.into_iter().collect())
}

proptest! {
    // Working days are left alone; weekend days roll to the pattern's first
    // working day, forward, within six days.
    #[test]
    fn adjust_rolls_weekends_forward(currency in arb_currency(), date in arb_date()) {
        let adjusted = calendar::adjust(currency, date);
        let expected_first_day = if calendar::uses_shifted_pattern(currency) {
            Weekday::Sun
        } else {
            Weekday::Mon
        };

        if calendar::is_non_working_day(currency, date) {
            prop_assert!(adjusted > date);
            prop_assert!((adjusted - date).num_days() <= 6);
            prop_assert_eq!(adjusted.weekday(), expected_first_day);
        } else {
            prop_assert_eq!(adjusted, date);
        }
        prop_assert!(!calendar::is_non_working_day(currency, adjusted));
    }

    #[test]
    fn adjust_is_idempotent(currency in arb_currency(), date in arb_date()) {
        let once = calendar::adjust(currency, date);
        prop_assert_eq!(calendar::adjust(currency, once), once);
    }

    #[test]
    fn standard_week_weekends(date in arb_date()) {
        let expected = match date.weekday() {
            Weekday::Sat => date.checked_add_days(Days::new(2)).unwrap(),
            Weekday::Sun => date.checked_add_days(Days::new(1)).unwrap(),
            _ => date,
        };
        prop_assert_eq!(calendar::adjust("USD", date), expected);
    }

    #[test]
    fn shifted_week_weekends(date in arb_date()) {
        let expected = match date.weekday() {
            Weekday::Fri => date.checked_add_days(Days::new(2)).unwrap(),
            Weekday::Sat => date.checked_add_days(Days::new(1)).unwrap(),
            _ => date,
        };
        prop_assert_eq!(calendar::adjust("AED", date), expected);
        prop_assert_eq!(calendar::adjust("SAR", date), expected);
    }

    // The exact amount is the unrounded product; the cents view truncates it.
    #[test]
    fn amount_views_agree(instruction in arb_instruction()) {
        let exact = unrounded_product(
            instruction.price_per_unit(),
            instruction.units(),
            instruction.agreed_fx(),
        )
        .unwrap();
        prop_assert_eq!(instruction.amount_usd(), exact);

        let cents = Decimal::from(instruction.amount_usd_cents());
        let scaled = exact * Decimal::ONE_HUNDRED;
        prop_assert!(cents <= scaled);
        prop_assert!(scaled - cents < Decimal::ONE);

        let approx: f64 = exact.to_string().parse().unwrap();
        assert_relative_eq!(instruction.amount_usd_f64(), approx, max_relative = 1e-12);
    }

    // Operand scales up to 20 each: the amount is either exact or refused.
    #[test]
    fn high_scale_amount_is_exact_or_refused(
        price in arb_positive_up_to_scale(20),
        units in 1u32..1_000_000,
        fx in arb_positive_up_to_scale(20),
    ) {
        let result = Instruction::new(
            Counterparty::from_code("A"),
            Side::Outgoing,
            fx,
            Currency::lookup("USD").unwrap(),
            NaiveDate::from_ymd_opt(2017, 5, 1).unwrap(),
            NaiveDate::from_ymd_opt(2017, 5, 2).unwrap(),
            units,
            price,
        );
        match unrounded_product(price, units, fx) {
            Some(exact) => prop_assert_eq!(result.unwrap().amount_usd(), exact),
            None => prop_assert!(
                matches!(result, Err(InstructionError::AmountOverflow { .. })),
                "expected AmountOverflow, got {:?}",
                result
            ),
        }
    }

    #[test]
    fn requested_date_is_preserved(instruction in arb_instruction()) {
        prop_assert_eq!(
            instruction.settlement_date(),
            calendar::adjust(instruction.currency(), instruction.requested_settlement_date())
        );
        prop_assert!(instruction.settlement_date() >= instruction.requested_settlement_date());
    }

    // Daily sums account for every instruction, and come out in date order.
    #[test]
    fn sum_by_date_conserves_total(set in arb_instruction_set()) {
        let by_date = Aggregator::sum_by_date(set.instructions()).unwrap();
        let total: Decimal = by_date.values().copied().sum();
        prop_assert_eq!(Some(total), set.gross_total_usd());

        let dates: Vec<_> = by_date.keys().collect();
        prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(by_date.len() <= set.len());
    }

    #[test]
    fn sides_partition_the_set(set in arb_instruction_set()) {
        let incoming: Decimal = Aggregator::sum_by_date(set.side(Side::Incoming)).unwrap().values().copied().sum();
        let outgoing: Decimal = Aggregator::sum_by_date(set.side(Side::Outgoing)).unwrap().values().copied().sum();
        prop_assert_eq!(Some(incoming + outgoing), set.gross_total_usd());
    }

    // Ranks are 1..=n, totals never increase, ties ordered by code.
    #[test]
    fn ranking_is_dense_and_ordered(set in arb_instruction_set()) {
        let totals = Aggregator::sum_by_counterparty(set.instructions()).unwrap();
        let ranking = Ranker::rank(&totals);

        prop_assert_eq!(ranking.len(), totals.len());
        for (idx, entry) in ranking.iter().enumerate() {
            prop_assert_eq!(entry.rank, idx + 1);
            prop_assert_eq!(entry.total, totals[&entry.counterparty]);
        }
        for pair in ranking.windows(2) {
            prop_assert!(pair[0].total >= pair[1].total);
            if pair[0].total == pair[1].total {
                prop_assert!(pair[0].counterparty < pair[1].counterparty);
            }
        }
    }

    // Ranking depends only on the totals, not on how the map was built.
    #[test]
    fn ranking_is_deterministic(entries in prop::collection::vec((0usize..5, 0i64..4), 0..5)) {
        let codes = ["A", "B", "C", "D", "E"];
        let forward: HashMap<CounterpartyId, Decimal> = entries
            .iter()
            .map(|(c, t)| (CounterpartyId::new(codes[*c]), Decimal::from(*t * 100)))
            .collect();
        let mut reversed: HashMap<CounterpartyId, Decimal> = HashMap::new();
        for (id, total) in forward.iter().collect::<Vec<_>>().into_iter().rev() {
            reversed.insert(id.clone(), *total);
        }
        prop_assert_eq!(Ranker::rank(&forward), Ranker::rank(&reversed));
    }
}
