use crate::core::counterparty::CounterpartyId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One line of a counterparty ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    /// 1 for the largest total.
    pub rank: usize,
    pub counterparty: CounterpartyId,
    pub total: Decimal,
}

impl fmt::Display for RankedEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {} => {}", self.rank, self.counterparty, self.total)
    }
}

/// Orders per-counterparty totals into a ranking.
pub struct Ranker;

impl Ranker {
    /// Rank counterparties by total, largest first.
    ///
    /// Every entry gets its own rank: equal totals are not given equal
    /// rank. Ties are broken by counterparty code ascending so the output
    /// does not depend on map iteration order.
    pub fn rank(totals: &HashMap<CounterpartyId, Decimal>) -> Vec<RankedEntry> {
        let mut sorted: Vec<(&CounterpartyId, &Decimal)> = totals.iter().collect();
        sorted.sort_by(|(id_a, total_a), (id_b, total_b)| {
            total_b.cmp(total_a).then_with(|| id_a.cmp(id_b))
        });

        sorted
            .into_iter()
            .enumerate()
            .map(|(idx, (counterparty, total))| RankedEntry {
                rank: idx + 1,
                counterparty: counterparty.clone(),
                total: *total,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn totals(entries: &[(&str, Decimal)]) -> HashMap<CounterpartyId, Decimal> {
        entries
            .iter()
            .map(|(id, total)| (CounterpartyId::new(*id), *total))
            .collect()
    }

    #[test]
    fn test_rank_descending() {
        let ranking = Ranker::rank(&totals(&[("A", dec!(10)), ("B", dec!(30)), ("C", dec!(20))]));
        let order: Vec<_> = ranking.iter().map(|e| e.counterparty.as_str()).collect();
        assert_eq!(order, vec!["B", "C", "A"]);
        let ranks: Vec<_> = ranking.iter().map(|e| e.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_ties_broken_by_code() {
        let ranking = Ranker::rank(&totals(&[
            ("ZETA", dec!(300)),
            ("LOW", dec!(100)),
            ("ALPHA", dec!(300.00)),
        ]));
        assert_eq!(
            ranking,
            vec![
                RankedEntry {
                    rank: 1,
                    counterparty: CounterpartyId::new("ALPHA"),
                    total: dec!(300),
                },
                RankedEntry {
                    rank: 2,
                    counterparty: CounterpartyId::new("ZETA"),
                    total: dec!(300),
                },
                RankedEntry {
                    rank: 3,
                    counterparty: CounterpartyId::new("LOW"),
                    total: dec!(100),
                },
            ]
        );
    }

    #[test]
    fn test_rank_is_stable_across_runs() {
        let input = totals(&[("C", dec!(5)), ("A", dec!(5)), ("B", dec!(5)), ("D", dec!(5))]);
        let first = Ranker::rank(&input);
        for _ in 0..10 {
            let rebuilt: HashMap<_, _> = input.clone().into_iter().collect();
            assert_eq!(Ranker::rank(&rebuilt), first);
        }
        let order: Vec<_> = first.iter().map(|e| e.counterparty.as_str()).collect();
        assert_eq!(order, vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn test_empty_ranking() {
        assert!(Ranker::rank(&HashMap::new()).is_empty());
    }

    #[test]
    fn test_entry_display() {
        let entry = RankedEntry {
            rank: 1,
            counterparty: CounterpartyId::new("foo"),
            total: dec!(10025.00),
        };
        assert_eq!(entry.to_string(), "1. foo => 10025.00");
    }
}
