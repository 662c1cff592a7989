use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Unique code of a counterparty, e.g. a ticker such as `"AAON"`.
///
/// Codes order lexicographically; rankings use this order to break ties.
///
/// # Examples
///
/// ```
/// use settlement_report::core::counterparty::CounterpartyId;
///
/// let a = CounterpartyId::new("AAON");
/// let b = CounterpartyId::new("ABAX");
/// assert!(a < b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CounterpartyId(String);

impl CounterpartyId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the string representation of this counterparty code.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CounterpartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CounterpartyId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The financial entity whose shares an instruction buys or sells.
///
/// Identity is the code alone: two records with the same code are the same
/// counterparty whatever their name or reference price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Counterparty {
    id: CounterpartyId,
    name: String,
    /// Last known USD price of one unit. Only the sample generator reads it.
    reference_price: Decimal,
}

impl Counterparty {
    pub fn new(
        id: impl Into<CounterpartyId>,
        name: impl Into<String>,
        reference_price: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            reference_price,
        }
    }

    /// A counterparty known only by its code; the name repeats the code.
    pub fn from_code(code: &str) -> Self {
        Self::new(code, code, Decimal::ZERO)
    }

    pub fn id(&self) -> &CounterpartyId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference_price(&self) -> Decimal {
        self.reference_price
    }
}

impl PartialEq for Counterparty {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Counterparty {}

impl Hash for Counterparty {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Counterparty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
