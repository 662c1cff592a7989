use crate::core::amount;
use crate::core::calendar;
use crate::core::counterparty::{Counterparty, CounterpartyId};
use crate::core::currency::{Currency, CurrencyCode, CurrencyError};
use crate::core::side::{ParseSideError, Side};
use chrono::NaiveDate;
use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize, Serializer};
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Errors raised while constructing an [`Instruction`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InstructionError {
    #[error(transparent)]
    Currency(#[from] CurrencyError),
    #[error(transparent)]
    Side(#[from] ParseSideError),
    #[error("{field} must be positive, got {value}")]
    Validation { field: &'static str, value: Decimal },
    #[error("USD amount of {price} x {units} x {fx} is out of range")]
    AmountOverflow {
        price: Decimal,
        units: u32,
        fx: Decimal,
    },
}

/// A settled buy or sell instruction.
///
/// Everything is worked out once, when the instruction is created: the
/// settlement date is rolled forward to a working day of the trade
/// currency, and the USD amount is computed as
/// `price_per_unit * units * agreed_fx` with exact decimal arithmetic.
/// Instructions are immutable afterwards.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use rust_decimal_macros::dec;
/// use settlement_report::core::counterparty::Counterparty;
/// use settlement_report::core::currency::Currency;
/// use settlement_report::core::instruction::Instruction;
/// use settlement_report::core::side::Side;
///
/// let foo = Instruction::new(
///     Counterparty::from_code("foo"),
///     Side::Outgoing,
///     dec!(0.50),
///     Currency::lookup("SGD").unwrap(),
///     NaiveDate::from_ymd_opt(2016, 1, 1).unwrap(),
///     NaiveDate::from_ymd_opt(2016, 1, 2).unwrap(),
///     200,
///     dec!(100.25),
/// )
/// .unwrap();
///
/// // Saturday rolls to Monday.
/// assert_eq!(foo.settlement_date(), NaiveDate::from_ymd_opt(2016, 1, 4).unwrap());
/// assert_eq!(foo.amount_usd(), dec!(10025.00));
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct Instruction {
    counterparty: Counterparty,
    side: Side,
    /// Rate of the trade currency to USD agreed at instruction time.
    agreed_fx: Decimal,
    #[serde(serialize_with = "serialize_currency_code")]
    currency: &'static Currency,
    instruction_date: NaiveDate,
    /// The date the client asked for, kept for audit.
    requested_settlement_date: NaiveDate,
    /// The date settlement actually happens.
    settlement_date: NaiveDate,
    units: u32,
    price_per_unit: Decimal,
    amount_usd: Decimal,
    amount_usd_f64: f64,
    amount_usd_cents: i64,
}

fn serialize_currency_code<S: Serializer>(
    currency: &&'static Currency,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(currency.code())
}

impl Instruction {
    /// Create an instruction from its agreed terms.
    ///
    /// # Errors
    ///
    /// Fails with [`InstructionError::Validation`] if `price_per_unit` or
    /// `agreed_fx` is zero or negative, and with
    /// [`InstructionError::AmountOverflow`] if the exact USD amount cannot be
    /// held in a [`Decimal`] (more than 28 decimal places or a mantissa wider
    /// than 96 bits). The amount is never rounded to make it fit.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        counterparty: Counterparty,
        side: Side,
        agreed_fx: Decimal,
        currency: &'static Currency,
        instruction_date: NaiveDate,
        requested_settlement_date: NaiveDate,
        units: u32,
        price_per_unit: Decimal,
    ) -> Result<Self, InstructionError> {
        if price_per_unit <= Decimal::ZERO {
            return Err(InstructionError::Validation {
                field: "price_per_unit",
                value: price_per_unit,
            });
        }
        if agreed_fx <= Decimal::ZERO {
            return Err(InstructionError::Validation {
                field: "agreed_fx",
                value: agreed_fx,
            });
        }

        let settlement_date = calendar::adjust(currency, requested_settlement_date);
        if settlement_date != requested_settlement_date {
            debug!(
                "{} settlement for {} rolled from {} to {}",
                currency, counterparty, requested_settlement_date, settlement_date
            );
        }

        let overflow = || InstructionError::AmountOverflow {
            price: price_per_unit,
            units,
            fx: agreed_fx,
        };
        let amount_usd = amount::exact_mul(price_per_unit, Decimal::from(units))
            .and_then(|gross| amount::exact_mul(gross, agreed_fx))
            .ok_or_else(overflow)?;
        // Lossy: nearest f64.
        let amount_usd_f64 = amount_usd.to_f64().ok_or_else(overflow)?;
        // Truncates toward zero; fractions of a cent are dropped, not rounded.
        let amount_usd_cents = amount_usd
            .round_dp_with_strategy(2, RoundingStrategy::ToZero)
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .ok_or_else(overflow)?;

        Ok(Self {
            counterparty,
            side,
            agreed_fx,
            currency,
            instruction_date,
            requested_settlement_date,
            settlement_date,
            units,
            price_per_unit,
            amount_usd,
            amount_usd_f64,
            amount_usd_cents,
        })
    }

    /// Build an instruction from a raw input record, resolving its currency
    /// code and side flag.
    pub fn from_input(input: &InstructionInput) -> Result<Self, InstructionError> {
        Self::new(
            Counterparty::from_code(&input.entity),
            input.side.parse()?,
            input.agreed_fx,
            input.currency.resolve()?,
            input.instruction_date,
            input.settlement_date,
            input.units,
            input.price_per_unit,
        )
    }

    // --- Accessors ---

    pub fn counterparty(&self) -> &Counterparty {
        &self.counterparty
    }

    pub fn counterparty_id(&self) -> &CounterpartyId {
        self.counterparty.id()
    }

    pub fn side(&self) -> Side {
        self.side
    }

    pub fn agreed_fx(&self) -> Decimal {
        self.agreed_fx
    }

    pub fn currency(&self) -> &'static Currency {
        self.currency
    }

    pub fn instruction_date(&self) -> NaiveDate {
        self.instruction_date
    }

    /// The settlement date as originally requested, before any roll-forward.
    ///
    /// Kept for audit only. Reporting must use [`Instruction::settlement_date`].
    pub fn requested_settlement_date(&self) -> NaiveDate {
        self.requested_settlement_date
    }

    /// The working-day settlement date.
    pub fn settlement_date(&self) -> NaiveDate {
        self.settlement_date
    }

    /// Whether the requested date fell on a weekend and was rolled forward.
    pub fn is_settlement_adjusted(&self) -> bool {
        self.settlement_date != self.requested_settlement_date
    }

    pub fn units(&self) -> u32 {
        self.units
    }

    pub fn price_per_unit(&self) -> Decimal {
        self.price_per_unit
    }

    /// Exact USD amount: `price_per_unit * units * agreed_fx`.
    pub fn amount_usd(&self) -> Decimal {
        self.amount_usd
    }

    /// USD amount as `f64`. May lose precision.
    pub fn amount_usd_f64(&self) -> f64 {
        self.amount_usd_f64
    }

    /// USD amount in whole cents, truncated toward zero (not rounded).
    pub fn amount_usd_cents(&self) -> i64 {
        self.amount_usd_cents
    }
}

// The f64 and cents views are derived from `amount_usd` and take no part
// in identity.
impl PartialEq for Instruction {
    fn eq(&self, other: &Self) -> bool {
        self.counterparty == other.counterparty
            && self.side == other.side
            && self.agreed_fx == other.agreed_fx
            && self.currency.code() == other.currency.code()
            && self.instruction_date == other.instruction_date
            && self.requested_settlement_date == other.requested_settlement_date
            && self.settlement_date == other.settlement_date
            && self.units == other.units
            && self.price_per_unit == other.price_per_unit
            && self.amount_usd == other.amount_usd
    }
}

impl Eq for Instruction {}

impl Hash for Instruction {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.counterparty.hash(state);
        self.side.hash(state);
        self.agreed_fx.hash(state);
        self.currency.code().hash(state);
        self.instruction_date.hash(state);
        self.requested_settlement_date.hash(state);
        self.settlement_date.hash(state);
        self.units.hash(state);
        self.price_per_unit.hash(state);
        self.amount_usd.hash(state);
    }
}

/// Raw instruction fields as they arrive from a data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstructionInput {
    /// Counterparty code.
    pub entity: String,
    /// `B`/`S` flag, or `Buy`/`Sell`/`Outgoing`/`Incoming`.
    pub side: String,
    pub agreed_fx: Decimal,
    pub currency: CurrencyCode,
    pub instruction_date: NaiveDate,
    pub settlement_date: NaiveDate,
    pub units: u32,
    pub price_per_unit: Decimal,
}

impl From<&Instruction> for InstructionInput {
    fn from(instruction: &Instruction) -> Self {
        Self {
            entity: instruction.counterparty_id().to_string(),
            side: instruction.side().flag().to_string(),
            agreed_fx: instruction.agreed_fx(),
            currency: CurrencyCode::new(instruction.currency().code()),
            instruction_date: instruction.instruction_date(),
            settlement_date: instruction.requested_settlement_date(),
            units: instruction.units(),
            price_per_unit: instruction.price_per_unit(),
        }
    }
}

/// An in-memory collection of instructions awaiting reporting.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InstructionSet {
    instructions: Vec<Instruction>,
}

impl InstructionSet {
    pub fn new() -> Self {
        Self {
            instructions: Vec::new(),
        }
    }

    /// Build a set from raw inputs. Fails on the first invalid record.
    pub fn from_inputs<'a, I>(inputs: I) -> Result<Self, InstructionError>
    where
        I: IntoIterator<Item = &'a InstructionInput>,
    {
        inputs.into_iter().map(Instruction::from_input).collect()
    }

    pub fn add(&mut self, instruction: Instruction) {
        self.instructions.push(instruction);
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }

    /// Instructions on one side only.
    pub fn side(&self, side: Side) -> impl Iterator<Item = &Instruction> + '_ {
        self.instructions.iter().filter(move |i| i.side() == side)
    }

    /// Exact total USD value of all instructions, both sides. `None` if the
    /// total cannot be held without rounding.
    pub fn gross_total_usd(&self) -> Option<Decimal> {
        amount::exact_sum(self.instructions.iter().map(|i| i.amount_usd()))
    }

    /// All unique counterparties referenced in this set, ordered by code.
    pub fn counterparties(&self) -> Vec<CounterpartyId> {
        let mut ids: Vec<CounterpartyId> = self
            .instructions
            .iter()
            .map(|i| i.counterparty_id().clone())
            .collect();
        ids.sort();
        ids.dedup();
        ids
    }

    /// Number of instructions whose settlement date was rolled forward.
    pub fn adjusted_count(&self) -> usize {
        self.instructions
            .iter()
            .filter(|i| i.is_settlement_adjusted())
            .count()
    }
}

impl FromIterator<Instruction> for InstructionSet {
    fn from_iter<T: IntoIterator<Item = Instruction>>(iter: T) -> Self {
        Self {
            instructions: iter.into_iter().collect(),
        }
    }
}

impl Extend<Instruction> for InstructionSet {
    fn extend<T: IntoIterator<Item = Instruction>>(&mut self, iter: T) {
        self.instructions.extend(iter);
    }
}
