//! Exact decimal arithmetic for USD amounts.
//!
//! `rust_decimal` rounds quietly once a result needs more than 28 decimal
//! places or a mantissa wider than 96 bits. Amounts here must never be
//! rounded, so products and sums are worked out on the raw mantissas and
//! rejected when the exact value cannot be held in a [`Decimal`].

use rust_decimal::Decimal;

const MAX_SCALE: u32 = 28;
/// 2^96 - 1, the widest mantissa a `Decimal` can hold.
const MAX_MANTISSA: i128 = 79_228_162_514_264_337_593_543_950_335;

/// `lhs * rhs` without rounding, or `None` if the exact product does not fit.
///
/// ```
/// use rust_decimal_macros::dec;
/// use settlement_report::core::amount::exact_mul;
///
/// assert_eq!(exact_mul(dec!(100.25), dec!(200)), Some(dec!(20050.00)));
/// // 32 decimal places: not representable.
/// assert_eq!(exact_mul(dec!(3.0000000000000003), dec!(0.0000000000000003)), None);
/// ```
pub fn exact_mul(lhs: Decimal, rhs: Decimal) -> Option<Decimal> {
    mul_parts(lhs, rhs).or_else(|| mul_parts(lhs.normalize(), rhs.normalize()))
}

/// `lhs + rhs` without rounding, or `None` if the exact sum does not fit.
pub fn exact_add(lhs: Decimal, rhs: Decimal) -> Option<Decimal> {
    add_parts(lhs, rhs).or_else(|| add_parts(lhs.normalize(), rhs.normalize()))
}

/// Sum every amount exactly. `None` as soon as a partial sum does not fit.
pub fn exact_sum<I>(amounts: I) -> Option<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| exact_add(acc, amount))
}

fn mul_parts(lhs: Decimal, rhs: Decimal) -> Option<Decimal> {
    let mantissa = lhs.mantissa().checked_mul(rhs.mantissa())?;
    from_parts(mantissa, lhs.scale() + rhs.scale())
}

fn add_parts(lhs: Decimal, rhs: Decimal) -> Option<Decimal> {
    let scale = lhs.scale().max(rhs.scale());
    let align = |d: Decimal| {
        10i128
            .checked_pow(scale - d.scale())
            .and_then(|factor| d.mantissa().checked_mul(factor))
    };
    let mantissa = align(lhs)?.checked_add(align(rhs)?)?;
    from_parts(mantissa, scale)
}

// Only trailing zeros may be dropped to make the value fit.
fn from_parts(mut mantissa: i128, mut scale: u32) -> Option<Decimal> {
    while (scale > MAX_SCALE || mantissa.abs() > MAX_MANTISSA) && scale > 0 && mantissa % 10 == 0 {
        mantissa /= 10;
        scale -= 1;
    }
    if scale > MAX_SCALE || mantissa.abs() > MAX_MANTISSA {
        return None;
    }
    Decimal::try_from_i128_with_scale(mantissa, scale).ok()
}
