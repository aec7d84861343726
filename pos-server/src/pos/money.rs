//! Money validation and check totals
//!
//! Prices travel as `f64` on the wire and in storage; every sum is computed
//! with `rust_decimal` and rounded half away from zero to 2 decimal places.

use super::error::{PosError, PosResult};
use rust_decimal::prelude::*;
use shared::models::Line;

const DECIMAL_PLACES: u32 = 2;

/// Maximum allowed unit price
pub const MAX_PRICE: f64 = 1_000_000.0;

/// Maximum allowed quantity per line
pub const MAX_QUANTITY: i32 = 9999;

fn require_finite(value: f64, field: &str) -> PosResult<()> {
    if !value.is_finite() {
        return Err(PosError::invalid(format!(
            "{field} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

/// `0 <= price <= MAX_PRICE`, finite
pub fn validate_price(price: f64) -> PosResult<()> {
    require_finite(price, "price")?;
    if price < 0.0 {
        return Err(PosError::invalid(format!(
            "price must be non-negative, got {price}"
        )));
    }
    if price > MAX_PRICE {
        return Err(PosError::invalid(format!(
            "price exceeds maximum allowed value ({MAX_PRICE}), got {price}"
        )));
    }
    Ok(())
}

/// `1 <= qty <= MAX_QUANTITY`
pub fn validate_qty(qty: i32) -> PosResult<()> {
    if qty < 1 {
        return Err(PosError::invalid(format!("qty must be at least 1, got {qty}")));
    }
    if qty > MAX_QUANTITY {
        return Err(PosError::invalid(format!(
            "qty exceeds maximum allowed value ({MAX_QUANTITY}), got {qty}"
        )));
    }
    Ok(())
}

#[inline]
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or_default()
}

#[inline]
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or_default()
}

/// price × qty
pub fn line_total(line: &Line) -> Decimal {
    (to_decimal(line.price) * Decimal::from(line.qty))
        .round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Derived totals of a set of lines
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CheckTotals {
    pub subtotal: f64,
    pub comp_total: f64,
    pub bill_total: f64,
}

/// Comped lines count toward `subtotal` and `comp_total` but not the bill
pub fn check_totals(lines: &[Line]) -> CheckTotals {
    let mut subtotal = Decimal::ZERO;
    let mut comp_total = Decimal::ZERO;
    for line in lines {
        let total = line_total(line);
        subtotal += total;
        if line.comp {
            comp_total += total;
        }
    }
    CheckTotals {
        subtotal: to_f64(subtotal),
        comp_total: to_f64(comp_total),
        bill_total: to_f64(subtotal - comp_total),
    }
}
