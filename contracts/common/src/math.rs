//! Mathematical Utilities for the DSC Engine
//!
//! Fixed-point conversions between collateral amounts and USD values, and the
//! health factor. Every product is formed in 256 bits before dividing, so
//! 18-decimal operands never overflow mid-calculation.

use primitive_types::U256;

use crate::constants::{precision, risk};
use crate::errors::{DscError, DscResult};
use crate::types::AssetId;

/// `a * b / c` with a 256-bit intermediate, rounding down.
pub fn mul_div(a: u128, b: u128, c: u128) -> DscResult<u128> {
    if c == 0 {
        return Err(DscError::DivisionByZero);
    }
    let result = U256::from(a)
        .checked_mul(U256::from(b))
        .ok_or(DscError::Overflow)?
        / U256::from(c);
    narrow(result)
}

fn narrow(value: U256) -> DscResult<u128> {
    if value > U256::from(u128::MAX) {
        return Err(DscError::Overflow);
    }
    Ok(value.low_u128())
}

/// Check a raw feed answer and widen it for arithmetic.
///
/// A zero or negative answer cannot value collateral.
pub fn validate_price(asset: &AssetId, price: i64) -> DscResult<u128> {
    if price <= 0 {
        return Err(DscError::InvalidPrice { asset: *asset, price });
    }
    Ok(price as u128)
}

/// USD value (18 decimals) of `amount` units priced at `price` (8 decimals).
///
/// usd = amount * price * 1e10 / 1e18
pub fn usd_value(amount: u128, price: u128) -> DscResult<u128> {
    let scaled = U256::from(amount)
        .checked_mul(U256::from(price))
        .and_then(|v| v.checked_mul(U256::from(precision::ADDITIONAL_FEED_PRECISION)))
        .ok_or(DscError::Overflow)?;
    narrow(scaled / U256::from(precision::PRECISION))
}

/// Units of collateral worth `usd_amount` (18 decimals) at `price` (8 decimals).
///
/// amount = usd * 1e18 / (price * 1e10)
pub fn token_amount_from_usd(usd_amount: u128, price: u128) -> DscResult<u128> {
    if price == 0 {
        return Err(DscError::DivisionByZero);
    }
    let numerator = U256::from(usd_amount)
        .checked_mul(U256::from(precision::PRECISION))
        .ok_or(DscError::Overflow)?;
    let denominator = U256::from(price) * U256::from(precision::ADDITIONAL_FEED_PRECISION);
    narrow(numerator / denominator)
}

/// Health factor (18 decimals) of a position.
///
/// hf = (collateral_usd * LIQUIDATION_THRESHOLD / 100) * 1e18 / debt
///
/// Zero debt is always safe and returns `HEALTH_FACTOR_INFINITE`. Factors too
/// large for `u128` saturate at the same sentinel.
pub fn calculate_health_factor(debt_minted: u128, collateral_value_usd: u128) -> u128 {
    if debt_minted == 0 {
        return risk::HEALTH_FACTOR_INFINITE;
    }

    let adjusted = U256::from(collateral_value_usd) * U256::from(risk::LIQUIDATION_THRESHOLD)
        / U256::from(risk::LIQUIDATION_PRECISION);

    // adjusted < 2^128 and PRECISION < 2^60, so the product fits 256 bits
    let health_factor = adjusted * U256::from(precision::PRECISION) / U256::from(debt_minted);

    narrow(health_factor).unwrap_or(risk::HEALTH_FACTOR_INFINITE)
}

/// Returns true if the factor meets the minimum
pub fn is_healthy(health_factor: u128) -> bool {
    health_factor >= risk::MIN_HEALTH_FACTOR
}

/// Liquidator bonus owed on top of `seized_base`
///
/// bonus = seized_base * LIQUIDATION_BONUS / 100
pub fn liquidation_bonus(seized_base: u128) -> DscResult<u128> {
    mul_div(seized_base, risk::LIQUIDATION_BONUS, risk::LIQUIDATION_PRECISION)
}

/// Largest debt a collateral value supports at exactly `MIN_HEALTH_FACTOR`
///
/// max_debt = collateral_usd * LIQUIDATION_THRESHOLD / 100
pub fn max_debt_for_collateral(collateral_value_usd: u128) -> DscResult<u128> {
    mul_div(
        collateral_value_usd,
        risk::LIQUIDATION_THRESHOLD,
        risk::LIQUIDATION_PRECISION,
    )
}

/// Safe addition with overflow check
pub fn safe_add(a: u128, b: u128) -> DscResult<u128> {
    a.checked_add(b).ok_or(DscError::Overflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::token::ONE;

    /// $2,000 with 8 decimals
    const ETH_PRICE_2K: u128 = 2_000_00000000;

    #[test]
    fn test_usd_value() {
        // 15 units at $2,000 = $30,000
        let usd = usd_value(15 * ONE, ETH_PRICE_2K).unwrap();
        assert_eq!(usd, 30_000 * ONE);
    }

    #[test]
    fn test_token_amount_from_usd() {
        // $100 at $2,000 = 0.05 units
        let amount = token_amount_from_usd(100 * ONE, ETH_PRICE_2K).unwrap();
        assert_eq!(amount, 5 * ONE / 100);
    }

    #[test]
    fn test_conversions_are_inverse_at_lossless_price() {
        for units in [1u128, 7, 15, 1_000, 123_456] {
            let amount = units * ONE;
            let usd = usd_value(amount, ETH_PRICE_2K).unwrap();
            assert_eq!(token_amount_from_usd(usd, ETH_PRICE_2K).unwrap(), amount);
        }
    }

    #[test]
    fn test_token_amount_rounds_down() {
        // $1 at $3 per unit = 0.333.. units
        let amount = token_amount_from_usd(ONE, 3_00000000).unwrap();
        assert_eq!(amount, 333_333_333_333_333_333);
    }

    #[test]
    fn test_token_amount_zero_price() {
        assert_eq!(token_amount_from_usd(ONE, 0), Err(DscError::DivisionByZero));
    }

    #[test]
    fn test_health_factor_zero_debt() {
        assert_eq!(calculate_health_factor(0, 0), risk::HEALTH_FACTOR_INFINITE);
        assert_eq!(
            calculate_health_factor(0, 30_000 * ONE),
            risk::HEALTH_FACTOR_INFINITE
        );
    }

    #[test]
    fn test_health_factor_values() {
        // $20,000 collateral backing $100 debt = 100.0
        assert_eq!(calculate_health_factor(100 * ONE, 20_000 * ONE), 100 * ONE);

        // $200 collateral backing $100 debt sits exactly at the minimum
        assert_eq!(calculate_health_factor(100 * ONE, 200 * ONE), risk::MIN_HEALTH_FACTOR);

        // $180 collateral backing $100 debt = 0.9
        assert_eq!(calculate_health_factor(100 * ONE, 180 * ONE), 9 * ONE / 10);
    }

    #[test]
    fn test_health_factor_saturates() {
        // One wei of debt against a huge collateral value
        assert_eq!(
            calculate_health_factor(1, u128::MAX),
            risk::HEALTH_FACTOR_INFINITE
        );
    }

    #[test]
    fn test_is_healthy_boundary() {
        assert!(is_healthy(risk::MIN_HEALTH_FACTOR));
        assert!(!is_healthy(risk::MIN_HEALTH_FACTOR - 1));
    }

    #[test]
    fn test_liquidation_bonus() {
        assert_eq!(liquidation_bonus(5 * ONE / 100).unwrap(), 5 * ONE / 1000);
        assert_eq!(liquidation_bonus(9).unwrap(), 0);
    }

    #[test]
    fn test_max_debt_for_collateral() {
        assert_eq!(max_debt_for_collateral(30_000 * ONE).unwrap(), 15_000 * ONE);
    }

    #[test]
    fn test_validate_price() {
        let asset = [7u8; 32];
        assert_eq!(validate_price(&asset, 2_000_00000000).unwrap(), ETH_PRICE_2K);
        assert_eq!(
            validate_price(&asset, 0),
            Err(DscError::InvalidPrice { asset, price: 0 })
        );
        assert!(matches!(
            validate_price(&asset, -5),
            Err(DscError::InvalidPrice { price: -5, .. })
        ));
    }

    #[test]
    fn test_mul_div_overflow_and_zero() {
        assert_eq!(mul_div(u128::MAX, 2, 1), Err(DscError::Overflow));
        assert_eq!(mul_div(u128::MAX, 2, 2).unwrap(), u128::MAX);
        assert_eq!(mul_div(1, 1, 0), Err(DscError::DivisionByZero));
    }
}
