//! Protocol Constants
//!
//! Fixed-point scales and risk parameters for the DSC engine. The values
//! mirror a 200% overcollateralized stablecoin with a 10% liquidation bonus.

/// Token Metadata
pub mod token {
    /// Token name
    pub const NAME: &str = "Decentralized Stable Coin";
    /// Token symbol
    pub const SYMBOL: &str = "DSC";
    /// Decimal places
    pub const DECIMALS: u8 = 18;
    /// One unit with decimals (1 DSC = 1e18 base units)
    pub const ONE: u128 = 1_000_000_000_000_000_000;
}

/// Fixed-point scales
pub mod precision {
    /// Scale of amounts, USD values and health factors (1e18)
    pub const PRECISION: u128 = 1_000_000_000_000_000_000;

    /// Bridges an 8-decimal feed answer to 18 decimals (1e10)
    pub const ADDITIONAL_FEED_PRECISION: u128 = 10_000_000_000;

    /// Decimal places reported by price feeds
    pub const FEED_DECIMALS: u8 = 8;
}

/// Liquidation and solvency parameters
pub mod risk {
    /// Share of collateral value that counts towards solvency, in percent.
    ///
    /// 50 means debt must be backed by twice its value in collateral.
    pub const LIQUIDATION_THRESHOLD: u128 = 50;

    /// Denominator for `LIQUIDATION_THRESHOLD` and `LIQUIDATION_BONUS`
    pub const LIQUIDATION_PRECISION: u128 = 100;

    /// Extra collateral paid to liquidators on top of the covered debt, in percent
    pub const LIQUIDATION_BONUS: u128 = 10;

    /// Accounts below this health factor can be liquidated (1.0 in 18 decimals)
    pub const MIN_HEALTH_FACTOR: u128 = super::precision::PRECISION;

    /// Health factor of an account without debt
    pub const HEALTH_FACTOR_INFINITE: u128 = u128::MAX;
}
