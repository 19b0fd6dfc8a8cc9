//! Core Types for the DSC Engine
//!
//! Identifiers, construction-time configuration and the read-only reports the
//! engine hands back to callers.

use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

/// Type alias for account addresses (32-byte hash)
pub type Address = [u8; 32];

/// Type alias for collateral asset identifiers
pub type AssetId = [u8; 32];

/// Type alias for price feed identifiers
pub type FeedId = [u8; 32];

/// The all-zero address, never a valid participant
pub const ZERO_ADDRESS: Address = [0u8; 32];

// ============ Configuration ============

/// Construction-time configuration of the engine.
///
/// `collateral_assets[i]` is priced by `price_feeds[i]`; registry order is the
/// order of `collateral_assets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct EngineConfig {
    /// Supported collateral assets, in iteration order
    pub collateral_assets: Vec<AssetId>,
    /// Price feed for each asset, same order and length
    pub price_feeds: Vec<FeedId>,
    /// The debt token the engine mints and burns
    pub debt_token: Address,
    /// Address under which the engine holds collateral and incoming DSC
    pub custody: Address,
}

impl EngineConfig {
    /// Build a config from `(asset, feed)` pairs
    pub fn from_pairs(pairs: &[(AssetId, FeedId)], debt_token: Address, custody: Address) -> Self {
        Self {
            collateral_assets: pairs.iter().map(|(asset, _)| *asset).collect(),
            price_feeds: pairs.iter().map(|(_, feed)| *feed).collect(),
            debt_token,
            custody,
        }
    }
}

// ============ Reports ============

/// Debt and collateral value of a single account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct AccountInformation {
    /// Outstanding DSC minted by the account (18 decimals)
    pub debt_minted: u128,
    /// USD value of all deposited collateral (18 decimals)
    pub collateral_value_usd: u128,
}

/// What a successful liquidation moved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct LiquidationOutcome {
    /// Account whose debt was covered
    pub target: Address,
    /// Account that paid the debt and received collateral
    pub liquidator: Address,
    /// Collateral asset seized
    pub asset: AssetId,
    /// DSC burned from the target's debt
    pub debt_covered: u128,
    /// Collateral equal in value to `debt_covered`
    pub seized_base: u128,
    /// Bonus collateral on top of `seized_base`, possibly capped
    pub bonus: u128,
    /// Target health factor before the liquidation
    pub health_factor_before: u128,
    /// Target health factor after the liquidation
    pub health_factor_after: u128,
}

impl LiquidationOutcome {
    /// Total collateral transferred to the liquidator
    pub fn total_seized(&self) -> u128 {
        self.seized_base.saturating_add(self.bonus)
    }
}
