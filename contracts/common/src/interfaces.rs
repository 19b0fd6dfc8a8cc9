//! Collaborator Interfaces
//!
//! The engine owns collateral and debt bookkeeping only. Token balances and
//! prices live behind these traits. Ledgers report failure with `false`; the
//! engine turns that into an error and rolls the whole operation back.

use crate::types::{Address, AssetId, FeedId};

/// State that can be captured and put back when an operation aborts.
pub trait Revertible {
    /// Opaque copy of everything a later `restore` needs
    type Snapshot;

    /// Capture the current state
    fn snapshot(&self) -> Self::Snapshot;

    /// Return to a previously captured state
    fn restore(&mut self, snapshot: Self::Snapshot);
}

/// The synthetic debt token ledger.
pub trait DebtToken: Revertible {
    /// Create `amount` new tokens held by `to`
    fn mint(&mut self, to: &Address, amount: u128) -> bool;

    /// Destroy `amount` tokens held by `holder` (the engine's custody address)
    fn burn(&mut self, holder: &Address, amount: u128) -> bool;

    /// Move `amount` from `from` to `to`, spending `spender`'s allowance
    fn transfer_from(&mut self, spender: &Address, from: &Address, to: &Address, amount: u128) -> bool;
}

/// Ledgers of every registered collateral asset.
pub trait CollateralLedger: Revertible {
    /// Pull `amount` of `asset` from `from` to `to`, spending `spender`'s allowance
    fn transfer_from(
        &mut self,
        asset: &AssetId,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> bool;

    /// Push `amount` of `asset` held by `from` to `to`
    fn transfer(&mut self, asset: &AssetId, from: &Address, to: &Address, amount: u128) -> bool;
}

/// Source of 8-decimal USD prices.
pub trait PriceFeed {
    /// Latest answer of `feed`, or `None` if the feed is unknown
    fn latest_price(&self, feed: &FeedId) -> Option<i64>;
}
