//! Collateral Asset Ledgers
//!
//! One [`TokenLedger`] per registered collateral asset, plus an optional
//! transfer hook that runs before every transfer. The hook plays the part of
//! token callbacks (receiver notifications and the like) and is how tests
//! reach back into the engine in the middle of an operation.

use std::collections::BTreeMap;
use std::fmt;

use dsc_common::{
    errors::{DscError, DscResult},
    interfaces::{CollateralLedger, Revertible},
    types::{Address, AssetId},
};

use crate::{FailureSwitches, TokenLedger};

/// Callback invoked as `(asset, from, to, amount)` before a transfer moves funds
pub type TransferHook = Box<dyn FnMut(&AssetId, &Address, &Address, u128)>;

/// Balance tables of every collateral asset
#[derive(Default)]
pub struct CollateralLedgers {
    ledgers: BTreeMap<AssetId, TokenLedger>,
    hook: Option<TransferHook>,
    /// Failure injection, not part of the ledger state
    pub switches: FailureSwitches,
}

impl fmt::Debug for CollateralLedgers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollateralLedgers")
            .field("ledgers", &self.ledgers)
            .field("hook", &self.hook.is_some())
            .field("switches", &self.switches)
            .finish()
    }
}

impl CollateralLedgers {
    /// Create ledgers for the given assets
    pub fn new(assets: &[AssetId]) -> Self {
        Self {
            ledgers: assets.iter().map(|asset| (*asset, TokenLedger::new())).collect(),
            hook: None,
            switches: FailureSwitches::default(),
        }
    }

    /// Returns true if `asset` has a ledger
    pub fn has_asset(&self, asset: &AssetId) -> bool {
        self.ledgers.contains_key(asset)
    }

    /// Ledger of `asset`
    pub fn ledger(&self, asset: &AssetId) -> Option<&TokenLedger> {
        self.ledgers.get(asset)
    }

    fn ledger_mut(&mut self, asset: &AssetId) -> DscResult<&mut TokenLedger> {
        self.ledgers
            .get_mut(asset)
            .ok_or(DscError::UnsupportedAsset { asset: *asset })
    }

    /// Balance of `asset` held by `holder`
    pub fn balance_of(&self, asset: &AssetId, holder: &Address) -> u128 {
        self.ledgers
            .get(asset)
            .map(|ledger| ledger.balance_of(holder))
            .unwrap_or(0)
    }

    /// Issue `amount` of `asset` to `to` (faucet for wallets and tests)
    pub fn fund(&mut self, asset: &AssetId, to: &Address, amount: u128) -> DscResult<()> {
        self.ledger_mut(asset)?.credit(to, amount)
    }

    /// Let `spender` move up to `amount` of `holder`'s `asset`
    pub fn approve(
        &mut self,
        asset: &AssetId,
        holder: &Address,
        spender: &Address,
        amount: u128,
    ) -> DscResult<()> {
        self.ledger_mut(asset)?.approve(holder, spender, amount)
    }

    /// Install a callback that runs before every transfer
    pub fn set_transfer_hook(&mut self, hook: TransferHook) {
        self.hook = Some(hook);
    }

    /// Remove the transfer callback
    pub fn clear_transfer_hook(&mut self) {
        self.hook = None;
    }

    fn notify(&mut self, asset: &AssetId, from: &Address, to: &Address, amount: u128) {
        if let Some(hook) = self.hook.as_mut() {
            hook(asset, from, to, amount);
        }
    }
}

impl Revertible for CollateralLedgers {
    type Snapshot = BTreeMap<AssetId, TokenLedger>;

    fn snapshot(&self) -> Self::Snapshot {
        self.ledgers.clone()
    }

    fn restore(&mut self, snapshot: Self::Snapshot) {
        self.ledgers = snapshot;
    }
}

impl CollateralLedger for CollateralLedgers {
    fn transfer_from(
        &mut self,
        asset: &AssetId,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> bool {
        self.notify(asset, from, to, amount);
        if self.switches.fail_transfers {
            return false;
        }
        match self.ledger_mut(asset) {
            Ok(ledger) => ledger.transfer_from(spender, from, to, amount).is_ok(),
            Err(_) => false,
        }
    }

    fn transfer(&mut self, asset: &AssetId, from: &Address, to: &Address, amount: u128) -> bool {
        self.notify(asset, from, to, amount);
        if self.switches.fail_transfers {
            return false;
        }
        match self.ledger_mut(asset) {
            Ok(ledger) => ledger.transfer(from, to, amount).is_ok(),
            Err(_) => false,
        }
    }
}
