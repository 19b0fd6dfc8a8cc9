//! DSC Engine - Collateralized Debt Engine for the DSC Stablecoin
//!
//! Users deposit registered collateral assets, mint DSC against them, and the
//! engine enforces a minimum health factor after every state-changing
//! operation. Unhealthy accounts can be liquidated by anyone holding DSC.
//!
//! ## Responsibilities
//!
//! - **Collateral Vault** (`vault`): deposits into and redemptions out of
//!   engine custody
//! - **Debt Ledger** (`ledger`): minting and burning DSC against an account's
//!   debt
//! - **Health Engine** (`health`, `liquidation`): USD valuation through the
//!   price feeds, the health factor, and the liquidation trade
//!
//! ## Execution Model
//!
//! Every mutating entry point is one atomic transaction: it takes the
//! re-entrancy lock, snapshots the engine and its collaborators, runs, and
//! restores the snapshot if any step fails. Calls back into the engine from a
//! collaborator (a token transfer callback, say) fail with `Reentrancy`.
//!
//! The engine takes `&self` everywhere and keeps its state in cells, which is
//! what lets a collaborator hold a handle to it at all.

use std::cell::{Ref, RefCell, RefMut};

use dsc_common::{
    errors::{DscError, DscResult},
    events::{DscEvent, EventLog},
    interfaces::{CollateralLedger, DebtToken, PriceFeed},
    types::{Address, AssetId, EngineConfig, FeedId, ZERO_ADDRESS},
};

pub mod guard;
pub mod health;
pub mod ledger;
pub mod liquidation;
pub mod registry;
pub mod storage;
pub mod transaction;
pub mod vault;

#[cfg(test)]
mod testing;


pub use guard::{LockGuard, ReentrancyLock};
pub use registry::AssetRegistry;
pub use storage::EngineState;

// ============ Engine ============

/// The collateralized debt engine
pub struct DscEngine<T, C, P>
where
    T: DebtToken,
    C: CollateralLedger,
    P: PriceFeed,
{
    registry: AssetRegistry,
    /// Address that holds deposited collateral and DSC awaiting burn
    custody: Address,
    debt_token_address: Address,
    state: RefCell<EngineState>,
    debt_token: RefCell<T>,
    collateral: RefCell<C>,
    price_feed: RefCell<P>,
    events: RefCell<EventLog>,
    lock: ReentrancyLock,
}

impl<T, C, P> DscEngine<T, C, P>
where
    T: DebtToken,
    C: CollateralLedger,
    P: PriceFeed,
{
    /// Creates an engine over the given collaborators.
    ///
    /// # Errors
    /// - `RegistryLengthMismatch` if the asset and feed lists differ in length
    /// - `DuplicateAsset` / `InvalidAddress` for a malformed registry
    /// - `InvalidAddress` if `custody` or `debt_token` is the zero address
    pub fn new(config: EngineConfig, debt_token: T, collateral: C, price_feed: P) -> DscResult<Self> {
        let registry = AssetRegistry::new(&config.collateral_assets, &config.price_feeds)?;

        if config.custody == ZERO_ADDRESS {
            return Err(DscError::InvalidAddress {
                reason: "custody cannot be zero address",
            });
        }
        if config.debt_token == ZERO_ADDRESS {
            return Err(DscError::InvalidAddress {
                reason: "debt token cannot be zero address",
            });
        }

        log::debug!("engine created with {} collateral assets", registry.len());

        Ok(Self {
            registry,
            custody: config.custody,
            debt_token_address: config.debt_token,
            state: RefCell::new(EngineState::new()),
            debt_token: RefCell::new(debt_token),
            collateral: RefCell::new(collateral),
            price_feed: RefCell::new(price_feed),
            events: RefCell::new(EventLog::new()),
            lock: ReentrancyLock::new(),
        })
    }

    // ============ Combined Operations ============

    /// Deposit collateral and mint DSC in one transaction
    pub fn deposit_collateral_and_mint_dsc(
        &self,
        account: &Address,
        asset: &AssetId,
        collateral_amount: u128,
        dsc_amount: u128,
    ) -> DscResult<()> {
        self.atomic("deposit_collateral_and_mint_dsc", |engine| {
            engine.deposit_inner(account, asset, collateral_amount)?;
            engine.mint_inner(account, dsc_amount)
        })
    }

    /// Burn DSC and redeem collateral in one transaction.
    ///
    /// Health is checked once, after both steps.
    pub fn redeem_collateral_for_dsc(
        &self,
        account: &Address,
        asset: &AssetId,
        collateral_amount: u128,
        dsc_amount: u128,
    ) -> DscResult<()> {
        self.atomic("redeem_collateral_for_dsc", |engine| {
            engine.ensure_debt_covers(account, dsc_amount)?;
            engine.burn_inner(account, account, dsc_amount)?;
            engine.redeem_inner(account, account, asset, collateral_amount)?;
            engine.assert_healthy(account)
        })
    }

    // ============ Configuration Queries ============

    /// Registered collateral assets, in registry order
    pub fn collateral_assets(&self) -> &[AssetId] {
        self.registry.assets()
    }

    /// Price feed of `asset`
    pub fn price_feed_of(&self, asset: &AssetId) -> DscResult<FeedId> {
        self.registry.feed_of(asset)
    }

    pub fn registry(&self) -> &AssetRegistry {
        &self.registry
    }

    pub fn custody(&self) -> &Address {
        &self.custody
    }

    pub fn debt_token_address(&self) -> &Address {
        &self.debt_token_address
    }

    /// Returns true while a mutating operation is in progress
    pub fn is_locked(&self) -> bool {
        self.lock.is_held()
    }

    // ============ Collaborators ============
    //
    // These borrow the collaborator cells and panic if a borrow conflicts,
    // i.e. when called from inside a callback of the same collaborator.

    pub fn debt_token(&self) -> Ref<'_, T> {
        self.debt_token.borrow()
    }

    pub fn debt_token_mut(&self) -> RefMut<'_, T> {
        self.debt_token.borrow_mut()
    }

    pub fn collateral_ledger(&self) -> Ref<'_, C> {
        self.collateral.borrow()
    }

    pub fn collateral_ledger_mut(&self) -> RefMut<'_, C> {
        self.collateral.borrow_mut()
    }

    pub fn price_feed(&self) -> Ref<'_, P> {
        self.price_feed.borrow()
    }

    pub fn price_feed_mut(&self) -> RefMut<'_, P> {
        self.price_feed.borrow_mut()
    }

    /// Read-only view of the bookkeeping
    pub fn state(&self) -> Ref<'_, EngineState> {
        self.state.borrow()
    }

    // ============ Events ============

    /// Take every committed event in emission order.
    ///
    /// Returns nothing while an operation is in progress, since its events
    /// may still be rolled back.
    pub fn take_events(&self) -> Vec<DscEvent> {
        if self.lock.is_held() {
            return Vec::new();
        }
        self.events.borrow_mut().drain()
    }

    pub(crate) fn emit(&self, event: DscEvent) {
        self.events.borrow_mut().emit(event);
    }

    // ============ Internal Helpers ============

    pub(crate) fn ensure_debt_covers(&self, account: &Address, amount: u128) -> DscResult<()> {
        let available = self.state.borrow().debt_of(account);
        if amount > available {
            return Err(DscError::InsufficientDebt {
                available,
                requested: amount,
            });
        }
        Ok(())
    }
}
