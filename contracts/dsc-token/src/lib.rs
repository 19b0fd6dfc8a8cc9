//! DSC Token
//!
//! Fungible token ledgers the engine calls into:
//!
//! - [`DscToken`]: the synthetic stablecoin. Only its owner (the engine's
//!   custody address) can mint and burn.
//! - [`CollateralLedgers`]: one balance table per collateral asset.
//!
//! Both keep balances, allowances and total supply in memory and implement
//! `Revertible` by cloning their tables, so the engine can undo every effect of
//! an aborted operation.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

pub mod collateral;

pub use collateral::{CollateralLedgers, TransferHook};

use dsc_common::{
    constants::token,
    errors::{DscError, DscResult},
    interfaces::{DebtToken, Revertible},
    types::{Address, ZERO_ADDRESS},
};

// ============ Token Ledger ============

/// Balances, allowances and supply of one fungible token
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct TokenLedger {
    balances: BTreeMap<Address, u128>,
    allowances: BTreeMap<(Address, Address), u128>,
    total_supply: u128,
}

impl TokenLedger {
    /// Create an empty ledger
    pub fn new() -> Self {
        Self::default()
    }

    /// Balance held by `owner`
    pub fn balance_of(&self, owner: &Address) -> u128 {
        self.balances.get(owner).copied().unwrap_or(0)
    }

    /// Amount `spender` may still move out of `owner`'s balance
    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
    }

    /// Total tokens in existence
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Set `spender`'s allowance over `owner`'s balance
    pub fn approve(&mut self, owner: &Address, spender: &Address, amount: u128) -> DscResult<()> {
        if *spender == ZERO_ADDRESS {
            return Err(DscError::InvalidAddress {
                reason: "spender cannot be zero address",
            });
        }
        self.allowances.insert((*owner, *spender), amount);
        Ok(())
    }

    /// Move `amount` from `from` to `to`
    pub fn transfer(&mut self, from: &Address, to: &Address, amount: u128) -> DscResult<()> {
        if *to == ZERO_ADDRESS {
            return Err(DscError::InvalidAddress {
                reason: "recipient cannot be zero address",
            });
        }

        let available = self.balance_of(from);
        if available < amount {
            return Err(DscError::InsufficientBalance {
                available,
                requested: amount,
            });
        }

        self.balances.insert(*from, available - amount);
        let received = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(DscError::Overflow)?;
        self.balances.insert(*to, received);
        Ok(())
    }

    /// Move `amount` from `from` to `to` on behalf of `spender`
    pub fn transfer_from(
        &mut self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> DscResult<()> {
        let allowed = self.allowance(from, spender);
        if allowed < amount {
            return Err(DscError::InsufficientAllowance {
                available: allowed,
                requested: amount,
            });
        }

        self.transfer(from, to, amount)?;
        // Unlimited approvals are never consumed
        if allowed != u128::MAX {
            self.allowances.insert((*from, *spender), allowed - amount);
        }
        Ok(())
    }

    /// Create `amount` tokens for `to`
    pub fn credit(&mut self, to: &Address, amount: u128) -> DscResult<()> {
        if *to == ZERO_ADDRESS {
            return Err(DscError::InvalidAddress {
                reason: "recipient cannot be zero address",
            });
        }
        let new_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(DscError::Overflow)?;
        let new_balance = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(DscError::Overflow)?;
        self.total_supply = new_supply;
        self.balances.insert(*to, new_balance);
        Ok(())
    }

    /// Destroy `amount` tokens held by `from`
    pub fn debit(&mut self, from: &Address, amount: u128) -> DscResult<()> {
        let available = self.balance_of(from);
        if available < amount {
            return Err(DscError::InsufficientBalance {
                available,
                requested: amount,
            });
        }
        self.balances.insert(*from, available - amount);
        // Supply always covers any single balance
        self.total_supply -= amount;
        Ok(())
    }
}

// ============ Failure Injection ============

/// Switches that make a ledger report failure, for exercising rollback paths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FailureSwitches {
    /// `mint` reports failure
    pub fail_mint: bool,
    /// `burn` reports failure
    pub fail_burn: bool,
    /// `transfer` and `transfer_from` report failure
    pub fail_transfers: bool,
}

// ============ DSC Token ============

/// The DSC stablecoin ledger.
///
/// Minting and burning are restricted to the owner. The engine reaches the
/// token through `DebtToken`, which acts as the owner.
#[derive(Debug, Clone)]
pub struct DscToken {
    /// Authorized minter/burner (the engine's custody address)
    owner: Address,
    ledger: TokenLedger,
    /// Failure injection, not part of the ledger state
    pub switches: FailureSwitches,
}

// NOTE: Default is not implemented so that the owner is always chosen
// explicitly; a zero owner would leave minting unreachable.

impl DscToken {
    /// Create a token owned by `owner`
    pub fn new(owner: Address) -> DscResult<Self> {
        if owner == ZERO_ADDRESS {
            return Err(DscError::InvalidAddress {
                reason: "token owner cannot be zero address",
            });
        }
        Ok(Self {
            owner,
            ledger: TokenLedger::new(),
            switches: FailureSwitches::default(),
        })
    }

    /// Get token name
    pub fn name() -> &'static str {
        token::NAME
    }

    /// Get token symbol
    pub fn symbol() -> &'static str {
        token::SYMBOL
    }

    /// Get token decimals
    pub fn decimals() -> u8 {
        token::DECIMALS
    }

    /// The authorized minter
    pub fn owner(&self) -> &Address {
        &self.owner
    }

    /// Balance held by `holder`
    pub fn balance_of(&self, holder: &Address) -> u128 {
        self.ledger.balance_of(holder)
    }

    /// Remaining allowance of `spender` over `holder`'s tokens
    pub fn allowance(&self, holder: &Address, spender: &Address) -> u128 {
        self.ledger.allowance(holder, spender)
    }

    /// Total DSC in existence
    pub fn total_supply(&self) -> u128 {
        self.ledger.total_supply()
    }

    /// Let `spender` move up to `amount` of `holder`'s tokens
    pub fn approve(&mut self, holder: &Address, spender: &Address, amount: u128) -> DscResult<()> {
        self.ledger.approve(holder, spender, amount)
    }

    /// Move tokens between holders
    pub fn transfer(&mut self, from: &Address, to: &Address, amount: u128) -> DscResult<()> {
        if amount == 0 {
            return Err(DscError::ZeroAmount);
        }
        self.ledger.transfer(from, to, amount)
    }

    /// Mint `amount` to `to` (owner only)
    pub fn mint(&mut self, caller: &Address, to: &Address, amount: u128) -> DscResult<()> {
        // 1. Amount must be positive
        if amount == 0 {
            return Err(DscError::ZeroAmount);
        }

        // 2. Caller must be the owner
        if *caller != self.owner {
            return Err(DscError::MintUnauthorized { caller: *caller });
        }

        // 3. Credit recipient and supply
        self.ledger.credit(to, amount)?;
        log::trace!("dsc minted: amount={} supply={}", amount, self.total_supply());
        Ok(())
    }

    /// Burn `amount` of the caller's own tokens (owner only)
    pub fn burn(&mut self, caller: &Address, amount: u128) -> DscResult<()> {
        // 1. Amount must be positive
        if amount == 0 {
            return Err(DscError::ZeroAmount);
        }

        // 2. Caller must be the owner
        if *caller != self.owner {
            return Err(DscError::BurnUnauthorized { caller: *caller });
        }

        // 3. Owner must hold the tokens
        self.ledger.debit(caller, amount)?;
        log::trace!("dsc burned: amount={} supply={}", amount, self.total_supply());
        Ok(())
    }
}

impl Revertible for DscToken {
    type Snapshot = TokenLedger;

    fn snapshot(&self) -> TokenLedger {
        self.ledger.clone()
    }

    fn restore(&mut self, snapshot: TokenLedger) {
        self.ledger = snapshot;
    }
}

impl DebtToken for DscToken {
    fn mint(&mut self, to: &Address, amount: u128) -> bool {
        if self.switches.fail_mint {
            return false;
        }
        let owner = self.owner;
        DscToken::mint(self, &owner, to, amount).is_ok()
    }

    fn burn(&mut self, holder: &Address, amount: u128) -> bool {
        if self.switches.fail_burn {
            return false;
        }
        DscToken::burn(self, holder, amount).is_ok()
    }

    fn transfer_from(&mut self, spender: &Address, from: &Address, to: &Address, amount: u128) -> bool {
        if self.switches.fail_transfers {
            return false;
        }
        self.ledger.transfer_from(spender, from, to, amount).is_ok()
    }
}

// ============ Tests ============
