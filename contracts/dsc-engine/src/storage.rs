//! Engine storage
//!
//! Collateral is kept in one table keyed by `(account, asset)`, debt in a
//! per-account table. Missing keys read as zero and entries that fall to zero
//! are removed, so two states with the same balances compare equal.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use dsc_common::{
    errors::DscResult,
    math::safe_add,
    types::{Address, AssetId},
};

/// Collateral and debt bookkeeping owned by the engine
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct EngineState {
    collateral: BTreeMap<(Address, AssetId), u128>,
    debt: BTreeMap<Address, u128>,
}

impl EngineState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deposited quantity of `asset` held for `account`
    pub fn collateral_of(&self, account: &Address, asset: &AssetId) -> u128 {
        self.collateral.get(&(*account, *asset)).copied().unwrap_or(0)
    }

    /// Outstanding DSC minted by `account`
    pub fn debt_of(&self, account: &Address) -> u128 {
        self.debt.get(account).copied().unwrap_or(0)
    }

    /// Add collateral, returning the new balance
    pub fn credit_collateral(&mut self, account: &Address, asset: &AssetId, amount: u128) -> DscResult<u128> {
        let balance = safe_add(self.collateral_of(account, asset), amount)?;
        self.collateral.insert((*account, *asset), balance);
        Ok(balance)
    }

    /// Remove collateral, returning the new balance.
    ///
    /// # Panics
    /// If `amount` exceeds the balance. Callers check the balance first, so
    /// reaching this is a bookkeeping bug.
    pub fn debit_collateral(&mut self, account: &Address, asset: &AssetId, amount: u128) -> u128 {
        let key = (*account, *asset);
        let current = self.collateral.get(&key).copied().unwrap_or(0);
        let balance = match current.checked_sub(amount) {
            Some(balance) => balance,
            None => {
                log::error!(
                    "collateral underflow: balance {} debit {} account {:02x?}",
                    current,
                    amount,
                    &account[..4]
                );
                panic!("collateral bookkeeping underflow: {} < {}", current, amount);
            }
        };
        if balance == 0 {
            self.collateral.remove(&key);
        } else {
            self.collateral.insert(key, balance);
        }
        balance
    }

    /// Add debt, returning the new total
    pub fn credit_debt(&mut self, account: &Address, amount: u128) -> DscResult<u128> {
        let debt = safe_add(self.debt_of(account), amount)?;
        self.debt.insert(*account, debt);
        Ok(debt)
    }

    /// Remove debt, returning the new total.
    ///
    /// # Panics
    /// If `amount` exceeds the outstanding debt.
    pub fn debit_debt(&mut self, account: &Address, amount: u128) -> u128 {
        let current = self.debt_of(account);
        let debt = match current.checked_sub(amount) {
            Some(debt) => debt,
            None => {
                log::error!(
                    "debt underflow: debt {} burn {} account {:02x?}",
                    current,
                    amount,
                    &account[..4]
                );
                panic!("debt bookkeeping underflow: {} < {}", current, amount);
            }
        };
        if debt == 0 {
            self.debt.remove(account);
        } else {
            self.debt.insert(*account, debt);
        }
        debt
    }

    /// Sum of all outstanding debt
    pub fn total_debt(&self) -> u128 {
        self.debt.values().fold(0u128, |acc, debt| acc.saturating_add(*debt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALICE: Address = [1u8; 32];
    const BOB: Address = [2u8; 32];
    const WETH: AssetId = [10u8; 32];
    const WBTC: AssetId = [11u8; 32];

    #[test]
    fn test_missing_keys_read_zero() {
        let state = EngineState::new();
        assert_eq!(state.collateral_of(&ALICE, &WETH), 0);
        assert_eq!(state.debt_of(&ALICE), 0);
        assert_eq!(state.total_debt(), 0);
    }

    #[test]
    fn test_collateral_per_asset() {
        let mut state = EngineState::new();
        assert_eq!(state.credit_collateral(&ALICE, &WETH, 10).unwrap(), 10);
        assert_eq!(state.credit_collateral(&ALICE, &WBTC, 3).unwrap(), 3);
        assert_eq!(state.credit_collateral(&ALICE, &WETH, 5).unwrap(), 15);

        assert_eq!(state.debit_collateral(&ALICE, &WETH, 4), 11);
        assert_eq!(state.collateral_of(&ALICE, &WBTC), 3);
        assert_eq!(state.collateral_of(&BOB, &WETH), 0);
    }

    #[test]
    fn test_zero_entries_removed() {
        let mut state = EngineState::new();
        state.credit_collateral(&ALICE, &WETH, 7).unwrap();
        state.credit_debt(&ALICE, 2).unwrap();
        state.debit_collateral(&ALICE, &WETH, 7);
        state.debit_debt(&ALICE, 2);

        assert_eq!(state, EngineState::new());
    }

    #[test]
    fn test_credit_overflow() {
        let mut state = EngineState::new();
        state.credit_debt(&ALICE, u128::MAX).unwrap();
        assert_eq!(
            state.credit_debt(&ALICE, 1),
            Err(dsc_common::errors::DscError::Overflow)
        );
        assert_eq!(state.debt_of(&ALICE), u128::MAX);
    }

    #[test]
    #[should_panic(expected = "debt bookkeeping underflow")]
    fn test_debt_underflow_is_fatal() {
        let mut state = EngineState::new();
        state.credit_debt(&ALICE, 1).unwrap();
        state.debit_debt(&ALICE, 2);
    }

    #[test]
    #[should_panic(expected = "collateral bookkeeping underflow")]
    fn test_collateral_underflow_is_fatal() {
        let mut state = EngineState::new();
        state.debit_collateral(&ALICE, &WETH, 1);
    }

    #[test]
    fn test_total_debt_sums_accounts() {
        let mut state = EngineState::new();
        state.credit_collateral(&BOB, &WETH, 1).unwrap();
        state.credit_collateral(&BOB, &WBTC, 1).unwrap();
        state.credit_debt(&ALICE, 5).unwrap();
        state.credit_debt(&BOB, 6).unwrap();

        assert_eq!(state.total_debt(), 11);
    }
}
