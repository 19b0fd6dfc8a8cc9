//! Debt Ledger
//!
//! Minting records debt and creates DSC; burning pulls DSC into custody,
//! destroys it and reduces the debt of the account it was burned for.

use dsc_common::{
    errors::{DscError, DscResult},
    events::DscEvent,
    interfaces::{CollateralLedger, DebtToken, PriceFeed},
    types::Address,
};

use crate::DscEngine;

impl<T, C, P> DscEngine<T, C, P>
where
    T: DebtToken,
    C: CollateralLedger,
    P: PriceFeed,
{
    /// Mint `amount` DSC to `account` against its collateral
    pub fn mint_dsc(&self, account: &Address, amount: u128) -> DscResult<()> {
        self.atomic("mint_dsc", |engine| engine.mint_inner(account, amount))
    }

    /// Burn `amount` of `account`'s own DSC to reduce its own debt.
    ///
    /// `account` must have approved the custody address on the debt token.
    pub fn burn_dsc(&self, account: &Address, amount: u128) -> DscResult<()> {
        self.atomic("burn_dsc", |engine| {
            engine.ensure_debt_covers(account, amount)?;
            engine.burn_inner(account, account, amount)?;
            engine.assert_healthy(account)
        })
    }

    pub(crate) fn mint_inner(&self, account: &Address, amount: u128) -> DscResult<()> {
        // 1. Amount must be positive
        if amount == 0 {
            return Err(DscError::ZeroAmount);
        }

        // 2. Record the debt
        let new_debt = self.state.borrow_mut().credit_debt(account, amount)?;

        // 3. The new debt must be covered
        self.assert_healthy(account)?;

        // 4. Create the tokens
        if !self.debt_token.borrow_mut().mint(account, amount) {
            return Err(DscError::MintFailed {
                to: *account,
                amount,
            });
        }

        // 5. Emit event
        self.emit(DscEvent::DscMinted {
            user: *account,
            amount,
            new_debt,
        });

        log::debug!(
            "dsc minted: account {:02x?} amount {} debt {}",
            &account[..4],
            amount,
            new_debt
        );
        Ok(())
    }

    /// Reduce `on_behalf_of`'s debt by `amount`, paid with `payer`'s DSC.
    ///
    /// Callers must have checked that the debt covers `amount`.
    pub(crate) fn burn_inner(&self, on_behalf_of: &Address, payer: &Address, amount: u128) -> DscResult<()> {
        // 1. Amount must be positive
        if amount == 0 {
            return Err(DscError::ZeroAmount);
        }

        // 2. Bookkeeping first
        let new_debt = self.state.borrow_mut().debit_debt(on_behalf_of, amount);

        // 3. Pull the DSC into custody
        let custody = self.custody;
        let pulled = self
            .debt_token
            .borrow_mut()
            .transfer_from(&custody, payer, &custody, amount);
        if !pulled {
            return Err(DscError::TransferFailed {
                from: *payer,
                to: custody,
                amount,
            });
        }

        // 4. Destroy it
        if !self.debt_token.borrow_mut().burn(&custody, amount) {
            return Err(DscError::TransferFailed {
                from: custody,
                to: custody,
                amount,
            });
        }

        // 5. Emit event
        self.emit(DscEvent::DscBurned {
            on_behalf_of: *on_behalf_of,
            payer: *payer,
            amount,
            new_debt,
        });

        log::debug!(
            "dsc burned: account {:02x?} payer {:02x?} amount {} debt {}",
            &on_behalf_of[..4],
            &payer[..4],
            amount,
            new_debt
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dsc_common::{errors::DscError, events::DscEvent};

    use crate::testing::*;

    #[test]
    fn test_mint_success() {
        let engine = setup();
        deposit(&engine, &ALICE, &WETH, 10 * ONE);
        engine.take_events();

        engine.mint_dsc(&ALICE, 1_000 * ONE).unwrap();

        assert_eq!(engine.debt_minted(&ALICE), 1_000 * ONE);
        assert_eq!(engine.debt_token().balance_of(&ALICE), 1_000 * ONE);
        assert_eq!(
            engine.take_events(),
            vec![DscEvent::DscMinted {
                user: ALICE,
                amount: 1_000 * ONE,
                new_debt: 1_000 * ONE,
            }]
        );
    }

    #[test]
    fn test_mint_up_to_minimum() {
        let engine = setup();
        deposit(&engine, &ALICE, &WETH, 10 * ONE);

        // $20,000 of collateral supports exactly 10,000 DSC
        engine.mint_dsc(&ALICE, 10_000 * ONE).unwrap();
        assert_eq!(engine.health_factor(&ALICE).unwrap(), MIN_HEALTH_FACTOR);

        let result = engine.mint_dsc(&ALICE, 1);
        assert!(matches!(result, Err(DscError::HealthFactorBroken { .. })));
        assert_eq!(engine.debt_minted(&ALICE), 10_000 * ONE);
        assert_eq!(engine.debt_token().total_supply(), 10_000 * ONE);
    }

    #[test]
    fn test_mint_without_collateral() {
        let engine = setup();
        assert_eq!(
            engine.mint_dsc(&ALICE, ONE),
            Err(DscError::HealthFactorBroken { health_factor: 0 })
        );
        assert_eq!(engine.debt_minted(&ALICE), 0);
    }

    #[test]
    fn test_mint_failure_rolls_back() {
        let engine = setup();
        deposit(&engine, &ALICE, &WETH, 10 * ONE);
        engine.debt_token_mut().switches.fail_mint = true;

        assert_eq!(
            engine.mint_dsc(&ALICE, ONE),
            Err(DscError::MintFailed { to: ALICE, amount: ONE })
        );
        assert_eq!(engine.debt_minted(&ALICE), 0);
    }

    #[test]
    fn test_burn_success() {
        let engine = setup();
        deposit_and_mint(&engine, &ALICE, &WETH, 10 * ONE, 1_000 * ONE);
        engine.take_events();

        engine.burn_dsc(&ALICE, 400 * ONE).unwrap();

        assert_eq!(engine.debt_minted(&ALICE), 600 * ONE);
        assert_eq!(engine.debt_token().balance_of(&ALICE), 600 * ONE);
        assert_eq!(engine.debt_token().balance_of(&CUSTODY), 0);
        assert_eq!(engine.debt_token().total_supply(), 600 * ONE);
        assert_eq!(
            engine.take_events(),
            vec![DscEvent::DscBurned {
                on_behalf_of: ALICE,
                payer: ALICE,
                amount: 400 * ONE,
                new_debt: 600 * ONE,
            }]
        );
    }

    #[test]
    fn test_burn_more_than_debt() {
        let engine = setup();
        deposit_and_mint(&engine, &ALICE, &WETH, 10 * ONE, 1_000 * ONE);

        assert_eq!(
            engine.burn_dsc(&ALICE, 1_001 * ONE),
            Err(DscError::InsufficientDebt {
                available: 1_000 * ONE,
                requested: 1_001 * ONE,
            })
        );
        assert_eq!(engine.burn_dsc(&ALICE, 0), Err(DscError::ZeroAmount));
    }

    #[test]
    fn test_burn_pull_failure_rolls_back() {
        let engine = setup();
        deposit_and_mint(&engine, &ALICE, &WETH, 10 * ONE, 1_000 * ONE);
        engine.debt_token_mut().approve(&ALICE, &CUSTODY, 0).unwrap();

        assert_eq!(
            engine.burn_dsc(&ALICE, 100 * ONE),
            Err(DscError::TransferFailed {
                from: ALICE,
                to: CUSTODY,
                amount: 100 * ONE,
            })
        );
        assert_eq!(engine.debt_minted(&ALICE), 1_000 * ONE);
        assert_eq!(engine.debt_token().balance_of(&ALICE), 1_000 * ONE);
    }

    #[test]
    fn test_burn_destroy_failure_restores_pulled_tokens() {
        let engine = setup();
        deposit_and_mint(&engine, &ALICE, &WETH, 10 * ONE, 1_000 * ONE);
        engine.debt_token_mut().switches.fail_burn = true;

        let result = engine.burn_dsc(&ALICE, 100 * ONE);

        assert!(matches!(result, Err(DscError::TransferFailed { .. })));
        assert_eq!(engine.debt_token().balance_of(&ALICE), 1_000 * ONE);
        assert_eq!(engine.debt_token().balance_of(&CUSTODY), 0);
        assert_eq!(engine.debt_minted(&ALICE), 1_000 * ONE);
    }
}
