//! Collateral Vault
//!
//! Deposits pull collateral into engine custody, redemptions push it back
//! out. Bookkeeping is updated before the external transfer in both
//! directions; a failed transfer rolls the bookkeeping back with it.

use dsc_common::{
    errors::{DscError, DscResult},
    events::DscEvent,
    interfaces::{CollateralLedger, DebtToken, PriceFeed},
    types::{Address, AssetId, ZERO_ADDRESS},
};

use crate::DscEngine;

impl<T, C, P> DscEngine<T, C, P>
where
    T: DebtToken,
    C: CollateralLedger,
    P: PriceFeed,
{
    /// Deposit `amount` of `asset` from `account` into custody.
    ///
    /// `account` must have approved the custody address on the asset ledger.
    pub fn deposit_collateral(&self, account: &Address, asset: &AssetId, amount: u128) -> DscResult<()> {
        self.atomic("deposit_collateral", |engine| {
            engine.deposit_inner(account, asset, amount)
        })
    }

    /// Redeem `amount` of `account`'s `asset` back to `account`
    pub fn redeem_collateral(&self, account: &Address, asset: &AssetId, amount: u128) -> DscResult<()> {
        self.redeem_collateral_to(account, asset, amount, account)
    }

    /// Redeem `amount` of `account`'s `asset` to `recipient`.
    ///
    /// `account` must stay healthy afterwards.
    pub fn redeem_collateral_to(
        &self,
        account: &Address,
        asset: &AssetId,
        amount: u128,
        recipient: &Address,
    ) -> DscResult<()> {
        self.atomic("redeem_collateral", |engine| {
            if *recipient == ZERO_ADDRESS {
                return Err(DscError::InvalidAddress {
                    reason: "recipient cannot be zero address",
                });
            }
            engine.redeem_inner(account, recipient, asset, amount)?;
            engine.assert_healthy(account)
        })
    }

    pub(crate) fn deposit_inner(&self, account: &Address, asset: &AssetId, amount: u128) -> DscResult<()> {
        // 1. Amount must be positive
        if amount == 0 {
            return Err(DscError::ZeroAmount);
        }

        // 2. Asset must be registered
        self.registry.ensure_supported(asset)?;

        // 3. Bookkeeping first
        let balance = self
            .state
            .borrow_mut()
            .credit_collateral(account, asset, amount)?;

        // 4. Pull the collateral into custody
        let custody = self.custody;
        let pulled = self
            .collateral
            .borrow_mut()
            .transfer_from(asset, &custody, account, &custody, amount);
        if !pulled {
            return Err(DscError::TransferFailed {
                from: *account,
                to: custody,
                amount,
            });
        }

        // 5. Emit event
        self.emit(DscEvent::CollateralDeposited {
            user: *account,
            asset: *asset,
            amount,
        });

        log::debug!(
            "collateral deposited: account {:02x?} amount {} balance {}",
            &account[..4],
            amount,
            balance
        );
        Ok(())
    }

    /// Move `amount` of `from`'s `asset` out of custody to `to`.
    ///
    /// Does not check health; the caller decides whose health matters.
    pub(crate) fn redeem_inner(
        &self,
        from: &Address,
        to: &Address,
        asset: &AssetId,
        amount: u128,
    ) -> DscResult<()> {
        // 1. Amount must be positive
        if amount == 0 {
            return Err(DscError::ZeroAmount);
        }

        // 2. Asset must be registered
        self.registry.ensure_supported(asset)?;

        // 3. Cannot redeem more than deposited
        let available = self.state.borrow().collateral_of(from, asset);
        if amount > available {
            return Err(DscError::InsufficientCollateral {
                available,
                requested: amount,
            });
        }

        // 4. Bookkeeping first
        let balance = self.state.borrow_mut().debit_collateral(from, asset, amount);

        // 5. Push the collateral out of custody
        let custody = self.custody;
        let pushed = self
            .collateral
            .borrow_mut()
            .transfer(asset, &custody, to, amount);
        if !pushed {
            return Err(DscError::TransferFailed {
                from: custody,
                to: *to,
                amount,
            });
        }

        // 6. Emit event
        self.emit(DscEvent::CollateralRedeemed {
            from: *from,
            to: *to,
            asset: *asset,
            amount,
        });

        log::debug!(
            "collateral redeemed: from {:02x?} to {:02x?} amount {} balance {}",
            &from[..4],
            &to[..4],
            amount,
            balance
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use dsc_common::{errors::DscError, events::EventType};

    use crate::testing::*;

    #[test]
    fn test_deposit_success() {
        let engine = setup();
        fund_and_approve(&engine, &ALICE, &WETH, 10 * ONE);

        engine.deposit_collateral(&ALICE, &WETH, 10 * ONE).unwrap();

        assert_eq!(engine.collateral_balance(&ALICE, &WETH), 10 * ONE);
        assert_eq!(engine.collateral_ledger().balance_of(&WETH, &ALICE), 0);
        assert_eq!(engine.collateral_ledger().balance_of(&WETH, &CUSTODY), 10 * ONE);

        let events = engine.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), EventType::CollateralDeposited);
    }

    #[test]
    fn test_deposit_zero_amount() {
        let engine = setup();
        assert_eq!(
            engine.deposit_collateral(&ALICE, &WETH, 0),
            Err(DscError::ZeroAmount)
        );
    }

    #[test]
    fn test_deposit_unsupported_asset() {
        let engine = setup();
        let unknown = [99u8; 32];
        assert_eq!(
            engine.deposit_collateral(&ALICE, &unknown, ONE),
            Err(DscError::UnsupportedAsset { asset: unknown })
        );
    }

    #[test]
    fn test_deposit_without_approval_rolls_back() {
        let engine = setup();
        engine
            .collateral_ledger_mut()
            .fund(&WETH, &ALICE, 10 * ONE)
            .unwrap();

        let result = engine.deposit_collateral(&ALICE, &WETH, 10 * ONE);

        assert_eq!(
            result,
            Err(DscError::TransferFailed {
                from: ALICE,
                to: CUSTODY,
                amount: 10 * ONE,
            })
        );
        assert_eq!(engine.collateral_balance(&ALICE, &WETH), 0);
        assert!(engine.take_events().is_empty());
    }

    #[test]
    fn test_redeem_to_self() {
        let engine = setup();
        deposit(&engine, &ALICE, &WETH, 10 * ONE);

        engine.redeem_collateral(&ALICE, &WETH, 4 * ONE).unwrap();

        assert_eq!(engine.collateral_balance(&ALICE, &WETH), 6 * ONE);
        assert_eq!(engine.collateral_ledger().balance_of(&WETH, &ALICE), 4 * ONE);
    }

    #[test]
    fn test_redeem_to_recipient() {
        let engine = setup();
        deposit(&engine, &ALICE, &WETH, 10 * ONE);
        engine.take_events();

        engine.redeem_collateral_to(&ALICE, &WETH, ONE, &BOB).unwrap();

        assert_eq!(engine.collateral_ledger().balance_of(&WETH, &BOB), ONE);
        assert_eq!(
            engine.take_events(),
            vec![dsc_common::events::DscEvent::CollateralRedeemed {
                from: ALICE,
                to: BOB,
                asset: WETH,
                amount: ONE,
            }]
        );

        assert!(matches!(
            engine.redeem_collateral_to(&ALICE, &WETH, ONE, &[0u8; 32]),
            Err(DscError::InvalidAddress { .. })
        ));
    }

    #[test]
    fn test_redeem_more_than_deposited() {
        let engine = setup();
        deposit(&engine, &ALICE, &WETH, 10 * ONE);

        assert_eq!(
            engine.redeem_collateral(&ALICE, &WETH, 11 * ONE),
            Err(DscError::InsufficientCollateral {
                available: 10 * ONE,
                requested: 11 * ONE,
            })
        );
        assert_eq!(engine.collateral_balance(&ALICE, &WETH), 10 * ONE);
        assert_eq!(engine.collateral_ledger().balance_of(&WETH, &CUSTODY), 10 * ONE);
    }

    #[test]
    fn test_redeem_that_breaks_health() {
        let engine = setup();
        deposit(&engine, &ALICE, &WETH, 10 * ONE);
        engine.mint_dsc(&ALICE, 5_000 * ONE).unwrap();

        // 4.9 WETH left is worth $9,800, half of which no longer covers 5,000 DSC
        let result = engine.redeem_collateral(&ALICE, &WETH, 5 * ONE + ONE / 10);

        assert!(matches!(result, Err(DscError::HealthFactorBroken { .. })));
        assert_eq!(engine.collateral_balance(&ALICE, &WETH), 10 * ONE);
        assert_eq!(engine.collateral_ledger().balance_of(&WETH, &ALICE), 0);

        // Exactly at the minimum is allowed
        engine.redeem_collateral(&ALICE, &WETH, 5 * ONE).unwrap();
        assert_eq!(engine.health_factor(&ALICE).unwrap(), MIN_HEALTH_FACTOR);
    }

    #[test]
    fn test_redeem_transfer_failure() {
        let engine = setup();
        deposit(&engine, &ALICE, &WETH, 10 * ONE);
        engine.collateral_ledger_mut().switches.fail_transfers = true;

        assert_eq!(
            engine.redeem_collateral(&ALICE, &WETH, ONE),
            Err(DscError::TransferFailed {
                from: CUSTODY,
                to: ALICE,
                amount: ONE,
            })
        );
        assert_eq!(engine.collateral_balance(&ALICE, &WETH), 10 * ONE);
    }
}
