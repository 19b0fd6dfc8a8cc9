//! Liquidation
//!
//! A liquidator repays part or all of an unhealthy account's debt with its own
//! DSC and receives the equivalent collateral plus a bonus. The trade must
//! leave the target strictly healthier and the liquidator still healthy.
//!
//! ## Bonus Headroom
//!
//! When the target's balance of the chosen asset covers the repaid value but
//! not the full bonus, the bonus shrinks to whatever is left. If it does not
//! cover the repaid value itself the liquidation fails.
//!
//! ## Dust
//!
//! Debt worth less than one base unit of the asset seizes nothing. The debt
//! is still burned and the usual health checks still apply.

use dsc_common::{
    errors::{DscError, DscResult},
    events::DscEvent,
    interfaces::{CollateralLedger, DebtToken, PriceFeed},
    math,
    types::{Address, AssetId, LiquidationOutcome},
};

use crate::DscEngine;

impl<T, C, P> DscEngine<T, C, P>
where
    T: DebtToken,
    C: CollateralLedger,
    P: PriceFeed,
{
    /// Cover `debt_to_cover` of `target`'s debt, paid by `liquidator`, in
    /// exchange for `target`'s `asset`.
    ///
    /// `liquidator` must have approved the custody address on the debt token.
    ///
    /// # Errors
    /// - `ZeroAmount`, `UnsupportedAsset`
    /// - `HealthFactorAlreadyOk` if `target` is not below the minimum
    /// - `InsufficientDebt` if `debt_to_cover` exceeds `target`'s debt
    /// - `InsufficientCollateral` if `target` holds less `asset` than the
    ///   repaid value
    /// - `HealthFactorNotImproved` if `target` does not end strictly healthier
    /// - `HealthFactorBroken` if `liquidator` ends below the minimum
    /// - `TransferFailed` from either ledger
    pub fn liquidate(
        &self,
        liquidator: &Address,
        asset: &AssetId,
        target: &Address,
        debt_to_cover: u128,
    ) -> DscResult<LiquidationOutcome> {
        self.atomic("liquidate", |engine| {
            engine.liquidate_inner(liquidator, asset, target, debt_to_cover)
        })
    }

    fn liquidate_inner(
        &self,
        liquidator: &Address,
        asset: &AssetId,
        target: &Address,
        debt_to_cover: u128,
    ) -> DscResult<LiquidationOutcome> {
        // 1. Amount must be positive
        if debt_to_cover == 0 {
            return Err(DscError::ZeroAmount);
        }

        // 2. Asset must be registered
        self.registry.ensure_supported(asset)?;

        // 3. Target must be unhealthy
        let health_factor_before = self.health_factor(target)?;
        if math::is_healthy(health_factor_before) {
            return Err(DscError::HealthFactorAlreadyOk {
                health_factor: health_factor_before,
            });
        }

        // 4. Cannot cover more debt than exists
        self.ensure_debt_covers(target, debt_to_cover)?;

        // 5. Collateral equal in value to the repaid debt, plus bonus
        let seized_base = self.token_amount_from_usd(asset, debt_to_cover)?;
        let available = self.collateral_balance(target, asset);
        if seized_base > available {
            return Err(DscError::InsufficientCollateral {
                available,
                requested: seized_base,
            });
        }
        let bonus = math::liquidation_bonus(seized_base)?.min(available - seized_base);
        let total_seized = seized_base + bonus;

        // 6. Collateral moves from target to liquidator
        if total_seized > 0 {
            self.redeem_inner(target, liquidator, asset, total_seized)?;
        }

        // 7. Liquidator pays off the target's debt
        self.burn_inner(target, liquidator, debt_to_cover)?;

        // 8. Target must end strictly healthier
        let health_factor_after = self.health_factor(target)?;
        if health_factor_after <= health_factor_before {
            return Err(DscError::HealthFactorNotImproved {
                before: health_factor_before,
                after: health_factor_after,
            });
        }

        // 9. Liquidator must stay healthy
        self.assert_healthy(liquidator)?;

        // 10. Emit event
        self.emit(DscEvent::Liquidated {
            liquidator: *liquidator,
            target: *target,
            asset: *asset,
            debt_covered: debt_to_cover,
            collateral_seized: total_seized,
            bonus,
        });

        log::debug!(
            "liquidated {:02x?}: covered {} seized {} (bonus {}) hf {} -> {}",
            &target[..4],
            debt_to_cover,
            total_seized,
            bonus,
            health_factor_before,
            health_factor_after
        );

        Ok(LiquidationOutcome {
            target: *target,
            liquidator: *liquidator,
            asset: *asset,
            debt_covered: debt_to_cover,
            seized_base,
            bonus,
            health_factor_before,
            health_factor_after,
        })
    }
}
