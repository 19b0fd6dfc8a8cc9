//! Health Engine
//!
//! USD valuation of collateral through the price feeds and the per-account
//! health factor. Nothing here mutates state or takes the re-entrancy lock.

use dsc_common::{
    constants::risk,
    errors::{DscError, DscResult},
    interfaces::{CollateralLedger, DebtToken, PriceFeed},
    math,
    types::{AccountInformation, Address, AssetId},
};

use crate::DscEngine;

impl<T, C, P> DscEngine<T, C, P>
where
    T: DebtToken,
    C: CollateralLedger,
    P: PriceFeed,
{
    // ============ Prices ============

    /// Current 8-decimal price of `asset`, checked positive
    pub fn price_of(&self, asset: &AssetId) -> DscResult<u128> {
        let feed = self.registry.feed_of(asset)?;
        let answer = self
            .price_feed
            .borrow()
            .latest_price(&feed)
            .ok_or(DscError::PriceUnavailable { asset: *asset })?;
        math::validate_price(asset, answer)
    }

    /// USD value (18 decimals) of `amount` of `asset`
    pub fn usd_value(&self, asset: &AssetId, amount: u128) -> DscResult<u128> {
        math::usd_value(amount, self.price_of(asset)?)
    }

    /// Quantity of `asset` worth `usd_amount` (18 decimals), rounded down
    pub fn token_amount_from_usd(&self, asset: &AssetId, usd_amount: u128) -> DscResult<u128> {
        math::token_amount_from_usd(usd_amount, self.price_of(asset)?)
    }

    // ============ Account Queries ============

    /// Deposited quantity of `asset` held for `account`
    pub fn collateral_balance(&self, account: &Address, asset: &AssetId) -> u128 {
        self.state.borrow().collateral_of(account, asset)
    }

    /// Outstanding DSC minted by `account`
    pub fn debt_minted(&self, account: &Address) -> u128 {
        self.state.borrow().debt_of(account)
    }

    /// USD value of everything `account` has deposited, summed in registry
    /// order. Assets with a zero balance are not priced.
    pub fn account_collateral_value_usd(&self, account: &Address) -> DscResult<u128> {
        let mut total = 0u128;
        for asset in self.registry.assets() {
            let amount = self.collateral_balance(account, asset);
            if amount == 0 {
                continue;
            }
            total = math::safe_add(total, self.usd_value(asset, amount)?)?;
        }
        Ok(total)
    }

    pub fn account_information(&self, account: &Address) -> DscResult<AccountInformation> {
        Ok(AccountInformation {
            debt_minted: self.debt_minted(account),
            collateral_value_usd: self.account_collateral_value_usd(account)?,
        })
    }

    /// Health factor of `account` (18 decimals).
    ///
    /// An account without debt returns `HEALTH_FACTOR_INFINITE` and its
    /// collateral is not priced.
    pub fn health_factor(&self, account: &Address) -> DscResult<u128> {
        let debt = self.debt_minted(account);
        if debt == 0 {
            return Ok(risk::HEALTH_FACTOR_INFINITE);
        }
        let collateral_value = self.account_collateral_value_usd(account)?;
        Ok(math::calculate_health_factor(debt, collateral_value))
    }

    /// Fail with `HealthFactorBroken` if `account` is below the minimum
    pub fn assert_healthy(&self, account: &Address) -> DscResult<()> {
        let health_factor = self.health_factor(account)?;
        if !math::is_healthy(health_factor) {
            return Err(DscError::HealthFactorBroken { health_factor });
        }
        Ok(())
    }

    /// DSC `account` can still mint before reaching the minimum health factor
    pub fn max_mintable(&self, account: &Address) -> DscResult<u128> {
        let collateral_value = self.account_collateral_value_usd(account)?;
        let ceiling = math::max_debt_for_collateral(collateral_value)?;
        Ok(ceiling.saturating_sub(self.debt_minted(account)))
    }

    // ============ Previews ============

    /// Health factor of a hypothetical position
    pub fn calculate_health_factor(debt_minted: u128, collateral_value_usd: u128) -> u128 {
        math::calculate_health_factor(debt_minted, collateral_value_usd)
    }

    pub fn liquidation_threshold() -> u128 {
        risk::LIQUIDATION_THRESHOLD
    }

    pub fn liquidation_bonus() -> u128 {
        risk::LIQUIDATION_BONUS
    }

    pub fn min_health_factor() -> u128 {
        risk::MIN_HEALTH_FACTOR
    }
}
