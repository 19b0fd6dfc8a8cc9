//! Shared test fixtures: an engine over the reference token, collateral
//! ledgers and price feeds, with WETH at $2,000 and WBTC at $30,000.

use dsc_common::types::{Address, AssetId, EngineConfig, FeedId};
use dsc_price_feed::PriceFeeds;
use dsc_token::{CollateralLedgers, DscToken};

use crate::DscEngine;

pub use dsc_common::constants::{risk::MIN_HEALTH_FACTOR, token::ONE};

pub type TestEngine = DscEngine<DscToken, CollateralLedgers, PriceFeeds>;

pub const CUSTODY: Address = [0xC0; 32];
pub const DSC_TOKEN: Address = [0xD5; 32];
pub const ORACLE_ADMIN: Address = [0xAD; 32];
pub const ORACLE_OPERATOR: Address = [0x0F; 32];

pub const ALICE: Address = [1u8; 32];
pub const BOB: Address = [2u8; 32];
pub const CAROL: Address = [3u8; 32];

pub const WETH: AssetId = [10u8; 32];
pub const WBTC: AssetId = [11u8; 32];
pub const ETH_USD_FEED: FeedId = [20u8; 32];
pub const BTC_USD_FEED: FeedId = [21u8; 32];

/// $2,000 with 8 decimals
pub const ETH_PRICE: i64 = 2_000_00000000;
/// $30,000 with 8 decimals
pub const BTC_PRICE: i64 = 30_000_00000000;

pub fn test_config() -> EngineConfig {
    EngineConfig::from_pairs(
        &[(WETH, ETH_USD_FEED), (WBTC, BTC_USD_FEED)],
        DSC_TOKEN,
        CUSTODY,
    )
}

pub fn test_price_feeds() -> PriceFeeds {
    let mut feeds = PriceFeeds::new(ORACLE_ADMIN);
    feeds
        .register_feed(&ORACLE_ADMIN, ETH_USD_FEED, ORACLE_OPERATOR, ETH_PRICE)
        .unwrap();
    feeds
        .register_feed(&ORACLE_ADMIN, BTC_USD_FEED, ORACLE_OPERATOR, BTC_PRICE)
        .unwrap();
    feeds
}

pub fn setup() -> TestEngine {
    DscEngine::new(
        test_config(),
        DscToken::new(CUSTODY).unwrap(),
        CollateralLedgers::new(&[WETH, WBTC]),
        test_price_feeds(),
    )
    .unwrap()
}

pub fn set_price(engine: &TestEngine, feed: &FeedId, answer: i64) {
    engine
        .price_feed_mut()
        .update_answer(&ORACLE_OPERATOR, feed, answer)
        .unwrap();
}

/// Give `account` `amount` of `asset` and let custody pull it
pub fn fund_and_approve(engine: &TestEngine, account: &Address, asset: &AssetId, amount: u128) {
    let mut ledgers = engine.collateral_ledger_mut();
    ledgers.fund(asset, account, amount).unwrap();
    ledgers.approve(asset, account, &CUSTODY, u128::MAX).unwrap();
}

pub fn deposit(engine: &TestEngine, account: &Address, asset: &AssetId, amount: u128) {
    fund_and_approve(engine, account, asset, amount);
    engine.deposit_collateral(account, asset, amount).unwrap();
}

/// Deposit, mint, and approve custody to pull the minted DSC back for burns
pub fn deposit_and_mint(
    engine: &TestEngine,
    account: &Address,
    asset: &AssetId,
    collateral: u128,
    dsc: u128,
) {
    fund_and_approve(engine, account, asset, collateral);
    engine
        .deposit_collateral_and_mint_dsc(account, asset, collateral, dsc)
        .unwrap();
    engine
        .debt_token_mut()
        .approve(account, &CUSTODY, u128::MAX)
        .unwrap();
}
