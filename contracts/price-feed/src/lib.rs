//! Price Feeds
//!
//! USD price feeds for the DSC engine's collateral assets, one per feed id.
//! Uses a trusted operator model: each feed has an operator that posts new
//! answers, and an admin that registers feeds and rotates operators.
//!
//! Answers are signed integers with 8 decimals (`200000000000` = $2,000).
//! Nothing here checks freshness or deviation; the engine only rejects
//! non-positive answers.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use dsc_common::{
    constants::precision::FEED_DECIMALS,
    errors::{DscError, DscResult},
    interfaces::PriceFeed,
    types::{Address, FeedId, ZERO_ADDRESS},
};

// ============ Feed State ============

/// State of a single feed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct FeedState {
    /// Latest answer, 8 decimals
    pub answer: i64,
    /// Incremented on every update; the first answer is round 1
    pub round_id: u64,
    /// Authorized operator (can post answers)
    pub operator: Address,
}

impl FeedState {
    /// Create feed state with an initial answer
    pub fn new(operator: Address, initial_answer: i64) -> Self {
        Self {
            answer: initial_answer,
            round_id: 1,
            operator,
        }
    }
}

/// Answer and round of a feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundData {
    pub round_id: u64,
    pub answer: i64,
}

// ============ Feed Registry ============

/// Every feed known to the oracle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct PriceFeeds {
    /// Admin (registers feeds, changes operators)
    admin: Address,
    feeds: BTreeMap<FeedId, FeedState>,
}

impl PriceFeeds {
    /// Create an empty registry administered by `admin`
    pub fn new(admin: Address) -> Self {
        Self {
            admin,
            feeds: BTreeMap::new(),
        }
    }

    /// Decimal places of every answer
    pub fn decimals() -> u8 {
        FEED_DECIMALS
    }

    fn ensure_admin(&self, caller: &Address) -> DscResult<()> {
        if *caller != self.admin {
            return Err(DscError::Unauthorized {
                expected: self.admin,
                actual: *caller,
            });
        }
        Ok(())
    }

    fn feed_mut(&mut self, feed: &FeedId) -> DscResult<&mut FeedState> {
        self.feeds
            .get_mut(feed)
            .ok_or(DscError::UnknownFeed { feed: *feed })
    }

    /// Register a new feed (admin only)
    pub fn register_feed(
        &mut self,
        caller: &Address,
        feed: FeedId,
        operator: Address,
        initial_answer: i64,
    ) -> DscResult<()> {
        // 1. Only admin can register
        self.ensure_admin(caller)?;

        // 2. Feed and operator must be real addresses
        if feed == ZERO_ADDRESS {
            return Err(DscError::InvalidAddress {
                reason: "feed id cannot be zero",
            });
        }
        if operator == ZERO_ADDRESS {
            return Err(DscError::InvalidAddress {
                reason: "operator cannot be zero address",
            });
        }

        // 3. Register (replacing any previous state)
        self.feeds.insert(feed, FeedState::new(operator, initial_answer));
        log::debug!("price feed registered: answer={}", initial_answer);
        Ok(())
    }

    /// Post a new answer (operator only)
    pub fn update_answer(&mut self, caller: &Address, feed: &FeedId, answer: i64) -> DscResult<()> {
        let state = self.feed_mut(feed)?;

        // 1. Only operator can update price
        if *caller != state.operator {
            return Err(DscError::Unauthorized {
                expected: state.operator,
                actual: *caller,
            });
        }

        // 2. Record the answer
        let old_answer = state.answer;
        state.answer = answer;
        state.round_id = state.round_id.saturating_add(1);
        log::debug!(
            "price updated: {} -> {} (round {})",
            old_answer,
            answer,
            state.round_id
        );
        Ok(())
    }

    /// Change a feed's operator (admin only)
    pub fn set_operator(&mut self, caller: &Address, feed: &FeedId, operator: Address) -> DscResult<()> {
        self.ensure_admin(caller)?;
        if operator == ZERO_ADDRESS {
            return Err(DscError::InvalidAddress {
                reason: "operator cannot be zero address",
            });
        }
        self.feed_mut(feed)?.operator = operator;
        Ok(())
    }

    /// Latest answer and round of `feed`
    pub fn latest_round_data(&self, feed: &FeedId) -> Option<RoundData> {
        self.feeds.get(feed).map(|state| RoundData {
            round_id: state.round_id,
            answer: state.answer,
        })
    }

    /// State of `feed`
    pub fn feed(&self, feed: &FeedId) -> Option<&FeedState> {
        self.feeds.get(feed)
    }
}

impl PriceFeed for PriceFeeds {
    fn latest_price(&self, feed: &FeedId) -> Option<i64> {
        self.feeds.get(feed).map(|state| state.answer)
    }
}

// ============ Tests ============
