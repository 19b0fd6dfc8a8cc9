//! Supported asset registry
//!
//! Fixed at construction: the ordered list of collateral assets and the price
//! feed of each. Iteration always follows construction order.

use std::collections::BTreeMap;

use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};

use dsc_common::{
    errors::{DscError, DscResult},
    types::{AssetId, FeedId, ZERO_ADDRESS},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub struct AssetRegistry {
    assets: Vec<AssetId>,
    feeds: BTreeMap<AssetId, FeedId>,
}

impl AssetRegistry {
    /// Pair `assets[i]` with `feeds[i]`.
    ///
    /// # Errors
    /// - `RegistryLengthMismatch` if the lists differ in length (checked first)
    /// - `InvalidAddress` for a zero asset or feed id
    /// - `DuplicateAsset` if an asset appears twice
    pub fn new(assets: &[AssetId], feeds: &[FeedId]) -> DscResult<Self> {
        if assets.len() != feeds.len() {
            return Err(DscError::RegistryLengthMismatch {
                assets: assets.len(),
                feeds: feeds.len(),
            });
        }

        let mut map = BTreeMap::new();
        for (asset, feed) in assets.iter().zip(feeds) {
            if *asset == ZERO_ADDRESS {
                return Err(DscError::InvalidAddress {
                    reason: "collateral asset cannot be zero",
                });
            }
            if *feed == ZERO_ADDRESS {
                return Err(DscError::InvalidAddress {
                    reason: "price feed cannot be zero",
                });
            }
            if map.insert(*asset, *feed).is_some() {
                return Err(DscError::DuplicateAsset { asset: *asset });
            }
        }

        Ok(Self {
            assets: assets.to_vec(),
            feeds: map,
        })
    }

    /// Registered assets in construction order
    pub fn assets(&self) -> &[AssetId] {
        &self.assets
    }

    pub fn is_supported(&self, asset: &AssetId) -> bool {
        self.feeds.contains_key(asset)
    }

    pub fn ensure_supported(&self, asset: &AssetId) -> DscResult<()> {
        self.feed_of(asset).map(|_| ())
    }

    /// Price feed of `asset`
    pub fn feed_of(&self, asset: &AssetId) -> DscResult<FeedId> {
        self.feeds
            .get(asset)
            .copied()
            .ok_or(DscError::UnsupportedAsset { asset: *asset })
    }

    pub fn len(&self) -> usize {
        self.assets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.assets.is_empty()
    }
}
