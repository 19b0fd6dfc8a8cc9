//! Error Types for the DSC Engine
//!
//! Every failure aborts the whole operation. Variants carry the amounts,
//! accounts or computed factors needed to act on them.

use core::fmt;

use crate::types::{Address, AssetId, FeedId};

/// Result type alias for DSC operations
pub type DscResult<T> = Result<T, DscError>;

/// Main error enum for all DSC errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DscError {
    // ============ Amount Errors ============
    /// Zero amount where a positive amount is required
    ZeroAmount,

    /// Redemption or seizure exceeds the deposited balance
    InsufficientCollateral { available: u128, requested: u128 },

    /// Burn or liquidation covers more debt than the account owes
    InsufficientDebt { available: u128, requested: u128 },

    // ============ Registry Errors ============
    /// Asset is not in the collateral registry
    UnsupportedAsset { asset: AssetId },

    /// Construction-time asset and feed lists differ in length
    RegistryLengthMismatch { assets: usize, feeds: usize },

    /// Asset listed twice at construction
    DuplicateAsset { asset: AssetId },

    /// Invalid address (e.g., zero address)
    InvalidAddress {
        /// Description of why the address is invalid
        reason: &'static str,
    },

    // ============ Collaborator Errors ============
    /// External asset or debt transfer reported failure
    TransferFailed { from: Address, to: Address, amount: u128 },

    /// External debt-token mint reported failure
    MintFailed { to: Address, amount: u128 },

    /// Feed has no answer for the asset
    PriceUnavailable { asset: AssetId },

    /// Feed id is not registered with the oracle
    UnknownFeed { feed: FeedId },

    /// Feed answered with a zero or negative price
    InvalidPrice { asset: AssetId, price: i64 },

    // ============ Solvency Errors ============
    /// Post-operation health check failed
    HealthFactorBroken { health_factor: u128 },

    /// Liquidation attempted on a healthy account
    HealthFactorAlreadyOk { health_factor: u128 },

    /// Liquidation did not strictly improve the target's health
    HealthFactorNotImproved { before: u128, after: u128 },

    // ============ Execution Errors ============
    /// Nested call into a guarded entry point
    Reentrancy,

    /// Arithmetic overflow occurred
    Overflow,

    /// Division by zero
    DivisionByZero,

    // ============ Token Errors ============
    /// Holder balance too small for the transfer or burn
    InsufficientBalance { available: u128, requested: u128 },

    /// Spender allowance too small for `transfer_from`
    InsufficientAllowance { available: u128, requested: u128 },

    /// Mint not authorized
    MintUnauthorized { caller: Address },

    /// Burn not authorized
    BurnUnauthorized { caller: Address },

    /// Caller is not authorized for this operation
    Unauthorized { expected: Address, actual: Address },
}

impl DscError {
    /// Returns a human-readable error code for logging/debugging
    pub fn code(&self) -> &'static str {
        match self {
            Self::ZeroAmount => "E001_ZERO_AMOUNT",
            Self::InsufficientCollateral { .. } => "E002_INSUFFICIENT_COLL",
            Self::InsufficientDebt { .. } => "E003_INSUFFICIENT_DEBT",
            Self::UnsupportedAsset { .. } => "E010_UNSUPPORTED_ASSET",
            Self::RegistryLengthMismatch { .. } => "E011_REGISTRY_MISMATCH",
            Self::DuplicateAsset { .. } => "E012_DUPLICATE_ASSET",
            Self::InvalidAddress { .. } => "E013_INVALID_ADDRESS",
            Self::TransferFailed { .. } => "E020_TRANSFER_FAILED",
            Self::MintFailed { .. } => "E021_MINT_FAILED",
            Self::PriceUnavailable { .. } => "E022_PRICE_UNAVAILABLE",
            Self::InvalidPrice { .. } => "E023_INVALID_PRICE",
            Self::UnknownFeed { .. } => "E024_UNKNOWN_FEED",
            Self::HealthFactorBroken { .. } => "E030_HF_BROKEN",
            Self::HealthFactorAlreadyOk { .. } => "E031_HF_OK",
            Self::HealthFactorNotImproved { .. } => "E032_HF_NOT_IMPROVED",
            Self::Reentrancy => "E040_REENTRANCY",
            Self::Overflow => "E050_OVERFLOW",
            Self::DivisionByZero => "E051_DIV_ZERO",
            Self::InsufficientBalance { .. } => "E060_INSUFFICIENT_BALANCE",
            Self::InsufficientAllowance { .. } => "E061_INSUFFICIENT_ALLOWANCE",
            Self::MintUnauthorized { .. } => "E062_MINT_UNAUTH",
            Self::BurnUnauthorized { .. } => "E063_BURN_UNAUTH",
            Self::Unauthorized { .. } => "E064_UNAUTHORIZED",
        }
    }

    /// Returns true if this error is recoverable (user can fix it)
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::HealthFactorBroken { .. } => true, // Add collateral or mint less
            Self::InsufficientCollateral { .. } => true, // Redeem less
            Self::InsufficientBalance { .. } => true, // Get more funds
            Self::InsufficientAllowance { .. } => true, // Approve the engine
            Self::TransferFailed { .. } => true,
            _ => false,
        }
    }
}

impl fmt::Display for DscError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientCollateral { available, requested } => write!(
                f,
                "{}: requested {} but only {} deposited",
                self.code(),
                requested,
                available
            ),
            Self::InsufficientDebt { available, requested } => write!(
                f,
                "{}: requested {} but only {} owed",
                self.code(),
                requested,
                available
            ),
            Self::RegistryLengthMismatch { assets, feeds } => {
                write!(f, "{}: {} assets, {} feeds", self.code(), assets, feeds)
            }
            Self::InvalidAddress { reason } => write!(f, "{}: {}", self.code(), reason),
            Self::MintFailed { amount, .. } => write!(f, "{}: amount {}", self.code(), amount),
            Self::TransferFailed { amount, .. } => {
                write!(f, "{}: amount {}", self.code(), amount)
            }
            Self::InvalidPrice { price, .. } => write!(f, "{}: price {}", self.code(), price),
            Self::HealthFactorBroken { health_factor }
            | Self::HealthFactorAlreadyOk { health_factor } => {
                write!(f, "{}: health factor {}", self.code(), health_factor)
            }
            Self::HealthFactorNotImproved { before, after } => {
                write!(f, "{}: {} -> {}", self.code(), before, after)
            }
            Self::InsufficientBalance { available, requested }
            | Self::InsufficientAllowance { available, requested } => write!(
                f,
                "{}: requested {} of {}",
                self.code(),
                requested,
                available
            ),
            _ => f.write_str(self.code()),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DscError {}
