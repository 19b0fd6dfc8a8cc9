//! DSC Common Library
//!
//! Shared types, constants, and utilities for the DSC engine and its
//! collaborators.
//!
//! ## Layout
//!
//! - **constants**: fixed-point scales, risk parameters, token metadata
//! - **errors**: the `DscError` taxonomy shared by every crate
//! - **types**: identifiers, account snapshots, liquidation reports
//! - **math**: 18-decimal fixed-point conversions and the health factor
//! - **events**: indexable notifications and the `EventLog` collector
//! - **interfaces**: the capabilities the engine calls into (debt token,
//!   collateral ledger, price feed) and the `Revertible` rollback contract
//!
//! All amounts are integers. Collateral, debt and USD values use 18 decimals,
//! price feeds report 8 decimals.
//!
//! This crate is `no_std` compatible when built without the default `std`
//! feature.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

// Re-export Vec for submodules based on feature
#[cfg(not(feature = "std"))]
pub use alloc::vec::Vec;
#[cfg(feature = "std")]
pub use std::vec::Vec;

pub mod constants;
pub mod errors;
pub mod types;
pub mod math;
pub mod events;
pub mod interfaces;

// Re-exports for convenience
pub use constants::*;
pub use errors::*;
pub use types::*;
pub use math::*;
pub use events::*;
pub use interfaces::*;
