//! Engine Events
//!
//! Events are emitted by successful operations and can be indexed off-chain.
//! The engine never reads them back.

use crate::Vec;
use borsh::{BorshDeserialize, BorshSerialize};
use serde::{Deserialize, Serialize};
use crate::types::{Address, AssetId};

/// Event types for indexing and filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
#[borsh(use_discriminant = true)]
#[repr(u8)]
pub enum EventType {
    // Collateral Events (0x01 - 0x1F)
    CollateralDeposited = 0x01,
    CollateralRedeemed = 0x02,

    // Debt Events (0x20 - 0x3F)
    DscMinted = 0x20,
    DscBurned = 0x21,

    // Liquidation Events (0x40 - 0x5F)
    Liquidated = 0x40,
}

/// Main event enum containing all engine events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, BorshSerialize, BorshDeserialize)]
pub enum DscEvent {
    // ============ Collateral Events ============

    /// Emitted when collateral enters custody
    CollateralDeposited {
        user: Address,
        asset: AssetId,
        amount: u128,
    },

    /// Emitted when collateral leaves custody.
    ///
    /// `from` and `to` differ during liquidation.
    CollateralRedeemed {
        from: Address,
        to: Address,
        asset: AssetId,
        amount: u128,
    },

    // ============ Debt Events ============

    /// Emitted when DSC is minted against collateral
    DscMinted {
        user: Address,
        amount: u128,
        new_debt: u128,
    },

    /// Emitted when DSC is burned to reduce debt
    DscBurned {
        on_behalf_of: Address,
        payer: Address,
        amount: u128,
        new_debt: u128,
    },

    // ============ Liquidation Events ============

    /// Emitted when an unhealthy account is liquidated
    Liquidated {
        liquidator: Address,
        target: Address,
        asset: AssetId,
        debt_covered: u128,
        collateral_seized: u128,
        bonus: u128,
    },
}

impl DscEvent {
    /// Get the event type for filtering
    pub fn event_type(&self) -> EventType {
        match self {
            Self::CollateralDeposited { .. } => EventType::CollateralDeposited,
            Self::CollateralRedeemed { .. } => EventType::CollateralRedeemed,
            Self::DscMinted { .. } => EventType::DscMinted,
            Self::DscBurned { .. } => EventType::DscBurned,
            Self::Liquidated { .. } => EventType::Liquidated,
        }
    }

    /// Serialize event to bytes for storage/transmission
    pub fn to_bytes(&self) -> Vec<u8> {
        borsh::to_vec(self).unwrap_or_default()
    }

    /// Deserialize event from bytes
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        borsh::from_slice(bytes).ok()
    }
}

/// Event log for collecting multiple events during execution
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<DscEvent>,
}

impl EventLog {
    /// Create a new empty event log
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Emit an event (add to log)
    pub fn emit(&mut self, event: DscEvent) {
        self.events.push(event);
    }

    /// Get all events
    pub fn events(&self) -> &[DscEvent] {
        &self.events
    }

    /// Take ownership of all events, leaving the log empty
    pub fn drain(&mut self) -> Vec<DscEvent> {
        core::mem::take(&mut self.events)
    }

    /// Drop every event emitted after the log held `len` events
    pub fn truncate(&mut self, len: usize) {
        self.events.truncate(len);
    }

    /// Filter events by type
    pub fn filter_by_type(&self, event_type: EventType) -> Vec<&DscEvent> {
        self.events
            .iter()
            .filter(|e| e.event_type() == event_type)
            .collect()
    }

    /// Check if any events were emitted
    pub fn has_events(&self) -> bool {
        !self.events.is_empty()
    }

    /// Get number of events
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns true if no events were emitted
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
