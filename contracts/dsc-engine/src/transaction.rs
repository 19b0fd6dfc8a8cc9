//! All-or-nothing execution
//!
//! Each mutating entry point runs its body through [`DscEngine::atomic`],
//! which holds the re-entrancy lock for the duration and puts the engine and
//! both token ledgers back the way they were if the body fails.

use dsc_common::{
    errors::DscResult,
    interfaces::{CollateralLedger, DebtToken, PriceFeed},
};

use crate::{storage::EngineState, DscEngine};

/// Everything an operation may change, captured on entry
pub struct Checkpoint<TS, CS> {
    state: EngineState,
    debt_token: TS,
    collateral: CS,
    event_count: usize,
}

impl<T, C, P> DscEngine<T, C, P>
where
    T: DebtToken,
    C: CollateralLedger,
    P: PriceFeed,
{
    fn checkpoint(&self) -> Checkpoint<T::Snapshot, C::Snapshot> {
        Checkpoint {
            state: self.state.borrow().clone(),
            debt_token: self.debt_token.borrow().snapshot(),
            collateral: self.collateral.borrow().snapshot(),
            event_count: self.events.borrow().len(),
        }
    }

    fn rollback(&self, checkpoint: Checkpoint<T::Snapshot, C::Snapshot>) {
        *self.state.borrow_mut() = checkpoint.state;
        self.debt_token.borrow_mut().restore(checkpoint.debt_token);
        self.collateral.borrow_mut().restore(checkpoint.collateral);
        self.events.borrow_mut().truncate(checkpoint.event_count);
    }

    /// Run `body` as one transaction.
    ///
    /// Fails with `Reentrancy`, touching nothing, if another operation is in
    /// progress. Otherwise any error from `body` restores the checkpoint
    /// before it is returned.
    pub(crate) fn atomic<R, F>(&self, operation: &'static str, body: F) -> DscResult<R>
    where
        F: FnOnce(&Self) -> DscResult<R>,
    {
        let _guard = match self.lock.acquire() {
            Ok(guard) => guard,
            Err(err) => {
                log::warn!("{}: rejected re-entrant call", operation);
                return Err(err);
            }
        };

        let checkpoint = self.checkpoint();
        match body(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                self.rollback(checkpoint);
                if err.is_recoverable() {
                    log::debug!("{} rolled back: {}", operation, err);
                } else {
                    log::warn!("{} rolled back: {}", operation, err);
                }
                Err(err)
            }
        }
    }
}
