//! Pull-style consumption of typed contract events.

use std::marker::PhantomData;

use tokio::sync::mpsc;

use crate::bound::{BoundContract, ContractEvent};
use crate::error::BindError;
use crate::log::Log;
use crate::subscription::Subscription;

/// Iterates decoded `E` events from a log source (historical filter or live
/// watch).
///
/// Once the source finishes, logs already buffered are still returned, then
/// a source error (if any) is returned once. A log that fails to decode is
/// returned as an error and ends the iteration.
pub struct EventIterator<E> {
    contract: BoundContract,
    logs: mpsc::Receiver<Log>,
    sub: Subscription,
    done: bool,
    pending_err: Option<BindError>,
    failed: bool,
    _event: PhantomData<fn() -> E>,
}

enum Step {
    Log(Option<Log>),
    SourceEnded(Option<BindError>),
}

impl<E: ContractEvent> EventIterator<E> {
    pub fn new(contract: BoundContract, logs: mpsc::Receiver<Log>, sub: Subscription) -> Self {
        Self {
            contract,
            logs,
            sub,
            done: false,
            pending_err: None,
            failed: false,
            _event: PhantomData,
        }
    }

    /// Advance to the next event.
    pub async fn next(&mut self) -> Option<Result<E, BindError>> {
        if self.failed {
            return None;
        }

        if !self.done {
            let step = tokio::select! {
                log = self.logs.recv() => Step::Log(log),
                err = self.sub.err() => Step::SourceEnded(err),
            };
            match step {
                Step::Log(Some(log)) => return Some(self.decode(log)),
                Step::Log(None) => {
                    // Producer is gone; collect its error, if it had one.
                    self.done = true;
                    self.pending_err = self.sub.err().await;
                }
                Step::SourceEnded(err) => {
                    self.done = true;
                    self.pending_err = err;
                }
            }
        }

        // Drain whatever was buffered before the source ended.
        match self.logs.try_recv() {
            Ok(log) => Some(self.decode(log)),
            Err(_) => self.pending_err.take().map(|e| {
                self.failed = true;
                Err(e)
            }),
        }
    }

    /// Collect every remaining event, stopping at the first error.
    pub async fn collect(mut self) -> Result<Vec<E>, BindError> {
        let mut events = Vec::new();
        while let Some(event) = self.next().await {
            events.push(event?);
        }
        self.close().await;
        Ok(events)
    }

    /// Stop the underlying source.
    pub async fn close(mut self) {
        self.sub.unsubscribe().await;
    }

    fn decode(&mut self, log: Log) -> Result<E, BindError> {
        let decoded = self
            .contract
            .unpack_log(E::NAME, &log)
            .and_then(E::from_log);
        if decoded.is_err() {
            self.failed = true;
        }
        decoded
    }
}
