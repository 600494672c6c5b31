//! Fair rate-limited scheduler for the per-target poll loops.
//!
//! The remote filter API is throttled account-wide, so poll cycles are
//! not free-running: each target waits for a trigger signal, and the
//! coordinator hands out exactly one signal per tick, round-robin over
//! the live targets. Trigger channels are bounded to a single slot, so
//! a target that is still busy with its previous cycle accrues at most
//! one pending signal no matter how long it lags.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::interval;

use cwtail_core::Ring;

/// One trigger signal is dispensed per tick.
pub const TICK_PERIOD: Duration = Duration::from_millis(250);

/// Collects the trigger handles of all targets, then runs the clock.
pub struct Coordinator {
    senders: Vec<(u64, mpsc::Sender<()>)>,
    next_id: u64,
}

impl Coordinator {
    pub fn new() -> Self {
        Self {
            senders: Vec::new(),
            next_id: 0,
        }
    }

    /// Add one target to the rotation and hand back its trigger source.
    /// The single-slot channel is what bounds pending signals to one.
    pub fn register(&mut self) -> mpsc::Receiver<()> {
        let (tx, rx) = mpsc::channel(1);
        self.senders.push((self.next_id, tx));
        self.next_id += 1;
        rx
    }

    /// Start the clock. Every 250ms the next live target in cyclic order
    /// is signalled; a full slot is left alone (the pending signal
    /// already covers the next cycle), a closed receiver means the
    /// target's loop has ended and its slot is unlinked. The clock stops
    /// once every target is gone.
    pub fn spawn(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ring = Ring::new(self.senders);
            let mut ticker = interval(TICK_PERIOD);
            loop {
                ticker.tick().await;
                let Some((id, tx)) = ring.advance() else {
                    break;
                };
                if let Err(mpsc::error::TrySendError::Closed(())) = tx.try_send(()) {
                    tracing::debug!(target_id = id, "poll loop gone, unlinking from rotation");
                    ring.remove(id);
                }
            }
        })
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new()
    }
}
