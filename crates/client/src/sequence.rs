//! Latest-request-wins sequencing for keystroke-driven endpoints.
//!
//! Every edit of the run form or the certification list textarea fires a
//! new request while older ones may still be in flight. A [`RequestGate`]
//! hands out numbered tickets, cancels the previous ticket whenever a new
//! one is issued, and can tell afterwards whether a ticket is still the
//! newest. Replies for superseded tickets are dropped instead of rendered.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use tokio_util::sync::CancellationToken;

/// Handle for one in-flight request.
#[derive(Debug, Clone)]
pub struct Ticket {
    serial: u64,
    cancel: CancellationToken,
}

impl Ticket {
    /// Serial number of this ticket, increasing per gate.
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Token cancelled as soon as a newer ticket is issued.
    pub fn token(&self) -> &CancellationToken {
        &self.cancel
    }
}

/// Issues tickets and tracks which one is newest.
#[derive(Debug, Default)]
pub struct RequestGate {
    serial: AtomicU64,
    active: Mutex<CancellationToken>,
}

impl RequestGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue the next ticket, cancelling the previous one.
    pub fn begin(&self) -> Ticket {
        let serial = self.serial.fetch_add(1, Ordering::SeqCst) + 1;
        let cancel = CancellationToken::new();
        let previous = {
            let mut active = self.active.lock().expect("request gate lock poisoned");
            std::mem::replace(&mut *active, cancel.clone())
        };
        previous.cancel();
        Ticket { serial, cancel }
    }

    /// Whether this ticket is still the newest one issued.
    pub fn admits(&self, ticket: &Ticket) -> bool {
        self.serial.load(Ordering::SeqCst) == ticket.serial
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
