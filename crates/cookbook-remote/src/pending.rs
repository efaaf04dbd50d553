use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use cookbook_core::RecipeId;

enum Command {
    Claim {
        id: RecipeId,
        ticket: u64,
        reply: oneshot::Sender<bool>,
    },
    Release {
        id: RecipeId,
        ticket: u64,
    },
    #[cfg(test)]
    Snapshot {
        reply: oneshot::Sender<Vec<RecipeId>>,
    },
}

/// Tracks recipes with a favorite toggle in flight.
///
/// The pending set is owned by a single task; handles talk to it over a
/// channel, so no lock is shared between toggles. At most one toggle per
/// recipe id can hold a guard at a time.
///
/// Every claim carries its own ticket and a release only frees the id when
/// the ticket matches, so a claim dropped while waiting for its reply still
/// gives the id back.
#[derive(Clone)]
pub struct PendingToggles {
    tx: mpsc::UnboundedSender<Command>,
    next_ticket: Arc<AtomicU64>,
}

impl PendingToggles {
    /// Spawn the owning task on the current tokio runtime.
    pub fn spawn() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        tokio::spawn(run(rx));
        Self {
            tx,
            next_ticket: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Claim `id` for a toggle. Returns `None` if a toggle for the same id
    /// is already in flight.
    pub async fn claim(&self, id: &RecipeId) -> Option<ToggleGuard> {
        let ticket = self.next_ticket.fetch_add(1, Ordering::Relaxed);
        let (reply, rx) = oneshot::channel();
        if self
            .tx
            .send(Command::Claim {
                id: id.clone(),
                ticket,
                reply,
            })
            .is_err()
        {
            tracing::error!("Pending toggle tracker has stopped");
            return None;
        }

        // Armed from here on: dropping this future releases the claim.
        let guard = ToggleGuard {
            id: id.clone(),
            ticket,
            tx: self.tx.clone(),
        };

        match rx.await {
            Ok(true) => Some(guard),
            Ok(false) => None,
            Err(_) => {
                tracing::error!("Pending toggle tracker dropped a claim for {}", id);
                None
            }
        }
    }

    /// Ids that currently hold a claim, in no particular order.
    #[cfg(test)]
    async fn pending(&self) -> Vec<RecipeId> {
        let (reply, rx) = oneshot::channel();
        if self.tx.send(Command::Snapshot { reply }).is_err() {
            return Vec::new();
        }
        rx.await.unwrap_or_default()
    }
}

async fn run(mut rx: mpsc::UnboundedReceiver<Command>) {
    let mut pending: HashMap<RecipeId, u64> = HashMap::new();

    while let Some(command) = rx.recv().await {
        match command {
            Command::Claim { id, ticket, reply } => {
                let granted = !pending.contains_key(&id);
                if granted {
                    pending.insert(id, ticket);
                }
                let _ = reply.send(granted);
            }
            Command::Release { id, ticket } => {
                if pending.get(&id) == Some(&ticket) {
                    pending.remove(&id);
                }
            }
            #[cfg(test)]
            Command::Snapshot { reply } => {
                let _ = reply.send(pending.keys().cloned().collect());
            }
        }
    }
}

/// Held while a toggle for one recipe is in flight. Releases on drop.
pub struct ToggleGuard {
    id: RecipeId,
    ticket: u64,
    tx: mpsc::UnboundedSender<Command>,
}

impl ToggleGuard {
    pub fn id(&self) -> &RecipeId {
        &self.id
    }
}

impl Drop for ToggleGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(Command::Release {
            id: self.id.clone(),
            ticket: self.ticket,
        });
    }
}
