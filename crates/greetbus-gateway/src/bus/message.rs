use std::sync::Arc;

use tokio::sync::oneshot;

use greetbus_core::error::{GreetBusError, Result};

use crate::obs::metrics::{failure, GreetBusMetrics};

/// A bodiless request plus its return address.
///
/// `reply` takes `self`, so a message resolves its requester at most once.
/// Dropping the message without replying resolves the requester with
/// `ReplyDropped`.
pub struct BusMessage {
    address: Arc<str>,
    reply_tx: oneshot::Sender<String>,
    metrics: Arc<GreetBusMetrics>,
}

impl BusMessage {
    pub(crate) fn new(
        address: Arc<str>,
        reply_tx: oneshot::Sender<String>,
        metrics: Arc<GreetBusMetrics>,
    ) -> Self {
        Self { address, reply_tx, metrics }
    }

    /// Send the reply. Fails with `Abandoned` only when the requester has
    /// already gone away.
    pub fn reply(self, body: impl Into<String>) -> Result<()> {
        match self.reply_tx.send(body.into()) {
            Ok(()) => {
                self.metrics
                    .bus_replies
                    .with_label_values(&[&*self.address])
                    .inc();
                Ok(())
            }
            Err(_) => {
                self.metrics
                    .bus_reply_failures
                    .with_label_values(&[&*self.address, failure::ABANDONED])
                    .inc();
                tracing::debug!(address = %self.address, "requester gone before reply");
                Err(GreetBusError::Abandoned(self.address.to_string()))
            }
        }
    }
}
