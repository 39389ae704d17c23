use tokio::sync::mpsc;

use crate::events::SessionEvent;

/// Sender for the runtime's event inbox.
pub type SessionEventSender = mpsc::UnboundedSender<SessionEvent>;

/// Receiver for the runtime's event inbox.
pub type SessionEventReceiver = mpsc::UnboundedReceiver<SessionEvent>;
