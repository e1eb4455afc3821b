//! Delivery of messages to page contexts.

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::mpsc;

use autofill_protocols::{Message, TabId, TransportError};

/// Sends orchestrator messages to the page context of a tab.
#[async_trait]
pub trait PageTransport: Send + Sync {
    async fn send_to_tab(&self, tab: TabId, message: Message) -> Result<(), TransportError>;
}

/// In-process transport over tokio channels, one per connected tab.
#[derive(Debug, Default)]
pub struct ChannelTransport {
    tabs: DashMap<TabId, mpsc::Sender<Message>>,
}

impl ChannelTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connect a tab, returning the receiver its page context serves from.
    pub fn connect(&self, tab: TabId, capacity: usize) -> mpsc::Receiver<Message> {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        self.tabs.insert(tab, tx);
        rx
    }

    /// Forget a tab. Its page context sees its inbox close.
    pub fn disconnect(&self, tab: TabId) -> bool {
        self.tabs.remove(&tab).is_some()
    }

    pub fn is_connected(&self, tab: TabId) -> bool {
        self.tabs.contains_key(&tab)
    }
}

#[async_trait]
impl PageTransport for ChannelTransport {
    async fn send_to_tab(&self, tab: TabId, message: Message) -> Result<(), TransportError> {
        let sender = self
            .tabs
            .get(&tab)
            .map(|s| s.clone())
            .ok_or(TransportError::UnknownTab(tab))?;
        sender
            .send(message)
            .await
            .map_err(|_| TransportError::Closed(tab))
    }
}
