//! Page context message loop.

use std::time::{Duration, Instant};

use autofill_protocols::{BatchReport, Envelope, Message, PageContextItem, TabId, ToolCall};
use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

use crate::dom::Document;
use crate::executor::ActionExecutor;
use crate::extractor::{Extractor, ExtractorConfig};

/// How often expired highlights are swept while serving.
const SWEEP_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct PageConfig {
    pub extractor: ExtractorConfig,
    pub highlight: Duration,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            extractor: ExtractorConfig::default(),
            highlight: Duration::from_millis(1500),
        }
    }
}

/// One tab's document plus the extraction and replay machinery acting on it.
pub struct PageContext {
    tab: TabId,
    document: Document,
    extractor: Extractor,
    executor: ActionExecutor,
    last_report: Option<BatchReport>,
}

impl PageContext {
    pub fn new(tab: TabId, document: Document, config: PageConfig) -> Self {
        Self {
            tab,
            document,
            extractor: Extractor::new(config.extractor),
            executor: ActionExecutor::new(config.highlight),
            last_report: None,
        }
    }

    pub fn tab(&self) -> TabId {
        self.tab
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Report of the most recent `EXECUTE_ACTIONS` batch.
    pub fn last_report(&self) -> Option<&BatchReport> {
        self.last_report.as_ref()
    }

    pub fn extract(&self) -> Vec<PageContextItem> {
        self.extractor.extract(&self.document)
    }

    pub fn execute(&mut self, calls: Vec<ToolCall>) -> &BatchReport {
        let report = self.executor.apply(&mut self.document, calls);
        self.last_report.insert(report)
    }

    /// Handle one message from the orchestrator, returning the reply to send
    /// back. `EXECUTE_ACTIONS` always yields exactly one `FILL_COMPLETE`.
    pub fn handle(&mut self, message: Message) -> Option<Message> {
        match message {
            Message::ExtractFormData => {
                let items = self.extract();
                info!("Tab {}: extracted {} page context items", self.tab, items.len());
                Some(Message::FormDataExtracted(items))
            }
            Message::ExecuteActions(calls) => {
                info!("Tab {}: executing {} actions", self.tab, calls.len());
                self.execute(calls);
                Some(Message::FillComplete)
            }
            other => {
                warn!("Tab {}: ignoring {} message", self.tab, other.kind());
                None
            }
        }
    }

    /// Serve messages until the inbox closes or the orchestrator goes away,
    /// then hand the context back.
    pub async fn serve(
        mut self,
        mut inbox: mpsc::Receiver<Message>,
        outbox: mpsc::UnboundedSender<Envelope>,
    ) -> Self {
        let mut sweep = tokio::time::interval(SWEEP_INTERVAL);
        sweep.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            tokio::select! {
                message = inbox.recv() => {
                    let Some(message) = message else {
                        debug!("Tab {}: inbox closed", self.tab);
                        break;
                    };
                    let Some(reply) = self.handle(message) else {
                        continue;
                    };
                    if outbox.send(Envelope::from_tab(self.tab, reply)).is_err() {
                        warn!("Tab {}: orchestrator is gone, stopping", self.tab);
                        break;
                    }
                }
                _ = sweep.tick() => {
                    self.executor.sweep_highlights(&mut self.document, Instant::now());
                }
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<body><label for="name">Full name</label><input id="name"></body>"#;

    fn context() -> PageContext {
        PageContext::new(TabId(1), Document::parse_html(PAGE), PageConfig::default())
    }

    #[test]
    fn test_handle_extract() {
        let mut page = context();
        let Some(Message::FormDataExtracted(items)) = page.handle(Message::ExtractFormData) else {
            panic!("expected FORM_DATA_EXTRACTED");
        };
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_handle_execute_always_completes() {
        let mut page = context();
        let reply = page.handle(Message::ExecuteActions(vec![
            ToolCall::fill_text("//*[@id='missing']", "x", None),
        ]));
        assert_eq!(reply, Some(Message::FillComplete));
        assert_eq!(page.last_report().unwrap().failed(), 1);

        let reply = page.handle(Message::ExecuteActions(Vec::new()));
        assert_eq!(reply, Some(Message::FillComplete));
    }

    #[test]
    fn test_handle_ignores_orchestrator_messages() {
        let mut page = context();
        assert_eq!(page.handle(Message::UpdateStatus("hi".into())), None);
        assert_eq!(page.handle(Message::FillComplete), None);
    }

    #[tokio::test]
    async fn test_serve_replies_with_sender_tab() {
        let (to_page, inbox) = mpsc::channel(8);
        let (outbox, mut from_page) = mpsc::unbounded_channel();
        let handle = tokio::spawn(context().serve(inbox, outbox));

        to_page
            .send(Message::ExecuteActions(vec![ToolCall::fill_text(
                "//*[@id='name']",
                "Jane Doe",
                None,
            )]))
            .await
            .unwrap();
        let envelope = from_page.recv().await.unwrap();
        assert_eq!(envelope.sender_tab, Some(TabId(1)));
        assert_eq!(envelope.message, Message::FillComplete);

        drop(to_page);
        let page = handle.await.unwrap();
        let name = page.document().element_by_id("name").unwrap();
        assert_eq!(page.document().value(name).as_deref(), Some("Jane Doe"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_serve_sweeps_expired_highlights() {
        let (to_page, inbox) = mpsc::channel(8);
        let (outbox, mut from_page) = mpsc::unbounded_channel();
        let config = PageConfig {
            highlight: Duration::from_millis(0),
            ..Default::default()
        };
        let page = PageContext::new(TabId(2), Document::parse_html(PAGE), config);
        let handle = tokio::spawn(page.serve(inbox, outbox));

        to_page
            .send(Message::ExecuteActions(vec![ToolCall::fill_text(
                "//*[@id='name']",
                "Jane",
                None,
            )]))
            .await
            .unwrap();
        from_page.recv().await.unwrap();
        tokio::time::sleep(SWEEP_INTERVAL * 3).await;

        drop(to_page);
        let page = handle.await.unwrap();
        let name = page.document().element_by_id("name").unwrap();
        assert!(page.document().style_property(name, "outline").is_none());
    }
}
