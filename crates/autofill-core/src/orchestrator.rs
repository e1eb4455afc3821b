//! Session orchestration.
//!
//! Drives one tab through extraction, generation and execution. Every
//! path out of a session removes its entry; removals are conditional on the
//! session id so a superseded pipeline can never delete its replacement.

use std::sync::Arc;

use autofill_protocols::{
    Ack, AutofillError, AutofillRequest, Envelope, GenerationRequest, Message, PageContextItem,
    TabId,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use crate::prompt::PromptBuilder;
use crate::registry::ProviderRegistry;
use crate::session::{Session, SessionPhase, SessionStore};
use crate::status::StatusSink;
use crate::transport::PageTransport;

pub const STATUS_ANALYZING: &str = "Analyzing form...";
pub const STATUS_FILLING: &str = "Filling fields...";
pub const STATUS_COMPLETE: &str = "Autofill Complete! Please review.";

pub struct Orchestrator {
    sessions: SessionStore,
    registry: Arc<ProviderRegistry>,
    transport: Arc<dyn PageTransport>,
    status: StatusSink,
    prompt: PromptBuilder,
}

impl Orchestrator {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        transport: Arc<dyn PageTransport>,
        status: StatusSink,
    ) -> Self {
        Self {
            sessions: SessionStore::new(),
            registry,
            transport,
            status,
            prompt: PromptBuilder::new(),
        }
    }

    pub fn with_prompt_builder(mut self, prompt: PromptBuilder) -> Self {
        self.prompt = prompt;
        self
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Consume envelopes until the inbox closes. Each message is handled on
    /// its own task so tabs progress independently.
    pub async fn run(self: Arc<Self>, mut inbox: mpsc::UnboundedReceiver<Envelope>) {
        while let Some(envelope) = inbox.recv().await {
            let this = Arc::clone(&self);
            tokio::spawn(async move {
                let kind = envelope.message.kind();
                let ack = this.handle(envelope).await;
                debug!("Handled {}: {:?}", kind, ack);
            });
        }
        debug!("Orchestrator inbox closed");
    }

    /// Handle one message and return its acknowledgement.
    pub async fn handle(&self, envelope: Envelope) -> Ack {
        let Envelope {
            sender_tab,
            message,
        } = envelope;
        match message {
            Message::AutofillRequest(request) => {
                let tab = request.tab_id.or(sender_tab);
                self.start(tab, request).await
            }
            Message::FormDataExtracted(items) => self.form_data_extracted(sender_tab, items).await,
            Message::FillComplete => self.fill_complete(sender_tab),
            other => {
                warn!("Ignoring {} message sent to the orchestrator", other.kind());
                Ack::failed(format!("Unexpected message: {}", other.kind()))
            }
        }
    }

    /// Drop whatever session a closed tab had.
    pub fn tab_removed(&self, tab: TabId) {
        if let Some(session) = self.sessions.remove(tab) {
            info!("Tab {} closed, dropped session {}", tab, session.id);
        }
    }

    async fn start(&self, tab: Option<TabId>, request: AutofillRequest) -> Ack {
        let Some(tab) = tab else {
            return self.fail(None, None, AutofillError::no_tab());
        };

        let session = Session::new(tab, request);
        let id = session.id;
        info!(
            "Tab {}: starting session {} with {}",
            tab, id, session.backend
        );
        if let Some(previous) = self.sessions.put(session) {
            info!("Tab {}: session {} superseded by {}", tab, previous.id, id);
        }

        // The page may answer before delivery is acknowledged.
        self.status.progress(Some(tab), STATUS_ANALYZING);
        if let Err(e) = self.transport.send_to_tab(tab, Message::ExtractFormData).await {
            return self.fail(Some(tab), Some(id), e.into());
        }
        Ack::ok()
    }

    async fn form_data_extracted(&self, tab: Option<TabId>, items: Vec<PageContextItem>) -> Ack {
        let Some(tab) = tab else {
            return self.fail(None, None, AutofillError::no_session());
        };
        let Some(pending) = self.sessions.get(tab) else {
            return self.fail(Some(tab), None, AutofillError::no_session());
        };
        let Some(session) = self.sessions.advance(
            tab,
            pending.id,
            SessionPhase::AwaitingExtraction,
            SessionPhase::Generating,
        ) else {
            // A repeated extraction must not disturb the session in flight.
            warn!(
                "Tab {}: form data for session {} arrived in phase {:?}",
                tab, pending.id, pending.phase
            );
            return Ack::failed(AutofillError::no_session().to_string());
        };
        let id = session.id;
        let backend = session.backend;

        let Some(provider) = self.registry.get(backend) else {
            return self.fail(Some(tab), Some(id), AutofillError::no_provider());
        };
        if session.credentials.is_missing() {
            return self.fail(
                Some(tab),
                Some(id),
                AutofillError::MissingCredential { provider: backend },
            );
        }

        self.status
            .progress(Some(tab), format!("Sending data to {}...", backend));
        info!(
            "Tab {}: received {} page context items, querying {}",
            tab,
            items.len(),
            backend
        );

        let prompt = self.prompt.build(&items, &session.profile);
        let request = GenerationRequest::new(prompt, session.credentials.clone())
            .with_model(session.model.clone())
            .with_tools(self.prompt.tools().to_vec());
        let result = provider.generate(request).await;

        if !self.sessions.is_current(tab, id) {
            info!("Tab {}: session {} was superseded, discarding its result", tab, id);
            return Ack::ok_with("Session superseded");
        }

        let calls = match result {
            Ok(calls) => calls,
            Err(e) => {
                return self.fail(Some(tab), Some(id), AutofillError::from_provider(backend, e));
            }
        };

        if calls.is_empty() {
            self.sessions.remove_if(tab, id);
            let text = format!("No fields to fill or {} returned no actions.", backend);
            info!("Tab {}: {}", tab, text);
            self.status.terminal(Some(tab), text.clone());
            return Ack::ok_with(text);
        }

        if self
            .sessions
            .advance(tab, id, SessionPhase::Generating, SessionPhase::Executing)
            .is_none()
        {
            info!("Tab {}: session {} was superseded, discarding its result", tab, id);
            return Ack::ok_with("Session superseded");
        }

        info!("Tab {}: {} returned {} tool calls", tab, backend, calls.len());
        self.status.progress(Some(tab), STATUS_FILLING);
        if let Err(e) = self
            .transport
            .send_to_tab(tab, Message::ExecuteActions(calls))
            .await
        {
            return self.fail(Some(tab), Some(id), e.into());
        }
        Ack::ok_with(format!("Form data received, processing with {}...", backend))
    }

    fn fill_complete(&self, tab: Option<TabId>) -> Ack {
        let removed = tab.and_then(|t| self.sessions.remove_in_phase(t, SessionPhase::Executing));
        match removed {
            Some(session) => {
                info!("Tab {}: session {} complete", session.tab_id, session.id);
                self.status.terminal(tab, STATUS_COMPLETE);
                Ack::ok()
            }
            None => {
                warn!("Completion signal without an executing session (tab {:?})", tab);
                Ack::failed(AutofillError::no_session().to_string())
            }
        }
    }

    /// Terminate a session: clean up, announce, acknowledge.
    fn fail(&self, tab: Option<TabId>, session: Option<Uuid>, err: AutofillError) -> Ack {
        if let (Some(tab), Some(id)) = (tab, session) {
            self.sessions.remove_if(tab, id);
        }
        error!("Autofill failed (tab {:?}): {}", tab, err);
        self.status.terminal(tab, err.status_text());
        Ack::failed(err.to_string())
    }
}

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;
