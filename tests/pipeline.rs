//! End-to-end pipeline: orchestrator, in-process transport and a page
//! context, with a scripted provider standing in for the backend.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::{Notify, mpsc};

use autofill_core::{
    ChannelTransport, Orchestrator, ProviderRegistry, STATUS_COMPLETE, StatusSink, StatusUpdate,
};
use autofill_page::{Document, EventKind, PageConfig, PageContext};
use autofill_protocols::{
    AutofillRequest, BackendKind, Credentials, Envelope, ExecutionOutcome, GenerationRequest,
    Message, NativeArguments, ProviderError, TabId, ToolCall, ToolCallProvider,
};

const SIGNUP: &str = r#"<!DOCTYPE html>
<html><body>
  <h1>Create your account in two minutes</h1>
  <form id="signup">
    <div><label for="name">Full name</label><input id="name" type="text"></div>
    <div><label for="email">Email</label><input id="email" type="email" placeholder="you@example.com"></div>
    <div><select id="country">
      <option value="">Choose a country</option>
      <option value="PT">Portugal</option>
      <option value="US">United States</option>
    </select></div>
    <div><label><input id="tos" type="checkbox"> I accept the terms</label></div>
  </form>
</body></html>"#;

struct ScriptedProvider {
    calls: Vec<ToolCall>,
    prompts: Mutex<Vec<String>>,
    /// Signalled on entry, then waited on before answering.
    gate: Option<(Arc<Notify>, Arc<Notify>)>,
}

#[async_trait]
impl ToolCallProvider for ScriptedProvider {
    fn kind(&self) -> BackendKind {
        BackendKind::Gemini
    }

    fn default_model(&self) -> &str {
        "scripted"
    }

    async fn generate(&self, request: GenerationRequest) -> Result<Vec<ToolCall>, ProviderError> {
        self.prompts.lock().push(request.prompt);
        if let Some((entered, release)) = &self.gate {
            entered.notify_one();
            release.notified().await;
        }
        Ok(self.calls.clone())
    }
}

struct Run {
    page: PageContext,
    statuses: Vec<StatusUpdate>,
    prompts: Vec<String>,
}

async fn run_pipeline(html: &str, calls: Vec<ToolCall>) -> Run {
    let tab = TabId(42);
    let provider = Arc::new(ScriptedProvider {
        calls,
        prompts: Mutex::new(Vec::new()),
        gate: None,
    });
    let registry = Arc::new(ProviderRegistry::new());
    registry.register(provider.clone()).unwrap();

    let transport = Arc::new(ChannelTransport::new());
    let (sink, mut updates) = StatusSink::channel();
    let orchestrator = Arc::new(Orchestrator::new(registry, transport.clone(), sink));

    let (to_orchestrator, inbox) = mpsc::unbounded_channel();
    let runner = tokio::spawn(orchestrator.clone().run(inbox));
    let page = PageContext::new(tab, Document::parse_html(html), PageConfig::default());
    let page_task = tokio::spawn(page.serve(transport.connect(tab, 8), to_orchestrator.clone()));

    to_orchestrator
        .send(Envelope::external(Message::AutofillRequest(AutofillRequest {
            tab_id: Some(tab),
            profile: "Name: Jane Doe\nEmail: jane@example.com\nCountry: Portugal".into(),
            credentials: Credentials::new("test-key"),
            model: String::new(),
            backend: BackendKind::Gemini,
        })))
        .unwrap();

    let mut statuses = Vec::new();
    while let Some(update) = updates.recv().await {
        let terminal = update.terminal;
        statuses.push(update);
        if terminal {
            break;
        }
    }

    transport.disconnect(tab);
    let page = page_task.await.unwrap();
    drop(to_orchestrator);
    runner.await.unwrap();
    assert!(orchestrator.sessions().is_empty());

    let prompts = provider.prompts.lock().clone();
    Run {
        page,
        statuses,
        prompts,
    }
}

#[tokio::test]
async fn test_fill_signup_form() {
    let calls = vec![
        ToolCall::fill_text("//*[@id='name']", "Jane Doe", Some("text".into())),
        ToolCall::fill_text("//*[@id='email']", "jane@example.com", Some("email".into())),
        ToolCall::select_option("//*[@id='country']", "PT"),
        ToolCall::set_checked("//*[@id='tos']", true),
    ];
    let run = run_pipeline(SIGNUP, calls).await;

    let texts: Vec<&str> = run.statuses.iter().map(|s| s.text.as_str()).collect();
    assert_eq!(
        texts,
        vec![
            "Analyzing form...",
            "Sending data to gemini...",
            "Filling fields...",
            STATUS_COMPLETE,
        ]
    );

    let doc = run.page.document();
    let name = doc.element_by_id("name").unwrap();
    let email = doc.element_by_id("email").unwrap();
    let country = doc.element_by_id("country").unwrap();
    let tos = doc.element_by_id("tos").unwrap();
    assert_eq!(doc.value(name).as_deref(), Some("Jane Doe"));
    assert_eq!(doc.value(email).as_deref(), Some("jane@example.com"));
    assert_eq!(doc.value(country).as_deref(), Some("PT"));
    assert_eq!(doc.checked(tos), Some(true));
    assert_eq!(doc.events_for(name), vec![EventKind::Input, EventKind::Change]);
    assert_eq!(doc.events_for(tos), vec![EventKind::Click, EventKind::Change]);

    let report = run.page.last_report().unwrap();
    assert_eq!(report.applied(), 4);
}

#[tokio::test]
async fn test_prompt_describes_page() {
    let run = run_pipeline(SIGNUP, vec![ToolCall::set_checked("//*[@id='tos']", true)]).await;
    assert_eq!(run.prompts.len(), 1);
    let prompt = &run.prompts[0];
    assert!(prompt.contains("Create your account in two minutes"));
    assert!(prompt.contains("ID: \"email\""));
    assert!(prompt.contains("Placeholder: \"you@example.com\""));
    assert!(prompt.contains("\"Portugal\" (PT)"));
    assert!(prompt.contains("Name: Jane Doe"));
    assert!(prompt.contains("check_radio_or_checkbox"));
}

#[tokio::test]
async fn test_bad_actions_do_not_stop_the_batch() {
    let calls = vec![
        ToolCall::fill_text("//*[@id='nowhere']", "x", None),
        ToolCall::from_native(
            "fill_text_input",
            NativeArguments::Encoded("{\"selector\": ".into()),
        ),
        ToolCall::from_native(
            "submit_form",
            NativeArguments::Structured(serde_json::json!({"selector": "//*[@id='signup']"})),
        ),
        ToolCall::fill_text("//*[@id='tos']", "yes", None),
        ToolCall::fill_text("//*[@id='name']", "Jane Doe", None),
    ];
    let run = run_pipeline(SIGNUP, calls).await;
    assert_eq!(run.statuses.last().unwrap().text, STATUS_COMPLETE);

    let report = run.page.last_report().unwrap();
    assert_eq!(report.results.len(), 5);
    assert_eq!(report.outcomes()[0], &ExecutionOutcome::LocatorNotFound);
    assert!(matches!(report.outcomes()[1], ExecutionOutcome::HandlerThrew(_)));
    assert_eq!(report.outcomes()[2], &ExecutionOutcome::UnknownTool);
    assert!(matches!(report.outcomes()[3], ExecutionOutcome::HandlerThrew(_)));
    assert_eq!(report.outcomes()[4], &ExecutionOutcome::Applied);

    let doc = run.page.document();
    let name = doc.element_by_id("name").unwrap();
    assert_eq!(doc.value(name).as_deref(), Some("Jane Doe"));
}

#[tokio::test]
async fn test_no_actions() {
    let run = run_pipeline(SIGNUP, Vec::new()).await;
    let last = run.statuses.last().unwrap();
    assert!(last.terminal);
    assert_eq!(last.text, "No fields to fill or gemini returned no actions.");
    assert!(run.page.last_report().is_none());
}

#[tokio::test]
async fn test_tab_closed_during_generation() {
    let tab = TabId(9);
    let entered = Arc::new(Notify::new());
    let release = Arc::new(Notify::new());
    let provider = Arc::new(ScriptedProvider {
        calls: vec![ToolCall::fill_text("//*[@id='name']", "Jane Doe", None)],
        prompts: Mutex::new(Vec::new()),
        gate: Some((entered.clone(), release.clone())),
    });
    let registry = Arc::new(ProviderRegistry::new());
    registry.register(provider).unwrap();
    let transport = Arc::new(ChannelTransport::new());
    let (sink, mut updates) = StatusSink::channel();
    let orchestrator = Arc::new(Orchestrator::new(registry, transport.clone(), sink));

    let (to_orchestrator, inbox) = mpsc::unbounded_channel();
    let runner = tokio::spawn(orchestrator.clone().run(inbox));
    let page = PageContext::new(tab, Document::parse_html(SIGNUP), PageConfig::default());
    let page_task = tokio::spawn(page.serve(transport.connect(tab, 8), to_orchestrator.clone()));

    to_orchestrator
        .send(Envelope::external(Message::AutofillRequest(AutofillRequest {
            tab_id: Some(tab),
            profile: "Name: Jane Doe".into(),
            credentials: Credentials::new("test-key"),
            model: String::new(),
            backend: BackendKind::Gemini,
        })))
        .unwrap();

    entered.notified().await;
    assert_eq!(orchestrator.sessions().len(), 1);
    transport.disconnect(tab);
    orchestrator.tab_removed(tab);
    assert!(orchestrator.sessions().is_empty());

    let page = page_task.await.unwrap();
    release.notify_one();
    drop(to_orchestrator);
    runner.await.unwrap();

    let mut texts = Vec::new();
    while let Ok(update) = updates.try_recv() {
        assert!(!update.terminal);
        texts.push(update.text);
    }
    assert_eq!(texts, vec!["Analyzing form...", "Sending data to gemini..."]);

    let doc = page.document();
    let name = doc.element_by_id("name").unwrap();
    assert_eq!(doc.value(name).as_deref(), Some(""));
    assert!(page.last_report().is_none());
}
