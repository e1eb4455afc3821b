//! Subcommand implementations.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, anyhow};
use tokio::sync::mpsc;
use tracing::{info, warn};

use autofill_config::Config;
use autofill_core::{
    ChannelTransport, Orchestrator, PromptBuilder, ProviderRegistry, STATUS_COMPLETE, StatusSink,
    describe_page,
};
use autofill_page::{Document, ExtractorConfig, PageConfig, PageContext};
use autofill_protocols::{
    AutofillRequest, BackendKind, Credentials, Envelope, FormField, Message, TabId,
};

use crate::register::register_providers;

/// The single tab a CLI run operates on.
const TAB: TabId = TabId(1);

const PAGE_INBOX_CAPACITY: usize = 16;

pub(crate) struct FillArgs {
    pub page: PathBuf,
    pub profile: Option<PathBuf>,
    pub provider: Option<BackendKind>,
    pub model: Option<String>,
    pub api_key: Option<String>,
}

pub(crate) fn extract(config: &Config, page: &Path, json: bool) -> anyhow::Result<()> {
    let context = load_page(config, page)?;
    let items = context.extract();
    info!("Extracted {} items from {}", items.len(), page.display());
    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
    } else {
        print!("{}", describe_page(&items));
    }
    Ok(())
}

pub(crate) fn prompt(config: &Config, page: &Path, profile: Option<&Path>) -> anyhow::Result<()> {
    let context = load_page(config, page)?;
    let profile = match resolve_profile(config, profile) {
        Ok(profile) => profile,
        Err(e) => {
            warn!("{}, rendering with an empty profile", e);
            String::new()
        }
    };
    println!("{}", PromptBuilder::new().build(&context.extract(), &profile));
    Ok(())
}

pub(crate) async fn fill(config: &Config, args: FillArgs) -> anyhow::Result<()> {
    let page = load_page(config, &args.page)?;
    let profile = resolve_profile(config, args.profile.as_deref())?;
    let backend = args.provider.unwrap_or(config.provider);
    let settings = config.providers.get(backend);
    let api_key = args
        .api_key
        .or_else(|| settings.api_key.clone())
        .unwrap_or_default();
    let model = args
        .model
        .or_else(|| settings.model.clone())
        .unwrap_or_default();

    let registry = Arc::new(ProviderRegistry::new());
    register_providers(&registry, config)?;
    let transport = Arc::new(ChannelTransport::new());
    let (status, mut updates) = StatusSink::channel();
    let orchestrator = Arc::new(Orchestrator::new(registry, transport.clone(), status));

    let (to_orchestrator, inbox) = mpsc::unbounded_channel();
    let runner = tokio::spawn(orchestrator.clone().run(inbox));
    let page_inbox = transport.connect(TAB, PAGE_INBOX_CAPACITY);
    let page_task = tokio::spawn(page.serve(page_inbox, to_orchestrator.clone()));

    let request = AutofillRequest {
        tab_id: Some(TAB),
        profile,
        credentials: Credentials::new(api_key),
        model,
        backend,
    };
    to_orchestrator
        .send(Envelope::external(Message::AutofillRequest(request)))
        .map_err(|_| anyhow!("Orchestrator stopped before the request was sent"))?;

    while let Some(update) = updates.recv().await {
        eprintln!("{}", update.text);
        if update.terminal {
            if update.text != STATUS_COMPLETE {
                warn!("Autofill ended without filling: {}", update.text);
            }
            break;
        }
    }

    transport.disconnect(TAB);
    orchestrator.tab_removed(TAB);
    let page = page_task.await?;
    drop(to_orchestrator);
    runner.await?;

    if let Some(report) = page.last_report() {
        info!(
            "Applied {} of {} actions",
            report.applied(),
            report.results.len()
        );
        for result in report.results.iter().filter(|r| !r.outcome.is_applied()) {
            warn!("{} {}: {}", result.call.tool, result.call.locator, result.outcome);
        }
    }

    let fields: Vec<FormField> = page
        .extract()
        .iter()
        .filter_map(|item| item.as_form_field().cloned())
        .collect();
    println!("{}", serde_json::to_string_pretty(&fields)?);
    Ok(())
}

fn load_page(config: &Config, path: &Path) -> anyhow::Result<PageContext> {
    let html = fs::read_to_string(path)
        .with_context(|| format!("Failed to read page {}", path.display()))?;
    Ok(PageContext::new(
        TAB,
        Document::parse_html(&html),
        page_config(config),
    ))
}

fn page_config(config: &Config) -> PageConfig {
    PageConfig {
        extractor: ExtractorConfig {
            min_text_len: config.extractor.min_text_len,
            max_text_len: config.extractor.max_text_len,
        },
        highlight: config.executor.highlight_duration(),
    }
}

/// Profile text from `--profile`, else the selected configured profile.
fn resolve_profile(config: &Config, path: Option<&Path>) -> anyhow::Result<String> {
    if let Some(path) = path {
        return fs::read_to_string(path)
            .with_context(|| format!("Failed to read profile {}", path.display()));
    }
    match config.profiles.selected_profile() {
        Some((name, text)) => {
            info!("Using profile '{}'", name);
            Ok(text.to_string())
        }
        None => Err(anyhow!(
            "No profile given: pass --profile or define [profiles.entries]"
        )),
    }
}
