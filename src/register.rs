//! Provider registration.

use std::sync::Arc;

use tracing::{info, warn};

use autofill_config::Config;
use autofill_core::ProviderRegistry;
use autofill_protocols::{BackendKind, ToolCallProvider};
use autofill_provider_anthropic::AnthropicProvider;
use autofill_provider_gemini::GeminiProvider;
use autofill_provider_openai::OpenAIProvider;

/// Register every backend adapter, sharing one HTTP client.
pub(crate) fn register_providers(
    registry: &ProviderRegistry,
    config: &Config,
) -> anyhow::Result<()> {
    let http = reqwest::Client::builder()
        .connect_timeout(config.http.connect_timeout())
        .timeout(config.http.timeout())
        .build()?;

    for kind in BackendKind::ALL {
        let base_url = config.providers.get(kind).base_url.clone();
        let provider: Arc<dyn ToolCallProvider> = match kind {
            BackendKind::Gemini => Arc::new(match base_url {
                Some(url) => GeminiProvider::with_base_url(http.clone(), url),
                None => GeminiProvider::new(http.clone()),
            }),
            BackendKind::OpenAi => {
                let provider = OpenAIProvider::new(http.clone());
                Arc::new(match base_url {
                    Some(url) => provider.with_base_url(url),
                    None => provider,
                })
            }
            BackendKind::Anthropic => {
                let provider = AnthropicProvider::new(http.clone());
                Arc::new(match base_url {
                    Some(url) => provider.with_base_url(url),
                    None => provider,
                })
            }
        };
        if let Err(e) = registry.register(provider) {
            warn!("Failed to register {} provider: {}", kind, e);
        }
    }

    info!("Registered providers: {:?}", registry.kinds());
    Ok(())
}
