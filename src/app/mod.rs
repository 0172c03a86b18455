// Application wiring: turns a validated configuration into a ready submitter.

use crate::adapters::{AnchorSaver, ConsoleNotifier, LocalStorage, ObjectUrlStore};
use crate::core::dispatcher::DownloadDispatcher;
use crate::core::submit::DocumentSubmitter;
use crate::core::ConfigProvider;

pub type CliSubmitter = DocumentSubmitter<AnchorSaver<LocalStorage>, ConsoleNotifier>;

/// Resolves the API base once and builds the save/alert stack around it.
pub fn build_submitter<C: ConfigProvider>(config: &C) -> CliSubmitter {
    let api = config.endpoints().resolve(config.host());
    tracing::info!("🌐 Using document API at {}", api.base_url());

    let storage = LocalStorage::new(config.output_dir().to_string());
    let saver = AnchorSaver::new(storage, ObjectUrlStore::default(), config.release_delay());
    let dispatcher = DownloadDispatcher::new(api, saver, ConsoleNotifier);

    DocumentSubmitter::new(dispatcher, config.payload_style())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::toml_config::TomlConfig;
    use crate::domain::model::{DocumentKind, FormData, PayloadStyle};
    use reqwest::Method;

    #[test]
    fn test_build_submitter_from_config() {
        let mut config = TomlConfig::default();
        config.api.host = "docs.helptech.example".to_string();
        config.request.style = PayloadStyle::Query;

        let submitter = build_submitter(&config);

        assert_eq!(
            submitter.dispatcher().api().base_url(),
            "https://seu-dominio-api.vercel.app"
        );
        let prepared = submitter.prepare(DocumentKind::Orcamento, &FormData::new());
        assert_eq!(prepared.method(), &Method::GET);
        assert_eq!(
            prepared.target.resolve(submitter.dispatcher().api()),
            "https://seu-dominio-api.vercel.app/gerar-pdf"
        );
    }
}
