//! Catalog Query Handlers

use std::sync::Arc;

use crate::application::endpoints;
use crate::application::error::ApplicationError;
use crate::application::ports::{HttpRequest, HttpTransportPort};
use crate::application::queries::ExampleTextQuery;
use crate::domain::catalog::{
    parse_audio_formats, parse_data_types, parse_effects, parse_example_lines, parse_voices,
    AudioFormatCatalog, DataTypeCatalog, EffectRecord, ServerCatalog, VoiceCatalog,
};
use crate::domain::synthesis::FormParams;

/// CatalogFetcher - 拉取服务端信息端点并解析为目录
///
/// 各个拉取操作互不依赖，可以并发执行；不持有可变状态
#[derive(Clone)]
pub struct CatalogFetcher {
    transport: Arc<dyn HttpTransportPort>,
}

impl CatalogFetcher {
    pub fn new(transport: Arc<dyn HttpTransportPort>) -> Self {
        Self { transport }
    }

    async fn fetch_text(&self, request: HttpRequest) -> Result<String, ApplicationError> {
        let endpoint = request.endpoint.clone();
        tracing::debug!(endpoint = %endpoint, "Fetching catalog");

        let response = self.transport.send(request).await.map_err(|e| {
            tracing::warn!(endpoint = %endpoint, error = %e, "Catalog request failed");
            ApplicationError::from(e)
        })?;

        Ok(response.text())
    }

    // ========================================================================
    // Catalogs
    // ========================================================================

    pub async fn fetch_voices(&self) -> Result<VoiceCatalog, ApplicationError> {
        let text = self.fetch_text(HttpRequest::get(endpoints::VOICES)).await?;
        let catalog = parse_voices(&text);
        tracing::debug!(count = catalog.len(), "Voices fetched");
        Ok(catalog)
    }

    pub async fn fetch_data_types(&self) -> Result<DataTypeCatalog, ApplicationError> {
        let text = self.fetch_text(HttpRequest::get(endpoints::DATA_TYPES)).await?;
        let catalog = parse_data_types(&text);
        tracing::debug!(count = catalog.types.len(), "Data types fetched");
        Ok(catalog)
    }

    pub async fn fetch_audio_formats(&self) -> Result<AudioFormatCatalog, ApplicationError> {
        let text = self
            .fetch_text(HttpRequest::get(endpoints::AUDIO_FORMATS))
            .await?;
        let catalog = parse_audio_formats(&text);
        tracing::debug!(count = catalog.formats.len(), "Audio formats fetched");
        Ok(catalog)
    }

    pub async fn fetch_effects(&self) -> Result<Vec<EffectRecord>, ApplicationError> {
        let text = self
            .fetch_text(HttpRequest::get(endpoints::AUDIO_EFFECTS))
            .await?;
        let effects = parse_effects(&text);
        tracing::debug!(count = effects.len(), "Audio effects fetched");
        Ok(effects)
    }

    /// 并发拉取四个目录
    pub async fn fetch_all(&self) -> Result<ServerCatalog, ApplicationError> {
        let (voices, data_types, audio_formats, effects) = tokio::try_join!(
            self.fetch_voices(),
            self.fetch_data_types(),
            self.fetch_audio_formats(),
            self.fetch_effects(),
        )?;

        tracing::info!(
            voices = voices.len(),
            data_types = data_types.types.len(),
            audio_formats = audio_formats.formats.len(),
            effects = effects.len(),
            "Server catalog fetched"
        );

        Ok(ServerCatalog {
            voices,
            data_types,
            audio_formats,
            effects,
        })
    }

    // ========================================================================
    // Plain text endpoints
    // ========================================================================

    pub async fn fetch_example_text(&self, query: ExampleTextQuery) -> Result<String, ApplicationError> {
        let request = HttpRequest::get(endpoints::EXAMPLE_TEXT).with_params(query.to_form_params());
        self.fetch_text(request).await
    }

    /// 音色示例文本的候选列表
    pub async fn fetch_voice_examples(&self, voice: &str) -> Result<Vec<String>, ApplicationError> {
        let text = self
            .fetch_example_text(ExampleTextQuery::for_voice(voice))
            .await?;
        Ok(parse_example_lines(&text))
    }

    pub async fn fetch_effect_default_parameters(&self, effect: &str) -> Result<String, ApplicationError> {
        let request = HttpRequest::get(endpoints::AUDIO_EFFECT_DEFAULT_PARAM)
            .with_params(FormParams::new().with("effect", effect));
        self.fetch_text(request).await
    }

    pub async fn fetch_effect_help(&self, effect: &str) -> Result<String, ApplicationError> {
        let request = HttpRequest::get(endpoints::AUDIO_EFFECT_HELP)
            .with_params(FormParams::new().with("effect", effect));
        self.fetch_text(request).await
    }

    /// 服务端版本信息，每行一条
    pub async fn fetch_version(&self) -> Result<Vec<String>, ApplicationError> {
        let text = self.fetch_text(HttpRequest::get(endpoints::VERSION)).await?;
        Ok(parse_example_lines(&text))
    }
}
