//! Synthesis Command Handlers

use std::sync::Arc;

use crate::application::commands::SynthesisOutcome;
use crate::application::endpoints;
use crate::application::error::ApplicationError;
use crate::application::ports::{HttpRequest, HttpTransportPort};
use crate::domain::synthesis::{OutputType, SynthesisRequest};

/// TtsSessionClient - 把合成请求发往 `/process`
///
/// 无本地缓存，每次调用最多发送一次 POST
#[derive(Clone)]
pub struct TtsSessionClient {
    transport: Arc<dyn HttpTransportPort>,
}

impl TtsSessionClient {
    pub fn new(transport: Arc<dyn HttpTransportPort>) -> Self {
        Self { transport }
    }

    pub async fn synthesize(&self, request: SynthesisRequest) -> Result<SynthesisOutcome, ApplicationError> {
        if !request.is_speakable() {
            tracing::debug!("Skipping synthesis of blank input");
            return Ok(SynthesisOutcome::Skipped);
        }

        let params = request.to_form_params();

        tracing::debug!(
            input_type = %request.input_type(),
            output_type = %request.output_type(),
            locale = %request.locale(),
            voice = %request.voice(),
            text_len = request.input_text().len(),
            "Sending synthesis request"
        );

        let response = self
            .transport
            .send(HttpRequest::post(endpoints::PROCESS, params))
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Synthesis request failed");
                ApplicationError::from(e)
            })?;

        let outcome = if *request.output_type() == OutputType::Audio {
            let mime_type = request.audio_format().mime_type();
            tracing::info!(
                audio_size = response.body.len(),
                mime_type = %mime_type,
                "Synthesis completed"
            );
            SynthesisOutcome::Audio {
                data: response.body,
                mime_type,
            }
        } else {
            let text = response.text();
            tracing::info!(
                output_type = %request.output_type(),
                text_len = text.len(),
                "Synthesis completed"
            );
            SynthesisOutcome::Text(text)
        };

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{HttpMethod, HttpResponse, TransportError};
    use crate::domain::synthesis::{AudioFormat, EffectSelection};
    use crate::infrastructure::adapters::FakeTransport;

    fn client(transport: &Arc<FakeTransport>) -> TtsSessionClient {
        TtsSessionClient::new(transport.clone())
    }

    #[tokio::test]
    async fn test_audio_outcome_carries_mime_type() {
        let transport = Arc::new(FakeTransport::new());
        transport.respond_with(
            endpoints::PROCESS,
            HttpResponse::ok(b"RIFF....WAVEfmt ".to_vec()),
        );

        let request = SynthesisRequest::new("Hello world").with_voice("cmu-slt-hsmm");
        let outcome = client(&transport).synthesize(request).await.unwrap();

        assert_eq!(
            outcome,
            SynthesisOutcome::Audio {
                data: b"RIFF....WAVEfmt ".to_vec(),
                mime_type: "audio/wav".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_text_outcome_is_single_post_returned_verbatim() {
        let transport = Arc::new(FakeTransport::new());
        transport.respond(endpoints::PROCESS, "<maryxml>\n  <p>Hello</p>\n</maryxml>\n");

        let request = SynthesisRequest::new("Hello")
            .with_output_type(OutputType::Other("RAWMARYXML".to_string()))
            .with_audio_format(AudioFormat::new("AU_FILE"))
            .with_effect(EffectSelection::selected("Robot", "amount:100.0;"));
        let outcome = client(&transport).synthesize(request).await.unwrap();

        assert_eq!(
            outcome,
            SynthesisOutcome::Text("<maryxml>\n  <p>Hello</p>\n</maryxml>\n".to_string())
        );

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].endpoint, endpoints::PROCESS);
        assert_eq!(requests[0].params.get("OUTPUT_TYPE"), Some("RAWMARYXML"));
        assert_eq!(requests[0].params.get("effect_Robot_selected"), Some("on"));
    }

    #[tokio::test]
    async fn test_blank_input_is_skipped_without_request() {
        let transport = Arc::new(FakeTransport::new());

        let outcome = client(&transport)
            .synthesize(SynthesisRequest::new("   \n"))
            .await
            .unwrap();

        assert!(outcome.is_skipped());
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_transport_errors_are_not_retried() {
        let transport = Arc::new(FakeTransport::new());
        transport
            .fail(endpoints::PROCESS, TransportError::Connect("connection refused".to_string()))
            .respond(endpoints::PROCESS, "never used");

        let err = client(&transport)
            .synthesize(SynthesisRequest::new("Hello"))
            .await
            .unwrap_err();

        assert_eq!(err, ApplicationError::Transport("connection refused".to_string()));
        assert_eq!(transport.requests().len(), 1);
    }
}
