use marytts_client::application::{
    ApplicationError, CatalogFetcher, PerceptionState, PerceptionTestController, SynthesisOutcome,
    TtsSessionClient,
};
use marytts_client::domain::perception::Ratings;
use marytts_client::domain::synthesis::{OutputType, SynthesisRequest};
use marytts_client::infrastructure::{HttpTransportClient, HttpTransportClientConfig};
use mockito::Matcher;
use std::sync::Arc;

fn transport(server: &mockito::ServerGuard) -> Arc<HttpTransportClient> {
    Arc::new(
        HttpTransportClient::new(HttpTransportClientConfig::new(server.url()).with_timeout(5))
            .unwrap(),
    )
}

#[tokio::test]
async fn test_synthesis_over_http() {
    let mut server = mockito::Server::new_async().await;
    let process = server
        .mock("POST", "/process")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("INPUT_TEXT".into(), "Hello world".into()),
            Matcher::UrlEncoded("OUTPUT_TYPE".into(), "PHONEMES".into()),
            Matcher::UrlEncoded("VOICE".into(), "cmu-slt-hsmm".into()),
        ]))
        .with_status(200)
        .with_body("h @ - l @U   w r= l d")
        .expect(1)
        .create_async()
        .await;

    let client = TtsSessionClient::new(transport(&server));
    let request = SynthesisRequest::new("Hello world")
        .with_output_type(OutputType::Other("PHONEMES".to_string()))
        .with_voice("cmu-slt-hsmm");

    let outcome = client.synthesize(request).await.unwrap();

    process.assert_async().await;
    assert_eq!(
        outcome,
        SynthesisOutcome::Text("h @ - l @U   w r= l d".to_string())
    );
}

#[tokio::test]
async fn test_catalog_over_http_tolerates_bad_lines() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("GET", "/voices")
        .with_body("cmu-slt-hsmm en_US female hmm\nbroken\n\nbits3 de male unitselection\n")
        .create_async()
        .await;
    server
        .mock("GET", "/datatypes")
        .with_body("TEXT INPUT\nAUDIO OUTPUT\n")
        .create_async()
        .await;
    server
        .mock("GET", "/audioformats")
        .with_body("AU_FILE\nWAVE_FILE\n")
        .create_async()
        .await;
    server
        .mock("GET", "/audioeffects")
        .with_body("Robot amount:100.0;\nWhisper amount:100.0;\n")
        .create_async()
        .await;

    let catalog = CatalogFetcher::new(transport(&server)).fetch_all().await.unwrap();

    assert_eq!(catalog.voices.len(), 2);
    assert_eq!(catalog.voices.voices[1].name, "bits3");
    assert_eq!(catalog.effects.len(), 2);
}

#[tokio::test]
async fn test_perception_session_over_http() {
    let mut server = mockito::Server::new_async().await;
    let start = server
        .mock("POST", "/perceptionTest")
        .match_body(Matcher::UrlEncoded("EMAIL".into(), "a@b.com".into()))
        .with_body("a@b.com\n2\n1\nbase1\ncheckbox A|B|C\n")
        .expect(1)
        .create_async()
        .await;
    let rating = server
        .mock("POST", "/userRating")
        .match_body(Matcher::AllOf(vec![
            Matcher::UrlEncoded("EMAIL".into(), "a@b.com".into()),
            Matcher::UrlEncoded("PRESENT_SAMPLE_NUMBER".into(), "1".into()),
            Matcher::UrlEncoded("PRESENT_SAMPLE_BASENAME".into(), "base1".into()),
            Matcher::UrlEncoded("RESULTS".into(), "A:C".into()),
        ]))
        .with_body("ok")
        .expect(1)
        .create_async()
        .await;

    let mut controller = PerceptionTestController::new(transport(&server));
    controller.submit_email("a@b.com").await.unwrap();
    assert_eq!(controller.progress().as_deref(), Some("2/2"));

    controller
        .submit_rating(Ratings::checked(["C", "A"]))
        .await
        .unwrap();

    start.assert_async().await;
    rating.assert_async().await;
    assert_eq!(*controller.state(), PerceptionState::Completed);
}

#[tokio::test]
async fn test_server_error_text_reaches_caller() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/process")
        .with_status(500)
        .with_body("Voice 'nobody' not available")
        .create_async()
        .await;

    let err = TtsSessionClient::new(transport(&server))
        .synthesize(SynthesisRequest::new("Hi").with_voice("nobody"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApplicationError::Server { status: 500, .. }));
    assert_eq!(err.to_string(), "Voice 'nobody' not available");
}
