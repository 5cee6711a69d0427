//! Perception Command Handlers
//!
//! 感知测试状态机: AwaitingEmail -> InSession -> Finishing -> Completed

use std::sync::Arc;

use crate::application::endpoints;
use crate::application::error::ApplicationError;
use crate::application::ports::{HttpRequest, HttpTransportPort};
use crate::domain::perception::{
    is_valid_email, OptionSchema, PerceptionError, PerceptionSession, Ratings, SampleDetails,
};
use crate::domain::synthesis::FormParams;

/// 控制器状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PerceptionState {
    AwaitingEmail,
    InSession(PerceptionSession),
    /// 正在评分最后一个样本
    Finishing(PerceptionSession),
    Completed,
}

impl PerceptionState {
    pub fn session(&self) -> Option<&PerceptionSession> {
        match self {
            Self::InSession(session) | Self::Finishing(session) => Some(session),
            Self::AwaitingEmail | Self::Completed => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// 提交按钮上的文字
    pub fn action_label(&self) -> &'static str {
        match self {
            Self::AwaitingEmail => "START",
            Self::InSession(_) => "NEXT",
            Self::Finishing(_) => "FINISH",
            Self::Completed => "COMPLETED",
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::AwaitingEmail => "AwaitingEmail",
            Self::InSession(_) => "InSession",
            Self::Finishing(_) => "Finishing",
            Self::Completed => "Completed",
        }
    }

    fn from_session(session: PerceptionSession) -> Self {
        if session.is_last_sample() {
            Self::Finishing(session)
        } else {
            Self::InSession(session)
        }
    }
}

/// PerceptionTestController - 驱动多样本评分流程
///
/// 每次状态迁移内的请求按顺序完成；任何错误都不改变当前状态，
/// 是否重试由调用方决定
pub struct PerceptionTestController {
    transport: Arc<dyn HttpTransportPort>,
    state: PerceptionState,
    /// 用户输入的邮箱，会话开始后的请求都使用它
    email: Option<String>,
}

impl PerceptionTestController {
    pub fn new(transport: Arc<dyn HttpTransportPort>) -> Self {
        Self {
            transport,
            state: PerceptionState::AwaitingEmail,
            email: None,
        }
    }

    pub fn state(&self) -> &PerceptionState {
        &self.state
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// 当前进度，如 `2/10`
    pub fn progress(&self) -> Option<String> {
        self.state.session().map(PerceptionSession::progress)
    }

    pub fn action_label(&self) -> &'static str {
        self.state.action_label()
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    pub async fn submit_email(&mut self, email: &str) -> Result<&PerceptionState, ApplicationError> {
        if self.state != PerceptionState::AwaitingEmail {
            return Err(ApplicationError::invalid_state(format!(
                "email already submitted (state: {})",
                self.state.name()
            )));
        }

        let email = email.trim();
        if !is_valid_email(email) {
            return Err(PerceptionError::InvalidEmail(email.to_string()).into());
        }

        tracing::info!(email = %email, "Starting perception test");

        let params = FormParams::new().with("EMAIL", email);
        let details = self.fetch_sample_details(params).await?;

        self.state = match PerceptionSession::start(&details) {
            Some(session) => {
                tracing::info!(
                    sample_count = session.sample_count(),
                    current_index = session.current_index(),
                    "Perception session started"
                );
                PerceptionState::InSession(session)
            }
            None => {
                tracing::info!(
                    sample_count = details.sample_count,
                    "All samples already rated"
                );
                PerceptionState::Completed
            }
        };
        self.email = Some(email.to_string());

        Ok(&self.state)
    }

    pub async fn submit_rating(&mut self, ratings: Ratings) -> Result<&PerceptionState, ApplicationError> {
        let session = match &self.state {
            PerceptionState::InSession(session) | PerceptionState::Finishing(session) => session,
            other => {
                return Err(ApplicationError::invalid_state(format!(
                    "no sample awaiting a rating (state: {})",
                    other.name()
                )))
            }
        };
        let email = self
            .email
            .clone()
            .unwrap_or_else(|| session.email_id().to_string());

        let results = ratings.serialize(session.option_schema())?;

        let rating_params = FormParams::new()
            .with("EMAIL", &email)
            .with("PRESENT_SAMPLE_NUMBER", session.current_index().to_string())
            .with("PRESENT_SAMPLE_BASENAME", session.current_sample_base_name())
            .with("RESULTS", &results);

        tracing::debug!(
            sample = session.current_index(),
            results = %results,
            "Submitting rating"
        );

        self.transport
            .send(HttpRequest::post(endpoints::USER_RATING, rating_params))
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Rating submission failed");
                ApplicationError::from(e)
            })?;

        let mut next = session.clone();
        let next_index = next.advance();

        if next.is_terminal() {
            tracing::info!(sample_count = next.sample_count(), "Perception test completed");
            self.state = PerceptionState::Completed;
            return Ok(&self.state);
        }

        let params = FormParams::new()
            .with("EMAIL", &email)
            .with("PRESENT_SAMPLE_NUMBER", next_index.to_string());
        let details = self.fetch_sample_details(params).await?;
        next.apply_sample(&details);

        if next.is_terminal() {
            self.state = PerceptionState::Completed;
        } else {
            tracing::debug!(progress = %next.progress(), "Advanced to next sample");
            self.state = PerceptionState::from_session(next);
        }

        Ok(&self.state)
    }

    // ========================================================================
    // Auxiliary fetches
    // ========================================================================

    /// 单独拉取选项结构（`/options` 的第 5 行）
    pub async fn fetch_option_schema(&self) -> Result<OptionSchema, ApplicationError> {
        let text = self.fetch_text(HttpRequest::get(endpoints::OPTIONS)).await?;
        let line = text.lines().nth(4).ok_or_else(|| {
            ApplicationError::Parse("options response has fewer than 5 lines".to_string())
        })?;
        Ok(OptionSchema::parse(line))
    }

    pub async fn fetch_question_text(&self) -> Result<String, ApplicationError> {
        self.fetch_text(HttpRequest::get(endpoints::QUERY_STATEMENT))
            .await
    }

    /// 当前样本的音频
    pub async fn fetch_sample_audio(&self) -> Result<Vec<u8>, ApplicationError> {
        let session = self.state.session().ok_or_else(|| {
            ApplicationError::invalid_state(format!(
                "no sample to play (state: {})",
                self.state.name()
            ))
        })?;

        let params =
            FormParams::new().with("PRESENT_SAMPLE_NUMBER", session.current_index().to_string());
        let response = self
            .transport
            .send(HttpRequest::get(endpoints::PROCESS).with_params(params))
            .await?;
        Ok(response.body)
    }

    async fn fetch_text(&self, request: HttpRequest) -> Result<String, ApplicationError> {
        let response = self.transport.send(request).await?;
        Ok(response.text())
    }

    async fn fetch_sample_details(&self, params: FormParams) -> Result<SampleDetails, ApplicationError> {
        let response = self
            .transport
            .send(HttpRequest::post(endpoints::PERCEPTION_TEST, params))
            .await
            .map_err(|e| {
                tracing::warn!(error = %e, "Sample details request failed");
                ApplicationError::from(e)
            })?;

        Ok(SampleDetails::parse(&response.text())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{HttpMethod, TransportError};
    use crate::infrastructure::adapters::FakeTransport;

    fn controller(transport: &Arc<FakeTransport>) -> PerceptionTestController {
        PerceptionTestController::new(transport.clone())
    }

    async fn started(transport: &Arc<FakeTransport>, first: &str) -> PerceptionTestController {
        transport.respond(endpoints::PERCEPTION_TEST, first);
        let mut controller = controller(transport);
        controller.submit_email("a@b.com").await.unwrap();
        controller
    }

    #[tokio::test]
    async fn test_bad_email_makes_no_request() {
        let transport = Arc::new(FakeTransport::new());
        let mut controller = controller(&transport);

        let err = controller.submit_email("bad-email").await.unwrap_err();

        assert!(err.is_validation());
        assert_eq!(*controller.state(), PerceptionState::AwaitingEmail);
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_valid_email_starts_session() {
        let transport = Arc::new(FakeTransport::new());
        let controller = started(&transport, "a@b.com\n3\n0\nbase0\ncheckbox A|B\n").await;

        let session = controller.state().session().unwrap();
        assert!(matches!(controller.state(), PerceptionState::InSession(_)));
        assert_eq!(session.sample_count(), 3);
        assert_eq!(session.current_index(), 0);
        assert_eq!(
            *session.option_schema(),
            OptionSchema::CheckboxSet {
                items: vec!["A".to_string(), "B".to_string()]
            }
        );
        assert_eq!(controller.action_label(), "NEXT");
        assert_eq!(controller.progress().as_deref(), Some("1/3"));

        let requests = transport.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, HttpMethod::Post);
        assert_eq!(requests[0].endpoint, endpoints::PERCEPTION_TEST);
        assert_eq!(requests[0].params.get("EMAIL"), Some("a@b.com"));
    }

    #[tokio::test]
    async fn test_exhausted_session_completes_immediately() {
        let transport = Arc::new(FakeTransport::new());
        let controller = started(&transport, "a@b.com\n3\n3\nbase3\ncheckbox A|B\n").await;

        assert_eq!(*controller.state(), PerceptionState::Completed);
        assert_eq!(controller.action_label(), "COMPLETED");
    }

    #[tokio::test]
    async fn test_rating_posts_then_fetches_next_sample() {
        let transport = Arc::new(FakeTransport::new());
        let mut controller = started(&transport, "a@b.com\n3\n0\nbase0\ncheckbox A|B|C\n").await;
        transport
            .respond(endpoints::USER_RATING, "ok")
            .respond(endpoints::PERCEPTION_TEST, "a@b.com\n3\n1\nbase1\ncheckbox A|B|C\n");

        controller
            .submit_rating(Ratings::checked(["C", "A"]))
            .await
            .unwrap();

        let session = controller.state().session().unwrap();
        assert_eq!(session.current_index(), 1);
        assert_eq!(session.current_sample_base_name(), "base1");
        assert!(matches!(controller.state(), PerceptionState::InSession(_)));
        assert_eq!(controller.action_label(), "NEXT");

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(requests[1].endpoint, endpoints::USER_RATING);
        assert_eq!(requests[1].params.get("EMAIL"), Some("a@b.com"));
        assert_eq!(requests[1].params.get("PRESENT_SAMPLE_NUMBER"), Some("0"));
        assert_eq!(requests[1].params.get("PRESENT_SAMPLE_BASENAME"), Some("base0"));
        assert_eq!(requests[1].params.get("RESULTS"), Some("A:C"));
        assert_eq!(requests[2].endpoint, endpoints::PERCEPTION_TEST);
        assert_eq!(requests[2].params.get("PRESENT_SAMPLE_NUMBER"), Some("1"));
    }

    #[tokio::test]
    async fn test_rating_before_last_sample_enters_finishing() {
        let transport = Arc::new(FakeTransport::new());
        let mut controller = started(&transport, "a@b.com\n3\n1\nbase1\ncheckbox A|B\n").await;
        transport
            .respond(endpoints::USER_RATING, "ok")
            .respond(endpoints::PERCEPTION_TEST, "a@b.com\n3\n2\nbase2\ncheckbox A|B\n");

        controller
            .submit_rating(Ratings::checked(["B"]))
            .await
            .unwrap();

        assert!(matches!(controller.state(), PerceptionState::Finishing(_)));
        assert_eq!(controller.action_label(), "FINISH");
        assert_eq!(controller.progress().as_deref(), Some("3/3"));

        let requests = transport.requests();
        assert_eq!(requests[1].params.get("PRESENT_SAMPLE_NUMBER"), Some("1"));
        assert_eq!(requests[2].params.get("PRESENT_SAMPLE_NUMBER"), Some("2"));
    }

    #[tokio::test]
    async fn test_last_rating_completes_without_fetch() {
        let transport = Arc::new(FakeTransport::new());
        let mut controller = started(&transport, "a@b.com\n3\n2\nbase2\nscale x|y\n").await;
        transport.respond(endpoints::USER_RATING, "ok");

        controller
            .submit_rating(Ratings::scale([("x", 0), ("y", 4)]))
            .await
            .unwrap();

        assert_eq!(*controller.state(), PerceptionState::Completed);
        let requests = transport.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[1].endpoint, endpoints::USER_RATING);
        assert_eq!(requests[1].params.get("RESULTS"), Some("x:0;y:4"));

        let err = controller
            .submit_rating(Ratings::checked(["A"]))
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidState(_)));
    }

    #[tokio::test]
    async fn test_missing_rating_makes_no_request() {
        let transport = Arc::new(FakeTransport::new());
        let mut controller = started(&transport, "a@b.com\n3\n0\nbase0\nscale x|y\n").await;
        let before = controller.state().clone();

        let err = controller
            .submit_rating(Ratings::scale([("x", 2)]))
            .await
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(*controller.state(), before);
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_error_leaves_state_unchanged() {
        let transport = Arc::new(FakeTransport::new());
        let mut controller = started(&transport, "a@b.com\n3\n0\nbase0\ncheckbox A|B\n").await;
        let before = controller.state().clone();
        transport.fail(endpoints::USER_RATING, TransportError::Timeout);

        let err = controller
            .submit_rating(Ratings::checked(["A"]))
            .await
            .unwrap_err();

        assert_eq!(err, ApplicationError::TimedOut);
        assert_eq!(*controller.state(), before);
    }

    #[tokio::test]
    async fn test_failed_next_sample_fetch_keeps_current_sample() {
        let transport = Arc::new(FakeTransport::new());
        let mut controller = started(&transport, "a@b.com\n3\n0\nbase0\ncheckbox A|B\n").await;
        let before = controller.state().clone();
        transport.respond(endpoints::USER_RATING, "ok").fail(
            endpoints::PERCEPTION_TEST,
            TransportError::Connect("connection reset".to_string()),
        );

        assert!(controller.submit_rating(Ratings::checked(["B"])).await.is_err());
        assert_eq!(*controller.state(), before);
    }

    #[tokio::test]
    async fn test_email_cannot_be_submitted_twice() {
        let transport = Arc::new(FakeTransport::new());
        let mut controller = started(&transport, "a@b.com\n3\n0\nbase0\ncheckbox A|B\n").await;

        let err = controller.submit_email("c@d.org").await.unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidState(_)));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_auxiliary_fetches() {
        let transport = Arc::new(FakeTransport::new());
        let controller = started(&transport, "a@b.com\n3\n1\nbase1\ncheckbox A|B\n").await;
        transport
            .respond(endpoints::OPTIONS, "x\n3\n1\nbase1\nscale natural|clear\n")
            .respond(endpoints::QUERY_STATEMENT, "How natural was it?")
            .respond(endpoints::PROCESS, "RIFF");

        assert_eq!(
            controller.fetch_option_schema().await.unwrap(),
            OptionSchema::Scale {
                items: vec!["natural".to_string(), "clear".to_string()]
            }
        );
        assert_eq!(
            controller.fetch_question_text().await.unwrap(),
            "How natural was it?"
        );
        assert_eq!(controller.fetch_sample_audio().await.unwrap(), b"RIFF".to_vec());

        let requests = transport.requests();
        let audio_request = requests.last().unwrap();
        assert_eq!(audio_request.method, HttpMethod::Get);
        assert_eq!(audio_request.params.get("PRESENT_SAMPLE_NUMBER"), Some("1"));
    }
}
