//! The conversation controller.
//!
//! The controller owns the [`SessionStore`] and the [`Composer`] and runs
//! every state transition that involves the agent service. A send is
//! optimistic: the user's message lands in the transcript immediately, the
//! query goes out tagged with the session that was active at that moment,
//! and the eventual reply (or an apology) is reconciled into that same
//! session no matter what is active by then.
//!
//! A send happens in three steps so a front end can keep handling input
//! while the request is in flight:
//!
//! 1. [`Controller::begin_send`] validates, appends the user message, clears
//!    the composer and returns a [`SendTicket`].
//! 2. [`Controller::dispatch`] turns the ticket into an owned future that
//!    resolves to a [`SendCompletion`].
//! 3. [`Controller::complete_send`] reconciles the completion.
//!
//! [`Controller::send`] chains the three for callers that simply await.

use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::BoxFuture;

use crate::client::DEFAULT_TIMEOUT;
use crate::composer::Composer;
use crate::error::{Error, Result};
use crate::observability::{
    REPLIES_ORPHANED, SEND_ROUND_TRIP, SENDS_FAILED, SENDS_ISSUED, SENDS_REJECTED,
    SENDS_TIMED_OUT, SESSION_CREATE_FAILURES, SESSION_DELETE_FAILURES, SESSIONS_CREATED,
    SESSIONS_DELETED,
};
use crate::service::AgentService;
use crate::store::SessionStore;
use crate::types::{AgentRequest, AgentResponse, Attachment, Message, SessionId};

/// Bot text used when the service replies without any text.
pub const NO_RESPONSE: &str = "No response";
/// Bot text used when a send fails for any reason.
pub const APOLOGY: &str = "Sorry, something went wrong.";
/// Alert raised when the service will not open a session.
pub const CREATE_FAILED: &str = "Could not create session";
/// Alert raised when the service will not delete a session.
pub const DELETE_FAILED: &str = "Could not delete session on server";

///////////////////////////////////////// Notifications ////////////////////////////////////////

/// How prominently a notification should be shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Worth mentioning.
    Info,
    /// Must interrupt the user, like a modal alert.
    Alert,
}

/// A one-shot message for the user that is not part of any transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// How prominently to show it.
    pub level: NotificationLevel,
    /// What to show.
    pub text: String,
}

impl Notification {
    /// Creates an info-level notification.
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Info,
            text: text.into(),
        }
    }

    /// Creates an alert-level notification.
    pub fn alert(text: impl Into<String>) -> Self {
        Self {
            level: NotificationLevel::Alert,
            text: text.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

//////////////////////////////////////////// Sends /////////////////////////////////////////////

/// The request context of one in-flight send.
///
/// The target session is captured by value when the send is issued.
#[derive(Debug, Clone)]
pub struct SendTicket {
    session_id: SessionId,
    query: String,
    issued_at: Instant,
}

impl SendTicket {
    /// The session the reply belongs to.
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// The request body for the agent service.
    pub fn request(&self) -> AgentRequest {
        AgentRequest::new(self.query.clone(), self.session_id.clone())
    }
}

/// The outcome of a dispatched send, ready to be reconciled.
#[derive(Debug)]
pub struct SendCompletion {
    ticket: SendTicket,
    outcome: Result<AgentResponse>,
}

impl SendCompletion {
    /// Pairs a ticket with the service's answer.
    pub fn new(ticket: SendTicket, outcome: Result<AgentResponse>) -> Self {
        Self { ticket, outcome }
    }

    /// The ticket this completes.
    pub fn ticket(&self) -> &SendTicket {
        &self.ticket
    }

    /// The raw outcome of the request.
    pub fn outcome(&self) -> &Result<AgentResponse> {
        &self.outcome
    }
}

/// Turns the outcome of a send into the bot message shown for it.
///
/// Every outcome maps to a message; errors never escape.
pub fn reply_message(outcome: &Result<AgentResponse>) -> Message {
    match outcome {
        Ok(response) => {
            let message = Message::bot(response.reply().unwrap_or(NO_RESPONSE));
            match &response.download_url {
                Some(url) => message.with_download_url(url.clone()),
                None => message,
            }
        }
        Err(_) => Message::bot(APOLOGY),
    }
}

////////////////////////////////////////// Controller //////////////////////////////////////////

/// Orchestrates sessions, the draft, and the agent service.
pub struct Controller<S: AgentService> {
    service: Arc<S>,
    store: SessionStore,
    composer: Composer,
    pending: Option<SessionId>,
    timeout: Duration,
    notifications: VecDeque<Notification>,
}

impl<S: AgentService + 'static> Controller<S> {
    /// Creates a controller with empty state.
    pub fn new(service: S) -> Self {
        Self::with_service(Arc::new(service))
    }

    /// Creates a controller around a shared service.
    pub fn with_service(service: Arc<S>) -> Self {
        Self {
            service,
            store: SessionStore::new(),
            composer: Composer::new(),
            pending: None,
            timeout: DEFAULT_TIMEOUT,
            notifications: VecDeque::new(),
        }
    }

    /// Sets how long a send may wait for its reply.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The service this controller talks to.
    pub fn service(&self) -> &Arc<S> {
        &self.service
    }

    /// Sessions and transcripts.
    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// The current draft.
    pub fn composer(&self) -> &Composer {
        &self.composer
    }

    /// Returns true while a send is in flight.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The session the in-flight send was issued for.
    pub fn pending_session(&self) -> Option<&SessionId> {
        self.pending.as_ref()
    }

    /// Returns true if the in-flight send belongs to the active session.
    pub fn is_active_pending(&self) -> bool {
        self.pending.is_some() && self.pending.as_ref() == self.store.active()
    }

    /// The reply timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Replaces the draft text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.composer.set_text(text);
    }

    /// Adds files to the draft.
    pub fn add_files(&mut self, files: impl IntoIterator<Item = Attachment>) {
        self.composer.add_files(files);
    }

    /// Removes one file from the draft.
    pub fn remove_file(&mut self, index: usize) -> Option<Attachment> {
        self.composer.remove_file(index)
    }

    /// Drains the notifications raised since the last call.
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    /// Opens a new session on the service and makes it active.
    ///
    /// On failure an alert is queued and no state changes.
    pub async fn create_session(&mut self) -> Option<SessionId> {
        match self.service.create_session().await {
            Ok(session_id) => {
                SESSIONS_CREATED.click();
                tracing::debug!(session = %session_id, "session created");
                self.store.add_session(session_id.clone());
                Some(session_id)
            }
            Err(err) => {
                SESSION_CREATE_FAILURES.click();
                tracing::warn!(error = %err, "error creating session");
                self.notifications.push_back(Notification::alert(CREATE_FAILED));
                None
            }
        }
    }

    /// Makes a listed session active. No request is made.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSession`] if the session is not listed.
    pub fn select_session(&mut self, session_id: &SessionId) -> Result<()> {
        self.store.set_active(session_id)
    }

    /// Deletes a session on the service, then locally.
    ///
    /// Local state only changes once the service confirms. On failure an
    /// alert is queued and the session stays listed. Returns true if the
    /// session was deleted.
    pub async fn delete_session(&mut self, session_id: &SessionId) -> bool {
        match self.service.delete_session(session_id).await {
            Ok(()) => {
                SESSIONS_DELETED.click();
                tracing::debug!(session = %session_id, "session deleted");
                self.store.remove_session(session_id);
                true
            }
            Err(err) => {
                SESSION_DELETE_FAILURES.click();
                tracing::warn!(session = %session_id, error = %err, "error deleting session");
                self.notifications.push_back(Notification::alert(DELETE_FAILED));
                false
            }
        }
    }

    /// Validates the draft and, if it may be sent, records it optimistically.
    ///
    /// Returns `None` without touching any state when the draft is empty, no
    /// session is active, or another send is still in flight.
    pub fn begin_send(&mut self) -> Option<SendTicket> {
        let Some(session_id) = self.store.active().cloned() else {
            SENDS_REJECTED.click();
            tracing::debug!("send rejected: no active session");
            return None;
        };
        if self.pending.is_some() {
            SENDS_REJECTED.click();
            tracing::debug!("send rejected: another send is in flight");
            return None;
        }
        let Some(query) = self.composer.compose() else {
            SENDS_REJECTED.click();
            tracing::debug!("send rejected: nothing to send");
            return None;
        };

        if let Err(err) = self
            .store
            .append_message(&session_id, Message::user(query.clone()))
        {
            // The active session is always listed, so this cannot happen.
            tracing::error!(error = %err, "active session missing from store");
            return None;
        }
        self.composer.clear();
        self.pending = Some(session_id.clone());
        SENDS_ISSUED.click();
        tracing::debug!(session = %session_id, "send issued");

        Some(SendTicket {
            session_id,
            query,
            issued_at: Instant::now(),
        })
    }

    /// Issues the request for `ticket`.
    ///
    /// The returned future owns everything it needs, so it can be spawned
    /// while the controller keeps serving other operations. It never fails:
    /// transport errors and timeouts are carried in the completion.
    pub fn dispatch(&self, ticket: SendTicket) -> BoxFuture<'static, SendCompletion> {
        let service = Arc::clone(&self.service);
        let timeout = self.timeout;
        Box::pin(async move {
            let request = ticket.request();
            let outcome = match tokio::time::timeout(timeout, service.run(&request)).await {
                Ok(outcome) => outcome,
                Err(_) => {
                    SENDS_TIMED_OUT.click();
                    Err(Error::timeout(
                        "no reply from the agent service",
                        Some(timeout.as_secs_f64()),
                    ))
                }
            };
            SendCompletion::new(ticket, outcome)
        })
    }

    /// Reconciles a completed send into the session it was issued for.
    ///
    /// Clears the pending flag in every case. Returns the appended bot
    /// message, or `None` if the session was deleted while the request was
    /// in flight.
    pub fn complete_send(&mut self, completion: SendCompletion) -> Option<Message> {
        self.pending = None;
        let SendCompletion { ticket, outcome } = completion;
        SEND_ROUND_TRIP.add(ticket.issued_at.elapsed().as_secs_f64());

        if let Err(err) = &outcome {
            SENDS_FAILED.click();
            tracing::warn!(session = %ticket.session_id, error = %err, "error sending message");
        }
        if !self.store.contains(&ticket.session_id) {
            REPLIES_ORPHANED.click();
            tracing::warn!(session = %ticket.session_id, "reply arrived for a deleted session");
            self.notifications.push_back(Notification::info(format!(
                "Discarded the reply for deleted session {}",
                ticket.session_id
            )));
            return None;
        }

        let message = reply_message(&outcome);
        match self.store.append_message(&ticket.session_id, message.clone()) {
            Ok(()) => Some(message),
            Err(err) => {
                tracing::error!(error = %err, "reply could not be recorded");
                None
            }
        }
    }

    /// Sends the draft and waits for the reply.
    ///
    /// Returns `None` if the send was rejected or its session vanished.
    pub async fn send(&mut self) -> Option<Message> {
        let ticket = self.begin_send()?;
        let completion = self.dispatch(ticket).await;
        self.complete_send(completion)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use tokio::sync::oneshot;

    use super::*;

    enum Reply {
        Now(Result<AgentResponse>),
        Later(oneshot::Receiver<Result<AgentResponse>>),
        Never,
    }

    #[derive(Default)]
    struct FakeService {
        created: Mutex<VecDeque<Result<SessionId>>>,
        deleted: Mutex<VecDeque<Result<()>>>,
        replies: Mutex<VecDeque<Reply>>,
        requests: Mutex<Vec<AgentRequest>>,
    }

    impl FakeService {
        fn creating(self, ids: &[&str]) -> Self {
            self.created
                .lock()
                .unwrap()
                .extend(ids.iter().map(|id| Ok(SessionId::new(*id))));
            self
        }

        fn replying(self, reply: Reply) -> Self {
            self.replies.lock().unwrap().push_back(reply);
            self
        }

        fn requests(&self) -> Vec<AgentRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait::async_trait]
    impl AgentService for FakeService {
        async fn create_session(&self) -> Result<SessionId> {
            self.created
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(Error::connection("refused", None)))
        }

        async fn delete_session(&self, _session_id: &SessionId) -> Result<()> {
            self.deleted.lock().unwrap().pop_front().unwrap_or(Ok(()))
        }

        async fn run(&self, request: &AgentRequest) -> Result<AgentResponse> {
            self.requests.lock().unwrap().push(request.clone());
            let reply = self.replies.lock().unwrap().pop_front();
            match reply {
                Some(Reply::Now(outcome)) => outcome,
                Some(Reply::Later(rx)) => rx
                    .await
                    .unwrap_or_else(|_| Err(Error::connection("dropped", None))),
                Some(Reply::Never) | None => futures::future::pending().await,
            }
        }
    }

    fn sid(id: &str) -> SessionId {
        SessionId::new(id)
    }

    #[tokio::test]
    async fn create_session_adds_and_activates() {
        let mut controller = Controller::new(FakeService::default().creating(&["s1"]));
        assert_eq!(controller.create_session().await, Some(sid("s1")));
        assert_eq!(controller.store().sessions(), &[sid("s1")]);
        assert_eq!(controller.store().active(), Some(&sid("s1")));
        assert_eq!(controller.store().conversation(&sid("s1")), Some(&[][..]));
        assert!(controller.take_notifications().is_empty());
    }

    #[tokio::test]
    async fn create_session_failure_alerts_without_changes() {
        let mut controller = Controller::new(FakeService::default());
        assert_eq!(controller.create_session().await, None);
        assert!(controller.store().is_empty());
        assert_eq!(
            controller.take_notifications(),
            vec![Notification::alert(CREATE_FAILED)]
        );
        assert!(controller.take_notifications().is_empty());
    }

    #[tokio::test]
    async fn send_success_appends_reply() {
        let service = FakeService::default()
            .creating(&["s1"])
            .replying(Reply::Now(Ok(AgentResponse::text("hello"))));
        let mut controller = Controller::new(service);
        controller.create_session().await;
        controller.set_text("hi");

        let reply = controller.send().await;
        assert_eq!(reply, Some(Message::bot("hello")));
        assert_eq!(
            controller.store().conversation(&sid("s1")).unwrap(),
            &[Message::user("hi"), Message::bot("hello")]
        );
        assert_eq!(controller.composer().text(), "");
        assert!(!controller.is_pending());
        assert_eq!(
            controller.service().requests(),
            vec![AgentRequest::new("hi", sid("s1"))]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn send_timeout_appends_apology() {
        let service = FakeService::default()
            .creating(&["s1"])
            .replying(Reply::Never);
        let mut controller = Controller::new(service);
        controller.create_session().await;
        controller.set_text("anyone there?");

        let reply = controller.send().await;
        assert_eq!(reply, Some(Message::bot(APOLOGY)));
        assert_eq!(
            controller.store().conversation(&sid("s1")).unwrap(),
            &[Message::user("anyone there?"), Message::bot(APOLOGY)]
        );
        assert!(!controller.is_pending());
    }

    #[tokio::test(start_paused = true)]
    async fn dispatch_reports_timeout_error() {
        let service = FakeService::default()
            .creating(&["s1"])
            .replying(Reply::Never);
        let mut controller = Controller::new(service).with_timeout(Duration::from_secs(5));
        controller.create_session().await;
        controller.set_text("hi");
        let ticket = controller.begin_send().unwrap();
        let completion = controller.dispatch(ticket).await;
        assert!(completion.outcome().as_ref().unwrap_err().is_timeout());
    }

    #[tokio::test]
    async fn transport_and_malformed_failures_become_apologies() {
        let service = FakeService::default()
            .creating(&["s1"])
            .replying(Reply::Now(Err(Error::connection("refused", None))))
            .replying(Reply::Now(Err(Error::serialization("bad json", None))));
        let mut controller = Controller::new(service);
        controller.create_session().await;

        controller.set_text("one");
        assert_eq!(controller.send().await, Some(Message::bot(APOLOGY)));
        controller.set_text("two");
        assert_eq!(controller.send().await, Some(Message::bot(APOLOGY)));
        assert_eq!(controller.store().active_conversation().len(), 4);
        assert!(!controller.is_pending());
    }

    #[tokio::test]
    async fn empty_reply_uses_fallback_text() {
        let service = FakeService::default()
            .creating(&["s1"])
            .replying(Reply::Now(Ok(AgentResponse::default())))
            .replying(Reply::Now(Ok(AgentResponse::text(""))));
        let mut controller = Controller::new(service);
        controller.create_session().await;
        controller.set_text("a");
        assert_eq!(controller.send().await, Some(Message::bot(NO_RESPONSE)));
        controller.set_text("b");
        assert_eq!(controller.send().await, Some(Message::bot(NO_RESPONSE)));
    }

    #[tokio::test]
    async fn reply_lands_in_captured_session() {
        let (tx, rx) = oneshot::channel();
        let service = FakeService::default()
            .creating(&["a", "b"])
            .replying(Reply::Later(rx));
        let mut controller = Controller::new(service);
        controller.create_session().await;
        controller.set_text("question for a");
        let ticket = controller.begin_send().unwrap();
        assert_eq!(ticket.session_id(), &sid("a"));
        let in_flight = tokio::spawn(controller.dispatch(ticket));
        assert!(controller.is_active_pending());

        controller.create_session().await;
        controller.select_session(&sid("b")).unwrap();
        assert_eq!(controller.pending_session(), Some(&sid("a")));
        assert!(!controller.is_active_pending());
        tx.send(Ok(AgentResponse::text("answer for a"))).unwrap();
        let completion = in_flight.await.unwrap();
        controller.complete_send(completion);

        assert_eq!(
            controller.store().conversation(&sid("a")).unwrap(),
            &[Message::user("question for a"), Message::bot("answer for a")]
        );
        assert!(controller.store().conversation(&sid("b")).unwrap().is_empty());
        assert_eq!(controller.store().active(), Some(&sid("b")));
        assert!(!controller.is_pending());
    }

    #[tokio::test]
    async fn second_send_while_pending_is_rejected() {
        let service = FakeService::default().creating(&["s1"]);
        let mut controller = Controller::new(service);
        controller.create_session().await;
        controller.set_text("first");
        let ticket = controller.begin_send().unwrap();
        assert!(controller.is_pending());

        controller.set_text("second");
        controller.add_files([Attachment::new("a.png", "/tmp/a.png")]);
        let before = controller.composer().clone();
        assert!(controller.begin_send().is_none());
        assert_eq!(controller.store().active_conversation().len(), 1);
        assert_eq!(controller.composer(), &before);

        controller.complete_send(SendCompletion::new(
            ticket,
            Ok(AgentResponse::text("ok")),
        ));
        assert!(!controller.is_pending());
        assert!(controller.begin_send().is_some());
    }

    #[tokio::test]
    async fn send_without_active_session_keeps_draft() {
        let mut controller = Controller::new(FakeService::default());
        controller.set_text("hello?");
        assert!(controller.begin_send().is_none());
        assert_eq!(controller.composer().text(), "hello?");
        assert!(!controller.is_pending());
    }

    #[tokio::test]
    async fn removed_attachment_leaves_nothing_to_send() {
        let mut controller = Controller::new(FakeService::default().creating(&["s1"]));
        controller.create_session().await;
        controller.add_files([Attachment::new("a.png", "/tmp/a.png")]);
        assert!(controller.remove_file(0).is_some());
        assert!(controller.composer().attachments().is_empty());
        assert!(controller.begin_send().is_none());
        assert!(controller.store().active_conversation().is_empty());
        assert!(!controller.is_pending());
    }

    #[tokio::test]
    async fn attachments_alone_can_be_sent() {
        let service = FakeService::default()
            .creating(&["s1"])
            .replying(Reply::Now(Ok(AgentResponse::text("ok"))));
        let mut controller = Controller::new(service);
        controller.create_session().await;
        controller.add_files([Attachment::new("a.png", "/tmp/a.png")]);
        assert_eq!(controller.send().await, Some(Message::bot("ok")));
        assert_eq!(
            controller.store().active_conversation(),
            &[Message::user("\n📎 Files: a.png"), Message::bot("ok")]
        );
        assert!(controller.composer().is_empty());
    }

    #[tokio::test]
    async fn attachments_are_folded_into_the_query() {
        let service = FakeService::default()
            .creating(&["s1"])
            .replying(Reply::Now(Ok(AgentResponse::text("Got it."))));
        let mut controller = Controller::new(service);
        controller.create_session().await;
        controller.set_text(" uploaded ");
        controller.add_files([
            Attachment::new("income.pdf", "/tmp/income.pdf"),
            Attachment::new("photo.jpg", "/tmp/photo.jpg"),
        ]);
        controller.send().await;

        let expected = "uploaded\n📎 Files: income.pdf, photo.jpg";
        assert_eq!(
            controller.store().active_conversation()[0],
            Message::user(expected)
        );
        assert_eq!(controller.service().requests()[0].query, expected);
        assert!(controller.composer().attachments().is_empty());
    }

    #[tokio::test]
    async fn delete_failure_keeps_session() {
        let service = FakeService::default().creating(&["s1"]);
        service
            .deleted
            .lock()
            .unwrap()
            .push_back(Err(Error::internal_server("db locked")));
        let mut controller = Controller::new(service);
        controller.create_session().await;

        assert!(!controller.delete_session(&sid("s1")).await);
        assert_eq!(controller.store().sessions(), &[sid("s1")]);
        assert_eq!(controller.store().active(), Some(&sid("s1")));
        assert_eq!(
            controller.take_notifications(),
            vec![Notification::alert(DELETE_FAILED)]
        );
    }

    #[tokio::test]
    async fn delete_active_session_clears_active() {
        let mut controller = Controller::new(FakeService::default().creating(&["s1", "s2"]));
        controller.create_session().await;
        controller.create_session().await;

        assert!(controller.delete_session(&sid("s2")).await);
        assert_eq!(controller.store().sessions(), &[sid("s1")]);
        assert_eq!(controller.store().active(), None);
        assert_eq!(controller.store().conversation(&sid("s2")), None);
    }

    #[tokio::test]
    async fn reply_for_deleted_session_is_discarded() {
        let (tx, rx) = oneshot::channel();
        let service = FakeService::default()
            .creating(&["a"])
            .replying(Reply::Later(rx));
        let mut controller = Controller::new(service);
        controller.create_session().await;
        controller.set_text("hi");
        let ticket = controller.begin_send().unwrap();
        let in_flight = tokio::spawn(controller.dispatch(ticket));

        assert!(controller.delete_session(&sid("a")).await);
        tx.send(Ok(AgentResponse::text("too late"))).unwrap();
        let completion = in_flight.await.unwrap();

        assert_eq!(controller.complete_send(completion), None);
        assert!(controller.store().is_empty());
        assert!(!controller.is_pending());
        let notifications = controller.take_notifications();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].level, NotificationLevel::Info);
    }

    #[tokio::test]
    async fn select_unknown_session_fails() {
        let mut controller = Controller::new(FakeService::default().creating(&["s1"]));
        controller.create_session().await;
        assert!(
            controller
                .select_session(&sid("zz"))
                .unwrap_err()
                .is_unknown_session()
        );
        assert_eq!(controller.store().active(), Some(&sid("s1")));
    }

    #[test]
    fn reply_message_is_total() {
        assert_eq!(
            reply_message(&Ok(AgentResponse::text("hi"))),
            Message::bot("hi")
        );
        assert_eq!(
            reply_message(&Ok(AgentResponse::default())),
            Message::bot(NO_RESPONSE)
        );
        assert_eq!(
            reply_message(&Err(Error::timeout("slow", None))),
            Message::bot(APOLOGY)
        );
        let with_link = AgentResponse {
            response: Some("Your application PDF is ready.".to_string()),
            session_id: None,
            download_url: Some("http://localhost:8000/download/application/x.pdf".to_string()),
        };
        assert_eq!(
            reply_message(&Ok(with_link)).download_url.as_deref(),
            Some("http://localhost:8000/download/application/x.pdf")
        );
    }
}
