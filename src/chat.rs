use crate::types::{Message, Reply, Role};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

pub const GREETING: &str = "Hi! I'm your AI assistant. Ask me anything.";

/// Prefix of every synthetic message produced when a request fails.
pub const ERROR_PREFIX: &str = "Error contacting AI";

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    #[error("unexpected response: {0}")]
    Schema(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: &'a [Message],
}

/// Thin wrapper around the remote chat endpoint.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    endpoint: String,
}

impl ChatClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ChatError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// POST the whole history and parse the `{role, content}` answer.
    pub async fn request(&self, messages: &[Message]) -> Result<Reply, ChatError> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&ChatRequest { messages })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Like [`ChatClient::request`], but never fails: errors come back as an
    /// assistant message describing what went wrong.
    pub async fn reply(&self, messages: &[Message]) -> Message {
        log::debug!("sending {} messages to {}", messages.len(), self.endpoint);
        match self.request(messages).await {
            Ok(reply) => Message::new(reply.role, reply.content),
            Err(e) => {
                log::error!("chat request to {} failed: {}", self.endpoint, e);
                Message::new(Role::Assistant, format!("{}: {}", ERROR_PREFIX, e))
            }
        }
    }
}

/// Transcript plus the in-flight flag.
#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    waiting: bool,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: vec![Message::new(Role::Assistant, GREETING)],
            waiting: false,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    pub fn can_send(&self, input: &str) -> bool {
        !input.trim().is_empty() && !self.waiting
    }

    /// Append the user's message and return the history to send, or `None`
    /// if nothing may be sent right now.
    pub fn begin_send(&mut self, input: &str) -> Option<Vec<Message>> {
        if !self.can_send(input) {
            return None;
        }
        self.messages.push(Message::new(Role::User, input.trim()));
        self.waiting = true;
        Some(self.messages.clone())
    }

    pub fn finish(&mut self, reply: Message) {
        self.messages.push(reply);
        self.waiting = false;
    }

    /// Drop the in-flight flag without an answer (request aborted).
    pub fn abandon(&mut self) {
        self.waiting = false;
    }

    pub fn last_reply(&self) -> Option<&Message> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use tiny_http::{Header, Response, Server};

    /// Serve exactly one request with the given status and body; the join
    /// handle yields the request body that was received.
    fn stub_endpoint(status: u16, body: &'static str) -> (String, thread::JoinHandle<String>) {
        let server = Server::http("127.0.0.1:0").unwrap();
        let port = server.server_addr().to_ip().map(|addr| addr.port()).unwrap();
        let handle = thread::spawn(move || {
            let mut request = server.recv().unwrap();
            let mut received = String::new();
            request.as_reader().read_to_string(&mut received).unwrap();
            let response = Response::from_string(body).with_status_code(status).with_header(
                Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..]).unwrap(),
            );
            request.respond(response).unwrap();
            received
        });
        (format!("http://127.0.0.1:{}/chat", port), handle)
    }

    fn client(endpoint: &str) -> ChatClient {
        // Loopback stubs must not be routed through an ambient HTTP_PROXY.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .no_proxy()
            .build()
            .unwrap();
        ChatClient {
            http,
            endpoint: endpoint.to_string(),
        }
    }

    async fn send(conversation: &mut Conversation, client: &ChatClient, text: &str) {
        let history = conversation.begin_send(text).unwrap();
        let reply = client.reply(&history).await;
        conversation.finish(reply);
    }

    #[tokio::test]
    async fn successful_exchange_builds_the_transcript_in_order() {
        let (endpoint, server) = stub_endpoint(200, r#"{"role":"assistant","content":"Hello"}"#);
        let client = client(&endpoint);
        let mut conversation = Conversation::new();

        send(&mut conversation, &client, "Hi").await;

        let transcript: Vec<(Role, &str)> = conversation
            .messages()
            .iter()
            .map(|m| (m.role, m.content.as_str()))
            .collect();
        assert_eq!(
            transcript,
            vec![
                (Role::Assistant, GREETING),
                (Role::User, "Hi"),
                (Role::Assistant, "Hello"),
            ]
        );
        assert!(!conversation.is_waiting());

        let body: serde_json::Value = serde_json::from_str(&server.join().unwrap()).unwrap();
        let sent = body["messages"].as_array().unwrap();
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0]["role"], "assistant");
        assert_eq!(sent[1]["role"], "user");
        assert_eq!(sent[1]["content"], "Hi");
        assert!(sent[1]["id"].as_str().is_some_and(|id| !id.is_empty()));
        assert!(sent[1].get("sent_at").is_none());
    }

    #[tokio::test]
    async fn server_error_becomes_an_error_message() {
        let (endpoint, server) = stub_endpoint(500, "boom");
        let client = client(&endpoint);
        let mut conversation = Conversation::new();

        send(&mut conversation, &client, "Hi").await;
        server.join().unwrap();

        let last = conversation.messages().last().unwrap();
        assert_eq!(conversation.messages().len(), 3);
        assert_eq!(last.role, Role::Assistant);
        assert!(last.content.starts_with(ERROR_PREFIX));
        assert!(last.content.contains("HTTP 500"));
        assert!(!conversation.is_waiting());
    }

    #[tokio::test]
    async fn schema_mismatch_is_reported() {
        let (endpoint, server) = stub_endpoint(200, r#"{"role":"system","content":"?"}"#);
        let client = client(&endpoint);

        let err = client
            .request(&[Message::new(Role::User, "Hi")])
            .await
            .unwrap_err();
        server.join().unwrap();

        assert!(matches!(err, ChatError::Schema(_)));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        // Bind then drop to get a port nothing listens on.
        let port = {
            let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            listener.local_addr().unwrap().port()
        };
        let client = client(&format!("http://127.0.0.1:{}/chat", port));

        let reply = client.reply(&[Message::new(Role::User, "Hi")]).await;

        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.content.starts_with(ERROR_PREFIX));
    }

    #[test]
    fn blank_input_or_pending_request_cannot_send() {
        let mut conversation = Conversation::new();
        assert!(!conversation.can_send("   \n"));
        assert!(conversation.begin_send("").is_none());

        let history = conversation.begin_send("  hello  ").unwrap();
        assert_eq!(history.last().unwrap().content, "hello");
        assert!(conversation.is_waiting());
        assert!(!conversation.can_send("again"));
        assert!(conversation.begin_send("again").is_none());

        conversation.abandon();
        assert!(conversation.can_send("again"));
    }

    #[test]
    fn last_reply_skips_user_messages() {
        let mut conversation = Conversation::new();
        conversation.begin_send("question");
        assert_eq!(conversation.last_reply().unwrap().content, GREETING);

        conversation.finish(Message::new(Role::Assistant, "answer"));
        assert_eq!(conversation.last_reply().unwrap().content, "answer");
    }
}
