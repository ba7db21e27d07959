use crate::{
    api::ChatBackend,
    chat_log::{ChatLog, ChatMessage},
    constants::SELECT_FILE_PROMPT,
    models::{error_message, response_text, UploadOutcome},
};
use log::{info, warn};
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use tokio::{sync::Mutex, task::JoinHandle};
use uuid::Uuid;

/// Relays user input to the backend and renders the outcome into the log.
///
/// Every call is fire-and-forget: the remote half runs on its own task and
/// replies land in the log in completion order, not send order.
#[derive(Clone)]
pub struct Dispatcher {
    backend: Arc<dyn ChatBackend>,
    log: Arc<Mutex<ChatLog>>,
    user_name: String,
    bot_name: String,
    pending: Arc<AtomicUsize>,
}

impl Dispatcher {
    pub fn new(
        backend: Arc<dyn ChatBackend>,
        log: Arc<Mutex<ChatLog>>,
        user_name: impl Into<String>,
        bot_name: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            log,
            user_name: user_name.into(),
            bot_name: bot_name.into(),
            pending: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Requests that have been sent but not yet rendered.
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Sends the trimmed contents of `input` as a chat message.
    ///
    /// Blank input is ignored and left in place. Otherwise the user's message
    /// is rendered at once, the request is spawned, and `input` is cleared
    /// without waiting for the reply.
    pub async fn send_message(&self, input: &mut String) -> Option<JoinHandle<()>> {
        let message = input.trim().to_string();
        if message.is_empty() {
            return None;
        }

        self.log
            .lock()
            .await
            .append(ChatMessage::from_user(&self.user_name, message.clone()));

        let request_id = Uuid::new_v4().to_string();
        info!("[{}] sending message ({} chars)", request_id, message.len());

        let this = self.clone();
        this.pending.fetch_add(1, Ordering::SeqCst);
        let handle = tokio::spawn(async move {
            let content = match this.backend.get_response(&request_id, &message).await {
                Ok(body) => response_text(&body).unwrap_or_else(|e| {
                    warn!("[{}] unreadable reply: {}", request_id, e);
                    error_message(e)
                }),
                Err(e) => {
                    warn!("[{}] message failed: {}", request_id, e);
                    error_message(e)
                }
            };
            this.render_reply(content).await;
        });

        input.clear();
        Some(handle)
    }

    /// Uploads the selected file, or asks for one when nothing is selected.
    pub async fn upload_file(&self, selection: Option<PathBuf>) -> Option<JoinHandle<()>> {
        let Some(path) = selection else {
            self.log
                .lock()
                .await
                .append(ChatMessage::from_remote(&self.bot_name, SELECT_FILE_PROMPT));
            return None;
        };

        let request_id = Uuid::new_v4().to_string();
        info!("[{}] uploading {}", request_id, path.display());

        let this = self.clone();
        this.pending.fetch_add(1, Ordering::SeqCst);
        Some(tokio::spawn(async move {
            let content = match this.backend.upload_pdf(&request_id, &path).await {
                Ok(body) => {
                    let outcome = UploadOutcome::from_body(&body);
                    if outcome == UploadOutcome::Silent {
                        warn!(
                            "[{}] upload reply had neither summary nor error: {}",
                            request_id, body
                        );
                    }
                    outcome.message()
                }
                Err(e) => {
                    warn!("[{}] upload failed: {}", request_id, e);
                    Some(error_message(e))
                }
            };

            match content {
                Some(content) => this.render_reply(content).await,
                None => {
                    this.pending.fetch_sub(1, Ordering::SeqCst);
                }
            }
        }))
    }

    async fn render_reply(&self, content: String) {
        let mut log = self.log.lock().await;
        log.append(ChatMessage::from_remote(&self.bot_name, content));
        self.pending.fetch_sub(1, Ordering::SeqCst);
    }
}
