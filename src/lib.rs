// src/lib.rs

pub mod api;
pub mod chat_log;
pub mod config;
pub mod constants;
pub mod dispatcher;
pub mod errors;
pub mod key_handlers;
pub mod logging;
pub mod models;
pub mod status_indicator;
pub mod ui;

use crate::api::ChatBackend;
use crate::chat_log::ChatLog;
use crate::config::Config;
use crate::dispatcher::Dispatcher;
use crate::status_indicator::StatusIndicator;
use crate::ui::file_picker::FilePicker;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppState {
    Chat,
    FilePicker,
    QuitConfirm,
    Quit,
}

pub struct App {
    pub state: AppState,
    pub base_url: String,
    pub input: String,
    pub chat_log: Arc<Mutex<ChatLog>>,
    pub dispatcher: Dispatcher,
    pub file_picker: FilePicker,
    pub selected_file: Option<PathBuf>,
    pub status_indicator: StatusIndicator,
}

impl App {
    pub fn new(config: &Config, backend: Arc<dyn ChatBackend>) -> App {
        let chat_log = Arc::new(Mutex::new(ChatLog::new()));
        let picker_root = config
            .picker_root
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        App {
            state: AppState::Chat,
            base_url: config.base_url.clone(),
            input: String::new(),
            dispatcher: Dispatcher::new(
                backend,
                chat_log.clone(),
                config.user_name.clone(),
                config.bot_name.clone(),
            ),
            chat_log,
            file_picker: FilePicker::new(picker_root),
            selected_file: None,
            status_indicator: StatusIndicator::new(),
        }
    }

    pub fn select_file(&mut self, path: PathBuf) {
        log::info!("selected {}", path.display());
        self.selected_file = Some(path);
        self.refresh_status();
    }

    /// Syncs the status line with the dispatcher and the current selection.
    pub fn refresh_status(&mut self) {
        self.status_indicator.set_pending(self.dispatcher.pending());
        match &self.selected_file {
            Some(path) => {
                let name = path
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_else(|| path.display().to_string());
                self.status_indicator
                    .set_status(format!("PDF: {} (Ctrl+U to upload)", name));
            }
            None => self.status_indicator.clear_status(),
        }
    }
}
