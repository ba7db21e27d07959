use crate::{App, AppState};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const SCROLL_STEP: u16 = 1;
const PAGE_STEP: u16 = 10;

/// Enter, or the carriage return character (code 13). Modifiers don't matter,
/// so Shift+Enter submits too.
pub fn is_submit_key(key: &KeyEvent) -> bool {
    matches!(key.code, KeyCode::Enter | KeyCode::Char('\r'))
}

pub async fn handle_key(key: KeyEvent, app: &mut App) {
    match app.state {
        AppState::Chat => handle_chat_input(key, app).await,
        AppState::FilePicker => handle_picker_input(key, app),
        AppState::QuitConfirm => handle_quit_confirm_input(key, app),
        AppState::Quit => {}
    }
}

pub async fn handle_chat_input(key: KeyEvent, app: &mut App) {
    if is_submit_key(&key) {
        // The reply task renders on its own; nothing to wait for here.
        let _ = app.dispatcher.send_message(&mut app.input).await;
        return;
    }

    match key.code {
        KeyCode::Esc => app.state = AppState::QuitConfirm,
        KeyCode::PageUp => app.chat_log.lock().await.scroll_up(PAGE_STEP),
        KeyCode::PageDown => app.chat_log.lock().await.scroll_down(PAGE_STEP),
        KeyCode::Up => app.chat_log.lock().await.scroll_up(SCROLL_STEP),
        KeyCode::Down => app.chat_log.lock().await.scroll_down(SCROLL_STEP),
        KeyCode::End => app.chat_log.lock().await.scroll_to_bottom(),
        KeyCode::Backspace => {
            app.input.pop();
        }
        KeyCode::Char(c) => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                match c {
                    'c' => app.state = AppState::QuitConfirm,
                    'o' => {
                        app.file_picker.update_visible_nodes();
                        app.state = AppState::FilePicker;
                    }
                    'u' => {
                        let _ = app.dispatcher.upload_file(app.selected_file.clone()).await;
                    }
                    _ => {}
                }
            } else {
                app.input.push(c);
            }
        }
        _ => {}
    }
}

pub fn handle_picker_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Esc => app.state = AppState::Chat,
        KeyCode::Up => app.file_picker.move_selection_up(),
        KeyCode::Down => app.file_picker.move_selection_down(),
        KeyCode::Left => app.file_picker.collapse_selected(),
        KeyCode::Right => app.file_picker.expand_selected(),
        _ if is_submit_key(&key) => {
            if let Some(path) = app.file_picker.activate() {
                app.select_file(path);
                app.state = AppState::Chat;
            }
        }
        _ => {}
    }
}

pub fn handle_quit_confirm_input(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Enter => {
            app.state = AppState::Quit;
        }
        KeyCode::Char('n') | KeyCode::Esc => {
            app.state = AppState::Chat;
        }
        _ => {}
    }
}
