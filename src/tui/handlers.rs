// File: src/tui/handlers.rs
// Handles keyboard input for the TUI.
use crate::model::RenameOutcome;
use crate::tui::state::{AppState, InputMode};
use crossterm::event::{KeyCode, KeyEvent};

/// Processes one key event. Returns true when the application should quit.
pub fn handle_key_event(key: KeyEvent, state: &mut AppState) -> bool {
    match state.mode {
        InputMode::Normal => handle_normal_mode(key, state),
        InputMode::Creating | InputMode::Editing => {
            handle_input_mode(key, state);
            false
        }
        InputMode::ConfirmingClear => {
            handle_confirm_clear(key, state);
            false
        }
    }
}

fn handle_normal_mode(key: KeyEvent, state: &mut AppState) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Char('?') => state.show_full_help = !state.show_full_help,
        KeyCode::Char('j') | KeyCode::Down => state.next(),
        KeyCode::Char('k') | KeyCode::Up => state.previous(),
        KeyCode::Char('a') => {
            state.reset_input();
            state.mode = InputMode::Creating;
        }
        KeyCode::Char('e') => {
            if let Some(task) = state.get_selected_task() {
                let id = task.id.clone();
                let text = task.text.clone();
                state.editing_id = Some(id);
                state.input_buffer = text;
                state.cursor_position = state.input_buffer.chars().count();
                state.mode = InputMode::Editing;
            }
        }
        KeyCode::Char(' ') => {
            if let Some(task) = state.get_selected_task() {
                let id = task.id.clone();
                let done = task.completed;
                match state.store.set_completed(&id, !done) {
                    Ok(true) => state.refresh_view(),
                    Ok(false) => {}
                    Err(e) => state.message = format!("Error: {}", e),
                }
            }
        }
        KeyCode::Char('d') => {
            if let Some(task) = state.get_selected_task() {
                let id = task.id.clone();
                match state.store.delete(&id) {
                    Ok(_) => {
                        state.message = "Task deleted.".to_string();
                        state.refresh_view();
                    }
                    Err(e) => state.message = format!("Error: {}", e),
                }
            }
        }
        KeyCode::Char('J') => move_selected(state, 1),
        KeyCode::Char('K') => move_selected(state, -1),
        KeyCode::Char('H') => {
            state.hide_completed = !state.hide_completed;
            state.refresh_view();
        }
        KeyCode::Char('C') => {
            if !state.store.is_empty() {
                if state.confirm_clear {
                    state.mode = InputMode::ConfirmingClear;
                } else {
                    clear_all(state);
                }
            }
        }
        _ => {}
    }
    false
}

fn handle_input_mode(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Enter => {
            let text = state.input_buffer.clone();
            let result = match state.mode {
                InputMode::Creating => match state.store.add(&text) {
                    Ok(Some(_)) => Ok("Task added.".to_string()),
                    // Whitespace-only input: quietly do nothing
                    Ok(None) => Ok(String::new()),
                    Err(e) => Err(e),
                },
                InputMode::Editing => {
                    let id = state.editing_id.take().unwrap_or_default();
                    match state.store.rename(&id, &text) {
                        Ok(RenameOutcome::Renamed) => Ok("Task updated.".to_string()),
                        Ok(RenameOutcome::Deleted) => {
                            Ok("Task removed (text was empty).".to_string())
                        }
                        Ok(RenameOutcome::NotFound) => Ok(String::new()),
                        Err(e) => Err(e),
                    }
                }
                _ => Ok(String::new()),
            };

            match result {
                Ok(msg) => {
                    if !msg.is_empty() {
                        state.message = msg;
                    }
                    state.refresh_view();
                }
                Err(e) => state.message = format!("Error: {}", e),
            }

            state.reset_input();
            state.mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            state.reset_input();
            state.editing_id = None;
            state.mode = InputMode::Normal;
        }
        KeyCode::Backspace => state.delete_char(),
        KeyCode::Left => state.move_cursor_left(),
        KeyCode::Right => state.move_cursor_right(),
        KeyCode::Char(c) => state.enter_char(c),
        _ => {}
    }
}

fn handle_confirm_clear(key: KeyEvent, state: &mut AppState) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            clear_all(state);
            state.mode = InputMode::Normal;
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc | KeyCode::Char('q') => {
            state.mode = InputMode::Normal;
        }
        _ => {}
    }
}

fn clear_all(state: &mut AppState) {
    match state.store.clear() {
        Ok(()) => {
            state.message = "All tasks cleared.".to_string();
            state.refresh_view();
        }
        Err(e) => state.message = format!("Error: {}", e),
    }
}

/// Moves the selected task one position up or down by rebuilding the
/// complete final id ordering and handing it to the store in one call.
///
/// Refused while completed tasks are hidden: the visible ordering would
/// omit the hidden ids, and omitted ids are not retained by a reorder.
fn move_selected(state: &mut AppState, delta: i32) {
    if state.hide_completed {
        state.message = "Disable hide-completed (H) to reorder.".to_string();
        return;
    }
    let Some(task) = state.get_selected_task() else {
        return;
    };
    let id = task.id.clone();

    let mut ids: Vec<String> = state.store.snapshot().into_iter().map(|t| t.id).collect();
    let Some(idx) = ids.iter().position(|i| *i == id) else {
        return;
    };
    let target = idx as i32 + delta;
    if target < 0 || target as usize >= ids.len() {
        return;
    }
    ids.swap(idx, target as usize);

    match state.store.reorder(&ids) {
        Ok(_) => {
            state.refresh_view();
            // Follow the task to its new position
            state.list_state.select(Some(target as usize));
        }
        Err(e) => state.message = format!("Error: {}", e),
    }
}
