// File: ./src/tui/state.rs
// Manages the application state for the TUI.
use crate::config::Config;
use crate::context::AppContext;
use crate::model::Task;
use crate::store::TaskStore;
use ratatui::widgets::ListState;
use std::sync::Arc;

#[derive(PartialEq, Clone, Copy)]
pub enum InputMode {
    Normal,
    Creating,
    Editing,
    ConfirmingClear,
}

pub struct AppState {
    // Data
    pub ctx: Arc<dyn AppContext>,
    pub store: TaskStore,
    /// Visible snapshot, re-read from the store after every mutation.
    pub tasks: Vec<Task>,

    // UI State
    pub list_state: ListState,
    pub mode: InputMode,
    pub message: String,
    pub show_full_help: bool,

    // Preferences (from config)
    pub confirm_clear: bool,
    pub strikethrough_completed: bool,
    pub hide_completed: bool,

    // Input Buffers
    pub input_buffer: String,
    pub cursor_position: usize,
    /// Id of the task being renamed while in Editing mode.
    pub editing_id: Option<String>,
}

impl AppState {
    /// Creates a new AppState with an explicit AppContext, loading the
    /// persisted task list.
    pub fn new_with_ctx(ctx: Arc<dyn AppContext>, cfg: &Config) -> Self {
        let mut l_state = ListState::default();
        l_state.select(Some(0));

        let store = TaskStore::load(ctx.clone());

        let mut state = Self {
            ctx,
            store,
            tasks: vec![],
            list_state: l_state,
            mode: InputMode::Normal,
            message: "Ready.".to_string(),
            show_full_help: false,

            confirm_clear: cfg.confirm_clear,
            strikethrough_completed: cfg.strikethrough_completed,
            hide_completed: cfg.hide_completed,

            input_buffer: String::new(),
            cursor_position: 0,
            editing_id: None,
        };
        state.refresh_view();
        state
    }

    /// Re-reads the store snapshot and clamps the selection.
    /// Must run after every store mutation; the store makes no
    /// partial-update guarantees.
    pub fn refresh_view(&mut self) {
        let snapshot = self.store.snapshot();
        self.tasks = if self.hide_completed {
            snapshot.into_iter().filter(|t| !t.completed).collect()
        } else {
            snapshot
        };

        let len = self.tasks.len();
        if len == 0 {
            self.list_state.select(None);
        } else {
            let current = self.list_state.selected().unwrap_or(0);
            if current >= len {
                self.list_state.select(Some(len - 1)); // Clamp
            } else {
                self.list_state.select(Some(current));
            }
        }
    }

    pub fn get_selected_task(&self) -> Option<&Task> {
        if let Some(idx) = self.list_state.selected() {
            self.tasks.get(idx)
        } else {
            None
        }
    }

    // --- INPUT HELPERS ---
    pub fn move_cursor_left(&mut self) {
        let cursor_moved_left = self.cursor_position.saturating_sub(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_left);
    }
    pub fn move_cursor_right(&mut self) {
        let cursor_moved_right = self.cursor_position.saturating_add(1);
        self.cursor_position = self.clamp_cursor(cursor_moved_right);
    }
    pub fn enter_char(&mut self, new_char: char) {
        // Safe insertion for UTF-8 strings
        let byte_index = self
            .input_buffer
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor_position)
            .unwrap_or(self.input_buffer.len());

        self.input_buffer.insert(byte_index, new_char);
        self.move_cursor_right();
    }
    pub fn delete_char(&mut self) {
        if self.cursor_position != 0 {
            let current_index = self.cursor_position;
            let before = self.input_buffer.chars().take(current_index - 1);
            let after = self.input_buffer.chars().skip(current_index);
            self.input_buffer = before.chain(after).collect();
            self.move_cursor_left();
        }
    }
    pub fn reset_input(&mut self) {
        self.input_buffer.clear();
        self.cursor_position = 0;
    }
    fn clamp_cursor(&self, new_cursor_pos: usize) -> usize {
        new_cursor_pos.clamp(0, self.input_buffer.chars().count())
    }

    // --- NAVIGATION ---
    pub fn next(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i >= self.tasks.len() - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.tasks.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => {
                if i == 0 {
                    self.tasks.len() - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.list_state.select(Some(i));
    }
}
