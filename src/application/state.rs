//! Application state management for the terminal workout recorder.
//!
//! This module contains the main application state, focus handling and mode
//! management for the terminal user interface.

use crate::domain::{ActivityType, FormField, NumericParsing, WorkoutRecorder};
use tracing::debug;

/// Represents the current mode of the application.
///
/// The mode determines how user input is interpreted and which popups are
/// drawn over the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppMode {
    /// Form entry - typing edits the focused field
    Normal,
    /// A validation notice is displayed and must be dismissed
    Notice,
    /// Help screen is displayed
    Help,
}

/// The form control that currently receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Name,
    Duration,
    Calories,
    ActivityType,
    Submit,
}

impl Focus {
    /// Controls in tab order.
    pub const ORDER: [Focus; 5] = [
        Focus::Name,
        Focus::Duration,
        Focus::Calories,
        Focus::ActivityType,
        Focus::Submit,
    ];

    /// The text field behind this control, if it is one.
    pub fn text_field(self) -> Option<FormField> {
        match self {
            Focus::Name => Some(FormField::Name),
            Focus::Duration => Some(FormField::Duration),
            Focus::Calories => Some(FormField::Calories),
            Focus::ActivityType | Focus::Submit => None,
        }
    }

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn previous(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Main application state containing the recorder and UI state.
///
/// # Examples
///
/// ```
/// use fitlog::application::{App, AppMode, Focus};
///
/// let app = App::default();
/// assert_eq!(app.focus, Focus::Name);
/// assert_eq!(app.mode, AppMode::Normal);
/// assert!(app.recorder.is_empty());
/// ```
#[derive(Debug)]
pub struct App {
    /// Form input and the session's workouts
    pub recorder: WorkoutRecorder,
    /// Control receiving keystrokes
    pub focus: Focus,
    /// Cursor position within the focused text field, in characters
    pub cursor_position: usize,
    /// Current application mode
    pub mode: AppMode,
    /// Message shown in the notice popup
    pub notice: Option<String>,
    /// Temporary status message to display
    pub status_message: Option<String>,
    /// Scroll position in help text
    pub help_scroll: usize,
    /// Help lines that fit in the popup; 0 until the terminal size is known
    pub help_viewport: usize,
    /// Highlighted entry of the workout list
    pub list_selected: Option<usize>,
    /// Set once the user asks to leave
    pub should_quit: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new(NumericParsing::default())
    }
}

impl App {
    pub fn new(parsing: NumericParsing) -> Self {
        Self {
            recorder: WorkoutRecorder::new(parsing),
            focus: Focus::Name,
            cursor_position: 0,
            mode: AppMode::Normal,
            notice: None,
            status_message: None,
            help_scroll: 0,
            help_viewport: 0,
            list_selected: None,
            should_quit: false,
        }
    }

    /// Text of the focused field, if focus is on a text field.
    pub fn focused_text(&self) -> Option<&str> {
        self.focus
            .text_field()
            .map(|field| self.recorder.form().field(field))
    }

    fn focused_len(&self) -> usize {
        self.focused_text().map(|text| text.chars().count()).unwrap_or(0)
    }

    pub fn set_focus(&mut self, focus: Focus) {
        debug!(?focus, "focus changed");
        self.focus = focus;
        self.cursor_position = self.focused_len();
    }

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next());
    }

    pub fn focus_previous(&mut self) {
        self.set_focus(self.focus.previous());
    }

    /// Inserts a character at the cursor of the focused text field.
    ///
    /// Does nothing when focus is on the type selector or the submit control.
    pub fn insert_char(&mut self, c: char) {
        let Some(field) = self.focus.text_field() else {
            return;
        };
        let cursor = self.cursor_position;
        let text = self.recorder.form_mut().field_mut(field);
        let at = byte_index(text, cursor);
        text.insert(at, c);
        self.cursor_position += 1;
    }

    pub fn delete_char_before_cursor(&mut self) {
        if self.cursor_position == 0 {
            return;
        }
        let Some(field) = self.focus.text_field() else {
            return;
        };
        let cursor = self.cursor_position;
        let text = self.recorder.form_mut().field_mut(field);
        let at = byte_index(text, cursor - 1);
        text.remove(at);
        self.cursor_position -= 1;
    }

    pub fn delete_char_at_cursor(&mut self) {
        if self.cursor_position >= self.focused_len() {
            return;
        }
        let Some(field) = self.focus.text_field() else {
            return;
        };
        let cursor = self.cursor_position;
        let text = self.recorder.form_mut().field_mut(field);
        let at = byte_index(text, cursor);
        text.remove(at);
    }

    pub fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.focused_len() {
            self.cursor_position += 1;
        }
    }

    pub fn move_cursor_home(&mut self) {
        self.cursor_position = 0;
    }

    pub fn move_cursor_end(&mut self) {
        self.cursor_position = self.focused_len();
    }

    pub fn select_activity_type(&mut self, activity_type: ActivityType) {
        self.recorder.select_activity_type(activity_type);
    }

    /// Moves the type selection one step, wrapping at either end.
    pub fn cycle_activity_type(&mut self, forward: bool) {
        let current = self.recorder.form().activity_type;
        let next = if forward {
            current.next()
        } else {
            current.previous()
        };
        self.select_activity_type(next);
    }

    /// Submits the form.
    ///
    /// On success the new workout is highlighted in the list, focus returns to
    /// the name field and a status message names the workout. On failure the
    /// form is left as it was and the error is shown in the notice popup.
    pub fn submit(&mut self) {
        let submitted = self.recorder.submit().map(|record| record.name.clone());
        match submitted {
            Ok(name) => {
                self.status_message = Some(format!("Added workout: {name}"));
                self.list_selected = Some(self.recorder.len() - 1);
                self.set_focus(Focus::Name);
            }
            Err(error) => {
                self.notice = Some(error.to_string());
                self.mode = AppMode::Notice;
            }
        }
    }

    /// Closes the notice popup and returns to form entry.
    pub fn dismiss_notice(&mut self) {
        self.notice = None;
        self.mode = AppMode::Normal;
    }

    pub fn open_help(&mut self) {
        self.mode = AppMode::Help;
        self.help_scroll = 0;
    }

    pub fn close_help(&mut self) {
        self.mode = AppMode::Normal;
    }

    pub fn scroll_help_up(&mut self, by: usize) {
        self.help_scroll = self.help_scroll.saturating_sub(by);
    }

    /// Scrolls the help text down, stopping once its last line is in view.
    pub fn scroll_help_down(&mut self, by: usize, total_lines: usize) {
        let last_start = total_lines.saturating_sub(self.help_viewport.max(1));
        self.help_scroll = self.help_scroll.saturating_add(by).min(last_start);
    }

    pub fn scroll_list_up(&mut self, by: usize) {
        if let Some(selected) = self.list_selected {
            self.list_selected = Some(selected.saturating_sub(by));
        }
    }

    pub fn scroll_list_down(&mut self, by: usize) {
        if self.recorder.is_empty() {
            return;
        }
        let last = self.recorder.len() - 1;
        let selected = self.list_selected.map_or(0, |s| s.saturating_add(by));
        self.list_selected = Some(selected.min(last));
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

/// Byte offset of the `chars`-th character, or the end of the string.
fn byte_index(text: &str, chars: usize) -> usize {
    text.char_indices()
        .nth(chars)
        .map(|(i, _)| i)
        .unwrap_or(text.len())
}
