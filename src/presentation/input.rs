use crate::application::{App, AppMode, Focus};
use crate::domain::ActivityType;
use crossterm::event::{KeyCode, KeyModifiers};

use super::ui::help_line_count;

const LIST_PAGE: usize = 3;

pub struct InputHandler;

impl InputHandler {
    pub fn handle_key_event(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key, KeyCode::Char('q') | KeyCode::Char('c'))
        {
            app.quit();
            return;
        }

        match app.mode {
            AppMode::Normal => Self::handle_normal_mode(app, key, modifiers),
            AppMode::Notice => Self::handle_notice_mode(app, key),
            AppMode::Help => Self::handle_help_mode(app, key),
        }
    }

    fn handle_normal_mode(app: &mut App, key: KeyCode, modifiers: KeyModifiers) {
        if modifiers.contains(KeyModifiers::CONTROL) {
            return;
        }

        // Any further interaction replaces the last status message
        app.status_message = None;

        match key {
            KeyCode::Tab | KeyCode::Down => app.focus_next(),
            KeyCode::BackTab | KeyCode::Up => app.focus_previous(),
            KeyCode::Enter => app.submit(),
            KeyCode::F(1) => app.open_help(),
            KeyCode::Esc => app.quit(),
            KeyCode::PageUp => app.scroll_list_up(LIST_PAGE),
            KeyCode::PageDown => app.scroll_list_down(LIST_PAGE),
            _ => match app.focus {
                Focus::ActivityType => Self::handle_type_selector(app, key),
                Focus::Submit => {
                    if key == KeyCode::Char(' ') {
                        app.submit();
                    }
                }
                Focus::Name | Focus::Duration | Focus::Calories => {
                    Self::handle_text_field(app, key)
                }
            },
        }
    }

    fn handle_text_field(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Backspace => app.delete_char_before_cursor(),
            KeyCode::Delete => app.delete_char_at_cursor(),
            KeyCode::Left => app.move_cursor_left(),
            KeyCode::Right => app.move_cursor_right(),
            KeyCode::Home => app.move_cursor_home(),
            KeyCode::End => app.move_cursor_end(),
            KeyCode::Char(c) => app.insert_char(c),
            _ => {}
        }
    }

    fn handle_type_selector(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Left | KeyCode::Char('h') => app.cycle_activity_type(false),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                app.cycle_activity_type(true)
            }
            KeyCode::Char(c) => {
                let selected = c
                    .to_digit(10)
                    .and_then(|digit| (digit as usize).checked_sub(1))
                    .and_then(ActivityType::from_index);
                if let Some(activity_type) = selected {
                    app.select_activity_type(activity_type);
                }
            }
            _ => {}
        }
    }

    fn handle_notice_mode(app: &mut App, key: KeyCode) {
        if matches!(key, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            app.dismiss_notice();
        }
    }

    fn handle_help_mode(app: &mut App, key: KeyCode) {
        match key {
            KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => {
                app.close_help();
            }
            KeyCode::Up | KeyCode::Char('k') => {
                app.scroll_help_up(1);
            }
            KeyCode::Down | KeyCode::Char('j') => {
                app.scroll_help_down(1, help_line_count());
            }
            KeyCode::PageUp => {
                app.scroll_help_up(5);
            }
            KeyCode::PageDown => {
                app.scroll_help_down(5, help_line_count());
            }
            KeyCode::Home => {
                app.help_scroll = 0;
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::{App, AppMode, Focus};

    fn press(app: &mut App, key: KeyCode) {
        InputHandler::handle_key_event(app, key, KeyModifiers::NONE);
    }

    fn type_str(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_full_form_via_keys() {
        let mut app = App::default();

        type_str(&mut app, "Run");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "30");
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "250");
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focus, Focus::ActivityType);
        press(&mut app, KeyCode::Char('2'));
        press(&mut app, KeyCode::Enter);

        assert_eq!(app.recorder.len(), 1);
        let record = &app.recorder.records()[0];
        assert_eq!(record.name, "Run");
        assert_eq!(record.duration_minutes, 30);
        assert_eq!(record.calories_burned, 250);
        assert_eq!(record.activity_type, ActivityType::Strength);
        assert_eq!(app.focus, Focus::Name);
    }

    #[test]
    fn test_q_is_text_not_quit() {
        let mut app = App::default();
        type_str(&mut app, "Squats");
        assert_eq!(app.recorder.form().name, "Squats");
        assert!(!app.should_quit);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = App::default();
        InputHandler::handle_key_event(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);

        let mut app = App::default();
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
    }

    #[test]
    fn test_type_selector_arrows_and_digits() {
        let mut app = App::default();
        app.set_focus(Focus::ActivityType);

        press(&mut app, KeyCode::Right);
        assert_eq!(app.recorder.form().activity_type, ActivityType::Strength);
        press(&mut app, KeyCode::Left);
        press(&mut app, KeyCode::Left);
        assert_eq!(app.recorder.form().activity_type, ActivityType::Flexibility);
        press(&mut app, KeyCode::Char('1'));
        assert_eq!(app.recorder.form().activity_type, ActivityType::Cardio);
        press(&mut app, KeyCode::Char('9'));
        assert_eq!(app.recorder.form().activity_type, ActivityType::Cardio);
    }

    #[test]
    fn test_digits_in_text_field_are_text() {
        let mut app = App::default();
        app.set_focus(Focus::Duration);
        type_str(&mut app, "12");
        assert_eq!(app.recorder.form().duration, "12");
        assert_eq!(app.recorder.form().activity_type, ActivityType::Cardio);
    }

    #[test]
    fn test_invalid_submit_opens_and_dismisses_notice() {
        let mut app = App::default();
        press(&mut app, KeyCode::Tab);
        type_str(&mut app, "10");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, AppMode::Notice);

        // typing while the notice is up does not reach the form
        type_str(&mut app, "x");
        assert_eq!(app.recorder.form().duration, "10");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, AppMode::Normal);
        assert!(!app.should_quit);
        assert_eq!(app.recorder.form().duration, "10");
        assert!(app.recorder.is_empty());
    }

    #[test]
    fn test_space_on_submit_control() {
        let mut app = App::default();
        app.recorder.set_name("Plank");
        app.recorder.set_duration("5");
        app.recorder.set_calories("20");
        app.set_focus(Focus::Submit);
        press(&mut app, KeyCode::Char(' '));
        assert_eq!(app.recorder.len(), 1);
    }

    #[test]
    fn test_help_navigation() {
        let mut app = App::default();
        press(&mut app, KeyCode::F(1));
        assert_eq!(app.mode, AppMode::Help);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::PageDown);
        assert_eq!(app.help_scroll, 6);
        press(&mut app, KeyCode::Up);
        assert_eq!(app.help_scroll, 5);
        press(&mut app, KeyCode::Home);
        assert_eq!(app.help_scroll, 0);

        press(&mut app, KeyCode::Char('q'));
        assert_eq!(app.mode, AppMode::Normal);
        assert!(!app.should_quit);
    }

    #[test]
    fn test_help_overscroll_then_up_moves_view() {
        use crate::presentation::{help_visible_height, render_ui};
        use ratatui::{backend::TestBackend, Terminal};

        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        let mut app = App::default();
        app.help_viewport = help_visible_height(40);
        press(&mut app, KeyCode::F(1));

        let mut help_title = |app: &App| {
            terminal.draw(|f| render_ui(f, app)).unwrap();
            let buffer = terminal.backend().buffer();
            let width = buffer.area.width as usize;
            buffer
                .content
                .chunks(width)
                .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
                .find(|row| row.contains("fitlog Help (Line"))
                .unwrap()
        };

        for _ in 0..50 {
            press(&mut app, KeyCode::Down);
        }
        let bottom = help_title(&app);
        assert_eq!(app.help_scroll, help_line_count() - app.help_viewport);

        press(&mut app, KeyCode::Up);
        let after_up = help_title(&app);
        assert_ne!(bottom, after_up);
    }

    #[test]
    fn test_quit_chord_works_in_every_mode() {
        let mut app = App::default();
        app.submit();
        assert_eq!(app.mode, AppMode::Notice);
        InputHandler::handle_key_event(&mut app, KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(app.should_quit);

        let mut app = App::default();
        app.open_help();
        InputHandler::handle_key_event(&mut app, KeyCode::Char('q'), KeyModifiers::CONTROL);
        assert!(app.should_quit);
    }

    #[test]
    fn test_status_message_cleared_on_next_key() {
        let mut app = App::default();
        app.status_message = Some("Added workout: Run".to_string());
        press(&mut app, KeyCode::Char('a'));
        assert!(app.status_message.is_none());
    }
}
