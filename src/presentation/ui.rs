use crate::application::{App, AppMode, Focus};
use crate::domain::{ActivityType, FormField};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};

const ACCENT: Color = Color::Magenta;

pub fn render_ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    render_header(f, chunks[0]);
    render_input(f, app, FormField::Name, chunks[1]);
    render_input(f, app, FormField::Duration, chunks[2]);
    render_input(f, app, FormField::Calories, chunks[3]);
    render_type_selector(f, app, chunks[4]);
    render_submit(f, app, chunks[5]);
    render_workout_list(f, app, chunks[6]);
    render_status_bar(f, app, chunks[7]);

    match app.mode {
        AppMode::Notice => render_notice_popup(f, app.notice.as_deref().unwrap_or_default()),
        AppMode::Help => render_help_popup(f, app.help_scroll),
        AppMode::Normal => {}
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new("Fitness Tracker")
        .alignment(Alignment::Center)
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));
    f.render_widget(header, area);
}

fn focus_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    }
}

fn render_input(f: &mut Frame, app: &App, field: FormField, area: Rect) {
    let focused = app.focus.text_field() == Some(field);
    let value = app.recorder.form().field(field);

    let content = if value.is_empty() {
        Span::styled(field.label(), Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(value)
    };

    let inner_width = area.width.saturating_sub(2);
    let cursor = if focused { app.cursor_position } else { 0 };
    let (scroll, cursor_column) = input_viewport(value, cursor, inner_width);

    let input = Paragraph::new(Line::from(content))
        .scroll((0, scroll))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_border(focused))
                .title(field.label()),
        );
    f.render_widget(input, area);

    if focused && matches!(app.mode, AppMode::Normal) {
        let x = area.x.saturating_add(1).saturating_add(cursor_column);
        f.set_cursor_position(Position::new(x, area.y + 1));
    }
}

/// Horizontal scroll and cursor column for a one-line input `width` cells
/// wide, measured in display cells so wide characters count double.
pub fn input_viewport(text: &str, cursor: usize, width: u16) -> (u16, u16) {
    if width == 0 {
        return (0, 0);
    }
    let before: String = text.chars().take(cursor).collect();
    let cursor_cells = u16::try_from(Span::raw(before).width()).unwrap_or(u16::MAX);
    let scroll = cursor_cells.saturating_sub(width - 1);
    (scroll, cursor_cells - scroll)
}

fn render_type_selector(f: &mut Frame, app: &App, area: Rect) {
    let selected = app.recorder.form().activity_type;
    let mut spans = Vec::with_capacity(ActivityType::ALL.len() * 2);
    for (i, activity_type) in ActivityType::ALL.into_iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        let (marker, style) = if activity_type == selected {
            (
                "(x)",
                Style::default()
                    .fg(Color::White)
                    .bg(ACCENT)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            ("( )", Style::default().fg(ACCENT))
        };
        spans.push(Span::styled(
            format!("{} {} {}", i + 1, marker, activity_type),
            style,
        ));
    }

    let selector = Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(focus_border(app.focus == Focus::ActivityType))
            .title("Workout Type"),
    );
    f.render_widget(selector, area);
}

fn render_submit(f: &mut Frame, app: &App, area: Rect) {
    let mut style = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    if app.focus == Focus::Submit {
        style = style.add_modifier(Modifier::REVERSED);
    }
    let button = Paragraph::new("[ Add Workout ]")
        .alignment(Alignment::Center)
        .style(style)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_border(app.focus == Focus::Submit)),
        );
    f.render_widget(button, area);
}

fn render_workout_list(f: &mut Frame, app: &App, area: Rect) {
    let totals = app.recorder.totals();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(
            "Workout List ({} | {} min | {} kcal)",
            totals.count, totals.minutes, totals.calories
        ))
        .title_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));

    if app.recorder.is_empty() {
        let empty = Paragraph::new("No workouts added yet.")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = app
        .recorder
        .records()
        .iter()
        .map(|record| {
            let mut lines: Vec<Line> = record
                .display_lines()
                .into_iter()
                .map(Line::from)
                .collect();
            lines.push(Line::default());
            ListItem::new(Text::from(lines))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));
    let mut state = ListState::default().with_selected(app.list_selected);
    f.render_stateful_widget(list, area, &mut state);
}

fn render_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let status_text = match app.mode {
        AppMode::Normal => app.status_message.clone().unwrap_or_else(|| {
            "Tab/↑↓: move | Enter: add workout | ←→/1-3: workout type | PgUp/PgDn: list | F1: help | Esc: quit".to_string()
        }),
        AppMode::Notice => "Enter/Esc: dismiss".to_string(),
        AppMode::Help => "↑↓/jk: scroll | Home: top | Esc/q: close help".to_string(),
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(match app.mode {
            AppMode::Normal => Style::default(),
            AppMode::Notice => Style::default().fg(Color::Red),
            AppMode::Help => Style::default().fg(Color::Cyan),
        });
    f.render_widget(status, area);
}

fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

const NOTICE_WIDTH: u16 = 50;

fn render_notice_popup(f: &mut Frame, message: &str) {
    // wrapped message, one spare line for word breaks, blank, hint, borders
    let inner_width = usize::from(NOTICE_WIDTH - 2);
    let message_lines = Span::raw(message).width().div_ceil(inner_width).max(1);
    let height = u16::try_from(message_lines + 5).unwrap_or(u16::MAX);
    let popup_area = centered_rect(f.area(), NOTICE_WIDTH, height);
    f.render_widget(Clear, popup_area);

    let text = Text::from(vec![
        Line::from(message.to_string()),
        Line::default(),
        Line::styled("Press Enter to continue", Style::default().fg(Color::DarkGray)),
    ]);
    let notice = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Notice")
                .border_style(Style::default().fg(Color::Red)),
        );
    f.render_widget(notice, popup_area);
}

fn render_help_popup(f: &mut Frame, scroll: usize) {
    let area = f.area();
    let popup_area = Rect {
        x: area.width / 10,
        y: area.height / 10,
        width: area.width * 4 / 5,
        height: area.height * 4 / 5,
    };

    f.render_widget(Clear, popup_area);

    let help_lines: Vec<&str> = HELP_TEXT.lines().collect();
    let visible_height = help_visible_height(area.height);

    let start_line = scroll.min(help_lines.len().saturating_sub(visible_height));
    let end_line = (start_line + visible_height).min(help_lines.len());

    let visible_text = help_lines[start_line..end_line].join("\n");

    let help_widget = Paragraph::new(visible_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(
                    "fitlog Help (Line {}/{})",
                    start_line + 1,
                    help_lines.len()
                ))
                .style(Style::default().fg(Color::Cyan)),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(help_widget, popup_area);
}

/// Help lines visible in the popup on a terminal `height` rows tall.
pub fn help_visible_height(height: u16) -> usize {
    usize::from((height * 4 / 5).saturating_sub(2))
}

pub fn help_line_count() -> usize {
    HELP_TEXT.lines().count()
}

const HELP_TEXT: &str = r#"FITLOG - TERMINAL WORKOUT RECORDER

=== LOGGING A WORKOUT ===
1. Type a name in "Workout Name"
2. Enter the duration in minutes
3. Enter the calories burned
4. Pick a workout type: Cardio, Strength or Flexibility
5. Press Enter to add the workout to the list

All three text fields are required. Whitespace counts as input.
The workout type stays selected after each added workout.

=== NUMBERS ===
Duration and calories are whole, non-negative numbers.
By default leading digits are used and trailing text is ignored:
  30min  → 30
  abc    → rejected
Start with --strict-numbers to reject anything but digits.

=== FORM KEYS ===
Tab / ↓         Next control
Shift+Tab / ↑   Previous control
←/→             Move cursor, or change type on the type selector
1 / 2 / 3       Select Cardio / Strength / Flexibility (type selector)
Home / End      Jump to start / end of the field
Backspace/Del   Delete characters
Enter           Add workout
PgUp / PgDn     Move through the workout list
F1              Show this help
Esc / Ctrl+Q    Quit

=== HELP NAVIGATION ===
↑↓ or j/k       Scroll help text up/down one line
Page Up/Down    Scroll help text up/down 5 lines
Home            Jump to top of help text
Esc/F1/q        Close this help window

Workouts live for this session only. Use --dump-json to print
them when you quit."#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::App;
    use crate::domain::ActivityType;
    use ratatui::{backend::TestBackend, buffer::Buffer, Terminal};

    fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();
        terminal.draw(|f| render_ui(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn add_workout(app: &mut App, name: &str, duration: &str, calories: &str) {
        app.recorder.set_name(name);
        app.recorder.set_duration(duration);
        app.recorder.set_calories(calories);
        app.submit();
    }

    #[test]
    fn test_empty_list_shows_placeholder() {
        let app = App::default();
        let screen = draw(&app);
        assert!(screen.contains("Fitness Tracker"));
        assert!(screen.contains("No workouts added yet."));
        assert!(!screen.contains("Type: "));
    }

    #[test]
    fn test_one_submission_replaces_placeholder_with_one_item() {
        let mut app = App::default();
        add_workout(&mut app, "Run", "30", "250");

        let screen = draw(&app);
        assert!(!screen.contains("No workouts added yet."));
        assert_eq!(screen.matches("Type: ").count(), 1);
        assert!(screen.contains("Name: Run"));
        assert!(screen.contains("Duration: 30 minutes"));
        assert!(screen.contains("Calories: 250"));
        assert!(screen.contains("Type: Cardio"));
        assert!(screen.contains("Workout List (1 | 30 min | 250 kcal)"));
    }

    #[test]
    fn test_records_render_in_insertion_order() {
        let mut app = App::default();
        add_workout(&mut app, "Zumba", "20", "180");
        app.select_activity_type(ActivityType::Strength);
        add_workout(&mut app, "Bench", "15", "90");

        let screen = draw(&app);
        let first = screen.find("Name: Zumba").unwrap();
        let second = screen.find("Name: Bench").unwrap();
        assert!(first < second);
        assert!(screen.contains("Type: Strength"));
    }

    #[test]
    fn test_empty_inputs_show_placeholders() {
        let app = App::default();
        let screen = draw(&app);
        assert!(screen.contains("Duration (minutes)"));
        assert!(screen.contains("Calories Burned"));
        assert!(screen.contains("[ Add Workout ]"));
    }

    #[test]
    fn test_selected_type_is_marked() {
        let mut app = App::default();
        app.select_activity_type(ActivityType::Flexibility);
        let screen = draw(&app);
        assert!(screen.contains("(x) Flexibility"));
        assert!(screen.contains("( ) Cardio"));
        assert!(screen.contains("( ) Strength"));
    }

    #[test]
    fn test_notice_popup_shows_validation_message() {
        let mut app = App::default();
        add_workout(&mut app, "", "10", "100");

        let screen = draw(&app);
        assert!(screen.contains("Notice"));
        assert!(screen.contains("Please fill in all fields"));
        assert!(screen.contains("Enter/Esc: dismiss"));
        assert!(app.recorder.is_empty());
    }

    #[test]
    fn test_long_invalid_input_keeps_reason_and_hint_visible() {
        let mut app = App::default();
        app.recorder.set_name("Swim");
        app.recorder.set_duration("x".repeat(300));
        app.recorder.set_calories("100");
        app.submit();

        let screen = draw(&app);
        assert!(screen.contains("not a number"));
        assert!(screen.contains("Press Enter to continue"));
    }

    #[test]
    fn test_input_viewport_counts_display_cells() {
        assert_eq!(input_viewport("", 0, 20), (0, 0));
        assert_eq!(input_viewport("Run", 3, 20), (0, 3));
        assert_eq!(input_viewport("日本語", 2, 20), (0, 4));
        assert_eq!(input_viewport("abc", 1, 0), (0, 0));
    }

    #[test]
    fn test_input_viewport_scrolls_long_text() {
        let text = "a".repeat(60);
        assert_eq!(input_viewport(&text, 60, 10), (51, 9));
        assert_eq!(input_viewport(&text, 5, 10), (0, 5));
    }

    #[test]
    fn test_long_name_scrolls_to_cursor() {
        let mut app = App::default();
        let name = format!("{}END", "w".repeat(120));
        app.recorder.set_name(name);
        app.set_focus(crate::application::Focus::Name);

        let screen = draw(&app);
        assert!(screen.contains("wwwEND"));
    }

    #[test]
    fn test_help_popup_renders() {
        let mut app = App::default();
        app.open_help();
        let screen = draw(&app);
        assert!(screen.contains("fitlog Help (Line 1/"));
    }
}
