use super::app::{App, BoatScreen, Focus, LoginScreen, Screen};
use crate::core::Selection;
use crate::session::{BoatForm, LoginState, NoticeLevel, entries};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};
use std::time::Instant;

pub fn draw(f: &mut Frame, app: &mut App) {
    match &mut app.screen {
        Screen::Login(login) => draw_login(f, login),
        Screen::Loading => draw_message(f, " Boats ", "Loading boats...", Color::Cyan),
        Screen::Failed(message) => draw_message(f, " Error ", message, Color::Red),
        Screen::Boats(boats) => draw_boats(f, boats),
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

fn draw_message(f: &mut Frame, title: &str, message: &str, color: Color) {
    let area = centered(f.area(), 60, 5);
    let paragraph = Paragraph::new(vec![
        Line::from(Span::styled(message.to_string(), Style::default().fg(color))),
        Line::from(Span::styled(
            "Esc to quit",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title(title.to_string()));

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn draw_login(f: &mut Frame, login: &LoginScreen) {
    let area = centered(f.area(), 60, 12);
    let outer = Block::default()
        .borders(Borders::ALL)
        .title(" Boathouse login ");
    let inner = outer.inner(area);
    f.render_widget(Clear, area);
    f.render_widget(outer, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Username
            Constraint::Length(3), // Password
            Constraint::Min(1),    // Status
        ])
        .split(inner);

    f.render_widget(&login.username_input, chunks[0]);
    f.render_widget(&login.password_input, chunks[1]);

    let status = match (login.flow.state(), login.message.as_deref()) {
        (LoginState::Busy, _) => Line::from(Span::styled(
            "Signing in...",
            Style::default().fg(Color::Yellow),
        )),
        (_, Some(message)) => Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::Red),
        )),
        (_, None) => Line::from(Span::styled(
            "Enter to sign in, Tab to switch field, Esc to quit",
            Style::default().fg(Color::DarkGray),
        )),
    };
    f.render_widget(Paragraph::new(status).wrap(Wrap { trim: true }), chunks[2]);
}

fn draw_boats(f: &mut Frame, screen: &mut BoatScreen) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(8),    // List and form
            Constraint::Length(3), // Notification
            Constraint::Length(1), // Key hints
        ])
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[0]);

    draw_list(f, screen, columns[0]);
    draw_form(f, screen, columns[1]);
    draw_notification(f, screen, rows[1]);

    let hints = Paragraph::new(Line::from(Span::styled(
        "Tab focus  Enter select  Ctrl+S save  Ctrl+R reset  Ctrl+D delete  Esc quit",
        Style::default().fg(Color::DarkGray),
    )));
    f.render_widget(hints, rows[2]);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn draw_list(f: &mut Frame, screen: &BoatScreen, area: Rect) {
    let items: Vec<ListItem> = entries(screen.controller.boats(), screen.selection())
        .into_iter()
        .map(|entry| {
            let style = if entry.active {
                Style::default().add_modifier(Modifier::BOLD).fg(Color::Green)
            } else if entry.boat.is_none() {
                Style::default().add_modifier(Modifier::ITALIC)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(entry.label.to_string(), style)))
        })
        .collect();

    let mut state = ListState::default();
    state.select(Some(screen.list.cursor()));

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focus_style(screen.focus == Focus::List))
                .title(" Boats "),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    f.render_stateful_widget(list, area, &mut state);
}

fn form_title(selection: &Selection, busy: bool) -> String {
    let title = match selection {
        Selection::Draft(_) => " New boat ".to_string(),
        Selection::Record(boat) => format!(" Boat #{} ", boat.id),
    };
    if busy {
        format!("{title}(working...) ")
    } else {
        title
    }
}

fn button(label: &str, key: &str, enabled: bool) -> Span<'static> {
    let style = if enabled {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    Span::styled(format!(" {key} {label} "), style)
}

fn draw_form(f: &mut Frame, screen: &BoatScreen, area: Rect) {
    let selection = screen.selection();
    let form = &screen.form;

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(focus_style(screen.focus == Focus::Form))
        .title(form_title(selection, form.is_busy()));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(3), // Description
            Constraint::Length(1), // Buttons
            Constraint::Min(0),
        ])
        .split(inner);

    f.render_widget(&screen.name_input, chunks[0]);
    f.render_widget(&screen.description_input, chunks[1]);

    let buttons = Line::from(vec![
        button(
            BoatForm::save_label(selection),
            "Ctrl+S",
            form.can_save(selection),
        ),
        Span::raw(" "),
        button("Reset", "Ctrl+R", form.can_reset(selection)),
        Span::raw(" "),
        button("Delete", "Ctrl+D", form.can_delete(selection)),
    ]);
    f.render_widget(Paragraph::new(buttons), chunks[2]);
}

fn draw_notification(f: &mut Frame, screen: &mut BoatScreen, area: Rect) {
    let notifications = screen.controller.notifications_mut();
    let waiting = notifications.len().saturating_sub(1);
    let Some(notice) = notifications.current(Instant::now()) else {
        return;
    };

    let color = match notice.level {
        NoticeLevel::Success => Color::Green,
        NoticeLevel::Failure => Color::Red,
    };
    let mut spans = vec![Span::styled(
        notice.message.clone(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if waiting > 0 {
        spans.push(Span::styled(
            format!("  (+{waiting})"),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let toast = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(color)));
    f.render_widget(toast, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::config::Credentials;
    use crate::core::Boat;
    use crate::session::testing::{ScriptedFactory, ScriptedTransport};
    use crate::session::{Notice, SessionController};
    use ratatui::{Terminal, backend::TestBackend};

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 24)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn login_app() -> App<'static> {
        App::new(
            ScriptedFactory::new(ScriptedTransport::new()),
            Credentials::new("admin", "hunter2"),
        )
    }

    fn boat_app() -> App<'static> {
        let controller = SessionController::with_boats(
            ScriptedTransport::new(),
            vec![Boat::new(2, "Bravo", "second"), Boat::new(1, "Alpha", "first")],
        );
        let mut app = login_app();
        app.screen = Screen::Boats(Box::new(BoatScreen::new(controller)));
        app
    }

    #[test]
    fn test_login_masks_password() {
        let mut app = login_app();
        let screen = render(&mut app);

        assert!(screen.contains("Boathouse login"));
        assert!(screen.contains("admin"));
        assert!(!screen.contains("hunter2"));
        assert!(screen.contains("*******"));
    }

    #[test]
    fn test_login_message_is_rendered() {
        let mut app = login_app();
        if let Screen::Login(login) = &mut app.screen {
            login.message = Some("Invalid username or password".into());
        }
        assert!(render(&mut app).contains("Invalid username or password"));
    }

    #[test]
    fn test_boat_screen_lists_entries_in_order() {
        let mut app = boat_app();
        let screen = render(&mut app);

        let new_entry = screen.find("New boat...").unwrap();
        let alpha = screen.find("Alpha").unwrap();
        let bravo = screen.find("Bravo").unwrap();
        assert!(new_entry < alpha && alpha < bravo);
        assert!(screen.contains("Create"));
    }

    #[test]
    fn test_notification_toast() {
        let mut app = boat_app();
        if let Screen::Boats(boats) = &mut app.screen {
            boats
                .controller
                .notifications_mut()
                .push(Notice::success("Boat created successfully"));
            boats
                .controller
                .notifications_mut()
                .push(Notice::failure("Operation failed: boom"));
        }

        let screen = render(&mut app);
        assert!(screen.contains("Boat created successfully"));
        assert!(screen.contains("(+1)"));
        assert!(!screen.contains("boom"));
    }

    #[test]
    fn test_failed_and_loading_screens() {
        let mut app = login_app();
        app.screen = Screen::Loading;
        assert!(render(&mut app).contains("Loading boats..."));

        app.screen = Screen::Failed("Operation failed: Network error: refused".into());
        assert!(render(&mut app).contains("Operation failed"));
    }
}
