use super::ui;
use crate::connection::config::Credentials;
use crate::connection::{Transport, TransportFactory};
use crate::core::{ClientError, Selection};
use crate::session::{
    BoatForm, BoatList, FormField, Intent, LoginFlow, LoginState, Notice, SessionController,
    UNAUTHORIZED_MESSAGE,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::{Backend, CrosstermBackend},
    style::{Modifier, Style},
    widgets::{Block, Borders},
};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::error;
use tui_textarea::{CursorMove, TextArea};

const TICK: Duration = Duration::from_millis(250);

/// Shown when the store rejects a save because a field is blank
pub const REQUIRED_MESSAGE: &str = "Name and description are required";

/// Work the event loop has to await after a key press
pub enum Action {
    Quit,
    Login(Credentials),
    Load(Arc<dyn Transport>),
    Dispatch(Intent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Username,
    Password,
}

pub struct LoginScreen<'a> {
    pub flow: LoginFlow,
    pub focus: LoginField,
    pub message: Option<String>,
    pub username_input: TextArea<'a>,
    pub password_input: TextArea<'a>,
}

impl LoginScreen<'_> {
    pub fn new(flow: LoginFlow) -> Self {
        let username_input = text_input(" Username ", flow.username());
        let mut password_input = text_input(" Password ", flow.password());
        password_input.set_mask_char('*');

        let mut screen = Self {
            flow,
            focus: LoginField::Username,
            message: None,
            username_input,
            password_input,
        };
        screen.refresh_cursors();
        screen
    }

    fn refresh_cursors(&mut self) {
        set_focused(&mut self.username_input, self.focus == LoginField::Username);
        set_focused(&mut self.password_input, self.focus == LoginField::Password);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.flow.state() == LoginState::Busy {
            return None;
        }

        match key.code {
            KeyCode::Esc => return Some(Action::Quit),
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.focus = match self.focus {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
                self.refresh_cursors();
            }
            KeyCode::Enter => {
                self.message = None;
                return self.flow.begin().map(Action::Login);
            }
            _ => match self.focus {
                LoginField::Username => {
                    self.username_input.input(key);
                    self.flow.set_username(single_line(&self.username_input));
                }
                LoginField::Password => {
                    self.password_input.input(key);
                    self.flow.set_password(single_line(&self.password_input));
                }
            },
        }
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    List,
    Form,
}

pub struct BoatScreen<'a> {
    pub controller: SessionController,
    pub form: BoatForm,
    pub list: BoatList,
    pub focus: Focus,
    pub field: FormField,
    pub name_input: TextArea<'a>,
    pub description_input: TextArea<'a>,
}

impl BoatScreen<'_> {
    pub fn new(controller: SessionController) -> Self {
        let form = BoatForm::new(controller.selection_key(), controller.selection());
        let mut list = BoatList::new();
        list.follow(controller.boats(), controller.selection());

        let mut screen = Self {
            name_input: text_input(" Name ", form.name()),
            description_input: text_input(" Description ", form.description()),
            controller,
            form,
            list,
            focus: Focus::List,
            field: FormField::Name,
        };
        screen.refresh_cursors();
        screen
    }

    pub fn selection(&self) -> &Selection {
        self.controller.selection()
    }

    fn reseed_inputs(&mut self) {
        self.name_input = text_input(" Name ", self.form.name());
        self.description_input = text_input(" Description ", self.form.description());
        self.refresh_cursors();
    }

    fn refresh_cursors(&mut self) {
        let in_form = self.focus == Focus::Form;
        set_focused(&mut self.name_input, in_form && self.field == FormField::Name);
        set_focused(
            &mut self.description_input,
            in_form && self.field == FormField::Description,
        );
    }

    fn focus_form(&mut self, field: FormField) {
        self.focus = Focus::Form;
        self.field = field;
        self.refresh_cursors();
    }

    fn focus_list(&mut self) {
        self.focus = Focus::List;
        self.list
            .follow(self.controller.boats(), self.controller.selection());
        self.refresh_cursors();
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        if self.form.is_busy() {
            return None;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return Some(Action::Quit),
            KeyCode::Char('s') if ctrl => return self.save(),
            KeyCode::Char('r') if ctrl => {
                if self.form.reset(self.controller.selection()) {
                    self.reseed_inputs();
                }
                return None;
            }
            KeyCode::Char('d') if ctrl => {
                return self
                    .form
                    .delete(self.controller.selection())
                    .map(Action::Dispatch);
            }
            _ => {}
        }

        match self.focus {
            Focus::List => self.handle_list_key(key),
            Focus::Form => self.handle_form_key(key),
        }
    }

    fn save(&mut self) -> Option<Action> {
        let selection = self.controller.selection();
        match self.form.save(selection) {
            Some(intent) => Some(Action::Dispatch(intent)),
            None => {
                if self.form.can_save(selection) && !self.form.is_complete() {
                    self.controller
                        .notifications_mut()
                        .push(Notice::failure(REQUIRED_MESSAGE));
                }
                None
            }
        }
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::Tab => self.focus_form(FormField::Name),
            KeyCode::BackTab => self.focus_form(FormField::Description),
            KeyCode::Up => self.list.move_up(),
            KeyCode::Down => self.list.move_down(self.controller.boats()),
            KeyCode::Home => self.list.home(),
            KeyCode::End => self.list.end(self.controller.boats()),
            KeyCode::Enter => {
                let intent = self.list.activate(self.controller.boats());
                return Some(Action::Dispatch(intent));
            }
            _ => {}
        }
        None
    }

    fn handle_form_key(&mut self, key: KeyEvent) -> Option<Action> {
        match (key.code, self.field) {
            (KeyCode::Tab, FormField::Name) | (KeyCode::BackTab, FormField::Description) => {
                self.focus_form(self.field.next());
            }
            (KeyCode::Tab, FormField::Description) | (KeyCode::BackTab, FormField::Name) => {
                self.focus_list();
            }
            // Both fields are single line
            (KeyCode::Enter, _) => {}
            (_, FormField::Name) => {
                self.name_input.input(key);
                self.form.set_name(single_line(&self.name_input));
            }
            (_, FormField::Description) => {
                self.description_input.input(key);
                self.form
                    .set_description(single_line(&self.description_input));
            }
        }
        None
    }

    /// Settles the form after a dispatched intent and reports failures
    pub fn after_dispatch(&mut self, outcome: crate::core::Result<()>) {
        if let Err(err) = outcome {
            error!(error = %err, "boat operation failed");
            self.controller
                .notifications_mut()
                .push(Notice::failure(failure_text(&err)));
        }

        self.form.settle();
        let key = self.controller.selection_key();
        if self.form.sync(key, self.controller.selection()) {
            self.reseed_inputs();
        }
        self.list
            .follow(self.controller.boats(), self.controller.selection());
    }
}

pub enum Screen<'a> {
    Login(LoginScreen<'a>),
    Loading,
    Boats(Box<BoatScreen<'a>>),
    Failed(String),
}

pub struct App<'a> {
    pub screen: Screen<'a>,
    pub exit: bool,
}

impl App<'_> {
    pub fn new(factory: Arc<dyn TransportFactory>, prefill: Credentials) -> Self {
        Self {
            screen: Screen::Login(LoginScreen::new(LoginFlow::new(factory, prefill))),
            exit: false,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        // Setup terminal
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.run_loop(&mut terminal).await;

        // Restore terminal
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        res
    }

    async fn run_loop<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> anyhow::Result<()> {
        while !self.exit {
            terminal.draw(|f| ui::draw(f, self))?;

            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        let mut pending = self.handle_key(key);
                        while let Some(action) = pending {
                            // Render the busy state before awaiting the store.
                            terminal.draw(|f| ui::draw(f, self))?;
                            pending = self.perform(action).await;
                        }
                    }
                }
            }

            self.tick(Instant::now());
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Option<Action> {
        match &mut self.screen {
            Screen::Login(login) => login.handle_key(key),
            Screen::Boats(boats) => boats.handle_key(key),
            Screen::Loading => None,
            Screen::Failed(_) => match key.code {
                KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => Some(Action::Quit),
                _ => None,
            },
        }
    }

    /// Runs one action to completion; returns a follow-up action if any
    pub async fn perform(&mut self, action: Action) -> Option<Action> {
        match action {
            Action::Quit => {
                self.exit = true;
                None
            }
            Action::Login(credentials) => self.login(credentials).await,
            Action::Load(transport) => {
                self.screen = match SessionController::load(transport).await {
                    Ok(controller) => Screen::Boats(Box::new(BoatScreen::new(controller))),
                    Err(err) => {
                        error!(error = %err, "failed to load boats");
                        Screen::Failed(failure_text(&err))
                    }
                };
                None
            }
            Action::Dispatch(intent) => {
                if let Screen::Boats(boats) = &mut self.screen {
                    let outcome = boats.controller.dispatch(intent).await;
                    boats.after_dispatch(outcome);
                }
                None
            }
        }
    }

    async fn login(&mut self, credentials: Credentials) -> Option<Action> {
        let Screen::Login(login) = &mut self.screen else {
            return None;
        };

        let factory = login.flow.factory();
        let outcome = LoginFlow::probe(factory.as_ref(), &credentials).await;
        match login.flow.finish(outcome) {
            Ok(Some(transport)) => {
                self.screen = Screen::Loading;
                Some(Action::Load(transport))
            }
            Ok(None) => {
                login.message = Some(UNAUTHORIZED_MESSAGE.to_string());
                None
            }
            Err(err) => {
                error!(error = %err, "login failed");
                login.message = Some(failure_text(&err));
                None
            }
        }
    }

    /// Expires the displayed notification once its time is up
    pub fn tick(&mut self, now: Instant) {
        if let Screen::Boats(boats) = &mut self.screen {
            boats.controller.notifications_mut().expire(now);
        }
    }
}

fn failure_text(err: &ClientError) -> String {
    format!("Operation failed: {err}")
}

fn text_input<'a>(title: &'static str, value: &str) -> TextArea<'a> {
    let mut textarea = TextArea::new(vec![value.to_string()]);
    textarea.set_block(Block::default().borders(Borders::ALL).title(title));
    textarea.set_cursor_line_style(Style::default());
    textarea.move_cursor(CursorMove::End);
    textarea
}

fn set_focused(textarea: &mut TextArea<'_>, focused: bool) {
    let cursor = if focused {
        Style::default().add_modifier(Modifier::REVERSED)
    } else {
        Style::default()
    };
    textarea.set_cursor_style(cursor);
}

fn single_line(textarea: &TextArea<'_>) -> String {
    textarea.lines().concat()
}
