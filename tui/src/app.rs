//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, resize)
//! - HearthClient for orchestration
//! - DisplayState for rendering
//!
//! The App converts terminal events to SurfaceEvents, sends them to the
//! embedded Hearth via HearthClient, receives HearthMessages into
//! DisplayState, and renders from that state. No business logic lives
//! here.

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Terminal;

use hearth_core::{load_config, AmbienceKind, EmberConfigFile, HearthState};

use crate::display::DisplayState;
use crate::hearth_client::HearthClient;
use crate::theme;
use crate::widgets::{collection, goal_board, message_card, status_bar, GoalForm};

/// Which screen is showing
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum View {
    /// The message card and the goal board
    Card,
    /// The saved collection
    Collection,
}

/// The main TUI application
pub struct App {
    running: bool,
    hearth: HearthClient,
    display: DisplayState,
    view: View,
    form: GoalForm,
    goal_selected: usize,
    saved_selected: usize,
    search: String,
    searching: bool,
}

impl App {
    /// Create the app, loading configuration from file and environment
    pub fn new() -> anyhow::Result<Self> {
        let config = match load_config() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Config load failed, using defaults: {}", e);
                EmberConfigFile::default()
            }
        };

        Ok(Self {
            running: true,
            hearth: HearthClient::new(&config),
            display: DisplayState::new(),
            view: View::Card,
            form: GoalForm::Closed,
            goal_selected: 0,
            saved_selected: 0,
            search: String::new(),
            searching: false,
        })
    }

    /// Parting words picked up from the Hearth's quit message
    pub fn farewell(&self) -> Option<&str> {
        self.display.farewell.as_deref()
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // ~10 FPS; a reading surface, not an animation
        let frame_duration = Duration::from_millis(100);
        let mut event_stream = EventStream::new();
        let mut started = false;

        // Render the first frame immediately so the user sees something
        terminal.draw(|frame| self.render(frame))?;

        while self.running {
            let frame_start = Instant::now();

            tokio::select! {
                biased;

                // Terminal events first
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        if let Event::Key(key) = event {
                            if key.kind == KeyEventKind::Press {
                                self.handle_key(key).await;
                            }
                        }
                    }
                }

                // Frame tick
                () = tokio::time::sleep(Duration::from_millis(16)) => {
                    if !started {
                        if let Err(e) = self.hearth.start().await {
                            tracing::warn!("Hearth start error: {}", e);
                        }
                        started = true;
                    }
                }
            }

            // Drain finished generations and pending messages
            self.hearth.poll().await;
            for msg in self.hearth.recv_all() {
                self.display.apply_message(msg);
            }
            self.display.tick();
            self.clamp_selections();

            terminal.draw(|frame| self.render(frame))?;

            if matches!(self.display.hearth_state, HearthState::ShuttingDown) {
                self.running = false;
            }

            // Frame rate limiting
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                tokio::time::sleep(frame_duration - elapsed).await;
            }
        }

        Ok(())
    }

    /// Keep selections inside the lists they index
    fn clamp_selections(&mut self) {
        if !self.display.goals.is_empty() {
            self.goal_selected = self.goal_selected.min(self.display.goals.len() - 1);
        } else {
            self.goal_selected = 0;
        }
        let shown = collection::filtered(&self.display.saved, &self.search).len();
        if shown > 0 {
            self.saved_selected = self.saved_selected.min(shown - 1);
        } else {
            self.saved_selected = 0;
        }
    }

    /// Handle keyboard input
    async fn handle_key(&mut self, key: event::KeyEvent) {
        // Ctrl-C always quits
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            let _ = self.hearth.request_quit().await;
            return;
        }

        if self.form.is_open() {
            self.handle_form_key(key).await;
            return;
        }
        match self.view {
            View::Collection => self.handle_collection_key(key).await,
            View::Card => self.handle_card_key(key).await,
        }
    }

    /// Keys on the card screen
    async fn handle_card_key(&mut self, key: event::KeyEvent) {
        match key.code {
            KeyCode::Char('q') => {
                let _ = self.hearth.request_quit().await;
            }
            KeyCode::Esc => {
                if self.display.banner.is_some() {
                    self.display.dismiss_banner();
                } else {
                    let _ = self.hearth.request_quit().await;
                }
            }

            // Kindle Another
            KeyCode::Char('n') | KeyCode::Char('r') => {
                let _ = self.hearth.request_message().await;
            }
            KeyCode::Char('d') => {
                let _ = self.hearth.request_daily().await;
            }

            // Card actions
            KeyCode::Char('s') => {
                if let Some(message) = self.display.message.clone() {
                    let _ = self.hearth.toggle_save(message).await;
                }
            }
            KeyCode::Char('c') | KeyCode::Char('y') => self.copy_current(),

            // Views and ambience
            KeyCode::Char('f') | KeyCode::Char('v') => {
                self.view = View::Collection;
            }
            KeyCode::Char('a') => {
                let next = next_ambience(self.display.ambience);
                let _ = self.hearth.select_ambience(next).await;
            }

            // Goal board
            KeyCode::Char('g') => {
                self.form = GoalForm::open();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if !self.display.goals.is_empty() {
                    self.goal_selected = (self.goal_selected + 1) % self.display.goals.len();
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                if !self.display.goals.is_empty() {
                    self.goal_selected = self
                        .goal_selected
                        .checked_sub(1)
                        .unwrap_or(self.display.goals.len() - 1);
                }
            }
            KeyCode::Char(' ') => {
                // One step forward on the selected focus
                if let Some(goal) = self.display.goals.get(self.goal_selected) {
                    if !goal.is_completed {
                        let id = goal.id.clone();
                        let step = goal.current_steps + 1;
                        let _ = self.hearth.set_goal_step(id, step).await;
                    }
                }
            }
            KeyCode::Char('u') => {
                // One step back
                if let Some(goal) = self.display.goals.get(self.goal_selected) {
                    if !goal.is_completed && goal.current_steps > 0 {
                        let id = goal.id.clone();
                        let step = goal.current_steps - 1;
                        let _ = self.hearth.set_goal_step(id, step).await;
                    }
                }
            }
            KeyCode::Char(c @ '1'..='9') => {
                // Press a dot directly; dots on a completed focus are inert
                if let Some(goal) = self.display.goals.get(self.goal_selected) {
                    let step = u32::from(c as u8 - b'0');
                    if !goal.is_completed && step <= goal.total_steps {
                        let id = goal.id.clone();
                        let _ = self.hearth.set_goal_step(id, step).await;
                    }
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                if let Some(goal) = self.display.goals.get(self.goal_selected) {
                    let id = goal.id.clone();
                    let _ = self.hearth.remove_goal(id).await;
                }
            }

            _ => {}
        }
    }

    /// Keys while the add-a-focus form is open
    async fn handle_form_key(&mut self, key: event::KeyEvent) {
        let in_text = matches!(self.form, GoalForm::Text { .. });
        match key.code {
            KeyCode::Esc => self.form = GoalForm::Closed,
            KeyCode::Enter => {
                let form = std::mem::replace(&mut self.form, GoalForm::Closed);
                if in_text {
                    self.form = form.submit_text();
                } else if let Some((text, total_steps)) = form.take_submission() {
                    let _ = self.hearth.create_goal(text, total_steps).await;
                }
            }
            KeyCode::Backspace if in_text => {
                if let GoalForm::Text { buffer } = &mut self.form {
                    buffer.pop();
                }
            }
            KeyCode::Char(c) if in_text => {
                if let GoalForm::Text { buffer } = &mut self.form {
                    buffer.push(c);
                }
            }
            // Step picker; cycle_steps is a no-op outside the Steps stage
            KeyCode::Left | KeyCode::Char('h') => self.form.cycle_steps(-1),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => self.form.cycle_steps(1),
            _ => {}
        }
    }

    /// Keys on the collection screen
    async fn handle_collection_key(&mut self, key: event::KeyEvent) {
        if self.searching {
            match key.code {
                KeyCode::Esc | KeyCode::Enter => self.searching = false,
                KeyCode::Backspace => {
                    self.search.pop();
                }
                KeyCode::Char(c) => self.search.push(c),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Esc | KeyCode::Char('f') | KeyCode::Char('v') => {
                // Back to light
                self.view = View::Card;
                self.search.clear();
            }
            KeyCode::Char('q') => {
                let _ = self.hearth.request_quit().await;
            }
            KeyCode::Char('/') => self.searching = true,
            KeyCode::Down | KeyCode::Char('j') => {
                let shown = collection::filtered(&self.display.saved, &self.search).len();
                if shown > 0 {
                    self.saved_selected = (self.saved_selected + 1) % shown;
                }
            }
            KeyCode::Up | KeyCode::Char('k') => {
                let shown = collection::filtered(&self.display.saved, &self.search).len();
                if shown > 0 {
                    self.saved_selected =
                        self.saved_selected.checked_sub(1).unwrap_or(shown - 1);
                }
            }
            KeyCode::Char('x') | KeyCode::Delete => {
                let picked = collection::filtered(&self.display.saved, &self.search)
                    .get(self.saved_selected)
                    .map(|kept| (*kept).clone());
                if let Some(message) = picked {
                    let _ = self.hearth.toggle_save(message).await;
                }
            }
            _ => {}
        }
    }

    /// Copy the current message, with attribution, to the clipboard
    ///
    /// There is no native share sheet in a terminal; sharing IS the copy.
    fn copy_current(&mut self) {
        let Some(message) = &self.display.message else {
            return;
        };
        let text = message.full_text();
        match arboard::Clipboard::new().and_then(|mut clipboard| clipboard.set_text(text)) {
            Ok(()) => self.display.flash_copied(),
            Err(e) => tracing::warn!("Clipboard copy failed: {}", e),
        }
    }

    /// Render one frame
    fn render(&self, frame: &mut ratatui::Frame) {
        let area = frame.area();
        let banner_height = u16::from(self.display.banner.is_some());

        match self.view {
            View::Card => {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(2),
                        Constraint::Min(8),
                        Constraint::Length(board_height(&self.display, &self.form)),
                        Constraint::Length(banner_height),
                        Constraint::Length(1),
                    ])
                    .split(area);

                self.render_header(frame, rows[0]);
                message_card::render(frame, rows[1], &self.display);
                goal_board::render(frame, rows[2], &self.display, &self.form, self.goal_selected);
                status_bar::render_banner(frame, rows[3], &self.display);
                status_bar::render(frame, rows[4], &self.display);
            }
            View::Collection => {
                let rows = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(2),
                        Constraint::Min(8),
                        Constraint::Length(banner_height),
                        Constraint::Length(1),
                    ])
                    .split(area);

                self.render_header(frame, rows[0]);
                collection::render(
                    frame,
                    rows[1],
                    &self.display.saved,
                    &self.search,
                    self.searching,
                    self.saved_selected,
                );
                status_bar::render_banner(frame, rows[2], &self.display);
                status_bar::render(frame, rows[3], &self.display);
            }
        }
    }

    fn render_header(&self, frame: &mut ratatui::Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "Ember",
                Style::default()
                    .fg(theme::INK_DARK)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "L I G H T   F O R   T H E   Q U I E T   H O U R S",
                Style::default().fg(theme::INK_MUTED),
            )),
        ];
        frame.render_widget(Paragraph::new(lines), area);
    }
}

/// Selector order: Silence, Rain, Wind, Chimes, back to Silence
fn next_ambience(current: Option<AmbienceKind>) -> Option<AmbienceKind> {
    match current {
        None => Some(AmbienceKind::Rain),
        Some(AmbienceKind::Rain) => Some(AmbienceKind::Wind),
        Some(AmbienceKind::Wind) => Some(AmbienceKind::Chimes),
        Some(AmbienceKind::Chimes) => None,
    }
}

/// The board grows with its goals, within reason
fn board_height(display: &DisplayState, form: &GoalForm) -> u16 {
    let goal_rows = display.goals.len().min(6) as u16;
    let form_rows = if form.is_open() { 4 } else { 2 };
    goal_rows + form_rows + 3
}
