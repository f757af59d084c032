//! The Daily Foci Board
//!
//! Lists every goal with its progress dots, shows the add-form when open,
//! and highlights the selected row for keyboard driving. Completed rows
//! render dimmed; their dots are inert in the app's key handling.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use hearth_core::{DailyGoal, ALLOWED_STEP_COUNTS};

use crate::display::DisplayState;
use crate::theme;

/// State machine of the add-a-focus form
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GoalForm {
    /// Form closed
    Closed,
    /// Typing the focus text
    Text {
        /// What has been typed so far
        buffer: String,
    },
    /// Picking how many steps it takes
    Steps {
        /// The finished focus text
        text: String,
        /// Index into [`ALLOWED_STEP_COUNTS`]
        choice: usize,
    },
}

impl GoalForm {
    /// Open the form at the text stage
    pub fn open() -> Self {
        Self::Text {
            buffer: String::new(),
        }
    }

    /// Whether the form is capturing keys
    pub fn is_open(&self) -> bool {
        !matches!(self, Self::Closed)
    }

    /// Move from text entry to the step picker, if the text is usable
    pub fn submit_text(self) -> Self {
        match self {
            Self::Text { buffer } if !buffer.trim().is_empty() => Self::Steps {
                text: buffer,
                choice: 0,
            },
            other => other,
        }
    }

    /// Cycle the step choice by `delta`
    pub fn cycle_steps(&mut self, delta: isize) {
        if let Self::Steps { choice, .. } = self {
            let len = ALLOWED_STEP_COUNTS.len() as isize;
            *choice = ((*choice as isize + delta).rem_euclid(len)) as usize;
        }
    }

    /// The picked `(text, total_steps)`, if the form reached the end
    pub fn take_submission(self) -> Option<(String, u32)> {
        match self {
            Self::Steps { text, choice } => Some((text, ALLOWED_STEP_COUNTS[choice])),
            _ => None,
        }
    }
}

/// Progress dots for one goal, filled then hollow
fn dots(goal: &DailyGoal) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(goal.total_steps as usize * 2);
    for step in 1..=goal.total_steps {
        let (symbol, color) = if step <= goal.current_steps {
            ("●", theme::DOT_FILLED)
        } else {
            ("○", theme::INK_MUTED)
        };
        spans.push(Span::styled(symbol, Style::default().fg(color)));
        spans.push(Span::raw(" "));
    }
    spans
}

/// Render the board into `area`
pub fn render(
    frame: &mut Frame,
    area: Rect,
    display: &DisplayState,
    form: &GoalForm,
    selected: usize,
) {
    let title = format!(" Daily Foci ({} active) ", display.active_goal_count());
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::BORDER))
        .title(Span::styled(title, Style::default().fg(theme::INK_DARK)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    match form {
        GoalForm::Closed => {
            lines.push(Line::from(Span::styled(
                "[g] Add a new focus",
                Style::default().fg(theme::INK_MUTED),
            )));
        }
        GoalForm::Text { buffer } => {
            let shown = if buffer.is_empty() {
                Span::styled(
                    "A small step to take...",
                    Style::default()
                        .fg(theme::INK_MUTED)
                        .add_modifier(Modifier::ITALIC),
                )
            } else {
                Span::styled(buffer.clone(), Style::default().fg(theme::INK))
            };
            lines.push(Line::from(vec![
                Span::styled("> ", Style::default().fg(theme::ROSE)),
                shown,
                Span::styled("▏", Style::default().fg(theme::INK_MUTED)),
            ]));
        }
        GoalForm::Steps { text, choice } => {
            lines.push(Line::from(Span::styled(
                format!("\"{text}\" — How many times?"),
                Style::default().fg(theme::INK),
            )));
            let mut picks: Vec<Span> = Vec::new();
            for (idx, count) in ALLOWED_STEP_COUNTS.iter().enumerate() {
                let style = if idx == *choice {
                    Style::default()
                        .fg(theme::INK_DARK)
                        .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                } else {
                    Style::default().fg(theme::INK_MUTED)
                };
                picks.push(Span::styled(format!(" {count} "), style));
            }
            lines.push(Line::from(picks));
        }
    }
    lines.push(Line::default());

    if display.goals.is_empty() && !form.is_open() {
        lines.push(Line::from(Span::styled(
            "No foci yet. Small steps count.",
            Style::default()
                .fg(theme::INK_MUTED)
                .add_modifier(Modifier::ITALIC),
        )));
    }

    for (idx, goal) in display.goals.iter().enumerate() {
        let marker = if idx == selected && !form.is_open() {
            Span::styled("▸ ", Style::default().fg(theme::ROSE))
        } else {
            Span::raw("  ")
        };

        let text_style = if goal.is_completed {
            Style::default()
                .fg(theme::INK_MUTED)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(theme::INK)
        };

        let mut spans = vec![marker, Span::styled(goal.text.clone(), text_style), Span::raw("  ")];
        spans.extend(dots(goal));
        if goal.is_completed {
            spans.push(Span::styled("✦", Style::default().fg(theme::AMBER)));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}
