//! The Message Card
//!
//! Centerpiece of the screen: the current message in quotes, its
//! attribution, a "Warmth" badge on compliments, and the loading line
//! while a generation is in flight. The card background rotates through
//! the paper tones as new messages arrive.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use hearth_core::MessageKind;

use crate::display::DisplayState;
use crate::theme;

/// Render the message card into `area`
pub fn render(frame: &mut Frame, area: Rect, display: &DisplayState) {
    let paper = theme::PAPERS[display.paper_index % theme::PAPERS.len()];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::BORDER))
        .style(Style::default().bg(paper));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    if display.is_loading() {
        lines.push(Line::default());
        lines.push(
            Line::from(Span::styled(
                "Kindling a thought for you...",
                Style::default()
                    .fg(theme::INK_MUTED)
                    .add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center),
        );
    } else if let Some(message) = &display.message {
        if message.kind == MessageKind::Compliment {
            lines.push(
                Line::from(Span::styled(
                    "· Warmth ·",
                    Style::default().fg(theme::AMBER),
                ))
                .alignment(Alignment::Center),
            );
        }
        lines.push(Line::default());

        let width = inner.width.saturating_sub(8).max(20) as usize;
        let quoted = format!("\u{201c}{}\u{201d}", message.text);
        for wrapped in textwrap::wrap(&quoted, width) {
            lines.push(
                Line::from(Span::styled(
                    wrapped.to_string(),
                    Style::default()
                        .fg(theme::INK)
                        .add_modifier(Modifier::ITALIC),
                ))
                .alignment(Alignment::Center),
            );
        }

        if let Some(author) = &message.author {
            lines.push(Line::default());
            lines.push(
                Line::from(Span::styled(
                    format!("— {author}"),
                    Style::default().fg(theme::INK_MUTED),
                ))
                .alignment(Alignment::Center),
            );
        }

        lines.push(Line::default());
        let save_hint = if display.current_is_saved() {
            "♥ kept"
        } else {
            "♡ [s]ave"
        };
        let copied = if display.copied_showing() {
            "  ·  Copied!"
        } else {
            "  ·  [c]opy"
        };
        lines.push(
            Line::from(vec![
                Span::styled(save_hint, Style::default().fg(theme::ROSE)),
                Span::styled(copied, Style::default().fg(theme::INK_MUTED)),
                Span::styled("  ·  [n] Kindle Another", Style::default().fg(theme::INK_MUTED)),
            ])
            .alignment(Alignment::Center),
        );
    } else {
        lines.push(Line::default());
        lines.push(
            Line::from(Span::styled(
                "Waking the embers...",
                Style::default().fg(theme::INK_MUTED),
            ))
            .alignment(Alignment::Center),
        );
    }

    // Vertical centering inside the card
    let content_height = lines.len() as u16;
    let top_pad = inner.height.saturating_sub(content_height) / 2;
    let mut padded: Vec<Line> = (0..top_pad).map(|_| Line::default()).collect();
    padded.extend(lines);

    frame.render_widget(Paragraph::new(padded), inner);
}
