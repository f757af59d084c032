//! The Collection View
//!
//! The user's sanctuary: every kept message, filtered live by the search
//! query against text and author, case-insensitively. Matches the core's
//! search semantics so what the surface shows is what an unsave acts on.

use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Paragraph};
use ratatui::Frame;

use hearth_core::GentleMessage;

use crate::theme;

/// Messages whose text or author contains the query
pub fn filtered<'a>(saved: &'a [GentleMessage], query: &str) -> Vec<&'a GentleMessage> {
    let needle = query.to_lowercase();
    saved
        .iter()
        .filter(|kept| {
            kept.text.to_lowercase().contains(&needle)
                || kept
                    .author
                    .as_ref()
                    .is_some_and(|author| author.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Render the collection view into `area`
pub fn render(
    frame: &mut Frame,
    area: Rect,
    saved: &[GentleMessage],
    query: &str,
    searching: bool,
    selected: usize,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(theme::BORDER))
        .title(Span::styled(
            " Your Collection ",
            Style::default().fg(theme::INK_DARK),
        ));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut lines: Vec<Line> = Vec::new();

    // Search box
    let search_line = if query.is_empty() && !searching {
        Line::from(Span::styled(
            "  [/] Find a spark...",
            Style::default()
                .fg(theme::INK_MUTED)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        let cursor = if searching { "▏" } else { "" };
        Line::from(vec![
            Span::styled("  ⌕ ", Style::default().fg(theme::INK_MUTED)),
            Span::styled(query.to_string(), Style::default().fg(theme::INK)),
            Span::styled(cursor, Style::default().fg(theme::INK_MUTED)),
        ])
    };
    lines.push(search_line);
    lines.push(Line::default());

    let shown = filtered(saved, query);
    if shown.is_empty() {
        lines.push(
            Line::from(Span::styled(
                "Your sanctuary is quiet.",
                Style::default()
                    .fg(theme::INK)
                    .add_modifier(Modifier::ITALIC),
            ))
            .alignment(Alignment::Center),
        );
    }

    let width = inner.width.saturating_sub(8).max(20) as usize;
    for (idx, kept) in shown.iter().enumerate() {
        let marker = if idx == selected && !searching {
            Span::styled("▸ ", Style::default().fg(theme::ROSE))
        } else {
            Span::raw("  ")
        };

        let quoted = format!("\u{201c}{}\u{201d}", kept.text);
        let mut wrapped = textwrap::wrap(&quoted, width).into_iter();
        if let Some(first) = wrapped.next() {
            lines.push(Line::from(vec![
                marker,
                Span::styled(
                    first.to_string(),
                    Style::default()
                        .fg(theme::INK)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]));
        }
        for rest in wrapped {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(
                    rest.to_string(),
                    Style::default()
                        .fg(theme::INK)
                        .add_modifier(Modifier::ITALIC),
                ),
            ]));
        }
        if let Some(author) = &kept.author {
            lines.push(Line::from(Span::styled(
                format!("    — {author}"),
                Style::default().fg(theme::INK_MUTED),
            )));
        }
        lines.push(Line::default());
    }

    lines.push(Line::from(Span::styled(
        "  [x] unsave  ·  [Esc] Back to light",
        Style::default().fg(theme::INK_MUTED),
    )));

    frame.render_widget(Paragraph::new(lines), inner);
}

#[cfg(test)]
mod tests {
    use super::*;
    use hearth_core::MessageKind;

    fn saved() -> Vec<GentleMessage> {
        vec![
            GentleMessage::new("The stars are patient", MessageKind::Quote),
            GentleMessage::new("Slow mornings", MessageKind::Quote).with_author("Rumi"),
            GentleMessage::new("Unrelated", MessageKind::Compliment),
        ]
    }

    #[test]
    fn test_filter_matches_text_case_insensitively() {
        let saved = saved();
        let hits = filtered(&saved, "STARS");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "The stars are patient");
    }

    #[test]
    fn test_filter_matches_author() {
        let saved = saved();
        let hits = filtered(&saved, "rumi");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].text, "Slow mornings");
    }

    #[test]
    fn test_empty_query_shows_everything() {
        let saved = saved();
        assert_eq!(filtered(&saved, "").len(), 3);
    }

    #[test]
    fn test_no_match_is_empty() {
        let saved = saved();
        assert!(filtered(&saved, "nothing here").is_empty());
    }
}
