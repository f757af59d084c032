//! The Status Bar
//!
//! One line at the bottom: the Hearth's state on the left, the ambience
//! selector in the middle, key hints on the right. The dismissable banner
//! renders just above it when a notice is up.

use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use hearth_core::{AmbienceKind, NotifyLevel};

use crate::display::DisplayState;
use crate::theme;

/// Label for the ambience selector
pub fn ambience_label(ambience: Option<AmbienceKind>) -> &'static str {
    match ambience {
        None => "Silence",
        Some(kind) => kind.label(),
    }
}

/// Render the banner line, if a notice is up
pub fn render_banner(frame: &mut Frame, area: Rect, display: &DisplayState) {
    let Some(banner) = &display.banner else {
        return;
    };
    let tint = match banner.level {
        NotifyLevel::Info => theme::INK_MUTED,
        NotifyLevel::Warning | NotifyLevel::Error => theme::WARNING,
    };
    let line = Line::from(vec![
        Span::styled("◦ ", Style::default().fg(tint)),
        Span::styled(banner.text.clone(), Style::default().fg(tint)),
        Span::styled(
            "  [Esc] dismiss",
            Style::default()
                .fg(theme::INK_MUTED)
                .add_modifier(Modifier::ITALIC),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

/// Render the status line
pub fn render(frame: &mut Frame, area: Rect, display: &DisplayState) {
    let state = display.hearth_state.description();
    let atmosphere = format!("Atmosphere: {}", ambience_label(display.ambience));

    let line = Line::from(vec![
        Span::styled(state, Style::default().fg(theme::INK_MUTED)),
        Span::raw("   "),
        Span::styled(atmosphere, Style::default().fg(theme::INK)),
        Span::raw("   "),
        Span::styled(
            "[a]tmosphere  [d]aily  [f]avorites  [q]uit",
            Style::default().fg(theme::INK_MUTED),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_ambience_labels() {
        assert_eq!(ambience_label(None), "Silence");
        assert_eq!(ambience_label(Some(AmbienceKind::Rain)), "Rain");
        assert_eq!(ambience_label(Some(AmbienceKind::Wind)), "Wind");
        assert_eq!(ambience_label(Some(AmbienceKind::Chimes)), "Chimes");
    }
}
