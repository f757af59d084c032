//! Theme and Colors
//!
//! Ember's palette - soft paper tones with muted ink, carried over from
//! the original design: a page you read by lamplight, not a dashboard.

use ratatui::style::Color;

// ============================================================================
// Paper Tones (card backgrounds, rotated on each new message)
// ============================================================================

/// Warm off-white
pub const PAPER_WARM: Color = Color::Rgb(253, 252, 251);

/// Cool off-white
pub const PAPER_COOL: Color = Color::Rgb(248, 249, 250);

/// Floral white
pub const PAPER_FLORAL: Color = Color::Rgb(255, 250, 240);

/// Pale blue-gray
pub const PAPER_MIST: Color = Color::Rgb(240, 244, 248);

/// All paper tones in rotation order
pub const PAPERS: [Color; 4] = [PAPER_WARM, PAPER_COOL, PAPER_FLORAL, PAPER_MIST];

// ============================================================================
// Ink
// ============================================================================

/// Headline ink - deep indigo
pub const INK_DARK: Color = Color::Rgb(34, 34, 59);

/// Body ink - slate
pub const INK: Color = Color::Rgb(74, 78, 105);

/// Muted ink - for labels and quiet text
pub const INK_MUTED: Color = Color::Rgb(154, 140, 152);

/// Hairline borders
pub const BORDER: Color = Color::Rgb(242, 233, 228);

// ============================================================================
// Accents
// ============================================================================

/// Soft rose - saves and removals
pub const ROSE: Color = Color::Rgb(229, 152, 155);

/// Ember amber - completion glow and the "Warmth" badge
pub const AMBER: Color = Color::Rgb(255, 200, 120);

/// Progress dots, filled
pub const DOT_FILLED: Color = Color::Rgb(124, 152, 133);

/// Warning banner tint
pub const WARNING: Color = Color::Rgb(200, 150, 90);
