//! Widget border model: style catalog, inset table, holder border painting.
//!
//! Border styles are identified in documents by a raw integer enumerant. The
//! inset computation is a pure table lookup; widget content layout and
//! hit-region sizing both depend on reproducing it exactly.

use tracing::warn;

use crate::geometry::Bounds;
use crate::property::Color;
use crate::render::surface::{FillStyle, Surface};

// ---------------------------------------------------------------------------
// BorderStyle
// ---------------------------------------------------------------------------

/// The closed catalog of border styles, in document enumerant order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BorderStyle {
    None = 0,
    Line = 1,
    Raised = 2,
    Lowered = 3,
    Etched = 4,
    Ridged = 5,
    ButtonRaised = 6,
    ButtonPressed = 7,
    Dot = 8,
    Dash = 9,
    DashDot = 10,
    DashDotDot = 11,
    TitleBar = 12,
    GroupBox = 13,
    RoundedBackground = 14,
    Empty = 15,
}

impl BorderStyle {
    /// Map a document enumerant to a style; unknown values yield `None`.
    pub fn from_raw(raw: i64) -> Option<BorderStyle> {
        Some(match raw {
            0 => BorderStyle::None,
            1 => BorderStyle::Line,
            2 => BorderStyle::Raised,
            3 => BorderStyle::Lowered,
            4 => BorderStyle::Etched,
            5 => BorderStyle::Ridged,
            6 => BorderStyle::ButtonRaised,
            7 => BorderStyle::ButtonPressed,
            8 => BorderStyle::Dot,
            9 => BorderStyle::Dash,
            10 => BorderStyle::DashDot,
            11 => BorderStyle::DashDotDot,
            12 => BorderStyle::TitleBar,
            13 => BorderStyle::GroupBox,
            14 => BorderStyle::RoundedBackground,
            15 => BorderStyle::Empty,
            _ => return None,
        })
    }
}

// ---------------------------------------------------------------------------
// Insets
// ---------------------------------------------------------------------------

/// Per-side border insets `(top, left, bottom, right)`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Insets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl Insets {
    pub const ZERO: Insets = Insets { top: 0.0, left: 0.0, bottom: 0.0, right: 0.0 };

    /// Explicit insets, in `(top, left, bottom, right)` order.
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self { top, left, bottom, right }
    }

    /// The same inset on all four sides.
    pub const fn uniform(v: f64) -> Self {
        Self::new(v, v, v, v)
    }

    /// Shrink a holder rectangle into its content rectangle.
    pub fn apply(self, holder: Bounds) -> Bounds {
        holder.shrink(self.top, self.left, self.bottom, self.right)
    }
}

/// Compute border insets for a raw style enumerant.
///
/// Pure and deterministic. A borderless widget still shrinks by 2px on every
/// side when its border is alarm-sensitive; unknown enumerants get no insets.
pub fn insets(raw_style: i64, border_width: i64, alarm_sensitive: bool) -> Insets {
    let w = border_width as f64;
    match BorderStyle::from_raw(raw_style) {
        Some(BorderStyle::None) => {
            if alarm_sensitive {
                Insets::uniform(2.0)
            } else {
                Insets::ZERO
            }
        }
        Some(BorderStyle::Line) => Insets::uniform(w),
        Some(BorderStyle::Raised) | Some(BorderStyle::Lowered) => Insets::uniform(1.0),
        Some(BorderStyle::Etched)
        | Some(BorderStyle::Ridged)
        | Some(BorderStyle::ButtonRaised) => Insets::uniform(2.0),
        Some(BorderStyle::ButtonPressed) => Insets::new(2.0, 2.0, 1.0, 1.0),
        Some(BorderStyle::Dot)
        | Some(BorderStyle::Dash)
        | Some(BorderStyle::DashDot)
        | Some(BorderStyle::DashDotDot) => Insets::uniform(w),
        Some(BorderStyle::TitleBar) => Insets::new(16.0 + 1.0, 1.0, 1.0, 1.0),
        Some(BorderStyle::GroupBox) => Insets::uniform(16.0),
        Some(BorderStyle::RoundedBackground) => Insets::uniform(2.0 * w),
        Some(BorderStyle::Empty) | None => Insets::ZERO,
    }
}

// ---------------------------------------------------------------------------
// Painting
// ---------------------------------------------------------------------------

/// Paint a widget's holder border.
///
/// Only `Line` and `RoundedBackground` draw anything; the remaining known
/// styles are a no-op here (their effect is purely the inset). Unknown
/// enumerants degrade gracefully with a warning. `hide_rounded` suppresses
/// the rounded-background stroke for shape widgets that paint their own
/// outline.
#[allow(clippy::too_many_arguments)]
pub fn draw(
    g: &mut dyn Surface,
    holder: Bounds,
    raw_style: i64,
    border_width: i64,
    border_color: Color,
    background_color: Color,
    hide_rounded: bool,
) {
    let w = border_width as f64;
    match BorderStyle::from_raw(raw_style) {
        Some(BorderStyle::Line) => {
            g.set_stroke_style(border_color);
            g.set_line_width(w);
            g.stroke_rect(holder.to_border_box(w));
        }
        Some(BorderStyle::RoundedBackground) => {
            if !hide_rounded {
                g.set_fill_style(FillStyle::Solid(background_color));
                g.set_stroke_style(border_color);
                g.set_line_width(w);
                g.begin_path();
                g.round_rect(holder.to_border_box(w), 4.0, 4.0);
                g.fill();
                g.stroke();
            }
        }
        Some(_) => {} // inset-only styles
        None => warn!(style = raw_style, "unsupported border style"),
    }
}

// ===========================================================================
// Tests
// ===========================================================================
