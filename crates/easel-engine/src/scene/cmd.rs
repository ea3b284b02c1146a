use crate::coords::{CornerRadii, Rect, Vec2};
use crate::paint::{Color, Paint};
use crate::text::FontId;

/// One recorded drawing operation.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCmd {
    Rect(RectCmd),
    RoundedRect(RoundedRectCmd),
    Text(TextCmd),
}

/// Stroke along the outer edge of a shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Border {
    pub width: f32,
    pub color: Color,
}

impl Border {
    #[inline]
    pub fn new(width: f32, color: Color) -> Self {
        Self { width, color }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RectCmd {
    pub rect: Rect,
    pub paint: Paint,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoundedRectCmd {
    pub rect: Rect,
    pub radii: CornerRadii,
    pub paint: Paint,
    pub border: Option<Border>,
}

/// A single-style text run.
#[derive(Debug, Clone, PartialEq)]
pub struct TextCmd {
    pub text: String,
    pub font: FontId,
    /// Font size in logical pixels.
    pub size: f32,
    pub color: Color,
    /// Top-left of the first line.
    pub origin: Vec2,
    /// Wrapping width; `None` lays out a single line.
    pub max_width: Option<f32>,
}

impl From<RectCmd> for DrawCmd {
    fn from(cmd: RectCmd) -> Self {
        DrawCmd::Rect(cmd)
    }
}

impl From<RoundedRectCmd> for DrawCmd {
    fn from(cmd: RoundedRectCmd) -> Self {
        DrawCmd::RoundedRect(cmd)
    }
}

impl From<TextCmd> for DrawCmd {
    fn from(cmd: TextCmd) -> Self {
        DrawCmd::Text(cmd)
    }
}
