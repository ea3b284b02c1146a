use std::fmt;

use crate::coords::Vec2;

/// Advance of one character in em units when no font is available.
const FALLBACK_ADVANCE_EM: f32 = 0.6;
/// Line height in em units when no font is available.
const FALLBACK_LINE_EM: f32 = 1.2;

/// Error returned by [`FontSystem::load_font`].
#[derive(Debug, Clone)]
pub struct FontLoadError(pub String);

impl fmt::Display for FontLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "font load error: {}", self.0)
    }
}

impl std::error::Error for FontLoadError {}

/// Opaque handle to a font loaded into a [`FontSystem`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct FontId(pub(crate) usize);

impl FontId {
    /// The first font loaded into a system.
    ///
    /// Always safe to use: if the system holds no font, measurement falls
    /// back to fixed-advance metrics.
    pub const DEFAULT: FontId = FontId(0);
}

/// Owns a collection of loaded fonts.
///
/// The overlay has to lay out text even on hosts without any font file
/// (CI, headless demos). Measuring with an unknown `FontId` therefore uses a
/// monospace approximation instead of failing.
#[derive(Default)]
pub struct FontSystem {
    fonts: Vec<fontdue::Font>,
}

impl FontSystem {
    pub fn new() -> Self {
        Self { fonts: Vec::new() }
    }

    /// Parses and stores a TrueType or OpenType font from raw bytes.
    pub fn load_font(&mut self, bytes: &[u8]) -> Result<FontId, FontLoadError> {
        let font = fontdue::Font::from_bytes(bytes, fontdue::FontSettings::default())
            .map_err(|e| FontLoadError(e.to_string()))?;
        let id = FontId(self.fonts.len());
        self.fonts.push(font);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.fonts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fonts.is_empty()
    }

    /// Computes the bounding box of a laid-out single-style text run.
    ///
    /// Returns `(width, height)` in logical pixels.
    #[must_use]
    pub fn measure_text(&self, text: &str, id: FontId, size: f32, max_width: Option<f32>) -> Vec2 {
        use fontdue::layout::{CoordinateSystem, Layout, LayoutSettings, TextStyle};

        let Some(font) = self.fonts.get(id.0) else {
            return fallback_metrics(text, size, max_width);
        };

        let mut layout: Layout<()> = Layout::new(CoordinateSystem::PositiveYDown);
        layout.reset(&LayoutSettings { max_width, ..LayoutSettings::default() });
        layout.append(&[font], &TextStyle::new(text, size, 0));

        let glyphs = layout.glyphs();
        if glyphs.is_empty() {
            return Vec2::new(0.0, size * FALLBACK_LINE_EM);
        }

        // Pen position after each glyph rather than the bitmap edge, so the
        // measured width never triggers a wrap when reused as `max_width`.
        let w = glyphs.iter().map(|g| {
            let m = font.metrics_indexed(g.key.glyph_index, size);
            (g.x - m.xmin as f32 + m.advance_width).max(0.0)
        }).fold(0.0f32, f32::max);
        let h = glyphs.iter().map(|g| g.y + g.height as f32).fold(size, f32::max);
        Vec2::new(w, h)
    }
}

fn fallback_metrics(text: &str, size: f32, max_width: Option<f32>) -> Vec2 {
    let line_h = size * FALLBACK_LINE_EM;
    if text.is_empty() {
        return Vec2::new(0.0, line_h);
    }

    let advance = size * FALLBACK_ADVANCE_EM;
    let width = text.chars().count() as f32 * advance;
    match max_width {
        Some(max) if max > 0.0 && width > max => {
            let lines = (width / max).ceil();
            Vec2::new(max, lines * line_h)
        }
        _ => Vec2::new(width, line_h),
    }
}
