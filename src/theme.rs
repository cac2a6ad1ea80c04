use std::path::Path;

use crate::error::{CardError, CardResult};

/// Straight-alpha RGBA8 color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// Card color palette, modeled as process-wide immutable configuration.
///
/// Colors follow Steam's notification convention: light text on a dark panel,
/// with gold reserved for rare unlocks.
pub struct Palette;

impl Palette {
    /// Neutral dark panel background.
    pub const PANEL: Rgba8 = Rgba8::opaque(0x20, 0x22, 0x25);
    /// Golden border and glow base for rare cards.
    pub const GOLD: Rgba8 = Rgba8::opaque(0xff, 0xd7, 0x00);
    /// Glow gradient at the top edge of the panel interior.
    pub const GLOW_TOP: Rgba8 = Rgba8::new(0xff, 0xd7, 0x00, 90);
    /// Glow gradient at the bottom edge (fully faded out).
    pub const GLOW_BOTTOM: Rgba8 = Rgba8::new(0xff, 0xd7, 0x00, 0);
    /// Achievement name text.
    pub const NAME_TEXT: Rgba8 = Rgba8::opaque(0xff, 0xff, 0xff);
    /// Achievement description text.
    pub const DESC_TEXT: Rgba8 = Rgba8::opaque(0xbd, 0xbd, 0xbd);
}

/// Fixed card geometry in pixels.
///
/// These constants approximate the in-game toast proportions and are the
/// single source of truth for both the composer and the tests.
pub struct Layout;

impl Layout {
    pub const CANVAS_WIDTH: u32 = 420;
    pub const CANVAS_HEIGHT: u32 = 96;

    /// Square icon slot edge length.
    pub const ICON_SIZE: u32 = 64;
    pub const ICON_X: f64 = 16.0;
    pub const ICON_Y: f64 = 16.0;

    /// Left edge of the text column, right of the icon slot.
    pub const TEXT_X: f64 = 96.0;
    pub const TEXT_Y: f64 = 20.0;
    /// Vertical gap between the name block and the description block.
    pub const TEXT_GAP: f64 = 4.0;

    pub const NAME_SIZE_PX: f32 = 16.0;
    pub const DESC_SIZE_PX: f32 = 13.0;

    /// Border thickness for rare cards.
    pub const BORDER_PX: f64 = 3.0;

    /// Width available to the text column before lines wrap.
    pub const fn text_width() -> f64 {
        Self::CANVAS_WIDTH as f64 - Self::TEXT_X - 16.0
    }
}

const BOLD_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Bold.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
];

const REGULAR_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// Raw font bytes for the two text styles the card uses.
///
/// Resolved once at startup from explicit overrides or a list of well-known
/// system font paths; immutable afterwards.
#[derive(Debug)]
pub struct FontSet {
    pub bold: Vec<u8>,
    pub regular: Vec<u8>,
}

impl FontSet {
    /// Resolve font bytes, preferring explicit override paths.
    pub fn resolve(bold: Option<&Path>, regular: Option<&Path>) -> CardResult<Self> {
        let bold = load_font(bold, BOLD_CANDIDATES, "bold")?;
        let regular = load_font(regular, REGULAR_CANDIDATES, "regular")?;
        Ok(Self { bold, regular })
    }
}

fn load_font(explicit: Option<&Path>, candidates: &[&str], style: &str) -> CardResult<Vec<u8>> {
    if let Some(p) = explicit {
        return std::fs::read(p).map_err(|e| {
            CardError::invalid_input(format!("failed to read {style} font '{}': {e}", p.display()))
        });
    }
    for c in candidates {
        if let Ok(bytes) = std::fs::read(c) {
            return Ok(bytes);
        }
    }
    Err(CardError::invalid_input(format!(
        "no {style} font found; install DejaVu/Liberation/Noto Sans or pass an explicit font path"
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icon_slot_fits_inside_canvas() {
        assert!(Layout::ICON_X + Layout::ICON_SIZE as f64 <= Layout::CANVAS_WIDTH as f64);
        assert!(Layout::ICON_Y + Layout::ICON_SIZE as f64 <= Layout::CANVAS_HEIGHT as f64);
    }

    #[test]
    fn text_column_is_positive_and_right_of_icon() {
        assert!(Layout::TEXT_X > Layout::ICON_X + Layout::ICON_SIZE as f64);
        assert!(Layout::text_width() > 0.0);
    }

    #[test]
    fn explicit_missing_font_is_invalid_input() {
        let err = FontSet::resolve(Some(Path::new("/nonexistent/font.ttf")), None).unwrap_err();
        assert!(matches!(err, CardError::InvalidInput(_)));
    }
}
