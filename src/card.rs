use crate::error::{CardError, CardResult};
use crate::icon::prepare_icon;
use crate::surface::{CpuSurface, Raster, Surface};
use crate::text::TextLayoutEngine;
use crate::theme::{FontSet, Layout, Palette};

/// One achievement to render: two text strings, raw icon bytes, rarity flag.
///
/// Constructed once per invocation and discarded after use.
#[derive(Clone, Copy, Debug)]
pub struct CardRequest<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub icon: &'a [u8],
    pub rare: bool,
}

impl CardRequest<'_> {
    /// Reject blank name or description before any decode or layout work runs.
    pub fn validate(&self) -> CardResult<()> {
        if is_blank(self.name) {
            return Err(CardError::invalid_input(
                "achievement name must be non-empty",
            ));
        }
        if is_blank(self.description) {
            return Err(CardError::invalid_input(
                "achievement description must be non-empty",
            ));
        }
        Ok(())
    }
}

fn is_blank(s: &str) -> bool {
    s.chars().all(|c| c.is_whitespace() || c.is_control())
}

/// Renders achievement cards onto a fixed-layout canvas.
///
/// Holds the resolved fonts and the Parley contexts; `compose` itself is
/// deterministic, so identical requests produce pixel-identical rasters.
pub struct Composer {
    fonts: FontSet,
    text: TextLayoutEngine,
}

impl Composer {
    pub fn new(fonts: FontSet) -> Self {
        Self {
            fonts,
            text: TextLayoutEngine::new(),
        }
    }

    /// Compose a card: background (golden border and glow when rare), icon in
    /// the left slot, name and description stacked right of the icon.
    #[tracing::instrument(skip(self, request), fields(rare = request.rare))]
    pub fn compose(&mut self, request: &CardRequest<'_>) -> CardResult<Raster> {
        request.validate()?;

        let mut surface = CpuSurface::new(Layout::CANVAS_WIDTH, Layout::CANVAS_HEIGHT)?;
        self.draw_card(&mut surface, request)?;
        surface.finish()
    }

    fn draw_card(&mut self, surface: &mut dyn Surface, request: &CardRequest<'_>) -> CardResult<()> {
        let full = kurbo::Rect::new(
            0.0,
            0.0,
            Layout::CANVAS_WIDTH as f64,
            Layout::CANVAS_HEIGHT as f64,
        );

        if request.rare {
            // Gold shows only in the border ring; the interior gets the usual
            // panel plus a translucent glow fading downwards.
            surface.fill_rect(full, Palette::GOLD);
            let inner = kurbo::Rect::new(
                Layout::BORDER_PX,
                Layout::BORDER_PX,
                full.x1 - Layout::BORDER_PX,
                full.y1 - Layout::BORDER_PX,
            );
            surface.fill_rect(inner, Palette::PANEL);
            surface.fill_rect_vgradient(inner, Palette::GLOW_TOP, Palette::GLOW_BOTTOM)?;
        } else {
            surface.fill_rect(full, Palette::PANEL);
        }

        let icon = prepare_icon(request.icon, Layout::ICON_SIZE)?;
        surface.draw_icon(&icon, Layout::ICON_X, Layout::ICON_Y)?;

        let max_width = Layout::text_width() as f32;
        let name = self.text.layout_plain(
            request.name,
            &self.fonts.bold,
            Layout::NAME_SIZE_PX,
            Palette::NAME_TEXT,
            Some(max_width),
        )?;
        let description = self.text.layout_plain(
            request.description,
            &self.fonts.regular,
            Layout::DESC_SIZE_PX,
            Palette::DESC_TEXT,
            Some(max_width),
        )?;

        surface.draw_text(&name, Layout::TEXT_X, Layout::TEXT_Y);
        let desc_y = Layout::TEXT_Y + f64::from(name.height()) + Layout::TEXT_GAP;
        surface.draw_text(&description, Layout::TEXT_X, desc_y);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_name_is_invalid() {
        let req = CardRequest {
            name: "   ",
            description: "d",
            icon: &[],
            rare: false,
        };
        assert!(matches!(
            req.validate().unwrap_err(),
            CardError::InvalidInput(_)
        ));
    }

    #[test]
    fn blank_description_is_invalid() {
        let req = CardRequest {
            name: "n",
            description: "\t\n",
            icon: &[],
            rare: false,
        };
        assert!(matches!(
            req.validate().unwrap_err(),
            CardError::InvalidInput(_)
        ));
    }

    #[test]
    fn printable_text_passes_validation() {
        let req = CardRequest {
            name: "Speedrunner",
            description: "Finish the game in under 1 hour",
            icon: &[],
            rare: true,
        };
        req.validate().unwrap();
    }
}
