use std::sync::Arc;

use crate::error::{CardError, CardResult};
use crate::icon::PreparedIcon;
use crate::text::ShapedText;
use crate::theme::Rgba8;

/// Composed output raster in row-major premultiplied RGBA8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Raster {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

/// Minimal drawing surface the composer paints onto.
///
/// Polymorphic only over the imaging backend, not a domain concept. All
/// coordinates are canvas pixels with the origin at the top left.
pub trait Surface {
    /// Fill `rect` with a solid color.
    fn fill_rect(&mut self, rect: kurbo::Rect, color: Rgba8);

    /// Fill `rect` with a vertical gradient from `top` to `bottom`.
    fn fill_rect_vgradient(&mut self, rect: kurbo::Rect, top: Rgba8, bottom: Rgba8)
    -> CardResult<()>;

    /// Draw prepared icon pixels with their top-left corner at `(x, y)`.
    fn draw_icon(&mut self, icon: &PreparedIcon, x: f64, y: f64) -> CardResult<()>;

    /// Draw a shaped text block with its layout origin at `(x, y)`.
    fn draw_text(&mut self, text: &ShapedText, x: f64, y: f64);

    /// Rasterize all recorded drawing into the final buffer.
    fn finish(&mut self) -> CardResult<Raster>;
}

/// CPU surface backed by `vello_cpu`.
pub struct CpuSurface {
    ctx: vello_cpu::RenderContext,
    width: u16,
    height: u16,
}

impl CpuSurface {
    pub fn new(width: u32, height: u32) -> CardResult<Self> {
        let w: u16 = width
            .try_into()
            .map_err(|_| CardError::render("surface width exceeds u16"))?;
        let h: u16 = height
            .try_into()
            .map_err(|_| CardError::render("surface height exceeds u16"))?;
        if w == 0 || h == 0 {
            return Err(CardError::render("surface dimensions must be > 0"));
        }
        Ok(Self {
            ctx: vello_cpu::RenderContext::new(w, h),
            width: w,
            height: h,
        })
    }
}

impl Surface for CpuSurface {
    fn fill_rect(&mut self, rect: kurbo::Rect, color: Rgba8) {
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            color.r, color.g, color.b, color.a,
        ));
        self.ctx.fill_rect(&rect_to_cpu(rect));
    }

    fn fill_rect_vgradient(
        &mut self,
        rect: kurbo::Rect,
        top: Rgba8,
        bottom: Rgba8,
    ) -> CardResult<()> {
        let w = rect.width().max(1.0) as u32;
        let h = rect.height().max(1.0) as u32;
        let img = vgradient_image(top, bottom, w, h)?;

        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((rect.x0, rect.y0)));
        self.ctx.set_paint(img);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            rect.width(),
            rect.height(),
        ));
        Ok(())
    }

    fn draw_icon(&mut self, icon: &PreparedIcon, x: f64, y: f64) -> CardResult<()> {
        let img = rgba_premul_to_image(&icon.rgba8_premul, icon.width, icon.height)?;
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((x, y)));
        self.ctx.set_paint(img);
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            icon.width as f64,
            icon.height as f64,
        ));
        Ok(())
    }

    fn draw_text(&mut self, text: &ShapedText, x: f64, y: f64) {
        self.ctx
            .set_transform(vello_cpu::kurbo::Affine::translate((x, y)));
        for line in text.layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                let brush = run.style().brush;
                self.ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
                    brush.r, brush.g, brush.b, brush.a,
                ));
                let glyphs = run.glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                });
                self.ctx
                    .glyph_run(&text.font)
                    .font_size(run.run().font_size())
                    .fill_glyphs(glyphs);
            }
        }
    }

    fn finish(&mut self) -> CardResult<Raster> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        Ok(Raster {
            width: u32::from(self.width),
            height: u32::from(self.height),
            data: pixmap.data_as_u8_slice().to_vec(),
        })
    }
}

fn rect_to_cpu(r: kurbo::Rect) -> vello_cpu::kurbo::Rect {
    vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1)
}

/// Wrap premultiplied RGBA8 bytes as an image paint. Pixmaps store
/// `PremulRgba8`, so the bytes go in unchanged.
fn rgba_premul_to_image(bytes: &[u8], width: u32, height: u32) -> CardResult<vello_cpu::Image> {
    let w = u16::try_from(width).map_err(|_| CardError::render("image width exceeds u16"))?;
    let h = u16::try_from(height).map_err(|_| CardError::render("image height exceeds u16"))?;
    let expected = (width as usize)
        .saturating_mul(height as usize)
        .saturating_mul(4);
    if bytes.len() != expected {
        return Err(CardError::render("image byte len mismatch"));
    }

    let pixels: Vec<_> = bytes
        .chunks_exact(4)
        .map(|px| {
            vello_cpu::peniko::color::PremulRgba8::from_u8_array([px[0], px[1], px[2], px[3]])
        })
        .collect();
    let pixmap = vello_cpu::Pixmap::from_parts_with_opacity(pixels, w, h, true);
    Ok(vello_cpu::Image {
        image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
        sampler: vello_cpu::peniko::ImageSampler::default(),
    })
}

fn premul(c: Rgba8) -> [u8; 4] {
    let a = u16::from(c.a);
    let p = |v: u8| -> u8 { ((u16::from(v) * a + 127) / 255) as u8 };
    [p(c.r), p(c.g), p(c.b), c.a]
}

/// Build a `w`x`h` image holding a vertical gradient, interpolated per row in
/// premultiplied space.
fn vgradient_image(top: Rgba8, bottom: Rgba8, w: u32, h: u32) -> CardResult<vello_cpu::Image> {
    let start = premul(top);
    let end = premul(bottom);
    let mut bytes = vec![0u8; (w as usize).saturating_mul(h as usize).saturating_mul(4)];
    let h1 = (h.max(1) - 1) as f32;
    for y in 0..h {
        let t = if h1 <= 0.0 { 0.0 } else { (y as f32) / h1 };
        let lerp = |a: u8, b: u8| -> u8 {
            let af = a as f32;
            let bf = b as f32;
            (af + (bf - af) * t).round().clamp(0.0, 255.0) as u8
        };
        let c = [
            lerp(start[0], end[0]),
            lerp(start[1], end[1]),
            lerp(start[2], end[2]),
            lerp(start[3], end[3]),
        ];
        for x in 0..w {
            let idx = ((y as usize) * (w as usize) + (x as usize)) * 4;
            bytes[idx..idx + 4].copy_from_slice(&c);
        }
    }
    rgba_premul_to_image(&bytes, w, h)
}
