use anyhow::Context as _;

use crate::error::{CardError, CardResult};

/// Icon pixels prepared for the drawing surface: premultiplied RGBA8 at the
/// exact slot size.
#[derive(Clone, Debug)]
pub struct PreparedIcon {
    pub width: u32,
    pub height: u32,
    pub rgba8_premul: Vec<u8>,
}

/// Decode icon bytes and fit them to a square slot of `slot` pixels.
///
/// Raster formats go through `image`; bytes that fail raster decode are retried
/// as SVG. Aspect ratio is preserved by center-cropping the largest centered
/// square before resizing (Lanczos3).
#[tracing::instrument(skip(bytes), fields(len = bytes.len()))]
pub fn prepare_icon(bytes: &[u8], slot: u32) -> CardResult<PreparedIcon> {
    if slot == 0 {
        return Err(CardError::render("icon slot size must be > 0"));
    }

    match image::load_from_memory(bytes) {
        Ok(img) => raster_icon(img, slot),
        Err(raster_err) => match usvg::Tree::from_data(bytes, &usvg::Options::default()) {
            Ok(tree) => svg_icon(&tree, slot),
            Err(_) => Err(CardError::image_decode(format!(
                "icon is neither a decodable raster image nor an SVG: {raster_err}"
            ))),
        },
    }
}

fn raster_icon(img: image::DynamicImage, slot: u32) -> CardResult<PreparedIcon> {
    let rgba = img.to_rgba8();
    let (w, h) = rgba.dimensions();
    if w == 0 || h == 0 {
        return Err(CardError::image_decode("icon has zero width or height"));
    }

    let side = w.min(h);
    let (cx, cy) = ((w - side) / 2, (h - side) / 2);
    let square = image::imageops::crop_imm(&rgba, cx, cy, side, side).to_image();
    let resized = image::imageops::resize(&square, slot, slot, image::imageops::FilterType::Lanczos3);

    let mut rgba8_premul = resized.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedIcon {
        width: slot,
        height: slot,
        rgba8_premul,
    })
}

fn svg_icon(tree: &usvg::Tree, slot: u32) -> CardResult<PreparedIcon> {
    let size = tree.size();
    let (sw, sh) = (size.width(), size.height());
    if !sw.is_finite() || !sh.is_finite() || sw <= 0.0 || sh <= 0.0 {
        return Err(CardError::image_decode("svg icon has invalid width/height"));
    }

    let mut pixmap = resvg::tiny_skia::Pixmap::new(slot, slot)
        .context("allocate svg icon pixmap")
        .map_err(CardError::Other)?;

    // Cover the slot: uniform scale to the larger factor, centered. The
    // overflow on the longer axis is clipped by the pixmap, matching the
    // raster center-crop path.
    let scale = (slot as f32 / sw).max(slot as f32 / sh);
    let tx = (slot as f32 - sw * scale) / 2.0;
    let ty = (slot as f32 - sh * scale) / 2.0;
    let xform = resvg::tiny_skia::Transform::from_scale(scale, scale).post_translate(tx, ty);

    resvg::render(tree, xform, &mut pixmap.as_mut());

    // tiny-skia pixmaps are already premultiplied RGBA8.
    Ok(PreparedIcon {
        width: slot,
        height: slot,
        rgba8_premul: pixmap.data().to_vec(),
    })
}

pub(crate) fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        for c in &mut px[..3] {
            *c = if a == 0 {
                0
            } else {
                ((u16::from(*c) * a + 127) / 255) as u8
            };
        }
    }
}
