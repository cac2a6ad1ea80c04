use std::io::Cursor;

use achievegen::{CardError, CardRequest, Composer, FontSet, Layout, Raster};

fn fonts_or_skip() -> Option<FontSet> {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    match FontSet::resolve(None, None) {
        Ok(f) => Some(f),
        Err(e) => {
            eprintln!("skipping: {e}");
            None
        }
    }
}

fn solid_icon_png(r: u8, g: u8, b: u8) -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(128, 128, image::Rgba([r, g, b, 255]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

fn px(raster: &Raster, x: u32, y: u32) -> [u8; 4] {
    let off = ((y * raster.width + x) * 4) as usize;
    raster.data[off..off + 4].try_into().unwrap()
}

#[test]
fn compose_returns_fixed_canvas_dimensions() {
    let Some(fonts) = fonts_or_skip() else { return };
    let icon = solid_icon_png(0, 200, 0);
    let mut composer = Composer::new(fonts);

    let out = composer
        .compose(&CardRequest {
            name: "Speedrunner",
            description: "Finish the game in under 1 hour",
            icon: &icon,
            rare: false,
        })
        .unwrap();

    assert_eq!(out.width, Layout::CANVAS_WIDTH);
    assert_eq!(out.height, Layout::CANVAS_HEIGHT);
    assert_eq!(
        out.data.len(),
        (Layout::CANVAS_WIDTH * Layout::CANVAS_HEIGHT * 4) as usize
    );
}

#[test]
fn compose_is_deterministic() {
    let Some(fonts) = fonts_or_skip() else { return };
    let icon = solid_icon_png(0, 200, 0);
    let req = CardRequest {
        name: "Speedrunner",
        description: "Finish the game in under 1 hour",
        icon: &icon,
        rare: true,
    };

    let mut composer = Composer::new(fonts);
    let a = composer.compose(&req).unwrap();
    let b = composer.compose(&req).unwrap();
    assert_eq!(a, b);
}

#[test]
fn rare_card_has_golden_border_and_identical_icon_region() {
    let Some(fonts) = fonts_or_skip() else { return };
    let icon = solid_icon_png(0, 200, 0);
    let mut composer = Composer::new(fonts);

    let base = CardRequest {
        name: "Speedrunner",
        description: "Finish the game in under 1 hour",
        icon: &icon,
        rare: false,
    };
    let plain = composer.compose(&base).unwrap();
    let rare = composer.compose(&CardRequest { rare: true, ..base }).unwrap();

    // Border ring pixel: golden on the rare card, dark panel otherwise.
    let plain_border = px(&plain, 1, 1);
    let rare_border = px(&rare, 1, 1);
    assert!(
        rare_border[0] > 200 && rare_border[1] > 150 && rare_border[2] < 80,
        "rare border should be gold: {rare_border:?}"
    );
    assert!(
        plain_border[0] < 80 && plain_border[1] < 80 && plain_border[2] < 80,
        "plain border should be dark: {plain_border:?}"
    );
    assert_ne!(plain_border, rare_border);

    // The icon sits on top of the glow, so its interior is unchanged.
    let cx = Layout::ICON_X as u32 + Layout::ICON_SIZE / 2;
    let cy = Layout::ICON_Y as u32 + Layout::ICON_SIZE / 2;
    assert_eq!(px(&plain, cx, cy), px(&rare, cx, cy));
    assert!(px(&plain, cx, cy)[1] > 150, "icon center should be green");
}

#[test]
fn long_text_stays_inside_the_canvas() {
    let Some(fonts) = fonts_or_skip() else { return };
    let icon = solid_icon_png(0, 200, 0);
    let mut composer = Composer::new(fonts);

    // Wrapped lines must not change the output dimensions or panic.
    let out = composer
        .compose(&CardRequest {
            name: "An Extremely Long Achievement Name That Certainly Wraps Over Lines",
            description: "A very long description repeated. ".repeat(8).as_str(),
            icon: &icon,
            rare: false,
        })
        .unwrap();
    assert_eq!(out.width, Layout::CANVAS_WIDTH);
    assert_eq!(out.height, Layout::CANVAS_HEIGHT);
}

#[test]
fn empty_name_is_invalid_input() {
    let Some(fonts) = fonts_or_skip() else { return };
    let icon = solid_icon_png(0, 200, 0);
    let mut composer = Composer::new(fonts);

    let err = composer
        .compose(&CardRequest {
            name: "",
            description: "d",
            icon: &icon,
            rare: false,
        })
        .unwrap_err();
    assert!(matches!(err, CardError::InvalidInput(_)));
}

#[test]
fn empty_description_is_invalid_input() {
    let Some(fonts) = fonts_or_skip() else { return };
    let icon = solid_icon_png(0, 200, 0);
    let mut composer = Composer::new(fonts);

    let err = composer
        .compose(&CardRequest {
            name: "n",
            description: "  ",
            icon: &icon,
            rare: false,
        })
        .unwrap_err();
    assert!(matches!(err, CardError::InvalidInput(_)));
}

#[test]
fn corrupt_icon_is_an_image_decode_error() {
    let Some(fonts) = fonts_or_skip() else { return };
    let mut composer = Composer::new(fonts);

    let err = composer
        .compose(&CardRequest {
            name: "n",
            description: "d",
            icon: b"not an image at all",
            rare: false,
        })
        .unwrap_err();
    assert!(matches!(err, CardError::ImageDecode(_)));
}
