#![forbid(unsafe_code)]

pub mod card;
pub mod error;
pub mod icon;
pub mod output;
pub mod surface;
pub mod text;
pub mod theme;

pub use card::{CardRequest, Composer};
pub use error::{CardError, CardResult};
pub use surface::Raster;
pub use theme::{FontSet, Layout, Palette, Rgba8};
