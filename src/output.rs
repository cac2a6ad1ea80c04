use std::path::{Path, PathBuf};

use crate::error::{CardError, CardResult};
use crate::surface::Raster;

/// Write the raster as a PNG under `dir` using the timestamped naming scheme
/// `achievement_<YYYYMMDD_HHMMSS>.png`, creating the directory if absent.
///
/// A numeric suffix disambiguates invocations that land in the same second.
pub fn write_card(raster: &Raster, dir: &Path) -> CardResult<PathBuf> {
    std::fs::create_dir_all(dir).map_err(|e| {
        CardError::output_write(format!("create output dir '{}': {e}", dir.display()))
    })?;

    let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S").to_string();
    let path = unique_path(dir, &stamp);
    write_png(raster, &path)?;
    Ok(path)
}

/// Write the raster as a PNG to an explicit path, creating parent directories.
pub fn write_card_to(raster: &Raster, path: &Path) -> CardResult<PathBuf> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            CardError::output_write(format!("create output dir '{}': {e}", parent.display()))
        })?;
    }
    write_png(raster, path)?;
    Ok(path.to_path_buf())
}

fn unique_path(dir: &Path, stamp: &str) -> PathBuf {
    let base = dir.join(format!("achievement_{stamp}.png"));
    if !base.exists() {
        return base;
    }
    for n in 1u32.. {
        let p = dir.join(format!("achievement_{stamp}_{n}.png"));
        if !p.exists() {
            return p;
        }
    }
    unreachable!("u32 suffix space exhausted");
}

fn write_png(raster: &Raster, path: &Path) -> CardResult<()> {
    image::save_buffer_with_format(
        path,
        &raster.data,
        raster.width,
        raster.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| CardError::output_write(format!("write png '{}': {e}", path.display())))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_raster() -> Raster {
        Raster {
            width: 2,
            height: 2,
            data: vec![255u8; 2 * 2 * 4],
        }
    }

    #[test]
    fn timestamped_name_matches_pattern() {
        let dir = PathBuf::from("target").join("output_unit").join("stamped");
        let _ = std::fs::remove_dir_all(&dir);

        let path = write_card(&tiny_raster(), &dir).unwrap();
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("achievement_"));
        assert!(name.ends_with(".png"));
        assert!(path.exists());
    }

    #[test]
    fn same_second_invocations_do_not_collide() {
        let dir = PathBuf::from("target").join("output_unit").join("collide");
        let _ = std::fs::remove_dir_all(&dir);

        let a = write_card(&tiny_raster(), &dir).unwrap();
        let b = write_card(&tiny_raster(), &dir).unwrap();
        assert_ne!(a, b);
        assert!(a.exists() && b.exists());
    }

    #[test]
    fn explicit_path_creates_parents() {
        let path = PathBuf::from("target")
            .join("output_unit")
            .join("nested")
            .join("card.png");
        let _ = std::fs::remove_file(&path);

        let written = write_card_to(&tiny_raster(), &path).unwrap();
        assert_eq!(written, path);
        assert!(path.exists());
    }

    #[test]
    fn unwritable_dir_is_an_output_write_error() {
        let dir = Path::new("/proc/achievegen_cannot_write_here");
        let err = write_card(&tiny_raster(), dir).unwrap_err();
        assert!(matches!(err, CardError::OutputWrite(_)));
    }
}
