//! I/O helpers for images and JSON.
//!
//! - `load_image`: decode a PNG/JPEG/etc. into RGB plus an 8-bit gray plane.
//! - `save_rgb_image`: write an RGB buffer (heat or overlay) to disk.
//! - `save_grayscale_f32`: write a `[0, 1]` float map as grayscale PNG.
//! - `write_json_file` / `read_json_file`: pretty JSON persistence.
use super::{ImageF32, ImageU8, ImageView};
use crate::error::{InspectError, Result};
use image::{DynamicImage, GrayImage, Luma, RgbImage};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Owned 8-bit grayscale buffer with stride and borrowed view conversion.
#[derive(Clone, Debug)]
pub struct GrayImageU8 {
    width: usize,
    height: usize,
    stride: usize,
    data: Vec<u8>,
}

impl GrayImageU8 {
    /// Construct an owned grayscale buffer given raw bytes.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Self {
        let stride = width;
        Self {
            width,
            height,
            stride,
            data,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Borrow as a read-only `ImageU8` view
    pub fn as_view(&self) -> ImageU8<'_> {
        ImageU8 {
            w: self.width,
            h: self.height,
            stride: self.stride,
            data: &self.data,
        }
    }
}

/// A decoded image: the color pixels used for overlays and the gray plane
/// used for signal extraction.
#[derive(Clone, Debug)]
pub struct LoadedImage {
    pub source: PathBuf,
    pub rgb: RgbImage,
    pub gray: GrayImageU8,
}

impl LoadedImage {
    /// Wrap an already decoded image. Zero-sized images are rejected.
    pub fn from_dynamic(source: impl Into<PathBuf>, image: DynamicImage) -> Result<Self> {
        let source = source.into();
        if image.width() == 0 || image.height() == 0 {
            return Err(InspectError::EmptyImage { path: source });
        }
        let rgb = image.to_rgb8();
        let luma = image.to_luma8();
        let (w, h) = (luma.width() as usize, luma.height() as usize);
        let gray = GrayImageU8::new(w, h, luma.into_raw());
        Ok(Self { source, rgb, gray })
    }

    pub fn width(&self) -> usize {
        self.gray.width()
    }

    pub fn height(&self) -> usize {
        self.gray.height()
    }
}

/// Load an image from disk. Unreadable paths and corrupt or unsupported
/// files both surface as `InspectError::Decode`.
pub fn load_image(path: &Path) -> Result<LoadedImage> {
    let image = image::open(path).map_err(|source| InspectError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    LoadedImage::from_dynamic(path, image)
}

/// Save an RGB buffer; the format follows the file extension.
pub fn save_rgb_image(image: &RgbImage, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    image.save(path).map_err(|source| InspectError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// Save a float image to a grayscale PNG, mapping `[0, 1]` onto `[0, 255]`.
pub fn save_grayscale_f32(image: &ImageF32, path: &Path) -> Result<()> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(image.w as u32, image.h as u32);
    for y in 0..image.h {
        let row = image.row(y);
        for (x, &px) in row.iter().enumerate() {
            let v = (px * 255.0).clamp(0.0, 255.0);
            out.put_pixel(x as u32, y as u32, Luma([v as u8]));
        }
    }
    out.save(path).map_err(|source| InspectError::Encode {
        path: path.to_path_buf(),
        source,
    })
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| InspectError::json(path.display().to_string(), e))?;
    fs::write(path, json).map_err(|e| InspectError::io(path, e))
}

/// Read and deserialize a JSON file.
pub fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path).map_err(|e| InspectError::io(path, e))?;
    serde_json::from_str(&data).map_err(|e| InspectError::json(path.display().to_string(), e))
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| InspectError::io(parent, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn missing_file_is_a_decode_error() {
        let err = load_image(Path::new("definitely/not/here.png")).unwrap_err();
        assert!(matches!(err, InspectError::Decode { .. }), "got {err:?}");
    }

    #[test]
    fn corrupt_file_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.png");
        fs::write(&path, b"not a png at all").unwrap();
        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, InspectError::Decode { .. }), "got {err:?}");
    }

    #[test]
    fn zero_sized_image_is_rejected() {
        let err = LoadedImage::from_dynamic("empty.png", DynamicImage::new_rgb8(0, 4)).unwrap_err();
        assert!(matches!(err, InspectError::EmptyImage { .. }));
    }

    #[test]
    fn saved_rgb_image_decodes_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.png");
        let img = RgbImage::from_pixel(4, 3, Rgb([10, 20, 30]));
        save_rgb_image(&img, &path).unwrap();
        let loaded = load_image(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (4, 3));
        assert_eq!(loaded.rgb.get_pixel(2, 1), &Rgb([10, 20, 30]));
    }
}
