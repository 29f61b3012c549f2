use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

use fast_image_resize::{
    FilterType, ImageBufferError, PixelType, ResizeAlg, ResizeError, ResizeOptions, Resizer,
    images::Image,
};
use image::{
    DynamicImage, ExtendedColorType, ImageEncoder, ImageFormat, ImageReader, RgbaImage,
    codecs::jpeg::JpegEncoder,
};
use log::{debug, info, warn};

use crate::model::{crop_box::PixelRegion, target_size::TargetSize};

/// Extensions offered by the open dialog.
pub const OPEN_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp"];

#[derive(Debug, thiserror::Error)]
pub enum CropError {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("{} is not a supported image or is corrupt: {source}", path.display())]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("Image has no pixels")]
    EmptyImage,
    #[error("Crop region {region:?} lies outside the {width}x{height} image")]
    OutOfBounds {
        region: PixelRegion,
        width: u32,
        height: u32,
    },
    #[error("Invalid pixel buffer: {0}")]
    Buffer(#[from] ImageBufferError),
    #[error("Resampling failed: {0}")]
    Resize(#[from] ResizeError),
    #[error("Cannot write {}: unsupported image format", path.display())]
    UnsupportedFormat { path: PathBuf },
    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        source: image::ImageError,
    },
}

pub struct SourceImage {
    path: PathBuf,
    image: DynamicImage,
}

impl SourceImage {
    pub fn open(path: &Path) -> Result<Self, CropError> {
        let read_error = |source| CropError::Read {
            path: path.to_path_buf(),
            source,
        };

        let image = ImageReader::open(path)
            .map_err(read_error)?
            .with_guessed_format()
            .map_err(read_error)?
            .decode()
            .map_err(|source| CropError::Decode {
                path: path.to_path_buf(),
                source,
            })?;

        if image.width() == 0 || image.height() == 0 {
            return Err(CropError::EmptyImage);
        }

        info!(
            "Loaded {:?} ({}x{}, {:?})",
            path,
            image.width(),
            image.height(),
            image.color()
        );

        Ok(Self {
            path: path.to_path_buf(),
            image,
        })
    }

    #[cfg(test)]
    pub fn from_image(path: impl Into<PathBuf>, image: DynamicImage) -> Self {
        Self {
            path: path.into(),
            image,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn crop(&self, region: PixelRegion) -> Result<DynamicImage, CropError> {
        let fits_horizontally = region
            .x
            .checked_add(region.width)
            .is_some_and(|right| right <= self.width());
        let fits_vertically = region
            .y
            .checked_add(region.height)
            .is_some_and(|bottom| bottom <= self.height());

        if region.width == 0 || region.height == 0 || !fits_horizontally || !fits_vertically {
            return Err(CropError::OutOfBounds {
                region,
                width: self.width(),
                height: self.height(),
            });
        }

        Ok(self
            .image
            .crop_imm(region.x, region.y, region.width, region.height))
    }

    /// Crops `region` and resamples it to exactly `target`.
    pub fn export(&self, region: PixelRegion, target: TargetSize) -> Result<DynamicImage, CropError> {
        let cropped = self.crop(region)?;
        debug!(
            "Resampling {}x{} crop to {}",
            cropped.width(),
            cropped.height(),
            target
        );
        resample(&cropped, target.pixels(), target.pixels())
    }

    /// Display copy whose longer side is at most `max_side`.
    pub fn preview(&self, max_side: u32) -> Result<RgbaImage, CropError> {
        let longer_side = self.width().max(self.height());
        if longer_side <= max_side {
            return Ok(self.image.to_rgba8());
        }

        let scale = max_side as f32 / longer_side as f32;
        let width = ((self.width() as f32 * scale).round() as u32).max(1);
        let height = ((self.height() as f32 * scale).round() as u32).max(1);

        Ok(resample(&self.image, width, height)?.to_rgba8())
    }
}

pub fn resample(image: &DynamicImage, width: u32, height: u32) -> Result<DynamicImage, CropError> {
    if width == 0 || height == 0 || image.width() == 0 || image.height() == 0 {
        return Err(CropError::EmptyImage);
    }

    let rgba = image.to_rgba8();
    let src_image = Image::from_vec_u8(rgba.width(), rgba.height(), rgba.into_raw(), PixelType::U8x4)?;
    let mut dst_image = Image::new(width, height, PixelType::U8x4);

    let mut resizer = Resizer::new();
    resizer.resize(
        &src_image,
        &mut dst_image,
        &ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3)),
    )?;

    let buffer = RgbaImage::from_raw(width, height, dst_image.into_vec()).ok_or(CropError::EmptyImage)?;
    Ok(DynamicImage::ImageRgba8(buffer))
}

/// Writes `image` with the encoder matching the path's extension (`.jpg` is appended
/// when there is none) and returns the path actually written.
pub fn save_image(image: &DynamicImage, path: &Path, jpeg_quality: u8) -> Result<PathBuf, CropError> {
    let path = if path.extension().is_none() {
        path.with_extension("jpg")
    } else {
        path.to_path_buf()
    };

    let format = match ImageFormat::from_path(&path) {
        Ok(format) if format.writing_enabled() => format,
        _ => return Err(CropError::UnsupportedFormat { path }),
    };

    let file = File::create(&path).map_err(|source| CropError::Write {
        path: path.clone(),
        source,
    })?;

    if let Err(error) = write_encoded(image, format, file, &path, jpeg_quality) {
        if let Err(remove_error) = std::fs::remove_file(&path) {
            warn!("Could not remove partial file {:?}: {}", path, remove_error);
        }
        return Err(error);
    }

    info!(
        "Saved {}x{} {:?} to {:?}",
        image.width(),
        image.height(),
        format,
        path
    );
    Ok(path)
}

fn write_encoded(
    image: &DynamicImage,
    format: ImageFormat,
    file: File,
    path: &Path,
    jpeg_quality: u8,
) -> Result<(), CropError> {
    let encode_error = |source| CropError::Encode {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(file);

    match format {
        ImageFormat::Jpeg => {
            let rgb = image.to_rgb8();
            JpegEncoder::new_with_quality(&mut writer, jpeg_quality.clamp(1, 100))
                .write_image(rgb.as_raw(), rgb.width(), rgb.height(), ExtendedColorType::Rgb8)
                .map_err(encode_error)?;
        }
        _ => {
            DynamicImage::ImageRgba8(image.to_rgba8())
                .write_to(&mut writer, format)
                .map_err(encode_error)?;
        }
    }

    writer.flush().map_err(|source| CropError::Write {
        path: path.to_path_buf(),
        source,
    })
}
