use std::path::Path;

use eframe::egui::{ColorImage, Context, TextureHandle, TextureOptions};
use eframe::epaint::Vec2;
use image::DynamicImage;

use crate::{
    model::{crop_box::CropBox, target_size::TargetSize},
    source_image::{CropError, SourceImage},
    widget::transformable::CropTransformState,
};

/// Everything tied to the currently loaded image. Dropped when another image is loaded.
pub struct EditSession {
    pub image: SourceImage,
    pub texture: TextureHandle,
    pub crop_box: CropBox,
    pub transform: CropTransformState,
}

impl EditSession {
    pub fn new(
        ctx: &Context,
        image: SourceImage,
        target: TargetSize,
        preview_max_side: u32,
    ) -> Result<Self, CropError> {
        let preview = image.preview(preview_max_side)?;
        let color_image = ColorImage::from_rgba_unmultiplied(
            [preview.width() as usize, preview.height() as usize],
            preview.as_raw(),
        );
        let texture = ctx.load_texture("crop_source", color_image, TextureOptions::LINEAR);

        let crop_box = Self::centered_box(&image, target);

        Ok(Self {
            image,
            texture,
            crop_box,
            transform: CropTransformState::default(),
        })
    }

    pub fn image_size(&self) -> Vec2 {
        Vec2::new(self.image.width() as f32, self.image.height() as f32)
    }

    pub fn path(&self) -> &Path {
        self.image.path()
    }

    /// Replaces the crop box with one of `target`'s side centred on the image.
    pub fn reset_crop(&mut self, target: TargetSize) {
        self.crop_box = Self::centered_box(&self.image, target);
        self.transform = CropTransformState::default();
    }

    pub fn export(&self, target: TargetSize) -> Result<DynamicImage, CropError> {
        self.image.export(self.crop_box.pixel_region(), target)
    }

    fn centered_box(image: &SourceImage, target: TargetSize) -> CropBox {
        CropBox::centered(
            Vec2::new(image.width() as f32, image.height() as f32),
            target.pixels() as f32,
        )
    }
}
