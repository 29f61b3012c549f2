use eframe::egui::{Sense, Ui};
use eframe::epaint::{Color32, Pos2, Rect};

use crate::model::crop_box::PixelRegion;
use crate::session::EditSession;
use crate::theme::color;
use crate::utils::RectExt;
use crate::widget::transformable::{CropTransformWidget, box_screen_rect};

#[derive(Debug, Clone, PartialEq, Copy)]
pub enum CropResponse {
    None,
    Changed,
    Settled(PixelRegion),
}

/// Image canvas with the crop box overlay. The image is fitted into the available
/// space and everything outside the crop box is dimmed.
pub struct Crop<'a> {
    pub session: &'a mut EditSession,
    pub available_rect: Rect,
}

impl<'a> Crop<'a> {
    const PADDING: f32 = 16.0;

    pub fn new(session: &'a mut EditSession, available_rect: Rect) -> Self {
        Self {
            session,
            available_rect,
        }
    }

    pub fn show(&mut self, ui: &mut Ui) -> CropResponse {
        ui.allocate_rect(self.available_rect, Sense::hover());

        ui.painter()
            .rect_filled(self.available_rect, 0.0, color::CANVAS_BACKGROUND);

        let image_size = self.session.image_size();
        let display_rect = Rect::from_min_size(Pos2::ZERO, image_size)
            .fit_within(self.available_rect.shrink(Self::PADDING));
        if display_rect.width() <= 0.0 || image_size.x <= 0.0 {
            return CropResponse::None;
        }
        let scale = display_rect.width() / image_size.x;

        let transform_response = CropTransformWidget::new(
            &mut self.session.transform,
            &mut self.session.crop_box,
        )
        .interact(ui, display_rect, scale);

        let texture_id = self.session.texture.id();
        let uv = Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0));
        let painter = ui.painter();

        painter.image(texture_id, display_rect, uv, Color32::WHITE);
        painter.rect_filled(display_rect, 0.0, color::outside_crop_dim());

        // Undimmed copy of the image, clipped to the crop box
        painter
            .with_clip_rect(box_screen_rect(&self.session.crop_box, display_rect, scale))
            .image(texture_id, display_rect, uv, Color32::WHITE);

        CropTransformWidget::new(&mut self.session.transform, &mut self.session.crop_box)
            .paint(ui, display_rect, scale);

        if transform_response.ended {
            CropResponse::Settled(self.session.crop_box.pixel_region())
        } else if transform_response.changed {
            CropResponse::Changed
        } else {
            CropResponse::None
        }
    }
}

