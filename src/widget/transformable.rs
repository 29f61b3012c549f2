use eframe::{
    egui::{CursorIcon, Id, Sense, Ui, WidgetInfo, WidgetType},
    epaint::{Color32, Pos2, Rect, Stroke, StrokeKind, Vec2},
};
use log::debug;

use crate::{
    model::crop_box::{CropBox, CropHandle},
    theme::color,
    utils::RectExt,
};

impl CropHandle {
    fn cursor(&self) -> CursorIcon {
        match self {
            CropHandle::TopLeft => CursorIcon::ResizeNorthWest,
            CropHandle::TopRight => CursorIcon::ResizeNorthEast,
            CropHandle::BottomLeft => CursorIcon::ResizeSouthWest,
            CropHandle::BottomRight => CursorIcon::ResizeSouthEast,
        }
    }
}

/// What the current drag is doing to the crop box.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CropTransformState {
    pub active_handle: Option<CropHandle>,
    pub is_moving: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropTransformResponse {
    pub changed: bool,
    pub ended: bool,
}

/// Handle under `pos`, if any. Handles are centred on the box corners.
pub fn handle_at(box_screen_rect: Rect, pos: Pos2, handle_size: Vec2) -> Option<CropHandle> {
    CropHandle::ALL.into_iter().find(|handle| {
        Rect::from_center_size(handle.corner_of(box_screen_rect), handle_size).contains(pos)
    })
}

pub fn box_screen_rect(crop_box: &CropBox, display_rect: Rect, scale: f32) -> Rect {
    crop_box
        .rect()
        .scale_from_origin(scale)
        .to_world_space(display_rect)
}

pub struct CropTransformWidget<'a> {
    pub state: &'a mut CropTransformState,
    pub crop_box: &'a mut CropBox,
}

impl<'a> CropTransformWidget<'a> {
    pub const HANDLE_SIZE: Vec2 = Vec2::splat(12.0);

    pub fn new(state: &'a mut CropTransformState, crop_box: &'a mut CropBox) -> Self {
        Self { state, crop_box }
    }

    /// Applies this frame's drag. `scale` is screen points per image pixel.
    pub fn interact(&mut self, ui: &mut Ui, display_rect: Rect, scale: f32) -> CropTransformResponse {
        let was_dragging = self.state.is_moving || self.state.active_handle.is_some();
        let before = self.crop_box.rect();

        let box_rect = box_screen_rect(self.crop_box, display_rect, scale);

        // Expanded so the half of each handle that sits outside the box is still hit
        let response = ui.interact(
            box_rect.expand(Self::HANDLE_SIZE.x / 2.0),
            Id::new("crop_box_transform"),
            Sense::drag(),
        );
        response.widget_info(|| WidgetInfo::labeled(WidgetType::Other, true, "Crop box"));

        if response.drag_started() {
            let press_pos = ui
                .input(|input| input.pointer.press_origin())
                .or(response.interact_pointer_pos());

            self.state.active_handle =
                press_pos.and_then(|pos| handle_at(box_rect, pos, Self::HANDLE_SIZE));
            self.state.is_moving = self.state.active_handle.is_none()
                && press_pos.is_some_and(|pos| box_rect.contains(pos));
        }

        if response.dragged() && scale > 0.0 {
            let delta = response.drag_delta() / scale;
            match self.state.active_handle {
                Some(handle) => self.crop_box.resize(handle, delta),
                None if self.state.is_moving => self.crop_box.translate(delta),
                None => {}
            }
        } else {
            *self.state = CropTransformState::default();
        }

        let changed = self.crop_box.rect() != before;
        let ended = was_dragging && !response.dragged();
        if ended {
            debug!("Crop box settled at {:?}", self.crop_box.pixel_region());
        }

        self.update_cursor(ui, box_rect);

        CropTransformResponse { changed, ended }
    }

    pub fn paint(&self, ui: &Ui, display_rect: Rect, scale: f32) {
        let box_rect = box_screen_rect(self.crop_box, display_rect, scale);
        let painter = ui.painter();

        painter.rect_stroke(
            box_rect,
            0.0,
            Stroke::new(2.0, color::CROP_OUTLINE),
            StrokeKind::Outside,
        );

        for handle in CropHandle::ALL {
            let handle_rect = Rect::from_center_size(handle.corner_of(box_rect), Self::HANDLE_SIZE);
            painter.rect(
                handle_rect,
                1.0,
                if Some(handle) == self.state.active_handle {
                    color::HANDLE_ACTIVE_FILL
                } else {
                    color::HANDLE_FILL
                },
                Stroke::new(1.0, Color32::BLACK),
                StrokeKind::Outside,
            );
        }
    }

    fn update_cursor(&self, ui: &Ui, box_rect: Rect) {
        if let Some(handle) = self.state.active_handle {
            ui.ctx().set_cursor_icon(handle.cursor());
            return;
        }
        if self.state.is_moving {
            ui.ctx().set_cursor_icon(CursorIcon::Grabbing);
            return;
        }

        if let Some(pos) = ui.ctx().pointer_hover_pos() {
            if let Some(handle) = handle_at(box_rect, pos, Self::HANDLE_SIZE) {
                ui.ctx().set_cursor_icon(handle.cursor());
            } else if box_rect.contains(pos) {
                ui.ctx().set_cursor_icon(CursorIcon::Grab);
            }
        }
    }
}
