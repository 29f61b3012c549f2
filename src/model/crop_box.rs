use eframe::epaint::{Pos2, Rect, Vec2};

use crate::utils::RectExt;

/// One of the four corner handles of the crop box.
#[derive(Debug, Clone, PartialEq, Eq, Copy)]
pub enum CropHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl CropHandle {
    pub const ALL: [CropHandle; 4] = [
        CropHandle::TopLeft,
        CropHandle::TopRight,
        CropHandle::BottomLeft,
        CropHandle::BottomRight,
    ];

    pub fn corner_of(&self, rect: Rect) -> Pos2 {
        match self {
            CropHandle::TopLeft => rect.left_top(),
            CropHandle::TopRight => rect.right_top(),
            CropHandle::BottomLeft => rect.left_bottom(),
            CropHandle::BottomRight => rect.right_bottom(),
        }
    }

    /// Unit direction pointing from the anchored corner towards this handle.
    fn outward(&self) -> Vec2 {
        match self {
            CropHandle::TopLeft => Vec2::new(-1.0, -1.0),
            CropHandle::TopRight => Vec2::new(1.0, -1.0),
            CropHandle::BottomLeft => Vec2::new(-1.0, 1.0),
            CropHandle::BottomRight => Vec2::new(1.0, 1.0),
        }
    }

    fn opposite(&self) -> CropHandle {
        match self {
            CropHandle::TopLeft => CropHandle::BottomRight,
            CropHandle::TopRight => CropHandle::BottomLeft,
            CropHandle::BottomLeft => CropHandle::TopRight,
            CropHandle::BottomRight => CropHandle::TopLeft,
        }
    }
}

/// Integer pixel rectangle used to cut the sub-image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRegion {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Square selection in image pixel space. Always lies within the image bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct CropBox {
    rect: Rect,
    bounds: Rect,
}

impl CropBox {
    pub const MIN_SIDE: f32 = 16.0;

    pub fn centered(image_size: Vec2, side: f32) -> Self {
        let bounds = Rect::from_min_size(Pos2::ZERO, image_size);
        let side = side
            .min(Self::max_side_for(bounds))
            .max(Self::min_side_for(bounds));

        Self {
            rect: Rect::from_center_size(bounds.center(), Vec2::splat(side)),
            bounds,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.rect = self.rect.translate(delta).constrain_to(self.bounds);
    }

    /// Resizes from `handle` while the opposite corner stays put. The larger outward
    /// component of `delta` drives both axes so the box stays square.
    pub fn resize(&mut self, handle: CropHandle, delta: Vec2) {
        let anchor = handle.opposite().corner_of(self.rect);
        let outward = handle.outward();

        let grow = (delta.x * outward.x).max(delta.y * outward.y);

        let room_x = if outward.x > 0.0 {
            self.bounds.max.x - anchor.x
        } else {
            anchor.x - self.bounds.min.x
        };
        let room_y = if outward.y > 0.0 {
            self.bounds.max.y - anchor.y
        } else {
            anchor.y - self.bounds.min.y
        };
        let max_side = room_x.min(room_y);
        let min_side = Self::min_side_for(self.bounds).min(max_side);

        let side = (self.rect.width() + grow).clamp(min_side, max_side);

        self.rect = Rect::from_two_pos(anchor, anchor + outward * side);
    }

    pub fn pixel_region(&self) -> PixelRegion {
        let image_width = self.bounds.width().round().max(1.0) as u32;
        let image_height = self.bounds.height().round().max(1.0) as u32;

        // One rounded side for both axes, the float extents can differ by an ulp
        let side = (self.rect.width().round() as u32).clamp(1, image_width.min(image_height));
        let x = (self.rect.min.x.round().max(0.0) as u32).min(image_width - side);
        let y = (self.rect.min.y.round().max(0.0) as u32).min(image_height - side);

        PixelRegion {
            x,
            y,
            width: side,
            height: side,
        }
    }

    fn max_side_for(bounds: Rect) -> f32 {
        bounds.width().min(bounds.height())
    }

    fn min_side_for(bounds: Rect) -> f32 {
        Self::MIN_SIDE.min(Self::max_side_for(bounds))
    }
}
