use eframe::epaint::{Rect, Vec2};

pub trait Truncate {
    fn truncate(&self, max_length: usize) -> String;
}

impl<T> Truncate for T
where
    T: ToString + std::fmt::Display,
{
    fn truncate(&self, max_length: usize) -> String {
        let string = self.to_string();
        if string.chars().count() > max_length {
            format!("{}…", string.chars().take(max_length).collect::<String>())
        } else {
            string
        }
    }
}

pub trait RectExt {
    fn constrain_to(&self, rect: Rect) -> Rect;
    fn fit_within(&self, container: Rect) -> Rect;
    fn scale_from_origin(&self, scale: f32) -> Rect;
    fn to_world_space(&self, parent: Rect) -> Rect;
}

impl RectExt for Rect {
    fn constrain_to(&self, rect: Rect) -> Rect {
        let mut constrained = *self;
        if constrained.left() < rect.left() {
            constrained = constrained.translate(Vec2::new(rect.left() - constrained.left(), 0.0));
        }
        if constrained.right() > rect.right() {
            constrained = constrained.translate(Vec2::new(rect.right() - constrained.right(), 0.0));
        }
        if constrained.top() < rect.top() {
            constrained = constrained.translate(Vec2::new(0.0, rect.top() - constrained.top()));
        }
        if constrained.bottom() > rect.bottom() {
            constrained =
                constrained.translate(Vec2::new(0.0, rect.bottom() - constrained.bottom()));
        }
        constrained
    }

    /// Largest rect with this rect's aspect ratio that fits inside `container`, centered in it.
    fn fit_within(&self, container: Rect) -> Rect {
        if self.width() <= 0.0 || self.height() <= 0.0 {
            return Rect::from_center_size(container.center(), Vec2::ZERO);
        }

        let scale = (container.width() / self.width()).min(container.height() / self.height());
        Rect::from_center_size(container.center(), self.size() * scale)
    }

    fn scale_from_origin(&self, scale: f32) -> Rect {
        Rect::from_min_max(
            (self.min.to_vec2() * scale).to_pos2(),
            (self.max.to_vec2() * scale).to_pos2(),
        )
    }

    fn to_world_space(&self, parent: Rect) -> Rect {
        let mut world = *self;
        world.min += parent.min.to_vec2();
        world.max += parent.min.to_vec2();
        world
    }
}

pub trait Toggle {
    fn toggle(&mut self);
}

impl Toggle for bool {
    fn toggle(&mut self) {
        *self = !*self;
    }
}
