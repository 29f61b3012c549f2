use eframe::egui::{
    Align2, Color32, CursorIcon, FontId, Rect, Response, Sense, Stroke, StrokeKind, Ui, Vec2,
    Widget, WidgetInfo, WidgetType,
};

/// Clickable drop zone shown on the canvas while no image is loaded.
pub struct DropPlaceholder {
    size: Vec2,
    color: Color32,
    text: String,
}

impl DropPlaceholder {
    pub fn new(size: Vec2, color: Color32, text: impl Into<String>) -> Self {
        Self {
            size,
            color,
            text: text.into(),
        }
    }
}

impl Widget for DropPlaceholder {
    fn ui(self, ui: &mut Ui) -> Response {
        let rect = Rect::from_min_size(ui.min_rect().min, self.size);
        let response = ui
            .allocate_rect(rect, Sense::click())
            .on_hover_cursor(CursorIcon::PointingHand);
        response.widget_info(|| WidgetInfo::labeled(WidgetType::Button, ui.is_enabled(), &self.text));

        let painter = ui.painter();
        painter.rect_filled(rect, 0.0, self.color);
        painter.rect_stroke(
            rect.shrink(24.0),
            8.0,
            Stroke::new(
                1.5,
                if response.hovered() {
                    Color32::from_gray(160)
                } else {
                    Color32::from_gray(90)
                },
            ),
            StrokeKind::Inside,
        );
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            &self.text,
            FontId::proportional(18.0),
            Color32::from_gray(180),
        );

        response
    }
}
