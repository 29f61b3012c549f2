use eframe::egui::{Grid, Widget};

use crate::{model::target_size::TargetSize, session::EditSession, utils::Truncate};

const MAX_NAME_LENGTH: usize = 28;

/// File name, source dimensions and the current crop region of the loaded image.
pub struct PhotoInfo<'a> {
    pub session: &'a EditSession,
    pub target: TargetSize,
}

impl<'a> PhotoInfo<'a> {
    pub fn new(session: &'a EditSession, target: TargetSize) -> Self {
        Self { session, target }
    }
}

impl<'a> Widget for PhotoInfo<'a> {
    fn ui(self, ui: &mut eframe::egui::Ui) -> eframe::egui::Response {
        let region = self.session.crop_box.pixel_region();
        let file_name = self
            .session
            .path()
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        let rows = [
            ("File", file_name.as_str().truncate(MAX_NAME_LENGTH)),
            (
                "Image",
                format!("{} x {}", self.session.image.width(), self.session.image.height()),
            ),
            ("Crop", format!("{} x {}", region.width, region.height)),
            ("Offset", format!("{}, {}", region.x, region.y)),
            ("Output", self.target.to_string()),
        ];

        Grid::new("photo_info_grid")
            .striped(true)
            .num_columns(2)
            .show(ui, |ui| {
                for (label, value) in rows {
                    ui.label(label);
                    let value_response = ui.label(value);
                    if label == "File" {
                        value_response.on_hover_text(self.session.path().display().to_string());
                    }
                    ui.end_row();
                }
            })
            .response
    }
}
