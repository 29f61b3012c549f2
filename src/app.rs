use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use eframe::egui::{
    self, Align2, Button, ComboBox, FontId, Frame, Layout, ScrollArea, Ui, emath::Align,
};
use eframe::epaint::{Color32, Vec2};
use log::{error, info, warn};
use native_dialog::DialogBuilder;
use strum::IntoEnumIterator;

use crate::{
    config::Config,
    modal::{basic::BasicModal, manager::ModalManager},
    model::{
        suggested_filename::{initial_suggested_filename, next_suggested_filename},
        target_size::TargetSize,
    },
    session::EditSession,
    source_image::{OPEN_EXTENSIONS, SourceImage, save_image},
    string_log::StringLog,
    theme::color,
    utils::Toggle,
    widget::{
        crop::{Crop, CropResponse},
        photo_info::PhotoInfo,
        placeholder::DropPlaceholder,
    },
};

const PLACEHOLDER_TEXT: &str = "Click to load an image, or drop one here";

/// Actions a modal can hand back to the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    OpenImage,
    SaveImage,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Status {
    Info(String),
    Success(String),
    Error(String),
}

pub struct CropApp {
    config: Config,
    session: Option<EditSession>,
    target_size: TargetSize,
    suggested_filename: String,
    last_save_dir: Option<PathBuf>,
    status: Option<Status>,
    modals: ModalManager<Command>,
    log: Arc<StringLog>,
    show_log: bool,
}

impl eframe::App for CropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

impl CropApp {
    pub fn new(config: Config, log: Arc<StringLog>) -> Self {
        Self {
            target_size: config.default_target_size,
            suggested_filename: initial_suggested_filename(&config.filename_stem),
            config,
            session: None,
            last_save_dir: None,
            status: None,
            modals: ModalManager::new(),
            log,
            show_log: false,
        }
    }

    pub fn show(&mut self, ctx: &egui::Context) {
        let modal_open = self.modals.is_open();
        if !modal_open {
            self.handle_dropped_files(ctx);
        }

        let mut command = None;

        egui::SidePanel::left("controls")
            .resizable(false)
            .exact_width(240.0)
            .show(ctx, |ui| {
                ui.add_enabled_ui(!modal_open, |ui| {
                    command = self.controls_ui(ui);
                });
            });

        egui::TopBottomPanel::bottom("log")
            .resizable(self.show_log)
            .show(ctx, |ui| self.log_ui(ui));

        egui::CentralPanel::default()
            .frame(Frame::NONE)
            .show(ctx, |ui| {
                ui.add_enabled_ui(!modal_open, |ui| {
                    if let Some(canvas_command) = self.canvas_ui(ui) {
                        command = Some(canvas_command);
                    }
                });
            });

        if let Some(modal_command) = self.modals.show_next(ctx) {
            command = Some(modal_command);
        }

        match command {
            Some(Command::OpenImage) => self.prompt_load(ctx),
            Some(Command::SaveImage) => self.prompt_save(),
            None => {}
        }
    }

    /// Replaces the current session with `path`. On failure the previous session is kept.
    pub fn load_image(&mut self, ctx: &egui::Context, path: &Path) {
        let loaded = SourceImage::open(path).and_then(|image| {
            EditSession::new(
                ctx,
                image,
                self.target_size,
                self.config.preview_max_side,
            )
        });

        match loaded {
            Ok(session) => {
                info!(
                    "Editing {:?}, crop region {:?}",
                    path,
                    session.crop_box.pixel_region()
                );
                self.status = Some(Status::Info(format!("Loaded {}", display_name(path))));
                self.session = Some(session);
            }
            Err(err) => {
                error!("Error loading image {:?}: {}", path, err);
                self.status = Some(Status::Error(format!(
                    "Could not open {}",
                    display_name(path)
                )));
                self.modals.push(
                    BasicModal::new("Could not open image", err.to_string(), "OK")
                        .with_confirm("Choose Another…", Command::OpenImage),
                );
            }
        }
    }

    pub fn set_target_size(&mut self, target_size: TargetSize) {
        if target_size == self.target_size {
            return;
        }

        info!("Output size set to {}", target_size);
        self.target_size = target_size;
        if let Some(session) = &mut self.session {
            session.reset_crop(target_size);
        }
    }

    /// Exports the current crop at the selected size to `path`. Returns the path written.
    pub fn save_to(&mut self, path: &Path) -> Option<PathBuf> {
        let Some(session) = &self.session else {
            warn!("Save requested with no image loaded");
            return None;
        };

        let result = session
            .export(self.target_size)
            .and_then(|image| save_image(&image, path, self.config.jpeg_quality));

        match result {
            Ok(written) => {
                self.status = Some(Status::Success(format!("Saved! {}", written.display())));
                if let Some(file_name) = written.file_name() {
                    self.suggested_filename = file_name.to_string_lossy().to_string();
                }
                self.last_save_dir = written.parent().map(Path::to_path_buf);
                Some(written)
            }
            Err(err) => {
                error!("Error saving crop to {:?}: {}", path, err);
                self.status = Some(Status::Error(format!(
                    "Could not save {}",
                    display_name(path)
                )));
                self.modals.push(
                    BasicModal::new("Could not save image", err.to_string(), "OK")
                        .with_confirm("Save As…", Command::SaveImage),
                );
                None
            }
        }
    }

    fn prompt_load(&mut self, ctx: &egui::Context) {
        let location = self
            .session
            .as_ref()
            .and_then(|session| session.path().parent())
            .map(Path::to_path_buf);

        let mut dialog = DialogBuilder::file().add_filter("Images", OPEN_EXTENSIONS);
        if let Some(location) = &location {
            dialog = dialog.set_location(location);
        }

        match dialog.open_single_file().show() {
            Ok(Some(path)) => self.load_image(ctx, &path),
            Ok(None) => info!("No image selected"),
            Err(e) => {
                error!("Error opening open file dialog: {:?}", e);
                self.status = Some(Status::Error(format!("Could not show the file dialog: {e}")));
            }
        }
    }

    fn prompt_save(&mut self) {
        let Some(session) = &self.session else {
            return;
        };

        self.suggested_filename = next_suggested_filename(&self.suggested_filename);

        let location = self
            .last_save_dir
            .clone()
            .or_else(|| session.path().parent().map(Path::to_path_buf));

        let mut dialog = DialogBuilder::file()
            .set_filename(self.suggested_filename.as_str())
            .add_filter("JPEG Image", ["jpg", "jpeg"])
            .add_filter("PNG Image", ["png"])
            .add_filter("WebP Image", ["webp"])
            .add_filter("BMP Image", ["bmp"]);
        if let Some(location) = &location {
            dialog = dialog.set_location(location);
        }

        match dialog.save_single_file().show() {
            Ok(Some(path)) => {
                self.save_to(&path);
            }
            Ok(None) => info!("No save path selected"),
            Err(e) => {
                error!("Error opening save file dialog: {:?}", e);
                self.status = Some(Status::Error(format!("Could not show the file dialog: {e}")));
            }
        }
    }

    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|input| {
            input
                .raw
                .dropped_files
                .iter()
                .find_map(|file| file.path.clone())
        });

        if let Some(path) = dropped {
            info!("Dropped {:?}", path);
            self.load_image(ctx, &path);
        }
    }

    fn controls_ui(&mut self, ui: &mut Ui) -> Option<Command> {
        let mut command = None;
        let button_size = Vec2::new(ui.available_width(), 40.0);

        ui.add_space(12.0);

        if ui
            .add(Button::new("Load Image").min_size(button_size))
            .clicked()
        {
            command = Some(Command::OpenImage);
        }

        ui.add_space(8.0);

        let mut selected = self.target_size;
        ComboBox::from_label("Output size")
            .selected_text(selected.to_string())
            .show_ui(ui, |ui| {
                for size in TargetSize::iter() {
                    ui.selectable_value(&mut selected, size, size.to_string());
                }
            });
        self.set_target_size(selected);

        ui.add_space(8.0);

        if ui
            .add_enabled(
                self.session.is_some(),
                Button::new("Save Cropped Image").min_size(button_size),
            )
            .clicked()
        {
            command = Some(Command::SaveImage);
        }

        ui.add_space(8.0);

        match &self.status {
            Some(Status::Info(message)) => {
                ui.label(message);
            }
            Some(Status::Success(message)) => {
                ui.colored_label(color::SUCCESS, message);
            }
            Some(Status::Error(message)) => {
                ui.colored_label(color::ERROR, message);
            }
            None => {}
        }

        if let Some(session) = &self.session {
            ui.separator();
            ui.add(PhotoInfo::new(session, self.target_size));
        }

        command
    }

    fn canvas_ui(&mut self, ui: &mut Ui) -> Option<Command> {
        let available_rect = ui.available_rect_before_wrap();

        let command = match &mut self.session {
            Some(session) => {
                match Crop::new(session, available_rect).show(ui) {
                    CropResponse::Settled(region) => {
                        info!(
                            "Crop region {}x{} at {}, {}",
                            region.width, region.height, region.x, region.y
                        );
                    }
                    CropResponse::Changed => ui.ctx().request_repaint(),
                    CropResponse::None => {}
                }
                None
            }
            None => {
                let placeholder = DropPlaceholder::new(
                    available_rect.size(),
                    color::CANVAS_BACKGROUND,
                    PLACEHOLDER_TEXT,
                );
                ui.add(placeholder).clicked().then_some(Command::OpenImage)
            }
        };

        if ui.ctx().input(|input| !input.raw.hovered_files.is_empty()) {
            let painter = ui.painter();
            painter.rect_filled(available_rect, 0.0, Color32::from_black_alpha(180));
            painter.text(
                available_rect.center(),
                Align2::CENTER_CENTER,
                "Drop to load",
                FontId::proportional(24.0),
                Color32::WHITE,
            );
        }

        command
    }

    fn log_ui(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            if ui
                .selectable_label(self.show_log, format!("Log ({})", self.log.len()))
                .clicked()
            {
                self.show_log.toggle();
            }
        });

        if self.show_log {
            ui.with_layout(Layout::top_down(Align::Min).with_cross_justify(true), |ui| {
                ScrollArea::vertical()
                    .stick_to_bottom(true)
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        self.log.for_each(|line| {
                            ui.label(line);
                        });
                    });
            });
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::crop_box::PixelRegion,
        source_image::test_support::{gradient, scratch_dir},
        widget::transformable::CropTransformWidget,
    };
    use eframe::epaint::{Pos2, Rect};
    use egui_kittest::{
        Harness,
        kittest::{NodeT, Queryable},
    };

    fn new_app() -> CropApp {
        CropApp::new(Config::default(), Arc::new(StringLog::new()))
    }

    fn write_fixture(dir: &Path, name: &str, width: u32, height: u32) -> PathBuf {
        let path = dir.join(name);
        gradient(width, height).save(&path).unwrap();
        path
    }

    fn harness(app: CropApp) -> Harness<'static, CropApp> {
        Harness::builder()
            .with_size(Vec2::new(1200.0, 900.0))
            .build_state(|ctx, app: &mut CropApp| app.show(ctx), app)
    }

    #[test]
    fn test_load_centres_box_with_target_side() {
        let dir = scratch_dir("app-load");
        let path = write_fixture(&dir, "photo.png", 3000, 2000);
        let mut app = new_app();

        app.load_image(&egui::Context::default(), &path);

        let session = app.session.as_ref().unwrap();
        let region = session.crop_box.pixel_region();
        assert_eq!((region.width, region.height), (1024, 1024));
        assert_eq!((region.x, region.y), (988, 488));
        assert!(matches!(app.status, Some(Status::Info(_))));
    }

    #[test]
    fn test_changing_target_size_recentres_box() {
        let dir = scratch_dir("app-size");
        let path = write_fixture(&dir, "photo.png", 3000, 2000);
        let mut app = new_app();
        app.load_image(&egui::Context::default(), &path);

        app.set_target_size(TargetSize::Square512);

        let region = app.session.as_ref().unwrap().crop_box.pixel_region();
        assert_eq!((region.width, region.height), (512, 512));
        assert_eq!((region.x, region.y), (1244, 744));
    }

    #[test]
    fn test_corrupt_file_keeps_previous_image() {
        let dir = scratch_dir("app-corrupt-keep");
        let good = write_fixture(&dir, "good.png", 640, 480);
        let bad = dir.join("bad.jpg");
        std::fs::write(&bad, b"\x00\x01\x02 not a jpeg").unwrap();
        let ctx = egui::Context::default();
        let mut app = new_app();

        app.load_image(&ctx, &good);
        app.load_image(&ctx, &bad);

        assert_eq!(app.session.as_ref().unwrap().path(), good.as_path());
        assert_eq!(
            app.status,
            Some(Status::Error("Could not open bad.jpg".to_string()))
        );
        assert!(app.modals.is_open());
    }

    #[test]
    fn test_saved_file_has_selected_size() {
        let dir = scratch_dir("app-save");
        let path = write_fixture(&dir, "photo.png", 900, 700);
        let ctx = egui::Context::default();

        for target in TargetSize::iter() {
            let mut app = new_app();
            app.load_image(&ctx, &path);
            app.set_target_size(target);

            let written = app.save_to(&dir.join(format!("out_{}.jpg", target.pixels())));

            let written = written.unwrap();
            let dimensions = image::image_dimensions(&written).unwrap();
            assert_eq!(dimensions, (target.pixels(), target.pixels()));
            assert_eq!(
                app.suggested_filename,
                format!("out_{}.jpg", target.pixels())
            );
            assert_eq!(app.last_save_dir.as_deref(), Some(dir.as_path()));
        }
    }

    #[test]
    fn test_save_to_unwritable_path_reports_error() {
        let dir = scratch_dir("app-unwritable");
        let path = write_fixture(&dir, "photo.png", 300, 300);
        let mut app = new_app();
        app.load_image(&egui::Context::default(), &path);

        let written = app.save_to(&dir.join("missing").join("out.jpg"));

        assert!(written.is_none());
        assert_eq!(
            app.status,
            Some(Status::Error("Could not save out.jpg".to_string()))
        );
        assert!(app.modals.is_open());
    }

    #[test]
    fn test_save_under_a_regular_file_reports_error() {
        let dir = scratch_dir("app-parent-is-file");
        let path = write_fixture(&dir, "photo.png", 300, 300);
        let mut app = new_app();
        app.load_image(&egui::Context::default(), &path);

        let written = app.save_to(&path.join("out.jpg"));

        assert!(written.is_none());
        assert_eq!(
            app.status,
            Some(Status::Error("Could not save out.jpg".to_string()))
        );
        assert!(app.modals.is_open());
        assert!(app.session.is_some());
    }

    #[test]
    fn test_save_without_image_does_nothing() {
        let dir = scratch_dir("app-save-empty");
        let mut app = new_app();

        assert!(app.save_to(&dir.join("out.jpg")).is_none());
        assert!(!app.modals.is_open());
        assert!(app.status.is_none());
    }

    #[test]
    fn test_placeholder_shown_without_image() {
        let mut harness = harness(new_app());
        harness.run();

        assert!(harness.query_by_label(PLACEHOLDER_TEXT).is_some());
        assert!(harness.query_by_label("Load Image").is_some());
        assert!(harness.query_by_label("File").is_none());
    }

    #[test]
    fn test_save_disabled_without_image() {
        let mut harness = harness(new_app());
        harness.run();

        let save = harness.get_by_label("Save Cropped Image");
        assert!(save.accesskit_node().is_disabled());
    }

    #[test]
    fn test_dropped_file_is_loaded() {
        let dir = scratch_dir("app-ui-drop");
        let path = write_fixture(&dir, "dropped.png", 640, 480);
        let mut harness = harness(new_app());
        harness.run();

        harness.input_mut().dropped_files.push(egui::DroppedFile {
            path: Some(path.clone()),
            ..Default::default()
        });
        harness.run();

        let session = harness.state().session.as_ref();
        assert_eq!(session.map(|session| session.path()), Some(path.as_path()));
        assert!(harness.query_by_label(PLACEHOLDER_TEXT).is_none());
        let save = harness.get_by_label("Save Cropped Image");
        assert!(!save.accesskit_node().is_disabled());
    }

    fn drag(harness: &mut Harness<'static, CropApp>, from: Pos2, to: Pos2) {
        harness.hover_at(from);
        harness.run();
        harness.drag_at(from);
        harness.run();
        harness.hover_at(to);
        harness.run();
        harness.drop_at(to);
        harness.run();
    }

    fn loaded_for_drag(name: &str) -> Harness<'static, CropApp> {
        let dir = scratch_dir(name);
        let path = write_fixture(&dir, "photo.png", 800, 600);
        let mut harness = harness(new_app());
        harness.run();

        let ctx = harness.ctx.clone();
        harness.state_mut().set_target_size(TargetSize::Square512);
        harness.state_mut().load_image(&ctx, &path);
        harness.run();
        harness
    }

    /// Crop box rect on screen and screen points per image pixel.
    fn crop_box_on_screen(harness: &Harness<'static, CropApp>) -> (Rect, f32) {
        let side = harness
            .state()
            .session
            .as_ref()
            .unwrap()
            .crop_box
            .rect()
            .width();
        let screen = harness
            .get_by_label("Crop box")
            .rect()
            .shrink(CropTransformWidget::HANDLE_SIZE.x / 2.0);
        (screen, screen.width() / side)
    }

    fn region(harness: &Harness<'static, CropApp>) -> PixelRegion {
        harness
            .state()
            .session
            .as_ref()
            .unwrap()
            .crop_box
            .pixel_region()
    }

    fn assert_close(actual: u32, expected: f32) {
        assert!(
            (actual as f32 - expected).abs() <= 1.0,
            "{actual} is not within 1px of {expected}"
        );
    }

    #[test]
    fn test_dragging_inside_box_moves_it_by_scaled_delta() {
        let mut harness = loaded_for_drag("app-ui-move");
        let before = region(&harness);
        assert_eq!((before.x, before.y, before.width), (144, 44, 512));
        let (screen, scale) = crop_box_on_screen(&harness);

        let delta = Vec2::new(60.0, 30.0);
        drag(&mut harness, screen.center(), screen.center() + delta);

        let after = region(&harness);
        assert_close(after.x, before.x as f32 + delta.x / scale);
        assert_close(after.y, before.y as f32 + delta.y / scale);
        assert_eq!((after.width, after.height), (512, 512));
        assert!(harness.state().session.as_ref().unwrap().transform == Default::default());
    }

    #[test]
    fn test_dragging_corner_handle_resizes_from_opposite_corner() {
        let mut harness = loaded_for_drag("app-ui-resize");
        let before = region(&harness);
        let (screen, scale) = crop_box_on_screen(&harness);

        // Inward drag, the smaller component (y) drives the shrink
        let delta = Vec2::new(40.0, 20.0);
        drag(&mut harness, screen.left_top(), screen.left_top() + delta);

        let after = region(&harness);
        assert_eq!(after.width, after.height);
        assert_close(after.width, before.width as f32 - delta.y / scale);
        assert_close(after.x + after.width, (before.x + before.width) as f32);
        assert_close(after.y + after.height, (before.y + before.height) as f32);
    }

    #[test]
    fn test_info_shown_after_load() {
        let dir = scratch_dir("app-ui-load");
        let path = write_fixture(&dir, "holiday.png", 800, 600);
        let mut harness = harness(new_app());
        harness.run();

        let ctx = harness.ctx.clone();
        harness.state_mut().load_image(&ctx, &path);
        harness.run();

        assert!(harness.query_by_label(PLACEHOLDER_TEXT).is_none());
        assert!(harness.query_by_label("holiday.png").is_some());
        assert!(harness.query_by_label("800 x 600").is_some());
        assert!(harness.query_by_label("600 x 600").is_some());
    }

    #[test]
    fn test_corrupt_file_shows_dismissable_modal() {
        let dir = scratch_dir("app-ui-corrupt");
        let bad = dir.join("notes.png");
        std::fs::write(&bad, "this is a text file").unwrap();
        let mut harness = harness(new_app());
        harness.run();

        let ctx = harness.ctx.clone();
        harness.state_mut().load_image(&ctx, &bad);
        harness.run();

        assert!(harness.query_by_label("Could not open image").is_some());
        assert!(harness.query_by_label("Could not open notes.png").is_some());

        harness.get_by_label("OK").click();
        harness.run();

        assert!(harness.query_by_label("Could not open image").is_none());
        assert!(!harness.state().modals.is_open());
        assert!(harness.state().session.is_none());
    }
}
