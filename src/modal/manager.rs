use egui::{Id, Layout, Vec2};

use super::{Modal, ModalActionResponse};

/// Stack of open modals. Only the most recently pushed one is shown.
pub struct ModalManager<A> {
    modals: Vec<Box<dyn Modal<A>>>,
}

impl<A> ModalManager<A> {
    pub fn new() -> Self {
        Self { modals: Vec::new() }
    }

    pub fn push(&mut self, modal: impl Modal<A> + 'static) {
        self.modals.push(Box::new(modal));
    }

    pub fn is_open(&self) -> bool {
        !self.modals.is_empty()
    }

    /// Shows the top modal. Returns the confirm action if one was chosen this frame.
    pub fn show_next(&mut self, ctx: &egui::Context) -> Option<A> {
        let depth = self.modals.len();
        let modal = self.modals.last_mut()?;

        let mut response = None;

        egui::Window::new(modal.title())
            .id(Id::new(("modal", depth)))
            .anchor(egui::Align2::CENTER_CENTER, Vec2::ZERO)
            .resizable(false)
            .collapsible(false)
            .min_size(Vec2::new(360.0, 120.0))
            .show(ctx, |ui: &mut egui::Ui| {
                modal.body_ui(ui);
                ui.add_space(20.0);
                ui.with_layout(Layout::left_to_right(egui::Align::Min), |ui| {
                    response = modal.actions_ui(ui);
                });
            });

        match response? {
            ModalActionResponse::Close => {
                self.modals.pop();
                None
            }
            ModalActionResponse::Confirm(action) => {
                self.modals.pop();
                Some(action)
            }
        }
    }
}
