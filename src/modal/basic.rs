use super::{Modal, ModalActionResponse};

/// Message with a dismiss button and an optional confirm button.
pub struct BasicModal<A> {
    title: String,
    message: String,
    dismiss_title: String,
    confirm: Option<(String, A)>,
}

impl<A: Clone> BasicModal<A> {
    pub fn new(
        title: impl Into<String>,
        message: impl Into<String>,
        dismiss_title: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            dismiss_title: dismiss_title.into(),
            confirm: None,
        }
    }

    pub fn with_confirm(mut self, confirm_title: impl Into<String>, action: A) -> Self {
        self.confirm = Some((confirm_title.into(), action));
        self
    }
}

impl<A: Clone> Modal<A> for BasicModal<A> {
    fn title(&self) -> String {
        self.title.clone()
    }

    fn body_ui(&mut self, ui: &mut egui::Ui) {
        ui.label(&self.message);
    }

    fn actions_ui(&mut self, ui: &mut egui::Ui) -> Option<ModalActionResponse<A>> {
        if ui.button(&self.dismiss_title).clicked() {
            return Some(ModalActionResponse::Close);
        }
        if let Some((confirm_title, action)) = &self.confirm {
            if ui.button(confirm_title).clicked() {
                return Some(ModalActionResponse::Confirm(action.clone()));
            }
        }
        None
    }
}
