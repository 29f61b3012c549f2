pub mod basic;
pub mod manager;

/// A blocking dialog. `A` is the command a confirm button hands back to the app.
pub trait Modal<A> {
    fn title(&self) -> String;
    fn body_ui(&mut self, ui: &mut egui::Ui);
    fn actions_ui(&mut self, ui: &mut egui::Ui) -> Option<ModalActionResponse<A>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalActionResponse<A> {
    Close,
    Confirm(A),
}
