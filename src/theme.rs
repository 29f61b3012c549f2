pub mod color {
    use egui::Color32;

    pub const CANVAS_BACKGROUND: Color32 = Color32::from_rgb(15, 15, 15);
    pub const CROP_OUTLINE: Color32 = Color32::RED;
    pub const HANDLE_FILL: Color32 = Color32::WHITE;
    pub const HANDLE_ACTIVE_FILL: Color32 = Color32::from_rgb(0x00, 0x7f, 0xff);
    pub const ERROR: Color32 = Color32::from_rgb(0xe0, 0x4a, 0x4a);
    pub const SUCCESS: Color32 = Color32::from_rgb(0x4c, 0xb0, 0x50);

    pub fn outside_crop_dim() -> Color32 {
        Color32::from_black_alpha(150)
    }
}
