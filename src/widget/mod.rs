pub mod crop;
pub mod photo_info;
pub mod placeholder;
pub mod transformable;
