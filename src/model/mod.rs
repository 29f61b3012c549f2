pub mod crop_box;
pub mod suggested_filename;
pub mod target_size;
