use std::path::PathBuf;

const SUBDIR: &str = "crop_prep";

#[derive(Debug)]
pub enum Dirs {
    Config,
}

impl Dirs {
    /// `None` when the platform has no such directory (e.g. no home directory).
    pub fn path(&self) -> Option<PathBuf> {
        match *self {
            Dirs::Config => ::dirs::config_dir().map(|dir| dir.join(SUBDIR)),
        }
    }
}
