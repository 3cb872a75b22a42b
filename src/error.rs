// Every variant states *where* things went wrong.
// The per-pixel pipeline itself never fails; only the host-side plumbing does.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Creating the window failed
    #[error("Window init error: {0}")]
    WindowInit(String),

    /// Updating the window buffer failed
    #[error("Window update error: {0}")]
    WindowUpdate(String),

    /// An uploaded image could not be opened or decoded
    #[error("Image decode error ({}): {source}", .path.display())]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// Background image list is already full
    #[error("Too many background images (max {max})")]
    TooManyImages { max: usize },

    /// No background image at this index
    #[error("No background image at index {0}")]
    NoSuchImage(usize),

    /// Reading the config file failed
    #[error("Failed to read config file {}: {source}", .path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Parsing the config file failed
    #[error("Failed to parse config file {}: {source}", .path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Preset name not present in the config
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),

    /// Writing a rendered frame to disk failed
    #[error("Failed to write frame {}: {source}", .path.display())]
    FrameWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}
