use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use trackforged_common::{Extension, Quality};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub encode: EncodeConfig,

    #[serde(default)]
    pub dispatch: DispatchConfig,

    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EncodeConfig {
    /// Extension of the files to convert, compared case-sensitively
    #[serde(default = "Extension::flac")]
    pub source_extension: Extension,

    /// Extension given to converted files
    #[serde(default = "Extension::mp3")]
    pub target_extension: Extension,

    /// Encoder quality selector, 0 (best) to 9 (worst)
    #[serde(default)]
    pub quality: Quality,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            source_extension: Extension::flac(),
            target_extension: Extension::mp3(),
            quality: Quality::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DispatchConfig {
    /// Encoder processes per chunk; zero or negative runs sequentially
    #[serde(default)]
    pub parallel: i64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ToolsConfig {
    /// Encoder executable name, looked up on PATH
    #[serde(default = "default_encoder")]
    pub encoder: String,

    /// Explicit encoder path, preferred over the PATH lookup when it exists
    #[serde(default)]
    pub encoder_path: Option<PathBuf>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            encoder: default_encoder(),
            encoder_path: None,
        }
    }
}

fn default_encoder() -> String {
    trackforged_av::DEFAULT_ENCODER.to_string()
}
