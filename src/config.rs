use std::env;
use std::path::PathBuf;

use anyhow::Result;

/// Which topic model backend to load.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelBackend {
    /// Offline-trained JSON bundle served from disk (default).
    Bundle,
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every
/// path has a working-directory-relative default so a checkout with the
/// shipped params.toml and a bundle in place runs with no configuration.
pub struct Config {
    /// Path to the params file holding the bounds triples.
    pub params_file: PathBuf,
    /// Path to the trained topic model bundle.
    pub model_bundle_path: PathBuf,
    /// Root directory served at /static (wordcloud images live beneath it).
    pub static_root: PathBuf,
    /// Which topic model backend to load (default: Bundle).
    pub model_backend: ModelBackend,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        let model_backend = match env::var("GIST_MODEL_BACKEND").as_deref() {
            Ok("bundle") | Err(_) => ModelBackend::Bundle,
            Ok(other) => {
                anyhow::bail!(
                    "Unknown model backend '{other}' in GIST_MODEL_BACKEND.\n\
                     Supported backends: bundle"
                );
            }
        };

        Ok(Self {
            params_file: env::var("GIST_PARAMS_FILE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./params.toml")),
            model_bundle_path: env::var("GIST_MODEL_BUNDLE")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./saved-elements/topics-bundle.json")),
            static_root: env::var("GIST_STATIC_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./static")),
            model_backend,
        })
    }

    /// Check that the params file exists.
    /// Call this before serving — every request validation reads it.
    pub fn require_params(&self) -> Result<()> {
        if !self.params_file.exists() {
            anyhow::bail!(
                "Params file not found: {}\n\
                 Set GIST_PARAMS_FILE or place params.toml in the working directory.",
                self.params_file.display()
            );
        }
        Ok(())
    }

    /// Check that the configured model backend has what it needs.
    pub fn require_model(&self) -> Result<()> {
        match self.model_backend {
            ModelBackend::Bundle => {
                if !self.model_bundle_path.exists() {
                    anyhow::bail!(
                        "Model bundle not found: {}\n\
                         Set GIST_MODEL_BUNDLE to the trained bundle file.",
                        self.model_bundle_path.display()
                    );
                }
                Ok(())
            }
        }
    }
}
