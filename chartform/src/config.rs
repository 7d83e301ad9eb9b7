use std::path::PathBuf;

/// Runtime configuration, resolved once in `main` and carried through the
/// router state so handlers and tests never depend on process-wide
/// constants.
#[derive(Debug, Clone)]
pub(crate) struct AppConfig {
    /// Directory holding one subdirectory per upload token, each with the
    /// stored source file and its rendered chart.
    pub(crate) upload_dir: PathBuf,
    pub(crate) port: u16,
}

impl Default for AppConfig {
    fn default() -> AppConfig {
        AppConfig {
            upload_dir: PathBuf::from("uploads"),
            port: 8080,
        }
    }
}

impl AppConfig {
    pub(crate) fn from_env() -> AppConfig {
        let defaults = AppConfig::default();
        let upload_dir = std::env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.upload_dir);
        let port = std::env::var("PORT")
            .map(|p| p.parse::<u16>().ok())
            .ok()
            .flatten()
            .unwrap_or(defaults.port);
        AppConfig { upload_dir, port }
    }
}
