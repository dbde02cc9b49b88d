//! Error types shared across the crate.

/// Convenience result type used across hollow-forge.
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Failure while fetching or decoding a sprite sheet.
///
/// Cloneable so that every caller waiting on the same in-flight load
/// receives the same outcome.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AssetLoadError {
    /// The bytes could not be read from the asset source.
    #[error("failed to load asset: {path}: {reason}")]
    Fetch { path: String, reason: String },

    /// The bytes were read but are not a decodable image.
    #[error("failed to decode asset: {path}: {reason}")]
    Decode { path: String, reason: String },
}

impl AssetLoadError {
    /// Build an [`AssetLoadError::Fetch`] value.
    pub fn fetch(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::Fetch {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Build an [`AssetLoadError::Decode`] value.
    pub fn decode(path: impl Into<String>, reason: impl ToString) -> Self {
        Self::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// The asset path that failed.
    pub fn path(&self) -> &str {
        match self {
            Self::Fetch { path, .. } | Self::Decode { path, .. } => path,
        }
    }
}

/// Top-level error taxonomy for session, settings and export APIs.
#[derive(thiserror::Error, Debug)]
pub enum ForgeError {
    /// A sprite sheet could not be loaded.
    #[error("asset error: {0}")]
    Asset(#[from] AssetLoadError),

    /// Invalid export request (scale out of range, empty surface, ...).
    #[error("export error: {0}")]
    Export(String),

    /// Invalid render settings.
    #[error("config error: {0}")]
    Config(String),

    /// Image encoding failure.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// Filesystem failure while reading settings or writing exports.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed profile or settings JSON.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl ForgeError {
    /// Build a [`ForgeError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }

    /// Build a [`ForgeError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes() {
        assert_eq!(
            ForgeError::export("scale 0").to_string(),
            "export error: scale 0"
        );
        assert_eq!(
            ForgeError::config("pixel size 0").to_string(),
            "config error: pixel size 0"
        );

        let fetch = AssetLoadError::fetch("body/orc.png", "not found");
        assert_eq!(
            fetch.to_string(),
            "failed to load asset: body/orc.png: not found"
        );
        assert!(
            ForgeError::from(fetch)
                .to_string()
                .starts_with("asset error: failed to load asset")
        );
    }

    #[test]
    fn asset_error_reports_path() {
        let err = AssetLoadError::decode("hair/plain.png", "bad header");
        assert_eq!(err.path(), "hair/plain.png");
        assert_eq!(err.clone(), err);
    }
}
