//! Error type for glyphrain.

/// Errors surfaced by the glyphrain core.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A rain setting is out of range or inconsistent.
    #[error("invalid rain configuration: {0}")]
    InvalidConfig(String),
    /// A collaborator the host has to provide was never supplied.
    #[error("missing required element: {0}")]
    MissingElement(&'static str),
    /// The preference store failed to read or write.
    #[error("preference store error: {0}")]
    Store(String),
    /// A theme name that is neither `dark` nor `light`.
    #[error("unknown theme {0:?}, expected \"dark\" or \"light\"")]
    UnknownTheme(String),
}

/// Result alias using the core [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
