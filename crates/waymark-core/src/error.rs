use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    #[error("Registration error: {0}")]
    Registration(#[from] RegistrationError),

    #[error("Host error: {0}")]
    Host(#[from] HostError),
}

/// Failure to read one icon definition source or one of its entries.
///
/// Always recoverable: the catalog logs it and moves on to the next source.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("Image not found: {}", path.display())]
    MissingImage { path: PathBuf },
}

#[derive(Error, Debug, PartialEq)]
pub enum HostError {
    #[error("Minimap instance is not available")]
    Unavailable,
}

/// Failure while wiring custom icons into the host. Fatal to initialization.
#[derive(Error, Debug, PartialEq)]
pub enum RegistrationError {
    #[error("Host rejected icon registration: {0}")]
    Host(#[from] HostError),

    #[error("Custom icons have already been registered")]
    AlreadyRegistered,
}
