//! Error types for mushroom generation
//!
//! Only configuration and I/O problems surface as `Error`. Broken mesh
//! indices are programming errors and panic inside the mesh operations.

/// Errors reported by the generator and its export helpers
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Species tag that does not name one of the four supported species
    #[error(
        "unknown species {0:?} (expected boletus, crested_inkling, drab_bonnet, toadstool or SP1-SP4)"
    )]
    UnknownSpecies(String),

    /// A topology plan step addresses geometry that does not exist yet
    #[error("topology plan step '{step}' is invalid: {message}")]
    Plan {
        step: &'static str,
        message: String,
    },

    /// Pattern graph wiring that violates socket or ordering rules
    #[error("malformed pattern graph: {0}")]
    Graph(String),

    /// Preview swatch dimensions outside the supported range
    #[error(
        "swatch size {width}x{height} is out of range (edges must be 1..={max} pixels)",
        max = crate::material::MAX_SWATCH_EDGE
    )]
    SwatchSize { width: u32, height: u32 },

    /// PNG encoder failure while writing a preview swatch
    #[error("PNG encoding failed: {0}")]
    Png(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result alias used throughout the crate
pub type Result<T, E = Error> = std::result::Result<T, E>;
