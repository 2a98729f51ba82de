//! Error types for mesh validation and picker configuration.
//!
//! Queries never fail: a miss is `None`. These errors only come out of the
//! checked constructors and option loading.

use thiserror::Error;

/// Errors found while validating mesh data.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshError {
    /// Index buffer does not describe whole triangles.
    #[error("index count {len} is not a multiple of 3")]
    IndexCountNotMultipleOfThree {
        /// Length of the index buffer.
        len: usize,
    },

    /// An index names a vertex that does not exist.
    #[error("index {index} at offset {offset} is out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offset into the index buffer.
        offset: usize,
        /// The offending vertex index.
        index: u32,
        /// Number of vertices in the mesh.
        vertex_count: usize,
    },
}

/// Errors that can occur while setting up picking.
#[derive(Error, Debug)]
pub enum PickError {
    /// Mesh data failed validation.
    #[error("invalid mesh: {0}")]
    Mesh(#[from] MeshError),

    /// The local-to-world matrix cannot be inverted.
    #[error("object transform is singular")]
    SingularTransform,

    /// An option value is outside its allowed range.
    #[error("invalid option `{name}`: {reason}")]
    InvalidOption {
        /// Option name as it appears in the config file.
        name: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// The options document could not be parsed.
    #[error("failed to parse pick options: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for picking setup operations.
pub type Result<T> = std::result::Result<T, PickError>;
