use thiserror::Error;

/// Reasons an external hero model could not be adopted.
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("invalid glTF document: {0}")]
    Gltf(#[from] gltf::Error),
    #[error("model contains no triangle primitives")]
    NoPrimitives,
    #[error("primitive {0} has no POSITION attribute")]
    MissingPositions(usize),
    #[error("index {index} out of range for {vertices} vertices")]
    IndexOutOfRange { index: u32, vertices: usize },
}
