//! Error types for mesh data construction.

use thiserror::Error;

use super::types::{AttributeName, IndexType};

/// Errors reported when the buffers and descriptors handed to
/// [`MeshData::new`](super::MeshData::new) are inconsistent, or when a raw
/// enum value can't be decoded.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MeshDataError {
    #[error("index data of {size} bytes at offset {offset} needs an index buffer, but none was supplied")]
    MissingIndexBuffer { offset: usize, size: usize },
    #[error("index range {start}..{end} is out of bounds for an index buffer of {buffer_len} bytes")]
    IndexRangeOutOfBounds {
        start: usize,
        end: usize,
        buffer_len: usize,
    },
    #[error("index data of {size} bytes is not a multiple of the {index_type} width ({width} bytes)")]
    IndexDataMisaligned {
        size: usize,
        index_type: IndexType,
        width: usize,
    },
    #[error("attribute {slot} was never assigned a name and type")]
    UnassignedAttribute { slot: usize },
    #[error("attribute {slot} ({name}) needs a vertex buffer, but none was supplied")]
    MissingVertexBuffer { slot: usize, name: AttributeName },
    #[error(
        "attribute {slot} ({name}) with offset {offset}, stride {stride} and {count} elements is out of bounds for a vertex buffer of {buffer_len} bytes"
    )]
    AttributeOutOfBounds {
        slot: usize,
        name: AttributeName,
        offset: usize,
        stride: usize,
        count: usize,
        buffer_len: usize,
    },
    #[error("attribute {slot} ({name}) has {count} elements, expected {expected}")]
    VertexCountMismatch {
        slot: usize,
        name: AttributeName,
        count: usize,
        expected: usize,
    },
    #[error("unknown index type {0:#04x}")]
    UnknownIndexType(u8),
    #[error("unknown attribute type {0:#04x}")]
    UnknownAttributeType(u8),
    #[error("unknown attribute name {0:#04x}")]
    UnknownAttributeName(u8),
}

pub type MeshDataResult<T> = Result<T, MeshDataError>;
