//! # RedLilium Mesh
//!
//! CPU-side mesh data container for RedLilium Engine.
//!
//! [`mesh::MeshData`] holds one mesh's raw index and vertex bytes together
//! with typed descriptors addressing into them. Buffers can be owned or
//! borrowed from external memory (e.g. a memory-mapped file), and attributes
//! are exposed as zero-copy strided views or converted copies.

pub mod math;
pub mod mesh;
pub mod profiling;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
