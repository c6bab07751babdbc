//! CPU-side mesh data.
//!
//! This module provides a type-erased mesh container and its building blocks:
//!
//! - [`MeshData`] - Index and vertex bytes plus the descriptors giving them meaning
//! - [`MeshBuffer`] - Owned or borrowed byte storage
//! - [`IndexData`] / [`AttributeData`] - Descriptors used to populate a mesh
//! - [`StridedView`] / [`StridedViewMut`] - Typed views over raw bytes
//! - Generators for common shapes (sphere, quad, triangle)

mod buffer;
mod data;
mod descriptor;
mod element;
mod error;
pub mod generators;
mod types;
mod view;

pub use buffer::MeshBuffer;
pub use data::{ImporterState, MeshData};
pub use descriptor::{AttributeData, IndexData, StridedLayout};
pub use element::{AttributeElement, IndexElement};
pub use error::{MeshDataError, MeshDataResult};
pub use types::{AttributeName, AttributeType, CustomId, IndexType};
pub use view::{StridedView, StridedViewMut};
