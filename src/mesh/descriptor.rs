//! Index and attribute descriptors used to populate [`MeshData`].
//!
//! Descriptors address into the mesh's buffers by byte offset, so they stay
//! valid when the buffers move together with the mesh. They carry no
//! accessors of interest on their own; the data is read back through
//! [`MeshData`] APIs.
//!
//! [`MeshData`]: super::MeshData

use std::mem::size_of;
use std::ops::Range;

use super::element::{AttributeElement, IndexElement};
use super::types::{AttributeName, AttributeType, IndexType};

/// Index buffer descriptor: element type and a byte range within the
/// index buffer.
///
/// An empty range means the mesh is not indexed. The range is stored as
/// given; a reversed range is kept so [`MeshData::new`] can reject it.
///
/// [`MeshData::new`]: super::MeshData::new
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IndexData {
    index_type: IndexType,
    start: usize,
    end: usize,
}

impl IndexData {
    /// Create a descriptor with an explicit type and byte range.
    pub fn new(index_type: IndexType, bytes: Range<usize>) -> Self {
        Self {
            index_type,
            start: bytes.start,
            end: bytes.end,
        }
    }

    /// Create a descriptor for `count` indices of type `T` starting at
    /// `byte_offset`. The index type is inferred from `T`.
    ///
    /// A range past `usize::MAX` saturates, so it can never fit a buffer.
    ///
    /// ```
    /// use redlilium_mesh::mesh::{IndexData, IndexType};
    ///
    /// let indices = IndexData::typed::<u16>(0, 6);
    /// assert_eq!(indices.index_type(), IndexType::UnsignedShort);
    /// assert_eq!(indices.byte_range(), 0..12);
    /// ```
    pub fn typed<T: IndexElement>(byte_offset: usize, count: usize) -> Self {
        let size = count.saturating_mul(size_of::<T>());
        Self {
            index_type: T::INDEX_TYPE,
            start: byte_offset,
            end: byte_offset.saturating_add(size),
        }
    }

    /// Descriptor for a non-indexed mesh.
    pub fn none() -> Self {
        Self::default()
    }

    pub fn index_type(&self) -> IndexType {
        self.index_type
    }

    /// Byte range within the index buffer, exactly as given.
    pub fn byte_range(&self) -> Range<usize> {
        self.start..self.end
    }

    /// Whether the range addresses no bytes. A reversed range is not
    /// empty, it is malformed.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Placement of `count` elements within the vertex buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StridedLayout {
    /// Byte offset of the first element.
    pub offset: usize,
    /// Distance in bytes between consecutive elements.
    pub stride: usize,
    /// Number of elements.
    pub count: usize,
}

impl StridedLayout {
    pub fn new(offset: usize, stride: usize, count: usize) -> Self {
        Self {
            offset,
            stride,
            count,
        }
    }

    /// Tightly packed elements of type `T`.
    pub fn packed<T>(offset: usize, count: usize) -> Self {
        Self::new(offset, size_of::<T>(), count)
    }
}

/// Vertex attribute descriptor: name, element type and placement within the
/// vertex buffer.
///
/// The default value is an unassigned placeholder, used to pre-size an
/// attribute list before filling it in. [`MeshData::new`] rejects
/// placeholders that were never overwritten.
///
/// [`MeshData::new`]: super::MeshData::new
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AttributeData {
    name: Option<AttributeName>,
    attribute_type: Option<AttributeType>,
    layout: StridedLayout,
}

impl AttributeData {
    /// Create a descriptor whose type is inferred from the element type `T`.
    ///
    /// ```
    /// use redlilium_mesh::math::Color3;
    /// use redlilium_mesh::mesh::{AttributeData, AttributeName, AttributeType, StridedLayout};
    ///
    /// let colors = AttributeData::typed::<Color3>(
    ///     AttributeName::Colors,
    ///     StridedLayout::packed::<Color3>(0, 3),
    /// );
    /// assert_eq!(colors.attribute_type(), Some(AttributeType::Vector3));
    /// ```
    pub fn typed<T: AttributeElement>(name: AttributeName, layout: StridedLayout) -> Self {
        Self::new(name, T::ATTRIBUTE_TYPE, layout)
    }

    /// Create a descriptor with a type known only at runtime.
    pub fn new(name: AttributeName, attribute_type: AttributeType, layout: StridedLayout) -> Self {
        Self {
            name: Some(name),
            attribute_type: Some(attribute_type),
            layout,
        }
    }

    /// `None` for an unassigned placeholder.
    pub fn name(&self) -> Option<AttributeName> {
        self.name
    }

    /// `None` for an unassigned placeholder.
    pub fn attribute_type(&self) -> Option<AttributeType> {
        self.attribute_type
    }

    pub fn layout(&self) -> StridedLayout {
        self.layout
    }

    pub fn is_assigned(&self) -> bool {
        self.name.is_some() && self.attribute_type.is_some()
    }
}
