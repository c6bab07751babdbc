//! The mesh data container.
//!
//! [`MeshData`] owns (or borrows) raw index and vertex bytes and keeps the
//! descriptors that give them meaning. It is built once by an importer or a
//! generator, queried repeatedly, and eventually consumed either by reading
//! the raw buffers or by releasing them.

use std::any::Any;
use std::fmt;
use std::mem::size_of;

use crate::math::{Color3, Color4, Vec2, Vec3};
use crate::profiling::profile_function;

use super::buffer::MeshBuffer;
use super::descriptor::{AttributeData, IndexData, StridedLayout};
use super::element::{AttributeElement, IndexElement};
use super::error::{MeshDataError, MeshDataResult};
use super::types::{AttributeName, AttributeType, IndexType};
use super::view::{StridedView, StridedViewMut, strided_byte_len};

/// Opaque importer state passed through a [`MeshData`] untouched.
pub type ImporterState = dyn Any + Send + Sync;

/// A validated attribute: every field known, byte span checked against the
/// vertex buffer.
#[derive(Debug, Clone, Copy)]
struct Attribute {
    name: AttributeName,
    attribute_type: AttributeType,
    layout: StridedLayout,
    end: usize,
}

/// Geometry of a single mesh.
///
/// Holds an index buffer, a vertex buffer, one index descriptor and an
/// ordered list of attributes addressing into the vertex buffer. Buffers are
/// either owned or borrowed from external memory for `'a`; owned-only meshes
/// are `MeshData<'static>`.
///
/// Attribute order is significant: the `nth` attribute with a given name is
/// the `nth` one in insertion order.
///
/// Accessors that take a slot or a requested element type panic when the
/// request doesn't match the stored data. Those are programming errors; use
/// [`MeshData::find_attribute`] and [`MeshData::attribute_type`] to inspect
/// a mesh of unknown shape first.
///
/// `MeshData` is not `Clone`. [`std::mem::take`] leaves an empty mesh
/// behind.
///
/// # Example
///
/// ```
/// use redlilium_mesh::math::Vec3;
/// use redlilium_mesh::mesh::{AttributeData, AttributeName, IndexData, MeshData, StridedLayout};
///
/// let positions = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];
/// let indices: [u16; 3] = [0, 1, 2];
///
/// let mesh = MeshData::new(
///     bytemuck::cast_slice::<_, u8>(&indices).to_vec(),
///     bytemuck::cast_slice::<_, u8>(&positions).to_vec(),
///     IndexData::typed::<u16>(0, 3),
///     vec![AttributeData::typed::<Vec3>(
///         AttributeName::Positions3D,
///         StridedLayout::packed::<Vec3>(0, 3),
///     )],
///     None,
/// )
/// .unwrap();
///
/// assert_eq!(mesh.vertex_count(), 3);
/// assert_eq!(mesh.indices_as_u32(), vec![0, 1, 2]);
/// assert_eq!(mesh.positions_3d(0), positions.to_vec());
/// ```
#[derive(Default)]
pub struct MeshData<'a> {
    index_buffer: MeshBuffer<'a>,
    vertex_buffer: MeshBuffer<'a>,
    indices: IndexData,
    attributes: Vec<Attribute>,
    importer_state: Option<&'a ImporterState>,
}

impl<'a> MeshData<'a> {
    /// Create a mesh from buffers and the descriptors addressing into them.
    ///
    /// Fails if a descriptor reaches outside its buffer, if the index data
    /// isn't a whole number of indices, if an attribute placeholder was
    /// left unassigned, or if attributes disagree on the vertex count.
    pub fn new(
        index_buffer: impl Into<MeshBuffer<'a>>,
        vertex_buffer: impl Into<MeshBuffer<'a>>,
        indices: IndexData,
        attributes: Vec<AttributeData>,
        importer_state: Option<&'a ImporterState>,
    ) -> MeshDataResult<Self> {
        let index_buffer = index_buffer.into();
        let vertex_buffer = vertex_buffer.into();

        let indices = validate_indices(&index_buffer, indices)?;
        let attributes = validate_attributes(&vertex_buffer, &attributes)?;

        let mesh = Self {
            index_buffer,
            vertex_buffer,
            indices,
            attributes,
            importer_state,
        };
        log::debug!(
            "Created MeshData: {} vertices, {} attributes, {} indices ({}), {} index bytes, {} vertex bytes",
            mesh.vertex_count(),
            mesh.attribute_count(),
            mesh.index_count(),
            mesh.indices.index_type(),
            mesh.index_buffer.len(),
            mesh.vertex_buffer.len(),
        );
        Ok(mesh)
    }

    // ---------------------------------------------------------------------
    // Raw data
    // ---------------------------------------------------------------------

    /// Raw index buffer. Empty if absent or released.
    pub fn index_data(&self) -> &[u8] {
        self.index_buffer.as_slice()
    }

    pub fn index_data_mut(&mut self) -> &mut [u8] {
        self.index_buffer.as_mut_slice()
    }

    /// Raw vertex buffer. Empty if absent or released.
    pub fn vertex_data(&self) -> &[u8] {
        self.vertex_buffer.as_slice()
    }

    pub fn vertex_data_mut(&mut self) -> &mut [u8] {
        self.vertex_buffer.as_mut_slice()
    }

    // ---------------------------------------------------------------------
    // Indices
    // ---------------------------------------------------------------------

    /// Check if this mesh uses indexed drawing.
    pub fn is_indexed(&self) -> bool {
        !self.indices.is_empty()
    }

    /// Number of indices. Zero for a non-indexed mesh.
    pub fn index_count(&self) -> usize {
        self.indices.byte_range().len() / self.indices.index_type().size()
    }

    pub fn index_type(&self) -> IndexType {
        self.indices.index_type()
    }

    /// Zero-copy view of the indices.
    ///
    /// Panics if `T` doesn't match [`MeshData::index_type`]. Use
    /// [`MeshData::indices_as_u32`] when the width isn't known statically.
    pub fn indices<T: IndexElement>(&self) -> StridedView<'_, T> {
        self.check_index_type::<T>("indices");
        let bytes = &self.index_buffer.as_slice()[self.indices.byte_range()];
        StridedView::new(bytes, size_of::<T>(), self.index_count())
    }

    /// Mutable zero-copy view of the indices.
    ///
    /// Panics if `T` doesn't match [`MeshData::index_type`].
    pub fn indices_mut<T: IndexElement>(&mut self) -> StridedViewMut<'_, T> {
        self.check_index_type::<T>("indices_mut");
        let count = self.index_count();
        let range = self.indices.byte_range();
        StridedViewMut::new(
            &mut self.index_buffer.as_mut_slice()[range],
            size_of::<T>(),
            count,
        )
    }

    /// Copy all indices into a new vector, widened to `u32`.
    pub fn indices_as_u32(&self) -> Vec<u32> {
        profile_function!();
        match self.indices.index_type() {
            IndexType::UnsignedByte => widen_indices(self.indices::<u8>()),
            IndexType::UnsignedShort => widen_indices(self.indices::<u16>()),
            IndexType::UnsignedInt => self.indices::<u32>().to_vec(),
        }
    }

    fn check_index_type<T: IndexElement>(&self, caller: &str) {
        assert!(
            T::INDEX_TYPE == self.indices.index_type(),
            "MeshData::{caller}(): improper type requested for {}",
            self.indices.index_type()
        );
    }

    // ---------------------------------------------------------------------
    // Attribute metadata
    // ---------------------------------------------------------------------

    /// Number of vertices. Zero if the mesh has no attributes.
    pub fn vertex_count(&self) -> usize {
        self.attributes.first().map_or(0, |a| a.layout.count)
    }

    /// Total number of attributes.
    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Number of attributes with the given name.
    pub fn attribute_count_for(&self, name: AttributeName) -> usize {
        self.attributes.iter().filter(|a| a.name == name).count()
    }

    pub fn has_attribute(&self, name: AttributeName) -> bool {
        self.attributes.iter().any(|a| a.name == name)
    }

    /// Panics if `slot` is out of range.
    pub fn attribute_name(&self, slot: usize) -> AttributeName {
        self.slot(slot, "attribute_name").name
    }

    /// Panics if `slot` is out of range.
    pub fn attribute_type(&self, slot: usize) -> AttributeType {
        self.slot(slot, "attribute_type").attribute_type
    }

    /// Type of the `nth` attribute named `name`.
    ///
    /// Panics if there are not more than `nth` such attributes.
    pub fn attribute_type_for(&self, name: AttributeName, nth: usize) -> AttributeType {
        self.attribute_type(self.attribute_for(name, nth))
    }

    /// Byte stride of the attribute at `slot`. Panics if out of range.
    pub fn attribute_stride(&self, slot: usize) -> usize {
        self.slot(slot, "attribute_stride").layout.stride
    }

    /// Slot of the `nth` attribute named `name`, counting in insertion order.
    pub fn find_attribute(&self, name: AttributeName, nth: usize) -> Option<usize> {
        self.attributes
            .iter()
            .enumerate()
            .filter(|(_, a)| a.name == name)
            .nth(nth)
            .map(|(slot, _)| slot)
    }

    /// Slot of the `nth` attribute named `name`, counting in insertion order.
    ///
    /// Panics if there are not more than `nth` such attributes.
    pub fn attribute_for(&self, name: AttributeName, nth: usize) -> usize {
        match self.find_attribute(name, nth) {
            Some(slot) => slot,
            None => panic!(
                "MeshData::attribute_for(): index {nth} out of bounds for {} {name} attributes",
                self.attribute_count_for(name)
            ),
        }
    }

    fn slot(&self, slot: usize, caller: &str) -> &Attribute {
        assert!(
            slot < self.attributes.len(),
            "MeshData::{caller}(): index {slot} out of range for {} attributes",
            self.attributes.len()
        );
        &self.attributes[slot]
    }

    fn typed_slot<T: AttributeElement>(&self, slot: usize, caller: &str) -> Attribute {
        let attribute = *self.slot(slot, caller);
        assert!(
            T::ATTRIBUTE_TYPE == attribute.attribute_type,
            "MeshData::{caller}(): improper type requested for {}",
            attribute.attribute_type
        );
        attribute
    }

    // ---------------------------------------------------------------------
    // Typed attribute views
    // ---------------------------------------------------------------------

    /// Zero-copy view of the attribute at `slot`.
    ///
    /// Panics if `slot` is out of range or `T` doesn't match the stored
    /// [`AttributeType`].
    pub fn attribute<T: AttributeElement>(&self, slot: usize) -> StridedView<'_, T> {
        let attribute = self.typed_slot::<T>(slot, "attribute");
        let bytes = &self.vertex_buffer.as_slice()[attribute.layout.offset..attribute.end];
        StridedView::new(bytes, attribute.layout.stride, attribute.layout.count)
    }

    /// Mutable zero-copy view of the attribute at `slot`. Writes go into the
    /// mesh's vertex buffer.
    ///
    /// Panics if `slot` is out of range or `T` doesn't match the stored
    /// [`AttributeType`].
    pub fn attribute_mut<T: AttributeElement>(&mut self, slot: usize) -> StridedViewMut<'_, T> {
        let attribute = self.typed_slot::<T>(slot, "attribute_mut");
        let bytes = &mut self.vertex_buffer.as_mut_slice()[attribute.layout.offset..attribute.end];
        StridedViewMut::new(bytes, attribute.layout.stride, attribute.layout.count)
    }

    /// Zero-copy view of the `nth` attribute named `name`.
    pub fn attribute_named<T: AttributeElement>(
        &self,
        name: AttributeName,
        nth: usize,
    ) -> StridedView<'_, T> {
        self.attribute(self.attribute_for(name, nth))
    }

    /// Mutable zero-copy view of the `nth` attribute named `name`.
    pub fn attribute_named_mut<T: AttributeElement>(
        &mut self,
        name: AttributeName,
        nth: usize,
    ) -> StridedViewMut<'_, T> {
        let slot = self.attribute_for(name, nth);
        self.attribute_mut(slot)
    }

    // ---------------------------------------------------------------------
    // Converting accessors
    // ---------------------------------------------------------------------

    /// Copy of the `nth` 2D position attribute.
    ///
    /// 3D positions are accepted and lose their Z coordinate.
    pub fn positions_2d(&self, nth: usize) -> Vec<Vec2> {
        profile_function!();
        let slot = self.attribute_for(AttributeName::Positions2D, nth);
        match self.attributes[slot].attribute_type {
            AttributeType::Vector2 => self.attribute::<Vec2>(slot).to_vec(),
            AttributeType::Vector3 => self.attribute::<Vec3>(slot).iter().map(|p| p.xy()).collect(),
            other @ AttributeType::Vector4 => {
                panic!("MeshData::positions_2d(): can't convert {other} to 2D positions")
            }
        }
    }

    /// Copy of the `nth` 3D position attribute.
    ///
    /// 2D positions are accepted and get a zero Z coordinate.
    pub fn positions_3d(&self, nth: usize) -> Vec<Vec3> {
        profile_function!();
        let slot = self.attribute_for(AttributeName::Positions3D, nth);
        match self.attributes[slot].attribute_type {
            AttributeType::Vector3 => self.attribute::<Vec3>(slot).to_vec(),
            AttributeType::Vector2 => self
                .attribute::<Vec2>(slot)
                .iter()
                .map(|p| Vec3::new(p.x, p.y, 0.0))
                .collect(),
            other @ AttributeType::Vector4 => {
                panic!("MeshData::positions_3d(): can't convert {other} to 3D positions")
            }
        }
    }

    /// Copy of the `nth` normal attribute.
    pub fn normals(&self, nth: usize) -> Vec<Vec3> {
        profile_function!();
        let slot = self.attribute_for(AttributeName::Normals, nth);
        match self.attributes[slot].attribute_type {
            AttributeType::Vector3 => self.attribute::<Vec3>(slot).to_vec(),
            other @ (AttributeType::Vector2 | AttributeType::Vector4) => {
                panic!("MeshData::normals(): can't convert {other} to normals")
            }
        }
    }

    /// Copy of the `nth` texture coordinate attribute.
    pub fn texture_coordinates_2d(&self, nth: usize) -> Vec<Vec2> {
        profile_function!();
        let slot = self.attribute_for(AttributeName::TextureCoordinates2D, nth);
        match self.attributes[slot].attribute_type {
            AttributeType::Vector2 => self.attribute::<Vec2>(slot).to_vec(),
            other @ (AttributeType::Vector3 | AttributeType::Vector4) => panic!(
                "MeshData::texture_coordinates_2d(): can't convert {other} to texture coordinates"
            ),
        }
    }

    /// Copy of the `nth` color attribute as RGBA.
    ///
    /// RGB colors get an alpha of 1.0.
    pub fn colors(&self, nth: usize) -> Vec<Color4> {
        profile_function!();
        let slot = self.attribute_for(AttributeName::Colors, nth);
        match self.attributes[slot].attribute_type {
            AttributeType::Vector4 => self.attribute::<Color4>(slot).to_vec(),
            AttributeType::Vector3 => self.attribute::<Color3>(slot).iter().map(Color4::from).collect(),
            other @ AttributeType::Vector2 => {
                panic!("MeshData::colors(): can't convert {other} to colors")
            }
        }
    }

    // ---------------------------------------------------------------------
    // Ownership
    // ---------------------------------------------------------------------

    /// Take the index buffer out of the mesh.
    ///
    /// The mesh becomes non-indexed. Calling this again returns
    /// [`MeshBuffer::Absent`].
    pub fn release_index_data(&mut self) -> MeshBuffer<'a> {
        let buffer = std::mem::take(&mut self.index_buffer);
        self.indices = IndexData::none();
        log::trace!("Released {} bytes of index data", buffer.len());
        buffer
    }

    /// Take the vertex buffer out of the mesh.
    ///
    /// All attributes are dropped, so the vertex count becomes zero. Calling
    /// this again returns [`MeshBuffer::Absent`].
    pub fn release_vertex_data(&mut self) -> MeshBuffer<'a> {
        let buffer = std::mem::take(&mut self.vertex_buffer);
        self.attributes.clear();
        log::trace!("Released {} bytes of vertex data", buffer.len());
        buffer
    }

    /// Importer-specific state, passed through unchanged.
    pub fn importer_state(&self) -> Option<&'a ImporterState> {
        self.importer_state
    }
}

impl fmt::Debug for MeshData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MeshData")
            .field("index_type", &self.indices.index_type())
            .field("index_count", &self.index_count())
            .field("vertex_count", &self.vertex_count())
            .field(
                "attributes",
                &self
                    .attributes
                    .iter()
                    .map(|a| (a.name, a.attribute_type))
                    .collect::<Vec<_>>(),
            )
            .field("index_bytes", &self.index_buffer.len())
            .field("vertex_bytes", &self.vertex_buffer.len())
            .field("importer_state", &self.importer_state.is_some())
            .finish()
    }
}

fn widen_indices<T: IndexElement>(view: StridedView<'_, T>) -> Vec<u32> {
    view.iter().map(Into::into).collect()
}

/// Returns the descriptor to store. An empty range is normalized to start
/// at zero so it can always be sliced out of the buffer; a reversed range is
/// rejected.
fn validate_indices(buffer: &MeshBuffer<'_>, indices: IndexData) -> MeshDataResult<IndexData> {
    let range = indices.byte_range();
    if range.start > range.end {
        return Err(MeshDataError::IndexRangeOutOfBounds {
            start: range.start,
            end: range.end,
            buffer_len: buffer.len(),
        });
    }
    if range.is_empty() {
        return Ok(IndexData::new(indices.index_type(), 0..0));
    }
    if buffer.is_absent() {
        return Err(MeshDataError::MissingIndexBuffer {
            offset: range.start,
            size: range.len(),
        });
    }
    if range.end > buffer.len() {
        return Err(MeshDataError::IndexRangeOutOfBounds {
            start: range.start,
            end: range.end,
            buffer_len: buffer.len(),
        });
    }
    let width = indices.index_type().size();
    if range.len() % width != 0 {
        return Err(MeshDataError::IndexDataMisaligned {
            size: range.len(),
            index_type: indices.index_type(),
            width,
        });
    }
    Ok(indices)
}

fn validate_attributes(
    buffer: &MeshBuffer<'_>,
    attributes: &[AttributeData],
) -> MeshDataResult<Vec<Attribute>> {
    let mut validated = Vec::with_capacity(attributes.len());

    for (slot, data) in attributes.iter().enumerate() {
        let (Some(name), Some(attribute_type)) = (data.name(), data.attribute_type()) else {
            return Err(MeshDataError::UnassignedAttribute { slot });
        };
        let layout = data.layout();

        let end = strided_byte_len(attribute_type.size(), layout.stride, layout.count)
            .and_then(|len| len.checked_add(layout.offset));
        let Some(end) = end.filter(|&end| end <= buffer.len()) else {
            if buffer.is_absent() {
                return Err(MeshDataError::MissingVertexBuffer { slot, name });
            }
            return Err(MeshDataError::AttributeOutOfBounds {
                slot,
                name,
                offset: layout.offset,
                stride: layout.stride,
                count: layout.count,
                buffer_len: buffer.len(),
            });
        };

        if let Some(first) = validated.first().map(|a: &Attribute| a.layout.count)
            && layout.count != first
        {
            return Err(MeshDataError::VertexCountMismatch {
                slot,
                name,
                count: layout.count,
                expected: first,
            });
        }

        validated.push(Attribute {
            name,
            attribute_type,
            layout,
            end,
        });
    }

    Ok(validated)
}
