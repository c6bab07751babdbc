//! Integration tests for `MeshData` construction, lookup, typed access and
//! ownership transfer.

use rstest::rstest;
use static_assertions::{assert_impl_all, assert_not_impl_any};

use redlilium_mesh::math::{Color3, Color4, Vec2, Vec3, Vec4};
use redlilium_mesh::mesh::{
    AttributeData, AttributeName, AttributeType, ImporterState, IndexData, IndexType, MeshBuffer,
    MeshData, MeshDataError, StridedLayout,
};

assert_impl_all!(MeshData<'static>: Send, Sync, Default);
assert_not_impl_any!(MeshData<'static>: Clone);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn bytes_of<T: bytemuck::Pod>(values: &[T]) -> Vec<u8> {
    bytemuck::cast_slice::<T, u8>(values).to_vec()
}

/// Three packed attributes over one vertex buffer:
/// slot 0 = Colors (A), slot 1 = Positions3D (B), slot 2 = Colors (C).
fn colors_positions_colors() -> MeshData<'static> {
    let a = [Color4::new(1.0, 0.0, 0.0, 1.0), Color4::new(0.0, 1.0, 0.0, 0.5)];
    let b = [Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)];
    let c = [Color3::new(0.1, 0.2, 0.3), Color3::new(0.4, 0.5, 0.6)];

    let mut vertex_bytes = bytes_of(&a);
    let b_offset = vertex_bytes.len();
    vertex_bytes.extend_from_slice(&bytes_of(&b));
    let c_offset = vertex_bytes.len();
    vertex_bytes.extend_from_slice(&bytes_of(&c));

    MeshData::new(
        MeshBuffer::Absent,
        vertex_bytes,
        IndexData::none(),
        vec![
            AttributeData::typed::<Color4>(AttributeName::Colors, StridedLayout::packed::<Color4>(0, 2)),
            AttributeData::typed::<Vec3>(
                AttributeName::Positions3D,
                StridedLayout::packed::<Vec3>(b_offset, 2),
            ),
            AttributeData::typed::<Color3>(
                AttributeName::Colors,
                StridedLayout::packed::<Color3>(c_offset, 2),
            ),
        ],
        None,
    )
    .unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_vertex_count_matches_every_attribute() {
    init_logging();
    let mesh = colors_positions_colors();
    assert_eq!(mesh.vertex_count(), 2);
    for slot in 0..mesh.attribute_count() {
        let count = match mesh.attribute_type(slot) {
            AttributeType::Vector2 => mesh.attribute::<Vec2>(slot).len(),
            AttributeType::Vector3 => mesh.attribute::<Vec3>(slot).len(),
            AttributeType::Vector4 => mesh.attribute::<Vec4>(slot).len(),
        };
        assert_eq!(count, mesh.vertex_count());
    }
}

#[test]
fn test_mismatched_vertex_counts_rejected() {
    let result = MeshData::new(
        MeshBuffer::Absent,
        vec![0u8; 64],
        IndexData::none(),
        vec![
            AttributeData::typed::<Vec3>(AttributeName::Positions3D, StridedLayout::packed::<Vec3>(0, 3)),
            AttributeData::typed::<Vec3>(AttributeName::Normals, StridedLayout::packed::<Vec3>(36, 2)),
        ],
        None,
    );
    assert_eq!(
        result.unwrap_err(),
        MeshDataError::VertexCountMismatch {
            slot: 1,
            name: AttributeName::Normals,
            count: 2,
            expected: 3,
        }
    );
}

#[test]
fn test_misaligned_index_data_rejected() {
    let result = MeshData::new(
        vec![0u8; 8],
        MeshBuffer::Absent,
        IndexData::new(IndexType::UnsignedInt, 0..6),
        Vec::new(),
        None,
    );
    assert_eq!(
        result.unwrap_err(),
        MeshDataError::IndexDataMisaligned {
            size: 6,
            index_type: IndexType::UnsignedInt,
            width: 4,
        }
    );
}

#[test]
fn test_index_range_out_of_bounds_rejected() {
    let result = MeshData::new(
        vec![0u8; 4],
        MeshBuffer::Absent,
        IndexData::typed::<u16>(2, 2),
        Vec::new(),
        None,
    );
    assert_eq!(
        result.unwrap_err(),
        MeshDataError::IndexRangeOutOfBounds {
            start: 2,
            end: 6,
            buffer_len: 4,
        }
    );
}

#[test]
fn test_overflowing_index_range_rejected() {
    let result = MeshData::new(
        vec![0u8; 8],
        MeshBuffer::Absent,
        IndexData::typed::<u32>(usize::MAX - 2, 1),
        Vec::new(),
        None,
    );
    assert_eq!(
        result.unwrap_err(),
        MeshDataError::IndexRangeOutOfBounds {
            start: usize::MAX - 2,
            end: usize::MAX,
            buffer_len: 8,
        }
    );

    // A count whose byte size overflows must not collapse to a non-indexed mesh.
    let result = MeshData::new(
        vec![0u8; 8],
        MeshBuffer::Absent,
        IndexData::typed::<u32>(0, usize::MAX / 4 + 1),
        Vec::new(),
        None,
    );
    assert!(matches!(
        result.unwrap_err(),
        MeshDataError::IndexRangeOutOfBounds { start: 0, .. }
    ));
}

#[test]
fn test_reversed_index_range_rejected() {
    let result = MeshData::new(
        vec![0u8; 8],
        MeshBuffer::Absent,
        IndexData::new(IndexType::UnsignedShort, 6..2),
        Vec::new(),
        None,
    );
    assert_eq!(
        result.unwrap_err(),
        MeshDataError::IndexRangeOutOfBounds {
            start: 6,
            end: 2,
            buffer_len: 8,
        }
    );
}

#[test]
fn test_missing_buffers_rejected() {
    let result = MeshData::new(
        MeshBuffer::Absent,
        MeshBuffer::Absent,
        IndexData::typed::<u8>(0, 3),
        Vec::new(),
        None,
    );
    assert!(matches!(
        result,
        Err(MeshDataError::MissingIndexBuffer { offset: 0, size: 3 })
    ));

    let result = MeshData::new(
        MeshBuffer::Absent,
        MeshBuffer::Absent,
        IndexData::none(),
        vec![AttributeData::typed::<Vec2>(
            AttributeName::Positions2D,
            StridedLayout::packed::<Vec2>(0, 1),
        )],
        None,
    );
    assert!(matches!(
        result,
        Err(MeshDataError::MissingVertexBuffer { slot: 0, .. })
    ));
}

#[test]
fn test_attribute_out_of_bounds_rejected() {
    // Interleaved stride 20, three elements of 12 bytes: needs 52 bytes.
    let result = MeshData::new(
        MeshBuffer::Absent,
        vec![0u8; 51],
        IndexData::none(),
        vec![AttributeData::typed::<Vec3>(
            AttributeName::Positions3D,
            StridedLayout::new(0, 20, 3),
        )],
        None,
    );
    assert!(matches!(
        result,
        Err(MeshDataError::AttributeOutOfBounds {
            slot: 0,
            buffer_len: 51,
            ..
        })
    ));

    let fits = MeshData::new(
        MeshBuffer::Absent,
        vec![0u8; 52],
        IndexData::none(),
        vec![AttributeData::typed::<Vec3>(
            AttributeName::Positions3D,
            StridedLayout::new(0, 20, 3),
        )],
        None,
    );
    assert!(fits.is_ok());
}

#[test]
fn test_unassigned_placeholder_rejected() {
    let mut attributes = vec![AttributeData::default(); 2];
    attributes[0] = AttributeData::typed::<Vec2>(
        AttributeName::TextureCoordinates2D,
        StridedLayout::packed::<Vec2>(0, 1),
    );
    let result = MeshData::new(MeshBuffer::Absent, vec![0u8; 8], IndexData::none(), attributes, None);
    assert_eq!(
        result.unwrap_err(),
        MeshDataError::UnassignedAttribute { slot: 1 }
    );
}

// ============================================================================
// Attribute lookup
// ============================================================================

#[test]
fn test_attribute_for_preserves_insertion_order() {
    let mesh = colors_positions_colors();
    assert_eq!(mesh.attribute_for(AttributeName::Colors, 0), 0);
    assert_eq!(mesh.attribute_for(AttributeName::Colors, 1), 2);
    assert_eq!(mesh.attribute_for(AttributeName::Positions3D, 0), 1);
    // Stable across calls.
    assert_eq!(mesh.attribute_for(AttributeName::Colors, 1), 2);
    assert_eq!(mesh.attribute_count_for(AttributeName::Colors), 2);
    assert_eq!(mesh.find_attribute(AttributeName::Colors, 2), None);

    assert_eq!(mesh.attribute_type_for(AttributeName::Colors, 0), AttributeType::Vector4);
    assert_eq!(mesh.attribute_type_for(AttributeName::Colors, 1), AttributeType::Vector3);
}

#[test]
#[should_panic(expected = "MeshData::attribute_for(): index 2 out of bounds for 2 AttributeName::Colors attributes")]
fn test_attribute_for_out_of_range() {
    let mesh = colors_positions_colors();
    let _ = mesh.attribute_for(AttributeName::Colors, 2);
}

#[test]
fn test_custom_names_are_separate() {
    let custom = AttributeName::custom(0);
    let mesh = MeshData::new(
        MeshBuffer::Absent,
        vec![0u8; 24],
        IndexData::none(),
        vec![
            AttributeData::typed::<Vec3>(custom, StridedLayout::packed::<Vec3>(0, 1)),
            AttributeData::typed::<Vec3>(AttributeName::Positions3D, StridedLayout::packed::<Vec3>(12, 1)),
        ],
        None,
    )
    .unwrap();
    assert_eq!(mesh.attribute_for(custom, 0), 0);
    assert_eq!(mesh.attribute_for(AttributeName::Positions3D, 0), 1);
    assert!(!mesh.has_attribute(AttributeName::custom(1)));
    assert_eq!(mesh.attribute_name(0), custom);
}

// ============================================================================
// Typed access
// ============================================================================

#[rstest]
#[case::unsigned_byte(IndexType::UnsignedByte)]
#[case::unsigned_short(IndexType::UnsignedShort)]
#[case::unsigned_int(IndexType::UnsignedInt)]
fn test_typed_indices_roundtrip(#[case] index_type: IndexType) {
    let values: [u32; 5] = [0, 3, 1, 200, 2];
    let bytes = match index_type {
        IndexType::UnsignedByte => bytes_of(&values.map(|v| v as u8)),
        IndexType::UnsignedShort => bytes_of(&values.map(|v| v as u16)),
        IndexType::UnsignedInt => bytes_of(&values),
    };
    let len = bytes.len();
    let mesh = MeshData::new(
        bytes.clone(),
        MeshBuffer::Absent,
        IndexData::new(index_type, 0..len),
        Vec::new(),
        None,
    )
    .unwrap();

    assert!(mesh.is_indexed());
    assert_eq!(mesh.index_type(), index_type);
    assert_eq!(mesh.index_count(), values.len());
    assert_eq!(mesh.index_count() * index_type.size(), mesh.index_data().len());

    let reinterpreted = match index_type {
        IndexType::UnsignedByte => mesh.indices::<u8>().as_bytes().to_vec(),
        IndexType::UnsignedShort => mesh.indices::<u16>().as_bytes().to_vec(),
        IndexType::UnsignedInt => mesh.indices::<u32>().as_bytes().to_vec(),
    };
    assert_eq!(reinterpreted, bytes);
    assert_eq!(mesh.indices_as_u32(), values.to_vec());
}

#[test]
fn test_indices_widen_bytes() {
    let mesh = MeshData::new(
        vec![1u8, 2, 255],
        MeshBuffer::Absent,
        IndexData::typed::<u8>(0, 3),
        Vec::new(),
        None,
    )
    .unwrap();
    assert_eq!(mesh.indices_as_u32(), vec![1u32, 2, 255]);
}

#[test]
fn test_indices_at_offset() {
    // Two bytes of header before the u16 indices.
    let mut bytes = vec![0xee, 0xee];
    bytes.extend_from_slice(&bytes_of(&[7u16, 8, 9]));
    let mesh = MeshData::new(
        bytes,
        MeshBuffer::Absent,
        IndexData::typed::<u16>(2, 3),
        Vec::new(),
        None,
    )
    .unwrap();
    assert_eq!(mesh.index_count(), 3);
    assert_eq!(mesh.indices::<u16>().to_vec(), vec![7, 8, 9]);
}

#[test]
#[should_panic(expected = "MeshData::attribute(): improper type requested for AttributeType::Vector4")]
fn test_wrong_attribute_type_panics() {
    let mesh = colors_positions_colors();
    let _ = mesh.attribute::<Vec3>(0);
}

#[test]
fn test_converted_accessors_copy() {
    let mesh = colors_positions_colors();
    assert_eq!(
        mesh.colors(0),
        vec![Color4::new(1.0, 0.0, 0.0, 1.0), Color4::new(0.0, 1.0, 0.0, 0.5)]
    );
    assert_eq!(
        mesh.colors(1),
        vec![Color4::new(0.1, 0.2, 0.3, 1.0), Color4::new(0.4, 0.5, 0.6, 1.0)]
    );
    assert_eq!(
        mesh.positions_3d(0),
        vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)]
    );
}

#[test]
fn test_positions_dimension_conversion() {
    let positions = [Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)];
    let flat = [Vec2::new(7.0, 8.0), Vec2::new(9.0, 10.0)];
    let mut vertex_bytes = bytes_of(&positions);
    vertex_bytes.extend_from_slice(&bytes_of(&flat));

    // Positions2D stored as Vector3, Positions3D stored as Vector2.
    let mesh = MeshData::new(
        MeshBuffer::Absent,
        vertex_bytes,
        IndexData::none(),
        vec![
            AttributeData::typed::<Vec3>(AttributeName::Positions2D, StridedLayout::packed::<Vec3>(0, 2)),
            AttributeData::typed::<Vec2>(AttributeName::Positions3D, StridedLayout::packed::<Vec2>(24, 2)),
        ],
        None,
    )
    .unwrap();

    assert_eq!(
        mesh.positions_2d(0),
        vec![Vec2::new(1.0, 2.0), Vec2::new(4.0, 5.0)]
    );
    assert_eq!(
        mesh.positions_3d(0),
        vec![Vec3::new(7.0, 8.0, 0.0), Vec3::new(9.0, 10.0, 0.0)]
    );
}

// ============================================================================
// Ownership
// ============================================================================

#[test]
fn test_release_index_data() {
    let mut mesh = MeshData::new(
        bytes_of(&[0u16, 1, 2]),
        MeshBuffer::Absent,
        IndexData::typed::<u16>(0, 3),
        Vec::new(),
        None,
    )
    .unwrap();

    let released = mesh.release_index_data();
    assert_eq!(released.into_vec(), bytes_of(&[0u16, 1, 2]));
    assert!(!mesh.is_indexed());
    assert_eq!(mesh.index_count(), 0);
    assert!(mesh.index_data().is_empty());

    let again = mesh.release_index_data();
    assert!(again.is_absent());
    assert!(again.is_empty());
}

#[test]
fn test_take_leaves_empty_source() {
    let mut source = colors_positions_colors();
    let expected_colors = source.colors(1);
    let expected_vertex_data = source.vertex_data().to_vec();

    let destination = std::mem::take(&mut source);

    assert_eq!(source.attribute_count(), 0);
    assert_eq!(source.vertex_count(), 0);
    assert!(!source.is_indexed());
    assert!(source.vertex_data().is_empty());
    assert!(source.index_data().is_empty());

    assert_eq!(destination.attribute_count(), 3);
    assert_eq!(destination.vertex_count(), 2);
    assert_eq!(destination.colors(1), expected_colors);
    assert_eq!(destination.vertex_data(), &expected_vertex_data[..]);
}

#[test]
fn test_borrowed_buffers_are_zero_copy() {
    let mut external = bytes_of(&[Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)]);
    {
        let mut mesh = MeshData::new(
            MeshBuffer::Absent,
            &mut external[..],
            IndexData::none(),
            vec![AttributeData::typed::<Vec2>(
                AttributeName::TextureCoordinates2D,
                StridedLayout::packed::<Vec2>(0, 2),
            )],
            None,
        )
        .unwrap();
        mesh.attribute_named_mut::<Vec2>(AttributeName::TextureCoordinates2D, 0)
            .set(1, Vec2::new(0.25, 0.75));

        let released = mesh.release_vertex_data();
        assert!(matches!(released, MeshBuffer::Borrowed(_)));
        assert_eq!(mesh.attribute_count(), 0);
    }
    let view = bytemuck::pod_read_unaligned::<Vec2>(&external[8..16]);
    assert_eq!(view, Vec2::new(0.25, 0.75));
}

#[test]
fn test_importer_state_passthrough() {
    struct ImporterMarker {
        file_id: u32,
    }
    let marker = ImporterMarker { file_id: 17 };
    let state: &ImporterState = &marker;

    let mesh = MeshData::new(
        MeshBuffer::Absent,
        MeshBuffer::Absent,
        IndexData::none(),
        Vec::new(),
        Some(state),
    )
    .unwrap();

    let restored = mesh
        .importer_state()
        .and_then(|s| s.downcast_ref::<ImporterMarker>())
        .map(|m| m.file_id);
    assert_eq!(restored, Some(17));
}
