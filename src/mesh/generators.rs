//! Mesh generators for common shapes.
//!
//! Every generator returns an owned [`MeshData`]. Sphere and quad vertices
//! are interleaved in a single buffer; the 2D triangle stores its attributes
//! one after another.

use std::f32::consts::PI;
use std::mem::size_of;

use crate::math::{Color3, Vec2, Vec3};
use crate::profiling::profile_scope;

use super::buffer::MeshBuffer;
use super::data::MeshData;
use super::descriptor::{AttributeData, IndexData, StridedLayout};
use super::error::MeshDataResult;
use super::types::AttributeName;

/// Internal vertex type for sphere generation (position + normal + uv).
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct PnuVertex {
    position: [f32; 3],
    normal: [f32; 3],
    uv: [f32; 2],
}

/// Internal vertex type for quad generation (position + uv).
#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct PuVertex {
    position: [f32; 3],
    uv: [f32; 2],
}

/// Generate a UV sphere mesh.
///
/// Vertices carry `Positions3D`, `Normals` and `TextureCoordinates2D`
/// interleaved with a 32-byte stride. Indices are u32.
///
/// # Arguments
///
/// * `radius` - Sphere radius
/// * `segments` - Number of longitudinal segments (around the equator)
/// * `rings` - Number of latitudinal rings (from pole to pole)
pub fn generate_sphere(radius: f32, segments: u32, rings: u32) -> MeshDataResult<MeshData<'static>> {
    let mut vertices = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    {
        profile_scope!("sphere_vertices");
        for ring in 0..=rings {
            let theta = ring as f32 * PI / rings as f32;
            let sin_theta = theta.sin();
            let cos_theta = theta.cos();

            for segment in 0..=segments {
                let phi = segment as f32 * 2.0 * PI / segments as f32;
                let x = sin_theta * phi.cos();
                let y = cos_theta;
                let z = sin_theta * phi.sin();

                vertices.push(PnuVertex {
                    position: [x * radius, y * radius, z * radius],
                    normal: [x, y, z],
                    uv: [segment as f32 / segments as f32, ring as f32 / rings as f32],
                });
            }
        }
    }

    for ring in 0..rings {
        for segment in 0..segments {
            let current = ring * (segments + 1) + segment;
            let next = current + segments + 1;

            indices.extend_from_slice(&[current, next, current + 1]);
            indices.extend_from_slice(&[current + 1, next, next + 1]);
        }
    }

    log::debug!(
        "Generated sphere: {} vertices, {} indices",
        vertices.len(),
        indices.len()
    );

    let stride = size_of::<PnuVertex>();
    let count = vertices.len();
    MeshData::new(
        bytemuck::cast_slice::<_, u8>(&indices).to_vec(),
        bytemuck::cast_slice::<_, u8>(&vertices).to_vec(),
        IndexData::typed::<u32>(0, indices.len()),
        vec![
            AttributeData::typed::<Vec3>(
                AttributeName::Positions3D,
                StridedLayout::new(0, stride, count),
            ),
            AttributeData::typed::<Vec3>(AttributeName::Normals, StridedLayout::new(12, stride, count)),
            AttributeData::typed::<Vec2>(
                AttributeName::TextureCoordinates2D,
                StridedLayout::new(24, stride, count),
            ),
        ],
        None,
    )
}

/// Generate a quad mesh on the XY plane.
///
/// Creates a quad centered at the origin with the given half-width and
/// half-height. Vertices carry `Positions3D` and `TextureCoordinates2D`
/// interleaved with a 20-byte stride. Indices are u16.
///
/// UV coordinates go from (0,0) at top-left to (1,1) at bottom-right.
pub fn generate_quad(half_width: f32, half_height: f32) -> MeshDataResult<MeshData<'static>> {
    let vertices = [
        PuVertex {
            position: [-half_width, -half_height, 0.0],
            uv: [0.0, 1.0],
        },
        PuVertex {
            position: [half_width, -half_height, 0.0],
            uv: [1.0, 1.0],
        },
        PuVertex {
            position: [half_width, half_height, 0.0],
            uv: [1.0, 0.0],
        },
        PuVertex {
            position: [-half_width, half_height, 0.0],
            uv: [0.0, 0.0],
        },
    ];
    let indices: [u16; 6] = [0, 1, 2, 2, 3, 0];

    let stride = size_of::<PuVertex>();
    MeshData::new(
        bytemuck::cast_slice::<_, u8>(&indices).to_vec(),
        bytemuck::cast_slice::<_, u8>(&vertices).to_vec(),
        IndexData::typed::<u16>(0, indices.len()),
        vec![
            AttributeData::typed::<Vec3>(AttributeName::Positions3D, StridedLayout::new(0, stride, 4)),
            AttributeData::typed::<Vec2>(
                AttributeName::TextureCoordinates2D,
                StridedLayout::new(12, stride, 4),
            ),
        ],
        None,
    )
}

/// Generate a non-indexed 2D triangle with per-vertex RGB colors.
///
/// All positions come first in the vertex buffer, followed by all colors.
pub fn generate_triangle_2d() -> MeshDataResult<MeshData<'static>> {
    let positions = [
        Vec2::new(-0.5, -0.5),
        Vec2::new(0.5, -0.5),
        Vec2::new(0.0, 0.5),
    ];
    let colors = [
        Color3::new(1.0, 0.0, 0.0),
        Color3::new(0.0, 1.0, 0.0),
        Color3::new(0.0, 0.0, 1.0),
    ];

    let mut vertex_bytes: Vec<u8> = Vec::with_capacity(size_of::<[Vec2; 3]>() + size_of::<[Color3; 3]>());
    vertex_bytes.extend_from_slice(bytemuck::cast_slice(&positions));
    let colors_offset = vertex_bytes.len();
    vertex_bytes.extend_from_slice(bytemuck::cast_slice(&colors));

    MeshData::new(
        MeshBuffer::Absent,
        vertex_bytes,
        IndexData::none(),
        vec![
            AttributeData::typed::<Vec2>(AttributeName::Positions2D, StridedLayout::packed::<Vec2>(0, 3)),
            AttributeData::typed::<Color3>(
                AttributeName::Colors,
                StridedLayout::packed::<Color3>(colors_offset, 3),
            ),
        ],
        None,
    )
}
