//! Compile-time association of element types with their runtime tags.
//!
//! Every type that can be read out of a [`MeshData`](super::MeshData) buffer
//! implements one of these traits. The impls below are the only place where
//! a Rust type is tied to an [`IndexType`] or [`AttributeType`].

use bytemuck::Pod;

use crate::math::{Color3, Color4, Vec2, Vec3, Vec4};

use super::types::{AttributeType, IndexType};

/// An index buffer element.
pub trait IndexElement: Pod + Into<u32> {
    const INDEX_TYPE: IndexType;
}

impl IndexElement for u8 {
    const INDEX_TYPE: IndexType = IndexType::UnsignedByte;
}

impl IndexElement for u16 {
    const INDEX_TYPE: IndexType = IndexType::UnsignedShort;
}

impl IndexElement for u32 {
    const INDEX_TYPE: IndexType = IndexType::UnsignedInt;
}

/// A vertex attribute element.
///
/// Several Rust types may share a tag: an RGB color and a 3D position are
/// both [`AttributeType::Vector3`] and can be read from the same attribute.
pub trait AttributeElement: Pod {
    const ATTRIBUTE_TYPE: AttributeType;
}

impl AttributeElement for Vec2 {
    const ATTRIBUTE_TYPE: AttributeType = AttributeType::Vector2;
}

impl AttributeElement for Vec3 {
    const ATTRIBUTE_TYPE: AttributeType = AttributeType::Vector3;
}

impl AttributeElement for Color3 {
    const ATTRIBUTE_TYPE: AttributeType = AttributeType::Vector3;
}

impl AttributeElement for Vec4 {
    const ATTRIBUTE_TYPE: AttributeType = AttributeType::Vector4;
}

impl AttributeElement for Color4 {
    const ATTRIBUTE_TYPE: AttributeType = AttributeType::Vector4;
}
