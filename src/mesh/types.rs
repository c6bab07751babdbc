//! Index and attribute type tags.
//!
//! - [`IndexType`] - Element width of the index buffer
//! - [`AttributeType`] - Element shape of a vertex attribute
//! - [`AttributeName`] - Semantic name of a vertex attribute

use std::fmt;

use super::error::{MeshDataError, MeshDataResult};

/// Index element type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum IndexType {
    /// 8-bit unsigned integers.
    UnsignedByte,
    /// 16-bit unsigned integers.
    UnsignedShort,
    /// 32-bit unsigned integers.
    #[default]
    UnsignedInt,
}

impl IndexType {
    /// Get the size in bytes of each index.
    pub fn size(&self) -> usize {
        match self {
            Self::UnsignedByte => 1,
            Self::UnsignedShort => 2,
            Self::UnsignedInt => 4,
        }
    }

    /// Raw encoding used by importers.
    pub fn to_raw(self) -> u8 {
        match self {
            Self::UnsignedByte => 0,
            Self::UnsignedShort => 1,
            Self::UnsignedInt => 2,
        }
    }

    /// Decode a raw importer value.
    pub fn from_raw(raw: u8) -> MeshDataResult<Self> {
        match raw {
            0 => Ok(Self::UnsignedByte),
            1 => Ok(Self::UnsignedShort),
            2 => Ok(Self::UnsignedInt),
            _ => Err(MeshDataError::UnknownIndexType(raw)),
        }
    }
}

impl fmt::Display for IndexType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::UnsignedByte => "UnsignedByte",
            Self::UnsignedShort => "UnsignedShort",
            Self::UnsignedInt => "UnsignedInt",
        };
        write!(f, "IndexType::{name}")
    }
}

/// Attribute element type. All components are 32-bit floats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeType {
    /// Two floats (2D positions, texture coordinates).
    Vector2,
    /// Three floats (3D positions, normals, RGB colors).
    Vector3,
    /// Four floats (RGBA colors).
    Vector4,
}

impl AttributeType {
    /// Number of float components.
    pub fn component_count(&self) -> usize {
        match self {
            Self::Vector2 => 2,
            Self::Vector3 => 3,
            Self::Vector4 => 4,
        }
    }

    /// Get the size in bytes of one element.
    pub fn size(&self) -> usize {
        self.component_count() * std::mem::size_of::<f32>()
    }

    /// Raw encoding used by importers.
    pub fn to_raw(self) -> u8 {
        match self {
            Self::Vector2 => 0,
            Self::Vector3 => 1,
            Self::Vector4 => 2,
        }
    }

    /// Decode a raw importer value.
    pub fn from_raw(raw: u8) -> MeshDataResult<Self> {
        match raw {
            0 => Ok(Self::Vector2),
            1 => Ok(Self::Vector3),
            2 => Ok(Self::Vector4),
            _ => Err(MeshDataError::UnknownAttributeType(raw)),
        }
    }
}

impl fmt::Display for AttributeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Vector2 => "Vector2",
            Self::Vector3 => "Vector3",
            Self::Vector4 => "Vector4",
        };
        write!(f, "AttributeType::{name}")
    }
}

/// Semantic name of a vertex attribute.
///
/// A mesh may carry several attributes with the same name (e.g. two UV
/// sets); they are told apart by their occurrence order. Names from
/// [`AttributeName::Custom`] are importer-specific and never equal to any
/// of the fixed names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeName {
    Positions2D,
    Positions3D,
    Normals,
    TextureCoordinates2D,
    Colors,
    /// Importer-defined name. Built through [`AttributeName::custom`];
    /// the raw encoding is [`AttributeName::CUSTOM_BASE`] plus the id.
    Custom(CustomId),
}

/// 7-bit id of an importer-defined [`AttributeName`].
///
/// The field is private so an id is always in `0..128` and the raw encoding
/// stays one-to-one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CustomId(u8);

impl CustomId {
    pub fn get(self) -> u8 {
        self.0
    }
}

impl AttributeName {
    /// First raw value of the custom range.
    pub const CUSTOM_BASE: u8 = 128;

    /// Create a custom name. Panics if `id` doesn't fit in 7 bits.
    pub const fn custom(id: u8) -> Self {
        assert!(id < Self::CUSTOM_BASE, "AttributeName::custom(): id out of range");
        Self::Custom(CustomId(id))
    }

    /// Whether this is an importer-defined name.
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Raw encoding used by importers.
    pub fn to_raw(self) -> u8 {
        match self {
            Self::Positions2D => 0,
            Self::Positions3D => 1,
            Self::Normals => 2,
            Self::TextureCoordinates2D => 3,
            Self::Colors => 4,
            Self::Custom(id) => Self::CUSTOM_BASE + id.0,
        }
    }

    /// Decode a raw importer value.
    ///
    /// Values at or above [`AttributeName::CUSTOM_BASE`] always decode to
    /// [`AttributeName::Custom`].
    pub fn from_raw(raw: u8) -> MeshDataResult<Self> {
        if raw >= Self::CUSTOM_BASE {
            return Ok(Self::Custom(CustomId(raw - Self::CUSTOM_BASE)));
        }
        match raw {
            0 => Ok(Self::Positions2D),
            1 => Ok(Self::Positions3D),
            2 => Ok(Self::Normals),
            3 => Ok(Self::TextureCoordinates2D),
            4 => Ok(Self::Colors),
            _ => Err(MeshDataError::UnknownAttributeName(raw)),
        }
    }
}

impl fmt::Display for AttributeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Positions2D => "Positions2D",
            Self::Positions3D => "Positions3D",
            Self::Normals => "Normals",
            Self::TextureCoordinates2D => "TextureCoordinates2D",
            Self::Colors => "Colors",
            Self::Custom(_) => return write!(f, "AttributeName::Custom({})", self.to_raw()),
        };
        write!(f, "AttributeName::{name}")
    }
}
