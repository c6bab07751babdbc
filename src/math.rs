//! Math types used by mesh attributes.
//!
//! Vectors are nalgebra types (always f32). Colors are plain `#[repr(C)]`
//! structs so they stay distinct from vectors while sharing their layout.

pub use nalgebra;

/// 2D vector (f32).
pub type Vec2 = nalgebra::Vector2<f32>;

/// 3D vector (f32).
pub type Vec3 = nalgebra::Vector3<f32>;

/// 4D vector (f32).
pub type Vec4 = nalgebra::Vector4<f32>;

/// Linear RGB color (f32 channels).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color3 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color3 {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Extend to RGBA with the given alpha.
    pub const fn with_alpha(self, a: f32) -> Color4 {
        Color4::new(self.r, self.g, self.b, a)
    }
}

/// Linear RGBA color (f32 channels).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color4 {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color4 {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Drop the alpha channel.
    pub const fn rgb(self) -> Color3 {
        Color3::new(self.r, self.g, self.b)
    }
}

/// Opaque: alpha is 1.0.
impl From<Color3> for Color4 {
    fn from(c: Color3) -> Self {
        c.with_alpha(1.0)
    }
}

impl From<[f32; 3]> for Color3 {
    fn from(c: [f32; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<[f32; 4]> for Color4 {
    fn from(c: [f32; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}
