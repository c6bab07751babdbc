//! Owned or borrowed raw byte storage for mesh data.

/// Raw byte storage backing a mesh's index or vertex data.
///
/// - [`Absent`](MeshBuffer::Absent) - no storage at all
/// - [`Owned`](MeshBuffer::Owned) - heap allocation owned by the mesh
/// - [`Borrowed`](MeshBuffer::Borrowed) - external memory (e.g. a mapped
///   file) interpreted in place for lifetime `'a`
///
/// An owned buffer may be empty; that is still distinct from `Absent`.
#[derive(Debug, Default)]
pub enum MeshBuffer<'a> {
    #[default]
    Absent,
    Owned(Vec<u8>),
    Borrowed(&'a mut [u8]),
}

impl<'a> MeshBuffer<'a> {
    /// Length in bytes. Zero for an absent buffer.
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_owned(&self) -> bool {
        matches!(self, Self::Owned(_))
    }

    pub fn as_slice(&self) -> &[u8] {
        match self {
            Self::Absent => &[],
            Self::Owned(data) => data,
            Self::Borrowed(data) => data,
        }
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        match self {
            Self::Absent => &mut [],
            Self::Owned(data) => data,
            Self::Borrowed(data) => data,
        }
    }

    /// Convert into an owned vector. Borrowed data is copied.
    pub fn into_vec(self) -> Vec<u8> {
        match self {
            Self::Absent => Vec::new(),
            Self::Owned(data) => data,
            Self::Borrowed(data) => data.to_vec(),
        }
    }
}

impl From<Vec<u8>> for MeshBuffer<'_> {
    fn from(data: Vec<u8>) -> Self {
        Self::Owned(data)
    }
}

impl<'a> From<&'a mut [u8]> for MeshBuffer<'a> {
    fn from(data: &'a mut [u8]) -> Self {
        Self::Borrowed(data)
    }
}

impl<'a> From<Option<Vec<u8>>> for MeshBuffer<'a> {
    fn from(data: Option<Vec<u8>>) -> Self {
        data.map_or(Self::Absent, Self::Owned)
    }
}
