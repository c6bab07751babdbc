//! Typed strided views over raw mesh bytes.
//!
//! Mesh buffers are plain bytes with no alignment guarantee, and attributes
//! are often interleaved, so elements are read and written by value rather
//! than handed out as references. [`StridedView::as_slice`] offers a
//! zero-copy `&[T]` when the data happens to be packed and aligned.

use std::fmt;
use std::marker::PhantomData;
use std::mem::size_of;

use bytemuck::Pod;

/// Number of bytes addressed by `len` elements of `element_size` bytes laid
/// out `stride` bytes apart.
pub(crate) fn strided_byte_len(element_size: usize, stride: usize, len: usize) -> Option<usize> {
    if len == 0 {
        return Some(0);
    }
    (len - 1).checked_mul(stride)?.checked_add(element_size)
}

/// Read-only strided view of `T` elements.
pub struct StridedView<'a, T> {
    data: &'a [u8],
    stride: usize,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T> Clone for StridedView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for StridedView<'_, T> {}

impl<'a, T: Pod> StridedView<'a, T> {
    /// Create a view of `len` elements starting at the beginning of `data`.
    ///
    /// Panics if `data` is too short to hold them.
    pub fn new(data: &'a [u8], stride: usize, len: usize) -> Self {
        let required = strided_byte_len(size_of::<T>(), stride, len);
        assert!(
            required.is_some_and(|required| required <= data.len()),
            "StridedView::new(): {len} elements with stride {stride} don't fit in {} bytes",
            data.len()
        );
        Self {
            data,
            stride,
            len,
            _marker: PhantomData,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Distance in bytes between consecutive elements.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Read the element at `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        (index < self.len).then(|| self.read(index))
    }

    /// Iterate over element values.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = T> + 'a {
        let view = *self;
        (0..self.len).map(move |i| view.read(i))
    }

    /// Copy all elements into a new vector.
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// The bytes spanned by this view, from the first byte of the first
    /// element to the last byte of the last element.
    pub fn as_bytes(&self) -> &'a [u8] {
        &self.data[..self.byte_len()]
    }

    /// Zero-copy typed slice, if the elements are packed and aligned.
    pub fn as_slice(&self) -> Option<&'a [T]> {
        if self.len > 1 && self.stride != size_of::<T>() {
            return None;
        }
        let len = self.len * size_of::<T>();
        bytemuck::try_cast_slice(&self.data[..len]).ok()
    }

    fn byte_len(&self) -> usize {
        // Checked in `new`.
        strided_byte_len(size_of::<T>(), self.stride, self.len).unwrap_or(0)
    }

    fn read(&self, index: usize) -> T {
        let start = index * self.stride;
        bytemuck::pod_read_unaligned(&self.data[start..start + size_of::<T>()])
    }
}

impl<T: Pod + fmt::Debug> fmt::Debug for StridedView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Mutable strided view of `T` elements.
///
/// Writes go straight into the underlying buffer.
pub struct StridedViewMut<'a, T> {
    data: &'a mut [u8],
    stride: usize,
    len: usize,
    _marker: PhantomData<T>,
}

impl<'a, T: Pod> StridedViewMut<'a, T> {
    /// Create a mutable view of `len` elements starting at the beginning of
    /// `data`.
    ///
    /// Panics if `data` is too short to hold them.
    pub fn new(data: &'a mut [u8], stride: usize, len: usize) -> Self {
        let required = strided_byte_len(size_of::<T>(), stride, len);
        assert!(
            required.is_some_and(|required| required <= data.len()),
            "StridedViewMut::new(): {len} elements with stride {stride} don't fit in {} bytes",
            data.len()
        );
        Self {
            data,
            stride,
            len,
            _marker: PhantomData,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Reborrow as a read-only view.
    pub fn as_view(&self) -> StridedView<'_, T> {
        StridedView {
            data: &*self.data,
            stride: self.stride,
            len: self.len,
            _marker: PhantomData,
        }
    }

    pub fn get(&self, index: usize) -> Option<T> {
        self.as_view().get(index)
    }

    /// Overwrite the element at `index`. Panics if out of range.
    pub fn set(&mut self, index: usize, value: T) {
        assert!(
            index < self.len,
            "StridedViewMut::set(): index {index} out of range for {} elements",
            self.len
        );
        let start = index * self.stride;
        self.data[start..start + size_of::<T>()].copy_from_slice(bytemuck::bytes_of(&value));
    }

    /// Overwrite every element with the output of `f` applied to its
    /// current value.
    pub fn update(&mut self, mut f: impl FnMut(T) -> T) {
        for i in 0..self.len {
            let start = i * self.stride;
            let bytes = &mut self.data[start..start + size_of::<T>()];
            let value = f(bytemuck::pod_read_unaligned(bytes));
            bytes.copy_from_slice(bytemuck::bytes_of(&value));
        }
    }

    /// Zero-copy mutable typed slice, if the elements are packed and aligned.
    pub fn as_mut_slice(&mut self) -> Option<&mut [T]> {
        if self.len > 1 && self.stride != size_of::<T>() {
            return None;
        }
        let len = self.len * size_of::<T>();
        bytemuck::try_cast_slice_mut(&mut self.data[..len]).ok()
    }
}

impl<T: Pod + fmt::Debug> fmt::Debug for StridedViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_view().fmt(f)
    }
}
