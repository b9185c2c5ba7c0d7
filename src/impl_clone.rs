// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use tracing::debug;

use crate::data_repr::BufferData;
use crate::dimension::Layout;
use crate::dtype::{convert_elem, DType, Element};
use crate::error::{type_mismatch, HandleError};
use crate::ArrayHandle;

/// Recursive duplication of every buffer reachable from a value.
///
/// After `let b = a.deep_copy()`, no buffer reachable from `b` is
/// reachable from `a`, at any depth.
pub trait DeepCopy {
    /// Duplicate `self` and everything it refers to.
    fn deep_copy(&self) -> Self;
}

/// Cloning a handle binds it: the clone shares the buffer and the view.
impl Clone for ArrayHandle {
    fn clone(&self) -> ArrayHandle {
        self.bind()
    }
}

/// A plain handle reaches exactly one buffer, so its deep copy is its
/// shallow copy.
impl DeepCopy for ArrayHandle {
    fn deep_copy(&self) -> ArrayHandle {
        self.shallow_copy()
    }
}

impl ArrayHandle {
    /// Copy the elements of the view into a new, contiguous buffer.
    ///
    /// The result is independent of `self`: writes to either are not
    /// seen by the other. A view copies only what it views.
    ///
    /// ```
    /// use ndshare::{arr1, s};
    ///
    /// let a = arr1(&[1, 2, 3, 4]);
    /// let b = a.slice(s![2..]).unwrap().shallow_copy();
    /// a.fill(0).unwrap();
    /// assert_eq!(b.to_vec::<i32>().unwrap(), vec![3, 4]);
    /// assert!(!b.is_view());
    /// ```
    pub fn shallow_copy(&self) -> ArrayHandle {
        debug!(len = self.len(), "copy");
        ArrayHandle::from_data(self.shape().to_vec(), self.gather_data())
    }

    /// Convert the elements to `dtype`, into a new buffer.
    ///
    /// This is the explicit conversion that operations between different
    /// dtypes require. It allocates even if `dtype` is already the
    /// buffer's dtype. Floats convert to integers by truncation.
    ///
    /// **Errors** with `TypeMismatch` if some element is not representable
    /// in `dtype` (for example NaN as an integer, or a finite float too large
    /// for `float32`).
    pub fn cast(&self, dtype: DType) -> Result<ArrayHandle, HandleError> {
        let data = self.data.borrow();
        let converted = dispatch!(&*data, v => cast_elements(v, &self.layout, dtype))?;
        Ok(ArrayHandle::from_data(self.shape().to_vec(), converted))
    }
}

fn cast_elements<A: Element>(v: &[A], layout: &Layout, dtype: DType) -> Result<BufferData, HandleError> {
    fn convert<A: Element, B: Element>(v: &[A], layout: &Layout) -> Result<BufferData, HandleError> {
        layout
            .offsets()
            .map(|i| convert_elem::<A, B>(v[i]).ok_or_else(type_mismatch))
            .collect::<Result<Vec<B>, _>>()
            .map(B::into_buffer)
    }
    match dtype {
        DType::F32 => convert::<A, f32>(v, layout),
        DType::F64 => convert::<A, f64>(v, layout),
        DType::I32 => convert::<A, i32>(v, layout),
        DType::I64 => convert::<A, i64>(v, layout),
    }
}
