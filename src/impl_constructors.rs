// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Constructor methods for `ArrayHandle`.
//!
//! Every constructor allocates exactly one new buffer.

use std::rc::Rc;

use crate::data_repr::BufferData;
use crate::dimension::{size_of_shape, size_of_shape_checked, Layout};
use crate::dtype::{DType, Element, Scalar};
use crate::error::{shape_mismatch, HandleError};
use crate::{ArrayHandle, Ix};

/// # Constructor Methods for Handles
impl ArrayHandle {
    /// Wrap freshly built contiguous data; `data.len()` equals the
    /// product of `shape`.
    pub(crate) fn from_data(shape: Vec<Ix>, data: BufferData) -> ArrayHandle {
        debug_assert_eq!(size_of_shape(&shape), data.len());
        ArrayHandle {
            data: data.into_shared(),
            layout: Layout::contiguous(shape),
        }
    }

    /// A view handle sharing `self`'s buffer.
    pub(crate) fn with_layout(&self, layout: Layout) -> ArrayHandle {
        ArrayHandle {
            data: Rc::clone(&self.data),
            layout,
        }
    }

    /// Create a one-dimensional handle from a vector (no copying needed).
    ///
    /// ```
    /// use ndshare::{ArrayHandle, DType};
    ///
    /// let a = ArrayHandle::from_vec(vec![1., 2., 3., 4.]);
    /// assert_eq!(a.shape(), &[4]);
    /// assert_eq!(a.dtype(), DType::F64);
    /// ```
    pub fn from_vec<A: Element>(v: Vec<A>) -> ArrayHandle {
        let shape = vec![v.len()];
        ArrayHandle::from_data(shape, A::into_buffer(v))
    }

    /// Create a handle with the given shape from a row-major vector.
    ///
    /// **Errors** with `ShapeMismatch` if the number of elements in `v` is
    /// not the product of `shape`, or the product overflows.
    pub fn from_shape_vec<A: Element>(shape: &[Ix], v: Vec<A>) -> Result<ArrayHandle, HandleError> {
        if size_of_shape_checked(shape)? != v.len() {
            return Err(shape_mismatch());
        }
        Ok(ArrayHandle::from_data(shape.to_vec(), A::into_buffer(v)))
    }

    /// Create a handle of zeros with the given element type and shape.
    ///
    /// **Errors** with `ShapeMismatch` if the number of elements overflows.
    pub fn zeros(dtype: DType, shape: &[Ix]) -> Result<ArrayHandle, HandleError> {
        let size = size_of_shape_checked(shape)?;
        Ok(ArrayHandle::from_data(shape.to_vec(), BufferData::zeros(dtype, size)))
    }

    /// Create a handle where every element is `elem`; the dtype is the
    /// scalar's.
    ///
    /// **Errors** with `ShapeMismatch` if the number of elements overflows.
    ///
    /// ```
    /// use ndshare::ArrayHandle;
    ///
    /// let a = ArrayHandle::from_elem(&[2, 2], 7i32).unwrap();
    /// assert_eq!(a.to_vec::<i32>().unwrap(), vec![7; 4]);
    /// ```
    pub fn from_elem(shape: &[Ix], elem: impl Into<Scalar>) -> Result<ArrayHandle, HandleError> {
        let size = size_of_shape_checked(shape)?;
        Ok(ArrayHandle::from_data(shape.to_vec(), BufferData::from_elem(elem.into(), size)))
    }

    /// Create a one-dimensional handle with elements `0, 1, ..., n - 1`.
    pub fn arange<A: Element>(n: usize) -> ArrayHandle {
        let mut current = A::zero();
        let v = (0..n)
            .map(|_| {
                let ret = current;
                current = current.elem_add(A::one());
                ret
            })
            .collect();
        ArrayHandle::from_vec(v)
    }
}
