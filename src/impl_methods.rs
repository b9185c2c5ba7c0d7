// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::rc::Rc;

use num_traits::ToPrimitive;
use tracing::trace;

use crate::data_repr::BufferData;
use crate::dimension::default_strides;
use crate::dtype::{DType, Element, Scalar};
use crate::error::{index_out_of_range, shape_mismatch, type_mismatch, HandleError};
use crate::slice::Slice;
use crate::{ArrayHandle, Ix};

/// # Methods For All Handles
impl ArrayHandle {
    /// The element type of the buffer.
    pub fn dtype(&self) -> DType {
        self.data.borrow().dtype()
    }

    /// Return the shape of the view as a slice.
    pub fn shape(&self) -> &[Ix] {
        &self.layout.dim
    }

    /// Return the strides of the view, in elements of the buffer.
    pub fn strides(&self) -> &[Ix] {
        &self.layout.strides
    }

    /// Position of the view's first element in the buffer.
    pub fn offset(&self) -> usize {
        self.layout.offset
    }

    /// Return the number of dimensions (axes) in the view.
    pub fn ndim(&self) -> usize {
        self.layout.dim.len()
    }

    /// Return the number of elements in the view.
    pub fn len(&self) -> usize {
        self.layout.size()
    }

    /// Return whether the view has any elements
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of elements in the whole underlying buffer.
    pub fn buffer_len(&self) -> usize {
        self.data.borrow().len()
    }

    /// Number of live handles referring to this handle's buffer,
    /// including `self`.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.data)
    }

    /// Returns `true` iff no other handle refers to the buffer.
    pub fn is_unique(&self) -> bool {
        self.handle_count() == 1
    }

    /// Return `true` if the view covers less than its whole buffer, or
    /// covers it in a different order.
    pub fn is_view(&self) -> bool {
        self.layout.offset != 0
            || self.len() != self.buffer_len()
            || self.layout.strides != default_strides(&self.layout.dim)
    }

    /// Return `true` if `self` and `other` refer to the same buffer,
    /// whatever region of it each one views.
    pub fn shares_buffer(&self, other: &ArrayHandle) -> bool {
        Rc::ptr_eq(&self.data, &other.data)
    }

    /// Return a new handle to the same buffer, with the same view.
    ///
    /// Writes through either handle are visible through the other. No
    /// element is copied.
    pub fn bind(&self) -> ArrayHandle {
        trace!(handles = self.handle_count() + 1, "bind");
        self.with_layout(self.layout.clone())
    }

    /// Return a view of the region selected by `ranges`, one per leading
    /// axis. Trailing axes without a range are taken whole.
    ///
    /// The result shares the buffer: it is a view, not a copy.
    ///
    /// **Errors** with `IndexOutOfRange` if there are more ranges than
    /// axes, or a range reaches past its axis.
    ///
    /// ```
    /// use ndshare::{s, ArrayHandle};
    ///
    /// let a = ArrayHandle::arange::<i32>(6);
    /// let tail = a.slice(s![3..]).unwrap();
    /// tail.fill(0i32).unwrap();
    /// assert_eq!(a.to_vec::<i32>().unwrap(), vec![0, 1, 2, 0, 0, 0]);
    /// ```
    pub fn slice(&self, ranges: &[Slice]) -> Result<ArrayHandle, HandleError> {
        if ranges.len() > self.ndim() {
            return Err(index_out_of_range());
        }
        let mut layout = self.layout.clone();
        for (axis, r) in ranges.iter().enumerate() {
            let (start, count) = r.resolve(layout.dim[axis])?;
            if count > 0 {
                layout.offset += start * layout.strides[axis];
            }
            // The stride only matters when there is a second element.
            if count > 1 {
                layout.strides[axis] *= r.step;
            }
            layout.dim[axis] = count;
        }
        trace!(offset = layout.offset, shape = ?layout.dim, "slice");
        Ok(self.with_layout(layout))
    }

    /// Slice a single axis, leaving the others whole.
    pub fn slice_axis(&self, axis: usize, range: impl Into<Slice>) -> Result<ArrayHandle, HandleError> {
        if axis >= self.ndim() {
            return Err(index_out_of_range());
        }
        let mut ranges = vec![Slice::full(); axis + 1];
        ranges[axis] = range.into();
        self.slice(&ranges)
    }

    /// Read the element at `index`.
    ///
    /// **Errors** with `IndexOutOfRange` if the index has the wrong number
    /// of coordinates or lies outside the view.
    pub fn get(&self, index: &[Ix]) -> Result<Scalar, HandleError> {
        let offset = self.layout.offset_of(index).ok_or_else(index_out_of_range)?;
        Ok(self.data.borrow().get(offset))
    }

    /// Write the element at `index`; visible through every alias.
    ///
    /// **Errors** with `IndexOutOfRange` for a bad index and
    /// `TypeMismatch` if `value` does not convert to the buffer's dtype.
    pub fn set(&self, index: &[Ix], value: impl Into<Scalar>) -> Result<(), HandleError> {
        let offset = self.layout.offset_of(index).ok_or_else(index_out_of_range)?;
        self.data.borrow_mut().set(offset, value.into())
    }

    /// Write `value` into every element of the view.
    pub fn fill(&self, value: impl Into<Scalar>) -> Result<(), HandleError> {
        self.data.borrow_mut().fill(&self.layout, value.into())
    }

    /// Overwrite the elements of the view with those of `values`, in place.
    ///
    /// Every handle aliasing the written region observes the new values.
    /// `values` may itself alias `self`: it is read completely before
    /// anything is written.
    ///
    /// **Errors** with `ShapeMismatch` unless the shapes are equal, and
    /// `TypeMismatch` unless the dtypes are equal. On error nothing is
    /// written.
    pub fn assign(&self, values: &ArrayHandle) -> Result<(), HandleError> {
        if self.shape() != values.shape() {
            return Err(shape_mismatch());
        }
        if self.dtype() != values.dtype() {
            return Err(type_mismatch());
        }
        let src = values.gather_data();
        self.data.borrow_mut().scatter(&self.layout, &src)
    }

    /// Copy the elements of the view out into a row-major `Vec`.
    ///
    /// **Errors** with `TypeMismatch` unless `A` is the buffer's element
    /// type.
    pub fn to_vec<A: Element>(&self) -> Result<Vec<A>, HandleError> {
        let data = self.data.borrow();
        let v = A::view_buffer(&data).ok_or_else(type_mismatch)?;
        Ok(crate::data_repr::gather(v, &self.layout))
    }

    /// The elements of the view widened to `f64`, in row-major order.
    pub fn to_f64_vec(&self) -> Vec<f64> {
        let data = self.data.borrow();
        dispatch!(&*data, v => {
            self.layout
                .offsets()
                .map(|i| v[i].to_f64().unwrap_or(f64::NAN))
                .collect()
        })
    }

    /// The elements of the view as a new contiguous buffer.
    pub(crate) fn gather_data(&self) -> BufferData {
        self.data.borrow().gather(&self.layout)
    }
}

/// Two handles are equal when they have the same dtype, shape and
/// elements, whether or not they share storage.
impl PartialEq for ArrayHandle {
    fn eq(&self, rhs: &ArrayHandle) -> bool {
        self.shape() == rhs.shape() && self.gather_data() == rhs.gather_data()
    }
}
