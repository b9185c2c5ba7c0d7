// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::debug;

use crate::dimension::Layout;
use crate::dtype::{DType, Element, Scalar};
use crate::error::{type_mismatch, HandleError};

/// The storage behind one or more handles.
///
/// One `Vec` per element type; the variant is the buffer's dtype tag.
///
/// *Public only so it can appear in the sealed `Element` trait; it is not
/// reachable from outside the crate.*
#[doc(hidden)]
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BufferData {
    F32(Vec<f32>),
    F64(Vec<f64>),
    I32(Vec<i32>),
    I64(Vec<i64>),
}

/// A buffer with shared ownership.
///
/// Handles are single threaded by construction (`Rc`), and every
/// `RefCell` borrow is released before an operation returns.
pub(crate) type SharedBuffer = Rc<RefCell<BufferData>>;

impl BufferData {
    pub(crate) fn dtype(&self) -> DType {
        match self {
            BufferData::F32(_) => DType::F32,
            BufferData::F64(_) => DType::F64,
            BufferData::I32(_) => DType::I32,
            BufferData::I64(_) => DType::I64,
        }
    }

    pub(crate) fn len(&self) -> usize {
        dispatch!(self, v => v.len())
    }

    pub(crate) fn zeros(dtype: DType, len: usize) -> Self {
        match dtype {
            DType::F32 => BufferData::F32(vec![0.; len]),
            DType::F64 => BufferData::F64(vec![0.; len]),
            DType::I32 => BufferData::I32(vec![0; len]),
            DType::I64 => BufferData::I64(vec![0; len]),
        }
    }

    pub(crate) fn from_elem(value: Scalar, len: usize) -> Self {
        match value {
            Scalar::F32(x) => BufferData::F32(vec![x; len]),
            Scalar::F64(x) => BufferData::F64(vec![x; len]),
            Scalar::I32(x) => BufferData::I32(vec![x; len]),
            Scalar::I64(x) => BufferData::I64(vec![x; len]),
        }
    }

    /// Move the data into a new shared allocation.
    pub(crate) fn into_shared(self) -> SharedBuffer {
        debug!(dtype = %self.dtype(), len = self.len(), "allocated buffer");
        Rc::new(RefCell::new(self))
    }

    pub(crate) fn get(&self, offset: usize) -> Scalar {
        dispatch!(self, v => v[offset].into_scalar())
    }

    /// Copy the elements of `layout` into a new contiguous buffer.
    pub(crate) fn gather(&self, layout: &Layout) -> BufferData {
        dispatch!(self, v => BufferData::from(gather(v, layout)))
    }

    /// Write `value` at a single offset.
    pub(crate) fn set(&mut self, offset: usize, value: Scalar) -> Result<(), HandleError> {
        dispatch_mut!(self, v => {
            v[offset] = value.to_elem()?;
            Ok(())
        })
    }

    /// Write `value` at every element of `layout`.
    pub(crate) fn fill(&mut self, layout: &Layout, value: Scalar) -> Result<(), HandleError> {
        dispatch_mut!(self, v => {
            let x = value.to_elem()?;
            for i in layout.offsets() {
                v[i] = x;
            }
            Ok(())
        })
    }

    /// Write the contiguous `src` through `layout`, element by element.
    ///
    /// `src` must hold exactly `layout.size()` elements.
    pub(crate) fn scatter(&mut self, layout: &Layout, src: &BufferData) -> Result<(), HandleError> {
        match (self, src) {
            (BufferData::F32(dst), BufferData::F32(src)) => scatter(dst, layout, src),
            (BufferData::F64(dst), BufferData::F64(src)) => scatter(dst, layout, src),
            (BufferData::I32(dst), BufferData::I32(src)) => scatter(dst, layout, src),
            (BufferData::I64(dst), BufferData::I64(src)) => scatter(dst, layout, src),
            _ => return Err(type_mismatch()),
        }
        Ok(())
    }
}

pub(crate) fn gather<A: Element>(v: &[A], layout: &Layout) -> Vec<A> {
    layout.offsets().map(|i| v[i]).collect()
}

fn scatter<A: Element>(dst: &mut [A], layout: &Layout, src: &[A]) {
    debug_assert_eq!(layout.size(), src.len());
    for (i, &x) in layout.offsets().zip(src) {
        dst[i] = x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gather_and_scatter_through_a_strided_layout() {
        let mut data = BufferData::from(vec![0i32, 1, 2, 3, 4, 5]);
        let layout = Layout {
            offset: 1,
            dim: vec![3],
            strides: vec![2],
        };
        assert_eq!(data.gather(&layout), BufferData::from(vec![1i32, 3, 5]));
        data.scatter(&layout, &BufferData::from(vec![-1i32, -3, -5])).unwrap();
        assert_eq!(data, BufferData::from(vec![0i32, -1, 2, -3, 4, -5]));
    }

    #[test]
    fn scatter_rejects_other_dtypes() {
        let mut data = BufferData::zeros(DType::F64, 2);
        let layout = Layout::contiguous(vec![2]);
        let err = data.scatter(&layout, &BufferData::zeros(DType::F32, 2));
        assert!(err.is_err());
        assert_eq!(data, BufferData::zeros(DType::F64, 2));
    }
}
