// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Shapes, strides and the row-major walk over a view.

use crate::error::{shape_mismatch, HandleError};
use crate::Ix;

/// Number of elements in an array of shape `dim`.
#[inline]
pub fn size_of_shape(dim: &[Ix]) -> usize {
    dim.iter().product()
}

/// Number of elements in an array of shape `dim`, checking for overflow.
///
/// The product of the non-zero axis lengths must fit in `isize`, so that
/// every index and offset within a view stays representable.
///
/// **Errors** with `ShapeMismatch` if the size overflows.
pub fn size_of_shape_checked(dim: &[Ix]) -> Result<usize, HandleError> {
    let size_nonzero = dim
        .iter()
        .filter(|&&d| d != 0)
        .try_fold(1usize, |acc, &d| acc.checked_mul(d))
        .ok_or_else(shape_mismatch)?;
    if size_nonzero > isize::MAX as usize {
        Err(shape_mismatch())
    } else {
        Ok(size_of_shape(dim))
    }
}

/// Row-major ("C" order) strides for a contiguous array of shape `dim`.
///
/// Shape (a, b, c) => Give strides (b * c, c, 1)
pub fn default_strides(dim: &[Ix]) -> Vec<Ix> {
    let mut strides = vec![0; dim.len()];
    let mut cum_prod = 1;
    for (s, &d) in strides.iter_mut().zip(dim).rev() {
        *s = cum_prod;
        cum_prod *= d;
    }
    strides
}

/// Calculate the common shape for a pair of array shapes, that they can be broadcasted
/// to. Return an error if the shapes are not compatible.
///
/// Uses the NumPy broadcasting rules.
pub fn co_broadcast(shape1: &[Ix], shape2: &[Ix]) -> Result<Vec<Ix>, HandleError> {
    let (k, overflow) = shape1.len().overflowing_sub(shape2.len());
    // Swap the order if shape2 is longer.
    if overflow {
        return co_broadcast(shape2, shape1);
    }
    // The output should be the same length as shape1.
    let mut out = shape1.to_vec();
    for (out, &s2) in out[k..].iter_mut().zip(shape2) {
        if *out != s2 {
            if *out == 1 {
                *out = s2
            } else if s2 != 1 {
                return Err(shape_mismatch());
            }
        }
    }
    Ok(out)
}

/// Advance `index` to the next row-major position within `dim`.
///
/// Returns `false` once the last position has been passed.
#[inline]
fn next_for(dim: &[Ix], index: &mut [Ix]) -> bool {
    for (&d, ix) in dim.iter().zip(index.iter_mut()).rev() {
        *ix += 1;
        if *ix == d {
            *ix = 0;
        } else {
            return true;
        }
    }
    false
}

/// Where a view's elements live inside its buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Layout {
    pub(crate) offset: usize,
    pub(crate) dim: Vec<Ix>,
    pub(crate) strides: Vec<Ix>,
}

impl Layout {
    /// The layout of a fresh contiguous buffer.
    pub(crate) fn contiguous(dim: Vec<Ix>) -> Self {
        let strides = default_strides(&dim);
        Layout {
            offset: 0,
            dim,
            strides,
        }
    }

    pub(crate) fn size(&self) -> usize {
        size_of_shape(&self.dim)
    }

    /// Buffer offset of the element at `index`, if it is in bounds.
    pub(crate) fn offset_of(&self, index: &[Ix]) -> Option<usize> {
        if index.len() != self.dim.len() {
            return None;
        }
        let mut offset = self.offset;
        for ((&i, &d), &s) in index.iter().zip(&self.dim).zip(&self.strides) {
            if i >= d {
                return None;
            }
            offset += i * s;
        }
        Some(offset)
    }

    /// Stretch this layout to `shape` by giving broadcast axes a zero stride.
    ///
    /// Only axes of length one, and missing leading axes, can be stretched.
    pub(crate) fn broadcast_to(&self, shape: &[Ix]) -> Result<Layout, HandleError> {
        let k = shape
            .len()
            .checked_sub(self.dim.len())
            .ok_or_else(shape_mismatch)?;
        let mut strides = vec![0; shape.len()];
        for (axis, (&d, &s)) in self.dim.iter().zip(&self.strides).enumerate() {
            let to = shape[k + axis];
            if d == to {
                strides[k + axis] = s;
            } else if d != 1 {
                return Err(shape_mismatch());
            }
        }
        Ok(Layout {
            offset: self.offset,
            dim: shape.to_vec(),
            strides,
        })
    }

    /// Buffer offsets of every element of the view, in row-major order.
    pub(crate) fn offsets(&self) -> Offsets<'_> {
        let index = if self.size() == 0 {
            None
        } else {
            Some(vec![0; self.dim.len()])
        };
        Offsets {
            layout: self,
            index,
            remaining: self.size(),
        }
    }
}

/// Iterator over the buffer offsets of a view.
pub(crate) struct Offsets<'a> {
    layout: &'a Layout,
    index: Option<Vec<Ix>>,
    remaining: usize,
}

impl Iterator for Offsets<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        let index = self.index.as_mut()?;
        let offset = self.layout.offset
            + index
                .iter()
                .zip(&self.layout.strides)
                .map(|(&i, &s)| i * s)
                .sum::<usize>();
        if !next_for(&self.layout.dim, index) {
            self.index = None;
        }
        self.remaining -= 1;
        Some(offset)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Offsets<'_> {}
