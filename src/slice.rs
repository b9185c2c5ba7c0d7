// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::ops::{Range, RangeFrom, RangeFull, RangeInclusive, RangeTo};

use crate::error::{index_out_of_range, HandleError};
use crate::Ix;

/// A slice (range with step) along one axis.
///
/// `end` is an exclusive index; `None` means "to the end of the axis".
/// `step` must be at least one.
///
/// The macro [`s!`](crate::s!) is usually the most convenient way to
/// build a list of slices for [`ArrayHandle::slice`](crate::ArrayHandle::slice).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Slice {
    pub start: Ix,
    pub end: Option<Ix>,
    pub step: Ix,
}

impl Slice {
    /// Create a new `Slice` with the given extents.
    pub fn new(start: Ix, end: Option<Ix>, step: Ix) -> Slice {
        Slice { start, end, step }
    }

    /// The whole axis.
    pub fn full() -> Slice {
        Slice::new(0, None, 1)
    }

    /// Create a new `Slice` with the given step size (multiplied with the
    /// previous step size).
    ///
    /// The product saturates: a step at least as long as the axis selects
    /// only the first element, whatever its exact value.
    #[inline]
    pub fn step_by(self, step: Ix) -> Self {
        Slice {
            step: self.step.saturating_mul(step),
            ..self
        }
    }

    /// A slice that resolves to `IndexOutOfRange` on every axis, for
    /// positions whose exclusive end does not fit in `Ix`.
    fn past_the_end(start: Ix) -> Slice {
        Slice::new(start, Some(start), 0)
    }

    /// Resolve against an axis of length `len`, returning the first index
    /// and the number of selected elements.
    pub(crate) fn resolve(&self, len: Ix) -> Result<(Ix, Ix), HandleError> {
        let end = self.end.unwrap_or(len);
        if self.step == 0 || end > len || self.start > end {
            return Err(index_out_of_range());
        }
        let count = match end - self.start {
            0 => 0,
            n => (n - 1) / self.step + 1,
        };
        Ok((self.start, count))
    }
}

impl From<Range<Ix>> for Slice {
    #[inline]
    fn from(r: Range<Ix>) -> Slice {
        Slice::new(r.start, Some(r.end), 1)
    }
}

impl From<RangeInclusive<Ix>> for Slice {
    #[inline]
    fn from(r: RangeInclusive<Ix>) -> Slice {
        match r.end().checked_add(1) {
            Some(end) => Slice::new(*r.start(), Some(end), 1),
            None => Slice::past_the_end(*r.start()),
        }
    }
}

impl From<RangeFrom<Ix>> for Slice {
    #[inline]
    fn from(r: RangeFrom<Ix>) -> Slice {
        Slice::new(r.start, None, 1)
    }
}

impl From<RangeTo<Ix>> for Slice {
    #[inline]
    fn from(r: RangeTo<Ix>) -> Slice {
        Slice::new(0, Some(r.end), 1)
    }
}

impl From<RangeFull> for Slice {
    #[inline]
    fn from(_: RangeFull) -> Slice {
        Slice::full()
    }
}

/// Single index: a view of length one along the axis.
impl From<Ix> for Slice {
    #[inline]
    fn from(i: Ix) -> Slice {
        match i.checked_add(1) {
            Some(end) => Slice::new(i, Some(end), 1),
            None => Slice::past_the_end(i),
        }
    }
}

/// Slice argument constructor.
///
/// `s![]` takes a list of ranges, one per leading axis, separated by
/// commas. Each range may be followed by `;step`.
///
/// ```
/// use ndshare::{s, ArrayHandle};
///
/// let a = ArrayHandle::arange::<i64>(10);
/// let evens = a.slice(s![..;2]).unwrap();
/// assert_eq!(evens.to_vec::<i64>().unwrap(), vec![0, 2, 4, 6, 8]);
///
/// let b = ArrayHandle::from_shape_vec(&[2, 3], vec![1., 2., 3., 4., 5., 6.]).unwrap();
/// let col = b.slice(s![.., 1..2]).unwrap();
/// assert_eq!(col.shape(), &[2, 1]);
/// ```
#[macro_export]
macro_rules! s(
    ($($r:expr $(;$step:expr)?),* $(,)?) => {
        &[$( $crate::Slice::from($r)$(.step_by($step))? ),*]
    };
);
