// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::dtype::Element;
use crate::ArrayHandle;

/// Create a zero-dimensional handle holding the single element `x`.
///
/// ```
/// use ndshare::{arr0, Scalar};
///
/// let a = arr0(3.5f32);
/// assert_eq!(a.ndim(), 0);
/// assert_eq!(a.get(&[]).unwrap(), Scalar::F32(3.5));
/// ```
pub fn arr0<A: Element>(x: A) -> ArrayHandle {
    ArrayHandle::from_data(Vec::new(), A::into_buffer(vec![x]))
}

/// Create a one-dimensional handle with elements from `xs`.
///
/// ```
/// use ndshare::arr1;
///
/// let a = arr1(&[1, 2, 3, 4, 5]);
/// assert_eq!(a.shape(), &[5]);
/// ```
pub fn arr1<A: Element>(xs: &[A]) -> ArrayHandle {
    ArrayHandle::from_vec(xs.to_vec())
}

/// Create a two-dimensional handle with elements from `xs`.
///
/// ```
/// use ndshare::arr2;
///
/// let a = arr2(&[[1, 2, 3],
///                [4, 5, 6]]);
/// assert_eq!(a.shape(), &[2, 3]);
/// ```
pub fn arr2<A: Element, const N: usize>(xs: &[[A; N]]) -> ArrayHandle {
    let v: Vec<A> = xs.iter().flat_map(|row| row.iter().copied()).collect();
    ArrayHandle::from_data(vec![xs.len(), N], A::into_buffer(v))
}

/// Return `true` if `a` and `b` refer to the same buffer.
///
/// This is an identity query on storage, not a comparison of values.
///
/// ```
/// use ndshare::{arr1, s, shares_buffer};
///
/// let a = arr1(&[1., 2., 3.]);
/// let view = a.slice(s![1..]).unwrap();
/// let copy = a.shallow_copy();
/// assert!(shares_buffer(&a, &view));
/// assert!(!shares_buffer(&a, &copy));
/// assert_eq!(a, copy);
/// ```
pub fn shares_buffer(a: &ArrayHandle, b: &ArrayHandle) -> bool {
    a.shares_buffer(b)
}
