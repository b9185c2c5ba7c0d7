// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
#![crate_name = "ndshare"]
#![doc(html_root_url = "https://docs.rs/ndshare/0.1/")]
#![allow(
    clippy::should_implement_trait, // arithmetic is fallible, see `elementwise`
)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! The `ndshare` crate provides [`ArrayHandle`], a dtype-tagged
//! n-dimensional array handle whose aliasing behaviour is explicit.
//!
//! A handle is a reference to a shared buffer plus a view (offset, shape,
//! strides) into it. What an operation does to storage is part of its
//! contract:
//!
//! | operation                         | result shares the buffer? |
//! |-----------------------------------|---------------------------|
//! | [`bind`](ArrayHandle::bind), `clone()` | yes, same view       |
//! | [`slice`](ArrayHandle::slice)     | yes, narrowed view        |
//! | [`elementwise`](ArrayHandle::elementwise) (`add`, `mul`, ...) | no, always a new buffer |
//! | [`shallow_copy`](ArrayHandle::shallow_copy) | no             |
//! | [`deep_copy`](DeepCopy::deep_copy) | no, at every depth       |
//! | [`cast`](ArrayHandle::cast)       | no                        |
//!
//! Writes ([`assign`](ArrayHandle::assign), [`set`](ArrayHandle::set),
//! [`fill`](ArrayHandle::fill),
//! [`elementwise_inplace`](ArrayHandle::elementwise_inplace)) go through a
//! handle's view into the buffer, so every handle that aliases the same
//! region observes them. [`shares_buffer`] answers whether two handles
//! currently alias.
//!
//! ```
//! use ndshare::prelude::*;
//!
//! let a = arr1(&[1i64, 2, 3, 4, 5]);
//! let b = a.bind();
//! b.set(&[3], 10i64).unwrap();
//! assert_eq!(a.to_vec::<i64>().unwrap(), vec![1, 2, 3, 10, 5]);
//!
//! let c = a.add(0i64).unwrap();
//! assert!(!shares_buffer(&a, &c));
//! c.set(&[0], -1i64).unwrap();
//! assert_eq!(a.get(&[0]).unwrap(), Scalar::I64(1));
//! ```
//!
//! Labelled collections of handles live in [`Dataset`]; its
//! [`shallow_copy`](Dataset::shallow_copy) shares every nested buffer while
//! [`deep_copy`](DeepCopy::deep_copy) duplicates data variables and
//! coordinates alike.
//!
//! ## Crate Feature Flags
//!
//! - `serde`: serialization of handles as value snapshots.
//! - `approx`: `AbsDiffEq` and `RelativeEq` for handles.
//!
//! Handles use `Rc` internally and are not `Send`; the model is single
//! threaded.

#[macro_use]
mod private;
#[macro_use]
mod macro_utils;

mod data_repr;
mod dimension;
mod dtype;
mod error;
mod slice;

mod arrayformat;
mod dataset;
mod free_functions;
mod impl_clone;
mod impl_constructors;
mod impl_methods;
mod impl_ops;

#[cfg(feature = "approx")]
mod array_approx;
#[cfg(feature = "serde")]
mod array_serde;

pub mod prelude;

pub use crate::dataset::{AttrValue, Attrs, Dataset, Variable, Vars};
pub use crate::dimension::{co_broadcast, default_strides, size_of_shape, size_of_shape_checked};
pub use crate::dtype::{DType, Element, Scalar};
pub use crate::error::{ErrorKind, HandleError};
pub use crate::free_functions::*;
pub use crate::impl_clone::DeepCopy;
pub use crate::impl_ops::{BinaryOp, Operand};
pub use crate::slice::Slice;

use crate::data_repr::SharedBuffer;
use crate::dimension::Layout;

/// Array index type
pub type Ix = usize;

/// A handle to a shared, dtype-tagged buffer, seen through a view.
///
/// Cloning a handle is the same as [`bind`](ArrayHandle::bind): the clone
/// refers to the same buffer and observes every write made through the
/// original. Use [`shallow_copy`](ArrayHandle::shallow_copy) or
/// [`deep_copy`](DeepCopy::deep_copy) for independent storage.
///
/// The buffer is released when the last handle referring to it is dropped.
pub struct ArrayHandle {
    data: SharedBuffer,
    layout: Layout,
}
