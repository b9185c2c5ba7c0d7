// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! ndshare prelude.
//!
//! This module contains the most used types, traits, functions, and
//! macros that you can import easily as a group.
//!
//! ```
//! use ndshare::prelude::*;
//! # let _ = arr1(&[1, 2]);
//! ```

#[doc(no_inline)]
pub use crate::{ArrayHandle, DType, Element, Scalar};

#[doc(no_inline)]
pub use crate::{BinaryOp, DeepCopy, Operand, Slice};

#[doc(no_inline)]
pub use crate::{AttrValue, Dataset, Variable};

#[doc(no_inline)]
pub use crate::{ErrorKind, HandleError};

#[doc(no_inline)]
pub use crate::{arr0, arr1, arr2, shares_buffer};

pub use crate::s;
