// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Element type tags and the scalar values that travel with them.

use std::fmt;

use num_traits::{NumCast, One, ToPrimitive, Zero};

use crate::data_repr::BufferData;
use crate::error::{type_mismatch, HandleError};

/// The element type of a buffer.
///
/// Every buffer carries exactly one `DType` for its whole life; operations
/// that would combine two different tags fail with
/// [`ErrorKind::TypeMismatch`](crate::ErrorKind::TypeMismatch) unless the
/// caller converts explicitly with [`ArrayHandle::cast`](crate::ArrayHandle::cast).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DType {
    F32,
    F64,
    I32,
    I64,
}

impl DType {
    /// Return `true` for the floating point types.
    pub fn is_float(self) -> bool {
        matches!(self, DType::F32 | DType::F64)
    }

    /// Return `true` for the integer types.
    pub fn is_integer(self) -> bool {
        !self.is_float()
    }

    /// Size of one element in bytes.
    pub fn size_of(self) -> usize {
        match self {
            DType::F32 | DType::I32 => 4,
            DType::F64 | DType::I64 => 8,
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            DType::F32 => "float32",
            DType::F64 => "float64",
            DType::I32 => "int32",
            DType::I64 => "int64",
        };
        f.write_str(name)
    }
}

/// Elements that can be stored in a buffer.
///
/// This trait is sealed; it is implemented for `f32`, `f64`, `i32` and `i64`.
///
/// Integer arithmetic wraps on overflow, and integer division by zero
/// produces zero instead of panicking.
pub trait Element:
    Copy + PartialEq + PartialOrd + fmt::Debug + fmt::Display + NumCast + Zero + One + 'static
{
    /// The tag stored alongside buffers of this element type.
    const DTYPE: DType;

    #[doc(hidden)]
    fn elem_add(self, rhs: Self) -> Self;
    #[doc(hidden)]
    fn elem_sub(self, rhs: Self) -> Self;
    #[doc(hidden)]
    fn elem_mul(self, rhs: Self) -> Self;
    #[doc(hidden)]
    fn elem_div(self, rhs: Self) -> Self;

    #[doc(hidden)]
    fn into_buffer(v: Vec<Self>) -> BufferData;

    #[doc(hidden)]
    fn view_buffer(data: &BufferData) -> Option<&[Self]>;

    /// Wrap the value in a tagged [`Scalar`].
    fn into_scalar(self) -> Scalar;

    private_decl! {}
}

macro_rules! impl_element {
    (@buffer $variant:ident) => {
        fn into_buffer(v: Vec<Self>) -> BufferData {
            BufferData::$variant(v)
        }

        fn view_buffer(data: &BufferData) -> Option<&[Self]> {
            match data {
                BufferData::$variant(v) => Some(v.as_slice()),
                _ => None,
            }
        }

        fn into_scalar(self) -> Scalar {
            Scalar::$variant(self)
        }
    };
    (@common $elem:ty, $variant:ident) => {
        impl From<$elem> for Scalar {
            fn from(x: $elem) -> Scalar {
                Scalar::$variant(x)
            }
        }

        impl From<Vec<$elem>> for BufferData {
            fn from(v: Vec<$elem>) -> BufferData {
                BufferData::$variant(v)
            }
        }
    };
    ($elem:ty, $variant:ident, float) => {
        impl_element!(@common $elem, $variant);

        impl Element for $elem {
            const DTYPE: DType = DType::$variant;

            #[inline]
            fn elem_add(self, rhs: Self) -> Self { self + rhs }
            #[inline]
            fn elem_sub(self, rhs: Self) -> Self { self - rhs }
            #[inline]
            fn elem_mul(self, rhs: Self) -> Self { self * rhs }
            #[inline]
            fn elem_div(self, rhs: Self) -> Self { self / rhs }

            impl_element!(@buffer $variant);
            private_impl! {}
        }
    };
    ($elem:ty, $variant:ident, int) => {
        impl_element!(@common $elem, $variant);

        impl Element for $elem {
            const DTYPE: DType = DType::$variant;

            #[inline]
            fn elem_add(self, rhs: Self) -> Self { self.wrapping_add(rhs) }
            #[inline]
            fn elem_sub(self, rhs: Self) -> Self { self.wrapping_sub(rhs) }
            #[inline]
            fn elem_mul(self, rhs: Self) -> Self { self.wrapping_mul(rhs) }
            #[inline]
            fn elem_div(self, rhs: Self) -> Self {
                if rhs == 0 { 0 } else { self.wrapping_div(rhs) }
            }

            impl_element!(@buffer $variant);
            private_impl! {}
        }
    };
}

impl_element!(f32, F32, float);
impl_element!(f64, F64, float);
impl_element!(i32, I32, int);
impl_element!(i64, I64, int);

/// A single tagged value, used for scalar operands and element access.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Scalar {
    F32(f32),
    F64(f64),
    I32(i32),
    I64(i64),
}

/// Numeric conversion that fails instead of rounding a finite value to
/// infinity, which `NumCast` does when narrowing floats.
pub(crate) fn convert_elem<A: Element, B: Element>(x: A) -> Option<B> {
    let y = <B as NumCast>::from(x)?;
    match (x.to_f64(), y.to_f64()) {
        (Some(a), Some(b)) if a.is_finite() && !b.is_finite() => None,
        _ => Some(y),
    }
}

impl Scalar {
    /// The element type of the value.
    pub fn dtype(&self) -> DType {
        match *self {
            Scalar::F32(_) => DType::F32,
            Scalar::F64(_) => DType::F64,
            Scalar::I32(_) => DType::I32,
            Scalar::I64(_) => DType::I64,
        }
    }

    /// Convert to the element type `A`.
    ///
    /// Integer scalars convert to integer elements and float scalars to
    /// float elements, as long as the value is representable. Anything
    /// else is a `TypeMismatch`.
    pub fn to_elem<A: Element>(self) -> Result<A, HandleError> {
        if self.dtype().is_float() != A::DTYPE.is_float() {
            return Err(type_mismatch());
        }
        let value = match self {
            Scalar::F32(x) => convert_elem(x),
            Scalar::F64(x) => convert_elem(x),
            Scalar::I32(x) => convert_elem(x),
            Scalar::I64(x) => convert_elem(x),
        };
        value.ok_or_else(type_mismatch)
    }

    /// The value widened to `f64`.
    pub fn as_f64(self) -> f64 {
        match self {
            Scalar::F32(x) => x as f64,
            Scalar::F64(x) => x,
            Scalar::I32(x) => x as f64,
            Scalar::I64(x) => x as f64,
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Scalar::F32(x) => x.fmt(f),
            Scalar::F64(x) => x.fmt(f),
            Scalar::I32(x) => x.fmt(f),
            Scalar::I64(x) => x.fmt(f),
        }
    }
}
