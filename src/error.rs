// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::error::Error;
use std::fmt;

/// An error produced by a handle operation.
///
/// Every operation validates its inputs before touching any buffer, so a
/// returned error means nothing was written.
#[derive(Clone, Debug)]
pub struct HandleError {
    // we want to be able to change this representation later
    repr: ErrorKind,
}

impl HandleError {
    /// Return the `ErrorKind` of this error.
    #[inline]
    pub fn kind(&self) -> ErrorKind {
        self.repr
    }

    /// Create a new `HandleError`
    pub fn from_kind(error: ErrorKind) -> Self {
        from_kind(error)
    }
}

/// Error code for a failed handle operation.
///
/// This enumeration is not exhaustive. The representation of the enum
/// is not guaranteed.
#[non_exhaustive]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// a slice or index lies outside the extents of the view
    IndexOutOfRange,
    /// operand shapes are not broadcast compatible, or differ where
    /// equality is required
    ShapeMismatch,
    /// element types cannot be combined without an explicit cast
    TypeMismatch,
}

#[inline(always)]
pub fn from_kind(k: ErrorKind) -> HandleError {
    HandleError { repr: k }
}

impl PartialEq for HandleError {
    #[inline(always)]
    fn eq(&self, rhs: &Self) -> bool {
        self.repr == rhs.repr
    }
}

impl Eq for HandleError {}

impl Error for HandleError {}

impl fmt::Display for HandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self.kind() {
            ErrorKind::IndexOutOfRange => "index out of range for the view",
            ErrorKind::ShapeMismatch => "incompatible shapes",
            ErrorKind::TypeMismatch => "incompatible element types",
        };
        write!(f, "HandleError/{:?}: {}", self.kind(), description)
    }
}

pub(crate) fn index_out_of_range() -> HandleError {
    from_kind(ErrorKind::IndexOutOfRange)
}

pub(crate) fn shape_mismatch() -> HandleError {
    from_kind(ErrorKind::ShapeMismatch)
}

pub(crate) fn type_mismatch() -> HandleError {
    from_kind(ErrorKind::TypeMismatch)
}
