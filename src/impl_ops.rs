// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use crate::data_repr::BufferData;
use crate::dimension::{co_broadcast, size_of_shape_checked, Layout};
use crate::dtype::{Element, Scalar};
use crate::error::{type_mismatch, HandleError};
use crate::ArrayHandle;

/// Elementwise arithmetic operators.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOp {
    #[inline]
    fn apply<A: Element>(self, a: A, b: A) -> A {
        match self {
            BinaryOp::Add => a.elem_add(b),
            BinaryOp::Sub => a.elem_sub(b),
            BinaryOp::Mul => a.elem_mul(b),
            BinaryOp::Div => a.elem_div(b),
        }
    }
}

/// Right hand side of an elementwise operation: a handle or a scalar.
#[derive(Copy, Clone, Debug)]
pub enum Operand<'a> {
    Array(&'a ArrayHandle),
    Scalar(Scalar),
}

impl<'a> From<&'a ArrayHandle> for Operand<'a> {
    fn from(a: &'a ArrayHandle) -> Self {
        Operand::Array(a)
    }
}

impl From<Scalar> for Operand<'_> {
    fn from(x: Scalar) -> Self {
        Operand::Scalar(x)
    }
}

macro_rules! impl_scalar_operand {
    ($($elem:ty),*) => {
        $(
        impl From<$elem> for Operand<'_> {
            fn from(x: $elem) -> Self {
                Operand::Scalar(Scalar::from(x))
            }
        }
        )*
    };
}

impl_scalar_operand!(f32, f64, i32, i64);

macro_rules! impl_binary_op(
    ($mth:ident, $op:ident, $doc:expr) => (
    /// Perform elementwise
    #[doc=$doc]
    /// between `self` and `rhs`, into a new buffer.
    ///
    /// See [`elementwise`](ArrayHandle::elementwise).
    pub fn $mth<'a>(&self, rhs: impl Into<Operand<'a>>) -> Result<ArrayHandle, HandleError> {
        self.elementwise(BinaryOp::$op, rhs)
    }
    );
);

/// # Arithmetic Operations
impl ArrayHandle {
    /// Apply `op` elementwise between `self` and `rhs`, returning a handle
    /// to a **new** buffer.
    ///
    /// The result never shares storage with either operand, not even when
    /// the operation leaves the values unchanged (`a + 0`).
    ///
    /// Array operands broadcast against each other with the NumPy rules.
    /// Scalar operands convert to the array's dtype (see
    /// [`Scalar::to_elem`]).
    ///
    /// **Errors** with `ShapeMismatch` if the shapes do not broadcast (or the
    /// broadcast shape is too large to index), and
    /// `TypeMismatch` if the element types differ.
    ///
    /// ```
    /// use ndshare::{arr1, arr2, BinaryOp};
    ///
    /// let a = arr2(&[[1., 2.], [3., 4.]]);
    /// let row = arr1(&[10., 20.]);
    /// let b = a.elementwise(BinaryOp::Add, &row).unwrap();
    /// assert_eq!(b, arr2(&[[11., 22.], [13., 24.]]));
    /// assert!(!b.shares_buffer(&a));
    /// ```
    pub fn elementwise<'a>(&self, op: BinaryOp, rhs: impl Into<Operand<'a>>) -> Result<ArrayHandle, HandleError> {
        let (shape, data) = match rhs.into() {
            Operand::Array(rhs) => {
                let shape = co_broadcast(self.shape(), rhs.shape())?;
                size_of_shape_checked(&shape)?;
                let lhs_layout = self.layout.broadcast_to(&shape)?;
                let rhs_layout = rhs.layout.broadcast_to(&shape)?;
                let data = zip_data(op, &self.data.borrow(), &lhs_layout, &rhs.data.borrow(), &rhs_layout)?;
                (shape, data)
            }
            Operand::Scalar(x) => {
                let data = map_scalar(op, &self.data.borrow(), &self.layout, x)?;
                (self.shape().to_vec(), data)
            }
        };
        Ok(ArrayHandle::from_data(shape, data))
    }

    impl_binary_op!(add, Add, "addition");
    impl_binary_op!(sub, Sub, "subtraction");
    impl_binary_op!(mul, Mul, "multiplication");
    impl_binary_op!(div, Div, "division");

    /// Apply `op` elementwise between `self` and `rhs`, *in place*: the
    /// augmented assignment `self @= rhs`.
    ///
    /// Unlike [`elementwise`](ArrayHandle::elementwise) this writes into the
    /// existing buffer, so every alias of the view sees the result. `rhs`
    /// is broadcast to the shape of `self`, and may alias it.
    ///
    /// **Errors** with `ShapeMismatch` if `rhs` does not broadcast to the
    /// shape of `self`, and `TypeMismatch` as for `elementwise`. On error
    /// nothing is written.
    ///
    /// ```
    /// use ndshare::{arr1, BinaryOp};
    ///
    /// let a = arr1(&[1, 2, 3]);
    /// let b = a.bind();
    /// b.elementwise_inplace(BinaryOp::Mul, 2).unwrap();
    /// assert_eq!(a.to_vec::<i32>().unwrap(), vec![2, 4, 6]);
    /// ```
    pub fn elementwise_inplace<'a>(&self, op: BinaryOp, rhs: impl Into<Operand<'a>>) -> Result<(), HandleError> {
        let result = match rhs.into() {
            Operand::Array(rhs) => {
                let rhs_layout = rhs.layout.broadcast_to(self.shape())?;
                zip_data(op, &self.data.borrow(), &self.layout, &rhs.data.borrow(), &rhs_layout)?
            }
            Operand::Scalar(x) => map_scalar(op, &self.data.borrow(), &self.layout, x)?,
        };
        self.data.borrow_mut().scatter(&self.layout, &result)
    }
}

fn zip_data(
    op: BinaryOp, lhs: &BufferData, lhs_layout: &Layout, rhs: &BufferData, rhs_layout: &Layout,
) -> Result<BufferData, HandleError> {
    fn zip_with<A: Element>(op: BinaryOp, a: &[A], la: &Layout, b: &[A], lb: &Layout) -> Vec<A> {
        la.offsets()
            .zip(lb.offsets())
            .map(|(i, j)| op.apply(a[i], b[j]))
            .collect()
    }
    let data = match (lhs, rhs) {
        (BufferData::F32(a), BufferData::F32(b)) => zip_with(op, a, lhs_layout, b, rhs_layout).into(),
        (BufferData::F64(a), BufferData::F64(b)) => zip_with(op, a, lhs_layout, b, rhs_layout).into(),
        (BufferData::I32(a), BufferData::I32(b)) => zip_with(op, a, lhs_layout, b, rhs_layout).into(),
        (BufferData::I64(a), BufferData::I64(b)) => zip_with(op, a, lhs_layout, b, rhs_layout).into(),
        _ => return Err(type_mismatch()),
    };
    Ok(data)
}

fn map_scalar(op: BinaryOp, lhs: &BufferData, layout: &Layout, x: Scalar) -> Result<BufferData, HandleError> {
    dispatch!(lhs, v => {
        let x = x.to_elem()?;
        let out: Vec<_> = layout.offsets().map(|i| op.apply(v[i], x)).collect();
        Ok(BufferData::from(out))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arr1, arr2, ErrorKind};

    #[test]
    fn adding_zero_allocates() {
        let a = arr1(&[1i64, 2, 3, 4, 5]);
        let b = a.add(0i64).unwrap();
        assert_eq!(a, b);
        assert!(!a.shares_buffer(&b));
    }

    #[test]
    fn scalar_must_match_kind() {
        let a = arr1(&[1i32, 2]);
        assert_eq!(a.mul(2.0).unwrap_err().kind(), ErrorKind::TypeMismatch);
        assert_eq!(a.mul(2i64).unwrap(), arr1(&[2i32, 4]));
    }

    #[test]
    fn broadcast_both_ways() {
        let col = arr2(&[[1], [2]]);
        let row = arr1(&[10, 20, 30]);
        let out = col.add(&row).unwrap();
        assert_eq!(out, arr2(&[[11, 21, 31], [12, 22, 32]]));
    }

    #[test]
    fn inplace_does_not_grow_target() {
        let row = arr1(&[1, 2, 3]);
        let grid = arr2(&[[1, 1, 1], [2, 2, 2]]);
        let err = row.elementwise_inplace(BinaryOp::Add, &grid).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
        assert_eq!(row.to_vec::<i32>().unwrap(), vec![1, 2, 3]);
        grid.elementwise_inplace(BinaryOp::Sub, &row).unwrap();
        assert_eq!(grid, arr2(&[[0, -1, -2], [1, 0, -1]]));
    }

    #[test]
    fn inplace_with_itself() {
        let a = arr1(&[1.5f32, 2.5]);
        a.elementwise_inplace(BinaryOp::Add, &a).unwrap();
        assert_eq!(a.to_vec::<f32>().unwrap(), vec![3.0, 5.0]);
    }
}
