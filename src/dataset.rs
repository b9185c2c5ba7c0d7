// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Labelled collections of handles.
//!
//! A [`Dataset`] holds named data variables and coordinates, each a
//! [`Variable`]: a handle with one dimension name per axis. The aliasing
//! rules of [`ArrayHandle`] apply to every nested handle:
//! [`shallow_copy`](Dataset::shallow_copy) (and `clone()`) builds a new
//! container around the same buffers, while
//! [`deep_copy`](DeepCopy::deep_copy) duplicates every buffer, coordinates
//! included.

use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

use tracing::debug;

use crate::error::{shape_mismatch, HandleError};
use crate::impl_clone::DeepCopy;
use crate::slice::Slice;
use crate::{ArrayHandle, Ix};

/// An attribute value: owned metadata attached to a variable or dataset.
#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Str(String),
    Int(i64),
    Float(f64),
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        AttrValue::Str(s.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        AttrValue::Str(s)
    }
}

impl From<i64> for AttrValue {
    fn from(x: i64) -> Self {
        AttrValue::Int(x)
    }
}

impl From<f64> for AttrValue {
    fn from(x: f64) -> Self {
        AttrValue::Float(x)
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) => f.write_str(s),
            AttrValue::Int(x) => x.fmt(f),
            AttrValue::Float(x) => x.fmt(f),
        }
    }
}

/// Attribute map, sorted by key.
pub type Attrs = BTreeMap<String, AttrValue>;

/// A handle with named dimensions and attributes.
///
/// `clone()` binds the handle; see [`shallow_copy`](Variable::shallow_copy).
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    dims: Vec<String>,
    data: ArrayHandle,
    attrs: Attrs,
}

impl Variable {
    /// Label the axes of `data` with `dims`.
    ///
    /// **Errors** with `ShapeMismatch` if the number of names differs from
    /// the number of axes, or a name is repeated.
    pub fn new<I, S>(dims: I, data: ArrayHandle) -> Result<Variable, HandleError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let dims: Vec<String> = dims.into_iter().map(Into::into).collect();
        if dims.len() != data.ndim() {
            return Err(shape_mismatch());
        }
        for (i, name) in dims.iter().enumerate() {
            if dims[..i].contains(name) {
                return Err(shape_mismatch());
            }
        }
        Ok(Variable {
            dims,
            data,
            attrs: Attrs::new(),
        })
    }

    /// Builder-style attribute insertion.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn dims(&self) -> &[String] {
        &self.dims
    }

    pub fn data(&self) -> &ArrayHandle {
        &self.data
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut Attrs {
        &mut self.attrs
    }

    /// Axis number of the dimension `dim`, if the variable has it.
    pub fn axis_of(&self, dim: &str) -> Option<usize> {
        self.dims.iter().position(|d| d == dim)
    }

    /// Dimension names paired with their lengths.
    pub fn sizes(&self) -> impl Iterator<Item = (&str, Ix)> + '_ {
        self.dims
            .iter()
            .map(String::as_str)
            .zip(self.data.shape().iter().copied())
    }

    /// A new variable bound to the same buffer; attributes are copied.
    pub fn shallow_copy(&self) -> Variable {
        self.clone()
    }

    /// Select `slice` positions along `dim`, as a view.
    ///
    /// A variable without `dim` is returned bound and unchanged.
    pub fn isel(&self, dim: &str, slice: impl Into<Slice>) -> Result<Variable, HandleError> {
        let data = match self.axis_of(dim) {
            Some(axis) => self.data.slice_axis(axis, slice)?,
            None => self.data.bind(),
        };
        Ok(Variable {
            dims: self.dims.clone(),
            data,
            attrs: self.attrs.clone(),
        })
    }
}

impl DeepCopy for Variable {
    fn deep_copy(&self) -> Variable {
        Variable {
            dims: self.dims.clone(),
            data: self.data.deep_copy(),
            attrs: self.attrs.clone(),
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq)]
enum Role {
    Coord,
    Data,
}

/// A named collection of data variables and coordinates sharing a set of
/// dimensions.
///
/// Every dimension name has one length across the whole dataset.
///
/// ```
/// use ndshare::prelude::*;
///
/// let mut ds = Dataset::new();
/// let time = Variable::new(["time"], arr1(&[0i64, 1, 2])).unwrap();
/// let temp = Variable::new(["time"], arr1(&[4.5, 4.1, 3.9])).unwrap();
/// ds.insert_coord("time", time).unwrap();
/// ds.insert_var("temp", temp).unwrap();
///
/// let shallow = ds.shallow_copy();
/// let deep = ds.deep_copy();
/// assert!(shallow.shares_buffer_with(&ds));
/// assert!(!deep.shares_buffer_with(&ds));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    data_vars: BTreeMap<String, Variable>,
    coords: BTreeMap<String, Variable>,
    attrs: Attrs,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a data variable, replacing any data variable of that name.
    ///
    /// **Errors** with `ShapeMismatch` if one of its dimensions already has
    /// a different length in the dataset.
    pub fn insert_var(&mut self, name: impl Into<String>, var: Variable) -> Result<Option<Variable>, HandleError> {
        let name = name.into();
        self.check_sizes(&var, Role::Data, &name)?;
        Ok(self.data_vars.insert(name, var))
    }

    /// Insert a coordinate, replacing any coordinate of that name.
    ///
    /// **Errors** as for [`insert_var`](Dataset::insert_var).
    pub fn insert_coord(&mut self, name: impl Into<String>, var: Variable) -> Result<Option<Variable>, HandleError> {
        let name = name.into();
        self.check_sizes(&var, Role::Coord, &name)?;
        Ok(self.coords.insert(name, var))
    }

    pub fn remove_var(&mut self, name: &str) -> Option<Variable> {
        self.data_vars.remove(name)
    }

    pub fn remove_coord(&mut self, name: &str) -> Option<Variable> {
        self.coords.remove(name)
    }

    pub fn var(&self, name: &str) -> Option<&Variable> {
        self.data_vars.get(name)
    }

    pub fn coord(&self, name: &str) -> Option<&Variable> {
        self.coords.get(name)
    }

    /// Look `name` up among the data variables, then the coordinates.
    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.var(name).or_else(|| self.coord(name))
    }

    pub fn data_vars(&self) -> Vars<'_> {
        Vars(self.data_vars.iter())
    }

    pub fn coords(&self) -> Vars<'_> {
        Vars(self.coords.iter())
    }

    pub fn attrs(&self) -> &Attrs {
        &self.attrs
    }

    pub fn attrs_mut(&mut self) -> &mut Attrs {
        &mut self.attrs
    }

    /// Number of data variables. Coordinates are not counted.
    pub fn len(&self) -> usize {
        self.data_vars.len()
    }

    /// Return `true` if there are no data variables, even when
    /// coordinates are present.
    pub fn is_empty(&self) -> bool {
        self.data_vars.is_empty()
    }

    /// Length of every dimension used in the dataset.
    pub fn dims(&self) -> BTreeMap<String, Ix> {
        self.all_vars()
            .flat_map(|(_, _, v)| v.sizes())
            .map(|(d, n)| (d.to_owned(), n))
            .collect()
    }

    /// Every handle in the dataset: coordinates first, then data variables.
    pub fn handles(&self) -> impl Iterator<Item = &ArrayHandle> + '_ {
        self.all_vars().map(|(_, _, v)| v.data())
    }

    /// Return `true` if any buffer reachable from `self` is reachable
    /// from `other`.
    pub fn shares_buffer_with(&self, other: &Dataset) -> bool {
        self.handles()
            .any(|a| other.handles().any(|b| a.shares_buffer(b)))
    }

    /// A new dataset whose variables are bound to the same buffers.
    ///
    /// Writes through either dataset's handles are visible in the other;
    /// inserting or removing variables is not.
    pub fn shallow_copy(&self) -> Dataset {
        self.clone()
    }

    /// Positional selection along `dim`: every variable with that
    /// dimension becomes a view, the rest are bound unchanged.
    ///
    /// **Errors** with `IndexOutOfRange` if `slice` reaches past the end of
    /// `dim`.
    pub fn isel(&self, dim: &str, slice: impl Into<Slice>) -> Result<Dataset, HandleError> {
        let slice = slice.into();
        let select = |vars: &BTreeMap<String, Variable>| {
            vars.iter()
                .map(|(name, v)| Ok((name.clone(), v.isel(dim, slice)?)))
                .collect::<Result<BTreeMap<_, _>, HandleError>>()
        };
        Ok(Dataset {
            data_vars: select(&self.data_vars)?,
            coords: select(&self.coords)?,
            attrs: self.attrs.clone(),
        })
    }

    fn all_vars(&self) -> impl Iterator<Item = (Role, &str, &Variable)> + '_ {
        let coords = self.coords.iter().map(|(k, v)| (Role::Coord, k.as_str(), v));
        let data = self.data_vars.iter().map(|(k, v)| (Role::Data, k.as_str(), v));
        coords.chain(data)
    }

    fn check_sizes(&self, var: &Variable, role: Role, name: &str) -> Result<(), HandleError> {
        for (r, n, existing) in self.all_vars() {
            if r == role && n == name {
                continue;
            }
            for (dim, len) in var.sizes() {
                if existing.sizes().any(|(d, l)| d == dim && l != len) {
                    return Err(shape_mismatch());
                }
            }
        }
        Ok(())
    }
}

impl DeepCopy for Dataset {
    fn deep_copy(&self) -> Dataset {
        let copy_all = |vars: &BTreeMap<String, Variable>| -> BTreeMap<String, Variable> {
            vars.iter()
                .map(|(name, v)| (name.clone(), v.deep_copy()))
                .collect()
        };
        debug!(data_vars = self.data_vars.len(), coords = self.coords.len(), "deep copy of dataset");
        Dataset {
            data_vars: copy_all(&self.data_vars),
            coords: copy_all(&self.coords),
            attrs: self.attrs.clone(),
        }
    }
}

/// Iterator over `(name, variable)` pairs, sorted by name.
pub struct Vars<'a>(btree_map::Iter<'a, String, Variable>);

impl<'a> Iterator for Vars<'a> {
    type Item = (&'a str, &'a Variable);

    fn next(&mut self) -> Option<Self::Item> {
        self.0.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.0.size_hint()
    }
}

impl ExactSizeIterator for Vars<'_> {}

fn write_section(f: &mut fmt::Formatter<'_>, title: &str, vars: Vars<'_>) -> fmt::Result {
    if vars.len() == 0 {
        return Ok(());
    }
    writeln!(f, "{}:", title)?;
    for (name, v) in vars {
        writeln!(f, "    {:<12} ({}) {} {}", name, v.dims().join(", "), v.data().dtype(), v.data().len())?;
    }
    Ok(())
}

/// A summary listing dimensions, coordinates, data variables and
/// attributes; element values are not printed.
impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "<ndshare.Dataset>")?;
        let dims: Vec<String> = self
            .dims()
            .iter()
            .map(|(d, n)| format!("{}: {}", d, n))
            .collect();
        writeln!(f, "Dimensions:  ({})", dims.join(", "))?;
        write_section(f, "Coordinates", self.coords())?;
        write_section(f, "Data variables", self.data_vars())?;
        if !self.attrs.is_empty() {
            writeln!(f, "Attributes:")?;
            for (k, v) in &self.attrs {
                writeln!(f, "    {}: {}", k, v)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{arr1, arr2, ErrorKind};

    fn grid() -> Dataset {
        let mut ds = Dataset::new();
        ds.insert_coord("x", Variable::new(["x"], arr1(&[0i64, 10, 20])).unwrap())
            .unwrap();
        ds.insert_var(
            "v",
            Variable::new(["t", "x"], arr2(&[[1., 2., 3.], [4., 5., 6.]])).unwrap(),
        )
        .unwrap();
        ds
    }

    #[test]
    fn len_and_is_empty_count_data_vars() {
        let mut ds = grid();
        assert_eq!((ds.len(), ds.is_empty()), (1, false));
        ds.remove_var("v");
        assert_eq!(ds.coords().len(), 1);
        assert_eq!((ds.len(), ds.is_empty()), (0, true));
    }

    #[test]
    fn variable_needs_one_name_per_axis() {
        let err = Variable::new(["a"], arr2(&[[1, 2]])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
        let err = Variable::new(["a", "a"], arr2(&[[1, 2]])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ShapeMismatch);
    }

    #[test]
    fn dimension_lengths_are_consistent() {
        let mut ds = grid();
        assert_eq!(ds.dims().get("x"), Some(&3));
        assert_eq!(ds.dims().get("t"), Some(&2));
        let bad = Variable::new(["x"], arr1(&[1., 2.])).unwrap();
        assert_eq!(ds.insert_var("w", bad).unwrap_err().kind(), ErrorKind::ShapeMismatch);
        assert!(ds.var("w").is_none());
        // replacing a variable only checks against the others
        let wider = Variable::new(["x"], arr1(&[0i64, 1, 2, 3])).unwrap();
        assert!(ds.insert_coord("x", wider).is_err());
        ds.remove_var("v");
        let wider = Variable::new(["x"], arr1(&[0i64, 1, 2, 3])).unwrap();
        assert!(ds.insert_coord("x", wider).unwrap().is_some());
    }

    #[test]
    fn isel_returns_views() {
        let ds = grid();
        let sub = ds.isel("x", 1..).unwrap();
        assert_eq!(sub.dims().get("x"), Some(&2));
        assert!(sub.shares_buffer_with(&ds));
        sub.var("v").unwrap().data().fill(0.).unwrap();
        assert_eq!(
            ds.var("v").unwrap().data().to_vec::<f64>().unwrap(),
            vec![1., 0., 0., 4., 0., 0.]
        );
        assert!(ds.isel("x", 2..5).is_err());
    }

    #[test]
    fn summary_lists_sections() {
        let mut ds = grid();
        ds.attrs_mut().insert("title".into(), "demo".into());
        let text = ds.to_string();
        assert!(text.contains("Dimensions:  (t: 2, x: 3)"), "{}", text);
        assert!(text.contains("Coordinates:"));
        assert!(text.contains("(t, x) float64 6"));
        assert!(text.contains("title: demo"));
    }
}
