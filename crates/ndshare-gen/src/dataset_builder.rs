// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use ndshare::{ArrayHandle, Dataset, Ix, Variable};

use crate::handle_builder::HandleBuilder;

/// Builds a dataset on a fixed grid of named dimensions.
///
/// Every dimension gets an `int64` coordinate `0, 1, ...`, and every data
/// variable spans all dimensions with sequential `float64` values.
#[derive(Clone, Debug, Default)]
pub struct DatasetBuilder
{
    dims: Vec<(String, Ix)>,
    vars: Vec<String>,
}

impl DatasetBuilder
{
    pub fn new() -> Self
    {
        Self::default()
    }

    pub fn dim(mut self, name: &str, len: Ix) -> Self
    {
        self.dims.push((name.to_owned(), len));
        self
    }

    pub fn var(mut self, name: &str) -> Self
    {
        self.vars.push(name.to_owned());
        self
    }

    pub fn build(self) -> Dataset
    {
        let mut ds = Dataset::new();
        let shape: Vec<Ix> = self.dims.iter().map(|(_, n)| *n).collect();
        let names: Vec<&str> = self.dims.iter().map(|(d, _)| d.as_str()).collect();
        for (name, len) in &self.dims {
            let coord = variable([name.as_str()], ArrayHandle::arange::<i64>(*len));
            insert(ds.insert_coord(name.as_str(), coord));
        }
        for name in &self.vars {
            let data = HandleBuilder::new(&shape).build::<f64>();
            insert(ds.insert_var(name.as_str(), variable(names.iter().copied(), data)));
        }
        ds
    }
}

fn variable<'a>(dims: impl IntoIterator<Item = &'a str>, data: ArrayHandle) -> Variable
{
    match Variable::new(dims, data) {
        Ok(v) => v,
        Err(e) => panic!("builder dimensions are consistent: {}", e),
    }
}

fn insert(result: Result<Option<Variable>, ndshare::HandleError>)
{
    if let Err(e) = result {
        panic!("builder dimensions are consistent: {}", e);
    }
}

#[test]
fn test_grid()
{
    let ds = DatasetBuilder::new()
        .dim("time", 4)
        .dim("x", 3)
        .var("a")
        .var("b")
        .build();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.dims().get("time"), Some(&4));
    assert_eq!(ds.var("b").unwrap().data().shape(), &[4, 3]);
    assert_eq!(ds.coords().count(), 2);
}
