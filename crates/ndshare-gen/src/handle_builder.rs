// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

use ndshare::{ArrayHandle, Element, Ix};

use num_traits::{One, Zero};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandleBuilder
{
    shape: Vec<Ix>,
    generator: ElementGenerator,
}

/// How to generate elements
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ElementGenerator
{
    Sequential,
    Zero,
}

impl Default for HandleBuilder
{
    fn default() -> Self
    {
        Self::new(&[1])
    }
}

impl HandleBuilder
{
    pub fn new(shape: &[Ix]) -> Self
    {
        HandleBuilder {
            shape: shape.to_vec(),
            generator: ElementGenerator::Sequential,
        }
    }

    pub fn generator(mut self, generator: ElementGenerator) -> Self
    {
        self.generator = generator;
        self
    }

    pub fn build<T>(self) -> ArrayHandle
    where T: Element
    {
        let mut current = <T as Zero>::zero();
        let size: usize = self.shape.iter().product();
        let use_zeros = self.generator == ElementGenerator::Zero;
        let v = (0..size)
            .map(|_| {
                let ret = current;
                if !use_zeros {
                    current = ret + <T as One>::one();
                }
                ret
            })
            .collect();
        match ArrayHandle::from_shape_vec(&self.shape, v) {
            Ok(handle) => handle,
            Err(e) => unreachable!("element count follows the shape: {}", e),
        }
    }
}

#[test]
fn test_sequential()
{
    let a = HandleBuilder::new(&[3, 4]).build::<i32>();
    assert_eq!(a.shape(), &[3, 4]);
    assert_eq!(a.strides(), &[4, 1]);
    assert_eq!(a.get(&[2, 3]).unwrap(), ndshare::Scalar::I32(11));

    let z = HandleBuilder::new(&[2])
        .generator(ElementGenerator::Zero)
        .build::<f64>();
    assert_eq!(z.to_vec::<f64>().unwrap(), vec![0., 0.]);
}
