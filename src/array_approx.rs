// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use approx::{AbsDiffEq, RelativeEq, UlpsEq};

use crate::ArrayHandle;

fn same_layout(a: &ArrayHandle, b: &ArrayHandle) -> bool {
    a.dtype() == b.dtype() && a.shape() == b.shape()
}

/// Elementwise comparison of the values, widened to `f64`. Handles of
/// different dtype or shape are never equal.
///
/// **Requires crate feature `"approx"`**
impl AbsDiffEq for ArrayHandle {
    type Epsilon = f64;

    fn default_epsilon() -> f64 {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &ArrayHandle, epsilon: f64) -> bool {
        same_layout(self, other)
            && self
                .to_f64_vec()
                .iter()
                .zip(&other.to_f64_vec())
                .all(|(a, b)| a.abs_diff_eq(b, epsilon))
    }
}

/// **Requires crate feature `"approx"`**
impl RelativeEq for ArrayHandle {
    fn default_max_relative() -> f64 {
        f64::default_max_relative()
    }

    fn relative_eq(&self, other: &ArrayHandle, epsilon: f64, max_relative: f64) -> bool {
        same_layout(self, other)
            && self
                .to_f64_vec()
                .iter()
                .zip(&other.to_f64_vec())
                .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
    }
}

/// **Requires crate feature `"approx"`**
impl UlpsEq for ArrayHandle {
    fn default_max_ulps() -> u32 {
        f64::default_max_ulps()
    }

    fn ulps_eq(&self, other: &ArrayHandle, epsilon: f64, max_ulps: u32) -> bool {
        same_layout(self, other)
            && self
                .to_f64_vec()
                .iter()
                .zip(&other.to_f64_vec())
                .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
    }
}

#[cfg(test)]
mod tests {
    use crate::{arr1, arr2};
    use approx::{assert_abs_diff_eq, assert_abs_diff_ne, assert_relative_eq};

    #[test]
    fn approx_compares_values() {
        let a = arr1(&[1.0, 2.0, 3.0]);
        let b = a.add(1e-12).unwrap();
        assert_abs_diff_eq!(a, b, epsilon = 1e-9);
        assert_relative_eq!(a, b, max_relative = 1e-9);
        assert_abs_diff_ne!(a, arr1(&[1.0f32, 2.0, 3.0]));
        assert_abs_diff_ne!(a, arr2(&[[1.0, 2.0, 3.0]]));
    }
}
