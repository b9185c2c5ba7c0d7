// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use std::fmt;

use crate::dtype::Element;
use crate::{ArrayHandle, Ix};

/// Default threshold, below this element count, we don't ellipsize
const ARRAY_MANY_ELEMENT_LIMIT: usize = 500;
/// Number of elements kept at each end of an ellipsized axis
const AXIS_EDGE_ITEMS: usize = 3;

struct FormatOptions {
    elide: bool,
}

fn format_axis<A: Element>(
    v: &[A], dim: &[Ix], strides: &[Ix], offset: usize, depth: usize, opts: &FormatOptions,
    f: &mut fmt::Formatter<'_>,
) -> fmt::Result {
    let ((&len, rest), (&stride, rest_strides)) = match (dim.split_first(), strides.split_first()) {
        (Some(d), Some(s)) => (d, s),
        _ => return fmt::Display::fmt(&v[offset], f),
    };
    let elide = opts.elide && len > 2 * AXIS_EDGE_ITEMS;

    f.write_str("[")?;
    let mut i = 0;
    while i < len {
        if i > 0 {
            f.write_str(",")?;
            if rest.is_empty() {
                f.write_str(" ")?;
            } else {
                for _ in 0..rest.len() {
                    f.write_str("\n")?;
                }
                for _ in 0..=depth {
                    f.write_str(" ")?;
                }
            }
        }
        if elide && i == AXIS_EDGE_ITEMS {
            f.write_str("...")?;
            i = len - AXIS_EDGE_ITEMS;
            continue;
        }
        format_axis(v, rest, rest_strides, offset + i * stride, depth + 1, opts, f)?;
        i += 1;
    }
    f.write_str("]")
}

fn format_handle(handle: &ArrayHandle, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let opts = FormatOptions {
        elide: !f.alternate() && handle.len() > ARRAY_MANY_ELEMENT_LIMIT,
    };
    let data = handle.data.borrow();
    let layout = &handle.layout;
    dispatch!(&*data, v => format_axis(v, &layout.dim, &layout.strides, layout.offset, 0, &opts, f))
}

/// Format the view using `Display` and apply the formatting parameters used
/// to each element.
///
/// The array is shown in multiline style. Views with more than 500
/// elements are abbreviated with `...` along each long axis, unless the
/// alternate flag `{:#}` is given.
impl fmt::Display for ArrayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_handle(self, f)
    }
}

/// Format the view, then the storage information: shape, strides, offset,
/// dtype and the number of handles sharing the buffer.
impl fmt::Debug for ArrayHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        format_handle(self, f)?;
        write!(
            f,
            ", shape={:?}, strides={:?}, offset={}, dtype={}, handles={}",
            self.shape(),
            self.strides(),
            self.offset(),
            self.dtype(),
            self.handle_count()
        )
    }
}
