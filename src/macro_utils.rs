// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// Run `$body` with `$v` bound to the typed element slice of a buffer.
//
// Every arm instantiates `$body` at a different element type, so the body
// is usually a call to a generic helper.
macro_rules! dispatch {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            $crate::data_repr::BufferData::F32(buf) => {
                let $v = buf.as_slice();
                $body
            }
            $crate::data_repr::BufferData::F64(buf) => {
                let $v = buf.as_slice();
                $body
            }
            $crate::data_repr::BufferData::I32(buf) => {
                let $v = buf.as_slice();
                $body
            }
            $crate::data_repr::BufferData::I64(buf) => {
                let $v = buf.as_slice();
                $body
            }
        }
    };
}

// Mutable counterpart of `dispatch!`.
macro_rules! dispatch_mut {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            $crate::data_repr::BufferData::F32(buf) => {
                let $v = buf.as_mut_slice();
                $body
            }
            $crate::data_repr::BufferData::F64(buf) => {
                let $v = buf.as_mut_slice();
                $body
            }
            $crate::data_repr::BufferData::I32(buf) => {
                let $v = buf.as_mut_slice();
                $body
            }
            $crate::data_repr::BufferData::I64(buf) => {
                let $v = buf.as_mut_slice();
                $body
            }
        }
    };
}
