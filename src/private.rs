// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Sealing for [`Element`](crate::Element).
//!
//! Buffers only come in the four dtypes of `BufferData`,
//! so no element type may be added from outside the crate. The marker is
//! public but unreachable, which keeps the trait method unimplementable
//! for third parties.

/// Return type of the sealing method; nameable only inside the crate.
pub struct PrivateMarker;

macro_rules! private_decl {
    () => {
        /// Seals the trait; implemented only by the crate's element types.
        #[doc(hidden)]
        fn __private__(&self) -> crate::private::PrivateMarker;
    };
}

macro_rules! private_impl {
    () => {
        fn __private__(&self) -> crate::private::PrivateMarker {
            crate::private::PrivateMarker
        }
    };
}
