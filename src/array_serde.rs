// Copyright 2026 ndshare developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.
use serde::de::{self, Deserialize, Deserializer};
use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::data_repr::BufferData;
use crate::dimension::size_of_shape_checked;
use crate::{ArrayHandle, Ix};

/// Version tag of the serialized snapshot layout.
const ARRAY_FORMAT_VERSION: u8 = 1u8;

/// Verifies that the version of the deserialized array matches the current
/// `ARRAY_FORMAT_VERSION`.
fn verify_version<E>(v: u8) -> Result<(), E>
where
    E: de::Error,
{
    if v != ARRAY_FORMAT_VERSION {
        let err_msg = format!("unknown array version: {}", v);
        Err(de::Error::custom(err_msg))
    } else {
        Ok(())
    }
}

/// Serializes the *values* of the view as `{v, dim, data}`; the data is
/// tagged with its dtype. Sharing is not recorded.
///
/// **Requires crate feature `"serde"`**
impl Serialize for ArrayHandle {
    fn serialize<Se>(&self, serializer: Se) -> Result<Se::Ok, Se::Error>
    where
        Se: Serializer,
    {
        let mut state = serializer.serialize_struct("ArrayHandle", 3)?;
        state.serialize_field("v", &ARRAY_FORMAT_VERSION)?;
        state.serialize_field("dim", self.shape())?;
        state.serialize_field("data", &self.gather_data())?;
        state.end()
    }
}

#[derive(serde::Deserialize)]
#[serde(rename = "ArrayHandle")]
struct Snapshot {
    v: u8,
    dim: Vec<Ix>,
    data: BufferData,
}

/// Deserializing always allocates a fresh buffer.
///
/// **Requires crate feature `"serde"`**
impl<'de> Deserialize<'de> for ArrayHandle {
    fn deserialize<D>(deserializer: D) -> Result<ArrayHandle, D::Error>
    where
        D: Deserializer<'de>,
    {
        let snapshot = Snapshot::deserialize(deserializer)?;
        verify_version(snapshot.v)?;
        let size = size_of_shape_checked(&snapshot.dim)
            .map_err(|_| de::Error::custom("dimension overflows the element count"))?;
        if size != snapshot.data.len() {
            return Err(de::Error::custom("data and dimension must match in size"));
        }
        Ok(ArrayHandle::from_data(snapshot.dim, snapshot.data))
    }
}
