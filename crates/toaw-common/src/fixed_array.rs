//! Serialize `[T; N]` of any length as a sequence.
//!
//! serde only covers arrays up to 32 elements; TOAW records carry longer
//! reserved arrays whose exact length must survive a round trip.

use serde::de::{self, Deserialize, Deserializer};
use serde::{Serialize, Serializer};

pub fn serialize<S, T, const N: usize>(values: &[T; N], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize,
{
    serializer.collect_seq(values.iter())
}

pub fn deserialize<'de, D, T, const N: usize>(deserializer: D) -> Result<[T; N], D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let values = Vec::<T>::deserialize(deserializer)?;
    let len = values.len();
    values
        .try_into()
        .map_err(|_| de::Error::invalid_length(len, &"an array of the recorded length"))
}
