//! Tolerant decoders for fields whose JSON representation drifted between API versions.
//!
//! Integer flags arrive either as numbers (`1`) or as numeric strings (`"1"`). Both are
//! accepted here and turned into the canonical in-memory type right away, so nothing
//! outside this module sees the string form. Empty collections sometimes arrive as `[]`
//! instead of `{}`.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{self, Deserializer, Error as _, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;

/// Raw integer flag as sent by the server, before any range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlagValue(pub u64);

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString {
    Int(u64),
    Str(String),
}

impl<'de> Deserialize<'de> for FlagValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match IntOrString::deserialize(deserializer)
            .map_err(|_| D::Error::custom("expected a non-negative integer or numeric string"))?
        {
            IntOrString::Int(value) => Ok(FlagValue(value)),
            IntOrString::Str(text) => text
                .trim()
                .parse::<u64>()
                .map(FlagValue)
                .map_err(|_| D::Error::custom(format!("invalid numeric string '{text}'"))),
        }
    }
}

pub(crate) fn integer<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    FlagValue::deserialize(deserializer).map(|flag| flag.0)
}

/// `0` or `1`, in either representation.
pub(crate) fn bool_flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match FlagValue::deserialize(deserializer)? {
        FlagValue(0) => Ok(false),
        FlagValue(1) => Ok(true),
        FlagValue(other) => Err(D::Error::custom(format!(
            "invalid boolean flag {other}, expected 0 or 1"
        ))),
    }
}

/// A JSON object keyed by id, or an empty array standing in for an empty object.
pub(crate) fn keyed_map<'de, D, V>(deserializer: D) -> Result<HashMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    deserializer.deserialize_any(KeyedMapVisitor(PhantomData))
}

struct KeyedMapVisitor<V>(PhantomData<V>);

impl<'de, V: Deserialize<'de>> Visitor<'de> for KeyedMapVisitor<V> {
    type Value = HashMap<String, V>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an object keyed by id or an empty array")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut map = HashMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry::<String, V>()? {
            map.insert(key, value);
        }
        Ok(map)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        if access.next_element::<de::IgnoredAny>()?.is_some() {
            return Err(de::Error::invalid_length(1, &"an empty array"));
        }
        Ok(HashMap::new())
    }
}
