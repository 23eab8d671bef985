//! Serde utilities for wire-format quirks of the messaging server.

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};
use std::fmt;

/// Treats an empty string as an absent identifier.
///
/// The server sends `""` for "no parent" on root posts and for channels
/// that do not belong to a team.
pub mod empty_string_as_none {
    use super::{Deserializer, Serializer, Visitor, de, fmt};
    use std::marker::PhantomData;

    /// Serializes `None` as an empty string.
    ///
    /// # Errors
    ///
    /// Returns an error if the serializer fails.
    pub fn serialize<S, T>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: AsRef<str>,
    {
        match value {
            Some(v) => serializer.serialize_str(v.as_ref()),
            None => serializer.serialize_str(""),
        }
    }

    /// Deserializes an optional identifier, mapping `""` and `null` to `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is neither a string nor null.
    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        D: Deserializer<'de>,
        T: From<String>,
    {
        struct EmptyAsNoneVisitor<T>(PhantomData<T>);

        impl<'de, T: From<String>> Visitor<'de> for EmptyAsNoneVisitor<T> {
            type Value = Option<T>;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("an identifier string, possibly empty")
            }

            fn visit_none<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_unit<E>(self) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                Ok(None)
            }

            fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
            where
                D: Deserializer<'de>,
            {
                deserializer.deserialize_str(self)
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                if value.is_empty() {
                    Ok(None)
                } else {
                    Ok(Some(T::from(value.to_string())))
                }
            }
        }

        deserializer.deserialize_option(EmptyAsNoneVisitor(PhantomData))
    }
}
