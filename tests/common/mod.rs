//! A minimal host for records with computed attributes.

#![allow(dead_code)]

use std::sync::Arc;

use parking_lot::Mutex;
use recompute::Attributes;

/// Everything that was persisted, in order.
pub type Store = Arc<Mutex<Vec<Attributes<Value>>>>;

/// A dynamically typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Int(i64),
    Text(String),
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Text(value.into())
    }
}

/// A value of the wrong kind was passed to a compute function.
#[derive(Debug, thiserror::Error)]
#[error("expected {expected}, found {found:?}")]
pub struct Mismatch {
    expected: &'static str,
    found: Value,
}

impl TryFrom<Value> for i64 {
    type Error = Mismatch;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Int(v) => Ok(v),
            found => Err(Mismatch { expected: "an integer", found }),
        }
    }
}

impl TryFrom<Value> for String {
    type Error = Mismatch;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Text(v) => Ok(v),
            found => Err(Mismatch { expected: "a text", found }),
        }
    }
}

/// Define a record type with a fixed set of columns, backed by
/// `Attributes`, that persists into a shared `Store` after running its
/// pre-persist lifecycle.
macro_rules! model {
    ($name:ident [$($column:literal),* $(,)?]) => {
        #[derive(Debug, Clone)]
        pub struct $name {
            pub attributes: ::recompute::Attributes<$crate::common::Value>,
            pub store: $crate::common::Store,
        }

        impl $name {
            pub const COLUMNS: &'static [&'static str] = &[$($column),*];

            /// Simulate loading a record from storage.
            pub fn load<I, K, V>(fields: I) -> Self
            where
                I: IntoIterator<Item = (K, V)>,
                K: Into<String>,
                V: Into<$crate::common::Value>,
            {
                Self {
                    attributes: fields.into_iter().map(|(k, v)| (k, v.into())).collect(),
                    store: Default::default(),
                }
            }

            pub fn get(&self, field: &str) -> $crate::common::Value {
                self.attributes.get(field).cloned().unwrap_or($crate::common::Value::Null)
            }

            pub fn set(&mut self, field: &str, value: impl Into<$crate::common::Value>) {
                self.attributes.set(field, value.into());
            }

            pub fn lifecycle() -> &'static ::recompute::Lifecycle<Self> {
                static LIFECYCLE: ::std::sync::LazyLock<::recompute::Lifecycle<$name>> =
                    ::std::sync::LazyLock::new(::recompute::Lifecycle::recomputing);
                &LIFECYCLE
            }

            pub fn persisted(&self) -> Vec<::recompute::Attributes<$crate::common::Value>> {
                self.store.lock().clone()
            }
        }

        impl ::recompute::Record for $name {
            type Value = $crate::common::Value;

            fn is_dirty(&self, field: &str) -> bool {
                self.attributes.is_dirty(field)
            }

            fn get_field(&self, field: &str) -> Option<Self::Value> {
                Self::COLUMNS.contains(&field).then(|| self.get(field))
            }

            fn set_field(&mut self, field: &str, value: Self::Value) -> Result<(), ::recompute::Error> {
                if !Self::COLUMNS.contains(&field) {
                    return Err(::recompute::Error::unknown_field::<Self>(field));
                }
                self.attributes.set(field, value);
                Ok(())
            }
        }

        impl ::recompute::Recomputable for $name {
            fn save(&mut self) -> Result<(), ::recompute::Error> {
                Self::lifecycle().fire_saving(self)?;
                self.store.lock().push(self.attributes.clone());
                self.attributes.sync();
                Ok(())
            }
        }
    };
}
