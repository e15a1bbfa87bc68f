//! Capability tables: the only methods a remote caller can reach.
//!
//! A target object never exposes itself by reflection. Its callable surface is
//! a [`CapabilityTable`] built once at startup, mapping method names to typed
//! handler functions. Names are checked when they are registered, so reserved
//! or non-identifier names can never become callable.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;

use super::descriptor::Arguments;
use super::shaper::to_payload;
use crate::error::{DispatchError, InvocationError, RegistrationError};

type Handler<T> = Box<dyn Fn(&T, &Arguments) -> Result<Value, DispatchError> + Send + Sync>;

/// Method-name to handler mapping for objects of type `T`.
pub struct CapabilityTable<T: ?Sized> {
    handlers: BTreeMap<String, Handler<T>>,
}

impl<T: ?Sized> Default for CapabilityTable<T> {
    fn default() -> Self {
        CapabilityTable {
            handlers: BTreeMap::new(),
        }
    }
}

impl<T: ?Sized + 'static> CapabilityTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `handler` under `name`.
    ///
    /// The handler's return value is converted to JSON after the call; a
    /// value that cannot be encoded fails the call with a serialization error.
    pub fn register<R, F>(mut self, name: &str, handler: F) -> Result<Self, RegistrationError>
    where
        R: Serialize,
        F: Fn(&T, &Arguments) -> Result<R, InvocationError> + Send + Sync + 'static,
    {
        if !is_valid_name(name) {
            return Err(RegistrationError::InvalidMethodName(name.to_string()));
        }
        if self.handlers.contains_key(name) {
            return Err(RegistrationError::DuplicateMethod(name.to_string()));
        }
        let boxed: Handler<T> = Box::new(move |object: &T, args: &Arguments| {
            let result = handler(object, args)?;
            to_payload(&result)
        });
        self.handlers.insert(name.to_string(), boxed);
        Ok(self)
    }

    /// Registered method names in sorted order.
    pub fn methods(&self) -> Vec<&str> {
        self.handlers.keys().map(String::as_str).collect()
    }

    /// Looks up `method` and calls it on `object`.
    pub fn invoke(
        &self,
        target: &str,
        object: &T,
        method: &str,
        args: &Arguments,
    ) -> Result<Value, DispatchError> {
        let handler = self
            .handlers
            .get(method)
            .ok_or_else(|| DispatchError::MethodNotFound {
                target: target.to_string(),
                method: method.to_string(),
            })?;
        handler(object, args)
    }
}

/// Lowercase ASCII identifier starting with a letter.
pub(crate) fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_lowercase() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
}

/// A named object reachable through the registry.
pub trait Target: Send + Sync {
    fn name(&self) -> &str;

    fn methods(&self) -> Vec<&str>;

    fn invoke(&self, method: &str, args: &Arguments) -> Result<Value, DispatchError>;
}

/// An object paired with its capability table.
pub struct BoundTarget<T: ?Sized> {
    name: String,
    object: Arc<T>,
    capabilities: CapabilityTable<T>,
}

impl<T> BoundTarget<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    pub fn new(
        name: &str,
        object: Arc<T>,
        capabilities: CapabilityTable<T>,
    ) -> Result<Self, RegistrationError> {
        if !is_valid_name(name) {
            return Err(RegistrationError::InvalidTargetName(name.to_string()));
        }
        Ok(BoundTarget {
            name: name.to_string(),
            object,
            capabilities,
        })
    }
}

impl<T> Target for BoundTarget<T>
where
    T: ?Sized + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn methods(&self) -> Vec<&str> {
        self.capabilities.methods()
    }

    fn invoke(&self, method: &str, args: &Arguments) -> Result<Value, DispatchError> {
        self.capabilities
            .invoke(&self.name, &self.object, method, args)
    }
}
