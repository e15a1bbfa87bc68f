//! Registry of remotely callable targets.
//!
//! The registry is the allowlist: a descriptor whose target is not registered
//! is rejected with [`DispatchError::NotPermitted`] before any method lookup.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use super::capability::Target;
use super::descriptor::CallDescriptor;
use crate::error::{DispatchError, RegistrationError};

#[derive(Default)]
pub struct TargetRegistry {
    targets: DashMap<String, Arc<dyn Target>>,
}

impl TargetRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a target under its own name.
    pub fn register(&self, target: Arc<dyn Target>) -> Result<(), RegistrationError> {
        let name = target.name().to_string();
        match self.targets.entry(name) {
            Entry::Occupied(entry) => {
                Err(RegistrationError::DuplicateTarget(entry.key().clone()))
            }
            Entry::Vacant(entry) => {
                entry.insert(target);
                Ok(())
            }
        }
    }

    /// Names of all registered targets in sorted order.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.targets.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Target>> {
        self.targets.get(name).map(|e| Arc::clone(e.value()))
    }

    /// Returns the target a descriptor addresses, or `NotPermitted`.
    pub fn guard(&self, descriptor: &CallDescriptor) -> Result<Arc<dyn Target>, DispatchError> {
        self.get(&descriptor.target)
            .ok_or_else(|| DispatchError::NotPermitted(descriptor.target.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::capability::{BoundTarget, CapabilityTable};
    use crate::dispatch::descriptor::Arguments;

    struct Unit;

    fn target(name: &str) -> Arc<dyn Target> {
        let table = CapabilityTable::new()
            .register("ping", |_: &Unit, _| Ok("pong"))
            .unwrap();
        Arc::new(BoundTarget::new(name, Arc::new(Unit), table).unwrap())
    }

    fn call(target: &str) -> CallDescriptor {
        CallDescriptor {
            target: target.to_string(),
            method: "ping".to_string(),
            arguments: Arguments::None,
        }
    }

    #[test]
    fn guard_passes_registered_target() {
        let registry = TargetRegistry::new();
        registry.register(target("monitor")).unwrap();
        let found = registry.guard(&call("monitor")).unwrap();
        assert_eq!(found.name(), "monitor");
    }

    #[test]
    fn guard_rejects_everything_else() {
        let registry = TargetRegistry::new();
        registry.register(target("monitor")).unwrap();
        for name in ["azcam", "Monitor", "monitor ", "", "__builtins__"] {
            let err = match registry.guard(&call(name)) {
                Err(err) => err,
                Ok(_) => panic!("{name:?} should be rejected"),
            };
            assert!(matches!(err, DispatchError::NotPermitted(t) if t == name));
        }
    }

    #[test]
    fn duplicate_target_rejected() {
        let registry = TargetRegistry::new();
        registry.register(target("monitor")).unwrap();
        let err = registry.register(target("monitor")).unwrap_err();
        assert!(matches!(err, RegistrationError::DuplicateTarget(n) if n == "monitor"));
        assert_eq!(registry.names(), vec!["monitor".to_string()]);
    }
}
