//! Process-wide registry of named input constants.
//!
//! Identity equality only works if each named input is constructed exactly
//! once. The registry owns that single construction: build it at startup,
//! register every label the application uses, and hand out clones.

use std::collections::HashMap;

use thiserror::Error;

use super::input::Input;

/// Errors raised while populating an [`InputRegistry`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// A label was registered twice. Allowing this would mint a second,
    /// unequal instance behind the same name.
    #[error("input label `{0}` is already registered")]
    DuplicateLabel(String),
}

/// Registry mapping labels to stable [`Input`] instances.
///
/// # Example
///
/// ```rust
/// use stagehand::InputRegistry;
///
/// let mut registry = InputRegistry::new();
/// let start = registry.register("START").unwrap();
///
/// // Lookups return the one registered instance.
/// assert_eq!(registry.get("START"), Some(&start));
///
/// // Re-registering a label is rejected.
/// assert!(registry.register("START").is_err());
/// ```
#[derive(Debug, Default)]
pub struct InputRegistry {
    inputs: HashMap<String, Input>,
}

impl InputRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new label, returning a handle to the freshly minted input.
    ///
    /// Fails with [`RegistryError::DuplicateLabel`] if the label is already
    /// taken; the existing input is left untouched.
    pub fn register(&mut self, label: impl Into<String>) -> Result<Input, RegistryError> {
        let label = label.into();
        if self.inputs.contains_key(&label) {
            return Err(RegistryError::DuplicateLabel(label));
        }
        let input = Input::new(label.clone());
        self.inputs.insert(label, input.clone());
        Ok(input)
    }

    /// Look up the input registered under `label`.
    pub fn get(&self, label: &str) -> Option<&Input> {
        self.inputs.get(label)
    }

    /// Number of registered inputs.
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Iterate over the registered labels, in no particular order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.inputs.keys().map(String::as_str)
    }
}
