//! Identity-compared input tokens.
//!
//! An [`Input`] is a request to change behavior, not a value: two inputs are
//! equal only when they are handles to the same constructed instance. The
//! label exists purely for diagnostics and never participates in equality.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

/// An identity-distinguished token representing a discrete request.
///
/// Inputs are cheap to clone; a clone is another handle to the same instance
/// and compares equal to it. Constructing a second input with an identical
/// label yields a *different* token.
///
/// Construct the inputs an application cares about once, at startup, and hand
/// out clones from there. Reconstructing a "constant" per use breaks identity
/// equality. The [`InputRegistry`](super::registry::InputRegistry) and the
/// [`input_set!`](crate::input_set) macro exist for exactly that pattern.
///
/// # Example
///
/// ```rust
/// use stagehand::Input;
///
/// let start = Input::new("START");
/// let imposter = Input::new("START");
///
/// // Same label, different instance: not equal.
/// assert_ne!(start, imposter);
///
/// // A clone is the same instance.
/// let handle = start.clone();
/// assert_eq!(start, handle);
/// ```
#[derive(Clone)]
pub struct Input {
    inner: Arc<InputInner>,
}

struct InputInner {
    label: String,
}

impl Input {
    /// Create a new input token. Construction always succeeds.
    ///
    /// The label is used only for logging and debug output.
    pub fn new(label: impl Into<String>) -> Self {
        Input {
            inner: Arc::new(InputInner {
                label: label.into(),
            }),
        }
    }

    /// The diagnostic label given at construction.
    pub fn label(&self) -> &str {
        &self.inner.label
    }
}

impl PartialEq for Input {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Input {}

impl Hash for Input {
    fn hash<H: Hasher>(&self, state: &mut H) {
        (Arc::as_ptr(&self.inner) as usize).hash(state);
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Input").field(&self.inner.label).finish()
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.inner.label)
    }
}
