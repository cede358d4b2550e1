//! Core vocabulary of the controller.
//!
//! - Identity-compared [`Input`] tokens
//! - The [`State`] protocol with its four lifecycle hooks
//! - The [`InputRegistry`] for process-wide named input constants
//!
//! Everything here is declarative; the sequencing lives in [`crate::driver`].

mod input;
mod registry;
mod state;

pub use input::Input;
pub use registry::{InputRegistry, RegistryError};
pub use state::{State, StateRef};
