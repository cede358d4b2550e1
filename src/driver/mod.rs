//! The imperative shell: the transition engine and the controlled-object
//! capability it consumes.

mod machine;
mod object;

pub use machine::StateMachine;
pub use object::ControlledObject;
