//! Stagehand: a lifecycle-driven finite state machine controller.
//!
//! Given a pluggable set of states and a stream of identity-compared inputs,
//! a [`StateMachine`] drives an externally owned "controlled object" through
//! transitions with a fixed enter/handle/render/exit lifecycle contract.
//!
//! # Core Concepts
//!
//! - **Input**: an identity-distinguished token; two inputs are equal only
//!   when they are handles to the same constructed instance
//! - **State**: a named case of behavior with four lifecycle hooks, compared
//!   by variant identity rather than by instance or contents
//! - **StateMachine**: the driver owning the current/last/first registers and
//!   the only component that sequences lifecycle hooks
//!
//! # Example
//!
//! ```rust
//! use stagehand::{Input, State, StateMachine, StateRef};
//!
//! struct Turnstile {
//!     coin: Input,
//!     push: Input,
//!     entries: u32,
//! }
//!
//! struct Locked;
//! struct Unlocked;
//!
//! impl State<Turnstile> for Locked {
//!     fn handle(&self, input: &Input, t: &mut Turnstile) -> Option<StateRef<Turnstile>> {
//!         (*input == t.coin).then(|| Unlocked.into_ref())
//!     }
//! }
//!
//! impl State<Turnstile> for Unlocked {
//!     fn handle(&self, input: &Input, t: &mut Turnstile) -> Option<StateRef<Turnstile>> {
//!         (*input == t.push).then(|| Locked.into_ref())
//!     }
//!
//!     fn exit(&self, t: &mut Turnstile) {
//!         t.entries += 1;
//!     }
//! }
//!
//! let coin = Input::new("COIN");
//! let push = Input::new("PUSH");
//! let turnstile = Turnstile {
//!     coin: coin.clone(),
//!     push: push.clone(),
//!     entries: 0,
//! };
//!
//! let mut machine = StateMachine::new(Locked, Some(turnstile));
//!
//! machine.handle(&coin);
//! assert!(machine.current_state().is::<Unlocked>());
//!
//! machine.handle(&push);
//! assert!(machine.current_state().is::<Locked>());
//! assert!(machine.last_state().is::<Unlocked>());
//! assert_eq!(machine.object().unwrap().entries, 1);
//! ```

pub mod core;
pub mod driver;

mod macros;

pub use crate::core::{Input, InputRegistry, RegistryError, State, StateRef};
pub use crate::driver::{ControlledObject, StateMachine};
