//! The controlled-object capability.

use crate::core::Input;

use super::machine::StateMachine;

/// Capability surface of an entity whose behavior is governed by a
/// [`StateMachine`].
///
/// A controlled object reaches exactly one machine and forwards raw inputs
/// into it; it never interprets inputs itself. The core only consumes this
/// capability. Implement it on the composition root that owns the machine:
/// the machine in turn owns the domain data ([`Object`](Self::Object)) its
/// states read and mutate.
///
/// # Example
///
/// ```rust
/// use stagehand::{ControlledObject, Input, State, StateMachine, StateRef};
///
/// struct Brightness(u8);
///
/// struct Off;
/// struct On;
///
/// impl State<Brightness> for Off {
///     fn handle(&self, _input: &Input, _b: &mut Brightness) -> Option<StateRef<Brightness>> {
///         Some(On.into_ref())
///     }
/// }
///
/// impl State<Brightness> for On {
///     fn handle(&self, _input: &Input, _b: &mut Brightness) -> Option<StateRef<Brightness>> {
///         Some(Off.into_ref())
///     }
///
///     fn enter(&self, b: &mut Brightness) {
///         b.0 = 255;
///     }
///
///     fn exit(&self, b: &mut Brightness) {
///         b.0 = 0;
///     }
/// }
///
/// struct Lamp {
///     machine: StateMachine<Brightness>,
/// }
///
/// impl ControlledObject for Lamp {
///     type Object = Brightness;
///
///     fn state_machine(&mut self) -> &mut StateMachine<Brightness> {
///         &mut self.machine
///     }
/// }
///
/// let mut lamp = Lamp {
///     machine: StateMachine::new(Off, Some(Brightness(0))),
/// };
/// let toggle = Input::new("TOGGLE");
///
/// lamp.handle(&toggle);
/// assert!(lamp.machine.current_state().is::<On>());
/// assert_eq!(lamp.machine.object().unwrap().0, 255);
/// ```
pub trait ControlledObject {
    /// Domain data the machine's states read and mutate.
    type Object: 'static;

    /// The one state machine governing this object.
    fn state_machine(&mut self) -> &mut StateMachine<Self::Object>;

    /// Forward a raw input to the machine.
    fn handle(&mut self, input: &Input) {
        self.state_machine().handle(input);
    }
}
