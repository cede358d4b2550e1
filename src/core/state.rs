//! The state protocol: lifecycle hooks and variant identity.
//!
//! A state is a unit of behavior, not a value. Concrete states are usually
//! stateless unit structs shared behind a [`StateRef`], and equality between
//! states means "same concrete variant", never "same instance" and never
//! field contents.

use std::any::{Any, TypeId};
use std::sync::Arc;

use super::input::Input;

/// Shared handle to a state variant.
///
/// States carry no required data, so one instance of a variant can serve as
/// current, last, and first simultaneously.
pub type StateRef<O> = Arc<dyn State<O>>;

/// A named case of behavior for a controlled object of type `O`.
///
/// The driver invokes the four lifecycle hooks in a fixed order; an
/// implementation must never call `enter`/`render`/`exit` itself. `handle` is
/// the only decision point: returning `None` means "stay here" (no lifecycle
/// calls fire), returning `Some(next)` requests a transition, which the
/// driver performs as exit(old) -> assign -> enter(new) -> render(new).
///
/// Returning a fresh instance of the current variant is a deliberate idiom
/// (a self-transition): the full exit/enter/render cycle still runs.
///
/// # Example
///
/// ```rust
/// use stagehand::{Input, State, StateRef};
///
/// struct Player {
///     play: Input,
///     track: Option<String>,
/// }
///
/// struct Stopped;
/// struct Playing;
///
/// impl State<Player> for Stopped {
///     fn handle(&self, input: &Input, player: &mut Player) -> Option<StateRef<Player>> {
///         (*input == player.play).then(|| Playing.into_ref())
///     }
/// }
///
/// impl State<Player> for Playing {
///     fn handle(&self, _input: &Input, _player: &mut Player) -> Option<StateRef<Player>> {
///         None
///     }
///
///     fn enter(&self, player: &mut Player) {
///         player.track = Some("intro.ogg".to_owned());
///     }
/// }
///
/// let stopped = Stopped.into_ref();
/// let also_stopped = Stopped.into_ref();
/// assert!(stopped.same_variant(&*also_stopped));
/// assert!(stopped.is::<Stopped>());
/// assert!(!stopped.is::<Playing>());
/// ```
pub trait State<O: 'static>: Any {
    /// Decide what to do with `input`.
    ///
    /// May read and mutate the controlled object's domain data, but owns no
    /// lifecycle sequencing. `None` leaves the machine in this state.
    fn handle(&self, input: &Input, object: &mut O) -> Option<StateRef<O>>;

    /// Runs exactly once, immediately after this state becomes current and
    /// before any `render`. Side effects belong here.
    fn enter(&self, object: &mut O) {
        let _ = object;
    }

    /// Runs once after every input the machine handles while this state is
    /// current, after `enter` when a transition occurred this step.
    fn render(&self, object: &mut O) {
        let _ = object;
    }

    /// Runs exactly once, immediately before this state stops being current
    /// and before the new state's `enter`.
    fn exit(&self, object: &mut O) {
        let _ = object;
    }

    /// Name used in logs and `Debug` output. Defaults to the type name.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Discriminant identifying this state's concrete variant.
    fn variant_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// Box this state behind a shared [`StateRef`].
    fn into_ref(self) -> StateRef<O>
    where
        Self: Sized,
    {
        Arc::new(self)
    }
}

impl<O: 'static> dyn State<O> {
    /// Is this state the concrete variant `S`?
    pub fn is<S: State<O>>(&self) -> bool {
        self.variant_id() == TypeId::of::<S>()
    }

    /// Variant-identity comparison: true iff both states are the same
    /// concrete variant, regardless of how many instances exist.
    pub fn same_variant(&self, other: &dyn State<O>) -> bool {
        self.variant_id() == other.variant_id()
    }

    /// Typed access to the concrete state, for tests and diagnostics.
    pub fn downcast_ref<S: State<O>>(&self) -> Option<&S> {
        let any: &dyn Any = self;
        any.downcast_ref::<S>()
    }
}
