//! The transition engine.
//!
//! [`StateMachine`] owns the current/last/first state registers and the
//! attachment slot for the controlled object, and is the only component that
//! sequences lifecycle hooks. States decide; the driver executes.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::core::{Input, State, StateRef};

/// Master controller for the flow of states and inputs through one
/// controlled object.
///
/// The machine tracks three state registers: `current` (always valid),
/// `last` (one slot of history, defaulting to the initial state), and
/// `first` (fixed at construction). The controlled object may be attached at
/// construction or later via [`attach`](StateMachine::attach); while no
/// object is attached every transition-triggering call is a silent no-op.
///
/// All operations are synchronous and run to completion. The machine has no
/// internal locking; confine an instance to one owning thread.
pub struct StateMachine<O: 'static> {
    current: StateRef<O>,
    last: StateRef<O>,
    first: StateRef<O>,
    object: Option<O>,
}

impl<O: 'static> StateMachine<O> {
    /// Create a machine starting in `initial`, optionally with its
    /// controlled object already attached.
    ///
    /// `current`, `last`, and `first` all begin as the initial state.
    pub fn new(initial: impl State<O>, object: Option<O>) -> Self {
        Self::from_ref(initial.into_ref(), object)
    }

    /// Like [`new`](StateMachine::new), for an already shared state handle.
    pub fn from_ref(initial: StateRef<O>, object: Option<O>) -> Self {
        StateMachine {
            current: Arc::clone(&initial),
            last: Arc::clone(&initial),
            first: initial,
            object,
        }
    }

    /// The state currently governing the controlled object.
    pub fn current_state(&self) -> &dyn State<O> {
        &*self.current
    }

    /// The state the machine was in before the current one.
    pub fn last_state(&self) -> &dyn State<O> {
        &*self.last
    }

    /// The state the machine was constructed with. Never changes.
    pub fn first_state(&self) -> &dyn State<O> {
        &*self.first
    }

    /// Whether a controlled object is currently attached.
    pub fn is_attached(&self) -> bool {
        self.object.is_some()
    }

    /// Read access to the attached controlled object.
    pub fn object(&self) -> Option<&O> {
        self.object.as_ref()
    }

    /// Mutable access to the attached controlled object.
    pub fn object_mut(&mut self) -> Option<&mut O> {
        self.object.as_mut()
    }

    /// Process one input.
    ///
    /// Asks the current state to handle it. If the state stays put, only its
    /// `render` hook runs. If it requests a transition, the driver performs
    /// exit(old) -> assign -> enter(new) -> render(new), in that order.
    ///
    /// Dropped silently when no controlled object is attached.
    pub fn handle(&mut self, input: &Input) {
        let Some(mut object) = self.object.take() else {
            trace!(input = %input, "no controlled object attached, input dropped");
            return;
        };
        match self.current.handle(input, &mut object) {
            Some(next) => {
                debug!(
                    input = %input,
                    from = self.current.name(),
                    to = next.name(),
                    "transition"
                );
                self.set_last_state(Arc::clone(&self.current), &*next);
                self.run_transition(next, &mut object);
            }
            None => {
                trace!(input = %input, state = self.current.name(), "handled in place");
                self.current.render(&mut object);
            }
        }
        self.object = Some(object);
    }

    /// Exit the current state and re-enter the machine's initial state,
    /// regardless of what the current state would decide.
    pub fn to_first_state(&mut self) {
        let Some(mut object) = self.object.take() else {
            trace!("no controlled object attached, to_first_state ignored");
            return;
        };
        let first = Arc::clone(&self.first);
        debug!(from = self.current.name(), to = first.name(), "forced to first state");
        self.set_last_state(Arc::clone(&self.current), &*first);
        self.run_transition(first, &mut object);
        self.object = Some(object);
    }

    /// Exit the current state and re-enter the previous one.
    ///
    /// Deliberately does not route through `set_last_state`: current and
    /// last swap, so repeated calls toggle between the two most recent
    /// states. Only one slot of history is kept.
    pub fn to_last_state(&mut self) {
        let Some(mut object) = self.object.take() else {
            trace!("no controlled object attached, to_last_state ignored");
            return;
        };
        debug!(from = self.current.name(), to = self.last.name(), "forced to last state");
        self.current.exit(&mut object);
        std::mem::swap(&mut self.current, &mut self.last);
        self.current.enter(&mut object);
        self.current.render(&mut object);
        self.object = Some(object);
    }

    /// Enter the given state regardless of the current one.
    ///
    /// Always runs the full exit/enter/render sequence, even when the target
    /// is the same variant as the current state.
    pub fn force(&mut self, state: impl State<O>) {
        self.force_ref(state.into_ref());
    }

    /// [`force`](StateMachine::force), for an already shared state handle.
    pub fn force_ref(&mut self, state: StateRef<O>) {
        let Some(mut object) = self.object.take() else {
            trace!(to = state.name(), "no controlled object attached, force ignored");
            return;
        };
        debug!(from = self.current.name(), to = state.name(), "forced transition");
        self.set_last_state(Arc::clone(&self.current), &*state);
        self.run_transition(state, &mut object);
        self.object = Some(object);
    }

    /// Attach (or replace) the controlled object.
    ///
    /// Returns `true` on success. Given `None`, returns `false` and leaves
    /// any previously attached object in place.
    pub fn attach(&mut self, object: Option<O>) -> bool {
        match object {
            Some(object) => {
                self.object = Some(object);
                true
            }
            None => false,
        }
    }

    /// Release the controlled object, returning the machine to the silent
    /// no-op regime.
    pub fn detach(&mut self) -> Option<O> {
        self.object.take()
    }

    // Ordering is fixed: exit of the old state strictly precedes the
    // assignment, which strictly precedes enter of the new state, which
    // strictly precedes render.
    fn run_transition(&mut self, next: StateRef<O>, object: &mut O) {
        self.current.exit(object);
        self.current = next;
        self.current.enter(object);
        self.current.render(object);
    }

    // Sole choke point for `last` updates. The outgoing state is not
    // recorded when the incoming state is the same variant, so a
    // self-transition keeps the true prior state in the history slot.
    fn set_last_state(&mut self, outgoing: StateRef<O>, incoming: &dyn State<O>) {
        if !outgoing.same_variant(incoming) {
            self.last = outgoing;
        }
    }
}

impl<O: 'static> fmt::Debug for StateMachine<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("current", &self.current.name())
            .field("last", &self.last.name())
            .field("first", &self.first.name())
            .field("attached", &self.object.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct Rig {
        start: Input,
        stop: Input,
        retune: Input,
        trace: Vec<&'static str>,
    }

    impl Rig {
        fn new() -> Self {
            Rig {
                start: Input::new("START"),
                stop: Input::new("STOP"),
                retune: Input::new("RETUNE"),
                trace: Vec::new(),
            }
        }
    }

    struct Idle;
    struct Running;
    struct Paused;

    impl State<Rig> for Idle {
        fn handle(&self, input: &Input, rig: &mut Rig) -> Option<StateRef<Rig>> {
            (*input == rig.start).then(|| Running.into_ref())
        }

        fn enter(&self, rig: &mut Rig) {
            rig.trace.push("idle.enter");
        }

        fn render(&self, rig: &mut Rig) {
            rig.trace.push("idle.render");
        }

        fn exit(&self, rig: &mut Rig) {
            rig.trace.push("idle.exit");
        }

        fn name(&self) -> &str {
            "Idle"
        }
    }

    impl State<Rig> for Running {
        fn handle(&self, input: &Input, rig: &mut Rig) -> Option<StateRef<Rig>> {
            if *input == rig.stop {
                Some(Idle.into_ref())
            } else if *input == rig.retune {
                // Self-transition: re-run enter side effects on purpose.
                Some(Running.into_ref())
            } else {
                None
            }
        }

        fn enter(&self, rig: &mut Rig) {
            rig.trace.push("running.enter");
        }

        fn render(&self, rig: &mut Rig) {
            rig.trace.push("running.render");
        }

        fn exit(&self, rig: &mut Rig) {
            rig.trace.push("running.exit");
        }

        fn name(&self) -> &str {
            "Running"
        }
    }

    impl State<Rig> for Paused {
        fn handle(&self, _input: &Input, _rig: &mut Rig) -> Option<StateRef<Rig>> {
            None
        }

        fn enter(&self, rig: &mut Rig) {
            rig.trace.push("paused.enter");
        }

        fn render(&self, rig: &mut Rig) {
            rig.trace.push("paused.render");
        }

        fn exit(&self, rig: &mut Rig) {
            rig.trace.push("paused.exit");
        }

        fn name(&self) -> &str {
            "Paused"
        }
    }

    fn machine() -> StateMachine<Rig> {
        StateMachine::new(Idle, Some(Rig::new()))
    }

    fn trace(machine: &StateMachine<Rig>) -> Vec<&'static str> {
        machine.object().unwrap().trace.clone()
    }

    fn clear_trace(machine: &mut StateMachine<Rig>) {
        machine.object_mut().unwrap().trace.clear();
    }

    #[test]
    fn staying_put_renders_exactly_once() {
        let mut machine = machine();
        let stop = machine.object().unwrap().stop.clone();

        machine.handle(&stop);

        assert_eq!(trace(&machine), vec!["idle.render"]);
        assert!(machine.current_state().is::<Idle>());
        assert!(machine.last_state().is::<Idle>());
        assert!(machine.first_state().is::<Idle>());
    }

    #[test]
    fn transition_runs_exit_enter_render_in_order() {
        let mut machine = machine();
        let start = machine.object().unwrap().start.clone();

        machine.handle(&start);

        assert_eq!(
            trace(&machine),
            vec!["idle.exit", "running.enter", "running.render"]
        );
        assert!(machine.current_state().is::<Running>());
        assert!(machine.last_state().is::<Idle>());
    }

    #[test]
    fn end_to_end_start_then_stop() {
        let mut machine = machine();
        let start = machine.object().unwrap().start.clone();
        let stop = machine.object().unwrap().stop.clone();

        machine.handle(&start);
        assert!(machine.current_state().is::<Running>());
        assert!(machine.last_state().is::<Idle>());

        machine.handle(&stop);
        assert!(machine.current_state().is::<Idle>());
        assert!(machine.last_state().is::<Running>());

        assert_eq!(
            trace(&machine),
            vec![
                "idle.exit",
                "running.enter",
                "running.render",
                "running.exit",
                "idle.enter",
                "idle.render",
            ]
        );
    }

    #[test]
    fn self_transition_runs_the_full_cycle() {
        let mut machine = machine();
        let start = machine.object().unwrap().start.clone();
        let retune = machine.object().unwrap().retune.clone();

        machine.handle(&start);
        clear_trace(&mut machine);

        machine.handle(&retune);

        assert_eq!(
            trace(&machine),
            vec!["running.exit", "running.enter", "running.render"]
        );
        assert!(machine.current_state().is::<Running>());
        // The history slot still holds the true prior state.
        assert!(machine.last_state().is::<Idle>());
    }

    #[test]
    fn last_state_update_is_suppressed_for_variant_equal_targets() {
        let mut machine = machine();

        machine.force(Running);
        assert!(machine.current_state().is::<Running>());
        assert!(machine.last_state().is::<Idle>());

        // A distinct instance of the same variant.
        machine.force(Running);
        assert!(machine.current_state().is::<Running>());
        assert!(machine.last_state().is::<Idle>());
    }

    #[test]
    fn force_always_runs_the_lifecycle_even_for_same_variant() {
        let mut machine = machine();
        machine.force(Running);
        clear_trace(&mut machine);

        machine.force(Running);

        assert_eq!(
            trace(&machine),
            vec!["running.exit", "running.enter", "running.render"]
        );
    }

    #[test]
    fn to_last_state_toggles_between_the_two_most_recent_states() {
        let mut machine = machine();
        machine.force(Running);

        for _ in 0..3 {
            machine.to_last_state();
            assert!(machine.current_state().is::<Idle>());
            assert!(machine.last_state().is::<Running>());

            machine.to_last_state();
            assert!(machine.current_state().is::<Running>());
            assert!(machine.last_state().is::<Idle>());
        }
    }

    #[test]
    fn to_first_state_forces_the_initial_state() {
        let mut machine = machine();
        let start = machine.object().unwrap().start.clone();

        machine.handle(&start);
        machine.force(Paused);
        clear_trace(&mut machine);

        machine.to_first_state();

        assert_eq!(
            trace(&machine),
            vec!["paused.exit", "idle.enter", "idle.render"]
        );
        assert!(machine.current_state().is::<Idle>());
        assert!(machine.last_state().is::<Paused>());
    }

    #[test]
    fn first_state_is_fixed_at_construction() {
        let mut machine = machine();
        let start = machine.object().unwrap().start.clone();

        machine.handle(&start);
        machine.force(Paused);
        machine.to_last_state();
        machine.to_first_state();

        assert!(machine.first_state().is::<Idle>());
    }

    #[test]
    fn detached_machine_ignores_every_operation() {
        let mut machine: StateMachine<Rig> = StateMachine::new(Idle, None);
        let input = Input::new("START");

        machine.handle(&input);
        machine.to_first_state();
        machine.to_last_state();
        machine.force(Running);

        assert!(!machine.is_attached());
        assert!(machine.current_state().is::<Idle>());
        assert!(machine.last_state().is::<Idle>());
        assert!(machine.first_state().is::<Idle>());
    }

    #[test]
    fn attach_none_fails_and_keeps_the_existing_object() {
        let mut machine = machine();
        let start = machine.object().unwrap().start.clone();

        assert!(!machine.attach(None));
        assert!(machine.is_attached());

        machine.handle(&start);
        assert!(machine.current_state().is::<Running>());
    }

    #[test]
    fn attach_binds_a_controlled_object_after_construction() {
        let mut machine: StateMachine<Rig> = StateMachine::new(Idle, None);
        let rig = Rig::new();
        let start = rig.start.clone();

        assert!(machine.attach(Some(rig)));
        machine.handle(&start);

        assert!(machine.current_state().is::<Running>());
        assert_eq!(
            trace(&machine),
            vec!["idle.exit", "running.enter", "running.render"]
        );
    }

    #[test]
    fn attach_replaces_the_controlled_object() {
        let mut machine = machine();
        let replacement = Rig::new();
        let start = replacement.start.clone();

        assert!(machine.attach(Some(replacement)));
        machine.handle(&start);

        // The replacement rig received the lifecycle calls.
        assert_eq!(
            trace(&machine),
            vec!["idle.exit", "running.enter", "running.render"]
        );
    }

    #[test]
    fn detach_silences_the_machine() {
        let mut machine = machine();
        let rig = machine.detach().unwrap();

        machine.handle(&rig.start);
        machine.force(Running);

        assert!(!machine.is_attached());
        assert!(machine.current_state().is::<Idle>());
        assert!(machine.detach().is_none());
    }

    #[test]
    fn from_ref_shares_a_state_handle() {
        let idle = Idle.into_ref();
        let machine = StateMachine::from_ref(Arc::clone(&idle), Some(Rig::new()));

        assert!(machine.current_state().same_variant(&*idle));
        assert!(machine.first_state().same_variant(&*idle));
    }

    #[test]
    fn debug_shows_state_names_and_attachment() {
        let machine = machine();
        let rendered = format!("{machine:?}");

        assert!(rendered.contains("Idle"));
        assert!(rendered.contains("attached: true"));
    }
}
