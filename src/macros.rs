//! Macros for declaring application input catalogs.

/// Declare a struct of named [`Input`](crate::Input) constants.
///
/// Each field is constructed exactly once per `new()`, which keeps identity
/// equality stable: build the set at startup, then share clones. Cloning the
/// set (or a field) preserves identity; calling `new()` twice mints a second,
/// unrelated set.
///
/// # Example
///
/// ```
/// use stagehand::input_set;
///
/// input_set! {
///     pub struct GamepadInputs {
///         pub jump => "JUMP",
///         pub dash => "DASH",
///     }
/// }
///
/// let inputs = GamepadInputs::new();
/// assert_ne!(inputs.jump, inputs.dash);
/// assert_eq!(inputs.clone().jump, inputs.jump);
/// assert_eq!(inputs.jump.label(), "JUMP");
/// ```
#[macro_export]
macro_rules! input_set {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident => $label:expr
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $crate::Input,
            )*
        }

        impl $name {
            /// Construct the set, minting each input exactly once.
            $vis fn new() -> Self {
                Self {
                    $($field: $crate::Input::new($label),)*
                }
            }
        }

        impl ::std::default::Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}
