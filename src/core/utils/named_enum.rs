//=========================================================================
// Named Enums
//=========================================================================
//
// Declarative generator for closed, fieldless enums whose variants carry
// their own names.
//
// The member set is fixed at definition time. Every generated enum gets:
//   ALL / COUNT        → iteration over the members in declaration order
//   name() / index()   → stable string and position of a member
//   Display / FromStr  → round trip through the member name
//
//=========================================================================

//=== External Dependencies ===============================================

use thiserror::Error;

//=== UnknownVariant ======================================================

/// Returned when parsing a name that is not a member of a named enum.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{value}' is not a member of {enum_name}")]
pub struct UnknownVariant {
    /// Name of the enum that rejected the value.
    pub enum_name: &'static str,

    /// The rejected input.
    pub value: String,
}

//=== named_enum! =========================================================

/// Defines a closed enum with name and index lookups.
///
/// ```
/// stagehand::named_enum! {
///     /// Difficulty levels.
///     pub enum Difficulty {
///         Easy,
///         Hard,
///     }
/// }
///
/// assert_eq!(Difficulty::COUNT, 2);
/// assert_eq!(Difficulty::Hard.name(), "Hard");
/// assert_eq!("Easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
/// ```
#[macro_export]
macro_rules! named_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Every member, in declaration order.
            pub const ALL: &'static [$name] = &[$( $name::$variant ),+];

            /// Number of members.
            pub const COUNT: usize = Self::ALL.len();

            /// The member's name as written in its definition.
            pub const fn name(self) -> &'static str {
                match self {
                    $( $name::$variant => stringify!($variant) ),+
                }
            }

            /// Position of the member in declaration order.
            pub const fn index(self) -> usize {
                self as usize
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.name())
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::core::utils::UnknownVariant;

            fn from_str(value: &str) -> ::std::result::Result<Self, Self::Err> {
                $(
                    if value == stringify!($variant) {
                        return Ok($name::$variant);
                    }
                )+
                Err($crate::core::utils::UnknownVariant {
                    enum_name: stringify!($name),
                    value: value.to_string(),
                })
            }
        }
    };
}

//=========================================================================
// Unit Tests
//=========================================================================
