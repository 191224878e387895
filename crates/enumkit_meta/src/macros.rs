//! The `enum_type!` declaration macro.

/// Declare an enum type as a transparent newtype over an integer.
///
/// ```
/// enumkit_meta::enum_type! {
///     #[flags]
///     /// File permissions.
///     pub struct Perms: u8 {
///         #[description = "read access"]
///         const Read = 1;
///         const Write = 2;
///         const Exec = 4;
///     }
/// }
///
/// let rw = Perms::Read | Perms::Write;
/// assert_eq!(rw.to_string(), "Read, Write");
/// assert!(Perms::info().is_valid(rw));
/// ```
///
/// `#[flags]`, when present, must be the first attribute. Member
/// attributes are `#[description = "..."]` and doc comments; doc comments
/// are accepted and dropped.
///
/// The generated type derives `Copy`, `Clone`, `PartialEq`, `Eq` and
/// `Hash`, implements `Enum`, `BitOr` and `BitAnd`, and formats through its
/// cached metadata for `Debug` and `Display`.
#[macro_export]
macro_rules! enum_type {
    (
        #[flags]
        $(#[$outer:meta])*
        $vis:vis struct $name:ident : $repr:ty {
            $( $(#[$key:ident = $val:literal])* const $member:ident = $value:expr; )*
        }
    ) => {
        $crate::enum_type! {
            @emit true;
            $(#[$outer])*
            $vis struct $name : $repr {
                $( $(#[$key = $val])* const $member = $value; )*
            }
        }
    };

    (
        $(#[$outer:meta])*
        $vis:vis struct $name:ident : $repr:ty {
            $( $(#[$key:ident = $val:literal])* const $member:ident = $value:expr; )*
        }
    ) => {
        $crate::enum_type! {
            @emit false;
            $(#[$outer])*
            $vis struct $name : $repr {
                $( $(#[$key = $val])* const $member = $value; )*
            }
        }
    };

    (
        @emit $flags:literal;
        $(#[$outer:meta])*
        $vis:vis struct $name:ident : $repr:ty {
            $( $(#[$key:ident = $val:literal])* const $member:ident = $value:expr; )*
        }
    ) => {
        $(#[$outer])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash)]
        #[repr(transparent)]
        $vis struct $name(pub $repr);

        #[allow(non_upper_case_globals, reason = "member constants keep their declared names")]
        impl $name {
            $( pub const $member: Self = Self($value); )*

            /// The cached metadata handle for this type.
            #[allow(dead_code, reason = "not every declared type asks for its handle")]
            pub fn info() -> $crate::EnumInfo<Self> {
                $crate::EnumInfo::get()
            }
        }

        impl $crate::Enum for $name {
            type Underlying = $repr;

            fn to_underlying(self) -> $repr {
                self.0
            }

            fn from_underlying(value: $repr) -> Self {
                Self(value)
            }

            fn declare(
                decl: $crate::DeclarationBuilder<$repr>,
            ) -> $crate::DeclarationBuilder<$repr> {
                decl.named(::core::stringify!($name))
                    .flags($flags)
                    $(
                        .member_with(::core::stringify!($member), Self::$member.0, {
                            #[allow(unused_mut, reason = "members without attributes")]
                            let mut attributes = $crate::Attributes::new();
                            $( $crate::enum_type!(@attribute attributes, $key, $val); )*
                            attributes
                        })
                    )*
            }
        }

        impl ::core::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::write!(
                    f,
                    "{}({})",
                    ::core::stringify!($name),
                    $crate::EnumInfo::<Self>::get().as_string(*self)
                )
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&$crate::EnumInfo::<Self>::get().as_string(*self))
            }
        }

        impl ::core::ops::BitOr for $name {
            type Output = Self;

            fn bitor(self, rhs: Self) -> Self {
                Self(self.0 | rhs.0)
            }
        }

        impl ::core::ops::BitAnd for $name {
            type Output = Self;

            fn bitand(self, rhs: Self) -> Self {
                Self(self.0 & rhs.0)
            }
        }
    };

    (@attribute $attributes:ident, description, $val:literal) => {
        $attributes.push($crate::Description::new($val));
    };
    (@attribute $attributes:ident, doc, $val:literal) => {};
    (@attribute $attributes:ident, $key:ident, $val:literal) => {
        ::core::compile_error!(::core::concat!(
            "unsupported member attribute `",
            ::core::stringify!($key),
            "`, expected `description`"
        ));
    };
}
