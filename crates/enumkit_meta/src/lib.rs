//! Enum metadata: introspection, validation, parsing and formatting for
//! integer-backed enum types, without boxing values or per-call reflection.
//!
//! # Architecture
//!
//! - [`Declaration`]: the members, flags marker and kind of one type, from
//!   an [`Enum`] impl (usually generated by [`enum_type!`])
//! - `MemberTable`: members sorted by value with exact and case-folded name
//!   indices, contiguity and the OR of all values
//! - [`EnumMetadata`]: the per-type facade over the table and the kind's
//!   [`OperatorSet`](enumkit_ops::OperatorSet)
//! - a process-wide cache keyed by type, built once per type and never
//!   mutated
//! - [`EnumInfo`]: a `Copy` typed handle; [`unchecked::info`] gets one for
//!   types that cannot be bound by `Enum`
//!
//! # Example
//!
//! ```
//! use enumkit_meta::{enum_type, ParseOptions};
//!
//! enum_type! {
//!     pub struct Color: i16 {
//!         const Red = 1;
//!         const Green = 2;
//!         const Blue = 3;
//!     }
//! }
//!
//! let info = Color::info();
//! assert!(info.is_contiguous());
//! assert_eq!(info.parse("green", &ParseOptions::with_ignore_case(true)), Ok(Color::Green));
//! assert_eq!(info.format(Color::Blue, "X").as_deref(), Ok("0003"));
//! ```

mod attribute;
mod cache;
mod declaration;
mod error;
mod format;
mod info;
mod macros;
mod metadata;
mod parse;
mod table;

pub use attribute::{Attributes, Description};
pub use declaration::{AttributeProvider, Declaration, DeclarationBuilder, Enum};
pub use error::{EnumError, EnumResult};
pub use format::{EnumFormat, FormatSpec, FLAGS_SEPARATOR};
pub use info::{register, unchecked, EnumInfo, EnumMember};
pub use metadata::{EnumMetadata, Members, RawInput};
pub use parse::{ParseOptions, SEGMENT_SEPARATOR};
pub use table::{Member, UniqueMembers};

pub use enumkit_ops::{Integral, IntegralKind, NativeInt, RawValue};

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times; only the first call does anything, and only
/// when `RUST_LOG` is set (for example `RUST_LOG=enumkit_meta=debug`).
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let installed = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
            if let Err(err) = installed {
                tracing::debug!(%err, "a global subscriber is already installed");
            }
        }
    });
}
