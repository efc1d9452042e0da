//! Macro for label-backed domain enums
//!
//! Status, priority and the table's sort controls all travel as lowercase
//! labels (JSON, query strings, rendered badges). The macro generates the
//! label accessor plus `Display` and case-insensitive `FromStr`.
//!
//! # Example
//!
//! ```rust
//! use duedash_domain::impl_domain_label_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Urgency {
//!     Now,
//!     Later,
//! }
//!
//! impl_domain_label_conversions!(Urgency {
//!     Now => "now",
//!     Later => "later",
//! });
//!
//! assert_eq!(Urgency::Now.as_str(), "now");
//! assert_eq!("LATER".parse::<Urgency>(), Ok(Urgency::Later));
//! ```

/// Implements `as_str`, `Display` and `FromStr` for label-backed enums.
///
/// Parsing is case-insensitive; output is always the declared label.
#[macro_export]
macro_rules! impl_domain_label_conversions {
    ($enum_name:ident { $($variant:ident => $str:expr),+ $(,)? }) => {
        impl $enum_name {
            /// Stable lowercase label.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                match s.to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
