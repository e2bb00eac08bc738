//! Newtype slugs for type-safe catalog references.
//!
//! Use the `define_slug!` macro to create string wrappers that prevent
//! accidentally mixing product ids with tag labels.

/// Errors that can occur when parsing a slug.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SlugError {
    /// The input is empty or only whitespace.
    #[error("{kind} cannot be empty")]
    Empty {
        /// Name of the slug type being parsed.
        kind: &'static str,
    },
}

/// Macro to define a type-safe string slug.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` as a plain string, rejecting empty input
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`
/// - `Display`, `FromStr`, and `AsRef<str>` implementations
///
/// Surrounding whitespace is trimmed before validation.
///
/// # Example
///
/// ```rust
/// # use sole_gifts_core::define_slug;
/// define_slug!(RibbonColor);
///
/// let ribbon = RibbonColor::new("cranberry").unwrap();
/// assert_eq!(ribbon.as_str(), "cranberry");
/// assert!(RibbonColor::new("  ").is_err());
/// ```
#[macro_export]
macro_rules! define_slug {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(pub(crate) String);

        impl $name {
            /// Create a new slug, trimming surrounding whitespace.
            ///
            /// # Errors
            ///
            /// Returns an error if the trimmed input is empty.
            pub fn new(value: impl AsRef<str>) -> ::core::result::Result<Self, $crate::SlugError> {
                let trimmed = value.as_ref().trim();
                if trimmed.is_empty() {
                    return Err($crate::SlugError::Empty {
                        kind: stringify!($name),
                    });
                }
                Ok(Self(trimmed.to_owned()))
            }

            /// Get the underlying string slice.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl ::core::str::FromStr for $name {
            type Err = $crate::SlugError;

            fn from_str(s: &str) -> ::core::result::Result<Self, Self::Err> {
                Self::new(s)
            }
        }

        impl TryFrom<String> for $name {
            type Error = $crate::SlugError;

            fn try_from(value: String) -> ::core::result::Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for String {
            fn from(slug: $name) -> Self {
                slug.0
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_slug!(ProductId);
define_slug!(Tag);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_whitespace() {
        let id = ProductId::new("  chocolate-delight-1 ").unwrap();
        assert_eq!(id.as_str(), "chocolate-delight-1");
    }

    #[test]
    fn test_new_rejects_empty() {
        assert_eq!(
            Tag::new("   "),
            Err(SlugError::Empty { kind: "Tag" })
        );
    }

    #[test]
    fn test_deserialize_rejects_empty() {
        let result: Result<ProductId, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let tag = Tag::new("Holiday").unwrap();
        assert_eq!(serde_json::to_string(&tag).unwrap(), "\"Holiday\"");
    }
}
