//! Macros for code generation in holdings subfield types.
//!
//! Caption (853) and holdings (863) fields share the same subfield alphabet
//! but must never be confused with each other, so each gets its own type with
//! identical storage and accessors generated here.

/// Macro to generate a typed subfield set keyed by the enumeration (a–f) and
/// chronology (i–l) code alphabet.
///
/// The generated type stores at most one value per code and silently drops
/// codes outside the two ranges. It implements `FromIterator<(char, S)>` and
/// `From<[(char, S); N]>` so sets can be built from subfield pairs directly.
///
/// # Example
///
/// ```ignore
/// define_subfield_set! {
///     /// Labels from an 853 field.
///     CaptionSet
/// }
///
/// let captions = CaptionSet::from([('a', "v."), ('i', "(year)")]);
/// assert_eq!(captions.enumeration(EnumerationCode::A), Some("v."));
/// ```
#[macro_export]
macro_rules! define_subfield_set {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            enumeration: [Option<String>; 6],
            chronology: [Option<String>; 4],
        }

        impl $name {
            /// Create an empty set.
            #[must_use]
            pub fn new() -> Self {
                Self::default()
            }

            /// Store `value` under subfield `code`.
            ///
            /// Returns `false` without storing anything when `code` is outside
            /// the enumeration and chronology ranges.
            pub fn insert(&mut self, code: char, value: impl Into<String>) -> bool {
                match $crate::subfield_code::SubfieldCode::from_char(code) {
                    Some($crate::subfield_code::SubfieldCode::Enumeration(c)) => {
                        self.enumeration[c.index()] = Some(value.into());
                        true
                    }
                    Some($crate::subfield_code::SubfieldCode::Chronology(c)) => {
                        self.chronology[c.index()] = Some(value.into());
                        true
                    }
                    None => false,
                }
            }

            /// Value stored for an enumeration code.
            #[must_use]
            pub fn enumeration(&self, code: $crate::subfield_code::EnumerationCode) -> Option<&str> {
                self.enumeration[code.index()].as_deref()
            }

            /// Value stored for a chronology code.
            #[must_use]
            pub fn chronology(&self, code: $crate::subfield_code::ChronologyCode) -> Option<&str> {
                self.chronology[code.index()].as_deref()
            }

            /// True when no code carries a value.
            #[must_use]
            pub fn is_empty(&self) -> bool {
                self.enumeration.iter().chain(self.chronology.iter()).all(Option::is_none)
            }
        }

        impl<S: Into<String>> FromIterator<(char, S)> for $name {
            fn from_iter<I: IntoIterator<Item = (char, S)>>(iter: I) -> Self {
                let mut set = Self::new();
                for (code, value) in iter {
                    set.insert(code, value);
                }
                set
            }
        }

        impl<S: Into<String>, const N: usize> From<[(char, S); N]> for $name {
            fn from(pairs: [(char, S); N]) -> Self {
                pairs.into_iter().collect()
            }
        }
    };
}
