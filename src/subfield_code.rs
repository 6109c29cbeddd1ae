//! The 853/863 subfield code alphabet.
//!
//! Captions and holdings share one alphabet of meaningful subfield codes:
//! - **Enumeration** `a`–`f`: volume, issue, part and similar numbering levels
//! - **Chronology** `i`–`l`: year, month, day, season or free date text
//!
//! Every other code (notably `8`, the crosswalk key) is ignored by the
//! renderer. [`CaptionSet`] and [`HoldingsValueSet`] store the labels and
//! values for one field keyed by these codes.

/// Enumeration (numbering) subfield codes, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EnumerationCode {
    /// a - First level of enumeration
    A,
    /// b - Second level of enumeration
    B,
    /// c - Third level of enumeration
    C,
    /// d - Fourth level of enumeration
    D,
    /// e - Fifth level of enumeration
    E,
    /// f - Sixth level of enumeration
    F,
}

impl EnumerationCode {
    /// All enumeration codes in the order they are rendered.
    pub const ALL: [EnumerationCode; 6] = [
        EnumerationCode::A,
        EnumerationCode::B,
        EnumerationCode::C,
        EnumerationCode::D,
        EnumerationCode::E,
        EnumerationCode::F,
    ];

    /// The subfield code character.
    #[must_use]
    pub fn code(self) -> char {
        match self {
            EnumerationCode::A => 'a',
            EnumerationCode::B => 'b',
            EnumerationCode::C => 'c',
            EnumerationCode::D => 'd',
            EnumerationCode::E => 'e',
            EnumerationCode::F => 'f',
        }
    }

    /// Position within [`EnumerationCode::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Chronology (date) subfield codes, in rendering order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChronologyCode {
    /// i - First level of chronology
    I,
    /// j - Second level of chronology
    J,
    /// k - Third level of chronology
    K,
    /// l - Fourth level of chronology
    L,
}

impl ChronologyCode {
    /// All chronology codes in the order they are rendered.
    pub const ALL: [ChronologyCode; 4] = [
        ChronologyCode::I,
        ChronologyCode::J,
        ChronologyCode::K,
        ChronologyCode::L,
    ];

    /// The subfield code character.
    #[must_use]
    pub fn code(self) -> char {
        match self {
            ChronologyCode::I => 'i',
            ChronologyCode::J => 'j',
            ChronologyCode::K => 'k',
            ChronologyCode::L => 'l',
        }
    }

    /// Position within [`ChronologyCode::ALL`].
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A meaningful 853/863 subfield code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SubfieldCode {
    /// Numbering component
    Enumeration(EnumerationCode),
    /// Date component
    Chronology(ChronologyCode),
}

impl SubfieldCode {
    /// Classify a subfield code character, or `None` for codes the renderer ignores.
    #[must_use]
    pub fn from_char(code: char) -> Option<Self> {
        let code = match code {
            'a' => SubfieldCode::Enumeration(EnumerationCode::A),
            'b' => SubfieldCode::Enumeration(EnumerationCode::B),
            'c' => SubfieldCode::Enumeration(EnumerationCode::C),
            'd' => SubfieldCode::Enumeration(EnumerationCode::D),
            'e' => SubfieldCode::Enumeration(EnumerationCode::E),
            'f' => SubfieldCode::Enumeration(EnumerationCode::F),
            'i' => SubfieldCode::Chronology(ChronologyCode::I),
            'j' => SubfieldCode::Chronology(ChronologyCode::J),
            'k' => SubfieldCode::Chronology(ChronologyCode::K),
            'l' => SubfieldCode::Chronology(ChronologyCode::L),
            _ => return None,
        };
        Some(code)
    }
}

crate::define_subfield_set! {
    /// Caption labels from one 853 field, e.g. `a => "v."`, `i => "(year)"`.
    CaptionSet
}

crate::define_subfield_set! {
    /// Raw values from one 863 field, e.g. `a => "12"`, `i => "1999-2000"`.
    HoldingsValueSet
}

impl CaptionSet {
    /// Caption set used when a record carries holdings but no 853 definition.
    ///
    /// Enumeration levels get empty labels (rendered in compact `12:3` form)
    /// and the first three chronology levels are year, month and day.
    #[must_use]
    pub fn institution_default() -> Self {
        let mut captions: CaptionSet = EnumerationCode::ALL
            .iter()
            .map(|code| (code.code(), ""))
            .collect();
        captions.insert('i', "year");
        captions.insert('j', "month");
        captions.insert('k', "day");
        captions
    }
}
