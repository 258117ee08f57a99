//! Text patterns locating the table declarations inside `dp.js`.
//!
//! The calculator source is never evaluated. Each [`Section`] is a regular
//! expression over the raw text and must match exactly once.

use std::fmt;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::error::{Result, TablesError};

/// A block of the calculator source the extractor depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    /// `pitable = new Array(N)`; holds PI and mold data back to back.
    PiArraySize,
    /// `emctable = new Array(N)`.
    EmcArraySize,
    /// Index expression of the `pi` function.
    PiRanges,
    /// Guard and index expression of the `mold` function.
    MoldRanges,
    /// Index expression of the `emc` function.
    EmcRanges,
    /// `pitable = [...]` literal.
    PiData,
    /// `emctable = [...]` literal.
    EmcData,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Section::PiArraySize,
        Section::EmcArraySize,
        Section::PiRanges,
        Section::MoldRanges,
        Section::EmcRanges,
        Section::PiData,
        Section::EmcData,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::PiArraySize => "pi_array_size",
            Section::EmcArraySize => "emc_array_size",
            Section::PiRanges => "pi_ranges",
            Section::MoldRanges => "mold_ranges",
            Section::EmcRanges => "emc_ranges",
            Section::PiData => "pi_data",
            Section::EmcData => "emc_data",
        }
    }

    pub fn regex(&self) -> &'static Regex {
        match self {
            Section::PiArraySize => &PI_ARRAY_SIZE,
            Section::EmcArraySize => &EMC_ARRAY_SIZE,
            Section::PiRanges => &PI_RANGES,
            Section::MoldRanges => &MOLD_RANGES,
            Section::EmcRanges => &EMC_RANGES,
            Section::PiData => &PI_DATA,
            Section::EmcData => &EMC_DATA,
        }
    }

    /// The single match of this section in `source`.
    pub fn find_unique<'s>(&self, source: &'s str) -> Result<Captures<'s>> {
        let mut matches = self.regex().captures_iter(source);
        let Some(first) = matches.next() else {
            return Err(TablesError::MissingSection { section: *self });
        };
        let extra = matches.count();
        if extra > 0 {
            return Err(TablesError::AmbiguousSection {
                section: *self,
                count: extra + 1,
            });
        }
        Ok(first)
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

static PI_ARRAY_SIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bpitable\s*=\s*new\s+Array\s*\(\s*(?P<size>\d+)\s*\)")
        .expect("valid pi array size regex")
});

static EMC_ARRAY_SIZE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bemctable\s*=\s*new\s+Array\s*\(\s*(?P<size>\d+)\s*\)")
        .expect("valid emc array size regex")
});

static PI_RANGES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        var\s+pi\s*=\s*function\s*\(\s*t\s*,\s*rh\s*\)\s*\{
        \s*return\s+pitable\s*\[\s*
            \(\s*\(\s*
                t\s*<\s*(?P<temp_min>-\s*\d+)\s*\?\s*-\s*\d+\s*:\s*
                t\s*>\s*(?P<temp_max>\d+)\s*\?\s*\d+\s*:\s*
                Math\.round\s*\(\s*t\s*\)\s*
            \)\s*\+\s*(?P<temp_offset>\d+)\s*
            \)\s*\*\s*(?P<rh_size>\d+)\s*\+\s*
            \(\s*
                rh\s*<\s*(?P<rh_min>\d+)\s*\?\s*\d+\s*:\s*
                rh\s*>\s*(?P<rh_max>\d+)\s*\?\s*\d+\s*:\s*
                Math\.round\s*\(\s*rh\s*\)\s*
            \)\s*(?P<rh_offset>-\s*\d+)\s*
        \]",
    )
    .expect("valid pi ranges regex")
});

static MOLD_RANGES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        if\s*\(\s*
            t\s*>\s*(?P<temp_max>\d+)\s*\|\|\s*
            t\s*<\s*(?P<temp_min>\d+)\s*\|\|\s*
            rh\s*<\s*(?P<rh_min>\d+)
        \s*\)\s*return\s+0\s*;
        \s*return\s+pitable\s*\[\s*
            (?P<array_offset>\d+)\s*\+\s*
            \(\s*Math\.round\s*\(\s*t\s*\)\s*(?P<temp_offset>-\s*\d+)\s*\)\s*\*\s*
            (?P<rh_size>\d+)\s*\+\s*
            Math\.round\s*\(\s*rh\s*\)\s*
            (?P<rh_offset>-\s*\d+)
        \s*\]",
    )
    .expect("valid mold ranges regex")
});

static EMC_RANGES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        return\s+emctable\s*\[\s*
            \(\s*
                Math\.max\s*\(\s*(?P<temp_min>-\s*\d+)\s*,\s*
                    Math\.min\s*\(\s*(?P<temp_max>\d+)\s*,\s*
                        Math\.round\s*\(\s*t\s*\)\s*
                    \)\s*
                \)\s*\+\s*(?P<temp_offset>\d+)\s*
            \)\s*\*\s*(?P<rh_size>\d+)\s*\+\s*
            Math\.round\s*\(\s*rh\s*\)\s*
        \]",
    )
    .expect("valid emc ranges regex")
});

// Payloads capture everything between the brackets; element syntax is
// checked while parsing so a bad token is reported as malformed, not missing.
static PI_DATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bpitable\s*=\s*\[(?P<values>[^\]]*)\]").expect("valid pi data regex")
});

static EMC_DATA: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\bemctable\s*=\s*\[(?P<values>[^\]]*)\]").expect("valid emc data regex")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_patterns_compile() {
        for section in Section::ALL {
            let _ = section.regex();
        }
    }

    #[test]
    fn pi_ranges_capture_signed_offsets() {
        let js = "var pi = function(t,rh) { return pitable[((t<-23 ? -23 : t>65 ? 65 : \
                  Math.round(t))+23) * 90 + (rh<6 ? 6 : rh>95 ? 95 : Math.round(rh)) - 6]; };";
        let caps = Section::PiRanges.find_unique(js).unwrap();
        assert_eq!(&caps["temp_min"], "-23");
        assert_eq!(&caps["temp_max"], "65");
        assert_eq!(&caps["temp_offset"], "23");
        assert_eq!(&caps["rh_size"], "90");
        assert_eq!(&caps["rh_offset"], "- 6");
    }

    #[test]
    fn mold_ranges_tolerate_whitespace() {
        let js = "if (t>45||t<2||rh<65) return 0;\n  return pitable[ 8010+(Math.round( t )-2)*36+Math.round(rh)-65 ];";
        let caps = Section::MoldRanges.find_unique(js).unwrap();
        assert_eq!(&caps["array_offset"], "8010");
        assert_eq!(&caps["temp_offset"], "-2");
        assert_eq!(&caps["rh_offset"], "-65");
    }

    #[test]
    fn find_unique_counts_matches() {
        let js = "pitable = new Array(10); pitable = new Array(12);";
        let err = Section::PiArraySize.find_unique(js).unwrap_err();
        assert!(matches!(
            err,
            TablesError::AmbiguousSection {
                section: Section::PiArraySize,
                count: 2
            }
        ));

        let err = Section::EmcArraySize.find_unique(js).unwrap_err();
        assert!(matches!(err, TablesError::MissingSection { .. }));
    }

    #[test]
    fn data_pattern_ignores_index_expressions() {
        let js = "x = pitable[8010 + 3]; pitable = [1, 2, 3];";
        let caps = Section::PiData.find_unique(js).unwrap();
        assert_eq!(&caps["values"], "1, 2, 3");
    }
}
