//! Field range grammar
//!
//! A field list is a comma-separated sequence of range tokens:
//!
//! - `3`   selects field 3
//! - `-3`  selects fields 1 through 3
//! - `3-`  selects field 3 through the last field
//! - `2-4` selects fields 2 through 4
//!
//! Fields are numbered from 1 and every range is inclusive.

use crate::error::{InvalidRange, RangeIssue};
use std::fmt;
use std::str::FromStr;

/// Upper end of a field range
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Up to and including this field
    At(usize),
    /// Through the last field of the record
    End,
}

/// An inclusive, 1-based interval of field positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    lower: usize,
    upper: Bound,
}

impl Range {
    /// Build a validated range. `token` is only used for error reporting.
    fn checked(token: &str, lower: usize, upper: Bound) -> Result<Self, InvalidRange> {
        if let Bound::At(upper) = upper {
            if lower > upper {
                return Err(InvalidRange::new(token, RangeIssue::Reversed));
            }
        }
        if lower < 1 {
            return Err(InvalidRange::new(token, RangeIssue::Zero));
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> usize {
        self.lower
    }

    pub fn upper(&self) -> Bound {
        self.upper
    }

    /// 0-based slice bounds of this range within a record of `len` fields.
    /// Empty when the range starts past the end.
    #[inline]
    pub fn span(&self, len: usize) -> std::ops::Range<usize> {
        let start = (self.lower - 1).min(len);
        let end = match self.upper {
            Bound::At(upper) => upper.min(len),
            Bound::End => len,
        };
        start..end.max(start)
    }
}

impl FromStr for Range {
    type Err = InvalidRange;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        let number = |piece: &&str| -> Result<usize, InvalidRange> {
            piece
                .parse::<usize>()
                .map_err(|_| InvalidRange::new(token, RangeIssue::NotANumber))
        };

        let parts: Vec<&str> = token.split('-').map(str::trim).collect();

        let (lower, upper) = match parts.as_slice() {
            [single] => {
                let n = number(single)?;
                (n, Bound::At(n))
            }
            ["", right] => (1, Bound::At(number(right)?)),
            [left, ""] => (number(left)?, Bound::End),
            [left, right] => (number(left)?, Bound::At(number(right)?)),
            _ => return Err(InvalidRange::new(token, RangeIssue::NotANumber)),
        };

        Range::checked(token, lower, upper)
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.upper {
            Bound::At(upper) if upper == self.lower => write!(f, "{}", self.lower),
            Bound::At(upper) => write!(f, "{}-{}", self.lower, upper),
            Bound::End => write!(f, "{}-", self.lower),
        }
    }
}

/// Ordered list of ranges from `--fields`
///
/// Order is kept as given, so overlapping ranges repeat fields in the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldList {
    ranges: Vec<Range>,
}

impl FieldList {
    pub fn ranges(&self) -> &[Range] {
        &self.ranges
    }
}

impl FromStr for FieldList {
    type Err = InvalidRange;

    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let ranges = spec
            .split(',')
            .map(str::parse::<Range>)
            .collect::<Result<Vec<Range>, _>>()?;

        Ok(Self { ranges })
    }
}

impl fmt::Display for FieldList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, range) in self.ranges.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{}", range)?;
        }
        Ok(())
    }
}
