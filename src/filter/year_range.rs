//! Inclusive calendar-year ranges

use std::fmt;

/// An inclusive range of calendar years
///
/// A range whose start lies after its end is empty: it contains no year and
/// filtering by it yields nothing. Ranges coming from user controls are never
/// rejected, they are clamped to the data instead (see [`YearRange::clamp_to`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    start: i32,
    end: i32,
}

impl YearRange {
    /// Create a range from `start` to `end`, both inclusive
    #[must_use]
    pub const fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// A range containing no year
    #[must_use]
    pub const fn empty() -> Self {
        Self { start: 1, end: 0 }
    }

    /// Smallest range covering every year yielded by `years`
    #[must_use]
    pub fn span_of<I>(years: I) -> Self
    where
        I: IntoIterator<Item = i32>,
    {
        years.into_iter().fold(Self::empty(), |span, year| {
            if span.is_empty() {
                Self::new(year, year)
            } else {
                Self::new(span.start.min(year), span.end.max(year))
            }
        })
    }

    /// First year of the range
    #[must_use]
    pub const fn start(&self) -> i32 {
        self.start
    }

    /// Last year of the range
    #[must_use]
    pub const fn end(&self) -> i32 {
        self.end
    }

    /// Whether the range contains no year
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Whether `year` lies within the range
    #[must_use]
    pub const fn contains(&self, year: i32) -> bool {
        self.start <= year && year <= self.end
    }

    /// Number of years covered
    #[must_use]
    pub fn len(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            usize::try_from(i64::from(self.end) - i64::from(self.start) + 1).unwrap_or(usize::MAX)
        }
    }

    /// Intersection with `bounds`; empty when either side is empty or they do not overlap
    #[must_use]
    pub fn clamp_to(self, bounds: Self) -> Self {
        if self.is_empty() || bounds.is_empty() {
            return Self::empty();
        }

        let clamped = Self::new(self.start.max(bounds.start), self.end.min(bounds.end));
        if clamped.is_empty() {
            Self::empty()
        } else {
            clamped
        }
    }
}

impl fmt::Display for YearRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "empty range")
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}
