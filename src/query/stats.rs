//! Roster statistics

use std::collections::HashSet;
use serde::{Deserialize, Serialize};
use crate::student::StudentRecord;

/// Aggregate figures for a roster snapshot.
///
/// Serialized with the field names the `/api/stats` endpoint has always
/// used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RosterStats {
    pub total: usize,
    #[serde(rename = "avg_marks")]
    pub average_marks: i64,
    pub top_marks: i64,
    #[serde(rename = "branches")]
    pub distinct_branches: usize,
}

impl std::fmt::Display for RosterStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Roster Statistics:")?;
        writeln!(f, "  Students: {}", self.total)?;
        writeln!(f, "  Average marks: {}%", self.average_marks)?;
        writeln!(f, "  Top marks: {}%", self.top_marks)?;
        writeln!(f, "  Branches: {}", self.distinct_branches)
    }
}

/// Compute count, rounded average, top marks and distinct branches
pub fn stats(students: &[StudentRecord]) -> RosterStats {
    let total = students.len();
    let distinct_branches = students
        .iter()
        .map(|s| s.branch.as_str())
        .collect::<HashSet<_>>()
        .len();

    if total == 0 {
        return RosterStats::default();
    }

    let marks: Vec<i64> = students.iter().map(|s| parse_marks(&s.marks)).collect();
    let sum: i64 = marks.iter().fold(0i64, |acc, m| acc.saturating_add(*m));
    let top_marks = marks.iter().copied().max().unwrap_or(0);

    RosterStats {
        total,
        average_marks: round_half_up(sum, total as i64),
        top_marks,
        distinct_branches,
    }
}

/// `sum / count` rounded to the nearest integer, halves rounding up
fn round_half_up(sum: i64, count: i64) -> i64 {
    (sum.saturating_mul(2).saturating_add(count)).div_euclid(count.saturating_mul(2))
}

/// Read marks the way the roster UI always has: leading whitespace is
/// skipped, then an optional sign and the leading run of digits. Anything
/// without digits counts as 0, so `"85.5"` is 85 and `"abc"` is 0.
pub fn parse_marks(text: &str) -> i64 {
    let trimmed = text.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let value = rest
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| acc.saturating_mul(10).saturating_add(i64::from(d - b'0')));

    if negative { -value } else { value }
}

/// Colour band the roster table uses for a student's marks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarksBand {
    /// 75 and above
    High,
    /// 50 to 74
    Medium,
    Low,
}

impl MarksBand {
    pub fn of(marks: &str) -> Self {
        match parse_marks(marks) {
            m if m >= 75 => MarksBand::High,
            m if m >= 50 => MarksBand::Medium,
            _ => MarksBand::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            MarksBand::High => "high",
            MarksBand::Medium => "medium",
            MarksBand::Low => "low",
        }
    }
}

impl std::fmt::Display for MarksBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn student(roll: &str, marks: &str, branch: &str) -> StudentRecord {
        StudentRecord::new(roll, roll, "20", branch, marks)
    }

    #[test]
    fn test_empty_roster() {
        assert_eq!(
            stats(&[]),
            RosterStats { total: 0, average_marks: 0, top_marks: 0, distinct_branches: 0 }
        );
    }

    #[test]
    fn test_two_students() {
        let roster = vec![student("A1", "80", "CS"), student("A2", "60", "EE")];
        assert_eq!(
            stats(&roster),
            RosterStats { total: 2, average_marks: 70, top_marks: 80, distinct_branches: 2 }
        );
    }

    #[test]
    fn test_average_rounds_half_up() {
        let roster = vec![student("A1", "70", "CS"), student("A2", "71", "CS")];
        let s = stats(&roster);
        assert_eq!(s.average_marks, 71);
        assert_eq!(s.distinct_branches, 1);

        let roster = vec![student("A1", "70", "CS"), student("A2", "70", "CS"), student("A3", "71", "CS")];
        assert_eq!(stats(&roster).average_marks, 70);
    }

    #[test]
    fn test_non_numeric_marks_count_as_zero() {
        let roster = vec![student("A1", "", "CS"), student("A2", "abc", "cs"), student("A3", "90", "CS")];
        let s = stats(&roster);
        assert_eq!(s.average_marks, 30);
        assert_eq!(s.top_marks, 90);
        // branch names are compared as stored
        assert_eq!(s.distinct_branches, 2);
    }

    #[test]
    fn test_parse_marks() {
        assert_eq!(parse_marks("85"), 85);
        assert_eq!(parse_marks("  42 "), 42);
        assert_eq!(parse_marks("85.5"), 85);
        assert_eq!(parse_marks("7abc"), 7);
        assert_eq!(parse_marks("-3"), -3);
        assert_eq!(parse_marks("abc"), 0);
        assert_eq!(parse_marks(""), 0);
        assert_eq!(parse_marks("-"), 0);
    }

    #[test]
    fn test_marks_band() {
        assert_eq!(MarksBand::of("75"), MarksBand::High);
        assert_eq!(MarksBand::of("74"), MarksBand::Medium);
        assert_eq!(MarksBand::of("50"), MarksBand::Medium);
        assert_eq!(MarksBand::of("49"), MarksBand::Low);
        assert_eq!(MarksBand::of("n/a"), MarksBand::Low);
    }

    #[test]
    fn test_wire_names() {
        let value = serde_json::to_value(RosterStats {
            total: 2,
            average_marks: 70,
            top_marks: 80,
            distinct_branches: 2,
        })
        .unwrap();
        assert_eq!(
            value,
            serde_json::json!({"total": 2, "avg_marks": 70, "top_marks": 80, "branches": 2})
        );
    }
}
