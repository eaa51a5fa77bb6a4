// Letter grade to grade points, in the order shown on the reference listing.
const GRADE_POINTS: [(&str, f64); 12] = [
    ("A+", 4.0),
    ("A", 4.0),
    ("A-", 3.7),
    ("B+", 3.3),
    ("B", 3.0),
    ("B-", 2.7),
    ("C+", 2.3),
    ("C", 2.0),
    ("C-", 1.7),
    ("D+", 1.3),
    ("D", 1.0),
    ("F", 0.0),
];

// Fixed grade scale shared by the whole process.
#[derive(Debug, Clone, Copy, Default)]
pub struct GradeTable;

impl GradeTable {
    // Grade points for `grade`, or `None` when it is empty or not on the scale.
    pub fn lookup(grade: &str) -> Option<f64> {
        GRADE_POINTS.iter().find(|(key, _)| *key == grade).map(|(_, points)| *points)
    }

    // Whether `grade` is a key of the scale.
    pub fn contains(grade: &str) -> bool {
        Self::lookup(grade).is_some()
    }

    // All (grade, points) pairs in display order.
    pub fn entries() -> impl Iterator<Item = (&'static str, f64)> {
        GRADE_POINTS.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_grades() {
        assert_eq!(GradeTable::lookup("A+"), Some(4.0));
        assert_eq!(GradeTable::lookup("A-"), Some(3.7));
        assert_eq!(GradeTable::lookup("C"), Some(2.0));
        assert_eq!(GradeTable::lookup("F"), Some(0.0));
    }

    #[test]
    fn test_lookup_absent() {
        assert_eq!(GradeTable::lookup(""), None);
        assert_eq!(GradeTable::lookup("E"), None);
        assert_eq!(GradeTable::lookup("a"), None);
        assert_eq!(GradeTable::lookup("F-"), None);
    }

    #[test]
    fn test_entries_keep_order() {
        let grades: Vec<&str> = GradeTable::entries().map(|(g, _)| g).collect();
        assert_eq!(grades, vec!["A+", "A", "A-", "B+", "B", "B-", "C+", "C", "C-", "D+", "D", "F"]);
        assert!(GradeTable::entries().all(|(_, p)| (0.0..=4.0).contains(&p)));
    }
}
