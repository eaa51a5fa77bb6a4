use std::fmt;
use std::str::FromStr;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub u64);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// A single row of the form. An empty grade means "not set yet".
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    pub grade: String,
    pub credits: f64,
}

impl Course {
    pub fn empty(id: CourseId) -> Self {
        Course { id, name: String::new(), grade: String::new(), credits: 0.0 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CourseField {
    Name,
    Grade,
    Credits,
}

impl FromStr for CourseField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(CourseField::Name),
            "grade" => Ok(CourseField::Grade),
            "credits" => Ok(CourseField::Credits),
            other => Err(anyhow!("Unknown course field: {}", other)),
        }
    }
}

impl fmt::Display for CourseField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CourseField::Name => "name",
            CourseField::Grade => "grade",
            CourseField::Credits => "credits",
        };
        f.write_str(name)
    }
}

// Qualitative label derived from the current average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Standing {
    Excellent,
    #[serde(rename = "Very Good")]
    VeryGood,
    Good,
    Satisfactory,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
    Poor,
}

impl Standing {
    pub fn from_average(average: f64) -> Self {
        match average {
            a if a >= 3.7 => Standing::Excellent,
            a if a >= 3.3 => Standing::VeryGood,
            a if a >= 3.0 => Standing::Good,
            a if a >= 2.7 => Standing::Satisfactory,
            a if a >= 2.0 => Standing::NeedsImprovement,
            _ => Standing::Poor,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Standing::Excellent => "Excellent",
            Standing::VeryGood => "Very Good",
            Standing::Good => "Good",
            Standing::Satisfactory => "Satisfactory",
            Standing::NeedsImprovement => "Needs Improvement",
            Standing::Poor => "Poor",
        }
    }
}

impl fmt::Display for Standing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub eligible_count: usize,
    pub total_credits: f64,
    pub current_average: f64,
    pub standing: Standing,
}

impl Default for Summary {
    fn default() -> Self {
        Summary { eligible_count: 0, total_credits: 0.0, current_average: 0.0, standing: Standing::Poor }
    }
}

// Confirmation signal emitted when a row is actually added or removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Added(CourseId),
    Removed(CourseId),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Added(id) => write!(f, "Course {} added", id),
            Notice::Removed(id) => write!(f, "Course {} removed", id),
        }
    }
}

// What the presentation layer gets back from every ledger operation.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub changed: bool,
    pub notice: Option<Notice>,
    pub summary: Summary,
}

#[derive(Debug, Serialize, Clone)]
pub struct Snapshot<'a> {
    pub courses: &'a [Course],
    pub summary: Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standing_boundaries() {
        assert_eq!(Standing::from_average(4.0), Standing::Excellent);
        assert_eq!(Standing::from_average(3.7), Standing::Excellent);
        assert_eq!(Standing::from_average(3.69), Standing::VeryGood);
        assert_eq!(Standing::from_average(3.3), Standing::VeryGood);
        assert_eq!(Standing::from_average(3.29), Standing::Good);
        assert_eq!(Standing::from_average(3.0), Standing::Good);
        assert_eq!(Standing::from_average(2.99), Standing::Satisfactory);
        assert_eq!(Standing::from_average(2.7), Standing::Satisfactory);
        assert_eq!(Standing::from_average(2.69), Standing::NeedsImprovement);
        assert_eq!(Standing::from_average(2.0), Standing::NeedsImprovement);
        assert_eq!(Standing::from_average(1.99), Standing::Poor);
        assert_eq!(Standing::from_average(0.0), Standing::Poor);
    }

    #[test]
    fn test_standing_labels() {
        assert_eq!(Standing::VeryGood.to_string(), "Very Good");
        assert_eq!(Standing::NeedsImprovement.label(), "Needs Improvement");
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!("Credits".parse::<CourseField>().unwrap(), CourseField::Credits);
        assert_eq!("name".parse::<CourseField>().unwrap(), CourseField::Name);
        assert!("semester".parse::<CourseField>().is_err());
    }

    #[test]
    fn test_snapshot_serializes_plain_ids_and_labels() {
        let courses = vec![Course::empty(CourseId(7))];
        let snapshot = Snapshot { courses: &courses, summary: Summary::default() };
        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["courses"][0]["id"], 7);
        assert_eq!(json["summary"]["standing"], "Poor");
        assert_eq!(json["summary"]["eligible_count"], 0);
    }
}
