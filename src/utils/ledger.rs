use log::debug;
use crate::models::{Course, CourseField, CourseId, Notice, Outcome, Snapshot, Standing, Summary};
use crate::utils::grades::GradeTable;

// Ordered list of course rows. Every mutation recomputes the cached summary
// before returning, so `summary()` always matches `courses()`.
#[derive(Debug, Clone)]
pub struct CourseLedger {
    courses: Vec<Course>,
    next_id: u64,
    summary: Summary,
}

impl Default for CourseLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl CourseLedger {
    // Starts with a single empty row; the ledger is never empty.
    pub fn new() -> Self {
        let mut ledger = CourseLedger { courses: Vec::new(), next_id: 1, summary: Summary::default() };
        let id = ledger.fresh_id();
        ledger.courses.push(Course::empty(id));
        ledger.recompute();
        ledger
    }

    // Rows in insertion order, for display.
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    // Looks up a row by id.
    pub fn get(&self, id: CourseId) -> Option<&Course> {
        self.courses.iter().find(|c| c.id == id)
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }

    // Borrowed view of rows and summary, ready for serialization.
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot { courses: &self.courses, summary: self.summary }
    }

    // Appends an empty row with a fresh id.
    pub fn add(&mut self) -> Outcome {
        let id = self.fresh_id();
        self.courses.push(Course::empty(id));
        self.recompute();
        debug!("Added course {} ({} rows)", id, self.courses.len());
        self.outcome(true, Some(Notice::Added(id)))
    }

    // Removes a row unless it is the last one; unknown ids are ignored.
    pub fn remove(&mut self, id: CourseId) -> Outcome {
        if self.courses.len() <= 1 {
            debug!("Refusing to remove course {}: last remaining row", id);
            return self.outcome(false, None);
        }
        let Some(index) = self.courses.iter().position(|c| c.id == id) else {
            debug!("Remove ignored: no course {}", id);
            return self.outcome(false, None);
        };
        self.courses.remove(index);
        self.recompute();
        debug!("Removed course {} ({} rows)", id, self.courses.len());
        self.outcome(true, Some(Notice::Removed(id)))
    }

    // Replaces one field of a row in place; unknown ids are ignored.
    pub fn update(&mut self, id: CourseId, field: CourseField, value: &str) -> Outcome {
        let Some(course) = self.courses.iter_mut().find(|c| c.id == id) else {
            debug!("Update ignored: no course {}", id);
            return self.outcome(false, None);
        };
        let changed = match field {
            CourseField::Name => replace(&mut course.name, value.to_string()),
            CourseField::Grade => replace(&mut course.grade, value.to_string()),
            CourseField::Credits => {
                let credits = coerce_credits(value);
                let changed = course.credits != credits;
                course.credits = credits;
                changed
            }
        };
        self.recompute();
        debug!("Updated {} of course {}", field, id);
        self.outcome(changed, None)
    }

    fn fresh_id(&mut self) -> CourseId {
        let id = CourseId(self.next_id);
        self.next_id += 1;
        id
    }

    // Refreshes the cached summary from the current rows.
    fn recompute(&mut self) {
        let current_average = calculate(&self.courses);
        self.summary = Summary {
            eligible_count: self.courses.iter().filter(|c| is_eligible(c)).count(),
            total_credits: self.courses.iter().map(|c| c.credits).sum(),
            current_average,
            standing: Standing::from_average(current_average),
        };
    }

    fn outcome(&self, changed: bool, notice: Option<Notice>) -> Outcome {
        Outcome { changed, notice, summary: self.summary }
    }
}

fn replace(slot: &mut String, value: String) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

// Non-numeric, negative and non-finite input all become 0. No upper clamp.
pub fn coerce_credits(value: &str) -> f64 {
    match value.trim().parse::<f64>() {
        Ok(credits) if credits.is_finite() && credits > 0.0 => credits,
        _ => 0.0,
    }
}

// Graded with a known letter and carrying credits.
pub fn is_eligible(course: &Course) -> bool {
    !course.grade.is_empty() && GradeTable::contains(&course.grade) && course.credits > 0.0
}

// Credit-weighted average over eligible courses, 0 when none are eligible.
// Credits are scaled by the largest eligible value first so huge inputs cannot overflow.
pub fn calculate(courses: &[Course]) -> f64 {
    let eligible: Vec<(f64, f64)> = courses
        .iter()
        .filter(|c| c.credits > 0.0)
        .filter_map(|c| GradeTable::lookup(&c.grade).map(|points| (points, c.credits)))
        .collect();

    let scale = eligible.iter().map(|(_, credits)| *credits).fold(0.0, f64::max);
    if scale <= 0.0 {
        return 0.0;
    }

    let (weighted, total) = eligible.iter().fold((0.0, 0.0), |(w, t), (points, credits)| {
        let share = credits / scale;
        (w + points * share, t + share)
    });
    weighted / total
}
