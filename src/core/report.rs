//! Read-only views over a timetable: the plan listing and the grade point average.

use crate::domain::model::{Course, Timetable};
use std::collections::BTreeMap;
use std::fmt;

/// Optional year/term restriction shared by both reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Scope {
    pub year: Option<u32>,
    pub term: Option<u32>,
}

impl Scope {
    pub fn new(year: Option<u32>, term: Option<u32>) -> Self {
        Self { year, term }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn matches(&self, course: &Course) -> bool {
        course.is_in(self.year, self.term)
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.year, self.term) {
            (None, None) => write!(f, "all years"),
            (Some(year), None) => write!(f, "Year {}", year),
            (Some(year), Some(term)) => write!(f, "Year {} Term {}", year, term),
            (None, Some(term)) => write!(f, "Term {}", term),
        }
    }
}

/// Courses grouped by year then term, each group in insertion order.
pub fn list_plan(timetable: &Timetable, scope: Scope) -> String {
    let mut groups: BTreeMap<(u32, u32), Vec<&Course>> = BTreeMap::new();
    for course in timetable.courses().filter(|course| scope.matches(course)) {
        groups.entry((course.year, course.term)).or_default().push(course);
    }

    if groups.is_empty() {
        return format!("No courses planned for {}", scope);
    }

    let mut lines = Vec::new();
    for ((year, term), courses) in groups {
        lines.push(format!("Year {} Term {}:", year, term));
        for course in courses {
            let grade = course.grade.map(|g| g.to_string()).unwrap_or_default();
            lines.push(
                format!(
                    "  {:<10} {:<50} {:>2} MCs  {}",
                    course.code(),
                    course.name,
                    course.credits,
                    grade
                )
                .trim_end()
                .to_string(),
            );
        }
    }
    lines.join("\n")
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradeSummary {
    pub scope: Scope,
    /// `None` when no course in scope carries grade points.
    pub average: Option<f64>,
    pub graded_credits: u32,
    pub graded_courses: usize,
}

impl fmt::Display for GradeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.average {
            Some(average) => write!(
                f,
                "GPA for {}: {:.2} ({} graded courses, {} MCs)",
                self.scope, average, self.graded_courses, self.graded_credits
            ),
            None => write!(f, "No graded courses for {}", self.scope),
        }
    }
}

/// Credit-weighted mean of grade points; ungraded and pass/fail courses are left out.
pub fn grade_point_average(timetable: &Timetable, scope: Scope) -> GradeSummary {
    let mut weighted_points = 0.0;
    let mut graded_credits = 0;
    let mut graded_courses = 0;

    for course in timetable.courses().filter(|course| scope.matches(course)) {
        let Some(points) = course.grade.and_then(|grade| grade.points()) else {
            continue;
        };
        weighted_points += points * f64::from(course.credits);
        graded_credits += course.credits;
        graded_courses += 1;
    }

    let average = (graded_credits > 0).then(|| weighted_points / f64::from(graded_credits));
    GradeSummary {
        scope,
        average,
        graded_credits,
        graded_courses,
    }
}
