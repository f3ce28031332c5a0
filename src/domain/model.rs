use crate::utils::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_CREDITS: u32 = 4;

/// Letter grade recorded against a course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Grade {
    APlus,
    A,
    AMinus,
    BPlus,
    B,
    BMinus,
    CPlus,
    C,
    DPlus,
    D,
    F,
    Satisfactory,
    Unsatisfactory,
    CompletedSatisfactory,
    CompletedUnsatisfactory,
}

impl Grade {
    /// Grade points on the 5-point scale; `None` for pass/fail grades.
    pub fn points(self) -> Option<f64> {
        match self {
            Grade::APlus | Grade::A => Some(5.0),
            Grade::AMinus => Some(4.5),
            Grade::BPlus => Some(4.0),
            Grade::B => Some(3.5),
            Grade::BMinus => Some(3.0),
            Grade::CPlus => Some(2.5),
            Grade::C => Some(2.0),
            Grade::DPlus => Some(1.5),
            Grade::D => Some(1.0),
            Grade::F => Some(0.0),
            Grade::Satisfactory
            | Grade::Unsatisfactory
            | Grade::CompletedSatisfactory
            | Grade::CompletedUnsatisfactory => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::AMinus => "A-",
            Grade::BPlus => "B+",
            Grade::B => "B",
            Grade::BMinus => "B-",
            Grade::CPlus => "C+",
            Grade::C => "C",
            Grade::DPlus => "D+",
            Grade::D => "D",
            Grade::F => "F",
            Grade::Satisfactory => "S",
            Grade::Unsatisfactory => "U",
            Grade::CompletedSatisfactory => "CS",
            Grade::CompletedUnsatisfactory => "CU",
        }
    }
}

impl FromStr for Grade {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let grade = match s.trim().to_ascii_uppercase().as_str() {
            "A+" => Grade::APlus,
            "A" => Grade::A,
            "A-" => Grade::AMinus,
            "B+" => Grade::BPlus,
            "B" => Grade::B,
            "B-" => Grade::BMinus,
            "C+" => Grade::CPlus,
            "C" => Grade::C,
            "D+" => Grade::DPlus,
            "D" => Grade::D,
            "F" => Grade::F,
            "S" => Grade::Satisfactory,
            "U" => Grade::Unsatisfactory,
            "CS" => Grade::CompletedSatisfactory,
            "CU" => Grade::CompletedUnsatisfactory,
            other => return Err(format!("unknown grade '{}'", other)),
        };
        Ok(grade)
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    code: String,
    pub name: String,
    pub credits: u32,
    pub year: u32,
    pub term: u32,
    pub grade: Option<Grade>,
}

impl Course {
    /// The code is stored upper-cased; it is the course's identity.
    pub fn new(code: &str, name: impl Into<String>, credits: u32, year: u32, term: u32) -> Self {
        Self {
            code: normalize_code(code),
            name: name.into(),
            credits,
            year,
            term,
            grade: None,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn with_grade(mut self, grade: Option<Grade>) -> Self {
        self.grade = grade;
        self
    }

    pub fn is_in(&self, year: Option<u32>, term: Option<u32>) -> bool {
        year.map_or(true, |y| self.year == y) && term.map_or(true, |t| self.term == t)
    }
}

pub fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

/// Courses keyed by code, iterated in insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timetable {
    courses: Vec<Course>,
}

impl Timetable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_course(&mut self, course: Course) -> Result<()> {
        if self.contains(course.code()) {
            return Err(PlannerError::DuplicateCourse {
                code: course.code().to_string(),
            });
        }
        self.courses.push(course);
        Ok(())
    }

    pub fn remove_course(&mut self, code: &str) -> bool {
        match self.position(code) {
            Some(index) => {
                self.courses.remove(index);
                true
            }
            None => false,
        }
    }

    /// Sets or overwrites the grade; `false` when the course is absent.
    pub fn add_grade(&mut self, code: &str, grade: Grade) -> bool {
        match self.get_mut(code) {
            Some(course) => {
                course.grade = Some(grade);
                true
            }
            None => false,
        }
    }

    /// `false` when the course is absent or carries no grade.
    pub fn remove_grade(&mut self, code: &str) -> bool {
        match self.get_mut(code) {
            Some(course) => course.grade.take().is_some(),
            None => false,
        }
    }

    pub fn search_grade(&self, code: &str) -> Option<Grade> {
        self.get(code).and_then(|course| course.grade)
    }

    pub fn get(&self, code: &str) -> Option<&Course> {
        self.position(code).map(|index| &self.courses[index])
    }

    fn get_mut(&mut self, code: &str) -> Option<&mut Course> {
        let index = self.position(code)?;
        self.courses.get_mut(index)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.position(code).is_some()
    }

    fn position(&self, code: &str) -> Option<usize> {
        let code = normalize_code(code);
        self.courses.iter().position(|course| course.code == code)
    }

    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }
}

/// Canonical name and credit count of a course in the shared catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub code: String,
    pub name: String,
    pub credits: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, year: u32, term: u32) -> Course {
        Course::new(code, format!("{} name", code), 4, year, term)
    }

    #[test]
    fn test_course_code_is_upper_cased() {
        let course = Course::new(" cs2113t ", "Software Engineering", 4, 2, 1);
        assert_eq!(course.code(), "CS2113T");
    }

    #[test]
    fn test_duplicate_add_keeps_first_entry() {
        let mut timetable = Timetable::new();
        timetable.add_course(course("CS1010", 1, 1)).unwrap();

        let duplicate = Course::new("cs1010", "Other", 8, 3, 2);
        let err = timetable.add_course(duplicate).unwrap_err();

        assert!(matches!(err, PlannerError::DuplicateCourse { ref code } if code == "CS1010"));
        assert_eq!(timetable.len(), 1);
        let kept = timetable.get("CS1010").unwrap();
        assert_eq!(kept.name, "CS1010 name");
        assert_eq!((kept.credits, kept.year, kept.term), (4, 1, 1));
    }

    #[test]
    fn test_remove_course_reports_presence() {
        let mut timetable = Timetable::new();
        timetable.add_course(course("CS1010", 1, 1)).unwrap();

        assert!(timetable.remove_course("cs1010"));
        assert!(!timetable.remove_course("CS1010"));
        assert!(timetable.is_empty());
    }

    #[test]
    fn test_grade_operations() {
        let mut timetable = Timetable::new();
        timetable.add_course(course("MA1511", 1, 1)).unwrap();

        assert!(!timetable.add_grade("MA1512", Grade::A));
        assert!(timetable.add_grade("MA1511", Grade::B));
        assert!(timetable.add_grade("MA1511", Grade::APlus));
        assert_eq!(timetable.search_grade("ma1511"), Some(Grade::APlus));

        assert!(timetable.remove_grade("MA1511"));
        assert!(!timetable.remove_grade("MA1511"));
        assert_eq!(timetable.search_grade("MA1511"), None);
    }

    #[test]
    fn test_iteration_keeps_insertion_order() {
        let mut timetable = Timetable::new();
        for code in ["CS2040C", "CS1010", "EE2026"] {
            timetable.add_course(course(code, 1, 1)).unwrap();
        }
        let codes: Vec<&str> = timetable.courses().map(Course::code).collect();
        assert_eq!(codes, vec!["CS2040C", "CS1010", "EE2026"]);
    }

    #[test]
    fn test_grade_parsing() {
        assert_eq!("a-".parse::<Grade>().unwrap(), Grade::AMinus);
        assert_eq!("B+".parse::<Grade>().unwrap().points(), Some(4.0));
        assert_eq!("s".parse::<Grade>().unwrap().points(), None);
        assert!("Z".parse::<Grade>().is_err());
        assert_eq!(Grade::CPlus.to_string(), "C+");
    }
}
