//! Whole-file load and save of timetables.
//!
//! Recommended plans are stored as `code,name,credits,year,term`; user
//! timetables add a trailing grade field that is empty while no grade is set.
//! Loading never aborts on a bad line: the line is skipped and reported.

use crate::core::templates;
use crate::domain::model::{Course, Grade, Timetable};
use crate::domain::ports::Storage;
use crate::utils::error::{PlannerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Names containing this marker refer to the active user timetable.
pub const USER_TIMETABLE_MARKER: &str = "myTimetable";

/// Which user timetable file is active. Owned by the caller and passed to
/// every load and save so that switching is explicit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Session {
    active_index: u32,
}

impl Session {
    pub fn new(active_index: u32) -> Self {
        Self { active_index }
    }

    pub fn active_index(&self) -> u32 {
        self.active_index
    }

    pub fn switch_to(&mut self, index: u32) {
        self.active_index = index;
    }

    pub fn user_timetable(&self) -> TimetableRef {
        TimetableRef::User(self.active_index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimetableRef {
    User(u32),
    Recommended(String),
}

impl TimetableRef {
    /// Whether `name` stays inside the data directory once turned into a file name.
    pub fn is_valid_name(name: &str) -> bool {
        let name = name.trim();
        !name.is_empty() && !name.contains(|c| c == '/' || c == '\\') && !name.contains("..")
    }

    pub fn resolve(name: &str, session: &Session) -> Self {
        if name.contains(USER_TIMETABLE_MARKER) {
            session.user_timetable()
        } else {
            TimetableRef::Recommended(name.to_string())
        }
    }

    pub fn file_name(&self) -> String {
        match self {
            TimetableRef::User(index) => format!("{}{}.csv", USER_TIMETABLE_MARKER, index),
            TimetableRef::Recommended(name) => format!("{}.csv", name),
        }
    }

    pub fn format(&self) -> RecordFormat {
        match self {
            TimetableRef::User(_) => RecordFormat::User,
            TimetableRef::Recommended(_) => RecordFormat::Recommended,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordFormat {
    Recommended,
    User,
}

impl RecordFormat {
    pub fn field_count(self) -> usize {
        match self {
            RecordFormat::Recommended => 5,
            RecordFormat::User => 6,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct PlanRow {
    code: String,
    name: String,
    credits: u32,
    year: u32,
    term: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct UserRow {
    code: String,
    name: String,
    credits: u32,
    year: u32,
    term: u32,
    grade: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    Existing,
    CreatedEmpty,
    CopiedFromTemplate,
    /// Nothing could be read; the timetable is empty.
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadWarning {
    pub line: u64,
    pub file: String,
    pub reason: String,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Corrupted data at line {} of {} ({}), line skipped",
            self.line, self.file, self.reason
        )
    }
}

#[derive(Debug, Clone)]
pub struct LoadedTimetable {
    pub timetable: Timetable,
    pub warnings: Vec<LoadWarning>,
    pub origin: LoadOrigin,
}

impl LoadedTimetable {
    fn unavailable() -> Self {
        Self {
            timetable: Timetable::new(),
            warnings: Vec::new(),
            origin: LoadOrigin::Unavailable,
        }
    }
}

pub struct TimetableStore<S: Storage> {
    storage: S,
}

impl<S: Storage> TimetableStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Loads the active user timetable when `name` contains the user marker,
    /// otherwise the recommended plan stored as `<name>.csv`.
    pub fn load(&self, name: &str, session: &Session) -> LoadedTimetable {
        if !TimetableRef::is_valid_name(name) {
            tracing::warn!("Refusing to load timetable named '{}'", name);
            return LoadedTimetable::unavailable();
        }
        self.load_ref(&TimetableRef::resolve(name, session))
    }

    pub fn load_ref(&self, target: &TimetableRef) -> LoadedTimetable {
        let file_name = target.file_name();
        let location = self.storage.describe(&file_name);

        if !self.storage.exists(&file_name) {
            return self.create_missing(target, &file_name, &location);
        }

        match self.storage.read_file(&file_name) {
            Ok(data) => {
                let (timetable, warnings) = parse_timetable(&data, target.format(), &location);
                tracing::debug!("Loaded {} courses from {}", timetable.len(), location);
                LoadedTimetable {
                    timetable,
                    warnings,
                    origin: LoadOrigin::Existing,
                }
            }
            Err(e) => {
                tracing::warn!("Failed loading {}: {}", location, e);
                LoadedTimetable::unavailable()
            }
        }
    }

    fn create_missing(&self, target: &TimetableRef, file_name: &str, location: &str) -> LoadedTimetable {
        match target {
            TimetableRef::User(_) => {
                tracing::warn!("{} not found, creating an empty timetable", location);
                if let Err(e) = self.storage.write_file(file_name, b"") {
                    tracing::warn!("Failed to create {}: {}", location, e);
                }
                LoadedTimetable {
                    timetable: Timetable::new(),
                    warnings: Vec::new(),
                    origin: LoadOrigin::CreatedEmpty,
                }
            }
            TimetableRef::Recommended(name) => {
                let Some(contents) = templates::bundled(name) else {
                    tracing::warn!("{}", PlannerError::TemplateMissing { name: name.clone() });
                    return LoadedTimetable::unavailable();
                };
                if let Err(e) = self.storage.write_file(file_name, contents.as_bytes()) {
                    tracing::warn!("Failed to copy template to {}: {}", location, e);
                }
                let (timetable, warnings) =
                    parse_timetable(contents.as_bytes(), target.format(), location);
                LoadedTimetable {
                    timetable,
                    warnings,
                    origin: LoadOrigin::CopiedFromTemplate,
                }
            }
        }
    }

    /// Rewrites the active user timetable file in full.
    pub fn save(&self, timetable: &Timetable, session: &Session) -> Result<()> {
        self.save_to(timetable, &session.user_timetable())
    }

    pub fn save_to(&self, timetable: &Timetable, target: &TimetableRef) -> Result<()> {
        let data = serialize_timetable(timetable, target.format())?;
        let file_name = target.file_name();
        tracing::debug!(
            "Writing {} courses to {}",
            timetable.len(),
            self.storage.describe(&file_name)
        );
        self.storage.write_file(&file_name, &data)
    }
}

/// Parses every record independently; bad records become warnings.
pub fn parse_timetable(data: &[u8], format: RecordFormat, file: &str) -> (Timetable, Vec<LoadWarning>) {
    let mut timetable = Timetable::new();
    let mut warnings = Vec::new();

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(data);

    let mut record = csv::StringRecord::new();
    let mut fallback_line = 0;
    loop {
        fallback_line += 1;
        let (line, outcome) = match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                let line = record.position().map_or(fallback_line, |p| p.line());
                (line, parse_record(&record, format))
            }
            Err(e) => {
                let line = e.position().map_or(fallback_line, |p| p.line());
                (line, Err(e.to_string()))
            }
        };
        fallback_line = line;

        let result = outcome.and_then(|course| timetable.add_course(course).map_err(|e| e.to_string()));
        if let Err(reason) = result {
            let warning = LoadWarning {
                line,
                file: file.to_string(),
                reason,
            };
            tracing::warn!("{}", warning);
            warnings.push(warning);
        }
    }

    (timetable, warnings)
}

fn parse_record(record: &csv::StringRecord, format: RecordFormat) -> std::result::Result<Course, String> {
    if record.len() != format.field_count() {
        return Err(format!(
            "expected {} fields, found {}",
            format.field_count(),
            record.len()
        ));
    }

    match format {
        RecordFormat::Recommended => {
            let row: PlanRow = record.deserialize(None).map_err(|e| e.to_string())?;
            Ok(Course::new(&row.code, row.name, row.credits, row.year, row.term))
        }
        RecordFormat::User => {
            let row: UserRow = record.deserialize(None).map_err(|e| e.to_string())?;
            let grade = parse_stored_grade(&row.grade)?;
            Ok(Course::new(&row.code, row.name, row.credits, row.year, row.term).with_grade(grade))
        }
    }
}

fn parse_stored_grade(raw: &str) -> std::result::Result<Option<Grade>, String> {
    let raw = raw.trim();
    // older files spell an absent grade as "null"
    if raw.is_empty() || raw == "null" {
        return Ok(None);
    }
    raw.parse::<Grade>().map(Some)
}

pub fn serialize_timetable(timetable: &Timetable, format: RecordFormat) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .quote_style(csv::QuoteStyle::Never)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    for course in timetable.courses() {
        match format {
            RecordFormat::Recommended => writer.serialize(PlanRow {
                code: course.code().to_string(),
                name: course.name.clone(),
                credits: course.credits,
                year: course.year,
                term: course.term,
            })?,
            RecordFormat::User => writer.serialize(UserRow {
                code: course.code().to_string(),
                name: course.name.clone(),
                credits: course.credits,
                year: course.year,
                term: course.term,
                grade: course.grade.map(|g| g.to_string()).unwrap_or_default(),
            })?,
        }
    }

    writer
        .into_inner()
        .map_err(|e| PlannerError::IoError(std::io::Error::new(e.error().kind(), e.error().to_string())))
}
