use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("No bundled template named '{name}'")]
    TemplateMissing { name: String },

    #[error("Input error: {message}")]
    InputError { message: String },

    #[error("Invalid command")]
    InvalidCommand,

    #[error("Please specify your major: init <major>")]
    MissingMajor,

    #[error("Please specify what to add: add course or add grade")]
    InvalidAdd,

    #[error("Invalid format to add a course: add course <code>y/<year>t/<term>[m/<credits>]")]
    InvalidAddCourse,

    #[error("Invalid format to add a grade: add grade <code> <grade>")]
    InvalidAddGrade,

    #[error("Please specify what to remove: rm course or rm grade")]
    InvalidRemove,

    #[error("Invalid format to remove a course: rm course <code>")]
    InvalidRemoveCourse,

    #[error("Invalid format to remove a grade: rm grade <code>")]
    InvalidRemoveGrade,

    #[error("Invalid format to move a course: move <code> y/<year> t/<term>")]
    InvalidMoveCourse,

    #[error("Please specify what to change: change grade or change timetable")]
    InvalidChange,

    #[error("Invalid format to change a grade: change grade <code> <grade>")]
    InvalidChangeGrade,

    #[error("Invalid format to change timetable: change timetable <index>")]
    InvalidChangeTimetable,

    #[error("Invalid format to check grades of a year: check y/<year>")]
    InvalidCheckYearGrade,

    #[error("Invalid format to check grades of a term: check y/<year> t/<term>")]
    InvalidCheckTermGrade,

    #[error("Invalid format to view the plan of a year: view y/<year>")]
    InvalidViewYearPlan,

    #[error("Invalid format to view the plan of a term: view y/<year> t/<term>")]
    InvalidViewTermPlan,

    #[error("Please specify the timetable to display: display <major>")]
    MissingMajorDisplay,

    #[error("Year provided is not from 1 to 6: {year}")]
    YearOutOfRange { year: u32 },

    #[error("Term provided is not from 1 to 4: {term}")]
    TermOutOfRange { term: u32 },

    #[error("Course {code} is already in the timetable")]
    DuplicateCourse { code: String },

    #[error("Course {code} is not in the timetable, no grade was set")]
    GradeTargetMissing { code: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Command,
    Validation,
    Storage,
    Configuration,
    Input,
}

impl PlannerError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PlannerError::IoError(_) | PlannerError::CsvError(_) | PlannerError::TemplateMissing { .. } => {
                ErrorCategory::Storage
            }
            PlannerError::ConfigError { .. }
            | PlannerError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            PlannerError::InputError { .. } => ErrorCategory::Input,
            PlannerError::YearOutOfRange { .. }
            | PlannerError::TermOutOfRange { .. }
            | PlannerError::DuplicateCourse { .. }
            | PlannerError::GradeTargetMissing { .. } => ErrorCategory::Validation,
            _ => ErrorCategory::Command,
        }
    }

    /// Message shown to the user at the prompt.
    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Storage => format!("Could not access the data files: {}", self),
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Command => "Type `help` to see the format of every command",
            ErrorCategory::Validation => "Years run from 1 to 6 and terms from 1 to 4; use `view` to list your courses",
            ErrorCategory::Storage => "Check that the data directory exists and is writable",
            ErrorCategory::Configuration => "Check the settings file and the command-line flags",
            ErrorCategory::Input => "Enter the value again on a single line",
        }
    }
}

pub type Result<T> = std::result::Result<T, PlannerError>;
