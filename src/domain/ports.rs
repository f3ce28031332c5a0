use crate::utils::error::Result;

/// File access relative to the planner's data directory.
pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    /// Replaces the whole file, creating parent directories as needed.
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
    fn append_file(&self, path: &str, data: &[u8]) -> Result<()>;
    fn exists(&self, path: &str) -> bool;
    /// Human-readable location used in warnings.
    fn describe(&self, path: &str) -> String {
        path.to_string()
    }
}

pub trait ConfigProvider {
    fn data_dir(&self) -> &str;
    fn default_credits(&self) -> u32;
    fn initial_timetable(&self) -> u32;
}

/// Supplies a course name when the catalog has no entry for a code.
pub trait NameResolver {
    fn request_course_name(&mut self, code: &str) -> Result<String>;

    /// Called when a supplied name cannot be stored; a new name is requested afterwards.
    fn reject_course_name(&mut self, _name: &str, _reason: &str) {}
}
