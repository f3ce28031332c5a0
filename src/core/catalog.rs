//! Shared course list (`code,name,credits`) consulted whenever a course is
//! added or moved. Unknown codes are filled in through a [`NameResolver`] and
//! appended, so each code needs a human-entered name at most once.

use crate::core::templates;
use crate::domain::model::{normalize_code, CatalogEntry};
use crate::domain::ports::{NameResolver, Storage};
use crate::utils::error::{PlannerError, Result};

pub const COURSE_LIST_FILE: &str = "CourseList.csv";
const FIELD_DELIMITER: char = ',';

pub struct CourseCatalog<S: Storage> {
    storage: S,
}

impl<S: Storage> CourseCatalog<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Returns the stored entry for `code`, or creates one from a resolved name
    /// and `fallback_credits`. The fallback is ignored on a hit.
    pub fn resolve(
        &self,
        code: &str,
        fallback_credits: u32,
        resolver: &mut dyn NameResolver,
    ) -> Result<CatalogEntry> {
        let code = normalize_code(code);

        if let Err(e) = self.ensure_seeded() {
            tracing::warn!("Could not create {}: {}", self.location(), e);
        }

        match self.lookup(&code) {
            Ok(Some(entry)) => {
                tracing::debug!("Found {} in course list", code);
                return Ok(entry);
            }
            Ok(None) => tracing::info!("{} is not in the course list", code),
            Err(e) => tracing::warn!("Failed searching {}: {}", self.location(), e),
        }

        let name = request_valid_name(&code, resolver)?;
        let entry = CatalogEntry {
            code,
            name,
            credits: fallback_credits,
        };

        if let Err(e) = self.append(&entry) {
            tracing::warn!("Failed to record {} in {}: {}", entry.code, self.location(), e);
        }
        Ok(entry)
    }

    /// Sequential scan of the course list; malformed lines are passed over.
    pub fn lookup(&self, code: &str) -> Result<Option<CatalogEntry>> {
        let code = normalize_code(code);
        let data = self.storage.read_file(COURSE_LIST_FILE)?;

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(data.as_slice());

        for result in reader.records() {
            let record = match result {
                Ok(record) => record,
                Err(e) => {
                    tracing::debug!("Skipping unreadable course list line: {}", e);
                    continue;
                }
            };
            if record.get(0).map(normalize_code).as_deref() != Some(code.as_str()) {
                continue;
            }
            if record.len() != 3 {
                tracing::debug!("Skipping malformed course list entry for {}", code);
                continue;
            }
            match record.deserialize::<CatalogEntry>(None) {
                Ok(mut entry) => {
                    entry.code = code;
                    return Ok(Some(entry));
                }
                Err(e) => tracing::debug!("Skipping malformed course list entry for {}: {}", code, e),
            }
        }

        Ok(None)
    }

    fn ensure_seeded(&self) -> Result<()> {
        if self.storage.exists(COURSE_LIST_FILE) {
            return Ok(());
        }
        let contents = templates::bundled(templates::COURSE_LIST).unwrap_or_default();
        tracing::info!("Creating {} from the bundled course list", self.location());
        self.storage.write_file(COURSE_LIST_FILE, contents.as_bytes())
    }

    fn append(&self, entry: &CatalogEntry) -> Result<()> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Never)
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());
        writer.serialize(entry)?;
        let mut line = writer.into_inner().map_err(|e| {
            PlannerError::IoError(std::io::Error::new(e.error().kind(), e.error().to_string()))
        })?;

        // a hand-edited file may lack its final newline
        let needs_separator = self
            .storage
            .read_file(COURSE_LIST_FILE)
            .map(|data| data.last().is_some_and(|byte| *byte != b'\n'))
            .unwrap_or(false);
        if needs_separator {
            line.insert(0, b'\n');
        }

        self.storage.append_file(COURSE_LIST_FILE, &line)
    }

    fn location(&self) -> String {
        self.storage.describe(COURSE_LIST_FILE)
    }
}

fn request_valid_name(code: &str, resolver: &mut dyn NameResolver) -> Result<String> {
    loop {
        let raw = resolver.request_course_name(code)?;
        let name = raw.trim();
        if name.contains(FIELD_DELIMITER) {
            tracing::warn!("Rejected course name containing '{}': {}", FIELD_DELIMITER, name);
            resolver.reject_course_name(name, "course names cannot contain commas");
            continue;
        }
        if name.is_empty() {
            resolver.reject_course_name(name, "course names cannot be empty");
            continue;
        }
        return Ok(name.to_string());
    }
}
