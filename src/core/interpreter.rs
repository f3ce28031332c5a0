//! Turns one line of user input into a timetable mutation or query.
//!
//! Malformed input fails with the error belonging to the verb/noun that was
//! typed. Missing courses and grades are ordinary outcomes, not errors.
//! Every command that changes the active timetable rewrites its file.

use crate::core::catalog::CourseCatalog;
use crate::core::flags::{parse_bare_flags, parse_flags, FlagArgs, FlagLayout};
use crate::core::persistence::{LoadOrigin, LoadedTimetable, Session, TimetableRef, TimetableStore};
use crate::core::report::{grade_point_average, list_plan, Scope};
use crate::core::templates;
use crate::domain::model::{normalize_code, Course, Grade, Timetable};
use crate::domain::ports::{ConfigProvider, NameResolver, Storage};
use crate::utils::error::{PlannerError, Result};
use crate::utils::validation::{validate_term, validate_year};

pub const HELP_TEXT: &str = "\
Commands:
  init <major>                              start from a recommended plan
  add course <code>y/<year>t/<term>[m/<credits>]
  add grade <code> <grade>
  rm course <code>
  rm grade <code>
  move <code> y/<year> t/<term>
  change grade <code> <grade>
  change timetable <index>                  switch to another saved timetable
  check [y/<year>] [t/<term>]               grade point average
  view [y/<year>] [t/<term>]                list planned courses
  display <major>                           show a recommended plan
  help
  bye";

/// Result of a successfully executed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub message: String,
    terminate: bool,
}

impl Outcome {
    pub fn proceed(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            terminate: false,
        }
    }

    pub fn exit(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            terminate: true,
        }
    }

    pub fn should_terminate(&self) -> bool {
        self.terminate
    }

    fn with_note(mut self, note: Option<String>) -> Self {
        if let Some(note) = note {
            if !self.message.is_empty() {
                self.message.push('\n');
            }
            self.message.push_str(&note);
        }
        self
    }
}

pub struct CommandInterpreter<S: Storage + Clone, R: NameResolver> {
    store: TimetableStore<S>,
    catalog: CourseCatalog<S>,
    resolver: R,
    session: Session,
    default_credits: u32,
}

impl<S: Storage + Clone, R: NameResolver> CommandInterpreter<S, R> {
    pub fn new(storage: S, resolver: R, config: &impl ConfigProvider) -> Self {
        Self {
            store: TimetableStore::new(storage.clone()),
            catalog: CourseCatalog::new(storage),
            resolver,
            session: Session::new(config.initial_timetable()),
            default_credits: config.default_credits(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn resolver(&self) -> &R {
        &self.resolver
    }

    pub fn resolver_mut(&mut self) -> &mut R {
        &mut self.resolver
    }

    /// Loads the timetable selected by the current session.
    pub fn load_active(&self) -> LoadedTimetable {
        self.store.load_ref(&self.session.user_timetable())
    }

    /// Writes the active timetable; a failure is logged and returned as a note.
    pub fn persist(&self, timetable: &Timetable) -> Option<String> {
        match self.store.save(timetable, &self.session) {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!("Failed writing timetable to file: {}", e);
                Some(format!("Warning: failed to write timetable to file ({})", e))
            }
        }
    }

    pub fn execute(&mut self, line: &str, timetable: &mut Timetable) -> Result<Outcome> {
        tracing::info!("Processing command: {}", line);
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let Some(verb) = tokens.first() else {
            return Err(PlannerError::InvalidCommand);
        };

        match verb.to_lowercase().as_str() {
            "init" => self.init(&tokens, timetable),
            "add" => match noun(&tokens)?.as_str() {
                "course" => self.add_course(&tokens, timetable),
                "grade" => self.set_grade(&tokens, timetable, GradeVerb::Add),
                _ => Err(PlannerError::InvalidAdd),
            },
            "rm" => match noun(&tokens)?.as_str() {
                "course" => self.remove_course(&tokens, timetable),
                "grade" => self.remove_grade(&tokens, timetable),
                _ => Err(PlannerError::InvalidRemove),
            },
            "move" => self.move_course(&tokens, timetable),
            "change" => match noun(&tokens)?.as_str() {
                "grade" => self.set_grade(&tokens, timetable, GradeVerb::Change),
                "timetable" => self.change_timetable(&tokens),
                _ => Err(PlannerError::InvalidChange),
            },
            "check" => self.check(&tokens, timetable),
            "view" => self.view(&tokens, timetable),
            "display" => self.display(&tokens),
            "help" => Ok(Outcome::proceed(help_text())),
            "bye" => {
                let note = self.persist(timetable);
                tracing::info!("Exiting");
                Ok(Outcome::exit("Bye. Your timetable has been saved.").with_note(note))
            }
            _ => {
                tracing::warn!("Invalid command format: {}", line);
                Err(PlannerError::InvalidCommand)
            }
        }
    }

    fn init(&mut self, tokens: &[&str], timetable: &mut Timetable) -> Result<Outcome> {
        let major = tokens
            .get(1)
            .filter(|name| TimetableRef::is_valid_name(name))
            .ok_or(PlannerError::MissingMajor)?;
        let target = TimetableRef::resolve(major, &self.session);
        let loaded = self.store.load_ref(&target);
        if loaded.origin == LoadOrigin::Unavailable {
            return Ok(Outcome::proceed(format!("No recommended timetable found for {}", major)));
        }

        let mut notes = warning_lines(&loaded);
        if matches!(target, TimetableRef::Recommended(_)) {
            if let Err(e) = self.store.save_to(&loaded.timetable, &target) {
                tracing::warn!("Failed to rewrite {}: {}", target.file_name(), e);
                notes.push(format!("Warning: failed to rewrite {} ({})", target.file_name(), e));
            }
        }

        *timetable = loaded.timetable;
        notes.push(format!(
            "Timetable {} now follows the recommended plan for {} ({} courses)",
            self.session.active_index(),
            major,
            timetable.len()
        ));
        Ok(Outcome::proceed(notes.join("\n")).with_note(self.persist(timetable)))
    }

    fn add_course(&mut self, tokens: &[&str], timetable: &mut Timetable) -> Result<Outcome> {
        let argument = tokens.get(2..).unwrap_or_default().join(" ");
        let parsed = parse_flags(&argument, FlagLayout::YEAR_TERM_CREDITS).map_err(|e| {
            tracing::debug!("add course: {}", e);
            PlannerError::InvalidAddCourse
        })?;
        if parsed.leading.is_empty() || parsed.leading.contains(char::is_whitespace) {
            return Err(PlannerError::InvalidAddCourse);
        }
        let (Some(year), Some(term)) = (parsed.args.year, parsed.args.term) else {
            return Err(PlannerError::InvalidAddCourse);
        };
        if parsed.args.credits == Some(0) {
            return Err(PlannerError::InvalidAddCourse);
        }

        let code = normalize_code(parsed.leading);
        if timetable.contains(&code) {
            return Err(PlannerError::DuplicateCourse { code });
        }

        let fallback = parsed.args.credits.unwrap_or(self.default_credits);
        let entry = self.catalog.resolve(&code, fallback, &mut self.resolver)?;
        tracing::info!("Adding course {} to timetable", code);
        timetable.add_course(Course::new(&code, entry.name, entry.credits, year, term))?;

        let note = self.persist(timetable);
        Ok(Outcome::proceed(format!("Added {} to Year {} Term {}", code, year, term)).with_note(note))
    }

    fn set_grade(&mut self, tokens: &[&str], timetable: &mut Timetable, verb: GradeVerb) -> Result<Outcome> {
        let (code, grade) = match tokens {
            [_, _, code, grade] => (normalize_code(code), grade.parse::<Grade>()),
            _ => return Err(verb.format_error()),
        };
        let grade = grade.map_err(|e| {
            tracing::debug!("{} grade: {}", verb.name(), e);
            verb.format_error()
        })?;

        if !timetable.add_grade(&code, grade) {
            return Err(PlannerError::GradeTargetMissing { code });
        }
        tracing::info!("Set grade of {} to {}", code, grade);

        let note = self.persist(timetable);
        let message = match verb {
            GradeVerb::Add => format!("Added grade {} to {}", grade, code),
            GradeVerb::Change => format!("Changed grade of {} to {}", code, grade),
        };
        Ok(Outcome::proceed(message).with_note(note))
    }

    fn remove_course(&mut self, tokens: &[&str], timetable: &mut Timetable) -> Result<Outcome> {
        let [_, _, code] = tokens else {
            return Err(PlannerError::InvalidRemoveCourse);
        };
        let code = normalize_code(code);

        if !timetable.remove_course(&code) {
            return Ok(Outcome::proceed(format!("Course {} not found in the timetable", code)));
        }
        tracing::info!("Removed course {} from timetable", code);
        let note = self.persist(timetable);
        Ok(Outcome::proceed(format!("Removed {}", code)).with_note(note))
    }

    fn remove_grade(&mut self, tokens: &[&str], timetable: &mut Timetable) -> Result<Outcome> {
        let [_, _, code] = tokens else {
            return Err(PlannerError::InvalidRemoveGrade);
        };
        let code = normalize_code(code);

        if !timetable.remove_grade(&code) {
            return Ok(Outcome::proceed(format!(
                "No grade removed: {} is not in the timetable or has no grade",
                code
            )));
        }
        tracing::info!("Removed grade of {}", code);
        let note = self.persist(timetable);
        Ok(Outcome::proceed(format!("Removed grade of {}", code)).with_note(note))
    }

    fn move_course(&mut self, tokens: &[&str], timetable: &mut Timetable) -> Result<Outcome> {
        let code = tokens
            .get(1)
            .map(|code| normalize_code(code))
            .ok_or(PlannerError::InvalidMoveCourse)?;
        let Some(existing) = timetable.get(&code).cloned() else {
            return Ok(Outcome::proceed(format!("Course {} not found in the timetable", code)));
        };

        let FlagArgs {
            year: Some(year),
            term: Some(term),
            ..
        } = bare_flags(tokens, 2, FlagLayout::YEAR_TERM, PlannerError::InvalidMoveCourse)?
        else {
            return Err(PlannerError::InvalidMoveCourse);
        };

        // resolve before touching the timetable so a failed lookup leaves it intact
        let entry = self.catalog.resolve(&code, existing.credits, &mut self.resolver)?;
        let grade = timetable.search_grade(&code);
        timetable.remove_course(&code);
        timetable.add_course(Course::new(&code, entry.name, entry.credits, year, term).with_grade(grade))?;
        tracing::info!("Moved {} to year {} term {}", code, year, term);

        let note = self.persist(timetable);
        Ok(Outcome::proceed(format!("Moved {} to Year {} Term {}", code, year, term)).with_note(note))
    }

    fn change_timetable(&mut self, tokens: &[&str]) -> Result<Outcome> {
        let [_, _, index] = tokens else {
            return Err(PlannerError::InvalidChangeTimetable);
        };
        let index = index
            .trim()
            .parse::<u32>()
            .map_err(|_| PlannerError::InvalidChangeTimetable)?;

        self.session.switch_to(index);
        tracing::info!("Active timetable is now {}", index);
        Ok(Outcome::proceed(format!("Switched to timetable {}", index)))
    }

    fn check(&self, tokens: &[&str], timetable: &Timetable) -> Result<Outcome> {
        let scope = match tokens.len() {
            1 => Scope::all(),
            2 => {
                let args = bare_flags(tokens, 1, FlagLayout::YEAR, PlannerError::InvalidCheckYearGrade)?;
                let year = args.year.ok_or(PlannerError::InvalidCheckYearGrade)?;
                validate_year(year)?;
                Scope::new(Some(year), None)
            }
            _ => {
                let args = bare_flags(tokens, 1, FlagLayout::YEAR_TERM, PlannerError::InvalidCheckTermGrade)?;
                let (Some(year), Some(term)) = (args.year, args.term) else {
                    return Err(PlannerError::InvalidCheckTermGrade);
                };
                validate_year(year)?;
                validate_term(term)?;
                Scope::new(Some(year), Some(term))
            }
        };
        Ok(Outcome::proceed(grade_point_average(timetable, scope).to_string()))
    }

    // No range check here: a plan may list years beyond the normal six.
    fn view(&self, tokens: &[&str], timetable: &Timetable) -> Result<Outcome> {
        let scope = match tokens.len() {
            1 => Scope::all(),
            2 => {
                let args = bare_flags(tokens, 1, FlagLayout::YEAR, PlannerError::InvalidViewYearPlan)?;
                Scope::new(args.year, None)
            }
            _ => {
                let args = bare_flags(tokens, 1, FlagLayout::YEAR_TERM, PlannerError::InvalidViewTermPlan)?;
                Scope::new(args.year, args.term)
            }
        };
        Ok(Outcome::proceed(list_plan(timetable, scope)))
    }

    fn display(&self, tokens: &[&str]) -> Result<Outcome> {
        let name = tokens
            .get(1)
            .filter(|name| TimetableRef::is_valid_name(name))
            .ok_or(PlannerError::MissingMajorDisplay)?;
        let loaded = self.store.load(name, &self.session);
        if loaded.origin == LoadOrigin::Unavailable {
            return Ok(Outcome::proceed(format!("No timetable named {}", name)));
        }

        let mut lines = warning_lines(&loaded);
        lines.push(list_plan(&loaded.timetable, Scope::all()));
        Ok(Outcome::proceed(lines.join("\n")))
    }
}

#[derive(Debug, Clone, Copy)]
enum GradeVerb {
    Add,
    Change,
}

impl GradeVerb {
    fn name(self) -> &'static str {
        match self {
            GradeVerb::Add => "add",
            GradeVerb::Change => "change",
        }
    }

    fn format_error(self) -> PlannerError {
        match self {
            GradeVerb::Add => PlannerError::InvalidAddGrade,
            GradeVerb::Change => PlannerError::InvalidChangeGrade,
        }
    }
}

fn noun(tokens: &[&str]) -> Result<String> {
    tokens
        .get(1)
        .map(|noun| noun.to_lowercase())
        .ok_or(PlannerError::InvalidCommand)
}

/// Parses `tokens[from..]` as marker arguments with nothing else allowed.
fn bare_flags(tokens: &[&str], from: usize, layout: FlagLayout, error: PlannerError) -> Result<FlagArgs> {
    let argument = tokens.get(from..).unwrap_or_default().join(" ");
    parse_bare_flags(&argument, layout).map_err(|e| {
        tracing::debug!("{}: {}", error, e);
        error
    })
}

fn warning_lines(loaded: &LoadedTimetable) -> Vec<String> {
    loaded.warnings.iter().map(ToString::to_string).collect()
}

fn help_text() -> String {
    let plans: Vec<&str> = templates::recommended_plans().collect();
    format!("{}\nBundled recommended plans: {}", HELP_TEXT, plans.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::scripted::ScriptedNameResolver;
    use crate::config::PlannerConfig;
    use crate::core::catalog::COURSE_LIST_FILE;
    use crate::core::testing::MockStorage;

    const COURSE_LIST: &str = "CS1010,Programming Methodology,4\n\
                               CS1231,Discrete Structures,4\n\
                               MA1511,Engineering Calculus,2\n\
                               CG4002,Computer Engineering Capstone Project 1,8\n";

    fn interpreter(answers: &[&str]) -> (CommandInterpreter<MockStorage, ScriptedNameResolver>, MockStorage) {
        let storage = MockStorage::with_file(COURSE_LIST_FILE, COURSE_LIST);
        let resolver = ScriptedNameResolver::new(answers.iter().copied());
        let interpreter = CommandInterpreter::new(storage.clone(), resolver, &PlannerConfig::default());
        (interpreter, storage)
    }

    fn run(
        interpreter: &mut CommandInterpreter<MockStorage, ScriptedNameResolver>,
        timetable: &mut Timetable,
        line: &str,
    ) -> Outcome {
        interpreter.execute(line, timetable).unwrap()
    }

    #[test]
    fn test_add_course_uses_catalog_and_persists() {
        let (mut interpreter, storage) = interpreter(&[]);
        let mut timetable = Timetable::new();

        let outcome = run(&mut interpreter, &mut timetable, "add course ma1511y/1t/2");

        assert!(!outcome.should_terminate());
        let course = timetable.get("MA1511").unwrap();
        assert_eq!(course.name, "Engineering Calculus");
        assert_eq!((course.credits, course.year, course.term), (2, 1, 2));
        assert_eq!(
            storage.get("myTimetable0.csv").unwrap(),
            "MA1511,Engineering Calculus,2,1,2,\n"
        );
    }

    #[test]
    fn test_add_course_with_spaced_markers() {
        let (mut interpreter, _) = interpreter(&[]);
        let mut timetable = Timetable::new();

        run(&mut interpreter, &mut timetable, "add course CS1231 y/1 t/1");
        assert!(timetable.contains("CS1231"));
    }

    #[test]
    fn test_add_unknown_course_uses_override_credits() {
        let (mut interpreter, storage) = interpreter(&["Internship"]);
        let mut timetable = Timetable::new();

        run(&mut interpreter, &mut timetable, "add course IS4010y/4t/1m/12");

        assert_eq!(timetable.get("IS4010").unwrap().credits, 12);
        assert!(storage.get(COURSE_LIST_FILE).unwrap().ends_with("IS4010,Internship,12\n"));
    }

    #[test]
    fn test_duplicate_add_fails_without_mutation() {
        let (mut interpreter, _) = interpreter(&[]);
        let mut timetable = Timetable::new();
        run(&mut interpreter, &mut timetable, "add course CS1010y/1t/1");

        let err = interpreter
            .execute("add course CS1010y/2t/2", &mut timetable)
            .unwrap_err();

        assert!(matches!(err, PlannerError::DuplicateCourse { .. }));
        assert!(interpreter.resolver().prompts().is_empty());
        assert_eq!(timetable.len(), 1);
        assert_eq!(timetable.get("CS1010").unwrap().year, 1);
    }

    #[test]
    fn test_malformed_add_course_is_command_scoped() {
        let (mut interpreter, _) = interpreter(&[]);
        let mut timetable = Timetable::new();

        for line in [
            "add course",
            "add course CS1010",
            "add course CS1010y/1",
            "add course CS1010t/1y/1",
            "add course CS1010y/oney/1",
            "add course y/1t/1",
            "add course CS1010y/1t/1m/0",
        ] {
            let err = interpreter.execute(line, &mut timetable).unwrap_err();
            assert!(matches!(err, PlannerError::InvalidAddCourse), "{line}");
        }
        assert!(timetable.is_empty());
    }

    #[test]
    fn test_unknown_nouns_and_verbs() {
        let (mut interpreter, _) = interpreter(&[]);
        let mut timetable = Timetable::new();

        let cases = [
            ("add", "InvalidCommand"),
            ("add module CS1010", "InvalidAdd"),
            ("rm module CS1010", "InvalidRemove"),
            ("change course CS1010", "InvalidChange"),
            ("jump", "InvalidCommand"),
            ("", "InvalidCommand"),
        ];
        for (line, expected) in cases {
            let err = interpreter.execute(line, &mut timetable).unwrap_err();
            assert!(format!("{:?}", err).starts_with(expected), "{line}: {err:?}");
        }
    }

    #[test]
    fn test_grade_commands() {
        let (mut interpreter, storage) = interpreter(&[]);
        let mut timetable = Timetable::new();
        run(&mut interpreter, &mut timetable, "add course CS1010y/1t/1");

        run(&mut interpreter, &mut timetable, "add grade cs1010 b+");
        assert_eq!(timetable.search_grade("CS1010"), Some(Grade::BPlus));

        run(&mut interpreter, &mut timetable, "change grade CS1010 A-");
        assert_eq!(timetable.search_grade("CS1010"), Some(Grade::AMinus));
        assert!(storage.get("myTimetable0.csv").unwrap().ends_with(",A-\n"));

        let missing = interpreter.execute("add grade CS9999 A", &mut timetable).unwrap_err();
        assert!(matches!(missing, PlannerError::GradeTargetMissing { .. }));
        let missing = interpreter.execute("change grade CS9999 A", &mut timetable).unwrap_err();
        assert!(matches!(missing, PlannerError::GradeTargetMissing { .. }));

        assert!(matches!(
            interpreter.execute("add grade CS1010", &mut timetable).unwrap_err(),
            PlannerError::InvalidAddGrade
        ));
        assert!(matches!(
            interpreter.execute("change grade CS1010 Q", &mut timetable).unwrap_err(),
            PlannerError::InvalidChangeGrade
        ));

        let removed = run(&mut interpreter, &mut timetable, "rm grade CS1010");
        assert_eq!(removed.message, "Removed grade of CS1010");
        let again = run(&mut interpreter, &mut timetable, "rm grade CS1010");
        assert!(again.message.starts_with("No grade removed"));
    }

    #[test]
    fn test_remove_course_not_found_is_an_outcome() {
        let (mut interpreter, _) = interpreter(&[]);
        let mut timetable = Timetable::new();
        run(&mut interpreter, &mut timetable, "add course CS1010y/1t/1");

        let missing = run(&mut interpreter, &mut timetable, "rm course CS2040");
        assert_eq!(missing.message, "Course CS2040 not found in the timetable");

        let removed = run(&mut interpreter, &mut timetable, "rm course cs1010");
        assert_eq!(removed.message, "Removed CS1010");
        assert!(timetable.is_empty());

        assert!(matches!(
            interpreter.execute("rm course", &mut timetable).unwrap_err(),
            PlannerError::InvalidRemoveCourse
        ));
    }

    #[test]
    fn test_move_missing_course_leaves_timetable_unchanged() {
        let (mut interpreter, _) = interpreter(&[]);
        let mut timetable = Timetable::new();
        run(&mut interpreter, &mut timetable, "add course CS1010y/1t/1");
        let before = timetable.clone();

        let outcome = run(&mut interpreter, &mut timetable, "move CS1231 y/2 t/1");

        assert_eq!(outcome.message, "Course CS1231 not found in the timetable");
        assert_eq!(timetable, before);
    }

    #[test]
    fn test_move_reports_missing_course_before_checking_arguments() {
        let (mut interpreter, _) = interpreter(&[]);
        let mut timetable = Timetable::new();

        let outcome = run(&mut interpreter, &mut timetable, "move CS9999 y/x t/1");

        assert_eq!(outcome.message, "Course CS9999 not found in the timetable");
        assert!(timetable.is_empty());
    }

    #[test]
    fn test_move_keeps_grade() {
        let (mut interpreter, storage) = interpreter(&[]);
        let mut timetable = Timetable::new();
        run(&mut interpreter, &mut timetable, "add course CS1231y/1t/1");
        run(&mut interpreter, &mut timetable, "add grade CS1231 B");

        run(&mut interpreter, &mut timetable, "move cs1231 y/2 t/3");

        let moved = timetable.get("CS1231").unwrap();
        assert_eq!((moved.year, moved.term), (2, 3));
        assert_eq!(moved.grade, Some(Grade::B));
        assert_eq!(
            storage.get("myTimetable0.csv").unwrap(),
            "CS1231,Discrete Structures,4,2,3,B\n"
        );
    }

    #[test]
    fn test_malformed_move_does_not_remove() {
        let (mut interpreter, _) = interpreter(&[]);
        let mut timetable = Timetable::new();
        run(&mut interpreter, &mut timetable, "add course CS1010y/1t/1");

        for line in ["move", "move CS1010", "move CS1010 t/1 y/2", "move CS1010 y/x t/1"] {
            let err = interpreter.execute(line, &mut timetable).unwrap_err();
            assert!(matches!(err, PlannerError::InvalidMoveCourse), "{line}");
        }
        assert_eq!(timetable.get("CS1010").unwrap().year, 1);
    }

    #[test]
    fn test_change_timetable_redirects_saves() {
        let (mut interpreter, storage) = interpreter(&[]);
        let mut timetable = Timetable::new();

        let outcome = run(&mut interpreter, &mut timetable, "change timetable 2");
        assert_eq!(outcome.message, "Switched to timetable 2");
        assert_eq!(interpreter.session().active_index(), 2);
        assert!(storage.get("myTimetable2.csv").is_none());

        run(&mut interpreter, &mut timetable, "add course CS1010y/1t/1");
        assert!(storage.get("myTimetable2.csv").is_some());
        assert!(storage.get("myTimetable0.csv").is_none());

        for line in ["change timetable", "change timetable two", "change timetable -1"] {
            assert!(matches!(
                interpreter.execute(line, &mut timetable).unwrap_err(),
                PlannerError::InvalidChangeTimetable
            ));
        }
    }

    #[test]
    fn test_check_scopes_and_ranges() {
        let (mut interpreter, _) = interpreter(&[]);
        let mut timetable = Timetable::new();
        timetable
            .add_course(Course::new("CS1", "One", 4, 1, 1).with_grade(Some(Grade::A)))
            .unwrap();
        timetable.add_course(Course::new("CS2", "Two", 4, 1, 1)).unwrap();
        timetable
            .add_course(Course::new("CS3", "Three", 4, 2, 1).with_grade(Some(Grade::B)))
            .unwrap();

        assert!(run(&mut interpreter, &mut timetable, "check").message.contains("4.25"));
        assert!(run(&mut interpreter, &mut timetable, "check y/1").message.contains("5.00"));
        assert!(run(&mut interpreter, &mut timetable, "check y/2 t/1").message.contains("3.50"));
        assert_eq!(
            run(&mut interpreter, &mut timetable, "check y/3").message,
            "No graded courses for Year 3"
        );

        assert!(matches!(
            interpreter.execute("check y/7", &mut timetable).unwrap_err(),
            PlannerError::YearOutOfRange { year: 7 }
        ));
        assert!(matches!(
            interpreter.execute("check y/1 t/5", &mut timetable).unwrap_err(),
            PlannerError::TermOutOfRange { term: 5 }
        ));
        assert!(matches!(
            interpreter.execute("check t/1", &mut timetable).unwrap_err(),
            PlannerError::InvalidCheckYearGrade
        ));
        assert!(matches!(
            interpreter.execute("check y/1 y/1", &mut timetable).unwrap_err(),
            PlannerError::InvalidCheckTermGrade
        ));
    }

    #[test]
    fn test_view_does_not_range_check() {
        let (mut interpreter, _) = interpreter(&[]);
        let mut timetable = Timetable::new();

        let outcome = run(&mut interpreter, &mut timetable, "view y/9 t/7");
        assert_eq!(outcome.message, "No courses planned for Year 9 Term 7");

        assert!(matches!(
            interpreter.execute("view t/1", &mut timetable).unwrap_err(),
            PlannerError::InvalidViewYearPlan
        ));
        assert!(matches!(
            interpreter.execute("view y/1 x", &mut timetable).unwrap_err(),
            PlannerError::InvalidViewTermPlan
        ));
    }

    #[test]
    fn test_add_and_move_accept_years_that_check_rejects() {
        let (mut interpreter, _) = interpreter(&[]);
        let mut timetable = Timetable::new();

        run(&mut interpreter, &mut timetable, "add course CS1010y/9t/5");
        run(&mut interpreter, &mut timetable, "add course CS1231y/1t/1");
        run(&mut interpreter, &mut timetable, "move CS1231 y/0 t/8");

        assert_eq!(timetable.get("CS1010").unwrap().year, 9);
        assert_eq!(timetable.get("CS1231").unwrap().term, 8);
        assert!(interpreter.execute("check y/9", &mut timetable).is_err());
    }

    #[test]
    fn test_init_adopts_recommended_plan() {
        let (mut interpreter, storage) = interpreter(&[]);
        let mut timetable = Timetable::new();

        run(&mut interpreter, &mut timetable, "init CEG");

        assert!(timetable.contains("CG1111A"));
        assert!(storage.get("CEG.csv").unwrap().starts_with("CG1111A,"));
        let user_file = storage.get("myTimetable0.csv").unwrap();
        assert!(user_file.starts_with("CG1111A,Engineering Principles and Practice I,4,1,1,\n"));

        assert!(matches!(
            interpreter.execute("init", &mut timetable).unwrap_err(),
            PlannerError::MissingMajor
        ));
        let unknown = run(&mut interpreter, &mut timetable, "init LAW");
        assert_eq!(unknown.message, "No recommended timetable found for LAW");
        assert!(timetable.contains("CG1111A"));
    }

    #[test]
    fn test_names_outside_the_data_directory_are_rejected() {
        let notes = "my own notes line\nCS1010,Programming Methodology,4,1,1\n";
        let storage = MockStorage::with_file(COURSE_LIST_FILE, COURSE_LIST);
        storage.put("../notes.csv", notes);
        let resolver = ScriptedNameResolver::new(Vec::<String>::new());
        let mut interpreter = CommandInterpreter::new(storage.clone(), resolver, &PlannerConfig::default());
        let mut timetable = Timetable::new();

        for line in ["init ../notes", "init data/CEG", "init a\\b"] {
            let err = interpreter.execute(line, &mut timetable).unwrap_err();
            assert!(matches!(err, PlannerError::MissingMajor), "{line}");
        }
        let err = interpreter.execute("display ../notes", &mut timetable).unwrap_err();
        assert!(matches!(err, PlannerError::MissingMajorDisplay));

        assert_eq!(storage.get("../notes.csv").as_deref(), Some(notes));
        assert!(timetable.is_empty());
        assert!(storage.get("myTimetable0.csv").is_none());
    }

    #[test]
    fn test_display_does_not_touch_active_timetable() {
        let (mut interpreter, storage) = interpreter(&[]);
        let mut timetable = Timetable::new();

        let outcome = run(&mut interpreter, &mut timetable, "display CS");

        assert!(outcome.message.contains("Year 1 Term 1:"));
        assert!(outcome.message.contains("CS1010"));
        assert!(timetable.is_empty());
        assert!(storage.get("myTimetable0.csv").is_none());
        assert!(matches!(
            interpreter.execute("display", &mut timetable).unwrap_err(),
            PlannerError::MissingMajorDisplay
        ));
    }

    #[test]
    fn test_bye_saves_and_terminates() {
        let (mut interpreter, storage) = interpreter(&[]);
        let mut timetable = Timetable::new();
        timetable
            .add_course(Course::new("CS1010", "Programming Methodology", 4, 1, 1))
            .unwrap();

        let outcome = run(&mut interpreter, &mut timetable, "BYE");

        assert!(outcome.should_terminate());
        assert!(storage.get("myTimetable0.csv").unwrap().starts_with("CS1010,"));
        assert!(!run(&mut interpreter, &mut timetable, "help").should_terminate());
    }

    #[test]
    fn test_write_failure_is_reported_not_raised() {
        let storage = MockStorage::read_only();
        let resolver = ScriptedNameResolver::new(["Programming Methodology"]);
        let mut interpreter = CommandInterpreter::new(storage, resolver, &PlannerConfig::default());
        let mut timetable = Timetable::new();

        let outcome = interpreter
            .execute("add course CS1010y/1t/1", &mut timetable)
            .unwrap();

        assert!(timetable.contains("CS1010"));
        assert!(outcome.message.contains("failed to write timetable"));
    }
}
