use clap::Parser;
use course_planner::domain::ports::ConfigProvider;
use course_planner::utils::logger;
use course_planner::{CliConfig, CommandInterpreter, Console, LocalStorage, PlannerError};

const PROMPT: &str = "> ";

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting course-planner");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    let storage = LocalStorage::new(config.data_dir().to_string());
    let mut interpreter = CommandInterpreter::new(storage, Console::stdio(), &config);

    let loaded = interpreter.load_active();
    let mut timetable = loaded.timetable;
    for warning in &loaded.warnings {
        interpreter.resolver_mut().print(&warning.to_string())?;
    }
    let welcome = format!(
        "Welcome! Timetable {} has {} courses. Type `help` for commands.",
        interpreter.session().active_index(),
        timetable.len()
    );
    interpreter.resolver_mut().print(&welcome)?;

    loop {
        let Some(line) = interpreter.resolver_mut().read_command(PROMPT)? else {
            // end of input behaves like `bye`
            if let Some(note) = interpreter.persist(&timetable) {
                eprintln!("❌ {}", note);
            }
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        match interpreter.execute(&line, &mut timetable) {
            Ok(outcome) => {
                interpreter.resolver_mut().print(&outcome.message)?;
                if outcome.should_terminate() {
                    break;
                }
            }
            Err(PlannerError::InputError { message }) => {
                tracing::error!("Input closed: {}", message);
                if let Some(note) = interpreter.persist(&timetable) {
                    eprintln!("❌ {}", note);
                }
                break;
            }
            Err(e) => {
                tracing::debug!("Command failed ({:?}): {}", e.category(), e);
                interpreter.resolver_mut().print(&e.user_friendly_message())?;
            }
        }
    }

    tracing::info!("course-planner stopped");
    Ok(())
}
