pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use crate::adapters::{console::Console, scripted::ScriptedNameResolver};
pub use crate::config::{cli::LocalStorage, PlannerConfig};
#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::core::interpreter::{CommandInterpreter, Outcome};
pub use crate::domain::model::{Course, Grade, Timetable};
pub use crate::utils::error::{PlannerError, Result};
