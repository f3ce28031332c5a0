pub mod catalog;
pub mod flags;
pub mod interpreter;
pub mod persistence;
pub mod report;
pub mod templates;

#[cfg(test)]
pub(crate) mod testing;

pub use crate::domain::ports::{ConfigProvider, NameResolver, Storage};
pub use crate::utils::error::Result;
