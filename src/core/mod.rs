pub mod engine;
pub mod generator;
pub mod ignore;
pub mod packager;
pub mod render;
pub mod scanner;

pub use crate::domain::model::{EntryKind, OutputFormat, TreeEntry, TreeOutput, TreeStats};
pub use crate::domain::ports::{Compiler, Storage, TreeRenderer};
pub use crate::utils::error::Result;
