//! create-c-t: scaffold React and Vue 3 starter projects from templates
//!
//! The flow is linear: ask for a name, language and framework, resolve the
//! template, copy it into a new directory, patch `package.json`, and print
//! the commands to run next.

#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![warn(clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

pub mod commands;
pub mod config;
pub mod error;
pub mod materialize;
pub mod observability;
pub mod package;
pub mod prompt;
pub mod report;
pub mod templates;

pub use commands::{Invocation, NewCommand, NewOptions, Outcome, Summary};
pub use config::ScaffolderConfig;
pub use error::{Result, ScaffoldError};
pub use prompt::{Presets, Prompter, Selection, TerminalPrompter};
pub use templates::{Framework, Language, TemplateKey, TemplateRegistry};
