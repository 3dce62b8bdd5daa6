//! Command-line option registry with typed settings and boolean flags.
//!
//! This crate provides a small, fail-fast argument parser for short-lived
//! CLI programs:
//!
//! - [`Registry`] — owns registered settings and flags plus the hint text
//!   shown when the command line is rejected.
//! - [`SettingValue`] / [`ValueKind`] — the closed set of value kinds a
//!   setting can hold (`int`, `float`, `double`, `char`, `string`).
//! - [`OptionError`] — every registration, processing and query failure.
//!
//! Settings are matched by exact name and take the following token as their
//! value (`height 5.2`); flags are matched by exact name and take no value
//! (`--smart`). Processing returns a typed error, and only the outermost
//! caller decides to terminate, e.g. with [`Registry::process_or_exit`].
//!
//! # Example
//!
//! ```
//! use clom_core::*;
//!
//! let mut registry = Registry::new().with_hint("usage: demo [name NAME] [--smart]");
//! registry.register_setting("name", "Mr X").unwrap();
//! registry.register_flag("--smart").unwrap();
//!
//! let err = registry.process(["demo", "--dumb"]).unwrap_err();
//! assert_eq!(err, OptionError::UnknownOption("--dumb".into()));
//! assert!(err.is_usage_error());
//!
//! registry.process(["demo", "--smart"]).unwrap();
//! assert!(registry.is_flag_set("--smart").unwrap());
//! assert_eq!(registry.get_setting_value::<String>("name").unwrap(), "Mr X");
//! ```

mod error;
mod registry;
mod value;

pub use error::{OptionError, Result};
pub use registry::{DEFAULT_USER_HINT, Flag, Registry, Setting};
pub use value::{SettingType, SettingValue, ValueKind};
