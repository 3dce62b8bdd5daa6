//! The option registry and its argument processor.
//!
//! A [`Registry`] owns the registered settings and flags together with the
//! hint text shown when the command line is rejected. Hosts register
//! options, call [`Registry::process`] once with the process arguments and
//! then read values back with the typed getters.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::{OptionError, SettingType, SettingValue, ValueKind};

/// Hint shown when no custom hint has been set.
pub const DEFAULT_USER_HINT: &str = "Invalid command line options!";

/// A named, typed value sourced from the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    /// Exact, case-sensitive name matched against argument tokens.
    pub name: String,
    /// Current value; its kind is fixed at registration.
    pub value: SettingValue,
}

impl Setting {
    /// Kind fixed at registration.
    pub fn kind(&self) -> ValueKind {
        self.value.kind()
    }
}

/// A named boolean toggle that can only be switched on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    /// Exact, case-sensitive name, conventionally `--` prefixed.
    pub name: String,
    /// Whether the flag appeared on the command line.
    pub is_set: bool,
}

/// Registry of settings and flags.
///
/// # Examples
///
/// ```
/// use clom_core::Registry;
///
/// let mut registry = Registry::new();
/// registry.register_setting("name", "Mr X").unwrap();
/// registry.register_setting("height", 6.0f32).unwrap();
/// registry.register_flag("--smart").unwrap();
///
/// registry
///     .process(["prog", "name", "Mark", "height", "5.2", "--smart"])
///     .unwrap();
///
/// assert_eq!(registry.get_setting_value::<String>("name").unwrap(), "Mark");
/// assert_eq!(registry.get_setting_value::<f32>("height").unwrap(), 5.2);
/// assert!(registry.is_flag_set("--smart").unwrap());
/// ```
///
/// Deserialization re-registers every entry, so a serialized registry with
/// duplicate or colliding names is rejected with the same [`OptionError`]
/// registration would return.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRegistry")]
pub struct Registry {
    settings: Vec<Setting>,
    flags: Vec<Flag>,
    user_hint: String,
}

/// Unchecked mirror of [`Registry`] used as the deserialization source.
#[derive(Deserialize)]
struct RawRegistry {
    settings: Vec<Setting>,
    flags: Vec<Flag>,
    user_hint: String,
}

impl TryFrom<RawRegistry> for Registry {
    type Error = OptionError;

    fn try_from(raw: RawRegistry) -> Result<Self> {
        let mut registry = Registry::new().with_hint(raw.user_hint);
        for setting in raw.settings {
            registry.register_setting_value(setting.name, setting.value)?;
        }
        for flag in raw.flags {
            registry.register_flag(flag.name)?;
            if flag.is_set {
                if let Some(last) = registry.flags.last_mut() {
                    last.is_set = true;
                }
            }
        }
        Ok(registry)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Creates an empty registry with the default hint.
    pub fn new() -> Self {
        Self {
            settings: Vec::new(),
            flags: Vec::new(),
            user_hint: DEFAULT_USER_HINT.to_string(),
        }
    }

    /// Replaces the hint, builder style.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.user_hint = hint.into();
        self
    }

    /// Registers a setting whose kind is fixed by the type of `default`.
    ///
    /// Accepts `i32`, `f32`, `f64`, `char`, `String` and `&str`.
    ///
    /// # Errors
    ///
    /// [`OptionError::DuplicateSetting`] if `name` is already a setting,
    /// [`OptionError::NameCollision`] if it is already a flag.
    pub fn register_setting(
        &mut self,
        name: impl Into<String>,
        default: impl Into<SettingValue>,
    ) -> Result<()> {
        self.register_setting_value(name, default.into())
    }

    /// Registers a setting from an already-built [`SettingValue`].
    pub fn register_setting_value(
        &mut self,
        name: impl Into<String>,
        default: SettingValue,
    ) -> Result<()> {
        let name = name.into();
        if self.find_setting(&name).is_some() {
            return Err(OptionError::DuplicateSetting(name));
        }
        if self.find_flag(&name).is_some() {
            return Err(OptionError::NameCollision(name));
        }

        debug!(setting = %name, kind = %default.kind(), default = %default, "registered setting");
        self.settings.push(Setting {
            name,
            value: default,
        });
        Ok(())
    }

    /// Registers a setting from a kind name and a textual default.
    ///
    /// The default is parsed with the same rules as command-line values.
    ///
    /// # Examples
    ///
    /// ```
    /// use clom_core::{OptionError, Registry};
    ///
    /// let mut registry = Registry::new();
    /// registry.register_setting_parsed("retries", "int", "3").unwrap();
    /// assert_eq!(registry.get_setting_value::<i32>("retries").unwrap(), 3);
    ///
    /// let err = registry.register_setting_parsed("size", "u128", "1").unwrap_err();
    /// assert_eq!(err, OptionError::UnsupportedKind("u128".into()));
    /// ```
    pub fn register_setting_parsed(
        &mut self,
        name: impl Into<String>,
        kind: &str,
        default: &str,
    ) -> Result<()> {
        let name = name.into();
        let kind: ValueKind = kind.parse()?;
        let value = SettingValue::parse(kind, default).ok_or_else(|| OptionError::InvalidValue {
            setting: name.clone(),
            value: default.to_string(),
            expected: kind,
        })?;
        self.register_setting_value(name, value)
    }

    /// Registers a flag, initially unset.
    ///
    /// # Errors
    ///
    /// [`OptionError::DuplicateFlag`] if `name` is already a flag,
    /// [`OptionError::NameCollision`] if it is already a setting.
    pub fn register_flag(&mut self, name: impl Into<String>) -> Result<()> {
        let name = name.into();
        if self.find_flag(&name).is_some() {
            return Err(OptionError::DuplicateFlag(name));
        }
        if self.find_setting(&name).is_some() {
            return Err(OptionError::NameCollision(name));
        }

        debug!(flag = %name, "registered flag");
        self.flags.push(Flag {
            name,
            is_set: false,
        });
        Ok(())
    }

    /// Replaces the hint shown alongside processing errors.
    pub fn set_user_hint(&mut self, hint: impl Into<String>) {
        self.user_hint = hint.into();
    }

    /// Hint shown alongside processing errors.
    pub fn user_hint(&self) -> &str {
        &self.user_hint
    }

    /// Processes a full argument vector. Element 0 (the program name) is
    /// skipped.
    ///
    /// Tokens are consumed left to right. A setting name consumes the next
    /// token as its value, a flag name consumes only itself. Processing
    /// stops at the first error; values applied before it stay applied.
    ///
    /// # Errors
    ///
    /// [`OptionError::UnknownOption`], [`OptionError::MissingValue`] or
    /// [`OptionError::InvalidValue`].
    pub fn process<I, S>(&mut self, args: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args: Vec<S> = args.into_iter().collect();
        let result = self.process_tokens(&args);
        if let Err(err) = &result {
            debug!(error = %err, "rejected command line");
        }
        result
    }

    /// Processes the arguments of the current process.
    pub fn process_env(&mut self) -> Result<()> {
        self.process(std::env::args())
    }

    /// Processes `args`; on error prints the diagnostic and the hint to
    /// stdout and exits the process with status 1.
    ///
    /// Intended for the outermost caller of a short-lived CLI program.
    pub fn process_or_exit<I, S>(&mut self, args: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        if let Err(err) = self.process(args) {
            self.exit_with(&err);
        }
    }

    /// Like [`process_or_exit`](Self::process_or_exit), over the arguments
    /// of the current process.
    pub fn process_env_or_exit(&mut self) {
        if let Err(err) = self.process_env() {
            self.exit_with(&err);
        }
    }

    /// Writes the diagnostic for `err` followed by the hint.
    ///
    /// # Examples
    ///
    /// ```
    /// use clom_core::{OptionError, Registry};
    ///
    /// let registry = Registry::new().with_hint("usage: prog [name NAME]");
    /// let mut out = Vec::new();
    /// registry
    ///     .report(&OptionError::UnknownOption("foo".into()), &mut out)
    ///     .unwrap();
    /// assert_eq!(
    ///     String::from_utf8(out).unwrap(),
    ///     "Unknown option: foo\nusage: prog [name NAME]\n"
    /// );
    /// ```
    pub fn report<W: Write>(&self, err: &OptionError, out: &mut W) -> io::Result<()> {
        writeln!(out, "{err}")?;
        self.write_user_hint(out)
    }

    /// Prints the diagnostic and hint for `err` to stdout, then exits with
    /// status 1.
    pub fn exit_with(&self, err: &OptionError) -> ! {
        let stdout = io::stdout();
        let mut out = stdout.lock();
        let _ = self.report(err, &mut out);
        let _ = out.flush();
        std::process::exit(1);
    }

    /// Returns the current value of `name` as `T`.
    ///
    /// # Errors
    ///
    /// [`OptionError::UnregisteredSetting`] for an unknown name,
    /// [`OptionError::KindMismatch`] when `T` is not the registered kind.
    pub fn get_setting_value<T: SettingType>(&self, name: &str) -> Result<T> {
        let setting = self
            .find_setting(name)
            .ok_or_else(|| OptionError::UnregisteredSetting(name.to_string()))?;

        T::from_value(&setting.value).ok_or_else(|| OptionError::KindMismatch {
            setting: name.to_string(),
            registered: setting.kind(),
            requested: T::KIND,
        })
    }

    /// Looks up a setting without fixing the requested kind.
    pub fn setting(&self, name: &str) -> Option<&Setting> {
        self.find_setting(name)
    }

    /// Returns whether `name` appeared on the command line.
    ///
    /// # Errors
    ///
    /// [`OptionError::UnregisteredFlag`] for an unknown name.
    pub fn is_flag_set(&self, name: &str) -> Result<bool> {
        self.find_flag(name)
            .map(|flag| flag.is_set)
            .ok_or_else(|| OptionError::UnregisteredFlag(name.to_string()))
    }

    /// Settings in registration order.
    pub fn settings(&self) -> impl Iterator<Item = &Setting> {
        self.settings.iter()
    }

    /// Flags in registration order.
    pub fn flags(&self) -> impl Iterator<Item = &Flag> {
        self.flags.iter()
    }

    /// Prints the hint to stdout.
    pub fn print_user_hint(&self) {
        let stdout = io::stdout();
        let _ = self.write_user_hint(&mut stdout.lock());
    }

    /// Writes the hint and a trailing newline to `out`.
    pub fn write_user_hint<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", self.user_hint)
    }

    fn process_tokens<S: AsRef<str>>(&mut self, args: &[S]) -> Result<()> {
        let mut i = 1;
        while i < args.len() {
            let token = args[i].as_ref();

            if let Some(index) = self.settings.iter().position(|s| s.name == token) {
                let Some(raw) = args.get(i + 1).map(AsRef::as_ref) else {
                    return Err(OptionError::MissingValue {
                        setting: token.to_string(),
                    });
                };

                let setting = &mut self.settings[index];
                let kind = setting.kind();
                let value =
                    SettingValue::parse(kind, raw).ok_or_else(|| OptionError::InvalidValue {
                        setting: token.to_string(),
                        value: raw.to_string(),
                        expected: kind,
                    })?;

                debug!(setting = %token, value = %value, "applied setting");
                setting.value = value;
                i += 2;
            } else if let Some(flag) = self.flags.iter_mut().find(|f| f.name == token) {
                debug!(flag = %token, "set flag");
                flag.is_set = true;
                i += 1;
            } else {
                return Err(OptionError::UnknownOption(token.to_string()));
            }
        }

        Ok(())
    }

    fn find_setting(&self, name: &str) -> Option<&Setting> {
        self.settings.iter().find(|s| s.name == name)
    }

    fn find_flag(&self, name: &str) -> Option<&Flag> {
        self.flags.iter().find(|f| f.name == name)
    }
}
