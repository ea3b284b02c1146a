//! Debug and feature flags.
//!
//! Every flag is a reactive boolean with per-environment defaults. The
//! overlay's menu renders one checkbox per flag; other parts of the app read
//! or subscribe to the flags they care about.

use easel_engine::reactive::{Atom, Subscription};

use crate::config::Environment;
use crate::error::{DebugError, DebugResult};

/// Name of the flag that mounts the FPS meter.
pub const SHOW_FPS: &str = "showFps";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlagGroup {
    Debug,
    Feature,
}

/// Default value per environment, falling back to `all`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlagDefaults {
    pub all: bool,
    pub development: Option<bool>,
    pub staging: Option<bool>,
    pub production: Option<bool>,
}

impl FlagDefaults {
    pub const fn all(value: bool) -> Self {
        Self { all: value, development: None, staging: None, production: None }
    }

    pub const fn development(mut self, value: bool) -> Self {
        self.development = Some(value);
        self
    }

    pub const fn staging(mut self, value: bool) -> Self {
        self.staging = Some(value);
        self
    }

    pub const fn production(mut self, value: bool) -> Self {
        self.production = Some(value);
        self
    }

    pub fn resolve(&self, env: Environment) -> bool {
        let specific = match env {
            Environment::Development => self.development,
            Environment::Staging => self.staging,
            Environment::Production => self.production,
        };
        specific.unwrap_or(self.all)
    }
}

/// Built-in debug flags, in menu order.
pub const DEBUG_FLAGS: &[(&str, FlagDefaults)] = &[
    ("logPreventDefaults", FlagDefaults::all(false)),
    ("logPointerCaptures", FlagDefaults::all(false)),
    ("logElementRemoves", FlagDefaults::all(false)),
    ("debugSvg", FlagDefaults::all(false)),
    (SHOW_FPS, FlagDefaults::all(false).development(true)),
    ("measurePerformance", FlagDefaults::all(false)),
    ("throwToBlob", FlagDefaults::all(false)),
    ("reconnectOnPing", FlagDefaults::all(false)),
    ("debugCursors", FlagDefaults::all(false)),
    ("forceSrgb", FlagDefaults::all(false)),
    ("debugGeometry", FlagDefaults::all(false)),
    ("hideShapes", FlagDefaults::all(false)),
    ("editOnType", FlagDefaults::all(false)),
];

/// Human label for a camelCase flag name: `debugSvg` becomes `Debug svg`.
pub fn flag_label(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for c in name.chars() {
        if c.is_uppercase() {
            if !out.is_empty() {
                out.push(' ');
            }
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
    }

    let mut chars = out.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => out,
    }
}

/// One named flag. Clones share the same value.
#[derive(Clone)]
pub struct DebugFlag {
    name: String,
    group: FlagGroup,
    defaults: FlagDefaults,
    value: Atom<bool>,
}

impl DebugFlag {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> String {
        flag_label(&self.name)
    }

    pub fn group(&self) -> FlagGroup {
        self.group
    }

    pub fn defaults(&self) -> FlagDefaults {
        self.defaults
    }

    pub fn get(&self) -> bool {
        self.value.get()
    }

    /// Returns `true` when the value changed.
    pub fn set(&self, value: bool) -> bool {
        let changed = self.value.set(value);
        if changed {
            log::debug!("flag {} = {value}", self.name);
        }
        changed
    }

    /// Flips the flag and returns the new value.
    pub fn toggle(&self) -> bool {
        let next = !self.get();
        self.set(next);
        next
    }

    pub fn reset(&self, env: Environment) {
        self.set(self.defaults.resolve(env));
    }

    pub fn subscribe(&self, listener: impl Fn(bool) + 'static) -> Subscription {
        self.value.subscribe(move |v| listener(*v))
    }
}

impl std::fmt::Debug for DebugFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DebugFlag")
            .field("name", &self.name)
            .field("group", &self.group)
            .field("value", &self.get())
            .finish()
    }
}

/// Ordered set of flags for one environment.
#[derive(Debug, Clone)]
pub struct FlagRegistry {
    environment: Environment,
    flags: Vec<DebugFlag>,
}

impl FlagRegistry {
    /// Empty registry.
    pub fn new(environment: Environment) -> Self {
        Self { environment, flags: Vec::new() }
    }

    /// Registry holding the built-in debug flags and no feature flags.
    pub fn with_debug_flags(environment: Environment) -> Self {
        let mut registry = Self::new(environment);
        for (name, defaults) in DEBUG_FLAGS {
            registry.register(name, FlagGroup::Debug, *defaults);
        }
        registry
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Adds a flag initialised to its default. Registering an existing name
    /// returns the existing flag unchanged.
    pub fn register(&mut self, name: &str, group: FlagGroup, defaults: FlagDefaults) -> DebugFlag {
        if let Some(existing) = self.flags.iter().find(|f| f.name == name) {
            log::warn!("flag {name} registered twice; keeping the first");
            return existing.clone();
        }
        let flag = DebugFlag {
            name: name.to_string(),
            group,
            defaults,
            value: Atom::new(defaults.resolve(self.environment)),
        };
        self.flags.push(flag.clone());
        flag
    }

    pub fn register_feature(&mut self, name: &str, defaults: FlagDefaults) -> DebugFlag {
        self.register(name, FlagGroup::Feature, defaults)
    }

    pub fn lookup(&self, name: &str) -> DebugResult<&DebugFlag> {
        self.flags
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| DebugError::UnknownFlag(name.to_string()))
    }

    pub fn get(&self, name: &str) -> DebugResult<bool> {
        Ok(self.lookup(name)?.get())
    }

    pub fn set(&self, name: &str, value: bool) -> DebugResult<bool> {
        Ok(self.lookup(name)?.set(value))
    }

    pub fn toggle(&self, name: &str) -> DebugResult<bool> {
        Ok(self.lookup(name)?.toggle())
    }

    pub fn subscribe(&self, name: &str, listener: impl Fn(bool) + 'static) -> DebugResult<Subscription> {
        Ok(self.lookup(name)?.subscribe(listener))
    }

    /// Restores every flag to its default for this registry's environment.
    pub fn reset_all(&self) {
        for flag in &self.flags {
            flag.reset(self.environment);
        }
    }

    pub fn debug_flags(&self) -> impl Iterator<Item = &DebugFlag> {
        self.flags.iter().filter(|f| f.group == FlagGroup::Debug)
    }

    pub fn feature_flags(&self) -> impl Iterator<Item = &DebugFlag> {
        self.flags.iter().filter(|f| f.group == FlagGroup::Feature)
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn labels() {
        assert_eq!(flag_label("debugSvg"), "Debug svg");
        assert_eq!(flag_label("logPreventDefaults"), "Log prevent defaults");
        assert_eq!(flag_label("showFps"), "Show fps");
        assert_eq!(flag_label("hideShapes"), "Hide shapes");
        assert_eq!(flag_label(""), "");
    }

    #[test]
    fn show_fps_defaults_by_environment() {
        let dev = FlagRegistry::with_debug_flags(Environment::Development);
        let prod = FlagRegistry::with_debug_flags(Environment::Production);
        assert_eq!(dev.get(SHOW_FPS), Ok(true));
        assert_eq!(prod.get(SHOW_FPS), Ok(false));
        assert_eq!(dev.get("debugSvg"), Ok(false));
        assert_eq!(dev.debug_flags().count(), DEBUG_FLAGS.len());
        assert_eq!(dev.feature_flags().count(), 0);
    }

    #[test]
    fn unknown_flag() {
        let reg = FlagRegistry::with_debug_flags(Environment::Development);
        assert_eq!(reg.get("nope"), Err(DebugError::UnknownFlag("nope".into())));
        assert!(reg.toggle("nope").is_err());
    }

    #[test]
    fn toggle_notifies_and_reset_restores() {
        let reg = FlagRegistry::with_debug_flags(Environment::Development);
        let seen = Rc::new(Cell::new(0));
        let s = seen.clone();
        let _sub = reg.subscribe("debugGeometry", move |_| s.set(s.get() + 1)).unwrap();

        assert_eq!(reg.toggle("debugGeometry"), Ok(true));
        reg.set(SHOW_FPS, false).unwrap();
        assert_eq!(seen.get(), 1);

        reg.reset_all();
        assert_eq!(reg.get("debugGeometry"), Ok(false));
        assert_eq!(reg.get(SHOW_FPS), Ok(true));
        assert_eq!(seen.get(), 2);
    }

    #[test]
    fn feature_flags_and_duplicates() {
        let mut reg = FlagRegistry::with_debug_flags(Environment::Staging);
        let a = reg.register_feature("newArrows", FlagDefaults::all(false).staging(true));
        assert!(a.get());
        a.set(false);
        let again = reg.register_feature("newArrows", FlagDefaults::all(true));
        assert!(!again.get());
        assert_eq!(reg.feature_flags().map(|f| f.label()).collect::<Vec<_>>(), vec!["New arrows"]);
    }
}
