//! Boolean `terraform fmt` options and their command-line rendering.

use indexmap::IndexMap;
use std::fmt;
use std::str::FromStr;

/// A `terraform fmt` option this crate knows how to pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flag {
    Diff,
    Write,
    Check,
    Recursive,
}

impl Flag {
    pub fn as_str(self) -> &'static str {
        match self {
            Flag::Diff => "diff",
            Flag::Write => "write",
            Flag::Check => "check",
            Flag::Recursive => "recursive",
        }
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Flag {
    type Err = FlagParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "diff" => Ok(Flag::Diff),
            "write" => Ok(Flag::Write),
            "check" => Ok(Flag::Check),
            "recursive" => Ok(Flag::Recursive),
            other => Err(FlagParseError::UnknownFlag(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlagParseError {
    #[error("Unknown flag '{0}'")]
    UnknownFlag(String),

    #[error("Malformed flag token '{0}', expected -name=true|false")]
    MalformedToken(String),
}

/// Insertion-ordered set of boolean flags.
///
/// Setting a flag that is already present replaces its value in place, so the
/// rendered order is the order in which each flag was first set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSet {
    flags: IndexMap<Flag, bool>,
}

impl FlagSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Base flags for a `diff`/`write` option pair. `check` is always `!write`.
    pub fn from_options(diff: bool, write: bool) -> Self {
        let mut flags = Self::new();
        flags.set(Flag::Diff, diff);
        flags.set(Flag::Write, write);
        flags.set(Flag::Check, !write);
        flags
    }

    pub fn set(&mut self, flag: Flag, value: bool) -> &mut Self {
        self.flags.insert(flag, value);
        self
    }

    pub fn with(mut self, flag: Flag, value: bool) -> Self {
        self.set(flag, value);
        self
    }

    pub fn get(&self, flag: Flag) -> Option<bool> {
        self.flags.get(&flag).copied()
    }

    pub fn contains(&self, flag: Flag) -> bool {
        self.flags.contains_key(&flag)
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Flag, bool)> + '_ {
        self.flags.iter().map(|(flag, value)| (*flag, *value))
    }

    /// Overlay `other` onto a copy of `self`.
    pub fn merged(&self, other: &FlagSet) -> FlagSet {
        let mut merged = self.clone();
        for (flag, value) in other.iter() {
            merged.set(flag, value);
        }
        merged
    }

    /// Render as `-name=value` tokens, e.g. `{diff: true}` -> `["-diff=true"]`.
    pub fn to_args(&self) -> Vec<String> {
        self.iter().map(|(flag, value)| format!("-{flag}={value}")).collect()
    }

    /// Parse tokens produced by [`FlagSet::to_args`].
    pub fn parse_args<S: AsRef<str>>(tokens: &[S]) -> Result<FlagSet, FlagParseError> {
        let mut flags = FlagSet::new();
        for token in tokens {
            let token = token.as_ref();
            let (name, value) = token
                .strip_prefix('-')
                .and_then(|rest| rest.split_once('='))
                .ok_or_else(|| FlagParseError::MalformedToken(token.to_string()))?;
            let value: bool = value
                .parse()
                .map_err(|_| FlagParseError::MalformedToken(token.to_string()))?;
            flags.set(name.parse()?, value);
        }
        Ok(flags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_set_renders_nothing() {
        assert!(FlagSet::new().to_args().is_empty());
    }

    #[test]
    fn test_render_preserves_insertion_order() {
        let flags = FlagSet::new().with(Flag::Write, false).with(Flag::Diff, true);
        assert_eq!(flags.to_args(), vec!["-write=false", "-diff=true"]);
    }

    #[test]
    fn test_write_disables_check() {
        let flags = FlagSet::from_options(true, true);
        assert_eq!(flags.get(Flag::Write), Some(true));
        assert_eq!(flags.get(Flag::Check), Some(false));
        assert_eq!(flags.to_args(), vec!["-diff=true", "-write=true", "-check=false"]);
    }

    #[test]
    fn test_no_write_enables_check() {
        let flags = FlagSet::from_options(false, false);
        assert_eq!(flags.get(Flag::Check), Some(true));
        assert_eq!(flags.to_args(), vec!["-diff=false", "-write=false", "-check=true"]);
    }

    #[test]
    fn test_merge_overrides_in_place_and_appends() {
        let base = FlagSet::from_options(true, false);
        let extra = FlagSet::new().with(Flag::Recursive, true).with(Flag::Diff, false);

        let merged = base.merged(&extra);
        assert_eq!(
            merged.to_args(),
            vec!["-diff=false", "-write=false", "-check=true", "-recursive=true"]
        );
        // the base set is untouched
        assert!(!base.contains(Flag::Recursive));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(
            FlagSet::parse_args(&["diff=true"]),
            Err(FlagParseError::MalformedToken("diff=true".to_string()))
        );
        assert_eq!(
            FlagSet::parse_args(&["-diff=yes"]),
            Err(FlagParseError::MalformedToken("-diff=yes".to_string()))
        );
        assert_eq!(
            FlagSet::parse_args(&["-debug=true"]),
            Err(FlagParseError::UnknownFlag("debug".to_string()))
        );
    }

    fn flag_strategy() -> impl Strategy<Value = Flag> {
        prop_oneof![
            Just(Flag::Diff),
            Just(Flag::Write),
            Just(Flag::Check),
            Just(Flag::Recursive),
        ]
    }

    proptest! {
        #[test]
        fn prop_render_then_parse_reconstructs(pairs in proptest::collection::vec((flag_strategy(), any::<bool>()), 0..8)) {
            let mut flags = FlagSet::new();
            for (flag, value) in pairs {
                flags.set(flag, value);
            }

            let args = flags.to_args();
            prop_assert_eq!(args.len(), flags.len());
            let parsed = FlagSet::parse_args(args.as_slice()).unwrap();
            prop_assert_eq!(parsed.to_args(), args);
            prop_assert_eq!(parsed, flags);
        }

        #[test]
        fn prop_check_is_never_write(diff in any::<bool>(), write in any::<bool>()) {
            let flags = FlagSet::from_options(diff, write);
            prop_assert_eq!(flags.get(Flag::Check), Some(!write));
        }
    }
}
