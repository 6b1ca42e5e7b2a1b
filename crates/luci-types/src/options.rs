//! The option map of a single UCI section.

use std::collections::HashMap;
use std::collections::hash_map;

use serde::{Deserialize, Serialize};

use crate::error::{OptionError, OptionNotFoundError};
use crate::option::UciOption;

/// Metadata key holding the section name.
pub const NAME_KEY: &str = ".name";

/// Metadata key holding the section type.
pub const TYPE_KEY: &str = ".type";

/// Metadata key reporting whether the section is anonymous.
pub const ANONYMOUS_KEY: &str = ".anonymous";

/// Options keyed by name, including `.`-prefixed metadata keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Options(HashMap<String, UciOption>);

impl Options {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an option, returning the previous value for that key.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<UciOption>,
    ) -> Option<UciOption> {
        self.0.insert(key.into(), value.into())
    }

    /// Builder-style [`Options::insert`].
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<UciOption>) -> Self {
        self.insert(key, value);
        self
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&UciOption> {
        self.0.get(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<UciOption> {
        self.0.remove(key)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Snapshot of the current keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.0.keys().cloned().collect();
        keys.sort();
        keys
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> hash_map::Iter<'_, String, UciOption> {
        self.0.iter()
    }

    fn lookup(&self, key: &str) -> Result<&UciOption, OptionNotFoundError> {
        self.0.get(key).ok_or_else(|| OptionNotFoundError {
            option: key.to_string(),
            available_options: self.keys(),
        })
    }

    /// # Errors
    ///
    /// [`OptionError::NotFound`] if `key` is absent, [`OptionError::TypeMismatch`]
    /// if its value is not a boolean.
    pub fn get_boolean(&self, key: &str) -> Result<bool, OptionError> {
        Ok(self.lookup(key)?.as_boolean()?)
    }

    /// # Errors
    ///
    /// [`OptionError::NotFound`] if `key` is absent, [`OptionError::TypeMismatch`]
    /// if its value does not coerce to an integer.
    pub fn get_integer(&self, key: &str) -> Result<i64, OptionError> {
        Ok(self.lookup(key)?.as_integer()?)
    }

    /// # Errors
    ///
    /// [`OptionError::NotFound`] if `key` is absent, [`OptionError::TypeMismatch`]
    /// if its value is not a list.
    pub fn get_list_string(&self, key: &str) -> Result<Vec<String>, OptionError> {
        Ok(self.lookup(key)?.as_list_string()?)
    }

    /// # Errors
    ///
    /// [`OptionError::NotFound`] if `key` is absent, [`OptionError::TypeMismatch`]
    /// if its value does not coerce to a string.
    pub fn get_string(&self, key: &str) -> Result<String, OptionError> {
        Ok(self.lookup(key)?.as_string()?)
    }

    /// The `.name` metadata of a fetched section.
    ///
    /// # Errors
    ///
    /// Same as [`Options::get_string`].
    pub fn section_name(&self) -> Result<String, OptionError> {
        self.get_string(NAME_KEY)
    }

    /// The `.type` metadata of a fetched section.
    ///
    /// # Errors
    ///
    /// Same as [`Options::get_string`].
    pub fn section_type(&self) -> Result<String, OptionError> {
        self.get_string(TYPE_KEY)
    }

    /// The `.anonymous` metadata of a fetched section.
    ///
    /// # Errors
    ///
    /// Same as [`Options::get_boolean`].
    pub fn is_anonymous(&self) -> Result<bool, OptionError> {
        self.get_boolean(ANONYMOUS_KEY)
    }

    /// Copy of these options without the `.`-prefixed metadata keys.
    #[must_use]
    pub fn without_metadata(&self) -> Self {
        self.0
            .iter()
            .filter(|(key, _)| !key.starts_with('.'))
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for Options
where
    K: Into<String>,
    V: Into<UciOption>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl<K, V> Extend<(K, V)> for Options
where
    K: Into<String>,
    V: Into<UciOption>,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl IntoIterator for Options {
    type Item = (String, UciOption);
    type IntoIter = hash_map::IntoIter<String, UciOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Options {
    type Item = (&'a String, &'a UciOption);
    type IntoIter = hash_map::Iter<'a, String, UciOption>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
