//! Theme registry
//!
//! Holds built-in collections and user-created custom themes. Ids are unique
//! across both sets. Built-ins keep their registration order, customs their
//! creation order.

use crate::theme::{CustomTheme, CustomThemePatch, ThemeCollection};
use crate::themes::builtin_themes;
use crate::validator::{ThemeValidator, ValidationReport, ValidatorConfig};
use chrono::Utc;
use indexmap::IndexMap;
use serde::Serialize;
use thiserror::Error;

/// Theme used when nothing else is selected
pub const DEFAULT_THEME_ID: &str = "dawn-mist";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("theme not found: {0}")]
    NotFound(String),

    #[error("custom theme '{id}' is invalid: {}", .errors.join("; "))]
    InvalidCustomTheme { id: String, errors: Vec<String> },

    #[error("custom theme '{id}' is based on unknown theme '{base}'")]
    UnknownBaseTheme { id: String, base: String },

    #[error("built-in theme '{0}' cannot be modified")]
    BuiltinImmutable(String),

    #[error("default theme is not registered")]
    DefaultMissing,

    #[error("theme id already registered: {0}")]
    DuplicateId(String),
}

pub type RegistryResult<T> = Result<T, RegistryError>;

/// A theme that failed [`ThemeRegistry::validate_all`]
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidTheme {
    pub id: String,
    pub errors: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub valid: Vec<String>,
    pub invalid: Vec<InvalidTheme>,
}

#[derive(Debug)]
struct CustomEntry {
    source: CustomTheme,
    resolved: ThemeCollection,
}

impl CustomEntry {
    fn new(source: CustomTheme) -> Self {
        let resolved = source.to_collection();
        Self { source, resolved }
    }
}

#[derive(Debug, Default)]
pub struct ThemeRegistry {
    builtins: IndexMap<String, ThemeCollection>,
    customs: IndexMap<String, CustomEntry>,
    validator: ThemeValidator,
}

impl ThemeRegistry {
    /// An empty registry
    pub fn new(validator_config: ValidatorConfig) -> Self {
        Self {
            builtins: IndexMap::new(),
            customs: IndexMap::new(),
            validator: ThemeValidator::new(validator_config),
        }
    }

    /// A registry preloaded with every built-in theme
    pub fn with_builtins(validator_config: ValidatorConfig) -> Self {
        let mut registry = Self::new(validator_config);
        for theme in builtin_themes() {
            if let Err(err) = registry.register(theme) {
                tracing::warn!(%err, "skipping built-in theme");
            }
        }
        registry
    }

    pub fn validator(&self) -> &ThemeValidator {
        &self.validator
    }

    fn contains(&self, id: &str) -> bool {
        self.builtins.contains_key(id) || self.customs.contains_key(id)
    }

    /// Register a built-in collection
    pub fn register(&mut self, theme: ThemeCollection) -> RegistryResult<()> {
        if self.contains(&theme.id) {
            return Err(RegistryError::DuplicateId(theme.id));
        }
        tracing::debug!(id = %theme.id, "registered theme");
        self.builtins.insert(theme.id.clone(), theme);
        Ok(())
    }

    fn check_custom(&self, theme: &CustomTheme) -> RegistryResult<()> {
        if !self.builtins.contains_key(&theme.base_theme_id) {
            return Err(RegistryError::UnknownBaseTheme {
                id: theme.id.clone(),
                base: theme.base_theme_id.clone(),
            });
        }
        let report = self.validator.validate_custom_theme(theme);
        if !report.is_valid {
            return Err(RegistryError::InvalidCustomTheme {
                id: theme.id.clone(),
                errors: report.errors,
            });
        }
        Ok(())
    }

    /// Validate and store a custom theme
    pub fn register_custom(&mut self, theme: CustomTheme) -> RegistryResult<&ThemeCollection> {
        if self.contains(&theme.id) {
            return Err(RegistryError::DuplicateId(theme.id));
        }
        self.check_custom(&theme)?;

        let id = theme.id.clone();
        tracing::info!(%id, base = %theme.base_theme_id, "registered custom theme");
        let entry = self.customs.entry(id).or_insert(CustomEntry::new(theme));
        Ok(&entry.resolved)
    }

    /// Apply a patch to a custom theme. The stored theme is untouched on error.
    pub fn update(&mut self, id: &str, patch: &CustomThemePatch) -> RegistryResult<&ThemeCollection> {
        if self.builtins.contains_key(id) {
            return Err(RegistryError::BuiltinImmutable(id.to_string()));
        }
        let current = self
            .customs
            .get(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;

        let mut updated = patch.apply(&current.source);
        updated.updated_at = Utc::now();
        self.check_custom(&updated)?;

        let entry = self
            .customs
            .get_mut(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
        *entry = CustomEntry::new(updated);
        tracing::debug!(%id, "updated custom theme");
        Ok(&entry.resolved)
    }

    /// Remove a custom theme. Built-ins are never removed.
    pub fn remove(&mut self, id: &str) -> bool {
        let removed = self.customs.shift_remove(id).is_some();
        if removed {
            tracing::debug!(%id, "removed custom theme");
        }
        removed
    }

    pub fn get(&self, id: &str) -> Option<&ThemeCollection> {
        self.builtins
            .get(id)
            .or_else(|| self.customs.get(id).map(|entry| &entry.resolved))
    }

    pub fn get_custom(&self, id: &str) -> Option<&CustomTheme> {
        self.customs.get(id).map(|entry| &entry.source)
    }

    pub fn is_builtin(&self, id: &str) -> bool {
        self.builtins.contains_key(id)
    }

    /// The theme for `id`, falling back to the default theme
    pub fn get_or_default(&self, id: &str) -> RegistryResult<&ThemeCollection> {
        match self.get(id) {
            Some(theme) => Ok(theme),
            None => {
                tracing::debug!(%id, "unknown theme, using default");
                self.default_theme()
            }
        }
    }

    pub fn default_theme(&self) -> RegistryResult<&ThemeCollection> {
        self.get(DEFAULT_THEME_ID).ok_or(RegistryError::DefaultMissing)
    }

    /// Built-ins first, then customs
    pub fn all(&self) -> impl Iterator<Item = &ThemeCollection> {
        self.builtins
            .values()
            .chain(self.customs())
    }

    pub fn builtins(&self) -> impl Iterator<Item = &ThemeCollection> {
        self.builtins.values()
    }

    /// Resolved collections of the custom themes
    pub fn customs(&self) -> impl Iterator<Item = &ThemeCollection> {
        self.customs.values().map(|entry| &entry.resolved)
    }

    /// Custom themes as stored, for persistence
    pub fn custom_themes(&self) -> impl Iterator<Item = &CustomTheme> {
        self.customs.values().map(|entry| &entry.source)
    }

    pub fn len(&self) -> usize {
        self.builtins.len() + self.customs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Re-register persisted custom themes, returning the ones rejected
    pub fn restore_customs(&mut self, themes: Vec<CustomTheme>) -> Vec<RegistryError> {
        let mut rejected = Vec::new();
        for theme in themes {
            if let Err(err) = self.register_custom(theme) {
                tracing::warn!(%err, "dropping persisted custom theme");
                rejected.push(err);
            }
        }
        rejected
    }

    pub fn validate(&self, id: &str) -> RegistryResult<ValidationReport> {
        if let Some(entry) = self.customs.get(id) {
            return Ok(self.validator.validate_custom_theme(&entry.source));
        }
        self.builtins
            .get(id)
            .map(|theme| self.validator.validate_theme_collection(theme))
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))
    }

    /// Validate every registered theme
    pub fn validate_all(&self) -> ValidationSummary {
        let mut summary = ValidationSummary::default();
        let ids = self.builtins.keys().chain(self.customs.keys());
        for id in ids {
            match self.validate(id) {
                Ok(report) if report.is_valid => summary.valid.push(id.clone()),
                Ok(report) => summary.invalid.push(InvalidTheme {
                    id: id.clone(),
                    errors: report.errors,
                }),
                Err(err) => summary.invalid.push(InvalidTheme {
                    id: id.clone(),
                    errors: vec![err.to_string()],
                }),
            }
        }
        summary
    }

    /// Case-insensitive match on name or description
    pub fn search(&self, query: &str) -> Vec<&ThemeCollection> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.all().collect();
        }
        self.all()
            .filter(|theme| {
                theme.name.to_lowercase().contains(&needle) || theme.description.to_lowercase().contains(&needle)
            })
            .collect()
    }
}
