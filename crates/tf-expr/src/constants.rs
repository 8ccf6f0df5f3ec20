//! Named numeric constants referenced by term expressions.

use std::collections::BTreeMap;

use tf_core::Real;
use tracing::warn;

use crate::error::{ConstantError, ConstantResult};
use crate::lexer::is_identifier;

/// Mapping from constant name to value.
///
/// The key set is fixed once the table is built from a specification:
/// [`ConstantTable::set`] only overwrites existing entries. Iteration is in
/// name order, so every pass over the table is deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConstantTable {
    values: BTreeMap<String, Real>,
}

impl ConstantTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(name, value)` pairs.
    pub fn from_pairs<I, S>(pairs: I) -> ConstantResult<Self>
    where
        I: IntoIterator<Item = (S, Real)>,
        S: Into<String>,
    {
        let mut table = Self::new();
        for (name, value) in pairs {
            table.insert(name, value)?;
        }
        Ok(table)
    }

    /// Add a new constant while building the table.
    ///
    /// Rejects names that are not identifiers, non-finite values, and names
    /// already present.
    pub fn insert(&mut self, name: impl Into<String>, value: Real) -> ConstantResult<()> {
        let name = name.into();
        if !is_identifier(&name) {
            return Err(ConstantError::InvalidName { name });
        }
        if !value.is_finite() {
            return Err(ConstantError::NonFinite { name, value });
        }
        if self.values.contains_key(&name) {
            return Err(ConstantError::Duplicate { name });
        }
        self.values.insert(name, value);
        Ok(())
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, value: Real) -> ConstantResult<Self> {
        self.insert(name, value)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> ConstantResult<Real> {
        self.values
            .get(name)
            .copied()
            .ok_or_else(|| ConstantError::UnknownConstant {
                name: name.to_string(),
            })
    }

    /// Overwrite an existing constant and return its previous value.
    ///
    /// An unknown name leaves the table untouched and is reported as
    /// [`ConstantError::UnknownConstant`]; callers treat it as a warning.
    pub fn set(&mut self, name: &str, value: Real) -> ConstantResult<Real> {
        if !value.is_finite() {
            return Err(ConstantError::NonFinite {
                name: name.to_string(),
                value,
            });
        }
        match self.values.get_mut(name) {
            Some(slot) => Ok(std::mem::replace(slot, value)),
            None => {
                warn!(constant = name, "update ignored: constant not found");
                Err(ConstantError::UnknownConstant {
                    name: name.to_string(),
                })
            }
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Constants in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Real)> {
        self.values.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> ConstantTable {
        ConstantTable::from_pairs([("Kp", 2.0), ("Ti", 0.5)]).unwrap()
    }

    #[test]
    fn get_known_and_unknown() {
        let t = table();
        assert_eq!(t.get("Kp").unwrap(), 2.0);
        assert_eq!(
            t.get("Kd"),
            Err(ConstantError::UnknownConstant {
                name: "Kd".to_string()
            })
        );
    }

    #[test]
    fn set_overwrites_and_returns_previous() {
        let mut t = table();
        assert_eq!(t.set("Kp", 4.0).unwrap(), 2.0);
        assert_eq!(t.get("Kp").unwrap(), 4.0);
    }

    #[test]
    fn set_unknown_leaves_table_unchanged() {
        let mut t = table();
        let before = t.clone();
        let err = t.set("Kd", 1.0).unwrap_err();
        assert!(matches!(err, ConstantError::UnknownConstant { .. }));
        assert_eq!(t, before);
        assert!(!t.contains("Kd"));
    }

    #[test]
    fn set_rejects_non_finite() {
        let mut t = table();
        assert!(t.set("Kp", f64::NAN).is_err());
        assert_eq!(t.get("Kp").unwrap(), 2.0);
    }

    #[test]
    fn insert_validates() {
        let mut t = table();
        assert!(matches!(
            t.insert("2bad", 1.0),
            Err(ConstantError::InvalidName { .. })
        ));
        assert!(matches!(
            t.insert("x", f64::INFINITY),
            Err(ConstantError::NonFinite { .. })
        ));
        assert!(matches!(
            t.insert("Kp", 3.0),
            Err(ConstantError::Duplicate { .. })
        ));
        assert_eq!(t.len(), 2);
    }

    #[test]
    fn iteration_is_name_ordered() {
        let t = ConstantTable::new()
            .with("b", 1.0)
            .unwrap()
            .with("a", 2.0)
            .unwrap()
            .with("C", 3.0)
            .unwrap();
        let names: Vec<&str> = t.names().collect();
        assert_eq!(names, vec!["C", "a", "b"]);
    }
}
