//! Lens registry

use crate::error::*;
use optics::{load_all, LoadError, Prescription};
use std::collections::HashMap;
use std::path::Path;

/// Position of a lens in the registry. This is the `lens_type` value the
/// shader switches on.
pub type LensIndex = usize;

/// An immutable, ordered set of validated prescriptions. A registry always
/// holds at least one lens; the first one is the fallback for unknown keys.
#[derive(Clone, Debug)]
pub struct Registry {
    /// Prescriptions in order.
    lenses: Vec<Prescription>,

    /// Maps identifiers to indices.
    index: HashMap<String, LensIndex>,
}

impl Registry {
    /// Build a registry from prescriptions, keeping their order.
    ///
    /// * `lenses` - Prescriptions with unique identifiers.
    pub fn new(lenses: Vec<Prescription>) -> Result<Self, ApiError> {
        if lenses.is_empty() {
            return Err(ApiError::NoLenses);
        }

        let mut index = HashMap::with_capacity(lenses.len());
        for (i, lens) in lenses.iter().enumerate() {
            if index.insert(lens.id().to_string(), i).is_some() {
                return Err(ApiError::DuplicateId(lens.id().to_string()));
            }
        }

        Ok(Self { lenses, index })
    }

    /// Load every lens in a directory. The whole load fails on the first
    /// invalid record or when the directory has no lenses.
    ///
    /// * `lens_dir` - Directory containing `.toml` lens files.
    pub fn load(lens_dir: &Path) -> Result<Self, ApiError> {
        let lenses = load_all(lens_dir)?;
        if lenses.is_empty() {
            return Err(LoadError::Empty {
                path: lens_dir.to_path_buf(),
            }
            .into());
        }
        Self::new(lenses)
    }

    /// Returns the prescriptions in order.
    pub fn lenses(&self) -> &[Prescription] {
        &self.lenses
    }

    /// Returns the number of lenses.
    pub fn len(&self) -> usize {
        self.lenses.len()
    }

    /// Returns true if the registry has no lenses.
    pub fn is_empty(&self) -> bool {
        self.lenses.is_empty()
    }

    /// Returns the lens with the given identifier.
    ///
    /// * `id` - Source identifier.
    pub fn get(&self, id: &str) -> Option<&Prescription> {
        self.index_of(id).map(|i| &self.lenses[i])
    }

    /// Returns the index of the lens with the given identifier.
    ///
    /// * `id` - Source identifier.
    pub fn index_of(&self, id: &str) -> Option<LensIndex> {
        self.index.get(id).copied()
    }

    /// Returns the lens at an index, falling back to the first lens when the
    /// index is out of range.
    ///
    /// * `index` - Lens index.
    pub fn lens(&self, index: LensIndex) -> &Prescription {
        self.lenses.get(index).unwrap_or(self.default_lens())
    }

    /// Returns the fallback lens.
    pub fn default_lens(&self) -> &Prescription {
        &self.lenses[0]
    }

    /// Resolve a host selection key to a lens index: an identifier match
    /// wins, then a decimal index in range, and anything else selects the
    /// first lens.
    ///
    /// * `key` - Identifier or decimal index.
    pub fn resolve(&self, key: &str) -> LensIndex {
        if let Some(i) = self.index_of(key) {
            return i;
        }
        if !key.is_empty() && key.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(i) = key.parse::<LensIndex>() {
                if i < self.lenses.len() {
                    return i;
                }
            }
        }
        debug!("Unknown lens '{key}', using '{}'", self.default_lens().id());
        0
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
