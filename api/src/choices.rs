//! Lens selector choices

use crate::registry::*;

/// One entry of a host lens selector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LensChoice {
    /// Stable identifier stored by the host.
    pub id: String,

    /// Display name.
    pub name: String,

    /// Short description shown as a tooltip.
    pub description: String,
}

/// The ordered list of selector entries, built once the registry has loaded.
/// Entry `i` corresponds to `LensIndex` `i`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LensChoices {
    items: Vec<LensChoice>,
}

impl LensChoices {
    /// Build the choices for a registry.
    ///
    /// * `registry` - The lens registry.
    pub fn from_registry(registry: &Registry) -> Self {
        let items = registry
            .lenses()
            .iter()
            .map(|lens| LensChoice {
                id: lens.id().to_string(),
                name: lens.name().to_string(),
                description: format!("{}mm f/{}", lens.focal_length(), lens.max_f_number()),
            })
            .collect();
        Self { items }
    }

    /// Returns the entries in registry order.
    pub fn items(&self) -> &[LensChoice] {
        &self.items
    }

    /// Returns the entry at an index.
    ///
    /// * `index` - Lens index.
    pub fn get(&self, index: LensIndex) -> Option<&LensChoice> {
        self.items.get(index)
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there are no entries.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
