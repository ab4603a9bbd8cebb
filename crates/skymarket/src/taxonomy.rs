//! Category and aircraft taxonomy tables.
//!
//! The tables are loaded once with the rest of the configuration and handed
//! to whatever needs them (listing creation forms, search filters). Nothing
//! mutates them after load.

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One entry in a taxonomy table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TaxonomyEntry {
    /// An entry that links to a browse page.
    Routed {
        /// Display name.
        name: String,
        /// Route of the browse page for this entry.
        target_route: String,
    },
    /// A bare name.
    Name(String),
}

impl TaxonomyEntry {
    /// Create a routed entry.
    #[must_use]
    pub fn routed(name: impl Into<String>, target_route: impl Into<String>) -> Self {
        Self::Routed {
            name: name.into(),
            target_route: target_route.into(),
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Routed { name, .. } | Self::Name(name) => name,
        }
    }

    /// Browse route, if the entry has one.
    #[must_use]
    pub fn target_route(&self) -> Option<&str> {
        match self {
            Self::Routed { target_route, .. } => Some(target_route),
            Self::Name(_) => None,
        }
    }
}

impl From<&str> for TaxonomyEntry {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

/// The full set of taxonomy tables.
///
/// When deserialized, omitted tables keep their built-in values. If
/// `manufacturers` is given without `models`, the built-in models are kept
/// only for the manufacturers that remain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "TaxonomyTables")]
pub struct Taxonomy {
    /// Top-level listing categories.
    pub categories: Vec<TaxonomyEntry>,
    /// Aircraft types (piston, jet, rotorcraft, ...).
    pub aircraft_types: Vec<TaxonomyEntry>,
    /// Aircraft manufacturers.
    pub manufacturers: Vec<TaxonomyEntry>,
    /// Model names keyed by manufacturer name.
    pub models: BTreeMap<String, Vec<String>>,
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Tables as written in configuration, each one optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct TaxonomyTables {
    categories: Option<Vec<TaxonomyEntry>>,
    aircraft_types: Option<Vec<TaxonomyEntry>>,
    manufacturers: Option<Vec<TaxonomyEntry>>,
    models: Option<BTreeMap<String, Vec<String>>>,
}

impl From<TaxonomyTables> for Taxonomy {
    fn from(tables: TaxonomyTables) -> Self {
        let mut taxonomy = Self::builtin();
        if let Some(categories) = tables.categories {
            taxonomy.categories = categories;
        }
        if let Some(aircraft_types) = tables.aircraft_types {
            taxonomy.aircraft_types = aircraft_types;
        }
        if let Some(manufacturers) = tables.manufacturers {
            taxonomy.manufacturers = manufacturers;
        }
        match tables.models {
            Some(models) => taxonomy.models = models,
            None => {
                let manufacturers = &taxonomy.manufacturers;
                taxonomy
                    .models
                    .retain(|make, _| find_by_name(manufacturers, make).is_some());
            }
        }
        taxonomy
    }
}

impl Taxonomy {
    /// The built-in aviation tables.
    #[must_use]
    pub fn builtin() -> Self {
        let categories = vec![
            TaxonomyEntry::routed("Aircraft", "/listings/aircraft"),
            TaxonomyEntry::routed("Engines & Parts", "/listings/engines-parts"),
            TaxonomyEntry::routed("Avionics", "/listings/avionics"),
            TaxonomyEntry::routed("Services", "/listings/services"),
            TaxonomyEntry::routed("Hangars", "/listings/hangars"),
            TaxonomyEntry::routed("Wanted", "/listings/wanted"),
        ];

        let aircraft_types = [
            "Single Engine Piston",
            "Multi Engine Piston",
            "Turboprop",
            "Jet",
            "Helicopter",
            "Light Sport",
            "Experimental",
            "Glider",
            "Amphibian",
            "Warbird",
            "Vintage",
        ]
        .into_iter()
        .map(TaxonomyEntry::from)
        .collect();

        let models: BTreeMap<String, Vec<String>> = [
            ("Beechcraft", &["Bonanza", "Baron", "King Air 350", "Musketeer"][..]),
            ("Cessna", &["152", "172 Skyhawk", "182 Skylane", "206 Stationair", "Citation CJ3"][..]),
            ("Cirrus", &["SR20", "SR22", "SR22T", "Vision SF50"][..]),
            ("Diamond", &["DA20", "DA40", "DA42", "DA62"][..]),
            ("Mooney", &["M20J", "M20K", "M20R Ovation"][..]),
            ("Piper", &["Cub", "Cherokee", "Archer", "Arrow", "Seneca", "Malibu"][..]),
            ("Pilatus", &["PC-12", "PC-24"][..]),
            ("Robinson", &["R22", "R44", "R66"][..]),
        ]
        .into_iter()
        .map(|(make, names)| {
            (
                make.to_string(),
                names.iter().map(ToString::to_string).collect(),
            )
        })
        .collect();

        let manufacturers = models.keys().map(|m| TaxonomyEntry::Name(m.clone())).collect();

        Self {
            categories,
            aircraft_types,
            manufacturers,
            models,
        }
    }

    /// Validate the configured tables and return a copy ready to inject.
    ///
    /// # Errors
    ///
    /// See [`Taxonomy::validate`].
    pub fn from_config(config: &crate::Config) -> Result<Self> {
        let taxonomy = config.taxonomy.clone().unwrap_or_else(Self::builtin);
        taxonomy.validate()?;
        Ok(taxonomy)
    }

    /// Check the tables are internally consistent.
    ///
    /// # Errors
    ///
    /// Returns a validation error for empty names, duplicate names within a
    /// table, routes that are not absolute, or models listed under an
    /// unknown manufacturer.
    pub fn validate(&self) -> Result<()> {
        for (table, entries) in [
            ("categories", &self.categories),
            ("aircraft_types", &self.aircraft_types),
            ("manufacturers", &self.manufacturers),
        ] {
            let mut seen = HashSet::new();
            for entry in entries {
                let name = entry.name().trim();
                if name.is_empty() {
                    return Err(Error::validation(format!("{table} contains an empty name")));
                }
                if !seen.insert(name.to_lowercase()) {
                    return Err(Error::validation(format!(
                        "{table} contains '{name}' more than once"
                    )));
                }
                if let Some(route) = entry.target_route() {
                    if !route.starts_with('/') {
                        return Err(Error::validation(format!(
                            "{table} entry '{name}' has route '{route}' which must start with '/'"
                        )));
                    }
                }
            }
        }

        for manufacturer in self.models.keys() {
            if !self.is_known_manufacturer(manufacturer) {
                return Err(Error::validation(format!(
                    "models listed for unknown manufacturer '{manufacturer}'"
                )));
            }
        }

        Ok(())
    }

    /// The category whose browse page is `route`.
    #[must_use]
    pub fn category_for_route(&self, route: &str) -> Option<&TaxonomyEntry> {
        self.categories
            .iter()
            .find(|c| c.target_route() == Some(route))
    }

    /// Look up a category by name, ignoring case.
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&TaxonomyEntry> {
        find_by_name(&self.categories, name)
    }

    /// Look up an aircraft type by name, ignoring case.
    #[must_use]
    pub fn aircraft_type(&self, name: &str) -> Option<&TaxonomyEntry> {
        find_by_name(&self.aircraft_types, name)
    }

    /// Whether `name` is a known manufacturer, ignoring case.
    #[must_use]
    pub fn is_known_manufacturer(&self, name: &str) -> bool {
        find_by_name(&self.manufacturers, name).is_some()
    }

    /// Models for `manufacturer`, ignoring case. Empty if unknown.
    #[must_use]
    pub fn models_for(&self, manufacturer: &str) -> &[String] {
        self.models
            .iter()
            .find(|(make, _)| make.eq_ignore_ascii_case(manufacturer))
            .map(|(_, models)| models.as_slice())
            .unwrap_or_default()
    }
}

fn find_by_name<'a>(entries: &'a [TaxonomyEntry], name: &str) -> Option<&'a TaxonomyEntry> {
    entries.iter().find(|e| e.name().eq_ignore_ascii_case(name))
}
