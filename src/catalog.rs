//! Embedded module and inverter reference tables.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::error::{ComponentKind, Error};
use crate::pv::inverter::InverterParams;
use crate::pv::module::ModuleParams;

/// Embedded excerpt of the Sandia module database.
const SANDIA_MODULES: &str = include_str!("data/sandia_modules.toml");
/// Embedded excerpt of the CEC inverter database.
const CEC_INVERTERS: &str = include_str!("data/cec_inverters.toml");

#[derive(Debug, Deserialize)]
struct ModuleTable {
    #[serde(default)]
    modules: BTreeMap<String, ModuleParams>,
}

#[derive(Debug, Deserialize)]
struct InverterTable {
    #[serde(default)]
    inverters: BTreeMap<String, InverterParams>,
}

/// Read-only component parameter catalog keyed by database name.
///
/// Lookups never mutate the catalog; parameter sets are cloned out by the
/// plant model at construction time.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    modules: BTreeMap<String, ModuleParams>,
    inverters: BTreeMap<String, InverterParams>,
}

impl Catalog {
    /// Catalog backed by the embedded reference tables.
    ///
    /// # Panics
    ///
    /// Panics if the embedded tables fail to parse, which is a defect in
    /// the shipped data rather than a runtime condition.
    pub fn builtin() -> Self {
        match Self::from_toml_strs(SANDIA_MODULES, CEC_INVERTERS) {
            Ok(catalog) => catalog,
            Err(e) => panic!("embedded catalog is malformed: {e}"),
        }
    }

    /// Parses a catalog from TOML documents in the embedded schema.
    ///
    /// `modules` holds a `[modules.<name>]` table per entry, `inverters`
    /// a `[inverters.<name>]` table per entry.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] when either document is not valid
    /// TOML for the schema.
    pub fn from_toml_strs(modules: &str, inverters: &str) -> Result<Self, Error> {
        let module_table: ModuleTable =
            toml::from_str(modules).map_err(|e| Error::invalid("modules", e.to_string()))?;
        let inverter_table: InverterTable =
            toml::from_str(inverters).map_err(|e| Error::invalid("inverters", e.to_string()))?;
        Ok(Self {
            modules: module_table.modules,
            inverters: inverter_table.inverters,
        })
    }

    /// Looks up a module parameter set by database name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownComponent`] when the name is not present.
    pub fn module(&self, name: &str) -> Result<&ModuleParams, Error> {
        self.modules.get(name).ok_or_else(|| Error::UnknownComponent {
            kind: ComponentKind::Module,
            name: name.to_string(),
        })
    }

    /// Looks up an inverter parameter set by database name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownComponent`] when the name is not present.
    pub fn inverter(&self, name: &str) -> Result<&InverterParams, Error> {
        self.inverters
            .get(name)
            .ok_or_else(|| Error::UnknownComponent {
                kind: ComponentKind::Inverter,
                name: name.to_string(),
            })
    }

    /// Names of the available modules, sorted.
    pub fn module_names(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Names of the available inverters, sorted.
    pub fn inverter_names(&self) -> impl Iterator<Item = &str> {
        self.inverters.keys().map(String::as_str)
    }
}
