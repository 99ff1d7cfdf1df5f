//! Crate-wide error types.

use std::fmt;

use thiserror::Error;

/// Component category for catalog lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    /// PV module parameter set.
    Module,
    /// Inverter parameter set.
    Inverter,
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Module => write!(f, "module"),
            Self::Inverter => write!(f, "inverter"),
        }
    }
}

/// Errors raised by the estimation chain.
///
/// Two kinds cover the whole surface: malformed input data and catalog
/// lookup misses. Both are returned synchronously; batch execution
/// captures them per row instead of aborting.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Malformed or physically inconsistent input.
    #[error("invalid input for {field}: {reason}")]
    InvalidInput {
        /// Name of the offending field or group.
        field: &'static str,
        /// Constraint description.
        reason: String,
    },
    /// Catalog lookup miss for a component name.
    #[error("unknown {kind} \"{name}\"")]
    UnknownComponent {
        /// Whether a module or an inverter was requested.
        kind: ComponentKind,
        /// The name that was looked up.
        name: String,
    },
}

impl Error {
    pub(crate) fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            field,
            reason: reason.into(),
        }
    }
}

impl From<solar_positioning::Error> for Error {
    fn from(e: solar_positioning::Error) -> Self {
        Self::InvalidInput {
            field: "timestamp",
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_input_display() {
        let e = Error::invalid("ghi", "must be finite and >= 0, got NaN");
        assert_eq!(
            e.to_string(),
            "invalid input for ghi: must be finite and >= 0, got NaN"
        );
    }

    #[test]
    fn unknown_component_display() {
        let e = Error::UnknownComponent {
            kind: ComponentKind::Inverter,
            name: "Bogus_Inverter_9000".to_string(),
        };
        assert_eq!(e.to_string(), "unknown inverter \"Bogus_Inverter_9000\"");
    }

    #[test]
    fn component_kind_names() {
        assert_eq!(ComponentKind::Module.to_string(), "module");
        assert_eq!(ComponentKind::Inverter.to_string(), "inverter");
    }
}
