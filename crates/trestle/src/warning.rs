//! Warning types for non-fatal problems during graph building.
//!
//! Malformed entities never abort a build: the builder skips the offending
//! record, collects a [`Warning`] describing it, and keeps going, so one bad
//! entity cannot hide the structure of the rest of the collection.
//!
//! Note that a *dangling* reference (a target id that is not an entity in
//! the source collection) is valid input, not a warning: unresolved
//! dependencies are exactly what callers want to see.

/// A non-fatal warning collected while building a graph.
///
/// Each variant carries the position of the offending record so callers can
/// point back at their input collection.
///
/// # Examples
///
/// ```
/// use trestle::Warning;
///
/// let warning = Warning::MissingId { position: 3 };
/// assert_eq!(warning.kind(), "missing_id");
/// assert!(warning.description().contains("entity 3"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// An entity had an empty id and was skipped entirely.
    MissingId {
        /// Zero-based position of the entity in the input collection.
        position: usize,
    },

    /// A reference had an empty target id and was skipped; the owning
    /// entity's other references were still processed.
    EmptyReferenceTarget {
        /// Id of the entity that declared the reference.
        entity: String,
        /// Zero-based position of the reference on that entity.
        position: usize,
    },
}

impl Warning {
    /// A human-readable description of the warning.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::MissingId { position } => {
                format!("entity {position}: missing id, entity skipped")
            }
            Self::EmptyReferenceTarget { entity, position } => {
                format!("entity '{entity}': reference {position} has an empty target, reference skipped")
            }
        }
    }

    /// A static string identifying the warning kind, for filtering and
    /// grouping without pattern matching on the variants.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingId { .. } => "missing_id",
            Self::EmptyReferenceTarget { .. } => "empty_reference_target",
        }
    }
}

impl std::fmt::Display for Warning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.description())
    }
}

impl std::error::Error for Warning {}
