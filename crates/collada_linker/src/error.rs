//! Linking errors
//!
//! Every failure is fatal: the first unresolved reference or missing
//! semantic aborts the whole linking call, so one invocation reports
//! exactly one root cause.

use std::fmt;

use thiserror::Error;

use crate::semantic::Semantic;

/// Library category a failed lookup targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Library {
    /// The image library
    Images,
    /// The effect library
    Effects,
    /// The material library
    Materials,
    /// The geometry library
    Geometries,
    /// The visual-scene library
    VisualScenes,
    /// A mesh-local source table
    Sources,
    /// A mesh-local vertices-group table
    Vertices,
    /// A profile-local technique table
    Techniques,
}

impl Library {
    /// Human-readable name used in error messages.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Images => "images",
            Self::Effects => "effects",
            Self::Materials => "materials",
            Self::Geometries => "geometries",
            Self::VisualScenes => "visual scenes",
            Self::Sources => "sources",
            Self::Vertices => "vertices",
            Self::Techniques => "techniques",
        }
    }
}

impl fmt::Display for Library {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Document linking errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    /// Declared document version is not in the supported set
    #[error("COLLADA version {0} isn't supported")]
    UnsupportedVersion(String),

    /// A cross-reference has no matching entry in its target library
    #[error("unresolved reference '{reference}' in {library} library")]
    UnresolvedReference {
        /// The offending reference (fragment key, or the full value when it
        /// carries no fragment)
        reference: String,
        /// The library the reference should have resolved in
        library: Library,
    },

    /// A required input semantic is absent from its owning element
    #[error("input with semantic \"{semantic}\" is required for {owner}")]
    MissingRequiredSemantic {
        /// The semantic that was expected
        semantic: Semantic,
        /// Identity of the element that should carry it
        owner: String,
    },

    /// Two records within one library share an identifier
    #[error("duplicate key '{key}' in {library} library")]
    DuplicateKey {
        /// The colliding identifier
        key: String,
        /// The library in which the collision occurred
        library: Library,
    },
}
