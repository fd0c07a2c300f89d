//! Input semantic labels of the document format

use std::fmt;

use serde::{Deserialize, Serialize};

/// Role of an attribute-input binding.
///
/// These are protocol-level constants of the COLLADA format, used as keys
/// when grouping `<input>` elements, not configurable values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Semantic {
    /// Vertex position data (`POSITION`)
    Position,
    /// Vertex normal data (`NORMAL`)
    Normal,
    /// Texture coordinate data (`TEXCOORD`)
    Texcoord,
    /// Reference to a `<vertices>` group (`VERTEX`)
    Vertex,
}

impl Semantic {
    /// The label as it appears in the document.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Position => "POSITION",
            Self::Normal => "NORMAL",
            Self::Texcoord => "TEXCOORD",
            Self::Vertex => "VERTEX",
        }
    }
}

impl fmt::Display for Semantic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
