//! # COLLADA Linker
//!
//! Links a parsed COLLADA 1.4.1 document into a directly-referenced,
//! referentially-consistent scene graph.
//!
//! The input is a [`raw::RawDocument`]: a record tree whose entities only
//! reference one another through symbolic identifiers (URI fragments like
//! `"#eff1"`, or bare keys). The output is a [`linked::LinkedDocument`]:
//! six identifier-keyed library tables plus the resolved scene list, with
//! every cross-reference replaced by a shared direct association. Linking
//! fails fast on the first unsupported version, unresolved reference,
//! duplicate identifier or missing required semantic.
//!
//! Deserializing the markup into the raw tree and turning the linked graph
//! into GPU resources are both external concerns; this crate performs no
//! I/O and keeps no state across calls.
//!
//! ```
//! use collada_linker::raw::RawDocument;
//!
//! let document = RawDocument {
//!     version: "1.4.1".to_string(),
//!     images: vec![],
//!     effects: vec![],
//!     materials: vec![],
//!     geometries: vec![],
//!     visual_scenes: vec![],
//!     scenes: vec![],
//! };
//!
//! let linked = collada_linker::link(&document).expect("empty document links");
//! assert!(linked.images.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod error;
pub mod linked;
pub mod linker;
pub mod raw;
pub mod semantic;
pub mod table;

pub use error::{Library, LinkError};
pub use linked::LinkedDocument;
pub use linker::{link, SUPPORTED_VERSIONS};
pub use semantic::Semantic;
pub use table::{Keyed, LibraryTable};
