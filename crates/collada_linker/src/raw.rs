//! Raw document record tree
//!
//! The input contract of the linker: a `RawDocument` is what the external
//! markup deserializer hands over — a hierarchy of plain records whose
//! entities reference one another only through symbolic identifiers, either
//! URI fragments (`"#some-id"`) or bare keys. Nothing here is resolved yet.
//!
//! All types derive `serde` traits so a deserializer can target them
//! directly; the linker itself never performs I/O.

use serde::{Deserialize, Serialize};

use crate::table::Keyed;

/// A parsed but unlinked scene document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawDocument {
    /// Declared schema version (e.g. `"1.4.1"`)
    pub version: String,
    /// `<library_images>` entries
    pub images: Vec<RawImage>,
    /// `<library_effects>` entries
    pub effects: Vec<RawEffect>,
    /// `<library_materials>` entries
    pub materials: Vec<RawMaterial>,
    /// `<library_geometries>` entries
    pub geometries: Vec<RawGeometry>,
    /// `<library_visual_scenes>` entries
    pub visual_scenes: Vec<RawVisualScene>,
    /// Top-level `<scene>` elements
    pub scenes: Vec<RawScene>,
}

/// An image record. Leaf entity: no outgoing references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawImage {
    /// Library-wide identifier
    pub id: String,
    /// Path or URI of the image file (`<init_from>`)
    pub init_from: String,
}

/// An effect record owning its common shading profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawEffect {
    /// Library-wide identifier
    pub id: String,
    /// The `<profile_COMMON>` block
    pub profile_common: RawProfile,
}

/// A shading profile grouping one or more techniques.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawProfile {
    /// Techniques of this profile, keyed by `sid` after linking
    pub techniques: Vec<RawTechnique>,
}

/// A single technique inside a profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTechnique {
    /// Scoped identifier of the technique
    pub sid: String,
    /// The Phong shading block
    pub phong: RawPhong,
}

/// Phong shading parameters as they appear in the document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawPhong {
    /// Emission channel: flat color or texture
    pub emission: RawShadingParam,
    /// Diffuse channel: flat color or texture
    pub diffuse: RawShadingParam,
    /// Specular color (RGBA)
    pub specular: [f32; 4],
    /// Specular exponent
    pub shininess: f32,
}

impl Default for RawPhong {
    fn default() -> Self {
        Self {
            emission: RawShadingParam::Color([0.0, 0.0, 0.0, 1.0]),
            diffuse: RawShadingParam::Color([0.8, 0.8, 0.8, 1.0]),
            specular: [0.5, 0.5, 0.5, 1.0],
            shininess: 250.0,
        }
    }
}

/// A shading channel value: a flat color, or a texture parameter whose
/// `texture` attribute names an image by bare key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum RawShadingParam {
    /// Constant RGBA color
    Color([f32; 4]),
    /// Sampled texture
    Texture(RawTexture),
}

/// A texture reference inside a shading channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTexture {
    /// Image key (bare, no URI wrapping)
    pub texture: String,
    /// Texture-coordinate set this texture samples with
    pub texcoord: String,
}

/// A material record instancing one or more effects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMaterial {
    /// Library-wide identifier
    pub id: String,
    /// Effect instances, each referencing an effect by URI fragment
    pub instance_effects: Vec<RawInstanceEffect>,
}

/// An `<instance_effect>` reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInstanceEffect {
    /// Fragment-addressed effect reference (`"#effect-id"`)
    pub url: String,
}

/// A geometry record owning a single mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawGeometry {
    /// Library-wide identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// The mesh data
    pub mesh: RawMesh,
}

/// Mesh contents: attribute arrays, vertex groups and triangle batches.
///
/// Sources and vertices are geometry-local; two geometries may reuse the
/// same source id without collision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawMesh {
    /// Raw attribute arrays
    pub sources: Vec<RawSource>,
    /// Vertex-attribute groups
    pub vertices: Vec<RawVertices>,
    /// Triangle batches
    pub triangles: Vec<RawTriangles>,
}

/// A named attribute array (positions, normals, texture coordinates).
///
/// Array contents are carried through unvalidated; interpreting them is the
/// consumer's concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSource {
    /// Mesh-local identifier
    pub id: String,
    /// The float array
    pub data: Vec<f32>,
    /// Number of floats per element
    pub stride: u32,
}

/// A `<vertices>` group binding semantics to sources.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawVertices {
    /// Mesh-local identifier
    pub id: String,
    /// Semantic-to-source bindings; must include a `POSITION` entry
    pub inputs: Vec<RawInput>,
}

/// A single `<input>` binding: a semantic label paired with a
/// fragment-addressed source reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInput {
    /// Semantic label (e.g. `"POSITION"`, `"NORMAL"`)
    pub semantic: String,
    /// Fragment-addressed reference to a source or vertices group
    pub source: String,
    /// Index offset within the primitive index stream, when present
    pub offset: Option<u32>,
}

/// A `<triangles>` batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawTriangles {
    /// Number of triangles in the batch
    pub count: u32,
    /// Material reference by bare key; optional in the format
    pub material: Option<String>,
    /// Inputs keyed by semantic (`VERTEX` required, `NORMAL` required,
    /// `TEXCOORD` optional)
    pub inputs: Vec<RawInput>,
    /// The primitive index stream (`<p>`), carried through unvalidated
    pub indices: Vec<u32>,
}

/// A visual-scene record owning its node hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawVisualScene {
    /// Library-wide identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Scene nodes in document order
    pub nodes: Vec<RawNode>,
}

/// A scene node, optionally binding a geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawNode {
    /// Node identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional geometry binding
    pub instance_geometry: Option<RawInstanceGeometry>,
}

/// An `<instance_geometry>` binding inside a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInstanceGeometry {
    /// Fragment-addressed geometry reference (`"#geometry-id"`)
    pub url: String,
    /// Material binding for the instanced geometry
    pub bind_material: RawBindMaterial,
}

/// A `<bind_material>` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBindMaterial {
    /// The `<technique_common>` block
    pub technique_common: RawBindTechnique,
}

/// Common technique of a material binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBindTechnique {
    /// The material instancing to resolve
    pub instance_material: RawInstanceMaterial,
}

/// An `<instance_material>` reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInstanceMaterial {
    /// Symbol the geometry's primitives bind against
    pub symbol: String,
    /// Fragment-addressed material reference (`"#material-id"`)
    pub target: String,
}

/// A top-level scene record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawScene {
    /// Visual-scene instances in document order
    pub instance_visual_scenes: Vec<RawInstanceVisualScene>,
}

/// An `<instance_visual_scene>` reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawInstanceVisualScene {
    /// Fragment-addressed visual-scene reference (`"#scene-id"`)
    pub url: String,
}

impl Keyed for RawImage {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for RawEffect {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for RawTechnique {
    fn key(&self) -> &str {
        &self.sid
    }
}

impl Keyed for RawMaterial {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for RawGeometry {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for RawSource {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for RawVertices {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for RawVisualScene {
    fn key(&self) -> &str {
        &self.id
    }
}

impl Keyed for RawInput {
    fn key(&self) -> &str {
        &self.semantic
    }
}
