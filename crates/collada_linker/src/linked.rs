//! Linked document model
//!
//! The output of the linking pass: the same entities as the raw tree, but
//! with every symbolic cross-reference replaced by a direct association.
//! Library tables own their entities behind `Arc`; a reference field holds a
//! clone of the owning table's `Arc`, so reference identity can be checked
//! with `Arc::ptr_eq` and the graph stays acyclic by construction (a stage
//! only ever points at entities linked before it).

use std::collections::HashMap;
use std::sync::Arc;

use crate::table::LibraryTable;

/// A linked image. Leaf entity: images reference nothing further.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
    /// Library-wide identifier
    pub id: String,
    /// Path or URI of the image file
    pub init_from: String,
}

/// A resolved texture parameter of a shading channel.
#[derive(Debug, Clone, PartialEq)]
pub struct TextureParam {
    /// The image this channel samples
    pub image: Arc<Image>,
    /// Texture-coordinate set the sampler binds to
    pub texcoord: String,
}

/// A resolved shading channel value.
#[derive(Debug, Clone, PartialEq)]
pub enum ShadingParam {
    /// Constant RGBA color
    Color([f32; 4]),
    /// Sampled texture with its image resolved
    Texture(TextureParam),
}

/// Resolved Phong shading parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Phong {
    /// Emission channel
    pub emission: ShadingParam,
    /// Diffuse channel
    pub diffuse: ShadingParam,
    /// Specular color (RGBA)
    pub specular: [f32; 4],
    /// Specular exponent
    pub shininess: f32,
}

/// A linked technique.
#[derive(Debug, Clone, PartialEq)]
pub struct Technique {
    /// Scoped identifier
    pub sid: String,
    /// The resolved Phong block
    pub phong: Phong,
}

/// A linked shading profile.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    /// Techniques keyed by `sid`
    pub techniques: LibraryTable<Technique>,
}

/// A linked effect.
#[derive(Debug, Clone, PartialEq)]
pub struct Effect {
    /// Library-wide identifier
    pub id: String,
    /// The common shading profile
    pub profile: Profile,
}

/// A linked material.
///
/// Effects are shared, not owned: one effect may be instanced by several
/// materials.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    /// Library-wide identifier
    pub id: String,
    /// Instanced effects in document order
    pub effects: Vec<Arc<Effect>>,
}

/// A named attribute array owned by its mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct Source {
    /// Mesh-local identifier
    pub id: String,
    /// The float array, carried through unvalidated
    pub data: Vec<f32>,
    /// Number of floats per element
    pub stride: u32,
}

/// A linked vertices group.
#[derive(Debug, Clone, PartialEq)]
pub struct Vertices {
    /// Mesh-local identifier
    pub id: String,
    /// All semantic bindings of the group
    pub sources: HashMap<String, Arc<Source>>,
    /// The required `POSITION` binding
    pub position: Arc<Source>,
}

/// A linked triangle batch.
#[derive(Debug, Clone, PartialEq)]
pub struct Triangles {
    /// Number of triangles
    pub count: u32,
    /// The bound material; the attribute is optional in the format
    pub material: Option<Arc<Material>>,
    /// The required `VERTEX`-bound vertices group
    pub vertices: Arc<Vertices>,
    /// The required `NORMAL` source
    pub normals: Arc<Source>,
    /// The optional `TEXCOORD` source
    pub texcoords: Option<Arc<Source>>,
    /// The primitive index stream
    pub indices: Vec<u32>,
}

/// Linked mesh contents.
#[derive(Debug, Clone, PartialEq)]
pub struct Mesh {
    /// Attribute arrays keyed by id (geometry-local scope)
    pub sources: LibraryTable<Source>,
    /// Vertices groups keyed by id (geometry-local scope)
    pub vertices: LibraryTable<Vertices>,
    /// Triangle batches in document order
    pub triangles: Vec<Triangles>,
}

/// A linked geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Geometry {
    /// Library-wide identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// The mesh
    pub mesh: Mesh,
}

/// A resolved `<instance_material>` binding.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceMaterial {
    /// Symbol the geometry's primitives bind against
    pub symbol: String,
    /// The bound material
    pub material: Arc<Material>,
}

/// Common technique of a resolved material binding.
#[derive(Debug, Clone, PartialEq)]
pub struct BindTechnique {
    /// The resolved material instancing
    pub instance_material: InstanceMaterial,
}

/// A resolved `<bind_material>` block.
#[derive(Debug, Clone, PartialEq)]
pub struct BindMaterial {
    /// The common technique
    pub technique_common: BindTechnique,
}

/// A node's resolved geometry binding.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeGeometry {
    /// The instanced geometry
    pub geometry: Arc<Geometry>,
    /// The material binding for this instance
    pub bind_material: BindMaterial,
}

/// A linked scene node.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    /// Node identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Optional geometry binding
    pub geometry: Option<NodeGeometry>,
}

/// A linked visual scene.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualScene {
    /// Library-wide identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Nodes in document order
    pub nodes: Vec<Node>,
}

/// A resolved `<instance_visual_scene>` reference.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceVisualScene {
    /// The instanced visual scene
    pub visual_scene: Arc<VisualScene>,
}

/// A linked top-level scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    /// Visual-scene instances in document order
    pub instances: Vec<InstanceVisualScene>,
}

/// The fully linked, referentially-consistent document.
///
/// Immutable once built; the raw document it was linked from may be
/// discarded. Every reference field designates an entity present in its
/// target library table.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkedDocument {
    /// The image library
    pub images: LibraryTable<Image>,
    /// The effect library
    pub effects: LibraryTable<Effect>,
    /// The material library
    pub materials: LibraryTable<Material>,
    /// The geometry library
    pub geometries: LibraryTable<Geometry>,
    /// The visual-scene library
    pub visual_scenes: LibraryTable<VisualScene>,
    /// Top-level scenes in document order
    pub scenes: Vec<Scene>,
}
