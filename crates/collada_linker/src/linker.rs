//! The linking pass
//!
//! Turns a [`RawDocument`] into a [`LinkedDocument`] in one top-down sweep:
//! version gate, then images, effects, materials, geometries, visual scenes
//! and finally the top-level scene list. Each stage only reads tables
//! produced by earlier stages, so the resulting graph is acyclic by
//! construction. The first unresolved reference or missing semantic aborts
//! the whole call.
//!
//! The pass is a pure transform: no I/O, no retained state, linking the
//! same document twice yields structurally equal results.

use std::collections::HashMap;
use std::sync::Arc;

use crate::error::{Library, LinkError};
use crate::linked::{
    BindMaterial, BindTechnique, Effect, Geometry, Image, InstanceMaterial, InstanceVisualScene,
    LinkedDocument, Material, Mesh, Node, NodeGeometry, Phong, Profile, Scene, ShadingParam,
    Source, Technique, TextureParam, Triangles, Vertices, VisualScene,
};
use crate::raw::{
    RawBindMaterial, RawDocument, RawGeometry, RawInput, RawMesh, RawNode, RawPhong,
    RawShadingParam, RawTriangles,
};
use crate::semantic::Semantic;
use crate::table::{index, LibraryTable};

/// Document versions the linker accepts. A closed allow-list: anything else
/// is rejected before any table construction.
pub const SUPPORTED_VERSIONS: &[&str] = &["1.4.1"];

/// Link a raw document into a referentially-consistent graph.
///
/// # Errors
/// Returns the first [`LinkError`] encountered in the fixed stage order;
/// no partial or degraded graph is ever produced.
pub fn link(raw: &RawDocument) -> Result<LinkedDocument, LinkError> {
    if !SUPPORTED_VERSIONS.contains(&raw.version.as_str()) {
        return Err(LinkError::UnsupportedVersion(raw.version.clone()));
    }

    let images = LibraryTable::build(&raw.images, Library::Images, |image| {
        Ok(Image {
            id: image.id.clone(),
            init_from: image.init_from.clone(),
        })
    })?;
    log::debug!("linked {} image(s)", images.len());

    let effects = link_effects(raw, &images)?;
    log::debug!("linked {} effect(s)", effects.len());

    let materials = link_materials(raw, &effects)?;
    log::debug!("linked {} material(s)", materials.len());

    let geometries = link_geometries(raw, &materials)?;
    log::debug!("linked {} geometry(ies)", geometries.len());

    let visual_scenes = link_visual_scenes(raw, &geometries, &materials)?;
    log::debug!("linked {} visual scene(s)", visual_scenes.len());

    let scenes = link_scenes(raw, &visual_scenes)?;

    Ok(LinkedDocument {
        images,
        effects,
        materials,
        geometries,
        visual_scenes,
        scenes,
    })
}

fn link_effects(
    raw: &RawDocument,
    images: &LibraryTable<Image>,
) -> Result<LibraryTable<Effect>, LinkError> {
    LibraryTable::build(&raw.effects, Library::Effects, |effect| {
        let techniques = LibraryTable::build(
            &effect.profile_common.techniques,
            Library::Techniques,
            |technique| {
                Ok(Technique {
                    sid: technique.sid.clone(),
                    phong: link_phong(&technique.phong, images)?,
                })
            },
        )?;
        Ok(Effect {
            id: effect.id.clone(),
            profile: Profile { techniques },
        })
    })
}

fn link_phong(phong: &RawPhong, images: &LibraryTable<Image>) -> Result<Phong, LinkError> {
    Ok(Phong {
        emission: link_shading_param(&phong.emission, images)?,
        diffuse: link_shading_param(&phong.diffuse, images)?,
        specular: phong.specular,
        shininess: phong.shininess,
    })
}

fn link_shading_param(
    param: &RawShadingParam,
    images: &LibraryTable<Image>,
) -> Result<ShadingParam, LinkError> {
    match param {
        RawShadingParam::Color(color) => Ok(ShadingParam::Color(*color)),
        // Texture references carry a bare image key, not a URI fragment.
        RawShadingParam::Texture(texture) => Ok(ShadingParam::Texture(TextureParam {
            image: images.resolve(&texture.texture, Library::Images)?,
            texcoord: texture.texcoord.clone(),
        })),
    }
}

fn link_materials(
    raw: &RawDocument,
    effects: &LibraryTable<Effect>,
) -> Result<LibraryTable<Material>, LinkError> {
    LibraryTable::build(&raw.materials, Library::Materials, |material| {
        let mut linked = Vec::with_capacity(material.instance_effects.len());
        for instance in &material.instance_effects {
            linked.push(effects.resolve_fragment(&instance.url, Library::Effects)?);
        }
        Ok(Material {
            id: material.id.clone(),
            effects: linked,
        })
    })
}

fn link_geometries(
    raw: &RawDocument,
    materials: &LibraryTable<Material>,
) -> Result<LibraryTable<Geometry>, LinkError> {
    LibraryTable::build(&raw.geometries, Library::Geometries, |geometry| {
        Ok(Geometry {
            id: geometry.id.clone(),
            name: geometry.name.clone(),
            mesh: link_mesh(&geometry.mesh, geometry, materials)?,
        })
    })
}

fn link_mesh(
    mesh: &RawMesh,
    geometry: &RawGeometry,
    materials: &LibraryTable<Material>,
) -> Result<Mesh, LinkError> {
    // Sources and vertices groups are geometry-local: two geometries may
    // reuse the same source id without collision.
    let sources = LibraryTable::build(&mesh.sources, Library::Sources, |source| {
        Ok(Source {
            id: source.id.clone(),
            data: source.data.clone(),
            stride: source.stride,
        })
    })?;

    let vertices = link_vertices(mesh, &sources)?;

    let triangles = mesh
        .triangles
        .iter()
        .map(|batch| link_triangles(batch, geometry, materials, &sources, &vertices))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Mesh {
        sources,
        vertices,
        triangles,
    })
}

fn link_vertices(
    mesh: &RawMesh,
    sources: &LibraryTable<Source>,
) -> Result<LibraryTable<Vertices>, LinkError> {
    LibraryTable::build(&mesh.vertices, Library::Vertices, |group| {
        let semantic_sources = link_semantic_sources(&group.inputs, sources)?;

        let position = semantic_sources
            .get(Semantic::Position.as_str())
            .cloned()
            .ok_or_else(|| LinkError::MissingRequiredSemantic {
                semantic: Semantic::Position,
                owner: group.id.clone(),
            })?;

        Ok(Vertices {
            id: group.id.clone(),
            sources: semantic_sources,
            position,
        })
    })
}

fn link_semantic_sources(
    inputs: &[RawInput],
    sources: &LibraryTable<Source>,
) -> Result<HashMap<String, Arc<Source>>, LinkError> {
    let mut resolved = HashMap::with_capacity(inputs.len());
    for input in inputs {
        let source = sources.resolve_fragment(&input.source, Library::Sources)?;
        resolved.insert(input.semantic.clone(), source);
    }
    Ok(resolved)
}

fn link_triangles(
    batch: &RawTriangles,
    geometry: &RawGeometry,
    materials: &LibraryTable<Material>,
    sources: &LibraryTable<Source>,
    vertices: &LibraryTable<Vertices>,
) -> Result<Triangles, LinkError> {
    let inputs = index(&batch.inputs);

    let normals = resolve_input_source(&inputs, Semantic::Normal, sources)?.ok_or_else(|| {
        LinkError::MissingRequiredSemantic {
            semantic: Semantic::Normal,
            owner: geometry.id.clone(),
        }
    })?;

    let texcoords = resolve_input_source(&inputs, Semantic::Texcoord, sources)?;

    let vertex_input =
        inputs
            .get(Semantic::Vertex.as_str())
            .ok_or_else(|| LinkError::MissingRequiredSemantic {
                semantic: Semantic::Vertex,
                owner: geometry.id.clone(),
            })?;
    let vertex_group = vertices.resolve_fragment(&vertex_input.source, Library::Vertices)?;

    // The material attribute is optional in the format; a present but
    // unresolvable key is still fatal like every other reference.
    let material = batch
        .material
        .as_deref()
        .map(|key| materials.resolve(key, Library::Materials))
        .transpose()?;

    Ok(Triangles {
        count: batch.count,
        material,
        vertices: vertex_group,
        normals,
        texcoords,
        indices: batch.indices.clone(),
    })
}

fn resolve_input_source(
    inputs: &HashMap<&str, &RawInput>,
    semantic: Semantic,
    sources: &LibraryTable<Source>,
) -> Result<Option<Arc<Source>>, LinkError> {
    match inputs.get(semantic.as_str()) {
        Some(input) => Ok(Some(
            sources.resolve_fragment(&input.source, Library::Sources)?,
        )),
        None => Ok(None),
    }
}

fn link_visual_scenes(
    raw: &RawDocument,
    geometries: &LibraryTable<Geometry>,
    materials: &LibraryTable<Material>,
) -> Result<LibraryTable<VisualScene>, LinkError> {
    LibraryTable::build(&raw.visual_scenes, Library::VisualScenes, |scene| {
        let nodes = scene
            .nodes
            .iter()
            .map(|node| link_node(node, geometries, materials))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(VisualScene {
            id: scene.id.clone(),
            name: scene.name.clone(),
            nodes,
        })
    })
}

fn link_node(
    node: &RawNode,
    geometries: &LibraryTable<Geometry>,
    materials: &LibraryTable<Material>,
) -> Result<Node, LinkError> {
    let geometry = node
        .instance_geometry
        .as_ref()
        .map(|instance| {
            Ok::<_, LinkError>(NodeGeometry {
                geometry: geometries.resolve_fragment(&instance.url, Library::Geometries)?,
                bind_material: link_bind_material(&instance.bind_material, materials)?,
            })
        })
        .transpose()?;

    Ok(Node {
        id: node.id.clone(),
        name: node.name.clone(),
        geometry,
    })
}

fn link_bind_material(
    bind: &RawBindMaterial,
    materials: &LibraryTable<Material>,
) -> Result<BindMaterial, LinkError> {
    let instance = &bind.technique_common.instance_material;
    Ok(BindMaterial {
        technique_common: BindTechnique {
            instance_material: InstanceMaterial {
                symbol: instance.symbol.clone(),
                material: materials.resolve_fragment(&instance.target, Library::Materials)?,
            },
        },
    })
}

fn link_scenes(
    raw: &RawDocument,
    visual_scenes: &LibraryTable<VisualScene>,
) -> Result<Vec<Scene>, LinkError> {
    raw.scenes
        .iter()
        .map(|scene| {
            let instances = scene
                .instance_visual_scenes
                .iter()
                .map(|instance| {
                    Ok(InstanceVisualScene {
                        visual_scene: visual_scenes
                            .resolve_fragment(&instance.url, Library::VisualScenes)?,
                    })
                })
                .collect::<Result<Vec<_>, LinkError>>()?;
            Ok(Scene { instances })
        })
        .collect()
}
