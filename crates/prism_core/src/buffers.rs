//! Flattening a scene graph into render buffers.
//!
//! The builder walks renderable solids → parts → primitives → vertices and
//! produces:
//!
//! - a **vertex buffer** of unique vertex ids in first-seen order,
//! - an **index buffer** holding each primitive's vertex-buffer slots,
//!   concatenated part by part,
//! - a **placement table** with one [`Placement`] per (solid, slot) pair, and
//!   for every index-buffer entry the placement it resolves to,
//! - a **part buffer** with one [`PartRecord`] per part describing its slice
//!   of the index buffer.
//!
//! Deduplication is by vertex identity, never by coordinates: a vertex shared
//! by several primitives or solids appears exactly once in the vertex buffer.
//! Each solid that references it gets its own placement, so the transform
//! stage can put the same vertex through every solid's model matrix.

use std::collections::HashMap;

use thiserror::Error;

use crate::primitive::PrimitiveKind;
use crate::scene::Scene;
use crate::vertex::VertexId;

/// Errors raised while building or checking buffers.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BufferError {
    #[error("Primitive '{primitive}' references vertex {vertex} outside the scene arena")]
    DanglingVertex { primitive: String, vertex: VertexId },

    #[error("Primitive '{primitive}' is a {found} inside {expected} part '{part}'")]
    KindMismatch {
        part: String,
        primitive: String,
        expected: PrimitiveKind,
        found: PrimitiveKind,
    },

    #[error("Index {index} out of range for a vertex buffer of {len}")]
    DanglingIndex { index: usize, len: usize },

    #[error("Index-buffer entry {entry} of part {part} has no matching placement")]
    PlacementMismatch { part: usize, entry: usize },

    #[error("Part {part} covers {found} indices, expected {expected}")]
    SliceMismatch {
        part: usize,
        expected: usize,
        found: usize,
    },

    #[error("Part {part} starts at index {found}, expected {expected}")]
    OffsetMismatch {
        part: usize,
        expected: usize,
        found: usize,
    },
}

/// Result type for buffer operations.
pub type BufferResult<T> = Result<T, BufferError>;

/// A vertex-buffer slot as seen by one renderable solid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Position of the solid in `Scene::renderable_solids()`
    pub solid: usize,
    /// Vertex-buffer slot
    pub slot: usize,
}

/// One part's slice of the index buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct PartRecord {
    /// Kind shared by every primitive in the part
    pub kind: PrimitiveKind,

    /// First index-buffer position of this part
    pub start_index: usize,

    /// Position of the source solid in `Scene::renderable_solids()`
    pub solid: usize,

    /// Position of the source part within its solid
    pub part: usize,

    /// Source positions (within the part) of the primitives still present
    primitives: Vec<usize>,
}

impl PartRecord {
    /// Number of primitives currently in the index buffer for this part.
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// For each remaining primitive, its position in the source part.
    pub fn primitives(&self) -> &[usize] {
        &self.primitives
    }

    /// Number of index-buffer entries this part covers.
    pub fn index_len(&self) -> usize {
        self.primitive_count() * self.kind.arity()
    }

    /// One past the last index-buffer position of this part.
    pub fn end_index(&self) -> usize {
        self.start_index + self.index_len()
    }
}

/// Flattened vertex/index/part buffers for one scene snapshot.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneBuffers {
    vertices: Vec<VertexId>,
    indices: Vec<usize>,
    placements: Vec<Placement>,
    index_placements: Vec<usize>,
    parts: Vec<PartRecord>,
}

impl SceneBuffers {
    /// Flatten the renderable solids of `scene`.
    ///
    /// Fails if a primitive references a vertex the arena never issued, or if
    /// a part holds a primitive of another kind.
    pub fn build(scene: &Scene) -> BufferResult<Self> {
        let arena = scene.vertices();
        let mut buffers = Self::default();
        // Arena ids are dense, so a slot table replaces a linear search.
        let mut slots: Vec<Option<usize>> = vec![None; arena.len()];

        for (solid_index, solid) in scene.renderable_solids().enumerate() {
            let mut local: HashMap<usize, usize> = HashMap::new();

            for (part_index, part) in solid.parts.iter().enumerate() {
                let start_index = buffers.indices.len();

                for primitive in part.primitives() {
                    if primitive.kind() != part.kind() {
                        return Err(BufferError::KindMismatch {
                            part: part.name.clone(),
                            primitive: primitive.name.clone(),
                            expected: part.kind(),
                            found: primitive.kind(),
                        });
                    }

                    for &id in primitive.vertices() {
                        let entry = slots.get_mut(id.index()).ok_or_else(|| {
                            BufferError::DanglingVertex {
                                primitive: primitive.name.clone(),
                                vertex: id,
                            }
                        })?;
                        let slot = *entry.get_or_insert_with(|| {
                            buffers.vertices.push(id);
                            buffers.vertices.len() - 1
                        });

                        let placement = match local.get(&slot) {
                            Some(&placement) => placement,
                            None => {
                                buffers.placements.push(Placement {
                                    solid: solid_index,
                                    slot,
                                });
                                let placement = buffers.placements.len() - 1;
                                local.insert(slot, placement);
                                placement
                            }
                        };

                        buffers.indices.push(slot);
                        buffers.index_placements.push(placement);
                    }
                }

                buffers.parts.push(PartRecord {
                    kind: part.kind(),
                    start_index,
                    solid: solid_index,
                    part: part_index,
                    primitives: (0..part.len()).collect(),
                });
            }
        }

        Ok(buffers)
    }

    /// Unique vertex ids in first-seen order.
    pub fn vertices(&self) -> &[VertexId] {
        &self.vertices
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    /// Every (solid, slot) pair referenced by the index buffer. Per-solid
    /// stages produce one position per placement.
    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    /// Placement of each index-buffer entry, parallel to [`Self::indices`].
    pub fn index_placements(&self) -> &[usize] {
        &self.index_placements
    }

    pub fn parts(&self) -> &[PartRecord] {
        &self.parts
    }

    /// Index-buffer slice of part `part`.
    pub fn part_indices(&self, part: usize) -> &[usize] {
        let record = &self.parts[part];
        &self.indices[record.start_index..record.end_index()]
    }

    /// Vertex-buffer slots of the `k`-th remaining primitive of part `part`.
    pub fn primitive_indices(&self, part: usize, k: usize) -> &[usize] {
        &self.indices[self.primitive_range(part, k)]
    }

    /// Placements of the `k`-th remaining primitive of part `part`.
    pub fn primitive_placements(&self, part: usize, k: usize) -> &[usize] {
        &self.index_placements[self.primitive_range(part, k)]
    }

    /// Total primitives across all parts.
    pub fn primitive_count(&self) -> usize {
        self.parts.iter().map(PartRecord::primitive_count).sum()
    }

    /// Keep only the primitives for which `keep` returns true.
    ///
    /// `keep` receives the primitive kind and its placements. Removed
    /// primitives have their index ranges excised, and every part's
    /// `start_index` is recomputed from scratch so later parts stay aligned.
    /// Returns the number of primitives removed.
    pub fn retain_primitives<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(PrimitiveKind, &[usize]) -> bool,
    {
        let mut indices = Vec::with_capacity(self.indices.len());
        let mut index_placements = Vec::with_capacity(self.index_placements.len());
        let mut removed = 0;

        for record in &mut self.parts {
            let arity = record.kind.arity();
            let old_start = record.start_index;
            record.start_index = indices.len();

            let mut kept = Vec::with_capacity(record.primitives.len());
            for (k, &source) in record.primitives.iter().enumerate() {
                let range = old_start + k * arity..old_start + (k + 1) * arity;
                if keep(record.kind, &self.index_placements[range.clone()]) {
                    indices.extend_from_slice(&self.indices[range.clone()]);
                    index_placements.extend_from_slice(&self.index_placements[range]);
                    kept.push(source);
                } else {
                    removed += 1;
                }
            }
            record.primitives = kept;
        }

        self.indices = indices;
        self.index_placements = index_placements;
        removed
    }

    /// Check the buffer invariants: contiguous part slices of the right
    /// length, no index past the end of the vertex buffer, and every entry
    /// resolving to a placement of its own part's solid.
    pub fn validate(&self) -> BufferResult<()> {
        let mut expected_start = 0;
        for (part, record) in self.parts.iter().enumerate() {
            if record.start_index != expected_start {
                return Err(BufferError::OffsetMismatch {
                    part,
                    expected: expected_start,
                    found: record.start_index,
                });
            }
            expected_start = record.end_index();
        }

        if expected_start != self.indices.len() || self.index_placements.len() != self.indices.len() {
            return Err(BufferError::SliceMismatch {
                part: self.parts.len().saturating_sub(1),
                expected: expected_start,
                found: self.indices.len().min(self.index_placements.len()),
            });
        }

        if let Some(&index) = self.indices.iter().find(|&&i| i >= self.vertices.len()) {
            return Err(BufferError::DanglingIndex {
                index,
                len: self.vertices.len(),
            });
        }

        for (part, record) in self.parts.iter().enumerate() {
            for entry in record.start_index..record.end_index() {
                let expected = Placement {
                    solid: record.solid,
                    slot: self.indices[entry],
                };
                let found = self.placements.get(self.index_placements[entry]);
                if found != Some(&expected) {
                    return Err(BufferError::PlacementMismatch { part, entry });
                }
            }
        }

        Ok(())
    }

    fn primitive_range(&self, part: usize, k: usize) -> std::ops::Range<usize> {
        let record = &self.parts[part];
        let arity = record.kind.arity();
        let start = record.start_index + k * arity;
        start..start + arity
    }
}
