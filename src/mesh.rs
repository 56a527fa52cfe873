//! Mesh vertex suppliers.
//!
//! The simulation only needs a list of points. [`VertexSource`] is that
//! seam; [`ObjMesh`] fills it from a Wavefront OBJ file.

use glam::Vec3;
use std::io::BufRead;
use std::path::Path;

use crate::error::MeshError;

/// Longest side of the bounding box after normalization.
pub const NORMALIZED_EXTENT: f32 = 200.0;

/// Anything that can hand over a list of 3D points.
pub trait VertexSource {
    fn vertices(&self) -> &[Vec3];
}

impl VertexSource for [Vec3] {
    fn vertices(&self) -> &[Vec3] {
        self
    }
}

impl VertexSource for Vec<Vec3> {
    fn vertices(&self) -> &[Vec3] {
        self
    }
}

/// Vertex positions of every model in an OBJ file.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjMesh {
    positions: Vec<Vec3>,
}

impl ObjMesh {
    /// Load from disk. With `normalize` the model is centred on the origin
    /// and scaled so its longest side spans [`NORMALIZED_EXTENT`] units.
    pub fn load(path: impl AsRef<Path>, normalize: bool) -> Result<Self, MeshError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(path, &load_options())?;
        let mesh = Self::from_models(&models, normalize)?;

        tracing::info!(
            path = %path.display(),
            models = models.len(),
            vertices = mesh.positions.len(),
            "loaded mesh"
        );

        Ok(mesh)
    }

    /// Parse OBJ text from a reader. Material libraries are ignored.
    pub fn from_reader<R: BufRead>(reader: &mut R, normalize: bool) -> Result<Self, MeshError> {
        let (models, _materials) =
            tobj::load_obj_buf(reader, &load_options(), |_| Err(tobj::LoadError::OpenFileFailed))?;
        Self::from_models(&models, normalize)
    }

    fn from_models(models: &[tobj::Model], normalize: bool) -> Result<Self, MeshError> {
        let mut positions = Vec::new();
        for model in models {
            positions.extend(
                model
                    .mesh
                    .positions
                    .chunks_exact(3)
                    .map(|p| Vec3::new(p[0], p[1], p[2])),
            );
        }

        if positions.is_empty() {
            return Err(MeshError::Empty);
        }

        if normalize {
            normalize_positions(&mut positions);
        }

        Ok(Self { positions })
    }
}

impl VertexSource for ObjMesh {
    fn vertices(&self) -> &[Vec3] {
        &self.positions
    }
}

fn load_options() -> tobj::LoadOptions {
    // Positions stay per model, no re-indexing against normals/texcoords.
    tobj::LoadOptions {
        single_index: false,
        triangulate: false,
        ignore_points: false,
        ignore_lines: false,
        ..Default::default()
    }
}

/// Centre the bounding box on the origin and scale its longest side to
/// [`NORMALIZED_EXTENT`]. Degenerate (single point) boxes are only centred.
pub fn normalize_positions(positions: &mut [Vec3]) {
    let Some(&first) = positions.first() else {
        return;
    };

    let (min, max) = positions
        .iter()
        .fold((first, first), |(lo, hi), &p| (lo.min(p), hi.max(p)));

    let center = (min + max) * 0.5;
    let longest = (max - min).max_element();
    let scale = if longest > 0.0 { NORMALIZED_EXTENT / longest } else { 1.0 };

    for p in positions.iter_mut() {
        *p = (*p - center) * scale;
    }
}
