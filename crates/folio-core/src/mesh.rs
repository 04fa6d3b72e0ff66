//! CPU-side geometry: procedural shapes and the optional glTF hero.

use crate::error::AssetError;
use fnv::FnvHashSet;
use glam::Vec3;
use std::f32::consts::TAU;

/// Interleaved vertex uploaded as-is to the GPU.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Indexed triangle mesh.
#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Unique triangle edges as a line list, for wireframe drawing.
    pub fn wire_indices(&self) -> Vec<u32> {
        let mut seen: FnvHashSet<(u32, u32)> = FnvHashSet::default();
        let mut lines = Vec::with_capacity(self.indices.len() * 2);
        for tri in self.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                let key = if a < b { (a, b) } else { (b, a) };
                if seen.insert(key) {
                    lines.push(key.0);
                    lines.push(key.1);
                }
            }
        }
        lines
    }

    /// Radius of the origin-centred sphere enclosing every vertex.
    pub fn bounding_radius(&self) -> f32 {
        self.vertices
            .iter()
            .map(|v| Vec3::from_array(v.position).length())
            .fold(0.0, f32::max)
    }
}

fn knot_curve(u: f32, p: f32, q: f32, radius: f32) -> Vec3 {
    let cu = u.cos();
    let su = u.sin();
    let qu_over_p = q / p * u;
    let cs = qu_over_p.cos();
    Vec3::new(
        radius * (2.0 + cs) * 0.5 * cu,
        radius * (2.0 + cs) * su * 0.5,
        radius * qu_over_p.sin() * 0.5,
    )
}

/// (p, q) torus knot swept with a circular tube.
pub fn torus_knot(radius: f32, tube: f32, tubular: u32, radial: u32, p: u32, q: u32) -> MeshData {
    let tubular = tubular.max(3);
    let radial = radial.max(3);
    let (pf, qf) = (p.max(1) as f32, q.max(1) as f32);
    let mut vertices = Vec::with_capacity(((tubular + 1) * (radial + 1)) as usize);

    for i in 0..=tubular {
        let u = i as f32 / tubular as f32 * pf * TAU;
        let p1 = knot_curve(u, pf, qf, radius);
        let p2 = knot_curve(u + 0.01, pf, qf, radius);
        let t = p2 - p1;
        let mut n = p2 + p1;
        let b = t.cross(n).normalize_or_zero();
        n = b.cross(t).normalize_or_zero();

        for j in 0..=radial {
            let v = j as f32 / radial as f32 * TAU;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let pos = p1 + n * cx + b * cy;
            vertices.push(MeshVertex {
                position: pos.to_array(),
                normal: (pos - p1).normalize_or_zero().to_array(),
                uv: [i as f32 / tubular as f32, j as f32 / radial as f32],
            });
        }
    }

    let mut indices = Vec::with_capacity((tubular * radial * 6) as usize);
    for j in 1..=tubular {
        for i in 1..=radial {
            let a = (radial + 1) * (j - 1) + (i - 1);
            let b = (radial + 1) * j + (i - 1);
            let c = (radial + 1) * j + i;
            let d = (radial + 1) * (j - 1) + i;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    MeshData { vertices, indices }
}

/// Square grid in the XY plane, centred on the origin, facing +Z.
pub fn plane_grid(size: f32, segments: u32) -> MeshData {
    let segments = segments.max(1);
    let half = size * 0.5;
    let step = size / segments as f32;
    let row = segments + 1;
    let mut vertices = Vec::with_capacity((row * row) as usize);
    for iy in 0..=segments {
        let y = iy as f32 * step - half;
        for ix in 0..=segments {
            let x = ix as f32 * step - half;
            vertices.push(MeshVertex {
                position: [x, -y, 0.0],
                normal: [0.0, 0.0, 1.0],
                uv: [ix as f32 / segments as f32, 1.0 - iy as f32 / segments as f32],
            });
        }
    }
    let mut indices = Vec::with_capacity((segments * segments * 6) as usize);
    for iy in 0..segments {
        for ix in 0..segments {
            let a = ix + row * iy;
            let b = ix + row * (iy + 1);
            let c = (ix + 1) + row * (iy + 1);
            let d = (ix + 1) + row * iy;
            indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    MeshData { vertices, indices }
}

/// Axis-aligned cube with edge length `size`.
pub fn cube(size: f32) -> MeshData {
    let h = size * 0.5;
    let corners = [
        [-h, -h, -h],
        [h, -h, -h],
        [h, h, -h],
        [-h, h, -h],
        [-h, -h, h],
        [h, -h, h],
        [h, h, h],
        [-h, h, h],
    ];
    let vertices = corners
        .iter()
        .map(|&c| MeshVertex {
            position: c,
            normal: Vec3::from_array(c).normalize_or_zero().to_array(),
            uv: [0.0, 0.0],
        })
        .collect();
    #[rustfmt::skip]
    let indices = vec![
        0, 2, 1, 0, 3, 2, // back
        4, 5, 6, 4, 6, 7, // front
        0, 1, 5, 0, 5, 4, // bottom
        3, 7, 6, 3, 6, 2, // top
        0, 4, 7, 0, 7, 3, // left
        1, 2, 6, 1, 6, 5, // right
    ];
    MeshData { vertices, indices }
}

/// Decode a binary or embedded glTF into one merged triangle mesh.
///
/// Node transforms are ignored; the hero is expected to be authored at the
/// origin.
pub fn decode_gltf(bytes: &[u8]) -> Result<MeshData, AssetError> {
    let (document, buffers, _images) = gltf::import_slice(bytes)?;
    let mut out = MeshData::default();

    for (prim_index, primitive) in document
        .meshes()
        .flat_map(|m| m.primitives())
        .filter(|p| p.mode() == gltf::mesh::Mode::Triangles)
        .enumerate()
    {
        let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|d| d.0.as_slice()));
        let positions: Vec<[f32; 3]> = reader
            .read_positions()
            .ok_or(AssetError::MissingPositions(prim_index))?
            .collect();
        let normals: Vec<[f32; 3]> = reader
            .read_normals()
            .map(|n| n.collect())
            .unwrap_or_default();
        let uvs: Vec<[f32; 2]> = reader
            .read_tex_coords(0)
            .map(|tc| tc.into_f32().collect())
            .unwrap_or_default();

        let base = out.vertices.len() as u32;
        let count = positions.len();
        for (i, position) in positions.into_iter().enumerate() {
            out.vertices.push(MeshVertex {
                position,
                normal: normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                uv: uvs.get(i).copied().unwrap_or([0.0, 0.0]),
            });
        }

        match reader.read_indices() {
            Some(indices) => {
                for index in indices.into_u32() {
                    if index as usize >= count {
                        return Err(AssetError::IndexOutOfRange {
                            index,
                            vertices: count,
                        });
                    }
                    out.indices.push(base + index);
                }
            }
            None => out.indices.extend(base..base + count as u32),
        }
    }

    if out.indices.is_empty() {
        return Err(AssetError::NoPrimitives);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knot_vertex_and_index_counts() {
        let m = torus_knot(1.5, 0.4, 100, 16, 2, 3);
        assert_eq!(m.vertices.len(), 101 * 17);
        assert_eq!(m.triangle_count(), 100 * 16 * 2);
        assert!(m.indices.iter().all(|&i| (i as usize) < m.vertices.len()));
    }

    #[test]
    fn knot_fits_its_nominal_extent() {
        let m = torus_knot(1.5, 0.4, 100, 16, 2, 3);
        let r = m.bounding_radius();
        assert!(r > 1.0 && r <= 1.5 * 1.5 + 0.4 + 1e-3, "radius {r}");
    }

    #[test]
    fn plane_grid_layout() {
        let m = plane_grid(80.0, 64);
        assert_eq!(m.vertices.len(), 65 * 65);
        assert_eq!(m.vertices[0].position, [-40.0, 40.0, 0.0]);
        assert_eq!(m.vertices[0].uv, [0.0, 1.0]);
    }

    #[test]
    fn cube_wireframe_dedups_shared_edges() {
        let m = cube(1.0);
        // 12 box edges plus one diagonal per face
        assert_eq!(m.wire_indices().len(), (12 + 6) * 2);
    }

    #[test]
    fn garbage_is_not_a_model() {
        assert!(decode_gltf(b"definitely not gltf").is_err());
    }
}
