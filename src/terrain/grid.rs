use crate::terrain::mesh::{GridParams, PlaneGeometry};

/// Builds a flat grid in the XY plane, centred on the origin and facing +Z.
///
/// Vertices are laid out row-major starting at the top-left corner. Each cell
/// contributes two counter-clockwise triangles.
pub fn build_grid(params: &GridParams) -> PlaneGeometry {
    let columns = params.columns();
    let rows = params.rows();

    let half_width = params.width / 2.0;
    let half_height = params.height / 2.0;
    let cell_width = params.width / params.width_segments as f32;
    let cell_height = params.height / params.height_segments as f32;

    let mut vertices = Vec::with_capacity(params.vertex_count() * 3);
    let mut normals = Vec::with_capacity(params.vertex_count() * 3);

    for iy in 0..rows {
        let y = half_height - iy as f32 * cell_height;
        for ix in 0..columns {
            let x = -half_width + ix as f32 * cell_width;

            vertices.extend_from_slice(&[x, y, 0.0]);
            normals.extend_from_slice(&[0.0, 0.0, 1.0]);
        }
    }

    let cells = params.width_segments as usize * params.height_segments as usize;
    let mut indices = Vec::with_capacity(cells * 6);

    for iy in 0..rows - 1 {
        for ix in 0..columns - 1 {
            let a = (iy * columns + ix) as u32;
            let b = ((iy + 1) * columns + ix) as u32;
            let c = ((iy + 1) * columns + ix + 1) as u32;
            let d = (iy * columns + ix + 1) as u32;

            indices.extend_from_slice(&[a, b, d]);
            indices.extend_from_slice(&[b, c, d]);
        }
    }

    PlaneGeometry {
        vertices,
        normals,
        indices,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(width: f32, height: f32, width_segments: u32, height_segments: u32) -> GridParams {
        GridParams {
            width,
            height,
            width_segments,
            height_segments,
        }
    }

    #[test]
    fn default_grid_is_eleven_by_eleven() {
        let geometry = build_grid(&GridParams::default());

        assert_eq!(geometry.vertex_count(), 121);
        assert_eq!(geometry.vertices.len(), 363);
        assert_eq!(geometry.normals.len(), 363);
        assert_eq!(geometry.triangle_count(), 200);
    }

    #[test]
    fn vertex_buffer_length_matches_segments() {
        for (ws, hs) in [(1, 1), (1, 50), (50, 1), (7, 13), (50, 50)] {
            let p = params(3.0, 4.0, ws, hs);
            let geometry = build_grid(&p);

            let expected = 3 * (ws as usize + 1) * (hs as usize + 1);
            assert_eq!(geometry.vertices.len(), expected, "segments {ws}x{hs}");
            assert_eq!(geometry.indices.len(), 6 * ws as usize * hs as usize);
        }
    }

    #[test]
    fn single_width_segment_gives_two_columns() {
        let geometry = build_grid(&params(5.0, 5.0, 1, 10));
        assert_eq!(geometry.vertex_count(), 22);
    }

    #[test]
    fn corners_span_the_rectangle() {
        let geometry = build_grid(&params(4.0, 2.0, 4, 2));
        let v = &geometry.vertices;
        let last = geometry.vertex_count() - 1;

        assert_eq!(&v[0..3], &[-2.0, 1.0, 0.0]);
        assert_eq!(&v[4 * 3..4 * 3 + 3], &[2.0, 1.0, 0.0]);
        assert_eq!(&v[last * 3..last * 3 + 3], &[2.0, -1.0, 0.0]);
        assert!(v.chunks_exact(3).all(|p| p[2] == 0.0));
    }

    #[test]
    fn indices_stay_in_bounds() {
        let geometry = build_grid(&params(20.0, 1.0, 50, 3));
        let count = geometry.vertex_count() as u32;
        assert!(geometry.indices.iter().all(|&i| i < count));
    }

    #[test]
    fn triangles_face_positive_z() {
        let geometry = build_grid(&params(2.0, 2.0, 2, 2));
        let v = &geometry.vertices;
        let pos = |i: u32| glam::Vec3::from_slice(&v[i as usize * 3..i as usize * 3 + 3]);

        for tri in geometry.indices.chunks_exact(3) {
            let n = (pos(tri[1]) - pos(tri[0])).cross(pos(tri[2]) - pos(tri[0]));
            assert!(n.z > 0.0);
        }
    }
}
