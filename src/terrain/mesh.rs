use std::ops::RangeInclusive;

pub const DIMENSION_RANGE: RangeInclusive<f32> = 1.0..=20.0;
pub const SEGMENT_RANGE: RangeInclusive<u32> = 1..=50;

/// The four user-editable values that shape the terrain grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridParams {
    pub width: f32,
    pub height: f32,
    pub width_segments: u32,
    pub height_segments: u32,
}

impl Default for GridParams {
    fn default() -> Self {
        Self {
            width: 5.0,
            height: 5.0,
            width_segments: 10,
            height_segments: 10,
        }
    }
}

impl GridParams {
    pub fn columns(&self) -> usize {
        self.width_segments as usize + 1
    }

    pub fn rows(&self) -> usize {
        self.height_segments as usize + 1
    }

    pub fn vertex_count(&self) -> usize {
        self.columns() * self.rows()
    }

    pub fn is_in_range(&self) -> bool {
        DIMENSION_RANGE.contains(&self.width)
            && DIMENSION_RANGE.contains(&self.height)
            && SEGMENT_RANGE.contains(&self.width_segments)
            && SEGMENT_RANGE.contains(&self.height_segments)
    }
}

pub struct PlaneGeometry {
    pub vertices: Vec<f32>,
    pub normals: Vec<f32>,
    pub indices: Vec<u32>,
}

impl PlaneGeometry {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Area-weighted vertex normals from the current positions.
    pub fn recompute_normals(&mut self) {
        let mut accum = vec![glam::Vec3::ZERO; self.vertex_count()];

        for tri in self.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let pa = self.position(a);
            let pb = self.position(b);
            let pc = self.position(c);

            // unnormalized: the magnitude weights by triangle area
            let face = (pb - pa).cross(pc - pa);
            accum[a] += face;
            accum[b] += face;
            accum[c] += face;
        }

        self.normals.clear();
        self.normals.reserve(accum.len() * 3);
        for n in accum {
            let n = n.try_normalize().unwrap_or(glam::Vec3::Z);
            self.normals.extend_from_slice(&n.to_array());
        }
    }

    fn position(&self, index: usize) -> glam::Vec3 {
        glam::Vec3::from_slice(&self.vertices[index * 3..index * 3 + 3])
    }
}

/// Surface appearance of the terrain. Shared by every rebuilt geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 3],
    pub double_sided: bool,
    pub flat_shading: bool,
    pub shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: srgb_hex(0xdf0e3a),
            double_sided: true,
            flat_shading: true,
            shininess: 30.0,
        }
    }
}

fn srgb_hex(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| {
        let c = ((hex >> shift) & 0xff) as f32 / 255.0;
        // the surface format is sRGB, so the shader works in linear space
        if c <= 0.04045 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };
    [channel(16), channel(8), channel(0)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_params_are_in_range() {
        let params = GridParams::default();
        assert!(params.is_in_range());
        assert_eq!(params.vertex_count(), 121);
    }

    #[test]
    fn out_of_range_params_are_detected() {
        let too_wide = GridParams {
            width: 25.0,
            ..GridParams::default()
        };
        assert!(!too_wide.is_in_range());

        let no_segments = GridParams {
            height_segments: 0,
            ..GridParams::default()
        };
        assert!(!no_segments.is_in_range());
    }

    #[test]
    fn material_color_is_linear() {
        let material = Material::default();
        let [r, g, b] = material.color;
        assert!(r > 0.7 && r < 0.75);
        assert!(g < 0.01);
        assert!(b > 0.03 && b < 0.05);
    }

    #[test]
    fn flat_quad_normals_point_up() {
        let mut geometry = PlaneGeometry {
            vertices: vec![
                -1.0, 1.0, 0.0, //
                1.0, 1.0, 0.0, //
                -1.0, -1.0, 0.0, //
                1.0, -1.0, 0.0,
            ],
            normals: Vec::new(),
            indices: vec![0, 2, 1, 2, 3, 1],
        };
        geometry.recompute_normals();

        assert_eq!(geometry.normals.len(), 12);
        for n in geometry.normals.chunks_exact(3) {
            assert_eq!(n, [0.0, 0.0, 1.0]);
        }
    }
}
