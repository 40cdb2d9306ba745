use rand::Rng;

/// Raises the out-of-plane (z) coordinate of every vertex by a uniform draw
/// from `[0, 1)`.
pub fn perturb_heights<R: Rng + ?Sized>(vertices: &mut [f32], rng: &mut R) {
    for vertex in vertices.chunks_exact_mut(3) {
        vertex[2] += rng.random::<f32>();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn zeroed_buffer_gets_unit_interval_heights() {
        let mut vertices = vec![0.0f32; 12 * 3];
        let mut rng = StdRng::seed_from_u64(7);

        perturb_heights(&mut vertices, &mut rng);

        let heights: Vec<f32> = vertices.chunks_exact(3).map(|v| v[2]).collect();
        assert_eq!(heights.len(), 12);
        assert!(heights.iter().all(|z| (0.0..1.0).contains(z)));
        assert!(vertices.chunks_exact(3).all(|v| v[0] == 0.0 && v[1] == 0.0));
    }

    #[test]
    fn heights_never_decrease() {
        let original: Vec<f32> = (0..30).map(|i| i as f32 * 0.25 - 3.0).collect();
        let mut vertices = original.clone();
        let mut rng = StdRng::seed_from_u64(42);

        perturb_heights(&mut vertices, &mut rng);

        for (before, after) in original.chunks_exact(3).zip(vertices.chunks_exact(3)) {
            assert_eq!(before[0], after[0]);
            assert_eq!(before[1], after[1]);
            // the sum may round up to exactly 1.0 away from zero
            let delta = after[2] - before[2];
            assert!((0.0..=1.0).contains(&delta), "delta {delta}");
        }
    }

    #[test]
    fn same_seed_same_surface() {
        let mut a = vec![0.0f32; 27];
        let mut b = vec![0.0f32; 27];

        perturb_heights(&mut a, &mut StdRng::seed_from_u64(3));
        perturb_heights(&mut b, &mut StdRng::seed_from_u64(3));

        assert_eq!(a, b);
    }

    #[test]
    fn perturbed_grid_normals_stay_upward() {
        let mut geometry = crate::terrain::grid::build_grid(&crate::terrain::GridParams::default());
        perturb_heights(&mut geometry.vertices, &mut StdRng::seed_from_u64(11));
        geometry.recompute_normals();

        for n in geometry.normals.chunks_exact(3) {
            let n = glam::Vec3::from_slice(n);
            assert!((n.length() - 1.0).abs() < 1e-4);
            assert!(n.z > 0.0);
        }
    }
}
