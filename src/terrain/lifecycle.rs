use rand::Rng;
use rand::rngs::StdRng;

use crate::terrain::grid::build_grid;
use crate::terrain::mesh::{GridParams, Material, PlaneGeometry};
use crate::terrain::perturb::perturb_heights;

/// Turns CPU-side geometry into a live resource and destroys it again.
pub trait GeometryStore {
    type Handle;

    fn upload(&mut self, geometry: &PlaneGeometry) -> Self::Handle;

    /// Frees the resource immediately rather than waiting for it to be dropped.
    fn release(&mut self, handle: Self::Handle);
}

#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
pub struct MeshStats {
    pub vertices: usize,
    pub triangles: usize,
    pub rebuilds: u64,
}

/// The single displayed terrain mesh. The material stays fixed while the
/// geometry handle is swapped out on every rebuild.
pub struct TerrainMesh<H, R = StdRng> {
    params: GridParams,
    material: Material,
    geometry: Option<H>,
    stats: MeshStats,
    rng: R,
}

impl<H, R: Rng> TerrainMesh<H, R> {
    pub fn new(material: Material, rng: R) -> Self {
        Self {
            params: GridParams::default(),
            material,
            geometry: None,
            stats: MeshStats::default(),
            rng,
        }
    }

    /// Replaces the live geometry with a freshly built and perturbed grid.
    /// The previous handle is released before the new one is created.
    pub fn rebuild<S>(&mut self, params: GridParams, store: &mut S)
    where
        S: GeometryStore<Handle = H>,
    {
        debug_assert!(params.is_in_range(), "grid params out of range: {params:?}");

        if let Some(old) = self.geometry.take() {
            store.release(old);
        }

        let mut geometry = build_grid(&params);
        perturb_heights(&mut geometry.vertices, &mut self.rng);
        geometry.recompute_normals();

        self.geometry = Some(store.upload(&geometry));
        self.params = params;
        self.stats.vertices = geometry.vertex_count();
        self.stats.triangles = geometry.triangle_count();
        self.stats.rebuilds += 1;

        tracing::debug!(
            width = params.width,
            height = params.height,
            width_segments = params.width_segments,
            height_segments = params.height_segments,
            vertices = self.stats.vertices,
            "terrain rebuilt"
        );
    }

    /// Re-rolls the heights with the current parameters.
    pub fn regenerate<S>(&mut self, store: &mut S)
    where
        S: GeometryStore<Handle = H>,
    {
        self.rebuild(self.params, store);
    }

    pub fn release<S>(&mut self, store: &mut S)
    where
        S: GeometryStore<Handle = H>,
    {
        if let Some(handle) = self.geometry.take() {
            store.release(handle);
            self.stats.vertices = 0;
            self.stats.triangles = 0;
        }
    }

    pub fn geometry(&self) -> Option<&H> {
        self.geometry.as_ref()
    }

    pub fn material(&self) -> &Material {
        &self.material
    }

    pub fn params(&self) -> GridParams {
        self.params
    }

    pub fn stats(&self) -> MeshStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[derive(Debug)]
    struct Handle {
        id: u64,
        vertex_count: usize,
        max_height: f32,
    }

    #[derive(Default)]
    struct CountingStore {
        next_id: u64,
        live: Vec<u64>,
        released: Vec<(u64, usize)>,
    }

    impl GeometryStore for CountingStore {
        type Handle = Handle;

        fn upload(&mut self, geometry: &PlaneGeometry) -> Handle {
            self.next_id += 1;
            self.live.push(self.next_id);
            Handle {
                id: self.next_id,
                vertex_count: geometry.vertex_count(),
                max_height: geometry
                    .vertices
                    .chunks_exact(3)
                    .map(|v| v[2])
                    .fold(f32::MIN, f32::max),
            }
        }

        fn release(&mut self, handle: Handle) {
            self.live.retain(|&id| id != handle.id);
            self.released.push((handle.id, handle.vertex_count));
        }
    }

    fn mesh(seed: u64) -> TerrainMesh<Handle> {
        TerrainMesh::new(Material::default(), StdRng::seed_from_u64(seed))
    }

    #[test]
    fn initial_build_installs_one_geometry() {
        let mut store = CountingStore::default();
        let mut terrain = mesh(1);
        assert!(terrain.geometry().is_none());

        terrain.rebuild(GridParams::default(), &mut store);

        let handle = terrain.geometry().expect("geometry installed");
        assert_eq!(handle.vertex_count, 121);
        assert!(handle.max_height > 0.0);
        assert_eq!(store.live.len(), 1);
        assert!(store.released.is_empty());
    }

    #[test]
    fn repeated_rebuilds_never_leak() {
        let mut store = CountingStore::default();
        let mut terrain = mesh(2);

        for i in 0..40u32 {
            let params = GridParams {
                width: 1.0 + (i % 20) as f32,
                height: 20.0 - (i % 19) as f32,
                width_segments: 1 + (i * 7) % 50,
                height_segments: 1 + (i * 3) % 50,
            };
            terrain.rebuild(params, &mut store);

            assert_eq!(store.live.len(), 1, "after rebuild {i}");
            assert_eq!(store.live[0], terrain.geometry().map(|h| h.id).unwrap_or(0));
        }

        assert_eq!(store.released.len(), 39);
        assert_eq!(terrain.stats().rebuilds, 40);
    }

    #[test]
    fn shrinking_width_segments_releases_previous_buffer() {
        let mut store = CountingStore::default();
        let mut terrain = mesh(3);
        terrain.rebuild(GridParams::default(), &mut store);
        let first_id = terrain.geometry().map(|h| h.id);

        let edited = GridParams {
            width_segments: 1,
            ..terrain.params()
        };
        terrain.rebuild(edited, &mut store);

        assert_eq!(terrain.geometry().map(|h| h.vertex_count), Some(22));
        assert_eq!(store.released, vec![(first_id.unwrap_or(0), 121)]);
        assert_eq!(terrain.stats().vertices, 22);
        assert_eq!(terrain.stats().triangles, 20);
    }

    #[test]
    fn material_survives_rebuilds() {
        let mut store = CountingStore::default();
        let mut terrain = mesh(4);
        let before = *terrain.material();

        terrain.rebuild(GridParams::default(), &mut store);
        terrain.regenerate(&mut store);

        assert_eq!(*terrain.material(), before);
        assert_eq!(terrain.params(), GridParams::default());
        assert_eq!(store.live.len(), 1);
    }

    #[test]
    fn release_drops_the_live_geometry() {
        let mut store = CountingStore::default();
        let mut terrain = mesh(5);
        terrain.rebuild(GridParams::default(), &mut store);

        terrain.release(&mut store);
        terrain.release(&mut store);

        assert!(terrain.geometry().is_none());
        assert!(store.live.is_empty());
        assert_eq!(store.released.len(), 1);
    }
}
