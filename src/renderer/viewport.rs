/// Physical size of the output surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: width.max(1),
            height: height.max(1),
        }
    }

    /// Returns `false` and keeps the old size when either side is zero,
    /// which winit reports while the window is minimized.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        true
    }

    pub fn apply(&self, config: &mut wgpu::SurfaceConfiguration) {
        config.width = self.width;
        config.height = self.height;
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn surface_config(width: u32, height: u32) -> wgpu::SurfaceConfiguration {
        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: wgpu::TextureFormat::Bgra8UnormSrgb,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    #[test]
    fn resize_sets_exact_surface_size() {
        let mut viewport = Viewport::new(1280, 720);
        let mut config = surface_config(1280, 720);

        assert!(viewport.resize(800, 600));
        viewport.apply(&mut config);

        assert_eq!((config.width, config.height), (800, 600));
        assert!((viewport.aspect() - 4.0 / 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn minimized_window_keeps_previous_size() {
        let mut viewport = Viewport::new(800, 600);
        assert!(!viewport.resize(0, 0));
        assert!(!viewport.resize(1024, 0));
        assert_eq!(viewport, Viewport::new(800, 600));
    }

    #[test]
    fn same_size_is_not_a_change() {
        let mut viewport = Viewport::new(800, 600);
        assert!(!viewport.resize(800, 600));
    }

    #[test]
    fn zero_initial_size_is_clamped() {
        let viewport = Viewport::new(0, 0);
        assert_eq!((viewport.width, viewport.height), (1, 1));
    }
}
