use glam::{Mat4, Vec2, Vec3};

const MAX_PITCH_DEG: f32 = 89.0;

/// Perspective camera orbiting a target point. Left drag rotates, right drag
/// pans the target, the wheel dollies in and out.
pub struct Camera {
    pub target: Vec3,
    pub distance: f32,
    pub yaw: f32,
    pub pitch: f32,

    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,

    pub rotate_sensitivity: f32,
    pub zoom_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            target: Vec3::ZERO,
            distance: 5.0,
            yaw: 90.0_f32.to_radians(),
            pitch: 0.0,

            fov: 75.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,

            rotate_sensitivity: 0.005,
            zoom_factor: 0.95,
            min_distance: 0.5,
            max_distance: 500.0,
        }
    }
}

impl Camera {
    pub fn position(&self) -> Vec3 {
        self.target
            + Vec3::new(
                self.distance * self.yaw.cos() * self.pitch.cos(),
                self.distance * self.pitch.sin(),
                self.distance * self.yaw.sin() * self.pitch.cos(),
            )
    }

    pub fn front(&self) -> Vec3 {
        (self.target - self.position()).normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.front().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.front())
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw += delta.x * self.rotate_sensitivity;
        self.pitch += delta.y * self.rotate_sensitivity;

        let max_pitch = MAX_PITCH_DEG.to_radians();
        self.pitch = self.pitch.clamp(-max_pitch, max_pitch);
    }

    /// Moves the target so the point under the cursor follows the drag.
    pub fn pan(&mut self, delta: Vec2, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }

        let world_per_pixel = 2.0 * self.distance * (self.fov / 2.0).tan() / viewport_height;
        let right = self.right();
        let up = self.up();

        self.target -= right * delta.x * world_per_pixel;
        self.target += up * delta.y * world_per_pixel;
    }

    pub fn zoom(&mut self, scroll: f32) {
        self.distance =
            (self.distance * self.zoom_factor.powf(scroll)).clamp(self.min_distance, self.max_distance);
    }

    pub fn set_aspect(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 3],
    pub _padding: f32,
}

impl CameraUniform {
    pub fn from_camera(camera: &Camera) -> Self {
        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            camera_pos: camera.position().to_array(),
            _padding: 0.0,
        }
    }
}
