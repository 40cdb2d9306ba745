use glam::Vec3;

/// A light infinitely far away, shining from `position` towards `target`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            position: Vec3::new(0.0, 0.0, 1.0),
            target: Vec3::ZERO,
        }
    }
}

impl DirectionalLight {
    /// Unit vector pointing from the surface towards the light.
    pub fn to_light(&self) -> Vec3 {
        (self.position - self.target).try_normalize().unwrap_or(Vec3::Z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_light_shines_down_the_z_axis() {
        let light = DirectionalLight::default();
        assert_eq!(light.to_light(), Vec3::Z);
        assert_eq!(light.intensity, 1.0);
    }

    #[test]
    fn degenerate_light_falls_back_to_z() {
        let light = DirectionalLight {
            position: Vec3::ZERO,
            ..DirectionalLight::default()
        };
        assert_eq!(light.to_light(), Vec3::Z);
    }
}
