//! Model transforms for the scene's primitives.
//!
//! Every object in the layout is placed with a scale, three Euler rotations
//! given in degrees and a position. The rotations are applied about the world
//! axes in X, Y, Z order, after scaling and before translating.

use cgmath::{Deg, Matrix4, Vector3};

/// Scale, rotation (degrees about X, Y and Z) and position of one draw call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub scale: Vector3<f32>,
    pub rotation_degrees: Vector3<f32>,
    pub position: Vector3<f32>,
}

impl Transform {
    pub fn new(scale: [f32; 3], rotation_degrees: [f32; 3], position: [f32; 3]) -> Self {
        Self {
            scale: scale.into(),
            rotation_degrees: rotation_degrees.into(),
            position: position.into(),
        }
    }

    /// `translation * rot_z * rot_y * rot_x * scale`
    pub fn to_matrix(&self) -> Matrix4<f32> {
        let scale = Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z);
        let rotation_x = Matrix4::from_angle_x(Deg(self.rotation_degrees.x));
        let rotation_y = Matrix4::from_angle_y(Deg(self.rotation_degrees.y));
        let rotation_z = Matrix4::from_angle_z(Deg(self.rotation_degrees.z));
        let translation = Matrix4::from_translation(self.position);

        translation * rotation_z * rotation_y * rotation_x * scale
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new([1.0; 3], [0.0; 3], [0.0; 3])
    }
}
