use cgmath::{Matrix4, SquareMatrix, Vector4};
use still_life::scene::transform::Transform;

fn apply(transform: &Transform, point: [f32; 3]) -> [f32; 3] {
    let p = transform.to_matrix() * Vector4::new(point[0], point[1], point[2], 1.0);
    [p.x, p.y, p.z]
}

fn assert_close(actual: [f32; 3], expected: [f32; 3]) {
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-5, "{actual:?} != {expected:?}");
    }
}

#[test]
fn default_transform_is_identity() {
    assert_eq!(Transform::default().to_matrix(), Matrix4::identity());
}

#[test]
fn scale_is_applied_before_translation() {
    let transform = Transform::new([2.0, 3.0, 4.0], [0.0; 3], [1.0, 1.0, 1.0]);
    assert_close(apply(&transform, [1.0, 1.0, 1.0]), [3.0, 4.0, 5.0]);
}

#[test]
fn rotation_is_applied_before_translation() {
    let transform = Transform::new([1.0; 3], [0.0, 0.0, 90.0], [5.0, 0.0, 0.0]);
    assert_close(apply(&transform, [1.0, 0.0, 0.0]), [5.0, 1.0, 0.0]);
}

#[test]
fn x_rotation_happens_first() {
    // X then Z: +Y becomes +Z under X, +Z is unchanged under Z
    let transform = Transform::new([1.0; 3], [90.0, 0.0, 90.0], [0.0; 3]);
    assert_close(apply(&transform, [0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);

    // while +X is left alone by X and turned to +Y by Z
    assert_close(apply(&transform, [1.0, 0.0, 0.0]), [0.0, 1.0, 0.0]);
}

#[test]
fn scale_happens_before_rotation() {
    let transform = Transform::new([2.0, 1.0, 1.0], [0.0, 0.0, 90.0], [0.0; 3]);
    assert_close(apply(&transform, [1.0, 0.0, 0.0]), [0.0, 2.0, 0.0]);
}

#[test]
fn laid_flat_plane_faces_the_camera() {
    // the backsplash: a floor plane rotated 90 degrees about X
    let transform = Transform::new([20.0, 1.0, 10.0], [90.0, 0.0, 0.0], [0.0, 10.0, -10.0]);
    assert_close(apply(&transform, [0.0, 0.0, 0.0]), [0.0, 10.0, -10.0]);
    assert_close(apply(&transform, [0.0, 0.0, 1.0]), [0.0, 0.0, -10.0]);
}
