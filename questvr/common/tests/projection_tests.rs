use common::{Eye, EyeParameters, NASAL_NARROWING};

const EPS: f32 = 1e-5;

#[test]
fn test_eye_offsets_mirror() {
    let params = EyeParameters::QUEST_3;
    let left = params.eye_offset(Eye::Left);
    let right = params.eye_offset(Eye::Right);

    assert_eq!(left, -right);
    assert!((left.abs() - 0.0315).abs() < 1e-7);
    assert!((right - params.ipd / 2.0).abs() < 1e-7);
}

#[test]
fn test_constants() {
    let params = EyeParameters::default();
    assert_eq!(params.render_width, 1680);
    assert_eq!(params.render_height, 1760);
    assert_eq!(params.ipd, 0.063);
    assert_eq!(params.nasal_narrowing, 0.9);
    assert_eq!(NASAL_NARROWING, 0.9);
}

#[test]
fn test_unused_entries_are_zero() {
    let params = EyeParameters::QUEST_3;
    for eye in Eye::BOTH {
        for (near, far) in [(0.1, 100.0), (0.01, 1000.0), (1.0, 2.0)] {
            let m = params.projection_matrix(eye, near, far).cols;
            for i in [1, 2, 3, 4, 6, 7, 12, 13, 15] {
                assert_eq!(m[i], 0.0, "entry {} for {:?}", i, eye);
            }
            assert_eq!(m[11], -1.0);
        }
    }
}

#[test]
fn test_left_eye_frustum_and_scale() {
    let params = EyeParameters::QUEST_3;
    let frustum = params.frustum(Eye::Left, 0.1);

    assert!((frustum.left + 0.1).abs() < EPS);
    assert!((frustum.right - 0.09).abs() < EPS);
    assert!((frustum.top - 50f32.to_radians().tan() * 0.1).abs() < EPS);
    assert!((frustum.bottom + 55f32.to_radians().tan() * 0.1).abs() < EPS);

    let m = params.projection_matrix(Eye::Left, 0.1, 100.0).cols;
    let expected = 2.0 * 0.1 / (frustum.right - frustum.left);
    assert!((m[0] - expected).abs() < 1e-6);
    assert!((m[0] - 0.2 / 0.19).abs() < 1e-4);
}

#[test]
fn test_right_eye_is_narrowed_on_the_left() {
    let params = EyeParameters::QUEST_3;
    let frustum = params.frustum(Eye::Right, 0.1);

    assert!((frustum.left + 0.09).abs() < EPS);
    assert!((frustum.right - 0.1).abs() < EPS);
}

#[test]
fn test_eyes_are_mirror_images() {
    let params = EyeParameters::QUEST_3;
    let left = params.projection_matrix(Eye::Left, 0.1, 100.0).cols;
    let right = params.projection_matrix(Eye::Right, 0.1, 100.0).cols;

    assert!((left[8] + right[8]).abs() < 1e-7);
    assert!(left[8] < 0.0);
    for i in [0, 5, 9, 10, 14] {
        assert!((left[i] - right[i]).abs() < 1e-7, "entry {}", i);
    }
}

#[test]
fn test_depth_terms() {
    let params = EyeParameters::QUEST_3;
    let (near, far) = (0.1f32, 100.0f32);
    let m = params.projection_matrix(Eye::Left, near, far).cols;

    assert!((m[10] + (far + near) / (far - near)).abs() < 1e-6);
    assert!((m[14] + 2.0 * far * near / (far - near)).abs() < 1e-6);

    let top = 50f32.to_radians().tan() * near;
    let bottom = -55f32.to_radians().tan() * near;
    assert!((m[5] - 2.0 * near / (top - bottom)).abs() < 1e-5);
    assert!((m[9] - (top + bottom) / (top - bottom)).abs() < 1e-5);
}

#[test]
fn test_degenerate_clip_planes_are_not_guarded() {
    let params = EyeParameters::QUEST_3;

    let m = params.projection_matrix(Eye::Left, 1.0, 1.0).cols;
    assert!(!m[10].is_finite());
    assert!(!m[14].is_finite());

    let m = params.projection_matrix(Eye::Right, 0.0, 100.0).cols;
    assert!(!m[0].is_finite());
}

#[test]
fn test_glam_and_flat_layouts_agree() {
    let params = EyeParameters::QUEST_3;
    let mat = params.projection(Eye::Right, 0.1, 100.0);
    let flat = params.projection_matrix(Eye::Right, 0.1, 100.0);

    assert_eq!(mat.x_axis.x, flat.cols[0]);
    assert_eq!(mat.z_axis.x, flat.cols[8]);
    assert_eq!(mat.z_axis.w, flat.cols[11]);
    assert_eq!(mat.w_axis.z, flat.cols[14]);
}
