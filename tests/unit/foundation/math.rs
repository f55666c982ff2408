use super::*;

fn close(a: Affine, b: [f64; 6]) -> bool {
    a.as_coeffs()
        .iter()
        .zip(b.iter())
        .all(|(x, y)| (x - y).abs() < 1e-12)
}

#[test]
fn rotate_quarter_turn_maps_x_to_y() {
    let m = rotate_matrix(std::f64::consts::FRAC_PI_2);
    let p = m * Point::new(1.0, 0.0);
    assert!((p.x).abs() < 1e-12);
    assert!((p.y - 1.0).abs() < 1e-12);
}

#[test]
fn skew_puts_tangents_off_diagonal() {
    let m = skew_matrix(45f64.to_radians(), 0.0);
    assert!(close(m, [1.0, 0.0, 1.0, 1.0, 0.0, 0.0]));
}

#[test]
fn flip_maps_bottom_left_to_top_left() {
    let p = flip_y(100.0) * Point::new(10.0, 0.0);
    assert_eq!(p, Point::new(10.0, 100.0));
    assert!(close(translate_matrix(2.0, 3.0), [1.0, 0.0, 0.0, 1.0, 2.0, 3.0]));
    assert!(close(scale_matrix(2.0, 3.0), [2.0, 0.0, 0.0, 3.0, 0.0, 0.0]));
}

#[test]
fn unpremultiply_restores_half_alpha_red() {
    let mut px = vec![128, 0, 0, 128, 0, 0, 255, 255];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![255, 0, 0, 128, 0, 0, 255, 255]);
}

#[test]
fn unpremultiply_zero_alpha_is_transparent_black() {
    let mut px = vec![10, 20, 30, 0];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(px, vec![0, 0, 0, 0]);
}
