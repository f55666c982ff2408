use kurbo::{Affine, Point};

pub(crate) fn translate_matrix(x: f64, y: f64) -> Affine {
    Affine::new([1.0, 0.0, 0.0, 1.0, x, y])
}

/// Rotation by `radians`, counter-clockwise in a y-up space.
pub(crate) fn rotate_matrix(radians: f64) -> Affine {
    let (s, c) = radians.sin_cos();
    Affine::new([c, s, -s, c, 0.0, 0.0])
}

pub(crate) fn scale_matrix(x: f64, y: f64) -> Affine {
    Affine::new([x, 0.0, 0.0, y, 0.0, 0.0])
}

/// Shear with `tan(x_radians)` on the x axis and `tan(y_radians)` on the y axis.
pub(crate) fn skew_matrix(x_radians: f64, y_radians: f64) -> Affine {
    Affine::new([1.0, y_radians.tan(), x_radians.tan(), 1.0, 0.0, 0.0])
}

/// Maps a bottom-left origin onto a top-left raster of the given height.
pub(crate) fn flip_y(height: f64) -> Affine {
    Affine::new([1.0, 0.0, 0.0, -1.0, 0.0, height])
}

/// Transform centers are accepted but not applied.
pub(crate) fn warn_if_centered(op: &'static str, center: Option<Point>) {
    if let Some(c) = center
        && c != Point::ORIGIN
    {
        tracing::warn!(op, x = c.x, y = c.y, "center is not implemented; using the origin");
    }
}

pub(crate) fn warn_not_implemented(what: &'static str) {
    tracing::warn!("{what} is not implemented");
}

/// Straight alpha from premultiplied RGBA8, rounding to nearest.
pub(crate) fn unpremultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = u32::from(px[3]);
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        if a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u32::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
