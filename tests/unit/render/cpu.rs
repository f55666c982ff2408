use super::*;
use crate::foundation::math::flip_y;

fn canvas(w: u32, h: u32) -> Canvas {
    Canvas::new(w, h).unwrap()
}

fn rect_path(x0: f64, y0: f64, x1: f64, y1: f64) -> BezPath {
    Rect::new(x0, y0, x1, y1).to_path(0.1)
}

#[test]
fn fills_land_where_the_transform_puts_them() {
    let mut b = CpuBackend::default();
    b.begin_page(canvas(20, 20)).unwrap();
    b.concat_transform(flip_y(20.0)).unwrap();
    b.fill_path(&rect_path(0.0, 0.0, 10.0, 10.0), Rgba::new(1.0, 0.0, 0.0, 1.0))
        .unwrap();
    b.end_page().unwrap();

    let f = b.last_frame().unwrap();
    assert!(f.premultiplied);
    assert_eq!((f.width, f.height), (20, 20));
    // Bottom-left origin: the square occupies the lower-left quadrant of the raster.
    assert_eq!(f.pixel(5, 15), Some([255, 0, 0, 255]));
    assert_eq!(f.pixel(5, 5), Some([0, 0, 0, 0]));
    assert_eq!(f.pixel(15, 15), Some([0, 0, 0, 0]));
}

#[test]
fn clear_color_fills_each_page() {
    let mut b =
        CpuBackend::new(CpuBackendOpts::default().with_clear_rgba(Some([255, 255, 255, 255])));
    b.begin_page(canvas(4, 4)).unwrap();
    b.end_page().unwrap();
    assert_eq!(b.last_frame().unwrap().pixel(2, 2), Some([255, 255, 255, 255]));
}

#[test]
fn strokes_paint_outside_the_fill_area() {
    let mut b = CpuBackend::default();
    b.begin_page(canvas(20, 20)).unwrap();
    let stroke = Stroke::new(4.0);
    b.stroke_path(&rect_path(5.0, 5.0, 15.0, 15.0), Rgba::new(0.0, 0.0, 1.0, 1.0), &stroke)
        .unwrap();
    b.end_page().unwrap();
    let f = b.last_frame().unwrap();
    assert_eq!(f.pixel(10, 4), Some([0, 0, 255, 255]));
    assert_eq!(f.pixel(10, 10), Some([0, 0, 0, 0]));
}

#[test]
fn saved_state_restores_the_transform() {
    let mut b = CpuBackend::default();
    b.begin_page(canvas(20, 20)).unwrap();
    b.save_gstate().unwrap();
    b.concat_transform(Affine::translate((10.0, 0.0))).unwrap();
    b.restore_gstate().unwrap();
    b.fill_path(&rect_path(0.0, 0.0, 5.0, 5.0), Rgba::BLACK).unwrap();
    b.end_page().unwrap();
    let f = b.last_frame().unwrap();
    assert_eq!(f.pixel(2, 2), Some([0, 0, 0, 255]));
    assert_eq!(f.pixel(12, 2), Some([0, 0, 0, 0]));
}

#[test]
fn misuse_is_reported() {
    let mut b = CpuBackend::default();
    assert!(b.end_page().is_err());
    assert!(b.fill_path(&rect_path(0.0, 0.0, 1.0, 1.0), Rgba::BLACK).is_err());
    b.begin_page(canvas(2, 2)).unwrap();
    assert!(b.begin_page(canvas(2, 2)).is_err());
    assert!(b.restore_gstate().is_err());
    assert!(b.has_open_page());
}

#[test]
fn oversized_pages_are_rejected() {
    let mut b = CpuBackend::default();
    assert!(b.begin_page(canvas(70_000, 1)).is_err());
    assert!(!b.has_open_page());
}

#[test]
fn frames_accumulate_in_page_order() {
    let mut b = CpuBackend::default();
    for w in [3, 5] {
        b.begin_page(canvas(w, 2)).unwrap();
        b.end_page().unwrap();
    }
    let frames = b.take_frames();
    assert_eq!(frames.iter().map(|f| f.width).collect::<Vec<_>>(), [3, 5]);
    assert!(b.frames().is_empty());
}

#[test]
fn dashed_strokes_convert_their_pattern() {
    let s = Stroke::new(2.0)
        .with_join(Join::Round)
        .with_caps(Cap::Square)
        .with_dashes(1.0, [2.0, 4.0]);
    let out = stroke_to_cpu(&s);
    assert_eq!(out.width, 2.0);
    assert_eq!(out.dash_offset, 1.0);
    assert_eq!(out.dash_pattern.as_slice(), &[2.0, 4.0]);
    assert_eq!(out.join, vello_cpu::kurbo::Join::Round);
}
