use super::*;

#[test]
fn canvas_rejects_zero_dimensions() {
    assert!(Canvas::new(0, 10).unwrap_err().is_usage());
    assert!(Canvas::new(10, 0).unwrap_err().is_usage());
    assert_eq!(
        Canvas::new(3, 4).unwrap(),
        Canvas {
            width: 3,
            height: 4
        }
    );
}

#[test]
fn default_canvas_is_500_square() {
    let c = Canvas::default();
    assert_eq!((c.width, c.height), (500, 500));
}

#[test]
fn screen_size_resolves_through_host() {
    let screen = Canvas::new(1024, 768).unwrap();
    assert_eq!(CanvasSize::Screen.resolve(screen).unwrap(), screen);
    assert_eq!(
        CanvasSize::from(20).resolve(screen).unwrap(),
        Canvas::new(20, 20).unwrap()
    );
    assert!(CanvasSize::from((0, 5)).resolve(screen).is_err());
}

#[test]
fn rgba8_quantization_clamps_and_rounds() {
    assert_eq!(Rgba::new(0.5, 0.0, 1.0, 1.0).to_rgba8(), [128, 0, 255, 255]);
    assert_eq!(Rgba::new(-1.0, 2.0, f64::NAN, 0.0).to_rgba8(), [0, 255, 0, 0]);
    assert_eq!(Rgba::gray(0.25, 1.0).r, 0.25);
}

#[test]
fn join_and_cap_names_round_trip() {
    for join in [LineJoin::Miter, LineJoin::Round, LineJoin::Bevel] {
        assert_eq!(join.as_str().parse::<LineJoin>().unwrap(), join);
    }
    for cap in [LineCap::Butt, LineCap::Round, LineCap::Square] {
        assert_eq!(cap.as_str().parse::<LineCap>().unwrap(), cap);
    }
    assert!("pointy".parse::<LineJoin>().unwrap_err().is_usage());
    assert!("flat".parse::<LineCap>().unwrap_err().is_usage());
}
