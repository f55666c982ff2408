use super::*;
use crate::foundation::core::Rgba;

fn records(d: &Drawing) -> Vec<Instruction> {
    d.log().iter().cloned().collect()
}

fn names(d: &Drawing) -> Vec<&'static str> {
    d.log().iter().map(Instruction::name).collect()
}

#[test]
fn size_is_frozen_once_recording_starts() {
    let mut d = Drawing::default();
    d.size((300u32, 200u32)).unwrap();
    assert_eq!((d.width(), d.height()), (300, 200));
    d.size(CanvasSize::square(64)).unwrap();
    d.rect(0.0, 0.0, 1.0, 1.0);
    let err = d.size((10u32, 10u32)).unwrap_err();
    assert!(err.is_usage());
    assert_eq!((d.width(), d.height()), (64, 64));
}

#[test]
fn zero_sized_canvas_is_rejected() {
    assert!(Drawing::default().size((0u32, 10u32)).unwrap_err().is_usage());
}

#[test]
fn screen_size_resolves_through_opts() {
    let screen = Canvas::new(800, 600).unwrap();
    let mut d = Drawing::new(DrawingOpts::default().with_screen(screen));
    d.size(CanvasSize::Screen).unwrap();
    assert_eq!((d.width(), d.height()), (800, 600));
    d.new_page(Some(CanvasSize::from((20u32, 10u32)))).unwrap();
    d.new_page(Some(CanvasSize::Screen)).unwrap();
    let canvases: Vec<_> = records(&d)
        .into_iter()
        .filter_map(|r| match r {
            Instruction::NewPage { canvas } => Some(canvas),
            _ => None,
        })
        .collect();
    assert_eq!(canvases, vec![Canvas::new(20, 10).unwrap(), screen]);
}

#[test]
fn new_page_without_size_reuses_current_canvas() {
    let mut d = Drawing::default();
    d.size(40u32).unwrap();
    d.rect(0.0, 0.0, 1.0, 1.0);
    d.new_page(None).unwrap();
    assert_eq!(d.log().page_count(), 2);
    assert_eq!(
        d.log().pages()[1].records()[0],
        Instruction::NewPage {
            canvas: Canvas::new(40, 40).unwrap()
        }
    );
}

#[test]
fn leading_canvas_is_taken_when_first_record_lands() {
    let mut d = Drawing::default();
    d.size(30u32).unwrap();
    d.fill(0.5).unwrap();
    d.new_page(Some(CanvasSize::square(90))).unwrap();
    assert_eq!(d.leading_canvas(), Canvas::new(30, 30).unwrap());
    assert_eq!(d.width(), 90);
}

#[test]
fn colors_are_normalized_before_recording() {
    let mut d = Drawing::default();
    d.fill(0.5).unwrap();
    d.stroke((1.0, 0.0, 0.0)).unwrap();
    d.fill(ColorArg::gray(0.2).with_alpha(0.5)).unwrap();
    d.stroke(ColorArg::none()).unwrap();
    assert_eq!(
        records(&d),
        vec![
            Instruction::Fill(Some(Rgba::new(0.5, 0.5, 0.5, 1.0))),
            Instruction::Stroke(Some(Rgba::new(1.0, 0.0, 0.0, 1.0))),
            Instruction::Fill(Some(Rgba::new(0.2, 0.2, 0.2, 0.5))),
            Instruction::Stroke(None),
        ]
    );
}

#[test]
fn bad_color_arity_records_nothing() {
    let mut d = Drawing::default();
    assert!(d.fill([0.1, 0.2]).unwrap_err().is_usage());
    assert!(d.stroke(ColorArg::channels(&[])).unwrap_err().is_usage());
    assert!(d.log().is_empty());
}

#[test]
fn shape_helpers_record_one_draw_each() {
    let mut d = Drawing::default();
    d.rect(0.0, 0.0, 10.0, 10.0);
    d.oval(0.0, 0.0, 10.0, 10.0);
    d.line((0.0, 0.0), (5.0, 5.0));
    d.polygon(&[Point::new(0.0, 0.0), Point::new(4.0, 0.0), Point::new(4.0, 4.0)], true)
        .unwrap();
    d.draw_path(None);
    assert_eq!(names(&d), vec!["drawPath"; 5]);
    assert_eq!(records(&d)[4], Instruction::DrawPath(None));
}

#[test]
fn polygon_needs_two_points() {
    let mut d = Drawing::default();
    assert!(d.polygon(&[Point::ORIGIN], false).unwrap_err().is_usage());
    assert!(d.log().is_empty());
}

#[test]
fn stroke_style_validation() {
    let mut d = Drawing::default();
    assert!(d.stroke_width(-1.0).unwrap_err().is_usage());
    assert!(d.stroke_width(f64::NAN).unwrap_err().is_usage());
    assert!(d.stroke_width(f64::INFINITY).unwrap_err().is_usage());
    let err = d.line_dash(Some(&[])).unwrap_err();
    assert!(err.to_string().contains("must supply a dash list or none"));
    d.line_dash(Some(&[2.0, 4.0])).unwrap();
    d.line_dash(None).unwrap();
    d.line_join(LineJoin::Round);
    d.line_cap(LineCap::Square);
    d.miter_limit(4.0);
    assert_eq!(
        records(&d),
        vec![
            Instruction::LineDash(Some(vec![2.0, 4.0])),
            Instruction::LineDash(None),
            Instruction::LineJoin(LineJoin::Round),
            Instruction::LineCap(LineCap::Square),
            Instruction::MiterLimit(4.0),
        ]
    );
}

#[test]
fn text_box_rejects_alignment() {
    let mut d = Drawing::default();
    let rect = Rect::new(0.0, 0.0, 100.0, 20.0);
    assert!(d.text_box("hi", rect, Some("center")).unwrap_err().is_usage());
    d.font("Helvetica Bold", Some(24.0));
    d.font_size(12.0);
    d.text_box("hi", rect, None).unwrap();
    assert_eq!(names(&d), vec!["font", "fontSize", "textBox"]);
}

#[test]
fn transforms_record_radians_and_ignore_centers() {
    let mut d = Drawing::default();
    d.translate(3.0, 4.0);
    d.rotate(90.0, Some(Point::new(5.0, 5.0)));
    d.scale(2.0, None, None);
    d.skew(45.0, 0.0, None);
    let affines: Vec<[f64; 6]> = records(&d)
        .into_iter()
        .map(|r| match r {
            Instruction::Transform(a) => a.as_coeffs(),
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(affines[0], [1.0, 0.0, 0.0, 1.0, 3.0, 4.0]);
    let [a, b, c, dd, e, f] = affines[1];
    assert!(a.abs() < 1e-12 && (b - 1.0).abs() < 1e-12 && (c + 1.0).abs() < 1e-12);
    assert!(dd.abs() < 1e-12 && e == 0.0 && f == 0.0);
    assert_eq!(affines[2], [2.0, 0.0, 0.0, 2.0, 0.0, 0.0]);
    assert!((affines[3][2] - 1.0).abs() < 1e-12);
    assert_eq!(affines[3][1], 0.0);
}

#[test]
fn saved_state_guard_restores_on_drop() {
    let mut d = Drawing::default();
    {
        let mut s = d.saved_state();
        s.fill(ColorArg::none()).unwrap();
    }
    let seven = d.with_saved_state(|d| {
        d.translate(1.0, 1.0);
        7
    });
    assert_eq!(seven, 7);
    assert_eq!(
        names(&d),
        vec!["save", "fill", "restore", "save", "transform", "restore"]
    );
}

#[test]
fn saved_state_guard_restores_on_early_error() {
    fn bad(d: &mut Drawing) -> SketchResult<()> {
        let mut s = d.saved_state();
        s.stroke_width(-2.0)?;
        s.rect(0.0, 0.0, 1.0, 1.0);
        Ok(())
    }
    let mut d = Drawing::default();
    assert!(bad(&mut d).is_err());
    assert_eq!(names(&d), vec!["save", "restore"]);
}

#[test]
fn new_drawing_clears_the_log_but_keeps_the_size() {
    let mut d = Drawing::default();
    d.size(50u32).unwrap();
    d.rect(0.0, 0.0, 1.0, 1.0);
    d.new_page(None).unwrap();
    d.new_drawing();
    d.end_drawing();
    assert!(d.log().is_empty());
    assert_eq!(d.log().pages().len(), 1);
    assert_eq!(d.width(), 50);
    d.size(60u32).unwrap();
}

#[test]
fn formats_parse_case_insensitively() {
    assert_eq!("PNG".parse::<ImageFormat>().unwrap(), ImageFormat::Png);
    assert_eq!("gif".parse::<ImageFormat>().unwrap(), ImageFormat::Gif);
    let err = "jpeg".parse::<ImageFormat>().unwrap_err();
    assert!(err.is_usage());
    assert!(err.to_string().contains("format 'jpeg' is not supported"));
}

#[test]
fn screen_size_env_parsing() {
    assert_eq!(parse_screen_size("320x240"), Canvas::new(320, 240).ok());
    assert_eq!(parse_screen_size(" 10 X 20 "), Canvas::new(10, 20).ok());
    assert_eq!(parse_screen_size("0x20"), None);
    assert_eq!(parse_screen_size("wide"), None);
}

#[test]
fn opts_builders() {
    let opts = DrawingOpts::default()
        .with_canvas(Canvas::new(10, 20).unwrap())
        .with_frame_duration(Duration::from_millis(250))
        .with_clear_rgba(Some([255, 255, 255, 255]));
    let d = Drawing::new(opts);
    assert_eq!((d.width(), d.height()), (10, 20));
    assert_eq!(d.opts().frame_duration, Duration::from_millis(250));
    assert_eq!(DrawingOpts::default().frame_duration, Duration::from_millis(100));
}
