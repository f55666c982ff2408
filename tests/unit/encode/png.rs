use super::*;

fn frame(data: Vec<u8>, premultiplied: bool) -> FrameRGBA {
    FrameRGBA {
        width: 2,
        height: 1,
        data,
        premultiplied,
    }
}

#[test]
fn png_round_trips_through_image_with_straight_alpha() {
    let bytes = encode_png(&frame(vec![128, 0, 0, 128, 0, 0, 255, 255], true)).unwrap();
    assert!(bytes.starts_with(b"\x89PNG"));
    let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
    assert_eq!(decoded.dimensions(), (2, 1));
    assert_eq!(decoded.get_pixel(0, 0).0, [255, 0, 0, 128]);
    assert_eq!(decoded.get_pixel(1, 0).0, [0, 0, 255, 255]);
}

#[test]
fn straight_frames_are_not_unpremultiplied_again() {
    let img = straight_rgba8(&frame(vec![100, 50, 0, 128, 0, 0, 0, 0], false)).unwrap();
    assert_eq!(img.get_pixel(0, 0).0, [100, 50, 0, 128]);
}

#[test]
fn mismatched_buffer_is_encode_error() {
    let err = encode_png(&frame(vec![0; 4], false)).unwrap_err();
    assert!(matches!(err, SketchError::Encode(_)));
}
