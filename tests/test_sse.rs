use emberweb::http::sse::Event;

#[test]
fn test_data_only_frame() {
    let frame = Event::new("x").to_bytes();
    assert_eq!(frame, b"data: x\r\n\r\n");
}

#[test]
fn test_event_field_precedes_data() {
    let frame = Event::new("x").event("e").to_bytes();
    assert_eq!(frame, b"event: e\r\ndata: x\r\n\r\n");
}

#[test]
fn test_all_optional_fields_in_order() {
    let frame = Event::new("x").id("7").event("tick").retry(1500).to_bytes();
    assert_eq!(
        frame,
        b"id: 7\r\nevent: tick\r\nretry: 1500\r\ndata: x\r\n\r\n"
    );
}

#[test]
fn test_field_order_is_fixed_regardless_of_builder_order() {
    let frame = Event::new("x").retry(1500).event("tick").id("7").to_bytes();
    assert_eq!(
        frame,
        b"id: 7\r\nevent: tick\r\nretry: 1500\r\ndata: x\r\n\r\n"
    );
}

#[test]
fn test_frame_always_ends_with_blank_line() {
    for frame in [
        Event::new("a").to_bytes(),
        Event::new("b").id("1").to_bytes(),
        Event::new("").to_bytes(),
    ] {
        assert!(frame.ends_with(b"\r\n\r\n"));
    }
}
