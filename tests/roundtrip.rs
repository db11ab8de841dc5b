use ipp_message::{decode, encode_to_bytes, Attribute, DecodeOptions, Group, Message, Tag, Value};
use ipp_message::value::{DateTime, Resolution};

#[test]
fn empty_get_printer_attributes_request() {
    let mut message = Message::new_request((2, 0), 0x000b, 1);
    let attrs = vec![
        Attribute::new("attributes-charset", Tag::Charset, Value::String(b"utf-8".to_vec())),
        Attribute::new(
            "attributes-natural-language",
            Tag::Language,
            Value::String(b"en-US".to_vec()),
        ),
        Attribute::new("printer-uri", Tag::Uri, Value::String(b"ipp://h/".to_vec())),
    ];
    message.groups.push(Group::new(Tag::OperationGroup, attrs));

    let bytes = encode_to_bytes(&message).unwrap();
    let decoded = decode(&bytes[..], &DecodeOptions::default()).unwrap();
    assert_eq!(decoded, message);
}

#[test]
fn multi_value_attribute_preserves_order_and_uses_empty_names() {
    let attr = Attribute::with_values(
        "requested-attributes",
        vec![
            (Tag::Keyword, Value::String(b"copies".to_vec())),
            (Tag::Keyword, Value::String(b"sides".to_vec())),
            (Tag::Keyword, Value::String(b"media".to_vec())),
        ],
    )
    .unwrap();
    let mut message = Message::new_request((1, 1), 0x000b, 1);
    message.groups.push(Group::new(Tag::OperationGroup, vec![attr]));

    let bytes = encode_to_bytes(&message).unwrap();

    // Three Keyword (0x44) records: first named, next two with an empty name.
    let keyword_positions: Vec<usize> = bytes
        .iter()
        .enumerate()
        .filter(|&(_, &b)| b == Tag::Keyword.to_u8())
        .map(|(i, _)| i)
        .collect();
    assert_eq!(keyword_positions.len(), 3);
    let first_name_len = u16::from_be_bytes([bytes[keyword_positions[0] + 1], bytes[keyword_positions[0] + 2]]);
    assert_eq!(first_name_len as usize, "requested-attributes".len());
    for &pos in &keyword_positions[1..] {
        let name_len = u16::from_be_bytes([bytes[pos + 1], bytes[pos + 2]]);
        assert_eq!(name_len, 0);
    }

    let decoded = decode(&bytes[..], &DecodeOptions::default()).unwrap();
    assert_eq!(decoded, message);
    let values = &decoded.groups[0].attrs.as_ref().unwrap()[0].values;
    assert_eq!(values[0].1, Value::String(b"copies".to_vec()));
    assert_eq!(values[1].1, Value::String(b"sides".to_vec()));
    assert_eq!(values[2].1, Value::String(b"media".to_vec()));
}

#[test]
fn nested_collection_round_trips() {
    let media_size = Attribute::collection(
        "media-size",
        vec![
            Attribute::new("x-dimension", Tag::Integer, Value::Integer(21590)),
            Attribute::new("y-dimension", Tag::Integer, Value::Integer(27940)),
        ],
    );
    let media_type = Attribute::new("media-type", Tag::Keyword, Value::String(b"stationery".to_vec()));
    let media_col = Attribute::collection("media-col", vec![media_size, media_type]);

    let mut message = Message::new_request((1, 1), 0x0002, 1);
    message.groups.push(Group::new(Tag::OperationGroup, vec![media_col]));

    let bytes = encode_to_bytes(&message).unwrap();
    assert!(bytes.windows(1).filter(|w| w[0] == Tag::BeginCollection.to_u8()).count() >= 2);

    let decoded = decode(&bytes[..], &DecodeOptions::default()).unwrap();
    assert_eq!(decoded, message);
}

#[test]
fn date_time_leap_second_and_utc_plus_13_round_trips() {
    let dt = DateTime {
        year: 0x07cf,
        month: 12,
        day: 31,
        hour: 23,
        minute: 59,
        second: 60,
        deciseconds: 9,
        utc_sign: b'+',
        utc_hours: 13,
        utc_minutes: 0,
    };
    let attr = Attribute::new("date-time-at-completed", Tag::DateTime, Value::DateTime(dt));
    let mut message = Message::new_request((1, 1), 0x0002, 1);
    message.groups.push(Group::new(Tag::OperationGroup, vec![attr]));

    let bytes = encode_to_bytes(&message).unwrap();
    let decoded = decode(&bytes[..], &DecodeOptions::default()).unwrap();
    assert_eq!(decoded, message);
}

#[test]
fn resolution_round_trips() {
    let attr = Attribute::new(
        "printer-resolution",
        Tag::Resolution,
        Value::Resolution(Resolution { x: 300, y: 300, units: 3 }),
    );
    let mut message = Message::new_request((1, 1), 0x0002, 1);
    message.groups.push(Group::new(Tag::OperationGroup, vec![attr]));

    let bytes = encode_to_bytes(&message).unwrap();
    let decoded = decode(&bytes[..], &DecodeOptions::default()).unwrap();
    assert_eq!(decoded, message);
}

#[test]
fn extension_tag_binary_accepted_then_rejected_out_of_range() {
    let mut payload = vec![0x00, 0x00, 0x01, 0x00];
    payload.extend_from_slice(b"payload");
    let attr = Attribute::new("x-vendor-ext", Tag::Extension, Value::Binary(payload));
    let mut message = Message::new_request((1, 1), 0x0002, 1);
    message.groups.push(Group::new(Tag::OperationGroup, vec![attr]));

    let bytes = encode_to_bytes(&message).unwrap();
    let decoded = decode(&bytes[..], &DecodeOptions::default()).unwrap();
    assert_eq!(decoded, message);

    let mut bad_payload = vec![0x80, 0x00, 0x00, 0x01];
    bad_payload.extend_from_slice(b"payload");
    let bad_attr = Attribute::new("x-vendor-ext", Tag::Extension, Value::Binary(bad_payload));
    let mut bad_message = Message::new_request((1, 1), 0x0002, 1);
    bad_message
        .groups
        .push(Group::new(Tag::OperationGroup, vec![bad_attr]));
    assert!(encode_to_bytes(&bad_message).is_err());
}

#[test]
fn byte_determinism() {
    let mut message = Message::new_request((1, 1), 0x0002, 1);
    message.groups.push(Group::new(
        Tag::OperationGroup,
        vec![Attribute::new("copies", Tag::Integer, Value::Integer(3))],
    ));
    assert_eq!(encode_to_bytes(&message).unwrap(), encode_to_bytes(&message).unwrap());
}

#[test]
fn deep_copy_is_independent_and_equal() {
    let mut message = Message::new_request((1, 1), 0x0002, 1);
    message.groups.push(Group::new(
        Tag::OperationGroup,
        vec![Attribute::new("copies", Tag::Integer, Value::Integer(3))],
    ));
    let mut copy = message.clone();
    assert_eq!(copy, message);
    copy.groups[0].attrs.as_mut().unwrap()[0].values[0].1 = Value::Integer(9);
    assert_ne!(copy, message);
}
