use tinypack::buffers::{ChunkedSource, IoSource, Reader};
use tinypack::{packb, skip, validate, DecodeError, ExtType, Value};

fn doc() -> Value {
    Value::Map(vec![
        (Value::Str("name".into()), Value::Str("probe-7".into())),
        (Value::Str("raw".into()), Value::Bin(vec![0; 300])),
        (
            Value::Str("log".into()),
            Value::Array((0..40).map(|i| Value::Int(i * 1_000)).collect()),
        ),
        (Value::Str("ext".into()), Value::Ext(ExtType::new(3, vec![1; 20]).unwrap())),
        (Value::Str("t".into()), Value::Float(-0.5)),
    ])
}

#[test]
fn msgpack_skip_reports_encoded_size() {
    let first = packb(&doc(), None).unwrap();
    let second = packb(&Value::<std::convert::Infallible>::Int(-200), None).unwrap();
    let mut stream = first.clone();
    stream.extend_from_slice(&second);

    let mut reader = Reader::new(&stream);
    assert_eq!(skip(&mut reader).unwrap(), first.len());
    assert_eq!(reader.rest(), second.as_slice());
    assert_eq!(skip(&mut reader).unwrap(), second.len());
    assert_eq!(reader.size(), 0);
}

#[test]
fn msgpack_skip_over_streaming_sources() {
    let bytes = packb(&doc(), None).unwrap();

    let mut chunked = ChunkedSource::new();
    for chunk in bytes.chunks(7) {
        chunked.push(chunk.to_vec());
    }
    assert_eq!(skip(&mut chunked).unwrap(), bytes.len());

    let mut io_source = IoSource::new(bytes.as_slice());
    assert_eq!(skip(&mut io_source).unwrap(), bytes.len());
}

#[test]
fn msgpack_validate_matrix() {
    let ok: Vec<Vec<u8>> = vec![
        vec![0xc0],
        vec![0x7f],
        vec![0xe0],
        vec![0x90],
        vec![0x80],
        vec![0xa0],
        packb(&doc(), None).unwrap(),
    ];
    for input in ok {
        assert!(validate(&input).is_ok(), "input {input:02x?}");
    }

    let bad: Vec<(Vec<u8>, &str)> = vec![
        (vec![], "Truncated"),
        (vec![0xc1], "InvalidMarker(193)"),
        (vec![0xcb, 0, 0, 0, 0, 0, 0, 0, 0], "UnsupportedFormat(203)"),
        (vec![0x92, 0xc0], "Truncated"),
        (vec![0xdd, 0xff, 0xff, 0xff, 0xff], "Truncated"),
        (vec![0xdb, 0xff, 0xff, 0xff, 0xff, b'a'], "Truncated"),
        (vec![0xc0, 0xc0], "TrailingBytes(1)"),
        (vec![0xd5, 0x90, 0x00, 0x00], "UnsupportedFormat(213)"),
    ];
    for (input, expected) in bad {
        let err = validate(&input).expect_err("must be rejected");
        assert_eq!(format!("{err:?}"), expected, "input {input:02x?}");
    }
}

#[test]
fn msgpack_validate_does_not_check_utf8() {
    // skip only frames bytes, decoding is what checks str payloads
    let bytes = [0xa2, 0xff, 0xfe];
    assert!(validate(&bytes).is_ok());
    assert!(matches!(
        tinypack::unpackb::<std::convert::Infallible>(&bytes, None, true),
        Err(DecodeError::InvalidUtf8)
    ));
}

#[test]
fn msgpack_skip_respects_depth_limit() {
    let mut nested = vec![0x81, 0xc0];
    for _ in 0..40 {
        nested.extend_from_slice(&[0x81, 0xc0]);
    }
    nested.push(0xc0);
    assert!(matches!(
        validate(&nested),
        Err(DecodeError::DepthLimitExceeded(32))
    ));
}
