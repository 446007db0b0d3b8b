use std::io::{self, Write};

use tinypack::buffers::{BufferError, ByteSink, ChunkedSource, IoSink, IoSource, Reader};
use tinypack::{
    pack, packb, unpack, unpackb, DecodeError, EncodeError, ExtType, MsgPackDecoder,
    UnpackOptions, Value,
};

fn sample_values() -> Vec<Value> {
    vec![
        Value::Nil,
        Value::Bool(true),
        Value::Bool(false),
        Value::Int(123),
        Value::Int(-32),
        Value::Int(-4_807_526),
        Value::Int(u32::MAX as i64),
        Value::Int(i32::MIN as i64),
        Value::Float(3_456.123),
        Value::Float(f32::INFINITY),
        Value::Str("".into()),
        Value::Str("abc".into()),
        Value::Str("a".repeat(256)),
        Value::Str("ünïcødé €".into()),
        Value::Bin(vec![0, 255, 7]),
        Value::Array(vec![
            Value::Int(1),
            Value::Array(vec![Value::Int(2)]),
            Value::Map(vec![(Value::Str("k".into()), Value::Bool(true))]),
        ]),
        Value::Map(vec![
            (Value::Str("foo".into()), Value::Str("bar".into())),
            (Value::Int(1), Value::Bin(vec![1])),
            (Value::Nil, Value::Array(vec![])),
        ]),
        Value::Ext(ExtType::new(33, vec![1, 2, 3, 4, 5]).unwrap()),
    ]
}

#[test]
fn msgpack_decoder_roundtrip_matrix() {
    for value in sample_values() {
        let encoded = packb(&value, None).expect("encode");
        let decoded: Value = unpackb(&encoded, None, true)
            .unwrap_or_else(|e| panic!("decode failed for {value:?}: {e}"));
        assert_eq!(decoded, value);
    }
}

#[test]
fn msgpack_decoder_reads_concatenated_stream() {
    let values = sample_values();
    let mut stream = Vec::new();
    for value in &values {
        pack(value, &mut stream, None).expect("encode");
    }

    let mut reader = Reader::new(&stream);
    for value in &values {
        let decoded: Value = unpack(&mut reader, None, true).expect("decode");
        assert_eq!(&decoded, value);
    }
    assert_eq!(reader.size(), 0);
    assert!(matches!(
        unpack::<std::convert::Infallible, _>(&mut reader, None, true),
        Err(DecodeError::Truncated)
    ));
}

#[test]
fn msgpack_decoder_over_chunked_and_io_sources() {
    let value = Value::Map(vec![
        (Value::Str("temp".into()), Value::Float(21.5)),
        (Value::Str("samples".into()), Value::Array((0..20).map(Value::Int).collect())),
    ]);
    let encoded = packb(&value, None).unwrap();

    let mut chunked = ChunkedSource::new();
    for chunk in encoded.chunks(3) {
        chunked.push(chunk.to_vec());
    }
    let decoded: Value = unpack(&mut chunked, None, true).unwrap();
    assert_eq!(decoded, value);
    assert_eq!(chunked.size(), 0);

    let mut io_source = IoSource::new(io::Cursor::new(encoded.clone()));
    let decoded: Value = unpack(&mut io_source, None, true).unwrap();
    assert_eq!(decoded, value);

    let mut io_sink = IoSink::new(Vec::new());
    pack(&value, &mut io_sink, None).unwrap();
    assert_eq!(io_sink.written(), encoded.len());
    assert_eq!(io_sink.into_inner(), encoded);
}

#[test]
fn msgpack_decoder_use_list_matrix() {
    let encoded = [0x92, 0x01, 0x91, 0x02];
    let list: Value = unpackb(&encoded, None, true).unwrap();
    assert_eq!(
        list,
        Value::Array(vec![Value::Int(1), Value::Array(vec![Value::Int(2)])])
    );
    let tuple: Value = unpackb(&encoded, None, false).unwrap();
    assert_eq!(
        tuple,
        Value::Tuple(vec![Value::Int(1), Value::Tuple(vec![Value::Int(2)].into())].into())
    );
    assert_eq!(packb(&tuple, None).unwrap(), encoded);
}

#[test]
fn msgpack_decoder_truncation_matrix() {
    let truncated: Vec<&[u8]> = vec![
        &[0xdc],
        &[0xdc, 0x00, 0x02],
        &[0xdc, 0x00, 0x02, 0x01],
        &[0x92, 0x01],
        &[0x81, 0xa1, b'k'],
        &[0xa3, b'a', b'b'],
        &[0xd9, 0x05, b'a'],
        &[0xc4, 0x02, 0x01],
        &[0xcd, 0x01],
        &[0xce, 0x00, 0x00, 0x01],
        &[0xca, 0x3f],
        &[0xd6, 0x01, 0x00],
        &[0xc7, 0x03],
        &[],
    ];
    for input in truncated {
        assert!(
            matches!(unpackb::<std::convert::Infallible>(input, None, true), Err(DecodeError::Truncated)),
            "input {input:02x?}"
        );
    }
}

#[test]
fn msgpack_decoder_rejects_excluded_formats() {
    let float64 = [0xcb, 0x3f, 0xf0, 0, 0, 0, 0, 0, 0];
    let uint64 = [0xcf, 0, 0, 0, 1, 0, 0, 0, 0];
    let int64 = [0xd3, 0xff, 0xff, 0xff, 0xfe, 0, 0, 0, 0];
    for (input, marker) in [(&float64, 0xcb), (&uint64, 0xcf), (&int64, 0xd3)] {
        match unpackb::<std::convert::Infallible>(input, None, true) {
            Err(DecodeError::UnsupportedFormat(m)) => assert_eq!(m, marker),
            other => panic!("expected UnsupportedFormat, got {other:?}"),
        }
    }
    // nested: the error surfaces from inside a container too
    assert!(matches!(
        unpackb::<std::convert::Infallible>(&[0x91, 0xcb, 0, 0, 0, 0, 0, 0, 0, 0], None, true),
        Err(DecodeError::UnsupportedFormat(0xcb))
    ));
}

#[test]
fn msgpack_decoder_rejects_never_used_marker() {
    assert!(matches!(
        unpackb::<std::convert::Infallible>(&[0xc1], None, true),
        Err(DecodeError::InvalidMarker(0xc1))
    ));
}

#[test]
fn msgpack_decoder_reports_trailing_bytes() {
    assert!(matches!(
        unpackb::<std::convert::Infallible>(&[0xc0, 0xc0, 0xc0], None, true),
        Err(DecodeError::TrailingBytes(2))
    ));
    let mut decoder = MsgPackDecoder::<std::convert::Infallible>::new();
    assert!(matches!(decoder.decode(&[0x01, 0x02]), Err(DecodeError::TrailingBytes(1))));
}

#[test]
fn msgpack_decoder_unsigned_forms_widen() {
    let decoded: Value = unpackb(&[0xcc, 0x05], None, true).unwrap();
    assert_eq!(decoded, Value::Int(5));
    let decoded: Value = unpackb(&[0xd2, 0x00, 0x00, 0x00, 0x07], None, true).unwrap();
    assert_eq!(decoded, Value::Int(7));
    let decoded: Value = unpackb(&[0xce, 0xff, 0xff, 0xff, 0xff], None, true).unwrap();
    assert_eq!(decoded, Value::Int(4_294_967_295));
}

#[test]
fn msgpack_decoder_depth_option() {
    let mut nested = vec![0x91; 40];
    nested.push(0xc0);
    let mut decoder = MsgPackDecoder::<std::convert::Infallible>::new();
    assert!(matches!(
        decoder.decode(&nested),
        Err(DecodeError::DepthLimitExceeded(32))
    ));
    let mut decoder = MsgPackDecoder::<std::convert::Infallible>::with_options(
        UnpackOptions::default().with_max_depth(64),
    );
    assert!(decoder.decode(&nested).is_ok());
}

/// Sink that accepts a fixed number of bytes, then fails.
struct FailingSink {
    budget: usize,
}

impl ByteSink for FailingSink {
    fn write(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        if bytes.len() > self.budget {
            return Err(BufferError::Io(io::ErrorKind::BrokenPipe));
        }
        self.budget -= bytes.len();
        Ok(())
    }
}

#[test]
fn msgpack_encoder_propagates_sink_failure() {
    let value: Value = Value::Array(vec![Value::Str("hello".into()); 4]);
    let mut sink = FailingSink { budget: 5 };
    assert!(matches!(
        pack(&value, &mut sink, None),
        Err(EncodeError::Sink(BufferError::Io(io::ErrorKind::BrokenPipe)))
    ));
}

/// Reader that fails with a non-EOF error after some bytes.
struct FlakyReader {
    data: Vec<u8>,
    x: usize,
}

impl io::Read for FlakyReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if self.x >= self.data.len() {
            return Err(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        }
        let n = buf.len().min(self.data.len() - self.x);
        buf[..n].copy_from_slice(&self.data[self.x..self.x + n]);
        self.x += n;
        Ok(n)
    }
}

#[test]
fn msgpack_decoder_propagates_source_failure() {
    let mut source = IoSource::new(FlakyReader {
        data: vec![0x92, 0x01],
        x: 0,
    });
    assert!(matches!(
        unpack::<std::convert::Infallible, _>(&mut source, None, true),
        Err(DecodeError::Source(BufferError::Io(io::ErrorKind::ConnectionReset)))
    ));
}

#[test]
fn msgpack_io_sink_over_writer() {
    let mut out = io::BufWriter::new(Vec::new());
    {
        let mut sink = IoSink::new(&mut out);
        pack(&Value::<std::convert::Infallible>::Int(300), &mut sink, None).unwrap();
    }
    out.flush().unwrap();
    assert_eq!(out.into_inner().unwrap(), vec![0xcd, 0x01, 0x2c]);
}

#[test]
fn msgpack_decoder_invalid_utf8_matrix() {
    let input = [0x92, 0xa1, b'x', 0xa2, 0xff, 0xfe];
    assert!(matches!(
        unpackb::<std::convert::Infallible>(&input, None, true),
        Err(DecodeError::InvalidUtf8)
    ));

    let mut chunked = ChunkedSource::new();
    for chunk in input.chunks(2) {
        chunked.push(chunk.to_vec());
    }
    assert!(matches!(
        unpack::<std::convert::Infallible, _>(&mut chunked, None, true),
        Err(DecodeError::InvalidUtf8)
    ));

    let mut io_source = IoSource::new(&input[..]);
    assert!(matches!(
        unpack::<std::convert::Infallible, _>(&mut io_source, None, true),
        Err(DecodeError::InvalidUtf8)
    ));
}
