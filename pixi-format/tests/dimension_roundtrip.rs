#![allow(
    clippy::cast_possible_truncation,
    clippy::float_cmp,
    clippy::unreadable_literal
)]
use pixi_core::{bf16, f16, Float128, F8E4M3};
use pixi_format::{ChannelKind, ChannelValue, Dimension, Endianness, Error, Header, OffsetSize};
use rayon::prelude::*;
use std::io::{self, Write};

// A representative (minimum, step) pair for every typed kind
fn sample_axis(kind: ChannelKind) -> Option<(ChannelValue, ChannelValue)> {
    let pair = match kind {
        ChannelKind::Unknown => return None,
        ChannelKind::Int8 => (ChannelValue::Int8(-100), ChannelValue::Int8(3)),
        ChannelKind::Uint8 => (ChannelValue::Uint8(200), ChannelValue::Uint8(1)),
        ChannelKind::Int16 => (ChannelValue::Int16(-30000), ChannelValue::Int16(-7)),
        ChannelKind::Uint16 => (ChannelValue::Uint16(100), ChannelValue::Uint16(2)),
        ChannelKind::Int32 => (ChannelValue::Int32(-128), ChannelValue::Int32(1)),
        ChannelKind::Uint32 => (ChannelValue::Uint32(0xDEAD_BEEF), ChannelValue::Uint32(16)),
        ChannelKind::Int64 => (ChannelValue::Int64(i64::MIN + 1), ChannelValue::Int64(1_000_000)),
        ChannelKind::Uint64 => (ChannelValue::Uint64(u64::MAX - 5), ChannelValue::Uint64(9)),
        ChannelKind::Float8 => (
            ChannelValue::Float8(F8E4M3::from_f32(-2.5)),
            ChannelValue::Float8(F8E4M3::from_f32(0.125)),
        ),
        ChannelKind::Float16 => (
            ChannelValue::Float16(f16::from_f32(380.0)),
            ChannelValue::Float16(f16::from_f32(0.5)),
        ),
        ChannelKind::BFloat16 => (
            ChannelValue::BFloat16(bf16::from_f32(-1.0e10)),
            ChannelValue::BFloat16(bf16::from_f32(3.0e8)),
        ),
        ChannelKind::Float32 => (ChannelValue::Float32(0.0), ChannelValue::Float32(0.1)),
        ChannelKind::Float64 => (ChannelValue::Float64(-90.0), ChannelValue::Float64(0.25)),
        ChannelKind::Float128 => (
            ChannelValue::Float128(Float128::from_f64(-3.25)),
            ChannelValue::Float128(Float128::from_f64(1.0e-30)),
        ),
        ChannelKind::Int128 => (
            ChannelValue::Int128(i128::MIN + 7),
            ChannelValue::Int128(1 << 100),
        ),
        ChannelKind::Uint128 => (
            ChannelValue::Uint128(u128::MAX / 3),
            ChannelValue::Uint128(12345),
        ),
        ChannelKind::Bool => (ChannelValue::Bool(true), ChannelValue::Bool(false)),
    };
    Some(pair)
}

// Every presence combination of minimum, step and unit for every kind
fn all_dimensions() -> Vec<Dimension> {
    let mut dimensions = vec![
        Dimension::new("nameone", 40, 20),
        Dimension::new("", 50, 5),
        Dimension::new("amuchlongernamethanusualwithlotsofcharacters", 20_000_000, 1),
    ];
    for kind in ChannelKind::ALL {
        let Some((minimum, step)) = sample_axis(kind) else {
            continue;
        };
        for with_minimum in [false, true] {
            for with_step in [false, true] {
                for unit in ["", "nanometers"] {
                    dimensions.push(Dimension {
                        name: format!("{kind}-{with_minimum}-{with_step}"),
                        size: 1000,
                        tile_size: 128,
                        kind,
                        minimum: with_minimum.then_some(minimum),
                        step: with_step.then_some(step),
                        unit: unit.to_string(),
                    });
                }
            }
        }
    }
    dimensions
}

fn encode(dimension: &Dimension, header: &Header) -> Vec<u8> {
    let mut buf = Vec::new();
    dimension.write(&mut buf, header).unwrap();
    buf
}

#[test]
fn test_round_trip_every_kind_and_presence() {
    for header in Header::variants() {
        for dimension in all_dimensions() {
            let mut buf = encode(&dimension, &header);
            // trailing bytes must be left for the next field
            buf.extend_from_slice(&[0xAB, 0xCD]);

            let mut cursor = buf.as_slice();
            let read = Dimension::read(&mut cursor, &header).unwrap();
            assert_eq!(read, dimension, "header {header:?}");
            assert_eq!(cursor, &[0xAB, 0xCD], "{dimension} over-read or under-read");
        }
    }
}

#[test]
fn test_header_size_matches_bytes_written() {
    for header in Header::variants() {
        for dimension in all_dimensions() {
            let buf = encode(&dimension, &header);
            assert_eq!(
                buf.len(),
                dimension.header_size(&header),
                "{dimension} kind {} under {header:?}",
                dimension.kind
            );
        }
    }
}

#[test]
fn test_presence_flags_are_independent() {
    let header = Header::new(Endianness::Big, OffsetSize::Eight);

    let min_only = Dimension::new("t", 10, 5)
        .with_minimum(12.5_f64)
        .with_unit("s");
    let read = Dimension::read(&mut encode(&min_only, &header).as_slice(), &header).unwrap();
    assert_eq!(read.minimum, Some(ChannelValue::Float64(12.5)));
    assert_eq!(read.step, None);

    let step_only = Dimension::new("t", 10, 5).with_step(0.5_f64).with_unit("s");
    let read = Dimension::read(&mut encode(&step_only, &header).as_slice(), &header).unwrap();
    assert_eq!(read.minimum, None);
    assert_eq!(read.step, Some(ChannelValue::Float64(0.5)));

    // same payload width, different tag
    let a = encode(&min_only, &header);
    let b = encode(&step_only, &header);
    assert_eq!(a.len(), b.len());
    assert_ne!(a, b);
}

#[test]
fn test_wire_layout() {
    let header = Header::new(Endianness::Little, OffsetSize::Four);
    let dimension = Dimension::new("z", 1000, 100)
        .with_axis(100_u16, 2_u16)
        .with_unit("m");
    let buf = encode(&dimension, &header);

    let tag = 4u32 | (1 << 30) | (1 << 31);
    let mut expected = vec![1, 0, b'z'];
    expected.extend_from_slice(&1000u32.to_le_bytes());
    expected.extend_from_slice(&100u32.to_le_bytes());
    expected.extend_from_slice(&tag.to_le_bytes());
    expected.extend_from_slice(&[1, 0, b'm']);
    expected.extend_from_slice(&100u16.to_le_bytes());
    expected.extend_from_slice(&2u16.to_le_bytes());
    assert_eq!(buf, expected);
}

#[test]
fn test_write_rejects_invalid_sizes_without_output() {
    let header = Header::default();
    let cases = [
        ("zero size", Dimension::new("a", 0, 1)),
        ("zero tile size", Dimension::new("b", 10, 0)),
        ("tile larger than size", Dimension::new("c", 10, 11)),
    ];
    for (name, dimension) in cases {
        let mut buf = Vec::new();
        let result = dimension.write(&mut buf, &header);
        assert!(matches!(result, Err(Error::Format(_))), "{name}");
        assert!(buf.is_empty(), "{name} wrote {} bytes", buf.len());
    }
}

#[test]
fn test_write_rejects_kind_mismatch_without_output() {
    let header = Header::default();
    let dimension = Dimension {
        name: "x".to_string(),
        size: 10,
        tile_size: 10,
        kind: ChannelKind::Float32,
        minimum: Some(ChannelValue::Float32(0.0)),
        step: Some(ChannelValue::Int32(1)),
        unit: String::new(),
    };
    let mut buf = Vec::new();
    let err = dimension.write(&mut buf, &header).unwrap_err();
    assert!(matches!(
        err,
        Error::CoreError(pixi_core::Error::KindMismatch {
            expected: ChannelKind::Float32,
            found: ChannelKind::Int32,
        })
    ));
    assert!(buf.is_empty());
}

#[test]
fn test_write_rejects_oversized_offsets() {
    let header = Header::new(Endianness::Big, OffsetSize::Four);
    let dimension = Dimension::new("huge", u64::from(u32::MAX) + 1, 1);
    let mut buf = Vec::new();
    assert!(matches!(
        dimension.write(&mut buf, &header),
        Err(Error::Format(_))
    ));
    assert!(buf.is_empty());

    let header = header.with_offset_size(OffsetSize::Eight);
    let read = Dimension::read(&mut encode(&dimension, &header).as_slice(), &header).unwrap();
    assert_eq!(read, dimension);
}

#[test]
fn test_short_stream_is_truncation() {
    let header = Header::new(Endianness::Little, OffsetSize::Eight);
    let dimension = Dimension::new("lambda", 64, 16)
        .with_axis(Float128::from_f64(400.0), Float128::from_f64(0.5))
        .with_unit("nm");
    let buf = encode(&dimension, &header);
    for len in 0..buf.len() {
        let result = Dimension::read(&mut &buf[..len], &header);
        assert!(
            matches!(result, Err(Error::Truncated { .. })),
            "prefix of {len} bytes gave {result:?}"
        );
    }
}

struct FailingWriter;

impl Write for FailingWriter {
    fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_stream_errors_propagate() {
    let dimension = Dimension::new("x", 4, 2);
    let err = dimension
        .write(&mut FailingWriter, &Header::default())
        .unwrap_err();
    match err {
        Error::Io(inner) => assert_eq!(inner.kind(), io::ErrorKind::BrokenPipe),
        other => panic!("expected an I/O error, got {other:?}"),
    }
}

#[test]
fn test_axis_values_after_round_trip() {
    let header = Header::default();

    let x = Dimension::new("x", 100, 10).with_axis(0.0_f32, 0.1_f32);
    let x = Dimension::read(&mut encode(&x, &header).as_slice(), &header).unwrap();
    assert_eq!(x.axis_value(0).unwrap(), Some(ChannelValue::Float32(0.0)));
    assert_eq!(x.axis_value(10).unwrap(), Some(ChannelValue::Float32(1.0)));

    let y = Dimension::new("y", 256, 64).with_axis(-128_i32, 1_i32);
    let y = Dimension::read(&mut encode(&y, &header).as_slice(), &header).unwrap();
    assert_eq!(y.axis_value(128).unwrap(), Some(ChannelValue::Int32(0)));

    let z = Dimension::new("z", 1000, 100).with_axis(100_u16, 2_u16);
    let z = Dimension::read(&mut encode(&z, &header).as_slice(), &header).unwrap();
    assert_eq!(z.maximum().unwrap(), Some(ChannelValue::Uint16(2098)));

    let flag = Dimension::new("mask", 10, 10).with_axis(true, false);
    for i in 0..10 {
        assert_eq!(flag.axis_value(i).unwrap(), Some(ChannelValue::Bool(true)));
    }

    let partial = Dimension::new("p", 10, 10).with_minimum(1.0_f64);
    assert_eq!(partial.axis_value(3).unwrap(), None);
}

#[test]
fn test_independent_concurrent_codecs() {
    let dimensions = all_dimensions();
    for header in Header::variants() {
        let sequential: Vec<Vec<u8>> = dimensions.iter().map(|d| encode(d, &header)).collect();
        let parallel: Vec<Vec<u8>> = dimensions.par_iter().map(|d| encode(d, &header)).collect();
        assert_eq!(sequential, parallel);

        let decoded: Vec<Dimension> = parallel
            .par_iter()
            .map(|bytes| Dimension::read(&mut bytes.as_slice(), &header).unwrap())
            .collect();
        assert_eq!(decoded, dimensions);
    }
}
