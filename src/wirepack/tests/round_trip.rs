use wirepack::{varint, Error, Reader, Writer};

#[test]
fn test_u8() {
    let mut writer = Writer::new();
    for v in 0..=u8::MAX {
        writer.write_u8(v);
    }

    let bytes = writer.into_bytes();
    let mut reader = Reader::new(&bytes);
    for v in 0..=u8::MAX {
        assert_eq!(reader.read_u8(), Ok(v));
    }
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn test_u32_u64() {
    let values32 = [0, 1, 0x7F, 0x80, 0xFFFF, 0x0102_0304, u32::MAX - 1, u32::MAX];
    let values64 = [0, 1, 0x0102_0304_0506_0708, u64::MAX >> 1, u64::MAX];

    let mut writer = Writer::new();
    for (&a, &b) in values32.iter().zip(values64.iter().cycle()) {
        writer.write_u32(a).write_u64(b);
    }

    let bytes = writer.into_bytes();
    assert_eq!(&bytes[..4], [0, 0, 0, 0]);
    assert_eq!(bytes.len(), values32.len() * 12);

    let mut reader = Reader::new(&bytes);
    for (&a, &b) in values32.iter().zip(values64.iter().cycle()) {
        assert_eq!(reader.read_u32(), Ok(a));
        assert_eq!(reader.read_u64(), Ok(b));
    }
}

#[test]
fn test_integers_are_big_endian() {
    let mut writer = Writer::new();
    writer.write_u32(0x0102_0304).write_u64(0x0102_0304_0506_0708);

    assert_eq!(writer.view(), [1, 2, 3, 4, 1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_f32_is_little_endian_and_bit_exact() {
    let values = [
        0.0,
        -0.0,
        1.5,
        f32::MIN_POSITIVE,
        f32::MAX,
        f32::INFINITY,
        f32::NEG_INFINITY,
        f32::from_bits(0x7FC0_0001), // NaN with payload
        f32::from_bits(0x0000_0001), // subnormal
    ];

    let mut writer = Writer::new();
    writer.write_f32(1.5);
    assert_eq!(writer.view(), [0x00, 0x00, 0xC0, 0x3F]);

    writer.clear();
    for &v in &values {
        writer.write_f32(v);
    }

    let bytes = writer.into_bytes();
    let mut reader = Reader::new(&bytes);
    for &v in &values {
        assert_eq!(reader.read_f32().map(f32::to_bits), Ok(v.to_bits()));
    }
}

#[test]
fn test_uvarint_domain() {
    let mut values = vec![varint::MAX_VALUE];
    for shift in 0..42 {
        let pow = 1u64 << shift;
        values.extend([pow - 1, pow, pow + 1]);
    }

    let mut writer = Writer::new();
    for &v in &values {
        writer.write_uvarint(v).unwrap();
    }

    let bytes = writer.into_bytes();
    let mut reader = Reader::new(&bytes);
    for &v in &values {
        assert_eq!(reader.read_uvarint(), Ok(v));
    }
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn test_uvarint_byte_lengths() {
    let cases = [
        (0x7F, 1),
        (0x80, 2),
        (0x3FFF, 2),
        (0x4000, 3),
        (0x1F_FFFF, 3),
        (0x20_0000, 4),
        (0xFFF_FFFF, 4),
        (0x1000_0000, 5),
        (0x7_FFFF_FFFF, 5),
        (0x8_0000_0000, 6),
        (0x3FF_FFFF_FFFF, 6),
    ];

    for (value, len) in cases {
        let mut writer = Writer::new();
        writer.write_uvarint(value).unwrap();
        assert_eq!(writer.len(), len, "value {value:#x}");
    }
}

#[test]
fn test_uvarint_out_of_range() {
    let mut writer = Writer::new();

    for value in [1u64 << 42, (1u64 << 42) + 1, u64::MAX] {
        assert_eq!(
            writer.write_uvarint(value).err(),
            Some(Error::OutOfRange {
                value,
                max: varint::MAX_VALUE
            })
        );
    }
    assert!(writer.is_empty());
}

#[test]
fn test_bits() {
    let mut writer = Writer::new();
    writer.write_bits(&[true, false, true]);
    assert_eq!(writer.view(), [0x05]);

    // Deterministic but irregular patterns for every length up to 100.
    let pattern = |n: usize| -> Vec<bool> { (0..n).map(|i| (i * 7 + n) % 3 == 0).collect() };

    let mut writer = Writer::new();
    for n in 0..=100 {
        writer.write_bits(&pattern(n));
    }

    let bytes = writer.into_bytes();
    assert_eq!(bytes.len(), (0..=100).map(|n: usize| n.div_ceil(8)).sum::<usize>());

    let mut reader = Reader::new(&bytes);
    for n in 0..=100 {
        assert_eq!(reader.read_bits(n), Ok(pattern(n)), "length {n}");
    }
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn test_bits_padding_is_zero() {
    let mut writer = Writer::new();
    writer.write_bits(&[true; 9]);

    assert_eq!(writer.view(), [0xFF, 0x01]);
}

#[test]
fn test_strings() {
    let values = ["", "ab", "hello, world", "grüße", "日本語", "🦀🦀", ""];

    let mut writer = Writer::new();
    writer.write_str("").unwrap();
    assert_eq!(writer.view(), [0x00]);

    writer.clear();
    for s in values {
        writer.write_str(s).unwrap();
    }

    let bytes = writer.into_bytes();
    let mut reader = Reader::new(&bytes);
    for s in values {
        assert_eq!(reader.read_string().as_deref(), Ok(s));
    }
    assert_eq!(reader.remaining(), 0);
}

#[test]
fn test_string_length_is_utf8_bytes() {
    let mut writer = Writer::new();
    writer.write_str("ü").unwrap();

    assert_eq!(writer.view(), [0x02, 0xC3, 0xBC]);
}

#[test]
fn test_long_string_uses_multi_byte_prefix() {
    let s = "x".repeat(200);

    let mut writer = Writer::new();
    writer.write_str(&s).unwrap();
    assert_eq!(&writer.view()[..2], [0x81, 0x48]);
    assert_eq!(writer.len(), 202);

    let bytes = writer.into_bytes();
    assert_eq!(Reader::new(&bytes).read_string(), Ok(s));
}

#[test]
fn test_raw_bytes() {
    let mut writer = Writer::new();
    writer.write_bytes(b"raw").write_bytes(&[]).write_u8(0);
    assert_eq!(writer.view(), b"raw\0");

    let bytes = writer.into_bytes();
    let mut reader = Reader::new(&bytes);
    assert_eq!(reader.read_bytes(3).as_deref(), Ok(&b"raw"[..]));
    assert_eq!(reader.read_bytes(0).as_deref(), Ok(&b""[..]));
    assert_eq!(reader.read_u8(), Ok(0));
}
