//! Runtime descriptions of a record's field sequence.
//!
//! The wire format does not tag values, so the reading side must
//! replay exactly the calls the writing side made. A [`Schema`]
//! writes that sequence down once and drives both sides from it.

use anyhow::{bail, ensure, Context};
use bytes::Bytes;

use crate::{Reader, Writer};

/// The kind of a single field, mapping to one primitive of the
/// [`Writer`] and [`Reader`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    /// A [`u8`] value.
    U8,
    /// A big-endian [`u32`] value.
    U32,
    /// A big-endian [`u64`] value.
    U64,
    /// A variable-length unsigned integer.
    UVarint,
    /// A little-endian [`f32`] value.
    F32,
    /// A fixed number of packed bits.
    Bits(usize),
    /// A length-prefixed UTF-8 string.
    String,
    /// A fixed number of raw bytes.
    Bytes(usize),
}

/// A value of one field.
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    U8(u8),
    U32(u32),
    U64(u64),
    UVarint(u64),
    F32(f32),
    Bits(Vec<bool>),
    String(String),
    Bytes(Bytes),
}

impl Value {
    /// Gets the [`FieldKind`] this value can be stored as.
    pub fn kind(&self) -> FieldKind {
        match self {
            Self::U8(_) => FieldKind::U8,
            Self::U32(_) => FieldKind::U32,
            Self::U64(_) => FieldKind::U64,
            Self::UVarint(_) => FieldKind::UVarint,
            Self::F32(_) => FieldKind::F32,
            Self::Bits(bits) => FieldKind::Bits(bits.len()),
            Self::String(_) => FieldKind::String,
            Self::Bytes(bytes) => FieldKind::Bytes(bytes.len()),
        }
    }

    fn write(&self, dest: &mut Writer) -> crate::Result<()> {
        match self {
            Self::U8(v) => {
                dest.write_u8(*v);
            }
            Self::U32(v) => {
                dest.write_u32(*v);
            }
            Self::U64(v) => {
                dest.write_u64(*v);
            }
            Self::UVarint(v) => {
                dest.write_uvarint(*v)?;
            }
            Self::F32(v) => {
                dest.write_f32(*v);
            }
            Self::Bits(bits) => {
                dest.write_bits(bits);
            }
            Self::String(s) => {
                dest.write_str(s)?;
            }
            Self::Bytes(bytes) => {
                dest.write_bytes(bytes);
            }
        }

        Ok(())
    }

    fn read(kind: FieldKind, source: &mut Reader<'_>) -> crate::Result<Self> {
        Ok(match kind {
            FieldKind::U8 => Self::U8(source.read_u8()?),
            FieldKind::U32 => Self::U32(source.read_u32()?),
            FieldKind::U64 => Self::U64(source.read_u64()?),
            FieldKind::UVarint => Self::UVarint(source.read_uvarint()?),
            FieldKind::F32 => Self::F32(source.read_f32()?),
            FieldKind::Bits(n) => Self::Bits(source.read_bits(n)?),
            FieldKind::String => Self::String(source.read_string()?),
            FieldKind::Bytes(n) => Self::Bytes(source.read_bytes(n)?),
        })
    }
}

/// A named field in a [`Schema`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Field {
    name: String,
    kind: FieldKind,
}

impl Field {
    /// Gets the name of the field.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Gets the kind of the field.
    pub fn kind(&self) -> FieldKind {
        self.kind
    }
}

/// An ordered sequence of fields that make up one record.
///
/// ```
/// use wirepack::schema::{FieldKind, Schema, Value};
///
/// # fn main() -> anyhow::Result<()> {
/// let schema = Schema::new()
///     .field("version", FieldKind::U8)
///     .field("name", FieldKind::String);
///
/// let values = vec![Value::U8(1), Value::String("ab".into())];
/// let bytes = schema.encode(&values)?;
///
/// assert_eq!(bytes, [1, 2, b'a', b'b'][..]);
/// assert_eq!(schema.decode(&bytes)?, values);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Schema {
    fields: Vec<Field>,
}

impl Schema {
    /// Creates an empty schema.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Consumes the schema and returns a new one with a field
    /// appended.
    pub fn field(mut self, name: impl Into<String>, kind: FieldKind) -> Self {
        self.fields.push(Field {
            name: name.into(),
            kind,
        });
        self
    }

    /// Gets all fields in the order they are encoded.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Writes one record of `values` to `dest`.
    ///
    /// Every value must match the kind of its field. On error, the
    /// fields before the failing one have already been written.
    pub fn write(&self, dest: &mut Writer, values: &[Value]) -> anyhow::Result<()> {
        ensure!(
            values.len() == self.fields.len(),
            "expected {} values, got {}",
            self.fields.len(),
            values.len()
        );

        for (field, value) in self.fields.iter().zip(values) {
            if value.kind() != field.kind {
                bail!(
                    "field `{}` expects {:?}, got {:?}",
                    field.name,
                    field.kind,
                    value.kind()
                );
            }

            value
                .write(dest)
                .with_context(|| format!("failed to encode field `{}`", field.name))?;
        }

        Ok(())
    }

    /// Encodes one record of `values` into an owned buffer.
    pub fn encode(&self, values: &[Value]) -> anyhow::Result<Bytes> {
        let mut writer = Writer::new();
        self.write(&mut writer, values)?;
        Ok(writer.into_bytes())
    }

    /// Reads one record from `source`.
    pub fn read(&self, source: &mut Reader<'_>) -> anyhow::Result<Vec<Value>> {
        self.fields
            .iter()
            .map(|field| {
                let offset = source.position();
                Value::read(field.kind, source).with_context(|| {
                    format!("failed to decode field `{}` at offset {offset}", field.name)
                })
            })
            .collect()
    }

    /// Decodes `data` as exactly one record.
    pub fn decode(&self, data: &[u8]) -> anyhow::Result<Vec<Value>> {
        let mut reader = Reader::new(data);
        let values = self.read(&mut reader)?;
        ensure!(
            reader.is_empty(),
            "{} trailing bytes after the last field",
            reader.remaining()
        );

        Ok(values)
    }
}
