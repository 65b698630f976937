// Copyright @yucwang 2026

//! Portable binary encoding used for material snapshots.
//!
//! Every value is written little-endian with a fixed width, so a snapshot
//! written on one platform reads back bit-exact on any other.

use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::io::{Read, Write};

use crate::math::constants::Float;
use crate::math::spectrum::RGBSpectrum;

#[derive(Debug)]
pub enum SerialError {
    Io(std::io::Error),
    MissingUserData(&'static str),
    UnresolvedAsset(String),
    InvalidValue { name: &'static str, value: String },
}

impl fmt::Display for SerialError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SerialError::Io(err) => write!(f, "snapshot i/o failed: {}", err),
            SerialError::MissingUserData(key) => write!(f, "missing user data entry: {}", key),
            SerialError::UnresolvedAsset(msg) => write!(f, "unresolved asset: {}", msg),
            SerialError::InvalidValue { name, value } => {
                write!(f, "invalid value for {} in snapshot: {}", name, value)
            }
        }
    }
}

impl std::error::Error for SerialError {}

impl From<std::io::Error> for SerialError {
    fn from(err: std::io::Error) -> Self {
        SerialError::Io(err)
    }
}

/// Named, type-erased context handed to `deserialize`.
#[derive(Default)]
pub struct UserData<'a> {
    entries: HashMap<String, &'a (dyn Any + 'static)>,
}

impl<'a> UserData<'a> {
    pub fn new() -> Self {
        Self { entries: HashMap::new() }
    }

    pub fn insert(&mut self, key: &str, value: &'a (dyn Any + 'static)) {
        self.entries.insert(key.to_string(), value);
    }

    /// Look up `key` and view it as a `T`. `None` if the key is absent or
    /// holds a different type.
    pub fn get<T: Any>(&self, key: &str) -> Option<&'a T> {
        let entry: &'a (dyn Any + 'static) = *self.entries.get(key)?;
        entry.downcast_ref::<T>()
    }
}

pub fn write_i32(stream: &mut dyn Write, v: i32) -> Result<(), SerialError> {
    stream.write_all(&v.to_le_bytes())?;
    Ok(())
}

pub fn write_f32(stream: &mut dyn Write, v: Float) -> Result<(), SerialError> {
    stream.write_all(&v.to_le_bytes())?;
    Ok(())
}

pub fn write_spectrum(stream: &mut dyn Write, v: &RGBSpectrum) -> Result<(), SerialError> {
    for idx in 0..3 {
        write_f32(stream, v[idx])?;
    }
    Ok(())
}

pub fn read_i32(stream: &mut dyn Read) -> Result<i32, SerialError> {
    let mut buf = [0u8; 4];
    stream.read_exact(&mut buf)?;
    Ok(i32::from_le_bytes(buf))
}

pub fn read_f32(stream: &mut dyn Read) -> Result<Float, SerialError> {
    let mut buf = [0u8; 4];
    stream.read_exact(&mut buf)?;
    Ok(Float::from_le_bytes(buf))
}

pub fn read_spectrum(stream: &mut dyn Read) -> Result<RGBSpectrum, SerialError> {
    let r = read_f32(stream)?;
    let g = read_f32(stream)?;
    let b = read_f32(stream)?;
    Ok(RGBSpectrum::new(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_little_endian_layout() {
        let mut bytes: Vec<u8> = Vec::new();
        write_i32(&mut bytes, -1).unwrap();
        write_f32(&mut bytes, 1.0).unwrap();
        assert_eq!(bytes, vec![0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x80, 0x3f]);
    }

    #[test]
    fn test_spectrum_read_back() {
        let mut bytes: Vec<u8> = Vec::new();
        let s = RGBSpectrum::new(0.14, 0.129, 0.1585);
        write_spectrum(&mut bytes, &s).unwrap();
        assert_eq!(bytes.len(), 12);
        let mut cursor = Cursor::new(bytes);
        assert_eq!(read_spectrum(&mut cursor).unwrap(), s);
    }

    #[test]
    fn test_truncated_stream_is_io_error() {
        let mut cursor = Cursor::new(vec![0u8, 1u8]);
        match read_i32(&mut cursor) {
            Err(SerialError::Io(_)) => {}
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_user_data_typed_lookup() {
        let value: i32 = 7;
        let mut user_data = UserData::new();
        user_data.insert("answer", &value);
        assert_eq!(user_data.get::<i32>("answer"), Some(&7));
        assert!(user_data.get::<f32>("answer").is_none());
        assert!(user_data.get::<i32>("missing").is_none());
    }
}
