// Copyright @yucwang 2026

use std::collections::HashMap;
use std::fmt;

use crate::math::constants::{Float, Vector3f};

#[derive(Debug)]
pub enum LoadError {
    Io(std::io::Error),
    Parse(String),
    MissingField(&'static str),
    TypeMismatch { name: String, expected: &'static str },
    InvalidValue { name: String, value: String },
    UnknownAsset(String),
    UnknownComponent(String),
}

impl fmt::Display for LoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoadError::Io(err) => write!(f, "i/o error: {}", err),
            LoadError::Parse(msg) => write!(f, "parse error: {}", msg),
            LoadError::MissingField(field) => write!(f, "missing field: {}", field),
            LoadError::TypeMismatch { name, expected } => {
                write!(f, "property {} is not of type {}", name, expected)
            }
            LoadError::InvalidValue { name, value } => {
                write!(f, "invalid value for {}: {}", name, value)
            }
            LoadError::UnknownAsset(id) => write!(f, "unknown asset: {}", id),
            LoadError::UnknownComponent(name) => write!(f, "unknown component: {}", name),
        }
    }
}

impl std::error::Error for LoadError {}

impl From<std::io::Error> for LoadError {
    fn from(err: std::io::Error) -> Self {
        LoadError::Io(err)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum PropertyValue {
    Float(Float),
    RGB(Vector3f),
    Str(String),
}

impl PropertyValue {
    fn type_name(&self) -> &'static str {
        match self {
            PropertyValue::Float(_) => "float",
            PropertyValue::RGB(_) => "rgb",
            PropertyValue::Str(_) => "string",
        }
    }
}

/// Parsed parameters of one scene-description element.
#[derive(Clone, Debug, Default)]
pub struct PropertyNode {
    values: HashMap<String, PropertyValue>,
}

impl PropertyNode {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: &str, value: PropertyValue) {
        if let Some(old) = self.values.insert(name.to_string(), value) {
            log::debug!("Property {} ({}) overridden.", name, old.type_name());
        }
    }

    pub fn with(mut self, name: &str, value: PropertyValue) -> Self {
        self.set(name, value);
        self
    }

    pub fn has_child(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn child_as_float(&self, name: &str, default: Float) -> Result<Float, LoadError> {
        match self.values.get(name) {
            None => Ok(default),
            Some(PropertyValue::Float(v)) => Ok(*v),
            Some(_) => Err(LoadError::TypeMismatch { name: name.to_string(), expected: "float" }),
        }
    }

    pub fn child_as_rgb(&self, name: &str, default: Vector3f) -> Result<Vector3f, LoadError> {
        match self.values.get(name) {
            None => Ok(default),
            Some(PropertyValue::RGB(v)) => Ok(*v),
            Some(_) => Err(LoadError::TypeMismatch { name: name.to_string(), expected: "rgb" }),
        }
    }

    pub fn child_as_str(&self, name: &str) -> Result<Option<&str>, LoadError> {
        match self.values.get(name) {
            None => Ok(None),
            Some(PropertyValue::Str(v)) => Ok(Some(v.as_str())),
            Some(_) => Err(LoadError::TypeMismatch { name: name.to_string(), expected: "string" }),
        }
    }
}

pub fn parse_float(value: &str) -> Result<Float, LoadError> {
    value.trim().parse::<Float>().map_err(|_| LoadError::Parse(format!("invalid float: {}", value)))
}

/// Accepts "r, g, b", "r g b" or a single value broadcast to all channels.
pub fn parse_vec3(value: &str) -> Result<Vector3f, LoadError> {
    let parts: Vec<&str> = value
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .collect();
    match parts.len() {
        1 => {
            let v = parse_float(parts[0])?;
            Ok(Vector3f::new(v, v, v))
        }
        3 => Ok(Vector3f::new(parse_float(parts[0])?, parse_float(parts[1])?, parse_float(parts[2])?)),
        _ => Err(LoadError::Parse(format!("invalid vec3: {}", value))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let props = PropertyNode::new();
        assert_eq!(props.child_as_float("roughness", 0.1).unwrap(), 0.1);
        assert_eq!(props.child_as_rgb("R", Vector3f::zeros()).unwrap(), Vector3f::zeros());
        assert_eq!(props.child_as_str("TexR").unwrap(), None);
        assert!(!props.has_child("R"));
    }

    #[test]
    fn test_type_mismatch() {
        let props = PropertyNode::new().with("roughness", PropertyValue::Str("rough".to_string()));
        match props.child_as_float("roughness", 0.1) {
            Err(LoadError::TypeMismatch { name, expected }) => {
                assert_eq!(name, "roughness");
                assert_eq!(expected, "float");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_parse_vec3_forms() {
        assert_eq!(parse_vec3("0.1, 0.2, 0.3").unwrap(), Vector3f::new(0.1, 0.2, 0.3));
        assert_eq!(parse_vec3("0.1 0.2 0.3").unwrap(), Vector3f::new(0.1, 0.2, 0.3));
        assert_eq!(parse_vec3("0.5").unwrap(), Vector3f::new(0.5, 0.5, 0.5));
        assert!(parse_vec3("0.1, 0.2").is_err());
        assert!(parse_vec3("a, b, c").is_err());
    }
}
