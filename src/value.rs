//! Typed parameter values.
//!
//! Every value an element or attribute can carry is declared in the schema
//! with a type name and a default literal. [`Param`] wraps one such value:
//! it knows its [`TypeTag`], keeps the parsed default around for resets, and
//! remembers whether a document ever set it explicitly.
//!
//! All textual forms are locale-independent: structured types are
//! whitespace-separated ASCII tokens, parsed with `str::parse` and printed
//! back in the same canonical form.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// The closed set of value types a schema may declare.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TypeTag {
    Bool,
    Int,
    UInt,
    Float,
    Double,
    String,
    Char,
    Vector3,
    Pose,
    Color,
    Time,
}

impl TypeTag {
    /// Maps a schema `type` attribute to a tag. Returns `None` for
    /// unrecognized type names.
    pub fn from_schema_name(name: &str) -> Option<Self> {
        match name {
            "bool" => Some(Self::Bool),
            "int" => Some(Self::Int),
            "unsigned int" => Some(Self::UInt),
            "float" => Some(Self::Float),
            "double" => Some(Self::Double),
            "string" => Some(Self::String),
            "char" => Some(Self::Char),
            "vector3" => Some(Self::Vector3),
            "pose" => Some(Self::Pose),
            "color" => Some(Self::Color),
            "time" => Some(Self::Time),
            _ => None,
        }
    }

    /// The name this tag carries in schema files.
    pub fn schema_name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::UInt => "unsigned int",
            Self::Float => "float",
            Self::Double => "double",
            Self::String => "string",
            Self::Char => "char",
            Self::Vector3 => "vector3",
            Self::Pose => "pose",
            Self::Color => "color",
            Self::Time => "time",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.schema_name())
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ValueError {
    #[error("expected {expected}, got {got:?}")]
    Parse { expected: TypeTag, got: String },
    #[error("color component out of [0, 1] range in {got:?}")]
    ColorOutOfRange { got: String },
}

impl ValueError {
    fn parse(expected: TypeTag, got: &str) -> Self {
        Self::Parse {
            expected,
            got: got.to_string(),
        }
    }
}

fn split_numbers<T: FromStr>(s: &str, count: usize, tag: TypeTag) -> Result<Vec<T>, ValueError> {
    let parts: Vec<&str> = s.split_whitespace().collect();
    if parts.len() != count {
        return Err(ValueError::parse(tag, s));
    }
    parts
        .iter()
        .map(|p| p.parse().map_err(|_| ValueError::parse(tag, s)))
        .collect()
}

/// Three whitespace-separated floats: `x y z`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vector3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

impl FromStr for Vector3 {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = split_numbers::<f64>(s, 3, TypeTag::Vector3)?;
        Ok(Self::new(v[0], v[1], v[2]))
    }
}

impl fmt::Display for Vector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.x, self.y, self.z)
    }
}

/// Six whitespace-separated floats: a position followed by Euler
/// roll/pitch/yaw angles in radians.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Pose {
    pub pos: Vector3,
    pub rot: Vector3,
}

impl Pose {
    pub fn new(pos: Vector3, rot: Vector3) -> Self {
        Self { pos, rot }
    }
}

impl FromStr for Pose {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = split_numbers::<f64>(s, 6, TypeTag::Pose)?;
        Ok(Self::new(
            Vector3::new(v[0], v[1], v[2]),
            Vector3::new(v[3], v[4], v[5]),
        ))
    }
}

impl fmt::Display for Pose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.pos, self.rot)
    }
}

/// Four whitespace-separated floats `r g b a`, each in `[0, 1]`.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
}

impl FromStr for Color {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = split_numbers::<f32>(s, 4, TypeTag::Color)?;
        if v.iter().any(|c| !(0.0..=1.0).contains(c)) {
            return Err(ValueError::ColorOutOfRange { got: s.to_string() });
        }
        Ok(Self::new(v[0], v[1], v[2], v[3]))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {} {}", self.r, self.g, self.b, self.a)
    }
}

/// Two whitespace-separated integers: seconds and nanoseconds.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Time {
    pub sec: i64,
    pub nsec: i64,
}

impl Time {
    pub fn new(sec: i64, nsec: i64) -> Self {
        Self { sec, nsec }
    }
}

impl FromStr for Time {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let v = split_numbers::<i64>(s, 2, TypeTag::Time)?;
        Ok(Self::new(v[0], v[1]))
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.sec, self.nsec)
    }
}

/// A parsed value. The variant always matches the declaring [`TypeTag`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Bool(bool),
    Int(i32),
    UInt(u32),
    Float(f32),
    Double(f64),
    String(String),
    Char(char),
    Vector3(Vector3),
    Pose(Pose),
    Color(Color),
    Time(Time),
}

impl Value {
    pub fn tag(&self) -> TypeTag {
        match self {
            Self::Bool(_) => TypeTag::Bool,
            Self::Int(_) => TypeTag::Int,
            Self::UInt(_) => TypeTag::UInt,
            Self::Float(_) => TypeTag::Float,
            Self::Double(_) => TypeTag::Double,
            Self::String(_) => TypeTag::String,
            Self::Char(_) => TypeTag::Char,
            Self::Vector3(_) => TypeTag::Vector3,
            Self::Pose(_) => TypeTag::Pose,
            Self::Color(_) => TypeTag::Color,
            Self::Time(_) => TypeTag::Time,
        }
    }

    /// The zero value used when a schema declares a type without a default.
    pub fn default_for(tag: TypeTag) -> Self {
        match tag {
            TypeTag::Bool => Self::Bool(false),
            TypeTag::Int => Self::Int(0),
            TypeTag::UInt => Self::UInt(0),
            TypeTag::Float => Self::Float(0.0),
            TypeTag::Double => Self::Double(0.0),
            TypeTag::String => Self::String(String::new()),
            TypeTag::Char => Self::Char(' '),
            TypeTag::Vector3 => Self::Vector3(Vector3::default()),
            TypeTag::Pose => Self::Pose(Pose::default()),
            TypeTag::Color => Self::Color(Color::default()),
            TypeTag::Time => Self::Time(Time::default()),
        }
    }

    /// Parses `text` as `tag`. Surrounding whitespace is insignificant for
    /// every type except `string` and `char`, which take the text verbatim.
    pub fn parse(tag: TypeTag, raw: &str) -> Result<Self, ValueError> {
        let text = raw.trim();
        match tag {
            TypeTag::Bool => {
                if text == "1" || text.eq_ignore_ascii_case("true") {
                    Ok(Self::Bool(true))
                } else if text == "0" || text.eq_ignore_ascii_case("false") {
                    Ok(Self::Bool(false))
                } else {
                    Err(ValueError::parse(tag, text))
                }
            }
            TypeTag::Int => text
                .parse()
                .map(Self::Int)
                .map_err(|_| ValueError::parse(tag, text)),
            TypeTag::UInt => text
                .parse()
                .map(Self::UInt)
                .map_err(|_| ValueError::parse(tag, text)),
            TypeTag::Float => text
                .parse()
                .map(Self::Float)
                .map_err(|_| ValueError::parse(tag, text)),
            TypeTag::Double => text
                .parse()
                .map(Self::Double)
                .map_err(|_| ValueError::parse(tag, text)),
            TypeTag::String => Ok(Self::String(raw.to_string())),
            TypeTag::Char => {
                let mut chars = raw.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Ok(Self::Char(c)),
                    _ => Err(ValueError::parse(tag, text)),
                }
            }
            TypeTag::Vector3 => text.parse().map(Self::Vector3),
            TypeTag::Pose => text.parse().map(Self::Pose),
            TypeTag::Color => text.parse().map(Self::Color),
            TypeTag::Time => text.parse().map(Self::Time),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::Char(v) => write!(f, "{v}"),
            Self::Vector3(v) => write!(f, "{v}"),
            Self::Pose(v) => write!(f, "{v}"),
            Self::Color(v) => write!(f, "{v}"),
            Self::Time(v) => write!(f, "{v}"),
        }
    }
}

/// A typed value cell: declared type, default, current value and whether a
/// document set it explicitly.
///
/// A failed [`set_from_string`](Param::set_from_string) leaves the previous
/// value untouched.
#[derive(Clone, Debug)]
pub struct Param {
    tag: TypeTag,
    default: Value,
    value: Value,
    set: bool,
}

impl Param {
    /// Parses `default_literal` against `tag`. A `None` literal falls back
    /// to the type's zero value.
    pub fn new(tag: TypeTag, default_literal: Option<&str>) -> Result<Self, ValueError> {
        let default = match default_literal {
            Some(literal) => Value::parse(tag, literal)?,
            None => Value::default_for(tag),
        };
        Ok(Self {
            tag,
            value: default.clone(),
            default,
            set: false,
        })
    }

    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    pub fn get(&self) -> &Value {
        &self.value
    }

    pub fn default(&self) -> &Value {
        &self.default
    }

    pub fn was_set(&self) -> bool {
        self.set
    }

    /// Parses `text` and stores the result. On failure the prior value is
    /// retained and the set flag is unchanged.
    pub fn set_from_string(&mut self, text: &str) -> Result<(), ValueError> {
        let value = Value::parse(self.tag, text)?;
        self.value = value;
        self.set = true;
        Ok(())
    }

    /// Restores the default and clears the set flag. Used when a schema
    /// node is stamped into a fresh instance.
    pub fn reset(&mut self) {
        self.value = self.default.clone();
        self.set = false;
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.value {
            Value::Bool(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i32> {
        match self.value {
            Value::Int(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_uint(&self) -> Option<u32> {
        match self.value {
            Value::UInt(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_float(&self) -> Option<f32> {
        match self.value {
            Value::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_double(&self) -> Option<f64> {
        match self.value {
            Value::Double(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            Value::String(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_char(&self) -> Option<char> {
        match self.value {
            Value::Char(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_vector3(&self) -> Option<Vector3> {
        match self.value {
            Value::Vector3(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_pose(&self) -> Option<Pose> {
        match self.value {
            Value::Pose(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self.value {
            Value::Color(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_time(&self) -> Option<Time> {
        match self.value {
            Value::Time(v) => Some(v),
            _ => None,
        }
    }
}
