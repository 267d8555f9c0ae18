//! Values and signatures that cross the runtime boundary.

use std::fmt;

use bytes::Bytes;

/// The shape of a single argument or return value.
///
/// Only three shapes ever cross the boundary: nothing, an opaque byte
/// array (an encoded structured message), or a nullable string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Void,
    Bytes,
    Str,
}

impl Shape {
    /// JVM-style type descriptor for this shape.
    pub fn descriptor(&self) -> &'static str {
        match self {
            Shape::Void => "V",
            Shape::Bytes => "[B",
            Shape::Str => "Ljava/lang/String;",
        }
    }
}

/// The argument and return shapes of a callable entry point.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    pub args: Vec<Shape>,
    pub ret: Shape,
}

impl Signature {
    pub fn new(args: &[Shape], ret: Shape) -> Self {
        Self {
            args: args.to_vec(),
            ret,
        }
    }

    /// `([B)[B` - one encoded message in, one encoded message out.
    pub fn bytes_to_bytes() -> Self {
        Self::new(&[Shape::Bytes], Shape::Bytes)
    }

    /// `([B)Ljava/lang/String;`
    pub fn bytes_to_str() -> Self {
        Self::new(&[Shape::Bytes], Shape::Str)
    }

    /// `([B)V` - the service constructor.
    pub fn bytes_to_void() -> Self {
        Self::new(&[Shape::Bytes], Shape::Void)
    }

    /// `()[B`
    pub fn unit_to_bytes() -> Self {
        Self::new(&[], Shape::Bytes)
    }

    /// `()Ljava/lang/String;`
    pub fn unit_to_str() -> Self {
        Self::new(&[], Shape::Str)
    }

    /// `()V`
    pub fn unit_to_void() -> Self {
        Self::new(&[], Shape::Void)
    }

    /// Check that `args` has exactly the declared argument shapes.
    pub fn accepts(&self, args: &[Value]) -> bool {
        self.args.len() == args.len()
            && self
                .args
                .iter()
                .zip(args)
                .all(|(shape, value)| value.shape() == *shape)
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for arg in &self.args {
            write!(f, "{}", arg.descriptor())?;
        }
        write!(f, "){}", self.ret.descriptor())
    }
}

/// A value passed to or returned from the managed runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Void,
    Bytes(Bytes),
    /// A string reference. `None` is the runtime's null string.
    Str(Option<String>),
}

impl Value {
    pub fn shape(&self) -> Shape {
        match self {
            Value::Void => Shape::Void,
            Value::Bytes(_) => Shape::Bytes,
            Value::Str(_) => Shape::Str,
        }
    }

    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&Bytes> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Bytes(b)
    }
}

impl From<Vec<u8>> for Value {
    fn from(b: Vec<u8>) -> Self {
        Value::Bytes(Bytes::from(b))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(Some(s))
    }
}

impl From<Option<String>> for Value {
    fn from(s: Option<String>) -> Self {
        Value::Str(s)
    }
}
