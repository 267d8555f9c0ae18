//! Column types as they travel on the wire.
//!
//! A column type is a tree (scalars, arrays, maps, structs) flattened into a
//! pre-order list of nodes. A struct node lists its field names and is
//! followed by the nodes of each field's type, in field order; an array node
//! is followed by its element type; a map node by its key type and then its
//! value type.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Primitive scalar types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PrimitiveType {
    #[default]
    InvalidType,
    NullType,
    Boolean,
    TinyInt,
    SmallInt,
    Int,
    BigInt,
    Float,
    Double,
    Date,
    DateTime,
    Timestamp,
    String,
    Binary,
    Decimal,
    Char,
    Varchar,
}

impl PrimitiveType {
    pub fn to_sql(&self) -> &'static str {
        match self {
            PrimitiveType::InvalidType => "INVALID_TYPE",
            PrimitiveType::NullType => "NULL_TYPE",
            PrimitiveType::Boolean => "BOOLEAN",
            PrimitiveType::TinyInt => "TINYINT",
            PrimitiveType::SmallInt => "SMALLINT",
            PrimitiveType::Int => "INT",
            PrimitiveType::BigInt => "BIGINT",
            PrimitiveType::Float => "FLOAT",
            PrimitiveType::Double => "DOUBLE",
            PrimitiveType::Date => "DATE",
            PrimitiveType::DateTime => "DATETIME",
            PrimitiveType::Timestamp => "TIMESTAMP",
            PrimitiveType::String => "STRING",
            PrimitiveType::Binary => "BINARY",
            PrimitiveType::Decimal => "DECIMAL",
            PrimitiveType::Char => "CHAR",
            PrimitiveType::Varchar => "VARCHAR",
        }
    }
}

/// A scalar type with its optional parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ScalarType {
    pub primitive: PrimitiveType,
    /// Length, for CHAR and VARCHAR.
    pub len: Option<i32>,
    /// Precision and scale, for DECIMAL.
    pub precision: Option<i32>,
    pub scale: Option<i32>,
}

impl ScalarType {
    pub fn new(primitive: PrimitiveType) -> Self {
        Self {
            primitive,
            ..Default::default()
        }
    }

    pub fn to_sql(&self) -> String {
        match (self.primitive, self.len, self.precision, self.scale) {
            (PrimitiveType::Char | PrimitiveType::Varchar, Some(len), _, _) => {
                format!("{}({})", self.primitive.to_sql(), len)
            }
            (PrimitiveType::Decimal, _, Some(precision), scale) => {
                format!("DECIMAL({},{})", precision, scale.unwrap_or(0))
            }
            (primitive, ..) => primitive.to_sql().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TypeNodeType {
    #[default]
    Scalar,
    Array,
    Map,
    Struct,
}

/// A named field of a struct node. Its type follows in the node list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StructField {
    pub name: String,
    pub comment: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TypeNode {
    pub node_type: TypeNodeType,
    /// Set for scalar nodes only.
    pub scalar_type: Option<ScalarType>,
    /// Set for struct nodes only.
    pub struct_fields: Vec<StructField>,
}

/// A (possibly nested) column type, flattened.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ColumnType {
    pub types: Vec<TypeNode>,
}

impl ColumnType {
    pub fn scalar(primitive: PrimitiveType) -> Self {
        Self::from_scalar(ScalarType::new(primitive))
    }

    pub fn from_scalar(scalar: ScalarType) -> Self {
        Self {
            types: vec![TypeNode {
                node_type: TypeNodeType::Scalar,
                scalar_type: Some(scalar),
                struct_fields: Vec::new(),
            }],
        }
    }

    pub fn decimal(precision: i32, scale: i32) -> Self {
        Self::from_scalar(ScalarType {
            primitive: PrimitiveType::Decimal,
            len: None,
            precision: Some(precision),
            scale: Some(scale),
        })
    }

    pub fn varchar(len: i32) -> Self {
        Self::from_scalar(ScalarType {
            primitive: PrimitiveType::Varchar,
            len: Some(len),
            precision: None,
            scale: None,
        })
    }

    pub fn array(element: ColumnType) -> Self {
        let mut types = vec![TypeNode {
            node_type: TypeNodeType::Array,
            ..Default::default()
        }];
        types.extend(element.types);
        Self { types }
    }

    pub fn map(key: ColumnType, value: ColumnType) -> Self {
        let mut types = vec![TypeNode {
            node_type: TypeNodeType::Map,
            ..Default::default()
        }];
        types.extend(key.types);
        types.extend(value.types);
        Self { types }
    }

    /// Build a struct type. Field names must be non-empty and unique,
    /// compared case-insensitively.
    pub fn structure<N: Into<String>>(fields: Vec<(N, ColumnType)>) -> Result<Self> {
        if fields.is_empty() {
            return Err(Error::Malformed {
                what: "struct type",
                message: "struct has no fields".to_string(),
            });
        }

        let mut seen = HashSet::new();
        let mut node = TypeNode {
            node_type: TypeNodeType::Struct,
            ..Default::default()
        };
        let mut children = Vec::new();
        for (name, ty) in fields {
            let name = name.into();
            if !seen.insert(name.to_lowercase()) {
                return Err(Error::Malformed {
                    what: "struct type",
                    message: format!("duplicate field name '{}'", name),
                });
            }
            node.struct_fields.push(StructField {
                name,
                comment: None,
            });
            children.extend(ty.types);
        }

        let mut types = vec![node];
        types.extend(children);
        Ok(Self { types })
    }

    pub fn is_scalar(&self) -> bool {
        self.types.len() == 1 && self.types[0].node_type == TypeNodeType::Scalar
    }

    /// Render as SQL, e.g. `MAP<STRING,ARRAY<INT>>` or `STRUCT<a:INT,b:STRING>`.
    ///
    /// Fails if the node list does not describe exactly one well-formed type.
    pub fn to_sql(&self) -> Result<String> {
        let mut out = String::new();
        let consumed = render(&self.types, &mut out)?;
        if consumed != self.types.len() {
            return Err(malformed(format!(
                "{} trailing node(s)",
                self.types.len() - consumed
            )));
        }
        Ok(out)
    }
}

fn malformed(message: String) -> Error {
    Error::Malformed {
        what: "column type",
        message,
    }
}

/// What to emit once the type being rendered is complete.
enum Pending<'a> {
    /// Close an `ARRAY<` or the value half of a `MAP<`.
    Close,
    /// The key of a map is done; the value type comes next.
    MapValue,
    /// A struct field is done; `index` is the next field to render.
    Field { fields: &'a [StructField], index: usize },
}

/// Render the type rooted at `types[0]`; returns the index after it.
///
/// Walks the node list with an explicit stack, so nesting depth is bounded
/// by memory rather than by the call stack.
fn render(types: &[TypeNode], out: &mut String) -> Result<usize> {
    let mut pending: Vec<Pending<'_>> = Vec::new();
    let mut at = 0;
    loop {
        let node = types
            .get(at)
            .ok_or_else(|| malformed(format!("missing node at position {}", at)))?;
        at += 1;

        match node.node_type {
            TypeNodeType::Scalar => {
                let scalar = node.scalar_type.as_ref().ok_or_else(|| {
                    malformed(format!("scalar node {} has no scalar type", at - 1))
                })?;
                out.push_str(&scalar.to_sql());
            }
            TypeNodeType::Array => {
                out.push_str("ARRAY<");
                pending.push(Pending::Close);
                continue;
            }
            TypeNodeType::Map => {
                out.push_str("MAP<");
                pending.push(Pending::MapValue);
                continue;
            }
            TypeNodeType::Struct => {
                let Some(first) = node.struct_fields.first() else {
                    return Err(malformed(format!("struct node {} has no fields", at - 1)));
                };
                out.push_str("STRUCT<");
                push_field(out, first);
                pending.push(Pending::Field {
                    fields: &node.struct_fields,
                    index: 1,
                });
                continue;
            }
        }

        // A complete type was just rendered; finish enclosing types until
        // one of them needs another child.
        loop {
            match pending.pop() {
                None => return Ok(at),
                Some(Pending::Close) => out.push('>'),
                Some(Pending::MapValue) => {
                    out.push(',');
                    pending.push(Pending::Close);
                    break;
                }
                Some(Pending::Field { fields, index }) => match fields.get(index) {
                    Some(field) => {
                        out.push(',');
                        push_field(out, field);
                        pending.push(Pending::Field {
                            fields,
                            index: index + 1,
                        });
                        break;
                    }
                    None => out.push('>'),
                },
            }
        }
    }
}

fn push_field(out: &mut String, field: &StructField) {
    out.push_str(&field.name);
    out.push(':');
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_sql() {
            Ok(sql) => write!(f, "{}", sql),
            Err(_) => write!(f, "<malformed type>"),
        }
    }
}
