//! Typed lexical values for the XSD primitive datatypes
//!
//! Each value type offers `parse` (grammar-driven, then the same eager
//! range validation used by direct construction), a canonical `lexical`
//! accessor, and — where the XSD order is total — `compare`. The
//! builtin-type registry at the bottom exposes the whole family to the
//! XML mapping layer through one name-keyed entry point.

pub mod binary;
pub mod decimal;
pub mod duration;
pub mod helpers;
pub mod integer;
pub mod temporal;
pub mod uri;

pub use decimal::Decimal;
pub use duration::Duration;
pub use integer::NonNegativeInteger;
pub use temporal::{Date, DateTime, GDay, GMonth, GMonthDay, GYear, GYearMonth, Temporal, Time};
pub use uri::Uri;

use crate::error::{Error, Result};
use crate::names;
use std::fmt;

// =============================================================================
// White space handling
// =============================================================================

/// White space handling modes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhiteSpace {
    /// Preserve all white space
    Preserve,
    /// Replace tabs and newlines with spaces
    Replace,
    /// Replace and collapse multiple spaces
    Collapse,
}

impl WhiteSpace {
    /// Normalize a string according to this white space mode
    pub fn normalize(&self, s: &str) -> String {
        match self {
            WhiteSpace::Preserve => s.to_string(),
            WhiteSpace::Replace => s.replace(['\t', '\n', '\r'], " "),
            WhiteSpace::Collapse => {
                let replaced = s.replace(['\t', '\n', '\r'], " ");
                let mut result = String::new();
                let mut prev_space = true; // Start with true to trim leading spaces

                for c in replaced.chars() {
                    if c == ' ' {
                        if !prev_space {
                            result.push(' ');
                            prev_space = true;
                        }
                    } else {
                        result.push(c);
                        prev_space = false;
                    }
                }

                result.trim_end().to_string()
            }
        }
    }
}

// =============================================================================
// Type Names
// =============================================================================

/// XSD string type name
pub const XSD_STRING: &str = "string";
/// XSD boolean type name
pub const XSD_BOOLEAN: &str = "boolean";
/// XSD decimal type name
pub const XSD_DECIMAL: &str = "decimal";
/// XSD nonNegativeInteger type name
pub const XSD_NON_NEGATIVE_INTEGER: &str = "nonNegativeInteger";
/// XSD float type name
pub const XSD_FLOAT: &str = "float";
/// XSD double type name
pub const XSD_DOUBLE: &str = "double";
/// XSD duration type name
pub const XSD_DURATION: &str = "duration";
/// XSD dateTime type name
pub const XSD_DATETIME: &str = "dateTime";
/// XSD time type name
pub const XSD_TIME: &str = "time";
/// XSD date type name
pub const XSD_DATE: &str = "date";
/// XSD gYearMonth type name
pub const XSD_GYEAR_MONTH: &str = "gYearMonth";
/// XSD gYear type name
pub const XSD_GYEAR: &str = "gYear";
/// XSD gMonthDay type name
pub const XSD_GMONTH_DAY: &str = "gMonthDay";
/// XSD gDay type name
pub const XSD_GDAY: &str = "gDay";
/// XSD gMonth type name
pub const XSD_GMONTH: &str = "gMonth";
/// XSD hexBinary type name
pub const XSD_HEX_BINARY: &str = "hexBinary";
/// XSD base64Binary type name
pub const XSD_BASE64_BINARY: &str = "base64Binary";
/// XSD anyURI type name
pub const XSD_ANY_URI: &str = "anyURI";
/// XSD QName type name
pub const XSD_QNAME: &str = "QName";

// =============================================================================
// Value Representation
// =============================================================================

/// Any parsed XSD atomic value
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// String value
    String(String),
    /// Boolean value
    Boolean(bool),
    /// Decimal value
    Decimal(Decimal),
    /// Non-negative integer value
    Integer(NonNegativeInteger),
    /// Float value
    Float(f64),
    /// Double value
    Double(f64),
    /// Duration value
    Duration(Duration),
    /// DateTime value
    DateTime(DateTime),
    /// Date value
    Date(Date),
    /// Time value
    Time(Time),
    /// gYear value
    GYear(GYear),
    /// gYearMonth value
    GYearMonth(GYearMonth),
    /// gMonth value
    GMonth(GMonth),
    /// gMonthDay value
    GMonthDay(GMonthDay),
    /// gDay value
    GDay(GDay),
    /// hexBinary value
    HexBinary(Vec<u8>),
    /// base64Binary value
    Base64Binary(Vec<u8>),
    /// URI value
    Uri(Uri),
    /// QName value (prefix, local name); the prefix is expanded by the
    /// caller against its in-scope namespace declarations
    QName(Option<String>, String),
}

impl Value {
    /// Canonical lexical form of the value
    pub fn lexical(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Boolean(b) => helpers::boolean_lexical(*b).to_string(),
            Value::Decimal(d) => d.lexical().to_string(),
            Value::Integer(i) => i.lexical(),
            Value::Float(v) | Value::Double(v) => helpers::float_lexical(*v),
            Value::Duration(d) => d.lexical(),
            Value::DateTime(dt) => dt.lexical(),
            Value::Date(d) => d.lexical(),
            Value::Time(t) => t.lexical(),
            Value::GYear(g) => g.lexical(),
            Value::GYearMonth(g) => g.lexical(),
            Value::GMonth(g) => g.lexical(),
            Value::GMonthDay(g) => g.lexical(),
            Value::GDay(g) => g.lexical(),
            Value::HexBinary(bytes) => binary::hex_binary_lexical(bytes),
            Value::Base64Binary(bytes) => binary::base64_binary_lexical(bytes),
            Value::Uri(u) => u.lexical(),
            Value::QName(Some(prefix), local) => format!("{}:{}", prefix, local),
            Value::QName(None, local) => local.clone(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lexical())
    }
}

// =============================================================================
// Parser Functions
// =============================================================================

fn parse_string(value: &str) -> Result<Value> {
    Ok(Value::String(value.to_string()))
}

fn parse_boolean(value: &str) -> Result<Value> {
    Ok(Value::Boolean(helpers::parse_boolean(value)?))
}

fn parse_decimal(value: &str) -> Result<Value> {
    Ok(Value::Decimal(Decimal::parse(value)?))
}

fn parse_non_negative_integer(value: &str) -> Result<Value> {
    Ok(Value::Integer(NonNegativeInteger::parse(value)?))
}

fn parse_float(value: &str) -> Result<Value> {
    Ok(Value::Float(helpers::parse_float(value)?))
}

fn parse_double(value: &str) -> Result<Value> {
    Ok(Value::Double(helpers::parse_float(value)?))
}

fn parse_duration(value: &str) -> Result<Value> {
    Ok(Value::Duration(Duration::parse(value)?))
}

fn parse_datetime(value: &str) -> Result<Value> {
    Ok(Value::DateTime(DateTime::parse(value)?))
}

fn parse_date(value: &str) -> Result<Value> {
    Ok(Value::Date(Date::parse(value)?))
}

fn parse_time(value: &str) -> Result<Value> {
    Ok(Value::Time(Time::parse(value)?))
}

fn parse_gyear(value: &str) -> Result<Value> {
    Ok(Value::GYear(GYear::parse(value)?))
}

fn parse_gyear_month(value: &str) -> Result<Value> {
    Ok(Value::GYearMonth(GYearMonth::parse(value)?))
}

fn parse_gmonth(value: &str) -> Result<Value> {
    Ok(Value::GMonth(GMonth::parse(value)?))
}

fn parse_gmonth_day(value: &str) -> Result<Value> {
    Ok(Value::GMonthDay(GMonthDay::parse(value)?))
}

fn parse_gday(value: &str) -> Result<Value> {
    Ok(Value::GDay(GDay::parse(value)?))
}

fn parse_hex_binary(value: &str) -> Result<Value> {
    Ok(Value::HexBinary(binary::parse_hex_binary(value)?))
}

fn parse_base64_binary(value: &str) -> Result<Value> {
    Ok(Value::Base64Binary(binary::parse_base64_binary(value)?))
}

fn parse_any_uri(value: &str) -> Result<Value> {
    Ok(Value::Uri(Uri::parse(value)?))
}

fn parse_qname(value: &str) -> Result<Value> {
    names::validate_qname(value)?;
    match names::split_qname(value) {
        (Some(prefix), local) => Ok(Value::QName(Some(prefix.to_string()), local.to_string())),
        (None, local) => Ok(Value::QName(None, local.to_string())),
    }
}

// =============================================================================
// Built-in Type Registry
// =============================================================================

/// Definition of a built-in XSD value type
#[derive(Debug, Clone)]
pub struct BuiltinType {
    /// Type name (local name without namespace)
    pub name: &'static str,
    /// White space handling applied before parsing
    pub white_space: WhiteSpace,
    /// Parser function
    parser: fn(&str) -> Result<Value>,
}

impl BuiltinType {
    /// Parse a lexical value against this type
    pub fn parse(&self, value: &str) -> Result<Value> {
        let normalized = self.white_space.normalize(value);
        (self.parser)(&normalized)
    }
}

lazy_static::lazy_static! {
    /// Registry of the built-in XSD value types
    pub static ref BUILTIN_TYPES: Vec<BuiltinType> = vec![
        BuiltinType {
            name: XSD_STRING,
            white_space: WhiteSpace::Preserve,
            parser: parse_string,
        },
        BuiltinType {
            name: XSD_BOOLEAN,
            white_space: WhiteSpace::Collapse,
            parser: parse_boolean,
        },
        BuiltinType {
            name: XSD_DECIMAL,
            white_space: WhiteSpace::Collapse,
            parser: parse_decimal,
        },
        BuiltinType {
            name: XSD_NON_NEGATIVE_INTEGER,
            white_space: WhiteSpace::Collapse,
            parser: parse_non_negative_integer,
        },
        BuiltinType {
            name: XSD_FLOAT,
            white_space: WhiteSpace::Collapse,
            parser: parse_float,
        },
        BuiltinType {
            name: XSD_DOUBLE,
            white_space: WhiteSpace::Collapse,
            parser: parse_double,
        },
        BuiltinType {
            name: XSD_DURATION,
            white_space: WhiteSpace::Collapse,
            parser: parse_duration,
        },
        BuiltinType {
            name: XSD_DATETIME,
            white_space: WhiteSpace::Collapse,
            parser: parse_datetime,
        },
        BuiltinType {
            name: XSD_TIME,
            white_space: WhiteSpace::Collapse,
            parser: parse_time,
        },
        BuiltinType {
            name: XSD_DATE,
            white_space: WhiteSpace::Collapse,
            parser: parse_date,
        },
        BuiltinType {
            name: XSD_GYEAR_MONTH,
            white_space: WhiteSpace::Collapse,
            parser: parse_gyear_month,
        },
        BuiltinType {
            name: XSD_GYEAR,
            white_space: WhiteSpace::Collapse,
            parser: parse_gyear,
        },
        BuiltinType {
            name: XSD_GMONTH_DAY,
            white_space: WhiteSpace::Collapse,
            parser: parse_gmonth_day,
        },
        BuiltinType {
            name: XSD_GDAY,
            white_space: WhiteSpace::Collapse,
            parser: parse_gday,
        },
        BuiltinType {
            name: XSD_GMONTH,
            white_space: WhiteSpace::Collapse,
            parser: parse_gmonth,
        },
        BuiltinType {
            name: XSD_HEX_BINARY,
            white_space: WhiteSpace::Collapse,
            parser: parse_hex_binary,
        },
        BuiltinType {
            name: XSD_BASE64_BINARY,
            white_space: WhiteSpace::Collapse,
            parser: parse_base64_binary,
        },
        BuiltinType {
            name: XSD_ANY_URI,
            white_space: WhiteSpace::Collapse,
            parser: parse_any_uri,
        },
        BuiltinType {
            name: XSD_QNAME,
            white_space: WhiteSpace::Collapse,
            parser: parse_qname,
        },
    ];
}

/// Get a built-in type by name
pub fn builtin_type(name: &str) -> Option<&'static BuiltinType> {
    BUILTIN_TYPES.iter().find(|t| t.name == name)
}

/// Parse a lexical value against a built-in type by name
pub fn parse_builtin(type_name: &str, value: &str) -> Result<Value> {
    match builtin_type(type_name) {
        Some(builtin) => builtin.parse(value),
        None => Err(Error::Type(format!(
            "unknown built-in type: {}",
            type_name
        ))),
    }
}

// =============================================================================
// Tests
// =============================================================================
