//! Hardcoded knowledge of well-known JDK types
//!
//! These types serialize as JSON leaves under Jackson's default configuration and are never
//! recursed into. Dates, calendars and SQL timestamps serialize as epoch milliseconds;
//! `java.time` values serialize as ISO-8601 strings.

use std::collections::HashMap;
use std::sync::LazyLock;

use crate::constants::TYPE_BOOLEAN;
use crate::constants::TYPE_BYTE;
use crate::constants::TYPE_CHAR_SEQUENCE;
use crate::constants::TYPE_CHARACTER;
use crate::constants::TYPE_CLASS;
use crate::constants::TYPE_DOUBLE;
use crate::constants::TYPE_FLOAT;
use crate::constants::TYPE_INTEGER;
use crate::constants::TYPE_LONG;
use crate::constants::TYPE_NUMBER;
use crate::constants::TYPE_OBJECT;
use crate::constants::TYPE_SHORT;
use crate::constants::TYPE_STRING;
use crate::shape::Shape;
use crate::type_mirror::TypeName;

/// Types that serialize as JSON strings
const STRING_TYPES: &[&str] = &[
    TYPE_STRING,
    TYPE_CHAR_SEQUENCE,
    TYPE_CHARACTER,
    TYPE_CLASS,
    "java.util.UUID",
    "java.util.Locale",
    "java.util.Currency",
    "java.util.TimeZone",
    "java.util.regex.Pattern",
    "java.net.URI",
    "java.net.URL",
    "java.io.File",
    "java.nio.charset.Charset",
    "java.time.Duration",
    "java.time.Instant",
    "java.time.LocalDate",
    "java.time.LocalDateTime",
    "java.time.LocalTime",
    "java.time.MonthDay",
    "java.time.OffsetDateTime",
    "java.time.OffsetTime",
    "java.time.Period",
    "java.time.Year",
    "java.time.YearMonth",
    "java.time.ZoneId",
    "java.time.ZoneOffset",
    "java.time.ZonedDateTime",
    "javax.xml.datatype.Duration",
    "javax.xml.datatype.XMLGregorianCalendar",
    "javax.xml.namespace.QName",
];

/// Types that serialize as JSON numbers without a fraction
const INTEGER_TYPES: &[&str] = &[
    TYPE_BYTE,
    TYPE_SHORT,
    TYPE_INTEGER,
    TYPE_LONG,
    "java.math.BigInteger",
    "java.util.concurrent.atomic.AtomicInteger",
    "java.util.concurrent.atomic.AtomicLong",
    "java.util.Date",
    "java.util.Calendar",
    "java.util.GregorianCalendar",
    "java.sql.Date",
    "java.sql.Time",
    "java.sql.Timestamp",
];

/// Types that serialize as JSON numbers
const NUMBER_TYPES: &[&str] = &[TYPE_FLOAT, TYPE_DOUBLE, TYPE_NUMBER, "java.math.BigDecimal"];

/// Types that serialize as JSON booleans
const BOOLEAN_TYPES: &[&str] = &[TYPE_BOOLEAN, "java.util.concurrent.atomic.AtomicBoolean"];

/// Types that serialize as arbitrary JSON objects
const OBJECT_TYPES: &[&str] = &[
    TYPE_OBJECT,
    "com.fasterxml.jackson.databind.JsonNode",
    "com.fasterxml.jackson.databind.node.ObjectNode",
];

/// Static leaf shapes keyed by qualified name
static KNOWN_TYPES: LazyLock<HashMap<TypeName, Shape>> = LazyLock::new(|| {
    let groups: [(&[&str], Shape); 5] = [
        (STRING_TYPES, Shape::STRING),
        (INTEGER_TYPES, Shape::INTEGER),
        (NUMBER_TYPES, Shape::NUMBER),
        (BOOLEAN_TYPES, Shape::BOOLEAN),
        (OBJECT_TYPES, Shape::Object),
    ];

    let mut map = HashMap::new();
    for (names, shape) in groups {
        for name in names {
            map.insert(TypeName::from(*name), shape.clone());
        }
    }
    map
});

/// Look up the leaf shape of a well-known type
#[must_use]
pub fn known_shape(name: &TypeName) -> Option<&'static Shape> {
    KNOWN_TYPES.get(name)
}

/// Whether `name` is a well-known type
#[must_use]
pub fn is_known(name: &TypeName) -> bool {
    KNOWN_TYPES.contains_key(name)
}
