// ============================================================================
// RESOLUTION LIMITS
// ============================================================================

/// Maximum recursion depth for shape resolution to prevent stack overflow
pub const MAX_RESOLUTION_DEPTH: usize = 64;

/// Maximum nesting of type arguments, wildcard bounds and array dimensions in a parsed type
/// expression
pub const MAX_TYPE_NESTING: usize = MAX_RESOLUTION_DEPTH;

// ============================================================================
// SERIALIZATION SENTINELS
// ============================================================================

/// Placeholder serializer Jackson uses when `@JsonSerialize(using = ...)` is not set
pub const SERIALIZER_NONE: &str = "com.fasterxml.jackson.databind.JsonSerializer$None";

/// Source spelling of [`SERIALIZER_NONE`]
pub const SERIALIZER_NONE_SOURCE: &str = "com.fasterxml.jackson.databind.JsonSerializer.None";

/// Placeholder target Jackson uses when `@JsonSerialize(as = ...)` is not set
pub const SERIALIZE_AS_NONE: &str = "java.lang.Void";

// ============================================================================
// TYPE NAME CONSTANTS
// ============================================================================

// java.lang
pub const TYPE_BOOLEAN: &str = "java.lang.Boolean";
pub const TYPE_BYTE: &str = "java.lang.Byte";
pub const TYPE_CHARACTER: &str = "java.lang.Character";
pub const TYPE_CHAR_SEQUENCE: &str = "java.lang.CharSequence";
pub const TYPE_CLASS: &str = "java.lang.Class";
pub const TYPE_DOUBLE: &str = "java.lang.Double";
pub const TYPE_FLOAT: &str = "java.lang.Float";
pub const TYPE_INTEGER: &str = "java.lang.Integer";
pub const TYPE_LONG: &str = "java.lang.Long";
pub const TYPE_NUMBER: &str = "java.lang.Number";
pub const TYPE_OBJECT: &str = "java.lang.Object";
pub const TYPE_SHORT: &str = "java.lang.Short";
pub const TYPE_STRING: &str = "java.lang.String";

// java.util collections
pub const TYPE_ARRAY_LIST: &str = "java.util.ArrayList";
pub const TYPE_COLLECTION: &str = "java.util.Collection";
pub const TYPE_CONCURRENT_HASH_MAP: &str = "java.util.concurrent.ConcurrentHashMap";
pub const TYPE_DEQUE: &str = "java.util.Deque";
pub const TYPE_HASH_MAP: &str = "java.util.HashMap";
pub const TYPE_HASH_SET: &str = "java.util.HashSet";
pub const TYPE_ITERABLE: &str = "java.lang.Iterable";
pub const TYPE_LINKED_HASH_MAP: &str = "java.util.LinkedHashMap";
pub const TYPE_LINKED_HASH_SET: &str = "java.util.LinkedHashSet";
pub const TYPE_LINKED_LIST: &str = "java.util.LinkedList";
pub const TYPE_LIST: &str = "java.util.List";
pub const TYPE_MAP: &str = "java.util.Map";
pub const TYPE_QUEUE: &str = "java.util.Queue";
pub const TYPE_SET: &str = "java.util.Set";
pub const TYPE_SORTED_MAP: &str = "java.util.SortedMap";
pub const TYPE_SORTED_SET: &str = "java.util.SortedSet";
pub const TYPE_STREAM: &str = "java.util.stream.Stream";
pub const TYPE_TREE_MAP: &str = "java.util.TreeMap";
pub const TYPE_TREE_SET: &str = "java.util.TreeSet";
