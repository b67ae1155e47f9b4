//! Codec Contract Tests
//!
//! - Round-trip identity and deterministic output
//! - Explicit null for empty checks
//! - Version is informational only
//! - Structural rejections (schema_type, duplicates, unknown dtypes)
//! - Custom check kinds through the registry
//! - Schema objects from another engine through the conversion traits

use dfschema::schema::{
    CheckDescriptor, CheckKind, ColumnDescriptor, DType, DescribeSchema, FromDescriptor,
    IndexDescriptor, ParamStyle, SchemaDescriptor, SchemaError, SchemaResult,
};
use dfschema::yaml::{self, YamlCodec};

// =============================================================================
// Helper Functions
// =============================================================================

fn codec() -> YamlCodec {
    YamlCodec::new("0.1.0")
}

fn rich_schema() -> SchemaDescriptor {
    SchemaDescriptor::new(
        vec![
            ColumnDescriptor::new("user_id", DType::UInt64)
                .with_check(CheckDescriptor::greater_than(0)),
            ColumnDescriptor::new("country", DType::Category)
                .with_check(CheckDescriptor::isin(["DE", "FR", "US"])),
            ColumnDescriptor::new("score", DType::Float32)
                .nullable(true)
                .with_check(CheckDescriptor::in_range(0.0, 100.0))
                .with_check(CheckDescriptor::less_than_or_equal_to(99.5)),
            ColumnDescriptor::new("email", DType::String)
                .with_check(CheckDescriptor::str_matches(r"^[^@]+@[^@]+$")),
            ColumnDescriptor::new("active", DType::Bool),
            ColumnDescriptor::new("elapsed", DType::Timedelta).nullable(true),
        ],
        vec![
            IndexDescriptor::new(DType::DateTime).named("day"),
            IndexDescriptor::new(DType::Int32)
                .named("shard")
                .with_check(CheckDescriptor::greater_than_or_equal_to(0)),
        ],
    )
    .unwrap()
}

// =============================================================================
// Round Trip and Determinism
// =============================================================================

/// decode(encode(S)) == S.
#[test]
fn test_round_trip_identity() {
    let schema = rich_schema();
    let text = codec().encode(&schema).unwrap();
    let decoded = codec().decode_str(&text).unwrap();
    assert_eq!(decoded, schema);
}

/// Encoding twice yields byte-identical text, and a decoded copy encodes to
/// the same bytes as the original.
#[test]
fn test_encoding_is_deterministic() {
    let schema = rich_schema();
    let first = codec().encode(&schema).unwrap();
    for _ in 0..50 {
        assert_eq!(codec().encode(&schema).unwrap(), first);
    }

    let decoded = codec().decode_str(&first).unwrap();
    assert_eq!(codec().encode(&decoded).unwrap(), first);
}

/// Columns and index levels keep declaration order in the text.
#[test]
fn test_declaration_order_in_text() {
    let text = codec().encode(&rich_schema()).unwrap();
    let positions: Vec<usize> = ["user_id:", "country:", "score:", "email:", "active:", "elapsed:"]
        .iter()
        .map(|key| text.find(key).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));

    assert!(text.find("name: day").unwrap() < text.find("name: shard").unwrap());
}

/// Decoding does not depend on key order or whitespace in the source.
#[test]
fn test_decode_ignores_formatting() {
    let text = "
index: [{name: idx, checks: ~, nullable: false, pandas_dtype: int}]
columns:
    a:   {checks: null, pandas_dtype: float, nullable: true}
version: '0.1.0'
schema_type: dataframe
";
    let expected = SchemaDescriptor::new(
        vec![ColumnDescriptor::new("a", DType::Float).nullable(true)],
        vec![IndexDescriptor::new(DType::Int).named("idx")],
    )
    .unwrap();
    assert_eq!(codec().decode_str(text).unwrap(), expected);
}

// =============================================================================
// Null Checks
// =============================================================================

/// No checks: explicit `checks: null` in the text, empty list after decoding.
#[test]
fn test_empty_checks_encode_as_null() {
    let schema =
        SchemaDescriptor::new(vec![ColumnDescriptor::new("plain", DType::Object)], vec![]).unwrap();
    let text = codec().encode(&schema).unwrap();
    assert!(text.contains("    checks: null\n"));

    let decoded = codec().decode_str(&text).unwrap();
    assert!(decoded.column("plain").unwrap().checks.is_empty());
}

// =============================================================================
// Version Tolerance
// =============================================================================

/// A document from another library version decodes to an equal schema.
#[test]
fn test_version_tolerance() {
    let schema = rich_schema();
    let text = codec().encode(&schema).unwrap();
    let edited = text.replace("version: 0.1.0", "version: 9.9.9");
    assert_ne!(text, edited);

    let decoded = codec().decode_str(&edited).unwrap();
    assert_eq!(decoded, schema);
    assert_eq!(decoded.version(), Some("9.9.9"));
}

/// Missing version is accepted as well.
#[test]
fn test_missing_version() {
    let decoded = codec()
        .decode_str("schema_type: dataframe\ncolumns: {}\n")
        .unwrap();
    assert!(decoded.version().is_none());
}

// =============================================================================
// Structural Rejections
// =============================================================================

#[test]
fn test_wrong_schema_type_rejected() {
    let text = codec()
        .encode(&rich_schema())
        .unwrap()
        .replace("schema_type: dataframe", "schema_type: not_dataframe");
    let err = codec().decode_str(&text).unwrap_err();
    assert!(matches!(err, SchemaError::MalformedSchema(_)));
}

#[test]
fn test_missing_index_defaults_to_empty() {
    let text = "
schema_type: dataframe
version: 0.1.0
columns:
  a:
    pandas_dtype: int
    nullable: false
    checks: null
";
    let decoded = codec().decode_str(text).unwrap();
    assert!(decoded.index().is_empty());
    assert_eq!(decoded.columns().len(), 1);
}

#[test]
fn test_duplicate_columns_in_text() {
    let text = "
schema_type: dataframe
columns:
  a: {pandas_dtype: int}
  b: {pandas_dtype: int}
  a: {pandas_dtype: int}
";
    let err = codec().decode_str(text).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidDescriptor(_)));
}

#[test]
fn test_duplicate_checks_in_text() {
    let text = "
schema_type: dataframe
columns:
  a:
    pandas_dtype: int
    checks:
      greater_than: 1
      greater_than: 2
";
    let err = codec().decode_str(text).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidDescriptor(_)));
}

#[test]
fn test_unknown_dtype_rejected() {
    let text = "
schema_type: dataframe
columns:
  a: {pandas_dtype: decimal128}
";
    let err = codec().decode_str(text).unwrap_err();
    assert!(matches!(err, SchemaError::UnknownDType(ref tag) if tag == "decimal128"));
}

#[test]
fn test_malformed_syntax_rejected() {
    let err = codec()
        .decode_str("schema_type: dataframe\ncolumns:\n  a: {pandas_dtype: int\n")
        .unwrap_err();
    assert!(matches!(err, SchemaError::Parse(_)));
}

#[test]
fn test_dtype_alias_accepted() {
    let text = "
schema_type: dataframe
columns:
  ts: {pandas_dtype: datetime}
";
    let decoded = codec().decode_str(text).unwrap();
    assert_eq!(decoded.column("ts").unwrap().dtype, DType::DateTime);

    let reencoded = codec().encode(&decoded).unwrap();
    assert!(reencoded.contains("pandas_dtype: datetime64[ns]"));
}

// =============================================================================
// Check Registry
// =============================================================================

/// Whatever the decoder accepts, the encoder can write back out.
#[test]
fn test_unregistered_check_round_trips() {
    let text = "
schema_type: dataframe
version: 0.1.0
columns:
  n:
    pandas_dtype: int64
    nullable: false
    checks:
      is_prime: null
      divisible_by:
        divisor: 3
index: []
";
    let decoded = codec().decode_str(text).unwrap();
    let reencoded = codec().encode(&decoded).unwrap();
    assert!(reencoded.contains("is_prime: null"));
    assert!(reencoded.contains("divisor: 3"));
    assert_eq!(codec().decode_str(&reencoded).unwrap(), decoded);
}

#[test]
fn test_registered_check_with_wrong_shape_is_unsupported() {
    let schema = SchemaDescriptor::new(
        vec![ColumnDescriptor::new("n", DType::Int)
            .with_check(CheckDescriptor::with_param("in_range", 3))],
        vec![],
    )
    .unwrap();
    let err = codec().encode(&schema).unwrap_err();
    assert!(matches!(err, SchemaError::UnsupportedType(_)));
}

#[test]
fn test_custom_check_round_trip() {
    let mut codec = codec();
    codec
        .registry_mut()
        .register(CheckKind::new("is_even", ParamStyle::Bare))
        .unwrap();
    codec
        .registry_mut()
        .register(CheckKind::new(
            "divisible_by",
            ParamStyle::Fields(vec!["divisor".into(), "remainder".into()]),
        ))
        .unwrap();

    let schema = SchemaDescriptor::new(
        vec![ColumnDescriptor::new("n", DType::Int64)
            .with_check(CheckDescriptor::new("is_even"))
            .with_check(CheckDescriptor::with_params(
                "divisible_by",
                [("divisor", 4), ("remainder", 0)],
            ))],
        vec![],
    )
    .unwrap();

    let text = codec.encode(&schema).unwrap();
    assert!(text.contains("is_even: null"));
    assert!(text.contains("divisor: 4"));
    assert_eq!(codec.decode_str(&text).unwrap(), schema);
}

// =============================================================================
// Schema Object Seam
// =============================================================================

/// Stand-in for a validation engine's own schema type.
#[derive(Debug, PartialEq)]
struct EngineSchema {
    fields: Vec<(String, DType)>,
}

impl DescribeSchema for EngineSchema {
    fn describe(&self) -> SchemaResult<SchemaDescriptor> {
        let columns = self
            .fields
            .iter()
            .map(|(name, dtype)| ColumnDescriptor::new(name.clone(), *dtype))
            .collect();
        SchemaDescriptor::new(columns, vec![])
    }
}

impl FromDescriptor for EngineSchema {
    fn from_descriptor(descriptor: &SchemaDescriptor) -> SchemaResult<Self> {
        Ok(Self {
            fields: descriptor
                .columns()
                .iter()
                .map(|c| (c.name.clone(), c.dtype))
                .collect(),
        })
    }
}

#[test]
fn test_schema_object_round_trip() {
    let engine = EngineSchema {
        fields: vec![("a".into(), DType::Int8), ("b".into(), DType::Str)],
    };

    let text = yaml::dump(&engine, None).unwrap().unwrap();
    let restored: EngineSchema = yaml::load(text.as_str()).unwrap();
    assert_eq!(restored, engine);
}

#[test]
fn test_schema_object_invalid_description() {
    let engine = EngineSchema {
        fields: vec![("a".into(), DType::Int8), ("a".into(), DType::Str)],
    };
    let err = yaml::dump(&engine, None).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidDescriptor(_)));
}
