//! End-to-end tests over an annotations-style schema: registry linking,
//! validation scenarios, description output and tabular projection.

use std::collections::BTreeMap;
use std::sync::Arc;

use fieldscope::prelude::*;

fn annotation_type() -> Arc<EnumDescription> {
    Arc::new(EnumDescription::new(
        "AnnotationType",
        "es.AnnotationType",
        false,
        vec![
            EnumMeta::new(0, "Unknown"),
            EnumMeta::new(1, "Bar"),
            EnumMeta::new(2, "Foo"),
        ],
    ))
}

fn annotation_category() -> Arc<EnumDescription> {
    Arc::new(EnumDescription::new(
        "AnnotationCategory",
        "es.AnnotationCategory",
        true,
        vec![
            EnumMeta::new(0, "Unknown"),
            EnumMeta::new(1, "Internal"),
            EnumMeta::new(2, "Security"),
            EnumMeta::new(4, "Compliance"),
            EnumMeta::new(i32::MAX, "All"),
        ],
    ))
}

fn resource_type() -> Arc<EnumDescription> {
    Arc::new(EnumDescription::new(
        "ResourceType",
        "es.ResourceType",
        true,
        vec![
            EnumMeta::new(0, "Unknown"),
            EnumMeta::new(1, "EC2Instance").display("EC2 Instance"),
            EnumMeta::new(2, "S3Bucket").display("S3 Bucket"),
            EnumMeta::new(4, "LambdaFunction").display("Lambda Function"),
            EnumMeta::new(i32::MAX, "All"),
        ],
    ))
}

fn registry() -> Arc<MetadataRegistry> {
    RegistryBuilder::new()
        .enumeration(annotation_type())
        .enumeration(annotation_category())
        .enumeration(resource_type())
        .message(
            MessageDescription::new("ListAnnotationsRequest", "es.ListAnnotationsRequest")
                .field(FieldMeta::new("Name", FieldKind::String).required())
                .field(FieldMeta::new("AssetID", FieldKind::String).required_or(["ResourceID"]))
                .field(FieldMeta::new("ResourceID", FieldKind::String))
                .field(
                    FieldMeta::new("AssetIDs", FieldKind::List(ElementKind::String))
                        .min_count(1)
                        .max_count(3),
                )
                .field(FieldMeta::new("Offset", FieldKind::Uint32))
                .field(FieldMeta::new("Limit", FieldKind::Uint32).max(1000))
                .field(FieldMeta::new("Display", FieldKind::String).min(9).max(19))
                .field(
                    FieldMeta::new("Category", FieldKind::Enum)
                        .enumeration(annotation_category()),
                )
                .field(FieldMeta::new("Type", FieldKind::Enum).enumeration(annotation_type())),
        )
        .message(
            MessageDescription::new("Annotation", "es.Annotation")
                .field(FieldMeta::new("ID", FieldKind::String).required())
                .field(FieldMeta::new("Name", FieldKind::String))
                .field(FieldMeta::new("Type", FieldKind::Enum).enumeration(annotation_type()))
                .field(FieldMeta::new("Map", FieldKind::Map(ElementKind::String)))
                .field(
                    FieldMeta::new("Metadata", FieldKind::List(ElementKind::Message))
                        .struct_name("es.KVPair")
                        .documentation(
                            "Metadata is a list of internal metadata associated with the asset",
                        ),
                )
                .field(FieldMeta::new("Basic", FieldKind::Message).struct_name("es.Basic"))
                .field(FieldMeta::new("FloatValue", FieldKind::Float32))
                .field(FieldMeta::new("BytesValue", FieldKind::Bytes))
                .field(FieldMeta::new("Uint64Value", FieldKind::Uint64))
                .field(FieldMeta::new("Int64Value", FieldKind::Int64)),
        )
        .message(
            MessageDescription::new("AnnotationsResponse", "es.AnnotationsResponse")
                .field(
                    FieldMeta::new("Annotations", FieldKind::List(ElementKind::Message))
                        .struct_name("es.Annotation"),
                )
                .field(FieldMeta::new("NextOffset", FieldKind::Uint32))
                .list_sources(["Annotations"]),
        )
        .message(
            MessageDescription::new("KVPair", "es.KVPair")
                .field(FieldMeta::new("Key", FieldKind::String).required())
                .field(FieldMeta::new("Value", FieldKind::String).required()),
        )
        .message(
            MessageDescription::new("Basic", "es.Basic")
                .field(FieldMeta::new("Values", FieldKind::List(ElementKind::String)))
                .field(FieldMeta::new("Map", FieldKind::Map(ElementKind::String))),
        )
        .build()
}

fn transport_text(err: &Error) -> String {
    format!("{}: {}", err.classification(), err)
}

#[test]
fn validate_request_scenarios() {
    let registry = registry();
    let descr = registry.message("es.ListAnnotationsRequest").unwrap();
    let validator = Validator::default();

    struct Case {
        name: &'static str,
        record: Option<Record>,
        exp: &'static str,
    }

    let asset_ids = |n: usize| -> Value {
        Value::List((0..n).map(|_| Value::from("123456789")).collect())
    };

    let cases = vec![
        Case {
            name: "nil",
            record: None,
            exp: "bad_request: List Annotations Request: is not a valid message",
        },
        Case {
            name: "empty",
            record: Some(Record::new()),
            exp: "bad_request: Name is required",
        },
        Case {
            name: "with_name",
            record: Some(Record::new().with("Name", "test")),
            exp: "bad_request: AssetID: at least one of the fields must be set: ResourceID",
        },
        Case {
            name: "with_asset_id",
            record: Some(
                Record::new()
                    .with("Name", "test")
                    .with("AssetID", "123456789"),
            ),
            exp: "bad_request: AssetIDs: minimum count is 1",
        },
        Case {
            name: "with_asset_ids_display_too_short",
            record: Some(
                Record::new()
                    .with("Name", "test")
                    .with("AssetID", "123456789")
                    .with("AssetIDs", asset_ids(1))
                    .with("Display", "test"),
            ),
            exp: "bad_request: Display: minimum length is 9",
        },
        Case {
            name: "with_asset_ids_display_no_id",
            record: Some(
                Record::new()
                    .with("Name", "test")
                    .with("AssetIDs", asset_ids(1))
                    .with("Display", "testaaaaaaaa"),
            ),
            exp: "bad_request: AssetID: at least one of the fields must be set: ResourceID",
        },
        Case {
            name: "with_asset_id_display_too_long",
            record: Some(
                Record::new()
                    .with("Name", "test")
                    .with("ResourceID", "123456789")
                    .with("AssetIDs", asset_ids(1))
                    .with("Display", "testaaaassssssssssssssssssssssssssssssssssssssaaaa"),
            ),
            exp: "bad_request: Display: maximum length is 19",
        },
        Case {
            name: "with_limit_too_large",
            record: Some(
                Record::new()
                    .with("Name", "test")
                    .with("AssetID", "123456789")
                    .with("ResourceID", "123456789")
                    .with("AssetIDs", asset_ids(1))
                    .with("Limit", 10_000u32),
            ),
            exp: "bad_request: Limit: maximum value is 1000",
        },
        Case {
            name: "with_too_many_asset_ids",
            record: Some(
                Record::new()
                    .with("Name", "test")
                    .with("AssetID", "123456789")
                    .with("ResourceID", "123456789")
                    .with("AssetIDs", asset_ids(5))
                    .with("Limit", 10u32),
            ),
            exp: "bad_request: AssetIDs: maximum count is 3",
        },
        Case {
            name: "good",
            record: Some(
                Record::new()
                    .with("Name", "test")
                    .with("AssetID", "123456789")
                    .with("ResourceID", "123456789")
                    .with("AssetIDs", asset_ids(1))
                    .with("Display", "testaaaaaaaa"),
            ),
            exp: "",
        },
    ];

    for case in cases {
        let res = validator.validate(case.record.as_ref(), Some(&descr));
        match (case.exp, res) {
            ("", res) => assert!(res.is_ok(), "{}: expected success", case.name),
            (exp, Err(err)) => {
                assert_eq!(transport_text(&err), exp, "{}", case.name);
            }
            (exp, Ok(())) => panic!("{}: expected error {exp:?}", case.name),
        }
    }
}

#[test]
fn validate_nested_records_through_linked_metadata() {
    let registry = registry();
    let descr = registry.message("es.Annotation").unwrap();

    // Metadata's KVPair fields were resolved by the registry linking pass.
    let record = Record::new().with("ID", "1").with(
        "Metadata",
        vec![Value::Record(Record::new().with("Key", "k1"))],
    );
    let err = Validator::default()
        .validate(Some(&record), Some(&descr))
        .unwrap_err();
    assert_eq!(err.to_string(), "Metadata[0].Value is required");
}

#[test]
fn describe_request_as_yaml() {
    let record = Record::new()
        .with("Name", "test")
        .with("AssetID", "123456789")
        .with("AssetIDs", Value::List(vec![Value::from("123456789")]))
        .with("Display", "test12345")
        .with("Category", EnumValue::new(1, annotation_category()));

    let out = RecordDescriber::to_yaml(&record).unwrap();
    let exp = "Asset ID: '123456789'\n\
               Asset IDs: '123456789'\n\
               Category: Internal\n\
               Display: test12345\n\
               Name: test\n";
    assert_eq!(out, exp);
}

#[test]
fn describe_generic_record_as_yaml() {
    let mut map1 = BTreeMap::new();
    map1.insert(
        "key1".to_string(),
        Value::Enum(EnumValue::new(1, resource_type())),
    );
    let mut map2 = BTreeMap::new();
    map2.insert(
        "key1".to_string(),
        Value::Record(Record::new().with("name", "test").with("id", "test")),
    );

    let record = Record::new()
        .with(
            "messages",
            vec![Value::Record(
                Record::new().with("name", "test").with("id", "test"),
            )],
        )
        .with("name", "test")
        .with("id", 1i64)
        .with("count", 2i32)
        .with("size", 3i64)
        .with("enabled", true)
        .with("value", 4.5f64)
        .with("price", 5.5f64)
        .with("map1", map1)
        .with("map2", map2)
        .with("resource_type", EnumValue::new(3, resource_type()))
        .with_display("resource_type", "Resource");

    let out = RecordDescriber::to_yaml(&record).unwrap();
    let exp = "Resource: EC2 Instance,S3 Bucket\n\
               count: 2\n\
               enabled: true\n\
               id: '1'\n\
               map 1:\n\
               \x20\x20key1: EC2 Instance\n\
               map 2:\n\
               \x20\x20key1:\n\
               \x20\x20\x20\x20id: test\n\
               \x20\x20\x20\x20name: test\n\
               messages:\n\
               - id: test\n\
               \x20\x20name: test\n\
               name: test\n\
               price: 5.5\n\
               size: '3'\n\
               value: 4.5\n";
    assert_eq!(out, exp);
}

#[test]
fn tabular_projection_with_list_sources() {
    let registry = registry();
    let descr = registry.message("es.AnnotationsResponse").unwrap();

    let annotation = |id: &str, name: &str| {
        Value::Record(
            Record::new()
                .with("ID", id)
                .with("Name", name)
                .with("Type", EnumValue::new(1, annotation_type()))
                .with("FloatValue", 1.23456f32)
                .with("Uint64Value", 1u64)
                .with("Int64Value", 1i64),
        )
    };
    let record = Record::new().with(
        "Annotations",
        vec![
            annotation("1", "test1"),
            annotation("2", "test2"),
            Value::Record(Record::new().with("ID", "3").with("Name", "test3")),
        ],
    );

    let data = TabularExtractor::build_tables(&record, &descr).unwrap();
    assert_eq!(data.tables.len(), 2);

    let own = &data.tables[0];
    assert_eq!(own.id, "Annotations Response");
    assert_eq!(own.header.len(), 1);
    assert_eq!(own.rows.len(), 1);
    assert_eq!(own.rows[0].cells, vec!["0"]);

    let source = &data.tables[1];
    assert_eq!(source.id, "Annotations");
    // Printable fields of the element type: Basic (message) and BytesValue
    // (bytes) are excluded.
    let names: Vec<&str> = source.header.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "ID",
            "Name",
            "Type",
            "Map",
            "Metadata",
            "FloatValue",
            "Uint64Value",
            "Int64Value"
        ]
    );
    assert_eq!(source.rows.len(), 3);
    assert_eq!(
        source.rows[0].cells,
        vec!["1", "test1", "Bar", "", "", "1.234560", "1", "1"]
    );
    assert_eq!(
        source.rows[2].cells,
        vec!["3", "test3", "Unknown", "", "", "0.000000", "0", "0"]
    );

    let out = data.render();
    assert!(out.starts_with("Annotations Response:\n\n"));
    assert!(out.contains("Annotations:\n\n"));
    assert!(out.contains("test2"));
    // Three source rows render as a bordered grid.
    assert!(out.contains('┌'));
}

#[test]
fn document_request_schema() {
    let registry = registry();
    let descr = registry.message("es.ListAnnotationsRequest").unwrap();
    let out = descr.document("");
    let exp = "List Annotations Request:\n\
               Fields:\n\
               - Field: Name\n\
               \x20\x20Type: string\n\
               - Field: AssetID\n\
               \x20\x20Type: string\n\
               - Field: ResourceID\n\
               \x20\x20Type: string\n\
               - Field: AssetIDs\n\
               \x20\x20Type: []string\n\
               - Field: Offset\n\
               \x20\x20Type: uint32\n\
               - Field: Limit\n\
               \x20\x20Type: uint32\n\
               - Field: Display\n\
               \x20\x20Type: string\n\
               - Field: Category\n\
               \x20\x20Type: enum\n\
               \x20\x20Enum values: Unknown (0), Internal (1), Security (2), Compliance (4), All (2147483647)\n\
               - Field: Type\n\
               \x20\x20Type: enum\n\
               \x20\x20Enum values: Unknown (0), Bar (1), Foo (2)\n\
               \n";
    assert_eq!(out, exp);
}

#[test]
fn bitmask_display_parse_round_trip() {
    let descr = annotation_category();
    for value in [1, 2, 4, 3, 5, 6, 7] {
        let display = descr.display_value(value);
        let parsed = descr
            .parse(Some(&Value::String(display.clone())))
            .unwrap();
        assert_eq!(parsed, value, "display {display:?}");
    }
}

#[test]
fn concurrent_engine_use_after_registration() {
    let registry = registry();
    std::thread::scope(|scope| {
        for _ in 0..8 {
            let registry = Arc::clone(&registry);
            scope.spawn(move || {
                let descr = registry.message("es.AnnotationsResponse").unwrap();
                let record = Record::new().with(
                    "Annotations",
                    vec![Value::Record(Record::new().with("ID", "1"))],
                );
                let data = TabularExtractor::build_tables(&record, &descr).unwrap();
                assert_eq!(data.tables.len(), 2);
                assert!(Validator::default()
                    .validate(Some(&record), Some(&descr))
                    .is_ok());
            });
        }
    });
}
