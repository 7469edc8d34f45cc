use sdformat::schema::{DirResolver, NoIncludes};
use sdformat::{load_schema_str, read_string, Required, SchemaError, TypeTag};

fn load(text: &str) -> sdformat::Element {
    load_schema_str(text, &NoIncludes).expect("schema should load")
}

#[test]
fn loads_a_nested_schema() {
    let schema = load(
        r#"<element name="world" required="1">
             <attribute name="name" type="string" default="default" required="1"/>
             <element name="gravity" required="0" type="vector3" default="0 0 -9.8"/>
             <element name="model" required="*">
               <attribute name="static" type="bool" default="false" required="0"/>
             </element>
           </element>"#,
    );

    assert_eq!(schema.name(), "world");
    assert_eq!(schema.required(), Required::One);
    assert!(schema.value().is_none());

    let name = schema.attribute("name").unwrap();
    assert!(name.required());
    assert_eq!(name.value().to_string(), "default");

    assert_eq!(schema.descriptions().len(), 2);
    let gravity = &schema.descriptions()[0];
    assert_eq!(gravity.required(), Required::Optional);
    let value = gravity.value().unwrap();
    assert_eq!(value.tag(), TypeTag::Vector3);
    assert_eq!(value.as_vector3().unwrap().z, -9.8);
    assert!(!value.was_set());

    let model = &schema.descriptions()[1];
    assert_eq!(model.name(), "model");
    assert_eq!(model.required(), Required::ZeroOrMore);
    assert_eq!(model.attribute("static").unwrap().param().as_bool(), Some(false));
}

#[test]
fn typed_element_without_default_uses_zero_value() {
    let schema = load(r#"<element name="mass" required="1" type="double"/>"#);
    assert_eq!(schema.value().unwrap().as_double(), Some(0.0));
}

#[test]
fn root_must_be_an_element_node() {
    let err = load_schema_str(r#"<schema name="x" required="1"/>"#, &NoIncludes).unwrap_err();
    assert!(matches!(err, SchemaError::MissingRootElement));
}

#[test]
fn missing_name_fails() {
    let err = load_schema_str(r#"<element required="1"/>"#, &NoIncludes).unwrap_err();
    assert!(matches!(err, SchemaError::MissingName));
}

#[test]
fn missing_required_fails() {
    let err = load_schema_str(r#"<element name="box"/>"#, &NoIncludes).unwrap_err();
    assert!(matches!(err, SchemaError::MissingRequired { element } if element == "box"));
}

#[test]
fn unrecognized_cardinality_token_fails() {
    let err = load_schema_str(r#"<element name="box" required="2"/>"#, &NoIncludes).unwrap_err();
    assert!(matches!(err, SchemaError::InvalidRequired { token, .. } if token == "2"));
}

#[test]
fn unknown_type_fails() {
    let err =
        load_schema_str(r#"<element name="box" required="1" type="matrix"/>"#, &NoIncludes)
            .unwrap_err();
    assert!(matches!(err, SchemaError::UnknownType { type_name, .. } if type_name == "matrix"));
}

#[test]
fn bad_inline_default_fails() {
    let err = load_schema_str(
        r#"<element name="box" required="1" type="double" default="abc"/>"#,
        &NoIncludes,
    )
    .unwrap_err();
    assert!(matches!(err, SchemaError::BadElementDefault { element, .. } if element == "box"));
}

#[test]
fn attribute_missing_any_mandatory_field_fails() {
    for field in ["name", "type", "default", "required"] {
        let mut decl = String::new();
        for f in ["name", "type", "default", "required"] {
            if f == field {
                continue;
            }
            let value = match f {
                "type" => "string",
                "required" => "0",
                other => other,
            };
            decl.push_str(&format!(r#" {f}="{value}""#));
        }
        let text = format!(
            r#"<element name="box" required="1"><attribute{decl}/></element>"#
        );
        let err = load_schema_str(&text, &NoIncludes).unwrap_err();
        assert!(
            matches!(&err, SchemaError::AttributeMissingField { field: f, .. } if *f == field),
            "omitting {field} should name it, got: {err}"
        );
    }
}

#[test]
fn bad_attribute_default_fails() {
    let err = load_schema_str(
        r#"<element name="box" required="1">
             <attribute name="size" type="vector3" default="big" required="0"/>
           </element>"#,
        &NoIncludes,
    )
    .unwrap_err();
    assert!(matches!(err, SchemaError::BadAttributeDefault { attribute, .. } if attribute == "size"));
}

#[test]
fn duplicate_attribute_fails() {
    let err = load_schema_str(
        r#"<element name="box" required="1">
             <attribute name="size" type="vector3" default="1 1 1" required="0"/>
             <attribute name="size" type="vector3" default="2 2 2" required="0"/>
           </element>"#,
        &NoIncludes,
    )
    .unwrap_err();
    assert!(matches!(err, SchemaError::DuplicateAttribute { key, .. } if key == "size"));
}

#[test]
fn same_named_child_descriptors_are_legal() {
    let schema = load(
        r#"<element name="joint" required="1">
             <element name="axis" required="1" type="vector3" default="0 0 1"/>
             <element name="axis" required="0" type="vector3" default="1 0 0"/>
           </element>"#,
    );
    assert_eq!(schema.descriptions().len(), 2);
}

#[test]
fn include_missing_filename_fails() {
    let err = load_schema_str(
        r#"<element name="world" required="1"><include/></element>"#,
        &NoIncludes,
    )
    .unwrap_err();
    assert!(matches!(err, SchemaError::IncludeMissingFilename { element } if element == "world"));
}

#[test]
fn unresolved_include_fails() {
    let err = load_schema_str(
        r#"<element name="world" required="1"><include filename="missing.sdf"/></element>"#,
        &NoIncludes,
    )
    .unwrap_err();
    assert!(matches!(err, SchemaError::UnresolvedInclude { filename } if filename == "missing.sdf"));
}

#[test]
fn include_composes_like_an_inline_definition() {
    const MODEL: &str = r#"<element name="model" required="*">
         <attribute name="name" type="string" default="" required="1"/>
       </element>"#;

    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("model.sdf"), MODEL).unwrap();

    let included = load_schema_str(
        r#"<element name="world" required="1"><include filename="model.sdf"/></element>"#,
        &DirResolver::new(dir.path()),
    )
    .unwrap();
    let inline = load(&format!(
        r#"<element name="world" required="1">{MODEL}</element>"#
    ));

    // Both schemas must accept the same document and produce the same
    // instance shape.
    let doc = r#"<world><model name="a"/><model name="b"/></world>"#;
    for schema in [&included, &inline] {
        let instance = read_string(doc, schema).unwrap();
        let names: Vec<_> = instance
            .children_named("model")
            .map(|m| m.attribute("name").unwrap().value().to_string())
            .collect();
        assert_eq!(names, ["a", "b"]);
    }
}

#[test]
fn self_including_schema_is_cut_off() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("loop.sdf"),
        r#"<element name="loop" required="*"><include filename="loop.sdf"/></element>"#,
    )
    .unwrap();

    let err = load_schema_str(
        r#"<element name="world" required="1"><include filename="loop.sdf"/></element>"#,
        &DirResolver::new(dir.path()),
    )
    .unwrap_err();

    let mut cause: &dyn std::error::Error = &err;
    while let Some(source) = cause.source() {
        cause = source;
    }
    assert!(cause.to_string().contains("maximum depth"));
}

#[test]
fn pathologically_deep_schema_is_rejected() {
    let mut text = String::new();
    for i in 0..80 {
        text.push_str(&format!(r#"<element name="n{i}" required="1">"#));
    }
    for _ in 0..80 {
        text.push_str("</element>");
    }
    let err = load_schema_str(&text, &NoIncludes).unwrap_err();
    assert!(matches!(err, SchemaError::TooDeep));
}
