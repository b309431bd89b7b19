use {
    crate::{
        Config, Document, Error, FlatMap, FlatMapJsonExt, JsonFlattenExt, Scalar, Value, flatten,
        flatten_serialize, flatten_with_config,
    },
    anyhow::Context,
    serde::Serialize,
    serde_json::json,
    std::collections::{BTreeMap, HashMap},
    tap::Pipe,
    tracing::info,
};

#[derive(Serialize, Debug, Clone)]
struct Service {
    name: String,
    port: u16,
    enabled: bool,
}

#[derive(Serialize, Debug, Clone)]
struct Person {
    #[serde(rename = "Name")]
    name: &'static str,
    #[serde(rename = "Age")]
    age: i32,
}

fn json_document(value: serde_json::Value) -> anyhow::Result<serde_json::Map<String, serde_json::Value>> {
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => anyhow::bail!("fixture must be an object, got {other}"),
    }
}

fn as_json(flat: FlatMap) -> serde_json::Value {
    flat.into_json().pipe(serde_json::Value::Object)
}

#[test_log::test]
fn array_with_length_annotation() -> anyhow::Result<()> {
    json!({"array": ["one", "two"]})
        .pipe(json_document)?
        .flatten_paths(&Config::default().with_length_for_arrays(true))
        .context("flattening")?
        .pipe(as_json)
        .pipe(|got| {
            info!(%got);
            anyhow::ensure!(
                got == json!({"array[0]": "one", "array[1]": "two", "array.length": 2}),
                "got:\n{got:#}"
            );
            Ok(())
        })
}

#[test_log::test]
fn flat_input_is_unchanged() -> anyhow::Result<()> {
    let flat = json!({"foo": "bar", "bar": "baz"})
        .pipe(json_document)?
        .flatten_paths(&Config::default())?;
    assert_eq!(as_json(flat), json!({"foo": "bar", "bar": "baz"}));
    Ok(())
}

#[test_log::test]
fn sequence_of_records() -> anyhow::Result<()> {
    let services = vec![Service {
        name: "bar".into(),
        port: 3000,
        enabled: true,
    }];
    let flat = flatten_serialize(&HashMap::from([("foo", services)]), &Config::default())?;
    assert_eq!(
        as_json(flat),
        json!({"foo[0].name": "bar", "foo[0].port": 3000, "foo[0].enabled": true})
    );
    Ok(())
}

#[test_log::test]
fn record_fields_keep_their_names() -> anyhow::Result<()> {
    let person = Person {
        name: "astaxie",
        age: 30,
    };
    let flat = flatten_serialize(&BTreeMap::from([("foo", person)]), &Config::default())?;
    assert_eq!(
        flat.keys().map(String::as_str).collect::<Vec<_>>(),
        ["foo.Name", "foo.Age"]
    );
    assert_eq!(as_json(flat), json!({"foo.Name": "astaxie", "foo.Age": 30}));
    Ok(())
}

#[test_log::test]
fn explicit_null() -> anyhow::Result<()> {
    let input = Document::from_iter([("x".to_owned(), Value::Null)]);
    assert_eq!(flatten(&input)?, FlatMap::from_iter([("x".to_owned(), Scalar::Null)]));
    Ok(())
}

#[test_log::test]
fn nested_paths_compose() -> anyhow::Result<()> {
    #[derive(Serialize)]
    struct Host {
        name: &'static str,
        ports: Vec<u16>,
        tags: Option<Vec<&'static str>>,
    }

    let hosts = [
        Host {
            name: "a",
            ports: vec![1, 2],
            tags: None,
        },
        Host {
            name: "b",
            ports: vec![],
            tags: Some(vec!["edge"]),
        },
    ];
    let flat = flatten_serialize(
        &BTreeMap::from([("hosts", hosts)]),
        &Config::default().with_length_for_arrays(true),
    )?;
    assert_eq!(
        as_json(flat),
        json!({
            "hosts[0].name": "a",
            "hosts[0].ports[0]": 1,
            "hosts[0].ports[1]": 2,
            "hosts[0].ports.length": 2,
            "hosts[0].tags": null,
            "hosts[1].name": "b",
            "hosts[1].ports.length": 0,
            "hosts[1].tags[0]": "edge",
            "hosts[1].tags.length": 1,
            "hosts.length": 2,
        })
    );
    Ok(())
}

#[test_log::test]
fn sequence_entry_count_matches_length() -> anyhow::Result<()> {
    for n in 0..5usize {
        let input = Document::from_iter([("s".to_owned(), Value::from(vec![true; n]))]);
        let plain = flatten(&input)?;
        assert_eq!(plain.len(), n);
        assert!((0..n).all(|i| plain.contains_key(&format!("s[{i}]"))));

        let annotated = flatten_with_config(&input, &Config::default().with_length_for_arrays(true))?;
        assert_eq!(annotated.len(), n + 1);
        assert_eq!(annotated.get("s.length"), Some(&Scalar::Int(n as i64)));
    }
    Ok(())
}

#[test_log::test]
fn non_string_map_key_fails() {
    let input = BTreeMap::from([("ports", BTreeMap::from([(80u16, "http"), (443, "https")]))]);
    match flatten_serialize(&input, &Config::default()) {
        Err(Error::NonStringKey { path, key }) => {
            assert_eq!(path, "ports");
            assert_eq!(key, "80 (integer)");
        }
        other => panic!("expected NonStringKey, got {other:?}"),
    }
}

#[test_log::test]
fn out_of_range_integer_fails_without_partial_output() {
    #[derive(Serialize)]
    struct Counter {
        label: &'static str,
        hits: u64,
    }

    let input = BTreeMap::from([(
        "counters",
        vec![
            Counter { label: "small", hits: 1 },
            Counter {
                label: "huge",
                hits: u64::MAX,
            },
        ],
    )]);
    match flatten_serialize(&input, &Config::default()) {
        Err(Error::UnsupportedShape { path, .. }) => assert_eq!(path, "counters[1].hits"),
        other => panic!("expected UnsupportedShape, got {other:?}"),
    }
}

#[test_log::test]
fn serialized_scalar_root_is_rejected() {
    assert!(matches!(
        flatten_serialize("just a string", &Config::default()),
        Err(Error::UnsupportedRoot("string"))
    ));
}
