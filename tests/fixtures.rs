// End-to-end extraction over the JSON trees in test_samples/

use quoted_facts::{
    defines_behaviour, extract_batch, extract_calls_with_report, extract_file, extract_module,
    load_tree, CallKind, CallOptions, FactsOptions, FunctionId, ImplTarget, Location, Node,
    OverrideSource,
};
use std::path::PathBuf;

fn sample_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("test_samples")
        .join(name)
}

fn sample(name: &str) -> Node {
    load_tree(&sample_path(name)).unwrap()
}

fn ids(pairs: &[(&str, usize)]) -> Vec<FunctionId> {
    pairs.iter().map(|&pair| FunctionId::from(pair)).collect()
}

#[test]
fn test_behaviour_module_contracts() {
    let facts = extract_file(&sample_path("cache_behaviour.json"), &FactsOptions::default()).unwrap();

    assert_eq!(facts.module.as_deref(), Some("MyApp.Cache"));
    assert_eq!(
        facts.contracts.documentation.as_deref(),
        Some("Behaviour for pluggable caches.")
    );

    let callbacks = &facts.contracts.callbacks;
    let names: Vec<_> = callbacks.iter().map(|record| record.id().to_string()).collect();
    assert_eq!(names, vec!["init/1", "get/2", "put/3", "stats/1"]);

    assert_eq!(
        callbacks[0].documentation.as_deref(),
        Some("Starts the cache with the given options.")
    );
    assert_eq!(callbacks[1].documentation.as_deref(), Some("Looks up a key."));
    assert_eq!(callbacks[2].documentation, None);
    // `@doc false`
    assert_eq!(callbacks[3].documentation, None);
    assert_eq!(
        callbacks[0].location,
        Some(Location {
            start_line: 5,
            start_column: Some(3)
        })
    );

    assert_eq!(facts.contracts.macrocallbacks.len(), 1);
    assert_eq!(facts.contracts.macrocallbacks[0].name, "cached");

    assert_eq!(
        facts.contracts.required_callbacks(),
        ids(&[("init", 1), ("get", 2), ("put", 3)])
    );
    assert_eq!(
        facts.contracts.optional_callbacks(),
        ids(&[("stats", 1), ("cached", 1)])
    );
}

#[test]
fn test_behaviour_module_signatures() {
    let facts = extract_module(&sample("cache_behaviour.json"), &FactsOptions::default());

    let ids: Vec<_> = facts.signatures.iter().map(|s| s.id().to_string()).collect();
    assert_eq!(
        ids,
        vec!["init/1", "get/2", "put/3", "stats/1", "cached/1", "child_spec/1"]
    );

    let init = &facts.signatures[0];
    assert_eq!(init.return_alternatives().len(), 2);
    assert!(init.is_union_return());
    assert_eq!(
        init.to_string(),
        "@callback init(opts :: keyword()) :: {:ok, state()} | {:error, term()}"
    );

    let get = &facts.signatures[1];
    assert!(get.has_type_constraints);
    assert_eq!(get.type_variables(), vec!["key", "value"]);

    let child_spec = &facts.signatures[5];
    assert!(!child_spec.is_union_return());
    assert!(!child_spec.has_type_constraints);

    assert_eq!(facts.calls.len(), 1);
    assert_eq!(facts.calls[0].name, "default_spec");
}

#[test]
fn test_implementing_module_conformance() {
    let behaviour = extract_module(&sample("cache_behaviour.json"), &FactsOptions::default());
    let facts = extract_module(&sample("memory_cache.json"), &FactsOptions::default());
    let conformance = &facts.conformance;

    let targets: Vec<_> = conformance
        .declarations
        .iter()
        .map(|declaration| declaration.target.as_str())
        .collect();
    assert_eq!(targets, vec!["MyApp.Cache", ":gen_server"]);

    assert_eq!(
        conformance.functions,
        ids(&[
            ("init", 0),
            ("init", 1),
            ("get", 2),
            ("put", 3),
            ("build_state", 1),
            ("wrap", 1)
        ])
    );
    assert!(conformance.unmet_contract(&behaviour.contracts).is_empty());
    assert_eq!(
        conformance.satisfied_contract(&behaviour.contracts),
        ids(&[("init", 1), ("get", 2), ("put", 3)])
    );

    assert_eq!(conformance.impl_for("init", 1), Some(&ImplTarget::Enabled));
    assert_eq!(
        conformance.impl_for("get", 2),
        Some(&ImplTarget::Module("MyApp.Cache".to_string()))
    );
    assert_eq!(conformance.impl_for("wrap", 1), None);

    assert!(conformance.is_overridable("put", 3));
    assert!(conformance
        .overrides
        .iter()
        .all(|marker| marker.source == OverrideSource::ExplicitList));

    assert!(facts.contracts.is_empty());
    assert!(!defines_behaviour(&Node::nil()));
}

#[test]
fn test_implementing_module_calls() {
    let tree = sample("memory_cache.json");

    let facts = extract_module(&tree, &FactsOptions::default());
    let names: Vec<_> = facts.calls.iter().map(|call| call.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["validate", "build_state", "log_failure", "fetch_entry", "miss", "wrap", "normalize"]
    );
    assert_eq!(
        facts.calls[0].location,
        Some(Location {
            start_line: 12,
            start_column: Some(5)
        })
    );
    assert_eq!(facts.calls[3].arity, 2);

    let options = FactsOptions {
        calls: CallOptions {
            include_remote: true,
            ..Default::default()
        },
        ..Default::default()
    };
    let with_remote = extract_module(&tree, &options);
    let remote: Vec<_> = with_remote
        .calls
        .iter()
        .filter_map(|call| match &call.kind {
            CallKind::Remote { module } => Some(format!("{}.{}/{}", module, call.name, call.arity)),
            CallKind::Local => None,
        })
        .collect();
    assert_eq!(remote, vec!["Map.put/3", "Enum.map/2"]);
    assert_eq!(with_remote.calls.len(), facts.calls.len() + 2);
}

#[test]
fn test_deep_nesting_truncation() {
    let tree = sample("deep_nesting.json");

    let facts = extract_module(&tree, &FactsOptions::default());
    assert_eq!(facts.calls.len(), 40);
    assert!(!facts.calls_truncated);
    assert_eq!(facts.calls[39].name, "leaf");

    let body = quoted_facts::ast::module_body(&tree).unwrap();
    let bounded = extract_calls_with_report(
        body,
        &CallOptions {
            max_depth: 20,
            ..Default::default()
        },
    );
    assert!(bounded.truncated);
    assert_eq!(bounded.calls.len(), 19);
    assert!(bounded.calls.len() < facts.calls.len());
}

#[test]
fn test_batch_over_samples() {
    let trees: Vec<Node> = ["cache_behaviour.json", "memory_cache.json", "deep_nesting.json"]
        .iter()
        .map(|name| sample(name))
        .collect();

    let batch = extract_batch(&trees, &FactsOptions::default());
    let modules: Vec<_> = batch
        .iter()
        .map(|facts| facts.module.as_deref().unwrap_or(""))
        .collect();
    assert_eq!(modules, vec!["MyApp.Cache", "MyApp.MemoryCache", "MyApp.Deep"]);

    // Same content as the sequential run
    for (tree, facts) in trees.iter().zip(&batch) {
        assert_eq!(&extract_module(tree, &FactsOptions::default()), facts);
    }
}

#[test]
fn test_options_from_json() {
    let options: FactsOptions =
        serde_json::from_str(r#"{"calls": {"max_depth": 5}}"#).unwrap();
    assert_eq!(options.calls.max_depth, 5);
    assert!(options.calls.include_location);
    assert!(options.extract.include_location);
}
