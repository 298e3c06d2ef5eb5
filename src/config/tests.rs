use super::{CutPointFilter, EXCLUDE_VAR, REQUIRE_VAR, SurgeryConfig};
use crate::assert_err;
use crate::errors::SurgeryError;
use crate::ir::Layer;
use crate::ir::tests::sample_document;
use std::collections::HashMap;

fn layer(name: &str) -> Layer {
    Layer::new("0", name, "Add")
}

#[test]
fn test_default_filter() {
    let filter = CutPointFilter::default();

    assert!(filter.matches(&layer("anything")));
    // Result 层默认被跳过
    assert!(!filter.matches(&Layer::new("9", "sink_port_0", "Result")));

    let keep_sinks = CutPointFilter {
        skip_sinks: false,
        ..CutPointFilter::default()
    };
    assert!(keep_sinks.matches(&Layer::new("9", "sink_port_0", "Result")));
}

#[test]
fn test_all_layers_preset() {
    let filter = CutPointFilter::all_layers();

    assert!(filter.matches(&layer("/model/layers.0/Add")));
    assert!(!filter.matches(&layer("/model/embed_tokens/weight")));
    assert!(!filter.matches(&layer("Constant_123")));
    assert!(!filter.matches(&layer("/model/layers.0/attn/GroupQueryAttention")));
    assert!(!filter.matches(&layer("OpenVINO-EP-subgraph_1")));

    let names = sample_document().list_eligible_cut_points(|l| filter.matches(l));
    assert_eq!(
        names,
        [
            "input",
            "/model/layers.0/MatMul",
            "/model/layers.0/Relu",
            "/model/layers.0/Sigmoid",
            "/model/layers.1/Concat",
        ]
    );
}

#[test]
fn test_decoder_layers_preset() {
    let filter = CutPointFilter::decoder_layers();

    assert!(filter.matches(&layer("/model/layers.3/mlp/Mul")));
    // decoder 预设不排除权重相关的名字
    assert!(filter.matches(&layer("/model/layers.3/mlp/weight_scales")));
    assert!(!filter.matches(&layer("/model/norm/Mul")));
    assert!(!filter.matches(&layer("/model/layers.3/attn/GroupQueryAttention")));

    let names = sample_document().list_eligible_cut_points(|l| filter.matches(l));
    assert_eq!(names.len(), 4);
    assert!(names.iter().all(|name| name.starts_with("/model/layers.")));
}

#[test]
fn test_filter_from_json() {
    let filter = CutPointFilter::from_json(
        r#"{ "required_substring": "/mlp/", "excluded_substrings": ["Cast"] }"#,
    )
    .unwrap();

    assert_eq!(filter.required_substring.as_deref(), Some("/mlp/"));
    assert_eq!(filter.excluded_substrings, ["Cast"]);
    // 缺省字段取默认值
    assert!(filter.skip_sinks);
    assert!(filter.matches(&layer("/model/layers.0/mlp/Mul")));
    assert!(!filter.matches(&layer("/model/layers.0/mlp/Cast")));

    assert!(CutPointFilter::from_json("{ not json").is_err());
}

#[test]
fn test_filter_with_vars() {
    let vars = HashMap::from([
        (REQUIRE_VAR, " /model/layers.1 "),
        (EXCLUDE_VAR, "Concat, ,Reshape"),
    ]);
    let filter = CutPointFilter::all_layers()
        .with_vars(|key| vars.get(key).map(ToString::to_string));

    assert_eq!(filter.required_substring.as_deref(), Some("/model/layers.1"));
    // 追加而不是覆盖，空项被忽略
    assert_eq!(filter.excluded_substrings.len(), 8);
    assert!(filter.excluded_substrings.iter().any(|s| s == "Reshape"));
    assert!(!filter.matches(&layer("/model/layers.1/Concat")));
    assert!(filter.matches(&layer("/model/layers.1/Add")));
    assert!(!filter.matches(&layer("/model/layers.0/Add")));
}

#[test]
fn test_filter_with_blank_vars() {
    let filter = CutPointFilter::decoder_layers().with_vars(|key| match key {
        REQUIRE_VAR => Some("   ".to_string()),
        _ => None,
    });
    // 空白的必需子串不覆盖预设
    assert_eq!(filter, CutPointFilter::decoder_layers());
}

#[test]
fn test_surgery_config_from_json() {
    let config = SurgeryConfig::from_json(
        r#"{
            "filter": { "required_substring": "/model/layers." },
            "extract": { "force_output_names": false }
        }"#,
    )
    .unwrap();
    assert_eq!(config.filter.required_substring.as_deref(), Some("/model/layers."));
    assert!(!config.extract.force_output_names);

    // 空对象：全部取默认值
    let config = SurgeryConfig::from_json("{}").unwrap();
    assert_eq!(config, SurgeryConfig::default());
    assert!(config.extract.force_output_names);
}

#[test]
fn test_surgery_config_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("surgery.json");

    std::fs::write(&path, r#"{ "filter": { "skip_sinks": false } }"#).unwrap();
    let config = SurgeryConfig::load(&path).unwrap();
    assert!(!config.filter.skip_sinks);

    std::fs::write(&path, "[1, 2").unwrap();
    assert_err!(
        SurgeryConfig::load(&path),
        SurgeryError::Parse(msg) if msg.contains("配置文件")
    );

    assert_err!(
        SurgeryConfig::load(dir.path().join("missing.json")),
        SurgeryError::Io(_)
    );
}
