//! # 配置
//!
//! 候选切点的名称过滤规则与抽取选项，可以来自代码预设、JSON 文件或环境变量。

use crate::errors::SurgeryError;
use crate::ir::Layer;
use crate::surgery::ExtractOptions;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[cfg(test)]
mod tests;

/// 要求切点名包含的子串
pub const REQUIRE_VAR: &str = "SUBGRAPH_CUT_REQUIRE";
/// 追加的排除子串，逗号分隔
pub const EXCLUDE_VAR: &str = "SUBGRAPH_CUT_EXCLUDE";

/// 候选切点的名称过滤规则
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CutPointFilter {
    /// 名称必须包含的子串
    pub required_substring: Option<String>,
    /// 名称包含其中任意一个子串即被排除
    pub excluded_substrings: Vec<String>,
    /// 是否跳过 Result 层（在 Result 上切没有意义）
    pub skip_sinks: bool,
}

impl Default for CutPointFilter {
    fn default() -> Self {
        Self {
            required_substring: None,
            excluded_substrings: Vec::new(),
            skip_sinks: true,
        }
    }
}

impl CutPointFilter {
    /// 除常量、权重与输出端口外的所有层
    pub fn all_layers() -> Self {
        Self {
            excluded_substrings: to_strings(&[
                "OpenVINO-EP-subgraph",
                "sink_port",
                "GroupQueryAttention",
                "Constant",
                "weight_scales",
                "weight",
            ]),
            ..Self::default()
        }
    }

    /// 只取 decoder 各层（名称含 `/model/layers.`）
    pub fn decoder_layers() -> Self {
        Self {
            required_substring: Some("/model/layers.".to_string()),
            excluded_substrings: to_strings(&[
                "OpenVINO-EP-subgraph",
                "sink_port",
                "GroupQueryAttention",
            ]),
            ..Self::default()
        }
    }

    pub fn matches(&self, layer: &Layer) -> bool {
        if self.skip_sinks && layer.is_sink() {
            return false;
        }
        let name = layer.name();
        if self
            .required_substring
            .as_deref()
            .is_some_and(|required| !name.contains(required))
        {
            return false;
        }
        !self
            .excluded_substrings
            .iter()
            .any(|excluded| name.contains(excluded.as_str()))
    }

    /// 从 JSON 字符串解析，缺省字段取默认值
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 用变量覆盖/追加规则：`SUBGRAPH_CUT_REQUIRE` 覆盖必需子串，
    /// `SUBGRAPH_CUT_EXCLUDE` 中逗号分隔的各项追加到排除列表
    pub fn with_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(required) = lookup(REQUIRE_VAR).filter(|value| !value.trim().is_empty()) {
            self.required_substring = Some(required.trim().to_string());
        }
        if let Some(excluded) = lookup(EXCLUDE_VAR) {
            self.excluded_substrings.extend(
                excluded
                    .split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string),
            );
        }
        self
    }

    /// 用当前进程的环境变量覆盖
    pub fn with_env(self) -> Self {
        self.with_vars(|key| std::env::var(key).ok())
    }
}

/// 过滤规则 + 抽取选项
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurgeryConfig {
    pub filter: CutPointFilter,
    pub extract: ExtractOptions,
}

impl SurgeryConfig {
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 从 JSON 配置文件加载
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SurgeryError> {
        let json = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&json)
            .map_err(|e| SurgeryError::Parse(format!("配置文件解析失败: {e}")))
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(ToString::to_string).collect()
}
