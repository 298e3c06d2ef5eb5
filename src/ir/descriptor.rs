/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 文档描述符（Document Descriptor）
 *                 IR 的精简、可序列化视图，用于调试输出与抽取前后的对比
 */

use super::document::Document;
use super::types::PortDirection;
use serde::{Deserialize, Serialize};

/// 文档的可序列化描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentDescriptor {
    /// 网络名称
    pub name: String,
    /// 所有层描述（文档顺序）
    pub layers: Vec<LayerDescriptor>,
    /// 边的数量
    pub edge_count: usize,
}

/// 层描述
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerDescriptor {
    pub id: String,
    pub name: String,
    pub layer_type: String,
    /// 每个输出端口的维度
    pub output_dims: Vec<Vec<String>>,
    /// 父层 ID 列表（按边的声明顺序，去重）
    pub parents: Vec<String>,
}

impl DocumentDescriptor {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            layers: Vec::new(),
            edge_count: 0,
        }
    }

    pub fn add_layer(&mut self, layer: LayerDescriptor) {
        self.layers.push(layer);
    }

    /// 转换为 JSON 字符串
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// 从 JSON 字符串解析
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// 文本表格形式的摘要
    pub fn summary_string(&self) -> String {
        let name_width = self
            .layers
            .iter()
            .map(|layer| layer.name.chars().count())
            .max()
            .unwrap_or(0)
            .max(4);

        let mut output = format!("网络: {}\n", self.name);
        output.push_str(&format!(
            "{:<6} {:<name_width$} {:<16} {:<20} 父层\n",
            "id", "name", "type", "输出形状"
        ));
        for layer in &self.layers {
            let shapes = layer
                .output_dims
                .iter()
                .map(|dims| format!("[{}]", dims.join(", ")))
                .collect::<Vec<_>>()
                .join(" ");
            let parents = if layer.parents.is_empty() {
                "-".to_string()
            } else {
                layer.parents.join(", ")
            };
            output.push_str(&format!(
                "{:<6} {:<name_width$} {:<16} {:<20} {}\n",
                layer.id, layer.name, layer.layer_type, shapes, parents
            ));
        }
        output.push_str(&format!(
            "共 {} 层，{} 条边\n",
            self.layers.len(),
            self.edge_count
        ));
        output
    }
}

impl Document {
    /// 导出文档的描述符
    ///
    /// # 示例
    /// ```ignore
    /// let descriptor = doc.describe();
    /// println!("{}", descriptor.to_json().unwrap());
    /// ```
    pub fn describe(&self) -> DocumentDescriptor {
        let mut descriptor = DocumentDescriptor::new(self.name().unwrap_or_default());
        descriptor.edge_count = self.edges.len();

        for layer in &self.layers {
            let mut parents: Vec<String> = Vec::new();
            for edge in self.edges.iter().filter(|edge| &edge.to_layer == layer.id()) {
                let parent = edge.from_layer.to_string();
                if !parents.contains(&parent) {
                    parents.push(parent);
                }
            }

            descriptor.add_layer(LayerDescriptor {
                id: layer.id().to_string(),
                name: layer.name().to_string(),
                layer_type: layer.kind().to_string(),
                output_dims: layer
                    .ports(PortDirection::Output)
                    .iter()
                    .map(|port| port.dims().iter().map(ToString::to_string).collect())
                    .collect(),
                parents,
            });
        }

        descriptor
    }
}
