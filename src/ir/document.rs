/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : IR 文档：层与边的有序“竞技场”，跨层引用一律通过 LayerId 查找
 */

use super::types::{Edge, Layer, LayerId};
use super::xml::{Attributes, XmlElement};
use crate::errors::SurgeryError;

/// 根元素下的一段内容，记录 `<layers>`/`<edges>` 与其余段落的相对位置
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Section {
    Layers,
    Edges,
    /// `rt_info`、`meta_data` 等原样透传的段落
    Opaque(XmlElement),
}

/// 整个IR文档
///
/// `Clone` 是深拷贝，抽取子图时总在副本上修改，源文档不会被触碰。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub(crate) root: String,
    pub(crate) attrs: Attributes,
    pub(crate) layers: Vec<Layer>,
    pub(crate) edges: Vec<Edge>,
    pub(crate) sections: Vec<Section>,
}

impl Document {
    pub fn new(name: &str) -> Self {
        Self {
            root: "net".to_string(),
            attrs: [("name", name), ("version", "11")].into_iter().collect(),
            layers: Vec::new(),
            edges: Vec::new(),
            sections: vec![Section::Layers, Section::Edges],
        }
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layers.push(layer);
        self
    }

    pub fn with_edge(mut self, edge: Edge) -> Self {
        if !self.has_edges_section() {
            self.sections.push(Section::Edges);
        }
        self.edges.push(edge);
        self
    }

    /// 在末尾追加一个原样透传的段落
    pub fn with_section(mut self, section: XmlElement) -> Self {
        self.sections.push(Section::Opaque(section));
        self
    }

    // ========== 访问器 ==========

    pub fn name(&self) -> Option<&str> {
        self.attrs.get("name")
    }

    pub const fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn layer(&self, id: &LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id() == id)
    }

    pub fn layer_mut(&mut self, id: &LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id() == id)
    }

    pub fn layer_by_name(&self, name: &str) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.name() == name)
    }

    /// 文档中第一个 `Result` 类型的层
    pub fn sink(&self) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.is_sink())
    }

    pub fn has_edges_section(&self) -> bool {
        self.sections.contains(&Section::Edges)
    }

    /// 原样透传的段落（按文档顺序）
    pub fn opaque_sections(&self) -> impl Iterator<Item = &XmlElement> {
        self.sections.iter().filter_map(|section| match section {
            Section::Opaque(element) => Some(element),
            _ => None,
        })
    }

    /// 校验每条边的两端都指向文档中存在的层
    pub fn validate_edges(&self) -> Result<(), SurgeryError> {
        for edge in &self.edges {
            for end in [&edge.from_layer, &edge.to_layer] {
                if self.layer(end).is_none() {
                    return Err(SurgeryError::Format(format!(
                        "边 {edge} 引用了不存在的层{end}"
                    )));
                }
            }
        }
        Ok(())
    }

    // ========== 供图手术使用的可变操作 ==========

    pub(crate) fn edges_mut(&mut self) -> &mut Vec<Edge> {
        &mut self.edges
    }

    /// 只保留满足条件的层，返回删除的数量
    pub(crate) fn retain_layers<F: FnMut(&Layer) -> bool>(&mut self, keep: F) -> usize {
        let before = self.layers.len();
        self.layers.retain(keep);
        before - self.layers.len()
    }
}
