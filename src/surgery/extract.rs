/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 子图抽取的总入口：extract_subgraph / list_eligible_cut_points
 */

use super::adjacency::first_outgoing;
use super::edges::{PruneTrace, rewire_and_prune};
use super::sink::SinkPatch;
use crate::errors::{SinkPatchError, SurgeryError};
use crate::ir::{Dim, Document, Layer, PortDirection};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// 抽取选项
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    /// 强制把切点输出端口的 `names` 设为 Result 层的名字，
    /// 使新模型的输出仍能以“模型输出”的名字被外部访问
    pub force_output_names: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            force_output_names: true,
        }
    }
}

/// 一次抽取的完整结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub document: Document,
    pub trace: PruneTrace,
    pub removed_layers: usize,
}

impl Document {
    /// 以名为 `cut_name` 的层为唯一输出抽取子图
    ///
    /// 源文档只被借用，所有修改都发生在副本上；任何一步失败都不会返回半成品。
    ///
    /// # 示例
    /// ```ignore
    /// let doc = Document::load("model.xml")?;
    /// let sub = doc.extract_subgraph("/model/layers.0/Add")?;
    /// sub.save("model-cut-layers.0.xml")?;
    /// ```
    pub fn extract_subgraph(&self, cut_name: &str) -> Result<Document, SurgeryError> {
        self.extract_subgraph_with(cut_name, &ExtractOptions::default())
            .map(|extraction| extraction.document)
    }

    pub fn extract_subgraph_with(
        &self,
        cut_name: &str,
        options: &ExtractOptions,
    ) -> Result<Extraction, SurgeryError> {
        // 1. 解析切点
        if cut_name.trim().is_empty() {
            return Err(SurgeryError::EmptyName);
        }
        let cut = self
            .layer_by_name(cut_name)
            .ok_or_else(|| SurgeryError::NotFound(cut_name.to_string()))?;

        // 2. 在 Result 层上切：什么都不用做
        if cut.is_sink() {
            debug!("切点{cut_name}本身就是Result层，原样返回");
            return Ok(Extraction {
                document: self.clone(),
                trace: PruneTrace::default(),
                removed_layers: 0,
            });
        }

        // 3. 结构前置条件
        let sink = self
            .sink()
            .ok_or_else(|| SurgeryError::Format("找不到Result层".to_string()))?;
        if sink.ports(PortDirection::Input).is_empty() {
            return Err(SurgeryError::Format(format!(
                "Result层{}缺少输入端口",
                sink.id()
            )));
        }
        if !cut.has_port_group(PortDirection::Output) {
            return Err(SurgeryError::Format(format!("层{cut_name}缺少output")));
        }
        if cut.ports(PortDirection::Output).is_empty() {
            return Err(SurgeryError::Format(format!("层{cut_name}缺少输出端口")));
        }
        if !self.has_edges_section() {
            return Err(SurgeryError::Format("IR中缺少edges".to_string()));
        }
        self.validate_edges()?;

        // 4. 在任何修改之前深拷贝将被重连的输出端口的维度
        let cut_id = cut.id().clone();
        let sink_id = sink.id().clone();
        let cut_port = first_outgoing(self.edges(), &cut_id).map(|(_, edge)| edge.from_port.clone());
        let dims: Vec<Dim> = cut
            .port(PortDirection::Output, cut_port.as_deref())
            .map(|port| port.dims().to_vec())
            .ok_or_else(|| SinkPatchError::MissingPort {
                layer: cut_id.clone(),
                direction: PortDirection::Output,
            })?;

        // 5. 在副本上做图手术
        let mut working = self.clone();
        let outcome = rewire_and_prune(working.edges_mut(), &cut_id, &sink_id)?;
        let removed_layers = working.prune_and_patch_sink(
            &outcome.legitimate,
            &cut_id,
            &sink_id,
            SinkPatch {
                cut_port,
                dims,
                force_output_names: options.force_output_names,
            },
        )?;
        working.validate_edges()?;

        Ok(Extraction {
            document: working,
            trace: outcome.trace,
            removed_layers,
        })
    }

    /// 按文档顺序列出满足条件的候选切点名称
    pub fn list_eligible_cut_points<F>(&self, predicate: F) -> Vec<String>
    where
        F: Fn(&Layer) -> bool,
    {
        self.layers()
            .iter()
            .filter(|layer| predicate(layer))
            .map(|layer| layer.name().to_string())
            .collect()
    }
}
