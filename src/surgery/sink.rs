/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 删除合法路径之外的层，并修补 Result 层
 */

use crate::errors::SinkPatchError;
use crate::ir::{Dim, Document, LayerId, PortDirection};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// 修补 Result 层所需的信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkPatch {
    /// 切点被重连的输出端口 id（`None` 时取第一个输出端口）
    pub cut_port: Option<String>,
    /// 切点输出端口维度的深拷贝（在任何修改之前取得）
    pub dims: Vec<Dim>,
    /// 是否强制把切点输出端口的 `names` 改成 Result 层的名字
    pub force_output_names: bool,
}

impl Document {
    /// 删层 + 修补 Result 层，返回删除的层数
    pub fn prune_and_patch_sink(
        &mut self,
        legitimate: &BTreeSet<LayerId>,
        cut: &LayerId,
        sink: &LayerId,
        patch: SinkPatch,
    ) -> Result<usize, SinkPatchError> {
        let removed = self.prune_layers(legitimate, cut, sink);
        self.patch_sink(cut, sink, patch)?;
        Ok(removed)
    }

    /// 删除不在 `legitimate ∪ {sink}` 中的层，返回删除的层数
    ///
    /// 合法集合只有切点自身时（退化情况）同样按集合成员删除：把 Result 层计入后
    /// 保留集合至少有两个元素，剩下的层只能是切点与 Result。此时 id 区间
    /// `(cut, sink)`（按 [`LayerId::cmp_native`] 比较）只作为诊断信息写入日志。
    pub fn prune_layers(
        &mut self,
        legitimate: &BTreeSet<LayerId>,
        cut: &LayerId,
        sink: &LayerId,
    ) -> usize {
        if legitimate.len() == 1 {
            let in_range = self
                .layers()
                .iter()
                .filter(|layer| {
                    let id = layer.id();
                    id.cmp_native(cut) == Ordering::Greater && id.cmp_native(sink) == Ordering::Less
                })
                .count();
            debug!(
                "切点{cut}没有可证明的祖先，只保留切点与Result层（id 区间({cut}, {sink})内有{in_range}个层）"
            );
        }
        let removed =
            self.retain_layers(|layer| legitimate.contains(layer.id()) || layer.id() == sink);
        debug!("删除了{removed}个层，剩余{}个", self.layers().len());
        removed
    }

    /// 用切点输出维度替换 Result 输入端口的维度，并（可选）强制设置输出名
    pub fn patch_sink(
        &mut self,
        cut: &LayerId,
        sink: &LayerId,
        patch: SinkPatch,
    ) -> Result<(), SinkPatchError> {
        let SinkPatch {
            cut_port,
            dims,
            force_output_names,
        } = patch;

        self.layer(cut)
            .and_then(|layer| layer.port(PortDirection::Output, cut_port.as_deref()))
            .ok_or_else(|| SinkPatchError::MissingPort {
                layer: cut.clone(),
                direction: PortDirection::Output,
            })?;

        let sink_layer = self.layer_mut(sink);
        let sink_name = sink_layer
            .as_ref()
            .map(|layer| layer.name().to_string())
            .unwrap_or_default();
        let sink_port = sink_layer
            .and_then(|layer| layer.port_mut(PortDirection::Input, None))
            .ok_or_else(|| SinkPatchError::MissingPort {
                layer: sink.clone(),
                direction: PortDirection::Input,
            })?;
        sink_port.replace_dims(dims);

        if force_output_names {
            self.force_output_names(cut, cut_port.as_deref(), &sink_name)?;
        }
        Ok(())
    }

    /// 把切点输出端口的 `names` 强制设为 `target`，返回是否真的发生了改动
    ///
    /// 对已修补过的端口再次调用不会有任何变化。
    pub fn force_output_names(
        &mut self,
        cut: &LayerId,
        cut_port: Option<&str>,
        target: &str,
    ) -> Result<bool, SinkPatchError> {
        let layer = self.layer_mut(cut).ok_or_else(|| SinkPatchError::MissingPort {
            layer: cut.clone(),
            direction: PortDirection::Output,
        })?;
        let layer_name = layer.name().to_string();
        let port = layer
            .port_mut(PortDirection::Output, cut_port)
            .ok_or_else(|| SinkPatchError::MissingPort {
                layer: cut.clone(),
                direction: PortDirection::Output,
            })?;

        if port.names() == Some(target) {
            debug!("层{layer_name}的输出端口{}已是`{target}`", port.id());
            return Ok(false);
        }
        info!(
            "强制设置层{layer_name}输出端口{}的names：{:?} -> `{target}`",
            port.id(),
            port.names()
        );
        port.set_attr("names", target);
        Ok(true)
    }
}
