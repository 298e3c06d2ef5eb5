/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 重连切点出边并按可达性剪除边
 */

use super::adjacency::{EdgeIndex, first_outgoing};
use crate::errors::CutPointError;
use crate::ir::{Edge, LayerId};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::debug;

/// 剪边过程的诊断记录（只用于排查，不参与任何剪枝决策）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PruneTrace {
    /// 重连边之后声明的边（服务于被丢弃的下游计算）
    pub downstream_removed: Vec<Edge>,
    /// 重连边之前、但不在切点祖先路径上的边
    pub branch_removed: Vec<Edge>,
    /// 被删边的端点中不在合法路径上的层（Result 层除外）
    pub dead_candidates: BTreeSet<LayerId>,
}

/// 剪边结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PruneOutcome {
    /// 切点的全部祖先（含切点自身，不含 Result 层）
    pub legitimate: BTreeSet<LayerId>,
    /// 重连后的那条边：`cut:port -> sink:0`
    pub rewired: Edge,
    pub trace: PruneTrace,
}

/// 把切点的第一条出边改接到 Result 层，并删除不再需要的边
///
/// 1. 按声明顺序找到切点的第一条出边，改为 `-> sink:0`；
/// 2. 删除其后声明的所有边；
/// 3. 在其前面的边上做反向可达性分析：一条边保留当且仅当它指向合法层，
///    此时它的源层也成为合法层；
/// 4. 其余边全部删除，保留的边维持原有相对顺序。
///
/// 切点的第一条出边就是首条边时，返回的 `legitimate` 只含切点本身。
pub fn rewire_and_prune(
    edges: &mut Vec<Edge>,
    cut: &LayerId,
    sink: &LayerId,
) -> Result<PruneOutcome, CutPointError> {
    let (position, _) =
        first_outgoing(edges, cut).ok_or_else(|| CutPointError::NoOutgoingEdge {
            layer: cut.clone(),
        })?;

    let rewired = {
        let edge = &mut edges[position];
        edge.to_layer = sink.clone();
        edge.to_port = "0".to_string();
        edge.clone()
    };

    let downstream_removed = edges.split_off(position + 1);
    let legitimate = EdgeIndex::new(&edges[..position]).ancestors(cut);

    let mut branch_removed = Vec::new();
    let mut index = 0;
    edges.retain(|edge| {
        let keep = index == position || legitimate.contains(&edge.to_layer);
        if !keep {
            branch_removed.push(edge.clone());
        }
        index += 1;
        keep
    });

    let dead_candidates = downstream_removed
        .iter()
        .chain(&branch_removed)
        .flat_map(|edge| [&edge.from_layer, &edge.to_layer])
        .filter(|&id| id != sink && !legitimate.contains(id))
        .cloned()
        .collect();

    debug!(
        "切点{cut}：保留{}条边，删除下游边{}条、旁支边{}条，合法层{}个",
        edges.len(),
        downstream_removed.len(),
        branch_removed.len(),
        legitimate.len()
    );

    Ok(PruneOutcome {
        legitimate,
        rewired,
        trace: PruneTrace {
            downstream_removed,
            branch_removed,
            dead_candidates,
        },
    })
}
