/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 边的显式邻接索引
 *
 * 边列表本身是一个全序（声明顺序）；这里在其上建立 to_layer -> 入边位置 的索引，
 * 让祖先可达性通过集合成员判断得出，而不是依赖“前面的兄弟节点一定在上游”这种偶然顺序。
 */

use crate::ir::{Edge, LayerId};
use std::collections::{BTreeSet, HashMap};

/// 按声明顺序找到某层的第一条出边，返回其位置
pub fn first_outgoing<'a>(edges: &'a [Edge], layer: &LayerId) -> Option<(usize, &'a Edge)> {
    edges
        .iter()
        .enumerate()
        .find(|(_, edge)| &edge.from_layer == layer)
}

/// 入向邻接索引
pub struct EdgeIndex<'a> {
    edges: &'a [Edge],
    incoming: HashMap<&'a LayerId, Vec<usize>>,
}

impl<'a> EdgeIndex<'a> {
    pub fn new(edges: &'a [Edge]) -> Self {
        let mut incoming: HashMap<&LayerId, Vec<usize>> = HashMap::new();
        for (position, edge) in edges.iter().enumerate() {
            incoming.entry(&edge.to_layer).or_default().push(position);
        }
        Self { edges, incoming }
    }

    /// 指向该层的所有边在全序中的位置（升序）
    pub fn incoming(&self, layer: &LayerId) -> &[usize] {
        self.incoming
            .get(layer)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// 从 `start` 出发沿入边反向遍历，得到全部祖先（含 `start` 自身）
    pub fn ancestors(&self, start: &LayerId) -> BTreeSet<LayerId> {
        let mut visited = BTreeSet::from([start.clone()]);
        let mut pending = vec![start];

        while let Some(layer) = pending.pop() {
            for &position in self.incoming(layer) {
                let parent = &self.edges[position].from_layer;
                if visited.insert(parent.clone()) {
                    pending.push(parent);
                }
            }
        }
        visited
    }
}
