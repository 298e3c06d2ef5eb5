use super::diamond;
use crate::errors::CutPointError;
use crate::ir::{Edge, LayerId};
use crate::surgery::rewire_and_prune;
use std::collections::BTreeSet;

fn ids(items: &[&str]) -> BTreeSet<LayerId> {
    items.iter().map(|&id| LayerId::from(id)).collect()
}

#[test]
fn test_rewire_and_prune_on_branch() {
    let mut edges = diamond().edges().to_vec();
    let outcome =
        rewire_and_prune(&mut edges, &LayerId::from("2"), &LayerId::from("3")).unwrap();

    // 1. 切点的第一条出边被改接到 Result:0
    assert_eq!(outcome.rewired, Edge::new("2", "1", "3", "0"));

    // 2. 只剩祖先路径 + 重连边，相对顺序不变
    assert_eq!(
        edges,
        [
            Edge::new("0", "0", "1", "0"),
            Edge::new("1", "1", "2", "0"),
            Edge::new("2", "1", "3", "0"),
        ]
    );
    assert_eq!(outcome.legitimate, ids(&["0", "1", "2"]));

    // 3. 诊断记录
    assert_eq!(outcome.trace.downstream_removed, [Edge::new("4", "1", "3", "1")]);
    assert_eq!(outcome.trace.branch_removed, [Edge::new("1", "1", "4", "0")]);
    assert_eq!(outcome.trace.dead_candidates, ids(&["4"]));
}

#[test]
fn test_rewire_and_prune_drops_edge_into_sink() {
    // 在 C 上切：B->Out 声明在 C 的出边之前，但 B 不是 C 的祖先
    let mut edges = diamond().edges().to_vec();
    let outcome =
        rewire_and_prune(&mut edges, &LayerId::from("4"), &LayerId::from("3")).unwrap();

    assert_eq!(outcome.rewired, Edge::new("4", "1", "3", "0"));
    assert_eq!(
        edges,
        [
            Edge::new("0", "0", "1", "0"),
            Edge::new("1", "1", "4", "0"),
            Edge::new("4", "1", "3", "0"),
        ]
    );
    assert!(outcome.trace.downstream_removed.is_empty());
    assert_eq!(
        outcome.trace.branch_removed,
        [Edge::new("1", "1", "2", "0"), Edge::new("2", "1", "3", "0")]
    );
    // Result 层永远不是删除候选
    assert_eq!(outcome.trace.dead_candidates, ids(&["2"]));
}

#[test]
fn test_ancestor_declared_out_of_order_is_kept() {
    // 1->2 在 0->1 之前声明；只看“前面的兄弟”会丢掉 0->1
    let mut edges = vec![
        Edge::new("1", "0", "2", "0"),
        Edge::new("0", "0", "1", "0"),
        Edge::new("2", "0", "5", "0"),
        Edge::new("5", "0", "9", "0"),
    ];
    let outcome =
        rewire_and_prune(&mut edges, &LayerId::from("2"), &LayerId::from("9")).unwrap();

    assert_eq!(outcome.legitimate, ids(&["0", "1", "2"]));
    assert_eq!(
        edges,
        [
            Edge::new("1", "0", "2", "0"),
            Edge::new("0", "0", "1", "0"),
            Edge::new("2", "0", "9", "0"),
        ]
    );
}

#[test]
fn test_rewire_uses_only_first_outgoing_edge() {
    // 切点有两条出边，只有第一条被重连，第二条作为下游被删除
    let mut edges = vec![
        Edge::new("0", "0", "1", "0"),
        Edge::new("1", "2", "3", "0"),
        Edge::new("1", "1", "4", "0"),
        Edge::new("3", "0", "9", "0"),
    ];
    let outcome =
        rewire_and_prune(&mut edges, &LayerId::from("1"), &LayerId::from("9")).unwrap();

    assert_eq!(outcome.rewired, Edge::new("1", "2", "9", "0"));
    assert_eq!(edges.len(), 2);
    assert_eq!(outcome.trace.downstream_removed.len(), 2);
    assert_eq!(outcome.trace.dead_candidates, ids(&["3", "4"]));
}

#[test]
fn test_degenerate_cut_has_only_itself() {
    // 切点的第一条出边就是第一条边：前缀为空
    let mut edges = diamond().edges().to_vec();
    let outcome =
        rewire_and_prune(&mut edges, &LayerId::from("0"), &LayerId::from("3")).unwrap();

    assert_eq!(outcome.legitimate, ids(&["0"]));
    assert_eq!(edges, [Edge::new("0", "0", "3", "0")]);
}

#[test]
fn test_no_outgoing_edge() {
    let mut edges = diamond().edges().to_vec();
    let before = edges.clone();

    let result = rewire_and_prune(&mut edges, &LayerId::from("3"), &LayerId::from("3"));
    assert_eq!(
        result.unwrap_err(),
        CutPointError::NoOutgoingEdge {
            layer: LayerId::from("3")
        }
    );
    // 失败时边列表不被触碰
    assert_eq!(edges, before);
}

#[test]
fn test_trace_serializes_to_json() {
    let mut edges = diamond().edges().to_vec();
    let outcome =
        rewire_and_prune(&mut edges, &LayerId::from("2"), &LayerId::from("3")).unwrap();

    let json = serde_json::to_value(&outcome.trace).unwrap();
    assert_eq!(json["dead_candidates"], serde_json::json!(["4"]));
    assert_eq!(json["branch_removed"][0]["to_layer"], "4");
}
