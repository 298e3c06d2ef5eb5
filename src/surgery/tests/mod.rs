/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 图手术的单元测试
 */

mod edges;

use crate::ir::{Document, Edge, Layer, Port};

/// 菱形小图：
///
/// ```text
/// Input(0) -> A(1) -> B(2) -> Out(3)
///             A(1) -> C(4) -> Out(3)
/// ```
///
/// 边的声明顺序：0→1, 1→2, 1→4, 2→3, 4→3。
/// 各层输出维度互不相同，便于检查 Result 层被修补成了谁的形状。
fn diamond() -> Document {
    Document::new("diamond")
        .with_layer(
            Layer::new("0", "Input", "Parameter")
                .with_output(Port::new("0").with_attr("names", "input").with_dims([1_i64, 3])),
        )
        .with_layer(
            Layer::new("1", "A", "MatMul")
                .with_input(Port::new("0").with_dims([1_i64, 3]))
                .with_output(Port::new("1").with_attr("names", "a_out").with_dims([1_i64, 16])),
        )
        .with_layer(
            Layer::new("2", "B", "Relu")
                .with_input(Port::new("0").with_dims([1_i64, 16]))
                .with_output(Port::new("1").with_attr("names", "b_out").with_dims([1_i64, 8])),
        )
        .with_layer(
            Layer::new("3", "Out", "Result")
                .with_input(Port::new("0").with_dims([1_i64, 64]))
                .with_input(Port::new("1").with_dims([1_i64, 64])),
        )
        .with_layer(
            Layer::new("4", "C", "Sigmoid")
                .with_input(Port::new("0").with_dims([1_i64, 16]))
                .with_output(Port::new("1").with_attr("names", "c_out").with_dims([1_i64, 32])),
        )
        .with_edge(Edge::new("0", "0", "1", "0"))
        .with_edge(Edge::new("1", "1", "2", "0"))
        .with_edge(Edge::new("1", "1", "4", "0"))
        .with_edge(Edge::new("2", "1", "3", "0"))
        .with_edge(Edge::new("4", "1", "3", "1"))
}

/// 按文档顺序列出层 id
fn layer_ids(doc: &Document) -> Vec<&str> {
    doc.layers().iter().map(|layer| layer.id().as_str()).collect()
}

/// 以 `from->to` 的形式列出边
fn edge_pairs(doc: &Document) -> Vec<String> {
    doc.edges()
        .iter()
        .map(|edge| format!("{}->{}", edge.from_layer, edge.to_layer))
        .collect()
}

/// 某层第一个输入/输出端口的维度
fn dims_of(doc: &Document, name: &str, direction: crate::ir::PortDirection) -> Vec<String> {
    doc.layer_by_name(name)
        .and_then(|layer| layer.port(direction, None))
        .map(|port| port.dims().iter().map(ToString::to_string).collect())
        .unwrap_or_default()
}
