/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : 图手术：以某层为切点抽取子图
 *
 * 各部分：
 * - adjacency.rs: 显式的入向邻接索引 + 祖先可达性
 * - edges.rs: 重连切点出边、剪边（rewire_and_prune）
 * - sink.rs: 删层、修补 Result 层（prune_and_patch_sink）
 * - extract.rs: 总入口（extract_subgraph / list_eligible_cut_points）
 *
 * 单线程、同步、无共享状态：同一文档的修改顺序有依赖，不可并发；
 * 不同的抽取请求各自持有副本，可以并行。
 */

mod adjacency;
mod edges;
mod extract;
mod sink;

pub use adjacency::{EdgeIndex, first_outgoing};
pub use edges::{PruneOutcome, PruneTrace, rewire_and_prune};
pub use extract::{ExtractOptions, Extraction};
pub use sink::SinkPatch;

#[cfg(test)]
mod tests;
