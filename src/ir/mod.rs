/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : IR 文档模型
 *
 * - types.rs: LayerId / Dim / Port / Layer / Edge
 * - document.rs: Document 容器与访问器
 * - codec.rs: Document <-> XML元素树
 * - model_io.rs: load/save
 * - descriptor.rs: describe/summary
 * - xml/: 通用有序XML树（quick-xml）
 */

mod codec;
mod descriptor;
mod document;
mod model_io;
mod types;
pub mod xml;

pub use descriptor::{DocumentDescriptor, LayerDescriptor};
pub use document::Document;
pub use types::{Dim, Edge, Layer, LayerId, LayerPart, Port, PortDirection, PortGroup};

#[cfg(test)]
pub(crate) mod tests;
