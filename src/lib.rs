//! # Subgraph Cut
//!
//! `subgraph_cut`用于对推理引擎的IR文档（XML拓扑 + `.bin`权重）做“图手术”：
//! 给定任意一层作为切点，生成一份新的、结构合法的IR，其唯一输出就是该层的输出，
//! 所有不在该层祖先路径上的层和边都会被剪掉。
//!
//! 编译、推理、数值比对、报表等外围工作不在本库范围内。
//!

pub mod artifacts;
pub mod config;
pub mod errors;
pub mod ir;
pub mod surgery;
pub mod utils;

pub use config::{CutPointFilter, SurgeryConfig};
pub use errors::{CutPointError, SinkPatchError, SurgeryError};
pub use ir::{Dim, Document, Edge, Layer, LayerId, Port, PortDirection};
pub use surgery::{ExtractOptions, Extraction, PruneTrace};
