use crate::ir::{LayerId, PortDirection};
use thiserror::Error;

/// 切点本身不满足重连条件
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CutPointError {
    /// 切点层没有任何出边可供重连到Result层
    #[error("层{layer}没有出边，无法作为切点")]
    NoOutgoingEdge { layer: LayerId },
}

/// 修补Result层维度时缺少端口
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkPatchError {
    #[error("层{layer}缺少{direction}端口")]
    MissingPort {
        layer: LayerId,
        direction: PortDirection,
    },
}
