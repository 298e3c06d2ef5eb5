use std::path::PathBuf;
use thiserror::Error;
mod surgery;
pub use self::surgery::*;

/// 图手术相关的所有错误
///
/// 引擎内部从不吞掉错误，也不重试（图结构错误不是瞬时错误）；
/// 需要“跳过该切点继续下一个”的策略由调用方自行决定。
#[derive(Error, Debug)]
pub enum SurgeryError {
    /// 文档无法解析为IR数据模型
    #[error("IR解析失败：{0}")]
    Parse(String),
    /// 指定名称的切点层不存在
    #[error("找不到名为`{0}`的层")]
    NotFound(String),
    #[error("切点层名称为空")]
    EmptyName,
    /// 缺少必需的结构元素（Result层、必需端口、edges容器等）
    #[error("IR格式不完整：{0}")]
    Format(String),
    #[error(transparent)]
    CutPoint(#[from] CutPointError),
    #[error(transparent)]
    SinkPatch(#[from] SinkPatchError),

    /// 不是指向IR（.xml）文件的路径
    #[error("路径不是IR模型文件：{0}")]
    InvalidPath(PathBuf),
    #[error("IR写出失败：{0}")]
    Serialize(String),
    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),
}
