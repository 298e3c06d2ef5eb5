//! # 子图产物
//!
//! 抽取之外的文件副作用：给新子图命名并写出、为其复制一份 `.bin` 权重、事后清理。
//! 这些都只是包在图手术外面的文件操作，不属于算法本身。

use crate::errors::SurgeryError;
use crate::ir::Document;
use crate::surgery::ExtractOptions;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const IR_EXTENSION: &str = "xml";
const WEIGHTS_EXTENSION: &str = "bin";

/// 子图文件路径：`<目录>/<原文件名>-cut-<层名，'/' 替换为 '-'>.xml`
pub fn subgraph_path(model_xml: &Path, layer_name: &str) -> PathBuf {
    let stem = model_xml
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = format!(
        "{stem}-cut-{}.{IR_EXTENSION}",
        layer_name.replace('/', "-")
    );
    model_xml.with_file_name(file_name)
}

/// IR 文件对应的权重文件路径
pub fn weights_path(model_xml: &Path) -> PathBuf {
    model_xml.with_extension(WEIGHTS_EXTENSION)
}

/// 从 `model_xml` 中以 `layer_name` 为切点抽取子图并写到同目录，返回新文件路径
///
/// 新权重文件已存在时不会覆盖；权重复制失败时不留下新的 `.xml`。
pub fn create_subgraph<P: AsRef<Path>>(
    model_xml: P,
    layer_name: &str,
    options: &ExtractOptions,
) -> Result<PathBuf, SurgeryError> {
    let model_xml = model_xml.as_ref();
    if model_xml.extension().and_then(|e| e.to_str()) != Some(IR_EXTENSION) {
        return Err(SurgeryError::InvalidPath(model_xml.to_path_buf()));
    }
    if layer_name.trim().is_empty() {
        return Err(SurgeryError::EmptyName);
    }

    let document = Document::load(model_xml)?;
    let extraction = document.extract_subgraph_with(layer_name, options)?;

    let new_xml = subgraph_path(model_xml, layer_name);
    extraction.document.save(&new_xml)?;

    let old_bin = weights_path(model_xml);
    let new_bin = weights_path(&new_xml);
    if new_bin.is_file() {
        warn!("权重文件已存在，跳过复制: {}", new_bin.display());
    } else {
        info!("复制权重 {} -> {}", old_bin.display(), new_bin.display());
        if let Err(e) = std::fs::copy(&old_bin, &new_bin) {
            warn!("权重复制失败，删除已写出的 {}", new_xml.display());
            std::fs::remove_file(&new_xml)?;
            return Err(e.into());
        }
    }

    Ok(new_xml)
}

/// 删除子图的 `.xml` 及同名 `.bin`（不存在的文件只记日志）
pub fn delete_subgraph<P: AsRef<Path>>(subgraph_xml: P) -> Result<(), SurgeryError> {
    let subgraph_xml = subgraph_xml.as_ref();
    for path in [subgraph_xml.to_path_buf(), weights_path(subgraph_xml)] {
        if path.is_file() {
            info!("删除文件: {}", path.display());
            std::fs::remove_file(&path)?;
        } else {
            warn!("文件不存在: {}", path.display());
        }
    }
    Ok(())
}
