/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : Document 的文件读写（只处理 .xml 拓扑；.bin 权重由 artifacts 模块负责）
 */

use super::document::Document;
use crate::errors::SurgeryError;
use std::path::Path;

impl Document {
    /// 从IR文件加载
    ///
    /// # 示例
    /// ```ignore
    /// let doc = Document::load("models/model.xml")?;
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SurgeryError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_xml_str(&text)
    }

    /// 写出到IR文件（覆盖已存在的文件）
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SurgeryError> {
        let text = self.to_xml_string()?;
        std::fs::write(path.as_ref(), text)?;
        Ok(())
    }
}
