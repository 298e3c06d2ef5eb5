use super::{XmlElement, XmlNode};
use crate::errors::SurgeryError;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::fmt::Display;

/// 把元素树写成带XML声明、以制表符缩进的文本
///
/// 输出顺序严格等于内存中的顺序，因此相同的树总是得到相同的字节。
pub fn emit(root: &XmlElement) -> Result<String, SurgeryError> {
    let mut writer = Writer::new_with_indent(Vec::new(), b'\t', 1);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", None, None)))
        .map_err(write_failed)?;
    write_element(&mut writer, root)?;

    let mut bytes = writer.into_inner();
    bytes.push(b'\n');
    String::from_utf8(bytes).map_err(write_failed)
}

fn write_element(writer: &mut Writer<Vec<u8>>, element: &XmlElement) -> Result<(), SurgeryError> {
    let mut start = BytesStart::new(element.name.as_str());
    for (key, value) in element.attrs.iter() {
        start.push_attribute((key, value));
    }

    if element.children.is_empty() {
        return writer.write_event(Event::Empty(start)).map_err(write_failed);
    }

    writer.write_event(Event::Start(start)).map_err(write_failed)?;
    for child in &element.children {
        match child {
            XmlNode::Element(inner) => write_element(writer, inner)?,
            XmlNode::Text(text) => writer
                .write_event(Event::Text(BytesText::new(text)))
                .map_err(write_failed)?,
        }
    }
    writer
        .write_event(Event::End(BytesEnd::new(element.name.as_str())))
        .map_err(write_failed)
}

fn write_failed(e: impl Display) -> SurgeryError {
    SurgeryError::Serialize(e.to_string())
}
