use super::{Attributes, XmlElement, XmlNode};
use crate::errors::SurgeryError;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

/// 把XML文本解析为元素树
///
/// 注释、处理指令、XML声明与DOCTYPE都会被丢弃；纯空白文本被忽略。
pub fn parse(text: &str) -> Result<XmlElement, SurgeryError> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<XmlElement> = Vec::new();
    let mut root: Option<XmlElement> = None;

    loop {
        let event = match reader.read_event() {
            Ok(event) => event,
            Err(e) => {
                return Err(SurgeryError::Parse(format!(
                    "第{}字节附近：{e}",
                    reader.buffer_position()
                )));
            }
        };

        match event {
            Event::Start(start) => stack.push(open_element(&start)?),
            Event::Empty(start) => {
                let element = open_element(&start)?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| SurgeryError::Parse("出现了多余的结束标签".to_string()))?;
                attach(&mut stack, &mut root, element)?;
            }
            Event::Text(text) => {
                let value = text
                    .unescape()
                    .map_err(|e| SurgeryError::Parse(format!("文本转义无效：{e}")))?;
                push_text(&mut stack, &value)?;
            }
            Event::CData(data) => {
                let value = String::from_utf8_lossy(data.as_ref()).into_owned();
                push_text(&mut stack, &value)?;
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.last() {
        return Err(SurgeryError::Parse(format!("元素<{}>未闭合", open.name)));
    }
    root.ok_or_else(|| SurgeryError::Parse("文档中没有根元素".to_string()))
}

fn open_element(start: &BytesStart) -> Result<XmlElement, SurgeryError> {
    let name = String::from_utf8(start.name().as_ref().to_vec())
        .map_err(|e| SurgeryError::Parse(format!("元素名不是合法的UTF-8：{e}")))?;

    let mut attrs = Attributes::new();
    for attr in start.attributes() {
        let attr =
            attr.map_err(|e| SurgeryError::Parse(format!("元素<{name}>的属性无效：{e}")))?;
        let key = String::from_utf8(attr.key.as_ref().to_vec())
            .map_err(|e| SurgeryError::Parse(format!("元素<{name}>的属性名无效：{e}")))?;
        let value = attr
            .unescape_value()
            .map_err(|e| SurgeryError::Parse(format!("元素<{name}>的属性`{key}`无效：{e}")))?
            .into_owned();
        attrs.push(key, value);
    }

    Ok(XmlElement {
        name,
        attrs,
        children: Vec::new(),
    })
}

fn attach(
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
    element: XmlElement,
) -> Result<(), SurgeryError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(XmlNode::Element(element));
        return Ok(());
    }
    if root.is_some() {
        return Err(SurgeryError::Parse(format!(
            "存在多个根元素（第二个为<{}>）",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

fn push_text(stack: &mut [XmlElement], text: &str) -> Result<(), SurgeryError> {
    if text.trim().is_empty() {
        return Ok(());
    }
    match stack.last_mut() {
        Some(parent) => {
            parent.children.push(XmlNode::Text(text.to_string()));
            Ok(())
        }
        None => Err(SurgeryError::Parse(format!("根元素之外出现了文本：{text}"))),
    }
}
