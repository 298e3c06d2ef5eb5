/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : Document <-> XML元素树 的双向转换
 *
 * 与 xml/ 的区别：
 * - xml/：只处理字节与通用元素树
 * - codec.rs：理解 net/layers/layer/port/dim 与 edges/edge 的IR语义
 */

use super::document::{Document, Section};
use super::types::{Dim, Edge, Layer, LayerId, LayerPart, Port, PortDirection, PortGroup};
use super::xml::{self, XmlElement, XmlNode};
use crate::errors::SurgeryError;
use std::collections::HashSet;

const EDGE_ATTRS: [&str; 4] = ["from-layer", "from-port", "to-layer", "to-port"];

impl Document {
    /// 从IR的XML文本解析
    pub fn from_xml_str(text: &str) -> Result<Self, SurgeryError> {
        Self::from_xml_tree(xml::parse(text)?)
    }

    /// 序列化为IR的XML文本（顺序与内存中一致）
    pub fn to_xml_string(&self) -> Result<String, SurgeryError> {
        xml::emit(&self.to_xml_tree())
    }

    pub fn from_xml_tree(root: XmlElement) -> Result<Self, SurgeryError> {
        let XmlElement {
            name: root_name,
            attrs,
            children,
        } = root;

        let mut layers = Vec::new();
        let mut edges = Vec::new();
        let mut sections = Vec::new();

        for child in children {
            let element = match child {
                XmlNode::Element(element) => element,
                XmlNode::Text(text) => {
                    return Err(SurgeryError::Parse(format!(
                        "<{root_name}>下不应出现文本：{text}"
                    )));
                }
            };
            match element.name.as_str() {
                "layers" | "edges" if sections.contains(&section_of(&element.name)) => {
                    return Err(SurgeryError::Parse(format!("<{}>重复出现", element.name)));
                }
                "layers" => {
                    layers = parse_layers(element)?;
                    sections.push(Section::Layers);
                }
                "edges" => {
                    edges = parse_edges(element)?;
                    sections.push(Section::Edges);
                }
                _ => sections.push(Section::Opaque(element)),
            }
        }

        if !sections.contains(&Section::Layers) {
            return Err(SurgeryError::Parse(format!(
                "<{root_name}>下缺少<layers>"
            )));
        }

        Ok(Self {
            root: root_name,
            attrs,
            layers,
            edges,
            sections,
        })
    }

    pub fn to_xml_tree(&self) -> XmlElement {
        let mut root = XmlElement::new(&self.root);
        root.attrs = self.attrs.clone();

        for section in &self.sections {
            let element = match section {
                Section::Layers => {
                    let mut element = XmlElement::new("layers");
                    element
                        .children
                        .extend(self.layers.iter().map(|layer| XmlNode::Element(layer_to_xml(layer))));
                    element
                }
                Section::Edges => {
                    let mut element = XmlElement::new("edges");
                    element
                        .children
                        .extend(self.edges.iter().map(|edge| XmlNode::Element(edge_to_xml(edge))));
                    element
                }
                Section::Opaque(element) => element.clone(),
            };
            root.children.push(XmlNode::Element(element));
        }
        root
    }
}

fn section_of(name: &str) -> Section {
    if name == "layers" {
        Section::Layers
    } else {
        Section::Edges
    }
}

// ========== 解析 ==========

fn parse_layers(element: XmlElement) -> Result<Vec<Layer>, SurgeryError> {
    let mut seen = HashSet::new();
    let mut layers = Vec::new();

    for (index, child) in only_elements(element)?.into_iter().enumerate() {
        if child.name != "layer" {
            return Err(SurgeryError::Parse(format!(
                "<layers>下出现了未知元素<{}>",
                child.name
            )));
        }
        let layer = parse_layer(index, child)?;
        if !seen.insert(layer.id().clone()) {
            return Err(SurgeryError::Parse(format!("层 id {} 重复", layer.id())));
        }
        layers.push(layer);
    }
    Ok(layers)
}

fn parse_layer(index: usize, element: XmlElement) -> Result<Layer, SurgeryError> {
    let required = |key: &str| {
        element
            .attrs
            .get(key)
            .map(str::to_string)
            .ok_or_else(|| SurgeryError::Parse(format!("第{index}个<layer>缺少`{key}`属性")))
    };
    let id = LayerId::new(required("id")?);
    let name = required("name")?;
    let kind = required("type")?;

    let XmlElement {
        attrs, children, ..
    } = element;
    let mut parts = Vec::new();
    for child in children {
        let child = match child {
            XmlNode::Element(child) => child,
            XmlNode::Text(text) => {
                return Err(SurgeryError::Parse(format!(
                    "层{id}下不应出现文本：{text}"
                )));
            }
        };
        match PortDirection::from_tag(&child.name) {
            Some(direction) => {
                let ports = only_elements(child)?
                    .into_iter()
                    .map(|port| parse_port(&id, port))
                    .collect::<Result<Vec<_>, _>>()?;
                parts.push(LayerPart::Ports(PortGroup { direction, ports }));
            }
            None => parts.push(LayerPart::Opaque(child)),
        }
    }

    Ok(Layer::from_parts(id, name, kind, attrs, parts))
}

fn parse_port(layer: &LayerId, element: XmlElement) -> Result<Port, SurgeryError> {
    if element.name != "port" {
        return Err(SurgeryError::Parse(format!(
            "层{layer}的端口组下出现了未知元素<{}>",
            element.name
        )));
    }
    if element.attrs.get("id").is_none() {
        return Err(SurgeryError::Parse(format!("层{layer}有端口缺少`id`属性")));
    }

    let XmlElement {
        attrs, children, ..
    } = element;
    let mut dims = Vec::new();
    let mut extras = Vec::new();
    for child in only_elements_of(layer, children)? {
        if child.name == "dim" {
            dims.push(Dim::new(child.text().trim()));
        } else {
            extras.push(child);
        }
    }
    Ok(Port::from_parts(attrs, dims, extras))
}

fn parse_edges(element: XmlElement) -> Result<Vec<Edge>, SurgeryError> {
    only_elements(element)?
        .into_iter()
        .enumerate()
        .map(|(index, child)| {
            if child.name != "edge" {
                return Err(SurgeryError::Parse(format!(
                    "<edges>下出现了未知元素<{}>",
                    child.name
                )));
            }
            let [from_layer, from_port, to_layer, to_port] = EDGE_ATTRS.map(|key| {
                child.attrs.get(key).map(str::to_string).ok_or_else(|| {
                    SurgeryError::Parse(format!("第{index}条<edge>缺少`{key}`属性"))
                })
            });
            Ok(Edge::new(from_layer?, from_port?, to_layer?, to_port?))
        })
        .collect()
}

fn only_elements(element: XmlElement) -> Result<Vec<XmlElement>, SurgeryError> {
    let name = element.name;
    element
        .children
        .into_iter()
        .map(|child| match child {
            XmlNode::Element(child) => Ok(child),
            XmlNode::Text(text) => Err(SurgeryError::Parse(format!(
                "<{name}>下不应出现文本：{text}"
            ))),
        })
        .collect()
}

fn only_elements_of(layer: &LayerId, children: Vec<XmlNode>) -> Result<Vec<XmlElement>, SurgeryError> {
    children
        .into_iter()
        .map(|child| match child {
            XmlNode::Element(child) => Ok(child),
            XmlNode::Text(text) => Err(SurgeryError::Parse(format!(
                "层{layer}的端口下不应出现文本：{text}"
            ))),
        })
        .collect()
}

// ========== 写出 ==========

fn layer_to_xml(layer: &Layer) -> XmlElement {
    let mut element = XmlElement::new("layer");
    element.attrs = layer.attrs().clone();
    for part in layer.parts() {
        let child = match part {
            LayerPart::Ports(group) => {
                let mut group_element = XmlElement::new(group.direction.tag());
                group_element
                    .children
                    .extend(group.ports.iter().map(|port| XmlNode::Element(port_to_xml(port))));
                group_element
            }
            LayerPart::Opaque(opaque) => opaque.clone(),
        };
        element.children.push(XmlNode::Element(child));
    }
    element
}

fn port_to_xml(port: &Port) -> XmlElement {
    let mut element = XmlElement::new("port");
    element.attrs = port.attrs().clone();
    for dim in port.dims() {
        element
            .children
            .push(XmlNode::Element(XmlElement::new("dim").with_text(dim.as_str())));
    }
    element
        .children
        .extend(port.extras().iter().cloned().map(XmlNode::Element));
    element
}

fn edge_to_xml(edge: &Edge) -> XmlElement {
    XmlElement::new("edge")
        .with_attr("from-layer", edge.from_layer.as_str())
        .with_attr("from-port", edge.from_port.as_str())
        .with_attr("to-layer", edge.to_layer.as_str())
        .with_attr("to-port", edge.to_port.as_str())
}
