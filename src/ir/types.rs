/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : IR 的基础类型：层、端口、维度、边
 */

use super::xml::{Attributes, XmlElement};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::{self, Display};

/// 层 ID
///
/// 内部保持IR中的原始字符串；派生的 `Ord` 只是字典序，
/// 仅用于集合存储，剪枝正确性从不依赖它。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// IR 格式的“原生”序：两边都是无符号整数时按数值比较，否则退化为字典序
    ///
    /// 只用于切点没有祖先时的诊断日志（"10" 在数值上大于 "9"，字典序却相反）。
    pub fn cmp_native(&self, other: &Self) -> Ordering {
        match (self.0.parse::<u64>(), other.0.parse::<u64>()) {
            (Ok(a), Ok(b)) => a.cmp(&b),
            _ => self.0.cmp(&other.0),
        }
    }
}

impl Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// 形状中的一个维度（字面量或符号，如 `-1`、`?`、`1..8`），不做解释
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dim(String);

impl Dim {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Dim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Dim {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<i64> for Dim {
    fn from(value: i64) -> Self {
        Self(value.to_string())
    }
}

/// 端口方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PortDirection {
    Input,
    Output,
}

impl PortDirection {
    /// 对应的XML元素名
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Output => "output",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "input" => Some(Self::Input),
            "output" => Some(Self::Output),
            _ => None,
        }
    }
}

impl Display for PortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Input => "输入",
            Self::Output => "输出",
        };
        write!(f, "{}", name)
    }
}

/// 端口：有序属性 + 有序维度 + 其余子元素（如 `rt_info`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Port {
    attrs: Attributes,
    dims: Vec<Dim>,
    extras: Vec<XmlElement>,
}

impl Port {
    pub fn new(id: &str) -> Self {
        let mut attrs = Attributes::new();
        attrs.set("id", id);
        Self {
            attrs,
            dims: Vec::new(),
            extras: Vec::new(),
        }
    }

    pub(crate) const fn from_parts(
        attrs: Attributes,
        dims: Vec<Dim>,
        extras: Vec<XmlElement>,
    ) -> Self {
        Self {
            attrs,
            dims,
            extras,
        }
    }

    pub fn with_attr(mut self, key: &str, value: impl Into<String>) -> Self {
        self.attrs.set(key, value);
        self
    }

    pub fn with_dims<D: Into<Dim>>(mut self, dims: impl IntoIterator<Item = D>) -> Self {
        self.dims.extend(dims.into_iter().map(Into::into));
        self
    }

    pub fn id(&self) -> &str {
        self.attrs.get("id").unwrap_or_default()
    }

    /// 端口的张量名（`names` 属性）
    pub fn names(&self) -> Option<&str> {
        self.attrs.get("names")
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key)
    }

    pub const fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    /// 设置属性，返回旧值
    pub fn set_attr(&mut self, key: &str, value: impl Into<String>) -> Option<String> {
        self.attrs.set(key, value)
    }

    pub fn dims(&self) -> &[Dim] {
        &self.dims
    }

    /// 整体替换维度：先清空，再按顺序追加
    pub fn replace_dims(&mut self, dims: impl IntoIterator<Item = Dim>) {
        self.dims.clear();
        self.dims.extend(dims);
    }

    pub fn extras(&self) -> &[XmlElement] {
        &self.extras
    }
}

/// 同方向的一组端口（对应 `<input>` 或 `<output>`）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortGroup {
    pub direction: PortDirection,
    pub ports: Vec<Port>,
}

/// 层的子部件，保持文档中的先后顺序
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayerPart {
    Ports(PortGroup),
    /// `data`、`rt_info` 等原样透传的子元素
    Opaque(XmlElement),
}

/// 层（计算节点）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layer {
    id: LayerId,
    name: String,
    kind: String,
    /// 完整的有序属性（含 id/name/type），序列化以它为准
    attrs: Attributes,
    parts: Vec<LayerPart>,
}

impl Layer {
    /// 终端（sink）层的类型名
    pub const SINK_TYPE: &'static str = "Result";

    pub fn new(id: impl Into<LayerId>, name: &str, kind: &str) -> Self {
        let id = id.into();
        let attrs = [
            ("id", id.as_str()),
            ("name", name),
            ("type", kind),
            ("version", "opset1"),
        ]
        .into_iter()
        .collect();
        Self {
            id,
            name: name.to_string(),
            kind: kind.to_string(),
            attrs,
            parts: Vec::new(),
        }
    }

    /// 由已校验过的属性构造（`id`/`name`/`type` 由调用方保证存在）
    pub(crate) fn from_parts(
        id: LayerId,
        name: String,
        kind: String,
        attrs: Attributes,
        parts: Vec<LayerPart>,
    ) -> Self {
        Self {
            id,
            name,
            kind,
            attrs,
            parts,
        }
    }

    pub fn with_input(mut self, port: Port) -> Self {
        self.push_port(PortDirection::Input, port);
        self
    }

    pub fn with_output(mut self, port: Port) -> Self {
        self.push_port(PortDirection::Output, port);
        self
    }

    /// 追加一个原样透传的子元素（如 `<data .../>`）
    pub fn with_opaque(mut self, element: XmlElement) -> Self {
        self.parts.push(LayerPart::Opaque(element));
        self
    }

    pub const fn id(&self) -> &LayerId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn is_sink(&self) -> bool {
        self.kind == Self::SINK_TYPE
    }

    pub const fn attrs(&self) -> &Attributes {
        &self.attrs
    }

    pub fn parts(&self) -> &[LayerPart] {
        &self.parts
    }

    /// 是否存在该方向的端口组（哪怕组内为空）
    pub fn has_port_group(&self, direction: PortDirection) -> bool {
        self.group(direction).is_some()
    }

    /// 该方向第一个端口组中的所有端口
    pub fn ports(&self, direction: PortDirection) -> &[Port] {
        self.group(direction)
            .map(|group| group.ports.as_slice())
            .unwrap_or_default()
    }

    /// 按 id 取端口；`id` 为 `None` 或找不到时退回该方向的第一个端口
    pub fn port(&self, direction: PortDirection, id: Option<&str>) -> Option<&Port> {
        let ports = self.ports(direction);
        id.and_then(|id| ports.iter().find(|port| port.id() == id))
            .or_else(|| ports.first())
    }

    pub fn port_mut(&mut self, direction: PortDirection, id: Option<&str>) -> Option<&mut Port> {
        let ports = self
            .parts
            .iter_mut()
            .find_map(|part| match part {
                LayerPart::Ports(group) if group.direction == direction => Some(&mut group.ports),
                _ => None,
            })?;
        let position = id
            .and_then(|id| ports.iter().position(|port| port.id() == id))
            .unwrap_or(0);
        ports.get_mut(position)
    }

    fn group(&self, direction: PortDirection) -> Option<&PortGroup> {
        self.parts.iter().find_map(|part| match part {
            LayerPart::Ports(group) if group.direction == direction => Some(group),
            _ => None,
        })
    }

    fn push_port(&mut self, direction: PortDirection, port: Port) {
        for part in &mut self.parts {
            match part {
                LayerPart::Ports(group) if group.direction == direction => {
                    group.ports.push(port);
                    return;
                }
                _ => {}
            }
        }
        self.parts.push(LayerPart::Ports(PortGroup {
            direction,
            ports: vec![port],
        }));
    }
}

/// 数据边：`(from_layer, from_port) -> (to_layer, to_port)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub from_layer: LayerId,
    pub from_port: String,
    pub to_layer: LayerId,
    pub to_port: String,
}

impl Edge {
    pub fn new(
        from_layer: impl Into<LayerId>,
        from_port: impl Into<String>,
        to_layer: impl Into<LayerId>,
        to_port: impl Into<String>,
    ) -> Self {
        Self {
            from_layer: from_layer.into(),
            from_port: from_port.into(),
            to_layer: to_layer.into(),
            to_port: to_port.into(),
        }
    }
}

impl Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{} -> {}:{}",
            self.from_layer, self.from_port, self.to_layer, self.to_port
        )
    }
}
