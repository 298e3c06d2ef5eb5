/*
 * @Author       : 老董
 * @Date         : 2026-10-18
 * @Description  : IR 模型与编解码的单元测试，以及各模块共用的测试夹具
 */


use crate::ir::Document;

/// 一个结构贴近真实导出结果的小模型：
///
/// ```text
/// input(0) ──┐
///            ├─> MatMul(2) ─┬─> Relu(3) ────┬─> Concat(5) ─> sink_port_0(6)
/// weights(1)─┘              └─> Sigmoid(4) ─┘
/// ```
///
/// 边按源层 id 升序声明（与导出工具的习惯一致），`<rt_info>` 等段落需原样保留。
pub(crate) const SAMPLE_IR: &str = r#"<?xml version="1.0"?>
<!-- exported for unit tests -->
<net name="tiny_decoder" version="11">
	<layers>
		<layer id="0" name="input" type="Parameter" version="opset1">
			<data shape="1,4" element_type="f32" />
			<output>
				<port id="0" precision="FP32" names="input">
					<dim>1</dim>
					<dim>4</dim>
				</port>
			</output>
		</layer>
		<layer id="1" name="weights" type="Const" version="opset1">
			<data element_type="f32" shape="4, 4" offset="0" size="64" />
			<output>
				<port id="0" precision="FP32">
					<dim>4</dim>
					<dim>4</dim>
				</port>
			</output>
		</layer>
		<layer id="2" name="/model/layers.0/MatMul" type="MatMul" version="opset1">
			<data transpose_a="false" transpose_b="true" />
			<input>
				<port id="0" precision="FP32">
					<dim>1</dim>
					<dim>4</dim>
				</port>
				<port id="1" precision="FP32">
					<dim>4</dim>
					<dim>4</dim>
				</port>
			</input>
			<output>
				<port id="2" precision="FP32" names="/model/layers.0/MatMul_output_0">
					<dim>1</dim>
					<dim>4</dim>
				</port>
			</output>
		</layer>
		<layer id="3" name="/model/layers.0/Relu" type="Relu" version="opset1">
			<input>
				<port id="0" precision="FP32">
					<dim>1</dim>
					<dim>4</dim>
				</port>
			</input>
			<output>
				<port id="1" precision="FP32" names="/model/layers.0/Relu_output_0">
					<dim>1</dim>
					<dim>4</dim>
				</port>
			</output>
		</layer>
		<layer id="4" name="/model/layers.0/Sigmoid" type="Sigmoid" version="opset1">
			<input>
				<port id="0" precision="FP32">
					<dim>1</dim>
					<dim>4</dim>
				</port>
			</input>
			<output>
				<port id="1" precision="FP32" names="/model/layers.0/Sigmoid_output_0">
					<dim>1</dim>
					<dim>4</dim>
				</port>
			</output>
		</layer>
		<layer id="5" name="/model/layers.1/Concat" type="Concat" version="opset1">
			<data axis="1" />
			<input>
				<port id="0" precision="FP32">
					<dim>1</dim>
					<dim>4</dim>
				</port>
				<port id="1" precision="FP32">
					<dim>1</dim>
					<dim>4</dim>
				</port>
			</input>
			<output>
				<port id="2" precision="FP32" names="logits">
					<dim>1</dim>
					<dim>8</dim>
				</port>
			</output>
		</layer>
		<layer id="6" name="sink_port_0" type="Result" version="opset1">
			<input>
				<port id="0" precision="FP32">
					<dim>1</dim>
					<dim>8</dim>
				</port>
			</input>
		</layer>
	</layers>
	<edges>
		<edge from-layer="0" from-port="0" to-layer="2" to-port="0" />
		<edge from-layer="1" from-port="0" to-layer="2" to-port="1" />
		<edge from-layer="2" from-port="2" to-layer="3" to-port="0" />
		<edge from-layer="2" from-port="2" to-layer="4" to-port="0" />
		<edge from-layer="3" from-port="1" to-layer="5" to-port="0" />
		<edge from-layer="4" from-port="1" to-layer="5" to-port="1" />
		<edge from-layer="5" from-port="2" to-layer="6" to-port="0" />
	</edges>
	<rt_info>
		<MO_version value="2024.4.0" />
		<conversion_parameters>
			<framework value="onnx" />
		</conversion_parameters>
	</rt_info>
</net>
"#;

pub(crate) fn sample_document() -> Document {
    Document::from_xml_str(SAMPLE_IR).unwrap()
}
