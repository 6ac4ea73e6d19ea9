// ==========================================
// 资产管理壳规划域生成系统 - 环境文件解析器
// ==========================================
// 依据: AAS Part 2 - 环境 JSON 序列化
// 支持: .json (assetAdministrationShells + submodels 顶层数组)
// ==========================================
// 职责: 容器文件 -> 只读 ElementGraph, 仅此一处做一次
// 说明: 宽松解析 - 未知元素种类跳过, 不中断加载
// ==========================================

use crate::domain::graph::{
    ElementCollection, ElementGraph, Entity, Property, ReferenceElement, Shell, Submodel,
    SubmodelElement,
};
use crate::importer::error::{LoadError, LoadResult};
use serde::Deserialize;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{debug, info, instrument};

// ==========================================
// 原始反序列化结构 (与环境 JSON 对齐)
// ==========================================

#[derive(Debug, Deserialize)]
struct RawEnvironment {
    #[serde(rename = "assetAdministrationShells")]
    shells: Option<Vec<RawShell>>,
    submodels: Option<Vec<RawSubmodel>>,
}

#[derive(Debug, Deserialize)]
struct RawShell {
    id: Option<String>,
    #[serde(rename = "idShort")]
    id_short: Option<String>,
    #[serde(default)]
    submodels: Vec<RawReference>,
}

#[derive(Debug, Deserialize)]
struct RawReference {
    #[serde(default)]
    keys: Vec<RawKey>,
}

#[derive(Debug, Deserialize)]
struct RawKey {
    #[serde(default)]
    value: String,
}

#[derive(Debug, Deserialize)]
struct RawSubmodel {
    id: Option<String>,
    #[serde(rename = "idShort")]
    id_short: Option<String>,
    #[serde(rename = "submodelElements", default)]
    elements: Vec<Value>,
}

// ==========================================
// EnvironmentParser - 环境文件解析器
// ==========================================

pub struct EnvironmentParser;

impl EnvironmentParser {
    /// 从文件加载环境并构建元素图
    ///
    /// # 错误
    /// - 文件不存在 / 扩展名不是 .json -> LoadError
    /// - JSON 解析失败 / 顶层数组缺失 -> LoadError
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> LoadResult<ElementGraph> {
        // 检查文件存在
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.display().to_string()));
        }

        // 检查扩展名
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if ext != "json" {
            return Err(LoadError::UnsupportedFormat(ext.to_string()));
        }

        let content = fs::read_to_string(path)?;
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("domain")
            .to_string();

        let graph = Self::parse_str(&content, &stem)?;
        info!(
            shells = graph.shells().len(),
            submodels = graph.submodel_count(),
            "环境文件加载完成"
        );
        Ok(graph)
    }

    /// 从字符串解析环境 (测试与内嵌场景用)
    pub fn parse_str(content: &str, source_stem: &str) -> LoadResult<ElementGraph> {
        let raw: RawEnvironment = serde_json::from_str(content)?;

        let raw_shells = raw
            .shells
            .ok_or(LoadError::MissingTopLevelArray("assetAdministrationShells"))?;
        let raw_submodels = raw
            .submodels
            .ok_or(LoadError::MissingTopLevelArray("submodels"))?;

        let mut shells = Vec::with_capacity(raw_shells.len());
        for (idx, rs) in raw_shells.into_iter().enumerate() {
            let id = rs.id.ok_or(LoadError::ShellMissingId(idx))?;
            let submodel_ids = rs
                .submodels
                .iter()
                .filter_map(|r| r.keys.first())
                .map(|k| k.value.clone())
                .collect();
            shells.push(Shell {
                id,
                id_short: rs.id_short.unwrap_or_default(),
                submodel_ids,
            });
        }

        let mut submodels = Vec::with_capacity(raw_submodels.len());
        for (idx, rsm) in raw_submodels.into_iter().enumerate() {
            let id = rsm.id.ok_or(LoadError::SubmodelMissingId(idx))?;
            let elements = rsm
                .elements
                .iter()
                .filter_map(convert_element)
                .collect();
            submodels.push(Submodel {
                id,
                id_short: rsm.id_short.unwrap_or_default(),
                elements,
            });
        }

        Ok(ElementGraph::new(shells, submodels, source_stem.to_string()))
    }
}

// ==========================================
// 元素转换 (逐 modelType 分派)
// ==========================================

/// 将原始 JSON 元素转换为领域元素
///
/// 未知 modelType 或缺 idShort 的元素跳过 (宽松加载)
fn convert_element(value: &Value) -> Option<SubmodelElement> {
    let model_type = element_model_type(value)?;

    let id_short = match value.get("idShort").and_then(Value::as_str) {
        Some(s) => s.to_string(),
        None => {
            debug!(model_type, "跳过缺少 idShort 的元素");
            return None;
        }
    };

    match model_type {
        "Property" => {
            // 值可能是字符串或数字, 统一为字符串; null 保留为缺失
            let prop_value = match value.get("value") {
                Some(Value::String(s)) => Some(s.clone()),
                Some(Value::Number(n)) => Some(n.to_string()),
                Some(Value::Bool(b)) => Some(b.to_string()),
                _ => None,
            };
            Some(SubmodelElement::Property(Property {
                id_short,
                value: prop_value,
            }))
        }
        "ReferenceElement" => {
            let keys = value
                .get("value")
                .and_then(|v| v.get("keys"))
                .and_then(Value::as_array)
                .map(|arr| {
                    arr.iter()
                        .filter_map(|k| k.get("value").and_then(Value::as_str))
                        .map(|s| s.to_string())
                        .collect()
                })
                .unwrap_or_default();
            Some(SubmodelElement::ReferenceElement(ReferenceElement {
                id_short,
                keys,
            }))
        }
        "SubmodelElementCollection" => {
            let children = value
                .get("value")
                .and_then(Value::as_array)
                .map(|arr| arr.iter().filter_map(convert_element).collect())
                .unwrap_or_default();
            Some(SubmodelElement::Collection(ElementCollection {
                id_short,
                value: children,
            }))
        }
        "Entity" => {
            let statements = value
                .get("statements")
                .and_then(Value::as_array)
                .map(|arr| arr.iter().filter_map(convert_element).collect())
                .unwrap_or_default();
            Some(SubmodelElement::Entity(Entity {
                id_short,
                statements,
            }))
        }
        other => {
            debug!(model_type = other, id_short, "跳过不支持的元素种类");
            None
        }
    }
}

/// 读取 modelType, 兼容字符串与 {"name": ...} 两种写法
fn element_model_type(value: &Value) -> Option<&str> {
    match value.get("modelType") {
        Some(Value::String(s)) => Some(s.as_str()),
        Some(Value::Object(obj)) => obj.get("name").and_then(Value::as_str),
        _ => None,
    }
}

// ==========================================
// 测试
// ==========================================
