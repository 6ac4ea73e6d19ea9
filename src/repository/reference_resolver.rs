// ==========================================
// 资产管理壳规划域生成系统 - 引用解析器
// ==========================================
// 依据: AAS_Planning_Spec_v0.2.md - 3.2 ReferenceResolver
// ==========================================
// 职责: 跨子模型键路径解引用 -> 规范名
// 约束: 图的纯函数, 任一环节缺失即报 ReferenceError
// ==========================================

use crate::domain::graph::{ElementCollection, ElementGraph, ReferenceElement, Submodel};
use crate::repository::error::{ReferenceError, ReferenceResult};

// 约定的元素局部名
const PROP_PREDICATE_NAME: &str = "predicateName";
const COLL_PROCESS_PARAMETERS: &str = "ProcessParameters";
const PROP_PROPERTY: &str = "Property";

// ==========================================
// ReferenceResolver - 引用解析器
// ==========================================

pub struct ReferenceResolver<'g> {
    graph: &'g ElementGraph,
}

impl<'g> ReferenceResolver<'g> {
    pub fn new(graph: &'g ElementGraph) -> Self {
        Self { graph }
    }

    // ==========================================
    // 谓词定义引用
    // ==========================================

    /// 解析 predicateDefinitionRef -> 谓词名
    ///
    /// 键路径 >=2 段: [子模型标识符, 元素局部名, ...];
    /// 目标必须是集合, 取其子属性 predicateName
    pub fn resolve_predicate_reference(&self, r: &ReferenceElement) -> ReferenceResult<String> {
        let keys = self.checked_keys(r, 2)?;

        let submodel = self.lookup_submodel(&keys[0])?;
        let collection = self.named_collection(submodel, &keys[1])?;

        collection
            .child_property_value(PROP_PREDICATE_NAME)
            .map(|s| s.to_string())
            .ok_or_else(|| ReferenceError::PropertyNotFound {
                property: PROP_PREDICATE_NAME.to_string(),
                parent: collection.id_short.clone(),
            })
    }

    // ==========================================
    // 参数绑定引用
    // ==========================================

    /// 解析 parameterBindingRef -> 参数变量名
    ///
    /// 键路径 >=4 段: [子模型标识符, 算子名, _, 参数名];
    /// 路径: 子模型 -> 算子集合 -> ProcessParameters 集合
    ///       -> 同名参数子集合 -> 其 Property 属性值
    pub fn resolve_parameter_reference(&self, r: &ReferenceElement) -> ReferenceResult<String> {
        let keys = self.checked_keys(r, 4)?;

        let submodel_id = &keys[0];
        let operator_id = &keys[1];
        let param_id = &keys[3];

        let submodel = self.lookup_submodel(submodel_id)?;
        let operator = self.named_collection(submodel, operator_id)?;

        let process_params = operator
            .child_collection(COLL_PROCESS_PARAMETERS)
            .ok_or_else(|| ReferenceError::ProcessParametersNotFound {
                operator: operator_id.clone(),
            })?;

        let param_coll = process_params
            .child_collection(param_id)
            .ok_or_else(|| ReferenceError::ParameterNotFound {
                param: param_id.clone(),
                operator: operator_id.clone(),
            })?;

        param_coll
            .child_property_value(PROP_PROPERTY)
            .map(|s| s.to_string())
            .ok_or_else(|| ReferenceError::PropertyNotFound {
                property: PROP_PROPERTY.to_string(),
                parent: param_id.clone(),
            })
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    /// 校验键路径非空且达到最小长度
    ///
    /// 返回的键路径借用自引用元素, 与解析器生命周期无关
    fn checked_keys<'r>(
        &self,
        r: &'r ReferenceElement,
        min_len: usize,
    ) -> ReferenceResult<&'r [String]> {
        if r.keys.is_empty() {
            return Err(ReferenceError::EmptyKeyPath {
                id_short: r.id_short.clone(),
            });
        }
        if r.keys.len() < min_len {
            return Err(ReferenceError::ShortKeyPath {
                id_short: r.id_short.clone(),
                actual: r.keys.len(),
                expected: min_len,
            });
        }
        Ok(&r.keys)
    }

    fn lookup_submodel(&self, id: &str) -> ReferenceResult<&'g Submodel> {
        self.graph
            .lookup_submodel(id)
            .ok_or_else(|| ReferenceError::SubmodelNotFound { id: id.to_string() })
    }

    /// 子模型顶层的命名集合 (非集合视为结构错误)
    fn named_collection(
        &self,
        submodel: &'g Submodel,
        id_short: &str,
    ) -> ReferenceResult<&'g ElementCollection> {
        let element = submodel.element(id_short).ok_or_else(|| {
            ReferenceError::ElementNotFound {
                element: id_short.to_string(),
                submodel: submodel.id_short.clone(),
            }
        })?;

        element
            .as_collection()
            .ok_or_else(|| ReferenceError::NotACollection {
                element: id_short.to_string(),
                submodel: submodel.id_short.clone(),
            })
    }
}

// ==========================================
// 测试
// ==========================================
