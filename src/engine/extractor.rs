// ==========================================
// 资产管理壳规划域生成系统 - 域提取引擎
// ==========================================
// 依据: AAS_Planning_Spec_v0.2.md - 3.3 DomainExtractor
// ==========================================
// 职责: 遍历 Component 子模型 -> 校验过的中间记录
// 输入: 只读元素图 (经 GraphAccessor / ReferenceResolver)
// 输出: 类型层级 / 谓词签名 / 动作规格 / 实例 / 状态断言
// 约束: 同一图上重复提取产生结构相等的记录
// ==========================================


use crate::domain::graph::{ElementCollection, ElementGraph, Entity};
use crate::domain::records::{
    ActionSpec, ConditionSpec, InstanceSpec, ParameterDef, PredicateSignature, StateAssertion,
    TypeHierarchy,
};
use crate::domain::types::{
    StateRole, GOAL_ACTUAL_VALUE, GOAL_ASSURANCE, GOAL_REQUIREMENT, LOGIC_NOT_EQUAL,
};
use crate::repository::{GraphAccessor, ReferenceResolver};
use crate::repository::error::ReferenceResult;
use std::collections::HashMap;
use tracing::{debug, info, instrument, warn};

// 约定的子模型局部名
const SM_TYPE_HIERARCHY: &str = "TypeHierarchy";
const SM_PREDICATE_DEFINITIONS: &str = "PredicateDefinitions";
const SM_CAPABILITIES: &str = "Capabilities";
const SM_INSTANCES: &str = "Instances";

// 约定的元素局部名
const ENTITY_ENTRY_NODE: &str = "EntryNode";
const PROP_PREDICATE_NAME: &str = "predicateName";
const COLL_PARAMETERS: &str = "parameters";
const PROP_PROPERTY: &str = "Property";
const PROP_TYPE: &str = "Type";
const PROP_NAME: &str = "Name";
const COLL_PROCESS_PARAMETERS: &str = "ProcessParameters";
const COLL_HAS_INPUT: &str = "hasInput";
const COLL_HAS_OUTPUT: &str = "hasOutput";
const COLL_INSTANCE_DESCRIPTION: &str = "InstanceDescription";
const REF_PREDICATE_DEFINITION: &str = "predicateDefinitionRef";
const PROP_EXPRESSION_GOAL: &str = "expressionGoal";
const PROP_INTERPRETATION_LOGIC: &str = "interpretationLogic";
const COLL_PARAMETER_BINDING_REFS: &str = "parameterBindingRefs";
const PROP_INSTANCE_NAME: &str = "instanceName";
const PROP_INSTANCE_TYPE: &str = "instanceType";
const COLL_INITIAL_STATES: &str = "InitialStates";
const COLL_GOALS: &str = "Goals";
const COLL_PARAMETER_BINDINGS: &str = "parameterBindings";
const PROP_BINDING_PARAMETER: &str = "parameter";
const PROP_BINDING_VALUE: &str = "value";

// ==========================================
// 内部: 未分类条件
// ==========================================

/// 提取自 InstanceDescription 的原始条件, 尚未按分类标签分流
struct RawCondition {
    predicate: String,
    expression_goal: Option<String>,
    positive: bool,
    param_refs: Vec<String>,
}

// ==========================================
// DomainExtractor - 域提取引擎
// ==========================================

pub struct DomainExtractor<'g> {
    accessor: GraphAccessor<'g>,
    resolver: ReferenceResolver<'g>,
}

impl<'g> DomainExtractor<'g> {
    /// 在已加载元素图上创建提取引擎
    pub fn new(graph: &'g ElementGraph) -> Self {
        Self {
            accessor: GraphAccessor::new(graph),
            resolver: ReferenceResolver::new(graph),
        }
    }

    /// 内部图访问器 (流水线复用)
    pub fn accessor(&self) -> &GraphAccessor<'g> {
        &self.accessor
    }

    // ==========================================
    // [1] 类型层级提取
    // ==========================================

    /// 提取类型层级
    ///
    /// 深度优先遍历各 TypeHierarchy 子模型中 EntryNode 实体树;
    /// 实体局部名即类型名, 外围实体为父 (顶层实体父为 None)。
    /// 结果为名称映射, 顺序无关
    #[instrument(skip(self))]
    pub fn extract_type_hierarchy(&self) -> TypeHierarchy {
        let mut hierarchy = HashMap::new();

        for sm in self.accessor.component_submodels(SM_TYPE_HIERARCHY) {
            let entry = sm
                .element(ENTITY_ENTRY_NODE)
                .and_then(|e| e.as_entity());

            if let Some(entry) = entry {
                for stmt in &entry.statements {
                    if let Some(child) = stmt.as_entity() {
                        self.walk_entity(child, None, &mut hierarchy);
                    }
                }
            }
        }

        info!(count = hierarchy.len(), "类型层级提取完成");
        hierarchy
    }

    /// 递归走实体树, 记录 (类型名, 父名)
    fn walk_entity(&self, entity: &Entity, parent: Option<&str>, out: &mut TypeHierarchy) {
        out.insert(entity.id_short.clone(), parent.map(|p| p.to_string()));
        for stmt in &entity.statements {
            if let Some(child) = stmt.as_entity() {
                self.walk_entity(child, Some(&entity.id_short), out);
            }
        }
    }

    // ==========================================
    // [2] 谓词定义提取
    // ==========================================

    /// 提取谓词签名
    ///
    /// 各 PredicateDefinitions 子模型的顶层集合各产出一条签名;
    /// 重名取首次出现, 后续丢弃 (带警告)
    #[instrument(skip(self))]
    pub fn extract_predicate_definitions(&self) -> Vec<PredicateSignature> {
        let mut signatures: Vec<PredicateSignature> = Vec::new();

        for sm in self.accessor.component_submodels(SM_PREDICATE_DEFINITIONS) {
            for elem in &sm.elements {
                let coll = match elem.as_collection() {
                    Some(c) => c,
                    None => continue,
                };
                let sig = match self.extract_predicate(coll) {
                    Some(s) => s,
                    None => continue,
                };
                if signatures.iter().any(|p| p.name == sig.name) {
                    warn!(predicate = %sig.name, "谓词重名, 保留首次出现");
                    continue;
                }
                signatures.push(sig);
            }
        }

        info!(count = signatures.len(), "谓词定义提取完成");
        signatures
    }

    /// 单个谓词集合 -> 签名 (缺 predicateName 则跳过)
    fn extract_predicate(&self, coll: &ElementCollection) -> Option<PredicateSignature> {
        let name = coll.child_property_value(PROP_PREDICATE_NAME)?.to_string();
        let params = coll
            .child_collection(COLL_PARAMETERS)
            .map(|c| self.extract_parameter_defs(c))
            .unwrap_or_default();

        Some(PredicateSignature { name, params })
    }

    /// 参数集合 -> (变量, 类型) 有序列表
    ///
    /// 每个条目是一个子集合, 读其 Property/Type 子属性;
    /// 两者缺一即跳过该条目
    fn extract_parameter_defs(&self, coll: &ElementCollection) -> Vec<ParameterDef> {
        let mut defs = Vec::new();
        for entry in &coll.value {
            let entry_coll = match entry.as_collection() {
                Some(c) => c,
                None => continue,
            };
            let var = entry_coll.child_property_value(PROP_PROPERTY);
            let type_name = entry_coll.child_property_value(PROP_TYPE);
            if let (Some(var), Some(type_name)) = (var, type_name) {
                defs.push(ParameterDef {
                    var: var.to_string(),
                    type_name: type_name.to_string(),
                });
            }
        }
        defs
    }

    // ==========================================
    // [3] 动作提取
    // ==========================================

    /// 提取过程算子 -> 动作规格
    ///
    /// 各 Capabilities 子模型的顶层集合各产出一个动作;
    /// 条件取 hasInput 与 hasOutput 并集 (此序), 按 expressionGoal 分流:
    /// Requirement -> 前置条件, Assurance -> 效果, 其他静默丢弃
    #[instrument(skip(self))]
    pub fn extract_process_operators(&self) -> ReferenceResult<Vec<ActionSpec>> {
        let mut operators = Vec::new();

        for sm in self.accessor.component_submodels(SM_CAPABILITIES) {
            for elem in &sm.elements {
                let coll = match elem.as_collection() {
                    Some(c) => c,
                    None => continue,
                };
                if let Some(op) = self.extract_operator(coll)? {
                    operators.push(op);
                }
            }
        }

        info!(count = operators.len(), "动作提取完成");
        operators
            .iter()
            .for_each(|op| debug!(action = %op.name, pre = op.preconditions.len(), eff = op.effects.len(), "动作"));
        Ok(operators)
    }

    /// 单个算子集合 -> 动作规格 (缺 Name 则跳过)
    fn extract_operator(&self, coll: &ElementCollection) -> ReferenceResult<Option<ActionSpec>> {
        let name = match coll.child_property_value(PROP_NAME) {
            Some(n) => n.to_string(),
            None => return Ok(None),
        };

        let params = coll
            .child_collection(COLL_PROCESS_PARAMETERS)
            .map(|c| self.extract_parameter_defs(c))
            .unwrap_or_default();

        // 条件并集: 先 hasInput 后 hasOutput
        let mut preconditions = Vec::new();
        let mut effects = Vec::new();
        for group in [COLL_HAS_INPUT, COLL_HAS_OUTPUT] {
            let group_coll = match coll.child_collection(group) {
                Some(c) => c,
                None => continue,
            };
            for entry in &group_coll.value {
                let entry_coll = match entry.as_collection() {
                    Some(c) => c,
                    None => continue,
                };
                let raw = match self.extract_condition(entry_coll)? {
                    Some(r) => r,
                    None => continue,
                };

                let spec = ConditionSpec {
                    predicate: raw.predicate,
                    positive: raw.positive,
                    param_refs: raw.param_refs,
                };
                match raw.expression_goal.as_deref() {
                    Some(GOAL_REQUIREMENT) => preconditions.push(spec),
                    Some(GOAL_ASSURANCE) => effects.push(spec),
                    other => {
                        // 未识别分类静默丢弃 (沿袭源行为, 设计待定项)
                        debug!(
                            action = %name,
                            tag = other.unwrap_or("<none>"),
                            "条件分类未识别, 丢弃"
                        );
                    }
                }
            }
        }

        Ok(Some(ActionSpec {
            name,
            params,
            preconditions,
            effects,
        }))
    }

    /// 条件集合 -> 原始条件
    ///
    /// 进入嵌套 InstanceDescription: 解析谓词引用、分类标签、
    /// 极性标签, 以及按声明顺序解引用 parameterBindingRefs。
    /// 无谓词引用 -> 整条丢弃 (None)
    fn extract_condition(
        &self,
        coll: &ElementCollection,
    ) -> ReferenceResult<Option<RawCondition>> {
        let desc = match coll.child_collection(COLL_INSTANCE_DESCRIPTION) {
            Some(d) => d,
            None => return Ok(None),
        };

        let mut predicate = None;
        let mut expression_goal = None;
        let mut positive = true;
        let mut param_refs = Vec::new();

        for elem in &desc.value {
            match elem.id_short() {
                REF_PREDICATE_DEFINITION => {
                    if let Some(r) = elem.as_reference() {
                        predicate = Some(self.resolver.resolve_predicate_reference(r)?);
                    }
                }
                PROP_EXPRESSION_GOAL => {
                    expression_goal = elem
                        .as_property()
                        .and_then(|p| p.value.clone());
                }
                PROP_INTERPRETATION_LOGIC => {
                    let logic = elem.as_property().and_then(|p| p.value.as_deref());
                    positive = logic != Some(LOGIC_NOT_EQUAL);
                }
                COLL_PARAMETER_BINDING_REFS => {
                    if let Some(refs_coll) = elem.as_collection() {
                        for ref_elem in &refs_coll.value {
                            if let Some(r) = ref_elem.as_reference() {
                                param_refs.push(self.resolver.resolve_parameter_reference(r)?);
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        let predicate = match predicate {
            Some(p) => p,
            None => return Ok(None),
        };

        Ok(Some(RawCondition {
            predicate,
            expression_goal,
            positive,
            param_refs,
        }))
    }

    // ==========================================
    // [4] 实例提取
    // ==========================================

    /// 提取对象实例
    ///
    /// Instances 子模型顶层集合中含 instanceName/instanceType
    /// 字符串属性的各产出一条实例规格
    #[instrument(skip(self))]
    pub fn extract_instances(&self) -> Vec<InstanceSpec> {
        let mut instances = Vec::new();

        for sm in self.accessor.component_submodels(SM_INSTANCES) {
            for elem in &sm.elements {
                let coll = match elem.as_collection() {
                    Some(c) => c,
                    None => continue,
                };
                let name = coll.child_property_value(PROP_INSTANCE_NAME);
                let type_name = coll.child_property_value(PROP_INSTANCE_TYPE);
                if let (Some(name), Some(type_name)) = (name, type_name) {
                    instances.push(InstanceSpec {
                        name: name.to_string(),
                        type_name: type_name.to_string(),
                    });
                }
            }
        }

        info!(count = instances.len(), "实例提取完成");
        instances
    }

    // ==========================================
    // [5+6] 初始状态与目标提取
    // ==========================================

    /// 提取状态断言 (初始状态 + 目标, 按分类标签定角色)
    ///
    /// 实例集合内嵌 InitialStates / Goals 集合, 其条目按
    /// expressionGoal 分类: ActualValue -> Init, Requirement -> Goal。
    /// 缺谓词引用或绑定为空的断言丢弃; 零目标仅警告
    #[instrument(skip(self))]
    pub fn extract_initial_states_and_goals(&self) -> ReferenceResult<Vec<StateAssertion>> {
        let mut assertions = Vec::new();

        for sm in self.accessor.component_submodels(SM_INSTANCES) {
            for elem in &sm.elements {
                let inst_coll = match elem.as_collection() {
                    Some(c) => c,
                    None => continue,
                };
                for group in [COLL_INITIAL_STATES, COLL_GOALS] {
                    let group_coll = match inst_coll.child_collection(group) {
                        Some(c) => c,
                        None => continue,
                    };
                    for entry in &group_coll.value {
                        let entry_coll = match entry.as_collection() {
                            Some(c) => c,
                            None => continue,
                        };
                        if let Some(assertion) = self.extract_state(entry_coll)? {
                            assertions.push(assertion);
                        }
                    }
                }
            }
        }

        let init_count = assertions.iter().filter(|a| a.role == StateRole::Init).count();
        let goal_count = assertions.len() - init_count;

        if goal_count == 0 {
            // 零目标的问题按构造即无解, 仍须放行
            warn!("未找到任何目标断言");
        }
        info!(init = init_count, goals = goal_count, "状态断言提取完成");

        Ok(assertions)
    }

    /// 状态条目集合 -> 状态断言
    ///
    /// 谓词引用与分类在条目顶层 (不嵌 InstanceDescription),
    /// 绑定来自 parameterBindings 的 (parameter, value) 属性对
    fn extract_state(
        &self,
        coll: &ElementCollection,
    ) -> ReferenceResult<Option<StateAssertion>> {
        let mut predicate = None;
        let mut expression_goal: Option<String> = None;
        let mut bindings = HashMap::new();

        for elem in &coll.value {
            match elem.id_short() {
                REF_PREDICATE_DEFINITION => {
                    if let Some(r) = elem.as_reference() {
                        predicate = Some(self.resolver.resolve_predicate_reference(r)?);
                    }
                }
                PROP_EXPRESSION_GOAL => {
                    expression_goal = elem.as_property().and_then(|p| p.value.clone());
                }
                COLL_PARAMETER_BINDINGS => {
                    if let Some(bindings_coll) = elem.as_collection() {
                        for entry in &bindings_coll.value {
                            let entry_coll = match entry.as_collection() {
                                Some(c) => c,
                                None => continue,
                            };
                            let param = entry_coll.child_property_value(PROP_BINDING_PARAMETER);
                            let value = entry_coll.child_property_value(PROP_BINDING_VALUE);
                            if let (Some(param), Some(value)) = (param, value) {
                                bindings.insert(param.to_string(), value.to_string());
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        // 缺谓词引用或无有效绑定 -> 丢弃
        let predicate = match predicate {
            Some(p) if !bindings.is_empty() => p,
            _ => return Ok(None),
        };

        let role = match expression_goal.as_deref() {
            Some(GOAL_ACTUAL_VALUE) => StateRole::Init,
            Some(GOAL_REQUIREMENT) => StateRole::Goal,
            other => {
                debug!(
                    predicate = %predicate,
                    tag = other.unwrap_or("<none>"),
                    "状态分类未识别, 丢弃"
                );
                return Ok(None);
            }
        };

        Ok(Some(StateAssertion {
            predicate,
            role,
            bindings,
        }))
    }
}
