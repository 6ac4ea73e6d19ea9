// ==========================================
// 资产管理壳规划域生成系统 - 域模型构建引擎
// ==========================================
// 依据: AAS_Planning_Spec_v0.2.md - 3.4 DomainModelBuilder
// ==========================================
// 职责: 冻结的中间记录 -> 最终不可变 DomainModel
// 红线: 类型/参数/对象引用完整性在此强制, 违规即中止
// ==========================================


use crate::domain::model::{
    ActionModel, DomainModel, GroundedAtom, Literal, PlanningMetadata, PlanningObject,
    PlanningType, Predicate, TypedParameter,
};
use crate::domain::records::{
    ActionSpec, ConditionSpec, InstanceSpec, PredicateSignature, StateAssertion, TypeHierarchy,
};
use crate::domain::types::StateRole;
use crate::engine::error::{BuildError, BuildResult};
use std::collections::{HashMap, HashSet};
use tracing::{info, instrument, warn};

/// 隐式全域根类型标记 (PDDL 内建, 不产出表条目)
pub const UNIVERSAL_ROOT: &str = "object";

// ==========================================
// DomainModelBuilder - 域模型构建引擎
// ==========================================

pub struct DomainModelBuilder {
    metadata: PlanningMetadata,

    types: Vec<PlanningType>,
    type_names: HashSet<String>,

    predicates: Vec<Predicate>,
    /// 谓词 -> 原始变量拼写的声明顺序 (位置绑定基准)
    predicate_param_order: HashMap<String, Vec<String>>,

    actions: Vec<ActionModel>,

    objects: Vec<PlanningObject>,
    object_names: HashSet<String>,

    init: Vec<GroundedAtom>,
    goals: Vec<GroundedAtom>,
}

impl DomainModelBuilder {
    /// 以规划元数据初始化构建器
    pub fn new(metadata: PlanningMetadata) -> Self {
        Self {
            metadata,
            types: Vec::new(),
            type_names: HashSet::new(),
            predicates: Vec::new(),
            predicate_param_order: HashMap::new(),
            actions: Vec::new(),
            objects: Vec::new(),
            object_names: HashSet::new(),
            init: Vec::new(),
            goals: Vec::new(),
        }
    }

    // ==========================================
    // [1] 类型表 (工作表不动点)
    // ==========================================

    /// 从类型层级构建类型表
    ///
    /// 不动点迭代: 每轮解析父为 None / "object" / 已解析的条目,
    /// 直到无新进展; 父链永不收敛的条目 (环或未知祖先) 永久排除,
    /// 不报错。与子模型遍历顺序无关
    #[instrument(skip_all, fields(input = hierarchy.len()))]
    pub fn build_types(&mut self, hierarchy: &TypeHierarchy) {
        let mut processed: HashSet<&str> = HashSet::new();

        // "object" 是 PDDL 隐式根, 不产出条目
        if hierarchy.contains_key(UNIVERSAL_ROOT) {
            processed.insert(UNIVERSAL_ROOT);
        }

        loop {
            // 本轮可解析的条目, 按名排序保证产出确定性
            let mut ready: Vec<(&str, Option<&str>)> = hierarchy
                .iter()
                .filter(|(name, _)| !processed.contains(name.as_str()))
                .filter(|(_, parent)| match parent.as_deref() {
                    None => true,
                    Some(UNIVERSAL_ROOT) => true,
                    Some(p) => self.type_names.contains(p),
                })
                .map(|(name, parent)| (name.as_str(), parent.as_deref()))
                .collect();

            if ready.is_empty() {
                break;
            }
            ready.sort_by_key(|(name, _)| *name);

            for (name, parent) in ready {
                // 父为隐式根时归一化为 None
                let parent = parent.filter(|p| *p != UNIVERSAL_ROOT);
                self.types.push(PlanningType {
                    name: name.to_string(),
                    parent: parent.map(|p| p.to_string()),
                });
                self.type_names.insert(name.to_string());
                processed.insert(name);
            }
        }

        // 未收敛条目: 环或未知祖先, 排除但不报错
        for (name, parent) in hierarchy {
            if !processed.contains(name.as_str()) {
                warn!(
                    type_name = %name,
                    parent = parent.as_deref().unwrap_or("<none>"),
                    "类型父链无法收敛, 已排除"
                );
            }
        }

        info!(count = self.types.len(), "类型表构建完成");
    }

    // ==========================================
    // [2] 谓词表
    // ==========================================

    /// 从谓词签名构建谓词表 (布尔关系, 缺省为假)
    ///
    /// 每个参数类型必须在类型表中存在
    #[instrument(skip_all, fields(input = signatures.len()))]
    pub fn build_predicates(&mut self, signatures: &[PredicateSignature]) -> BuildResult<()> {
        for sig in signatures {
            let mut params = Vec::with_capacity(sig.params.len());
            let mut order = Vec::with_capacity(sig.params.len());

            for p in &sig.params {
                self.check_type(&p.type_name, || format!("谓词 '{}'", sig.name))?;
                params.push(TypedParameter {
                    name: clean_var(&p.var),
                    type_name: p.type_name.clone(),
                });
                order.push(p.var.clone());
            }

            self.predicate_param_order.insert(sig.name.clone(), order);
            self.predicates.push(Predicate {
                name: sig.name.clone(),
                params,
            });
        }

        info!(count = self.predicates.len(), "谓词表构建完成");
        Ok(())
    }

    // ==========================================
    // [3] 动作表
    // ==========================================

    /// 从动作规格构建动作表
    ///
    /// 参数类型必须可解析; 条件引用的变量必须是动作自身声明
    /// 的参数, 否则 UnboundVariable; 条件落地为
    /// (谓词, 有序实参, 极性) 文字。零条件动作合法
    #[instrument(skip_all, fields(input = specs.len()))]
    pub fn build_actions(&mut self, specs: &[ActionSpec]) -> BuildResult<()> {
        for spec in specs {
            let action = self.build_action(spec)?;
            self.actions.push(action);
        }

        info!(count = self.actions.len(), "动作表构建完成");
        Ok(())
    }

    fn build_action(&self, spec: &ActionSpec) -> BuildResult<ActionModel> {
        let mut params = Vec::with_capacity(spec.params.len());
        // 原始变量拼写 -> 去前缀参数名
        let mut var_to_param: HashMap<&str, String> = HashMap::new();

        for p in &spec.params {
            self.check_type(&p.type_name, || format!("动作 '{}'", spec.name))?;
            let clean = clean_var(&p.var);
            var_to_param.insert(p.var.as_str(), clean.clone());
            params.push(TypedParameter {
                name: clean,
                type_name: p.type_name.clone(),
            });
        }

        let preconditions = spec
            .preconditions
            .iter()
            .map(|c| self.bind_condition(spec, c, &var_to_param))
            .collect::<BuildResult<Vec<_>>>()?;
        let effects = spec
            .effects
            .iter()
            .map(|c| self.bind_condition(spec, c, &var_to_param))
            .collect::<BuildResult<Vec<_>>>()?;

        Ok(ActionModel {
            name: spec.name.clone(),
            params,
            preconditions,
            effects,
        })
    }

    /// 条件 -> 文字: 谓词须已声明, 变量须属于动作参数
    fn bind_condition(
        &self,
        spec: &ActionSpec,
        cond: &ConditionSpec,
        var_to_param: &HashMap<&str, String>,
    ) -> BuildResult<Literal> {
        if !self.predicate_param_order.contains_key(&cond.predicate) {
            return Err(BuildError::UnknownPredicate {
                predicate: cond.predicate.clone(),
                referrer: format!("动作 '{}'", spec.name),
            });
        }

        let args = cond
            .param_refs
            .iter()
            .map(|var| {
                var_to_param
                    .get(var.as_str())
                    .cloned()
                    .ok_or_else(|| BuildError::UnboundVariable {
                        var: var.clone(),
                        action: spec.name.clone(),
                    })
            })
            .collect::<BuildResult<Vec<_>>>()?;

        Ok(Literal {
            predicate: cond.predicate.clone(),
            args,
            positive: cond.positive,
        })
    }

    // ==========================================
    // [4] 对象表
    // ==========================================

    /// 从实例规格构建对象表
    #[instrument(skip_all, fields(input = instances.len()))]
    pub fn build_objects(&mut self, instances: &[InstanceSpec]) -> BuildResult<()> {
        for inst in instances {
            self.check_type(&inst.type_name, || format!("实例 '{}'", inst.name))?;
            self.object_names.insert(inst.name.clone());
            self.objects.push(PlanningObject {
                name: inst.name.clone(),
                type_name: inst.type_name.clone(),
            });
        }

        info!(count = self.objects.len(), "对象表构建完成");
        Ok(())
    }

    // ==========================================
    // [5] 初始事实集
    // ==========================================

    /// 落地 Init 角色的断言 -> 初始事实 (真)
    ///
    /// 绑定映射按谓词声明的参数顺序重排;
    /// 缺绑定 -> MissingBinding, 值非已声明对象 -> UnknownObject
    #[instrument(skip_all)]
    pub fn build_init(&mut self, assertions: &[StateAssertion]) -> BuildResult<()> {
        for a in assertions.iter().filter(|a| a.role == StateRole::Init) {
            let atom = self.ground_assertion(a)?;
            self.init.push(atom);
        }

        info!(count = self.init.len(), "初始事实集构建完成");
        Ok(())
    }

    // ==========================================
    // [6] 目标合取集
    // ==========================================

    /// 落地 Goal 角色的断言 -> 目标合取项 (要求为真)
    #[instrument(skip_all)]
    pub fn build_goals(&mut self, assertions: &[StateAssertion]) -> BuildResult<()> {
        for a in assertions.iter().filter(|a| a.role == StateRole::Goal) {
            let atom = self.ground_assertion(a)?;
            self.goals.push(atom);
        }

        info!(count = self.goals.len(), "目标合取集构建完成");
        Ok(())
    }

    /// 断言 -> 接地原子 (按声明参数顺序重排绑定)
    fn ground_assertion(&self, assertion: &StateAssertion) -> BuildResult<GroundedAtom> {
        let order = self
            .predicate_param_order
            .get(&assertion.predicate)
            .ok_or_else(|| BuildError::UnknownPredicate {
                predicate: assertion.predicate.clone(),
                referrer: "状态断言".to_string(),
            })?;

        let mut args = Vec::with_capacity(order.len());
        for var in order {
            let value = assertion.bindings.get(var).ok_or_else(|| {
                BuildError::MissingBinding {
                    predicate: assertion.predicate.clone(),
                    param: var.clone(),
                }
            })?;
            if !self.object_names.contains(value) {
                return Err(BuildError::UnknownObject {
                    object: value.clone(),
                    predicate: assertion.predicate.clone(),
                });
            }
            args.push(value.clone());
        }

        Ok(GroundedAtom {
            predicate: assertion.predicate.clone(),
            args,
        })
    }

    // ==========================================
    // 收尾
    // ==========================================

    /// 冻结为最终域模型
    pub fn finish(self) -> DomainModel {
        DomainModel {
            metadata: self.metadata,
            types: self.types,
            predicates: self.predicates,
            actions: self.actions,
            objects: self.objects,
            init: self.init,
            goals: self.goals,
        }
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn check_type(&self, type_name: &str, referrer: impl Fn() -> String) -> BuildResult<()> {
        if self.type_names.contains(type_name) {
            Ok(())
        } else {
            Err(BuildError::UnknownType {
                type_name: type_name.to_string(),
                referrer: referrer(),
            })
        }
    }
}

/// 去除变量前缀 "?" (PDDL 源拼写 -> 模型参数名)
fn clean_var(var: &str) -> String {
    var.trim_start_matches('?').to_string()
}
