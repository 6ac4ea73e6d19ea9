// ==========================================
// 资产管理壳规划域生成系统 - 规划域模型
// ==========================================
// 依据: AAS_Planning_Spec_v0.2.md - 2. 数据模型 / DomainModel
// ==========================================
// 职责: 构建阶段的最终不可变输出
// 去向: 交给 writer 层落盘 (PDDL)
// ==========================================

use serde::Serialize;

// ==========================================
// 规划元数据 (Planning Metadata)
// ==========================================

/// 域名/问题名/需求能力标签
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanningMetadata {
    pub domain_name: String,
    pub problem_name: String,
    /// 有序能力标签 (如 "strips", "typing")
    pub requirements: Vec<String>,
}

impl PlanningMetadata {
    /// 缺省需求集
    pub fn default_requirements() -> Vec<String> {
        vec!["strips".to_string(), "typing".to_string()]
    }
}

// ==========================================
// 类型表条目 (Planning Type)
// ==========================================

/// 单继承类型节点
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanningType {
    pub name: String,
    /// None = 根 (直接挂在隐式全域根 object 下)
    pub parent: Option<String>,
}

// ==========================================
// 谓词 (Predicate)
// ==========================================

/// 类型化参数 (变量名已去除 "?" 前缀)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypedParameter {
    pub name: String,
    pub type_name: String,
}

/// 布尔关系, 缺省真值为假
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Predicate {
    pub name: String,
    /// 有序参数 (位置绑定的基准)
    pub params: Vec<TypedParameter>,
}

// ==========================================
// 动作 (Action)
// ==========================================

/// 谓词文字: 动作参数上的布尔字面量
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Literal {
    pub predicate: String,
    /// 有序实参: 动作参数名 (已去 "?" 前缀)
    pub args: Vec<String>,
    /// false 表示取反
    pub positive: bool,
}

/// 带类型参数与前置/效果文字集的动作
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionModel {
    pub name: String,
    pub params: Vec<TypedParameter>,
    pub preconditions: Vec<Literal>,
    pub effects: Vec<Literal>,
}

// ==========================================
// 对象与接地原子 (Object / Grounded Atom)
// ==========================================

/// 类型化对象实例
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlanningObject {
    pub name: String,
    pub type_name: String,
}

/// 接地谓词应用: 实参为具体对象名
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct GroundedAtom {
    pub predicate: String,
    pub args: Vec<String>,
}

// ==========================================
// DomainModel - 规划域模型
// ==========================================

/// 最终不可变规划域模型
///
/// 各表保持确定性声明顺序, 供 writer 稳定输出;
/// 初始事实缺省为假, 仅记录显式置真的接地原子
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainModel {
    pub metadata: PlanningMetadata,
    /// 类型表 (单继承森林)
    pub types: Vec<PlanningType>,
    /// 谓词表
    pub predicates: Vec<Predicate>,
    /// 动作表
    pub actions: Vec<ActionModel>,
    /// 对象表
    pub objects: Vec<PlanningObject>,
    /// 初始事实集 (全部为真)
    pub init: Vec<GroundedAtom>,
    /// 目标合取集 (要求为真)
    pub goals: Vec<GroundedAtom>,
}

impl DomainModel {
    /// 按名查找谓词
    pub fn predicate(&self, name: &str) -> Option<&Predicate> {
        self.predicates.iter().find(|p| p.name == name)
    }

    /// 按名查找类型
    pub fn planning_type(&self, name: &str) -> Option<&PlanningType> {
        self.types.iter().find(|t| t.name == name)
    }

    /// 按名查找对象
    pub fn object(&self, name: &str) -> Option<&PlanningObject> {
        self.objects.iter().find(|o| o.name == name)
    }
}
