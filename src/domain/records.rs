// ==========================================
// 资产管理壳规划域生成系统 - 中间记录
// ==========================================
// 依据: AAS_Planning_Spec_v0.2.md - 2. 数据模型 / 中间记录
// ==========================================
// 职责: 提取阶段输出的只读中间结构
// 约束: 构建后冻结, 跨阶段边界不可变
// ==========================================

use crate::domain::types::StateRole;
use serde::Serialize;
use std::collections::HashMap;

// ==========================================
// 类型层级 (Type Hierarchy)
// ==========================================

/// 类型名 -> 父类型名 (None = 根)
///
/// 顺序无关: 构建阶段用工作表不动点算法解析,
/// 环或未知祖先的分支被静默排除, 不报错
pub type TypeHierarchy = HashMap<String, Option<String>>;

// ==========================================
// 谓词签名 (Predicate Signature)
// ==========================================

/// 谓词/动作的参数定义
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterDef {
    /// 变量名, 源语法带前缀 "?" (如 "?x")
    pub var: String,
    /// 类型名, 必须在类型表中存在
    pub type_name: String,
}

/// 谓词签名
///
/// 参数顺序显著: 后续参数绑定按此顺序位置对齐
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PredicateSignature {
    /// 谓词名, 全局唯一 (重名取首次出现)
    pub name: String,
    /// 有序参数列表
    pub params: Vec<ParameterDef>,
}

// ==========================================
// 动作规格 (Action Spec)
// ==========================================

/// 条件规格: 动作前置条件或效果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionSpec {
    /// 引用的谓词名 (经 ReferenceResolver 解析)
    pub predicate: String,
    /// 极性: interpretationLogic == "NotEqual" 时为 false
    pub positive: bool,
    /// 绑定的动作参数变量, 声明顺序
    /// 与谓词自身的参数声明顺序位置对齐
    pub param_refs: Vec<String>,
}

/// 动作规格
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActionSpec {
    pub name: String,
    /// 有序参数列表
    pub params: Vec<ParameterDef>,
    /// 前置条件 (expressionGoal == "Requirement")
    pub preconditions: Vec<ConditionSpec>,
    /// 效果 (expressionGoal == "Assurance")
    pub effects: Vec<ConditionSpec>,
}

// ==========================================
// 实例规格 (Instance Spec)
// ==========================================

/// 对象实例声明
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstanceSpec {
    pub name: String,
    pub type_name: String,
}

// ==========================================
// 状态断言 (State Assertion)
// ==========================================

/// 初始状态或目标断言
///
/// 绑定为无序映射, 落地前必须按谓词声明的参数顺序重排
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StateAssertion {
    /// 引用的谓词名
    pub predicate: String,
    /// Init (ActualValue) 或 Goal (Requirement)
    pub role: StateRole,
    /// 参数名 -> 实例名
    pub bindings: HashMap<String, String>,
}
