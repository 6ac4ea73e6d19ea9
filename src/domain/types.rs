// ==========================================
// 资产管理壳规划域生成系统 - 领域类型定义
// ==========================================
// 依据: AAS_Planning_Spec_v0.2.md - 2. 数据模型
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 壳角色 (AAS Role)
// ==========================================
// System: 携带全局规划配置
// Component: 贡献规划词汇 (类型/谓词/动作/实例)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AasRole {
    System,
    Component,
}

impl fmt::Display for AasRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AasRole::System => write!(f, "SYSTEM"),
            AasRole::Component => write!(f, "COMPONENT"),
        }
    }
}

impl AasRole {
    /// 从 AASRole 属性值解析 (大小写不敏感)
    ///
    /// 无法识别的标记返回 None, 由调用方走兜底逻辑
    pub fn from_tag(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "system" => Some(AasRole::System),
            "component" => Some(AasRole::Component),
            _ => None,
        }
    }
}

// ==========================================
// 状态断言角色 (State Role)
// ==========================================
// 由 expressionGoal 标签分类:
// ActualValue -> Init, Requirement -> Goal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StateRole {
    Init,
    Goal,
}

impl fmt::Display for StateRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateRole::Init => write!(f, "INIT"),
            StateRole::Goal => write!(f, "GOAL"),
        }
    }
}

// ==========================================
// 分类标签常量 (expressionGoal)
// ==========================================
// 源图中的分类字符串, 决定条件/断言的去向

/// 动作前置条件 / 目标断言
pub const GOAL_REQUIREMENT: &str = "Requirement";
/// 动作效果
pub const GOAL_ASSURANCE: &str = "Assurance";
/// 初始状态断言
pub const GOAL_ACTUAL_VALUE: &str = "ActualValue";

/// interpretationLogic 取反标记: 命中则极性为负
pub const LOGIC_NOT_EQUAL: &str = "NotEqual";
