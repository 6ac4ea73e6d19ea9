// ==========================================
// 资产管理壳规划域生成系统 - 领域模型层
// ==========================================
// 依据: AAS_Planning_Spec_v0.2.md - 2. 数据模型
// ==========================================
// 职责: 定义元素图、中间记录、最终规划域模型
// 红线: 不含图访问逻辑, 不含提取/构建逻辑
// ==========================================

pub mod graph;
pub mod model;
pub mod records;
pub mod types;

// 重导出核心类型
pub use graph::{
    ElementCollection, ElementGraph, Entity, Property, ReferenceElement, Shell, Submodel,
    SubmodelElement,
};
pub use model::{
    ActionModel, DomainModel, GroundedAtom, Literal, PlanningMetadata, PlanningObject,
    PlanningType, Predicate, TypedParameter,
};
pub use records::{
    ActionSpec, ConditionSpec, InstanceSpec, ParameterDef, PredicateSignature, StateAssertion,
    TypeHierarchy,
};
pub use types::{AasRole, StateRole};
