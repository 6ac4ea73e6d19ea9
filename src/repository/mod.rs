// ==========================================
// 资产管理壳规划域生成系统 - 图访问层
// ==========================================
// 依据: AAS_Planning_Spec_v0.2.md - 3.1/3.2 图访问与引用解析
// 红线: 本层不含提取/构建业务逻辑
// ==========================================
// 职责: 在只读元素图上提供角色分类、子模型检索、引用解引用
// ==========================================

pub mod error;
pub mod graph_accessor;
pub mod reference_resolver;

// 重导出核心类型
pub use error::{ConfigError, ReferenceError, ReferenceResult};
pub use graph_accessor::GraphAccessor;
pub use reference_resolver::ReferenceResolver;
