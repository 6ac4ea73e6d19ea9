// ==========================================
// 资产管理壳规划域生成系统 - 核心库
// ==========================================
// 依据: AAS_Planning_Spec_v0.2.md - 系统总纲
// 技术栈: Rust + serde + tracing
// 系统定位: AAS 环境 -> PDDL 规划域的线性编译管线
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 元素图 / 中间记录 / 域模型
pub mod domain;

// 图访问层 - 角色分类 / 引用解析
pub mod repository;

// 引擎层 - 提取 / 构建 / 编排
pub mod engine;

// 导入层 - 环境文件加载
pub mod importer;

// 写出层 - PDDL 落盘
pub mod writer;

// 配置层 - 流水线配置
pub mod config;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AasRole, StateRole};

// 领域实体
pub use domain::{
    ActionModel, ActionSpec, DomainModel, ElementGraph, GroundedAtom, InstanceSpec, Literal,
    PlanningMetadata, PlanningObject, PlanningType, Predicate, PredicateSignature,
    StateAssertion, Submodel, SubmodelElement, TypeHierarchy,
};

// 引擎
pub use engine::{
    BuildError, DomainExtractor, DomainModelBuilder, GenerationError, GenerationPipeline,
    GenerationReport,
};

// 图访问
pub use repository::{ConfigError, GraphAccessor, ReferenceError, ReferenceResolver};

// 导入与写出
pub use importer::{EnvironmentParser, LoadError};
pub use writer::{PddlFiles, PddlWriter, WriteError};

// 配置
pub use config::GeneratorConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "资产管理壳规划域生成系统";

// ==========================================
// 预编译检查
// ==========================================
