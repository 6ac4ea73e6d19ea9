// ==========================================
// 资产管理壳规划域生成系统 - 导入层
// ==========================================
// 依据: AAS_Planning_Spec_v0.2.md - 外部接口 / 容器加载
// ==========================================
// 职责: 外部环境文件导入, 构建只读元素图
// 支持: AAS 环境 JSON
// ==========================================

// 模块声明
pub mod env_parser;
pub mod error;

// 重导出核心类型
pub use env_parser::EnvironmentParser;
pub use error::{LoadError, LoadResult};
