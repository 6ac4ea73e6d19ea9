// ==========================================
// 资产管理壳规划域生成系统 - 写出层
// ==========================================
// 依据: AAS_Planning_Spec_v0.2.md - 外部接口 / 域写出
// ==========================================
// 职责: 最终域模型的文本落盘 (PDDL)
// ==========================================

pub mod error;
pub mod pddl_writer;

// 重导出核心类型
pub use error::{WriteError, WriteResult};
pub use pddl_writer::{PddlFiles, PddlWriter};
