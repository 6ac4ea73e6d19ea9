// ==========================================
// 资产管理壳规划域生成系统 - 引擎层错误类型
// ==========================================
// 依据: Rust 错误处理最佳实践
// 工具: thiserror 派生宏
// ==========================================

use crate::importer::LoadError;
use crate::repository::error::{ConfigError, ReferenceError};
use crate::writer::WriteError;
use thiserror::Error;

/// 构建阶段完整性错误
///
/// 全部即时致命: 源图不一致立即中止流水线,
/// 错误信息点名违规实体
#[derive(Error, Debug)]
pub enum BuildError {
    // ===== 类型完整性 =====
    #[error("类型 '{type_name}' 未声明 (引用自 {referrer})")]
    UnknownType { type_name: String, referrer: String },

    // ===== 谓词完整性 =====
    #[error("谓词 '{predicate}' 未声明 (引用自 {referrer})")]
    UnknownPredicate { predicate: String, referrer: String },

    // ===== 参数绑定完整性 =====
    #[error("变量 '{var}' 不是动作 '{action}' 的声明参数")]
    UnboundVariable { var: String, action: String },

    #[error("谓词 '{predicate}' 的参数 '{param}' 缺少绑定")]
    MissingBinding { predicate: String, param: String },

    // ===== 对象完整性 =====
    #[error("对象 '{object}' 未声明 (谓词 '{predicate}' 的绑定值)")]
    UnknownObject { object: String, predicate: String },
}

/// Result 类型别名
pub type BuildResult<T> = Result<T, BuildError>;

/// 流水线总错误 (各层错误的汇聚点)
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("加载失败: {0}")]
    Load(#[from] LoadError),

    #[error("规划配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("引用解析错误: {0}")]
    Reference(#[from] ReferenceError),

    #[error("模型构建错误: {0}")]
    Build(#[from] BuildError),

    #[error("输出写入错误: {0}")]
    Write(#[from] WriteError),
}
