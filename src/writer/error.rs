// ==========================================
// 资产管理壳规划域生成系统 - 写出层错误类型
// ==========================================
// 依据: Rust 错误处理最佳实践
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// PDDL 写出错误
#[derive(Error, Debug)]
pub enum WriteError {
    #[error("输出目录创建失败: {dir}: {message}")]
    CreateDirFailed { dir: String, message: String },

    #[error("文件写入失败: {0}")]
    FileWriteError(String),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for WriteError {
    fn from(err: std::io::Error) -> Self {
        WriteError::FileWriteError(err.to_string())
    }
}

/// Result 类型别名
pub type WriteResult<T> = Result<T, WriteError>;
