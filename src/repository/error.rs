// ==========================================
// 资产管理壳规划域生成系统 - 图访问层错误类型
// ==========================================
// 依据: Rust 错误处理最佳实践
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 规划配置解析错误
///
/// 仅在 PlanningConfiguration 子模型存在但 domainName 缺失时触发;
/// 子模型整体缺失走兜底链, 不报错
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("PlanningConfiguration 存在但缺少 domainName (shell={shell})")]
    DomainNameMissing { shell: String },
}

/// 引用解析错误 - 源图结构不合法
#[derive(Error, Debug)]
pub enum ReferenceError {
    // ===== 键路径错误 =====
    #[error("引用元素 '{id_short}' 没有键路径")]
    EmptyKeyPath { id_short: String },

    #[error("引用元素 '{id_short}' 键路径过短: {actual} 段 (期望 >={expected})")]
    ShortKeyPath {
        id_short: String,
        actual: usize,
        expected: usize,
    },

    // ===== 解引用错误 =====
    #[error("子模型未找到: {id}")]
    SubmodelNotFound { id: String },

    #[error("元素 '{element}' 未找到于子模型 '{submodel}'")]
    ElementNotFound { element: String, submodel: String },

    #[error("元素 '{element}' 不是集合 (子模型 '{submodel}')")]
    NotACollection { element: String, submodel: String },

    #[error("属性 '{property}' 未找到于 '{parent}'")]
    PropertyNotFound { property: String, parent: String },

    #[error("ProcessParameters 未找到于算子 '{operator}'")]
    ProcessParametersNotFound { operator: String },

    #[error("参数 '{param}' 未找到于算子 '{operator}' 的 ProcessParameters")]
    ParameterNotFound { param: String, operator: String },
}

/// Result 类型别名
pub type ReferenceResult<T> = Result<T, ReferenceError>;
