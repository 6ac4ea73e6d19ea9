// ==========================================
// 资产管理壳规划域生成系统 - 引擎层
// ==========================================
// 依据: AAS_Planning_Spec_v0.2.md - 3.3/3.4 提取与构建
// ==========================================
// 职责: 提取引擎 + 构建引擎 + 流水线编排
// 红线: 所有完整性错误点名违规实体, 首错即中止
// ==========================================

pub mod builder;
pub mod error;
pub mod events;
pub mod extractor;
pub mod orchestrator;

// 重导出核心引擎
pub use builder::DomainModelBuilder;
pub use error::{BuildError, BuildResult, GenerationError};
pub use events::{
    NoOpEventPublisher, PipelineEvent, PipelineEventPublisher, PipelineStage,
    SharedEventPublisher, TracingEventPublisher,
};
pub use extractor::DomainExtractor;
pub use orchestrator::{GenerationPipeline, GenerationReport};
