// ==========================================
// 资产管理壳规划域生成系统 - 引擎层事件发布
// ==========================================
// 职责: 流水线进度事件 trait, 替代散落的进度打印
// 说明: Engine 层定义 trait, 外层(CLI/集成方)实现适配器
// 约束: 下游行为不得依赖事件内容, 仅作观测
// ==========================================

use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ==========================================
// 流水线阶段
// ==========================================

/// 流水线阶段标识
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PipelineStage {
    /// 环境文件加载
    Load,
    /// 规划配置解析
    Config,
    /// 类型层级提取
    Types,
    /// 谓词定义提取
    Predicates,
    /// 动作提取
    Actions,
    /// 实例提取
    Instances,
    /// 初始状态与目标提取
    States,
    /// 域模型构建
    Build,
    /// PDDL 落盘
    Write,
}

impl PipelineStage {
    /// 转换为字符串标识
    pub fn as_str(&self) -> &str {
        match self {
            PipelineStage::Load => "Load",
            PipelineStage::Config => "Config",
            PipelineStage::Types => "Types",
            PipelineStage::Predicates => "Predicates",
            PipelineStage::Actions => "Actions",
            PipelineStage::Instances => "Instances",
            PipelineStage::States => "States",
            PipelineStage::Build => "Build",
            PipelineStage::Write => "Write",
        }
    }
}

/// 流水线进度事件
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineEvent {
    /// 所处阶段
    pub stage: PipelineStage,
    /// 说明文字
    pub message: String,
    /// 该阶段产出条目数 (若有)
    pub count: Option<usize>,
}

impl PipelineEvent {
    /// 创建带条目数的阶段完成事件
    pub fn completed(stage: PipelineStage, message: impl Into<String>, count: usize) -> Self {
        Self {
            stage,
            message: message.into(),
            count: Some(count),
        }
    }

    /// 创建纯说明事件
    pub fn note(stage: PipelineStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            message: message.into(),
            count: None,
        }
    }
}

// ==========================================
// 事件发布 Trait
// ==========================================

/// 流水线事件发布者 Trait
///
/// Engine 层定义, 外层实现, 事件失败不影响流水线
pub trait PipelineEventPublisher: Send + Sync {
    /// 发布进度事件
    fn publish(&self, event: &PipelineEvent);
}

/// 空操作事件发布者
///
/// 用于不需要进度观测的场景 (如单元测试)
#[derive(Debug, Clone, Default)]
pub struct NoOpEventPublisher;

impl PipelineEventPublisher for NoOpEventPublisher {
    fn publish(&self, event: &PipelineEvent) {
        tracing::debug!(
            stage = event.stage.as_str(),
            "NoOpEventPublisher: 跳过事件发布"
        );
    }
}

/// tracing 适配发布者
///
/// 把进度事件按 info 级别写入日志通道
#[derive(Debug, Clone, Default)]
pub struct TracingEventPublisher;

impl PipelineEventPublisher for TracingEventPublisher {
    fn publish(&self, event: &PipelineEvent) {
        match event.count {
            Some(count) => {
                tracing::info!(stage = event.stage.as_str(), count, "{}", event.message)
            }
            None => tracing::info!(stage = event.stage.as_str(), "{}", event.message),
        }
    }
}

/// 共享发布者句柄别名
pub type SharedEventPublisher = Arc<dyn PipelineEventPublisher>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_constructors() {
        let done = PipelineEvent::completed(PipelineStage::Types, "类型提取完成", 3);
        assert_eq!(done.stage, PipelineStage::Types);
        assert_eq!(done.count, Some(3));

        let note = PipelineEvent::note(PipelineStage::States, "未找到任何目标");
        assert_eq!(note.count, None);
    }

    #[test]
    fn test_noop_publisher_does_not_panic() {
        let publisher = NoOpEventPublisher;
        publisher.publish(&PipelineEvent::note(PipelineStage::Load, "开始加载"));
    }
}
