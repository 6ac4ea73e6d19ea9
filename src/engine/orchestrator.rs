// ==========================================
// 资产管理壳规划域生成系统 - 流水线编排器
// ==========================================
// 依据: AAS_Planning_Spec_v0.2.md - 1. 主流程
// 用途: 协调 加载 -> 提取 -> 构建 -> 写出 的线性流程
// 约束: 严格线性编译管线, 无内部重试/恢复, 首错即中止
// ==========================================

use crate::config::GeneratorConfig;
use crate::domain::graph::ElementGraph;
use crate::domain::model::DomainModel;
use crate::engine::builder::DomainModelBuilder;
use crate::engine::error::GenerationError;
use crate::engine::events::{
    NoOpEventPublisher, PipelineEvent, PipelineStage, SharedEventPublisher,
    TracingEventPublisher,
};
use crate::engine::extractor::DomainExtractor;
use crate::importer::EnvironmentParser;
use crate::writer::PddlWriter;
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

// ==========================================
// GenerationReport - 生成结果
// ==========================================

/// 单次流水线运行的产出摘要
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub domain_name: String,
    pub problem_name: String,

    // 各表规模
    pub type_count: usize,
    pub predicate_count: usize,
    pub action_count: usize,
    pub object_count: usize,
    pub init_count: usize,
    pub goal_count: usize,

    // 落盘产物
    pub domain_path: PathBuf,
    pub problem_path: PathBuf,

    pub generated_at: DateTime<Utc>,
}

// ==========================================
// GenerationPipeline - 流水线编排器
// ==========================================

pub struct GenerationPipeline {
    publisher: SharedEventPublisher,
}

impl GenerationPipeline {
    /// 创建带指定事件发布者的流水线
    pub fn new(publisher: SharedEventPublisher) -> Self {
        Self { publisher }
    }

    /// 进度写入日志通道的流水线 (CLI 缺省)
    pub fn with_tracing() -> Self {
        Self::new(Arc::new(TracingEventPublisher))
    }

    /// 不发布进度事件的流水线 (测试用)
    pub fn silent() -> Self {
        Self::new(Arc::new(NoOpEventPublisher))
    }

    /// 执行完整生成流程
    ///
    /// 加载环境文件, 提取中间记录, 构建域模型, 写出 PDDL;
    /// 任一阶段失败即中止并带实体名上抛
    pub fn run(&self, config: &GeneratorConfig) -> Result<GenerationReport, GenerationError> {
        info!(input = %config.input_path.display(), "开始生成流程");

        // ==========================================
        // 步骤1: 加载环境文件
        // ==========================================
        self.publish(PipelineEvent::note(PipelineStage::Load, "加载环境文件"));
        let graph = EnvironmentParser::load(&config.input_path)?;
        self.publish(PipelineEvent::completed(
            PipelineStage::Load,
            "环境文件加载完成",
            graph.submodel_count(),
        ));

        // ==========================================
        // 步骤2: 提取 + 构建
        // ==========================================
        let model = self.build_model(&graph)?;

        // ==========================================
        // 步骤3: PDDL 写出
        // ==========================================
        let files = PddlWriter::write(&model, &config.output_dir)?;
        self.publish(PipelineEvent::note(PipelineStage::Write, "PDDL 写出完成"));

        let report = GenerationReport {
            domain_name: model.metadata.domain_name.clone(),
            problem_name: model.metadata.problem_name.clone(),
            type_count: model.types.len(),
            predicate_count: model.predicates.len(),
            action_count: model.actions.len(),
            object_count: model.objects.len(),
            init_count: model.init.len(),
            goal_count: model.goals.len(),
            domain_path: files.domain_path,
            problem_path: files.problem_path,
            generated_at: Utc::now(),
        };

        info!(
            domain = %report.domain_name,
            types = report.type_count,
            predicates = report.predicate_count,
            actions = report.action_count,
            objects = report.object_count,
            "生成流程完成"
        );
        Ok(report)
    }

    /// 已加载元素图 -> 域模型 (提取 + 构建, 不落盘)
    pub fn build_model(&self, graph: &ElementGraph) -> Result<DomainModel, GenerationError> {
        let extractor = DomainExtractor::new(graph);

        // 规划配置
        let metadata = extractor.accessor().resolve_planning_config()?;
        self.publish(PipelineEvent::note(
            PipelineStage::Config,
            format!("规划配置: domain={}", metadata.domain_name),
        ));

        // 提取五遍
        let hierarchy = extractor.extract_type_hierarchy();
        self.publish(PipelineEvent::completed(
            PipelineStage::Types,
            "类型层级提取完成",
            hierarchy.len(),
        ));

        let predicates = extractor.extract_predicate_definitions();
        self.publish(PipelineEvent::completed(
            PipelineStage::Predicates,
            "谓词定义提取完成",
            predicates.len(),
        ));

        let operators = extractor.extract_process_operators()?;
        self.publish(PipelineEvent::completed(
            PipelineStage::Actions,
            "动作提取完成",
            operators.len(),
        ));

        let instances = extractor.extract_instances();
        self.publish(PipelineEvent::completed(
            PipelineStage::Instances,
            "实例提取完成",
            instances.len(),
        ));

        let assertions = extractor.extract_initial_states_and_goals()?;
        self.publish(PipelineEvent::completed(
            PipelineStage::States,
            "状态断言提取完成",
            assertions.len(),
        ));

        // 构建六遍
        let mut builder = DomainModelBuilder::new(metadata);
        builder.build_types(&hierarchy);
        builder.build_predicates(&predicates)?;
        builder.build_actions(&operators)?;
        builder.build_objects(&instances)?;
        builder.build_init(&assertions)?;
        builder.build_goals(&assertions)?;

        let model = builder.finish();
        self.publish(PipelineEvent::completed(
            PipelineStage::Build,
            "域模型构建完成",
            model.actions.len(),
        ));
        Ok(model)
    }

    fn publish(&self, event: PipelineEvent) {
        self.publisher.publish(&event);
    }
}

impl Default for GenerationPipeline {
    fn default() -> Self {
        Self::silent()
    }
}
