// ==========================================
// 资产管理壳规划域生成系统 - CLI 主入口
// ==========================================
// 依据: AAS_Planning_Spec_v0.2.md - 1. 主流程
// 用法: aas-plan-gen <input.json> [output_dir]
// ==========================================

use aas_plan_gen::{logging, GenerationPipeline, GeneratorConfig};
use anyhow::Context;

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", aas_plan_gen::APP_NAME);
    tracing::info!("系统版本: {}", aas_plan_gen::VERSION);
    tracing::info!("==================================================");

    // 解析命令行参数
    let args: Vec<String> = std::env::args().collect();
    let config = match GeneratorConfig::from_args(&args) {
        Ok(c) => c,
        Err(usage) => {
            eprintln!("{}", usage);
            std::process::exit(1);
        }
    };

    // 执行生成流程
    let pipeline = GenerationPipeline::with_tracing();
    let report = pipeline
        .run(&config)
        .with_context(|| format!("生成失败: {}", config.input_path.display()))?;

    tracing::info!("==================================================");
    tracing::info!("生成完成");
    tracing::info!("  Domain:   {}", report.domain_name);
    tracing::info!("  Problem:  {}", report.problem_name);
    tracing::info!("  类型:     {}", report.type_count);
    tracing::info!("  谓词:     {}", report.predicate_count);
    tracing::info!("  动作:     {}", report.action_count);
    tracing::info!("  对象:     {}", report.object_count);
    tracing::info!("  初始事实: {}", report.init_count);
    tracing::info!("  目标:     {}", report.goal_count);
    tracing::info!("  域文件:   {}", report.domain_path.display());
    tracing::info!("  问题文件: {}", report.problem_path.display());
    tracing::info!("==================================================");

    Ok(())
}
