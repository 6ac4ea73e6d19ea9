// ==========================================
// 资产管理壳规划域生成系统 - 配置层
// ==========================================
// 依据: AAS_Planning_Spec_v0.2.md - 流水线配置
// ==========================================
// 职责: 生成流水线的运行配置 (输入/输出路径)
// 说明: 域名/问题名由图内配置解析, 不在此覆写
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// 缺省 PDDL 输出目录
pub const DEFAULT_OUTPUT_DIR: &str = "pddl/output";

// ==========================================
// GeneratorConfig - 生成器配置
// ==========================================

/// 流水线运行配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// AAS 环境 JSON 文件路径
    pub input_path: PathBuf,
    /// PDDL 产物输出目录
    pub output_dir: PathBuf,
}

impl GeneratorConfig {
    /// 以缺省输出目录创建配置
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }

    /// 指定输出目录
    pub fn with_output_dir(mut self, output_dir: impl Into<PathBuf>) -> Self {
        self.output_dir = output_dir.into();
        self
    }

    /// 从命令行参数构建 (argv[1]=输入文件, argv[2]=输出目录可选)
    ///
    /// # 返回
    /// - Err(usage): 参数缺失时返回用法文本
    pub fn from_args(args: &[String]) -> Result<Self, String> {
        let input = args
            .get(1)
            .ok_or_else(|| "用法: aas-plan-gen <input.json> [output_dir]".to_string())?;

        let mut config = GeneratorConfig::new(input);
        if let Some(dir) = args.get(2) {
            config.output_dir = PathBuf::from(dir);
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_args() {
        let args: Vec<String> = vec!["aas-plan-gen".into(), "plant.json".into()];
        let config = GeneratorConfig::from_args(&args).unwrap();
        assert_eq!(config.input_path, PathBuf::from("plant.json"));
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    }

    #[test]
    fn test_from_args_with_output_dir() {
        let args: Vec<String> =
            vec!["aas-plan-gen".into(), "plant.json".into(), "out".into()];
        let config = GeneratorConfig::from_args(&args).unwrap();
        assert_eq!(config.output_dir, PathBuf::from("out"));
    }

    #[test]
    fn test_from_args_missing_input() {
        let args: Vec<String> = vec!["aas-plan-gen".into()];
        assert!(GeneratorConfig::from_args(&args).is_err());
    }
}
