// ==========================================
// 资产管理壳规划域生成系统 - 图访问器
// ==========================================
// 依据: AAS_Planning_Spec_v0.2.md - 3.1 GraphAccessor
// ==========================================
// 职责: 壳角色分类 / 子模型按名检索 / 规划配置解析
// 红线: 只读借用元素图, 不复制图内容
// ==========================================

use crate::domain::graph::{ElementGraph, Shell, Submodel};
use crate::domain::model::PlanningMetadata;
use crate::domain::types::AasRole;
use crate::repository::error::ConfigError;
use std::collections::HashMap;
use tracing::{debug, info, warn};

// 约定的子模型/元素局部名
pub const SM_TECHNICAL_DATA: &str = "TechnicalData";
pub const SM_PLANNING_CONFIGURATION: &str = "PlanningConfiguration";
pub const SM_SOFTWARE_NAMEPLATE: &str = "SoftwareNameplate";
pub const PROP_AAS_ROLE: &str = "AASRole";
pub const PROP_DOMAIN_NAME: &str = "domainName";
pub const PROP_PROBLEM_NAME: &str = "problemName";
pub const COLL_REQUIREMENTS: &str = "requirements";

// ==========================================
// GraphAccessor - 图访问器
// ==========================================

pub struct GraphAccessor<'g> {
    graph: &'g ElementGraph,
    /// 壳标识符 -> 角色, 构造时一次性分类 (兜底警告只发一次)
    roles: HashMap<&'g str, AasRole>,
}

impl<'g> GraphAccessor<'g> {
    /// 在已加载元素图上创建访问器, 同时分类全部壳角色
    pub fn new(graph: &'g ElementGraph) -> Self {
        let roles = graph
            .shells()
            .iter()
            .map(|s| (s.id.as_str(), Self::classify(graph, s)))
            .collect();
        Self { graph, roles }
    }

    /// 底层元素图
    pub fn graph(&self) -> &'g ElementGraph {
        self.graph
    }

    // ==========================================
    // 壳角色分类
    // ==========================================

    /// 判定壳角色 (读构造时的分类缓存)
    pub fn classify_role(&self, shell: &Shell) -> AasRole {
        self.roles
            .get(shell.id.as_str())
            .copied()
            .unwrap_or_else(|| Self::classify(self.graph, shell))
    }

    /// 查 TechnicalData 子模型的 AASRole 字符串属性;
    /// 缺失时走启发式兜底: 显示名含 "System" 判 System (带警告),
    /// 否则判 Component。兜底不报错
    fn classify(graph: &ElementGraph, shell: &Shell) -> AasRole {
        for sm in graph.shell_submodels(shell) {
            if sm.id_short != SM_TECHNICAL_DATA {
                continue;
            }
            if let Some(tag) = sm.property_value(PROP_AAS_ROLE) {
                match AasRole::from_tag(tag) {
                    Some(role) => return role,
                    None => {
                        warn!(shell = %shell.id_short, tag, "AASRole 标记无法识别, 走兜底逻辑");
                    }
                }
            }
        }

        if shell.id_short.contains("System") {
            warn!(shell = %shell.id_short, "壳缺少 AASRole 属性, 按名称兜底判定为 System");
            AasRole::System
        } else {
            AasRole::Component
        }
    }

    /// 全部 Component 角色的壳
    pub fn component_shells(&self) -> Vec<&'g Shell> {
        self.graph
            .shells()
            .iter()
            .filter(|s| self.classify_role(s) == AasRole::Component)
            .collect()
    }

    /// 首个 System 角色的壳 (规划配置所在)
    pub fn system_shell(&self) -> Option<&'g Shell> {
        self.graph
            .shells()
            .iter()
            .find(|s| self.classify_role(s) == AasRole::System)
    }

    // ==========================================
    // 子模型检索 (仅 Component 范围)
    // ==========================================

    /// 按局部名检索子模型, 仅限 Component 壳
    pub fn component_submodels(&self, id_short: &str) -> Vec<&'g Submodel> {
        let mut result = Vec::new();
        for shell in self.component_shells() {
            for sm in self.graph.shell_submodels(shell) {
                if sm.id_short == id_short {
                    result.push(sm);
                }
            }
        }
        result
    }

    // ==========================================
    // 规划配置解析
    // ==========================================

    /// 解析全局规划配置
    ///
    /// 解析链 (依次兜底, 仅一处硬错误):
    /// 1. System 壳的 PlanningConfiguration 子模型
    ///    - domainName 缺失 -> ConfigError (唯一报错点)
    ///    - problemName 缺失 -> 取 domainName
    /// 2. SoftwareNameplate/SoftwareNameplateInstance/InstanceName 属性链
    /// 3. 输入文件主干名
    pub fn resolve_planning_config(&self) -> Result<PlanningMetadata, ConfigError> {
        let system_shell = match self.system_shell() {
            Some(s) => s,
            None => {
                info!(
                    derived = %self.graph.source_stem(),
                    "未找到 System 壳, 域名从文件名派生"
                );
                return Ok(self.stem_fallback());
            }
        };

        for sm in self.graph.shell_submodels(system_shell) {
            if sm.id_short != SM_PLANNING_CONFIGURATION {
                continue;
            }

            debug!(shell = %system_shell.id_short, "找到 PlanningConfiguration");

            let domain_name = sm
                .property_value(PROP_DOMAIN_NAME)
                .map(|s| s.to_string())
                .ok_or_else(|| ConfigError::DomainNameMissing {
                    shell: system_shell.id_short.clone(),
                })?;

            let problem_name = match sm.property_value(PROP_PROBLEM_NAME) {
                Some(p) => p.to_string(),
                None => {
                    info!(domain = %domain_name, "problemName 缺失, 取 domainName");
                    domain_name.clone()
                }
            };

            let requirements = self.read_requirements(sm);

            return Ok(PlanningMetadata {
                domain_name,
                problem_name,
                requirements,
            });
        }

        // 兜底 1: SoftwareNameplate -> SoftwareNameplateInstance -> InstanceName
        for sm in self.graph.shell_submodels(system_shell) {
            if sm.id_short != SM_SOFTWARE_NAMEPLATE {
                continue;
            }
            let instance_name = sm
                .element("SoftwareNameplateInstance")
                .and_then(|e| e.as_collection())
                .and_then(|c| c.child_property_value("InstanceName"));
            if let Some(name) = instance_name {
                info!(name, "域名取自 SoftwareNameplate/InstanceName");
                return Ok(PlanningMetadata {
                    domain_name: name.to_string(),
                    problem_name: name.to_string(),
                    requirements: PlanningMetadata::default_requirements(),
                });
            }
        }

        // 兜底 2: 文件主干名
        info!(
            derived = %self.graph.source_stem(),
            "System 壳无配置子模型, 域名从文件名派生"
        );
        Ok(self.stem_fallback())
    }

    /// requirements 集合 -> 有序字符串列表 (缺失用缺省集)
    fn read_requirements(&self, sm: &Submodel) -> Vec<String> {
        let coll = match sm.element(COLL_REQUIREMENTS).and_then(|e| e.as_collection()) {
            Some(c) => c,
            None => return PlanningMetadata::default_requirements(),
        };

        coll.value
            .iter()
            .filter_map(|e| e.as_property())
            .filter_map(|p| p.value.clone())
            .collect()
    }

    fn stem_fallback(&self) -> PlanningMetadata {
        let stem = self.graph.source_stem().to_string();
        PlanningMetadata {
            domain_name: stem.clone(),
            problem_name: stem,
            requirements: PlanningMetadata::default_requirements(),
        }
    }
}

// ==========================================
// 测试
// ==========================================
