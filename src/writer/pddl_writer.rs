// ==========================================
// 资产管理壳规划域生成系统 - PDDL 写出器
// ==========================================
// 依据: PDDL 1.2 语法 (STRIPS + typing 子集)
// ==========================================
// 职责: 不可变 DomainModel -> <domain>_domain.pddl / <domain>_problem.pddl
// 约束: 输出顺序与模型表顺序一致, 同一模型写出字节级稳定
// ==========================================

use crate::domain::model::{DomainModel, GroundedAtom, Literal};
use crate::writer::error::{WriteError, WriteResult};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// 写出结果: 两个产物文件的落盘路径
#[derive(Debug, Clone)]
pub struct PddlFiles {
    pub domain_path: PathBuf,
    pub problem_path: PathBuf,
}

// ==========================================
// PddlWriter - PDDL 写出器
// ==========================================

pub struct PddlWriter;

impl PddlWriter {
    /// 把域模型写为一对 PDDL 文件
    ///
    /// 输出目录不存在时自动创建
    #[instrument(skip(model), fields(domain = %model.metadata.domain_name))]
    pub fn write(model: &DomainModel, output_dir: &Path) -> WriteResult<PddlFiles> {
        fs::create_dir_all(output_dir).map_err(|e| WriteError::CreateDirFailed {
            dir: output_dir.display().to_string(),
            message: e.to_string(),
        })?;

        let domain_name = &model.metadata.domain_name;
        let domain_path = output_dir.join(format!("{}_domain.pddl", domain_name));
        let problem_path = output_dir.join(format!("{}_problem.pddl", domain_name));

        fs::write(&domain_path, Self::render_domain(model))?;
        fs::write(&problem_path, Self::render_problem(model))?;

        info!(
            domain = %domain_path.display(),
            problem = %problem_path.display(),
            "PDDL 文件写出完成"
        );

        Ok(PddlFiles {
            domain_path,
            problem_path,
        })
    }

    // ==========================================
    // 域文件
    // ==========================================

    /// 渲染域文件文本
    pub fn render_domain(model: &DomainModel) -> String {
        let mut out = String::new();
        let meta = &model.metadata;

        let _ = writeln!(out, "(define (domain {})", meta.domain_name);

        // :requirements
        let reqs: Vec<String> = meta.requirements.iter().map(|r| format!(":{}", r)).collect();
        let _ = writeln!(out, "  (:requirements {})", reqs.join(" "));

        // :types (根类型挂隐式 object 下)
        if !model.types.is_empty() {
            let _ = writeln!(out, "  (:types");
            for t in &model.types {
                let parent = t.parent.as_deref().unwrap_or("object");
                let _ = writeln!(out, "    {} - {}", t.name, parent);
            }
            let _ = writeln!(out, "  )");
        }

        // :predicates
        if !model.predicates.is_empty() {
            let _ = writeln!(out, "  (:predicates");
            for p in &model.predicates {
                let params: String = p
                    .params
                    .iter()
                    .map(|tp| format!(" ?{} - {}", tp.name, tp.type_name))
                    .collect();
                let _ = writeln!(out, "    ({}{})", p.name, params);
            }
            let _ = writeln!(out, "  )");
        }

        // :action 块
        for a in &model.actions {
            let params: String = a
                .params
                .iter()
                .map(|tp| format!("?{} - {}", tp.name, tp.type_name))
                .collect::<Vec<_>>()
                .join(" ");
            let _ = writeln!(out, "  (:action {}", a.name);
            let _ = writeln!(out, "    :parameters ({})", params);
            let _ = writeln!(out, "    :precondition {}", render_literal_set(&a.preconditions));
            let _ = writeln!(out, "    :effect {}", render_literal_set(&a.effects));
            let _ = writeln!(out, "  )");
        }

        out.push_str(")\n");
        out
    }

    // ==========================================
    // 问题文件
    // ==========================================

    /// 渲染问题文件文本
    pub fn render_problem(model: &DomainModel) -> String {
        let mut out = String::new();
        let meta = &model.metadata;

        let _ = writeln!(out, "(define (problem {})", meta.problem_name);
        let _ = writeln!(out, "  (:domain {})", meta.domain_name);

        // :objects
        if !model.objects.is_empty() {
            let _ = writeln!(out, "  (:objects");
            for o in &model.objects {
                let _ = writeln!(out, "    {} - {}", o.name, o.type_name);
            }
            let _ = writeln!(out, "  )");
        }

        // :init (缺省为假, 仅列显式置真的原子)
        let _ = writeln!(out, "  (:init");
        for atom in &model.init {
            let _ = writeln!(out, "    {}", render_atom(atom));
        }
        let _ = writeln!(out, "  )");

        // :goal (零目标问题按构造即无解, 照常写出空合取)
        let _ = writeln!(out, "  (:goal (and");
        for atom in &model.goals {
            let _ = writeln!(out, "    {}", render_atom(atom));
        }
        let _ = writeln!(out, "  ))");

        out.push_str(")\n");
        out
    }
}

/// 文字集 -> (and ...) 合取表达式
fn render_literal_set(literals: &[Literal]) -> String {
    let mut out = String::from("(and");
    for lit in literals {
        let args: String = lit.args.iter().map(|a| format!(" ?{}", a)).collect();
        if lit.positive {
            let _ = write!(out, " ({}{})", lit.predicate, args);
        } else {
            let _ = write!(out, " (not ({}{}))", lit.predicate, args);
        }
    }
    out.push(')');
    out
}

/// 接地原子 -> (pred obj ...)
fn render_atom(atom: &GroundedAtom) -> String {
    let args: String = atom.args.iter().map(|a| format!(" {}", a)).collect();
    format!("({}{})", atom.predicate, args)
}

// ==========================================
// 测试
// ==========================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        ActionModel, PlanningMetadata, PlanningObject, PlanningType, Predicate, TypedParameter,
    };

    fn sample_model() -> DomainModel {
        DomainModel {
            metadata: PlanningMetadata {
                domain_name: "cell".to_string(),
                problem_name: "cell_p1".to_string(),
                requirements: PlanningMetadata::default_requirements(),
            },
            types: vec![
                PlanningType {
                    name: "robot".to_string(),
                    parent: None,
                },
                PlanningType {
                    name: "gripper".to_string(),
                    parent: Some("robot".to_string()),
                },
            ],
            predicates: vec![Predicate {
                name: "idle".to_string(),
                params: vec![TypedParameter {
                    name: "r".to_string(),
                    type_name: "robot".to_string(),
                }],
            }],
            actions: vec![ActionModel {
                name: "activate".to_string(),
                params: vec![TypedParameter {
                    name: "r".to_string(),
                    type_name: "robot".to_string(),
                }],
                preconditions: vec![Literal {
                    predicate: "idle".to_string(),
                    args: vec!["r".to_string()],
                    positive: false,
                }],
                effects: vec![Literal {
                    predicate: "idle".to_string(),
                    args: vec!["r".to_string()],
                    positive: true,
                }],
            }],
            objects: vec![PlanningObject {
                name: "r1".to_string(),
                type_name: "robot".to_string(),
            }],
            init: vec![GroundedAtom {
                predicate: "idle".to_string(),
                args: vec!["r1".to_string()],
            }],
            goals: vec![],
        }
    }

    #[test]
    fn test_render_domain_sections() {
        let text = PddlWriter::render_domain(&sample_model());
        assert!(text.contains("(define (domain cell)"));
        assert!(text.contains("(:requirements :strips :typing)"));
        assert!(text.contains("robot - object"));
        assert!(text.contains("gripper - robot"));
        assert!(text.contains("(idle ?r - robot)"));
        assert!(text.contains(":precondition (and (not (idle ?r)))"));
        assert!(text.contains(":effect (and (idle ?r))"));
    }

    #[test]
    fn test_render_problem_sections() {
        let text = PddlWriter::render_problem(&sample_model());
        assert!(text.contains("(define (problem cell_p1)"));
        assert!(text.contains("(:domain cell)"));
        assert!(text.contains("r1 - robot"));
        assert!(text.contains("(idle r1)"));
        // 零目标仍写出空合取
        assert!(text.contains("(:goal (and"));
    }

    #[test]
    fn test_render_is_stable() {
        let model = sample_model();
        assert_eq!(
            PddlWriter::render_domain(&model),
            PddlWriter::render_domain(&model)
        );
    }

    #[test]
    fn test_write_creates_files() {
        let dir = tempfile::tempdir().unwrap();
        let files = PddlWriter::write(&sample_model(), dir.path()).unwrap();
        assert!(files.domain_path.ends_with("cell_domain.pddl"));
        assert!(files.problem_path.ends_with("cell_problem.pddl"));
        assert!(files.domain_path.exists());
        assert!(files.problem_path.exists());
    }
}
