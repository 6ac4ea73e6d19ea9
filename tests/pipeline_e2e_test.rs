// ==========================================
// 生成流水线端到端测试
// ==========================================
// 依据: AAS_Planning_Spec_v0.2.md - 1. 主流程
// 职责: 环境 JSON 文件 -> PDDL 域/问题文件 全链路验证
// 场景: 双壳机器人工作单元 (System 配置壳 + Component 资产壳)
// ==========================================

use aas_plan_gen::config::GeneratorConfig;
use aas_plan_gen::engine::{GenerationError, GenerationPipeline};
use aas_plan_gen::importer::EnvironmentParser;
use std::fs;

// ==========================================
// 测试辅助函数
// ==========================================

/// 双壳机器人工作单元环境:
/// - PlanningSystem 壳: PlanningConfiguration (domainName/problemName)
/// - RobotCell 壳: 类型/谓词/动作/实例/状态 五个子模型
const ROBOT_CELL_ENV: &str = r#"{
  "assetAdministrationShells": [
    {
      "id": "urn:aas:planning-system",
      "idShort": "PlanningSystem",
      "submodels": [
        { "keys": [ { "type": "Submodel", "value": "urn:sm:sys-td" } ] },
        { "keys": [ { "type": "Submodel", "value": "urn:sm:planning-config" } ] }
      ]
    },
    {
      "id": "urn:aas:robot-cell",
      "idShort": "RobotCell",
      "submodels": [
        { "keys": [ { "type": "Submodel", "value": "urn:sm:cell-td" } ] },
        { "keys": [ { "type": "Submodel", "value": "urn:sm:types" } ] },
        { "keys": [ { "type": "Submodel", "value": "urn:sm:preds" } ] },
        { "keys": [ { "type": "Submodel", "value": "urn:sm:caps" } ] },
        { "keys": [ { "type": "Submodel", "value": "urn:sm:inst" } ] }
      ]
    }
  ],
  "submodels": [
    {
      "id": "urn:sm:sys-td",
      "idShort": "TechnicalData",
      "submodelElements": [
        { "modelType": "Property", "idShort": "AASRole", "value": "system" }
      ]
    },
    {
      "id": "urn:sm:planning-config",
      "idShort": "PlanningConfiguration",
      "submodelElements": [
        { "modelType": "Property", "idShort": "domainName", "value": "robot_cell" },
        { "modelType": "Property", "idShort": "problemName", "value": "deliver_part" }
      ]
    },
    {
      "id": "urn:sm:cell-td",
      "idShort": "TechnicalData",
      "submodelElements": [
        { "modelType": "Property", "idShort": "AASRole", "value": "component" }
      ]
    },
    {
      "id": "urn:sm:types",
      "idShort": "TypeHierarchy",
      "submodelElements": [
        {
          "modelType": "Entity", "idShort": "EntryNode",
          "statements": [
            { "modelType": "Entity", "idShort": "Robot", "statements": [] },
            { "modelType": "Entity", "idShort": "Location", "statements": [] }
          ]
        }
      ]
    },
    {
      "id": "urn:sm:preds",
      "idShort": "PredicateDefinitions",
      "submodelElements": [
        {
          "modelType": "SubmodelElementCollection", "idShort": "Pred_At",
          "value": [
            { "modelType": "Property", "idShort": "predicateName", "value": "at" },
            {
              "modelType": "SubmodelElementCollection", "idShort": "parameters",
              "value": [
                {
                  "modelType": "SubmodelElementCollection", "idShort": "Param_R",
                  "value": [
                    { "modelType": "Property", "idShort": "Property", "value": "?r" },
                    { "modelType": "Property", "idShort": "Type", "value": "Robot" }
                  ]
                },
                {
                  "modelType": "SubmodelElementCollection", "idShort": "Param_L",
                  "value": [
                    { "modelType": "Property", "idShort": "Property", "value": "?l" },
                    { "modelType": "Property", "idShort": "Type", "value": "Location" }
                  ]
                }
              ]
            }
          ]
        }
      ]
    },
    {
      "id": "urn:sm:caps",
      "idShort": "Capabilities",
      "submodelElements": [
        {
          "modelType": "SubmodelElementCollection", "idShort": "Op_Move",
          "value": [
            { "modelType": "Property", "idShort": "Name", "value": "move" },
            {
              "modelType": "SubmodelElementCollection", "idShort": "ProcessParameters",
              "value": [
                {
                  "modelType": "SubmodelElementCollection", "idShort": "Param_R",
                  "value": [
                    { "modelType": "Property", "idShort": "Property", "value": "?r" },
                    { "modelType": "Property", "idShort": "Type", "value": "Robot" }
                  ]
                },
                {
                  "modelType": "SubmodelElementCollection", "idShort": "Param_From",
                  "value": [
                    { "modelType": "Property", "idShort": "Property", "value": "?from" },
                    { "modelType": "Property", "idShort": "Type", "value": "Location" }
                  ]
                },
                {
                  "modelType": "SubmodelElementCollection", "idShort": "Param_To",
                  "value": [
                    { "modelType": "Property", "idShort": "Property", "value": "?to" },
                    { "modelType": "Property", "idShort": "Type", "value": "Location" }
                  ]
                }
              ]
            },
            {
              "modelType": "SubmodelElementCollection", "idShort": "hasInput",
              "value": [
                {
                  "modelType": "SubmodelElementCollection", "idShort": "C1",
                  "value": [
                    {
                      "modelType": "SubmodelElementCollection", "idShort": "InstanceDescription",
                      "value": [
                        {
                          "modelType": "ReferenceElement", "idShort": "predicateDefinitionRef",
                          "value": { "keys": [
                            { "type": "Submodel", "value": "urn:sm:preds" },
                            { "type": "SubmodelElementCollection", "value": "Pred_At" }
                          ] }
                        },
                        { "modelType": "Property", "idShort": "expressionGoal", "value": "Requirement" },
                        {
                          "modelType": "SubmodelElementCollection", "idShort": "parameterBindingRefs",
                          "value": [
                            {
                              "modelType": "ReferenceElement", "idShort": "ref0",
                              "value": { "keys": [
                                { "type": "Submodel", "value": "urn:sm:caps" },
                                { "type": "SubmodelElementCollection", "value": "Op_Move" },
                                { "type": "SubmodelElementCollection", "value": "ProcessParameters" },
                                { "type": "SubmodelElementCollection", "value": "Param_R" }
                              ] }
                            },
                            {
                              "modelType": "ReferenceElement", "idShort": "ref1",
                              "value": { "keys": [
                                { "type": "Submodel", "value": "urn:sm:caps" },
                                { "type": "SubmodelElementCollection", "value": "Op_Move" },
                                { "type": "SubmodelElementCollection", "value": "ProcessParameters" },
                                { "type": "SubmodelElementCollection", "value": "Param_From" }
                              ] }
                            }
                          ]
                        }
                      ]
                    }
                  ]
                }
              ]
            },
            {
              "modelType": "SubmodelElementCollection", "idShort": "hasOutput",
              "value": [
                {
                  "modelType": "SubmodelElementCollection", "idShort": "C2",
                  "value": [
                    {
                      "modelType": "SubmodelElementCollection", "idShort": "InstanceDescription",
                      "value": [
                        {
                          "modelType": "ReferenceElement", "idShort": "predicateDefinitionRef",
                          "value": { "keys": [
                            { "type": "Submodel", "value": "urn:sm:preds" },
                            { "type": "SubmodelElementCollection", "value": "Pred_At" }
                          ] }
                        },
                        { "modelType": "Property", "idShort": "expressionGoal", "value": "Assurance" },
                        {
                          "modelType": "SubmodelElementCollection", "idShort": "parameterBindingRefs",
                          "value": [
                            {
                              "modelType": "ReferenceElement", "idShort": "ref0",
                              "value": { "keys": [
                                { "type": "Submodel", "value": "urn:sm:caps" },
                                { "type": "SubmodelElementCollection", "value": "Op_Move" },
                                { "type": "SubmodelElementCollection", "value": "ProcessParameters" },
                                { "type": "SubmodelElementCollection", "value": "Param_R" }
                              ] }
                            },
                            {
                              "modelType": "ReferenceElement", "idShort": "ref1",
                              "value": { "keys": [
                                { "type": "Submodel", "value": "urn:sm:caps" },
                                { "type": "SubmodelElementCollection", "value": "Op_Move" },
                                { "type": "SubmodelElementCollection", "value": "ProcessParameters" },
                                { "type": "SubmodelElementCollection", "value": "Param_To" }
                              ] }
                            }
                          ]
                        }
                      ]
                    }
                  ]
                }
              ]
            }
          ]
        }
      ]
    },
    {
      "id": "urn:sm:inst",
      "idShort": "Instances",
      "submodelElements": [
        {
          "modelType": "SubmodelElementCollection", "idShort": "Inst_R1",
          "value": [
            { "modelType": "Property", "idShort": "instanceName", "value": "r1" },
            { "modelType": "Property", "idShort": "instanceType", "value": "Robot" },
            {
              "modelType": "SubmodelElementCollection", "idShort": "InitialStates",
              "value": [
                {
                  "modelType": "SubmodelElementCollection", "idShort": "S1",
                  "value": [
                    {
                      "modelType": "ReferenceElement", "idShort": "predicateDefinitionRef",
                      "value": { "keys": [
                        { "type": "Submodel", "value": "urn:sm:preds" },
                        { "type": "SubmodelElementCollection", "value": "Pred_At" }
                      ] }
                    },
                    { "modelType": "Property", "idShort": "expressionGoal", "value": "ActualValue" },
                    {
                      "modelType": "SubmodelElementCollection", "idShort": "parameterBindings",
                      "value": [
                        {
                          "modelType": "SubmodelElementCollection", "idShort": "b0",
                          "value": [
                            { "modelType": "Property", "idShort": "parameter", "value": "?r" },
                            { "modelType": "Property", "idShort": "value", "value": "r1" }
                          ]
                        },
                        {
                          "modelType": "SubmodelElementCollection", "idShort": "b1",
                          "value": [
                            { "modelType": "Property", "idShort": "parameter", "value": "?l" },
                            { "modelType": "Property", "idShort": "value", "value": "dock" }
                          ]
                        }
                      ]
                    }
                  ]
                }
              ]
            },
            {
              "modelType": "SubmodelElementCollection", "idShort": "Goals",
              "value": [
                {
                  "modelType": "SubmodelElementCollection", "idShort": "G1",
                  "value": [
                    {
                      "modelType": "ReferenceElement", "idShort": "predicateDefinitionRef",
                      "value": { "keys": [
                        { "type": "Submodel", "value": "urn:sm:preds" },
                        { "type": "SubmodelElementCollection", "value": "Pred_At" }
                      ] }
                    },
                    { "modelType": "Property", "idShort": "expressionGoal", "value": "Requirement" },
                    {
                      "modelType": "SubmodelElementCollection", "idShort": "parameterBindings",
                      "value": [
                        {
                          "modelType": "SubmodelElementCollection", "idShort": "b0",
                          "value": [
                            { "modelType": "Property", "idShort": "parameter", "value": "?r" },
                            { "modelType": "Property", "idShort": "value", "value": "r1" }
                          ]
                        },
                        {
                          "modelType": "SubmodelElementCollection", "idShort": "b1",
                          "value": [
                            { "modelType": "Property", "idShort": "parameter", "value": "?l" },
                            { "modelType": "Property", "idShort": "value", "value": "station" }
                          ]
                        }
                      ]
                    }
                  ]
                }
              ]
            }
          ]
        },
        {
          "modelType": "SubmodelElementCollection", "idShort": "Inst_Dock",
          "value": [
            { "modelType": "Property", "idShort": "instanceName", "value": "dock" },
            { "modelType": "Property", "idShort": "instanceType", "value": "Location" }
          ]
        },
        {
          "modelType": "SubmodelElementCollection", "idShort": "Inst_Station",
          "value": [
            { "modelType": "Property", "idShort": "instanceName", "value": "station" },
            { "modelType": "Property", "idShort": "instanceType", "value": "Location" }
          ]
        }
      ]
    }
  ]
}"#;

// ==========================================
// [1] 全链路: 文件 -> PDDL
// ==========================================

#[test]
fn test_pipeline_generates_pddl_pair() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("robot_cell.json");
    fs::write(&input, ROBOT_CELL_ENV).unwrap();

    let config = GeneratorConfig::new(&input).with_output_dir(dir.path().join("out"));
    let report = GenerationPipeline::silent().run(&config).unwrap();

    // 配置取自 System 壳的 PlanningConfiguration
    assert_eq!(report.domain_name, "robot_cell");
    assert_eq!(report.problem_name, "deliver_part");

    // 各表规模
    assert_eq!(report.type_count, 2);
    assert_eq!(report.predicate_count, 1);
    assert_eq!(report.action_count, 1);
    assert_eq!(report.object_count, 3);
    assert_eq!(report.init_count, 1);
    assert_eq!(report.goal_count, 1);

    assert!(report.domain_path.ends_with("robot_cell_domain.pddl"));
    assert!(report.problem_path.ends_with("robot_cell_problem.pddl"));

    // 域文件内容
    let domain = fs::read_to_string(&report.domain_path).unwrap();
    assert!(domain.contains("(define (domain robot_cell)"));
    assert!(domain.contains("(:requirements :strips :typing)"));
    assert!(domain.contains("Robot - object"));
    assert!(domain.contains("Location - object"));
    assert!(domain.contains("(at ?r - Robot ?l - Location)"));
    assert!(domain.contains("(:action move"));
    assert!(domain.contains(":parameters (?r - Robot ?from - Location ?to - Location)"));
    assert!(domain.contains(":precondition (and (at ?r ?from))"));
    assert!(domain.contains(":effect (and (at ?r ?to))"));

    // 问题文件内容
    let problem = fs::read_to_string(&report.problem_path).unwrap();
    assert!(problem.contains("(define (problem deliver_part)"));
    assert!(problem.contains("(:domain robot_cell)"));
    assert!(problem.contains("r1 - Robot"));
    assert!(problem.contains("dock - Location"));
    assert!(problem.contains("(at r1 dock)"));
    assert!(problem.contains("(at r1 station)"));
}

// ==========================================
// [2] 确定性: 同一输入两次运行产物一致
// ==========================================

#[test]
fn test_pipeline_output_is_deterministic() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("robot_cell.json");
    fs::write(&input, ROBOT_CELL_ENV).unwrap();

    let config_a = GeneratorConfig::new(&input).with_output_dir(dir.path().join("out_a"));
    let config_b = GeneratorConfig::new(&input).with_output_dir(dir.path().join("out_b"));

    let report_a = GenerationPipeline::silent().run(&config_a).unwrap();
    let report_b = GenerationPipeline::silent().run(&config_b).unwrap();

    assert_eq!(
        fs::read_to_string(&report_a.domain_path).unwrap(),
        fs::read_to_string(&report_b.domain_path).unwrap()
    );
    assert_eq!(
        fs::read_to_string(&report_a.problem_path).unwrap(),
        fs::read_to_string(&report_b.problem_path).unwrap()
    );
}

// ==========================================
// [3] 构建模型不落盘
// ==========================================

#[test]
fn test_build_model_without_writing() {
    let graph = EnvironmentParser::parse_str(ROBOT_CELL_ENV, "robot_cell").unwrap();
    let model = GenerationPipeline::silent().build_model(&graph).unwrap();

    assert_eq!(model.metadata.domain_name, "robot_cell");
    assert_eq!(model.actions.len(), 1);
    assert_eq!(model.actions[0].name, "move");
    assert_eq!(model.init.len(), 1);
    assert_eq!(model.init[0].args, vec!["r1", "dock"]);
    assert_eq!(model.goals[0].args, vec!["r1", "station"]);
}

// ==========================================
// [4] 首错即中止
// ==========================================

#[test]
fn test_pipeline_rejects_missing_input() {
    let dir = tempfile::tempdir().unwrap();
    let config = GeneratorConfig::new(dir.path().join("missing.json"))
        .with_output_dir(dir.path().join("out"));

    let err = GenerationPipeline::silent().run(&config).unwrap_err();
    assert!(matches!(err, GenerationError::Load(_)));

    // 失败运行不产出任何文件
    assert!(!dir.path().join("out").exists());
}

#[test]
fn test_pipeline_rejects_unknown_instance_type() {
    // 把实例类型改成未声明类型 -> BuildError::UnknownType
    let env = ROBOT_CELL_ENV.replace(
        r#"{ "modelType": "Property", "idShort": "instanceType", "value": "Robot" }"#,
        r#"{ "modelType": "Property", "idShort": "instanceType", "value": "Ghost" }"#,
    );
    let graph = EnvironmentParser::parse_str(&env, "robot_cell").unwrap();

    let err = GenerationPipeline::silent().build_model(&graph).unwrap_err();
    assert!(matches!(err, GenerationError::Build(_)));
}
