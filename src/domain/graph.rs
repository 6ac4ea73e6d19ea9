// ==========================================
// 资产管理壳规划域生成系统 - 元素图
// ==========================================
// 依据: AAS_Planning_Spec_v0.2.md - 2. 数据模型
// ==========================================
// 职责: 已加载 AAS 环境的内存表示
// 约束: 加载一次后只读, 所有下游阶段不得修改
// ==========================================

use serde::Serialize;
use std::collections::HashMap;

// ==========================================
// SubmodelElement - 子模型元素 (和类型)
// ==========================================

/// 子模型元素的四种变体
///
/// 所有遍历点必须穷尽匹配, 禁止运行时类型探测
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SubmodelElement {
    /// 属性: 局部名 + 字符串值
    Property(Property),
    /// 引用元素: 局部名 + 跨子模型键路径
    ReferenceElement(ReferenceElement),
    /// 集合: 局部名 + 有序子元素
    Collection(ElementCollection),
    /// 实体: 局部名 + 有序子语句 (类型层级树节点)
    Entity(Entity),
}

impl SubmodelElement {
    /// 元素的局部名 (idShort)
    pub fn id_short(&self) -> &str {
        match self {
            SubmodelElement::Property(p) => &p.id_short,
            SubmodelElement::ReferenceElement(r) => &r.id_short,
            SubmodelElement::Collection(c) => &c.id_short,
            SubmodelElement::Entity(e) => &e.id_short,
        }
    }

    /// 按属性视角访问, 非属性返回 None
    pub fn as_property(&self) -> Option<&Property> {
        match self {
            SubmodelElement::Property(p) => Some(p),
            _ => None,
        }
    }

    /// 按引用元素视角访问
    pub fn as_reference(&self) -> Option<&ReferenceElement> {
        match self {
            SubmodelElement::ReferenceElement(r) => Some(r),
            _ => None,
        }
    }

    /// 按集合视角访问
    pub fn as_collection(&self) -> Option<&ElementCollection> {
        match self {
            SubmodelElement::Collection(c) => Some(c),
            _ => None,
        }
    }

    /// 按实体视角访问
    pub fn as_entity(&self) -> Option<&Entity> {
        match self {
            SubmodelElement::Entity(e) => Some(e),
            _ => None,
        }
    }
}

/// 属性元素
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Property {
    pub id_short: String,
    /// 字符串值, 源文件中可能缺失
    pub value: Option<String>,
}

/// 引用元素
///
/// 键路径是反向引用, 不是所有权边:
/// 仅存储目标标识符段, 按需对唯一图仲裁区解析
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReferenceElement {
    pub id_short: String,
    /// 有序键路径段 (第一段为子模型标识符)
    pub keys: Vec<String>,
}

/// 集合元素
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementCollection {
    pub id_short: String,
    /// 有序子元素 (源文件声明顺序)
    pub value: Vec<SubmodelElement>,
}

impl ElementCollection {
    /// 按局部名查找直接子元素
    pub fn child(&self, id_short: &str) -> Option<&SubmodelElement> {
        self.value.iter().find(|e| e.id_short() == id_short)
    }

    /// 读取直接子属性的字符串值
    pub fn child_property_value(&self, id_short: &str) -> Option<&str> {
        self.child(id_short)
            .and_then(|e| e.as_property())
            .and_then(|p| p.value.as_deref())
    }

    /// 按局部名查找直接子集合
    pub fn child_collection(&self, id_short: &str) -> Option<&ElementCollection> {
        self.child(id_short).and_then(|e| e.as_collection())
    }
}

/// 实体元素 (类型层级树节点)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entity {
    pub id_short: String,
    /// 有序子语句
    pub statements: Vec<SubmodelElement>,
}

// ==========================================
// Submodel - 子模型
// ==========================================

/// 子模型: 壳内按局部名分组的元素容器
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submodel {
    /// 全局标识符 (引用解析的键)
    pub id: String,
    /// 局部名
    pub id_short: String,
    /// 有序顶层元素
    pub elements: Vec<SubmodelElement>,
}

impl Submodel {
    /// 按局部名查找顶层元素
    pub fn element(&self, id_short: &str) -> Option<&SubmodelElement> {
        self.elements.iter().find(|e| e.id_short() == id_short)
    }

    /// 读取顶层属性的字符串值
    pub fn property_value(&self, id_short: &str) -> Option<&str> {
        self.element(id_short)
            .and_then(|e| e.as_property())
            .and_then(|p| p.value.as_deref())
    }
}

// ==========================================
// Shell - 资产管理壳
// ==========================================

/// 顶层资产单元, 角色为 System 或 Component
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shell {
    pub id: String,
    pub id_short: String,
    /// 所含子模型的全局标识符 (引用, 非所有权)
    pub submodel_ids: Vec<String>,
}

// ==========================================
// ElementGraph - 元素图
// ==========================================

/// 按标识符寻址的只读元素存储
///
/// 由 importer 层一次性构建, 此后所有阶段只读访问
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementGraph {
    shells: Vec<Shell>,
    submodels: HashMap<String, Submodel>,
    /// 输入文件主干名 (规划配置兜底用)
    source_stem: String,
}

impl ElementGraph {
    /// 从已解析的壳与子模型构建元素图
    pub fn new(shells: Vec<Shell>, submodels: Vec<Submodel>, source_stem: String) -> Self {
        let submodels = submodels
            .into_iter()
            .map(|sm| (sm.id.clone(), sm))
            .collect();

        Self {
            shells,
            submodels,
            source_stem,
        }
    }

    /// 全部顶层壳
    pub fn shells(&self) -> &[Shell] {
        &self.shells
    }

    /// 按全局标识符查找子模型
    pub fn lookup_submodel(&self, id: &str) -> Option<&Submodel> {
        self.submodels.get(id)
    }

    /// 某壳所含的子模型 (跳过悬空引用)
    pub fn shell_submodels<'a>(&'a self, shell: &'a Shell) -> impl Iterator<Item = &'a Submodel> {
        shell
            .submodel_ids
            .iter()
            .filter_map(|id| self.submodels.get(id))
    }

    /// 输入文件主干名
    pub fn source_stem(&self) -> &str {
        &self.source_stem
    }

    /// 子模型总数
    pub fn submodel_count(&self) -> usize {
        self.submodels.len()
    }
}
