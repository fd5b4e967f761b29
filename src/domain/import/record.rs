// ============================================================
// IMPORT RECORD TYPES
// ============================================================
// Domain records produced by a successful validation.
// Never constructed from unvalidated input anywhere else.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which import schema a run is targeting. Always chosen explicitly by the
/// caller; never inferred from file contents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    Actions,
    Goals,
}

impl ImportKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "actions" => Some(ImportKind::Actions),
            "goals" => Some(ImportKind::Goals),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImportKind::Actions => "actions",
            ImportKind::Goals => "goals",
        }
    }
}

/// Who owns an action
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OwnerRole {
    Owner,
    Ops,
    Sales,
    Finance,
}

impl OwnerRole {
    pub const ALLOWED: &'static [&'static str] = &["Owner", "Ops", "Sales", "Finance"];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Owner" => Some(OwnerRole::Owner),
            "Ops" => Some(OwnerRole::Ops),
            "Sales" => Some(OwnerRole::Sales),
            "Finance" => Some(OwnerRole::Finance),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerRole::Owner => "Owner",
            OwnerRole::Ops => "Ops",
            OwnerRole::Sales => "Sales",
            OwnerRole::Finance => "Finance",
        }
    }
}

/// Which business engine an action drives
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Engine {
    Leadership,
    Operations,
    #[serde(rename = "Marketing & Sales")]
    MarketingSales,
    Finance,
    Personnel,
}

impl Engine {
    pub const ALLOWED: &'static [&'static str] = &[
        "Leadership",
        "Operations",
        "Marketing & Sales",
        "Finance",
        "Personnel",
    ];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Leadership" => Some(Engine::Leadership),
            "Operations" => Some(Engine::Operations),
            "Marketing & Sales" => Some(Engine::MarketingSales),
            "Finance" => Some(Engine::Finance),
            "Personnel" => Some(Engine::Personnel),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Engine::Leadership => "Leadership",
            Engine::Operations => "Operations",
            Engine::MarketingSales => "Marketing & Sales",
            Engine::Finance => "Finance",
            Engine::Personnel => "Personnel",
        }
    }
}

/// Workflow status of an action
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ActionStatus {
    Todo,
    Doing,
    Done,
}

impl ActionStatus {
    pub const ALLOWED: &'static [&'static str] = &["todo", "doing", "done"];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "todo" => Some(ActionStatus::Todo),
            "doing" => Some(ActionStatus::Doing),
            "done" => Some(ActionStatus::Done),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionStatus::Todo => "todo",
            ActionStatus::Doing => "doing",
            ActionStatus::Done => "done",
        }
    }
}

/// Where a goal sits in the hierarchy
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalLevel {
    NorthStar,
    Department,
}

impl GoalLevel {
    pub const ALLOWED: &'static [&'static str] = &["north_star", "department"];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "north_star" => Some(GoalLevel::NorthStar),
            "department" => Some(GoalLevel::Department),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalLevel::NorthStar => "north_star",
            GoalLevel::Department => "department",
        }
    }
}

/// Department owning a department-level goal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Department {
    Ops,
    Sales,
    Marketing,
    Finance,
}

impl Department {
    pub const ALLOWED: &'static [&'static str] = &["Ops", "Sales", "Marketing", "Finance"];

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "Ops" => Some(Department::Ops),
            "Sales" => Some(Department::Sales),
            "Marketing" => Some(Department::Marketing),
            "Finance" => Some(Department::Finance),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Department::Ops => "Ops",
            Department::Sales => "Sales",
            Department::Marketing => "Marketing",
            Department::Finance => "Finance",
        }
    }
}

/// A validated work item
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActionRecord {
    pub title: String,
    pub why: String,
    pub owner_role: OwnerRole,
    pub engine: Engine,
    pub eta_days: i64,
    pub status: ActionStatus,
    pub due_date: Option<NaiveDate>,
}

/// A validated goal
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GoalRecord {
    pub level: GoalLevel,
    pub title: String,
    pub department: Option<Department>,
    pub metric: Option<String>,
    pub current: Option<f64>,
    pub target: Option<f64>,
    pub due_date: Option<NaiveDate>,
    pub alignment_statement: Option<String>,
}

/// One validated record, tagged by import kind
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ImportedRecord {
    Action(ActionRecord),
    Goal(GoalRecord),
}
