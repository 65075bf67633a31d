//! BigFix API data types.
//!
//! Templates and action status documents are XML and stay opaque text; only
//! the JSON query result is decoded.

use serde::{Deserialize, Serialize};

/// An automation plan fixlet located by the plan query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanReference {
    /// Fixlet ID of the plan.
    pub id: u64,
    /// Plan name.
    pub name: String,
    /// Name of the site holding the plan.
    pub site: String,
}

/// A plan reference paired with its execution template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListedPlan {
    /// The plan.
    #[serde(flatten)]
    pub plan: PlanReference,
    /// Execution template XML; absent when the server did not return one.
    pub template: Option<String>,
}

/// Body of `GET /api/query?output=json`.
///
/// Each row is the `(id, name, site name)` tuple selected by the relevance
/// expression.
#[derive(Debug, Deserialize)]
pub(crate) struct QueryResponse {
    pub(crate) result: Vec<(u64, String, String)>,
}

impl QueryResponse {
    pub(crate) fn into_plans(self) -> Vec<PlanReference> {
        self.result
            .into_iter()
            .map(|(id, name, site)| PlanReference { id, name, site })
            .collect()
    }
}

/// Result of watching a plan action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WatchOutcome {
    /// Plan action ID.
    pub action_id: String,
    /// Number of status requests made.
    pub polls: u32,
    /// Last status document reported before the action disappeared.
    pub last_status: Option<String>,
}
