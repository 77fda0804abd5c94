//! Wire entities exchanged with the property-manager REST backend.
//!
//! Fetch responses return full entity rows; mutation requests either send a
//! create payload (server assigns identity) or a full entity snapshot for
//! updates. Parent relations travel as reference stubs so callers that only
//! hold a parent id never have to fabricate a fake full entity.

use serde::{Deserialize, Serialize};

/// Optional audit columns carried by every persisted entity.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Audit {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_insert_user_id: Option<i64>,
}

/// Root of the hierarchy. Owns branches by reference, not containment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub name: String,
    #[serde(flatten)]
    pub audit: Audit,
}

/// Minimal stub standing in for a full [`Project`] in wire bodies.
///
/// The backend treats the id as authoritative and ignores the missing
/// fields, so updates never need a full parent snapshot on the client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: i64,
}

/// Belongs to exactly one project via a foreign key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Branch {
    pub id: i64,
    pub name: String,
    pub project: ProjectRef,
    #[serde(flatten)]
    pub audit: Audit,
}

/// Minimal stub standing in for a full [`Branch`] in wire bodies.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BranchRef {
    pub id: i64,
}

/// A named property file owned by exactly one branch.
///
/// `content` may be absent on the wire and is treated as empty text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i64,
    pub file_name: String,
    #[serde(default)]
    pub content: Option<String>,
    pub branch: BranchRef,
    #[serde(flatten)]
    pub audit: Audit,
}

/// Create payload for a project; the server assigns the identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewProject {
    pub name: String,
}

/// Create payload for a branch under an existing project.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NewBranch {
    pub name: String,
    pub project: ProjectRef,
}

/// Create payload for a property file under an existing branch.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProperty {
    pub file_name: String,
    pub content: String,
    pub branch: BranchRef,
}

/// Status message returned by every mutation endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseMessage {
    pub message: String,
}
