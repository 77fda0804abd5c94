//! Pure derivation of the project → branch → file tree.
//!
//! The three source collections are fetched independently and joined here by
//! their foreign keys. The tree is rebuilt wholesale on every refetch; there
//! is no in-place mutation. Node ids are the string form of the underlying
//! numeric ids so ephemeral UI state keyed by id survives rebuilds.

use std::collections::HashMap;

use crate::domain::entity::{Branch, Project, Property};

/// Leaf node backed by a [`Property`] row. Missing content becomes empty
/// text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyFileNode {
    pub id: String,
    pub name: String,
    pub content: String,
}

/// Mid-level node backed by a [`Branch`] row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BranchNode {
    pub id: String,
    pub name: String,
    pub children: Vec<PropertyFileNode>,
}

/// Root node backed by a [`Project`] row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProjectNode {
    pub id: String,
    pub name: String,
    pub children: Vec<BranchNode>,
}

/// Joins the three flat collections into a nested tree.
///
/// One [`ProjectNode`] is emitted per project, in input order; a project
/// without branches keeps an empty child list. Branches and properties whose
/// parent id matches nothing in the sibling collection are dropped silently,
/// a tolerated inconsistency while collections are refetched independently.
///
/// Deterministic and side-effect free: identical inputs always produce
/// structurally equal output.
pub fn build_project_tree(
    projects: &[Project],
    branches: &[Branch],
    properties: &[Property],
) -> Vec<ProjectNode> {
    let mut branches_by_project: HashMap<i64, Vec<&Branch>> = HashMap::new();
    for branch in branches {
        branches_by_project
            .entry(branch.project.id)
            .or_default()
            .push(branch);
    }

    let mut properties_by_branch: HashMap<i64, Vec<&Property>> = HashMap::new();
    for property in properties {
        properties_by_branch
            .entry(property.branch.id)
            .or_default()
            .push(property);
    }

    projects
        .iter()
        .map(|project| ProjectNode {
            id: project.id.to_string(),
            name: project.name.clone(),
            children: branches_by_project
                .get(&project.id)
                .map(|project_branches| {
                    project_branches
                        .iter()
                        .map(|branch| to_branch_node(branch, &properties_by_branch))
                        .collect()
                })
                .unwrap_or_default(),
        })
        .collect()
}

fn to_branch_node(
    branch: &Branch,
    properties_by_branch: &HashMap<i64, Vec<&Property>>,
) -> BranchNode {
    BranchNode {
        id: branch.id.to_string(),
        name: branch.name.clone(),
        children: properties_by_branch
            .get(&branch.id)
            .map(|branch_properties| {
                branch_properties
                    .iter()
                    .map(|property| to_file_node(property))
                    .collect()
            })
            .unwrap_or_default(),
    }
}

fn to_file_node(property: &Property) -> PropertyFileNode {
    PropertyFileNode {
        id: property.id.to_string(),
        name: property.file_name.clone(),
        content: property.content.clone().unwrap_or_default(),
    }
}

/// Finds a file node anywhere in the tree by its id string.
pub fn find_file<'a>(tree: &'a [ProjectNode], file_id: &str) -> Option<&'a PropertyFileNode> {
    tree.iter()
        .flat_map(|project| &project.children)
        .flat_map(|branch| &branch.children)
        .find(|file| file.id == file_id)
}
