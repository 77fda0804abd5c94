//! Data-fetch and mutation orchestrator for the project explorer.
//!
//! Coordinates the three independent collection fetches, derives the tree
//! once all three have loaded, and exposes the nine mutation operations.
//! Every successful mutation funnels through a single `invalidate_all`
//! operation that refetches all three collections unconditionally: the tree
//! embeds fields from every collection, and re-resolving the foreign keys
//! wholesale keeps the derived view consistent without incremental patching.

use tracing::{debug, warn};

use crate::app::{AppEvent, AppServices};
use crate::domain::entity::{
    Audit, Branch, BranchRef, NewBranch, NewProject, NewProperty, Project, ProjectRef, Property,
    ResponseMessage,
};
use crate::domain::tree::{ProjectNode, build_project_tree};
use crate::infra::api::ApiFuture;

/// Holds the three source collections, the derived tree, and aggregate
/// loading/error state.
#[derive(Default)]
pub struct ExplorerManager {
    projects: Option<Vec<Project>>,
    branches: Option<Vec<Branch>>,
    properties: Option<Vec<Property>>,
    tree: Vec<ProjectNode>,
    fetches_in_flight: u32,
    load_error: Option<String>,
    mutation_notice: Option<String>,
    mutation_error: Option<String>,
}

impl ExplorerManager {
    /// Returns the derived tree. Empty until all three collections have
    /// loaded successfully at least once.
    pub fn tree(&self) -> &[ProjectNode] {
        &self.tree
    }

    /// Returns whether any collection fetch is currently in flight.
    pub fn is_loading(&self) -> bool {
        self.fetches_in_flight > 0
    }

    /// Returns the first error of the latest failed fetch round, if any.
    pub fn load_error(&self) -> Option<&str> {
        self.load_error.as_deref()
    }

    /// Returns the status message of the last completed mutation.
    pub fn mutation_notice(&self) -> Option<&str> {
        self.mutation_notice.as_deref()
    }

    /// Returns the error of the last failed mutation.
    pub fn mutation_error(&self) -> Option<&str> {
        self.mutation_error.as_deref()
    }

    /// Starts a concurrent fetch of all three collections.
    ///
    /// Completion is reported through the app event bus; a failure in any
    /// fetch surfaces the first encountered error and no partial tree is
    /// derived from it.
    pub(crate) fn spawn_fetch_all(&mut self, services: &AppServices) {
        self.fetches_in_flight += 1;
        let api = services.api();
        let event_tx = services.event_sender();
        tokio::spawn(async move {
            let results = tokio::join!(
                api.fetch_projects(),
                api.fetch_branches(),
                api.fetch_properties()
            );
            let event = match results {
                (Ok(projects), Ok(branches), Ok(properties)) => AppEvent::CollectionsLoaded {
                    projects,
                    branches,
                    properties,
                },
                (Err(error), _, _) | (_, Err(error), _) | (_, _, Err(error)) => {
                    warn!(%error, "collection fetch failed");

                    AppEvent::CollectionsLoadFailed {
                        error: error.to_string(),
                    }
                }
            };
            let _ = event_tx.send(event);
        });
    }

    /// The single cache-invalidation operation: refetches all three
    /// collections and rebuilds the tree, regardless of which entity a
    /// mutation touched. Overlapping invalidations are safe; the last
    /// refetch to complete wins.
    pub(crate) fn invalidate_all(&mut self, services: &AppServices) {
        debug!("invalidating project, branch, and property collections");
        self.spawn_fetch_all(services);
    }

    /// Applies a completed fetch round and rebuilds the derived tree.
    pub(crate) fn apply_collections_loaded(
        &mut self,
        projects: Vec<Project>,
        branches: Vec<Branch>,
        properties: Vec<Property>,
    ) {
        self.fetches_in_flight = self.fetches_in_flight.saturating_sub(1);
        self.load_error = None;
        self.projects = Some(projects);
        self.branches = Some(branches);
        self.properties = Some(properties);
        self.rebuild_tree();
    }

    /// Records a failed fetch round. Previously loaded collections are kept
    /// so the last consistent tree stays visible behind the error line.
    pub(crate) fn apply_load_failed(&mut self, error: String) {
        self.fetches_in_flight = self.fetches_in_flight.saturating_sub(1);
        self.load_error = Some(error);
    }

    pub(crate) fn apply_mutation_succeeded(&mut self, message: String) {
        self.mutation_error = None;
        self.mutation_notice = Some(message);
    }

    pub(crate) fn apply_mutation_failed(&mut self, error: String) {
        self.mutation_notice = None;
        self.mutation_error = Some(error);
    }

    fn rebuild_tree(&mut self) {
        self.tree = match (&self.projects, &self.branches, &self.properties) {
            (Some(projects), Some(branches), Some(properties)) => {
                build_project_tree(projects, branches, properties)
            }
            _ => Vec::new(),
        };
    }

    /// Creates a project with the given name.
    pub(crate) fn create_project(&mut self, services: &AppServices, name: String) {
        self.begin_mutation();
        spawn_mutation(services, services.api().create_project(NewProject { name }));
    }

    /// Renames a project, sending the full entity snapshot the update
    /// endpoint requires.
    ///
    /// # Errors
    /// Returns an error if the project is not in the loaded collection.
    pub(crate) fn rename_project(
        &mut self,
        services: &AppServices,
        project_id: i64,
        name: String,
    ) -> Result<(), String> {
        let mut project = self
            .project_by_id(project_id)
            .ok_or_else(|| format!("project {project_id} not found"))?
            .clone();
        project.name = name;
        self.begin_mutation();
        spawn_mutation(services, services.api().update_project(project));

        Ok(())
    }

    /// Deletes a project by id.
    pub(crate) fn delete_project(&mut self, services: &AppServices, project_id: i64) {
        self.begin_mutation();
        spawn_mutation(services, services.api().delete_project(project_id));
    }

    /// Creates a branch under a project, referencing the parent as a stub.
    pub(crate) fn create_branch(&mut self, services: &AppServices, project_id: i64, name: String) {
        self.begin_mutation();
        spawn_mutation(
            services,
            services.api().create_branch(NewBranch {
                name,
                project: ProjectRef { id: project_id },
            }),
        );
    }

    /// Renames a branch, keeping its existing project reference.
    ///
    /// # Errors
    /// Returns an error if the branch is not in the loaded collection.
    pub(crate) fn rename_branch(
        &mut self,
        services: &AppServices,
        branch_id: i64,
        name: String,
    ) -> Result<(), String> {
        let mut branch = self
            .branch_by_id(branch_id)
            .ok_or_else(|| format!("branch {branch_id} not found"))?
            .clone();
        branch.name = name;
        self.begin_mutation();
        spawn_mutation(services, services.api().update_branch(branch));

        Ok(())
    }

    /// Deletes a branch by id.
    pub(crate) fn delete_branch(&mut self, services: &AppServices, branch_id: i64) {
        self.begin_mutation();
        spawn_mutation(services, services.api().delete_branch(branch_id));
    }

    /// Creates an empty property file under a branch.
    pub(crate) fn create_file(&mut self, services: &AppServices, branch_id: i64, file_name: String) {
        self.begin_mutation();
        spawn_mutation(
            services,
            services.api().create_property(NewProperty {
                file_name,
                content: String::new(),
                branch: BranchRef { id: branch_id },
            }),
        );
    }

    /// Renames a property file, keeping its content and branch reference.
    ///
    /// # Errors
    /// Returns an error if the property is not in the loaded collection.
    pub(crate) fn rename_file(
        &mut self,
        services: &AppServices,
        property_id: i64,
        file_name: String,
    ) -> Result<(), String> {
        let mut property = self
            .property_by_id(property_id)
            .ok_or_else(|| format!("file {property_id} not found"))?
            .clone();
        property.file_name = file_name;
        self.begin_mutation();
        spawn_mutation(services, services.api().update_property(property));

        Ok(())
    }

    /// Deletes a property file by id.
    pub(crate) fn delete_file(&mut self, services: &AppServices, property_id: i64) {
        self.begin_mutation();
        spawn_mutation(services, services.api().delete_property(property_id));
    }

    /// Persists edited file content as a full-entity update.
    ///
    /// The branch reference is reconstructed as a stub from the raw
    /// collection row; completion is reported through the dedicated save
    /// events so the editor can track its pending state.
    ///
    /// # Errors
    /// Returns an error if the property is not in the loaded collection.
    pub(crate) fn save_file(
        &mut self,
        services: &AppServices,
        property_id: i64,
        file_name: String,
        content: String,
    ) -> Result<(), String> {
        let branch_id = self
            .property_by_id(property_id)
            .map(|property| property.branch.id)
            .ok_or_else(|| format!("file {property_id} not found"))?;
        let property = Property {
            id: property_id,
            file_name,
            content: Some(content),
            branch: BranchRef { id: branch_id },
            audit: Audit::default(),
        };

        let event_tx = services.event_sender();
        let operation = services.api().update_property(property);
        tokio::spawn(async move {
            let event = match operation.await {
                Ok(response) => AppEvent::SaveSucceeded {
                    message: response.message,
                },
                Err(error) => {
                    warn!(%error, "file save failed");

                    AppEvent::SaveFailed {
                        error: error.to_string(),
                    }
                }
            };
            let _ = event_tx.send(event);
        });

        Ok(())
    }

    /// Looks up a project row by id.
    pub fn project_by_id(&self, project_id: i64) -> Option<&Project> {
        self.projects
            .as_deref()?
            .iter()
            .find(|project| project.id == project_id)
    }

    /// Looks up a branch row by id.
    pub fn branch_by_id(&self, branch_id: i64) -> Option<&Branch> {
        self.branches
            .as_deref()?
            .iter()
            .find(|branch| branch.id == branch_id)
    }

    /// Looks up a property row by id.
    pub fn property_by_id(&self, property_id: i64) -> Option<&Property> {
        self.properties
            .as_deref()?
            .iter()
            .find(|property| property.id == property_id)
    }

    fn begin_mutation(&mut self) {
        self.mutation_notice = None;
        self.mutation_error = None;
    }
}

/// Runs one mutation request in the background and reports its outcome on
/// the event bus. Failures do not trigger invalidation and are never
/// retried.
fn spawn_mutation(services: &AppServices, operation: ApiFuture<ResponseMessage>) {
    let event_tx = services.event_sender();
    tokio::spawn(async move {
        let event = match operation.await {
            Ok(response) => AppEvent::MutationSucceeded {
                message: response.message,
            },
            Err(error) => {
                warn!(%error, "mutation failed");

                AppEvent::MutationFailed {
                    error: error.to_string(),
                }
            }
        };
        let _ = event_tx.send(event);
    });
}
