use std::sync::Arc;

mod domain;
mod interfaces;
mod infrastructure;
pub mod errors;
pub mod settings;
pub mod graceful_shutdown;
pub mod shared_repos;

pub use domain::{entities, use_cases};
pub use interfaces::{handlers, repositories, routes};
pub use infrastructure::{db, mail};

use repositories::{
    contact_message::ContactRepository, project::ProjectRepository, skill::SkillRepository,
};
use shared_repos::SharedRepositories;
use use_cases::{
    contact::ContactHandler, notification::ContactNotifier, project::ProjectHandler,
    skill::SkillHandler,
};

pub struct AppState {
    pub project_handler: ProjectHandler,
    pub skill_handler: SkillHandler,
    pub contact_handler: ContactHandler,
}

impl AppState {
    pub fn new(repos: SharedRepositories, notifier: ContactNotifier) -> Self {
        Self::from_parts(
            Arc::new(repos.project_repo),
            Arc::new(repos.skill_repo),
            Arc::new(repos.contact_repo),
            notifier,
        )
    }

    /// Wires the handlers over arbitrary repository implementations.
    pub fn from_parts(
        project_repo: Arc<dyn ProjectRepository>,
        skill_repo: Arc<dyn SkillRepository>,
        contact_repo: Arc<dyn ContactRepository>,
        notifier: ContactNotifier,
    ) -> Self {
        AppState {
            project_handler: ProjectHandler::new(project_repo),
            skill_handler: SkillHandler::new(skill_repo),
            contact_handler: ContactHandler::new(contact_repo, notifier),
        }
    }
}
