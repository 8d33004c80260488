use crate::models::Project;

use super::{ApiClient, ApiError};

const PROJECTS_PATH: &str = "/api/projects";

impl ApiClient {
    /// Fetch all projects owned by the current user
    pub async fn fetch_projects(&self, token: &str) -> Result<Vec<Project>, ApiError> {
        self.get_json(PROJECTS_PATH, &[], Some(token)).await
    }

    /// Fetch a single project. A missing project yields `ApiError::NotFound`.
    pub async fn fetch_project(&self, token: &str, id: &str) -> Result<Project, ApiError> {
        let path = format!("{}/{}", PROJECTS_PATH, Self::segment(id));
        self.get_json(&path, &[], Some(token)).await
    }
}
