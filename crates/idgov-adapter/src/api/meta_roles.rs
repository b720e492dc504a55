/*
[INPUT]:  Meta-role identifiers, filters and payloads
[OUTPUT]: Meta-roles, simulations and inheritance records
[POS]:    API layer - governance meta-role endpoints
[UPDATE]: When adding meta-role endpoints or changing payloads
*/

use reqwest::Method;

use crate::http::{GovernanceClient, Result, build_query, encode_segment};
use crate::types::{
    CreateMetaRole, MetaRole, MetaRoleFilter, MetaRoleInheritance, MetaRoleSimulation,
    PageParams, Paginated, UpdateMetaRole,
};

const META_ROLES_PATH: &str = "/api/governance/meta-roles";

fn meta_role_path(id: &str) -> String {
    format!("{META_ROLES_PATH}/{}", encode_segment(id))
}

impl GovernanceClient {
    /// GET /api/governance/meta-roles?status=&name=&limit=&offset=
    pub async fn list_meta_roles(&self, filter: &MetaRoleFilter) -> Result<Paginated<MetaRole>> {
        let endpoint = format!("{META_ROLES_PATH}{}", build_query(filter)?);
        let request = self.request(Method::GET, &endpoint, "fetch meta-roles");
        self.send_json(request).await
    }

    pub async fn get_meta_role(&self, id: &str) -> Result<MetaRole> {
        let request = self.request(Method::GET, &meta_role_path(id), "fetch meta-role");
        self.send_json(request).await
    }

    pub async fn create_meta_role(&self, body: &CreateMetaRole) -> Result<MetaRole> {
        let request = self
            .request(Method::POST, META_ROLES_PATH, "create meta-role")
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn update_meta_role(&self, id: &str, body: &UpdateMetaRole) -> Result<MetaRole> {
        let request = self
            .request(Method::PUT, &meta_role_path(id), "update meta-role")
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn delete_meta_role(&self, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &meta_role_path(id), "delete meta-role");
        self.send_empty(request).await
    }

    pub async fn enable_meta_role(&self, id: &str) -> Result<Option<MetaRole>> {
        let endpoint = format!("{}/enable", meta_role_path(id));
        let request = self.request(Method::POST, &endpoint, "enable meta-role");
        self.send_action(request).await
    }

    pub async fn disable_meta_role(&self, id: &str) -> Result<Option<MetaRole>> {
        let endpoint = format!("{}/disable", meta_role_path(id));
        let request = self.request(Method::POST, &endpoint, "disable meta-role");
        self.send_action(request).await
    }

    /// Preview which roles the criteria would pick up without applying them
    ///
    /// POST /api/governance/meta-roles/{id}/simulate
    pub async fn simulate_meta_role(&self, id: &str) -> Result<Option<MetaRoleSimulation>> {
        let endpoint = format!("{}/simulate", meta_role_path(id));
        let request = self.request(Method::POST, &endpoint, "simulate meta-role");
        self.send_action(request).await
    }

    /// GET /api/governance/meta-roles/{id}/inheritances?limit=&offset=
    pub async fn list_meta_role_inheritances(
        &self,
        id: &str,
        page: &PageParams,
    ) -> Result<Paginated<MetaRoleInheritance>> {
        let endpoint = format!("{}/inheritances{}", meta_role_path(id), build_query(page)?);
        let request = self.request(Method::GET, &endpoint, "fetch meta-role inheritances");
        self.send_json(request).await
    }
}
