/*
[INPUT]:  User identifiers and filters
[OUTPUT]: Admin user records and the current caller
[POS]:    API layer - admin user endpoints
[UPDATE]: When adding user endpoints or changing payloads
*/

use reqwest::Method;

use crate::http::{GovernanceClient, Result, build_query, encode_segment};
use crate::types::{CurrentUser, Paginated, User, UserFilter};

const USERS_PATH: &str = "/api/admin/users";

impl GovernanceClient {
    /// GET /api/admin/users?search=&is_active=&role=&limit=&offset=
    pub async fn list_users(&self, filter: &UserFilter) -> Result<Paginated<User>> {
        let endpoint = format!("{USERS_PATH}{}", build_query(filter)?);
        let request = self.request(Method::GET, &endpoint, "fetch users");
        self.send_json(request).await
    }

    /// GET /api/admin/users/{id}
    pub async fn get_user(&self, id: &str) -> Result<User> {
        let endpoint = format!("{USERS_PATH}/{}", encode_segment(id));
        let request = self.request(Method::GET, &endpoint, "fetch user");
        self.send_json(request).await
    }

    /// Resolve whoever the current credentials belong to
    ///
    /// GET /api/admin/users/me
    pub async fn get_current_user(&self) -> Result<CurrentUser> {
        let endpoint = format!("{USERS_PATH}/me");
        let request = self.request(Method::GET, &endpoint, "fetch current user");
        self.send_json(request).await
    }
}
