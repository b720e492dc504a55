/*
[INPUT]:  Peer group identifiers, filters and payloads
[OUTPUT]: Peer groups, their members and refresh results
[POS]:    API layer - governance peer group endpoints
[UPDATE]: When adding peer group endpoints or changing payloads
*/

use reqwest::Method;

use crate::http::{GovernanceClient, Result, build_query, encode_segment};
use crate::types::{
    CreatePeerGroup, PageParams, Paginated, PeerGroup, PeerGroupFilter, PeerGroupMember,
    PeerGroupRefresh,
};

const PEER_GROUPS_PATH: &str = "/api/governance/peer-groups";

fn peer_group_path(id: &str) -> String {
    format!("{PEER_GROUPS_PATH}/{}", encode_segment(id))
}

impl GovernanceClient {
    /// GET /api/governance/peer-groups?group_type=&min_size=&limit=&offset=
    pub async fn list_peer_groups(&self, filter: &PeerGroupFilter) -> Result<Paginated<PeerGroup>> {
        let endpoint = format!("{PEER_GROUPS_PATH}{}", build_query(filter)?);
        let request = self.request(Method::GET, &endpoint, "fetch peer groups");
        self.send_json(request).await
    }

    pub async fn get_peer_group(&self, id: &str) -> Result<PeerGroup> {
        let request = self.request(Method::GET, &peer_group_path(id), "fetch peer group");
        self.send_json(request).await
    }

    pub async fn create_peer_group(&self, body: &CreatePeerGroup) -> Result<PeerGroup> {
        let request = self
            .request(Method::POST, PEER_GROUPS_PATH, "create peer group")
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn delete_peer_group(&self, id: &str) -> Result<()> {
        let request = self.request(Method::DELETE, &peer_group_path(id), "delete peer group");
        self.send_empty(request).await
    }

    /// Recompute membership from the grouping attribute
    ///
    /// POST /api/governance/peer-groups/{id}/refresh
    pub async fn refresh_peer_group(&self, id: &str) -> Result<Option<PeerGroupRefresh>> {
        let endpoint = format!("{}/refresh", peer_group_path(id));
        let request = self.request(Method::POST, &endpoint, "refresh peer group");
        self.send_action(request).await
    }

    /// GET /api/governance/peer-groups/{id}/members?limit=&offset=
    pub async fn list_peer_group_members(
        &self,
        id: &str,
        page: &PageParams,
    ) -> Result<Paginated<PeerGroupMember>> {
        let endpoint = format!("{}/members{}", peer_group_path(id), build_query(page)?);
        let request = self.request(Method::GET, &endpoint, "fetch peer group members");
        self.send_json(request).await
    }
}
