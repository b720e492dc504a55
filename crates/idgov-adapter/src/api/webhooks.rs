/*
[INPUT]:  Webhook subscription/delivery identifiers, filters and payloads
[OUTPUT]: Webhook subscriptions, deliveries and the event type catalog
[POS]:    API layer - webhook endpoints
[UPDATE]: When adding webhook endpoints or changing payloads
*/

use reqwest::Method;

use crate::http::{GovernanceClient, Result, build_query, encode_segment};
use crate::types::{
    CreateWebhookSubscription, DataPage, DeliveryFilter, UpdateWebhookSubscription,
    WebhookDelivery, WebhookEventType, WebhookFilter, WebhookSubscription,
};

const WEBHOOKS_PATH: &str = "/api/webhooks";
const SUBSCRIPTIONS_PATH: &str = "/api/webhooks/subscriptions";

fn subscription_path(id: &str) -> String {
    format!("{SUBSCRIPTIONS_PATH}/{}", encode_segment(id))
}

impl GovernanceClient {
    /// GET /api/webhooks/subscriptions?enabled=&event_type=&limit=&offset=
    pub async fn list_webhook_subscriptions(
        &self,
        filter: &WebhookFilter,
    ) -> Result<DataPage<WebhookSubscription>> {
        let endpoint = format!("{SUBSCRIPTIONS_PATH}{}", build_query(filter)?);
        let request = self.request(Method::GET, &endpoint, "fetch webhook subscriptions");
        self.send_json(request).await
    }

    pub async fn get_webhook_subscription(&self, id: &str) -> Result<WebhookSubscription> {
        let request = self.request(
            Method::GET,
            &subscription_path(id),
            "fetch webhook subscription",
        );
        self.send_json(request).await
    }

    pub async fn create_webhook_subscription(
        &self,
        body: &CreateWebhookSubscription,
    ) -> Result<WebhookSubscription> {
        let request = self
            .request(Method::POST, SUBSCRIPTIONS_PATH, "create webhook subscription")
            .json(body)?;
        self.send_json(request).await
    }

    /// PATCH /api/webhooks/subscriptions/{id}
    pub async fn update_webhook_subscription(
        &self,
        id: &str,
        body: &UpdateWebhookSubscription,
    ) -> Result<WebhookSubscription> {
        let request = self
            .request(
                Method::PATCH,
                &subscription_path(id),
                "update webhook subscription",
            )
            .json(body)?;
        self.send_json(request).await
    }

    pub async fn delete_webhook_subscription(&self, id: &str) -> Result<()> {
        let request = self.request(
            Method::DELETE,
            &subscription_path(id),
            "delete webhook subscription",
        );
        self.send_empty(request).await
    }

    pub async fn enable_webhook_subscription(
        &self,
        id: &str,
    ) -> Result<Option<WebhookSubscription>> {
        let endpoint = format!("{}/enable", subscription_path(id));
        let request = self.request(Method::POST, &endpoint, "enable webhook subscription");
        self.send_action(request).await
    }

    pub async fn disable_webhook_subscription(
        &self,
        id: &str,
    ) -> Result<Option<WebhookSubscription>> {
        let endpoint = format!("{}/disable", subscription_path(id));
        let request = self.request(Method::POST, &endpoint, "disable webhook subscription");
        self.send_action(request).await
    }

    /// GET /api/webhooks/subscriptions/{id}/deliveries?status=&event_type=&limit=&offset=
    pub async fn list_webhook_deliveries(
        &self,
        subscription_id: &str,
        filter: &DeliveryFilter,
    ) -> Result<DataPage<WebhookDelivery>> {
        let endpoint = format!(
            "{}/deliveries{}",
            subscription_path(subscription_id),
            build_query(filter)?
        );
        let request = self.request(Method::GET, &endpoint, "fetch webhook deliveries");
        self.send_json(request).await
    }

    /// POST /api/webhooks/subscriptions/{id}/deliveries/{delivery_id}/retry
    pub async fn retry_webhook_delivery(
        &self,
        subscription_id: &str,
        delivery_id: &str,
    ) -> Result<Option<WebhookDelivery>> {
        let endpoint = format!(
            "{}/deliveries/{}/retry",
            subscription_path(subscription_id),
            encode_segment(delivery_id)
        );
        let request = self.request(Method::POST, &endpoint, "retry webhook delivery");
        self.send_action(request).await
    }

    /// GET /api/webhooks/event-types
    pub async fn list_webhook_event_types(&self) -> Result<Vec<WebhookEventType>> {
        let endpoint = format!("{WEBHOOKS_PATH}/event-types");
        let request = self.request(Method::GET, &endpoint, "fetch webhook event types");
        self.send_json(request).await
    }
}
