/*
[INPUT]:  Backend URL and bearer token from the environment
[OUTPUT]: Connector list, one connector's health and its correlation rules
[POS]:    Examples - token-authenticated connector walkthrough
[UPDATE]: When connector or correlation APIs change
*/

use idgov_adapter::*;

/// Example: server-side connector inspection
///
/// Set IDGOV_BASE_URL, IDGOV_TOKEN and optionally IDGOV_TENANT_ID.
#[tokio::main]
async fn main() {
    println!("=== Connector Example ===\n");

    let base_url =
        std::env::var("IDGOV_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let Ok(token) = std::env::var("IDGOV_TOKEN") else {
        eprintln!("IDGOV_TOKEN is not set");
        return;
    };

    let mut credentials = Credentials::new(token);
    if let Ok(tenant_id) = std::env::var("IDGOV_TENANT_ID") {
        credentials = credentials.with_tenant(tenant_id);
    }

    let client = match GovernanceClient::with_base_url(&base_url) {
        Ok(c) => c.with_auth(AuthMode::Bearer(credentials)),
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };
    println!("✓ Client created for {}", base_url);

    let page = match client.list_connectors(&ConnectorFilter::default()).await {
        Ok(page) => page,
        Err(e) => {
            eprintln!("Failed to list connectors: {}", e);
            return;
        }
    };
    println!("✓ {} connectors (showing {})", page.total, page.items.len());
    for connector in &page.items {
        println!("  - {} [{:?}] {:?}", connector.name, connector.connector_type, connector.status);
    }

    let Some(first) = page.items.first() else {
        println!("\nNo connectors to inspect");
        return;
    };

    match client.get_connector_health(&first.id).await {
        Ok(health) => println!("\n✓ Health of {}: {:?}", first.name, health.status),
        Err(e) => println!("\n✗ Health unavailable: {}", e),
    }

    let filter = CorrelationRuleFilter {
        is_active: Some(true),
        ..Default::default()
    };
    match client.fetch_correlation_rules(&first.id, &filter).await {
        Ok(rules) => {
            println!("✓ {} active correlation rules", rules.total);
            for rule in rules.items {
                println!("  - {} ({} -> {})", rule.name, rule.source_attribute, rule.target_attribute);
            }
        }
        Err(e) => println!("✗ Failed to fetch correlation rules: {}", e),
    }

    println!("\n✓ Connector example complete");
}
