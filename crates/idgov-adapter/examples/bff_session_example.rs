/*
[INPUT]:  Backend URL, session cookie and a connector id from the environment
[OUTPUT]: Connector detail page data as JSON
[POS]:    Examples - route handler usage behind a same-origin session
[UPDATE]: When route handlers change
*/

use idgov_adapter::routes::connector_detail;
use idgov_adapter::*;

/// Example: render the connector detail page the way a BFF would
///
/// Set IDGOV_BASE_URL, IDGOV_COOKIE and IDGOV_CONNECTOR_ID.
#[tokio::main]
async fn main() {
    println!("=== BFF Session Example ===\n");

    let base_url =
        std::env::var("IDGOV_BASE_URL").unwrap_or_else(|_| "http://localhost:8080".to_string());
    let cookie = std::env::var("IDGOV_COOKIE").ok();
    let connector_id = std::env::var("IDGOV_CONNECTOR_ID").unwrap_or_else(|_| "conn-1".to_string());

    let client = match GovernanceClient::with_base_url(&base_url) {
        Ok(c) => c.with_auth(AuthMode::Session { cookie }),
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return;
        }
    };

    // The backend decides who the cookie belongs to
    let session = match client.get_current_user().await {
        Ok(user) => {
            println!("✓ Signed in as {}", user.email);
            Some(Session::from_current_user(&user))
        }
        Err(e) => {
            println!("✗ No session: {}", e);
            None
        }
    };

    match connector_detail::load(&client, session.as_ref(), &connector_id).await {
        Ok(page) => match serde_json::to_string_pretty(&page) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Failed to render page: {}", e),
        },
        Err(RouteError::Redirect { location }) => println!("→ redirect to {}", location),
        Err(RouteError::Http { status, message }) => println!("✗ {}: {}", status, message),
    }
}
