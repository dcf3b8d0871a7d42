//! Authorize Request — build a request URL, then parse the callback.
//!
//! Run with:
//!   cargo run --example authorize_request -p oauth-identity-core

use oauth_identity_core::querystring::{append_parameters, parse_query, QueryParameterSet};
use url::Url;

fn main() {
    // ── 1. Build the authorization request URL ──────────────────────────────
    //
    // Protocol parameters are appended to the endpoint's query component
    // in insertion order; repeated names produce repeated pairs.
    let authorize =
        Url::parse("https://idp.example.com/connect/authorize").expect("endpoint should parse");

    let mut request = QueryParameterSet::new();
    request.append("client_id", "web-app");
    request.append("response_type", "code");
    request.append("scope", "openid");
    request.append("scope", "profile");
    request.append("redirect_uri", "https://client.example.com/signin-oidc");
    request.append("state", "af0ifjsldkj");

    let request_uri = append_parameters(&authorize, &request);
    println!("Authorization request:");
    println!("  {request_uri}");
    println!();

    // ── 2. Parse the callback query ─────────────────────────────────────────
    //
    // The provider redirects back with the code and state. Both '&' and
    // the legacy ';' separator are accepted; malformed fragments are
    // dropped rather than rejected.
    let callback = "?code=SplxlOBeZQQYbYS6WxSbIA&state=af0ifjsldkj;session_state";
    let parameters = parse_query(callback);

    println!("Callback parameters:");
    for (name, values) in parameters.iter() {
        if values.is_empty() {
            println!("  {name} (flag)");
        } else {
            for value in values {
                println!("  {name} = {value:?}");
            }
        }
    }
}
