//! Interactive login demo: prints the authorization URL, reads the code
//! pasted back from the redirect, then resolves the federated identity.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use mcid_broker::{ConfigOverrides, LoginContext, MinecraftIdentityProvider, ProviderConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let stored = ProviderConfig {
        client_id: String::new(),
        client_secret: String::new(),
        redirect_uri: "https://localhost/callback".to_string(),
    };
    let config = stored.resolve(&ConfigOverrides::from_env());
    if config.client_id.is_empty() {
        anyhow::bail!("set MINECRAFT_IDP_CLIENT_ID and MINECRAFT_IDP_CLIENT_SECRET");
    }

    let provider = MinecraftIdentityProvider::new(config)?;
    println!("Open this URL and sign in:");
    println!("{}", provider.authorization_url(None)?);
    print!("Paste the code from the redirect: ");
    io::stdout().flush()?;

    let mut code = String::new();
    io::stdin().lock().read_line(&mut code)?;
    let code = code.trim();

    let tokens = provider
        .exchange_code(code)
        .await
        .context("authorization code exchange failed")?;
    let identity = provider
        .resolve_identity(&tokens.access_token, &LoginContext::default())
        .await
        .context("identity resolution failed")?;

    println!("Resolved {} identity: {} ({})", identity.edition.as_str(), identity.username, identity.id);
    for (key, value) in &identity.attributes {
        println!("  {key} = {value}");
    }
    Ok(())
}
