//! Token issuance tool
//!
//! Mints a session token for local environments:
//!
//! ```text
//! token-service <subject> <role-id>
//! ```
//!
//! The secret, issuer, audience and lifetime come from the same configuration
//! sources as the server.

use anyhow::{bail, Context};
use records_api::{
    application::roles, config::AppConfig, domain::routing::RoleId,
    infrastructure::adapters::AuthenticationAdapter,
};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(subject), Some(role)) = (args.next(), args.next()) else {
        bail!("usage: token-service <subject> <role-id>");
    };

    let role = RoleId(
        role.parse::<u32>()
            .with_context(|| format!("role id must be a number, got `{}`", role))?,
    );
    if roles::name(role).is_none() {
        bail!("unknown role id {}", role);
    }

    let config = AppConfig::load().context("failed to load configuration")?;
    let token = AuthenticationAdapter::new(config.security.jwt)
        .issue_token(&subject, role)
        .context("failed to issue token")?;

    println!("{}", token);
    Ok(())
}
