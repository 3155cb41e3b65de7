use std::sync::Arc;

use ipl_strategist::{
    app_config_from_env, dashboard_router, init_logging, log_app_bind, log_app_start,
    log_session_ready, SessionStandings, TeamRegistry,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = app_config_from_env();
    init_logging(&config.logging)?;
    log_app_start(&config.logging);

    let registry = Arc::new(TeamRegistry::season_2026());
    log_session_ready(registry.teams().len(), registry.venues().count());

    let app = dashboard_router(registry, SessionStandings::default());
    let listener = tokio::net::TcpListener::bind(config.dashboard_addr).await?;
    let bound_addr = listener.local_addr()?;

    log_app_bind(bound_addr);
    axum::serve(listener, app).await?;

    Ok(())
}
