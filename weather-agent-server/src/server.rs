use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;

use a2a_protocol::{AgentCard, AGENT_CARD_PATH};
use weather_agent::WeatherTaskManager;

use crate::routes::{create_routes, ServerState};

/// A2A protocol server for the weather agent.
pub struct A2AServer {
    task_manager: Arc<WeatherTaskManager>,
    agent_card: AgentCard,
}

impl A2AServer {
    /// Creates a server serving the given agent card and task manager.
    pub fn new(agent_card: AgentCard, task_manager: WeatherTaskManager) -> Self {
        Self {
            task_manager: Arc::new(task_manager),
            agent_card,
        }
    }

    /// Convert the server into an Axum router.
    pub fn into_router(self) -> Router {
        let state = ServerState {
            task_manager: self.task_manager,
            agent_card: self.agent_card,
        };

        create_routes(state).layer(CorsLayer::permissive())
    }

    /// Run the server on the specified address.
    pub async fn serve(self, addr: impl tokio::net::ToSocketAddrs) -> Result<(), std::io::Error> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        let local_addr = listener.local_addr()?;

        self.display_server_info(&local_addr);

        let app = self.into_router();
        axum::serve(listener, app).await
    }

    /// Display server startup information including agent card details.
    fn display_server_info(&self, local_addr: &std::net::SocketAddr) {
        tracing::info!("🚀 A2A Server Starting");
        tracing::info!("📡 Server listening at: http://{}", local_addr);
        tracing::info!(
            "🤖 Agent: {} ({})",
            self.agent_card.name,
            self.agent_card.description.as_deref().unwrap_or("no description")
        );
        tracing::info!(
            "📋 Agent Card available at: http://{}{}",
            local_addr,
            AGENT_CARD_PATH
        );
        for skill in &self.agent_card.skills {
            tracing::info!("  • {} ({})", skill.name, skill.id);
        }
    }
}
