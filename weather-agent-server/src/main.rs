//! Entry point for the A2A weather agent server.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use a2a_protocol::{AgentCapabilities, AgentCard, AgentSkill};
use weather_agent::{WeatherAgent, WeatherTaskManager};
use weather_agent_server::A2AServer;

#[derive(Debug, Parser)]
#[command(name = "weather-agent-server", about = "Start the A2A Weather Agent server")]
struct Cli {
    /// Host to bind the server to
    #[arg(long, default_value = "localhost")]
    host: String,

    /// Port to run the server on
    #[arg(long, default_value_t = 10000)]
    port: u16,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    if let Err(error) = run(cli).await {
        tracing::error!(%error, "An error occurred during server startup");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    // Fails fast when OPENAI_API_KEY is unset or empty.
    let agent = WeatherAgent::from_env()?;

    let agent_card = build_agent_card(&cli.host, cli.port);
    let task_manager = WeatherTaskManager::new(agent);
    let server = A2AServer::new(agent_card, task_manager);

    server.serve((cli.host.as_str(), cli.port)).await?;
    Ok(())
}

fn build_agent_card(host: &str, port: u16) -> AgentCard {
    let content_types: Vec<String> = WeatherAgent::SUPPORTED_CONTENT_TYPES
        .iter()
        .map(|mode| (*mode).to_string())
        .collect();

    AgentCard {
        name: "Weather Assistant".to_string(),
        description: Some(
            "An LLM-powered weather assistant that can provide current weather information."
                .to_string(),
        ),
        url: format!("http://{host}:{port}/"),
        provider: None,
        version: "1.0.0".to_string(),
        documentation_url: None,
        capabilities: AgentCapabilities {
            streaming: true,
            ..Default::default()
        },
        default_input_modes: content_types.clone(),
        default_output_modes: content_types,
        skills: vec![AgentSkill {
            id: "weather_information".to_string(),
            name: "Weather Information".to_string(),
            description: Some(
                "Provides current weather information for locations around the world.".to_string(),
            ),
            tags: vec!["weather".to_string(), "forecast".to_string()],
            examples: vec![
                "What's the weather like in New York?".to_string(),
                "Is it raining in London?".to_string(),
                "Temperature in Tokyo".to_string(),
                "How's the weather in Paris?".to_string(),
                "What's the humidity in Sydney?".to_string(),
            ],
            input_modes: Vec::new(),
            output_modes: Vec::new(),
        }],
    }
}
