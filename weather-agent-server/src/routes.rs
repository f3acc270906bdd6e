use axum::{
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response, Sse},
    routing::{get, post},
    Json, Router,
};
use futures::StreamExt;
use serde::de::DeserializeOwned;
use std::{convert::Infallible, sync::Arc, time::Duration};

use a2a_protocol::{
    AgentCard, TaskIdParams, TaskQueryParams, TaskSendParams, AGENT_CARD_PATH, METHOD_CANCEL_TASK,
    METHOD_GET_TASK, METHOD_SEND_TASK, METHOD_SEND_TASK_SUBSCRIBE,
};
use weather_agent::{TaskSubscription, WeatherTaskManager};

use crate::{
    error::{Error, Result},
    json_rpc::{self, JsonRpcRequest},
};

/// State shared across all routes.
#[derive(Clone)]
pub struct ServerState {
    pub task_manager: Arc<WeatherTaskManager>,
    pub agent_card: AgentCard,
}

/// Create the A2A protocol routes: the JSON-RPC endpoint and the agent card
/// discovery document.
pub fn create_routes(state: ServerState) -> Router {
    Router::new()
        .route("/", post(rpc_handler))
        .route(AGENT_CARD_PATH, get(agent_card))
        .with_state(state)
}

/// Single JSON-RPC endpoint dispatching on the `method` field.
async fn rpc_handler(State(state): State<ServerState>, body: Bytes) -> Result<Response> {
    let value: serde_json::Value = serde_json::from_slice(&body)?;
    let request: JsonRpcRequest =
        serde_json::from_value(value).map_err(|e| Error::InvalidRequest(e.to_string()))?;
    json_rpc::validate_request(&request)?;

    let request_id = request.id.clone();
    match request.method.as_str() {
        METHOD_SEND_TASK => {
            let params: TaskSendParams = parse_params(request.params)?;
            let response = state.task_manager.on_send_task(request_id, params).await;
            Ok(Json(response).into_response())
        }
        METHOD_SEND_TASK_SUBSCRIBE => {
            let params: TaskSendParams = parse_params(request.params)?;
            match state
                .task_manager
                .on_send_task_subscribe(request_id, params)
                .await
            {
                TaskSubscription::Events(events) => {
                    let sse_stream = events.map(|response| {
                        Ok::<_, Infallible>(
                            axum::response::sse::Event::default()
                                .data(serde_json::to_string(&response).unwrap_or_default()),
                        )
                    });

                    Ok(Sse::new(sse_stream)
                        .keep_alive(
                            axum::response::sse::KeepAlive::new()
                                .interval(Duration::from_secs(30))
                                .text("keep-alive"),
                        )
                        .into_response())
                }
                TaskSubscription::Rejected(response) => Ok(Json(*response).into_response()),
            }
        }
        METHOD_GET_TASK => {
            let params: TaskQueryParams = parse_params(request.params)?;
            let response = state.task_manager.on_get_task(request_id, params).await;
            Ok(Json(response).into_response())
        }
        METHOD_CANCEL_TASK => {
            let params: TaskIdParams = parse_params(request.params)?;
            let response = state.task_manager.on_cancel_task(request_id, params).await;
            Ok(Json(response).into_response())
        }
        other => Err(Error::MethodNotFound(other.to_string())),
    }
}

fn parse_params<T: DeserializeOwned>(params: Option<serde_json::Value>) -> Result<T> {
    let params = params.ok_or_else(|| Error::InvalidParams("Missing params".to_string()))?;
    serde_json::from_value(params).map_err(|e| Error::InvalidParams(e.to_string()))
}

/// Handler for the public agent card.
async fn agent_card(State(state): State<ServerState>) -> Json<AgentCard> {
    Json(state.agent_card.clone())
}
