use actix_web::{HttpResponse, Responder, get, post, web};
use log::{error, warn};

use super::models::{
    AppState, ErrorResponse, RegisterNodesRequest, RegisterNodesResponse, ResolveResponse,
};
use crate::network::HttpPeerClient;

/// Register a list of peer nodes (URLs or `host:port`).
#[post("/nodes/register")]
pub async fn register_nodes(
    state: web::Data<AppState>,
    body: web::Json<RegisterNodesRequest>,
) -> impl Responder {
    let Some(nodes) = body.into_inner().nodes else {
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Please supply a valid list of nodes".to_string(),
        });
    };

    match state.node.register_nodes(nodes.as_slice()) {
        Ok(total_nodes) => HttpResponse::Created().json(RegisterNodesResponse {
            message: "New nodes have been added",
            total_nodes,
        }),
        Err(e) => {
            warn!("POST /nodes/register - rejected: {}", e);
            HttpResponse::BadRequest().json(ErrorResponse {
                error: e.to_string(),
            })
        }
    }
}

/// Run the longest-chain consensus against every registered peer.
#[get("/nodes/resolve")]
pub async fn resolve_conflicts(state: web::Data<AppState>) -> impl Responder {
    run_consensus(&state, "/nodes/resolve").await
}

/// Same as `/nodes/resolve`, under the path older nodes call.
#[get("/nodes/consensus")]
pub async fn consensus(state: web::Data<AppState>) -> impl Responder {
    run_consensus(&state, "/nodes/consensus").await
}

async fn run_consensus(state: &AppState, route: &str) -> HttpResponse {
    let config = state.settings.consensus;
    let client = HttpPeerClient::new(config.peer_timeout);

    match state.node.resolve_conflicts(&client, &config).await {
        Ok(resolution) => HttpResponse::Ok().json(ResolveResponse {
            message: if resolution.replaced {
                "Our chain was replaced"
            } else {
                "Our chain is authoritative"
            },
            replaced: resolution.replaced,
            chain: resolution.chain,
        }),
        Err(e) => {
            error!("GET {} - failed: {}", route, e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: e.to_string(),
            })
        }
    }
}
