use actix_web::{HttpResponse, Responder, get, web};
use log::{error, info};

use super::models::{AppState, ErrorResponse, MineResponse};
use crate::error::NodeError;

/// Get the full blockchain. Peers consume this during consensus.
#[get("/chain")]
pub async fn get_chain(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(state.node.chain())
}

/// Mine a new block from the pending buffer:
/// - Search for the next proof on the blocking pool (no ledger lock held)
/// - Queue the mining reward for this node
/// - Seal the block, unless the chain changed meanwhile
#[get("/mine")]
pub async fn mine_block(state: web::Data<AppState>) -> impl Responder {
    let worker = state.clone();
    match web::block(move || worker.node.mine()).await {
        Ok(Ok(block)) => {
            info!("GET /mine - forged block #{}", block.index);
            HttpResponse::Ok().json(MineResponse::from(block))
        }
        Ok(Err(e @ NodeError::MiningSuperseded)) => {
            HttpResponse::Conflict().json(ErrorResponse {
                error: e.to_string(),
            })
        }
        Ok(Err(e)) => HttpResponse::InternalServerError().json(ErrorResponse {
            error: e.to_string(),
        }),
        Err(e) => {
            error!("GET /mine - mining worker failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "mining worker failed".to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use serde_json::Value;

    use crate::api::{AppState, init_routes};
    use crate::blockchain::{digest, is_valid_chain};
    use crate::network::ChainResponse;

    #[actix_web::test]
    async fn chain_serves_wire_format() {
        let state = web::Data::new(AppState::default());
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .configure(init_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/chain").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["length"], 1);
        let genesis = &body["chain"][0];
        assert_eq!(genesis["index"], 1);
        assert_eq!(genesis["proof"], 100);
        assert_eq!(genesis["previous_hash"], "1");
        assert!(genesis["transactions"].as_array().unwrap().is_empty());
        assert!(genesis["timestamp"].is_i64());
    }

    #[actix_web::test]
    async fn mine_forges_a_rewarded_block() {
        let state = web::Data::new(AppState::default());
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .configure(init_routes),
        )
        .await;
        let genesis = state.node.chain().chain[0].clone();

        let req = test::TestRequest::get().uri("/mine").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["message"], "New Block Forged");
        assert_eq!(body["index"], 2);
        assert_eq!(body["previous_hash"], digest(&genesis));
        assert_eq!(body["transactions"][0]["sender"], "0");
        assert_eq!(body["transactions"][0]["recipient"], state.node.id());
        assert_eq!(body["transactions"][0]["amount"], 1);

        let req = test::TestRequest::get().uri("/chain").to_request();
        let chain: ChainResponse = test::call_and_read_body_json(&app, req).await;
        assert_eq!(chain.length, 2);
        assert!(is_valid_chain(&chain.chain));
    }
}
