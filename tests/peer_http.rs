//! Two nodes talking real HTTP: one serves `/chain`, the other resolves
//! against it through `HttpPeerClient`.

use actix_web::{App, HttpServer, test, web};
use serde_json::{Number, Value};
use std::time::Duration;

use pow_ledger::api::{AppState, init_routes};
use pow_ledger::blockchain::is_valid_chain;
use pow_ledger::config::Settings;
use pow_ledger::network::{ConsensusConfig, HttpPeerClient, PeerClient};

/// Serve `state` on an ephemeral local port and return `host:port`.
fn serve(state: web::Data<AppState>) -> std::io::Result<String> {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .configure(init_routes)
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))?;
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());
    Ok(addr.to_string())
}

fn settings() -> Settings {
    Settings {
        consensus: ConsensusConfig {
            peer_timeout: Duration::from_secs(5),
            max_in_flight: 2,
        },
        ..Settings::default()
    }
}

#[actix_web::test]
async fn http_client_reads_a_peer_chain() {
    let peer = web::Data::new(AppState::new(settings()));
    peer.node.submit_transaction("A", "B", Number::from_f64(0.25).unwrap());
    peer.node.mine().unwrap();
    let addr = serve(peer.clone()).unwrap();

    let reply = HttpPeerClient::new(Duration::from_secs(5))
        .fetch_chain(&addr)
        .await
        .unwrap();

    assert_eq!(reply.length, 2);
    assert_eq!(reply.chain[1].transactions[0].amount.as_f64(), Some(0.25));
    assert_eq!(reply, peer.node.chain());
    assert!(is_valid_chain(&reply.chain));
}

#[actix_web::test]
async fn shorter_node_adopts_chain_over_http() {
    let longer = web::Data::new(AppState::new(settings()));
    for _ in 0..3 {
        longer.node.mine().unwrap();
    }
    let longer_addr = serve(longer.clone()).unwrap();

    let shorter = web::Data::new(AppState::new(settings()));
    let app = test::init_service(
        App::new()
            .app_data(shorter.clone())
            .configure(init_routes),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/nodes/register")
        .set_json(serde_json::json!({ "nodes": [format!("http://{longer_addr}")] }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let req = test::TestRequest::get().uri("/nodes/resolve").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["replaced"], true);
    assert_eq!(body["chain"].as_array().unwrap().len(), 4);
    assert_eq!(shorter.node.chain(), longer.node.chain());
    assert!(is_valid_chain(&shorter.node.chain().chain));
}
