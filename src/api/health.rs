use actix_web::{HttpResponse, Responder, get, web};

use super::models::{AppState, HealthResponse};

#[get("/health")]
pub async fn health_check(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        node_id: state.node.id().to_string(),
        height: state.node.height(),
    })
}

#[cfg(test)]
mod tests {
    use actix_web::{App, test, web};
    use serde_json::Value;

    use crate::api::{AppState, init_routes};
    use crate::config::Settings;

    #[actix_web::test]
    async fn reports_node_id_and_height() {
        let settings = Settings {
            node_id: Some("node-under-test".into()),
            ..Settings::default()
        };
        let state = web::Data::new(AppState::new(settings));
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .configure(init_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["node_id"], "node-under-test");
        assert_eq!(body["height"], 1);
    }
}
