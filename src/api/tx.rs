use actix_web::{HttpResponse, Responder, post, web};
use log::warn;

use super::models::{AppState, ErrorResponse, NewTxRequest, NewTxResponse};

/// Queue a transaction for the next mined block.
#[post("/transactions/new")]
pub async fn post_transaction(
    state: web::Data<AppState>,
    body: web::Json<NewTxRequest>,
) -> impl Responder {
    let NewTxRequest {
        sender,
        recipient,
        amount,
    } = body.into_inner();

    let (sender, recipient, amount) = match (sender, recipient, amount) {
        (Some(s), Some(r), Some(a)) => (s, r, a),
        (s, r, a) => {
            let missing: Vec<&str> = [
                ("sender", s.is_none()),
                ("recipient", r.is_none()),
                ("amount", a.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();
            warn!("POST /transactions/new - rejected: missing {:?}", missing);
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: format!("missing values: {}", missing.join(", ")),
            });
        }
    };

    let index = state.node.submit_transaction(&sender, &recipient, amount);
    HttpResponse::Created().json(NewTxResponse {
        message: format!("Transaction will be added to Block {index}"),
        index,
    })
}
