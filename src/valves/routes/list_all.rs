use actix_web::{get, web::Json};

use crate::{
    auth::access_token::AccessToken,
    db::DB,
    error::{HResult, HandlerError},
    valves::valve::{AcronymList, ValveAcronym},
};

/// List All Valves
///
/// List every distinct valve acronym stored, regardless of the BOP the
/// valves are mounted on. An empty list is not an error.
#[utoipa::path(
    responses(
        (status = OK, description = "Distinct valve acronyms", body = AcronymList),
        (status = UNAUTHORIZED, description = "Missing, invalid or expired token", body = HandlerError)
    ),
    tag = "valves",
    security(("token" = []))
)]
#[get("/valvula/all")]
pub async fn list_all(db: DB, _token: AccessToken) -> HResult<Json<AcronymList>> {
    let valvulas = db
        .list_valve_acronyms()
        .await?
        .into_iter()
        .map(|acronym| ValveAcronym { acronym })
        .collect();

    Ok(Json(AcronymList { valvulas }))
}
