use actix_web::{
    get,
    web::{Json, Query},
};
use log::debug;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    auth::access_token::AccessToken,
    db::DB,
    error::{macros::err, HResult, HandlerError, IntoHandlerErrorResult},
    valves::valve::{BopId, ValveList},
};

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BopQuery {
    /// Id of the BOP whose valves should be listed
    pub bop_id: BopId,
}

/// List BOP Valves
///
/// List the valves mounted on a single BOP.
#[utoipa::path(
    params(BopQuery),
    responses(
        (status = OK, description = "Valves of the BOP", body = ValveList),
        (status = NOT_FOUND, description = "No such BOP, or the BOP has no valves", body = HandlerError),
        (status = UNAUTHORIZED, description = "Missing, invalid or expired token", body = HandlerError),
        (status = UNPROCESSABLE_ENTITY, description = "Missing or non integer bop_id", body = HandlerError)
    ),
    tag = "valves",
    security(("token" = []))
)]
#[get("/valvula/")]
pub async fn list_by_bop(
    db: DB,
    token: AccessToken,
    query: Query<BopQuery>,
) -> HResult<Json<ValveList>> {
    let bop = db
        .find_bop(query.bop_id)
        .await?
        .or_err_msg(404, "BOP not found")?;

    debug!("{} listing valves of BOP {} ({})", token.subject, bop.id, bop.name);

    let valves = db.list_valves_of_bop(bop.id).await?;

    if valves.is_empty() {
        return err!(404, "valves not found");
    }

    Ok(Json(ValveList {
        valvulas: valves.into_iter().map(Into::into).collect(),
    }))
}
