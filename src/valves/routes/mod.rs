use utoipa::OpenApi;

pub mod list_all;
pub mod list_by_bop;

pub fn configure_app(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(list_all::list_all)
        .service(list_by_bop::list_by_bop);
}

#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "valves", description = "Listing of valves stored in the database")
    ),
    paths(
        list_all::list_all,
        list_by_bop::list_by_bop,
    ),
    components(schemas(
        crate::valves::valve::ValveView,
        crate::valves::valve::ValveAcronym,
        crate::valves::valve::ValveList,
        crate::valves::valve::AcronymList,
    ))
)]
pub struct ValvesApiDocs;
