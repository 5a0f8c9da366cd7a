use utoipa::{
    openapi::security::{ApiKey, ApiKeyValue, SecurityScheme},
    Modify, OpenApi,
};
use utoipa_rapidoc::RapiDoc;

use crate::{
    auth::{routes::AuthApiDocs, token_issuing::ACCESS_COOKIE_NAME},
    valves::routes::ValvesApiDocs,
};

pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";
pub const DOCS_UI_PATH: &str = "/docs";

#[derive(OpenApi)]
#[openapi(info(
    title = "BOP valve registry",
    description = "User authentication and read-only listing of BOP valves"
))]
pub struct ApiDocs;

pub fn setup_oapi() -> utoipa::openapi::OpenApi {
    let mut oapi = ApiDocs::openapi();

    oapi.merge(AuthApiDocs::openapi());
    oapi.merge(ValvesApiDocs::openapi());

    // after merging so the scheme isn't lost with the merged components
    TokenSecurityAddon.modify(&mut oapi);

    oapi
}

/// Serves the OpenAPI document and a RapiDoc UI on top of it.
pub fn rapidoc() -> RapiDoc<'static, 'static, 'static> {
    RapiDoc::with_openapi(OPENAPI_JSON_PATH, setup_oapi()).path(DOCS_UI_PATH)
}

struct TokenSecurityAddon;

impl Modify for TokenSecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "token",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(ACCESS_COOKIE_NAME))),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_route() {
        let oapi = setup_oapi();
        let paths: Vec<&String> = oapi.paths.paths.keys().collect();

        for path in [
            "/auth/register",
            "/auth/login",
            "/auth/quemeusou",
            "/auth/logout",
            "/valvula/all",
            "/valvula/",
        ] {
            assert!(
                oapi.paths.paths.contains_key(path),
                "{} missing from {:?}",
                path,
                paths
            );
        }

        let components = oapi.components.expect("components");
        assert!(components.security_schemes.contains_key("token"));
    }
}
