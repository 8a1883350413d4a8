use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Declares the bearer security scheme.
///
/// Declared for documentation completeness only; no endpoint enforces it.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearerAuth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Product Catalog API",
        version = "0.1.0",
        description = "REST API for managing a product catalog: CRUD, filtered queries, pagination and soft deletes"
    ),
    servers(
        (url = "/api", description = "API base path")
    ),
    modifiers(&SecurityAddon),
    nest(
        (path = "/v1/products", api = domain_products::handlers::ApiDoc)
    )
)]
pub struct ApiDoc;
