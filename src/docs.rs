use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use medref_core::{GuardState, PermissionKey, Role};

use crate::modules::access::model::{AccessProfile, NavItem, NavigationResponse, RouteCheck};
use crate::modules::pages::model::{LoginPage, PageContext};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::router::health,
        crate::modules::pages::controller::login_page,
        crate::modules::access::controller::get_access_profile,
        crate::modules::access::controller::check_route,
        crate::modules::access::controller::get_navigation,
    ),
    components(
        schemas(
            Role,
            PermissionKey,
            GuardState,
            AccessProfile,
            RouteCheck,
            NavItem,
            NavigationResponse,
            PageContext,
            LoginPage,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Access", description = "Role, permission and route checks for the current session"),
        (name = "Pages", description = "Login entry point; every other page is guarded"),
        (name = "Health", description = "Liveness")
    ),
    info(
        title = "Medref Access API",
        version = "0.1.0",
        description = "Role-based access control and page guarding for the hospital referral desk.",
        license(
            name = "MIT"
        )
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            )
        }
    }
}
