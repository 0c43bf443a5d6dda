//! Page shells for each route class.
//!
//! Page content comes from the storefront client; the edge only serves a
//! shell once the gate has let the request through.

use axum::{
    extract::Extension,
    response::Html,
    routing::{get, MethodRouter},
    Router,
};

use crate::context::GateContext;

pub fn router() -> Router {
    Router::new()
        .route("/", page("Home"))
        .route("/products", page("Products"))
        .route("/products/*rest", page("Product"))
        .route("/auth/login", page("Sign in"))
        .route("/auth/register", page("Create account"))
        .route("/dashboard", page("Dashboard"))
        .route("/dashboard/*rest", page("Dashboard"))
        .route("/admin", page("Admin"))
        .route("/admin/*rest", page("Admin"))
        .route("/checkout", page("Checkout"))
        .route("/consultation", page("Consultation"))
        .route("/consultation/*rest", page("Consultation"))
        .route("/onboarding", page("Onboarding"))
}

fn page(title: &'static str) -> MethodRouter {
    get(move |ctx: Option<Extension<GateContext>>| async move {
        render_shell(title, ctx.map(|Extension(ctx)| ctx).as_ref())
    })
}

fn render_shell(title: &str, ctx: Option<&GateContext>) -> Html<String> {
    let viewer = match ctx {
        Some(ctx) if ctx.is_authenticated() => {
            let role = if ctx.is_admin() { "admin" } else { "user" };
            match ctx.user_id() {
                Some(id) => format!("signed in as {role} #{id}"),
                None => format!("signed in as {role}"),
            }
        }
        _ => "guest".to_string(),
    };

    Html(format!(
        "<!doctype html>\n<html><head><title>{title} | MediMart</title></head>\
         <body data-viewer=\"{viewer}\"><div id=\"app\"></div></body></html>\n"
    ))
}
