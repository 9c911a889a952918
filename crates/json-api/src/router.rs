//! App Router

use salvo::Router;

use crate::{accounts, branches, carts, catalog, checkout, home, orders, products, sessions};

/// Storefront routes, all resolved against the presenting session.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(sessions::middleware::handler)
        .get(home::handler)
        .push(Router::with_path("branches").get(branches::index::handler))
        .push(Router::with_path("select_branch/{branch}").get(branches::select::handler))
        .push(Router::with_path("register").post(accounts::register::handler))
        .push(Router::with_path("login").post(accounts::login::handler))
        .push(Router::with_path("logout").get(accounts::logout::handler))
        .push(Router::with_path("account").get(accounts::get::handler))
        .push(Router::with_path("orders").get(orders::index::handler))
        .push(
            Router::new()
                .hoop(sessions::middleware::require_branch)
                .push(Router::with_path("catalog").get(catalog::index::handler))
                .push(
                    Router::with_path("product/{product}")
                        .get(products::get::handler)
                        .post(products::add_to_cart::handler),
                )
                .push(
                    Router::with_path("cart")
                        .get(carts::get::handler)
                        .post(carts::update::handler)
                        .push(Router::with_path("{line}").delete(carts::remove::handler)),
                )
                .push(
                    Router::with_path("checkout")
                        .get(checkout::get::handler)
                        .post(checkout::create::handler),
                ),
        )
}
