//! App Router

use salvo::Router;

use crate::{accounts, auth, auth::middleware::require_principal, cart, items, orders};

pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("items")
                .get(items::index::handler)
                .push(authenticated().post(items::create::handler))
                .push(
                    Router::with_path("{item}")
                        .get(items::get::handler)
                        .push(
                            authenticated()
                                .put(items::update::handler)
                                .patch(items::update::handler)
                                .delete(items::delete::handler),
                        ),
                ),
        )
        .push(
            Router::with_path("cart")
                .hoop(require_principal)
                .get(cart::get::handler)
                .post(cart::add::handler)
                .delete(cart::clear::handler)
                .push(Router::with_path("size").get(cart::size::handler))
                .push(
                    Router::with_path("{item}")
                        .get(cart::item::handler)
                        .delete(cart::remove::handler),
                ),
        )
        .push(
            Router::with_path("orders")
                .hoop(require_principal)
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(
                    Router::with_path("{order}")
                        .get(orders::get::handler)
                        .put(orders::update::handler)
                        .patch(orders::update::handler)
                        .delete(orders::delete::handler),
                ),
        )
        .push(Router::with_path("register").post(accounts::register::handler))
        .push(Router::with_path("login").post(accounts::login::handler))
        .push(
            authenticated()
                .push(Router::with_path("logout").post(accounts::logout::handler))
                .push(
                    Router::with_path("verify-password").post(accounts::verify_password::handler),
                )
                .push(Router::with_path("authenticated").get(accounts::authenticated::handler))
                .push(Router::with_path("admin").get(accounts::admin::handler))
                .push(Router::with_path("user").patch(accounts::preferences::handler)),
        )
}

/// Routes below this one answer 401 to anonymous requests.
fn authenticated() -> Router {
    Router::new().hoop(require_principal)
}
