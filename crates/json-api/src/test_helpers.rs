//! Test helpers.

use std::sync::Arc;

use dispensary_app::{
    auth::{MockAuthService, SessionUuid, UserUuid},
    context::AppContext,
    domain::{
        carts::MockCartsService,
        catalog::{
            MockCatalogService,
            models::{Branch, BranchUuid, Product, ProductUuid},
        },
        orders::MockOrdersService,
    },
};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::SessionContext, state::State};

pub(crate) const TEST_USER_UUID: UserUuid = UserUuid::from_uuid(Uuid::nil());
pub(crate) const TEST_BRANCH_UUID: BranchUuid = BranchUuid::from_uuid(Uuid::max());

fn strict_catalog_mock() -> MockCatalogService {
    let mut catalog = MockCatalogService::new();

    catalog.expect_list_branches().never();
    catalog.expect_get_branch().never();
    catalog.expect_list_catalog().never();
    catalog.expect_get_product().never();
    catalog.expect_get_available_quantity().never();

    catalog
}

fn strict_carts_mock() -> MockCartsService {
    let mut carts = MockCartsService::new();

    carts.expect_list_cart().never();
    carts.expect_add_to_cart().never();
    carts.expect_update_quantity().never();
    carts.expect_remove_item().never();

    carts
}

fn strict_orders_mock() -> MockOrdersService {
    let mut orders = MockOrdersService::new();

    orders.expect_place_order().never();
    orders.expect_list_orders().never();

    orders
}

fn strict_auth_mock() -> MockAuthService {
    let mut auth = MockAuthService::new();

    auth.expect_register().never();
    auth.expect_authenticate().never();
    auth.expect_get_user().never();
    auth.expect_open_session().never();
    auth.expect_resolve_session().never();
    auth.expect_select_branch().never();
    auth.expect_sign_out().never();
    auth.expect_close_session().never();

    auth
}

/// Service mocks; every service not replaced by a test rejects all calls.
pub(crate) struct TestServices {
    pub catalog: MockCatalogService,
    pub carts: MockCartsService,
    pub orders: MockOrdersService,
    pub auth: MockAuthService,
}

impl Default for TestServices {
    fn default() -> Self {
        Self {
            catalog: strict_catalog_mock(),
            carts: strict_carts_mock(),
            orders: strict_orders_mock(),
            auth: strict_auth_mock(),
        }
    }
}

impl TestServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            catalog: Arc::new(self.catalog),
            carts: Arc::new(self.carts),
            orders: Arc::new(self.orders),
            auth: Arc::new(self.auth),
        })
    }

    /// Serve `route` with the mocks in the state and `context` in the depot.
    pub(crate) fn service(self, context: SessionContext, route: Router) -> Service {
        Service::new(
            Router::new()
                .hoop(inject(self.into_state()))
                .hoop(inject_session(context))
                .push(route),
        )
    }
}

pub(crate) fn inject_session(context: SessionContext) -> impl Handler {
    inject(context)
}

/// Signed-in user with the test branch selected.
pub(crate) fn signed_in() -> SessionContext {
    SessionContext {
        session: SessionUuid::from_uuid(Uuid::nil()),
        user: Some(TEST_USER_UUID),
        branch: Some(TEST_BRANCH_UUID),
    }
}

/// Anonymous visitor with the test branch selected.
pub(crate) fn anonymous_with_branch() -> SessionContext {
    SessionContext {
        user: None,
        ..signed_in()
    }
}

pub(crate) fn make_branch(uuid: BranchUuid) -> Branch {
    Branch {
        uuid,
        name: "Main Street Pharmacy".to_string(),
        address: "123 Main St, Cityville".to_string(),
        phone: Some("123-456-7890".to_string()),
    }
}

pub(crate) fn make_product(uuid: ProductUuid) -> Product {
    Product {
        uuid,
        name: "Paracetamol 500mg".to_string(),
        brand: Some("MediCare".to_string()),
        category: Some("Pain Relief".to_string()),
        description: None,
        image_filename: None,
        price: 30_00,
    }
}
