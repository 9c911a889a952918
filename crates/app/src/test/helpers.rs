//! Test Helpers

use crate::{
    auth::UserUuid,
    domain::{
        carts::{
            CartsService, CartsServiceError,
            models::{CartItemUuid, CartLine, NewCartItem},
        },
        catalog::models::{BranchUuid, ProductUuid},
    },
    test::TestContext,
};

pub(crate) async fn add_to_cart(
    ctx: &TestContext,
    user: UserUuid,
    branch: BranchUuid,
    product: ProductUuid,
    quantity: i64,
) -> Result<CartLine, CartsServiceError> {
    ctx.carts
        .add_to_cart(
            user,
            branch,
            NewCartItem {
                uuid: CartItemUuid::new(),
                product_uuid: product,
                quantity,
            },
        )
        .await
}
