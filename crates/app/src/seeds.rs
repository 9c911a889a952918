//! First-run seed data.

use sqlx::{Sqlite, Transaction};
use tracing::info;

use crate::{
    database::Db,
    domain::catalog::{
        models::{Branch, BranchUuid, NewBranch, NewProduct, ProductUuid},
        repositories::{SqliteBranchesRepository, SqliteProductsRepository, SqliteStockRepository},
    },
};

const MAIN_STREET: &str = "Main Street Pharmacy";
const DOWNTOWN: &str = "Downtown Pharmacy";
const PARACETAMOL: &str = "Paracetamol 500mg";
const MULTIVITAMIN: &str = "Multivitamin Tablets";

const SEED_STOCK: [(&str, &str, i64); 4] = [
    (MAIN_STREET, PARACETAMOL, 50),
    (MAIN_STREET, MULTIVITAMIN, 20),
    (DOWNTOWN, PARACETAMOL, 30),
    (DOWNTOWN, MULTIVITAMIN, 10),
];

/// Rows written by a seeding pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub branches: usize,
    pub products: usize,
    pub stock: usize,
}

impl SeedSummary {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

fn seed_branches() -> Vec<NewBranch> {
    vec![
        NewBranch {
            uuid: BranchUuid::new(),
            name: MAIN_STREET.to_string(),
            address: "123 Main St, Cityville".to_string(),
            phone: Some("123-456-7890".to_string()),
        },
        NewBranch {
            uuid: BranchUuid::new(),
            name: DOWNTOWN.to_string(),
            address: "456 Elm Rd, Cityville".to_string(),
            phone: Some("098-765-4321".to_string()),
        },
    ]
}

fn seed_products() -> Vec<NewProduct> {
    vec![
        NewProduct {
            uuid: ProductUuid::new(),
            name: PARACETAMOL.to_string(),
            brand: Some("MediCare".to_string()),
            category: Some("Pain Relief".to_string()),
            description: Some("Paracetamol is used to treat mild to moderate pain.".to_string()),
            image_filename: None,
            price: 30_00,
        },
        NewProduct {
            uuid: ProductUuid::new(),
            name: MULTIVITAMIN.to_string(),
            brand: Some("HealthPlus".to_string()),
            category: Some("Vitamins".to_string()),
            description: Some("Daily multivitamin to supplement nutrients.".to_string()),
            image_filename: None,
            price: 150_00,
        },
    ]
}

/// Insert the demo branches, products and stock into empty tables.
///
/// Branches are seeded when the branch table is empty. Products are seeded
/// when the product table is empty, and only then is stock seeded for them
/// at whichever seed branches exist.
///
/// # Errors
///
/// Returns an error when a query fails; nothing is written in that case.
pub async fn seed(db: &Db) -> Result<SeedSummary, sqlx::Error> {
    let branches_repository = SqliteBranchesRepository::new();
    let products_repository = SqliteProductsRepository::new();

    let mut tx = db.begin_write().await?;
    let mut summary = SeedSummary::default();

    if branches_repository.count_branches(&mut tx).await? == 0 {
        for branch in seed_branches() {
            branches_repository.create_branch(&mut tx, branch).await?;
            summary.branches += 1;
        }
    }

    if products_repository.count_products(&mut tx).await? == 0 {
        let mut products = Vec::new();

        for product in seed_products() {
            let product = products_repository.create_product(&mut tx, product).await?;
            products.push((product.name, product.uuid));
            summary.products += 1;
        }

        let branches = branches_repository.list_branches(&mut tx).await?;

        summary.stock = seed_stock(&mut tx, &branches, &products).await?;
    }

    tx.commit().await?;

    if !summary.is_empty() {
        info!(
            branches = summary.branches,
            products = summary.products,
            stock = summary.stock,
            "seeded catalog"
        );
    }

    Ok(summary)
}

async fn seed_stock(
    tx: &mut Transaction<'_, Sqlite>,
    branches: &[Branch],
    products: &[(String, ProductUuid)],
) -> Result<usize, sqlx::Error> {
    let stock_repository = SqliteStockRepository::new();
    let mut written = 0;

    for (branch_name, product_name, quantity) in SEED_STOCK {
        let branch = branches.iter().find(|branch| branch.name == branch_name);
        let product = products.iter().find(|(name, _)| name == product_name);

        let (Some(branch), Some((_, product))) = (branch, product) else {
            continue;
        };

        stock_repository
            .set_quantity(tx, branch.uuid, *product, quantity)
            .await?;

        written += 1;
    }

    Ok(written)
}
