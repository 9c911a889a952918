use clap::Args;
use dispensary_app::{
    database::{self, Db},
    seeds,
};

#[derive(Debug, Args)]
pub(crate) struct InitArgs {
    /// SQLite connection string
    #[arg(long, env = "DATABASE_URL", default_value = "sqlite://dispensary.db")]
    database_url: String,
}

pub(crate) async fn run(args: InitArgs) -> Result<(), String> {
    let pool = database::connect(&args.database_url)
        .await
        .map_err(|error| format!("failed to connect to database: {error}"))?;

    database::migrate(&pool)
        .await
        .map_err(|error| format!("failed to apply migrations: {error}"))?;

    let summary = seeds::seed(&Db::new(pool))
        .await
        .map_err(|error| format!("failed to seed database: {error}"))?;

    println!("branches_seeded: {}", summary.branches);
    println!("products_seeded: {}", summary.products);
    println!("stock_rows_seeded: {}", summary.stock);

    Ok(())
}
