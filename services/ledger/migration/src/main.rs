use sea_orm_migration::prelude::*;

use holeout_ledger_migration::Migrator;

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
