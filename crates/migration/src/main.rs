use sea_orm::Database;
use sea_orm_migration::prelude::*;

use migration::Migrator;

const USAGE: &str = "usage: migration [up|down|fresh|status]
reads the connection string from DATABASE_URL";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let command = std::env::args().nth(1).unwrap_or_else(|| "up".to_string());

    let db_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite:./spendwise.db?mode=rwc".to_string());
    println!("migration {command} against {db_url}");

    let db = Database::connect(&db_url).await?;

    match command.as_str() {
        "up" => {
            Migrator::up(&db, None).await?;
            println!("schema is up to date");
        }
        "down" => {
            Migrator::down(&db, None).await?;
            println!("reverted the latest migration");
        }
        "fresh" => {
            Migrator::fresh(&db).await?;
            println!("dropped and recreated the schema");
        }
        "status" => Migrator::status(&db).await?,
        other => {
            eprintln!("unknown command \"{other}\"\n{USAGE}");
            std::process::exit(2);
        }
    }

    Ok(())
}
