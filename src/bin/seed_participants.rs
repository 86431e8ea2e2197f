use dotenvy::dotenv;
use serde::Deserialize;
use sqlx::sqlite::SqlitePoolOptions;
use std::env;
use uuid::Uuid;

use whereabouts::database::participant_repo;

#[derive(Debug, Deserialize)]
struct SeedParticipant {
    name: String,
    email: String,
    geotag: String,
    status: bool,
}

#[tokio::main]
async fn main() {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let db_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = SqlitePoolOptions::new()
        .connect(&db_url)
        .await
        .expect("cannot connect to database");
    participant_repo::ensure_schema(&pool)
        .await
        .expect("cannot create participants table");

    let seeds: Vec<SeedParticipant> = match env::var("SEED_FILE").ok() {
        Some(path) => {
            let raw = std::fs::read_to_string(&path).expect("cannot read SEED_FILE");
            serde_json::from_str(&raw).expect("SEED_FILE must be a JSON array of participants")
        }
        None => demo_participants(),
    };

    let mut inserted = 0u64;
    for seed in &seeds {
        let id = Uuid::new_v4().to_string();
        match participant_repo::insert_participant(
            &pool,
            &id,
            &seed.name,
            &seed.email,
            &seed.geotag,
            seed.status,
        )
        .await
        {
            Ok(n) => inserted += n,
            Err(e) => {
                eprintln!("seed insert failed for {}: {}", seed.email, e);
                std::process::exit(1);
            }
        }
    }

    println!("participant seed: inserted={} of {}", inserted, seeds.len());
}

fn demo_participants() -> Vec<SeedParticipant> {
    vec![
        SeedParticipant {
            name: "Ava Solutions".to_string(),
            email: "solutions@gmail.com".to_string(),
            geotag: "Main St".to_string(),
            status: true,
        },
        SeedParticipant {
            name: "Ben Harsono".to_string(),
            email: "ben@example.com".to_string(),
            geotag: "Elm Street".to_string(),
            status: false,
        },
        SeedParticipant {
            name: "Cita Rahma".to_string(),
            email: "cita@example.com".to_string(),
            geotag: "Springfield".to_string(),
            status: true,
        },
    ]
}
