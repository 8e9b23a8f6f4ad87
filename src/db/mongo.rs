use std::sync::Arc;
use std::time::Duration;

use mongodb::{
    bson::doc,
    options::{ClientOptions, ServerApi, ServerApiVersion},
    Client,
};

/// All collections live in this single database.
pub const DB_NAME: &str = "TravelSage";

pub async fn create_mongo_client(uri: &str) -> Arc<Client> {
    println!("Connecting to MongoDB: {}", uri);

    let mut options = ClientOptions::parse(uri)
        .await
        .expect("MongoDB URI may be incorrect! Failed to parse.");

    options.connect_timeout = Some(Duration::from_secs(10));
    options.server_selection_timeout = Some(Duration::from_secs(10));
    options.max_pool_size = Some(10);
    options.min_pool_size = Some(1);
    // Pin the stable server API for MongoDB 5.0+
    options.server_api = Some(ServerApi::builder().version(ServerApiVersion::V1).build());

    let client = Client::with_options(options).expect("Failed to create MongoDB client");

    // Ping once so connectivity problems show up at startup instead of on the
    // first request.
    match client.database(DB_NAME).run_command(doc! { "ping": 1 }).await {
        Ok(_) => println!("Connected to MongoDB"),
        Err(e) => {
            eprintln!("WARNING: MongoDB ping failed at startup: {}", e);
            eprintln!("The API may still work, but some functionality might be impaired");
        }
    }

    Arc::new(client)
}
