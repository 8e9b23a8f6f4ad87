use mongodb::{bson::doc, Client};

use crate::db::mongo::DB_NAME;
use crate::models::activity::Activity;
use crate::models::destination::Destination;
use crate::models::restaurant::Restaurant;

/// Catalog entities have no user-facing create path, so empty collections are
/// populated with sample data at startup.
pub async fn seed_catalog(client: &Client) -> Result<(), mongodb::error::Error> {
    let db = client.database(DB_NAME);

    let destinations: mongodb::Collection<Destination> = db.collection("Destinations");
    if destinations.count_documents(doc! {}).await? == 0 {
        destinations.insert_many(sample_destinations()).await?;
        println!("Seeded destinations");
    }

    let restaurants: mongodb::Collection<Restaurant> = db.collection("Restaurants");
    if restaurants.count_documents(doc! {}).await? == 0 {
        restaurants.insert_many(sample_restaurants()).await?;
        println!("Seeded restaurants");
    }

    let activities: mongodb::Collection<Activity> = db.collection("Activities");
    if activities.count_documents(doc! {}).await? == 0 {
        activities.insert_many(sample_activities()).await?;
        println!("Seeded activities");
    }

    Ok(())
}

pub fn sample_destinations() -> Vec<Destination> {
    vec![
        destination(
            "Paris",
            "France",
            "Europe",
            "Experience the city of lights with its iconic landmarks, world-class cuisine, and romantic ambiance.",
            "https://images.unsplash.com/photo-1523906834658-6e24ef2386f9?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
            4.8,
            1200,
            &["Culture", "Romance", "Food"],
        ),
        destination(
            "Tokyo",
            "Japan",
            "Asia",
            "Blend of ultramodern and traditional with buzzing districts, historic temples, and incredible food scene.",
            "https://images.unsplash.com/photo-1542051841857-5f90071e7989?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
            4.9,
            1800,
            &["Adventure", "Food", "Culture"],
        ),
        destination(
            "Santorini",
            "Greece",
            "Europe",
            "Stunning sunsets, whitewashed buildings, crystal blue waters, and volcanic beaches await.",
            "https://images.unsplash.com/photo-1596422846543-75c6fc197f07?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
            4.7,
            1500,
            &["Beach", "Romance", "Adventure"],
        ),
        destination(
            "Bali",
            "Indonesia",
            "Asia",
            "Tropical paradise with lush rice terraces, sacred temples, vibrant coral reefs, and wellness retreats.",
            "https://images.unsplash.com/photo-1512036666432-2181c1f26420?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
            4.6,
            1100,
            &["Wellness", "Nature", "Beach"],
        ),
        destination(
            "New York City",
            "USA",
            "North America",
            "The city that never sleeps offers iconic skyscrapers, diverse neighborhoods, world-class entertainment.",
            "https://images.unsplash.com/photo-1534351590666-13e3e96b5017?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
            4.5,
            1600,
            &["Urban", "Culture", "Food"],
        ),
        destination(
            "Barcelona",
            "Spain",
            "Europe",
            "Known for stunning architecture, Mediterranean beaches, vibrant nightlife, and amazing food scene.",
            "https://images.unsplash.com/photo-1518548419970-58e3b4079ab2?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
            4.7,
            1300,
            &["Architecture", "Food", "Beach"],
        ),
    ]
}

pub fn sample_restaurants() -> Vec<Restaurant> {
    vec![
        restaurant(
            "El Jardin",
            "Authentic Spanish cuisine with a modern twist, featuring locally sourced ingredients and panoramic city views.",
            "https://images.unsplash.com/photo-1514933651103-005eec06c04b?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
            "Barcelona, Spain",
            Some("0.8 miles away"),
            &["Mediterranean", "Spanish"],
            "$$",
            4.8,
            243,
            Some("Reservations available tonight"),
        ),
        restaurant(
            "Sakura Sushi",
            "Traditional omakase experience with the freshest seafood from Tsukiji market, prepared by master chef Tanaka.",
            "https://images.unsplash.com/photo-1517248135467-4c7edcad34c4?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
            "Tokyo, Japan",
            Some("1.2 miles away"),
            &["Japanese", "Sushi"],
            "$$$",
            4.9,
            178,
            Some("Few spots left for tomorrow"),
        ),
        restaurant(
            "Trattoria Bella Italia",
            "Family-run trattoria serving authentic Roman dishes using recipes passed down through generations.",
            "https://images.unsplash.com/photo-1424847651672-bf20a4b0982b?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
            "Rome, Italy",
            Some("0.5 miles away"),
            &["Italian", "Pasta"],
            "$$",
            4.7,
            321,
            Some("Reservations available tonight"),
        ),
        restaurant(
            "Green Garden",
            "Farm-to-table vegetarian restaurant with organic ingredients grown in their own garden with Balinese influences.",
            "https://images.unsplash.com/photo-1555396273-367ea4eb4db5?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
            "Bali, Indonesia",
            Some("2.1 miles away"),
            &["Vegetarian", "Organic"],
            "$$",
            4.6,
            196,
            None,
        ),
    ]
}

pub fn sample_activities() -> Vec<Activity> {
    vec![
        activity(
            "Paella Cooking Class",
            "Learn to make authentic Spanish paella with a local chef, including market tour and wine.",
            "https://images.unsplash.com/photo-1606820854416-439b3305ff39?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
            "Barcelona, Spain",
            65,
            4.9,
            "3 hours",
            &["Food", "Cultural"],
            false,
        ),
        activity(
            "Gaudí Architecture Tour",
            "Skip-the-line guided tour of Sagrada Familia and other Gaudí masterpieces in Barcelona.",
            "https://images.unsplash.com/photo-1566073771259-6a8506099945?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
            "Barcelona, Spain",
            49,
            4.8,
            "4 hours",
            &["Cultural", "Architecture"],
            false,
        ),
        activity(
            "Mediterranean Sailing",
            "3-hour sailing experience along Barcelona's coast with drinks and snacks included.",
            "https://images.unsplash.com/photo-1583422409516-2895a77efded?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
            "Barcelona, Spain",
            79,
            4.7,
            "3 hours",
            &["Adventure", "Outdoor"],
            false,
        ),
        activity(
            "Tapas Walking Tour",
            "Evening food tour visiting 4 authentic tapas bars with local guide and wine pairings.",
            "https://images.unsplash.com/photo-1614555383830-848e7561120f?ixlib=rb-4.0.3&auto=format&fit=crop&w=800&q=80",
            "Barcelona, Spain",
            85,
            4.9,
            "4 hours",
            &["Food", "Cultural"],
            true,
        ),
    ]
}

fn destination(
    name: &str,
    country: &str,
    continent: &str,
    description: &str,
    image_url: &str,
    rating: f32,
    average_cost: i32,
    interests: &[&str],
) -> Destination {
    Destination {
        id: None,
        name: name.to_string(),
        country: country.to_string(),
        continent: continent.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        rating: Some(rating),
        average_cost: Some(average_cost),
        interests: interests.iter().map(|s| s.to_string()).collect(),
        is_featured: Some(true),
        created_at: None,
        updated_at: None,
    }
}

fn restaurant(
    name: &str,
    description: &str,
    image_url: &str,
    location: &str,
    distance: Option<&str>,
    cuisine: &[&str],
    price_range: &str,
    rating: f32,
    review_count: i32,
    opening_time: Option<&str>,
) -> Restaurant {
    Restaurant {
        id: None,
        name: name.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        location: location.to_string(),
        distance: distance.map(|s| s.to_string()),
        cuisine: cuisine.iter().map(|s| s.to_string()).collect(),
        price_range: price_range.to_string(),
        rating: Some(rating),
        review_count: Some(review_count),
        opening_time: opening_time.map(|s| s.to_string()),
        is_recommended: Some(true),
        created_at: None,
        updated_at: None,
    }
}

fn activity(
    name: &str,
    description: &str,
    image_url: &str,
    location: &str,
    price: i32,
    rating: f32,
    duration: &str,
    category: &[&str],
    is_recommended: bool,
) -> Activity {
    Activity {
        id: None,
        name: name.to_string(),
        description: description.to_string(),
        image_url: image_url.to_string(),
        location: location.to_string(),
        price,
        currency: Some("EUR".to_string()),
        rating: Some(rating),
        duration: Some(duration.to_string()),
        category: category.iter().map(|s| s.to_string()).collect(),
        is_recommended: Some(is_recommended),
        created_at: None,
        updated_at: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn destinations_include_paris_and_tokyo() {
        let destinations = sample_destinations();

        assert_eq!(destinations.len(), 6);
        assert!(destinations
            .iter()
            .any(|d| d.name == "Paris" && d.country == "France"));
        assert!(destinations
            .iter()
            .any(|d| d.name == "Tokyo" && d.country == "Japan"));
        assert!(destinations.iter().all(|d| d.is_featured == Some(true)));
    }

    #[test]
    fn paris_query_matches_only_paris() {
        // Mirrors the search route's case-insensitive substring match over
        // name/country/description.
        let matches = |d: &Destination, q: &str| {
            d.name.to_lowercase().contains(q)
                || d.country.to_lowercase().contains(q)
                || d.description.to_lowercase().contains(q)
        };

        let destinations = sample_destinations();
        let hits: Vec<&Destination> = destinations.iter().filter(|d| matches(d, "paris")).collect();

        assert!(hits.iter().any(|d| d.name == "Paris"));
        assert!(hits.iter().all(|d| d.name != "Tokyo"));
    }

    #[test]
    fn restaurants_carry_cuisine_tags_and_price_ranges() {
        let restaurants = sample_restaurants();

        assert_eq!(restaurants.len(), 4);
        for restaurant in &restaurants {
            assert!(!restaurant.cuisine.is_empty());
            assert!(restaurant.price_range.starts_with('$'));
        }
    }

    #[test]
    fn activities_are_located_for_destination_lookup() {
        let activities = sample_activities();

        assert!(!activities.is_empty());
        assert!(activities.iter().all(|a| !a.location.is_empty()));
        assert!(activities.iter().any(|a| a.is_recommended == Some(true)));
    }
}
