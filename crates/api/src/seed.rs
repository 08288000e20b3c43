//! Demo data for local runs. Member and staff CRUD belong to another
//! service, so a standalone instance needs a few directory rows to be
//! usable.

use chrono::{Duration, Utc};

use infra::db::Db;
use infra::repos::{instructors, members, CreateMember};

pub fn seed_demo_data(db: &Db) {
    let yoga = instructors::create(db, "Maya Lindgren");
    let strength = instructors::create(db, "Tom Okafor");

    let demo_members = [
        ("Alice", Some("Bauer"), "alice.bauer@example.com", 365),
        ("Ben", Some("Okoye"), "ben.okoye@example.com", 90),
        ("Carla", None, "carla@example.com", 30),
    ];
    for (first, last, email, days) in demo_members {
        members::create(
            db,
            CreateMember {
                first_name: first.to_string(),
                last_name: last.map(str::to_string),
                email: email.to_string(),
                membership_expires_at: Some(Utc::now() + Duration::days(days)),
            },
        );
    }

    tracing::info!(
        instructors = %format!("{}, {}", yoga.display_name, strength.display_name),
        members = demo_members.len(),
        "seeded demo directory data"
    );
}
