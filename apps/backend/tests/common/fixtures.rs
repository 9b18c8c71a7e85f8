//! Factory functions for request bodies.

use chrono::Utc;
use serde_json::{json, Value};

/// A snapshot matching 10 of 18 points on a 3/3/3 test.
pub fn beginner_snapshot() -> Value {
    json!({
        "points": 10,
        "max_points": 18,
        "accuracy": { "easy": 1.0, "medium": 0.6666666666666666, "hard": 0.3333333333333333 },
        "level": "beginner",
        "answered": 9,
        "correct": 6,
        "total": 9,
        "completed_at": Utc::now(),
    })
}

/// A perfect score on a 3/3/3 test.
pub fn expert_snapshot() -> Value {
    json!({
        "points": 18,
        "max_points": 18,
        "accuracy": { "easy": 1.0, "medium": 1.0, "hard": 1.0 },
        "level": "expert",
        "answered": 9,
        "correct": 9,
        "total": 9,
        "completed_at": Utc::now(),
    })
}

pub fn profile_request(display_name: &str) -> Value {
    json!({ "display_name": display_name })
}
