//! Persisted key space.
//!
//! | key                     | value                      |
//! |-------------------------|----------------------------|
//! | `user:{username}`       | `Account` JSON             |
//! | `session:user`          | raw username               |
//! | `session:game`          | raw game display name      |
//! | `prices:{username}:{g}` | `PriceTable` JSON          |
//! | `pilots:{username}`     | `Vec<JobRecord>` JSON      |

use crate::config::Game;

pub const SESSION_USER: &str = "session:user";
pub const SESSION_GAME: &str = "session:game";

pub fn user_key(username: &str) -> String {
    format!("user:{username}")
}

pub fn prices_key(username: &str, game: Game) -> String {
    format!("prices:{username}:{}", game.slug())
}

pub fn jobs_key(username: &str) -> String {
    format!("pilots:{username}")
}
