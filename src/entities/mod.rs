pub mod prelude;

pub mod actors;
pub mod comments;
pub mod drama_actors;
pub mod drama_genres;
pub mod dramas;
pub mod episodes;
pub mod genres;
pub mod reviews;
pub mod seasons;
pub mod users;
pub mod watch_history;
pub mod watchlists;
