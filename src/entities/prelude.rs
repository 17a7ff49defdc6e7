pub use super::actors::Entity as Actors;
pub use super::comments::Entity as Comments;
pub use super::drama_actors::Entity as DramaActors;
pub use super::drama_genres::Entity as DramaGenres;
pub use super::dramas::Entity as Dramas;
pub use super::episodes::Entity as Episodes;
pub use super::genres::Entity as Genres;
pub use super::reviews::Entity as Reviews;
pub use super::seasons::Entity as Seasons;
pub use super::users::Entity as Users;
pub use super::watch_history::Entity as WatchHistory;
pub use super::watchlists::Entity as Watchlists;
