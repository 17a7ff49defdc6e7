pub mod actor;
pub mod analytics;
pub mod comment;
pub mod drama;
pub mod episode;
pub mod genre;
pub mod history;
pub mod review;
pub mod season;
pub mod user;
pub mod watchlist;
