//! Table gateways

mod artist_table;
mod concert_table;
mod favorite_table;
mod review_table;
mod user_table;

pub use artist_table::ArtistTable;
pub use concert_table::{ConcertDetails, ConcertTable, NewConcert, UserConcert};
pub use favorite_table::FavoriteTable;
pub use review_table::ReviewTable;
pub use user_table::UserTable;
