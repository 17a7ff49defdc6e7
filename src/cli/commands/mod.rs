mod dramas;
mod seed;

pub use dramas::{DramaListArgs, cmd_list_dramas};
pub use seed::cmd_seed;
