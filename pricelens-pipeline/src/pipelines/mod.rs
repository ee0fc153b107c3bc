pub mod tag_rank;
