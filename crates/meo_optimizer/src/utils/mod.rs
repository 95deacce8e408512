pub mod arena_index;
