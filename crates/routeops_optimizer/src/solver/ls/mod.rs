pub mod insert_unassigned;
pub mod inter_relocate;
pub mod inter_swap;
pub mod inter_two_opt_star;
pub mod local_search;
pub mod r#move;
pub mod relocate;
pub mod swap;
pub mod two_opt;
