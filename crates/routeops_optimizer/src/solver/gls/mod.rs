pub mod arc_penalties;
