use crate::{define_index_newtype, solver::solution::route::WorkingSolutionRoute};

// One route per vehicle, so a route index is also the vehicle index.
define_index_newtype!(RouteIdx, WorkingSolutionRoute);
