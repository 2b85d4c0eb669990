pub mod batched_feedback;
pub mod factory;
pub mod inline;
pub mod kinds;
pub mod ports;
pub mod remote;
pub mod worker_pool;
