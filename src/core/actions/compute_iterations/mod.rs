pub mod backends;
pub mod compute_iterations;
pub mod compute_iterations_parallel_rayon;
pub mod errors;
pub mod ports;
