pub mod index;
pub mod sse;
pub mod statistics;
pub mod students;
