pub mod batch;
pub mod pair;
pub mod trajectory;
