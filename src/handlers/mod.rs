pub mod lambda;
pub mod rest;
