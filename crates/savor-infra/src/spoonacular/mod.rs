//! Remote recipe catalog backed by the Spoonacular REST API.

mod client;
mod models;

pub use client::{SpoonacularClient, SpoonacularConfig};
