//! Инфраструктурный слой вокруг покерного движка:
//! - генерация ID столов;
//! - RNG-реализации для движка.

pub mod ids;
pub mod rng;

pub use ids::*;
pub use rng::*;
