pub mod market;
pub mod news;
pub mod portfolio;
pub mod stock;
pub mod theme;
