// Domain layer: records scraped from court sites and the ports the scrapers depend on.

pub mod model;
pub mod ports;
