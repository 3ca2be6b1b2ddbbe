//! Events module - immutable facts the dashboard and journal are built from.

mod events_model;


pub use events_model::{sort_chronologically, DividendPaid, Event, PriceObtained, StocksBought};
