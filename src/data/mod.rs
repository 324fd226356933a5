pub mod export;
pub mod filter;
pub mod paginate;
pub mod record;
pub mod sort;
pub mod store;
