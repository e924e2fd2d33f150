pub mod aliases;
pub mod deals;
pub mod flatten;
pub mod values;
pub mod work_orders;


pub use deals::clean_deals;
pub use flatten::{
    flatten_record,
    flatten_records,
    FlatRecord,
    FlatTable,
};
pub use work_orders::clean_work_orders;
