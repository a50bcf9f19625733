pub mod select;
pub mod simple_choice;

pub use select::Select;
pub use simple_choice::SimpleChoice;
