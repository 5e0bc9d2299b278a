pub mod count;
pub mod subscribe;

pub use count::count;
pub use subscribe::subscribe;
