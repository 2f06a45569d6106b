pub mod boat;
pub mod boat_type;

pub use boat::Entity as Boat;
pub use boat_type::Entity as BoatType;
