pub mod capacity;
pub mod feedback;
