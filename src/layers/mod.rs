pub mod heat;
pub mod marker;
