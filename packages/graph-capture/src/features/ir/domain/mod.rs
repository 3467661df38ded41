mod intermediate;

pub use intermediate::IntermediateRepresentation;
