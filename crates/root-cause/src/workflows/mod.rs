pub mod framing;
pub mod rca;
