mod collation_port;
mod students_port;

pub use collation_port::{Collation, OrdinalCollation};
pub use students_port::StudentsPort;
