//! Use case implementations.

mod create_student_use_case;
mod delete_student_use_case;
mod load_roster_use_case;

pub use create_student_use_case::CreateStudentUseCase;
pub use delete_student_use_case::DeleteStudentUseCase;
pub use load_roster_use_case::LoadRosterUseCase;
