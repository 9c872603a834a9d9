mod clause_id;
mod literal;
mod variable;

pub use clause_id::ClauseId;
pub use literal::Literal;
pub use variable::Variable;
