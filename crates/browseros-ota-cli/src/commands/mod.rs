pub mod inspect;
pub mod package;
pub mod publish;
pub mod sign;
