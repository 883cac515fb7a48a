pub mod department;
pub mod employee;
pub mod membership_policy;
